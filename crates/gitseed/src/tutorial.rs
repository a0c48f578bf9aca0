//! Tutorial mode: the generated cheat sheet and the end-of-run walkthrough

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use console::style;
use gitseed_projects::ProjectType;
use serde::Serialize;
use tera::Tera;
use tracing::debug;

use crate::explain::ExecutedStep;
use crate::output;

const TEMPLATE_NAME: &str = "cheatsheet.md";

/// Values the cheat sheet is rendered from
#[derive(Debug, Clone)]
pub struct CheatsheetInput<'a> {
    pub project_type: Option<ProjectType>,
    pub branch: &'a str,
    pub remote_name: &'a str,
    pub remote_url: Option<&'a str>,
    pub steps: &'a [ExecutedStep],
}

#[derive(Serialize)]
struct StepContext<'a> {
    title: &'a str,
    command: &'a str,
}

#[derive(Serialize)]
struct CheatsheetContext<'a> {
    generated: String,
    project_type: &'a str,
    project_label: &'a str,
    branch: &'a str,
    remote_name: &'a str,
    remote_url: &'a str,
    steps: Vec<StepContext<'a>>,
}

/// Render the cheat sheet markdown
pub fn render_cheatsheet(input: &CheatsheetInput<'_>) -> Result<String> {
    let mut tera = Tera::default();
    tera.add_raw_template(TEMPLATE_NAME, include_str!("templates/cheatsheet.md.tera"))?;

    let context = CheatsheetContext {
        generated: chrono::Local::now().format("%Y-%m-%d").to_string(),
        project_type: input.project_type.map(|t| t.as_str()).unwrap_or_default(),
        project_label: input.project_type.map(|t| t.description()).unwrap_or_default(),
        branch: input.branch,
        remote_name: input.remote_name,
        remote_url: input.remote_url.unwrap_or_default(),
        steps: input
            .steps
            .iter()
            .map(|s| StepContext {
                title: s.step.title(),
                command: &s.command,
            })
            .collect(),
    };

    debug!("Rendering cheat sheet for {:?}", input.project_type);
    let rendered = tera.render(TEMPLATE_NAME, &tera::Context::from_serialize(&context)?)?;
    Ok(rendered)
}

/// Render and write the cheat sheet into `dir`, replacing any previous one
pub async fn write_cheatsheet(
    dir: &Utf8Path,
    file_name: &str,
    input: &CheatsheetInput<'_>,
) -> Result<Utf8PathBuf> {
    let path = dir.join(file_name);
    let content = render_cheatsheet(input)?;

    tokio::fs::write(&path, content)
        .await
        .with_context(|| format!("Failed to write {}", path))?;

    Ok(path)
}

/// Print the executed workflow as numbered steps
pub fn print_walkthrough(steps: &[ExecutedStep]) {
    output::header("What just happened");

    if steps.is_empty() {
        output::info("No git commands were run");
        return;
    }

    for (i, executed) in steps.iter().enumerate() {
        println!(
            "  {}. {}",
            style(i + 1).bold(),
            style(executed.step.title()).bold()
        );
        output::command(&executed.command);
    }

    println!();
    output::info("Next: edit some files, then `git add`, `git commit` and `git push`");
}
