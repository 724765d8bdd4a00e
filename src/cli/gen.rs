//! Skeleton generation commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use super::read_input;
use crate::domain::{task_run_template, ResourceKind, TektonDocument};
use crate::yaml;

#[derive(Subcommand)]
pub enum GenCommands {
    /// TaskRun skeleton for a Task or ClusterTask document
    Taskrun {
        /// Input file, or - for stdin
        input: String,

        /// Task name when the file holds several
        #[arg(long)]
        task: Option<String>,
    },
}

pub fn run(cmd: GenCommands, output: &Output) -> Result<()> {
    match cmd {
        GenCommands::Taskrun { input, task } => taskrun(output, &input, task.as_deref()),
    }
}

fn taskrun(output: &Output, input: &str, task: Option<&str>) -> Result<()> {
    let text = read_input(input)?;

    let mut candidates: Vec<TektonDocument> = yaml::documents(&text)
        .filter(|d| d.is_kind(ResourceKind::Task) || d.is_kind(ResourceKind::ClusterTask))
        .collect();

    if let Some(wanted) = task {
        candidates.retain(|d| d.name() == Some(wanted));
        if candidates.is_empty() {
            anyhow::bail!("No Task named '{}' found", wanted);
        }
    }

    let doc = match candidates.first() {
        Some(doc) => doc,
        None => anyhow::bail!("No Task or ClusterTask document found"),
    };

    if candidates.len() > 1 {
        output.warn(&format!(
            "Input holds {} Task documents; generating for '{}' (pick with --task)",
            candidates.len(),
            yaml::metadata_name(doc)
        ));
    }

    let skeleton = match task_run_template(doc) {
        Some(skeleton) => skeleton,
        None => anyhow::bail!("Document is not a Task"),
    };

    output.verbose_ctx(
        "gen",
        &format!("Generated TaskRun skeleton for '{}'", skeleton.spec.task_ref.name),
    );

    if output.is_json() {
        output.data(&skeleton);
    } else {
        let rendered = serde_yaml::to_string(&skeleton)?;
        print!("{}", rendered);
    }

    Ok(())
}
