//! Pipeline task and declared-resource commands

use anyhow::Result;

use super::output::Output;
use super::read_input;
use crate::domain::{
    declared_params, declared_resources, declared_workspaces, pipeline_tasks, ResourceKind,
    TektonDocument,
};
use crate::yaml;

/// Picks the Pipeline documents a command operates on
///
/// With `--pipeline` the name must match; without it, every Pipeline in
/// the input is used.
pub(crate) fn select_pipelines(text: &str, name: Option<&str>) -> Result<Vec<TektonDocument>> {
    let pipelines = yaml::documents_of_kind(text, ResourceKind::Pipeline);
    match name {
        Some(wanted) => {
            let matched: Vec<_> = pipelines
                .into_iter()
                .filter(|d| d.name() == Some(wanted))
                .collect();
            if matched.is_empty() {
                anyhow::bail!("No Pipeline named '{}' found", wanted);
            }
            Ok(matched)
        }
        None => Ok(pipelines),
    }
}

/// Lists the task entries of the selected pipelines
pub fn tasks(output: &Output, input: &str, pipeline: Option<&str>) -> Result<()> {
    let text = read_input(input)?;
    let pipelines = select_pipelines(&text, pipeline)?;
    output.verbose_ctx("tasks", &format!("Found {} pipelines", pipelines.len()));

    if output.is_json() {
        let items: Vec<_> = pipelines
            .iter()
            .map(|doc| {
                serde_json::json!({
                    "pipeline": yaml::metadata_name(doc),
                    "tasks": pipeline_tasks(doc),
                })
            })
            .collect();
        output.data(&items);
        return Ok(());
    }

    if pipelines.is_empty() {
        println!("No Pipeline documents found.");
        return Ok(());
    }

    for doc in &pipelines {
        let tasks = pipeline_tasks(doc);
        println!("PIPELINE {}", yaml::metadata_name(doc));

        if tasks.is_empty() {
            println!("  (no tasks)");
            output.blank();
            continue;
        }

        println!("{:<28} {:<12} {:<24} RUN AFTER", "NAME", "KIND", "TASKREF");
        println!("{}", "-".repeat(90));
        for task in &tasks {
            let mut ordering = task.run_after.join(", ");
            if !task.conditions.is_empty() {
                if !ordering.is_empty() {
                    ordering.push_str("; ");
                }
                ordering.push_str(&format!("when: {}", task.conditions.join(", ")));
            }
            println!(
                "{:<28} {:<12} {:<24} {}",
                task.name, task.kind, task.task_ref, ordering
            );
        }
        output.blank();
    }

    Ok(())
}

/// Shows what the selected pipelines declare: resources, workspaces, params
pub fn resources(output: &Output, input: &str, pipeline: Option<&str>) -> Result<()> {
    let text = read_input(input)?;
    let pipelines = select_pipelines(&text, pipeline)?;

    if output.is_json() {
        let items: Vec<_> = pipelines
            .iter()
            .map(|doc| {
                serde_json::json!({
                    "pipeline": yaml::metadata_name(doc),
                    "resources": declared_resources(doc),
                    "workspaces": declared_workspaces(doc),
                    "params": declared_params(doc),
                })
            })
            .collect();
        output.data(&items);
        return Ok(());
    }

    if pipelines.is_empty() {
        println!("No Pipeline documents found.");
        return Ok(());
    }

    for doc in &pipelines {
        println!("PIPELINE {}", yaml::metadata_name(doc));

        let resources = declared_resources(doc);
        if resources.is_empty() {
            println!("  (no declared resources)");
        } else {
            println!("{:<28} TYPE", "RESOURCE");
            println!("{}", "-".repeat(45));
            for resource in &resources {
                println!("{:<28} {}", resource.name, resource.resource_type);
            }
        }

        let workspaces = declared_workspaces(doc);
        if !workspaces.is_empty() {
            output.blank();
            println!("WORKSPACES");
            for workspace in &workspaces {
                println!("  {}", workspace.name);
            }
        }

        let params = declared_params(doc);
        if !params.is_empty() {
            output.blank();
            println!("PARAMS");
            for param in &params {
                let param_type = param.param_type.as_deref().unwrap_or("string");
                println!("  {} ({})", param.name, param_type);
            }
        }

        output.blank();
    }

    Ok(())
}
