//! Dependency graph emission

use anyhow::Result;

use super::output::Output;
use super::read_input;
use super::tasks::select_pipelines;
use crate::config::DotConfig;
use crate::domain::{pipeline_tasks, EdgeProvenance, PipelineTask, TaskGraph};
use crate::yaml;

/// Emits the dependency graph of the selected pipelines
pub fn run(
    output: &Output,
    input: &str,
    pipeline: Option<&str>,
    dot: bool,
    dot_config: &DotConfig,
) -> Result<()> {
    let text = read_input(input)?;
    let pipelines = select_pipelines(&text, pipeline)?;

    if dot && pipelines.len() > 1 {
        anyhow::bail!(
            "Input holds {} Pipelines; pick one with --pipeline for DOT output",
            pipelines.len()
        );
    }

    if output.is_json() {
        let items: Vec<_> = pipelines
            .iter()
            .map(|doc| {
                let tasks = pipeline_tasks(doc);
                let graph = TaskGraph::from_tasks(&tasks);
                serde_json::json!({
                    "pipeline": yaml::metadata_name(doc),
                    "tasks": tasks,
                    "edges": graph.edges(),
                    "ghosts": graph.ghosts(),
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
        let graph = TaskGraph::from_tasks(&tasks);

        output.verbose_ctx(
            "graph",
            &format!(
                "{}: {} tasks, {} edges, {} ghosts",
                yaml::metadata_name(doc),
                graph.len(),
                graph.edges().len(),
                graph.ghosts().len()
            ),
        );

        for ghost in graph.ghosts() {
            output.warn(&format!(
                "task '{}' runs after unknown task '{}'",
                ghost.task, ghost.missing
            ));
        }

        if dot {
            print!("{}", render_dot(&yaml::metadata_name(doc), &tasks, &graph, dot_config));
        } else {
            render_text(output, &yaml::metadata_name(doc), &graph);
        }
    }

    Ok(())
}

fn render_text(output: &Output, pipeline: &str, graph: &TaskGraph) {
    println!("PIPELINE {}", pipeline);

    if graph.is_empty() {
        println!("  (no tasks)");
        output.blank();
        return;
    }

    println!("{:<28} DEPENDS ON", "TASK");
    println!("{}", "-".repeat(70));
    for name in graph.node_names() {
        let deps: Vec<String> = graph
            .edges()
            .into_iter()
            .filter(|e| e.from == name)
            .map(|e| format!("{} ({})", e.to, e.provenance.label()))
            .collect();
        println!("{:<28} {}", name, deps.join(", "));
    }
    output.blank();
}

/// Renders the graph as Graphviz DOT
///
/// Arrows point from predecessor to dependent so execution order reads
/// in rank direction; the dependency relation itself is unchanged.
/// Ghost references never appear: layout assumes node closure.
fn render_dot(pipeline: &str, tasks: &[PipelineTask], graph: &TaskGraph, config: &DotConfig) -> String {
    let mut dot = String::new();
    dot.push_str(&format!("digraph \"{}\" {{\n", escape(pipeline)));
    dot.push_str(&format!("  rankdir={};\n", config.rankdir));
    dot.push_str("  node [shape=box];\n");

    for task in tasks {
        let label = if task.task_ref.is_empty() || task.task_ref == task.name {
            escape(&task.name)
        } else {
            format!("{}\\n({})", escape(&task.name), escape(&task.task_ref))
        };
        dot.push_str(&format!(
            "  \"{}\" [label=\"{}\"];\n",
            escape(&task.name),
            label
        ));
    }

    for edge in graph.edges() {
        let style = match edge.provenance {
            EdgeProvenance::Explicit => "solid",
            EdgeProvenance::Resource => "dashed",
        };
        dot.push_str(&format!(
            "  \"{}\" -> \"{}\" [label=\"{}\", style={}];\n",
            escape(&edge.to),
            escape(&edge.from),
            edge.provenance.label(),
            style
        ));
    }

    dot.push_str("}\n");
    dot
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
