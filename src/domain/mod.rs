//! Domain models for tkn-graph
//!
//! The pure core: classified documents, typed pipeline payloads and the
//! task dependency graph. No I/O, no shared state; every function is a
//! deterministic map from input to freshly allocated output.

mod kind;
mod document;
mod pipeline;
mod graph;
mod taskrun;

pub use kind::ResourceKind;
pub use document::{SourceRange, TektonDocument};
pub use pipeline::{
    declared_params, declared_resources, declared_workspaces, pipeline_tasks, DeclaredResource,
    DeclaredWorkspace, Param, PipelineTask, ResourceBinding, TaskResources,
};
pub use graph::{Edge, EdgeProvenance, GhostRef, TaskGraph};
pub use taskrun::{task_run_template, TaskRunSkeleton, PLACEHOLDER};
