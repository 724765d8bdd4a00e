//! tkn-graph - Tekton resource model and pipeline dependency graphs
//!
//! Parses raw, possibly multi-document Tekton YAML (or JSON-serialized
//! Kubernetes objects) into classified documents, and reconstructs the
//! task execution graph of a Pipeline from explicit `runAfter`
//! directives and implicit resource producer/consumer flow.

pub mod domain;
pub mod yaml;
pub mod config;
pub mod cli;

pub use domain::{
    Edge, EdgeProvenance, PipelineTask, ResourceKind, SourceRange, TaskGraph, TektonDocument,
};
