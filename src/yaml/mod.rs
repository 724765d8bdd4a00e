//! Text-to-document layer
//!
//! Splits raw buffers into parsed Tekton documents and answers read-only
//! queries over them. Everything is a pure function of the input text;
//! nothing here touches the filesystem or the cluster.

mod split;
mod query;

pub use split::{documents, split_documents};
pub use query::{
    contains_kind, detected_kinds, documents_of_kind, metadata_name, pipeline_ref_name,
    task_names, task_ref_names,
};
