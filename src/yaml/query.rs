//! Read-only queries over Tekton documents
//!
//! Thin pure functions composed from the splitter, the classifier and
//! the pipeline extractors; the surface callers build features on.

use serde_yaml::Value;

use super::split::documents;
use crate::domain::{pipeline_tasks, ResourceKind, TektonDocument};

/// All documents of one kind, in document order
pub fn documents_of_kind(text: &str, kind: ResourceKind) -> Vec<TektonDocument> {
    documents(text).filter(|d| d.is_kind(kind)).collect()
}

/// True when the text holds at least one document of the kind
///
/// Stops at the first match; later documents are not parsed.
pub fn contains_kind(text: &str, kind: ResourceKind) -> bool {
    documents(text).any(|d| d.is_kind(kind))
}

/// The recognized kinds present in a text, deduplicated, in first-appearance order
pub fn detected_kinds(text: &str) -> Vec<ResourceKind> {
    let mut kinds = Vec::new();
    for doc in documents(text) {
        let kind = doc.kind();
        if kind.is_known() && !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    kinds
}

/// `taskRef` of every task entry, in task order, duplicates included
///
/// A ClusterTask referenced by several pipeline tasks appears once per
/// reference. Entries using an inline `taskSpec` have no reference and
/// are omitted.
pub fn task_ref_names(doc: &TektonDocument) -> Vec<String> {
    pipeline_tasks(doc)
        .into_iter()
        .map(|t| t.task_ref)
        .filter(|r| !r.is_empty())
        .collect()
}

/// The `name` of every task entry, in task order
///
/// Duplicate-free whenever the source names are unique, which a valid
/// pipeline guarantees; callers may index by name.
pub fn task_names(doc: &TektonDocument) -> Vec<String> {
    pipeline_tasks(doc).into_iter().map(|t| t.name).collect()
}

/// The document's metadata name as a display string
///
/// Empty when absent; use [`TektonDocument::name`] to distinguish a
/// missing name from an empty one.
pub fn metadata_name(doc: &TektonDocument) -> String {
    doc.name().unwrap_or_default().to_string()
}

/// For a PipelineRun document, the name of the pipeline it runs
pub fn pipeline_ref_name(doc: &TektonDocument) -> Option<String> {
    if !doc.is_kind(ResourceKind::PipelineRun) {
        return None;
    }
    doc.spec()
        .get("pipelineRef")
        .and_then(|r| r.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::split_documents;

    const MULTI: &str = "apiVersion: tekton.dev/v1alpha1
kind: Pipeline
metadata:
  name: p1
spec:
  tasks:
    - name: t1
      taskRef:
        name: build-push
      runAfter:
        - t0
---
apiVersion: tekton.dev/v1alpha1
kind: Task
metadata:
  name: build-push
spec: {}
";

    #[test]
    fn documents_of_kind_filters_by_classifier() {
        let pipelines = documents_of_kind(MULTI, ResourceKind::Pipeline);
        assert_eq!(pipelines.len(), 1);
        assert_eq!(pipelines[0].name(), Some("p1"));

        let tasks = documents_of_kind(MULTI, ResourceKind::Task);
        assert_eq!(tasks.len(), 1);

        assert!(documents_of_kind(MULTI, ResourceKind::PipelineRun).is_empty());
    }

    #[test]
    fn pipeline_with_ghost_run_after_still_lists_its_task() {
        // The dangling t0 reference affects the graph, not extraction.
        let pipelines = documents_of_kind(MULTI, ResourceKind::Pipeline);
        let tasks = crate::domain::pipeline_tasks(&pipelines[0]);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "t1");

        let graph = crate::domain::TaskGraph::from_tasks(&tasks);
        assert!(graph.edges().is_empty());
        assert_eq!(graph.ghosts().len(), 1);
    }

    #[test]
    fn contains_kind_gates_on_presence() {
        assert!(contains_kind(MULTI, ResourceKind::Pipeline));
        assert!(contains_kind(MULTI, ResourceKind::Task));
        assert!(!contains_kind(MULTI, ResourceKind::TaskRun));
        assert!(!contains_kind("not: tekton\n", ResourceKind::Pipeline));
    }

    #[test]
    fn lowercase_kind_is_not_detected() {
        let text = "kind: pipeline\nmetadata:\n  name: p\n";
        assert!(!contains_kind(text, ResourceKind::Pipeline));
        assert!(detected_kinds(text).is_empty());
    }

    #[test]
    fn detected_kinds_dedup_in_first_appearance_order() {
        let text = "kind: Task\nmetadata:\n  name: a\n---\nkind: Pipeline\nmetadata:\n  name: p\n---\nkind: Task\nmetadata:\n  name: b\n";
        assert_eq!(
            detected_kinds(text),
            vec![ResourceKind::Task, ResourceKind::Pipeline]
        );
    }

    #[test]
    fn task_ref_names_keep_duplicates() {
        let text = "kind: Pipeline
metadata:
  name: p
spec:
  tasks:
    - name: build-web
      taskRef:
        name: buildah
    - name: build-api
      taskRef:
        name: buildah
";
        let doc = split_documents(text).into_iter().next().unwrap();
        assert_eq!(task_ref_names(&doc), vec!["buildah", "buildah"]);
    }

    #[test]
    fn task_names_in_order() {
        let pipelines = documents_of_kind(MULTI, ResourceKind::Pipeline);
        assert_eq!(task_names(&pipelines[0]), vec!["t1"]);
        // The ghost t0 never shows up as a task name.
        assert!(!task_names(&pipelines[0]).contains(&"t0".to_string()));
    }

    #[test]
    fn metadata_name_is_empty_string_when_absent() {
        let doc = split_documents("kind: Task\nspec: {}\n")
            .into_iter()
            .next()
            .unwrap();
        assert_eq!(doc.name(), None);
        assert_eq!(metadata_name(&doc), "");
    }

    #[test]
    fn pipeline_ref_name_reads_run_spec() {
        let text = "kind: PipelineRun
metadata:
  name: run-1
spec:
  pipelineRef:
    name: build-and-deploy
";
        let doc = split_documents(text).into_iter().next().unwrap();
        assert_eq!(pipeline_ref_name(&doc), Some("build-and-deploy".into()));

        let pipelines = documents_of_kind(MULTI, ResourceKind::Pipeline);
        assert_eq!(pipeline_ref_name(&pipelines[0]), None);
    }
}
