//! Pipeline spec payloads
//!
//! Typed views over a document's opaque `spec`, read only after a kind
//! check. Everything here is tolerant: the input is usually a manifest
//! mid-edit, so missing or malformed sections degrade to empty values
//! instead of errors. A section entry that fails to deserialize is
//! skipped, matching the splitter's policy for whole documents.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use super::document::TektonDocument;
use super::kind::ResourceKind;

/// A named resource declared by a Pipeline (`spec.resources`)
///
/// Duplicate names are preserved in encounter order; uniqueness is the
/// cluster's problem, not ours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DeclaredResource {
    #[serde(default)]
    pub name: String,

    #[serde(default, rename = "type")]
    pub resource_type: String,
}

/// A workspace declared by a Pipeline (`spec.workspaces`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DeclaredWorkspace {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A parameter declaration or binding, preserved verbatim
///
/// Pipeline/task declarations carry `type`/`default`; task-entry bindings
/// carry `value`. One shape covers both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Param {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// One `{name, resource}` binding on a task entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResourceBinding {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub resource: String,
}

/// Input/output resource bindings of a task entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaskResources {
    #[serde(default, deserialize_with = "null_default")]
    pub inputs: Vec<ResourceBinding>,

    #[serde(default, deserialize_with = "null_default")]
    pub outputs: Vec<ResourceBinding>,
}

impl TaskResources {
    /// Returns true when there are no bindings at all
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }
}

/// One task entry of a Pipeline (`spec.tasks` or `spec.finally`)
///
/// `name` is the graph node identity and must be unique within a
/// pipeline. `task_ref` is empty when the entry uses an inline
/// `taskSpec`; such tasks are still graph nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineTask {
    pub name: String,

    /// Task, ClusterTask or Condition; Task when `taskRef.kind` is absent
    pub kind: ResourceKind,

    /// Name of the referenced definition; empty for inline `taskSpec`
    pub task_ref: String,

    /// Explicit predecessors, copied verbatim from `runAfter`
    pub run_after: Vec<String>,

    pub resources: TaskResources,

    pub params: Vec<Param>,

    /// Names of guarding conditions (`conditions[].conditionRef`)
    pub conditions: Vec<String>,
}

impl Default for PipelineTask {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: ResourceKind::Task,
            task_ref: String::new(),
            run_after: Vec::new(),
            resources: TaskResources::default(),
            params: Vec::new(),
            conditions: Vec::new(),
        }
    }
}

/// A half-typed key (`runAfter:` with nothing after it) parses as null;
/// treat that like an absent field instead of failing the entry
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Wire shape of one task entry
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawPipelineTask {
    name: String,
    #[serde(rename = "taskRef")]
    task_ref: Option<RawTaskRef>,
    #[serde(rename = "runAfter", deserialize_with = "null_default")]
    run_after: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    resources: TaskResources,
    #[serde(deserialize_with = "null_default")]
    params: Vec<Param>,
    #[serde(deserialize_with = "null_default")]
    conditions: Vec<RawCondition>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawTaskRef {
    name: String,
    kind: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawCondition {
    #[serde(rename = "conditionRef")]
    condition_ref: String,
}

impl From<RawPipelineTask> for PipelineTask {
    fn from(raw: RawPipelineTask) -> Self {
        let (task_ref, kind) = match raw.task_ref {
            Some(r) => {
                // Only ClusterTask and Condition override the default;
                // an absent or unrecognized kind means Task.
                let kind = match r.kind.as_deref().map(ResourceKind::classify) {
                    Some(ResourceKind::ClusterTask) => ResourceKind::ClusterTask,
                    Some(ResourceKind::Condition) => ResourceKind::Condition,
                    _ => ResourceKind::Task,
                };
                (r.name, kind)
            }
            None => (String::new(), ResourceKind::Task),
        };

        Self {
            name: raw.name,
            kind,
            task_ref,
            run_after: raw.run_after,
            resources: raw.resources,
            params: raw.params,
            conditions: raw
                .conditions
                .into_iter()
                .map(|c| c.condition_ref)
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }
}

/// Deserializes each element of a sequence value independently
///
/// Entries that fail to deserialize are dropped, so one broken entry
/// does not erase its siblings. A non-sequence value yields nothing.
pub(crate) fn seq_entries<T: DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    value
        .and_then(Value::as_sequence)
        .map(|seq| {
            seq.iter()
                .filter_map(|entry| serde_yaml::from_value(entry.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Extracts the task entries of a Pipeline document
///
/// `spec.tasks` first, then `spec.finally`, each section keeping its
/// declaration order: both sections feed the same dependency graph.
/// Non-Pipeline documents yield an empty vec.
pub fn pipeline_tasks(doc: &TektonDocument) -> Vec<PipelineTask> {
    if !doc.is_kind(ResourceKind::Pipeline) {
        return Vec::new();
    }

    let mut tasks: Vec<PipelineTask> = seq_entries::<RawPipelineTask>(doc.spec().get("tasks"))
        .into_iter()
        .map(PipelineTask::from)
        .collect();

    tasks.extend(
        seq_entries::<RawPipelineTask>(doc.spec().get("finally"))
            .into_iter()
            .map(PipelineTask::from),
    );

    tasks
}

/// The resources a Pipeline declares (`spec.resources`), in order
pub fn declared_resources(doc: &TektonDocument) -> Vec<DeclaredResource> {
    if !doc.is_kind(ResourceKind::Pipeline) {
        return Vec::new();
    }
    seq_entries(doc.spec().get("resources"))
}

/// The workspaces a Pipeline declares (`spec.workspaces`), in order
pub fn declared_workspaces(doc: &TektonDocument) -> Vec<DeclaredWorkspace> {
    if !doc.is_kind(ResourceKind::Pipeline) {
        return Vec::new();
    }
    seq_entries(doc.spec().get("workspaces"))
}

/// The params a Pipeline declares (`spec.params`), in order
pub fn declared_params(doc: &TektonDocument) -> Vec<Param> {
    if !doc.is_kind(ResourceKind::Pipeline) {
        return Vec::new();
    }
    seq_entries(doc.spec().get("params"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::split_documents;

    fn parse_one(text: &str) -> TektonDocument {
        let docs = split_documents(text);
        assert_eq!(docs.len(), 1, "fixture should hold exactly one document");
        docs.into_iter().next().unwrap()
    }

    const PIPELINE_WITH_RESOURCES: &str = "
apiVersion: tekton.dev/v1alpha1
kind: Pipeline
metadata:
  name: build-and-deploy
spec:
  resources:
    - name: api-repo
      type: git
    - name: api-image
      type: image
  tasks:
    - name: build-api
      taskRef:
        name: buildah
        kind: ClusterTask
      resources:
        inputs:
          - name: source
            resource: api-repo
        outputs:
          - name: image
            resource: api-image
      params:
        - name: TLSVERIFY
          value: \"false\"
";

    #[test]
    fn tasks_then_finally_in_declaration_order() {
        let doc = parse_one(
            "
apiVersion: tekton.dev/v1beta1
kind: Pipeline
metadata:
  name: ordered
spec:
  tasks:
    - name: first
      taskRef:
        name: a
    - name: second
      taskRef:
        name: b
  finally:
    - name: cleanup
      taskRef:
        name: c
",
        );

        let tasks = pipeline_tasks(&doc);
        let names: Vec<_> = tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "cleanup"]);
    }

    #[test]
    fn kind_defaults_to_task() {
        let doc = parse_one(
            "
kind: Pipeline
metadata:
  name: p
spec:
  tasks:
    - name: build-skaffold-web
      taskRef:
        name: build-push
      runAfter:
        - fooTask
",
        );

        let tasks = pipeline_tasks(&doc);
        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(task.kind, ResourceKind::Task);
        assert_eq!(task.name, "build-skaffold-web");
        assert_eq!(task.task_ref, "build-push");
        assert_eq!(task.run_after, vec!["fooTask"]);
    }

    #[test]
    fn cluster_task_kind_from_task_ref() {
        let doc = parse_one(PIPELINE_WITH_RESOURCES);

        let tasks = pipeline_tasks(&doc);
        assert_eq!(tasks[0].kind, ResourceKind::ClusterTask);
        assert_eq!(tasks[0].task_ref, "buildah");
        assert_eq!(tasks[0].resources.inputs[0].resource, "api-repo");
        assert_eq!(tasks[0].resources.outputs[0].resource, "api-image");
        assert_eq!(tasks[0].params[0].name, "TLSVERIFY");
    }

    #[test]
    fn unrecognized_task_ref_kind_falls_back_to_task() {
        let doc = parse_one(
            "
kind: Pipeline
metadata:
  name: p
spec:
  tasks:
    - name: t
      taskRef:
        name: x
        kind: clustertask
",
        );

        assert_eq!(pipeline_tasks(&doc)[0].kind, ResourceKind::Task);
    }

    #[test]
    fn inline_task_spec_keeps_node_with_empty_ref() {
        let doc = parse_one(
            "
kind: Pipeline
metadata:
  name: p
spec:
  tasks:
    - name: inline
      taskSpec:
        steps:
          - image: alpine
",
        );

        let tasks = pipeline_tasks(&doc);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "inline");
        assert_eq!(tasks[0].task_ref, "");
    }

    #[test]
    fn conditions_extract_condition_ref_names() {
        let doc = parse_one(
            "
kind: Pipeline
metadata:
  name: p
spec:
  tasks:
    - name: guarded
      taskRef:
        name: deploy
      conditions:
        - conditionRef: file-exists
",
        );

        assert_eq!(pipeline_tasks(&doc)[0].conditions, vec!["file-exists"]);
    }

    #[test]
    fn half_typed_fields_keep_the_entry() {
        let doc = parse_one(
            "
kind: Pipeline
metadata:
  name: p
spec:
  tasks:
    - name: mid-edit
      taskRef:
        name: x
      runAfter:
      resources:
",
        );

        let tasks = pipeline_tasks(&doc);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "mid-edit");
        assert!(tasks[0].run_after.is_empty());
        assert!(tasks[0].resources.is_empty());
    }

    #[test]
    fn null_tasks_section_yields_empty() {
        let doc = parse_one(
            "
kind: Pipeline
metadata:
  name: p
spec:
  tasks:
",
        );

        assert!(pipeline_tasks(&doc).is_empty());
    }

    #[test]
    fn non_pipeline_document_yields_empty() {
        let doc = parse_one(
            "
kind: Task
metadata:
  name: build-push
spec:
  params:
    - name: pathToDockerFile
",
        );

        assert!(pipeline_tasks(&doc).is_empty());
        assert!(declared_resources(&doc).is_empty());
    }

    #[test]
    fn malformed_entry_is_skipped_not_fatal() {
        let doc = parse_one(
            "
kind: Pipeline
metadata:
  name: p
spec:
  tasks:
    - just-a-string
    - name: real
      taskRef:
        name: r
",
        );

        let tasks = pipeline_tasks(&doc);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "real");
    }

    #[test]
    fn declared_resources_verbatim_in_order() {
        let doc = parse_one(PIPELINE_WITH_RESOURCES);

        let resources = declared_resources(&doc);
        assert_eq!(
            resources,
            vec![
                DeclaredResource {
                    name: "api-repo".into(),
                    resource_type: "git".into()
                },
                DeclaredResource {
                    name: "api-image".into(),
                    resource_type: "image".into()
                },
            ]
        );
    }

    #[test]
    fn declared_resources_preserve_duplicates() {
        let doc = parse_one(
            "
kind: Pipeline
metadata:
  name: p
spec:
  resources:
    - name: repo
      type: git
    - name: repo
      type: git
",
        );

        assert_eq!(declared_resources(&doc).len(), 2);
    }

    #[test]
    fn declared_workspaces_and_params() {
        let doc = parse_one(
            "
kind: Pipeline
metadata:
  name: p
spec:
  workspaces:
    - name: shared-workspace
  params:
    - name: context
      type: string
      default: /some/where
",
        );

        let workspaces = declared_workspaces(&doc);
        assert_eq!(workspaces.len(), 1);
        assert_eq!(workspaces[0].name, "shared-workspace");

        let params = declared_params(&doc);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "context");
        assert_eq!(params[0].param_type.as_deref(), Some("string"));
    }

    #[test]
    fn absent_spec_sections_never_error() {
        let doc = parse_one(
            "
kind: Pipeline
metadata:
  name: bare
",
        );

        assert!(pipeline_tasks(&doc).is_empty());
        assert!(declared_resources(&doc).is_empty());
        assert!(declared_workspaces(&doc).is_empty());
        assert!(declared_params(&doc).is_empty());
    }
}
