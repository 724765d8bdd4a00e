//! TaskRun skeleton generation
//!
//! Builds a ready-to-edit TaskRun manifest for a Task document: every
//! declared param, resource and workspace gets a placeholder binding the
//! user fills in before applying.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use super::document::TektonDocument;
use super::kind::ResourceKind;
use super::pipeline::seq_entries;

/// Placeholder for values the user must supply
pub const PLACEHOLDER: &str = "Change Me";

const DEFAULT_API_VERSION: &str = "tekton.dev/v1beta1";

/// A generated TaskRun manifest, serializable straight to YAML
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRunSkeleton {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: SkeletonMetadata,
    pub spec: SkeletonSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkeletonMetadata {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkeletonSpec {
    #[serde(rename = "serviceAccountName")]
    pub service_account_name: String,

    #[serde(rename = "taskRef")]
    pub task_ref: SkeletonTaskRef,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<SkeletonParam>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<SkeletonResources>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub workspaces: Vec<SkeletonWorkspace>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkeletonTaskRef {
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkeletonParam {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkeletonResources {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<SkeletonResourceBinding>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<SkeletonResourceBinding>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkeletonResourceBinding {
    pub name: String,

    #[serde(rename = "resourceRef")]
    pub resource_ref: NameRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkeletonWorkspace {
    pub name: String,

    /// Bound to an ephemeral volume so the manifest applies as-is
    #[serde(rename = "emptyDir")]
    pub empty_dir: Value,
}

/// Declared names are all the generator needs from the task spec
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct NamedDecl {
    name: String,
}

/// Builds a TaskRun skeleton for a Task or ClusterTask document
///
/// Returns None for any other kind. Declared params, input/output
/// resources and workspaces each become one placeholder entry, in
/// declaration order.
pub fn task_run_template(doc: &TektonDocument) -> Option<TaskRunSkeleton> {
    if !doc.is_kind(ResourceKind::Task) && !doc.is_kind(ResourceKind::ClusterTask) {
        return None;
    }

    let spec = doc.spec();

    let params: Vec<SkeletonParam> = seq_entries::<NamedDecl>(spec.get("params"))
        .into_iter()
        .map(|p| SkeletonParam {
            name: p.name,
            value: PLACEHOLDER.to_string(),
        })
        .collect();

    let resources_spec = spec.get("resources");
    let inputs = skeleton_bindings(resources_spec.and_then(|r| r.get("inputs")));
    let outputs = skeleton_bindings(resources_spec.and_then(|r| r.get("outputs")));
    let resources = if inputs.is_empty() && outputs.is_empty() {
        None
    } else {
        Some(SkeletonResources { inputs, outputs })
    };

    let workspaces: Vec<SkeletonWorkspace> = seq_entries::<NamedDecl>(spec.get("workspaces"))
        .into_iter()
        .map(|w| SkeletonWorkspace {
            name: w.name,
            empty_dir: Value::Mapping(Default::default()),
        })
        .collect();

    Some(TaskRunSkeleton {
        api_version: doc
            .api_version()
            .unwrap_or(DEFAULT_API_VERSION)
            .to_string(),
        kind: ResourceKind::TaskRun.as_str().to_string(),
        metadata: SkeletonMetadata {
            name: PLACEHOLDER.to_string(),
        },
        spec: SkeletonSpec {
            service_account_name: PLACEHOLDER.to_string(),
            task_ref: SkeletonTaskRef {
                kind: doc.kind().as_str().to_string(),
                name: doc.name().unwrap_or(PLACEHOLDER).to_string(),
            },
            params,
            resources,
            workspaces,
        },
    })
}

fn skeleton_bindings(value: Option<&Value>) -> Vec<SkeletonResourceBinding> {
    seq_entries::<NamedDecl>(value)
        .into_iter()
        .map(|decl| SkeletonResourceBinding {
            name: decl.name,
            resource_ref: NameRef {
                name: PLACEHOLDER.to_string(),
            },
        })
        .collect()
}
