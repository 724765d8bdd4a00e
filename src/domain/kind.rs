//! Tekton resource kinds
//!
//! Classification is a pure function of the manifest `kind` field.
//! Matching is exact-case: `pipeline` is not a Pipeline. That strictness
//! mirrors the Kubernetes API, which rejects a miscased kind.

use serde::{Deserialize, Serialize};

/// Kind of a Tekton resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ResourceKind {
    Pipeline,
    Task,
    ClusterTask,
    Condition,
    PipelineResource,
    PipelineRun,
    TaskRun,
    /// Child of a TaskRun, created when a task guard executes
    ConditionCheck,
    /// Anything that is not a recognized Tekton kind
    #[default]
    Unknown,
}

impl ResourceKind {
    /// Classifies a raw `kind` value
    ///
    /// The value is trimmed, then matched exact-case against the known set.
    pub fn classify(kind: &str) -> Self {
        match kind.trim() {
            "Pipeline" => ResourceKind::Pipeline,
            "Task" => ResourceKind::Task,
            "ClusterTask" => ResourceKind::ClusterTask,
            "Condition" => ResourceKind::Condition,
            "PipelineResource" => ResourceKind::PipelineResource,
            "PipelineRun" => ResourceKind::PipelineRun,
            "TaskRun" => ResourceKind::TaskRun,
            "ConditionCheck" => ResourceKind::ConditionCheck,
            _ => ResourceKind::Unknown,
        }
    }

    /// Returns true for kinds this tool recognizes
    pub fn is_known(&self) -> bool {
        !matches!(self, ResourceKind::Unknown)
    }

    /// All recognized kinds, in display order
    pub fn all() -> &'static [ResourceKind] {
        &[
            ResourceKind::Pipeline,
            ResourceKind::Task,
            ResourceKind::ClusterTask,
            ResourceKind::Condition,
            ResourceKind::PipelineResource,
            ResourceKind::PipelineRun,
            ResourceKind::TaskRun,
            ResourceKind::ConditionCheck,
        ]
    }

    /// The canonical kind string as it appears in a manifest
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Pipeline => "Pipeline",
            ResourceKind::Task => "Task",
            ResourceKind::ClusterTask => "ClusterTask",
            ResourceKind::Condition => "Condition",
            ResourceKind::PipelineResource => "PipelineResource",
            ResourceKind::PipelineRun => "PipelineRun",
            ResourceKind::TaskRun => "TaskRun",
            ResourceKind::ConditionCheck => "ConditionCheck",
            ResourceKind::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_known_kinds() {
        assert_eq!(ResourceKind::classify("Pipeline"), ResourceKind::Pipeline);
        assert_eq!(ResourceKind::classify("Task"), ResourceKind::Task);
        assert_eq!(ResourceKind::classify("ClusterTask"), ResourceKind::ClusterTask);
        assert_eq!(ResourceKind::classify("PipelineRun"), ResourceKind::PipelineRun);
        assert_eq!(ResourceKind::classify("ConditionCheck"), ResourceKind::ConditionCheck);
    }

    #[test]
    fn classify_is_case_sensitive() {
        assert_eq!(ResourceKind::classify("pipeline"), ResourceKind::Unknown);
        assert_eq!(ResourceKind::classify("PIPELINE"), ResourceKind::Unknown);
        assert_eq!(ResourceKind::classify("taskrun"), ResourceKind::Unknown);
    }

    #[test]
    fn classify_trims_whitespace() {
        assert_eq!(ResourceKind::classify("  Pipeline  "), ResourceKind::Pipeline);
        assert_eq!(ResourceKind::classify("\tTask\n"), ResourceKind::Task);
    }

    #[test]
    fn classify_unrecognized() {
        assert_eq!(ResourceKind::classify("PipeFoo"), ResourceKind::Unknown);
        assert_eq!(ResourceKind::classify(""), ResourceKind::Unknown);
        assert_eq!(ResourceKind::classify("Deployment"), ResourceKind::Unknown);
    }

    #[test]
    fn all_excludes_unknown() {
        assert!(!ResourceKind::all().contains(&ResourceKind::Unknown));
        assert_eq!(ResourceKind::all().len(), 8);
    }

    #[test]
    fn display_roundtrips_through_classify() {
        for kind in ResourceKind::all() {
            assert_eq!(ResourceKind::classify(kind.as_str()), *kind);
        }
    }
}
