//! Parsed document model
//!
//! A [`TektonDocument`] is one YAML/JSON unit out of a possibly
//! multi-document text. The `spec` stays opaque here; the typed views in
//! [`super::pipeline`] read it only after a kind check. All fields are
//! fixed at construction.

use serde::Serialize;
use serde_yaml::Value;

use super::kind::ResourceKind;

/// Location of a document within the original text
///
/// `offset`/`len` are byte offsets into the source. They point at the
/// `metadata.name` value when the splitter could locate it lexically,
/// otherwise at the whole document chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceRange {
    /// Zero-based position of the document in the multi-document text
    pub index: usize,

    /// Byte offset of the range start
    pub offset: usize,

    /// Range length in bytes
    pub len: usize,
}

/// One parsed YAML/JSON unit
#[derive(Debug, Clone, PartialEq)]
pub struct TektonDocument {
    api_version: Option<String>,
    kind_raw: Option<String>,
    name: Option<String>,
    spec: Value,
    range: SourceRange,
}

impl TektonDocument {
    /// Constructed by the splitter; immutable afterwards
    pub(crate) fn new(
        api_version: Option<String>,
        kind_raw: Option<String>,
        name: Option<String>,
        spec: Value,
        range: SourceRange,
    ) -> Self {
        Self {
            api_version,
            kind_raw,
            name,
            spec,
            range,
        }
    }

    /// The `apiVersion` field, as written
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// The raw `kind` field, as written
    pub fn kind_raw(&self) -> Option<&str> {
        self.kind_raw.as_deref()
    }

    /// The classified resource kind
    pub fn kind(&self) -> ResourceKind {
        self.kind_raw
            .as_deref()
            .map(ResourceKind::classify)
            .unwrap_or_default()
    }

    /// Checks whether this document is of the given kind
    pub fn is_kind(&self, kind: ResourceKind) -> bool {
        self.kind() == kind
    }

    /// The `metadata.name` field; None when metadata or the name is absent
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The opaque `spec` value (Null when the document has none)
    pub fn spec(&self) -> &Value {
        &self.spec
    }

    /// Where this document sits in the source text
    pub fn range(&self) -> SourceRange {
        self.range
    }
}
