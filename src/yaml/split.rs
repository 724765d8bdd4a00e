//! Multi-document YAML splitting
//!
//! Turns a raw editor buffer into parsed documents. Parsing is tolerant:
//! a document with broken syntax is skipped and the rest of the batch
//! survives, because the input is usually a manifest mid-edit. JSON
//! input (a `kubectl get -o json` object) parses through the same path,
//! YAML being a superset.

use serde_yaml::Value;

use crate::domain::{SourceRange, TektonDocument};

/// Lazily parses the documents of a multi-document text
///
/// Restartable: calling this again on equal text yields an equal
/// sequence. Documents that fail to parse, or that are not mappings,
/// are skipped.
pub fn documents(text: &str) -> impl Iterator<Item = TektonDocument> + '_ {
    chunks(text).into_iter().filter_map(|chunk| parse_chunk(&chunk))
}

/// Splits a text into its parsed documents
pub fn split_documents(text: &str) -> Vec<TektonDocument> {
    documents(text).collect()
}

/// One raw document chunk and its position in the source
struct Chunk<'a> {
    index: usize,
    start: usize,
    text: &'a str,
}

/// Cuts the text at `---` boundary lines
///
/// Every chunk with content consumes an index, including chunks that
/// later fail to parse, so surviving documents keep their original
/// positions. A boundary line belongs to neither neighbor.
fn chunks(text: &str) -> Vec<Chunk<'_>> {
    let mut raw: Vec<(usize, &str)> = Vec::new();
    let mut chunk_start = 0usize;
    let mut offset = 0usize;

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        // Trailing whitespace is tolerated; leading whitespace makes it
        // document content, not a boundary.
        if content.trim_end() == "---" {
            raw.push((chunk_start, &text[chunk_start..offset]));
            chunk_start = offset + line.len();
        }
        offset += line.len();
    }
    raw.push((chunk_start, &text[chunk_start..]));

    let mut result = Vec::new();
    let mut index = 0usize;
    for (start, chunk_text) in raw {
        if chunk_text.trim().is_empty() {
            continue;
        }
        result.push(Chunk {
            index,
            start,
            text: chunk_text,
        });
        index += 1;
    }
    result
}

fn parse_chunk(chunk: &Chunk<'_>) -> Option<TektonDocument> {
    let value: Value = serde_yaml::from_str(chunk.text).ok()?;
    if !value.is_mapping() {
        return None;
    }

    let api_version = value
        .get("apiVersion")
        .and_then(Value::as_str)
        .map(str::to_string);
    let kind_raw = value.get("kind").and_then(Value::as_str).map(str::to_string);
    let name = value
        .get("metadata")
        .and_then(|m| m.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string);
    let spec = value.get("spec").cloned().unwrap_or(Value::Null);

    let range = match locate_name_range(chunk.text) {
        Some((rel_offset, len)) => SourceRange {
            index: chunk.index,
            offset: chunk.start + rel_offset,
            len,
        },
        None => SourceRange {
            index: chunk.index,
            offset: chunk.start,
            len: chunk.text.len(),
        },
    };

    Some(TektonDocument::new(api_version, kind_raw, name, spec, range))
}

/// Finds the byte range of the `metadata.name` value, lexically
///
/// Best-effort: scans for a `metadata:` line, then the first `name:` key
/// nested under it. Flow-style metadata (typical for JSON input) is not
/// located; callers fall back to the whole-document range.
fn locate_name_range(chunk: &str) -> Option<(usize, usize)> {
    let mut metadata_indent: Option<usize> = None;
    let mut offset = 0usize;

    for line in chunk.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        let trimmed = content.trim_start();
        let indent = content.len() - trimmed.len();

        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            if let Some(meta_indent) = metadata_indent {
                if indent <= meta_indent {
                    metadata_indent = None;
                } else if let Some(rest) = trimmed.strip_prefix("name:") {
                    let after_key = rest.trim_start();
                    let value = after_key.split(" #").next().unwrap_or(after_key).trim_end();
                    if !value.is_empty() {
                        let value_offset =
                            indent + "name:".len() + (rest.len() - after_key.len());
                        return Some((offset + value_offset, value.len()));
                    }
                }
            }
            if metadata_indent.is_none() && key_line(trimmed, "metadata") {
                metadata_indent = Some(indent);
            }
        }

        offset += line.len();
    }

    None
}

/// True when the line is `key:` with nothing but whitespace or a comment after
fn key_line(trimmed: &str, key: &str) -> bool {
    trimmed
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix(':'))
        .is_some_and(|rest| {
            let rest = rest.trim_start();
            rest.is_empty() || rest.starts_with('#')
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResourceKind;

    const PIPELINE: &str = "apiVersion: tekton.dev/v1alpha1
kind: Pipeline
metadata:
  name: pipeline-with-parameters
spec:
  tasks:
    - name: build-skaffold-web
      taskRef:
        name: build-push
";

    const TASK: &str = "apiVersion: tekton.dev/v1alpha1
kind: Task
metadata:
  name: build-push
spec:
  params:
    - name: pathToDockerFile
";

    #[test]
    fn splits_multi_document_text() {
        let text = format!("{}---\n{}", PIPELINE, TASK);
        let docs = split_documents(&text);

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].kind(), ResourceKind::Pipeline);
        assert_eq!(docs[0].name(), Some("pipeline-with-parameters"));
        assert_eq!(docs[1].kind(), ResourceKind::Task);
        assert_eq!(docs[1].name(), Some("build-push"));
    }

    #[test]
    fn leading_boundary_is_tolerated() {
        let text = format!("---\n{}", PIPELINE);
        let docs = split_documents(&text);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].range().index, 0);
    }

    #[test]
    fn invalid_document_is_skipped_not_fatal() {
        let text = format!("{}---\nkind: [unclosed\n---\n{}", PIPELINE, TASK);
        let docs = split_documents(&text);

        assert_eq!(docs.len(), 2);
        // The broken middle chunk still consumed its index.
        assert_eq!(docs[0].range().index, 0);
        assert_eq!(docs[1].range().index, 2);
    }

    #[test]
    fn all_invalid_yields_empty() {
        let docs = split_documents("kind: [unclosed\n---\n{also: broken\n");
        assert!(docs.is_empty());
    }

    #[test]
    fn scalar_document_is_skipped() {
        assert!(split_documents("Some string").is_empty());
    }

    #[test]
    fn empty_text_yields_empty() {
        assert!(split_documents("").is_empty());
        assert!(split_documents("---\n---\n").is_empty());
    }

    #[test]
    fn name_range_points_at_the_name_value() {
        let text = format!("{}---\n{}", PIPELINE, TASK);
        let docs = split_documents(&text);

        let range = docs[1].range();
        assert_eq!(&text[range.offset..range.offset + range.len], "build-push");
        // Specifically the metadata.name, not the taskRef name in doc 0.
        assert!(range.offset > text.find("---").unwrap());
    }

    #[test]
    fn name_range_skips_comments_and_quoted_values() {
        let text = "kind: Task
metadata:
  # a comment line
  labels:
    app: demo
  name: my-task # trailing comment
spec: {}
";
        let docs = split_documents(text);
        let range = docs[0].range();
        assert_eq!(&text[range.offset..range.offset + range.len], "my-task");
    }

    #[test]
    fn json_document_falls_back_to_whole_range() {
        let text = r#"{"apiVersion": "tekton.dev/v1beta1", "kind": "Task", "metadata": {"name": "t1"}}"#;
        let docs = split_documents(text);

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].kind(), ResourceKind::Task);
        assert_eq!(docs[0].name(), Some("t1"));

        let range = docs[0].range();
        assert_eq!(range.offset, 0);
        assert_eq!(range.len, text.len());
    }

    #[test]
    fn missing_metadata_yields_no_name() {
        let docs = split_documents("kind: Task\nspec: {}\n");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name(), None);
    }

    #[test]
    fn resplitting_equal_text_yields_equal_sequence() {
        let text = format!("{}---\n{}", PIPELINE, TASK);
        assert_eq!(split_documents(&text), split_documents(&text));
    }

    #[test]
    fn indented_dashes_are_content_not_boundaries() {
        let text = "kind: Task
metadata:
  name: t
spec:
  description: |
    ---
    not a boundary
";
        let docs = split_documents(text);
        assert_eq!(docs.len(), 1);
    }
}
