//! Document listing and detection commands

use anyhow::Result;

use super::output::Output;
use super::read_input;
use crate::domain::ResourceKind;
use crate::yaml;

/// Parses a `--kind` argument with the classifier's strictness
pub(crate) fn parse_kind(value: &str) -> Result<ResourceKind> {
    let kind = ResourceKind::classify(value);
    if kind == ResourceKind::Unknown {
        let known: Vec<_> = ResourceKind::all().iter().map(|k| k.as_str()).collect();
        anyhow::bail!(
            "Unrecognized kind '{}' (matching is exact-case; expected one of: {})",
            value,
            known.join(", ")
        );
    }
    Ok(kind)
}

/// Reports whether the input contains Tekton resources
///
/// Returns true when at least one recognized document exists; the caller
/// turns that into the exit code.
pub fn detect(output: &Output, input: &str) -> Result<bool> {
    let text = read_input(input)?;
    output.verbose_ctx("detect", &format!("Read {} bytes", text.len()));

    let kinds = yaml::detected_kinds(&text);
    let found = !kinds.is_empty();

    if output.is_json() {
        output.data(&serde_json::json!({
            "detected": found,
            "kinds": kinds,
        }));
    } else if found {
        let names: Vec<_> = kinds.iter().map(|k| k.as_str()).collect();
        println!("Tekton resources detected: {}", names.join(", "));
    } else {
        println!("No Tekton resources found.");
    }

    Ok(found)
}

/// Lists the documents in the input, optionally filtered by kind
pub fn list(output: &Output, input: &str, kind_filter: Option<&str>) -> Result<()> {
    let text = read_input(input)?;

    let docs = match kind_filter {
        Some(raw) => {
            let kind = parse_kind(raw)?;
            output.verbose_ctx("docs", &format!("Filtering by kind: {}", kind));
            yaml::documents_of_kind(&text, kind)
        }
        None => yaml::split_documents(&text),
    };

    output.verbose_ctx("docs", &format!("Parsed {} documents", docs.len()));

    if output.is_json() {
        let items: Vec<_> = docs
            .iter()
            .map(|d| {
                serde_json::json!({
                    "index": d.range().index,
                    "kind": d.kind(),
                    "kind_raw": d.kind_raw(),
                    "name": d.name(),
                    "api_version": d.api_version(),
                    "offset": d.range().offset,
                    "len": d.range().len,
                })
            })
            .collect();
        output.data(&items);
    } else if docs.is_empty() {
        println!("No documents parsed.");
    } else {
        println!("{:<6} {:<18} {:<32} RANGE", "INDEX", "KIND", "NAME");
        println!("{}", "-".repeat(70));
        for doc in &docs {
            let range = doc.range();
            println!(
                "{:<6} {:<18} {:<32} {}..{}",
                range.index,
                doc.kind(),
                yaml::metadata_name(doc),
                range.offset,
                range.offset + range.len,
            );
        }
    }

    Ok(())
}
