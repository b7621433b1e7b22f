//! Multi-document YAML codec
//!
//! Splits a file into its individual documents and joins documents back into
//! a single file. Document text is kept verbatim (comments, key order, quoting)
//! so untouched documents survive an edit of their neighbours unchanged.
//!
//! `split_documents(join_documents(d)) == d` holds for any sequence `d` of
//! documents as produced by [`split_documents`]: non-empty, newline-terminated
//! and free of `---`/`...` marker lines.

use crate::error::{CoreError, Result};

/// The document separator written between documents
pub const DOCUMENT_SEPARATOR: &str = "---";

/// Explicit document end marker
pub const DOCUMENT_END: &str = "...";

/// Split a multi-document YAML blob into its documents
///
/// Sections that hold no data (blank, comment-only, or an explicit `null`) are
/// dropped, so leading/trailing separators never produce phantom documents.
pub fn split_documents(blob: &str) -> Result<Vec<String>> {
    split_file("<input>", blob)
}

/// Split a file's contents, naming `filename` in any error
///
/// Directive lines (`%YAML`, `%TAG`) are applied when parsing the document
/// they precede but are not kept in its text. A `...` line ends the current
/// document.
pub fn split_file(filename: &str, blob: &str) -> Result<Vec<String>> {
    let mut documents = Vec::new();
    let mut current = String::new();
    // directives of the document being collected, and of the next one
    let mut directives = String::new();
    let mut pending = String::new();

    for line in blob.split_inclusive('\n') {
        match classify(line) {
            Line::Start(rest) => {
                push_section(filename, &mut documents, &directives, std::mem::take(&mut current))?;
                directives = std::mem::take(&mut pending);
                if let Some(rest) = rest {
                    current.push_str(rest);
                    current.push('\n');
                }
            }
            Line::End => {
                push_section(filename, &mut documents, &directives, std::mem::take(&mut current))?;
                directives.clear();
            }
            Line::Directive if !has_content(&current) => pending.push_str(line),
            Line::Directive | Line::Content => current.push_str(line),
        }
    }
    push_section(filename, &mut documents, &directives, current)?;

    if has_content(&pending) {
        return Err(CoreError::malformed(
            filename,
            Some(documents.len()),
            "directive is not followed by a document start marker",
        ));
    }

    Ok(documents)
}

/// Join documents into one blob using the standard separator
pub fn join_documents<S: AsRef<str>>(documents: &[S]) -> String {
    let mut blob = String::new();

    for (i, doc) in documents.iter().enumerate() {
        let doc = doc.as_ref();
        if i > 0 {
            blob.push_str(DOCUMENT_SEPARATOR);
            blob.push('\n');
        }
        blob.push_str(doc);
        if !doc.ends_with('\n') {
            blob.push('\n');
        }
    }

    blob
}

enum Line<'a> {
    /// `---`, with any content following the marker on the same line
    Start(Option<&'a str>),
    /// `...`
    End,
    Directive,
    Content,
}

fn classify(line: &str) -> Line<'_> {
    let line = line.trim_end_matches(['\n', '\r']);

    if let Some(rest) = marker_remainder(line, DOCUMENT_SEPARATOR) {
        return Line::Start(rest);
    }
    if let Some(None) = marker_remainder(line, DOCUMENT_END) {
        return Line::End;
    }
    if line.starts_with('%') {
        return Line::Directive;
    }
    Line::Content
}

/// `Some` when `line` starts with `marker` followed by nothing, whitespace or
/// a comment. `----` or `---foo` is a plain scalar line, not a marker.
fn marker_remainder<'a>(line: &'a str, marker: &str) -> Option<Option<&'a str>> {
    let rest = line.strip_prefix(marker)?;

    if rest.is_empty() {
        return Some(None);
    }
    if !rest.starts_with([' ', '\t']) {
        return None;
    }

    let rest = rest.trim();
    if rest.is_empty() || rest.starts_with('#') {
        Some(None)
    } else {
        Some(Some(rest))
    }
}

fn push_section(
    filename: &str,
    documents: &mut Vec<String>,
    directives: &str,
    mut section: String,
) -> Result<()> {
    if !has_content(&section) {
        return Ok(());
    }

    let parsed = if directives.is_empty() {
        serde_yaml::from_str::<serde_yaml::Value>(&section)
    } else {
        serde_yaml::from_str(&format!("{directives}{DOCUMENT_SEPARATOR}\n{section}"))
    };
    let value = parsed.map_err(|e| CoreError::malformed(filename, Some(documents.len()), e))?;
    if value.is_null() {
        return Ok(());
    }

    if !section.ends_with('\n') {
        section.push('\n');
    }
    documents.push(section);
    Ok(())
}

fn has_content(section: &str) -> bool {
    section.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#')
    })
}
