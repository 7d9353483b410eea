//! Control-file parsing: record splitting, field extraction, description
//! normalization.
//!
//! # Format
//!
//! The input is Debian control-file syntax: blank-line-separated records of
//! `Key: value` fields. A line that begins with a single space continues the
//! value of the preceding field (folded long value). Example:
//!
//! ```text
//! Package: libc6
//! Description: Embedded GNU C Library: Shared libraries
//!  Contains the standard libraries that are used by nearly
//!  all programs on the system.
//! ```
//!
//! No field is required at this layer; required-field policy lives in the
//! graph builder where lenient/strict mode applies.

use std::collections::HashMap;

/// Split the raw listing into per-package text blocks.
///
/// The whole input is trimmed, then split on the blank-line delimiter
/// (`"\n\n"`). Empty blocks are dropped; order is preserved. An input with
/// zero records yields an empty iterator — there is no error condition.
pub fn split_records(input: &str) -> impl Iterator<Item = &str> {
    input
        .trim()
        .split("\n\n")
        .filter(|block| !block.trim().is_empty())
}

/// Returns `(key, value)` if the line starts a new field.
///
/// A field line is `^([A-Za-z0-9-]+): (.*)` — a non-empty key of word
/// characters and hyphens, a colon, one space, then the raw value.
/// Continuation lines never match: their leading space is an invalid key
/// character.
fn split_field_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(": ")?;
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }
    Some((key, value))
}

/// Extract the field mapping from one record block.
///
/// Scans line by line. A field line starts a new field; any immediately
/// following line that begins with a space is folded into the current
/// field's raw value (the fold newline and leading space are retained for
/// the description normalizer to reshape). Any other line is structurally
/// invalid and discarded, and also ends the current fold run so stray
/// continuations cannot attach across it.
///
/// Values are trimmed once complete. If a field name repeats, the last
/// occurrence wins — not expected in well-formed input, but not rejected.
#[must_use]
pub fn parse_record(block: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    let mut current: Option<(String, String)> = None;

    let mut flush = |current: &mut Option<(String, String)>,
                     fields: &mut HashMap<String, String>| {
        if let Some((key, value)) = current.take() {
            fields.insert(key, value.trim().to_string());
        }
    };

    for line in block.lines() {
        if let Some((key, value)) = split_field_line(line) {
            flush(&mut current, &mut fields);
            current = Some((key.to_string(), value.to_string()));
        } else if line.starts_with(' ') {
            if let Some((_, value)) = current.as_mut() {
                value.push('\n');
                value.push_str(line);
            }
        } else {
            // Structurally invalid line: drop it and break the fold run.
            flush(&mut current, &mut fields);
        }
    }
    flush(&mut current, &mut fields);

    fields
}

/// Reshape a raw multi-line `Description` value into canonical form.
///
/// The first line is the short description. The remaining folded lines are
/// joined with the artificial wrap newlines removed, `" . "` paragraph
/// markers become real newlines, and literal `"URL:"` labels are dropped.
/// Result: `short.trim() + "\n" + rest.trim()`.
#[must_use]
pub fn normalize_description(raw: &str) -> String {
    let (short, rest) = raw.split_once('\n').unwrap_or((raw, ""));
    let rest = rest.replace('\n', "").replace(" . ", "\n").replace("URL:", "");
    format!("{}\n{}", short.trim(), rest.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_records_on_blank_lines() {
        let input = "\nPackage: a\n\nPackage: b\n\n\nPackage: c\n";
        let blocks: Vec<&str> = split_records(input).collect();
        assert_eq!(blocks, vec!["Package: a", "Package: b", "Package: c"]);
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert_eq!(split_records("").count(), 0);
        assert_eq!(split_records("  \n\n  ").count(), 0);
    }

    #[test]
    fn extracts_simple_fields() {
        let fields = parse_record("Package: vim\nVersion: 2:8.0\nPriority: optional");
        assert_eq!(fields["Package"], "vim");
        assert_eq!(fields["Version"], "2:8.0");
        assert_eq!(fields["Priority"], "optional");
    }

    #[test]
    fn folds_continuation_lines_into_value() {
        let fields = parse_record("Description: short line\n first fold\n second fold");
        assert_eq!(fields["Description"], "short line\n first fold\n second fold");
    }

    #[test]
    fn invalid_line_is_discarded_and_breaks_fold_run() {
        let fields = parse_record("Package: vim\ngarbage without colon\n orphan fold\nOther: x");
        assert_eq!(fields["Package"], "vim");
        assert_eq!(fields["Other"], "x");
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn repeated_field_last_write_wins() {
        let fields = parse_record("Package: first\nPackage: second");
        assert_eq!(fields["Package"], "second");
    }

    #[test]
    fn field_key_charset_is_enforced() {
        let fields = parse_record("Bad key: value\nInstalled-Size: 42");
        assert!(!fields.contains_key("Bad key"));
        assert_eq!(fields["Installed-Size"], "42");
    }

    #[test]
    fn normalizes_wrapped_description() {
        let raw = "display manager\n X provides graphical login\n capabilities. . \n More text.";
        let normalized = normalize_description(raw);
        let (short, rest) = normalized.split_once('\n').expect("has newline");
        assert_eq!(short, "display manager");
        assert!(rest.contains("X provides graphical login capabilities."));
    }

    #[test]
    fn paragraph_markers_become_newlines() {
        let raw = "short\n para one . para two";
        assert_eq!(normalize_description(raw), "short\npara one\npara two");
    }

    #[test]
    fn url_labels_are_dropped() {
        let raw = "short\n see URL:http://example.com for details";
        assert_eq!(
            normalize_description(raw),
            "short\nsee http://example.com for details"
        );
    }

    #[test]
    fn single_line_description_keeps_empty_long_part() {
        assert_eq!(normalize_description("just a summary"), "just a summary\n");
    }
}
