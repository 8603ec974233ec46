//! Syntax recovery pass over raw manifest text.
//!
//! A single left-to-right scan with one- and two-line lookahead. Only a
//! fixed set of corruption signatures is handled; anything else passes
//! through untouched. Per line the checks run in order: token typos,
//! split keys, backward orphaned-value merge, forward orphaned-value
//! merge. Merges tolerate an indentation mismatch of one character.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::manifest::schema::{KNOWN_ENUM_VALUES, KNOWN_FIELD_NAMES, TOKEN_TYPOS};
use crate::repair::Fix;

/// Outcome of one syntax recovery run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxRepair {
    /// True when any signature matched and rewrote the text
    pub modified: bool,
    /// Repaired text; equals the input when nothing matched
    pub content: String,
    /// One entry per rewrite, in application order
    pub fixes: Vec<Fix>,
}

/// Detect and repair known corruption signatures in raw YAML text.
///
/// Never fails on malformed content. Unrecognized corruption is left
/// untouched and nothing is reported for it; the caller judges success
/// by whether the result parses.
pub fn repair_syntax(content: &str) -> SyntaxRepair {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut fixed_lines: Vec<String> = Vec::with_capacity(lines.len());
    let mut fixes = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        if lines[i].trim().is_empty() {
            fixed_lines.push(lines[i].to_string());
            i += 1;
            continue;
        }

        let line = repair_token_typos(lines[i], &mut fixes);
        let stripped = line.trim_start();
        let indent = indent_of(&line);
        let curr_indent = indent.len();

        // Key fragment split across two lines, e.g. "restartP" + "olicy: Always".
        if !stripped.contains(':') && i + 1 < lines.len() {
            let next_stripped = lines[i + 1].trim_start();
            if let Some(colon_idx) = next_stripped.find(':') {
                let completed = format!("{}{}", stripped, &next_stripped[..colon_idx]);
                if KNOWN_FIELD_NAMES.contains(&completed.as_str()) {
                    fixed_lines.push(format!("{}{}{}", indent, stripped, next_stripped));
                    fixes.push(Fix::applied(format!(
                        "Fixed split key: merged '{}' with next line",
                        stripped
                    )));
                    i += 2;
                    continue;
                }
            }
        }

        // Bare enum value left behind by a preceding key with an empty value.
        if !stripped.contains(':') && starts_with_enum_value(stripped) {
            if let Some(merged) = merge_into_previous_key(&fixed_lines, stripped, curr_indent) {
                fixed_lines.pop();
                fixed_lines.push(merged);
                fixes.push(Fix::applied(format!(
                    "Fixed orphaned value: merged '{}' with previous key",
                    stripped
                )));
                i += 1;
                continue;
            }
        }

        // Key with an empty value whose enum value drifted below blank lines.
        if let Some(colon_idx) = stripped.find(':') {
            let key_part = &stripped[..colon_idx + 1];
            if stripped[colon_idx + 1..].trim().is_empty() {
                let mut j = i + 1;
                while j < lines.len() && lines[j].trim().is_empty() {
                    j += 1;
                }
                if j < lines.len() {
                    let value_stripped = lines[j].trim_start();
                    if indent_width(lines[j]).abs_diff(curr_indent) <= 1
                        && !value_stripped.contains(':')
                        && starts_with_enum_value(value_stripped)
                    {
                        fixed_lines.push(format!("{}{} {}", indent, key_part, value_stripped));
                        fixes.push(Fix::applied(format!(
                            "Fixed orphaned value: merged '{}' with key",
                            value_stripped
                        )));
                        i = j + 1;
                        continue;
                    }
                }
            }
        }

        fixed_lines.push(line);
        i += 1;
    }

    let modified = !fixes.is_empty();
    if modified {
        debug!("syntax recovery rewrote {} spot(s)", fixes.len());
    }

    SyntaxRepair {
        modified,
        content: fixed_lines.join("\n"),
        fixes,
    }
}

/// Replace known typo'd substrings wherever they occur in the line.
fn repair_token_typos(line: &str, fixes: &mut Vec<Fix>) -> String {
    let mut repaired = line.to_string();
    for typo in TOKEN_TYPOS {
        if repaired.contains(typo.broken) {
            repaired = repaired.replace(typo.broken, typo.fixed);
            fixes.push(Fix::applied(format!(
                "Fixed {}: '{}' -> '{}'",
                typo.label, typo.broken, typo.fixed
            )));
        }
    }
    repaired
}

/// Rebuild the previously emitted line with `value` appended, provided it
/// is a key with an empty value within one character of `value_indent`.
fn merge_into_previous_key(emitted: &[String], value: &str, value_indent: usize) -> Option<String> {
    let prev_line = emitted.last()?;
    let prev_stripped = prev_line.trim_start();
    let colon_idx = prev_stripped.find(':')?;
    if !prev_stripped.trim_end().ends_with(':') {
        return None;
    }
    if indent_width(prev_line).abs_diff(value_indent) > 1 {
        return None;
    }
    Some(format!(
        "{}{}: {}",
        indent_of(prev_line),
        &prev_stripped[..colon_idx],
        value
    ))
}

fn starts_with_enum_value(s: &str) -> bool {
    KNOWN_ENUM_VALUES.iter().any(|v| s.starts_with(v))
}

fn indent_of(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_key_merge() {
        let input = "spec:\n  restartP\n  olicy: Always\n";
        let result = repair_syntax(input);

        assert!(result.modified);
        assert!(result.content.contains("restartPolicy: Always"));
        assert_eq!(result.fixes.len(), 1);
        assert!(result.fixes[0].message.contains("split key"));
    }

    #[test]
    fn test_forward_orphan_merge_across_blank_lines() {
        let input = "imagePullPolicy:\n\nIfNotPresent\n";
        let result = repair_syntax(input);

        assert!(result.modified);
        assert_eq!(result.content, "imagePullPolicy: IfNotPresent\n");
        assert_eq!(result.fixes.len(), 1);
        assert!(result.fixes[0].message.contains("IfNotPresent"));
    }

    #[test]
    fn test_backward_orphan_merge_after_split_key() {
        // The split-key repair emits a bare key; the stray value on the
        // following line then attaches backward to it.
        let input = "spec:\n  restartP\n  olicy:\n  Always\n";
        let result = repair_syntax(input);

        assert!(result.modified);
        assert!(result.content.contains("restartPolicy: Always"));
        assert_eq!(result.fixes.len(), 2);
        assert!(result.fixes[1].message.contains("previous key"));
    }

    #[test]
    fn test_token_typos() {
        let input = "containers:\n  - name: conts ainer-1\n    image: ngin x:latest\n";
        let result = repair_syntax(input);

        assert!(result.modified);
        assert!(result.content.contains("container-1"));
        assert!(result.content.contains("nginx:latest"));
        assert_eq!(result.fixes.len(), 2);
        assert_eq!(
            result.fixes[1].message,
            "Fixed image name: 'ngin x' -> 'nginx'"
        );
    }

    #[test]
    fn test_indent_tolerance_is_one_character() {
        let off_by_one = "  imagePullPolicy:\n   IfNotPresent\n";
        let result = repair_syntax(off_by_one);
        assert!(result.modified);
        assert!(result.content.contains("imagePullPolicy: IfNotPresent"));

        let off_by_five = "imagePullPolicy:\n     IfNotPresent\n";
        let result = repair_syntax(off_by_five);
        assert!(!result.modified);
        assert_eq!(result.content, off_by_five);
    }

    #[test]
    fn test_unknown_corruption_passes_through() {
        let input = ":::garbage\n  %%%\nkind Pod spec\n";
        let result = repair_syntax(input);

        assert!(!result.modified);
        assert_eq!(result.content, input);
        assert!(result.fixes.is_empty());
    }

    #[test]
    fn test_repaired_text_parses() {
        let input = "apiVersion: v1\nkind: Pod\nspec:\n  restartP\n  olicy: Always\n";
        let result = repair_syntax(input);

        assert!(result.modified);
        let parsed: serde_yaml::Value = serde_yaml::from_str(&result.content).unwrap();
        assert!(parsed.is_mapping());
    }

    #[test]
    fn test_clean_manifest_untouched() {
        let input = "apiVersion: v1\nkind: Pod\nmetadata:\n  name: web\n";
        let result = repair_syntax(input);

        assert!(!result.modified);
        assert_eq!(result.content, input);
    }
}
