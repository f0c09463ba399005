//! Stylesheet token extraction
//!
//! One forward pass over compiled CSS text, tracking a brace-depth counter
//! and a stack of enclosing selector names. A boolean flag marks `:root`
//! membership. Upstream compiler guarantees one declaration per line and no
//! braces inside multi-line comments; neither is enforced here.

use crate::models::{Tier, Token};
use anyhow::Result;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

/// A direct reference to a primitive token inside a non-root rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveUsage {
    /// Primitive token name referenced
    pub name: String,
    /// Selector of the enclosing rule
    pub selector: String,
    /// 1-indexed source line
    pub line: usize,
}

/// Everything the extractor learned from one stylesheet
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Root-scope definitions, first definition per name wins
    pub definitions: BTreeMap<String, Token>,
    /// Later duplicate definitions that were ignored: (name, line)
    pub duplicates: Vec<(String, usize)>,
    /// Names referenced via `var()` inside any non-root rule
    pub rule_references: BTreeSet<String>,
    /// Primitive-tier names referenced directly inside non-root rules
    pub primitive_usages: Vec<PrimitiveUsage>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
            && self.rule_references.is_empty()
            && self.primitive_usages.is_empty()
    }
}

/// Extract token definitions and usage sites from stylesheet text
pub fn extract(text: &str) -> Result<Extraction> {
    let definition_re = Regex::new(r"^\s*(--[A-Za-z0-9_-]+)\s*:\s*(.*?)\s*;?\s*$")?;
    let var_re = Regex::new(r"var\(\s*(--[A-Za-z0-9_-]+)")?;

    let mut extraction = Extraction::default();

    let mut depth: usize = 0;
    let mut scopes: Vec<String> = Vec::new();
    let mut in_root = false;
    let mut root_depth = 0;
    let mut in_comment = false;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = match strip_comments(raw_line, &mut in_comment) {
            Some(l) => l,
            None => continue,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(brace_pos) = trimmed.find('{') {
            let selector = trimmed[..brace_pos].trim();
            let selector = if selector.is_empty() { "@block" } else { selector };
            scopes.push(selector.to_string());
            depth += 1;
            if selector == ":root" && !in_root {
                in_root = true;
                root_depth = depth;
            }
            continue;
        }

        if trimmed.contains('}') {
            let closes = trimmed.matches('}').count();
            for _ in 0..closes {
                depth = depth.saturating_sub(1);
                scopes.pop();
                if in_root && depth < root_depth {
                    in_root = false;
                }
            }
            continue;
        }

        if depth == 0 {
            continue;
        }

        let scope = scopes.last().cloned().unwrap_or_else(|| ":root".to_string());

        if in_root {
            if let Some(caps) = definition_re.captures(trimmed) {
                let name = caps[1].to_string();
                let value = caps[2].to_string();
                let references: Vec<String> = var_re
                    .captures_iter(&value)
                    .map(|c| c[1].to_string())
                    .collect();

                if extraction.definitions.contains_key(&name) {
                    extraction.duplicates.push((name, line_no));
                } else {
                    let tier = Tier::from_name(&name);
                    extraction.definitions.insert(
                        name.clone(),
                        Token {
                            name,
                            tier,
                            value,
                            references,
                            line: line_no,
                            scope,
                        },
                    );
                }
            }
        } else {
            for caps in var_re.captures_iter(trimmed) {
                let name = caps[1].to_string();
                if Tier::from_name(&name) == Tier::Primitive {
                    extraction.primitive_usages.push(PrimitiveUsage {
                        name: name.clone(),
                        selector: scope.clone(),
                        line: line_no,
                    });
                }
                extraction.rule_references.insert(name);
            }
        }
    }

    Ok(extraction)
}

/// Remove comment text from a line, carrying multi-line comment state.
/// Returns None when the whole line is inside a comment.
fn strip_comments(line: &str, in_comment: &mut bool) -> Option<String> {
    let mut out = String::new();
    let mut rest = line;

    loop {
        if *in_comment {
            match rest.find("*/") {
                Some(pos) => {
                    *in_comment = false;
                    rest = &rest[pos + 2..];
                }
                None => {
                    return if out.is_empty() { None } else { Some(out) };
                }
            }
        } else {
            match rest.find("/*") {
                Some(pos) => {
                    out.push_str(&rest[..pos]);
                    *in_comment = true;
                    rest = &rest[pos + 2..];
                }
                None => {
                    out.push_str(rest);
                    return Some(out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
/* compiled token layer */
:root {
  --primitive-color-blue-500: #3b82f6;
  --semantic-color-action: var(--primitive-color-blue-500);
  --component-button-bg: var(--semantic-color-action);
}

.button {
  background: var(--component-button-bg);
}

.card {
  /* direct primitive, should be flagged by rules */
  border-color: var(--primitive-color-blue-500);
}
"#;

    #[test]
    fn test_extracts_root_definitions() {
        let extraction = extract(SAMPLE).unwrap();

        assert_eq!(extraction.definitions.len(), 3);
        let action = &extraction.definitions["--semantic-color-action"];
        assert_eq!(action.tier, Tier::Semantic);
        assert_eq!(action.value, "var(--primitive-color-blue-500)");
        assert_eq!(action.references, vec!["--primitive-color-blue-500"]);
        assert_eq!(action.scope, ":root");
    }

    #[test]
    fn test_collects_rule_references() {
        let extraction = extract(SAMPLE).unwrap();

        assert!(extraction
            .rule_references
            .contains("--component-button-bg"));
        assert!(extraction
            .rule_references
            .contains("--primitive-color-blue-500"));
    }

    #[test]
    fn test_flags_direct_primitive_usage_with_selector() {
        let extraction = extract(SAMPLE).unwrap();

        assert_eq!(extraction.primitive_usages.len(), 1);
        let usage = &extraction.primitive_usages[0];
        assert_eq!(usage.name, "--primitive-color-blue-500");
        assert_eq!(usage.selector, ".card");
    }

    #[test]
    fn test_first_definition_wins() {
        let css = r#"
:root {
  --primitive-color-red: #ff0000;
  --primitive-color-red: #ee0000;
}
"#;
        let extraction = extract(css).unwrap();

        assert_eq!(
            extraction.definitions["--primitive-color-red"].value,
            "#ff0000"
        );
        assert_eq!(extraction.duplicates.len(), 1);
        assert_eq!(extraction.duplicates[0].0, "--primitive-color-red");
    }

    #[test]
    fn test_definitions_outside_root_are_ignored() {
        let css = r#"
.theme-dark {
  --semantic-color-action: #222222;
}
:root {
  --primitive-color-blue: #0000ff;
}
"#;
        let extraction = extract(css).unwrap();

        assert_eq!(extraction.definitions.len(), 1);
        assert!(extraction.definitions.contains_key("--primitive-color-blue"));
        // the non-root var-less declaration contributes no rule references
        assert!(extraction.rule_references.is_empty());
    }

    #[test]
    fn test_multiline_comments_are_skipped() {
        let css = r#"
:root {
  /* a comment
     spanning lines
     --primitive-fake: #000; */
  --primitive-real: #fff;
}
"#;
        let extraction = extract(css).unwrap();

        assert_eq!(extraction.definitions.len(), 1);
        assert!(extraction.definitions.contains_key("--primitive-real"));
    }

    #[test]
    fn test_source_lines_are_recorded() {
        let extraction = extract(SAMPLE).unwrap();
        assert_eq!(
            extraction.definitions["--primitive-color-blue-500"].line,
            4
        );
    }

    #[test]
    fn test_empty_stylesheet() {
        let extraction = extract("").unwrap();
        assert!(extraction.is_empty());
    }

    #[test]
    fn test_nested_rule_scope_tracking() {
        let css = r#"
@media (min-width: 600px) {
  .toolbar {
    color: var(--component-toolbar-fg);
  }
}
"#;
        let extraction = extract(css).unwrap();

        assert!(extraction
            .rule_references
            .contains("--component-toolbar-fg"));
        assert!(extraction.definitions.is_empty());
    }
}
