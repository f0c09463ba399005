//! Diff engine
//!
//! A pure function over two token sets. The local set is restricted to the
//! tiers an external source may manage; base and unknown tokens never appear
//! in a diff. Value comparison is exact text comparison, no semantic
//! equivalence.

use crate::models::{DiffCategory, DiffEntry, ExternalToken, Token};
use std::collections::BTreeMap;

/// Classify normalized external tokens against extracted local tokens.
///
/// Output is deterministically ordered by (category, name): NEW, MODIFIED,
/// REMOVED, UNCHANGED.
pub fn classify(external: &[ExternalToken], local: &BTreeMap<String, Token>) -> Vec<DiffEntry> {
    let managed: BTreeMap<&str, &Token> = local
        .iter()
        .filter(|(_, token)| token.tier.externally_managed())
        .map(|(name, token)| (name.as_str(), token))
        .collect();

    let mut entries: Vec<DiffEntry> = Vec::new();

    for token in external {
        match managed.get(token.name.as_str()) {
            None => entries.push(DiffEntry {
                category: DiffCategory::New,
                name: token.name.clone(),
                old_value: None,
                new_value: Some(token.value.clone()),
            }),
            Some(existing) if existing.value == token.value => entries.push(DiffEntry {
                category: DiffCategory::Unchanged,
                name: token.name.clone(),
                old_value: Some(existing.value.clone()),
                new_value: Some(token.value.clone()),
            }),
            Some(existing) => entries.push(DiffEntry {
                category: DiffCategory::Modified,
                name: token.name.clone(),
                old_value: Some(existing.value.clone()),
                new_value: Some(token.value.clone()),
            }),
        }
    }

    // Qualifying local names absent externally are informational removals;
    // nothing is ever auto-deleted.
    for (name, token) in &managed {
        if !external.iter().any(|t| t.name == *name) {
            entries.push(DiffEntry {
                category: DiffCategory::Removed,
                name: name.to_string(),
                old_value: Some(token.value.clone()),
                new_value: None,
            });
        }
    }

    entries.sort_by(|a, b| (a.category, &a.name).cmp(&(b.category, &b.name)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tier;

    fn local(entries: &[(&str, &str)]) -> BTreeMap<String, Token> {
        entries
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    Token {
                        name: name.to_string(),
                        tier: Tier::from_name(name),
                        value: value.to_string(),
                        references: Vec::new(),
                        line: 1,
                        scope: ":root".to_string(),
                    },
                )
            })
            .collect()
    }

    fn external(entries: &[(&str, &str)]) -> Vec<ExternalToken> {
        entries
            .iter()
            .map(|(name, value)| ExternalToken {
                source_name: name.trim_start_matches("--").replace('-', "."),
                source_value: value.to_string(),
                name: name.to_string(),
                value: value.to_string(),
                tier: Tier::from_name(name),
                references: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn test_new_modified_unchanged_removed() {
        let local = local(&[
            ("--primitive-a", "#000"),
            ("--semantic-b", "var(--primitive-a)"),
            ("--component-gone", "var(--semantic-b)"),
        ]);
        let external = external(&[
            ("--primitive-a", "#000"),
            ("--semantic-b", "var(--primitive-new)"),
            ("--component-c", "var(--semantic-b)"),
        ]);

        let entries = classify(&external, &local);
        let by_name = |n: &str| entries.iter().find(|e| e.name == n).unwrap();

        assert_eq!(by_name("--primitive-a").category, DiffCategory::Unchanged);
        assert_eq!(by_name("--semantic-b").category, DiffCategory::Modified);
        assert_eq!(by_name("--component-c").category, DiffCategory::New);
        assert_eq!(by_name("--component-gone").category, DiffCategory::Removed);
    }

    #[test]
    fn test_existing_chain_with_one_new_component() {
        // batch defines A, B, C; local already has A and B identically but
        // lacks C: one NEW, two UNCHANGED
        let local = local(&[
            ("--primitive-a", "#3b82f6"),
            ("--semantic-b", "var(--primitive-a)"),
        ]);
        let external = external(&[
            ("--primitive-a", "#3b82f6"),
            ("--semantic-b", "var(--primitive-a)"),
            ("--component-c", "var(--semantic-b)"),
        ]);

        let entries = classify(&external, &local);
        let count = |c: DiffCategory| entries.iter().filter(|e| e.category == c).count();

        assert_eq!(count(DiffCategory::New), 1);
        assert_eq!(count(DiffCategory::Unchanged), 2);
        assert_eq!(count(DiffCategory::Modified), 0);
        assert_eq!(count(DiffCategory::Removed), 0);
    }

    #[test]
    fn test_base_and_unknown_tiers_are_excluded() {
        let local = local(&[
            ("--base-radius", "4px"),
            ("--legacy-thing", "#123"),
            ("--primitive-a", "#000"),
        ]);
        let external = external(&[("--primitive-a", "#000")]);

        let entries = classify(&external, &local);

        assert!(!entries.iter().any(|e| e.name == "--base-radius"));
        assert!(!entries.iter().any(|e| e.name == "--legacy-thing"));
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_diff_is_idempotent() {
        let local = local(&[("--primitive-a", "#000")]);
        let external = external(&[("--primitive-a", "#111"), ("--semantic-b", "#222")]);

        let first = classify(&external, &local);
        let second = classify(&external, &local);
        assert_eq!(first, second);
    }

    #[test]
    fn test_self_diff_is_all_unchanged() {
        let pairs = &[
            ("--primitive-a", "#000"),
            ("--semantic-b", "var(--primitive-a)"),
        ];
        let local = local(pairs);
        let external = external(pairs);

        let entries = classify(&external, &local);
        assert!(entries
            .iter()
            .all(|e| e.category == DiffCategory::Unchanged));
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_exact_text_comparison_no_equivalence() {
        // #FFF and #ffffff are the same color but different text
        let local = local(&[("--primitive-white", "#FFF")]);
        let external = external(&[("--primitive-white", "#ffffff")]);

        let entries = classify(&external, &local);
        assert_eq!(entries[0].category, DiffCategory::Modified);
    }

    #[test]
    fn test_empty_local_set_everything_is_new() {
        let local = local(&[]);
        let external = external(&[("--primitive-a", "#000")]);

        let entries = classify(&external, &local);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, DiffCategory::New);
    }
}
