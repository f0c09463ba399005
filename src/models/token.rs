use serde::{Deserialize, Serialize};

/// Which adjacency table applies when checking a reference.
///
/// Local validation tolerates the `base` escape hatch (component tokens may
/// consume structural base tokens); external ingestion does not, because base
/// tokens must never be influenced by an external source. Keeping both tables
/// behind one method stops them drifting apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferencePolicy {
    /// Validating tokens extracted from the compiled stylesheet.
    Local,
    /// Validating tokens proposed by an external export.
    External,
}

/// Tier of a token, derived from the first segment of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Literal value, references nothing.
    Primitive,
    /// Intent, references a primitive.
    Semantic,
    /// Role, references a semantic (or a base locally).
    Component,
    /// Structural contract; never supplied externally.
    Base,
    /// Unrecognized prefix; exempt from adjacency checks.
    Unknown,
}

impl Tier {
    /// Derive a tier from an internal token name (`--semantic-color-action`).
    pub fn from_name(name: &str) -> Self {
        let stem = name.trim_start_matches("--");
        Self::from_segment(stem.split('-').next().unwrap_or(""))
    }

    /// Derive a tier from a bare segment (`semantic`), as used for the first
    /// segment of a dotted external name.
    pub fn from_segment(segment: &str) -> Self {
        match segment {
            "primitive" => Tier::Primitive,
            "semantic" => Tier::Semantic,
            "component" => Tier::Component,
            "base" => Tier::Base,
            _ => Tier::Unknown,
        }
    }

    /// Display name for messages.
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Primitive => "primitive",
            Tier::Semantic => "semantic",
            Tier::Component => "component",
            Tier::Base => "base",
            Tier::Unknown => "unknown",
        }
    }

    /// Tiers this tier is allowed to reference under the given policy.
    ///
    /// An empty slice for `Unknown` means "unchecked", not "forbidden" — see
    /// [`Tier::may_reference`].
    pub fn allowed_references(self, policy: ReferencePolicy) -> &'static [Tier] {
        match (self, policy) {
            (Tier::Primitive, _) => &[],
            (Tier::Semantic, _) => &[Tier::Primitive],
            (Tier::Component, ReferencePolicy::Local) => &[Tier::Semantic, Tier::Base],
            (Tier::Component, ReferencePolicy::External) => &[Tier::Semantic],
            (Tier::Base, _) => &[Tier::Semantic],
            (Tier::Unknown, _) => &[],
        }
    }

    /// Whether a token of this tier may reference a token of `target` tier.
    pub fn may_reference(self, target: Tier, policy: ReferencePolicy) -> bool {
        if self == Tier::Unknown {
            return true;
        }
        self.allowed_references(policy).contains(&target)
    }

    /// Human phrasing of the allowed-reference set, for rule messages.
    pub fn allowed_description(self, policy: ReferencePolicy) -> String {
        if self == Tier::Unknown {
            return "any tier".to_string();
        }
        let allowed = self.allowed_references(policy);
        if allowed.is_empty() {
            return "no other tokens".to_string();
        }
        let names: Vec<&str> = allowed.iter().map(|t| t.name()).collect();
        format!("{} tokens", names.join(" or "))
    }

    /// Whether an external source is allowed to manage tokens of this tier.
    pub fn externally_managed(self) -> bool {
        matches!(self, Tier::Primitive | Tier::Semantic | Tier::Component)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A token definition extracted from the compiled stylesheet.
///
/// Built once per run and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// Internal name, including the `--` prefix.
    pub name: String,
    /// Tier derived from the name prefix.
    pub tier: Tier,
    /// Raw value text as written in the stylesheet.
    pub value: String,
    /// Names referenced via `var()` inside the value.
    pub references: Vec<String>,
    /// 1-indexed source line of the definition.
    pub line: usize,
    /// Enclosing named scope (`:root` for top-level definitions).
    pub scope: String,
}
