// src/rulebook/mod.rs
//! Category profiles: the per-tag rule sets that drive cleaning, direct
//! mapping and label display.
//!
//! A [`Rulebook`] is a lookup table from category tag to [`CategoryProfile`].
//! Profiles are compiled once from TOML and are read-only afterwards, so a
//! single rulebook can back any number of concurrent normalisation calls.
//! A tag with no profile is not an error: every stage is a no-op for it.

use crate::clean;
use crate::config::types::{CategoryToml, FieldnormToml};
use crate::error::{NormaliseError, Result};
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

const BUILTIN_RULES: &str = include_str!("builtin.toml");

static BUILTIN: LazyLock<Rulebook> = LazyLock::new(|| {
    Rulebook::from_toml(BUILTIN_RULES).unwrap_or_else(|e| panic!("Invalid built-in rules: {e}"))
});

/// A regex substitution applied during cleaning.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub pattern: Regex,
    pub replacement: String,
}

/// A canonical name and the aliases that should collapse onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymGroup {
    pub canonical: String,
    pub aliases: Vec<String>,
}

/// A recurring name: any cleaned value matching `pattern` becomes `label`.
#[derive(Debug, Clone)]
pub struct KnownName {
    pub pattern: Regex,
    pub label: String,
}

/// Compiled rules for one category tag.
#[derive(Debug, Clone, Default)]
pub struct CategoryProfile {
    pub name: String,
    pub patterns: Vec<PatternRule>,
    pub synonyms: Vec<SynonymGroup>,
    pub known_names: Vec<KnownName>,
    pub acronyms: Vec<String>,
    /// Component names for splitting combined answers, longest first.
    pub components: Vec<String>,
    pub suffixes: Vec<String>,
    pub default_suffix: Option<String>,
    pub collapse_repeats: bool,
}

impl CategoryProfile {
    /// Compiles an authored profile.
    ///
    /// Synonym aliases, canonical names and known-name labels are brought into
    /// cleaned form here so that they compare like-for-like with cleaned values.
    ///
    /// # Errors
    /// Returns error if any pattern fails to compile.
    pub fn compile(name: &str, raw: &CategoryToml) -> Result<Self> {
        let regex = |pattern: &str| {
            Regex::new(pattern).map_err(|source| NormaliseError::Regex {
                category: name.to_string(),
                source,
            })
        };

        let patterns = raw
            .patterns
            .iter()
            .map(|p| {
                Ok(PatternRule {
                    pattern: regex(&p.pattern)?,
                    replacement: p.replacement.to_lowercase(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let known_names = raw
            .known_names
            .iter()
            .map(|k| {
                Ok(KnownName {
                    pattern: regex(&k.pattern)?,
                    label: clean::squash(&k.label.to_lowercase()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let synonyms = raw
            .synonyms
            .iter()
            .map(|s| SynonymGroup {
                canonical: clean::squash(&s.canonical.to_lowercase()),
                aliases: s
                    .aliases
                    .iter()
                    .map(|a| clean::squash(&a.to_lowercase()))
                    .collect(),
            })
            .collect();

        let mut components: Vec<String> = raw
            .components
            .iter()
            .map(|c| clean::squash(&c.to_lowercase()))
            .filter(|c| !c.is_empty())
            .collect();
        components.sort_by_key(|c| std::cmp::Reverse(c.split(' ').count()));

        Ok(Self {
            name: name.to_string(),
            patterns,
            synonyms,
            known_names,
            acronyms: raw.acronyms.iter().map(|a| a.to_lowercase()).collect(),
            components,
            suffixes: raw.suffixes.iter().map(|s| s.to_lowercase()).collect(),
            default_suffix: raw.default_suffix.as_ref().map(|s| s.to_lowercase()),
            collapse_repeats: raw.collapse_repeats,
        })
    }

    /// Returns the label of the first known-name rule matching `text`.
    #[must_use]
    pub fn known_name(&self, text: &str) -> Option<&str> {
        self.known_names
            .iter()
            .find(|k| k.pattern.is_match(text))
            .map(|k| k.label.as_str())
    }

    #[must_use]
    pub fn is_acronym(&self, token: &str) -> bool {
        self.acronyms.iter().any(|a| a == token)
    }

    /// Splits a trailing suffix word off a multi-word value.
    #[must_use]
    pub fn strip_suffix<'a>(&self, text: &'a str) -> (&'a str, Option<&'a str>) {
        match text.rsplit_once(' ') {
            Some((stem, last)) if self.suffixes.iter().any(|s| s == last) => (stem, Some(last)),
            _ => (text, None),
        }
    }

    /// Gives a single-word stem its suffix back: the one stripped from it,
    /// else the default. Longer stems stay stripped.
    #[must_use]
    pub fn restore_suffix(&self, stem: &str, stripped: Option<&str>) -> String {
        let single = !stem.is_empty() && !stem.contains(' ');
        let bare = stem.eq_ignore_ascii_case(clean::UNKNOWN)
            || self.is_acronym(stem)
            || self.suffixes.iter().any(|s| s == stem);
        match stripped.or(self.default_suffix.as_deref()) {
            Some(suffix) if single && !bare => format!("{stem} {suffix}"),
            _ => stem.to_string(),
        }
    }
}

/// Lookup table from category tag to its compiled profile.
#[derive(Debug, Clone, Default)]
pub struct Rulebook {
    categories: HashMap<String, CategoryProfile>,
}

impl Rulebook {
    /// The built-in college / subject / gender / age-group profiles.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Parses and compiles the `[categories.*]` tables of a TOML document.
    ///
    /// # Errors
    /// Returns error on malformed TOML or an invalid pattern.
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: FieldnormToml = toml::from_str(content)?;
        Self::compile(&raw.categories)
    }

    /// Compiles authored category tables.
    ///
    /// # Errors
    /// Returns error if any pattern fails to compile.
    pub fn compile(raw: &BTreeMap<String, CategoryToml>) -> Result<Self> {
        let categories = raw
            .iter()
            .map(|(name, table)| Ok((name.clone(), CategoryProfile::compile(name, table)?)))
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(Self { categories })
    }

    /// Overlays `other` onto `self`; profiles in `other` win by name.
    #[must_use]
    pub fn merged(mut self, other: Rulebook) -> Self {
        self.categories.extend(other.categories);
        self
    }

    #[must_use]
    pub fn profile(&self, category: Option<&str>) -> Option<&CategoryProfile> {
        category.and_then(|c| self.categories.get(c))
    }

    /// Category tags with a registered profile, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.categories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
