//! Blocking predicates
//!
//! The inner predicates the partial-field wrappers adapt. Two shapes exist:
//!
//! - [`KeyPredicate`] - maps a field value directly to block keys
//! - [`IndexPredicate`] - canopy/search-style predicates that preprocess a
//!   value before it enters an external index; only the preprocessing
//!   contract is modeled here

use std::fmt;

use ahash::AHashSet;

/// A predicate that produces block keys for a field value. Records sharing
/// a key become candidate pairs.
pub trait KeyPredicate {
    fn block_keys(&self, value: &str) -> Vec<String>;
}

/// A canopy/search-style predicate: values are preprocessed and handed to an
/// external index structure for threshold-based candidate lookup.
pub trait IndexPredicate {
    fn preprocess(&self, doc: &str) -> String;
}

/// Key function over a raw field value.
pub type PredicateFn = fn(&str) -> Vec<String>;

/// The whole normalized value as a single key.
pub fn whole_field(value: &str) -> Vec<String> {
    vec![normalize(value)]
}

/// One key per distinct token.
pub fn tokens(value: &str) -> Vec<String> {
    let unique: AHashSet<String> = normalize(value)
        .split_whitespace()
        .map(str::to_string)
        .collect();
    unique.into_iter().collect()
}

/// The first token only.
pub fn first_token(value: &str) -> Vec<String> {
    normalize(value)
        .split_whitespace()
        .next()
        .map(str::to_string)
        .into_iter()
        .collect()
}

/// Distinct character 3-grams of the normalized value.
pub fn three_grams(value: &str) -> Vec<String> {
    let chars: Vec<char> = normalize(value).chars().collect();
    if chars.len() < 3 {
        return Vec::new();
    }
    let unique: AHashSet<String> = chars
        .windows(3)
        .map(|window| window.iter().collect())
        .collect();
    unique.into_iter().collect()
}

/// Lowercase, strip punctuation, collapse whitespace.
fn normalize(value: &str) -> String {
    let tokens: Vec<String> = value
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    tokens.join(" ")
}

/// A named key predicate over one record field.
#[derive(Clone)]
pub struct StringPredicate {
    func: PredicateFn,
    func_name: &'static str,
    field: String,
}

impl StringPredicate {
    pub fn new(func: PredicateFn, func_name: &'static str, field: impl Into<String>) -> Self {
        Self {
            func,
            func_name,
            field: field.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

impl KeyPredicate for StringPredicate {
    fn block_keys(&self, value: &str) -> Vec<String> {
        if value.is_empty() {
            return Vec::new();
        }
        (self.func)(value)
    }
}

impl fmt::Display for StringPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.func_name, self.field)
    }
}

/// Threshold predicate backed by an external search/canopy index; this crate
/// only models its preprocessing step.
#[derive(Debug, Clone)]
pub struct SearchPredicate {
    pub threshold: f64,
    pub field: String,
}

impl SearchPredicate {
    pub fn new(threshold: f64, field: impl Into<String>) -> Self {
        Self {
            threshold,
            field: field.into(),
        }
    }
}

impl IndexPredicate for SearchPredicate {
    fn preprocess(&self, doc: &str) -> String {
        normalize(doc)
    }
}

impl fmt::Display for SearchPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.threshold, self.field)
    }
}
