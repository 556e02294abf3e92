//! Partial-field predicate wrappers
//!
//! Adapt an existing whole-field blocking predicate so it operates on one
//! tagged sub-part of the value instead. Tagging goes through an injected,
//! optional single-slot [`TagCache`], so a battery of partial predicates over
//! the same field tags each record only once. Tagging failure is treated as
//! "no value" and never propagates.

use std::fmt;
use std::sync::Arc;

use taglink_core::{TagCache, TagMap, Tagger};

use crate::predicates::{IndexPredicate, KeyPredicate};

/// The shared part-extraction plumbing of both wrappers.
struct PartialField {
    part: String,
    tagger: Arc<dyn Tagger>,
    cache: Option<Arc<TagCache>>,
}

impl PartialField {
    fn extract(&self, doc: &str) -> String {
        let parts = match &self.cache {
            Some(cache) => cache.get_or_tag(self.tagger.as_ref(), doc),
            None => match self.tagger.tag(doc) {
                Ok(tagged) => tagged.parts,
                Err(_) => TagMap::default(),
            },
        };
        parts.get(&self.part).cloned().unwrap_or_default()
    }
}

/// Wraps an [`IndexPredicate`]: the named sub-part (empty when absent or when
/// tagging failed) is what gets preprocessed into the external index.
pub struct PartialIndex<P> {
    inner: P,
    partial: PartialField,
}

impl<P> PartialIndex<P> {
    pub fn new(inner: P, part: impl Into<String>, tagger: Arc<dyn Tagger>) -> Self {
        Self {
            inner,
            partial: PartialField {
                part: part.into(),
                tagger,
                cache: None,
            },
        }
    }

    /// Share a tag cache with other predicates over the same field.
    pub fn with_cache(mut self, cache: Arc<TagCache>) -> Self {
        self.partial.cache = Some(cache);
        self
    }

    pub fn part(&self) -> &str {
        &self.partial.part
    }
}

impl<P: IndexPredicate> IndexPredicate for PartialIndex<P> {
    fn preprocess(&self, doc: &str) -> String {
        self.inner.preprocess(&self.partial.extract(doc))
    }
}

impl<P: fmt::Display> fmt::Display for PartialIndex<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.inner, self.partial.part)
    }
}

/// Wraps a [`KeyPredicate`]: block keys come from the named sub-part. An
/// empty field short-circuits to no keys without invoking the tagger.
pub struct PartialKeys<P> {
    inner: P,
    partial: PartialField,
}

impl<P> PartialKeys<P> {
    pub fn new(inner: P, part: impl Into<String>, tagger: Arc<dyn Tagger>) -> Self {
        Self {
            inner,
            partial: PartialField {
                part: part.into(),
                tagger,
                cache: None,
            },
        }
    }

    /// Share a tag cache with other predicates over the same field.
    pub fn with_cache(mut self, cache: Arc<TagCache>) -> Self {
        self.partial.cache = Some(cache);
        self
    }

    pub fn part(&self) -> &str {
        &self.partial.part
    }
}

impl<P: KeyPredicate> KeyPredicate for PartialKeys<P> {
    fn block_keys(&self, value: &str) -> Vec<String> {
        if value.is_empty() {
            return Vec::new();
        }
        let part = self.partial.extract(value);
        if part.is_empty() {
            return Vec::new();
        }
        self.inner.block_keys(&part)
    }
}

impl<P: fmt::Display> fmt::Display for PartialKeys<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.inner, self.partial.part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::{tokens, SearchPredicate, StringPredicate};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use taglink_core::{Error, Result, Tagged};

    /// Tags "<number> <street...>" into AddressNumber/StreetName; values
    /// containing "?" fail.
    struct AddressTagger {
        calls: AtomicUsize,
    }

    impl AddressTagger {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl Tagger for AddressTagger {
        fn tag(&self, raw: &str) -> Result<Tagged> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if raw.contains('?') {
                return Err(Error::RepeatedLabel {
                    original: raw.to_string(),
                });
            }
            let mut parts = TagMap::default();
            let mut words = raw.split_whitespace();
            if let Some(number) = words.next() {
                parts.insert("AddressNumber".to_string(), number.to_string());
            }
            let rest: Vec<&str> = words.collect();
            if !rest.is_empty() {
                parts.insert("StreetName".to_string(), rest.join(" "));
            }
            Ok(Tagged::new(parts, "Street Address"))
        }
    }

    #[test]
    fn test_partial_keys_blocks_on_sub_part() {
        let tagger = AddressTagger::new();
        let inner = StringPredicate::new(tokens, "tokens", "address");
        let predicate = PartialKeys::new(inner, "StreetName", tagger);

        let mut keys = predicate.block_keys("123 main st");
        keys.sort();
        assert_eq!(keys, vec!["main", "st"]);
    }

    #[test]
    fn test_partial_keys_empty_field_skips_tagger() {
        let tagger = AddressTagger::new();
        let inner = StringPredicate::new(tokens, "tokens", "address");
        let predicate = PartialKeys::new(inner, "StreetName", tagger.clone());

        assert!(predicate.block_keys("").is_empty());
        assert_eq!(tagger.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_partial_keys_missing_part_no_keys() {
        let tagger = AddressTagger::new();
        let inner = StringPredicate::new(tokens, "tokens", "address");
        let predicate = PartialKeys::new(inner, "StreetName", tagger);

        // single token: no StreetName tagged
        assert!(predicate.block_keys("123").is_empty());
    }

    #[test]
    fn test_partial_index_failed_tagging_equals_empty_preprocess() {
        let tagger = AddressTagger::new();
        let inner = SearchPredicate::new(0.8, "address");
        let predicate = PartialIndex::new(SearchPredicate::new(0.8, "address"), "StreetName", tagger);

        assert_eq!(predicate.preprocess("bad?value"), inner.preprocess(""));
    }

    #[test]
    fn test_partial_index_preprocesses_sub_part() {
        let tagger = AddressTagger::new();
        let predicate =
            PartialIndex::new(SearchPredicate::new(0.8, "address"), "StreetName", tagger);

        assert_eq!(predicate.preprocess("123 Main St."), "main st");
    }

    #[test]
    fn test_shared_cache_tags_once_across_predicates() {
        let tagger = AddressTagger::new();
        let cache = Arc::new(TagCache::new());

        let by_street = PartialKeys::new(
            StringPredicate::new(tokens, "tokens", "address"),
            "StreetName",
            tagger.clone(),
        )
        .with_cache(cache.clone());
        let by_number = PartialKeys::new(
            StringPredicate::new(tokens, "tokens", "address"),
            "AddressNumber",
            tagger.clone(),
        )
        .with_cache(cache);

        by_street.block_keys("123 main st");
        by_number.block_keys("123 main st");

        assert_eq!(tagger.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_display_names() {
        let tagger = AddressTagger::new();
        let keys = PartialKeys::new(
            StringPredicate::new(tokens, "tokens", "address"),
            "StreetName",
            tagger.clone(),
        );
        let index =
            PartialIndex::new(SearchPredicate::new(0.8, "address"), "StreetName", tagger);

        assert_eq!(keys.to_string(), "((tokens, address), StreetName)");
        assert_eq!(index.to_string(), "((0.8, address), StreetName)");
    }
}
