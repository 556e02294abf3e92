//! # taglink Index
//!
//! Blocking predicates for candidate-pair generation, and wrappers that make
//! an existing whole-field predicate operate on one tagged sub-part instead.
//!
//! A blocking predicate maps a field value to a small set of keys; records
//! sharing a key become candidate pairs. When fields are structured, blocking
//! on a single sub-part ("StreetName", "Surname") is far more selective than
//! blocking on the whole value. [`PartialKeys`] and [`PartialIndex`] adapt
//! any inner predicate that way, sharing a single-slot
//! [`TagCache`](taglink_core::TagCache) so adjacent predicates over the same
//! value tag it only once.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use taglink_core::{Result, TagCache, TagMap, Tagged, Tagger};
//! use taglink_index::{tokens, KeyPredicate, PartialKeys, StringPredicate};
//!
//! struct StreetTagger;
//!
//! impl Tagger for StreetTagger {
//!     fn tag(&self, raw: &str) -> Result<Tagged> {
//!         let mut parts = TagMap::default();
//!         if let Some(name) = raw.split_whitespace().nth(1) {
//!             parts.insert("StreetName".to_string(), name.to_string());
//!         }
//!         Ok(Tagged::new(parts, "Street Address"))
//!     }
//! }
//!
//! let inner = StringPredicate::new(tokens, "tokens", "site address");
//! let predicate = PartialKeys::new(inner, "StreetName", Arc::new(StreetTagger))
//!     .with_cache(Arc::new(TagCache::new()));
//!
//! assert_eq!(predicate.block_keys("123 main st"), vec!["main"]);
//! ```

pub mod partial;
pub mod predicates;

pub use partial::{PartialIndex, PartialKeys};
pub use predicates::{
    first_token, three_grams, tokens, whole_field, IndexPredicate, KeyPredicate, SearchPredicate,
    StringPredicate,
};
