//! # taglink
//!
//! Structured-field similarity vectors for record linkage and deduplication.
//!
//! Given two free-text values describing the same conceptual entity
//! (addresses, names, deeds), taglink decomposes each into labeled sub-parts
//! via an external tagger, aligns matching sub-parts across possibly
//! different orderings, and emits a deterministic fixed-length vector of
//! similarity signals for a downstream classifier.
//!
//! ## Quick Start
//!
//! ```rust
//! use taglink::prelude::*;
//!
//! // an external tagging model, treated as a black box
//! struct NameTagger;
//!
//! impl Tagger for NameTagger {
//!     fn tag(&self, raw: &str) -> Result<Tagged> {
//!         let mut parts = TagMap::default();
//!         let words: Vec<&str> = raw.split_whitespace().collect();
//!         if let Some(first) = words.first() {
//!             parts.insert("GivenName".to_string(), first.to_string());
//!         }
//!         if words.len() > 1 {
//!             parts.insert("Surname".to_string(), words[words.len() - 1].to_string());
//!         }
//!         Ok(Tagged::new(parts, "Person"))
//!     }
//! }
//!
//! // declare what a "name" field can contain
//! let decls = vec![CategoryDecl {
//!     label: "Person".to_string(),
//!     alignment: Alignment::FixedOrder,
//!     part_groups: vec![vec![
//!         PartDecl::new("first name", &["GivenName"]),
//!         PartDecl::new("last name", &["Surname"]),
//!     ]],
//! }];
//!
//! let schema = CompiledSchema::compile(&decls).unwrap();
//! let comparator = StructuredComparator::new("name", schema, NameTagger);
//!
//! let vector = comparator.compare("John Smith", "J. Smith");
//! assert_eq!(vector.len(), comparator.expanded_size());
//! ```
//!
//! ## Crate Structure
//!
//! taglink is composed of several crates:
//!
//! - [`taglink-core`](https://docs.rs/taglink-core) - tagger contract, affine
//!   gap string metric, single-slot tag cache
//! - [`taglink-compare`](https://docs.rs/taglink-compare) - comparison
//!   schemas, alignment strategies, the structured comparator
//! - [`taglink-index`](https://docs.rs/taglink-index) - blocking predicates
//!   and partial-field wrappers

// Re-export core types
pub use taglink_core::{
    affine_gap, normalized_affine_gap,
    Error, Result,
    TagCache, TagMap, Tagged, Tagger, AMBIGUOUS,
};

// Re-export the comparator
pub use taglink_compare::{
    derived_features, Alignment, CategoryConfig, CategoryDecl, CompareStrategy, CompiledSchema,
    DerivedFeature, DistanceVector, FeatureKind, PartDecl, SchemaError, StructuredComparator,
};

// Re-export blocking predicates
pub use taglink_index::{
    first_token, three_grams, tokens, whole_field, IndexPredicate, KeyPredicate, PartialIndex,
    PartialKeys, SearchPredicate, StringPredicate,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        normalized_affine_gap,
        Alignment, CategoryDecl, CompiledSchema, PartDecl,
        DistanceVector, StructuredComparator,
        Error, Result,
        IndexPredicate, KeyPredicate, PartialIndex, PartialKeys,
        TagCache, TagMap, Tagged, Tagger, AMBIGUOUS,
    };
}
