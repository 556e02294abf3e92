//! # taglink Compare
//!
//! A schema-driven structured comparator for record linkage.
//!
//! Two free-text values describing the same conceptual entity (addresses,
//! names, deeds) are decomposed into labeled sub-parts by an external
//! [`Tagger`](taglink_core::Tagger), aligned sub-part by sub-part, and
//! scored into a fixed-length vector of similarity signals for a downstream
//! classifier.
//!
//! ## Features
//!
//! - **Comparison Schema**: declarative category/sub-part declarations,
//!   compiled once into an immutable lookup structure
//! - **Alignment Strategies**: fixed-order and permutable sub-part alignment
//! - **Distance Vectors**: every input, however malformed, yields a fully
//!   defined vector of constant, schema-determined length
//! - **Derived Features**: feature names matching the vector layout
//!   index-for-index
//!
//! ## Example
//!
//! ```rust
//! use taglink_compare::{Alignment, CategoryDecl, CompiledSchema, PartDecl};
//!
//! let decls = vec![
//!     CategoryDecl {
//!         label: "Person".to_string(),
//!         alignment: Alignment::FixedOrder,
//!         part_groups: vec![vec![
//!             PartDecl::new("first name", &["GivenName"]),
//!             PartDecl::new("last name", &["Surname"]),
//!         ]],
//!     },
//!     CategoryDecl {
//!         label: "Organization".to_string(),
//!         alignment: Alignment::FixedOrder,
//!         part_groups: vec![vec![PartDecl::new("name", &["CorporationName"])]],
//!     },
//! ];
//!
//! let schema = CompiledSchema::compile(&decls).unwrap();
//! assert_eq!(schema.n_parts(), 3);
//! // not missing + ambiguous + same type + 1 indicator + 2 * 3 parts + full string
//! assert_eq!(schema.expanded_size(), 11);
//! ```
//!
//! ## Data flow
//!
//! ```text
//! raw value ──> tagger ──> (category, {part -> substring})
//!                                │
//!                   schema lookup (category config)
//!                                │
//!                      alignment strategy ──> per-part scores
//!                                │
//!                        DistanceVector (flat, fixed length)
//! ```

pub mod align;
pub mod comparator;
pub mod features;
pub mod schema;

pub use align::CompareStrategy;
pub use comparator::{DistanceVector, StructuredComparator};
pub use features::{derived_features, DerivedFeature, FeatureKind};
pub use schema::{Alignment, CategoryConfig, CategoryDecl, CompiledSchema, PartDecl, SchemaError};
