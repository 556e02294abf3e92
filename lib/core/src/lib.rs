//! # taglink Core
//!
//! Core library for taglink, a structured-field similarity engine for
//! record linkage.
//!
//! This crate provides the pieces the higher-level comparison and blocking
//! crates are built on:
//!
//! - [`Tagger`] - the contract for external models that label substrings of a
//!   raw field with semantic roles and an overall category
//! - [`Tagged`] / [`TagMap`] - the output of a tagger for one raw value
//! - [`normalized_affine_gap`] - the base string distance applied to aligned
//!   sub-parts and whole field values
//! - [`TagCache`] - a single-slot memo that avoids re-tagging the value seen
//!   on the immediately preceding call
//!
//! ## Example
//!
//! ```rust
//! use taglink_core::{Tagged, TagMap, Tagger, Result, normalized_affine_gap};
//!
//! struct NaiveNameTagger;
//!
//! impl Tagger for NaiveNameTagger {
//!     fn tag(&self, raw: &str) -> Result<Tagged> {
//!         let mut parts = TagMap::default();
//!         let mut words = raw.split_whitespace();
//!         if let Some(first) = words.next() {
//!             parts.insert("GivenName".to_string(), first.to_string());
//!         }
//!         if let Some(last) = words.last() {
//!             parts.insert("Surname".to_string(), last.to_string());
//!         }
//!         Ok(Tagged::new(parts, "Person"))
//!     }
//! }
//!
//! let tagged = NaiveNameTagger.tag("John Smith").unwrap();
//! assert_eq!(tagged.category, "Person");
//! assert!(normalized_affine_gap("John", "J.") > 0.0);
//! ```

pub mod cache;
pub mod distance;
pub mod error;
pub mod tagger;

pub use cache::TagCache;
pub use distance::{affine_gap, normalized_affine_gap};
pub use error::{Error, Result};
pub use tagger::{TagMap, Tagged, Tagger, AMBIGUOUS};
