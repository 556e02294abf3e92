//! Single-slot tag cache
//!
//! Blocking predicates for the same field often run back-to-back over the
//! same record, so the value most recently handed to the tagger is very
//! likely to come around again on the next call. [`TagCache`] memoizes
//! exactly that one value. It is an optimization, not a correctness
//! requirement: skipping it (always re-tagging) changes nothing observable.

use parking_lot::Mutex;

use crate::tagger::{TagMap, Tagger};

/// Memo over the most recently tagged field value.
///
/// Holds exactly one entry, keyed by exact string equality, overwritten on
/// every distinct input. Tagging failure is memoized as an empty map so a
/// failing value is still only handed to the tagger once.
#[derive(Debug, Default)]
pub struct TagCache {
    slot: Mutex<Option<(String, TagMap)>>,
}

impl TagCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the tag map for `field`, re-tagging only on a cache miss.
    pub fn get_or_tag(&self, tagger: &dyn Tagger, field: &str) -> TagMap {
        let mut slot = self.slot.lock();

        if let Some((cached_field, cached_parts)) = slot.as_ref() {
            if cached_field == field {
                return cached_parts.clone();
            }
        }

        let parts = match tagger.tag(field) {
            Ok(tagged) => tagged.parts,
            // treated as "no value"; the failure never propagates from here
            Err(_) => TagMap::default(),
        };

        *slot = Some((field.to_string(), parts.clone()));
        parts
    }
}
