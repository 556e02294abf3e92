//! Tagger contract
//!
//! A tagger is an external model that decomposes a raw field value into
//! labeled sub-parts and an overall category (e.g. "123 Main St" into
//! AddressNumber/StreetName under the "Street Address" category). taglink
//! treats it as a black box behind the [`Tagger`] trait.

use crate::error::Result;
use ahash::AHashMap;

/// Label -> substring mapping produced by a tagger for one raw value.
///
/// Values may be partial or empty; absent labels are simply not present.
pub type TagMap = AHashMap<String, String>;

/// Category a tagger reports when it cannot settle on a single type.
pub const AMBIGUOUS: &str = "Ambiguous";

/// The tagger's output for one raw field value.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged {
    /// Sub-part label -> substring.
    pub parts: TagMap,
    /// Detected category label (possibly [`AMBIGUOUS`]).
    pub category: String,
}

impl Tagged {
    pub fn new(parts: TagMap, category: impl Into<String>) -> Self {
        Self {
            parts,
            category: category.into(),
        }
    }
}

/// External tagging model.
///
/// Implementations label substrings of `raw` with semantic roles and detect
/// an overall category. A repeated/conflicting label assignment is signaled
/// with [`Error::RepeatedLabel`](crate::Error::RepeatedLabel) carrying the
/// original string; callers recover from it locally.
pub trait Tagger: Send + Sync {
    fn tag(&self, raw: &str) -> Result<Tagged>;
}

impl<T: Tagger + ?Sized> Tagger for &T {
    fn tag(&self, raw: &str) -> Result<Tagged> {
        (**self).tag(raw)
    }
}

impl<T: Tagger + ?Sized> Tagger for std::sync::Arc<T> {
    fn tag(&self, raw: &str) -> Result<Tagged> {
        (**self).tag(raw)
    }
}
