//! Alignment strategies
//!
//! Before two tagged fields can be scored, their sub-parts have to be put in
//! correspondence. [`CompareStrategy`] carries the tag groups bound at
//! schema-compile time and scores two tag maps in one pass:
//!
//! - `FixedOrder` compares position-by-position (first name vs first name)
//! - `Permutable` tries both orderings of two swappable sub-roles and keeps
//!   whichever yields the lower total distance

use smallvec::SmallVec;
use taglink_core::{normalized_affine_gap, TagMap};

/// Per-part similarity scores for one comparison; NaN marks a part absent
/// from both sides.
pub type Scores = SmallVec<[f64; 8]>;

/// A category's alignment strategy with its tag groups pre-bound.
///
/// Each component is the ordered list of tagger labels consolidated into one
/// named sub-part.
#[derive(Debug, Clone, PartialEq)]
pub enum CompareStrategy {
    /// Sub-parts correspond by declared position.
    FixedOrder { components: Vec<Vec<String>> },
    /// Two sub-roles that may be swapped between the fields. The left field
    /// is tried in both orders against the right field's canonical order.
    Permutable {
        section_a: Vec<Vec<String>>,
        section_b: Vec<Vec<String>>,
    },
}

impl CompareStrategy {
    /// Number of scores one call to [`compare`](Self::compare) produces.
    pub fn part_count(&self) -> usize {
        match self {
            CompareStrategy::FixedOrder { components } => components.len(),
            CompareStrategy::Permutable {
                section_a,
                section_b,
            } => section_a.len() + section_b.len(),
        }
    }

    /// Score two tag maps, one score per declared sub-part, in declared
    /// order.
    pub fn compare(&self, left: &TagMap, right: &TagMap) -> Scores {
        match self {
            CompareStrategy::FixedOrder { components } => {
                let left_parts = consolidate(left, components);
                let right_parts = consolidate(right, components);
                left_parts
                    .iter()
                    .zip(&right_parts)
                    .map(|(a, b)| normalized_affine_gap(a, b))
                    .collect()
            }
            CompareStrategy::Permutable {
                section_a,
                section_b,
            } => compare_permutable(section_a, section_b, left, right),
        }
    }
}

/// Join each component's labeled substrings with spaces, skipping labels
/// absent from the map. A component with no present label yields "".
fn consolidate(map: &TagMap, components: &[Vec<String>]) -> Vec<String> {
    components
        .iter()
        .map(|component| {
            let present: Vec<&str> = component
                .iter()
                .filter_map(|tag| map.get(tag).map(String::as_str))
                .collect();
            present.join(" ")
        })
        .collect()
}

fn compare_permutable(
    section_a: &[Vec<String>],
    section_b: &[Vec<String>],
    left: &TagMap,
    right: &TagMap,
) -> Scores {
    let left_a = consolidate(left, section_a);
    let left_b = consolidate(left, section_b);

    let mut all_components = section_a.to_vec();
    all_components.extend_from_slice(section_b);
    let whole_right = consolidate(right, &all_components);

    let straight: Scores = left_a
        .iter()
        .chain(&left_b)
        .zip(&whole_right)
        .map(|(a, b)| normalized_affine_gap(a, b))
        .collect();

    let permuted: Scores = left_b
        .iter()
        .chain(&left_a)
        .zip(&whole_right)
        .map(|(a, b)| normalized_affine_gap(a, b))
        .collect();

    // lower total distance wins; ties keep the non-swapped ordering
    if nan_sum(&straight) <= nan_sum(&permuted) {
        straight
    } else {
        permuted
    }
}

/// Sum skipping NaN entries; an all-NaN slice sums to 0.
fn nan_sum(scores: &[f64]) -> f64 {
    scores.iter().filter(|score| !score.is_nan()).sum()
}
