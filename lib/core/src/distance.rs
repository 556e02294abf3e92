//! Affine gap string distance
//!
//! The base metric applied to aligned sub-parts and whole field values.
//! Gotoh alignment with affine gap penalties: opening a gap is expensive,
//! elongating one is cheaper, and gaps past the end of the shorter string
//! are discounted so abbreviations ("INTL" vs "INTERNATIONAL") stay cheap.
//!
//! Lower is more similar; the normalized distance of two identical strings
//! is 0.5, not 0, because every aligned pair still carries the match weight.

const MATCH_WEIGHT: f64 = 1.0;
const MISMATCH_WEIGHT: f64 = 11.0;
const GAP_WEIGHT: f64 = 10.0;
const SPACE_WEIGHT: f64 = 7.0;
const ABBREVIATION_SCALE: f64 = 0.125;

/// Raw affine gap alignment cost between two strings.
///
/// Case-insensitive. Symmetric in its arguments.
pub fn affine_gap(a: &str, b: &str) -> f64 {
    let chars_a: Vec<char> = a.to_uppercase().chars().collect();
    let chars_b: Vec<char> = b.to_uppercase().chars().collect();

    // identical strings cost exactly one match per character
    if chars_a == chars_b {
        return MATCH_WEIGHT * chars_a.len() as f64;
    }

    // columns run along the longer string
    let (string1, string2) = if chars_a.len() >= chars_b.len() {
        (chars_a, chars_b)
    } else {
        (chars_b, chars_a)
    };
    let length1 = string1.len();
    let length2 = string2.len();

    // columns past the end of the shorter string get the abbreviation discount
    let open = |j: usize| {
        if j <= length2 {
            GAP_WEIGHT
        } else {
            GAP_WEIGHT * ABBREVIATION_SCALE
        }
    };
    let extend = |j: usize| {
        if j <= length2 {
            SPACE_WEIGHT
        } else {
            SPACE_WEIGHT * ABBREVIATION_SCALE
        }
    };

    let mut v_current = vec![0.0f64; length1 + 1];
    let mut v_previous = vec![0.0f64; length1 + 1];
    let mut deletion = vec![f64::INFINITY; length1 + 1];

    // row 0: the shorter string is exhausted, only horizontal gaps remain
    let mut insertion = f64::INFINITY;
    for j in 1..=length1 {
        insertion = insertion.min(v_current[j - 1] + open(j)) + extend(j);
        v_current[j] = insertion;
    }

    for i in 1..=length2 {
        std::mem::swap(&mut v_current, &mut v_previous);
        v_current[0] = GAP_WEIGHT + SPACE_WEIGHT * i as f64;

        let char2 = string2[i - 1];
        let mut insertion = f64::INFINITY;
        for j in 1..=length1 {
            insertion = insertion.min(v_current[j - 1] + open(j)) + extend(j);
            deletion[j] = deletion[j].min(v_previous[j] + GAP_WEIGHT) + SPACE_WEIGHT;

            let substitution = if string1[j - 1] == char2 {
                MATCH_WEIGHT
            } else {
                MISMATCH_WEIGHT
            };

            v_current[j] = insertion.min(deletion[j]).min(v_previous[j - 1] + substitution);
        }
    }

    v_current[length1]
}

/// Affine gap distance normalized by the combined length of both strings.
///
/// Undefined (NaN) when both strings are empty; callers check emptiness
/// before scoring and encode NaN as "unobserved".
pub fn normalized_affine_gap(a: &str, b: &str) -> f64 {
    let normalizer = (a.chars().count() + b.chars().count()) as f64;
    if normalizer == 0.0 {
        return f64::NAN;
    }
    affine_gap(a, b) / normalizer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings() {
        assert_eq!(affine_gap("smith", "smith"), 5.0);
        assert_eq!(normalized_affine_gap("smith", "smith"), 0.5);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(normalized_affine_gap("Smith", "SMITH"), 0.5);
    }

    #[test]
    fn test_symmetric() {
        let forward = normalized_affine_gap("john smith", "j smith");
        let backward = normalized_affine_gap("j smith", "john smith");
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_similar_scores_lower_than_dissimilar() {
        let close = normalized_affine_gap("john smith", "jon smith");
        let far = normalized_affine_gap("john smith", "bob jones");
        assert!(close < far, "expected {} < {}", close, far);
    }

    #[test]
    fn test_abbreviation_discount() {
        // trailing elongation past the shorter string is cheaper than a mismatch
        let truncated = affine_gap("ABCDE", "ABC");
        let mismatched = affine_gap("ABCDE", "ABCXY");
        assert!(truncated < mismatched, "expected {} < {}", truncated, mismatched);
    }

    #[test]
    fn test_both_empty_is_undefined() {
        assert!(normalized_affine_gap("", "").is_nan());
    }

    #[test]
    fn test_one_empty_is_defined() {
        let distance = normalized_affine_gap("smith", "");
        assert!(distance.is_finite());
        assert!(distance > 0.0);
    }

    #[test]
    fn test_non_negative() {
        for (a, b) in [
            ("a", "b"),
            ("main st", "main street"),
            ("", "x"),
            ("123 main st", "456 elm ave"),
        ] {
            assert!(affine_gap(a, b) >= 0.0);
        }
    }
}
