//! Structured comparator
//!
//! Takes two raw field values, runs the tagger over each, aligns sub-parts
//! via the matched category's strategy, and assembles the flat distance
//! vector consumed by the downstream classifier. Every branch produces a
//! fully defined vector of the same schema-determined length; no input,
//! however malformed, aborts a comparison.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use taglink_core::{normalized_affine_gap, Error, Tagger, AMBIGUOUS};

use crate::features::{derived_features, DerivedFeature};
use crate::schema::CompiledSchema;

/// One comparison's output, fully specified before it is flattened.
///
/// Built zeroed and filled exactly once per branch, so the "always fully
/// defined" invariant holds structurally rather than by convention.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceVector {
    /// 1 when both fields were present.
    pub not_missing: f64,
    /// 1 when tagging failed or either side came back ambiguous.
    pub ambiguous: f64,
    /// 1 when both fields tagged to the same category.
    pub same_category: f64,
    /// One-hot block for the matched category (all-zero for the reference
    /// category and on every non-matching branch).
    pub indicator: Vec<f64>,
    /// Per-part similarity scores over the shared flat part space; only the
    /// matched category's slice is ever written.
    pub part_scores: Vec<f64>,
    /// 1 where the corresponding part score was observed, 0 where the part
    /// was absent from both sides (score forced to 0).
    pub part_observed: Vec<f64>,
    /// Whole-string distance; set on the fallback branches.
    pub full_string: f64,
}

impl DistanceVector {
    fn zeroed(schema: &CompiledSchema) -> Self {
        Self {
            not_missing: 0.0,
            ambiguous: 0.0,
            same_category: 0.0,
            indicator: vec![0.0; schema.n_indicators()],
            part_scores: vec![0.0; schema.n_parts()],
            part_observed: vec![0.0; schema.n_parts()],
            full_string: 0.0,
        }
    }

    /// Total number of slots in the flattened vector.
    pub fn len(&self) -> usize {
        3 + self.indicator.len() + self.part_scores.len() + self.part_observed.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into the contractual slot order:
    /// `[not missing, ambiguous, same category, indicator.., scores..,
    /// observed.., full string]`.
    pub fn into_vec(self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(self.len());
        flat.push(self.not_missing);
        flat.push(self.ambiguous);
        flat.push(self.same_category);
        flat.extend(self.indicator);
        flat.extend(self.part_scores);
        flat.extend(self.part_observed);
        flat.push(self.full_string);
        flat
    }
}

/// Schema-driven comparator over one record field.
pub struct StructuredComparator<T: Tagger> {
    field: String,
    schema: CompiledSchema,
    tagger: T,
    log_file: Option<PathBuf>,
}

impl<T: Tagger> StructuredComparator<T> {
    pub fn new(field: impl Into<String>, schema: CompiledSchema, tagger: T) -> Self {
        Self {
            field: field.into(),
            schema,
            tagger,
            log_file: None,
        }
    }

    /// Append values the tagger rejects to `path`, one per line.
    ///
    /// Best effort: write errors are reported through the log facade and
    /// never surface as a comparison failure.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn schema(&self) -> &CompiledSchema {
        &self.schema
    }

    /// Constant length of every vector this comparator produces.
    pub fn expanded_size(&self) -> usize {
        self.schema.expanded_size()
    }

    /// Feature names matching the vector layout index-for-index.
    pub fn derived_features(&self) -> Vec<DerivedFeature> {
        derived_features(&self.schema, &self.field)
    }

    /// Compare two raw field values into the flat distance vector.
    pub fn compare(&self, field_1: &str, field_2: &str) -> Vec<f64> {
        self.distance(field_1, field_2).into_vec()
    }

    /// Structured form of [`compare`](Self::compare).
    pub fn distance(&self, field_1: &str, field_2: &str) -> DistanceVector {
        let mut distances = DistanceVector::zeroed(&self.schema);

        // missing input: fully signaled by the zero vector, no tagger call
        if field_1.is_empty() || field_2.is_empty() {
            return distances;
        }
        distances.not_missing = 1.0;

        let tagged = self
            .tagger
            .tag(field_1)
            .and_then(|first| self.tagger.tag(field_2).map(|second| (first, second)));

        let (tagged_1, tagged_2) = match tagged {
            Ok(pair) => pair,
            Err(err) => {
                self.record_failure(&err);
                distances.ambiguous = 1.0;
                distances.full_string = normalized_affine_gap(field_1, field_2);
                return distances;
            }
        };

        if tagged_1.category == AMBIGUOUS || tagged_2.category == AMBIGUOUS {
            distances.ambiguous = 1.0;
            distances.full_string = normalized_affine_gap(field_1, field_2);
            return distances;
        }

        if tagged_1.category != tagged_2.category {
            // a recognized outcome, not a tagging failure
            distances.full_string = normalized_affine_gap(field_1, field_2);
            return distances;
        }

        let config = match self.schema.get(&tagged_1.category) {
            Some(config) => config,
            // a category the schema never declared degrades like ambiguity
            None => {
                distances.ambiguous = 1.0;
                distances.full_string = normalized_affine_gap(field_1, field_2);
                return distances;
            }
        };

        distances.same_category = 1.0;
        distances.indicator.copy_from_slice(&config.indicator);

        let scores = config.strategy.compare(&tagged_1.parts, &tagged_2.parts);
        for (position, score) in scores.iter().enumerate() {
            let slot = config.offset + position;
            if score.is_nan() {
                // no signal: score 0 with observed flag 0, distinct from a
                // genuine distance of 0
                distances.part_scores[slot] = 0.0;
            } else {
                distances.part_scores[slot] = *score;
                distances.part_observed[slot] = 1.0;
            }
        }

        distances
    }

    fn record_failure(&self, err: &Error) {
        let Some(path) = &self.log_file else {
            return;
        };
        if let Err(io_err) = append_row(path, err.original()) {
            log::warn!(
                "could not record untaggable value in {}: {}",
                path.display(),
                io_err
            );
        }
    }
}

fn append_row(path: &Path, value: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if value.contains([',', '"', '\n']) {
        writeln!(file, "\"{}\"", value.replace('"', "\"\""))
    } else {
        writeln!(file, "{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Alignment, CategoryDecl, PartDecl};
    use taglink_core::{Result, TagMap, Tagged};

    /// Word-splitting stub: values containing "corp" tag as Organization,
    /// "?" fails, "either" is ambiguous, anything else is a Person.
    struct StubTagger;

    impl Tagger for StubTagger {
        fn tag(&self, raw: &str) -> Result<Tagged> {
            if raw.contains('?') {
                return Err(Error::RepeatedLabel {
                    original: raw.to_string(),
                });
            }
            if raw.contains("either") {
                return Ok(Tagged::new(TagMap::default(), AMBIGUOUS));
            }
            let mut parts = TagMap::default();
            if raw.contains("corp") {
                parts.insert("CorporationName".to_string(), raw.to_string());
                return Ok(Tagged::new(parts, "Organization"));
            }
            if raw.contains("unheard") {
                return Ok(Tagged::new(parts, "Household"));
            }
            let words: Vec<&str> = raw.split_whitespace().collect();
            if let Some(first) = words.first() {
                parts.insert("GivenName".to_string(), first.to_string());
            }
            if words.len() > 1 {
                parts.insert("Surname".to_string(), words[words.len() - 1].to_string());
            }
            Ok(Tagged::new(parts, "Person"))
        }
    }

    fn person_org_schema() -> CompiledSchema {
        CompiledSchema::compile(&[
            CategoryDecl {
                label: "Person".to_string(),
                alignment: Alignment::FixedOrder,
                part_groups: vec![vec![
                    PartDecl::new("first name", &["GivenName"]),
                    PartDecl::new("last name", &["Surname"]),
                ]],
            },
            CategoryDecl {
                label: "Organization".to_string(),
                alignment: Alignment::FixedOrder,
                part_groups: vec![vec![PartDecl::new("name", &["CorporationName"])]],
            },
        ])
        .unwrap()
    }

    fn comparator() -> StructuredComparator<StubTagger> {
        StructuredComparator::new("grantee", person_org_schema(), StubTagger)
    }

    // layout for the schema above:
    // [0] not missing, [1] ambiguous, [2] same category, [3] indicator,
    // [4..7] part scores, [7..10] observed flags, [10] full string

    #[test]
    fn test_missing_input_zero_vector() {
        let cmp = comparator();
        for (a, b) in [("", "john smith"), ("john smith", ""), ("", "")] {
            let vector = cmp.compare(a, b);
            assert_eq!(vector.len(), cmp.expanded_size());
            assert!(vector.iter().all(|&slot| slot == 0.0));
        }
    }

    #[test]
    fn test_matching_person_end_to_end() {
        let cmp = comparator();
        let vector = cmp.compare("John Smith", "J. Smith");

        assert_eq!(vector.len(), 11);
        assert_eq!(vector[0], 1.0); // not missing
        assert_eq!(vector[1], 0.0); // not ambiguous
        assert_eq!(vector[2], 1.0); // same category
        assert_eq!(vector[3], 0.0); // reference category indicator
        assert_eq!(vector[4], normalized_affine_gap("John", "J."));
        assert_eq!(vector[5], normalized_affine_gap("Smith", "Smith"));
        assert_eq!(vector[6], 0.0); // organization slot untouched
        assert_eq!(&vector[7..10], &[1.0, 1.0, 0.0]);
        // observed source behavior: full-string slot stays 0 on a match
        assert_eq!(vector[10], 0.0);
    }

    #[test]
    fn test_matching_non_reference_category_indicator() {
        let cmp = comparator();
        let vector = cmp.compare("acme corp", "acme corporation");

        assert_eq!(vector[2], 1.0);
        assert_eq!(vector[3], 1.0); // organization one-hot
        assert_eq!(vector[4], 0.0); // person slots untouched
        assert_eq!(vector[5], 0.0);
        assert_eq!(
            vector[6],
            normalized_affine_gap("acme corp", "acme corporation")
        );
        assert_eq!(&vector[7..10], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unobserved_part_scores_zero_flag_zero() {
        let cmp = comparator();
        // single word on both sides: no surname anywhere
        let vector = cmp.compare("Madonna", "Madona");

        assert_eq!(vector[2], 1.0);
        assert!(vector[4] > 0.0); // first names compared
        assert_eq!(vector[5], 0.0); // surname score forced to 0
        assert_eq!(&vector[7..10], &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_tagging_failure_falls_back_to_full_string() {
        let cmp = comparator();
        let vector = cmp.compare("john?smith", "john smith");

        assert_eq!(vector[0], 1.0);
        assert_eq!(vector[1], 1.0);
        assert_eq!(vector[2], 0.0);
        assert!(vector[3..10].iter().all(|&slot| slot == 0.0));
        assert_eq!(
            vector[10],
            normalized_affine_gap("john?smith", "john smith")
        );
    }

    #[test]
    fn test_ambiguous_category_falls_back_to_full_string() {
        let cmp = comparator();
        let vector = cmp.compare("either way", "john smith");

        assert_eq!(vector[1], 1.0);
        assert_eq!(vector[2], 0.0);
        assert_eq!(vector[10], normalized_affine_gap("either way", "john smith"));
    }

    #[test]
    fn test_category_mismatch_is_not_ambiguous() {
        let cmp = comparator();
        let vector = cmp.compare("john smith", "acme corp");

        assert_eq!(vector[0], 1.0);
        assert_eq!(vector[1], 0.0);
        assert_eq!(vector[2], 0.0);
        assert!(vector[3..10].iter().all(|&slot| slot == 0.0));
        assert_eq!(vector[10], normalized_affine_gap("john smith", "acme corp"));
    }

    #[test]
    fn test_undeclared_category_degrades_like_ambiguity() {
        let cmp = comparator();
        let vector = cmp.compare("unheard of", "unheard of");

        assert_eq!(vector.len(), cmp.expanded_size());
        assert_eq!(vector[1], 1.0);
        assert_eq!(vector[2], 0.0);
        assert_eq!(vector[10], normalized_affine_gap("unheard of", "unheard of"));
    }

    #[test]
    fn test_idempotent() {
        let cmp = comparator();
        let first = cmp.compare("John Smith", "J. Smith");
        let second = cmp.compare("John Smith", "J. Smith");

        assert_eq!(first, second);
    }

    #[test]
    fn test_distance_vector_never_empty() {
        let cmp = comparator();
        for (a, b) in [("", ""), ("john smith", "j smith"), ("what?", "who")] {
            let distances = cmp.distance(a, b);
            assert!(!distances.is_empty());
            assert_eq!(distances.len(), cmp.expanded_size());
        }
    }

    #[test]
    fn test_length_constant_across_branches() {
        let cmp = comparator();
        let inputs = [
            ("", ""),
            ("john smith", "j smith"),
            ("john?smith", "x"),
            ("either", "y"),
            ("john smith", "acme corp"),
        ];
        for (a, b) in inputs {
            assert_eq!(cmp.compare(a, b).len(), cmp.expanded_size());
        }
    }

    #[test]
    fn test_failure_log_records_original_string() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("failures.csv");
        let cmp = StructuredComparator::new("grantee", person_org_schema(), StubTagger)
            .with_log_file(&log_path);

        cmp.compare("bad?value", "john smith");
        cmp.compare("worse,\"value?\"", "john smith");

        let contents = std::fs::read_to_string(&log_path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("bad?value"));
        assert_eq!(lines.next(), Some("\"worse,\"\"value?\"\"\""));
    }

    #[test]
    fn test_unwritable_log_does_not_fail_comparison() {
        let cmp = StructuredComparator::new("grantee", person_org_schema(), StubTagger)
            .with_log_file("/nonexistent-dir/failures.csv");

        let vector = cmp.compare("bad?value", "john smith");
        assert_eq!(vector[1], 1.0);
    }
}
