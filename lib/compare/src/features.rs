//! Derived feature names
//!
//! The downstream classifier addresses vector slots by name; this module
//! derives those names from a compiled schema. The ordering is a strict
//! contract with [`DistanceVector`](crate::DistanceVector): names and slots
//! must agree index-for-index.

use serde::{Deserialize, Serialize};

use crate::schema::CompiledSchema;

/// How a derived feature should be treated by the classifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Binary flag (missingness, ambiguity, category indicator).
    Dummy,
    /// A string-similarity score.
    Similarity,
    /// Observed/unobserved flag paired with a similarity slot.
    NotMissing,
}

/// One named slot of the distance vector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DerivedFeature {
    pub name: String,
    pub kind: FeatureKind,
}

impl DerivedFeature {
    fn new(name: impl Into<String>, kind: FeatureKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Feature names for `field`, in vector slot order.
pub fn derived_features(schema: &CompiledSchema, field: &str) -> Vec<DerivedFeature> {
    let mut features = vec![
        DerivedFeature::new(format!("{}: Not Missing", field), FeatureKind::Dummy),
        DerivedFeature::new("ambiguous", FeatureKind::Dummy),
        DerivedFeature::new("same name type?", FeatureKind::Dummy),
    ];

    // non-reference categories only; the reference category is the all-zero
    // indicator and gets no feature of its own
    for config in schema.categories().iter().skip(1) {
        features.push(DerivedFeature::new(
            config.label.to_lowercase(),
            FeatureKind::Dummy,
        ));
    }

    for part in schema.part_names() {
        features.push(DerivedFeature::new(part.clone(), FeatureKind::Similarity));
    }

    for part in schema.part_names() {
        features.push(DerivedFeature::new(
            format!("{}: Not Missing", part),
            FeatureKind::NotMissing,
        ));
    }

    features.push(DerivedFeature::new("full string", FeatureKind::Similarity));
    features
}
