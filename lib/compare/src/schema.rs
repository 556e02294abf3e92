//! Comparison schema
//!
//! Declares the categories ("variable types") a field can take, the sub-parts
//! each category carries, and how those sub-parts are aligned. Declarations
//! are plain data (serde-friendly, so a schema can live in config); they are
//! compiled once into an immutable [`CompiledSchema`] that the comparator
//! reads on every call.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::align::CompareStrategy;

/// A named sub-part, consolidated from one or more tagger labels.
///
/// Multiple labels are space-joined into a single comparable value, e.g.
/// `("street direction", ["StreetNamePreDirectional", "StreetNamePostDirectional"])`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartDecl {
    pub name: String,
    pub tags: Vec<String>,
}

impl PartDecl {
    pub fn new(name: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            name: name.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// How a category's sub-parts correspond across the two fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Sub-parts have a fixed correspondence: first name vs first name.
    FixedOrder,
    /// Two sub-roles may be swapped between the fields (e.g. co-owners
    /// listed in either order); both orderings are tried.
    Permutable,
}

/// Declaration of one category: a label, an alignment, and its sub-parts in
/// positional groups. Groups stay separate; they are never flattened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryDecl {
    pub label: String,
    pub alignment: Alignment,
    pub part_groups: Vec<Vec<PartDecl>>,
}

/// Compiled configuration for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryConfig {
    pub label: String,
    /// Alignment strategy with its tag groups bound at compile time.
    pub strategy: CompareStrategy,
    /// One-hot block of length `n_categories - 1`; all-zero for the
    /// reference category at index 0 (dummy coding against a baseline).
    pub indicator: Vec<f64>,
    /// Number of sub-parts declared by the categories before this one;
    /// locates this category's slice of the shared part-score region.
    pub offset: usize,
}

/// Errors raised while compiling a schema.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema cannot be empty")]
    EmptySchema,

    #[error("duplicate category label: {0}")]
    DuplicateCategory(String),

    #[error("category '{label}': fixed-order alignment takes exactly one part group, got {groups}")]
    FixedOrderGroups { label: String, groups: usize },

    #[error("category '{label}': permutable alignment takes exactly two part groups, got {groups}")]
    PermutableGroups { label: String, groups: usize },
}

/// One-hot indicator of length `n_categories - 1`.
///
/// Index 0 is the implicit reference category and encodes as all zeros.
pub fn indicator_vector(index: usize, n_categories: usize) -> Vec<f64> {
    let mut indicator = vec![0.0; n_categories.saturating_sub(1)];
    if index > 0 {
        indicator[index - 1] = 1.0;
    }
    indicator
}

/// The compiled, read-only comparison schema.
///
/// Built once at comparator-initialization time; every comparison call only
/// reads from it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSchema {
    categories: Vec<CategoryConfig>,
    by_label: AHashMap<String, usize>,
    part_names: Vec<String>,
}

impl CompiledSchema {
    /// Compile an ordered list of category declarations.
    ///
    /// Every category's sub-part names are appended to a shared flat list in
    /// declaration order; each category records the running count before its
    /// own parts as its `offset`. Only one category is ever active in a
    /// single comparison, so all categories share the same flat index space
    /// but write only into their own slice.
    pub fn compile(decls: &[CategoryDecl]) -> Result<Self, SchemaError> {
        if decls.is_empty() {
            return Err(SchemaError::EmptySchema);
        }

        let n_categories = decls.len();
        let mut categories = Vec::with_capacity(n_categories);
        let mut by_label = AHashMap::with_capacity(n_categories);
        let mut part_names = Vec::new();

        for (index, decl) in decls.iter().enumerate() {
            if by_label.contains_key(&decl.label) {
                return Err(SchemaError::DuplicateCategory(decl.label.clone()));
            }

            let offset = part_names.len();

            // collect tag labels per group, preserving group boundaries
            let mut groups: Vec<Vec<Vec<String>>> = Vec::with_capacity(decl.part_groups.len());
            for group in &decl.part_groups {
                let mut components = Vec::with_capacity(group.len());
                for part in group {
                    part_names.push(part.name.clone());
                    components.push(part.tags.clone());
                }
                groups.push(components);
            }

            let strategy = match decl.alignment {
                Alignment::FixedOrder => match &groups[..] {
                    [components] => CompareStrategy::FixedOrder {
                        components: components.clone(),
                    },
                    _ => {
                        return Err(SchemaError::FixedOrderGroups {
                            label: decl.label.clone(),
                            groups: groups.len(),
                        })
                    }
                },
                Alignment::Permutable => match &groups[..] {
                    [section_a, section_b] => CompareStrategy::Permutable {
                        section_a: section_a.clone(),
                        section_b: section_b.clone(),
                    },
                    _ => {
                        return Err(SchemaError::PermutableGroups {
                            label: decl.label.clone(),
                            groups: groups.len(),
                        })
                    }
                },
            };

            by_label.insert(decl.label.clone(), index);
            categories.push(CategoryConfig {
                label: decl.label.clone(),
                strategy,
                indicator: indicator_vector(index, n_categories),
                offset,
            });
        }

        Ok(Self {
            categories,
            by_label,
            part_names,
        })
    }

    /// Look up a category's config by label.
    pub fn get(&self, label: &str) -> Option<&CategoryConfig> {
        self.by_label
            .get(label)
            .map(|&index| &self.categories[index])
    }

    /// All categories in declaration order.
    pub fn categories(&self) -> &[CategoryConfig] {
        &self.categories
    }

    /// The flat list of all sub-part names across all categories.
    pub fn part_names(&self) -> &[String] {
        &self.part_names
    }

    pub fn n_parts(&self) -> usize {
        self.part_names.len()
    }

    pub fn n_indicators(&self) -> usize {
        self.categories.len() - 1
    }

    /// Length of every distance vector this schema produces:
    /// not missing + ambiguous + same type + indicator block
    /// + per-part scores + per-part observed flags + full string.
    pub fn expanded_size(&self) -> usize {
        3 + self.n_indicators() + 2 * self.n_parts() + 1
    }
}
