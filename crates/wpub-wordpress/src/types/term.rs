//! WordPress taxonomy types.

use std::fmt;

use serde::Deserialize;

/// Taxonomy a term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    /// Post tag.
    Tag,
    /// Post category.
    Category,
}

impl TermKind {
    /// REST collection name under `/wp-json/wp/v2/`.
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Tag => "tags",
            Self::Category => "categories",
        }
    }
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tag => "tag",
            Self::Category => "category",
        })
    }
}

/// Resolved taxonomy term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyTerm {
    /// Term name as requested.
    pub name: String,
    /// Term ID on the site.
    pub id: u64,
    /// Taxonomy.
    pub kind: TermKind,
}

/// Term as returned by the search endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TermRecord {
    #[serde(default)]
    pub(crate) id: Option<u64>,
    #[serde(default)]
    pub(crate) name: String,
}

/// Term creation response.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedTermResponse {
    #[serde(default)]
    pub(crate) id: Option<u64>,
}
