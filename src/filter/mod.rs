//! Query filter construction for project listings.
//!
//! Each tag dimension is a contains-all constraint: a project matches only when
//! its tag set holds every requested tag.

use serde::Deserialize;

use crate::models::normalize_tags;

/// Raw list query parameters, e.g. `?interest=web,ml&skills=rust`.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectQuery {
    #[serde(default)]
    pub interest: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
}

/// Normalized tag filter. `None` means no constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    pub interest: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
}

impl TagFilter {
    /// Build a filter from raw query parameters.
    ///
    /// Blank segments are dropped; a parameter left with no tags is treated as absent.
    pub fn from_query(query: &ProjectQuery) -> Self {
        Self {
            interest: query.interest.as_deref().and_then(parse_tag_list),
            skills: query.skills.as_deref().and_then(parse_tag_list),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.interest.is_none() && self.skills.is_none()
    }

    /// Constraints as `(column, tags)` pairs, in a fixed order.
    pub fn constraints(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        [("interest", &self.interest), ("skills", &self.skills)]
            .into_iter()
            .filter_map(|(column, tags)| tags.as_deref().map(|tags| (column, tags)))
    }
}

fn parse_tag_list(raw: &str) -> Option<Vec<String>> {
    let tags = normalize_tags(raw.split(','));
    if tags.is_empty() {
        None
    } else {
        Some(tags)
    }
}
