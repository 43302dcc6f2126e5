//! Project model and the request bodies that create or patch it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A child project embedded in its parent. It has no lifecycle of its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChildProject {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub interest: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// A persisted project listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub url: String,
    pub issue: String,
    pub img: String,
    pub interest: Vec<String>,
    pub skills: Vec<String>,
    pub children: Vec<ChildProject>,
    /// Internal bookkeeping, never shaped into responses
    pub created_at: String,
    pub updated_at: String,
}

/// Child entry as supplied by a client.
///
/// `id` is only honoured on update, and only when it names an existing child of
/// the same project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildProjectInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub interest: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Request body for creating a new project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    /// Missing and blank titles are both rejected by the handler
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub issue: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub interest: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub children: Vec<ChildProjectInput>,
}

/// Partial patch for an existing project. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub interest: Option<Vec<String>>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    /// Replaces the whole list when present
    #[serde(default)]
    pub children: Option<Vec<ChildProjectInput>>,
}

/// Normalize a tag list into set form: trimmed, no blanks, first occurrence wins.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || out.iter().any(|t| t == tag) {
            continue;
        }
        out.push(tag.to_string());
    }
    out
}

/// Turn client child entries into stored children.
///
/// Ids of `existing` children are kept when referenced, each at most once;
/// everything else gets a new id.
pub fn build_children(inputs: &[ChildProjectInput], existing: &[ChildProject]) -> Vec<ChildProject> {
    let mut claimed: HashSet<&str> = HashSet::new();

    inputs
        .iter()
        .map(|input| {
            let id = input
                .id
                .as_deref()
                .filter(|id| existing.iter().any(|c| c.id == *id))
                .filter(|id| claimed.insert(*id))
                .map(str::to_string)
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

            ChildProject {
                id,
                title: input.title.clone(),
                url: input.url.clone(),
                interest: normalize_tags(&input.interest),
                skills: normalize_tags(&input.skills),
            }
        })
        .collect()
}
