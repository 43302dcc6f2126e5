//! Response shaping.
//!
//! Maps persisted projects into their public JSON form. Internal bookkeeping
//! (timestamps) is dropped and a `requests` hint pointing at the help endpoint is
//! added to every project.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use serde::Serialize;

use crate::models::{ChildProject, Project};
use crate::AppState;

/// Item name used in hint URLs and messages.
pub const PROJECT_ITEM: &str = "project";

/// Where the client reached us, used to build absolute hint URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub scheme: String,
    pub host: String,
}

impl RequestContext {
    /// Resolve scheme and host from forwarding headers, then `Host`, then `fallback_host`.
    pub fn from_headers(headers: &HeaderMap, authority: Option<&str>, fallback_host: &str) -> Self {
        let header_value = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                // Proxies may append a list; the first entry is the client-facing one
                .and_then(|v| v.split(',').next())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let scheme = header_value("x-forwarded-proto").unwrap_or_else(|| "http".to_string());
        let host = header_value("x-forwarded-host")
            .or_else(|| header_value(header::HOST.as_str()))
            .or_else(|| authority.map(str::to_string))
            .unwrap_or_else(|| fallback_host.to_string());

        Self { scheme, host }
    }

    /// URL of the help endpoint for one entity.
    pub fn help_info(&self, id: &str, item: &str) -> String {
        format!(
            "{}://{}/api/{}s/help?{}Id={}",
            self.scheme, self.host, item, item, id
        )
    }

    /// Human-readable hint embedded in shaped responses.
    pub fn requests_hint(&self, id: &str, item: &str) -> String {
        format!(
            "Visit {} for help on how to make requests",
            self.help_info(id, item)
        )
    }
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let authority = parts.uri.authority().map(|a| a.as_str());
        Ok(Self::from_headers(
            &parts.headers,
            authority,
            &state.config.public_host(),
        ))
    }
}

/// Public shape of a child project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildProjectView {
    pub id: String,
    pub title: String,
    pub url: String,
    pub interest: Vec<String>,
    pub skills: Vec<String>,
}

impl From<ChildProject> for ChildProjectView {
    fn from(child: ChildProject) -> Self {
        Self {
            id: child.id,
            title: child.title,
            url: child.url,
            interest: child.interest,
            skills: child.skills,
        }
    }
}

/// Public shape of a single project (create, get, update).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub id: String,
    pub title: String,
    pub url: String,
    pub issue: String,
    pub img: String,
    pub interest: Vec<String>,
    pub skills: Vec<String>,
    pub children: Vec<ChildProjectView>,
    pub requests: String,
}

impl ProjectView {
    pub fn new(project: Project, ctx: &RequestContext) -> Self {
        let requests = ctx.requests_hint(&project.id, PROJECT_ITEM);
        Self {
            id: project.id,
            title: project.title,
            url: project.url,
            issue: project.issue,
            img: project.img,
            interest: project.interest,
            skills: project.skills,
            children: project.children.into_iter().map(Into::into).collect(),
            requests,
        }
    }
}

/// Children wrapped with their count, as used in listings.
#[derive(Debug, Clone, Serialize)]
pub struct ChildProjectList {
    pub count: usize,
    pub list: Vec<ChildProjectView>,
}

/// Public shape of a project inside a listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListItem {
    pub id: String,
    pub title: String,
    pub url: String,
    pub issue: String,
    pub img: String,
    pub interest: Vec<String>,
    pub skills: Vec<String>,
    pub children: ChildProjectList,
    pub requests: String,
}

impl ProjectListItem {
    pub fn new(project: Project, ctx: &RequestContext) -> Self {
        let requests = ctx.requests_hint(&project.id, PROJECT_ITEM);
        let list: Vec<ChildProjectView> = project.children.into_iter().map(Into::into).collect();
        Self {
            id: project.id,
            title: project.title,
            url: project.url,
            issue: project.issue,
            img: project.img,
            interest: project.interest,
            skills: project.skills,
            children: ChildProjectList {
                count: list.len(),
                list,
            },
            requests,
        }
    }
}
