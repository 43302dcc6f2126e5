//! Help endpoint referenced by the `requests` hint on every shaped project.

use serde::{Deserialize, Serialize};

use super::extract::Query;
use super::{ok, ApiResult};
use crate::shaper::{RequestContext, PROJECT_ITEM};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpQuery {
    #[serde(default)]
    pub project_id: Option<String>,
}

/// One documented endpoint.
#[derive(Debug, Serialize)]
pub struct EndpointHelp {
    pub method: &'static str,
    pub path: String,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpResponse {
    pub item: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub endpoints: Vec<EndpointHelp>,
}

/// GET /api/projects/help - Describe how to make project requests.
pub async fn project_help(ctx: RequestContext, Query(query): Query<HelpQuery>) -> ApiResult<HelpResponse> {
    let base = format!("{}://{}/api/{}s", ctx.scheme, ctx.host, PROJECT_ITEM);
    let item_path = match &query.project_id {
        Some(id) => format!("{}/{}", base, id),
        None => format!("{}/{{id}}", base),
    };

    let endpoint = |method: &'static str, path: &str, description: &'static str| EndpointHelp {
        method,
        path: path.to_string(),
        description,
    };

    let endpoints = vec![
        endpoint("POST", &base, "Create a project"),
        endpoint(
            "GET",
            &format!("{}?interest=a,b&skills=c", base),
            "List projects; every listed tag must be present",
        ),
        endpoint("GET", &item_path, "Get one project"),
        endpoint("PUT", &item_path, "Update fields of one project"),
        endpoint("PATCH", &item_path, "Update fields of one project"),
        endpoint("DELETE", &item_path, "Delete one project"),
        endpoint("DELETE", &base, "Delete every project"),
    ];

    ok(HelpResponse {
        item: PROJECT_ITEM,
        project_id: query.project_id,
        endpoints,
    })
}
