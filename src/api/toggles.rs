//! Server-rendered mobile toggle buttons.

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use super::extract::{Path, Query};
use crate::errors::AppError;
use crate::ui::{render_toggle, ScreenDimensions, ToggleTarget, ToggleVariant, Viewport};

/// Client hint carrying the layout viewport width.
const VIEWPORT_WIDTH_HINT: &str = "sec-ch-viewport-width";

#[derive(Debug, Deserialize)]
pub struct ToggleQuery {
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
}

/// GET /ui/toggles/:target - Render a toggle button, or 204 when it is not shown.
pub async fn render_toggle_button(
    Path(target): Path<String>,
    Query(query): Query<ToggleQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some(target) = ToggleTarget::parse(&target) else {
        let err = AppError::BadRequest(format!("Unknown toggle target: {}", target));
        err.log("Error rendering toggle");
        return Err(err);
    };

    let variant = match query.variant.as_deref() {
        None => ToggleVariant::Open,
        Some(raw) => match ToggleVariant::parse(raw) {
            Some(variant) => variant,
            None => {
                let err = AppError::BadRequest(format!("Unknown toggle variant: {}", raw));
                err.log("Error rendering toggle");
                return Err(err);
            }
        },
    };

    let width = query.width.or_else(|| {
        headers
            .get(VIEWPORT_WIDTH_HINT)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    });
    let viewport = Viewport::classify(width.map(|width| ScreenDimensions { width }));

    match render_toggle(viewport, target, variant) {
        Some(button) => Ok((
            [(header::VARY, VIEWPORT_WIDTH_HINT)],
            Html(button.to_html()?),
        )
            .into_response()),
        None => Ok((StatusCode::NO_CONTENT, [(header::VARY, VIEWPORT_WIDTH_HINT)]).into_response()),
    }
}
