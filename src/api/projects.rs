//! Project API endpoints.

use axum::extract::State;
use serde::Serialize;

use super::extract::{Json, Path, Query};
use super::{created, error, ok, ApiResult};
use crate::errors::{AppError, NO_RECORD_MESSAGE};
use crate::filter::{ProjectQuery, TagFilter};
use crate::models::{CreateProjectRequest, UpdateProjectRequest};
use crate::shaper::{ProjectListItem, ProjectView, RequestContext};
use crate::AppState;

/// Body for create and update responses.
#[derive(Debug, Serialize)]
pub struct ProjectMessage {
    pub message: String,
    pub project: ProjectView,
}

/// Body for the list response.
#[derive(Debug, Serialize)]
pub struct ProjectList {
    pub count: usize,
    pub projects: Vec<ProjectListItem>,
}

/// Plain message body, optionally pointing at the help endpoint.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests: Option<String>,
}

/// POST /api/projects - Create a new project.
pub async fn create_project(
    State(state): State<AppState>,
    ctx: RequestContext,
    Json(request): Json<CreateProjectRequest>,
) -> ApiResult<ProjectMessage> {
    if request.title.trim().is_empty() {
        return error(
            AppError::Validation("Title is required".to_string()),
            "Error saving project",
        );
    }

    match state.repo.create_project(&request).await {
        Ok(project) => {
            tracing::info!("Project CREATED successfully! id={}", project.id);
            created(ProjectMessage {
                message: "Project created successfully!".to_string(),
                project: ProjectView::new(project, &ctx),
            })
        }
        Err(e) => error(e, "Error saving project"),
    }
}

/// GET /api/projects - List projects, optionally filtered by `interest` and `skills`.
pub async fn list_projects(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<ProjectQuery>,
) -> ApiResult<ProjectList> {
    let filter = TagFilter::from_query(&query);
    if !filter.is_unfiltered() {
        tracing::debug!("Listing projects with filter {:?}", filter);
    }

    match state.repo.list_projects(&filter).await {
        Ok(projects) => {
            tracing::info!("GET request successful! {} projects", projects.len());
            let projects: Vec<ProjectListItem> = projects
                .into_iter()
                .map(|p| ProjectListItem::new(p, &ctx))
                .collect();
            ok(ProjectList {
                count: projects.len(),
                projects,
            })
        }
        Err(e) => error(e, "Error retrieving projects"),
    }
}

/// GET /api/projects/:id - Get a single project.
pub async fn get_project(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> ApiResult<ProjectView> {
    match state.repo.get_project(&id).await {
        Ok(Some(project)) => {
            tracing::info!("GET request successful! id={}", id);
            ok(ProjectView::new(project, &ctx))
        }
        Ok(None) => error(
            AppError::NotFound(NO_RECORD_MESSAGE.to_string()),
            "Error retrieving project",
        ),
        Err(e) => error(e, "Error retrieving project"),
    }
}

/// PUT|PATCH /api/projects/:id - Partially update a project.
pub async fn update_project(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
    Json(request): Json<UpdateProjectRequest>,
) -> ApiResult<ProjectMessage> {
    if request.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return error(
            AppError::Validation("Title cannot be empty".to_string()),
            "Error updating project",
        );
    }

    match state.repo.update_project(&id, &request).await {
        Ok(Some(project)) => {
            tracing::info!("Project UPDATED successfully! id={}", id);
            created(ProjectMessage {
                message: "Project updated successfully!".to_string(),
                project: ProjectView::new(project, &ctx),
            })
        }
        Ok(None) => error(
            AppError::NotFound(NO_RECORD_MESSAGE.to_string()),
            "Error updating project",
        ),
        Err(e) => error(e, "Error updating project"),
    }
}

/// DELETE /api/projects/:id - Delete a single project.
pub async fn delete_project(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> ApiResult<MessageBody> {
    match state.repo.delete_project(&id).await {
        Ok(true) => {
            tracing::info!("Project DELETED successfully! id={}", id);
            ok(MessageBody {
                message: "Project deleted successfully! Get all projects to find another project id or create a new project".to_string(),
                requests: Some(ctx.requests_hint(&id, crate::shaper::PROJECT_ITEM)),
            })
        }
        Ok(false) => error(
            AppError::NotFound(format!(
                "{}, try getting all projects to find a correct project id or create a new project",
                NO_RECORD_MESSAGE
            )),
            "Error deleting project",
        ),
        Err(e) => error(e, "Error deleting project"),
    }
}

/// DELETE /api/projects - Delete every project.
pub async fn delete_all_projects(State(state): State<AppState>) -> ApiResult<MessageBody> {
    match state.repo.delete_all_projects().await {
        Ok(count) => {
            let message = format!("All {} projects deleted successfully!", count);
            tracing::info!("{}", message);
            created(MessageBody {
                message,
                requests: None,
            })
        }
        Err(e) => error(e, "Error deleting all projects"),
    }
}
