//! Database repository for project CRUD operations.
//!
//! Every public operation runs under the configured deadline; a slow database
//! surfaces as [`AppError::Timeout`] instead of hanging the request.

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::errors::AppError;
use crate::filter::TagFilter;
use crate::models::{
    build_children, normalize_tags, ChildProject, CreateProjectRequest, Project,
    UpdateProjectRequest,
};

const PROJECT_COLUMNS: &str =
    "id, title, url, issue, img, interest, skills, children, created_at, updated_at";

/// Database repository for all project operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
    timeout: Duration,
}

impl Repository {
    pub fn new(pool: SqlitePool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Run one operation under the repository deadline.
    async fn with_timeout<T, F>(&self, operation: &'static str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!("{} exceeded {:?}", operation, self.timeout);
                Err(AppError::Timeout(operation.to_string()))
            }
        }
    }

    /// List projects matching the filter, in insertion order.
    pub async fn list_projects(&self, filter: &TagFilter) -> Result<Vec<Project>, AppError> {
        self.with_timeout("list_projects", self.query_projects(filter))
            .await
    }

    /// Get a project by ID.
    pub async fn get_project(&self, id: &str) -> Result<Option<Project>, AppError> {
        self.with_timeout("get_project", self.fetch_project(id))
            .await
    }

    /// Create a new project. Ids for the project and its children are assigned here.
    pub async fn create_project(&self, request: &CreateProjectRequest) -> Result<Project, AppError> {
        self.with_timeout("create_project", self.insert_project(request))
            .await
    }

    /// Apply a partial patch. Returns `None` when no project has this ID.
    pub async fn update_project(
        &self,
        id: &str,
        request: &UpdateProjectRequest,
    ) -> Result<Option<Project>, AppError> {
        self.with_timeout("update_project", self.patch_project(id, request))
            .await
    }

    /// Delete a project. Returns whether a row was removed.
    pub async fn delete_project(&self, id: &str) -> Result<bool, AppError> {
        self.with_timeout("delete_project", self.remove_project(id))
            .await
    }

    /// Delete every project. Returns the number removed.
    pub async fn delete_all_projects(&self) -> Result<u64, AppError> {
        self.with_timeout("delete_all_projects", self.remove_all_projects())
            .await
    }

    async fn query_projects(&self, filter: &TagFilter) -> Result<Vec<Project>, AppError> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM projects", PROJECT_COLUMNS));

        // One EXISTS per required tag gives contains-all semantics
        let mut first = true;
        for (column, tags) in filter.constraints() {
            for tag in tags {
                builder.push(if first { " WHERE " } else { " AND " });
                first = false;
                builder.push(format!(
                    "EXISTS (SELECT 1 FROM json_each(projects.{}) WHERE json_each.value = ",
                    column
                ));
                builder.push_bind(tag.clone());
                builder.push(")");
            }
        }
        builder.push(" ORDER BY rowid");

        let rows = builder.build().fetch_all(&self.pool).await?;
        Ok(rows.iter().map(project_from_row).collect())
    }

    async fn fetch_project(&self, id: &str) -> Result<Option<Project>, AppError> {
        let sql = format!("SELECT {} FROM projects WHERE id = ?", PROJECT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(project_from_row))
    }

    async fn insert_project(&self, request: &CreateProjectRequest) -> Result<Project, AppError> {
        let now = Utc::now().to_rfc3339();
        let project = Project {
            id: uuid::Uuid::new_v4().to_string(),
            title: request.title.clone(),
            url: request.url.clone(),
            issue: request.issue.clone(),
            img: request.img.clone(),
            interest: normalize_tags(&request.interest),
            skills: normalize_tags(&request.skills),
            children: build_children(&request.children, &[]),
            created_at: now.clone(),
            updated_at: now,
        };

        let interest_json = serde_json::to_string(&project.interest)?;
        let skills_json = serde_json::to_string(&project.skills)?;
        let children_json = serde_json::to_string(&project.children)?;

        sqlx::query(
            "INSERT INTO projects (id, title, url, issue, img, interest, skills, children, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&project.id)
        .bind(&project.title)
        .bind(&project.url)
        .bind(&project.issue)
        .bind(&project.img)
        .bind(&interest_json)
        .bind(&skills_json)
        .bind(&children_json)
        .bind(&project.created_at)
        .bind(&project.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(project)
    }

    async fn patch_project(
        &self,
        id: &str,
        request: &UpdateProjectRequest,
    ) -> Result<Option<Project>, AppError> {
        let Some(existing) = self.fetch_project(id).await? else {
            return Ok(None);
        };

        let children = match &request.children {
            Some(inputs) => build_children(inputs, &existing.children),
            None => existing.children.clone(),
        };

        let project = Project {
            id: existing.id.clone(),
            title: request.title.clone().unwrap_or(existing.title),
            url: request.url.clone().unwrap_or(existing.url),
            issue: request.issue.clone().unwrap_or(existing.issue),
            img: request.img.clone().unwrap_or(existing.img),
            interest: request
                .interest
                .as_ref()
                .map(|tags| normalize_tags(tags))
                .unwrap_or(existing.interest),
            skills: request
                .skills
                .as_ref()
                .map(|tags| normalize_tags(tags))
                .unwrap_or(existing.skills),
            children,
            created_at: existing.created_at,
            updated_at: Utc::now().to_rfc3339(),
        };

        let interest_json = serde_json::to_string(&project.interest)?;
        let skills_json = serde_json::to_string(&project.skills)?;
        let children_json = serde_json::to_string(&project.children)?;

        let result = sqlx::query(
            "UPDATE projects SET title = ?, url = ?, issue = ?, img = ?, interest = ?, skills = ?, children = ?, updated_at = ? WHERE id = ?"
        )
        .bind(&project.title)
        .bind(&project.url)
        .bind(&project.issue)
        .bind(&project.img)
        .bind(&interest_json)
        .bind(&skills_json)
        .bind(&children_json)
        .bind(&project.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        // Deleted between the read and the write
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(project))
    }

    async fn remove_project(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_all_projects(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM projects")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

// Helper functions for row conversion

fn project_from_row(row: &sqlx::sqlite::SqliteRow) -> Project {
    let interest_str: String = row.get("interest");
    let skills_str: String = row.get("skills");
    let children_str: String = row.get("children");

    Project {
        id: row.get("id"),
        title: row.get("title"),
        url: row.get("url"),
        issue: row.get("issue"),
        img: row.get("img"),
        interest: parse_json_array(&interest_str),
        skills: parse_json_array(&skills_str),
        children: parse_children(&children_str),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_else(|e| {
        tracing::warn!("Discarding unreadable tag column: {}", e);
        Vec::new()
    })
}

fn parse_children(s: &str) -> Vec<ChildProject> {
    serde_json::from_str(s).unwrap_or_else(|e| {
        tracing::warn!("Discarding unreadable children column: {}", e);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use crate::filter::ProjectQuery;
    use crate::models::ChildProjectInput;
    use tempfile::TempDir;

    async fn repo() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("repo.sqlite"))
            .await
            .unwrap();
        (Repository::new(pool, Duration::from_secs(5)), temp_dir)
    }

    fn request(title: &str, interest: &[&str], skills: &[&str]) -> CreateProjectRequest {
        CreateProjectRequest {
            title: title.to_string(),
            url: format!("https://example.com/{}", title),
            issue: "issues".to_string(),
            img: "img.png".to_string(),
            interest: interest.iter().map(|s| s.to_string()).collect(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            children: vec![],
        }
    }

    fn filter(interest: Option<&str>, skills: Option<&str>) -> TagFilter {
        TagFilter::from_query(&ProjectQuery {
            interest: interest.map(str::to_string),
            skills: skills.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn create_then_get_round_trips_children() {
        let (repo, _dir) = repo().await;
        let mut req = request("parent", &["web"], &["rust"]);
        req.children = vec![ChildProjectInput {
            id: None,
            title: "child".to_string(),
            url: "u".to_string(),
            interest: vec!["ml".to_string()],
            skills: vec!["python".to_string()],
        }];

        let created = repo.create_project(&req).await.unwrap();
        let fetched = repo.get_project(&created.id).await.unwrap().unwrap();

        assert_eq!(fetched.title, "parent");
        assert_eq!(fetched.children.len(), 1);
        assert_eq!(fetched.children[0], created.children[0]);
        assert_eq!(fetched.children[0].skills, vec!["python"]);
    }

    #[tokio::test]
    async fn list_filters_with_contains_all() {
        let (repo, _dir) = repo().await;
        repo.create_project(&request("a", &["web", "ml"], &["go"]))
            .await
            .unwrap();
        repo.create_project(&request("b", &["web"], &["go", "rust"]))
            .await
            .unwrap();
        repo.create_project(&request("c", &["ml"], &[]))
            .await
            .unwrap();

        let all = repo.list_projects(&TagFilter::default()).await.unwrap();
        let titles: Vec<_> = all.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);

        let both = repo
            .list_projects(&filter(Some("web,ml"), None))
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].title, "a");

        let mixed = repo
            .list_projects(&filter(Some("web"), Some("rust")))
            .await
            .unwrap();
        assert_eq!(mixed.len(), 1);
        assert_eq!(mixed[0].title, "b");

        let none = repo
            .list_projects(&filter(Some("design"), None))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn update_patches_only_supplied_fields() {
        let (repo, _dir) = repo().await;
        let created = repo
            .create_project(&request("before", &["web"], &["go"]))
            .await
            .unwrap();

        let patch = UpdateProjectRequest {
            title: Some("after".to_string()),
            skills: Some(vec!["rust".to_string(), "rust".to_string()]),
            ..Default::default()
        };
        let updated = repo
            .update_project(&created.id, &patch)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "after");
        assert_eq!(updated.skills, vec!["rust"]);
        assert_eq!(updated.interest, vec!["web"]);
        assert_eq!(updated.url, created.url);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn missing_ids_are_reported_not_raised() {
        let (repo, _dir) = repo().await;

        assert!(repo.get_project("missing").await.unwrap().is_none());
        assert!(repo
            .update_project("missing", &UpdateProjectRequest::default())
            .await
            .unwrap()
            .is_none());
        assert!(!repo.delete_project("missing").await.unwrap());
    }

    #[tokio::test]
    async fn unreadable_columns_load_as_empty() {
        let (repo, _dir) = repo().await;
        let created = repo
            .create_project(&request("a", &["web"], &["go"]))
            .await
            .unwrap();

        sqlx::query("UPDATE projects SET interest = 'not json', children = '{' WHERE id = ?")
            .bind(&created.id)
            .execute(&repo.pool)
            .await
            .unwrap();

        let loaded = repo.get_project(&created.id).await.unwrap().unwrap();
        assert!(loaded.interest.is_empty());
        assert!(loaded.children.is_empty());
        assert_eq!(loaded.skills, vec!["go"]);
    }

    #[tokio::test]
    async fn delete_all_reports_count() {
        let (repo, _dir) = repo().await;
        repo.create_project(&request("a", &[], &[])).await.unwrap();
        repo.create_project(&request("b", &[], &[])).await.unwrap();

        assert_eq!(repo.delete_all_projects().await.unwrap(), 2);
        assert!(repo
            .list_projects(&TagFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn slow_operation_times_out() {
        let (repo, _dir) = repo().await;
        let repo = Repository::new(repo.pool.clone(), Duration::from_millis(10));

        let result: Result<(), AppError> = repo
            .with_timeout("sleep", async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(AppError::Timeout(op)) if op == "sleep"));
    }
}
