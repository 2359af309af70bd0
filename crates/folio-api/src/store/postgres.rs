//! Postgres backend. Queries run against the `projects` and `contacts`
//! tables created by the embedded migrations.

use std::time::Duration;

use async_trait::async_trait;
use folio_core::{ContactSubmission, ProjectListing};
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use super::{StoreError, SubmissionStore};

/// Store backed by a Postgres connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect, then apply the embedded migrations.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect(url)
            .await?;
        tracing::info!("Connected to PostgreSQL");

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    title: String,
    description: String,
    technologies: Vec<String>,
    github: Option<String>,
    live: Option<String>,
}

impl From<ProjectRow> for ProjectListing {
    fn from(row: ProjectRow) -> Self {
        Self {
            title: row.title,
            description: row.description,
            technologies: row.technologies,
            github: row.github,
            live: row.live,
        }
    }
}

#[async_trait]
impl SubmissionStore for PgStore {
    async fn list_projects(&self) -> Result<Vec<ProjectListing>, StoreError> {
        // No ORDER BY: listings are served in storage order.
        let rows = sqlx::query_as::<_, ProjectRow>(
            "SELECT title, description, technologies, github, live FROM projects",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProjectListing::from).collect())
    }

    async fn insert_contact(&self, submission: &ContactSubmission) -> Result<Uuid, StoreError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO contacts (id, name, email, message, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(submission.id)
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.message)
        .bind(submission.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
