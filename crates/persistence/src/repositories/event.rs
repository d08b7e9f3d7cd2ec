//! Event repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EventEntity;
use crate::metrics::QueryTimer;

/// Repository for event-related database operations.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Creates a new EventRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event.
    pub async fn create(
        &self,
        name: &str,
        slug: &str,
        location: Option<&str>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        created_by: Option<Uuid>,
    ) -> Result<EventEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_event");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            INSERT INTO events (name, slug, location, starts_at, ends_at, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, slug, location, starts_at, ends_at, created_by, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(location)
        .bind(starts_at)
        .bind(ends_at)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an event by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, name, slug, location, starts_at, ends_at, created_by, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an event by its slug.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_slug");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, name, slug, location, starts_at, ends_at, created_by, created_at, updated_at
            FROM events
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
