//! Registration repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::RegistrationEntity;
use crate::metrics::QueryTimer;

const REGISTRATION_COLUMNS: &str = "id, event_id, user_id, first_name, last_name, email, \
     registration_type, qr_code, short_code, checked_in, check_in_time, created_at, updated_at";

/// Repository for registration-related database operations.
#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    /// Creates a new RegistrationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a registration. Fails with a unique violation when the short
    /// code or email already exists within the event; callers retry code
    /// collisions with a fresh code.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        event_id: Uuid,
        user_id: Option<Uuid>,
        first_name: &str,
        last_name: &str,
        email: &str,
        registration_type: &str,
        qr_code: &str,
        short_code: &str,
    ) -> Result<RegistrationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_registration");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            INSERT INTO registrations
                (event_id, user_id, first_name, last_name, email, registration_type, qr_code, short_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {REGISTRATION_COLUMNS}
            "#,
        ))
        .bind(event_id)
        .bind(user_id)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(registration_type)
        .bind(qr_code)
        .bind(short_code)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a registration by its id, scoped to an event.
    pub async fn find_by_id_in_event(
        &self,
        event_id: Uuid,
        id: Uuid,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_by_id");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            SELECT {REGISTRATION_COLUMNS}
            FROM registrations
            WHERE event_id = $1 AND id = $2
            "#,
        ))
        .bind(event_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a registration by badge short code, scoped to an event.
    pub async fn find_by_short_code(
        &self,
        event_id: Uuid,
        short_code: &str,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_by_short_code");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            SELECT {REGISTRATION_COLUMNS}
            FROM registrations
            WHERE event_id = $1 AND short_code = $2
            "#,
        ))
        .bind(event_id)
        .bind(short_code)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a registration by scanned QR payload, scoped to an event.
    ///
    /// Badges printed by this system encode the short code, so that column
    /// is tried first; legacy badges carry the long-form payload stored in
    /// `qr_code`.
    pub async fn find_by_qr_payload(
        &self,
        event_id: Uuid,
        payload: &str,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        if let Some(registration) = self.find_by_short_code(event_id, payload).await? {
            return Ok(Some(registration));
        }

        let timer = QueryTimer::new("find_registration_by_qr_code");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            SELECT {REGISTRATION_COLUMNS}
            FROM registrations
            WHERE event_id = $1 AND qr_code = $2
            "#,
        ))
        .bind(event_id)
        .bind(payload)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a registration by email, scoped to an event. Matched exactly
    /// as stored.
    pub async fn find_by_email(
        &self,
        event_id: Uuid,
        email: &str,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_by_email");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            SELECT {REGISTRATION_COLUMNS}
            FROM registrations
            WHERE event_id = $1 AND email = $2
            "#,
        ))
        .bind(event_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find the registration linked to a user account, scoped to an event.
    pub async fn find_by_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_by_user");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            SELECT {REGISTRATION_COLUMNS}
            FROM registrations
            WHERE event_id = $1 AND user_id = $2
            "#,
        ))
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Transition a registration to checked-in, exactly once.
    ///
    /// The conditional update guarantees at-most-once timestamp assignment
    /// under concurrent callers: the row is only touched while `checked_in`
    /// is still false. Returns `None` when no transition happened, i.e. the
    /// registration was already checked in (or checked in concurrently).
    pub async fn check_in(
        &self,
        registration_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("check_in_registration");
        let result = sqlx::query_as::<_, RegistrationEntity>(&format!(
            r#"
            UPDATE registrations
            SET checked_in = TRUE, check_in_time = $2, updated_at = $2
            WHERE id = $1 AND checked_in = FALSE
            RETURNING {REGISTRATION_COLUMNS}
            "#,
        ))
        .bind(registration_id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List registrations for an event in creation order, keyset-paginated
    /// on (created_at, id).
    pub async fn list_page(
        &self,
        event_id: Uuid,
        after: Option<(DateTime<Utc>, Uuid)>,
        limit: i64,
    ) -> Result<Vec<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_registrations");
        let result = match after {
            Some((created_at, id)) => {
                sqlx::query_as::<_, RegistrationEntity>(&format!(
                    r#"
                    SELECT {REGISTRATION_COLUMNS}
                    FROM registrations
                    WHERE event_id = $1 AND (created_at, id) > ($2, $3)
                    ORDER BY created_at ASC, id ASC
                    LIMIT $4
                    "#,
                ))
                .bind(event_id)
                .bind(created_at)
                .bind(id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, RegistrationEntity>(&format!(
                    r#"
                    SELECT {REGISTRATION_COLUMNS}
                    FROM registrations
                    WHERE event_id = $1
                    ORDER BY created_at ASC, id ASC
                    LIMIT $2
                    "#,
                ))
                .bind(event_id)
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        };
        timer.record();
        result
    }
}
