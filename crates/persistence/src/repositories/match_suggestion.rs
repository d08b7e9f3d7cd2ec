//! Matchmaking suggestion repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::SuggestionWithCandidateEntity;
use crate::metrics::QueryTimer;

/// A suggestion row pending insertion.
#[derive(Debug, Clone)]
pub struct NewSuggestion {
    pub suggested_user_id: Uuid,
    pub score: f64,
    pub reason: String,
}

/// Repository for matchmaking-suggestion database operations.
#[derive(Clone)]
pub struct MatchSuggestionRepository {
    pool: PgPool,
}

impl MatchSuggestionRepository {
    /// Creates a new MatchSuggestionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Atomically replace all suggestions for (user, event).
    ///
    /// Delete and inserts run in one transaction so concurrent readers
    /// never observe the empty intermediate state.
    pub async fn replace_for_user(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        suggestions: &[NewSuggestion],
    ) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("replace_match_suggestions");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM match_suggestions
            WHERE user_id = $1 AND event_id = $2
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .execute(&mut *tx)
        .await?;

        for suggestion in suggestions {
            sqlx::query(
                r#"
                INSERT INTO match_suggestions (user_id, suggested_user_id, event_id, score, reason)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(user_id)
            .bind(suggestion.suggested_user_id)
            .bind(event_id)
            .bind(suggestion.score)
            .bind(&suggestion.reason)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();
        Ok(())
    }

    /// Persisted suggestions for (user, event), best first, joined with
    /// candidate display fields and profiles.
    pub async fn find_for_user(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<Vec<SuggestionWithCandidateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_match_suggestions");
        let result = sqlx::query_as::<_, SuggestionWithCandidateEntity>(
            r#"
            SELECT s.suggested_user_id, s.score, s.reason,
                   u.name, u.email, u.image,
                   p.headline, p.bio, p.interests, p.goals
            FROM match_suggestions s
            JOIN users u ON u.id = s.suggested_user_id
            JOIN match_profiles p
                ON p.user_id = s.suggested_user_id AND p.event_id = s.event_id
            WHERE s.user_id = $1 AND s.event_id = $2
            ORDER BY s.score DESC, s.created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
