//! Matchmaking profile repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{CandidateEntity, MatchProfileEntity};
use crate::metrics::QueryTimer;

/// Repository for matchmaking-profile database operations.
#[derive(Clone)]
pub struct MatchProfileRepository {
    pool: PgPool,
}

impl MatchProfileRepository {
    /// Creates a new MatchProfileRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create or replace a user's profile for an event.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        headline: Option<&str>,
        bio: Option<&str>,
        interests: &[String],
        goals: &[String],
    ) -> Result<MatchProfileEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_match_profile");
        let result = sqlx::query_as::<_, MatchProfileEntity>(
            r#"
            INSERT INTO match_profiles (user_id, event_id, headline, bio, interests, goals)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, event_id) DO UPDATE SET
                headline = EXCLUDED.headline,
                bio = EXCLUDED.bio,
                interests = EXCLUDED.interests,
                goals = EXCLUDED.goals,
                updated_at = now()
            RETURNING id, user_id, event_id, headline, bio, interests, goals, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .bind(headline)
        .bind(bio)
        .bind(interests)
        .bind(goals)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a user's profile for an event.
    pub async fn find_by_user_event(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<Option<MatchProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_match_profile");
        let result = sqlx::query_as::<_, MatchProfileEntity>(
            r#"
            SELECT id, user_id, event_id, headline, bio, interests, goals, created_at, updated_at
            FROM match_profiles
            WHERE user_id = $1 AND event_id = $2
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All profiles in an event except the requester's, joined with each
    /// owner's display fields, in profile creation order.
    pub async fn find_candidates(
        &self,
        event_id: Uuid,
        exclude_user_id: Uuid,
    ) -> Result<Vec<CandidateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_match_candidates");
        let result = sqlx::query_as::<_, CandidateEntity>(
            r#"
            SELECT p.id AS profile_id, p.user_id, p.event_id, p.headline, p.bio,
                   p.interests, p.goals,
                   p.created_at AS profile_created_at, p.updated_at AS profile_updated_at,
                   u.name, u.email, u.image
            FROM match_profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.event_id = $1 AND p.user_id <> $2
            ORDER BY p.created_at ASC, p.id ASC
            "#,
        )
        .bind(event_id)
        .bind(exclude_user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
