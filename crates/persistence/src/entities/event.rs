//! Event entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventEntity> for domain::models::Event {
    fn from(entity: EventEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            location: entity.location,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_event_entity_to_domain() {
        let starts_at = Utc::now();
        let entity = EventEntity {
            id: Uuid::new_v4(),
            name: "Tech Summit".to_string(),
            slug: "tech-summit".to_string(),
            location: Some("Paris".to_string()),
            starts_at,
            ends_at: starts_at + Duration::hours(8),
            created_by: Some(Uuid::new_v4()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let event: domain::models::Event = entity.clone().into();
        assert_eq!(event.id, entity.id);
        assert_eq!(event.slug, entity.slug);
        assert_eq!(event.location, entity.location);
        assert_eq!(event.starts_at, entity.starts_at);
    }
}
