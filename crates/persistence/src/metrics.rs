//! Repository query timing and pool gauges.

use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Times one repository query and records it under
/// `repository_query_duration_seconds{query=...}`.
///
/// Usage:
/// ```ignore
/// let timer = QueryTimer::new("check_in_registration");
/// let result = sqlx::query_as::<_, RegistrationEntity>(...).fetch_optional(&pool).await;
/// timer.record();
/// result
/// ```
pub struct QueryTimer {
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            start: Instant::now(),
        }
    }

    /// Record the elapsed duration to metrics.
    pub fn record(self) {
        histogram!(
            "repository_query_duration_seconds",
            "query" => self.query_name
        )
        .record(self.start.elapsed().as_secs_f64());
    }
}

/// Snapshot the connection pool into `db_pool_connections_*` gauges.
///
/// Recorded opportunistically from the readiness probe rather than on a
/// background ticker; scrape intervals are far coarser than probe intervals.
pub fn record_pool_gauges(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();
    let busy = size.saturating_sub(idle);

    gauge!("db_pool_connections_busy").set(busy as f64);
    gauge!("db_pool_connections_idle").set(idle as f64);
    gauge!("db_pool_connections_size").set(size as f64);
}
