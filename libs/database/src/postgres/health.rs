use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::DatabaseError;

/// Readiness probe: `SELECT 1` on a pooled connection.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    check_health_with_query(db, "SELECT 1").await
}

/// Like [`check_health`] with a caller-supplied probe, e.g.
/// `SELECT 1 FROM products LIMIT 1` to also assert the schema exists.
pub async fn check_health_with_query(
    db: &DatabaseConnection,
    query: &str,
) -> Result<(), DatabaseError> {
    debug!("Running PostgreSQL health check: {}", query);

    let stmt = Statement::from_string(DatabaseBackend::Postgres, query.to_owned());
    db.query_one_raw(stmt).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("PostgreSQL health check failed: {}", e))
    })?;

    debug!("PostgreSQL health check passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbErr, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn one_row() -> Vec<BTreeMap<&'static str, Value>> {
        vec![BTreeMap::from([("?column?", Value::Int(Some(1)))])]
    }

    #[tokio::test]
    async fn test_check_health_passes_when_probe_returns() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([one_row()])
            .into_connection();

        assert!(check_health(&db).await.is_ok());
    }

    #[tokio::test]
    async fn test_check_health_reports_failure() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection refused".into())])
            .into_connection();

        let err = check_health(&db).await.unwrap_err();
        assert!(matches!(err, DatabaseError::HealthCheckFailed(_)));
        assert!(err.to_string().contains("connection refused"));
    }
}
