//! Readiness endpoint. Liveness (`/health`) comes from `axum_helpers::health_router`.

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::postgres::check_health;

use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async { check_health(&state.db).await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, server::ServerConfig};
    use database::postgres::PostgresConfig;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, Value};
    use std::collections::BTreeMap;
    use tower::ServiceExt;

    fn state(db: DatabaseConnection) -> AppState {
        AppState {
            config: Config {
                app: app_info!(),
                postgres: PostgresConfig::new("postgresql://localhost/catalog"),
                server: ServerConfig::default(),
                environment: Environment::Development,
                run_migrations: false,
            },
            db,
        }
    }

    async fn call(db: DatabaseConnection) -> (StatusCode, serde_json::Value) {
        let response = router(state(db))
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_ready_when_database_answers() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("?column?", Value::Int(Some(1)))])]])
            .into_connection();

        let (status, body) = call(db).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn test_not_ready_when_database_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection refused".into())])
            .into_connection();

        let (status, body) = call(db).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["database"], "disconnected");
    }
}
