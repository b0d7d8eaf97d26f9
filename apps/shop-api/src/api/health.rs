//! Readiness endpoint

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use mongodb::Client;
use serde_json::Value;

/// `GET /ready`: pings MongoDB.
async fn ready(State(client): State<Client>) -> (StatusCode, Json<Value>) {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "mongodb",
        Box::pin(async {
            database::mongodb::check_health(&client)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    match run_health_checks(checks).await {
        Ok(ok) => ok,
        Err(not_ready) => not_ready,
    }
}

pub fn router(client: Client) -> Router {
    Router::new().route("/ready", get(ready)).with_state(client)
}
