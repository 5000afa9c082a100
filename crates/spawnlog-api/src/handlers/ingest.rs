//! Spawn sighting ingestion handler.
//!
//! Accepts a single GET request carrying a sighting report in its query
//! parameters, coerces the untyped strings into a typed `Spawn`, and
//! persists it with an idempotent upsert keyed on `encounter_id`. Repeated
//! reports of the same encounter never create duplicate rows.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use spawnlog_core::{IngestError, RawSpawnReport};
use tracing::{debug, error, info, instrument, warn};

use crate::AppState;

/// Fixed acknowledgment body returned on every successful ingestion.
///
/// The payload is a historical contract with the map frontend and never
/// varies, including on the duplicate path.
pub const SUCCESS_BODY: &str = r#"{"result": []}"#;

/// Error response with code and message.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error details including code and message.
    pub error: ErrorDetail,
}

/// Detailed error information.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Error code from the taxonomy (E1001-E1003).
    pub code: String,
    /// Human-readable error description.
    pub message: String,
}

/// Ingests a spawn sighting report.
///
/// Parses the six required query parameters, acquires a database
/// connection scoped to this request, and executes the dedup upsert.
/// Every failure is terminal for the request; nothing is retried.
///
/// # Errors
///
/// Returns appropriate HTTP status codes:
/// - 400: a parameter cannot be coerced to its semantic type
/// - 503: no database session could be acquired
/// - 500: the upsert statement failed
#[instrument(
    name = "ingest_spawn",
    skip(state, params),
    fields(encounter_id = %params.encounter_id, spawn_point_id = %params.spawn_point_id)
)]
pub async fn ingest_spawn(
    State(state): State<AppState>,
    Query(params): Query<RawSpawnReport>,
) -> Response {
    debug!("Processing spawn report");

    // Validation happens before any database work so malformed input
    // never consumes a connection.
    let spawn = match params.parse() {
        Ok(spawn) => spawn,
        Err(e) => {
            warn!(error = %e, "Rejected malformed spawn report");
            return error_response(&e);
        },
    };

    let pool = state.storage.spawns.pool();
    let mut conn = match pool.acquire().await {
        Ok(conn) => conn,
        Err(e) => {
            error!(error = %e, "Failed to acquire database connection");
            return error_response(&IngestError::Connection(e.to_string()));
        },
    };

    // The connection is released back to the pool when `conn` drops,
    // on the error path as much as on success.
    match state.storage.spawns.upsert_on(&mut conn, &spawn).await {
        Ok(()) => {
            info!(encounter_id = %spawn.encounter_id, "Spawn sighting recorded");
            success_response()
        },
        Err(e) => {
            let e = IngestError::from(e);
            error!(error = %e, "Failed to record spawn sighting");
            error_response(&e)
        },
    }
}

/// Builds the fixed success response.
fn success_response() -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], SUCCESS_BODY).into_response()
}

/// Maps an ingest error onto its transport status code.
const fn status_for(error: &IngestError) -> StatusCode {
    match error {
        IngestError::Validation { .. } => StatusCode::BAD_REQUEST,
        IngestError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
        IngestError::Write(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Creates a standardized error response.
fn error_response(error: &IngestError) -> Response {
    let body = ErrorResponse {
        error: ErrorDetail { code: error.code().to_string(), message: error.to_string() },
    };

    (status_for(error), Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_is_the_fixed_contract() {
        let parsed: serde_json::Value = serde_json::from_str(SUCCESS_BODY).unwrap();
        assert_eq!(parsed, serde_json::json!({"result": []}));
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let err = IngestError::Validation { param: "latitude", value: "abc".into() };
        assert_eq!(status_for(&err), StatusCode::BAD_REQUEST);

        let response = error_response(&err);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn connection_maps_to_service_unavailable() {
        let err = IngestError::Connection("connection refused".into());
        assert_eq!(status_for(&err), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn write_maps_to_internal_error() {
        let err = IngestError::Write("constraint violation".into());
        assert_eq!(status_for(&err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_envelope_shape() {
        let err = IngestError::Validation { param: "latitude", value: "abc".into() };
        let body = ErrorResponse {
            error: ErrorDetail { code: err.code().to_string(), message: err.to_string() },
        };

        insta::assert_json_snapshot!(body, @r###"
        {
          "error": {
            "code": "E1002",
            "message": "[E1002] invalid parameter latitude: cannot parse \"abc\""
          }
        }
        "###);
    }
}
