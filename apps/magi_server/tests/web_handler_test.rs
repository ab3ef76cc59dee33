//! Router-level tests driving the handlers with scripted ephemeris sources.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use magi::ephemeris::{BackendState, EphemerisAdapter, EphemerisError, GeoLocation};
use magi::{AspectEngine, Body as Planet, Chart, Ephemerides, PositionResolver};
use magi_server::{build_router, AppState};
use std::sync::Arc;
use std::time::Duration;

/// Every body at a fixed longitude.
struct FixedEphemeris;

impl EphemerisAdapter for FixedEphemeris {
    fn name(&self) -> &str {
        "fixed"
    }

    fn longitude(
        &self,
        body: Planet,
        _instant: DateTime<Utc>,
        _location: GeoLocation,
    ) -> Result<f64, EphemerisError> {
        Ok(match body {
            Planet::Sun => 10.0,
            Planet::Moon => 100.2,
            Planet::Mars => 250.0,
            _ => 300.0,
        })
    }
}

/// Stalls on the Sun, longer than the request timeout used below.
struct SlowEphemeris;

impl EphemerisAdapter for SlowEphemeris {
    fn name(&self) -> &str {
        "slow"
    }

    fn longitude(
        &self,
        body: Planet,
        _instant: DateTime<Utc>,
        _location: GeoLocation,
    ) -> Result<f64, EphemerisError> {
        if body == Planet::Sun {
            std::thread::sleep(Duration::from_millis(300));
        }
        Ok(0.0)
    }
}

fn charts() -> [Chart; 2] {
    [
        Chart::parse("Madonna", "1958-08-16", "00:00", -5.0, 42.65, -83.89).unwrap(),
        Chart::parse("Sean Penn", "1960-08-17", "00:00", -7.0, 34.05, -118.24).unwrap(),
    ]
}

fn app_with(classical: BackendState, minor_body: BackendState, timeout: Duration) -> Router {
    let ephemerides = Arc::new(Ephemerides::from_parts(classical, minor_body));
    build_router(AppState {
        resolver: PositionResolver::new(ephemerides),
        engine: AspectEngine::default(),
        charts: charts(),
        request_timeout: timeout,
    })
}

fn create_test_app() -> Router {
    app_with(
        BackendState::Ready(Arc::new(FixedEphemeris)),
        BackendState::Unavailable {
            reason: "no seas file".to_string(),
        },
        Duration::from_secs(5),
    )
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    use tower::ServiceExt;

    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_root_returns_plain_text_report() {
    let app = create_test_app();
    let response = {
        use tower::ServiceExt;
        app.oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap()
    };

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/plain"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("--- Magi Astrology Report ---"));
    assert!(text.contains("Chart 1: Madonna (1958-08-16)"));
    assert!(text.contains("Planetary Positions for Sean Penn:"));
    assert!(text.contains("(Square, Hard, Orb: 0.20°) [H]"));
    assert!(text.contains("Chiron    :   0.000° (ephemeris unavailable)"));
}

#[tokio::test]
async fn test_run_alias_matches_root() {
    let (status_root, root) = get(create_test_app(), "/").await;
    let (status_run, run) = get(create_test_app(), "/run").await;

    assert_eq!(status_root, StatusCode::OK);
    assert_eq!(status_run, StatusCode::OK);
    assert_eq!(root, run);
}

#[tokio::test]
async fn test_report_json() {
    let (status, body) = get(create_test_app(), "/report.json").await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["first"]["chart"]["name"], "Madonna");
    assert_eq!(json["second"]["positions"]["Chiron"]["degraded"], true);
    assert_eq!(json["natal_orb"], 3.0);
    assert_eq!(json["synastry_orb"], 1.0);
}

#[tokio::test]
async fn test_health_reports_degraded_minor_body() {
    let (status, body) = get(create_test_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["backends"][0]["backend"], "classical");
    assert_eq!(json["backends"][1]["ready"], false);
    assert_eq!(json["backends"][1]["reason"], "no seas file");
}

#[tokio::test]
async fn test_health_fails_without_classical_backend() {
    let app = app_with(
        BackendState::Unavailable {
            reason: "broken".to_string(),
        },
        BackendState::Ready(Arc::new(FixedEphemeris)),
        Duration::from_secs(5),
    );

    let (status, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("\"status\":\"error\""));
}

#[tokio::test]
async fn test_pipeline_error_maps_to_500() {
    struct Broken;
    impl EphemerisAdapter for Broken {
        fn name(&self) -> &str {
            "broken"
        }
        fn longitude(
            &self,
            body: Planet,
            instant: DateTime<Utc>,
            _location: GeoLocation,
        ) -> Result<f64, EphemerisError> {
            Err(EphemerisError::CalculationFailed {
                body,
                datetime: instant,
                message: "corrupt data file".to_string(),
            })
        }
    }

    let app = app_with(
        BackendState::Ready(Arc::new(Broken)),
        BackendState::Ready(Arc::new(FixedEphemeris)),
        Duration::from_secs(5),
    );

    let (status, body) = get(app, "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("corrupt data file"));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let app = app_with(
        BackendState::Ready(Arc::new(SlowEphemeris)),
        BackendState::Ready(Arc::new(SlowEphemeris)),
        Duration::from_millis(50),
    );

    let (status, body) = get(app, "/").await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert!(body.contains("exceeded"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, _) = get(create_test_app(), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
