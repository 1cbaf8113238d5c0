use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, NaiveTime, Weekday};
use chrono_tz::Tz;
use tower::ServiceExt;

use countdown_recur::{
    api::create_router,
    countdown::{FrozenClock, RecurrenceSpec},
    AppState, CountdownSettings,
};

fn app_at(now: (i32, u32, u32, u32), weeks: u32, debug: bool) -> Router {
    let spec = RecurrenceSpec::new(
        NaiveDate::from_ymd_opt(2018, 4, 25).unwrap(),
        Weekday::Sun,
        NaiveTime::from_hms_opt(23, 59, 59).unwrap(),
        weeks,
    )
    .unwrap();
    let mut settings = CountdownSettings::new(spec, Tz::America__Chicago);
    settings.debug = debug;

    let (y, m, d, h) = now;
    let clock = FrozenClock::new(NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap());
    let state = AppState::with_clock(settings, Arc::new(clock), 0, "127.0.0.1".to_string());

    create_router(Arc::new(state))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn countdown_fragment_while_counting() {
    let (status, body) = get(app_at((2018, 4, 25, 10), 104, false), "/countdown").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<div class=\"num\">4</div><div class=\"text\">Days</div>"));
    assert!(body.contains("<div class=\"num\">13</div><div class=\"text\">Hours</div>"));
    assert!(!body.contains("Sorry, this event has expired."));
}

#[tokio::test]
async fn countdown_fragment_once_expired() {
    let (status, body) = get(app_at((2018, 5, 2, 12), 1, false), "/countdown").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Sorry, this event has expired."));
    assert!(!body.contains("Days"));
}

#[tokio::test]
async fn status_reports_same_day_deadline() {
    let (status, body) = get(app_at((2018, 4, 29, 9), 104, false), "/status").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["state"], "counting");
    assert_eq!(json["remaining"]["days"], 0);
    assert_eq!(json["remaining"]["hours"], 14);
    assert_eq!(json["remaining"]["minutes"], 59);
    assert_eq!(json["remaining"]["seconds"], 59);
    assert_eq!(json["time_remaining"], "0 days 14:59:59");
    assert_eq!(json["next_deadline"], "2018-04-29T23:59:59");
    assert_eq!(json["timezone"], "America/Chicago");
    assert_eq!(json["weeks_to_recur"], 104);
}

#[tokio::test]
async fn status_reports_exhausted_horizon() {
    let (_, body) = get(app_at((2018, 5, 2, 12), 1, false), "/status").await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    assert_eq!(json["state"], "expired");
    assert!(json["next_deadline"].is_null());
}

#[tokio::test]
async fn debug_renders_are_identical() {
    let app = app_at((2018, 4, 25, 10), 104, true);

    let (_, first) = get(app.clone(), "/countdown").await;
    let (_, second) = get(app, "/countdown").await;

    assert_eq!(first, second);
    assert!(first.contains("You arrived at:"));
    assert!(first.contains("Wednesday, April 25, 2018 10:00 AM"));
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = get(app_at((2018, 4, 25, 10), 104, false), "/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, _) = get(app_at((2018, 4, 25, 10), 104, false), "/coffee").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
