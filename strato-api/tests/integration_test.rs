use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use strato_api::app_config::{Config, GestureConfig, ServerConfig, SourcingConfig};
use strato_api::{app, build_state};
use strato_core::{haversine_miles, AirportTable};
use tower::util::ServiceExt;

fn offline_config() -> Config {
    Config {
        server: ServerConfig { port: 0 },
        sourcing: SourcingConfig {
            live_data: false,
            schedule_access_key: None,
            fetch_proxy: String::new(),
            position_feed_url: String::new(),
            schedule_api_url: String::new(),
        },
        gesture: GestureConfig {
            debounce_ms: 350,
            frame_stride: 1,
            vocabulary: "scroll".into(),
        },
    }
}

async fn post_json(app: axum::Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_business_class_search_with_live_sourcing_disabled() {
    let app = app(build_state(&offline_config()));

    let (status, body) = post_json(
        app,
        "/v1/flights/search",
        serde_json::json!({
            "origin": "LAX",
            "destination": "LHR",
            "cabin_class": "business",
            "passengers": 1
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 10);
    assert_eq!(body["live_data"], false);

    let offers = body["offers"].as_array().unwrap();
    assert_eq!(offers.len(), 10);

    let table = AirportTable;
    let distance = haversine_miles(table.get("LAX").unwrap(), table.get("LHR").unwrap());
    let base_fare = 150.0 + distance * 0.18;

    let mut last_price = 0i64;
    for offer in offers {
        assert_eq!(offer["source"], "SYNTHESIZED");

        // Ascending by price.
        let price = offer["price"].as_i64().unwrap();
        assert!(price >= last_price, "offers not sorted by price");
        last_price = price;

        // Every business fare clears the economy ceiling for its duration:
        // the 2.2 multiplier at minimum variation beats 1.2 at maximum.
        let hours = offer["duration"]
            .as_str()
            .unwrap()
            .split('h')
            .next()
            .unwrap()
            .parse::<f64>()
            .unwrap();
        let economy_ceiling = base_fare * (1.0 + (hours + 1.0) / 20.0) * 1.2;
        assert!(
            price as f64 >= economy_ceiling,
            "business fare {price} below economy ceiling {economy_ceiling}"
        );
    }
}

#[tokio::test]
async fn test_same_origin_destination_is_empty_not_an_error() {
    let app = app(build_state(&offline_config()));

    let (status, body) = post_json(
        app,
        "/v1/flights/search",
        serde_json::json!({ "origin": "LAX", "destination": "LAX" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["offers"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_sort_reorders_displayed_results() {
    let state = build_state(&offline_config());
    let search_app = app(state.clone());

    let (status, _) = post_json(
        search_app,
        "/v1/flights/search",
        serde_json::json!({ "origin": "JFK", "destination": "CDG" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, sorted) = post_json(
        app(state),
        "/v1/flights/sort",
        serde_json::json!({ "key": "airline" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let airlines: Vec<&str> = sorted
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["airline"].as_str().unwrap())
        .collect();
    let mut expected = airlines.clone();
    expected.sort();
    assert_eq!(airlines, expected);
}

#[tokio::test]
async fn test_gesture_frame_endpoint_classifies_and_dispatches() {
    let app = app(build_state(&offline_config()));

    // A peace sign: index and middle tips high, ring and pinky low.
    let mut landmarks: Vec<serde_json::Value> = (0..21)
        .map(|_| serde_json::json!({ "x": 0.5, "y": 0.5 }))
        .collect();
    landmarks[8] = serde_json::json!({ "x": 0.5, "y": 0.2 });
    landmarks[12] = serde_json::json!({ "x": 0.5, "y": 0.2 });
    landmarks[16] = serde_json::json!({ "x": 0.5, "y": 0.7 });
    landmarks[20] = serde_json::json!({ "x": 0.5, "y": 0.7 });

    let (status, body) = post_json(
        app,
        "/v1/gestures/frame",
        serde_json::json!({ "landmarks": landmarks }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "peace");
    assert_eq!(body["accepted"], true);
    assert_eq!(body["action"]["kind"], "scroll_page");
    assert_eq!(body["action"]["delta_px"], 250);
    assert_eq!(body["status"], "Scrolling down");
}

#[tokio::test]
async fn test_gesture_frame_rejects_wrong_landmark_count() {
    let app = app(build_state(&offline_config()));

    let landmarks: Vec<serde_json::Value> = (0..5)
        .map(|_| serde_json::json!({ "x": 0.5, "y": 0.5 }))
        .collect();

    let (status, _) = post_json(
        app,
        "/v1/gestures/frame",
        serde_json::json!({ "landmarks": landmarks }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_absent_hand_reports_idle_status() {
    let app = app(build_state(&offline_config()));

    let (status, body) = post_json(app, "/v1/gestures/frame", serde_json::json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "none");
    assert_eq!(body["accepted"], false);
    assert!(body["action"].is_null());
    assert_eq!(body["status"], "Ready for gestures");
}
