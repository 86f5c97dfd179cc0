//! REST handlers: status codes and response bodies.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::body::to_bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use bytes::Bytes;
use serde_json::{json, Value};

use fieldguard_host::app_state::AppState;
use fieldguard_host::transport::http;
use fieldguard_host::{config, ops};

const CFG: &str = r#"
version: 1
models:
  - name: Order
    mixins:
      ReadOnly:
        fields: [total]
    relations:
      items: { type: hasMany, model: OrderItem }
  - name: OrderItem
    mixins:
      ReadOnly:
        fields: [secret]
        raiseError: true
"#;

fn state() -> AppState {
    AppState::new(config::load_from_str(CFG).unwrap()).unwrap()
}

async fn json_body(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn post_create_returns_sanitized_body() {
    let resp = http::create(
        State(state()),
        Path("Order".to_string()),
        Bytes::from_static(br#"{"total": 99, "status": "paid"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["method"], "create");
    assert_eq!(body["data"], json!({ "status": "paid" }));
}

#[tokio::test]
async fn relation_put_rejects_with_403() {
    let resp = http::update_related_by_id(
        State(state()),
        Path(("Order".into(), "1".into(), "items".into(), "7".into())),
        Bytes::from_static(br#"{"secret": false}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = json_body(resp).await;
    assert_eq!(
        body,
        json!({
            "error": {
                "statusCode": 403,
                "code": "READONLY_ERROR",
                "message": "Unable to update: OrderItem.secret is read only."
            }
        })
    );
}

#[tokio::test]
async fn empty_body_is_absent() {
    let resp = http::patch_attributes(
        State(state()),
        Path(("Order".into(), "1".into())),
        Bytes::new(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["data"], Value::Null);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let resp = http::update_all(State(state()), Path("Order".into()), Bytes::from_static(b"{nope")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unknown_model_is_not_found() {
    let resp = http::create(State(state()), Path("Ghost".into()), Bytes::from_static(b"{}")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_endpoint_renders_counters() {
    let st = state();
    let _ = http::create(
        State(st.clone()),
        Path("Order".into()),
        Bytes::from_static(br#"{"total": 1}"#),
    )
    .await;
    let resp = ops::metrics(State(st)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(text.to_vec()).unwrap();
    assert!(text.contains("fieldguard_fields_stripped_total{field=\"total\",model=\"Order\"} 1"));
}
