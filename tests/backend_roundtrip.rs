//! End-to-end client tests against a local mock backend.
#![cfg(feature = "server")]

use std::rc::Rc;

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use survex_web::auth::{AuthFlow, LoginForm, NoBotCheck};
use survex_web::client::types::{BanRequest, RedeemRequest};
use survex_web::client::{ApiClient, HttpTransport, DEVICE_ID_HEADER};
use survex_web::config::ClientConfig;
use survex_web::error::ApiError;
use survex_web::format::Money;
use survex_web::session::SessionStore;
use survex_web::storage::{MemoryStore, SharedStore};
use survex_web::views::refresh_user;

const TOKEN: &str = "tok-123";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

async fn login(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if headers.get(DEVICE_ID_HEADER).is_none() {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "missing device"})));
    }
    if body["password"] != "hunter22" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid email or password."})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "token": TOKEN,
            "user": {"id": 7, "email": body["email"], "balance": "12.50", "role": "user"}
        })),
    )
}

async fn me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthorized"})));
    }
    (
        StatusCode::OK,
        Json(json!({"user": {"id": 7, "email": "ada@example.com", "balance": 30}})),
    )
}

async fn redeem(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthorized"})));
    }
    if body["amount"].as_i64().unwrap_or(0) > 30 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Insufficient balance"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "message": "Withdrawal request submitted.",
            "user": {"id": 7, "email": "ada@example.com", "balance": "20.00"}
        })),
    )
}

async fn ban(Path(id): Path<i64>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "message": format!("User {} updated", id),
        "user": {"user_role": "user", "is_banned": body["isBanned"]}
    }))
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/rewards/redeem", post(redeem))
        .route("/api/admin/users/{id}/ban", patch(ban));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn services(base: &str) -> (ApiClient, SessionStore, SharedStore) {
    let storage: SharedStore = Rc::new(MemoryStore::new());
    let client = ApiClient::new(Rc::new(HttpTransport::new(base)));
    (client, SessionStore::new(storage.clone()), storage)
}

#[tokio::test]
async fn test_login_then_refresh_user() {
    let base = spawn_backend().await;
    let (client, session, storage) = services(&base);
    let flow = AuthFlow::new(client.clone(), session.clone(), storage, ClientConfig::default());

    let form = LoginForm {
        email: "ada@example.com".to_string(),
        password: "hunter22".to_string(),
    };
    let user = flow.login(&form, &NoBotCheck).await.unwrap().unwrap();
    assert_eq!(user.balance, Money::from_cents(1250));
    assert_eq!(session.token().as_deref(), Some(TOKEN));

    let refreshed = refresh_user(&client, &session, TOKEN).await.unwrap();
    assert_eq!(refreshed.balance, Money::from_dollars(30));
    assert_eq!(session.current().unwrap().balance(), Money::from_dollars(30));
}

#[tokio::test]
async fn test_bad_password_surfaces_server_message() {
    let base = spawn_backend().await;
    let (client, session, storage) = services(&base);
    let flow = AuthFlow::new(client, session.clone(), storage, ClientConfig::default());

    let form = LoginForm {
        email: "ada@example.com".to_string(),
        password: "wrong".to_string(),
    };
    let err = flow.login(&form, &NoBotCheck).await.unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 401, .. }));
    assert_eq!(survex_web::auth::failure_message(&err), "Invalid email or password.");
    assert!(session.token().is_none());
}

#[tokio::test]
async fn test_redeem_success_and_rejection() {
    let base = spawn_backend().await;
    let (client, _, _) = services(&base);

    let ok = client
        .redeem(
            TOKEN,
            &RedeemRequest {
                amount: 10,
                reward_method: "Amazon".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(ok.message.as_deref(), Some("Withdrawal request submitted."));
    assert_eq!(ok.user.unwrap().balance, Money::from_dollars(20));

    let err = client
        .redeem(
            TOKEN,
            &RedeemRequest {
                amount: 50,
                reward_method: "Amazon".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.user_message("fallback"), "Insufficient balance");
}

#[tokio::test]
async fn test_unauthorized_me() {
    let base = spawn_backend().await;
    let (client, _, _) = services(&base);

    let err = client.me("stale").await.unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 401, .. }));
}

#[tokio::test]
async fn test_ban_user_roundtrip() {
    let base = spawn_backend().await;
    let (client, _, _) = services(&base);

    let response = client
        .set_user_ban(
            TOKEN,
            42,
            &BanRequest {
                is_banned: true,
                reason: "fraud".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(response.message.as_deref(), Some("User 42 updated"));
    assert_eq!(response.user.unwrap().is_banned, Some(true));
}
