//! Thin wrappers around the backend HTTP/JSON API.
//!
//! Every call goes through [`request`], which attaches the bearer token where
//! required, classifies failures into [`ApiError`] and decodes success bodies
//! with serde. No call is retried; recovery is always user-initiated.

use serde::de::DeserializeOwned;
use serde_json::json;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::config::API_BASE_URL;
use crate::error::{classify_failure, ApiError};
use crate::types::{
    AuthResponse, ChatReply, HealthStatus, MessageList, PlaylistList, SessionCreated,
    SessionList, VerifyResponse,
};

fn unreachable_backend(_err: JsValue) -> ApiError {
    ApiError::Connectivity("Cannot connect to backend server".to_string())
}

async fn request<T: DeserializeOwned>(
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Result<T, ApiError> {
    let opts = web_sys::RequestInit::new();
    opts.set_method(method);

    let headers = web_sys::Headers::new().map_err(unreachable_backend)?;
    headers
        .append("Content-Type", "application/json")
        .map_err(unreachable_backend)?;
    if let Some(token) = token {
        headers
            .append("Authorization", &format!("Bearer {token}"))
            .map_err(unreachable_backend)?;
    }
    opts.set_headers(headers.as_ref());

    if let Some(body) = body {
        opts.set_body(&JsValue::from_str(&body.to_string()));
    }

    let url = format!("{API_BASE_URL}{path}");
    let request =
        web_sys::Request::new_with_str_and_init(&url, &opts).map_err(unreachable_backend)?;
    let window = web_sys::window()
        .ok_or_else(|| ApiError::Connectivity("window not available".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(unreachable_backend)?;
    let resp: web_sys::Response = resp_value.dyn_into().map_err(unreachable_backend)?;

    let status = resp.status();
    if !resp.ok() {
        let text = JsFuture::from(resp.text().map_err(unreachable_backend)?)
            .await
            .map_err(unreachable_backend)?;
        return Err(classify_failure(
            status,
            &resp.status_text(),
            &text.as_string().unwrap_or_default(),
        ));
    }

    let json = JsFuture::from(resp.json().map_err(unreachable_backend)?)
        .await
        .map_err(unreachable_backend)?;
    serde_wasm_bindgen::from_value(json).map_err(|e| ApiError::Api {
        status,
        message: format!("Malformed response body: {e}"),
    })
}

// --- auth ---

pub async fn login(email: &str, password: &str) -> Result<AuthResponse, ApiError> {
    request(
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

pub async fn signup(full_name: &str, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
    request(
        "POST",
        "/auth/signup",
        None,
        Some(json!({ "fullName": full_name, "email": email, "password": password })),
    )
    .await
}

pub async fn logout(token: &str) -> Result<(), ApiError> {
    request::<serde_json::Value>("POST", "/auth/logout", Some(token), None).await?;
    Ok(())
}

pub async fn verify_token(token: &str) -> Result<VerifyResponse, ApiError> {
    request("GET", "/auth/verify", Some(token), None).await
}

// --- chat ---

pub async fn send_message(
    token: &str,
    message: &str,
    session_id: Option<&str>,
) -> Result<ChatReply, ApiError> {
    request(
        "POST",
        "/chat/predict",
        Some(token),
        Some(json!({ "message": message, "session_id": session_id })),
    )
    .await
}

/// Unauthenticated preview variant used by the landing page demo chat.
pub async fn send_message_public(message: &str) -> Result<ChatReply, ApiError> {
    request(
        "POST",
        "/chat/predict-public",
        None,
        Some(json!({ "message": message })),
    )
    .await
}

pub async fn get_sessions(token: &str) -> Result<SessionList, ApiError> {
    request("GET", "/chat/sessions", Some(token), None).await
}

pub async fn create_session(token: &str, title: &str) -> Result<SessionCreated, ApiError> {
    request(
        "POST",
        "/chat/sessions",
        Some(token),
        Some(json!({ "title": title })),
    )
    .await
}

pub async fn get_session_messages(token: &str, session_id: &str) -> Result<MessageList, ApiError> {
    request(
        "GET",
        &format!("/chat/sessions/{session_id}/messages"),
        Some(token),
        None,
    )
    .await
}

/// Persisting send: the server stores the turn and auto-titles the session.
pub async fn send_session_message(
    token: &str,
    session_id: &str,
    message: &str,
) -> Result<ChatReply, ApiError> {
    request(
        "POST",
        &format!("/chat/sessions/{session_id}/messages"),
        Some(token),
        Some(json!({ "message": message })),
    )
    .await
}

pub async fn update_session(token: &str, session_id: &str, title: &str) -> Result<(), ApiError> {
    request::<serde_json::Value>(
        "PATCH",
        &format!("/chat/sessions/{session_id}"),
        Some(token),
        Some(json!({ "title": title })),
    )
    .await?;
    Ok(())
}

pub async fn delete_session(token: &str, session_id: &str) -> Result<(), ApiError> {
    request::<serde_json::Value>(
        "DELETE",
        &format!("/chat/sessions/{session_id}"),
        Some(token),
        None,
    )
    .await?;
    Ok(())
}

pub async fn get_playlists(token: &str, mood: &str) -> Result<PlaylistList, ApiError> {
    request(
        "POST",
        "/chat/playlists",
        Some(token),
        Some(json!({ "mood": mood })),
    )
    .await
}

// --- health ---

pub async fn check_health() -> Result<HealthStatus, ApiError> {
    request("GET", "/health", None, None).await
}
