use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ResponseShape;
use crate::error::GatewayError;
use crate::state::AppState;
use crate::utils::text::truncate_chars;

/// Upper bound on the characters forwarded upstream per request.
const MAX_TEXT_CHARS: usize = 5000;

#[derive(Debug, Deserialize)]
struct TranslateParams {
    #[serde(default)]
    text: Option<String>,
    #[serde(default, rename = "targetLang")]
    target_lang: Option<String>,
}

/// Entry point for `/api/translate`, all methods.
///
/// Preflight short-circuits before anything else; every other request runs
/// the full pipeline and any failure is rendered as a JSON error envelope.
/// The CORS layer decorates whatever comes out of here.
pub async fn handle_translate(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        return preflight(&state, &headers);
    }

    let request_id = Uuid::new_v4();
    match translate_pipeline(&state, &method, &headers, &body, request_id).await {
        Ok(response) => response,
        Err(err) => {
            warn!("Request {} rejected: {}", request_id, err);
            err.into_response()
        }
    }
}

/// Preflight never reaches authentication. The strict variant refuses
/// origins outside the allow-list outright; the default answers 204 for
/// everyone and lets the echoed origin do the gating.
fn preflight(state: &AppState, headers: &HeaderMap) -> Response {
    let origin = headers.get(ORIGIN).and_then(|v| v.to_str().ok());

    if state.cors.reject_disallowed_preflight() && !state.cors.allows(origin) {
        return StatusCode::FORBIDDEN.into_response();
    }

    StatusCode::NO_CONTENT.into_response()
}

async fn translate_pipeline(
    state: &AppState,
    method: &Method,
    headers: &HeaderMap,
    body: &Bytes,
    request_id: Uuid,
) -> Result<Response, GatewayError> {
    // Auth first, unconditionally: an unauthenticated non-POST request gets
    // a 401, not a 400.
    let api_key = headers.get("x-api-key").and_then(|v| v.to_str().ok());
    if api_key != Some(state.secrets.api_auth_key.as_str()) {
        return Err(GatewayError::Auth);
    }

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if *method != Method::POST || !content_type.contains("application/json") {
        return Err(GatewayError::validation(
            "Invalid Request Method or Content-Type",
        ));
    }

    // A body that does not parse at all is a server-side 500, not a 400;
    // only parsed-but-incomplete payloads are the caller's fault.
    let params: TranslateParams = serde_json::from_slice(body)
        .map_err(|e| GatewayError::internal(format!("invalid JSON body: {}", e)))?;

    let (text, target_lang) = match (
        params.text.filter(|t| !t.is_empty()),
        params.target_lang.filter(|l| !l.is_empty()),
    ) {
        (Some(text), Some(lang)) => (text, lang),
        _ => {
            return Err(GatewayError::validation(
                "Required parameters 'text' or 'targetLang' are missing.",
            ))
        }
    };

    let safe_text = truncate_chars(&text, MAX_TEXT_CHARS);
    info!(
        "Request {}: translating {} chars into {}",
        request_id,
        safe_text.chars().count(),
        target_lang
    );

    let translated = state.translator.translate(safe_text, &target_lang).await?;

    // A success envelope with nothing usable degrades to echoing the
    // caller's original text instead of failing.
    let translated_text = translated.unwrap_or_else(|| text.clone());

    Ok(success_response(state.config.response_shape, &translated_text))
}

fn success_response(shape: ResponseShape, translated: &str) -> Response {
    let body = match shape {
        ResponseShape::Minimal => json!({ "translatedText": translated }),
        ResponseShape::Compat => json!({
            "translation": translated,
            "translatedText": translated,
            "translated": translated,
            "text": translated,
            "result": translated,
        }),
    };
    Json(body).into_response()
}
