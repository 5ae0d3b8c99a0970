use axum::extract::{Request, State};
use axum::http::header::{HeaderValue, ORIGIN};
use axum::middleware::Next;
use axum::response::Response;

use crate::config::CorsConfig;
use crate::state::AppState;

/// Fixed allow-list of browser origins plus the fallback echoed for
/// everyone else. Browsers can only read our responses (including error
/// envelopes) when these headers are present, so the policy is applied to
/// every response the gateway produces.
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
    default_origin: String,
    reject_disallowed_preflight: bool,
}

impl CorsPolicy {
    pub fn new(config: &CorsConfig) -> Self {
        Self {
            allowed_origins: config.allowed_origins.clone(),
            default_origin: config.default_origin.clone(),
            reject_disallowed_preflight: config.reject_disallowed_preflight,
        }
    }

    /// The origin to echo in `Access-Control-Allow-Origin`: the request's
    /// own origin when allow-listed, the configured default otherwise.
    pub fn resolve<'a>(&'a self, origin: Option<&'a str>) -> &'a str {
        match origin {
            Some(o) if self.allows(Some(o)) => o,
            _ => &self.default_origin,
        }
    }

    pub fn allows(&self, origin: Option<&str>) -> bool {
        origin.is_some_and(|o| self.allowed_origins.iter().any(|allowed| allowed == o))
    }

    pub fn reject_disallowed_preflight(&self) -> bool {
        self.reject_disallowed_preflight
    }
}

/// Middleware attaching the CORS headers to every outgoing response.
pub async fn apply_cors(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let origin = request
        .headers()
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let mut response = next.run(request).await;

    let allow_origin = state.cors.resolve(origin.as_deref()).to_string();
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&allow_origin) {
        headers.insert("access-control-allow-origin", value);
    }
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static("Content-Type, x-api-key"),
    );
    headers.insert(
        "access-control-max-age",
        HeaderValue::from_static("86400"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> CorsPolicy {
        CorsPolicy::new(&CorsConfig {
            allowed_origins: vec![
                "https://app.example".to_string(),
                "http://localhost:8080".to_string(),
            ],
            default_origin: "https://app.example".to_string(),
            reject_disallowed_preflight: false,
        })
    }

    #[test]
    fn allow_listed_origin_is_echoed() {
        let policy = policy();
        assert_eq!(
            policy.resolve(Some("http://localhost:8080")),
            "http://localhost:8080"
        );
    }

    #[test]
    fn unknown_origin_falls_back_to_default() {
        let policy = policy();
        assert_eq!(policy.resolve(Some("https://evil.example")), "https://app.example");
    }

    #[test]
    fn missing_origin_falls_back_to_default() {
        let policy = policy();
        assert_eq!(policy.resolve(None), "https://app.example");
    }

    #[test]
    fn allows_is_exact_match_only() {
        let policy = policy();
        assert!(policy.allows(Some("https://app.example")));
        assert!(!policy.allows(Some("https://app.example/")));
        assert!(!policy.allows(Some("https://app.example.evil")));
        assert!(!policy.allows(None));
    }
}
