//! HTTP → ProviderError classification

use arena_application::ProviderError;
use arena_domain::truncate;

/// Response bodies are clipped to this many characters inside errors
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Classify a non-success HTTP status and its body.
///
/// 401/403 are authentication failures, 429 is a quota problem when the body
/// mentions quota or billing and a rate limit otherwise, 503/529 mean the
/// vendor is overloaded. Everything else keeps its raw status.
pub fn classify_status(code: u16, body: &str) -> ProviderError {
    let body = truncate(body.trim(), MAX_ERROR_BODY_CHARS);
    match code {
        401 | 403 => ProviderError::Authentication(body),
        429 => {
            let lower = body.to_lowercase();
            if lower.contains("quota") || lower.contains("billing") {
                ProviderError::QuotaExceeded(body)
            } else {
                ProviderError::RateLimited(body)
            }
        }
        503 | 529 => ProviderError::Overloaded(body),
        _ => ProviderError::Status { code, body },
    }
}

/// Map a `reqwest` failure that happened before a status was available.
pub fn transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_decode() {
        ProviderError::Decode(err.to_string())
    } else {
        ProviderError::Transport(err.to_string())
    }
}

/// Turn a non-success response into a classified error.
pub(crate) async fn status_error(response: reqwest::Response) -> ProviderError {
    let code = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    classify_status(code, &body)
}
