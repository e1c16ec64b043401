//! Response construction for the token endpoint.
//!
//! Rejections carry no body: header, origin and rate-limit failures are only
//! distinguishable by status code, and never echo anything from the request.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::security::headers::apply_no_store;
use crate::security::LicenseSecret;

/// Disclosure payload: exactly one field.
#[derive(Serialize)]
pub struct TokenResponse<'a> {
    pub token: &'a str,
}

/// 200 with `{"token": "..."}` and the no-store header set.
pub fn token_response(secret: &LicenseSecret) -> Response {
    let mut response = Json(TokenResponse {
        token: secret.expose(),
    })
    .into_response();
    apply_no_store(response.headers_mut());
    response
}

/// Bare status response for a rejected request.
pub fn rejection_response(status: StatusCode) -> Response {
    status.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA, VARY};
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_token_response_shape() {
        let secret = LicenseSecret::new("T1").unwrap();
        let response = token_response(&secret);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
        assert_eq!(response.headers()[PRAGMA], "no-cache");
        assert_eq!(response.headers()[VARY], "Origin");
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"token":"T1"}"#);
    }

    #[tokio::test]
    async fn test_rejection_has_empty_body() {
        let response = rejection_response(StatusCode::FORBIDDEN);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }
}
