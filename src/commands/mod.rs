//! Backend Command Wrappers
//!
//! HTTP bindings to the backend endpoints, organized by domain.

mod favorite;
mod rank;

use serde::Deserialize;

use crate::config::ApiConfig;
use crate::error::ApiError;

const UNAUTHORIZED_FALLBACK: &str = "Unauthorized User";

/// Status and body of a finished request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends JSON bodies to the backend
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_json(&self, url: &str, body: String) -> Result<RawResponse, ApiError>;
}

/// `fetch` through gloo-net; same-origin cookies carry the login session
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpTransport;

impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<RawResponse, ApiError> {
        let response = gloo_net::http::Request::post(url)
            .header("content-type", "application/json")
            .body(body)?
            .send()
            .await?;
        let status = response.status();
        // The reply body is informational only
        let body = response.text().await.unwrap_or_default();
        Ok(RawResponse { status, body })
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient<T = HttpTransport> {
    config: ApiConfig,
    transport: T,
}

impl ApiClient<HttpTransport> {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_transport(config, HttpTransport)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    async fn post<B: serde::Serialize + ?Sized>(&self, url: String, body: &B) -> Result<(), ApiError> {
        let payload = serde_json::to_string(body)?;
        tracing::debug!(target: "api", %url, %payload, "POST");
        let response = self.transport.post_json(&url, payload).await?;
        interpret_response(&response)
    }
}

/// Server replies with `{"message": ...}` or `{"error": ...}`
#[derive(Debug, Default, Deserialize)]
struct ServerReply {
    message: Option<String>,
    error: Option<String>,
}

pub fn interpret_response(response: &RawResponse) -> Result<(), ApiError> {
    let reply: ServerReply = serde_json::from_str(&response.body).unwrap_or_default();
    match response.status {
        200..=299 => match reply.error {
            Some(message) => Err(ApiError::Status { status: response.status, message }),
            None => Ok(()),
        },
        401 => Err(ApiError::Unauthorized(
            reply.error.unwrap_or_else(|| UNAUTHORIZED_FALLBACK.to_string()),
        )),
        status => Err(ApiError::Status {
            status,
            message: reply
                .error
                .or(reply.message)
                .unwrap_or_else(|| response.body.trim().to_string()),
        }),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse { status, body: body.to_string() }
    }

    #[test]
    fn test_success_reply() {
        assert_eq!(interpret_response(&response(200, r#"{"message":"success"}"#)), Ok(()));
        assert_eq!(interpret_response(&response(204, "")), Ok(()));
    }

    #[test]
    fn test_unauthorized_reply() {
        let err = interpret_response(&response(401, r#"{"error":"Unauthorized User"}"#)).unwrap_err();
        assert_eq!(err, ApiError::Unauthorized("Unauthorized User".to_string()));

        let err = interpret_response(&response(401, "<html>nope</html>")).unwrap_err();
        assert_eq!(err, ApiError::Unauthorized("Unauthorized User".to_string()));
    }

    #[test]
    fn test_error_in_success_body_is_a_failure() {
        let err = interpret_response(&response(200, r#"{"error":"bad rank"}"#)).unwrap_err();
        assert_eq!(err, ApiError::Status { status: 200, message: "bad rank".to_string() });
    }

    #[test]
    fn test_other_status_keeps_plain_body() {
        let err = interpret_response(&response(500, "Internal Server Error\n")).unwrap_err();
        assert_eq!(
            err,
            ApiError::Status { status: 500, message: "Internal Server Error".to_string() }
        );
    }
}
