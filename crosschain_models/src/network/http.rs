use crate::error::{Error, ModelResult};
use error_stack::{ResultExt, report};
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Decodes a successful response body, or turns a non-2xx answer into
/// [`Error::HttpStatus`] carrying the status code and the raw body.
pub async fn handle_reqwest_response<T: DeserializeOwned>(response: Response) -> ModelResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.change_context(Error::ReqwestError(
            "Failed to get text from response".to_string(),
        ))?;

        debug!("Error Body ({}): {}", status.as_u16(), &body);

        return Err(report!(Error::HttpStatus {
            status: status.as_u16(),
            body,
        }));
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();

    let text = response.text().await.change_context(Error::ReqwestError(
        "Failed to get text from response".to_string(),
    ))?;

    // Json is the default content type
    if content_type.contains("application/json") || content_type.is_empty() {
        serde_json::from_str(&text)
            .change_context(Error::SerdeDeserialize(
                "Failed to deserialize JSON".to_string(),
            ))
            .attach_printable_lazy(|| format!("Body: {text}"))
    } else if content_type.contains("text/") {
        // Some providers answer JSON with a text content type
        serde_json::from_str(&text)
            .or_else(|_| serde_json::from_value(serde_json::Value::String(text.clone())))
            .change_context(Error::SerdeDeserialize(
                "Failed to deserialize text response".to_string(),
            ))
    } else {
        Err(report!(Error::ParseError)
            .attach_printable(format!("Unsupported Content-Type: {content_type}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, http::header, routing::get};
    use serde_json::Value;

    async fn spawn_server() -> String {
        let app = Router::new()
            .route(
                "/ok",
                get(|| async { ([(header::CONTENT_TYPE, "application/json")], r#"{"a":1}"#) }),
            )
            .route(
                "/text",
                get(|| async { ([(header::CONTENT_TYPE, "text/plain")], "pong") }),
            )
            .route(
                "/missing",
                get(|| async { (StatusCode::NOT_FOUND, r#"{"detail":"nope"}"#) }),
            )
            .route(
                "/broken",
                get(|| async { ([(header::CONTENT_TYPE, "application/json")], "{not json") }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_handle_json_response() {
        let base = spawn_server().await;
        let response = reqwest::get(format!("{base}/ok")).await.unwrap();
        let value: Value = handle_reqwest_response(response).await.unwrap();
        assert_eq!(value["a"], 1);
    }

    #[tokio::test]
    async fn test_handle_text_response() {
        let base = spawn_server().await;
        let response = reqwest::get(format!("{base}/text")).await.unwrap();
        let value: String = handle_reqwest_response(response).await.unwrap();
        assert_eq!(value, "pong");
    }

    #[tokio::test]
    async fn test_handle_error_status_keeps_code() {
        let base = spawn_server().await;
        let response = reqwest::get(format!("{base}/missing")).await.unwrap();
        let err = handle_reqwest_response::<Value>(response).await.unwrap_err();
        assert_eq!(err.current_context().status(), Some(404));
    }

    #[tokio::test]
    async fn test_handle_malformed_json() {
        let base = spawn_server().await;
        let response = reqwest::get(format!("{base}/broken")).await.unwrap();
        let err = handle_reqwest_response::<Value>(response).await.unwrap_err();
        assert!(matches!(
            err.current_context(),
            Error::SerdeDeserialize(_)
        ));
    }
}
