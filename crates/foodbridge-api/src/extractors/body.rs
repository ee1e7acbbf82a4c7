//! JSON body and query-string extractors whose rejections use the API
//! error body instead of axum's plain-text responses.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use foodbridge_core::error::AppError;

use crate::error::ApiError;

/// A deserialized JSON request body.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        axum::Json::<T>::from_request(req, state)
            .await
            .map(|axum::Json(value)| Self(value))
            .map_err(|rejection| json_error(&rejection).into())
    }
}

/// Deserialized query-string parameters.
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        axum::extract::Query::<T>::from_request_parts(parts, state)
            .await
            .map(|axum::extract::Query(value)| Self(value))
            .map_err(|rejection| query_error(&rejection).into())
    }
}

fn json_error(rejection: &JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonSyntaxError(_) => {
            AppError::validation(format!("Malformed JSON body: {}", rejection.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => {
            AppError::validation("Expected a request with Content-Type: application/json")
        }
        _ => AppError::validation(rejection.body_text()),
    }
}

fn query_error(rejection: &QueryRejection) -> AppError {
    AppError::validation(format!("Invalid query string: {}", rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use foodbridge_core::error::ErrorKind;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        quantity: f64,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_json_body_accepts_valid_payload() {
        let JsonBody(payload) =
            JsonBody::<Payload>::from_request(json_request(r#"{"quantity": 2}"#), &())
                .await
                .unwrap();
        assert_eq!(payload.quantity, 2.0);
    }

    #[tokio::test]
    async fn test_wrong_type_is_validation_error() {
        let err = JsonBody::<Payload>::from_request(json_request(r#"{"quantity": "five"}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.inner().kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let err = JsonBody::<Payload>::from_request(json_request("{\"quantity\": "), &())
            .await
            .unwrap_err();
        assert_eq!(err.inner().kind, ErrorKind::Validation);
        assert!(err.inner().message.starts_with("Malformed JSON body"));
    }

    #[tokio::test]
    async fn test_bad_query_is_validation_error() {
        let req = Request::builder()
            .uri("/?quantity=lots")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = req.into_parts();
        let err = QueryParams::<Payload>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.inner().kind, ErrorKind::Validation);
    }
}
