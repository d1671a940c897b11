use axum::body::Body;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::json;

/// Extractor for JSON request bodies
///
/// Rejections use the same `{success:false, error}` envelope as relay
/// failures so clients parse one error shape everywhere.
pub struct ExtractJson<T>(pub T);

/// Body limit for relay requests (4 MiB)
const BODY_LIMIT_BYTES: usize = 4 << 20;

static APPLICATION_JSON: http::HeaderValue = http::HeaderValue::from_static("application/json");

fn reject(status: StatusCode, error: String) -> Response {
    (status, Json(json!({ "success": false, "error": error }))).into_response()
}

impl<S, T: DeserializeOwned> axum::extract::FromRequest<S> for ExtractJson<T>
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        if parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .is_none_or(|value| value != APPLICATION_JSON)
        {
            return Err(reject(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported Content-Type, expected: 'Content-Type: application/json'".to_owned(),
            ));
        }

        let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES).await.map_err(|err| {
            if std::error::Error::source(&err).is_some_and(|source| source.is::<http_body_util::LengthLimitError>())
            {
                reject(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    format!("Request body is too large, limit is {BODY_LIMIT_BYTES} bytes"),
                )
            } else {
                reject(StatusCode::BAD_REQUEST, format!("Failed to read request body: {err}"))
            }
        })?;

        match serde_json::from_slice::<T>(&bytes) {
            Ok(body) => Ok(Self(body)),
            Err(e) => Err(reject(
                StatusCode::BAD_REQUEST,
                format!("Failed to parse request body: {e}"),
            )),
        }
    }
}
