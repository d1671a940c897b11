/// Errors returned by the store client
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP transport or connection error
    #[error("store request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Store returned a non-success status
    #[error("store API error ({status}): {message}")]
    Api {
        /// HTTP status from the store
        status: u16,
        /// Error message from the response body
        message: String,
    },
}
