use reqwest::blocking::Response;
use thiserror::Error;

/// Errors raised by the HTTP adapters.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request could not be sent or the body could not be decoded.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("request failed ({status}): {body}")]
    Status { status: u16, body: String },

    /// The channel id is unknown to the catalog.
    #[error("channel not found: {0}")]
    ChannelNotFound(String),

    /// The client was configured with an unusable value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RemoteError>;

/// Passes success responses through and turns any other status into
/// [`RemoteError::Status`].
pub(crate) fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp
        .text()
        .unwrap_or_else(|_| "<body unavailable>".to_string());
    Err(RemoteError::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = RemoteError::Status {
            status: 403,
            body: "quotaExceeded".into(),
        };
        assert_eq!(err.to_string(), "request failed (403): quotaExceeded");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RemoteError>();
    }
}
