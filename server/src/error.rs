use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use error_stack::{AttachmentKind, FrameKind, Report};
use kernel::KernelError;

use crate::response::ErrorResponse;

/// Startup failure returned from `main`; its `Debug` output is the full report.
#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl ErrorStatus {
    fn status(&self) -> StatusCode {
        match self.0.current_context() {
            KernelError::Validation => StatusCode::BAD_REQUEST,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text of the most recent printable attachment, if any.
    fn message(&self) -> Option<String> {
        self.0.frames().find_map(|frame| match frame.kind() {
            FrameKind::Attachment(AttachmentKind::Printable(printable)) => {
                Some(printable.to_string())
            }
            _ => None,
        })
    }
}

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.0.current_context() {
            KernelError::Validation => {
                let message = self.message().unwrap_or_else(|| "Invalid input".to_string());
                ErrorResponse::new(status, message).into_response()
            }
            KernelError::Timeout | KernelError::Internal => {
                tracing::error!("{:?}", self.0);
                ErrorResponse::new(status, "Internal error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use error_stack::Report;
    use kernel::KernelError;

    use super::ErrorStatus;

    #[test]
    fn status_follows_context() {
        let status = |context: KernelError| ErrorStatus::from(Report::new(context)).status();
        assert_eq!(status(KernelError::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(status(KernelError::Timeout), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(status(KernelError::Internal), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn message_is_latest_attachment() {
        let report = Report::new(KernelError::Validation)
            .attach_printable("first")
            .attach_printable("second");
        assert_eq!(ErrorStatus::from(report).message().as_deref(), Some("second"));
        assert!(ErrorStatus::from(Report::new(KernelError::Internal))
            .message()
            .is_none());
    }
}
