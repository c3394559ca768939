use thiserror::Error;

/// Transport-level failure of one poll attempt.
///
/// Every variant is caught inside the owning stream's apply-cycle and
/// recorded in that stream's status as display text; nothing here crosses
/// the apply boundary. A backend answer of `success: false` or a missing
/// `data` payload is not an error at all; the fetch resolves to "no
/// update" instead.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("parse error: {0}")]
    Parse(String),
}
