//! Error classification shared by every layer.

use serde::Serialize;

/// Coarse category of a failure, independent of the crate that raised it.
///
/// The HTTP layer turns these into status codes through a single lookup
/// table, so the internal kinds stay distinguishable whatever that table says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or out-of-range input fields.
    Validation,
    /// A uniqueness rule would be violated.
    Conflict,
    /// The referenced entity does not exist.
    NotFound,
    /// No notification sender accepts the address.
    NoSender,
    /// A request parameter was missing or unparseable before reaching the domain.
    BadRequest,
    /// The requested route does not exist.
    RouteNotFound,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::Validation,
        ErrorKind::Conflict,
        ErrorKind::NotFound,
        ErrorKind::NoSender,
        ErrorKind::BadRequest,
        ErrorKind::RouteNotFound,
        ErrorKind::Internal,
    ];
}
