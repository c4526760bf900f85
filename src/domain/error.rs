use thiserror::Error;

/// Errors a generation call can surface to its caller.
///
/// These are expected conditions, returned as values rather than propagated
/// as panics or opaque errors. The HTTP adapter maps them to status codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The requested endpoint has no schema.
    #[error("unknown endpoint '{0}'")]
    UnknownEndpoint(String),

    /// The endpoint requires authentication and the request carried none.
    #[error("Unauthorized.")]
    Unauthorized,

    /// Relationship expansion re-entered an endpoint already being expanded.
    #[error("relationship cycle detected while expanding '{0}'")]
    RelationshipCycle(String),
}
