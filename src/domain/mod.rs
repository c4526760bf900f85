pub mod error;
pub mod inflect;
pub mod schema;

pub use error::GenerateError;

/// An ordered field-name → value mapping. Built fresh per request, never
/// cached. Field order follows the endpoint schema (`serde_json` is compiled
/// with `preserve_order`).
pub type Record = serde_json::Map<String, serde_json::Value>;
