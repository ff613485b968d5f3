use serde::{Deserialize, Serialize};

/// Error body returned by the card API on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
}
