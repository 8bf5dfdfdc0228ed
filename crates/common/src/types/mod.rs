use serde::Serialize;

/// Health probe payload.
#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// One-line confirmation payload for mutating endpoints.
#[derive(Debug, Serialize)]
pub struct Message {
    pub msg: String,
}
