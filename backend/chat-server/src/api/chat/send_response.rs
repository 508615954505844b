use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub status: &'static str,
}

impl SendResponse {
    pub fn sent() -> Self {
        Self { status: "sent" }
    }
}
