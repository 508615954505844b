use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LeaveResponse {
    pub client_id: String,
    pub status: &'static str,
}

impl LeaveResponse {
    pub fn left(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            status: "left",
        }
    }
}
