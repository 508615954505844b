use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct JoinResponse {
    pub client_id: String,
    pub status: &'static str,
}

impl JoinResponse {
    pub fn joined(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            status: "joined",
        }
    }
}
