use serde::Serialize;

/// Envelope shared by every successful response.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { status: "success", message: None, count: None, data }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self { status: "success", message: Some(message.into()), count: None, data }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn list(data: Vec<T>) -> Self {
        Self { status: "success", message: None, count: Some(data.len()), data }
    }
}
