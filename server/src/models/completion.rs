use serde::{Deserialize, Serialize};

/// Body of `POST /prompt`: the page as the extension serialized it.
#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    pub web_page: String,
}

#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub completion: String,
}
