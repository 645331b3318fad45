use serde::{Deserialize, Serialize};

/// Body of both create and rename.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedCategoryResponse {
    pub id: i64,
    pub name: String,
}
