use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub is_purchased: bool,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(alias = "recipeIds")]
    pub recipe_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub message: String,
    pub item_count: usize,
}
