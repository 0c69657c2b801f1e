use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// POST /chat/recipe body: free-text ingredient description.
#[derive(Debug, Deserialize)]
pub struct RecipeChatRequest {
    pub ingredients: String,
}

#[derive(Debug, Deserialize)]
pub struct ModifyRecipeRequest {
    pub modification_prompt: String,
}

/// The fixed schema the model is instructed to answer with. Lenient on
/// everything except the title so minor schema drift does not turn a
/// usable answer into a format error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedRecipe {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub servings: Option<String>,
    #[serde(default)]
    pub time: Option<RecipeTime>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeTime {
    #[serde(default)]
    pub prep: Option<String>,
    #[serde(default)]
    pub cook: Option<String>,
    #[serde(default)]
    pub total: Option<String>,
}
