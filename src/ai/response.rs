use crate::ai::dto::GeneratedRecipe;

/// Unwraps a Markdown code fence the model sometimes adds despite the
/// prompt asking for bare JSON.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim()
}

pub fn parse_generated_recipe(raw: &str) -> Result<GeneratedRecipe, serde_json::Error> {
    serde_json::from_str(strip_code_fences(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPE_JSON: &str = r#"{
        "title": "Tomato Soup",
        "description": "Simple soup",
        "ingredients": ["4 tomatoes", "1 cup stock"],
        "equipment": ["pot"],
        "servings": "2 people",
        "time": {"prep": "5 minutes", "cook": "20 minutes", "total": "25 minutes"},
        "instructions": ["Chop tomatoes.", "Simmer in stock."],
        "notes": "Season to taste."
    }"#;

    #[test]
    fn parses_bare_json() {
        let recipe = parse_generated_recipe(RECIPE_JSON).unwrap();
        assert_eq!(recipe.title, "Tomato Soup");
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(
            recipe.time.unwrap().total.as_deref(),
            Some("25 minutes")
        );
    }

    #[test]
    fn strips_json_fence() {
        let wrapped = format!("```json\n{RECIPE_JSON}\n```");
        let recipe = parse_generated_recipe(&wrapped).unwrap();
        assert_eq!(recipe.title, "Tomato Soup");
    }

    #[test]
    fn strips_plain_fence() {
        let wrapped = format!("```\n{RECIPE_JSON}\n```");
        assert!(parse_generated_recipe(&wrapped).is_ok());
    }

    #[test]
    fn missing_optional_fields_default() {
        let recipe = parse_generated_recipe(r#"{"title": "Toast"}"#).unwrap();
        assert_eq!(recipe.title, "Toast");
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.time.is_none());
        assert!(recipe.notes.is_none());
    }

    #[test]
    fn prose_is_a_format_error() {
        assert!(parse_generated_recipe("Sure! Here's a recipe you might like...").is_err());
    }

    #[test]
    fn fence_only_noise_is_removed() {
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  {}  "), "{}");
    }
}
