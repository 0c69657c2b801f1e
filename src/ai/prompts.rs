use crate::recipes::repo::{IngredientLine, Recipe};
use crate::users::repo::Substitution;

/// The JSON shape every recipe-producing prompt instructs the model to
/// answer with. Parsed back by `response::parse_generated_recipe`.
pub const RECIPE_JSON_FORMAT: &str = r#"{
  "title": "Recipe Title",
  "description": "Brief description of the recipe",
  "ingredients": [ "ingredient 1 (include quantity if applicable, e.g., '1 cup flour')", "ingredient 2 (e.g., '100g chocolate')" ],
  "equipment": [ "equipment item 1", "equipment item 2" ],
  "servings": "e.g. 1-2 people",
  "time": {
    "prep": "e.g. 10 minutes",
    "cook": "e.g. 15 minutes",
    "total": "e.g. 25 minutes"
  },
  "instructions": [
    "Step 1: Detailed description...",
    "Step 2: Detailed description..."
  ],
  "notes": "Optional: any extra notes or tips for the recipe."
}"#;

pub fn chat_prompt(message: &str) -> String {
    format!("Act as a smart cooking assistant. {message}")
}

pub fn recipe_from_ingredients_prompt(ingredients: &str) -> String {
    format!(
        "You are an AI chef assistant. The user has these ingredients available: {ingredients}\n\
         Suggest a single recipe they can cook.\n\
         Respond ONLY with a valid JSON object using the following format. \
         Ensure all fields are filled appropriately:\n{RECIPE_JSON_FORMAT}\n\
         Ensure the ingredients list in the JSON includes quantities where appropriate.\n\
         Make each instruction step clear, friendly, and detailed.\n\
         Respond ONLY in JSON. No markdown. No explanations before or after the JSON."
    )
}

pub fn modification_prompt(
    recipe: &Recipe,
    ingredients: &[IngredientLine],
    subs: &[Substitution],
    request: &str,
) -> String {
    let mut prompt = format!(
        "You are an AI chef assistant. The user wants to modify an existing recipe.\n\
         The original recipe is:\n\
         Title: {}\n\
         Description: {}\n\
         Current Ingredients: {}\n\
         Current Instructions: {}\n",
        recipe.title,
        recipe.description.as_deref().unwrap_or("No description provided."),
        format_ingredients(ingredients),
        format_instructions(recipe.instructions.as_ref()),
    );
    if let Some(servings) = &recipe.servings {
        prompt.push_str(&format!("Servings: {servings}\n"));
    }
    if let Some(prep) = recipe.prep_time_minutes {
        prompt.push_str(&format!("Prep Time: {prep} minutes\n"));
    }
    if let Some(cook) = recipe.cook_time_minutes {
        prompt.push_str(&format!("Cook Time: {cook} minutes\n"));
    }
    prompt.push_str(&format!(
        "\nUser's modification request: \"{request}\"\n\n\
         {} Please take these general preferences into account if applicable to the ingredients.\n\n\
         Based on this, provide a complete, modified recipe.\n\
         Respond ONLY with a valid JSON object using the following format. \
         Ensure all fields are filled appropriately:\n{RECIPE_JSON_FORMAT}\n\
         Ensure the ingredients list in the JSON includes quantities where appropriate.\n\
         Make each instruction step clear, friendly, and detailed.\n\
         Respond ONLY in JSON. No markdown. No explanations before or after the JSON.",
        format_substitutions(subs),
    ));
    prompt
}

fn format_ingredients(ingredients: &[IngredientLine]) -> String {
    if ingredients.is_empty() {
        return "No specific ingredients listed.".to_string();
    }
    ingredients
        .iter()
        .map(|line| match &line.quantity {
            Some(quantity) => format!("{} ({})", line.name, quantity),
            None => line.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_instructions(instructions: Option<&serde_json::Value>) -> String {
    let steps: Vec<&str> = match instructions {
        Some(serde_json::Value::Array(items)) => {
            items.iter().filter_map(|v| v.as_str()).collect()
        }
        Some(serde_json::Value::String(text)) if !text.trim().is_empty() => {
            return text.clone();
        }
        _ => Vec::new(),
    };
    if steps.is_empty() {
        "No instructions provided.".to_string()
    } else {
        steps.join(" ")
    }
}

fn format_substitutions(subs: &[Substitution]) -> String {
    if subs.is_empty() {
        return "User has no specific ingredient substitution preferences.".to_string();
    }
    let rules = subs
        .iter()
        .map(|s| {
            format!(
                "Prefers '{}' instead of '{}'",
                s.preferred_name, s.original_name
            )
        })
        .collect::<Vec<_>>()
        .join(". ");
    format!("User's ingredient preferences: {rules}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn recipe() -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            title: "Pancakes".into(),
            description: Some("Fluffy breakfast pancakes".into()),
            image_url: None,
            author_id: None,
            status: "approved".into(),
            ingredients: None,
            equipment: None,
            instructions: None,
            servings: Some("2 people".into()),
            prep_time_minutes: Some(10),
            cook_time_minutes: Some(15),
            total_time_minutes: Some(25),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn chat_prompt_prefixes_assistant_role() {
        let p = chat_prompt("how do I poach an egg?");
        assert!(p.starts_with("Act as a smart cooking assistant."));
        assert!(p.ends_with("how do I poach an egg?"));
    }

    #[test]
    fn ingredients_render_with_quantities() {
        let lines = vec![
            IngredientLine {
                name: "flour".into(),
                quantity: Some("2 cups".into()),
            },
            IngredientLine {
                name: "eggs".into(),
                quantity: None,
            },
        ];
        assert_eq!(format_ingredients(&lines), "flour (2 cups), eggs");
    }

    #[test]
    fn empty_ingredients_have_placeholder() {
        assert_eq!(format_ingredients(&[]), "No specific ingredients listed.");
    }

    #[test]
    fn modification_prompt_includes_recipe_and_request() {
        let mut original = recipe();
        original.instructions =
            Some(serde_json::json!(["Whisk the batter.", "Fry until golden."]));
        let p = modification_prompt(
            &original,
            &[IngredientLine {
                name: "flour".into(),
                quantity: Some("2 cups".into()),
            }],
            &[Substitution {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                original_name: "milk".into(),
                preferred_name: "oat milk".into(),
            }],
            "make it vegan",
        );
        assert!(p.contains("Title: Pancakes"));
        assert!(p.contains("flour (2 cups)"));
        assert!(p.contains("Current Instructions: Whisk the batter. Fry until golden."));
        assert!(p.contains("make it vegan"));
        assert!(p.contains("Prefers 'oat milk' instead of 'milk'"));
        assert!(p.contains("Prep Time: 10 minutes"));
        assert!(p.contains("Respond ONLY in JSON"));
    }

    #[test]
    fn modification_prompt_without_substitutions_says_so() {
        let p = modification_prompt(&recipe(), &[], &[], "less sugar");
        assert!(p.contains("No specific ingredients listed."));
        assert!(p.contains("Current Instructions: No instructions provided."));
        assert!(p.contains("no specific ingredient substitution preferences"));
    }
}
