use std::collections::HashSet;

use uuid::Uuid;

use crate::users::repo::{resolve, Substitution};

pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// An ingredient pulled from one of the requested recipes, before
/// substitution and deduplication.
#[derive(Debug, Clone)]
pub struct SourcedIngredient {
    pub name: String,
    pub quantity: Option<String>,
    pub source_recipe_id: Uuid,
}

/// A shopping list entry ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewListItem {
    pub name: String,
    pub quantity: Option<String>,
    pub category: String,
    pub source_recipe_id: Uuid,
}

/// Applies the user's substitutions and collapses duplicates by the
/// resulting name. The first occurrence wins for quantity, category and
/// source recipe; blank names are dropped.
pub fn build_list_items(
    ingredients: Vec<SourcedIngredient>,
    subs: &[Substitution],
) -> Vec<NewListItem> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut items = Vec::new();

    for ingredient in ingredients {
        let name = ingredient.name.trim();
        if name.is_empty() {
            continue;
        }
        let resolved = resolve(subs, name).to_string();
        if !seen.insert(resolved.clone()) {
            continue;
        }
        items.push(NewListItem {
            name: resolved,
            quantity: ingredient.quantity,
            category: DEFAULT_CATEGORY.to_string(),
            source_recipe_id: ingredient.source_recipe_id,
        });
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, quantity: Option<&str>, recipe: Uuid) -> SourcedIngredient {
        SourcedIngredient {
            name: name.into(),
            quantity: quantity.map(Into::into),
            source_recipe_id: recipe,
        }
    }

    fn sub(original: &str, preferred: &str) -> Substitution {
        Substitution {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            original_name: original.into(),
            preferred_name: preferred.into(),
        }
    }

    #[test]
    fn item_count_equals_distinct_post_substitution_names() {
        let r1 = Uuid::new_v4();
        let r2 = Uuid::new_v4();
        let subs = vec![sub("butter", "margarine")];
        let items = build_list_items(
            vec![
                ingredient("flour", Some("2 cups"), r1),
                ingredient("butter", Some("100 g"), r1),
                ingredient("margarine", None, r2),
                ingredient("flour", Some("1 cup"), r2),
            ],
            &subs,
        );
        // butter resolves to margarine and collapses with the literal one;
        // the two flours collapse too.
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "flour");
        assert_eq!(items[1].name, "margarine");
    }

    #[test]
    fn first_occurrence_wins() {
        let r1 = Uuid::new_v4();
        let r2 = Uuid::new_v4();
        let items = build_list_items(
            vec![
                ingredient("sugar", Some("1 cup"), r1),
                ingredient("sugar", Some("3 cups"), r2),
            ],
            &[],
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity.as_deref(), Some("1 cup"));
        assert_eq!(items[0].source_recipe_id, r1);
    }

    #[test]
    fn blank_names_are_dropped() {
        let items = build_list_items(
            vec![
                ingredient("  ", None, Uuid::new_v4()),
                ingredient("", None, Uuid::new_v4()),
            ],
            &[],
        );
        assert!(items.is_empty());
    }

    #[test]
    fn substitution_applies_before_dedup() {
        let r = Uuid::new_v4();
        let subs = vec![sub("Milk", "oat milk")];
        let items = build_list_items(
            vec![
                ingredient("milk", Some("1 l"), r),
                ingredient("oat milk", Some("2 l"), r),
            ],
            &subs,
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "oat milk");
        assert_eq!(items[0].quantity.as_deref(), Some("1 l"));
    }

    #[test]
    fn category_defaults_to_uncategorized() {
        let items = build_list_items(vec![ingredient("rice", None, Uuid::new_v4())], &[]);
        assert_eq!(items[0].category, DEFAULT_CATEGORY);
    }
}
