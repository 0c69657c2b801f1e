use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::recipes::ingredient::parse_ingredient_line;
use crate::recipes::query::{self, RecipeFilter, RECIPE_SUMMARY_COLUMNS};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub author_id: Option<Uuid>,
    pub status: String,
    /// Legacy raw lines kept only as a migration fallback; the
    /// recipe_ingredients table is the canonical store.
    pub ingredients: Option<serde_json::Value>,
    pub equipment: Option<serde_json::Value>,
    pub instructions: Option<serde_json::Value>,
    pub servings: Option<String>,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub total_time_minutes: Option<i32>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecipeSummary {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub author_id: Option<Uuid>,
    pub status: String,
    pub total_time_minutes: Option<i32>,
    pub created_at: OffsetDateTime,
}

/// One resolved ingredient of a recipe, whichever store it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct IngredientLine {
    pub name: String,
    pub quantity: Option<String>,
}

const RECIPE_COLUMNS: &str = "id, title, description, image_url, author_id, status, \
     ingredients, equipment, instructions, servings, prep_time_minutes, \
     cook_time_minutes, total_time_minutes, created_at";

pub struct NewRecipe<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub author_id: Uuid,
    pub ingredient_lines: &'a [String],
    pub equipment: &'a [String],
    pub instructions: &'a [String],
    pub servings: Option<&'a str>,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub total_time_minutes: Option<i32>,
    pub tags: &'a [String],
}

impl Recipe {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Recipe>> {
        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(recipe)
    }

    /// Creates a user-authored recipe in `pending` status, normalizing the
    /// submitted free-text ingredient lines into recipe_ingredients rows.
    pub async fn create(db: &PgPool, new: NewRecipe<'_>) -> anyhow::Result<Recipe> {
        let mut tx = db.begin().await?;

        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            r#"
            INSERT INTO recipes
                (title, description, image_url, author_id, status, equipment,
                 instructions, servings, prep_time_minutes, cook_time_minutes,
                 total_time_minutes)
            VALUES ($1, $2, $3, $4, 'pending', $5, $6, $7, $8, $9, $10)
            RETURNING {RECIPE_COLUMNS}
            "#
        ))
        .bind(new.title)
        .bind(new.description)
        .bind(new.image_url)
        .bind(new.author_id)
        .bind(serde_json::to_value(new.equipment)?)
        .bind(serde_json::to_value(new.instructions)?)
        .bind(new.servings)
        .bind(new.prep_time_minutes)
        .bind(new.cook_time_minutes)
        .bind(new.total_time_minutes)
        .fetch_one(&mut *tx)
        .await?;

        for (position, line) in new.ingredient_lines.iter().enumerate() {
            let parsed = parse_ingredient_line(line);
            let Some(name) = parsed.name else { continue };
            sqlx::query(
                "INSERT INTO recipe_ingredients (recipe_id, name, quantity, position) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(recipe.id)
            .bind(name)
            .bind(parsed.quantity)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        for tag in new.tags {
            sqlx::query(
                "INSERT INTO recipe_tags (recipe_id, tag) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(recipe.id)
            .bind(tag)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(recipe)
    }
}

/// Single read path for a recipe's ingredients: the normalized table is
/// canonical, the legacy JSON column on the row is consulted only when the
/// table has no rows for this recipe.
pub async fn ingredient_lines(db: &PgPool, recipe: &Recipe) -> anyhow::Result<Vec<IngredientLine>> {
    let rows = sqlx::query_as::<_, IngredientLine>(
        r#"
        SELECT name, quantity
        FROM recipe_ingredients
        WHERE recipe_id = $1
        ORDER BY position ASC
        "#,
    )
    .bind(recipe.id)
    .fetch_all(db)
    .await?;

    if !rows.is_empty() {
        return Ok(rows);
    }
    Ok(legacy_lines(recipe.ingredients.as_ref()))
}

/// Parses the deprecated JSON-on-row ingredient list (an array of raw
/// strings) into structured lines. Blank entries are dropped.
pub fn legacy_lines(value: Option<&serde_json::Value>) -> Vec<IngredientLine> {
    let Some(serde_json::Value::Array(entries)) = value else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| entry.as_str())
        .filter_map(|line| {
            let parsed = parse_ingredient_line(line);
            parsed.name.map(|name| IngredientLine {
                name,
                quantity: parsed.quantity,
            })
        })
        .collect()
}

pub async fn tags_for_recipe(db: &PgPool, recipe_id: Uuid) -> anyhow::Result<Vec<String>> {
    let tags = sqlx::query_scalar::<_, String>(
        "SELECT tag FROM recipe_tags WHERE recipe_id = $1 ORDER BY tag",
    )
    .bind(recipe_id)
    .fetch_all(db)
    .await?;
    Ok(tags)
}

pub async fn count_filtered(db: &PgPool, filter: &RecipeFilter) -> anyhow::Result<i64> {
    let total = query::count_query(filter)
        .build_query_scalar::<i64>()
        .fetch_one(db)
        .await?;
    Ok(total)
}

pub async fn list_filtered(
    db: &PgPool,
    filter: &RecipeFilter,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<RecipeSummary>> {
    let rows = query::data_query(filter, limit, offset)
        .build_query_as::<RecipeSummary>()
        .fetch_all(db)
        .await?;
    Ok(rows)
}

/// Unpaginated listing used by the plain /recipes endpoint.
pub async fn list_all(db: &PgPool, filter: &RecipeFilter) -> anyhow::Result<Vec<RecipeSummary>> {
    let mut qb = sqlx::QueryBuilder::new(format!(
        "SELECT {RECIPE_SUMMARY_COLUMNS} FROM recipes r WHERE 1=1"
    ));
    query::apply_filters(&mut qb, filter);
    qb.push(" ORDER BY r.created_at DESC, r.id DESC");
    let rows = qb.build_query_as::<RecipeSummary>().fetch_all(db).await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_lines_parses_raw_strings() {
        let value = json!(["2 cups flour", "1/2 tsp salt", "olive oil"]);
        let lines = legacy_lines(Some(&value));
        assert_eq!(
            lines,
            vec![
                IngredientLine {
                    name: "flour".into(),
                    quantity: Some("2 cups".into()),
                },
                IngredientLine {
                    name: "salt".into(),
                    quantity: Some("1/2 tsp".into()),
                },
                IngredientLine {
                    name: "olive oil".into(),
                    quantity: None,
                },
            ]
        );
    }

    #[test]
    fn legacy_lines_skips_blank_and_non_string_entries() {
        let value = json!(["", "   ", 42, "butter"]);
        let lines = legacy_lines(Some(&value));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "butter");
    }

    #[test]
    fn legacy_lines_tolerates_missing_or_malformed_column() {
        assert!(legacy_lines(None).is_empty());
        assert!(legacy_lines(Some(&json!("not an array"))).is_empty());
        assert!(legacy_lines(Some(&json!({}))).is_empty());
    }
}
