use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

/// A user's saved ingredient preference: whenever `original_name` shows up
/// in a generated shopping list or an AI prompt, `preferred_name` is used
/// instead. Stored recipes are never rewritten.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Substitution {
    pub id: Uuid,
    pub user_id: Uuid,
    pub original_name: String,
    pub preferred_name: String,
}

/// Case-insensitive exact match on the original name; unknown names pass
/// through unchanged.
pub fn resolve<'a>(subs: &'a [Substitution], name: &'a str) -> &'a str {
    subs.iter()
        .find(|s| s.original_name.eq_ignore_ascii_case(name))
        .map(|s| s.preferred_name.as_str())
        .unwrap_or(name)
}

impl Substitution {
    pub async fn list_for_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Substitution>> {
        let rows = sqlx::query_as::<_, Substitution>(
            r#"
            SELECT id, user_id, original_name, preferred_name
            FROM user_ingredient_substitutions
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        original_name: &str,
        preferred_name: &str,
    ) -> anyhow::Result<Substitution> {
        let row = sqlx::query_as::<_, Substitution>(
            r#"
            INSERT INTO user_ingredient_substitutions (user_id, original_name, preferred_name)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, original_name, preferred_name
            "#,
        )
        .bind(user_id)
        .bind(original_name)
        .bind(preferred_name)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// Returns false when the row is absent or owned by someone else.
    pub async fn delete_owned(db: &PgPool, id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(DELETE_OWNED_SUBSTITUTION_SQL)
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

const DELETE_OWNED_SUBSTITUTION_SQL: &str =
    "DELETE FROM user_ingredient_substitutions WHERE id = $1 AND user_id = $2";

pub struct PreferenceSets {
    pub preferences: Vec<String>,
    pub allergies: Vec<String>,
    pub intolerances: Vec<String>,
}

pub async fn fetch_preference_sets(db: &PgPool, user_id: Uuid) -> anyhow::Result<PreferenceSets> {
    let preferences = sqlx::query_scalar::<_, String>(
        "SELECT preference FROM user_dietary_preferences WHERE user_id = $1 ORDER BY preference",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    let allergies = sqlx::query_scalar::<_, String>(
        "SELECT allergy FROM user_allergies WHERE user_id = $1 ORDER BY allergy",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    let intolerances = sqlx::query_scalar::<_, String>(
        "SELECT food FROM user_food_intolerances WHERE user_id = $1 ORDER BY food",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    Ok(PreferenceSets {
        preferences,
        allergies,
        intolerances,
    })
}

/// Full replace of the three preference sets. Runs inside the caller's
/// transaction so a failed insert leaves the previous sets intact.
pub async fn replace_preference_sets(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    sets: &PreferenceSets,
) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM user_dietary_preferences WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut **tx)
        .await?;
    sqlx::query("DELETE FROM user_allergies WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut **tx)
        .await?;
    sqlx::query("DELETE FROM user_food_intolerances WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut **tx)
        .await?;

    for preference in &sets.preferences {
        sqlx::query(
            "INSERT INTO user_dietary_preferences (user_id, preference) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(preference)
        .execute(&mut **tx)
        .await?;
    }
    for allergy in &sets.allergies {
        sqlx::query(
            "INSERT INTO user_allergies (user_id, allergy) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(allergy)
        .execute(&mut **tx)
        .await?;
    }
    for food in &sets.intolerances {
        sqlx::query(
            "INSERT INTO user_food_intolerances (user_id, food) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(food)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(original: &str, preferred: &str) -> Substitution {
        Substitution {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            original_name: original.into(),
            preferred_name: preferred.into(),
        }
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let subs = vec![sub("Butter", "margarine")];
        assert_eq!(resolve(&subs, "butter"), "margarine");
        assert_eq!(resolve(&subs, "BUTTER"), "margarine");
    }

    #[test]
    fn resolve_requires_exact_match() {
        let subs = vec![sub("milk", "oat milk")];
        assert_eq!(resolve(&subs, "whole milk"), "whole milk");
        assert_eq!(resolve(&subs, "milk"), "oat milk");
    }

    #[test]
    fn resolve_passes_through_unknown_names() {
        let subs: Vec<Substitution> = vec![];
        assert_eq!(resolve(&subs, "flour"), "flour");
    }

    #[test]
    fn substitution_delete_is_scoped_to_the_owner() {
        assert!(DELETE_OWNED_SUBSTITUTION_SQL.contains("id = $1"));
        assert!(DELETE_OWNED_SUBSTITUTION_SQL.contains("AND user_id = $2"));
    }

    #[test]
    fn resolve_uses_first_matching_rule() {
        let subs = vec![sub("eggs", "flax eggs"), sub("Eggs", "chia eggs")];
        assert_eq!(resolve(&subs, "eggs"), "flax eggs");
    }
}
