use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::shopping::generator::NewListItem;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShoppingListItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub quantity: Option<String>,
    pub category: String,
    pub source_recipe_id: Option<Uuid>,
    pub is_purchased: bool,
    pub created_at: OffsetDateTime,
}

const ITEM_COLUMNS: &str =
    "id, user_id, name, quantity, category, source_recipe_id, is_purchased, created_at";

impl ShoppingListItem {
    pub async fn list_for_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<ShoppingListItem>> {
        let rows = sqlx::query_as::<_, ShoppingListItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM shopping_list_items \
             WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Returns false when the item is absent or owned by someone else.
    pub async fn set_purchased(
        db: &PgPool,
        id: Uuid,
        user_id: Uuid,
        is_purchased: bool,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE shopping_list_items SET is_purchased = $1 WHERE id = $2 AND user_id = $3",
        )
        .bind(is_purchased)
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_owned(db: &PgPool, id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let result =
            sqlx::query("DELETE FROM shopping_list_items WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(db)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Atomically replaces the user's whole list: delete-all then insert,
/// inside one transaction. A failure mid-insert rolls back and leaves the
/// previous list untouched. An empty `items` still clears the list.
pub async fn replace_for_user(
    db: &PgPool,
    user_id: Uuid,
    items: &[NewListItem],
) -> anyhow::Result<usize> {
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM shopping_list_items WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    for item in items {
        sqlx::query(
            "INSERT INTO shopping_list_items \
             (user_id, name, quantity, category, source_recipe_id) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user_id)
        .bind(&item.name)
        .bind(&item.quantity)
        .bind(&item.category)
        .bind(item.source_recipe_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(items.len())
}
