use sqlx::PgPool;
use uuid::Uuid;

/// Appends one row to the append-only interaction audit trail. Rows are
/// never updated or deleted.
pub async fn log_interaction(
    db: &PgPool,
    user_id: Option<Uuid>,
    query: &str,
    response: &str,
    interaction_type: &str,
    feedback: Option<&str>,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO ai_interactions (user_id, query, response, interaction_type, feedback)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(user_id)
    .bind(query)
    .bind(response)
    .bind(interaction_type)
    .bind(feedback)
    .execute(db)
    .await?;
    Ok(())
}
