use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub last_name: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub current_weight: Option<f64>,
    pub goal_weight: Option<f64>,
    pub activity_level: Option<String>,
    pub calorie_goal: Option<i32>,
    pub is_premium: bool,
    pub created_at: OffsetDateTime,
}

const USER_COLUMNS: &str = "id, name, last_name, email, password_hash, age, height_cm, \
     current_weight, goal_weight, activity_level, calorie_goal, is_premium, created_at";

pub struct NewUser<'a> {
    pub name: &'a str,
    pub last_name: Option<&'a str>,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub weight: Option<f64>,
    pub activity_level: Option<&'a str>,
}

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user. Goal weight starts at the current weight; the
    /// calorie goal stays null until the questionnaire fills it in.
    pub async fn create(db: &PgPool, new: NewUser<'_>) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users
                (name, last_name, email, password_hash, age, height_cm,
                 current_weight, goal_weight, activity_level)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7, $8)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(new.name)
        .bind(new.last_name)
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.age)
        .bind(new.height_cm)
        .bind(new.weight)
        .bind(new.activity_level)
        .fetch_one(db)
        .await?;
        Ok(user)
    }
}
