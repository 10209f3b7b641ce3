use sqlx::PgPool;

use crate::db::models::{Case, CaseKind};

pub async fn create(
    pool: &PgPool,
    guild_id: i64,
    user_id: i64,
    moderator_id: i64,
    kind: CaseKind,
    reason: &str,
    duration_seconds: Option<i64>,
) -> Result<Case, sqlx::Error> {
    sqlx::query_as::<_, Case>(
        r#"
        INSERT INTO cases (guild_id, user_id, moderator_id, kind, reason, duration_seconds)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(guild_id)
    .bind(user_id)
    .bind(moderator_id)
    .bind(kind)
    .bind(reason)
    .bind(duration_seconds)
    .fetch_one(pool)
    .await
}

pub async fn list_for_user(
    pool: &PgPool,
    guild_id: i64,
    user_id: i64,
    limit: i64,
) -> Result<Vec<Case>, sqlx::Error> {
    sqlx::query_as::<_, Case>(
        r#"
        SELECT * FROM cases
        WHERE guild_id = $1 AND user_id = $2
        ORDER BY id DESC
        LIMIT $3
        "#,
    )
    .bind(guild_id)
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn count_for_user(
    pool: &PgPool,
    guild_id: i64,
    user_id: i64,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM cases WHERE guild_id = $1 AND user_id = $2",
    )
    .bind(guild_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}
