use sqlx::PgPool;

use crate::db::models::MuteRecord;

/// Mark a member as muted. Re-muting refreshes the timestamp instead of
/// duplicating the row.
pub async fn upsert(
    pool: &PgPool,
    guild_id: i64,
    user_id: i64,
) -> Result<MuteRecord, sqlx::Error> {
    sqlx::query_as::<_, MuteRecord>(
        r#"
        INSERT INTO mutes (guild_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (guild_id, user_id) DO UPDATE SET muted_at = NOW()
        RETURNING *
        "#,
    )
    .bind(guild_id)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Returns true if a record existed and was removed.
pub async fn remove(
    pool: &PgPool,
    guild_id: i64,
    user_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM mutes WHERE guild_id = $1 AND user_id = $2")
        .bind(guild_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn is_muted(
    pool: &PgPool,
    guild_id: i64,
    user_id: i64,
) -> Result<bool, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM mutes WHERE guild_id = $1 AND user_id = $2",
    )
    .bind(guild_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0 > 0)
}
