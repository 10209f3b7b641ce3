use sqlx::PgPool;

use crate::db::models::{ExpiryKind, PendingExpiry};

/// Schedule a reversal. Scheduling the same (kind, guild, user) again
/// replaces the due time and resets the retry counter - the latest due time
/// wins and at most one reversal can ever be pending per target.
pub async fn upsert(
    pool: &PgPool,
    task_kind: ExpiryKind,
    guild_id: i64,
    user_id: i64,
    duration_seconds: i64,
) -> Result<PendingExpiry, sqlx::Error> {
    sqlx::query_as::<_, PendingExpiry>(
        r#"
        INSERT INTO pending_expiries (task_kind, guild_id, user_id, due_at)
        VALUES ($1, $2, $3, NOW() + $4 * INTERVAL '1 second')
        ON CONFLICT (task_kind, guild_id, user_id)
        DO UPDATE SET due_at = EXCLUDED.due_at, attempts = 0
        RETURNING *
        "#,
    )
    .bind(task_kind)
    .bind(guild_id)
    .bind(user_id)
    .bind(duration_seconds)
    .fetch_one(pool)
    .await
}

/// Cancel a pending reversal. Returns true if a row existed.
pub async fn remove(
    pool: &PgPool,
    task_kind: ExpiryKind,
    guild_id: i64,
    user_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM pending_expiries
        WHERE task_kind = $1 AND guild_id = $2 AND user_id = $3
        "#,
    )
    .bind(task_kind)
    .bind(guild_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn exists(
    pool: &PgPool,
    task_kind: ExpiryKind,
    guild_id: i64,
    user_id: i64,
) -> Result<bool, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM pending_expiries
        WHERE task_kind = $1 AND guild_id = $2 AND user_id = $3
        "#,
    )
    .bind(task_kind)
    .bind(guild_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0 > 0)
}

/// All tasks whose due time has passed, oldest first. Comparing against the
/// database clock makes restart recovery automatic: rows that expired while
/// the process was down are returned on the first poll.
pub async fn list_due(pool: &PgPool) -> Result<Vec<PendingExpiry>, sqlx::Error> {
    sqlx::query_as::<_, PendingExpiry>(
        "SELECT * FROM pending_expiries WHERE due_at <= NOW() ORDER BY due_at",
    )
    .fetch_all(pool)
    .await
}

/// Push a failed task into the future instead of dropping it.
pub async fn defer(
    pool: &PgPool,
    task_kind: ExpiryKind,
    guild_id: i64,
    user_id: i64,
    delay_seconds: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE pending_expiries
        SET due_at = NOW() + $4 * INTERVAL '1 second', attempts = attempts + 1
        WHERE task_kind = $1 AND guild_id = $2 AND user_id = $3
        "#,
    )
    .bind(task_kind)
    .bind(guild_id)
    .bind(user_id)
    .bind(delay_seconds)
    .execute(pool)
    .await?;

    Ok(())
}
