use sqlx::PgPool;

use crate::db::models::GuildConfig;

pub async fn get_or_create(pool: &PgPool, guild_id: i64) -> Result<GuildConfig, sqlx::Error> {
    // Try to get existing config
    let existing = sqlx::query_as::<_, GuildConfig>(
        "SELECT * FROM guild_configs WHERE guild_id = $1",
    )
    .bind(guild_id)
    .fetch_optional(pool)
    .await?;

    if let Some(config) = existing {
        return Ok(config);
    }

    // Create new config
    sqlx::query_as::<_, GuildConfig>(
        r#"
        INSERT INTO guild_configs (guild_id)
        VALUES ($1)
        RETURNING *
        "#,
    )
    .bind(guild_id)
    .fetch_one(pool)
    .await
}

pub async fn get(pool: &PgPool, guild_id: i64) -> Result<Option<GuildConfig>, sqlx::Error> {
    sqlx::query_as::<_, GuildConfig>(
        "SELECT * FROM guild_configs WHERE guild_id = $1",
    )
    .bind(guild_id)
    .fetch_optional(pool)
    .await
}

pub async fn set_muted_role(
    pool: &PgPool,
    guild_id: i64,
    role_id: Option<i64>,
) -> Result<GuildConfig, sqlx::Error> {
    get_or_create(pool, guild_id).await?;

    sqlx::query_as::<_, GuildConfig>(
        r#"
        UPDATE guild_configs
        SET muted_role_id = $2, updated_at = NOW()
        WHERE guild_id = $1
        RETURNING *
        "#,
    )
    .bind(guild_id)
    .bind(role_id)
    .fetch_one(pool)
    .await
}

pub async fn set_antiraid_level(
    pool: &PgPool,
    guild_id: i64,
    level: i32,
) -> Result<GuildConfig, sqlx::Error> {
    get_or_create(pool, guild_id).await?;

    sqlx::query_as::<_, GuildConfig>(
        r#"
        UPDATE guild_configs
        SET antiraid_level = $2, updated_at = NOW()
        WHERE guild_id = $1
        RETURNING *
        "#,
    )
    .bind(guild_id)
    .bind(level)
    .fetch_one(pool)
    .await
}

pub async fn set_mod_logs_channel(
    pool: &PgPool,
    guild_id: i64,
    channel_id: Option<i64>,
) -> Result<GuildConfig, sqlx::Error> {
    get_or_create(pool, guild_id).await?;

    sqlx::query_as::<_, GuildConfig>(
        r#"
        UPDATE guild_configs
        SET mod_logs_channel_id = $2, updated_at = NOW()
        WHERE guild_id = $1
        RETURNING *
        "#,
    )
    .bind(guild_id)
    .bind(channel_id)
    .fetch_one(pool)
    .await
}
