use chrono::Utc;
use funplay_core::Result;
use sqlx::{Row, SqlitePool};

/// A channel row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

/// Insert a channel or rename an existing one
pub async fn upsert(pool: &SqlitePool, id: &str, name: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO channels (id, name, created_at)
        VALUES (?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET name = excluded.name
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(Utc::now().timestamp())
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert a channel only if it does not exist yet
pub async fn ensure(pool: &SqlitePool, id: &str, name: &str) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO channels (id, name, created_at) VALUES (?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(Utc::now().timestamp())
        .execute(pool)
        .await?;

    Ok(())
}

/// Get channel by ID
pub async fn get_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Channel>> {
    let row = sqlx::query("SELECT id, name FROM channels WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| Channel {
        id: row.get("id"),
        name: row.get("name"),
    }))
}
