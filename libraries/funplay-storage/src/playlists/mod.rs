use crate::videos::{from_row, VIDEO_COLUMNS};
use chrono::Utc;
use funplay_core::{PlaylistEntry, Result};
use sqlx::{Row, SqlitePool};

/// Insert a playlist or retitle an existing one
pub async fn upsert(
    pool: &SqlitePool,
    id: &str,
    title: &str,
    channel_id: Option<&str>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO playlists (id, title, channel_id, created_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            channel_id = excluded.channel_id
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(channel_id)
    .bind(Utc::now().timestamp())
    .execute(pool)
    .await?;

    Ok(())
}

/// Put `video_id` at `position`, replacing whatever was there
pub async fn set_entry(
    pool: &SqlitePool,
    playlist_id: &str,
    position: i64,
    video_id: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO playlist_videos (playlist_id, video_id, position)
        VALUES (?, ?, ?)
        ON CONFLICT(playlist_id, position) DO UPDATE SET video_id = excluded.video_id
        "#,
    )
    .bind(playlist_id)
    .bind(video_id)
    .bind(position)
    .execute(pool)
    .await?;

    Ok(())
}

/// Drop every entry of a playlist
pub async fn clear_entries(pool: &SqlitePool, playlist_id: &str) -> Result<()> {
    sqlx::query("DELETE FROM playlist_videos WHERE playlist_id = ?")
        .bind(playlist_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Playlist entries by ascending position
///
/// Entries whose video no longer exists come back with `video: None`.
pub async fn list_entries(pool: &SqlitePool, playlist_id: &str) -> Result<Vec<PlaylistEntry>> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT pv.position, {}
        FROM playlist_videos pv
        LEFT JOIN videos v ON v.id = pv.video_id
        LEFT JOIN channels c ON c.id = v.channel_id
        WHERE pv.playlist_id = ?
        ORDER BY pv.position ASC
        "#,
        VIDEO_COLUMNS
    ))
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let video = row
                .get::<Option<String>, _>("id")
                .map(|_| from_row(row))
                .transpose()?;
            Ok(PlaylistEntry {
                position: row.get("position"),
                video,
            })
        })
        .collect()
}
