use crate::channels;
use chrono::{DateTime, Utc};
use funplay_core::{ContentError, Result, VideoItem};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

/// Projection shared by every video query; expects `videos v` joined with
/// `channels c`
pub(crate) const VIDEO_COLUMNS: &str = "v.id, v.title, v.thumbnail_url, v.video_url, \
     v.duration, v.view_count, v.category, v.channel_id, c.name AS channel_name";

const FROM_VIDEOS: &str = "FROM videos v LEFT JOIN channels c ON c.id = v.channel_id";

/// A video as written to the catalog
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub video: VideoItem,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl NewVideo {
    /// Public video created now
    pub fn public(video: VideoItem) -> Self {
        Self {
            video,
            is_public: true,
            created_at: Utc::now(),
        }
    }
}

pub(crate) fn from_row(row: &SqliteRow) -> Result<VideoItem> {
    let id: String = row.get("id");
    let duration = row
        .get::<Option<i64>, _>("duration")
        .map(u32::try_from)
        .transpose()
        .map_err(|_| ContentError::storage(format!("video {} has an invalid duration", id)))?;
    let view_count = row
        .get::<Option<i64>, _>("view_count")
        .map(u64::try_from)
        .transpose()
        .map_err(|_| ContentError::storage(format!("video {} has an invalid view count", id)))?;

    Ok(VideoItem {
        id,
        title: row.get("title"),
        thumbnail_url: row.get("thumbnail_url"),
        video_url: row.get("video_url"),
        duration,
        view_count,
        channel_id: row.get("channel_id"),
        channel_name: row.get("channel_name"),
        category: row.get("category"),
    })
}

/// Insert or update a video
///
/// A referenced channel that does not exist yet is created from the video's
/// channel name (or its id when the name is missing).
pub async fn upsert(pool: &SqlitePool, new: &NewVideo) -> Result<()> {
    let video = &new.video;
    let view_count = video
        .view_count
        .map(i64::try_from)
        .transpose()
        .map_err(|_| {
            ContentError::storage(format!("video {} view count exceeds storage range", video.id))
        })?;

    if let Some(channel_id) = video.channel_id.as_deref() {
        let name = video.channel_name.as_deref().unwrap_or(channel_id);
        channels::ensure(pool, channel_id, name).await?;
    }

    sqlx::query(
        r#"
        INSERT INTO videos (id, title, thumbnail_url, video_url, duration, view_count,
                            channel_id, category, is_public, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            thumbnail_url = excluded.thumbnail_url,
            video_url = excluded.video_url,
            duration = excluded.duration,
            view_count = excluded.view_count,
            channel_id = excluded.channel_id,
            category = excluded.category,
            is_public = excluded.is_public,
            created_at = excluded.created_at
        "#,
    )
    .bind(&video.id)
    .bind(&video.title)
    .bind(&video.thumbnail_url)
    .bind(&video.video_url)
    .bind(video.duration.map(i64::from))
    .bind(view_count)
    .bind(&video.channel_id)
    .bind(&video.category)
    .bind(i64::from(new.is_public))
    .bind(new.created_at.timestamp())
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a video; playlist entries referencing it are left dangling
pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM videos WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Get video by ID, regardless of visibility
pub async fn get_by_id(pool: &SqlitePool, id: &str) -> Result<Option<VideoItem>> {
    let row = sqlx::query(&format!(
        "SELECT {} {} WHERE v.id = ?",
        VIDEO_COLUMNS, FROM_VIDEOS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Public videos of a channel, newest first
pub async fn list_by_channel(
    pool: &SqlitePool,
    channel_id: &str,
    limit: usize,
) -> Result<Vec<VideoItem>> {
    let rows = sqlx::query(&format!(
        r#"
        SELECT {} {}
        WHERE v.is_public = 1 AND v.channel_id = ?
        ORDER BY v.created_at DESC, v.rowid DESC
        LIMIT ?
        "#,
        VIDEO_COLUMNS, FROM_VIDEOS
    ))
    .bind(channel_id)
    .bind(limit as i64)
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Public videos in a category, most viewed first
pub async fn list_by_category(
    pool: &SqlitePool,
    category: &str,
    exclude: &[String],
    limit: usize,
) -> Result<Vec<VideoItem>> {
    let mut query = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {} {} WHERE v.is_public = 1 AND v.category = ",
        VIDEO_COLUMNS, FROM_VIDEOS
    ));
    query.push_bind(category.to_string());
    push_exclusions(&mut query, exclude);
    push_most_viewed(&mut query, limit);

    let rows = query.build().fetch_all(pool).await?;
    rows.iter().map(from_row).collect()
}

/// Public videos across the catalog, most viewed first
pub async fn list_popular(
    pool: &SqlitePool,
    exclude: &[String],
    limit: usize,
) -> Result<Vec<VideoItem>> {
    let mut query = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {} {} WHERE v.is_public = 1",
        VIDEO_COLUMNS, FROM_VIDEOS
    ));
    push_exclusions(&mut query, exclude);
    push_most_viewed(&mut query, limit);

    let rows = query.build().fetch_all(pool).await?;
    rows.iter().map(from_row).collect()
}

fn push_exclusions(query: &mut QueryBuilder<'_, Sqlite>, exclude: &[String]) {
    if exclude.is_empty() {
        return;
    }

    query.push(" AND v.id NOT IN (");
    let mut ids = query.separated(", ");
    for id in exclude {
        ids.push_bind(id.clone());
    }
    ids.push_unseparated(")");
}

// Unknown view counts sort last; ties keep insertion order
fn push_most_viewed(query: &mut QueryBuilder<'_, Sqlite>, limit: usize) {
    query.push(" ORDER BY v.view_count IS NULL, v.view_count DESC, v.rowid ASC LIMIT ");
    query.push_bind(limit as i64);
}
