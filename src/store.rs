//! Document persistence
//!
//! The whole tracker document lives as one JSON body in `kv_store`, next to
//! the unlock flag. Functions take any SQLite executor so they run the same
//! against the pool or inside a transaction.

use chrono::Utc;
use sqlx::SqliteExecutor;
use tracing::{debug, info, warn};

use crate::models::{Document, DOCUMENT_VERSION};

pub const DOCUMENT_KEY: &str = "golfTracker.v1";
pub const UNLOCK_KEY: &str = "golfTracker.unlocked.v1";
const UNLOCKED: &str = "1";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
  #[error("Failed to serialize document: {0}")]
  Serialize(#[from] serde_json::Error),
  #[error("Stored document is unreadable: {0}")]
  Corrupt(serde_json::Error),
}

// ---------------------------------------------------------------------------
/// Raw key access
// ---------------------------------------------------------------------------

async fn read_key<'e, E: SqliteExecutor<'e>>(executor: E, key: &str) -> Result<Option<String>, StoreError> {
  let body: Option<String> = sqlx::query_scalar("SELECT body FROM kv_store WHERE key = ?")
    .bind(key)
    .fetch_optional(executor)
    .await?;
  Ok(body)
}

async fn write_key<'e, E: SqliteExecutor<'e>>(executor: E, key: &str, body: &str) -> Result<(), StoreError> {
  sqlx::query(
    r#"
    INSERT INTO kv_store (key, version, body, updated_at)
    VALUES (?, ?, ?, ?)
    ON CONFLICT(key) DO UPDATE SET
      version = excluded.version,
      body = excluded.body,
      updated_at = excluded.updated_at
    "#,
  )
  .bind(key)
  .bind(DOCUMENT_VERSION as i64)
  .bind(body)
  .bind(Utc::now().to_rfc3339())
  .execute(executor)
  .await?;
  Ok(())
}

// ---------------------------------------------------------------------------
/// Document
// ---------------------------------------------------------------------------

/// Parse a stored body, dropping rounds that point at a missing course or tee.
/// Returns the document and how many rounds were dropped.
pub fn parse_document(body: &str) -> Result<(Document, usize), serde_json::Error> {
  let mut doc = serde_json::from_str::<Document>(body)?;

  let pruned = doc.prune_orphaned_rounds();
  if pruned > 0 {
    info!(pruned, "Dropped rounds whose course or tee no longer exists");
  }
  Ok((doc, pruned))
}

/// Load the document, failing with `StoreError::Corrupt` when the stored body
/// cannot be read. Callers that write back must use this.
pub async fn load_document_checked<'e, E: SqliteExecutor<'e>>(executor: E) -> Result<(Document, usize), StoreError> {
  match read_key(executor, DOCUMENT_KEY).await? {
    Some(body) => parse_document(&body).map_err(StoreError::Corrupt),
    None => {
      debug!("No stored document yet");
      Ok((Document::default(), 0))
    }
  }
}

/// Load the document for reading. An unreadable body reads as empty.
pub async fn load_document<'e, E: SqliteExecutor<'e>>(executor: E) -> Result<Document, StoreError> {
  match load_document_checked(executor).await {
    Ok((doc, _)) => Ok(doc),
    Err(StoreError::Corrupt(e)) => {
      warn!(error = %e, "Stored document is unreadable, showing it as empty");
      Ok(Document::default())
    }
    Err(e) => Err(e),
  }
}

pub async fn save_document<'e, E: SqliteExecutor<'e>>(executor: E, doc: &Document) -> Result<(), StoreError> {
  let body = serde_json::to_string(doc)?;
  write_key(executor, DOCUMENT_KEY, &body).await?;
  debug!(courses = doc.courses.len(), rounds = doc.rounds.len(), "Saved document");
  Ok(())
}

// ---------------------------------------------------------------------------
/// Unlock flag
// ---------------------------------------------------------------------------

pub async fn is_unlocked<'e, E: SqliteExecutor<'e>>(executor: E) -> Result<bool, StoreError> {
  Ok(read_key(executor, UNLOCK_KEY).await?.as_deref() == Some(UNLOCKED))
}

pub async fn set_unlocked<'e, E: SqliteExecutor<'e>>(executor: E, unlocked: bool) -> Result<(), StoreError> {
  if unlocked {
    write_key(executor, UNLOCK_KEY, UNLOCKED).await
  } else {
    sqlx::query("DELETE FROM kv_store WHERE key = ?")
      .bind(UNLOCK_KEY)
      .execute(executor)
      .await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{make_course, make_round_on, make_tee, setup_test_db, teardown_test_db};

  #[tokio::test]
  async fn test_missing_document_loads_empty() {
    let pool = setup_test_db().await;

    let doc = load_document(&pool).await.expect("Should load");
    assert_eq!(doc, Document::default());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_save_and_load_document() {
    let pool = setup_test_db().await;

    let mut doc = Document::default();
    doc.courses.push(make_course("c1", vec![make_tee()]));
    doc.rounds.push(make_round_on("r1", "2024-06-01", "c1", "t1", 18, &[5; 18]));

    save_document(&pool, &doc).await.expect("Should save");
    // Second save overwrites the same key
    save_document(&pool, &doc).await.expect("Should save again");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store")
      .fetch_one(&pool)
      .await
      .expect("Failed to count rows");
    assert_eq!(count, 1);

    let loaded = load_document(&pool).await.expect("Should load");
    assert_eq!(loaded, doc);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_corrupt_document_loads_empty() {
    let pool = setup_test_db().await;

    sqlx::query("INSERT INTO kv_store (key, body) VALUES (?, ?)")
      .bind(DOCUMENT_KEY)
      .bind("{not json")
      .execute(&pool)
      .await
      .expect("Failed to insert");

    let doc = load_document(&pool).await.expect("Should load");
    assert!(doc.courses.is_empty());
    assert!(doc.rounds.is_empty());

    let checked = load_document_checked(&pool).await;
    assert!(matches!(checked, Err(StoreError::Corrupt(_))));

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_parse_prunes_orphans() {
    let body = serde_json::json!({
      "courses": [make_course("c1", vec![make_tee()])],
      "rounds": [
        make_round_on("r1", "2024-06-01", "c1", "t1", 18, &[5; 18]),
        make_round_on("r2", "2024-06-01", "c1", "gone", 18, &[5; 18]),
      ]
    })
    .to_string();

    let (doc, pruned) = parse_document(&body).unwrap();
    assert_eq!(pruned, 1);
    assert_eq!(doc.rounds.len(), 1);
    assert_eq!(doc.rounds[0].round_id, "r1");
  }

  #[tokio::test]
  async fn test_unlock_flag() {
    let pool = setup_test_db().await;

    assert!(!is_unlocked(&pool).await.unwrap());
    set_unlocked(&pool, true).await.unwrap();
    assert!(is_unlocked(&pool).await.unwrap());
    set_unlocked(&pool, false).await.unwrap();
    assert!(!is_unlocked(&pool).await.unwrap());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_transaction_rolls_back() {
    let pool = setup_test_db().await;

    let mut tx = pool.begin().await.unwrap();
    let mut doc = load_document(&mut *tx).await.unwrap();
    doc.courses.push(make_course("c1", vec![make_tee()]));
    save_document(&mut *tx, &doc).await.unwrap();
    tx.rollback().await.unwrap();

    assert!(load_document(&pool).await.unwrap().courses.is_empty());

    teardown_test_db(pool).await;
  }
}
