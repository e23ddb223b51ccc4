//! Tests for the transcript audit log.

use chrono::{Duration, Utc};
use milestones_bot::storage::{SqlitePoolManager, TranscriptRecord, TranscriptRepository};

/// **Test: saved records come back per chat, newest first, limited.**
#[tokio::test]
async fn recent_for_chat_orders_and_limits() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("transcript.db");
    let pool = SqlitePoolManager::new(db_path.to_str().unwrap()).await.unwrap();
    let repo = TranscriptRepository::new(pool).await.unwrap();

    let base = Utc::now();
    for (offset, content) in ["(start)", "Maya", "18 months"].iter().enumerate() {
        let mut record = TranscriptRecord::new(
            10,
            10,
            Some("caregiver".to_string()),
            "text".to_string(),
            content.to_string(),
        );
        record.created_at = base + Duration::seconds(offset as i64);
        repo.save(&record).await.unwrap();
    }
    // another chat's record must not leak in
    let other = TranscriptRecord::new(11, 11, None, "text".to_string(), "hi".to_string());
    repo.save(&other).await.unwrap();

    let recent = repo.recent_for_chat(10, 2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].content, "18 months");
    assert_eq!(recent[1].content, "Maya");
    assert!(recent.iter().all(|r| r.chat_id == 10));
}
