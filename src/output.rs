use std::path::Path;

use eyre::{Result, WrapErr};
use log::debug;

use crate::VideoRecord;

/// Serialize records to a pretty-printed JSON array, overwriting `path`
pub fn write_records(path: &Path, records: &[VideoRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json).wrap_err_with(|| format!("failed to write {}", path.display()))?;
    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Read a result document produced by an earlier run
pub fn read_records(path: &Path) -> Result<Vec<VideoRecord>> {
    let content =
        std::fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let records: Vec<VideoRecord> =
        serde_json::from_str(&content).wrap_err_with(|| format!("{} is not a result document", path.display()))?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<VideoRecord> {
        vec![
            VideoRecord {
                id: "vid00000001".to_string(),
                title: "First video".to_string(),
                published_at: "2024-03-01T09:00:00Z".to_string(),
                like_count: 50,
                view_count: 1000,
                transcript: Some("hello from the first video".to_string()),
            },
            VideoRecord {
                id: "vid00000002".to_string(),
                title: "Second video".to_string(),
                published_at: "2024-03-02T09:00:00Z".to_string(),
                like_count: 10,
                view_count: 200,
                transcript: None,
            },
        ]
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.json");
        let records = sample_records();

        write_records(&path, &records).unwrap();
        let read_back = read_records(&path).unwrap();
        assert_eq!(read_back, records);
    }

    #[test]
    fn test_unset_transcript_is_omitted() {
        let records = sample_records();
        let json = serde_json::to_string_pretty(&records).unwrap();
        let values: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();

        assert!(values[0].get("transcript").is_some());
        assert!(values[1].get("transcript").is_none());
        assert_eq!(values[0]["likeCount"], 50);
        assert_eq!(values[0]["publishedAt"], "2024-03-01T09:00:00Z");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.json");
        std::fs::write(&path, "stale content").unwrap();

        write_records(&path, &sample_records()).unwrap();
        assert_eq!(read_records(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_read_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_records(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn test_read_malformed_document_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"not": "an array"}"#).unwrap();
        assert!(read_records(&path).is_err());
    }
}
