// CSV-backed reading store
use crate::application::reading_store::{ReadingStore, RecordError};
use crate::domain::pool::Pool;
use crate::domain::reading::Reading;
use async_trait::async_trait;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

const CSV_HEADER: [&str; 2] = ["timestamp", "count"];

/// One append-only CSV file per pool under the data directory. Files are
/// opened, appended and closed on every call; nothing is held across passes.
pub struct CsvReadingStore {
    data_dir: PathBuf,
}

impl CsvReadingStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn record_path(&self, pool: &Pool) -> PathBuf {
        self.data_dir.join(pool.csv_file_name())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> RecordError {
    RecordError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[async_trait]
impl ReadingStore for CsvReadingStore {
    async fn append(&self, pool: &Pool, reading: &Reading) -> Result<(), RecordError> {
        let path = self.record_path(pool);
        let is_new = !path.exists();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| io_error(&path, source))?;

        let mut writer = csv::Writer::from_writer(file);
        if is_new {
            writer.write_record(CSV_HEADER)?;
        }
        writer.write_record([reading.format_timestamp(), reading.count.to_string()])?;
        writer.flush().map_err(|source| io_error(&path, source))?;
        Ok(())
    }

    async fn load_all(&self, pool: &Pool) -> Result<Vec<Reading>, RecordError> {
        let path = self.record_path(pool);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&path)?;
        let mut readings = Vec::new();
        for row in reader.records() {
            let row = row?;
            let (Some(timestamp), Some(count)) = (row.get(0), row.get(1)) else {
                tracing::warn!("skipping short row in {:?}", path);
                continue;
            };
            match (Reading::parse_timestamp(timestamp), count.trim().parse::<u32>()) {
                (Ok(taken_at), Ok(count)) => readings.push(Reading::new(taken_at, count)),
                _ => tracing::warn!("skipping malformed row in {:?}: {:?}", path, row),
            }
        }
        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> Pool {
        Pool::new(
            "oerlikon".to_string(),
            "Hallenbad Oerlikon".to_string(),
            "Hallenbad Oerlikon".to_string(),
        )
    }

    fn reading(timestamp: &str, count: u32) -> Reading {
        Reading::new(Reading::parse_timestamp(timestamp).unwrap(), count)
    }

    #[tokio::test]
    async fn test_first_append_creates_file_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvReadingStore::new(dir.path().to_path_buf());

        store
            .append(&pool(), &reading("2026-08-28 10:00:00", 42))
            .await
            .unwrap();

        let content = std::fs::read_to_string(store.record_path(&pool())).unwrap();
        assert_eq!(content, "timestamp,count\n2026-08-28 10:00:00,42\n");
    }

    #[tokio::test]
    async fn test_second_append_does_not_duplicate_header() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvReadingStore::new(dir.path().to_path_buf());

        store
            .append(&pool(), &reading("2026-08-28 10:00:00", 42))
            .await
            .unwrap();
        store
            .append(&pool(), &reading("2026-08-28 10:05:00", 45))
            .await
            .unwrap();

        let content = std::fs::read_to_string(store.record_path(&pool())).unwrap();
        assert_eq!(
            content,
            "timestamp,count\n2026-08-28 10:00:00,42\n2026-08-28 10:05:00,45\n"
        );
    }

    #[tokio::test]
    async fn test_n_appends_yield_n_rows_in_call_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvReadingStore::new(dir.path().to_path_buf());

        for (i, count) in [10u32, 20, 30, 40].iter().enumerate() {
            let timestamp = format!("2026-08-28 10:0{i}:00");
            store.append(&pool(), &reading(&timestamp, *count)).await.unwrap();
        }

        let loaded = store.load_all(&pool()).await.unwrap();
        assert_eq!(
            loaded.iter().map(|r| r.count).collect::<Vec<_>>(),
            vec![10, 20, 30, 40]
        );
    }

    #[tokio::test]
    async fn test_load_all_on_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvReadingStore::new(dir.path().to_path_buf());
        assert!(store.load_all(&pool()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvReadingStore::new(dir.path().join("does-not-exist"));

        let result = store
            .append(&pool(), &reading("2026-08-28 10:00:00", 42))
            .await;
        assert!(matches!(result, Err(RecordError::Io { .. })));
    }

    #[tokio::test]
    async fn test_malformed_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvReadingStore::new(dir.path().to_path_buf());
        std::fs::write(
            store.record_path(&pool()),
            "timestamp,count\n2026-08-28 10:00:00,42\nnot-a-date,99\n2026-08-28 10:05:00,-3\n2026-08-28 10:10:00,45\n",
        )
        .unwrap();

        let loaded = store.load_all(&pool()).await.unwrap();
        assert_eq!(
            loaded.iter().map(|r| r.count).collect::<Vec<_>>(),
            vec![42, 45]
        );
    }
}
