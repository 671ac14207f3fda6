use crate::ports::outbound::FindingStore;
use crate::resource_analysis::domain::Finding;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

type Table = BTreeMap<String, Finding>;

/// JsonFileFindingStore adapter persisting one table as one JSON file
///
/// The file `<dir>/<table>.json` holds a single object mapping finding id to
/// finding. The table is read from disk once, on the first upsert, and kept
/// in memory afterwards. Each upsert still rewrites the whole file (through
/// a temporary file and rename) so that every acknowledged write is on disk.
/// The store assumes it is the only writer of its table file.
#[derive(Debug)]
pub struct JsonFileFindingStore {
    table: String,
    path: PathBuf,
    cache: Mutex<Option<Table>>,
}

impl JsonFileFindingStore {
    /// Creates a store writing to `<dir>/<table>.json`, creating `dir` if needed
    pub fn new(dir: &Path, table: impl Into<String>) -> Result<Self> {
        let table = table.into();
        if table.trim().is_empty() || table.contains(['/', '\\']) || table.contains("..") {
            anyhow::bail!("Invalid table name '{}'", table);
        }

        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create store directory: {}", dir.display()))?;

        Ok(Self {
            path: dir.join(format!("{}.json", table)),
            table,
            cache: Mutex::new(None),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every stored finding from disk, keyed by id
    pub async fn load_all(&self) -> Result<Table> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read table file: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse table file: {}", self.path.display()))
    }

    async fn write_all(&self, findings: &Table) -> Result<()> {
        let content = serde_json::to_string_pretty(findings)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("Failed to write table file: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .with_context(|| format!("Failed to replace table file: {}", self.path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl FindingStore for JsonFileFindingStore {
    fn table_name(&self) -> &str {
        &self.table
    }

    async fn upsert(&self, finding: &Finding) -> Result<()> {
        let mut cache = self.cache.lock().await;
        if cache.is_none() {
            *cache = Some(self.load_all().await?);
        }
        let findings = cache.get_or_insert_with(BTreeMap::new);

        let previous = findings.insert(finding.id.clone(), finding.clone());
        if let Err(e) = self.write_all(findings).await {
            // Keep memory in line with what is on disk
            match previous {
                Some(previous) => findings.insert(finding.id.clone(), previous),
                None => findings.remove(&finding.id),
            };
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_analysis::domain::{ResourceId, ResourceType};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn finding(id: &str, day: u32) -> Finding {
        Finding::new(
            &ResourceId::new(id).unwrap(),
            ResourceType::S3,
            "s3_bucket",
            format!("S3 Bucket: {}", id),
            "Size: 0.00GB, Objects: 0",
            Default::default(),
            Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_upsert_persists_and_replaces() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileFindingStore::new(dir.path(), "Findings").unwrap();

        store.upsert(&finding("logs", 1)).await.unwrap();
        store.upsert(&finding("assets", 1)).await.unwrap();
        store.upsert(&finding("logs", 3)).await.unwrap();

        let reopened = JsonFileFindingStore::new(dir.path(), "Findings").unwrap();
        let findings = reopened.load_all().await.unwrap();
        assert_eq!(findings.len(), 2);
        assert_eq!(
            findings["logs"].timestamp,
            Utc.with_ymd_and_hms(2024, 5, 3, 0, 0, 0).unwrap()
        );
        assert!(store.path().ends_with("Findings.json"));
    }

    #[test]
    fn test_rejects_path_like_table_names() {
        let dir = TempDir::new().unwrap();
        assert!(JsonFileFindingStore::new(dir.path(), "../escape").is_err());
        assert!(JsonFileFindingStore::new(dir.path(), "").is_err());
    }

    #[tokio::test]
    async fn test_corrupt_table_fails_write() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileFindingStore::new(dir.path(), "Findings").unwrap();
        std::fs::write(store.path(), "not json").unwrap();

        assert!(store.upsert(&finding("logs", 1)).await.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_upserts_all_land() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileFindingStore::new(dir.path(), "Findings").unwrap();
        let ids: Vec<String> = (0..10).map(|i| format!("bucket-{}", i)).collect();

        let pending: Vec<Finding> = ids.iter().map(|id| finding(id, 1)).collect();

        let results = futures::future::join_all(pending.iter().map(|f| store.upsert(f))).await;

        assert!(results.iter().all(|r| r.is_ok()));
        let findings = store.load_all().await.unwrap();
        assert_eq!(findings.len(), 10);
        assert!(ids.iter().all(|id| findings.contains_key(id)));
    }

    #[tokio::test]
    async fn test_existing_table_loaded_once_and_extended() {
        let dir = TempDir::new().unwrap();
        let first = JsonFileFindingStore::new(dir.path(), "Findings").unwrap();
        first.upsert(&finding("logs", 1)).await.unwrap();

        let second = JsonFileFindingStore::new(dir.path(), "Findings").unwrap();
        second.upsert(&finding("assets", 2)).await.unwrap();
        second.upsert(&finding("media", 2)).await.unwrap();

        let findings = second.load_all().await.unwrap();
        assert_eq!(
            findings.keys().map(String::as_str).collect::<Vec<_>>(),
            ["assets", "logs", "media"]
        );
    }
}
