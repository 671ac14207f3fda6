use crate::ports::outbound::{FindingStore, DEFAULT_TABLE_NAME};
use crate::resource_analysis::domain::Finding;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// InMemoryFindingStore adapter keeping findings in a concurrent map
///
/// Keyed by `Finding::id`, so an upsert replaces the previous record for the
/// same resource. Clones share the same map.
#[derive(Debug, Clone)]
pub struct InMemoryFindingStore {
    table: String,
    findings: Arc<DashMap<String, Finding>>,
}

impl InMemoryFindingStore {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            findings: Arc::new(DashMap::new()),
        }
    }

    /// Returns the finding stored under `id`
    pub fn get(&self, id: &str) -> Option<Finding> {
        self.findings.get(id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

impl Default for InMemoryFindingStore {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_NAME)
    }
}

#[async_trait]
impl FindingStore for InMemoryFindingStore {
    fn table_name(&self) -> &str {
        &self.table
    }

    async fn upsert(&self, finding: &Finding) -> Result<()> {
        self.findings.insert(finding.id.clone(), finding.clone());
        Ok(())
    }
}
