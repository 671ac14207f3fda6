use async_trait::async_trait;
use cost_optimizer::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock FindingStore recording every upsert; ids in `failing_ids` fail to write
#[derive(Default, Clone)]
pub struct MockFindingStore {
    pub findings: Arc<Mutex<BTreeMap<String, Finding>>>,
    pub write_count: Arc<Mutex<usize>>,
    pub failing_ids: HashSet<String>,
}

impl MockFindingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(ids: &[&str]) -> Self {
        Self {
            failing_ids: ids.iter().map(|id| id.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn get(&self, id: &str) -> Option<Finding> {
        self.findings.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.findings.lock().unwrap().len()
    }

    pub fn writes(&self) -> usize {
        *self.write_count.lock().unwrap()
    }
}

#[async_trait]
impl FindingStore for MockFindingStore {
    fn table_name(&self) -> &str {
        "MockFindings"
    }

    async fn upsert(&self, finding: &Finding) -> Result<()> {
        *self.write_count.lock().unwrap() += 1;
        if self.failing_ids.contains(&finding.id) {
            anyhow::bail!("ConditionalCheckFailedException");
        }
        self.findings
            .lock()
            .unwrap()
            .insert(finding.id.clone(), finding.clone());
        Ok(())
    }
}
