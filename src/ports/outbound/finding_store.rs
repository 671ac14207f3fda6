use crate::resource_analysis::domain::Finding;
use crate::shared::Result;
use async_trait::async_trait;

/// Default findings table name
pub const DEFAULT_TABLE_NAME: &str = "CostOptimizerFindings";

/// FindingStore port for persisting findings
///
/// Write-only and keyed by `Finding::id`: an upsert replaces any record with
/// the same id, with no read-before-write. Last writer wins.
#[async_trait]
pub trait FindingStore: Send + Sync {
    /// Name of the table findings are written to
    fn table_name(&self) -> &str;

    /// Inserts or replaces the finding stored under `finding.id`
    ///
    /// # Errors
    /// Returns an error if this single write fails. Other writes are unaffected.
    async fn upsert(&self, finding: &Finding) -> Result<()>;
}

#[async_trait]
impl<S: FindingStore + ?Sized> FindingStore for Box<S> {
    fn table_name(&self) -> &str {
        (**self).table_name()
    }

    async fn upsert(&self, finding: &Finding) -> Result<()> {
        (**self).upsert(finding).await
    }
}
