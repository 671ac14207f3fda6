use crate::application::dto::{RunReport, RunRequest};
use crate::ports::inbound::AnalysisPort;
use crate::ports::outbound::{Clock, FindingStore, InventoryBackend, MetricsBackend, ProgressReporter};
use crate::resource_analysis::domain::{Finding, ResourceDescriptor, ResourceKind};
use crate::resource_analysis::policies::FilterDecision;
use crate::resource_analysis::profiles::{profile_for, KindProfile, MetricValues};
use crate::resource_analysis::services::{
    FindingAssembler, MetricWindowAggregator, ResourceEnumerator,
};
use crate::shared::error::AnalyzerError;
use crate::shared::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// What became of one enumerated resource
enum ResourceOutcome {
    Reported(Finding),
    Skipped,
    Failed,
}

/// Per-run collaborators shared by every resource future
struct RunContext<'a, I: InventoryBackend, M: MetricsBackend, C: Clock> {
    run_id: Uuid,
    profile: &'a dyn KindProfile,
    enumerator: ResourceEnumerator<'a, I>,
    aggregator: MetricWindowAggregator<'a, M, C>,
    processed: AtomicUsize,
    total: usize,
}

/// AnalyzeResourcesUseCase - the fault-isolated batch runner
///
/// Enumerates one resource kind, then for every resource: completes its
/// attributes, applies the kind's filter, aggregates its metric windows,
/// derives the finding metadata and assembles the finding. Finally upserts
/// every finding into the store.
///
/// Only an enumeration failure fails the run. A resource whose processing
/// fails is dropped with a warning, and a failed write is logged without
/// stopping the remaining writes.
///
/// # Type Parameters
/// * `I` - InventoryBackend implementation
/// * `M` - MetricsBackend implementation
/// * `S` - FindingStore implementation
/// * `PR` - ProgressReporter implementation
/// * `C` - Clock implementation
pub struct AnalyzeResourcesUseCase<I, M, S, PR, C> {
    inventory: I,
    metrics: M,
    store: S,
    progress_reporter: PR,
    clock: C,
}

impl<I, M, S, PR, C> AnalyzeResourcesUseCase<I, M, S, PR, C>
where
    I: InventoryBackend,
    M: MetricsBackend,
    S: FindingStore,
    PR: ProgressReporter,
    C: Clock,
{
    /// Creates a new AnalyzeResourcesUseCase with injected dependencies
    pub fn new(inventory: I, metrics: M, store: S, progress_reporter: PR, clock: C) -> Self {
        Self {
            inventory,
            metrics,
            store,
            progress_reporter,
            clock,
        }
    }

    /// Runs one pass over `request.kind`
    ///
    /// Never returns an error: an enumeration failure becomes a failure report.
    pub async fn execute(&self, request: RunRequest) -> RunReport {
        let run_id = Uuid::new_v4();
        let kind = request.kind;
        let profile = profile_for(kind);

        info!(%run_id, %kind, concurrency = request.concurrency, "Starting analysis run");
        self.progress_reporter
            .report(&format!("🔍 Analyzing {}...", profile.noun()));

        // Step 1: Enumerate (the only fatal step)
        let enumerator = ResourceEnumerator::new(&self.inventory);
        let descriptors = match enumerator.list(kind).await {
            Ok(descriptors) => descriptors,
            Err(e) => return self.enumeration_failure(run_id, kind, profile, e),
        };
        self.progress_reporter.report(&format!(
            "✅ Found {} {}",
            descriptors.len(),
            profile.noun()
        ));

        // Step 2: Process every resource in isolation
        let context = RunContext {
            run_id,
            profile,
            enumerator,
            aggregator: MetricWindowAggregator::new(&self.metrics, &self.clock),
            processed: AtomicUsize::new(0),
            total: descriptors.len(),
        };
        let outcomes = self
            .process_resources(&context, descriptors, request.concurrency)
            .await;

        let mut findings = Vec::new();
        let mut skipped = 0;
        let mut failed = 0;
        for outcome in outcomes {
            match outcome {
                ResourceOutcome::Reported(finding) => findings.push(finding),
                ResourceOutcome::Skipped => skipped += 1,
                ResourceOutcome::Failed => failed += 1,
            }
        }

        // Step 3: Persist
        let write_failures = self.store_findings(run_id, &mut findings).await;

        let message = profile.run_message(findings.len());
        info!(
            %run_id,
            %kind,
            findings = findings.len(),
            skipped,
            failed,
            write_failures,
            "Analysis run complete"
        );
        self.progress_reporter
            .report_completion(&format!("✅ {}", message));

        RunReport::success(run_id, kind, message, findings).with_counters(
            skipped,
            failed,
            write_failures,
        )
    }

    fn enumeration_failure(
        &self,
        run_id: Uuid,
        kind: ResourceKind,
        profile: &dyn KindProfile,
        cause: anyhow::Error,
    ) -> RunReport {
        let error = AnalyzerError::EnumerationFailed {
            kind: kind.to_string(),
            details: cause.to_string(),
        };
        error!(%run_id, %kind, error = %error, "Error analyzing {}", profile.noun());

        RunReport::failure(run_id, kind, error.to_string())
    }

    /// Processes resources with at most `concurrency` in flight.
    /// Outcomes come back in enumeration order.
    async fn process_resources(
        &self,
        context: &RunContext<'_, I, M, C>,
        descriptors: Vec<ResourceDescriptor>,
        concurrency: usize,
    ) -> Vec<ResourceOutcome> {
        stream::iter(descriptors)
            .map(|descriptor| self.process_resource(context, descriptor))
            .buffered(concurrency.max(1))
            .collect()
            .await
    }

    async fn process_resource(
        &self,
        context: &RunContext<'_, I, M, C>,
        descriptor: ResourceDescriptor,
    ) -> ResourceOutcome {
        let resource_id = descriptor.id().to_string();

        let outcome = match self.analyze_resource(context, descriptor).await {
            Ok(Some(finding)) => ResourceOutcome::Reported(finding),
            Ok(None) => ResourceOutcome::Skipped,
            Err(e) => {
                let error = AnalyzerError::ResourceProcessingFailed {
                    resource_id: resource_id.clone(),
                    details: e.to_string(),
                };
                warn!(run_id = %context.run_id, resource_id = %resource_id, error = %error, "Dropping resource");
                ResourceOutcome::Failed
            }
        };

        let current = context.processed.fetch_add(1, Ordering::Relaxed) + 1;
        self.progress_reporter
            .report_progress(current, context.total, Some(&resource_id));

        outcome
    }

    /// Filter, aggregate, derive and assemble. `Ok(None)` means filtered out.
    async fn analyze_resource(
        &self,
        context: &RunContext<'_, I, M, C>,
        descriptor: ResourceDescriptor,
    ) -> Result<Option<Finding>> {
        let profile = context.profile;
        let descriptor = context.enumerator.describe(descriptor).await;
        let resource_id = descriptor.id().as_str();

        if let FilterDecision::Skip { reason } = profile.filter(&descriptor)? {
            info!(run_id = %context.run_id, resource_id = %resource_id, reason = %reason, "Skipping resource");
            return Ok(None);
        }

        debug!(run_id = %context.run_id, resource_id = %resource_id, "Analyzing resource");

        let mut metrics = MetricValues::new();
        for named in profile.metric_queries(&descriptor) {
            let result = context
                .aggregator
                .aggregate(&named.query, resource_id)
                .await;
            metrics.insert(named.field, result);
        }

        let now = self.clock.now();
        let metadata = profile.derive(&descriptor, &metrics, now)?;
        Ok(Some(FindingAssembler::assemble(
            profile,
            &descriptor,
            metadata,
            &metrics,
            now,
        )))
    }

    /// Upserts every finding, stamping each with the clock at write time.
    /// Returns how many writes failed.
    async fn store_findings(&self, run_id: Uuid, findings: &mut [Finding]) -> usize {
        let mut failures = 0;

        for finding in findings.iter_mut() {
            finding.timestamp = self.clock.now();
            if let Err(e) = self.store.upsert(finding).await {
                let error = AnalyzerError::WriteFailed {
                    id: finding.id.clone(),
                    table: self.store.table_name().to_string(),
                    details: e.to_string(),
                };
                warn!(%run_id, resource_id = %finding.id, error = %error, "Finding write failed");
                failures += 1;
            }
        }

        failures
    }
}

#[async_trait(?Send)]
impl<I, M, S, PR, C> AnalysisPort for AnalyzeResourcesUseCase<I, M, S, PR, C>
where
    I: InventoryBackend,
    M: MetricsBackend,
    S: FindingStore,
    PR: ProgressReporter,
    C: Clock,
{
    async fn run(&self, request: RunRequest) -> RunReport {
        self.execute(request).await
    }
}
