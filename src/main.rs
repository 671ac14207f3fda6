mod cli;

use cli::{Args, KindSelection};
use cost_optimizer::adapters::outbound::clock::SystemClock;
use cost_optimizer::adapters::outbound::console::StderrProgressReporter;
use cost_optimizer::adapters::outbound::persistence::{InMemoryFindingStore, JsonFileFindingStore};
use cost_optimizer::adapters::outbound::resilience::{RetryingBackend, DEFAULT_MAX_RETRIES};
use cost_optimizer::adapters::outbound::snapshot::SnapshotBackend;
use cost_optimizer::application::dto::{RunReport, RunRequest, DEFAULT_CONCURRENCY};
use cost_optimizer::application::use_cases::AnalyzeResourcesUseCase;
use cost_optimizer::config::{discover_config, load_config_from_path, ConfigFile};
use cost_optimizer::ports::inbound::AnalysisPort;
use cost_optimizer::ports::outbound::{FindingStore, DEFAULT_TABLE_NAME};
use cost_optimizer::resource_analysis::domain::ResourceKind;
use cost_optimizer::shared::error::{AnalyzerError, ExitCode};
use cost_optimizer::shared::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Settings after merging CLI flags over the config file
#[derive(Debug)]
struct Settings {
    kinds: Vec<ResourceKind>,
    snapshot_path: PathBuf,
    store_path: Option<PathBuf>,
    table: String,
    concurrency: usize,
    max_retries: u32,
    quiet: bool,
}

impl Settings {
    fn resolve(args: Args, config: ConfigFile) -> Result<Self> {
        let snapshot_path = args
            .snapshot
            .or(config.snapshot_path)
            .ok_or_else(|| AnalyzerError::Validation {
                message: "No snapshot file given.\n\n💡 Hint: Pass --snapshot <FILE> or set 'snapshot_path' in cost-optimizer.config.yml".to_string(),
            })?;

        let kinds = match args.kind {
            KindSelection::One(kind) => vec![kind],
            KindSelection::All => config
                .kinds
                .unwrap_or_else(|| ResourceKind::ALL.to_vec()),
        };

        Ok(Self {
            kinds,
            snapshot_path,
            store_path: args.store.or(config.store_path),
            table: args
                .table
                .or(config.table)
                .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            concurrency: args
                .concurrency
                .or(config.concurrency)
                .unwrap_or(DEFAULT_CONCURRENCY),
            max_retries: config.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            quiet: args.quiet,
        })
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_tracing(args.log_json);

    match run(args).await {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Diagnostics go to stderr; stdout carries only the JSON report
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = match args.config.as_deref() {
        Some(path) => load_config_from_path(path)?,
        None => discover_config(&std::env::current_dir()?)?.unwrap_or_default(),
    };
    let settings = Settings::resolve(args, config)?;
    info!(
        snapshot = %settings.snapshot_path.display(),
        table = %settings.table,
        concurrency = settings.concurrency,
        max_retries = settings.max_retries,
        "Configuration resolved"
    );

    // Create adapters (Dependency Injection)
    let backend = RetryingBackend::new(
        SnapshotBackend::load(&settings.snapshot_path)?,
        settings.max_retries,
    );
    let store: Box<dyn FindingStore> = match settings.store_path.as_deref() {
        Some(dir) => Box::new(JsonFileFindingStore::new(dir, settings.table.as_str())?),
        None => Box::new(InMemoryFindingStore::new(settings.table.as_str())),
    };
    let progress_reporter = if settings.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };

    // Create use case with injected dependencies
    let use_case = AnalyzeResourcesUseCase::new(
        backend.clone(),
        backend,
        store,
        progress_reporter,
        SystemClock::new(),
    );
    let port: &dyn AnalysisPort = &use_case;

    // Each kind is an independent run with its own report
    let mut reports = Vec::with_capacity(settings.kinds.len());
    for kind in &settings.kinds {
        let request = RunRequest::new(*kind).with_concurrency(settings.concurrency);
        reports.push(port.run(request).await);
    }

    let output = match reports.as_slice() {
        [report] => serde_json::to_string_pretty(report)?,
        _ => serde_json::to_string_pretty(&reports)?,
    };
    println!("{}", output);

    if !settings.quiet {
        print_summary(&reports);
    }

    if reports.iter().all(RunReport::is_success) {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::RunFailed)
    }
}

fn print_summary(reports: &[RunReport]) {
    eprintln!();
    for report in reports {
        if report.is_success() {
            eprintln!(
                "{} {:<9} {} (skipped {}, dropped {}, write failures {})",
                "✔".green(),
                report.kind.to_string().bold(),
                report.message.as_deref().unwrap_or_default(),
                report.skipped_count,
                report.failed_count,
                report.write_failures
            );
        } else {
            eprintln!(
                "{} {:<9} {}",
                "✘".red(),
                report.kind.to_string().bold(),
                report.error.as_deref().unwrap_or_default().red()
            );
        }
    }
}
