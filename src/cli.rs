use clap::Parser;
use cost_optimizer::config::MAX_CONCURRENCY;
use cost_optimizer::resource_analysis::domain::ResourceKind;
use std::path::PathBuf;

/// Which kinds a single invocation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindSelection {
    One(ResourceKind),
    All,
}

impl std::str::FromStr for KindSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(KindSelection::All);
        }
        s.parse::<ResourceKind>()
            .map(KindSelection::One)
            .map_err(|e| format!("{} or 'all'", e))
    }
}

/// Scan cloud resource inventories into cost findings
#[derive(Parser, Debug)]
#[command(name = "cost-optimizer")]
#[command(version)]
#[command(about = "Scan compute, volume, database and bucket inventories into cost findings", long_about = None)]
pub struct Args {
    /// Resource kind to analyse: compute, volume, database, bucket (or ec2, ebs, rds, s3), or all
    #[arg(value_name = "KIND")]
    pub kind: KindSelection,

    /// Snapshot file describing provider inventory and metrics
    #[arg(short, long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Directory for the findings table file (findings are kept in memory if omitted)
    #[arg(long, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// Findings table name
    #[arg(short, long)]
    pub table: Option<String>,

    /// Path to config file (default: auto-discover cost-optimizer.config.yml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum number of resources analysed at the same time (1-64)
    #[arg(long, value_name = "N", value_parser = parse_concurrency)]
    pub concurrency: Option<usize>,

    /// Emit diagnostics as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Suppress progress output on stderr
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parses command-line arguments; usage errors exit with code 2
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

fn parse_concurrency(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a positive number", s))?;
    if value == 0 || value > MAX_CONCURRENCY {
        return Err(format!(
            "concurrency must be between 1 and {}",
            MAX_CONCURRENCY
        ));
    }
    Ok(value)
}
