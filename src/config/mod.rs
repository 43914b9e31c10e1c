//! Run parameters for the workload generator.

pub mod duration;

use clap::Args;
use loadgen_generator::{BatchSizes, MAX_BATCH_SIZE};
use loadgen_postgresql::{PoolOptions, PostgreSQLPoolArgs};
use std::path::PathBuf;
use std::time::Duration;

pub use duration::parse_duration;

/// Log levels accepted by `--level`.
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Command-line arguments of a workload run.
#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Database connection options
    #[command(flatten)]
    pub postgresql: PostgreSQLPoolArgs,

    /// Path of the template file that contains the queries
    #[arg(long, default_value = "template.yaml")]
    pub template_path: PathBuf,

    /// Schemas to fill into {schema} (comma-separated, traversed in order)
    #[arg(long, value_delimiter = ',', default_value = "public")]
    pub schema: Vec<String>,

    /// Number of insert queries generated per cycle
    #[arg(long, default_value = "100", allow_negative_numbers = true)]
    pub num_inserts: i64,

    /// Number of update queries generated per cycle
    #[arg(long, default_value = "100", allow_negative_numbers = true)]
    pub num_updates: i64,

    /// Number of delete queries generated per cycle
    #[arg(long, default_value = "100", allow_negative_numbers = true)]
    pub num_deletes: i64,

    /// Interval between cycles (e.g. "500ms", "1s", "2m")
    #[arg(long, default_value = "1s", value_parser = parse_duration)]
    pub interval: Duration,

    /// Log level (overridden by RUST_LOG when set)
    #[arg(long, default_value = "info", value_parser = LOG_LEVELS)]
    pub level: String,

    /// Seed for reproducible placeholder values (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Generate and log a single cycle without connecting to the database
    #[arg(long)]
    pub dry_run: bool,
}

/// Validated run parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub connection_string: String,
    pub pool: PoolOptions,
    pub template_path: PathBuf,
    pub schemas: Vec<String>,
    pub sizes: BatchSizes,
    pub interval: Duration,
    pub seed: Option<u64>,
    pub dry_run: bool,
}

impl RunConfig {
    /// Validate parsed arguments into run parameters.
    pub fn from_args(args: RunArgs) -> anyhow::Result<Self> {
        let connection_string = args.postgresql.db_uri.trim().to_string();
        if connection_string.is_empty() {
            anyhow::bail!("Please provide a database URI using --db-uri");
        }

        let pool = args.postgresql.pool_options();
        pool.validate()?;

        let schemas: Vec<String> = args
            .schema
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if schemas.is_empty() {
            anyhow::bail!("At least one schema is required");
        }

        for (flag, size) in [
            ("--num-inserts", args.num_inserts),
            ("--num-updates", args.num_updates),
            ("--num-deletes", args.num_deletes),
        ] {
            if size > MAX_BATCH_SIZE {
                anyhow::bail!("{flag} must be at most {MAX_BATCH_SIZE}, got {size}");
            }
        }

        if args.interval.is_zero() {
            anyhow::bail!("Interval must be greater than zero");
        }

        Ok(Self {
            connection_string,
            pool,
            template_path: args.template_path,
            schemas,
            sizes: BatchSizes {
                inserts: args.num_inserts,
                updates: args.num_updates,
                deletes: args.num_deletes,
            },
            interval: args.interval,
            seed: args.seed,
            dry_run: args.dry_run,
        })
    }
}
