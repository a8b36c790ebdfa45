use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use shortest_expr::{
    ExpressionSolver, Operator, OverflowPolicy, RenderStyle, SolverConfig, parse_number_list,
    parse_operator_list,
};

const DEFAULT_NUMBERS: &str = "1,2,3,4,5,6,7,8,9,11,12,13,14,15,16";
const DEFAULT_OPERATORS: &str = "+,-,*,//,%,**";

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// shortest-expr - Find the shortest arithmetic expression for a number
#[derive(Parser, Debug)]
#[command(name = "shortest-expr")]
#[command(
    about = "Find the arithmetic expression with the fewest operands that evaluates to a target"
)]
#[command(version)]
pub struct CliArgs {
    /// Target value to reach
    #[arg(default_value_t = 9279, allow_negative_numbers = true)]
    pub target: i64,

    /// Comma-separated operand values
    #[arg(short, long, default_value = DEFAULT_NUMBERS, conflicts_with = "numbers_file")]
    pub numbers: String,

    /// Read the operand values from a comma-separated file
    #[arg(long)]
    pub numbers_file: Option<PathBuf>,

    /// Comma-separated operators (+ - * // % **), in tie-break order
    #[arg(short, long, default_value = DEFAULT_OPERATORS, conflicts_with = "operators_file")]
    pub operators: String,

    /// Read the operators from a comma-separated file
    #[arg(long)]
    pub operators_file: Option<PathBuf>,

    /// Longest expression to try, in operands (0 for no limit)
    #[arg(long, default_value_t = 24)]
    pub max_length: usize,

    /// Give up after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Stop with an error instead of skipping combinations that overflow
    #[arg(long)]
    pub abort_on_overflow: bool,

    /// Add the brackets needed for the output to read unambiguously
    #[arg(long)]
    pub strict_brackets: bool,

    /// Print the shortest expression for every value from 1 to the target
    #[arg(long)]
    pub table: bool,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// Configuration for the CLI application
pub struct CliConfig {
    pub target: i64,
    pub numbers: Vec<i64>,
    pub operators: Vec<Operator>,
    pub solver: SolverConfig,
    pub style: RenderStyle,
    pub table: bool,
    pub log_level: LogLevel,
}

fn read_list(inline: &str, file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => Ok(inline.to_string()),
    }
}

/// Turn parsed arguments into a validated configuration
pub fn build_config(args: CliArgs) -> Result<CliConfig> {
    let numbers = parse_number_list(&read_list(&args.numbers, args.numbers_file.as_ref())?)
        .context("Invalid operand list")?;
    if numbers.is_empty() {
        bail!("Operand list is empty");
    }

    let operators =
        parse_operator_list(&read_list(&args.operators, args.operators_file.as_ref())?)
            .context("Invalid operator list")?;

    if args.table && args.target < 1 {
        bail!("Table mode needs a target of at least 1");
    }

    let solver = SolverConfig::default()
        .with_max_length((args.max_length > 0).then_some(args.max_length))
        .with_time_budget(args.timeout_secs.map(Duration::from_secs))
        .with_overflow_policy(if args.abort_on_overflow {
            OverflowPolicy::Abort
        } else {
            OverflowPolicy::Skip
        });

    Ok(CliConfig {
        target: args.target,
        numbers,
        operators,
        solver,
        style: if args.strict_brackets {
            RenderStyle::Strict
        } else {
            RenderStyle::Faithful
        },
        table: args.table,
        log_level: args.log_level,
    })
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<CliConfig> {
    build_config(CliArgs::parse())
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
    Ok(())
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let config = parse_args()?;

    // Initialize logging
    init_logging(&config.log_level)?;

    info!("Allowed numbers: {:?}", config.numbers);
    info!(
        "Allowed operators: {}",
        config
            .operators
            .iter()
            .map(|op| op.symbol())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let solver = ExpressionSolver::new(config.solver.clone());

    if config.table {
        let table = solver.table(1, config.target, &config.numbers, &config.operators)?;
        for (value, expr) in &table.entries {
            println!("{} = {}", value, expr.rendered(config.style));
        }
        if let Some(reason) = table.stopped {
            warn!(
                "Table incomplete ({}), first missing values: {:?}",
                reason,
                table.missing(10)
            );
        }
        return Ok(());
    }

    let report = solver.search(config.target, &config.numbers, &config.operators)?;
    info!(
        "Evaluated {} candidates in {:?}, bucket sizes {:?}",
        report.statistics.candidates_evaluated,
        report.statistics.elapsed,
        report.statistics.bucket_sizes
    );

    let target = report.target;
    let expr = report.into_expression()?;
    println!("{} = {}", target, expr.rendered(config.style));
    Ok(())
}
