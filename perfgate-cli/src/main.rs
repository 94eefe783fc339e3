use clap::{Parser, Subcommand};
use perfgate_cli::pipeline;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "perfgate", version)]
#[command(about = "Aggregate load-test results and gate them on performance budgets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate raw tool results into a normalized summary
    Report {
        /// Directory holding raw results and generated reports
        #[arg(long, default_value = "reports")]
        reports_dir: PathBuf,
        /// k6 NDJSON stream (default: <reports-dir>/k6-results.json)
        #[arg(long)]
        k6_results: Option<PathBuf>,
        /// Artillery aggregate document (default: <reports-dir>/artillery-results.json)
        #[arg(long)]
        artillery_results: Option<PathBuf>,
        /// Also render report.html
        #[arg(long)]
        html: bool,
    },
    /// Evaluate a summary against performance budgets
    Check {
        /// Directory holding summary.json and generated reports
        #[arg(long, default_value = "reports")]
        reports_dir: PathBuf,
        /// Budget JSON document (built-in defaults when omitted)
        #[arg(long)]
        budget: Option<PathBuf>,
        /// Also render budget-report.html
        #[arg(long)]
        html: bool,
    },
}

fn main() {
    // Initialize JSON logging once.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let env_filter = match "info".parse() {
        Ok(directive) => env_filter.add_directive(directive),
        Err(_) => env_filter, // fallback to default if parsing fails
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            reports_dir,
            k6_results,
            artillery_results,
            html,
        } => {
            if let Err(e) = pipeline::run_report(
                &reports_dir,
                k6_results.as_deref(),
                artillery_results.as_deref(),
                html,
            ) {
                tracing::error!(error = %e, "Report generation failed");
                eprintln!("❌ Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Check {
            reports_dir,
            budget,
            html,
        } => match pipeline::run_check(&reports_dir, budget.as_deref(), html) {
            Ok(verdict) => std::process::exit(verdict.exit_code()),
            Err(e) => {
                tracing::error!(error = %e, "Budget check failed");
                eprintln!("❌ Error: {}", e);
                std::process::exit(1);
            }
        },
    }
}
