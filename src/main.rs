//! PriceWise - AI-Powered Pricing Advisor
//!
//! Searches a bounded price grid with a fitted demand model and recommends
//! the revenue-maximizing base price for the given market conditions.
//!
//! # Usage
//!
//! ```bash
//! # Run the dashboard API (default)
//! cargo run --release
//!
//! # One-shot simulation with explicit market conditions
//! cargo run --release -- optimize --competitor-price 250 --inventory 100 \
//!     --customer-type brand-loyal --weather sunny --day friday
//!
//! # Serve with a trained artifact instead of the built-in demo model
//! cargo run --release -- --model ./linreg_model.json serve
//! ```
//!
//! # Environment Variables
//!
//! - `PRICEWISE_CONFIG`: Path to a TOML config file (default: ./pricewise.toml)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

use pricewise::api::{create_app, DashboardState};
use pricewise::config::AppConfig;
use pricewise::model::{DemandModel, LinearDemandModel};
use pricewise::optimization::optimize_price;
use pricewise::report::render_report;
use pricewise::types::{CustomerSegment, DayOfWeek, MarketContext, Weather};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "pricewise")]
#[command(about = "PriceWise AI-powered pricing advisor")]
#[command(version)]
struct CliArgs {
    /// Override the server bind address (default: "0.0.0.0:8080")
    #[arg(short, long)]
    addr: Option<String>,

    /// Path to a demand model artifact (JSON), overrides the config file
    #[arg(long)]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Run the dashboard HTTP API (the default when no subcommand is given)
    Serve,

    /// Run one price simulation and print the report to stdout
    Optimize(OptimizeArgs),
}

/// Market conditions and search overrides for a one-shot simulation.
/// Unset numeric flags fall back to the configured presets.
#[derive(clap::Args, Debug)]
struct OptimizeArgs {
    /// Product label for the report header
    #[arg(long, default_value = "Smartphone")]
    product: String,

    /// Competitor price ($)
    #[arg(long)]
    competitor_price: Option<f64>,

    /// Current inventory (units)
    #[arg(long)]
    inventory: Option<u32>,

    /// Customer segment to simulate
    #[arg(long, value_enum, default_value = "average")]
    customer_type: CustomerSegment,

    /// Weather condition
    #[arg(long, value_enum, default_value = "sunny")]
    weather: Weather,

    /// Day of the week
    #[arg(long, value_enum, default_value = "monday")]
    day: DayOfWeek,

    /// Lowest candidate price ($)
    #[arg(long)]
    price_min: Option<f64>,

    /// Highest candidate price ($)
    #[arg(long)]
    price_max: Option<f64>,

    /// Grid spacing ($)
    #[arg(long)]
    step: Option<f64>,
}

// ============================================================================
// Model Loading
// ============================================================================

/// Load the demand model from the CLI override, then the config file, then
/// fall back to the built-in demo model.
fn load_model(cli_model: Option<&str>) -> Result<LinearDemandModel> {
    let configured = AppConfig::active().model.artifact_path.clone();
    let path = cli_model.map(std::path::PathBuf::from).or(configured);

    match path {
        Some(p) => LinearDemandModel::load(&p)
            .with_context(|| format!("failed to load model artifact {}", p.display())),
        None => {
            info!("No model artifact configured, using the built-in demo model");
            Ok(LinearDemandModel::builtin())
        }
    }
}

// ============================================================================
// Modes
// ============================================================================

/// One-shot simulation: build the context from flags and presets, run the
/// grid search, print the report.
fn run_simulation(model: &LinearDemandModel, args: &OptimizeArgs) -> Result<()> {
    let cfg = AppConfig::active();
    let context = MarketContext {
        competitor_price: args.competitor_price.unwrap_or(cfg.market.competitor_price),
        inventory: args.inventory.unwrap_or(cfg.market.inventory),
        customer_segment: args.customer_type,
        weather: args.weather,
        day_of_week: args.day,
    };
    if let Err(problems) = context.validate() {
        anyhow::bail!("invalid market context: {}", problems.join("; "));
    }

    let range = (
        args.price_min.unwrap_or(cfg.optimizer.price_min),
        args.price_max.unwrap_or(cfg.optimizer.price_max),
    );
    let step = args.step.unwrap_or(cfg.optimizer.step);

    info!(
        product = %args.product,
        competitor_price = context.competitor_price,
        inventory = context.inventory,
        segment = %context.customer_segment,
        weather = %context.weather,
        day = %context.day_of_week,
        "Running price simulation"
    );

    let result = optimize_price(&context, model, range, step)?;
    println!("{}", render_report(&args.product, &result));
    Ok(())
}

/// Serve the dashboard API until Ctrl+C.
async fn run_server(model: LinearDemandModel, addr: &str) -> Result<()> {
    let state = DashboardState::new(model);
    let app = create_app(state);

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, shutting down");
        shutdown_token.cancel();
    });

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr, "Dashboard API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel_token.cancelled().await })
        .await
        .context("server error")?;

    info!("Shutdown complete");
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    AppConfig::load().install();
    let model = load_model(args.model.as_deref())?;
    info!(model = model.model_name(), "Demand model ready");

    match args.command {
        Some(SubCommand::Optimize(optimize_args)) => run_simulation(&model, &optimize_args),
        Some(SubCommand::Serve) | None => {
            let addr = args
                .addr
                .unwrap_or_else(|| AppConfig::active().server.addr.clone());
            run_server(model, &addr).await
        }
    }
}
