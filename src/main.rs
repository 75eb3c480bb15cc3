use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use soulbrowser_core_types::ToolCall;
use soulbrowser_pagestate::config::{load_config, PageStateConfig};
use soulbrowser_pagestate::paging::{metrics, PageStateEngine, PaginationRequest};
use soulbrowser_pagestate::{PageStateTool, StaticSnapshot};
use tokio::io::AsyncReadExt;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// SoulBrowser page-state tooling: paginate accessibility snapshots under a token budget
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable debug mode
    #[arg(short, long)]
    debug: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    output: OutputFormat,

    /// Print paging metrics to stderr when the command finishes
    #[arg(long)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of a snapshot as a tool would return it
    Page(PageArgs),

    /// Show size estimate and page boundaries of a snapshot
    Stats(StatsArgs),

    /// Run a tool call against a snapshot file and print the response
    Call(CallArgs),

    /// Show build and configuration information
    Info,
}

#[derive(Args)]
struct PageArgs {
    /// Snapshot text file, `-` for stdin
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Token budget per page (defaults to the configured budget)
    #[arg(long, allow_negative_numbers = true)]
    max_tokens: Option<i64>,

    /// 0-based page index
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    page: i64,
}

#[derive(Args)]
struct StatsArgs {
    /// Snapshot text file, `-` for stdin
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Token budget per page (defaults to the configured budget)
    #[arg(long, allow_negative_numbers = true)]
    max_tokens: Option<i64>,
}

#[derive(Args)]
struct CallArgs {
    /// Snapshot text file, `-` for stdin
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Tool name, e.g. browser_snapshot or browser_click
    #[arg(long)]
    tool: String,

    /// Tool arguments as a JSON object
    #[arg(long, default_value = "{}")]
    params: String,

    /// Code reported by the action, if any
    #[arg(long)]
    code: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.debug)?;
    debug!("Starting soulbrowser-pagestate v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_deref()).await?;

    let result = match cli.command {
        Commands::Page(args) => cmd_page(args, &config, cli.output).await,
        Commands::Stats(args) => cmd_stats(args, &config, cli.output).await,
        Commands::Call(args) => cmd_call(args, &config, cli.output).await,
        Commands::Info => cmd_info(&config, cli.output),
    };

    if cli.metrics {
        let snapshot = serde_json::to_string_pretty(&metrics::snapshot())?;
        eprintln!("{}", snapshot);
    }

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Command failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(level: &str, debug: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

async fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read snapshot from stdin")?;
        return Ok(text);
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read snapshot {}", path.display()))
}

async fn cmd_page(args: PageArgs, config: &PageStateConfig, output: OutputFormat) -> Result<()> {
    let text = read_input(&args.input).await?;
    let request = PaginationRequest::new(
        args.max_tokens.unwrap_or(config.paging.default_max_tokens),
        args.page,
    );
    let engine = PageStateEngine::from_policy(&config.paging);
    let outcome = engine.paginator().paginate(&text, request);
    let rendered = engine.formatter().format(&outcome);
    info!(
        outcome = outcome.kind().as_str(),
        max_tokens = request.max_tokens,
        page = request.page,
        "page rendered"
    );

    match output {
        OutputFormat::Human => println!("{}", rendered),
        OutputFormat::Json => {
            let value = json!({
                "outcome": outcome.kind(),
                "totalPages": outcome.total_pages(),
                "pageState": rendered,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}

async fn cmd_stats(args: StatsArgs, config: &PageStateConfig, output: OutputFormat) -> Result<()> {
    let text = read_input(&args.input).await?;
    let budget = args.max_tokens.unwrap_or(config.paging.default_max_tokens);
    let (max_tokens, _) = PaginationRequest::new(budget, 0)
        .validate()
        .context("Invalid token budget")?;

    let engine = PageStateEngine::from_policy(&config.paging);
    let set = engine.paginator().page_set(&text, max_tokens);

    match output {
        OutputFormat::Human => {
            println!("Estimated tokens: {}", set.total_tokens);
            println!("Budget: {} tokens per page", set.max_tokens);
            println!(
                "Pages: {}{}",
                set.total_pages(),
                if set.truncated { " (truncated)" } else { "" }
            );
            for page in &set.pages {
                println!(
                    "  [{}] {} tokens, {} chars{}",
                    page.index,
                    page.tokens,
                    page.chars,
                    if page.oversized { ", oversized line" } else { "" }
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&set)?),
    }
    Ok(())
}

async fn cmd_call(args: CallArgs, config: &PageStateConfig, output: OutputFormat) -> Result<()> {
    let text = read_input(&args.input).await?;
    let payload: Value = serde_json::from_str(&args.params).context("Invalid --params JSON")?;
    let call = ToolCall::new(args.tool, payload);

    let tool = PageStateTool::new(config.paging.clone(), Arc::new(StaticSnapshot::new(text)));
    let response = tool
        .respond(&call, args.code)
        .await
        .with_context(|| format!("Tool call {} failed", call.tool))?;

    match output {
        OutputFormat::Human => println!("{}", response.render()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
    }
    Ok(())
}

fn cmd_info(config: &PageStateConfig, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Human => {
            println!("soulbrowser-pagestate v{}", env!("CARGO_PKG_VERSION"));
            println!("Build date: {}", env!("BUILD_DATE"));
            println!("Git hash: {}", env!("GIT_HASH"));
            println!();
            print!("{}", serde_yaml::to_string(config)?);
        }
        OutputFormat::Json => {
            let value = json!({
                "version": env!("CARGO_PKG_VERSION"),
                "build_date": env!("BUILD_DATE"),
                "git_hash": env!("GIT_HASH"),
                "config": config,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}
