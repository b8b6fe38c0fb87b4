use anyhow::{Result, bail};
use chrono::{Datelike, Local, Utc};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use turnover::bookings::BookingStore;
use turnover::cli::{self, Command, Invocation};
use turnover::client::FeedClient;
use turnover::config::{Config, SAMPLE_CONFIG};
use turnover::context::{AppContext, SharedContext, StandardContext};
use turnover::controller::{Planner, Snapshot};
use turnover::ics::parse_calendar_document;
use turnover::view;

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .add_filter_allow_str("turnover")
        .build();
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn load_config(ctx: &dyn AppContext) -> Result<Config> {
    match Config::load(ctx) {
        Ok(config) => Ok(config),
        Err(e) if Config::is_missing_config_error(&e) => {
            let path = Config::get_path_string(ctx)?;
            eprintln!("No configuration found. Create {} with something like:\n", path);
            eprintln!("{}", SAMPLE_CONFIG);
            std::process::exit(1);
        }
        Err(e) => Err(e),
    }
}

async fn refresh(ctx: SharedContext) -> Result<(Config, Snapshot)> {
    let config = load_config(ctx.as_ref())?;
    let client = FeedClient::from_config(&config)?;
    let planner = Planner::new(config, ctx);
    let snapshot = planner.refresh(&client).await;
    Ok((planner.config, snapshot))
}

async fn run(invocation: Invocation, binary_name: &str) -> Result<()> {
    let ctx: SharedContext = Arc::new(StandardContext::new(invocation.root.clone()));
    let color = invocation.color
        && env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal();

    match invocation.command {
        Command::Help => cli::print_help(binary_name),
        Command::List => {
            let (config, snapshot) = refresh(ctx).await?;
            let today = Local::now().date_naive();
            print!(
                "{}",
                view::render_list(&config.properties, &snapshot.windows, today, color)
            );
        }
        Command::Calendar(month) => {
            let (year, month) = month.unwrap_or_else(|| {
                let today = Local::now().date_naive();
                (today.year(), today.month())
            });
            let (config, snapshot) = refresh(ctx).await?;
            print!(
                "{}",
                view::render_month(
                    &config.properties,
                    &snapshot.timelines,
                    &snapshot.windows,
                    year,
                    month,
                    color
                )?
            );
        }
        Command::Export => {
            let (_, snapshot) = refresh(ctx).await?;
            print!("{}", view::export_ics(&snapshot.windows, Utc::now()));
        }
        Command::Parse(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
            let records = parse_calendar_document(&text);
            for record in &records {
                println!(
                    "{}  →  {}  {}{}",
                    record.start,
                    record.end,
                    record.summary.as_deref().unwrap_or("(no summary)"),
                    record
                        .uid
                        .as_deref()
                        .map(|uid| format!("  [{}]", uid))
                        .unwrap_or_default()
                );
            }
            eprintln!("{} booking(s)", records.len());
        }
        Command::Bookings => {
            let bookings = BookingStore::load(ctx.as_ref())?;
            if bookings.is_empty() {
                println!("No manual bookings");
            }
            for b in bookings {
                println!("{}  {}  {} → {}  {}", b.id, b.property_id, b.start, b.end, b.note);
            }
        }
        Command::Book {
            property_id,
            start,
            end,
            note,
        } => {
            let config = load_config(ctx.as_ref())?;
            if config.property(&property_id).is_none() {
                bail!("Unknown property '{}'", property_id);
            }
            let booking = BookingStore::add(ctx.as_ref(), &property_id, start, end, &note)?;
            println!("{}", booking.id);
        }
        Command::Unbook(id) => {
            if !BookingStore::remove(ctx.as_ref(), &id)? {
                bail!("No booking with id '{}'", id);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let binary_name = args
        .first()
        .and_then(|p| Path::new(p).file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("turnover")
        .to_string();

    let invocation = match cli::parse_args(args.into_iter().skip(1)) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!("Run '{} --help' for usage.", binary_name);
            std::process::exit(2);
        }
    };

    init_logging(invocation.verbose);
    run(invocation, &binary_name).await
}
