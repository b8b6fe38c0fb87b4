// File: ./src/cli.rs
//! Command-line parsing and help text.
use crate::view::parse_month_arg;
use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    /// `None` means the current month.
    Calendar(Option<(i32, u32)>),
    Export,
    Parse(PathBuf),
    Bookings,
    Book {
        property_id: String,
        start: NaiveDate,
        end: NaiveDate,
        note: String,
    },
    Unbook(String),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub root: Option<PathBuf>,
    pub verbose: bool,
    pub color: bool,
    pub command: Command,
}

fn parse_day(arg: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(arg, "%Y-%m-%d")
        .with_context(|| format!("Expected a date like 2024-01-05, got '{}'", arg))
}

/// Parses everything after the binary name. Flags may appear anywhere.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Invocation> {
    let mut root = None;
    let mut verbose = false;
    let mut color = true;
    let mut help = false;
    let mut positional: Vec<String> = Vec::new();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-r" | "--root" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow!("{} requires a path", arg))?;
                root = Some(PathBuf::from(path));
            }
            "-v" | "--verbose" => verbose = true,
            "--no-color" => color = false,
            "-h" | "--help" | "help" => help = true,
            flag if flag.starts_with('-') && flag.len() > 1 => bail!("Unknown option '{}'", flag),
            _ => positional.push(arg),
        }
    }

    let command = if help {
        Command::Help
    } else {
        let mut rest = positional.into_iter();
        match rest.next().as_deref() {
            None | Some("list") => Command::List,
            Some("calendar") => match rest.next() {
                Some(month) => Command::Calendar(Some(parse_month_arg(&month)?)),
                None => Command::Calendar(None),
            },
            Some("export") => Command::Export,
            Some("parse") => {
                let file = rest.next().ok_or_else(|| anyhow!("parse requires a file"))?;
                Command::Parse(PathBuf::from(file))
            }
            Some("bookings") => Command::Bookings,
            Some("book") => {
                let usage = "book <property-id> <YYYY-MM-DD> <YYYY-MM-DD> [note...]";
                let property_id = rest.next().ok_or_else(|| anyhow!("Usage: {}", usage))?;
                let start = parse_day(&rest.next().ok_or_else(|| anyhow!("Usage: {}", usage))?)?;
                let end = parse_day(&rest.next().ok_or_else(|| anyhow!("Usage: {}", usage))?)?;
                let note = rest.collect::<Vec<_>>().join(" ");
                Command::Book {
                    property_id,
                    start,
                    end,
                    note,
                }
            }
            Some("unbook") => {
                let id = rest
                    .next()
                    .ok_or_else(|| anyhow!("unbook requires a booking id"))?;
                Command::Unbook(id)
            }
            Some(other) => bail!("Unknown command '{}'", other),
        }
    };

    Ok(Invocation {
        root,
        verbose,
        color,
        command,
    })
}

pub fn print_help(binary_name: &str) {
    println!(
        "Turnover v{} - Cleaning windows between short-term rental bookings",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [list]                                 Upcoming cleaning windows", binary_name);
    println!("    {} calendar [YYYY-MM]                     Month grid per property", binary_name);
    println!("    {} export                                 Windows as .ics on stdout", binary_name);
    println!("    {} parse <file.ics>                       Show the bookings in a file", binary_name);
    println!("    {} bookings                               List manual bookings", binary_name);
    println!("    {} book <property> <from> <to> [note]     Add a manual booking", binary_name);
    println!("    {} unbook <booking-id>                    Remove a manual booking", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -v, --verbose         Log feed activity to stderr.");
    println!("    --no-color            Disable ANSI colors.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("URGENCY:");
    println!("    URGENT    1 day between check-out and check-in");
    println!("    warning   2 days");
    println!("    normal    3 days or more");
    println!();
    println!("EXAMPLES:");
    println!("    {} calendar 2024-07", binary_name);
    println!("    {} book studio 2024-07-01 2024-07-04 Owner stay", binary_name);
    println!("    {} export > cleaning.ics", binary_name);
}
