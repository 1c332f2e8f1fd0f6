mod app;
mod help;
mod keyboard;
mod theme;
use crate::app::App;
use anyhow::Context;
use datekeys::{CalendarOptions, CalendarState, Locale, Session, YearRange, format_date};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        options: CalendarOptions,
        log: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut options = CalendarOptions::new();
        let mut log = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('y') | Arg::Long("year") => {
                    options = options.initial_year(parser.value()?.parse()?);
                }
                Arg::Short('m') | Arg::Long("month") => {
                    options = options.initial_month(parser.value()?.parse()?);
                }
                Arg::Short('r') | Arg::Long("range") => {
                    options = options.year_range(parser.value()?.parse::<YearRange>()?);
                }
                Arg::Short('l') | Arg::Long("locale") => {
                    options = options.locale(parser.value()?.parse::<Locale>()?);
                }
                Arg::Long("log") => log = Some(PathBuf::from(parser.value()?)),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run { options, log })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run { options, log } => {
                if let Some(path) = log {
                    init_logging(&path)?;
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let state = CalendarState::new(options, today)?;
                let picked = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    let picked = App::new(Session::new(state)).run(terminal)?;
                    Ok(picked)
                })?;
                if let Some(date) = picked {
                    println!("{}", format_date(date));
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: datekeys [<options>]");
                println!();
                println!("Pick a date from a paged calendar keyboard");
                println!();
                println!("Options:");
                println!("  -y, --year <YEAR>        Year to show first [default: this year]");
                println!("  -m, --month <1-12>       Month to show first [default: this month]");
                println!("  -r, --range <MIN:MAX>    Years that may be paged through");
                println!("  -l, --locale <en|ru>     Language of month and weekday names");
                println!("      --log <FILE>         Write debug logs to FILE");
                println!("  -h, --help               Display this help message and exit");
                println!("  -V, --version            Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

// The terminal belongs to the keyboard, so logs only go to a file, and only
// when asked for.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install log subscriber")
}
