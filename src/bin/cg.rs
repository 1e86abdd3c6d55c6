extern crate calgrid as lib;

use chrono::{Datelike, Local, Month, NaiveDate};
use flexi_logger::{FileSpec, Logger};
use lib::app::App;
use lib::calendar::Calendar;
use lib::events::{Dispatcher, SelectionSink};
use lib::render::{grid_to_toml, MonthView, Theme};
use lib::{Error, ErrorKind, MonthIndex};
use num_traits::FromPrimitive;
use std::io::{stdout, Write};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "cg",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "Calgrid - A month calendar for the terminal."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only show calendar non-interactively"
    )]
    pub show: bool,

    #[structopt(long = "toml", help = "print the grid as TOML (with --show)")]
    pub toml: bool,

    #[structopt(short = "y", long = "year", help = "year to show")]
    pub year: Option<i32>,

    #[structopt(short = "m", long = "month", help = "month to show (1-12)")]
    pub month: Option<u32>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

impl Args {
    fn default_value(&self) -> lib::Result<Option<NaiveDate>> {
        if self.year.is_none() && self.month.is_none() {
            return Ok(None);
        }

        let today = Local::now().date_naive();
        let year = self.year.unwrap_or_else(|| today.year());
        let month = match self.month {
            Some(m) => Month::from_u32(m).ok_or_else(|| {
                Error::new(
                    ErrorKind::DateOutOfRange,
                    &format!("month {} is not in 1-12", m),
                )
            })?,
            None => Month::from_u32(today.month()).ok_or(ErrorKind::DateOutOfRange)?,
        };

        MonthIndex::from_month(month, year).map(|m| Some(m.first_day()))
    }
}

fn show<W: Write>(args: &Args, calendar: &Calendar, theme: &Theme, mut out: W) -> lib::Result<()> {
    if args.toml {
        write!(out, "{}", grid_to_toml(calendar)?)?;
    } else {
        let view = MonthView::new(calendar, theme).today(Local::now().date_naive());
        write!(out, "{}", view)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    } else if !args.show {
        // keep the screen clean while drawing
        logger = logger.log_to_file(FileSpec::default().suppress_timestamp());
    }

    logger.start()?;

    std::panic::set_hook(Box::new(move |info| {
        eprintln!("Calgrid ran into a fatal error!");
        eprintln!(
            "Consider filing an issue with a log file and the backtrace below at {}",
            env!("CARGO_PKG_REPOSITORY")
        );

        eprintln!("{}", info);
        eprintln!("{:?}", backtrace::Backtrace::new());
    }));

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let calendar = Calendar::new(args.default_value()?)?
        .week_start(config.week_start.0)
        .locale(config.locale);

    if args.show {
        let stdout = stdout();
        show(&args, &calendar, &config.theme, stdout.lock())?;
        return Ok(());
    }

    let dispatcher = Dispatcher::from_config(&config);
    let calendar = calendar.on_change(SelectionSink(dispatcher.event_sink().clone()));

    let mut app = App::new(&config, calendar);

    let stdout = stdout();
    app.run(dispatcher, stdout.lock())?;

    Ok(())
}
