use chrono::Local;
use std::convert::TryFrom;
use std::io::Write;
use termion::{clear, cursor};

use crate::calendar::{Calendar, Selection};
use crate::command::{parse_command, Cmd};
use crate::config::Config;
use crate::error::{Error, ErrorKind, Result};
use crate::events::{Dispatcher, Event};
use crate::month::MonthIndex;
use crate::render::MonthView;

pub struct App<'a> {
    config: &'a Config,
    calendar: Calendar<'a>,
    ticks: u64,
    last_selection: Option<Selection>,
    message: Option<String>,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, calendar: Calendar<'a>) -> App<'a> {
        App {
            config,
            calendar,
            ticks: 0,
            last_selection: None,
            message: None,
        }
    }

    pub fn calendar(&self) -> &Calendar<'a> {
        &self.calendar
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn execute(&mut self, cmd: Cmd) -> Result<bool> {
        match cmd {
            Cmd::Next(n) => self.calendar.advance_by(month_count(n)?)?,
            Cmd::Prev(n) => self.calendar.advance_by(-month_count(n)?)?,
            Cmd::Select(day) => {
                self.calendar.select_day(day);
            }
            Cmd::Click(index) => {
                if self.calendar.click(index).is_none() {
                    self.message = Some(format!("cell {} is not clickable", index));
                }
            }
            Cmd::Goto(year, month) => {
                self.calendar.show_month(MonthIndex::from_month(month, year)?);
            }
            Cmd::Today => self.calendar.show_date(&Local::now().date_naive())?,
            Cmd::Quit => return Ok(false),
        }

        Ok(true)
    }

    /// Applies one event. Returns `false` once the app should quit.
    pub fn handle(&mut self, event: Event) -> bool {
        match event {
            Event::Update => {
                self.ticks += 1;
                true
            }
            Event::Selected(selection) => {
                self.last_selection = Some(selection);
                true
            }
            Event::InputClosed => {
                log::info!("input closed, quitting");
                false
            }
            Event::Input(line) if line.trim().is_empty() => true,
            Event::Input(line) => {
                self.message = None;
                match parse_command(&line).and_then(|cmd| self.execute(cmd)) {
                    Ok(run) => run,
                    Err(e) => {
                        log::warn!("{}", e);
                        self.message = Some(e.to_string());
                        true
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, out: &mut W) -> Result<()> {
        write!(out, "{}{}", clear::All, cursor::Goto(1, 1))?;

        let view = MonthView::new(&self.calendar, &self.config.theme)
            .today(Local::now().date_naive());
        write!(out, "{}", view.to_string().replace('\n', "\r\n"))?;

        write!(out, "\r\nticks: {}", self.ticks)?;
        if let Some(selection) = &self.last_selection {
            write!(out, "  selected: {}", selection)?;
        }
        write!(out, "\r\n")?;
        if let Some(msg) = &self.message {
            write!(out, "{}\r\n", msg)?;
        }
        write!(out, "> ")?;

        out.flush()?;
        Ok(())
    }

    pub fn run<W: Write>(&mut self, dispatcher: Dispatcher, mut out: W) -> Result<()> {
        let mut run = true;

        while run {
            self.draw(&mut out)?;

            run = match dispatcher.next() {
                Ok(event) => self.handle(event),
                Err(_) => false,
            };
        }

        Ok(())
    }
}

fn month_count(n: u32) -> Result<i32> {
    i32::try_from(n).map_err(|_| {
        Error::new(
            ErrorKind::DateOutOfRange,
            &format!("cannot move {} months", n),
        )
    })
}
