use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use crate::calendar::{Selection, SelectionObserver};
use crate::config::Config;
use crate::interval::Interval;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Input(String),
    /// Stdin reached end of file.
    InputClosed,
    Update,
    Selected(Selection),
}

pub struct Dispatcher {
    rx: mpsc::Receiver<Event>,
    tx: mpsc::Sender<Event>,
    _input_handle: thread::JoinHandle<()>,
    _ticker: Interval,
}

impl Default for Dispatcher {
    fn default() -> Dispatcher {
        Dispatcher::from_config(&Config::default())
    }
}

impl Dispatcher {
    pub fn from_config(config: &Config) -> Dispatcher {
        let (tx, rx) = mpsc::channel();
        let input_handle = {
            let tx = tx.clone();
            thread::spawn(move || {
                let stdin = io::stdin();
                let stdin = stdin.lock();
                for line in stdin.lines() {
                    match line {
                        Ok(line) => {
                            if tx.send(Event::Input(line)).is_err() {
                                return;
                            }
                        }
                        Err(e) => log::warn!("Error reading input: {}", e),
                    }
                }
                let _ = tx.send(Event::InputClosed);
            })
        };
        let ticker = {
            let tx = tx.clone();
            Interval::start(config.tick_rate(), move || {
                let _ = tx.send(Event::Update);
            })
        };
        Dispatcher {
            rx,
            tx,
            _input_handle: input_handle,
            _ticker: ticker,
        }
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }

    pub fn event_sink(&self) -> &mpsc::Sender<Event> {
        &self.tx
    }
}

/// Forwards selections into an event channel.
pub struct SelectionSink(pub mpsc::Sender<Event>);

impl SelectionObserver for SelectionSink {
    fn notify(&mut self, selection: Selection) {
        if self.0.send(Event::Selected(selection)).is_err() {
            log::warn!("Dropping selection {}, event loop is gone", selection);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Calendar;
    use chrono::NaiveDate;

    #[test]
    fn selections_reach_the_channel() {
        let (tx, rx) = mpsc::channel();
        let mut calendar = Calendar::new(NaiveDate::from_ymd_opt(2024, 1, 1))
            .unwrap()
            .on_change(SelectionSink(tx));

        let selection = calendar.select_day(15);
        assert_eq!(rx.try_recv(), Ok(Event::Selected(selection)));
    }
}
