use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// A callback running repeatedly on a background thread until cleared.
pub struct Interval {
    stop: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Interval {
    pub const MIN_DELAY: Duration = Duration::from_millis(1);

    pub fn start<F>(delay: Duration, mut callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let delay = delay.max(Self::MIN_DELAY);
        let (stop, stopped) = mpsc::channel::<()>();

        let handle = thread::spawn(move || loop {
            match stopped.recv_timeout(delay) {
                Err(RecvTimeoutError::Timeout) => callback(),
                _ => break,
            }
        });

        Interval {
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    /// Stops the interval. The callback is not called anymore once this
    /// returns.
    pub fn clear(&mut self) {
        // dropping the sender wakes up the waiting thread
        self.stop.take();

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("interval callback panicked");
            }
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.handle.is_none()
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.clear();
    }
}
