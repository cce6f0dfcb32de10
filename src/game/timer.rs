use std::fmt;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimeLimit {
    Bounded(Duration),
    Unbounded,
}

impl fmt::Display for TimeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeLimit::Bounded(d) => write!(f, "{}s", d.as_secs()),
            TimeLimit::Unbounded => f.write_str("unlimited"),
        }
    }
}

/// Counts down towards a time limit as ticks are delivered to it.
/// A stopped countdown ignores ticks and never expires.
#[derive(Clone, Debug)]
pub struct Countdown {
    time_limit: TimeLimit,
    time_elapsed: Duration,
    running: bool,
}

impl Countdown {
    pub fn new(time_limit: TimeLimit) -> Self {
        Countdown {
            time_limit,
            time_elapsed: Duration::default(),
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.time_elapsed = Duration::default();
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Changes the limit and restarts the countdown if it was running.
    pub fn set_time_limit(&mut self, time_limit: TimeLimit) {
        self.time_limit = time_limit;
        if self.running {
            self.start();
        }
    }

    pub fn time_limit(&self) -> TimeLimit {
        self.time_limit
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.running {
            self.time_elapsed += dt;
        }
    }

    pub fn time_remaining(&self) -> Option<Duration> {
        match self.time_limit {
            TimeLimit::Bounded(limit) => Some(limit.checked_sub(self.time_elapsed).unwrap_or_default()),
            TimeLimit::Unbounded => None,
        }
    }

    pub fn is_expired(&self) -> bool {
        if !self.running {
            return false;
        }
        match self.time_limit {
            TimeLimit::Bounded(limit) => self.time_elapsed >= limit,
            TimeLimit::Unbounded => false,
        }
    }
}
