//! Wall clock abstraction: owns "now" and "today" for the engine.
//!
//! RULE: nothing in the engine calls `Utc::now()` directly.
//! Instants and calendar dates flow through a `Clock` so tests can
//! pin time and step across calendar days.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use std::{cell::Cell, rc::Rc};

pub trait Clock {
    /// Current instant. Used for ledger and submission timestamps.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date. Used for the once-per-day spin rule.
    fn today(&self) -> NaiveDate;
}

/// Real time. Instants in UTC, calendar dates in the local zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Settable clock. Clones share the same instant, so a test can keep a
/// handle while the engine owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Rc::new(Cell::new(start)) }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.now.set(instant);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn today(&self) -> NaiveDate {
        self.now.get().date_naive()
    }
}
