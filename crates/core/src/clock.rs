//! Reference clock.
//!
//! Classification and date validation compare against "now". Operations take
//! the instant as an argument; only the outermost caller reads the clock.

use chrono::{DateTime, Utc};

/// Source of the current instant.
pub trait Now: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Now for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
