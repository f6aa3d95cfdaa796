//! Timestamps for `created_at` / `updated_at`
//!
//! Stored as RFC 3339 UTC with fixed microsecond precision so that string
//! order equals time order.

use std::cell::Cell;

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};

/// Issues strictly increasing timestamps for one connection
#[derive(Debug, Default)]
pub(crate) struct Clock {
    last: Cell<Option<DateTime<Utc>>>,
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        self.after(None)
    }

    /// A stamp later than both the last one issued and `floor`
    pub fn after(&self, floor: Option<DateTime<Utc>>) -> DateTime<Utc> {
        let mut stamp = Utc::now().trunc_subsecs(6);
        for prev in [self.last.get(), floor].into_iter().flatten() {
            if stamp <= prev {
                stamp = prev + Duration::microseconds(1);
            }
        }
        self.last.set(Some(stamp));
        stamp
    }
}

pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
}
