use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Default timezone for as-of dates.
/// This is the canonical timezone used to convert UTC instants to "today".
pub const DEFAULT_AS_OF_TZ: Tz = chrono_tz::America::New_York;

/// Source of the current instant.
///
/// Aging is always computed relative to a date supplied by a clock (or an
/// explicit as-of date), never by reading the machine clock inline.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given instant. Used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Freezes the clock at noon UTC of `date`, which is still `date` in
    /// every zone from UTC-12 to UTC+11.
    pub fn at_date(date: NaiveDate) -> Self {
        let noon = chrono::NaiveTime::MIN + chrono::Duration::hours(12);
        FixedClock(date.and_time(noon).and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Converts a UTC instant to an as-of date in the given timezone.
///
/// This is the single source of truth for converting instants to "today".
pub fn as_of_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Resolves the as-of date: an explicit date wins, otherwise the clock's
/// current instant is converted in `tz`.
pub fn resolve_as_of(explicit: Option<NaiveDate>, clock: &dyn Clock, tz: Tz) -> NaiveDate {
    explicit.unwrap_or_else(|| as_of_date_from_utc(clock.now(), tz))
}
