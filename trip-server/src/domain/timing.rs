//! When the trip happens: leave now, depart at a time, or arrive by a time.
//!
//! The form sends a mode string plus an optional `datetime-local` value. This
//! module turns the pair into a [`Timing`], a tagged value that always carries
//! a valid timestamp when the mode needs one.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// Formats produced by `<input type="datetime-local">`.
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Errors from interpreting the timing fields of the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimingError {
    /// The mode selector sent a value we don't know
    #[error("unknown timing mode: {0:?}")]
    UnknownMode(String),

    /// Arrive-by was chosen without a date and time
    #[error("a date and time is required to {0}")]
    MissingTime(TimingMode),

    /// The date/time value could not be parsed
    #[error("invalid date and time {value:?}: expected YYYY-MM-DDTHH:MM")]
    InvalidTime { value: String },

    /// The client's UTC offset is out of range
    #[error("invalid UTC offset: {0} minutes")]
    InvalidOffset(i32),
}

/// The timing selector on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingMode {
    /// Leave now.
    Immediate,
    /// Leave at a given time.
    DepartAt,
    /// Arrive by a given time.
    ArriveAt,
}

impl TimingMode {
    /// Parse a mode from the selector value.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_server::domain::TimingMode;
    ///
    /// assert_eq!(TimingMode::parse("any").unwrap(), TimingMode::Immediate);
    /// assert_eq!(TimingMode::parse("depart").unwrap(), TimingMode::DepartAt);
    /// assert_eq!(TimingMode::parse("arrive-at").unwrap(), TimingMode::ArriveAt);
    /// assert!(TimingMode::parse("tomorrow").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimingError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" | "now" | "immediate" => Ok(Self::Immediate),
            "depart" | "depart-at" | "depart_at" => Ok(Self::DepartAt),
            "arrive" | "arrive-at" | "arrive_at" => Ok(Self::ArriveAt),
            _ => Err(TimingError::UnknownMode(s.to_string())),
        }
    }

    /// The selector value the page submits for this mode.
    pub fn form_value(&self) -> &'static str {
        match self {
            Self::Immediate => "any",
            Self::DepartAt => "depart",
            Self::ArriveAt => "arrive",
        }
    }

    /// Label shown in the selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Immediate => "Leave now",
            Self::DepartAt => "Depart at",
            Self::ArriveAt => "Arrive by",
        }
    }

    /// Whether the date/time picker is shown for this mode.
    pub fn requires_time(&self) -> bool {
        !matches!(self, Self::Immediate)
    }

    /// All modes, in selector order.
    pub fn all() -> [Self; 3] {
        [Self::Immediate, Self::DepartAt, Self::ArriveAt]
    }
}

impl fmt::Display for TimingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Immediate => "leave now",
            Self::DepartAt => "depart at a time",
            Self::ArriveAt => "arrive by a time",
        })
    }
}

/// Resolved trip timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    /// Depart at the moment the request is built.
    Immediate,
    /// Depart at the given time.
    DepartAt(DateTime<FixedOffset>),
    /// Arrive no later than the given time.
    ArriveAt(DateTime<FixedOffset>),
}

impl Timing {
    /// Resolve the form's mode and date/time value.
    ///
    /// An empty or missing value with [`TimingMode::DepartAt`] means "depart
    /// now" and resolves to [`Timing::Immediate`]. A value that is present but
    /// unparseable is always an error, as is a missing value for
    /// [`TimingMode::ArriveAt`]. The value is ignored for `Immediate`.
    pub fn resolve(
        mode: TimingMode,
        value: Option<&str>,
        offset: FixedOffset,
    ) -> Result<Self, TimingError> {
        let value = value.map(str::trim).filter(|v| !v.is_empty());

        match (mode, value) {
            (TimingMode::Immediate, _) => Ok(Self::Immediate),
            (TimingMode::DepartAt, None) => {
                tracing::debug!("depart-at without a time, leaving now");
                Ok(Self::Immediate)
            }
            (TimingMode::DepartAt, Some(v)) => Ok(Self::DepartAt(parse_timing_value(v, offset)?)),
            (TimingMode::ArriveAt, None) => Err(TimingError::MissingTime(mode)),
            (TimingMode::ArriveAt, Some(v)) => Ok(Self::ArriveAt(parse_timing_value(v, offset)?)),
        }
    }

    /// The mode this timing was resolved to.
    pub fn mode(&self) -> TimingMode {
        match self {
            Self::Immediate => TimingMode::Immediate,
            Self::DepartAt(_) => TimingMode::DepartAt,
            Self::ArriveAt(_) => TimingMode::ArriveAt,
        }
    }
}

/// Build a UTC offset from minutes east of UTC.
///
/// Browsers report `getTimezoneOffset()` as minutes *west*; the page negates
/// it before sending.
pub fn offset_from_minutes(minutes: i32) -> Result<FixedOffset, TimingError> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or(TimingError::InvalidOffset(minutes))
}

/// Parse a date/time value from the form.
///
/// RFC 3339 values carry their own offset. `datetime-local` values
/// (`YYYY-MM-DDTHH:MM[:SS]`) are interpreted at `offset`.
pub fn parse_timing_value(
    value: &str,
    offset: FixedOffset,
) -> Result<DateTime<FixedOffset>, TimingError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt);
    }

    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .and_then(|naive| naive.and_local_timezone(offset).single())
        .ok_or_else(|| TimingError::InvalidTime {
            value: value.to_string(),
        })
}
