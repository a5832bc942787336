//! Timestamp, interval and result time parameters.
//!
//! Timestamps are ISO 8601. An offset is optional; local forms are read
//! as UTC. Intervals are `start/end`, `start/duration` or `duration/end`,
//! where `now` stands for the current instant.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::errors::ParameterError;
use crate::parameters::ALL_TOKEN;

const LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse one timestamp of parameter `param`.
pub fn parse_timestamp(param: &str, raw: &str) -> Result<DateTime<Utc>, ParameterError> {
    let raw = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Ok(t.with_timezone(&Utc));
    }
    for format in LOCAL_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(t.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
        .ok_or_else(|| ParameterError::InvalidTimestamp {
            param: param.to_string(),
            value: raw.to_string(),
        })
}

/// A closed time interval, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Parse an interval of parameter `param`, resolving `now` to `now`.
    pub fn parse_at(param: &str, raw: &str, now: DateTime<Utc>) -> Result<Self, ParameterError> {
        let invalid = || ParameterError::InvalidInterval {
            param: param.to_string(),
            value: raw.to_string(),
        };

        let (first, second) = raw.trim().split_once('/').ok_or_else(invalid)?;
        let first = Endpoint::parse(param, first, now)?;
        let second = Endpoint::parse(param, second, now)?;

        let interval = match (first, second) {
            (Endpoint::Instant(start), Endpoint::Instant(end)) => Self::new(start, end),
            (Endpoint::Instant(start), Endpoint::Period(period)) => {
                Self::new(start, period.after(start).ok_or_else(invalid)?)
            }
            (Endpoint::Period(period), Endpoint::Instant(end)) => {
                Self::new(period.before(end).ok_or_else(invalid)?, end)
            }
            (Endpoint::Period(_), Endpoint::Period(_)) => return Err(invalid()),
        };

        if interval.start > interval.end {
            return Err(invalid());
        }
        Ok(interval)
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant <= self.end
    }
}

enum Endpoint {
    Instant(DateTime<Utc>),
    Period(Period),
}

impl Endpoint {
    fn parse(param: &str, raw: &str, now: DateTime<Utc>) -> Result<Self, ParameterError> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("now") {
            return Ok(Endpoint::Instant(now));
        }
        if raw.starts_with('P') || raw.starts_with('p') {
            return Period::parse(raw).map(Endpoint::Period).ok_or_else(|| {
                ParameterError::InvalidInterval {
                    param: param.to_string(),
                    value: raw.to_string(),
                }
            });
        }
        parse_timestamp(param, raw).map(Endpoint::Instant)
    }
}

/// An ISO 8601 duration such as `P1W`, `P1M` or `PT12H`. Years and months
/// are calendar based, everything else is a fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Period {
    months: u32,
    fixed: Duration,
}

impl Period {
    fn parse(raw: &str) -> Option<Self> {
        let body = raw.get(1..)?.to_ascii_uppercase();
        let (date_part, time_part) = match body.split_once('T') {
            Some((d, t)) if !t.is_empty() => (d.to_string(), Some(t.to_string())),
            Some(_) => return None,
            None => (body, None),
        };

        let mut period = Period {
            months: 0,
            fixed: Duration::zero(),
        };
        let mut any = false;

        for (value, unit) in components(&date_part)? {
            any = true;
            match unit {
                'Y' => period.months = period.months.checked_add(u32::try_from(value).ok()?.checked_mul(12)?)?,
                'M' => period.months = period.months.checked_add(u32::try_from(value).ok()?)?,
                'W' => period.fixed = period.fixed.checked_add(&Duration::try_weeks(value)?)?,
                'D' => period.fixed = period.fixed.checked_add(&Duration::try_days(value)?)?,
                _ => return None,
            }
        }
        for (value, unit) in components(time_part.as_deref().unwrap_or(""))? {
            any = true;
            let step = match unit {
                'H' => Duration::try_hours(value)?,
                'M' => Duration::try_minutes(value)?,
                'S' => Duration::try_seconds(value)?,
                _ => return None,
            };
            period.fixed = period.fixed.checked_add(&step)?;
        }

        any.then_some(period)
    }

    fn after(&self, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        start
            .checked_add_months(Months::new(self.months))?
            .checked_add_signed(self.fixed)
    }

    fn before(&self, end: DateTime<Utc>) -> Option<DateTime<Utc>> {
        end.checked_sub_months(Months::new(self.months))?
            .checked_sub_signed(self.fixed)
    }
}

/// Split `3D12H` into `[(3, 'D'), (12, 'H')]`.
fn components(s: &str) -> Option<Vec<(i64, char)>> {
    let mut out = Vec::new();
    let mut digits = String::new();
    for c in s.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            if digits.is_empty() {
                return None;
            }
            out.push((digits.parse().ok()?, c));
            digits.clear();
        }
    }
    digits.is_empty().then_some(out)
}

/// Result times a request selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "instants")]
pub enum ResultTimes {
    /// Every result time, requested with the `all` token.
    All,
    Only(BTreeSet<DateTime<Utc>>),
}

impl ResultTimes {
    /// Parse the values of parameter `param`. `None` when no value was given.
    pub fn from_values(param: &str, values: &BTreeSet<String>) -> Result<Option<Self>, ParameterError> {
        if values.is_empty() {
            return Ok(None);
        }
        if values.iter().any(|v| v.eq_ignore_ascii_case(ALL_TOKEN)) {
            return Ok(Some(ResultTimes::All));
        }
        values
            .iter()
            .map(|v| parse_timestamp(param, v))
            .collect::<Result<BTreeSet<_>, _>>()
            .map(|instants| Some(ResultTimes::Only(instants)))
    }

    pub fn admits(&self, instant: &DateTime<Utc>) -> bool {
        match self {
            ResultTimes::All => true,
            ResultTimes::Only(instants) => instants.contains(instant),
        }
    }
}
