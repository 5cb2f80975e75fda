use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::solver::GeoCoordinate;

/// Parse `51g40m18s` style coordinates. A leading `-` negates the value and
/// seconds may be fractional.
pub fn parse_dms(value: &str) -> Result<GeoCoordinate, String> {
    let s = value.trim();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let bad = || format!("expected <deg>g<min>m<sec>s, got '{}'", value);
    let (deg, rest) = rest.split_once(['g', 'G']).ok_or_else(bad)?;
    let (min, rest) = rest.split_once(['m', 'M']).ok_or_else(bad)?;
    let sec = rest
        .strip_suffix(['s', 'S'])
        .filter(|sec| !sec.is_empty())
        .ok_or_else(bad)?;

    let deg: u32 = deg.parse().map_err(|_| bad())?;
    let min: u32 = min.parse().map_err(|_| bad())?;
    let sec: f64 = sec.parse().map_err(|_| bad())?;
    if !sec.is_finite() || sec < 0.0 {
        return Err(bad());
    }

    let coordinate = GeoCoordinate::new(deg, min, sec);
    Ok(if negative {
        coordinate.negated()
    } else {
        coordinate
    })
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// RFC 3339 timestamps, or naive ISO 8601 ones which are taken as UTC.
/// Seconds may be omitted, and a bare date means midnight.
pub fn parse_time(value: &str) -> Result<DateTime<Utc>, String> {
    let s = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("cannot parse '{}' as an ISO 8601 timestamp", value))
}

/// Seconds, either as a plain number or a humantime duration (`30s`, `1m 30s`).
pub fn parse_seconds(value: &str) -> Result<f64, String> {
    let s = value.trim();
    if let Ok(seconds) = s.parse::<f64>() {
        return Ok(seconds);
    }
    humantime::parse_duration(s)
        .map(|d| d.as_secs_f64())
        .map_err(|e| format!("'{}': {}", value, e))
}

pub fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!("expected 'true' or 'false', got '{}'", value)),
    }
}
