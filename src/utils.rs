// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

static MDY_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("valid regex"));

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized date '{0}'")]
pub struct InvalidDateError(pub String);

/// Convert heterogeneous textual dates to a canonical UTC timestamp.
///
/// `MM/DD/YYYY` (the bank-statement form) and date-only inputs are anchored
/// at UTC midnight; timestamped inputs are accepted as RFC 3339 or
/// `YYYY-MM-DD HH:MM:SS` (read as UTC).
pub fn normalize_date(input: &str) -> Result<DateTime<Utc>, InvalidDateError> {
    let s = input.trim();
    if let Some(caps) = MDY_DATE.captures(s) {
        let month: u32 = caps[1].parse().map_err(|_| InvalidDateError(s.into()))?;
        let day: u32 = caps[2].parse().map_err(|_| InvalidDateError(s.into()))?;
        let year: i32 = caps[3].parse().map_err(|_| InvalidDateError(s.into()))?;
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| InvalidDateError(s.to_string()))?;
        return Ok(midnight_utc(date));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&dt));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(midnight_utc(date));
    }
    Err(InvalidDateError(s.to_string()))
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight is valid"))
}

/// Last instant of the timestamp's UTC calendar day. Used to make the upper
/// bound of a date-range filter cover the whole day.
pub fn end_of_day(ts: DateTime<Utc>) -> DateTime<Utc> {
    let eod = ts
        .date_naive()
        .and_hms_nano_opt(23, 59, 59, 999_999_999)
        .expect("end of day is valid");
    Utc.from_utc_datetime(&eod)
}

/// Short date rendering used by CSV export and table output.
pub fn fmt_short_date(ts: &DateTime<Utc>) -> String {
    ts.format("%m/%d/%Y").to_string()
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    if *d < Decimal::ZERO {
        format!("-${:.2}", -d)
    } else {
        format!("${:.2}", d)
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
