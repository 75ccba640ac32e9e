// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use thiserror::Error;

use crate::models::Transaction;
use crate::utils::fmt_short_date;

pub const EXPORT_HEADERS: [&str; 6] = [
    "Transaction Date",
    "Description",
    "Amount",
    "Type",
    "Notes",
    "Created At",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no transactions to export")]
    Empty,
    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Render transactions as CSV text in caller order: fixed header row, one
/// row per record, dates as short dates, amount as plain decimal text.
/// Quoting follows RFC 4180 (internal quotes doubled, numerics bare).
///
/// Exporting an empty set is an error so callers cannot silently write a
/// header-only file.
pub fn to_csv(transactions: &[Transaction]) -> Result<String, ExportError> {
    if transactions.is_empty() {
        return Err(ExportError::Empty);
    }
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(EXPORT_HEADERS)?;
    for t in transactions {
        wtr.write_record([
            fmt_short_date(&t.date),
            t.description.clone(),
            t.amount.to_string(),
            t.r#type.to_string(),
            t.notes.clone().unwrap_or_default(),
            fmt_short_date(&t.created_at),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Default output name carrying the current date, e.g.
/// `moneytrack-2025-01-15.csv`.
pub fn default_export_filename() -> String {
    format!("moneytrack-{}.csv", Utc::now().format("%Y-%m-%d"))
}
