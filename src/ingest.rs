// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Bank-statement CSV ingestion: header-driven row parsing followed by
//! best-effort normalization into canonical [`Transaction`] records.
//!
//! Bank exports routinely contain summary and blank rows, so a row missing
//! a required field or carrying an unparseable amount is dropped silently
//! and counted, not raised. Only file-level preconditions and tokenizer
//! failures surface as errors, and nothing reaches the store unless the
//! whole file parsed.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::Utc;
use csv::{ReaderBuilder, StringRecord};
use log::debug;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Category, Transaction, TransactionType, MAX_DESCRIPTION_LEN, MAX_NOTES_LEN};
use crate::utils::normalize_date;

pub const MAX_IMPORT_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("file must be a .csv file")]
    NotCsv,
    #[error("file is empty")]
    EmptyFile,
    #[error("file size must be at most 10MB")]
    TooLarge,
    #[error("no importable transactions found in file")]
    NothingImportable,
    #[error("failed to parse CSV: {0}")]
    Malformed(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Raw field bag for one statement row, keyed by the fixed bank-statement
/// column names. Transient; discarded after normalization.
#[derive(Debug, Default, Clone)]
pub struct RawRow {
    pub transaction_date: String,
    pub post_date: String,
    pub description: String,
    pub category: String,
    pub amount: String,
    pub memo: String,
}

/// A fully normalized batch plus the count of rows dropped along the way.
#[derive(Debug)]
pub struct ImportBatch {
    pub transactions: Vec<Transaction>,
    pub skipped: usize,
}

// Columns may appear in any order; unknown columns are ignored and missing
// optional ones tolerated. Schema checks belong to normalization.
#[derive(Debug, Default)]
struct HeaderIndex {
    transaction_date: Option<usize>,
    post_date: Option<usize>,
    description: Option<usize>,
    category: Option<usize>,
    amount: Option<usize>,
    memo: Option<usize>,
}

impl HeaderIndex {
    fn from_headers(headers: &StringRecord) -> HeaderIndex {
        let mut index = HeaderIndex::default();
        for (i, name) in headers.iter().enumerate() {
            match name.trim() {
                "Transaction Date" => index.transaction_date = Some(i),
                "Post Date" => index.post_date = Some(i),
                "Description" => index.description = Some(i),
                "Category" => index.category = Some(i),
                "Amount" => index.amount = Some(i),
                "Memo" => index.memo = Some(i),
                _ => {}
            }
        }
        index
    }

    fn field(&self, record: &StringRecord, idx: Option<usize>) -> String {
        idx.and_then(|i| record.get(i)).unwrap_or("").to_string()
    }

    fn raw_row(&self, record: &StringRecord) -> RawRow {
        RawRow {
            transaction_date: self.field(record, self.transaction_date),
            post_date: self.field(record, self.post_date),
            description: self.field(record, self.description),
            category: self.field(record, self.category),
            amount: self.field(record, self.amount),
            memo: self.field(record, self.memo),
        }
    }
}

/// File-level preconditions, enforced before any parsing: `.csv` extension
/// (case-insensitive), non-zero size, at most [`MAX_IMPORT_BYTES`].
pub fn validate_file(path: &Path) -> Result<(), ImportError> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(ImportError::NotCsv);
    }
    let size = std::fs::metadata(path)?.len();
    if size == 0 {
        return Err(ImportError::EmptyFile);
    }
    if size > MAX_IMPORT_BYTES {
        return Err(ImportError::TooLarge);
    }
    Ok(())
}

/// Parse a statement file into a normalized batch.
///
/// Fails with [`ImportError::NothingImportable`] when zero rows survive
/// normalization, distinguishing "nothing importable" from "nothing
/// uploaded". Never commits partial results anywhere.
pub fn parse_file(path: &Path) -> Result<ImportBatch, ImportError> {
    validate_file(path)?;
    parse_reader(File::open(path)?)
}

/// Streaming core of [`parse_file`]; exposed separately so callers with
/// in-memory input skip the file preconditions.
pub fn parse_reader<R: Read>(reader: R) -> Result<ImportBatch, ImportError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let index = HeaderIndex::from_headers(rdr.headers()?);

    let mut transactions = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = result?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        match normalize_row(&index.raw_row(&record)) {
            Some(tx) => transactions.push(tx),
            None => skipped += 1,
        }
    }
    if transactions.is_empty() {
        return Err(ImportError::NothingImportable);
    }
    debug!(
        "parsed {} transactions ({} rows skipped)",
        transactions.len(),
        skipped
    );
    Ok(ImportBatch {
        transactions,
        skipped,
    })
}

/// Convert one raw row into a canonical transaction, or `None` to drop it.
///
/// Required fields are `Transaction Date`, `Description` and `Amount`; a
/// row missing any of them, or whose amount or date does not parse, is
/// dropped under the best-effort policy. An unparseable `Post Date` only
/// loses that field.
pub fn normalize_row(row: &RawRow) -> Option<Transaction> {
    let description = truncate(row.description.trim(), MAX_DESCRIPTION_LEN);
    if row.transaction_date.trim().is_empty() || description.is_empty() {
        return None;
    }
    let amount: Decimal = row.amount.trim().parse().ok()?;
    let date = normalize_date(&row.transaction_date).ok()?;
    let post_date = match row.post_date.trim() {
        "" => None,
        raw => normalize_date(raw).ok(),
    };
    let notes = match truncate(row.memo.trim(), MAX_NOTES_LEN) {
        n if n.is_empty() => None,
        n => Some(n),
    };

    let now = Utc::now();
    Some(Transaction {
        id: Uuid::new_v4(),
        description,
        amount,
        date,
        post_date,
        notes,
        r#type: TransactionType::from_amount(amount),
        category: Category::parse_or_other(&row.category),
        created_at: now,
        updated_at: now,
    })
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
