// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{Cursor, Write};

use chrono::{TimeZone, Utc};
use moneytrack::analytics::{total_balance, total_expenses, total_income};
use moneytrack::ingest::{parse_file, parse_reader, validate_file, ImportError, MAX_IMPORT_BYTES};
use moneytrack::models::{Category, TransactionType};
use rust_decimal::Decimal;
use tempfile::Builder;

const HEADER: &str = "Transaction Date,Post Date,Description,Category,Type,Amount,Memo";

fn csv_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn import_example_statement_drops_bad_row() {
    let file = csv_file(&format!(
        "{HEADER}\n\
         01/15/2024,01/16/2024,Coffee Shop,Food & Drink,Sale,-4.50,\n\
         01/16/2024,01/17/2024,Paycheck,Income,Payment,2000.00,\n\
         ,,bad row,,,,\n"
    ));

    let batch = parse_file(file.path()).unwrap();
    assert_eq!(batch.transactions.len(), 2);
    assert_eq!(batch.skipped, 1);

    let txs = &batch.transactions;
    assert_eq!(txs[0].description, "Coffee Shop");
    assert_eq!(txs[0].category, Category::FoodAndDrink);
    assert_eq!(txs[0].r#type, TransactionType::Expense);
    assert_eq!(txs[1].r#type, TransactionType::Income);

    assert_eq!(total_income(txs), "2000.00".parse::<Decimal>().unwrap());
    assert_eq!(total_expenses(txs), "4.50".parse::<Decimal>().unwrap());
    assert_eq!(total_balance(txs), "1995.50".parse::<Decimal>().unwrap());
}

#[test]
fn columns_may_appear_in_any_order() {
    let input = "Amount,Description,Transaction Date\n-12.00,Corner Shop,01/02/2024\n";
    let batch = parse_reader(Cursor::new(input)).unwrap();
    assert_eq!(batch.transactions.len(), 1);
    assert_eq!(batch.transactions[0].description, "Corner Shop");
    assert_eq!(
        batch.transactions[0].amount,
        "-12.00".parse::<Decimal>().unwrap()
    );
}

#[test]
fn statement_dates_anchor_at_utc_midnight() {
    let input = format!("{HEADER}\n01/15/2024,,Coffee,,,-1.00,\n");
    let batch = parse_reader(Cursor::new(input)).unwrap();
    assert_eq!(
        batch.transactions[0].date,
        Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
    );
    assert_eq!(batch.transactions[0].post_date, None);
}

#[test]
fn unparseable_post_date_only_loses_that_field() {
    let input = format!("{HEADER}\n01/15/2024,not a date,Coffee,,,-1.00,\n");
    let batch = parse_reader(Cursor::new(input)).unwrap();
    assert_eq!(batch.transactions.len(), 1);
    assert_eq!(batch.transactions[0].post_date, None);
}

#[test]
fn unknown_category_falls_back_to_other() {
    let input = format!("{HEADER}\n01/15/2024,,Mystery,Cryptozoology,,-3.00,\n");
    let batch = parse_reader(Cursor::new(input)).unwrap();
    assert_eq!(batch.transactions[0].category, Category::Other);
}

#[test]
fn memo_is_trimmed_into_notes() {
    let input = format!("{HEADER}\n01/15/2024,,Coffee,,, -4.50 ,  oat milk  \n");
    let batch = parse_reader(Cursor::new(input)).unwrap();
    assert_eq!(batch.transactions[0].notes.as_deref(), Some("oat milk"));
    assert_eq!(
        batch.transactions[0].amount,
        "-4.50".parse::<Decimal>().unwrap()
    );
}

#[test]
fn rows_with_unparseable_amounts_are_skipped() {
    let input = format!(
        "{HEADER}\n\
         01/15/2024,,Coffee,,,abc,\n\
         01/16/2024,,Tea,,,-2.00,\n"
    );
    let batch = parse_reader(Cursor::new(input)).unwrap();
    assert_eq!(batch.transactions.len(), 1);
    assert_eq!(batch.skipped, 1);
    assert_eq!(batch.transactions[0].description, "Tea");
}

#[test]
fn rows_with_unparseable_dates_are_skipped() {
    let input = format!("{HEADER}\nyesterday,,Coffee,,,-1.00,\n01/16/2024,,Tea,,,-2.00,\n");
    let batch = parse_reader(Cursor::new(input)).unwrap();
    assert_eq!(batch.transactions.len(), 1);
    assert_eq!(batch.skipped, 1);
}

#[test]
fn all_blank_rows_are_ignored_without_counting() {
    let input = format!("{HEADER}\n,,,,,,\n01/16/2024,,Tea,,,-2.00,\n");
    let batch = parse_reader(Cursor::new(input)).unwrap();
    assert_eq!(batch.transactions.len(), 1);
    assert_eq!(batch.skipped, 0);
}

#[test]
fn nothing_importable_is_an_error() {
    let file = csv_file(&format!("{HEADER}\n,,summary row,,,,\n"));
    let err = parse_file(file.path()).unwrap_err();
    assert!(matches!(err, ImportError::NothingImportable));
}

#[test]
fn non_csv_extension_is_rejected_before_parsing() {
    let mut file = Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(b"Transaction Date,Description,Amount\n")
        .unwrap();
    let err = validate_file(file.path()).unwrap_err();
    assert!(matches!(err, ImportError::NotCsv));
}

#[test]
fn csv_extension_check_is_case_insensitive() {
    let mut file = Builder::new().suffix(".CSV").tempfile().unwrap();
    file.write_all(b"x\n").unwrap();
    file.flush().unwrap();
    assert!(validate_file(file.path()).is_ok());
}

#[test]
fn empty_file_is_rejected() {
    let file = Builder::new().suffix(".csv").tempfile().unwrap();
    let err = validate_file(file.path()).unwrap_err();
    assert!(matches!(err, ImportError::EmptyFile));
}

#[test]
fn oversized_file_is_rejected() {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(&vec![b'a'; (MAX_IMPORT_BYTES + 1) as usize])
        .unwrap();
    file.flush().unwrap();
    let err = validate_file(file.path()).unwrap_err();
    assert!(matches!(err, ImportError::TooLarge));
}

#[test]
fn long_descriptions_are_capped() {
    let long = "x".repeat(300);
    let input = format!("{HEADER}\n01/15/2024,,{long},,,-1.00,\n");
    let batch = parse_reader(Cursor::new(input)).unwrap();
    assert_eq!(batch.transactions[0].description.chars().count(), 200);
}
