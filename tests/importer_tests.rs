// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;

use moneytrack::models::TransactionType;
use moneytrack::store::TransactionStore;
use moneytrack::{cli, commands};
use tempfile::{tempdir, Builder};

fn temp_store(dir: &tempfile::TempDir) -> TransactionStore {
    TransactionStore::open(dir.path().join("transactions.json"))
}

fn statement_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn run_import(store: &mut TransactionStore, path: &str) -> anyhow::Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["moneytrack", "import", "transactions", "--path", path]);
    if let Some(("import", import_m)) = matches.subcommand() {
        commands::importer::handle(store, import_m)
    } else {
        panic!("no import subcommand");
    }
}

#[test]
fn importer_fills_the_store_from_a_statement() {
    let dir = tempdir().unwrap();
    let mut store = temp_store(&dir);
    let file = statement_file(
        "Transaction Date,Post Date,Description,Category,Type,Amount,Memo\n\
         01/15/2024,01/16/2024,Coffee Shop,Food & Drink,Sale,-4.50,\n\
         01/16/2024,01/17/2024,Paycheck,Income,Payment,2000.00,\n",
    );

    run_import(&mut store, file.path().to_str().unwrap()).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.transactions()[0].description, "Coffee Shop");
    assert_eq!(store.transactions()[0].r#type, TransactionType::Expense);
}

#[test]
fn importer_trims_cli_path_argument() {
    let dir = tempdir().unwrap();
    let mut store = temp_store(&dir);
    let file = statement_file(
        "Transaction Date,Description,Amount\n01/15/2024,Coffee Shop,-4.50\n",
    );

    let padded = format!("  {}  ", file.path().to_str().unwrap());
    run_import(&mut store, &padded).unwrap();
    assert_eq!(store.len(), 1);
}

#[test]
fn imported_batch_lands_ahead_of_existing_records() {
    let dir = tempdir().unwrap();
    let mut store = temp_store(&dir);
    store
        .create(moneytrack::models::TransactionDraft {
            description: "Existing".to_string(),
            amount: "-1".parse().unwrap(),
            date: chrono::Utc::now(),
            post_date: None,
            notes: None,
            category: None,
        })
        .unwrap();

    let file = statement_file(
        "Transaction Date,Description,Amount\n\
         01/15/2024,Batch A,-2.00\n\
         01/16/2024,Batch B,-3.00\n",
    );
    run_import(&mut store, file.path().to_str().unwrap()).unwrap();

    let descriptions: Vec<&str> = store
        .transactions()
        .iter()
        .map(|t| t.description.as_str())
        .collect();
    assert_eq!(descriptions, ["Batch A", "Batch B", "Existing"]);
}

#[test]
fn failed_import_commits_nothing() {
    let dir = tempdir().unwrap();
    let mut store = temp_store(&dir);
    let file = statement_file("Transaction Date,Description,Amount\n,,\n");

    let err = run_import(&mut store, file.path().to_str().unwrap()).unwrap_err();
    assert!(err
        .to_string()
        .contains(file.path().file_name().unwrap().to_str().unwrap()));
    assert!(store.is_empty());
}

#[test]
fn export_command_writes_csv_file() {
    let dir = tempdir().unwrap();
    let mut store = temp_store(&dir);
    let file = statement_file(
        "Transaction Date,Description,Amount\n01/15/2024,Coffee Shop,-4.50\n",
    );
    run_import(&mut store, file.path().to_str().unwrap()).unwrap();

    let out = dir.path().join("export.csv");
    let out_str = out.to_string_lossy().to_string();
    let cli = cli::build_cli();
    let matches =
        cli.get_matches_from(["moneytrack", "export", "transactions", "--out", &out_str]);
    if let Some(("export", export_m)) = matches.subcommand() {
        commands::exporter::handle(&store, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out).unwrap();
    assert!(contents.starts_with("Transaction Date,Description,Amount,Type,Notes,Created At"));
    assert!(contents.contains("Coffee Shop"));
}

#[test]
fn export_command_fails_on_empty_store() {
    let dir = tempdir().unwrap();
    let store = temp_store(&dir);

    let out = dir.path().join("export.csv");
    let out_str = out.to_string_lossy().to_string();
    let cli = cli::build_cli();
    let matches =
        cli.get_matches_from(["moneytrack", "export", "transactions", "--out", &out_str]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(commands::exporter::handle(&store, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out.exists());
}

#[test]
fn clear_requires_confirmation_flag() {
    let dir = tempdir().unwrap();
    let mut store = temp_store(&dir);
    let file = statement_file(
        "Transaction Date,Description,Amount\n01/15/2024,Coffee Shop,-4.50\n",
    );
    run_import(&mut store, file.path().to_str().unwrap()).unwrap();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["moneytrack", "tx", "clear"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        assert!(commands::transactions::handle(&mut store, tx_m).is_err());
    } else {
        panic!("no tx subcommand");
    }
    assert_eq!(store.len(), 1);

    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["moneytrack", "tx", "clear", "--yes"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        commands::transactions::handle(&mut store, tx_m).unwrap();
    } else {
        panic!("no tx subcommand");
    }
    assert!(store.is_empty());
}
