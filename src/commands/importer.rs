// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Context, Result};

use crate::ingest;
use crate::store::TransactionStore;

pub fn handle(store: &mut TransactionStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(store, sub),
        _ => Ok(()),
    }
}

fn import_transactions(store: &mut TransactionStore, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let batch =
        ingest::parse_file(Path::new(path)).with_context(|| format!("Import CSV {}", path))?;

    let imported = batch.transactions.len();
    store.bulk_insert(batch.transactions);
    if batch.skipped > 0 {
        println!(
            "Imported {} transactions from {} ({} rows skipped)",
            imported, path, batch.skipped
        );
    } else {
        println!("Imported {} transactions from {}", imported, path);
    }
    Ok(())
}
