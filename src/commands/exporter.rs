// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::export::{default_export_filename, to_csv};
use crate::store::TransactionStore;

pub fn handle(store: &TransactionStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(store, sub),
        _ => Ok(()),
    }
}

fn export_transactions(store: &TransactionStore, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub
        .get_one::<String>("out")
        .cloned()
        .unwrap_or_else(default_export_filename);

    let csv = to_csv(store.transactions())?;
    std::fs::write(&out, csv).with_context(|| format!("Write CSV {}", out))?;
    println!("Exported {} transactions to {}", store.len(), out);
    Ok(())
}
