// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use moneytrack::{cli, commands, store::TransactionStore};

fn main() -> Result<()> {
    env_logger::init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut store = TransactionStore::open_default()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Transaction store at {}", store.path().display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut store, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
