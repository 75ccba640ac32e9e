// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::analytics::{
    category_breakdown, filter_by_date_range, total_balance, total_expenses, total_income,
};
use crate::models::Transaction;
use crate::store::TransactionStore;
use crate::utils::{fmt_money, maybe_print_json, normalize_date, pretty_table};

pub fn handle(store: &TransactionStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub)?,
        Some(("spend-by-category", sub)) => spend_by_category(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn select_range(store: &TransactionStore, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let start = sub
        .get_one::<String>("from")
        .map(|s| normalize_date(s))
        .transpose()?;
    let end = sub
        .get_one::<String>("to")
        .map(|s| normalize_date(s))
        .transpose()?;
    Ok(filter_by_date_range(store.transactions(), start, end))
}

fn summary(store: &TransactionStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let selected = select_range(store, sub)?;

    let data = vec![
        vec!["Income".to_string(), fmt_money(&total_income(&selected))],
        vec!["Expenses".to_string(), fmt_money(&total_expenses(&selected))],
        vec!["Balance".to_string(), fmt_money(&total_balance(&selected))],
    ];
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Measure", "Total"], data));
    }
    Ok(())
}

fn spend_by_category(store: &TransactionStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let selected = select_range(store, sub)?;

    let data: Vec<Vec<String>> = category_breakdown(&selected)
        .into_iter()
        .map(|(category, spent)| vec![category.to_string(), fmt_money(&spent)])
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Category", "Spent"], data));
    }
    Ok(())
}
