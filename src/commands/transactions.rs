// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use uuid::Uuid;

use crate::analytics::{filter_by, filter_by_date_range, sort_by_date, TransactionFilter};
use crate::models::{Category, TransactionDraft, TransactionPatch, TransactionType};
use crate::store::TransactionStore;
use crate::utils::{fmt_short_date, maybe_print_json, normalize_date, parse_decimal, pretty_table};

pub fn handle(store: &mut TransactionStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("update", sub)) => update(store, sub)?,
        Some(("delete", sub)) => delete(store, sub)?,
        Some(("clear", sub)) => clear(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut TransactionStore, sub: &clap::ArgMatches) -> Result<()> {
    let date = normalize_date(sub.get_one::<String>("date").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap().to_string();
    let category = sub
        .get_one::<String>("category")
        .map(|s| Category::parse_or_other(s));
    let notes = sub.get_one::<String>("notes").map(|s| s.to_string());
    let post_date = sub
        .get_one::<String>("post-date")
        .map(|s| normalize_date(s))
        .transpose()?;

    let tx = store.create(TransactionDraft {
        description,
        amount,
        date,
        post_date,
        notes,
        category,
    })?;
    println!(
        "Recorded {} on {} for '{}' ({})",
        tx.amount,
        fmt_short_date(&tx.date),
        tx.description,
        tx.id
    );
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub description: String,
    pub amount: String,
    pub r#type: String,
    pub category: String,
    pub notes: String,
}

pub fn query_rows(store: &TransactionStore, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let filter = TransactionFilter {
        category: parse_category_filter(sub.get_one::<String>("category"))?,
        r#type: parse_type_filter(sub.get_one::<String>("type"))?,
    };
    let start = sub
        .get_one::<String>("from")
        .map(|s| normalize_date(s))
        .transpose()?;
    let end = sub
        .get_one::<String>("to")
        .map(|s| normalize_date(s))
        .transpose()?;

    let selected = filter_by_date_range(&filter_by(store.transactions(), &filter), start, end);
    let mut sorted = sort_by_date(&selected);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sorted.truncate(*limit);
    }

    Ok(sorted
        .iter()
        .map(|t| TransactionRow {
            id: t.id.to_string(),
            date: fmt_short_date(&t.date),
            description: t.description.clone(),
            amount: t.amount.to_string(),
            r#type: t.r#type.to_string(),
            category: t.category.to_string(),
            notes: t.notes.clone().unwrap_or_default(),
        })
        .collect())
}

fn list(store: &TransactionStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    r.notes.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Amount", "Type", "Category", "Notes"],
                rows,
            )
        );
    }
    Ok(())
}

fn update(store: &mut TransactionStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let patch = TransactionPatch {
        description: sub.get_one::<String>("description").map(|s| s.to_string()),
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        date: sub
            .get_one::<String>("date")
            .map(|s| normalize_date(s))
            .transpose()?,
        post_date: sub
            .get_one::<String>("post-date")
            .map(|s| normalize_date(s))
            .transpose()?,
        notes: sub.get_one::<String>("notes").map(|s| s.to_string()),
        category: sub
            .get_one::<String>("category")
            .map(|s| Category::parse_or_other(s)),
    };
    store.update(id, patch)?;
    println!("Updated {}", id);
    Ok(())
}

fn delete(store: &mut TransactionStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    store.delete(id);
    println!("Deleted {}", id);
    Ok(())
}

fn clear(store: &mut TransactionStore, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        bail!("Refusing to delete all transactions without --yes");
    }
    let count = store.len();
    store.clear();
    println!("Cleared {} transactions", count);
    Ok(())
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).with_context(|| format!("Invalid transaction id '{}'", raw))
}

pub fn parse_category_filter(raw: Option<&String>) -> Result<Option<Category>> {
    Ok(match raw.map(|s| s.trim()) {
        None | Some("all") => None,
        Some(s) => Some(Category::parse_or_other(s)),
    })
}

pub fn parse_type_filter(raw: Option<&String>) -> Result<Option<TransactionType>> {
    match raw.map(|s| s.trim()) {
        None | Some("all") => Ok(None),
        Some("income") => Ok(Some(TransactionType::Income)),
        Some("expense") => Ok(Some(TransactionType::Expense)),
        Some(other) => bail!("Unknown type '{}' (use income|expense|all)", other),
    }
}
