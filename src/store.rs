// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::Utc;
use directories::ProjectDirs;
use log::{error, warn};
use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::models::{
    clean_description, clean_notes, Category, DraftError, Transaction, TransactionDraft,
    TransactionPatch, TransactionType,
};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Moneytrack", "moneytrack"));

pub fn store_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("transactions.json"))
}

/// Sole owner of the canonical transaction collection. All mutation goes
/// through it; every mutation rewrites the whole backing document (single
/// in-process writer, no delta persistence).
pub struct TransactionStore {
    path: PathBuf,
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(store_path()?))
    }

    /// Load the collection from `path`. An absent file is an empty
    /// collection; an unreadable or corrupt one is logged and treated the
    /// same, never fatal.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let transactions = Self::load(&path);
        TransactionStore { path, transactions }
    }

    fn load(path: &Path) -> Vec<Transaction> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("failed to read {}: {}", path.display(), e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(transactions) => transactions,
            Err(e) => {
                warn!(
                    "stored transactions at {} are unparseable ({}); starting empty",
                    path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Validate a draft, derive identity and type, and prepend the new
    /// record (most-recent-first by insertion, independent of date).
    pub fn create(&mut self, draft: TransactionDraft) -> Result<Transaction, DraftError> {
        let now = Utc::now();
        let tx = Transaction {
            id: Uuid::new_v4(),
            description: clean_description(&draft.description)?,
            amount: draft.amount,
            date: draft.date,
            post_date: draft.post_date,
            notes: clean_notes(draft.notes.as_deref())?,
            r#type: TransactionType::from_amount(draft.amount),
            category: draft.category.unwrap_or(Category::Other),
            created_at: now,
            updated_at: now,
        };
        self.transactions.insert(0, tx.clone());
        self.save();
        Ok(tx)
    }

    /// Prepend an already-normalized batch as a block ahead of existing
    /// records, preserving intra-batch order. Used by CSV import; records
    /// were validated during normalization and are not re-checked.
    pub fn bulk_insert(&mut self, batch: Vec<Transaction>) {
        self.transactions.splice(0..0, batch);
        self.save();
    }

    /// Merge `patch` over the record with `id`. An unknown id is a benign
    /// no-op. `type` is recomputed from the effective amount so the two can
    /// never diverge.
    pub fn update(&mut self, id: Uuid, patch: TransactionPatch) -> Result<(), DraftError> {
        // Validate text fields up front so a rejected patch leaves the
        // record untouched.
        let description = patch
            .description
            .as_deref()
            .map(clean_description)
            .transpose()?;
        let notes = patch
            .notes
            .as_deref()
            .map(|n| clean_notes(Some(n)))
            .transpose()?;
        let Some(tx) = self.transactions.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };
        if let Some(description) = description {
            tx.description = description;
        }
        if let Some(notes) = notes {
            tx.notes = notes;
        }
        if let Some(amount) = patch.amount {
            tx.amount = amount;
        }
        if let Some(date) = patch.date {
            tx.date = date;
        }
        if let Some(post_date) = patch.post_date {
            tx.post_date = Some(post_date);
        }
        if let Some(category) = patch.category {
            tx.category = category;
        }
        tx.r#type = TransactionType::from_amount(tx.amount);
        tx.updated_at = Utc::now();
        self.save();
        Ok(())
    }

    /// Remove the matching record; no-op when absent.
    pub fn delete(&mut self, id: Uuid) {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() != before {
            self.save();
        }
    }

    /// Empty the collection. Destructive and immediate; confirmation is
    /// the caller's responsibility.
    pub fn clear(&mut self) {
        self.transactions.clear();
        self.save();
    }

    // Whole-collection write after every mutation. A failed write keeps the
    // in-memory state live and is logged rather than propagated; unsaved
    // state is lost on reload.
    fn save(&self) {
        let serialized = match serde_json::to_string_pretty(&self.transactions) {
            Ok(s) => s,
            Err(e) => {
                error!("failed to serialize transactions: {}", e);
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, serialized) {
            error!(
                "failed to persist transactions to {}: {}",
                self.path.display(),
                e
            );
        }
    }
}
