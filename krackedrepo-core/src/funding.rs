//! In-memory funding ledger for the showcase boundary.
//!
//! Session-scoped and append-only; nothing here is persisted. Amounts are
//! pledges in USD.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single backer entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Funder {
    pub name: String,
    /// Pledged amount; always positive
    pub amount: f64,
    /// ISO date (YYYY-MM-DD) the pledge was recorded
    pub date: String,
}

/// Append-only list of backers, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunderLedger {
    funders: Vec<Funder>,
}

impl FunderLedger {
    /// An empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The ledger pre-populated with the demo backers shown before any
    /// real pledge arrives.
    #[must_use]
    pub fn with_seed() -> Self {
        let seed = |name: &str, amount: f64, date: &str| Funder {
            name: name.to_string(),
            amount,
            date: date.to_string(),
        };
        Self {
            funders: vec![
                seed("Alyx Vance", 150.0, "2023-11-08"),
                seed("Dr. Freeman", 500.0, "2023-11-05"),
                seed("Elena Vance", 250.0, "2023-11-01"),
            ],
        }
    }

    /// Record a pledge dated today, placing it at the head of the list.
    pub fn add(&mut self, name: impl Into<String>, amount: f64) -> Result<()> {
        if amount <= 0.0 {
            return Err(Error::Config(format!(
                "pledge amount must be positive, got {amount}"
            )));
        }
        self.funders.insert(
            0,
            Funder {
                name: name.into(),
                amount,
                date: Utc::now().format("%Y-%m-%d").to_string(),
            },
        );
        Ok(())
    }

    /// All backers, newest first.
    #[must_use]
    pub fn funders(&self) -> &[Funder] {
        &self.funders
    }

    /// Sum of all pledges.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.funders.iter().map(|f| f.amount).sum()
    }
}
