//! Finance use-case service.
//!
//! # Responsibility
//! - Provide transaction CRUD on top of the repository.
//! - Parse user-entered amounts, including comma decimal separators.
//! - Assemble weekly summaries from a repository range query.
//!
//! # Invariants
//! - Amounts are accepted only as non-negative magnitudes; direction is
//!   the `is_expense` flag.
//! - The weekly query window matches the summary window exactly, bounds
//!   included.

use crate::insights::finance;
use crate::model::txn::{AccountType, Recurrence, Txn, TxnId};
use crate::repo::txn_repo::{TxnListQuery, TxnRepository};
use crate::repo::{RepoError, RepoResult};
use crate::service::non_empty;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Service error for finance use-cases.
#[derive(Debug)]
pub enum FinanceServiceError {
    /// Description is empty after trimming.
    EmptyDescription,
    /// Amount text does not parse to a non-negative decimal.
    InvalidAmount(String),
    /// Target transaction does not exist.
    TxnNotFound(TxnId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for FinanceServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "transaction description must not be empty"),
            Self::InvalidAmount(value) => write!(f, "invalid amount: `{value}`"),
            Self::TxnNotFound(id) => write!(f, "transaction not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FinanceServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for FinanceServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                entity: "transaction",
                id,
            } => Self::TxnNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Request model for recording a transaction from form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTxn {
    pub description: String,
    /// Raw text from the amount field; see `parse_amount` for the rules.
    pub amount_text: String,
    pub date: NaiveDateTime,
    pub is_expense: bool,
    pub recurrence: Recurrence,
    pub account_type: AccountType,
}

/// Finance service facade over repository implementations.
pub struct FinanceService<R: TxnRepository> {
    repo: R,
}

impl<R: TxnRepository> FinanceService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records one transaction from form input.
    ///
    /// # Contract
    /// - Description is trimmed and must remain non-empty.
    /// - Amount text must parse per `parse_amount`.
    pub fn add_txn(&self, input: NewTxn) -> Result<Txn, FinanceServiceError> {
        let description =
            non_empty(&input.description).ok_or(FinanceServiceError::EmptyDescription)?;
        let amount = parse_amount(&input.amount_text)
            .ok_or_else(|| FinanceServiceError::InvalidAmount(input.amount_text.clone()))?;

        let mut txn = Txn::new(description, amount, input.date);
        txn.recurrence = input.recurrence;
        txn.account_type = input.account_type;
        txn.is_expense = input.is_expense;

        self.repo.create_txn(&txn)?;
        Ok(txn)
    }

    /// Updates one transaction after re-checking its invariants.
    pub fn update_txn(&self, txn: &Txn) -> Result<(), FinanceServiceError> {
        if txn.description.trim().is_empty() {
            return Err(FinanceServiceError::EmptyDescription);
        }
        if txn.amount.is_sign_negative() {
            return Err(FinanceServiceError::InvalidAmount(txn.amount.to_string()));
        }

        self.repo.update_txn(txn)?;
        Ok(())
    }

    /// Gets one transaction by stable ID.
    pub fn get_txn(&self, id: TxnId) -> RepoResult<Option<Txn>> {
        self.repo.get_txn(id)
    }

    /// Lists transactions oldest-first with optional filters.
    pub fn list_txns(&self, query: &TxnListQuery) -> RepoResult<Vec<Txn>> {
        self.repo.list_txns(query)
    }

    /// Deletes one transaction.
    pub fn delete_txn(&self, id: TxnId) -> Result<(), FinanceServiceError> {
        self.repo.delete_txn(id)?;
        Ok(())
    }

    /// Builds the weekly summary for the week containing `reference`.
    ///
    /// Queries exactly the Sunday..Saturday window from storage and folds
    /// it; a quiet week still yields seven all-zero day groups.
    pub fn weekly_summary(
        &self,
        reference: NaiveDate,
    ) -> Result<finance::WeeklySummary, FinanceServiceError> {
        let window = finance::week_window(reference);
        let query = TxnListQuery {
            from: Some(window.start_instant()),
            to: Some(window.end_instant()),
            ..TxnListQuery::default()
        };
        let txns = self.repo.list_txns(&query)?;
        Ok(finance::weekly_summary(&txns, reference))
    }
}

/// Parses user-entered money text into an exact decimal.
///
/// Rules:
/// - Surrounding whitespace is ignored.
/// - A comma decimal separator is accepted: `"12,50"` parses as `12.50`.
/// - Unparseable or negative input yields `None`.
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let normalized = value.trim().replace(',', ".");
    let amount = Decimal::from_str(&normalized).ok()?;
    if amount.is_sign_negative() {
        return None;
    }
    Some(amount)
}
