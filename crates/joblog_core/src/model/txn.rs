//! Finance transaction domain model.
//!
//! # Responsibility
//! - Define the transaction record used by weekly summaries.
//! - Keep the sign convention in one place: `amount` is a magnitude,
//!   direction comes from `is_expense`.
//!
//! # Invariants
//! - `amount` is stored non-negative; `signed_amount()` applies direction.
//! - `date` is local wall-clock time with no zone attached.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a finance transaction.
pub type TxnId = Uuid;

/// How often a transaction repeats. Informational only; the core never
/// schedules anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    None,
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Annually,
}

impl Recurrence {
    /// All recurrence options in picker order.
    pub const ALL: [Recurrence; 7] = [
        Recurrence::None,
        Recurrence::Daily,
        Recurrence::Weekly,
        Recurrence::Biweekly,
        Recurrence::Monthly,
        Recurrence::Quarterly,
        Recurrence::Annually,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Recurrence::None => "None",
            Recurrence::Daily => "Daily",
            Recurrence::Weekly => "Weekly",
            Recurrence::Biweekly => "Biweekly",
            Recurrence::Monthly => "Monthly",
            Recurrence::Quarterly => "Quarterly",
            Recurrence::Annually => "Annually",
        }
    }
}

/// Account a transaction settles against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Checking,
    Savings,
    Cash,
    Credit,
    Other,
}

impl AccountType {
    /// All account options in picker order.
    pub const ALL: [AccountType; 5] = [
        AccountType::Checking,
        AccountType::Savings,
        AccountType::Cash,
        AccountType::Credit,
        AccountType::Other,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            AccountType::Checking => "Checking",
            AccountType::Savings => "Savings",
            AccountType::Cash => "Cash",
            AccountType::Credit => "Credit",
            AccountType::Other => "Other",
        }
    }
}

/// A single income or expense entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Txn {
    pub id: TxnId,
    /// Magnitude only; see `signed_amount()`.
    pub amount: Decimal,
    /// Local wall-clock time the transaction occurred.
    pub date: NaiveDateTime,
    pub description: String,
    pub recurrence: Recurrence,
    pub account_type: AccountType,
    /// `true` for outflows, `false` for income.
    pub is_expense: bool,
}

impl Txn {
    /// Creates a new transaction with a generated stable ID.
    ///
    /// Defaults: income (not expense), no recurrence, `Other` account.
    pub fn new(description: impl Into<String>, amount: Decimal, date: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            date,
            description: description.into(),
            recurrence: Recurrence::None,
            account_type: AccountType::Other,
            is_expense: false,
        }
    }

    /// Amount with direction applied: negative for expenses.
    pub fn signed_amount(&self) -> Decimal {
        if self.is_expense {
            -self.amount
        } else {
            self.amount
        }
    }
}
