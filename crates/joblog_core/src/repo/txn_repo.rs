//! Finance transaction repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and range-query APIs over the `txns` table.
//! - Keep amount/date encodings inside the repository boundary.
//!
//! # Invariants
//! - Amounts are stored as exact decimal text, never as floats.
//! - Listing is deterministic: `occurred_at ASC, uuid ASC`.

use crate::model::txn::{AccountType, Recurrence, Txn, TxnId};
use crate::repo::{bool_to_int, naive_from_ms, parse_bool, parse_uuid, RepoError, RepoResult};
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use rust_decimal::Decimal;
use std::str::FromStr;

const TXN_SELECT_SQL: &str = "SELECT
    uuid,
    amount,
    occurred_at,
    description,
    recurrence,
    account_type,
    is_expense
FROM txns";

/// Query options for listing transactions.
///
/// `from`/`to` bound the `occurred_at` instant inclusively at both ends,
/// matching the weekly window semantics.
#[derive(Debug, Clone, Default)]
pub struct TxnListQuery {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
    pub account_type: Option<AccountType>,
    pub is_expense: Option<bool>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for finance transactions.
pub trait TxnRepository {
    fn create_txn(&self, txn: &Txn) -> RepoResult<TxnId>;
    fn update_txn(&self, txn: &Txn) -> RepoResult<()>;
    fn get_txn(&self, id: TxnId) -> RepoResult<Option<Txn>>;
    fn list_txns(&self, query: &TxnListQuery) -> RepoResult<Vec<Txn>>;
    fn delete_txn(&self, id: TxnId) -> RepoResult<()>;
}

/// SQLite-backed transaction repository.
pub struct SqliteTxnRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTxnRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TxnRepository for SqliteTxnRepository<'_> {
    fn create_txn(&self, txn: &Txn) -> RepoResult<TxnId> {
        self.conn.execute(
            "INSERT INTO txns (
                uuid,
                amount,
                occurred_at,
                description,
                recurrence,
                account_type,
                is_expense
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                txn.id.to_string(),
                txn.amount.to_string(),
                txn.date.and_utc().timestamp_millis(),
                txn.description.as_str(),
                recurrence_to_db(txn.recurrence),
                account_type_to_db(txn.account_type),
                bool_to_int(txn.is_expense),
            ],
        )?;

        Ok(txn.id)
    }

    fn update_txn(&self, txn: &Txn) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE txns
             SET
                amount = ?1,
                occurred_at = ?2,
                description = ?3,
                recurrence = ?4,
                account_type = ?5,
                is_expense = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?7;",
            params![
                txn.amount.to_string(),
                txn.date.and_utc().timestamp_millis(),
                txn.description.as_str(),
                recurrence_to_db(txn.recurrence),
                account_type_to_db(txn.account_type),
                bool_to_int(txn.is_expense),
                txn.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found("transaction", txn.id));
        }

        Ok(())
    }

    fn get_txn(&self, id: TxnId) -> RepoResult<Option<Txn>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TXN_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(parse_txn_row(row)?));
        }

        Ok(None)
    }

    fn list_txns(&self, query: &TxnListQuery) -> RepoResult<Vec<Txn>> {
        let mut sql = format!("{TXN_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(from) = query.from {
            sql.push_str(" AND occurred_at >= ?");
            bind_values.push(Value::Integer(from.and_utc().timestamp_millis()));
        }

        if let Some(to) = query.to {
            sql.push_str(" AND occurred_at <= ?");
            bind_values.push(Value::Integer(to.and_utc().timestamp_millis()));
        }

        if let Some(account_type) = query.account_type {
            sql.push_str(" AND account_type = ?");
            bind_values.push(Value::Text(account_type_to_db(account_type).to_string()));
        }

        if let Some(is_expense) = query.is_expense {
            sql.push_str(" AND is_expense = ?");
            bind_values.push(Value::Integer(bool_to_int(is_expense)));
        }

        sql.push_str(" ORDER BY occurred_at ASC, uuid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut txns = Vec::new();

        while let Some(row) = rows.next()? {
            txns.push(parse_txn_row(row)?);
        }

        Ok(txns)
    }

    fn delete_txn(&self, id: TxnId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM txns WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::not_found("transaction", id));
        }

        Ok(())
    }
}

fn parse_txn_row(row: &Row<'_>) -> RepoResult<Txn> {
    let uuid_text: String = row.get("uuid")?;

    let amount_text: String = row.get("amount")?;
    let amount = Decimal::from_str(&amount_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid amount `{amount_text}` in txns.amount"))
    })?;

    let recurrence_text: String = row.get("recurrence")?;
    let recurrence = parse_recurrence(&recurrence_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid recurrence `{recurrence_text}` in txns.recurrence"
        ))
    })?;

    let account_text: String = row.get("account_type")?;
    let account_type = parse_account_type(&account_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid account type `{account_text}` in txns.account_type"
        ))
    })?;

    Ok(Txn {
        id: parse_uuid(&uuid_text, "txns.uuid")?,
        amount,
        date: naive_from_ms(row.get("occurred_at")?, "txns.occurred_at")?,
        description: row.get("description")?,
        recurrence,
        account_type,
        is_expense: parse_bool(row.get("is_expense")?, "txns.is_expense")?,
    })
}

fn recurrence_to_db(recurrence: Recurrence) -> &'static str {
    match recurrence {
        Recurrence::None => "none",
        Recurrence::Daily => "daily",
        Recurrence::Weekly => "weekly",
        Recurrence::Biweekly => "biweekly",
        Recurrence::Monthly => "monthly",
        Recurrence::Quarterly => "quarterly",
        Recurrence::Annually => "annually",
    }
}

fn parse_recurrence(value: &str) -> Option<Recurrence> {
    match value {
        "none" => Some(Recurrence::None),
        "daily" => Some(Recurrence::Daily),
        "weekly" => Some(Recurrence::Weekly),
        "biweekly" => Some(Recurrence::Biweekly),
        "monthly" => Some(Recurrence::Monthly),
        "quarterly" => Some(Recurrence::Quarterly),
        "annually" => Some(Recurrence::Annually),
        _ => None,
    }
}

fn account_type_to_db(account_type: AccountType) -> &'static str {
    match account_type {
        AccountType::Checking => "checking",
        AccountType::Savings => "savings",
        AccountType::Cash => "cash",
        AccountType::Credit => "credit",
        AccountType::Other => "other",
    }
}

fn parse_account_type(value: &str) -> Option<AccountType> {
    match value {
        "checking" => Some(AccountType::Checking),
        "savings" => Some(AccountType::Savings),
        "cash" => Some(AccountType::Cash),
        "credit" => Some(AccountType::Credit),
        "other" => Some(AccountType::Other),
        _ => None,
    }
}
