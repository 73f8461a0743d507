//! Views over a streamed block frame.
//!
//! The frame is never decoded into owned structs. The filter reads the few
//! fields it needs through borrowed views and clones the untouched upstream
//! objects into the reduced block, so every field (including `null`s) comes
//! back exactly as delivered.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::FilterError;
use super::watchlist::WatchedAddresses;

/// One block's worth of stream data.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    raw: &'a Value,
}

impl<'a> Frame<'a> {
    /// Normalizes `{ "data": [frame, ..] }` and `[frame, ..]` to the first
    /// frame. Trailing frames are never looked at.
    pub fn from_payload(payload: &'a Value) -> Result<Self, FilterError> {
        let frames = match payload.get("data") {
            Some(data) if is_truthy(data) => data,
            _ => payload,
        };
        let raw = frames
            .get(0)
            .filter(|frame| !frame.is_null())
            .ok_or(FilterError::MissingFrame)?;
        Ok(Self { raw })
    }

    /// Receipts in delivery order; anything other than an array reads as none.
    pub fn receipts(&self) -> &'a [Value] {
        self.raw
            .get("receipts")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Only called once a receipt matched.
    pub fn block(&self) -> Result<Block<'a>, FilterError> {
        match self.raw.get("block") {
            None | Some(Value::Null) => Err(FilterError::MissingBlock),
            Some(raw) => Ok(Block { raw }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    raw: &'a Value,
}

impl<'a> Block<'a> {
    pub fn number(&self) -> Value {
        self.raw.get("number").cloned().unwrap_or(Value::Null)
    }

    pub fn timestamp(&self) -> Value {
        self.raw.get("timestamp").cloned().unwrap_or(Value::Null)
    }

    pub fn transactions(&self) -> Result<&'a [Value], FilterError> {
        self.raw
            .get("transactions")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or(FilterError::MissingTransactions)
    }
}

/// Borrowed view of one receipt object.
#[derive(Debug, Clone, Copy)]
pub struct Receipt<'a> {
    index: usize,
    raw: &'a Value,
}

impl<'a> Receipt<'a> {
    pub fn new(index: usize, raw: &'a Value) -> Result<Self, FilterError> {
        if raw.is_null() {
            return Err(FilterError::NullReceipt { index });
        }
        Ok(Self { index, raw })
    }

    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    /// `None` when the key is absent, which is distinct from a `null` hash.
    pub fn transaction_hash(&self) -> Option<&'a Value> {
        self.raw.get("transactionHash")
    }

    /// True when any log was emitted by a watched address. Stops at the
    /// first hit. Logs whose address is missing, empty or not a string never
    /// match; a `logs` value that is truthy but not a list is a fault.
    pub fn touches(&self, watched: &WatchedAddresses) -> Result<bool, FilterError> {
        let logs = match self.raw.get("logs") {
            None => return Ok(false),
            Some(logs) if !is_truthy(logs) => return Ok(false),
            Some(Value::Array(logs)) => logs,
            Some(_) => return Err(FilterError::MalformedLogs { index: self.index }),
        };

        for log in logs {
            if log.is_null() {
                return Err(FilterError::NullLog { index: self.index });
            }
            let hit = log
                .get("address")
                .and_then(Value::as_str)
                .is_some_and(|addr| !addr.is_empty() && watched.contains(addr));
            if hit {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// `None` when the transaction carries no `hash` key.
pub fn transaction_hash(index: usize, raw: &Value) -> Result<Option<&Value>, FilterError> {
    if raw.is_null() {
        return Err(FilterError::NullTransaction { index });
    }
    Ok(raw.get("hash"))
}

/// The reduced payload handed back to the streaming provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducedBlock {
    pub block: Value,
    pub timestamp: Value,
    pub transactions: Vec<Value>,
    pub receipts: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    Matched(ReducedBlock),
    /// No watched address was active in this block.
    NoMatch,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
