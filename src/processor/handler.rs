use serde_json::{Value, json};
use tracing::{debug, info, warn};

use super::error::FilterError;
use super::types::{FilterOutcome, Frame, Receipt, ReducedBlock, transaction_hash};
use super::watchlist::WatchedAddresses;

/// Reduces a streamed block to the transactions and receipts that touch a
/// watched address.
#[derive(Debug, Clone)]
pub struct ReceiptFilter {
    watched: WatchedAddresses,
}

impl ReceiptFilter {
    pub fn new(watched: WatchedAddresses) -> Self {
        Self { watched }
    }

    pub fn watched(&self) -> &WatchedAddresses {
        &self.watched
    }

    /// Runs the filter over one stream payload.
    ///
    /// Returns `FilterOutcome::NoMatch` as soon as no receipt touches a
    /// watched address; the block is only read once something matched.
    pub fn filter(&self, payload: &Value) -> Result<FilterOutcome, FilterError> {
        let frame = Frame::from_payload(payload)?;

        let mut receipts = Vec::with_capacity(frame.receipts().len());
        // One entry per matching receipt, duplicates included.
        let mut matched: Vec<Option<&Value>> = Vec::new();
        for (index, raw) in frame.receipts().iter().enumerate() {
            let receipt = Receipt::new(index, raw)?;
            if receipt.touches(&self.watched)? {
                matched.push(receipt.transaction_hash());
            }
            receipts.push(receipt);
        }

        if matched.is_empty() {
            return Ok(FilterOutcome::NoMatch);
        }

        let block = frame.block()?;
        let mut transactions = Vec::new();
        for (index, raw) in block.transactions()?.iter().enumerate() {
            if matched.contains(&transaction_hash(index, raw)?) {
                transactions.push(raw.clone());
            }
        }

        let receipts = receipts
            .iter()
            .filter(|receipt| matched.contains(&receipt.transaction_hash()))
            .map(|receipt| receipt.raw().clone())
            .collect();

        Ok(FilterOutcome::Matched(ReducedBlock {
            block: block.number(),
            timestamp: block.timestamp(),
            transactions,
            receipts,
        }))
    }

    /// The invocation boundary: always answers with a JSON value, turning
    /// faults into `{ "error": message }`.
    pub fn handle(&self, payload: &Value) -> Value {
        match self.filter(payload) {
            Ok(FilterOutcome::NoMatch) => {
                debug!("no watched activity in block");
                Value::Null
            }
            Ok(FilterOutcome::Matched(reduced)) => {
                info!(
                    block = %reduced.block,
                    transactions = reduced.transactions.len(),
                    matched_receipts = reduced.receipts.len(),
                    "✅ block matched watched addresses"
                );
                serde_json::to_value(&reduced).unwrap_or_else(|e| json!({ "error": e.to_string() }))
            }
            Err(e) => {
                warn!(error = %e, "❌ failed to filter stream payload");
                json!({ "error": e.to_string() })
            }
        }
    }
}
