//! Webhook handler for a block data stream.
//!
//! Each delivery carries one block frame (block header, transactions and
//! receipts). The [`processor::ReceiptFilter`] keeps only the receipts whose
//! logs were emitted by a watched address, plus the transactions they belong
//! to, and answers with the reduced block, `null` when nothing matched, or
//! `{ "error": .. }` when the payload could not be processed.

pub mod api;
pub mod config;
pub mod processor;
pub mod telemetry;
pub mod utils;
