//! Marketplace data models

pub mod ledger;
pub mod provider;

pub use ledger::{LedgerKind, LedgerLine, LedgerSummary};
pub use provider::{ProviderSummary, ServiceCategory};
