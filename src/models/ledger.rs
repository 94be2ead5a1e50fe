//! Public ledger: aggregate income and expense per category

use serde::Serialize;
use sqlx::FromRow;

/// One aggregated ledger category from the database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LedgerLine {
    pub category: String,
    pub kind: String,
    pub total_cents: i64,
    pub entry_count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    Income,
    Expense,
}

impl LedgerKind {
    pub fn parse(kind: &str) -> Option<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "income" => Some(LedgerKind::Income),
            "expense" => Some(LedgerKind::Expense),
            _ => None,
        }
    }
}

impl LedgerLine {
    pub fn kind(&self) -> Option<LedgerKind> {
        LedgerKind::parse(&self.kind)
    }
}

/// Ledger totals served to the public page
#[derive(Debug, Clone, Serialize)]
pub struct LedgerSummary {
    pub lines: Vec<LedgerLine>,
    pub income_cents: i64,
    pub expense_cents: i64,
    pub net_cents: i64,
}

impl LedgerSummary {
    /// Sum lines by kind. Lines with an unknown kind are listed but not totalled.
    pub fn from_lines(lines: Vec<LedgerLine>) -> Self {
        let (income_cents, expense_cents) =
            lines
                .iter()
                .fold((0i64, 0i64), |(income, expense), line| match line.kind() {
                    Some(LedgerKind::Income) => (income.saturating_add(line.total_cents), expense),
                    Some(LedgerKind::Expense) => (income, expense.saturating_add(line.total_cents)),
                    None => {
                        tracing::warn!("Ledger category {} has unknown kind {:?}", line.category, line.kind);
                        (income, expense)
                    }
                });

        Self {
            lines,
            income_cents,
            expense_cents,
            net_cents: income_cents.saturating_sub(expense_cents),
        }
    }
}
