//! Dashboard figures and ledger totals.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{EntryType, LedgerEntry, Order, Quote, QuoteStatus};

/// Headline numbers for the landing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Paid income dated in the calendar month of `today`.
    pub month_revenue: Decimal,
    pub pending_quotes: usize,
    /// Orders not yet completed.
    pub open_orders: usize,
    /// Amount of unpaid expenses dated `today`.
    pub expenses_due_today: Decimal,
}

impl DashboardStats {
    pub fn compute(
        entries: &[LedgerEntry],
        quotes: &[Quote],
        orders: &[Order],
        today: NaiveDate,
    ) -> Self {
        let month_revenue = entries
            .iter()
            .filter(|e| e.entry_type == EntryType::Income && e.paid)
            .filter(|e| e.date.year() == today.year() && e.date.month() == today.month())
            .map(|e| e.amount)
            .sum();

        Self {
            month_revenue,
            pending_quotes: quotes
                .iter()
                .filter(|q| q.status == QuoteStatus::Pending)
                .count(),
            open_orders: orders.iter().filter(|o| o.status.is_open()).count(),
            expenses_due_today: entries
                .iter()
                .filter(|e| e.entry_type == EntryType::Expense && !e.paid && e.date == today)
                .map(|e| e.amount)
                .sum(),
        }
    }
}

/// Income, expense and balance over a set of entries, paid or not.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LedgerTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

impl LedgerTotals {
    pub fn compute(entries: &[LedgerEntry]) -> Self {
        let (income, expense) =
            entries
                .iter()
                .fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), e| match e.entry_type {
                    EntryType::Income => (inc + e.amount, exp),
                    EntryType::Expense => (inc, exp + e.amount),
                });
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }
}
