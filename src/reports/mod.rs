//! Read-only reporting over a user's transactions: monthly income/expense
//! rollups, top spending categories and current-month dashboard totals.
//!
//! Reference dates are always passed in by the caller rather than read from
//! the wall clock, so the presentation layer decides what "now" means (and
//! tests are deterministic). All monetary sums are exact decimal arithmetic.

mod aggregation;

use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

use crate::{
    Error,
    models::{TransactionType, UserId},
    stores::TransactionStore,
};

/// How many months the monthly summary covers, the reference month included.
pub const MONTHLY_SUMMARY_MONTHS: u32 = 6;

/// How many groups the top spending category ranking returns at most.
pub const TOP_SPENDING_CATEGORY_COUNT: usize = 5;

/// The label expense transactions are grouped under when their category
/// reference no longer resolves.
pub const UNKNOWN_CATEGORY_LABEL: &str = "Unknown";

/// The income and expense totals of one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummaryEntry {
    /// The calendar month number, 1 (January) through 12 (December).
    pub month: u8,
    /// Total income in the month.
    pub income: Decimal,
    /// Total expenses in the month.
    pub expense: Decimal,
}

/// Total spending in one category, for the top spending ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpending {
    /// The category name, or [UNKNOWN_CATEGORY_LABEL] if the category could
    /// not be resolved.
    pub category: String,
    /// The summed expense amount.
    pub total: Decimal,
}

/// The current-month totals shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// Total income in the current month.
    pub income: Decimal,
    /// Total expenses in the current month.
    pub expense: Decimal,
    /// `income - expense`. Negative when the user spent more than they
    /// earned.
    pub balance: Decimal,
}

/// The data behind the report view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// One entry per month, oldest first, reference month last.
    pub monthly_summary: Vec<MonthlySummaryEntry>,
    /// The top spending categories, largest first.
    pub top_categories: Vec<CategorySpending>,
}

/// The data behind the dashboard view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    /// The current-month totals.
    pub totals: DashboardSummary,
    /// One entry per month, oldest first, reference month last.
    pub monthly_summary: Vec<MonthlySummaryEntry>,
    /// The top spending categories, largest first.
    pub top_categories: Vec<CategorySpending>,
}

/// Computes derived statistics over a user's transactions without mutating
/// state.
///
/// The summaries are composed of independent range-sum queries: a write
/// racing with a report may be observed by one sub-query but not a sibling
/// one. This is accepted for the read-mostly reporting use case.
#[derive(Debug, Clone)]
pub struct ReportService<T> {
    transaction_store: T,
}

impl<T> ReportService<T>
where
    T: TransactionStore,
{
    /// Create a new report service using `transaction_store`.
    pub fn new(transaction_store: T) -> Self {
        Self { transaction_store }
    }

    /// The income and expense totals of the [MONTHLY_SUMMARY_MONTHS] calendar
    /// months up to and including the month of `reference_date`, oldest
    /// first.
    ///
    /// Months with no transactions yield zero totals, not an error.
    pub fn monthly_summary(
        &self,
        user_id: &UserId,
        reference_date: Date,
    ) -> Result<Vec<MonthlySummaryEntry>, Error> {
        let mut entries = Vec::with_capacity(MONTHLY_SUMMARY_MONTHS as usize);

        for months_back in (0..MONTHLY_SUMMARY_MONTHS).rev() {
            let window = aggregation::month_window(reference_date, months_back);
            let month = u8::from(window.start().month());

            let income = self.transaction_store.sum(
                user_id,
                TransactionType::Income,
                window.clone(),
            )?;
            let expense =
                self.transaction_store
                    .sum(user_id, TransactionType::Expense, window)?;

            entries.push(MonthlySummaryEntry {
                month,
                income,
                expense,
            });
        }

        Ok(entries)
    }

    /// The user's top spending categories over all their expense
    /// transactions, regardless of date.
    pub fn top_categories(&self, user_id: &UserId) -> Result<Vec<CategorySpending>, Error> {
        let rows = self.transaction_store.expense_totals_by_category(user_id)?;

        Ok(aggregation::rank_category_spending(rows))
    }

    /// The income, expense and balance totals for the calendar month of
    /// `today`.
    pub fn dashboard_summary(
        &self,
        user_id: &UserId,
        today: Date,
    ) -> Result<DashboardSummary, Error> {
        let window = aggregation::month_window(today, 0);

        let income =
            self.transaction_store
                .sum(user_id, TransactionType::Income, window.clone())?;
        let expense = self
            .transaction_store
            .sum(user_id, TransactionType::Expense, window)?;

        Ok(DashboardSummary {
            income,
            expense,
            balance: income - expense,
        })
    }

    /// The data behind the report view: the monthly summary plus the top
    /// spending categories.
    pub fn report(&self, user_id: &UserId, reference_date: Date) -> Result<Report, Error> {
        Ok(Report {
            monthly_summary: self.monthly_summary(user_id, reference_date)?,
            top_categories: self.top_categories(user_id)?,
        })
    }

    /// The data behind the dashboard view: current-month totals, the monthly
    /// summary and the top spending categories.
    pub fn dashboard(&self, user_id: &UserId, today: Date) -> Result<Dashboard, Error> {
        Ok(Dashboard {
            totals: self.dashboard_summary(user_id, today)?,
            monthly_summary: self.monthly_summary(user_id, today)?,
            top_categories: self.top_categories(user_id)?,
        })
    }
}
