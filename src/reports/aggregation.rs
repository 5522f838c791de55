//! Pure helpers for aggregating transaction data: calendar-month windows and
//! the top spending category ranking.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use rust_decimal::Decimal;
use time::{Date, Month};

use crate::reports::{CategorySpending, TOP_SPENDING_CATEGORY_COUNT, UNKNOWN_CATEGORY_LABEL};

/// The inclusive date window covering the calendar month `months_back`
/// months before the month of `reference`.
///
/// `months_back = 0` is the month of `reference` itself.
pub(super) fn month_window(reference: Date, months_back: u32) -> RangeInclusive<Date> {
    let mut year = reference.year();
    let mut month = reference.month();

    for _ in 0..months_back {
        if month == Month::January {
            year -= 1;
        }
        month = month.previous();
    }

    let start = Date::from_calendar_date(year, month, 1)
        .expect("the first of the month is a valid date");

    let (next_year, next_month) = match month {
        Month::December => (year + 1, Month::January),
        month => (year, month.next()),
    };
    let end = Date::from_calendar_date(next_year, next_month, 1)
        .expect("the first of the month is a valid date")
        .previous_day()
        .expect("a month window never starts at the minimum date");

    start..=end
}

/// Groups expense amounts by category name and ranks the groups by summed
/// amount.
///
/// Rows whose category reference did not resolve are grouped under
/// [UNKNOWN_CATEGORY_LABEL] rather than dropped. Groups are sorted by total
/// descending; ties are broken by category name ascending so the ranking is
/// reproducible. At most [TOP_SPENDING_CATEGORY_COUNT] groups are returned.
pub(super) fn rank_category_spending(
    rows: Vec<(Option<String>, Decimal)>,
) -> Vec<CategorySpending> {
    let mut totals: HashMap<String, Decimal> = HashMap::new();

    for (name, amount) in rows {
        let label = name.unwrap_or_else(|| UNKNOWN_CATEGORY_LABEL.to_string());
        *totals.entry(label).or_insert(Decimal::ZERO) += amount;
    }

    let mut ranked: Vec<CategorySpending> = totals
        .into_iter()
        .map(|(category, mut total)| {
            total.rescale(2);

            CategorySpending { category, total }
        })
        .collect();

    ranked.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    ranked.truncate(TOP_SPENDING_CATEGORY_COUNT);

    ranked
}
