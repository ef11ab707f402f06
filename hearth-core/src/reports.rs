//! Admin dashboard aggregation.
//!
//! The server hands this module a flat list of booking records (one row
//! per booking, joined to the property's category) and gets back the
//! monthly and per-category rollups the dashboard renders. Aggregation
//! happens in memory; the record count for a single marketplace is small
//! enough that pushing this into SQL buys nothing.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// One booking, as fed into the dashboard rollup.
#[derive(Debug, Clone)]
pub struct BookingRecord {
    pub check_in: NaiveDate,
    pub category: String,
    pub total_cents: i64,
    /// Booking status: pending/confirmed/ongoing/completed/cancelled.
    pub status: String,
    /// Payment status: pending/paid/failed/refunded.
    pub payment_status: String,
}

/// Revenue for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRevenue {
    /// `YYYY-MM` of the booking's check-in date.
    pub month: String,
    pub bookings: u64,
    pub revenue_cents: i64,
}

/// Revenue for one property category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRevenue {
    pub category: String,
    pub bookings: u64,
    pub revenue_cents: i64,
}

/// Dashboard summary: monthly and category rollups plus status counts.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_bookings: u64,
    pub total_revenue_cents: i64,
    pub monthly: Vec<MonthlyRevenue>,
    pub by_category: Vec<CategoryRevenue>,
    pub by_status: BTreeMap<String, u64>,
}

/// Roll booking records up into a dashboard summary.
///
/// Only bookings with `payment_status = "paid"` count toward revenue;
/// every booking counts toward the status breakdown. Months and
/// categories come back sorted (months ascending, categories by name).
pub fn summarize(rows: &[BookingRecord]) -> Summary {
    let mut monthly: BTreeMap<String, (u64, i64)> = BTreeMap::new();
    let mut by_category: BTreeMap<String, (u64, i64)> = BTreeMap::new();
    let mut by_status: BTreeMap<String, u64> = BTreeMap::new();
    let mut total_revenue_cents = 0i64;

    for row in rows {
        *by_status.entry(row.status.clone()).or_default() += 1;

        if row.payment_status != "paid" {
            continue;
        }

        total_revenue_cents += row.total_cents;

        let month = format!("{:04}-{:02}", row.check_in.year(), row.check_in.month());
        let entry = monthly.entry(month).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += row.total_cents;

        let entry = by_category.entry(row.category.clone()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += row.total_cents;
    }

    Summary {
        total_bookings: rows.len() as u64,
        total_revenue_cents,
        monthly: monthly
            .into_iter()
            .map(|(month, (bookings, revenue_cents))| MonthlyRevenue {
                month,
                bookings,
                revenue_cents,
            })
            .collect(),
        by_category: by_category
            .into_iter()
            .map(|(category, (bookings, revenue_cents))| CategoryRevenue {
                category,
                bookings,
                revenue_cents,
            })
            .collect(),
        by_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        check_in: &str,
        category: &str,
        total_cents: i64,
        status: &str,
        payment_status: &str,
    ) -> BookingRecord {
        BookingRecord {
            check_in: check_in.parse().unwrap(),
            category: category.to_string(),
            total_cents,
            status: status.to_string(),
            payment_status: payment_status.to_string(),
        }
    }

    #[test]
    fn empty_input() {
        let s = summarize(&[]);
        assert_eq!(s.total_bookings, 0);
        assert_eq!(s.total_revenue_cents, 0);
        assert!(s.monthly.is_empty());
        assert!(s.by_category.is_empty());
        assert!(s.by_status.is_empty());
    }

    #[test]
    fn unpaid_bookings_count_but_earn_nothing() {
        let rows = vec![
            record("2025-04-10", "villa", 50_000, "confirmed", "paid"),
            record("2025-04-12", "villa", 80_000, "pending", "pending"),
            record("2025-04-20", "cabin", 30_000, "cancelled", "refunded"),
        ];
        let s = summarize(&rows);

        assert_eq!(s.total_bookings, 3);
        assert_eq!(s.total_revenue_cents, 50_000);
        assert_eq!(s.monthly.len(), 1);
        assert_eq!(s.monthly[0].month, "2025-04");
        assert_eq!(s.monthly[0].bookings, 1);
        assert_eq!(s.by_status["pending"], 1);
        assert_eq!(s.by_status["cancelled"], 1);
    }

    #[test]
    fn months_sorted_ascending() {
        let rows = vec![
            record("2025-03-01", "villa", 10_000, "completed", "paid"),
            record("2024-12-15", "villa", 20_000, "completed", "paid"),
            record("2025-01-05", "cabin", 15_000, "completed", "paid"),
        ];
        let s = summarize(&rows);

        let months: Vec<&str> = s.monthly.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2024-12", "2025-01", "2025-03"]);
        assert_eq!(s.total_revenue_cents, 45_000);
    }

    #[test]
    fn summary_serializes_with_stable_field_names() {
        let s = summarize(&[record("2025-06-01", "villa", 9_000, "completed", "paid")]);
        let json = serde_json::to_value(&s).unwrap();

        assert_eq!(json["total_bookings"], 1);
        assert_eq!(json["total_revenue_cents"], 9_000);
        assert_eq!(json["monthly"][0]["month"], "2025-06");
        assert_eq!(json["by_category"][0]["category"], "villa");
        assert_eq!(json["by_status"]["completed"], 1);
    }

    #[test]
    fn category_rollup() {
        let rows = vec![
            record("2025-05-01", "villa", 10_000, "completed", "paid"),
            record("2025-05-02", "villa", 12_000, "completed", "paid"),
            record("2025-05-03", "apartment", 7_000, "completed", "paid"),
        ];
        let s = summarize(&rows);

        assert_eq!(s.by_category.len(), 2);
        // BTreeMap ordering: apartment before villa
        assert_eq!(s.by_category[0].category, "apartment");
        assert_eq!(s.by_category[0].revenue_cents, 7_000);
        assert_eq!(s.by_category[1].category, "villa");
        assert_eq!(s.by_category[1].bookings, 2);
        assert_eq!(s.by_category[1].revenue_cents, 22_000);
    }
}
