//! Pure order aggregation: per-day and per-week totals plus the manager
//! summaries derived from a set of submitted orders.
//!
//! Everything in this module is synchronous and stateless. Price lookups go
//! through a caller-supplied function so the computations stay independent
//! of how the catalog is held; a missing lookup (a menu item deleted after
//! orders referenced it) contributes zero rather than failing.
//!
//! All monetary arithmetic is done in full decimal precision. Rounding to
//! two places happens only in [`format_amount`] at display time.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::models::order::{DayOrder, Order, WeekOrder, Weekday};

/// Total cost of one day's selections.
///
/// Zero-quantity entries and unknown item ids both contribute zero.
pub fn day_total<F>(day_order: &DayOrder, price_of: F) -> Decimal
where
    F: Fn(&str) -> Option<Decimal>,
{
    day_order
        .iter()
        .map(|(item_id, &quantity)| match price_of(item_id) {
            Some(price) => price * Decimal::from(quantity),
            None => Decimal::ZERO,
        })
        .sum()
}

/// Total cost of a full week, summed over the five weekdays.
pub fn week_total<F>(week_order: &WeekOrder, price_of: F) -> Decimal
where
    F: Fn(&str) -> Option<Decimal>,
{
    Weekday::ALL
        .iter()
        .map(|day| day_total(week_order.day(*day), &price_of))
        .sum()
}

/// Aggregate quantity of each menu item ordered on one day, across all
/// given orders.
///
/// Items with no positive quantity never appear in the result; "ordered
/// zero" is indistinguishable from "not ordered" and is omitted.
pub fn daily_item_summary(orders: &[Order], day: Weekday) -> HashMap<String, u32> {
    let mut summary: HashMap<String, u32> = HashMap::new();
    for order in orders {
        for (item_id, &quantity) in order.week_order.day(day) {
            if quantity > 0 {
                *summary.entry(item_id.clone()).or_insert(0) += quantity;
            }
        }
    }
    summary
}

/// One row of the manager cost overview.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeTotal {
    pub employee_name: String,
    pub total: Decimal,
}

/// Week total per submitted order, in the orders' own sequence.
///
/// No deduplication by name: if duplicate employee names exist as separate
/// orders, each gets its own row.
pub fn employee_totals<F>(orders: &[Order], price_of: F) -> Vec<EmployeeTotal>
where
    F: Fn(&str) -> Option<Decimal>,
{
    orders
        .iter()
        .map(|order| EmployeeTotal {
            employee_name: order.employee_name.clone(),
            total: week_total(&order.week_order, &price_of),
        })
        .collect()
}

/// Fixed two-decimal display rendering, e.g. `"25.98"`.
pub fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn order(employee_name: &str, week_order: WeekOrder) -> Order {
        Order {
            id: format!("order-{employee_name}"),
            employee_name: employee_name.to_string(),
            week_order,
            timestamp: Utc::now(),
        }
    }

    fn prices(entries: &[(&str, Decimal)]) -> HashMap<String, Decimal> {
        entries
            .iter()
            .map(|(id, price)| (id.to_string(), *price))
            .collect()
    }

    #[test]
    fn test_day_total_sums_quantity_times_price() {
        let table = prices(&[("item1", dec!(12.99)), ("item2", dec!(6.99))]);
        let mut day = DayOrder::new();
        day.insert("item1".to_string(), 2);
        day.insert("item2".to_string(), 1);

        let total = day_total(&day, |id| table.get(id).copied());
        assert_eq!(total, dec!(32.97));
    }

    #[test]
    fn test_day_total_is_non_negative_for_non_negative_inputs() {
        let table = prices(&[("item1", dec!(0.00)), ("item2", dec!(3.50))]);
        let mut day = DayOrder::new();
        day.insert("item1".to_string(), 0);
        day.insert("item2".to_string(), 4);
        day.insert("unknown".to_string(), 7);

        let total = day_total(&day, |id| table.get(id).copied());
        assert!(total >= Decimal::ZERO);
        assert_eq!(total, dec!(14.00));
    }

    #[test]
    fn test_missing_price_lookup_contributes_zero() {
        // A menu item deleted after an order referenced it must not fail
        // the computation.
        let mut day = DayOrder::new();
        day.insert("deleted-item".to_string(), 3);

        let total = day_total(&day, |_| None);
        assert_eq!(total, Decimal::ZERO);
    }

    #[test]
    fn test_week_total_equals_sum_of_day_totals() {
        let table = prices(&[("item1", dec!(12.99)), ("item2", dec!(9.99))]);
        let price_of = |id: &str| table.get(id).copied();

        let mut week = WeekOrder::default();
        week.set_quantity(Weekday::Monday, "item1", 1);
        week.set_quantity(Weekday::Wednesday, "item2", 2);
        week.set_quantity(Weekday::Friday, "item1", 1);

        let by_days: Decimal = Weekday::ALL
            .iter()
            .map(|day| day_total(week.day(*day), price_of))
            .sum();
        assert_eq!(week_total(&week, price_of), by_days);
    }

    #[test]
    fn test_week_total_for_single_day_selection() {
        // One employee, two portions of a 12.99 item on Monday only.
        let table = prices(&[("item1", dec!(12.99))]);
        let mut week = WeekOrder::default();
        week.set_quantity(Weekday::Monday, "item1", 2);

        let total = week_total(&week, |id| table.get(id).copied());
        assert_eq!(total, dec!(25.98));
        assert_eq!(format_amount(total), "25.98");
    }

    #[test]
    fn test_daily_item_summary_accumulates_across_orders() {
        let mut alice_week = WeekOrder::default();
        alice_week.set_quantity(Weekday::Monday, "item1", 2);
        alice_week.set_quantity(Weekday::Monday, "item2", 1);

        let mut bob_week = WeekOrder::default();
        bob_week.set_quantity(Weekday::Monday, "item1", 1);
        bob_week.set_quantity(Weekday::Tuesday, "item2", 5);

        let orders = vec![order("Alice", alice_week), order("Bob", bob_week)];

        let summary = daily_item_summary(&orders, Weekday::Monday);
        assert_eq!(summary.get("item1"), Some(&3));
        assert_eq!(summary.get("item2"), Some(&1));
        assert_eq!(summary.len(), 2);
    }

    #[test]
    fn test_daily_item_summary_omits_zero_quantities() {
        let mut week = WeekOrder::default();
        week.day_mut(Weekday::Monday).insert("item1".to_string(), 0);
        week.day_mut(Weekday::Monday).insert("item2".to_string(), 2);

        let orders = vec![order("Alice", week)];
        let summary = daily_item_summary(&orders, Weekday::Monday);

        // "Ordered zero" must not show up as a zero-valued key.
        assert!(!summary.contains_key("item1"));
        assert!(summary.values().all(|qty| *qty > 0));
    }

    #[test]
    fn test_daily_item_summary_total_matches_order_quantities() {
        let mut week = WeekOrder::default();
        week.set_quantity(Weekday::Thursday, "item1", 2);
        week.set_quantity(Weekday::Thursday, "item2", 3);

        let orders = vec![order("Alice", week)];
        let summary = daily_item_summary(&orders, Weekday::Thursday);
        let summed: u32 = summary.values().sum();

        let direct: u32 = orders[0].week_order.day(Weekday::Thursday).values().sum();
        assert_eq!(summed, direct);
    }

    #[test]
    fn test_employee_totals_keeps_duplicate_names_separate() {
        let table = prices(&[("item1", dec!(10.00))]);

        let mut first = WeekOrder::default();
        first.set_quantity(Weekday::Monday, "item1", 1);
        let mut second = WeekOrder::default();
        second.set_quantity(Weekday::Tuesday, "item1", 2);

        let orders = vec![order("Alice", first), order("Alice", second)];
        let totals = employee_totals(&orders, |id| table.get(id).copied());

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].total, dec!(10.00));
        assert_eq!(totals[1].total, dec!(20.00));
    }

    #[test]
    fn test_format_amount_rounds_only_at_display() {
        assert_eq!(format_amount(dec!(7)), "7.00");
        assert_eq!(format_amount(dec!(12.345)), "12.35");
        assert_eq!(format_amount(dec!(12.344)), "12.34");
    }
}
