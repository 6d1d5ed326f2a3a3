//! Domain models for weekly meal orders.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quantity selections for a single day, keyed by menu item id.
/// A missing key is equivalent to quantity zero.
pub type DayOrder = HashMap<String, u32>;

/// The five weekdays an order can cover. The set is closed: no weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All weekdays in display order, Monday first.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }

    /// Lowercase key as used in persisted week orders.
    pub fn key(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
        }
    }
}

/// An employee's selections across the five weekdays.
///
/// All five days are always present; an empty map means nothing ordered
/// that day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekOrder {
    #[serde(default)]
    pub monday: DayOrder,
    #[serde(default)]
    pub tuesday: DayOrder,
    #[serde(default)]
    pub wednesday: DayOrder,
    #[serde(default)]
    pub thursday: DayOrder,
    #[serde(default)]
    pub friday: DayOrder,
}

impl WeekOrder {
    pub fn day(&self, day: Weekday) -> &DayOrder {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
        }
    }

    pub fn day_mut(&mut self, day: Weekday) -> &mut DayOrder {
        match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
        }
    }

    /// Sets the quantity for one item on one day. A quantity of zero prunes
    /// the entry, since absence and zero are equivalent.
    pub fn set_quantity(&mut self, day: Weekday, item_id: &str, quantity: u32) {
        if quantity == 0 {
            self.day_mut(day).remove(item_id);
        } else {
            self.day_mut(day).insert(item_id.to_string(), quantity);
        }
    }

    /// True when no day carries a positive quantity.
    pub fn is_empty(&self) -> bool {
        Weekday::ALL
            .iter()
            .all(|day| self.day(*day).values().all(|qty| *qty == 0))
    }
}

/// A finalized weekly submission by one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub employee_name: String,
    pub week_order: WeekOrder,
    pub timestamp: DateTime<Utc>,
}

/// Document shape persisted to the `orders` collection.
///
/// Field names follow the historical wire format. `user_id` tags the
/// submitting identity for provenance and is not surfaced on [`Order`];
/// manager listings are not filtered by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub employee_name: String,
    pub week_order: WeekOrder,
    pub user_id: String,
    /// Missing on records written before timestamps were persisted.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}
