//! Core services for a team food-ordering application.
//!
//! Employees submit one weekly meal selection from a shared menu, managers
//! review aggregated orders, and the menu is curated through an editor.
//! Persistence and authentication live behind the [`storage::traits`]
//! contracts; the services here are a thin orchestration layer around a
//! pure aggregation core.

pub mod domain;
pub mod storage;

pub use domain::app::OrderingApp;
pub use domain::models::menu_item::{MenuItem, MenuItemDraft};
pub use domain::models::order::{DayOrder, Order, WeekOrder, Weekday};
pub use domain::models::session::{Identity, SessionState};
