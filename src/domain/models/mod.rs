pub mod menu_item;
pub mod order;
pub mod session;
