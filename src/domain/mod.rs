pub mod aggregation;
pub mod app;
pub mod errors;
pub mod menu_service;
pub mod models;
pub mod order_service;
pub mod session_service;
