pub mod app;
pub mod config;
pub mod event;
pub mod logging;
pub mod session;
pub mod speech;
pub mod store;
pub mod ui;
pub mod words;
