pub mod core;
pub mod auth;
pub mod form;
pub mod output;
pub mod ui;
pub mod util;
