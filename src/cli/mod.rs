//! Terminal front-end for the rate repository

pub mod history;
pub mod list;
pub mod rate;
pub mod setup;
pub mod ui;
