pub mod budget;
pub mod expenses;
pub mod export;
pub mod houses;
pub mod indicators;
pub mod setup;
pub mod summary;
pub mod ui;
