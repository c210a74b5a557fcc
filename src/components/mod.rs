pub mod notes;
pub mod ui;
