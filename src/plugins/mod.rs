pub mod camera;
pub mod field;
pub mod setup;
pub mod ui;
