pub mod camera;
pub mod capability;
pub mod config;
pub mod connections;
pub mod field;
pub mod instability;
pub mod projection;
pub mod render_context;
pub mod surface;
pub mod viewport;
