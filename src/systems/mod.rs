pub mod camera;
pub mod capability;
pub mod compositor;
pub mod debug;
pub mod frame;
pub mod reset;
pub mod spawning;
pub mod viewport;
