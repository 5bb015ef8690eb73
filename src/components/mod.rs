pub mod canvas;
pub mod particle;
