pub mod control;
pub mod curve;
pub mod engine;
pub mod velocity;
