pub mod color;
pub mod pad;
