pub mod autocrop;
pub mod bounds;

pub use autocrop::{RescaleOutcome, auto_crop_rescale};
pub use bounds::content_bounds;
