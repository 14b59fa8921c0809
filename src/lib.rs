#![forbid(unsafe_code)]

pub mod codec;
pub mod config;
pub mod foundation;
pub mod pad;
pub mod render;
pub mod rescale;
pub mod stroke;

pub use codec::{EncodedImage, ImageFormat};
pub use config::color::ColorDef;
pub use config::pad::PadConfig;
pub use foundation::core::{Point, Rect, Rgba8Premul, SamplePoint, Vec2};
pub use foundation::error::{PadError, PadResult};
pub use pad::{
    DecodeStatus, DecodeTicket, DisplayInfo, InputEvent, InputOutcome, MouseButton, Pad,
    PadEvent, PadId, ResizeDispatcher,
};
pub use render::surface::Surface;
pub use rescale::RescaleOutcome;
pub use stroke::curve::CurveSegment;
pub use stroke::engine::{StrokeEngine, StrokeSegment};
pub use stroke::velocity::VelocityWidth;
