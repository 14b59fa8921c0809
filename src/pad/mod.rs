pub mod dispatch;
pub mod input;
#[allow(clippy::module_inception)]
pub mod pad;

pub use dispatch::{PadId, ResizeDispatcher};
pub use input::{InputEvent, InputOutcome, MouseButton, PadEvent};
pub use pad::{DecodeStatus, DecodeTicket, DisplayInfo, Pad};
