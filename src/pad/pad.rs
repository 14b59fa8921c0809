use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::codec::decode::{DecodedImage, Placement, decode_image, draw_decoded, zoom_matches};
use crate::codec::{EncodedImage, ImageFormat, encode};
use crate::config::pad::PadConfig;
use crate::foundation::core::SamplePoint;
use crate::foundation::error::PadResult;
use crate::pad::input::{InputEvent, InputFilter, InputOutcome, PadEvent, StrokeAction};
use crate::render::raster::Rasterizer;
use crate::render::surface::Surface;
use crate::rescale::autocrop::{RescaleOutcome, auto_crop_rescale};
use crate::stroke::engine::{StrokeEnd, StrokeEngine, StrokeSegment};
use crate::stroke::velocity::VelocityWidth;

/// Display metrics supplied by the host.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DisplayInfo {
    pub device_pixel_ratio: f64,
    pub device_dpi: Option<f64>,
    pub logical_dpi: Option<f64>,
    pub outer_width: f64,
    pub inner_width: f64,
}

impl Default for DisplayInfo {
    fn default() -> Self {
        Self {
            device_pixel_ratio: 1.0,
            device_dpi: None,
            logical_dpi: None,
            outer_width: 1.0,
            inner_width: 1.0,
        }
    }
}

impl DisplayInfo {
    /// Physical-to-logical resolution when both DPIs are known, else the window width ratio.
    pub fn zoom(&self) -> f64 {
        match (self.device_dpi, self.logical_dpi) {
            (Some(device), Some(logical)) if logical > 0.0 => device / logical,
            _ if self.inner_width > 0.0 => self.outer_width / self.inner_width,
            _ => 1.0,
        }
    }

    /// Device pixel ratio, never below 1.
    pub fn pixel_ratio(&self) -> f64 {
        if self.device_pixel_ratio.is_finite() {
            self.device_pixel_ratio.max(1.0)
        } else {
            1.0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeStatus {
    /// Decoded and queued; painted by the next [`Pad::flush_decodes`].
    Pending,
    Painted,
    /// The payload could not be decoded or painted. The surface was left untouched.
    Failed,
    /// Nothing to restore (empty payload).
    Skipped,
}

/// Completion handle of a [`Pad::from_image`] request.
///
/// Ignoring it is fire-and-forget; polling it lets the caller sequence strokes or encodes after
/// the paint.
#[derive(Clone, Debug)]
pub struct DecodeTicket(Rc<Cell<DecodeStatus>>);

impl DecodeTicket {
    fn new(status: DecodeStatus) -> Self {
        Self(Rc::new(Cell::new(status)))
    }

    pub fn status(&self) -> DecodeStatus {
        self.0.get()
    }

    pub fn is_done(&self) -> bool {
        self.status() != DecodeStatus::Pending
    }

    fn set(&self, status: DecodeStatus) {
        self.0.set(status);
    }
}

struct PendingDecode {
    image: DecodedImage,
    placement: Placement,
    ticket: DecodeTicket,
}

/// One drawing surface with its stroke pipeline and host-facing operations.
pub struct Pad {
    config: PadConfig,
    display: DisplayInfo,
    viewport: (f64, f64),
    surface: Surface,
    engine: StrokeEngine,
    rasterizer: Rasterizer,
    input: InputFilter,
    enabled: bool,
    is_empty: bool,
    signature: String,
    zoom: f64,
    pending: VecDeque<PendingDecode>,
}

impl std::fmt::Debug for Pad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pad")
            .field("width", &self.surface.width())
            .field("height", &self.surface.height())
            .field("pixel_ratio", &self.surface.pixel_ratio())
            .field("enabled", &self.enabled)
            .field("is_empty", &self.is_empty)
            .field("pending_decodes", &self.pending.len())
            .finish()
    }
}

impl Pad {
    /// A blank, transparent pad laid out for the given logical viewport.
    pub fn new(config: PadConfig, display: DisplayInfo, viewport: (f64, f64)) -> Self {
        let (width, height) = pixel_size(&config, &display, viewport);
        let surface = Surface::new(width, height, display.pixel_ratio());
        let engine = StrokeEngine::new(velocity_model(&config));
        let rasterizer = Rasterizer::new(config.pen_color.to_rgba8());
        Self {
            config,
            display,
            viewport,
            surface,
            engine,
            rasterizer,
            input: InputFilter::default(),
            enabled: true,
            is_empty: true,
            signature: String::new(),
            zoom: display.zoom(),
            pending: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    /// Replace the configuration. Pen and width settings apply from the next stroke; size
    /// settings apply on the next relayout.
    pub fn set_config(&mut self, config: PadConfig) {
        self.rasterizer.set_pen(config.pen_color.to_rgba8());
        self.engine = StrokeEngine::new(velocity_model(&config));
        self.config = config;
    }

    pub fn display(&self) -> &DisplayInfo {
        &self.display
    }

    pub fn set_display(&mut self, display: DisplayInfo) {
        self.display = display;
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn engine(&self) -> &StrokeEngine {
        &self.engine
    }

    /// Zoom recorded at the last layout; pass it back to [`Pad::from_image`] to restore
    /// content saved from this pad.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Latest encoded content as a data URL, or `""` if nothing was encoded yet.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Accept input again.
    pub fn on(&mut self) {
        self.enabled = true;
    }

    /// Ignore all input until [`Pad::on`].
    pub fn off(&mut self) {
        self.enabled = false;
        self.input.reset();
    }

    pub fn handle_input(&mut self, event: InputEvent) -> InputOutcome {
        if !self.enabled {
            return InputOutcome::default();
        }
        let (action, prevent_default) = self.input.route(event);
        let event = match action {
            StrokeAction::Begin(p) => Some(self.stroke_begin(p)),
            StrokeAction::Update(p) => {
                self.stroke_update(p);
                None
            }
            StrokeAction::End => Some(self.stroke_end()),
            StrokeAction::Ignore => None,
        };
        InputOutcome {
            event,
            prevent_default,
        }
    }

    /// Start a new stroke at `p`. Resets stroke state and the empty flag.
    pub fn stroke_begin(&mut self, p: SamplePoint) -> PadEvent {
        self.is_empty = true;
        let seg = self.engine.begin_stroke(p);
        self.draw(seg);
        tracing::debug!(x = p.x, y = p.y, "stroke begin");
        PadEvent::StrokeBegin
    }

    pub fn stroke_update(&mut self, p: SamplePoint) {
        let seg = self.engine.add_point(p);
        self.draw(seg);
    }

    /// Finish the stroke, leaving a dot for taps, and re-encode the signature.
    pub fn stroke_end(&mut self) -> PadEvent {
        let end = self.engine.end_stroke();
        if let StrokeEnd::Dot(p) = end {
            match self
                .rasterizer
                .draw_dot(&mut self.surface, p.pos(), self.config.effective_dot_size())
            {
                Ok(drawn) => self.is_empty &= !drawn,
                Err(err) => tracing::warn!(error = %err, "failed to draw tap dot"),
            }
        }
        tracing::debug!(?end, "stroke end");
        self.refresh_signature();
        PadEvent::StrokeEnd
    }

    fn draw(&mut self, seg: Option<StrokeSegment>) {
        let Some(seg) = seg else {
            return;
        };
        match self.rasterizer.draw_segment(&mut self.surface, &seg) {
            Ok(drawn) => self.is_empty &= !drawn,
            Err(err) => tracing::warn!(error = %err, "failed to draw stroke segment"),
        }
    }

    /// Wipe to the background color, reset stroke state and update the signature.
    pub fn clear(&mut self) {
        self.surface.fill(self.config.background_color.to_rgba8_premul());
        self.engine.reset();
        self.is_empty = true;
        self.refresh_signature();
    }

    /// Encode the surface. Fully transparent pixels are baked to the background first.
    pub fn to_image(&mut self, format: ImageFormat, quality: Option<u8>) -> PadResult<EncodedImage> {
        encode(
            &mut self.surface,
            self.config.background_color.to_rgba8(),
            format,
            quality,
        )
    }

    fn refresh_signature(&mut self) {
        if self.surface.is_zero_sized() {
            return;
        }
        match self.to_image(ImageFormat::Png, None) {
            Ok(img) => self.signature = img.to_data_url(),
            Err(err) => tracing::warn!(error = %err, "failed to encode signature"),
        }
    }

    /// Restore a data URL previously produced by this or another pad.
    ///
    /// `zoom_level` is the zoom the image was saved at (`None` means the current zoom). When it
    /// matches the current zoom the image is fitted to the surface, preserving its aspect
    /// ratio; otherwise it is centered at native size.
    ///
    /// The payload is decoded immediately but painted by [`Pad::flush_decodes`]. A payload that
    /// cannot be decoded leaves the pad untouched.
    pub fn from_image(&mut self, data_url: &str, zoom_level: Option<f64>) -> DecodeTicket {
        self.engine.reset();
        if data_url.trim().is_empty() {
            return DecodeTicket::new(DecodeStatus::Skipped);
        }

        let decoded = EncodedImage::from_data_url(data_url).and_then(|img| decode_image(&img.bytes));
        let image = match decoded {
            Ok(image) => image,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring undecodable image");
                return DecodeTicket::new(DecodeStatus::Failed);
            }
        };

        let actual = self.display.zoom();
        let expected = zoom_level.filter(|z| *z > 0.0).unwrap_or(actual);
        let placement = if zoom_matches(actual, expected, self.config.zoom_epsilon) {
            Placement::Fit
        } else {
            Placement::Native
        };

        let ticket = DecodeTicket::new(DecodeStatus::Pending);
        self.pending.push_back(PendingDecode {
            image,
            placement,
            ticket: ticket.clone(),
        });
        self.is_empty = false;
        ticket
    }

    pub fn pending_decodes(&self) -> usize {
        self.pending.len()
    }

    /// Paint every queued decode in request order. Returns the number painted.
    pub fn flush_decodes(&mut self) -> usize {
        let mut painted = 0;
        while let Some(job) = self.pending.pop_front() {
            match draw_decoded(&mut self.surface, &job.image, job.placement) {
                Ok(dst) => {
                    tracing::debug!(
                        width = job.image.width,
                        height = job.image.height,
                        ?dst,
                        "decoded image painted"
                    );
                    job.ticket.set(DecodeStatus::Painted);
                    painted += 1;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to paint decoded image");
                    job.ticket.set(DecodeStatus::Failed);
                }
            }
        }
        painted
    }

    /// Logical size the pad would take in `viewport`.
    pub fn logical_size_in(&self, viewport: (f64, f64)) -> (f64, f64) {
        self.config.logical_size(viewport.0, viewport.1)
    }

    /// Resize to `viewport` and carry the previous content over, then re-encode.
    ///
    /// Returns `None` without touching the pad when it would have no width.
    #[tracing::instrument(skip(self))]
    pub fn relayout(&mut self, viewport: (f64, f64)) -> PadResult<Option<RescaleOutcome>> {
        if self.logical_size_in(viewport).0 <= 0.0 {
            return Ok(None);
        }
        self.viewport = viewport;
        let (width, height) = pixel_size(&self.config, &self.display, viewport);
        let outcome = auto_crop_rescale(
            &mut self.surface,
            width,
            height,
            self.display.pixel_ratio(),
            self.config.background_color.to_rgba8(),
        )?;
        self.zoom = self.display.zoom();
        self.refresh_signature();
        tracing::debug!(width, height, ?outcome, "relayout");
        Ok(Some(outcome))
    }

    /// Relayout in the current viewport, e.g. after a pixel ratio change.
    pub fn auto_crop_rescale(&mut self) -> PadResult<Option<RescaleOutcome>> {
        self.relayout(self.viewport)
    }
}

fn velocity_model(config: &PadConfig) -> VelocityWidth {
    VelocityWidth::new(
        config.velocity_filter_weight,
        config.min_width,
        config.max_width,
    )
}

fn pixel_size(config: &PadConfig, display: &DisplayInfo, viewport: (f64, f64)) -> (u32, u32) {
    let (w, h) = config.logical_size(viewport.0, viewport.1);
    let ratio = display.pixel_ratio();
    let to_px = |v: f64| {
        let px = (v * ratio).floor();
        if px.is_finite() && px > 0.0 {
            px.min(f64::from(u32::MAX)) as u32
        } else {
            0
        }
    };
    (to_px(w), to_px(h))
}

#[cfg(test)]
#[path = "../../tests/unit/pad/pad.rs"]
mod tests;
