//! Host capabilities the page borrows from its runtime. Each one is optional;
//! calling an absent capability is a no-op (or, for rasterisation, an error
//! the caller reports).

use std::sync::Arc;

use async_trait::async_trait;

use crate::presentation::markup::Element;

#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    pub use_cors: bool,
    pub transparent_background: bool,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Rasterization failed: {0}")]
pub struct RasterError(pub String);

/// Converts a subtree into an image (a `data:image/png` URL).
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, node: &Element, options: &RasterOptions)
        -> Result<String, RasterError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct RadarChart {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub suggested_min: f64,
    pub suggested_max: f64,
    pub color: String,
}

pub trait ChartRenderer: Send + Sync {
    fn create_radar(&self, canvas_id: &str, chart: &RadarChart) -> ChartHandle;
    fn destroy(&self, handle: ChartHandle);
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Playback unavailable: {0}")]
pub struct PlaybackError(pub String);

pub trait SoundCue: Send + Sync {
    fn play(&self, clip: &str) -> Result<(), PlaybackError>;
}

pub trait Haptics: Send + Sync {
    fn vibrate(&self, millis: u32);
}

pub trait UserAlert: Send + Sync {
    fn alert(&self, message: &str);
    /// Asks for a line of text; `None` when dismissed.
    fn prompt(&self, message: &str, default: &str) -> Option<String>;
}

/// A 2D surface for the collaborator constellation.
pub trait ParticleCanvas {
    fn size(&self) -> (f64, f64);
    fn clear(&mut self);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_size: f64);
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), alpha: f64);
}

#[derive(Clone, Default)]
pub struct Capabilities {
    pub rasterizer: Option<Arc<dyn Rasterizer>>,
    pub charts: Option<Arc<dyn ChartRenderer>>,
    pub sound: Option<Arc<dyn SoundCue>>,
    pub haptics: Option<Arc<dyn Haptics>>,
    pub alert: Option<Arc<dyn UserAlert>>,
}

impl Capabilities {
    pub fn vibrate(&self, millis: u32) {
        if let Some(haptics) = &self.haptics {
            haptics.vibrate(millis);
        }
    }

    /// Best effort; playback failures are dropped.
    pub fn play_sound(&self, clip: &str) {
        if let Some(sound) = &self.sound {
            if let Err(e) = sound.play(clip) {
                tracing::debug!(error = %e, clip, "sound cue skipped");
            }
        }
    }

    pub fn alert(&self, message: &str) {
        if let Some(alert) = &self.alert {
            alert.alert(message);
        }
    }

    pub fn prompt(&self, message: &str, default: &str) -> Option<String> {
        self.alert.as_ref()?.prompt(message, default)
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("rasterizer", &self.rasterizer.is_some())
            .field("charts", &self.charts.is_some())
            .field("sound", &self.sound.is_some())
            .field("haptics", &self.haptics.is_some())
            .field("alert", &self.alert.is_some())
            .finish()
    }
}
