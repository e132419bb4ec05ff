use parking_lot::RwLock;

use crate::fit::{self, ContentSize, FitError, Viewport};

/// Tracks the latest window size reported by resize events.
#[derive(Debug)]
pub struct WindowViewport {
    size: RwLock<(u32, u32)>,
}

impl WindowViewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: RwLock::new((width.max(1), height.max(1))),
        }
    }

    /// Records a new size, clamping away the zero-area sizes some
    /// platforms report while minimized.
    pub fn update(&self, width: u32, height: u32) {
        *self.size.write() = (width.max(1), height.max(1));
    }

    pub fn viewport(&self) -> Viewport {
        let (width, height) = *self.size.read();
        Viewport::new(width, height)
    }
}

/// Human-readable description of how the content fits the viewport.
pub fn fit_summary(viewport: Viewport, content: ContentSize) -> Result<String, FitError> {
    let rect = fit::fit(viewport, content)?;
    Ok(format!(
        "Fitted rect: x={:.1} y={:.1} width={:.1} height={:.1} (viewport {}x{}, content {:.0}x{:.0})",
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        viewport.width,
        viewport.height,
        content.width,
        content.height
    ))
}
