use glam::Mat4;
use thiserror::Error;

/// Error raised when an input dimension would produce a degenerate
/// rectangle or projection matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FitError {
    #[error("invalid dimension: {0}")]
    InvalidDimension(&'static str),
}

/// Pixel rectangle of the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Logical dimensions whose aspect ratio must be preserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentSize {
    pub width: f32,
    pub height: f32,
}

impl ContentSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Rectangle inscribed in a viewport while keeping the content aspect
/// ratio, centered along whichever axis has slack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FittedRect {
    /// Corner positions in triangle-strip order: bottom-left,
    /// bottom-right, top-left, top-right.
    pub fn corners(&self) -> [[f32; 2]; 4] {
        [
            [self.x, self.y],
            [self.x + self.width, self.y],
            [self.x, self.y + self.height],
            [self.x + self.width, self.y + self.height],
        ]
    }
}

/// Computes the letterboxed or pillarboxed rectangle for `content`
/// inside `viewport`.
pub fn fit(viewport: Viewport, content: ContentSize) -> Result<FittedRect, FitError> {
    if viewport.width == 0 {
        return Err(FitError::InvalidDimension("viewport width"));
    }
    if viewport.height == 0 {
        return Err(FitError::InvalidDimension("viewport height"));
    }
    if !(content.width > 0.0) {
        return Err(FitError::InvalidDimension("content width"));
    }
    if !(content.height > 0.0) {
        return Err(FitError::InvalidDimension("content height"));
    }

    let vw = viewport.width as f32;
    let vh = viewport.height as f32;
    let viewport_aspect = vw / vh;
    let content_aspect = content.aspect();

    // An exact aspect match lands in the fit-to-height branch; both
    // branches agree there (full viewport, no offset).
    let rect = if viewport_aspect < content_aspect {
        let height = vw / content_aspect;
        FittedRect {
            x: 0.0,
            y: (vh - height) / 2.0,
            width: vw,
            height,
        }
    } else {
        let width = vh * content_aspect;
        FittedRect {
            x: (vw - width) / 2.0,
            y: 0.0,
            width,
            height: vh,
        }
    };
    Ok(rect)
}

/// Builds the orthographic projection mapping `[left,right] x
/// [bottom,top] x [near,far]` to normalized device coordinates.
pub fn ortho(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> Result<Mat4, FitError> {
    if left == right {
        return Err(FitError::InvalidDimension("left == right"));
    }
    if bottom == top {
        return Err(FitError::InvalidDimension("bottom == top"));
    }
    if near == far {
        return Err(FitError::InvalidDimension("near == far"));
    }

    let rcp_width = 1.0 / (right - left);
    let rcp_height = 1.0 / (top - bottom);
    let rcp_depth = 1.0 / (far - near);
    Ok(Mat4::from_cols_array(&[
        2.0 * rcp_width,
        0.0,
        0.0,
        0.0,
        0.0,
        2.0 * rcp_height,
        0.0,
        0.0,
        0.0,
        0.0,
        -2.0 * rcp_depth,
        0.0,
        -(right + left) * rcp_width,
        -(top + bottom) * rcp_height,
        -(far + near) * rcp_depth,
        1.0,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-4, "{a} != {b}");
    }

    #[test]
    fn matching_aspect_fills_viewport() {
        let rect = fit(Viewport::new(640, 480), ContentSize::new(640.0, 480.0)).unwrap();
        assert_eq!(
            rect,
            FittedRect {
                x: 0.0,
                y: 0.0,
                width: 640.0,
                height: 480.0
            }
        );
    }

    #[test]
    fn wide_viewport_pillarboxes() {
        let rect = fit(Viewport::new(800, 480), ContentSize::new(640.0, 480.0)).unwrap();
        assert_close(rect.x, 80.0);
        assert_close(rect.y, 0.0);
        assert_close(rect.width, 640.0);
        assert_close(rect.height, 480.0);
    }

    #[test]
    fn tall_viewport_letterboxes() {
        let rect = fit(Viewport::new(640, 960), ContentSize::new(640.0, 480.0)).unwrap();
        assert_close(rect.x, 0.0);
        assert_close(rect.y, 240.0);
        assert_close(rect.width, 640.0);
        assert_close(rect.height, 480.0);
    }

    #[test]
    fn fit_preserves_aspect_and_containment() {
        let cases = [
            (1920u32, 1080u32, 64.0f32, 48.0f32),
            (100, 1000, 16.0, 9.0),
            (333, 77, 1.0, 1.0),
            (640, 480, 640.0, 480.0),
        ];
        for (vw, vh, cw, ch) in cases {
            let rect = fit(Viewport::new(vw, vh), ContentSize::new(cw, ch)).unwrap();
            let expected = cw / ch;
            let actual = rect.width / rect.height;
            assert!(
                ((actual - expected) / expected).abs() < 1e-5,
                "aspect drift for {vw}x{vh} / {cw}x{ch}"
            );
            assert!(rect.x >= 0.0);
            assert!(rect.y >= 0.0);
            assert!(rect.x + rect.width <= vw as f32 + 1e-3);
            assert!(rect.y + rect.height <= vh as f32 + 1e-3);
        }
    }

    #[test]
    fn fit_centers_the_slack_axis() {
        let rect = fit(Viewport::new(800, 480), ContentSize::new(640.0, 480.0)).unwrap();
        assert_close(rect.x, 800.0 - (rect.x + rect.width));
        let rect = fit(Viewport::new(640, 960), ContentSize::new(640.0, 480.0)).unwrap();
        assert_close(rect.y, 960.0 - (rect.y + rect.height));
    }

    #[test]
    fn fit_rejects_degenerate_dimensions() {
        assert!(fit(Viewport::new(0, 480), ContentSize::new(640.0, 480.0)).is_err());
        assert!(fit(Viewport::new(640, 0), ContentSize::new(640.0, 480.0)).is_err());
        assert!(fit(Viewport::new(640, 480), ContentSize::new(0.0, 480.0)).is_err());
        assert!(fit(Viewport::new(640, 480), ContentSize::new(640.0, -1.0)).is_err());
        assert!(fit(Viewport::new(640, 480), ContentSize::new(f32::NAN, 480.0)).is_err());
    }

    #[test]
    fn corners_follow_strip_order() {
        let rect = FittedRect {
            x: 80.0,
            y: 0.0,
            width: 640.0,
            height: 480.0,
        };
        assert_eq!(
            rect.corners(),
            [
                [80.0, 0.0],
                [720.0, 0.0],
                [80.0, 480.0],
                [720.0, 480.0]
            ]
        );
    }

    #[test]
    fn ortho_matches_reference_terms() {
        let m = ortho(0.0, 100.0, 0.0, 100.0, -1.0, 1.0).unwrap();
        let cols = m.to_cols_array_2d();
        assert_close(cols[0][0], 2.0 / 100.0);
        assert_close(cols[1][1], 2.0 / 100.0);
        assert_close(cols[2][2], -1.0);
        assert_close(cols[3][0], -1.0);
        assert_close(cols[3][1], -1.0);
        assert_close(cols[3][2], 0.0);
        assert_close(cols[3][3], 1.0);
    }

    #[test]
    fn ortho_agrees_with_glam() {
        let m = ortho(0.0, 800.0, 0.0, 480.0, -100.0, 100.0).unwrap();
        let reference = Mat4::orthographic_rh_gl(0.0, 800.0, 0.0, 480.0, -100.0, 100.0);
        assert!(m.abs_diff_eq(reference, 1e-6));
    }

    #[test]
    fn ortho_rejects_degenerate_boxes() {
        assert_eq!(
            ortho(10.0, 10.0, 0.0, 1.0, -1.0, 1.0),
            Err(FitError::InvalidDimension("left == right"))
        );
        assert!(ortho(0.0, 1.0, 5.0, 5.0, -1.0, 1.0).is_err());
        assert!(ortho(0.0, 1.0, 0.0, 1.0, 2.0, 2.0).is_err());
    }
}
