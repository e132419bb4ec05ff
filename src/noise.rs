use rand::Rng;

use crate::fit::{ContentSize, FitError};

/// Grayscale image that is refilled with fresh random samples on every
/// frame, mimicking analog TV static.
#[derive(Debug, Clone)]
pub struct NoiseImage {
    width: u32,
    height: u32,
    samples: Vec<f32>,
}

impl NoiseImage {
    pub fn new(width: u32, height: u32) -> Result<Self, FitError> {
        if width == 0 {
            return Err(FitError::InvalidDimension("image width"));
        }
        if height == 0 {
            return Err(FitError::InvalidDimension("image height"));
        }
        Ok(Self {
            width,
            height,
            samples: vec![0.0; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Logical size fed to the aspect fitter.
    pub fn content_size(&self) -> ContentSize {
        ContentSize::new(self.width as f32, self.height as f32)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Replaces every sample with a fresh uniform draw from [0, 1).
    pub fn regenerate<R: Rng>(&mut self, rng: &mut R) {
        for sample in &mut self.samples {
            *sample = rng.random();
        }
    }

    /// Expands the samples to opaque RGBA8 pixels for texture upload.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(self.samples.len() * 4);
        for &sample in &self.samples {
            let value = (sample.clamp(0.0, 1.0) * 255.0) as u8;
            pixels.extend_from_slice(&[value, value, value, 255]);
        }
        pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(NoiseImage::new(0, 48).is_err());
        assert!(NoiseImage::new(64, 0).is_err());
    }

    #[test]
    fn regenerate_stays_in_unit_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut image = NoiseImage::new(64, 48).unwrap();
        image.regenerate(&mut rng);
        assert!(image.samples().iter().all(|&s| (0.0..1.0).contains(&s)));
    }

    #[test]
    fn regenerate_changes_the_signal() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut image = NoiseImage::new(8, 8).unwrap();
        image.regenerate(&mut rng);
        let first = image.samples().to_vec();
        image.regenerate(&mut rng);
        assert_ne!(first, image.samples());
    }

    #[test]
    fn rgba_conversion_is_opaque_gray() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut image = NoiseImage::new(4, 3).unwrap();
        image.regenerate(&mut rng);
        let pixels = image.to_rgba8();
        assert_eq!(pixels.len(), 4 * 3 * 4);
        for pixel in pixels.chunks_exact(4) {
            assert_eq!(pixel[0], pixel[1]);
            assert_eq!(pixel[1], pixel[2]);
            assert_eq!(pixel[3], 255);
        }
    }

    #[test]
    fn content_size_matches_dimensions() {
        let image = NoiseImage::new(64, 48).unwrap();
        let content = image.content_size();
        assert_eq!(content.width, 64.0);
        assert_eq!(content.height, 48.0);
    }
}
