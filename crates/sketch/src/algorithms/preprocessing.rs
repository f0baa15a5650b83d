use image::GrayImage;
use imageproc::distance_transform::Norm;
use crate::{error::{Result, SketchError}, traits::ImagePreprocessor};

/// Fixed-level binarization, inverted so dark strokes become foreground
#[derive(Debug, Clone)]
pub struct InvertedThresholdPreprocessor {
    pub threshold: u8,
}

impl Default for InvertedThresholdPreprocessor {
    fn default() -> Self {
        Self { threshold: 127 }
    }
}

impl ImagePreprocessor for InvertedThresholdPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        // above threshold -> 255, then flipped: light paper is background
        let mut binary = imageproc::contrast::threshold(image, self.threshold);
        image::imageops::invert(&mut binary);
        Ok(binary)
    }

    fn name(&self) -> &'static str {
        "Inverted Threshold"
    }
}

/// Gaussian blur preprocessor for scan noise reduction
#[derive(Debug, Clone)]
pub struct GaussianBlurPreprocessor {
    pub sigma: f32,
}

impl Default for GaussianBlurPreprocessor {
    fn default() -> Self {
        // equivalent of a 5x5 kernel
        Self { sigma: 1.1 }
    }
}

impl ImagePreprocessor for GaussianBlurPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(SketchError::ImageProcessing(format!(
                "Gaussian sigma must be positive, got {}",
                self.sigma
            )));
        }
        Ok(imageproc::filter::gaussian_blur_f32(image, self.sigma))
    }

    fn name(&self) -> &'static str {
        "Gaussian Blur"
    }
}

/// Morphological closing on a binary image, bridging small stroke gaps
#[derive(Debug, Clone)]
pub struct ClosingPreprocessor {
    /// Chessboard radius of the structuring element (1 = 3x3 square)
    pub radius: u8,
}

impl Default for ClosingPreprocessor {
    fn default() -> Self {
        Self { radius: 1 }
    }
}

impl ImagePreprocessor for ClosingPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        if self.radius == 0 {
            return Ok(image.clone());
        }
        Ok(imageproc::morphology::close(image, Norm::LInf, self.radius))
    }

    fn name(&self) -> &'static str {
        "Closing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_threshold_is_inverted() {
        let mut img = GrayImage::from_pixel(4, 1, Luma([255u8]));
        img.put_pixel(0, 0, Luma([0]));
        img.put_pixel(1, 0, Luma([127]));
        img.put_pixel(2, 0, Luma([128]));

        let binary = InvertedThresholdPreprocessor::default().preprocess(&img).unwrap();
        assert_eq!(binary.get_pixel(0, 0)[0], 255);
        assert_eq!(binary.get_pixel(1, 0)[0], 255);
        assert_eq!(binary.get_pixel(2, 0)[0], 0);
        assert_eq!(binary.get_pixel(3, 0)[0], 0);
    }

    #[test]
    fn test_closing_bridges_single_pixel_gap() {
        let mut img = GrayImage::new(20, 9);
        for x in 2..18 {
            if x != 10 {
                for y in 3..6 {
                    img.put_pixel(x, y, Luma([255]));
                }
            }
        }

        let closed = ClosingPreprocessor::default().preprocess(&img).unwrap();
        assert_eq!(closed.get_pixel(10, 4)[0], 255);
    }

    #[test]
    fn test_blur_rejects_non_positive_sigma() {
        let img = GrayImage::new(5, 5);
        assert!(GaussianBlurPreprocessor { sigma: 0.0 }.preprocess(&img).is_err());
    }

    #[test]
    fn test_blur_keeps_dimensions() {
        let img = GrayImage::from_pixel(30, 20, Luma([200]));
        let blurred = GaussianBlurPreprocessor::default().preprocess(&img).unwrap();
        assert_eq!(blurred.dimensions(), (30, 20));
    }
}
