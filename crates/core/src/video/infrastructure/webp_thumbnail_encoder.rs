use base64::Engine;

use crate::shared::constants::PREVIEW_MAX_DIMENSION;
use crate::shared::frame::Frame;
use crate::video::domain::thumbnail_encoder::ThumbnailEncoder;

/// Encodes frames as base64 lossless WebP using the `image` crate.
///
/// Frames larger than `max_dimension` on either side are downscaled,
/// keeping the aspect ratio.
pub struct WebpThumbnailEncoder {
    max_dimension: u32,
}

impl WebpThumbnailEncoder {
    pub fn new(max_dimension: u32) -> Self {
        Self {
            max_dimension: max_dimension.max(1),
        }
    }

    fn target_size(&self, width: u32, height: u32) -> (u32, u32) {
        let longest = width.max(height);
        if longest <= self.max_dimension {
            return (width, height);
        }
        let scale = self.max_dimension as f64 / longest as f64;
        (
            ((width as f64 * scale).round() as u32).max(1),
            ((height as f64 * scale).round() as u32).max(1),
        )
    }
}

impl Default for WebpThumbnailEncoder {
    fn default() -> Self {
        Self::new(PREVIEW_MAX_DIMENSION)
    }
}

impl ThumbnailEncoder for WebpThumbnailEncoder {
    fn encode(&self, frame: &Frame) -> Result<String, Box<dyn std::error::Error>> {
        let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.to_rgb8())
            .ok_or("Failed to create image from frame data")?;

        let (w, h) = self.target_size(frame.width(), frame.height());
        let img = if (w, h) != (frame.width(), frame.height()) {
            image::imageops::resize(&img, w, h, image::imageops::FilterType::Triangle)
        } else {
            img
        };

        let mut bytes = Vec::new();
        img.write_with_encoder(image::codecs::webp::WebPEncoder::new_lossless(&mut bytes))?;
        Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame(width: u32, height: u32, r: f32, g: f32, b: f32) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..(width * height) {
            data.extend_from_slice(&[r, g, b]);
        }
        Frame::new(data, width, height, 3, 0)
    }

    fn decode(encoded: &str) -> image::DynamicImage {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        image::load_from_memory_with_format(&bytes, image::ImageFormat::WebP).unwrap()
    }

    #[test]
    fn test_roundtrip_preserves_pixels() {
        let frame = make_frame(50, 40, 0.2, 0.4, 0.8);
        let encoded = WebpThumbnailEncoder::default().encode(&frame).unwrap();

        let img = decode(&encoded).to_rgb8();
        assert_eq!(img.dimensions(), (50, 40));
        assert_eq!(img.get_pixel(0, 0).0, [51, 102, 204]);
    }

    #[test]
    fn test_large_frames_are_downscaled() {
        let frame = make_frame(200, 100, 0.5, 0.5, 0.5);
        let encoded = WebpThumbnailEncoder::new(64).encode(&frame).unwrap();
        assert_eq!(decode(&encoded).to_rgb8().dimensions(), (64, 32));
    }

    #[test]
    fn test_target_size_keeps_small_frames() {
        let encoder = WebpThumbnailEncoder::new(512);
        assert_eq!(encoder.target_size(320, 240), (320, 240));
        assert_eq!(encoder.target_size(1024, 256), (512, 128));
        assert_eq!(encoder.target_size(4000, 1), (512, 1));
    }
}
