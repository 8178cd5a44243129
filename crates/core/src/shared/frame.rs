use ndarray::{ArrayView3, ArrayViewMut3};

/// A single decoded image: contiguous `f32` samples in channel-last,
/// row-major order, nominally in `[0.0, 1.0]`.
///
/// 8-bit conversion happens at I/O boundaries only; the nodes treat pixel
/// data as opaque.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<f32>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<f32>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    /// Builds a frame from tightly packed 8-bit samples, scaling to `[0, 1]`.
    pub fn from_u8(pixels: &[u8], width: u32, height: u32, channels: u8, index: usize) -> Self {
        let data = pixels.iter().map(|&p| p as f32 / 255.0).collect();
        Self::new(data, width, height, channels, index)
    }

    /// Quantizes back to 8-bit samples, rounding and clamping out-of-range
    /// values.
    pub fn to_u8(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|&v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
            .collect()
    }

    /// Drops any channels past the third, yielding packed RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        if self.channels == 3 {
            return self.to_u8();
        }
        let channels = self.channels as usize;
        let mut out = Vec::with_capacity(self.pixel_count() * 3);
        for pixel in self.data.chunks_exact(channels) {
            for c in 0..3 {
                let v = if channels >= 3 { pixel[c] } else { pixel[0] };
                out.push((v * 255.0).round().clamp(0.0, 255.0) as u8);
            }
        }
        out
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, f32> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, f32> {
        let shape = self.shape();
        ArrayViewMut3::from_shape(shape, &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0.0f32; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0.0; 10], 2, 2, 3, 0);
    }

    #[test]
    fn test_from_u8_scales_to_unit_range() {
        let frame = Frame::from_u8(&[0, 255, 51], 1, 1, 3, 0);
        assert_relative_eq!(frame.data()[0], 0.0);
        assert_relative_eq!(frame.data()[1], 1.0);
        assert_relative_eq!(frame.data()[2], 0.2);
    }

    #[test]
    fn test_to_u8_clamps_out_of_range() {
        let frame = Frame::new(vec![-0.5, 0.5, 1.5], 1, 1, 3, 0);
        assert_eq!(frame.to_u8(), vec![0, 128, 255]);
    }

    #[test]
    fn test_u8_roundtrip_is_lossless() {
        let pixels: Vec<u8> = (0..=255).collect();
        let frame = Frame::from_u8(&pixels, 256, 1, 1, 0);
        assert_eq!(frame.to_u8(), pixels);
    }

    #[test]
    fn test_to_rgb8_drops_alpha() {
        let frame = Frame::new(vec![1.0, 0.0, 0.0, 0.5], 1, 1, 4, 0);
        assert_eq!(frame.to_rgb8(), vec![255, 0, 0]);
    }

    #[test]
    fn test_to_rgb8_expands_grayscale() {
        let frame = Frame::new(vec![1.0, 0.0], 2, 1, 1, 0);
        assert_eq!(frame.to_rgb8(), vec![255, 255, 255, 0, 0, 0]);
    }

    #[test]
    fn test_as_ndarray_is_channel_last() {
        let frame = Frame::new(vec![0.0; 24], 4, 2, 3, 0);
        assert_eq!(frame.as_ndarray().shape(), &[2, 4, 3]);
    }

    #[test]
    fn test_as_ndarray_mut_modification() {
        let mut frame = Frame::new(vec![0.0; 12], 2, 2, 3, 0);
        frame.as_ndarray_mut()[[0, 1, 2]] = 0.75;
        assert_relative_eq!(frame.as_ndarray()[[0, 1, 2]], 0.75);
    }
}
