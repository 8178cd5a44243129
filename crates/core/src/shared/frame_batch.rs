use ndarray::{Array4, ArrayView3, Axis};

use crate::shared::error::BatchError;
use crate::shared::frame::Frame;

/// Frames stacked along a leading axis: `(count, height, width, channels)`.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBatch {
    data: Array4<f32>,
}

impl FrameBatch {
    /// Stacks frames that share one shape. Empty input is rejected because
    /// the batch shape would be undefined.
    pub fn stack(frames: &[Frame]) -> Result<Self, BatchError> {
        let first = frames.first().ok_or(BatchError::Empty)?;
        let expected = first.shape();
        if let Some((position, frame)) = frames
            .iter()
            .enumerate()
            .find(|(_, f)| f.shape() != expected)
        {
            return Err(BatchError::ShapeMismatch {
                position,
                expected,
                found: frame.shape(),
            });
        }

        let views: Vec<ArrayView3<'_, f32>> = frames.iter().map(Frame::as_ndarray).collect();
        let data = ndarray::stack(Axis(0), &views).map_err(|_| BatchError::ShapeMismatch {
            position: 0,
            expected,
            found: expected,
        })?;
        Ok(Self { data })
    }

    pub fn len(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_ndarray(&self) -> &Array4<f32> {
        &self.data
    }

    /// Splits the batch back into individual frames, indexed by position.
    pub fn frames(&self) -> Vec<Frame> {
        let (_, height, width, channels) = self.data.dim();
        self.data
            .outer_iter()
            .enumerate()
            .map(|(i, view)| {
                Frame::new(
                    view.iter().copied().collect(),
                    width as u32,
                    height as u32,
                    channels as u8,
                    i,
                )
            })
            .collect()
    }
}
