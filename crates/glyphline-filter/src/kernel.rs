//! Convolution kernels
//!
//! Weights are stored row by row; the origin sits at the middle cell
//! (`width / 2`, `height / 2`).

use crate::{FilterError, FilterResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    width: u32,
    height: u32,
    weights: Vec<f32>,
}

impl Kernel {
    /// Kernel of `width` x `height` weights taken row by row from `data`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] for an empty shape or when
    /// `data` does not hold exactly `width * height` weights.
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> FilterResult<Self> {
        let cells = width as usize * height as usize;
        if cells == 0 || data.len() != cells {
            return Err(FilterError::InvalidKernel(format!(
                "{} weights do not fill a {}x{} kernel",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            weights: data.to_vec(),
        })
    }

    /// Horizontal Gaussian reaching `ceil(3 * sigma)` cells each side of
    /// the origin, scaled to sum to 1.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] unless `sigma` is positive
    /// and finite.
    pub fn gaussian_1d(sigma: f32) -> FilterResult<Self> {
        if !(sigma > 0.0 && sigma.is_finite()) {
            return Err(FilterError::InvalidKernel(format!(
                "blur sigma {} is not a positive number",
                sigma
            )));
        }
        let reach = (3.0 * sigma).ceil() as i32;
        let two_var = 2.0 * sigma * sigma;
        let bell: Vec<f32> = (-reach..=reach)
            .map(|d| (-((d * d) as f32) / two_var).exp())
            .collect();
        let total: f32 = bell.iter().sum();
        let weights: Vec<f32> = bell.iter().map(|v| v / total).collect();
        Self::from_slice(weights.len() as u32, 1, &weights)
    }

    /// Columns of weights
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Rows of weights
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cell aligned with the output pixel
    pub fn center(&self) -> (u32, u32) {
        (self.width / 2, self.height / 2)
    }

    pub fn data(&self) -> &[f32] {
        &self.weights
    }

    /// Weight at column `x`, row `y`
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        (x < self.width && y < self.height)
            .then(|| self.weights[y as usize * self.width as usize + x as usize])
    }

    /// Same weights with rows and columns swapped; a horizontal kernel
    /// becomes a vertical one.
    pub fn transpose(&self) -> Self {
        let weights = (0..self.width)
            .flat_map(|x| (0..self.height).map(move |y| (x, y)))
            .map(|(x, y)| self.weights[y as usize * self.width as usize + x as usize])
            .collect();
        Self {
            width: self.height,
            height: self.width,
            weights,
        }
    }

    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }
}
