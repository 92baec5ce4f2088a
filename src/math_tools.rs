//! This module provides the frequency-domain building blocks of the deblurring pipeline: separable
//! 2D Fourier transforms on top of `rustfft`, the quadrant shift between center-anchored and
//! origin-anchored layouts, and filtering of an image by pointwise multiplication of spectra.

use crate::error::DeblurError;
use ndarray::parallel::prelude::*;
use ndarray::{s, Array2, ArrayView1, ArrayViewMut1, Axis, Zip};
use num_complex::Complex32;
use num_traits::Zero;
use rustfft::{Fft, FftDirection, FftPlanner};

/// Transforms a single row or column in place.
///
/// Contiguous lanes are handed to `rustfft` directly, strided lanes go through a buffer.
fn process_lane(fft: &dyn Fft<f32>, mut lane: ArrayViewMut1<Complex32>) {
    if let Some(slice) = lane.as_slice_mut() {
        fft.process(slice);
        return;
    }
    let mut buffer = lane.to_vec();
    fft.process(&mut buffer);
    lane.assign(&ArrayView1::from(&buffer[..]));
}

/// Computes an unnormalized 2D DFT in place, rows first, then columns.
fn fft2_in_place(data: &mut Array2<Complex32>, direction: FftDirection) {
    if data.is_empty() {
        return;
    }
    let (rows, cols) = data.dim();
    let mut planner = FftPlanner::<f32>::new();
    let row_fft = planner.plan_fft(cols, direction);
    let col_fft = planner.plan_fft(rows, direction);

    data.axis_iter_mut(Axis(0))
        .into_par_iter()
        .for_each(|lane| process_lane(&*row_fft, lane));
    data.axis_iter_mut(Axis(1))
        .into_par_iter()
        .for_each(|lane| process_lane(&*col_fft, lane));
}

/// Forward 2D DFT of a real array, without scaling.
///
/// # Arguments
/// - `input`: The real-valued spatial array. It is promoted to complex with a zero imaginary part.
///
/// # Returns
/// The complex spectrum, with the DC component at `[0, 0]`.
pub fn fft2(input: &Array2<f32>) -> Array2<Complex32> {
    let mut spectrum = input.mapv(|v| Complex32::new(v, 0.0));
    fft2_in_place(&mut spectrum, FftDirection::Forward);
    spectrum
}

/// Inverse 2D DFT in place, without scaling.
pub fn ifft2(spectrum: &mut Array2<Complex32>) {
    fft2_in_place(spectrum, FftDirection::Inverse);
}

/// Swaps the quadrants of a 2D array so that the element at the geometric center moves to the
/// origin and vice versa.
///
/// The quadrant at `[0, 0]` is exchanged with the one at `[cy, cx]`, the quadrant at `[0, cx]`
/// with the one at `[cy, 0]`, where `cy = rows / 2` and `cx = cols / 2`. Applying the shift twice
/// returns the input array.
///
/// # Arguments
/// - `input`: The array to shift. It is not modified.
///
/// # Returns
/// - (*Array2<T>*): A shifted copy of `input`.
///
/// # Errors
/// - `DeblurError::OddDimensions` if either dimension is odd.
pub fn fftshift<T: Clone + Zero>(input: &Array2<T>) -> Result<Array2<T>, DeblurError> {
    let (rows, cols) = input.dim();
    if rows % 2 != 0 || cols % 2 != 0 {
        return Err(DeblurError::OddDimensions { rows, cols });
    }
    let (cy, cx) = (rows / 2, cols / 2);

    let mut output = Array2::zeros((rows, cols));
    output
        .slice_mut(s![..cy, ..cx])
        .assign(&input.slice(s![cy.., cx..]));
    output
        .slice_mut(s![cy.., cx..])
        .assign(&input.slice(s![..cy, ..cx]));
    output
        .slice_mut(s![..cy, cx..])
        .assign(&input.slice(s![cy.., ..cx]));
    output
        .slice_mut(s![cy.., ..cx])
        .assign(&input.slice(s![..cy, cx..]));
    Ok(output)
}

fn ensure_same_shape(expected: (usize, usize), found: (usize, usize)) -> Result<(), DeblurError> {
    if expected != found {
        return Err(DeblurError::DimensionMismatch { expected, found });
    }
    if expected.0 == 0 || expected.1 == 0 {
        return Err(DeblurError::EmptyRegion {
            rows: expected.0,
            cols: expected.1,
        });
    }
    Ok(())
}

/// Multiplies the unscaled image spectrum by `transfer`, normalizes by the element count and
/// returns the real part of the inverse transform.
fn multiply_and_invert(
    mut spectrum: Array2<Complex32>,
    transfer: &Array2<Complex32>,
) -> Array2<f32> {
    let scale = 1.0 / spectrum.len() as f32;
    Zip::from(&mut spectrum)
        .and(transfer)
        .par_for_each(|s, &h| *s = *s * scale * h);
    ifft2(&mut spectrum);
    spectrum.mapv(|c| c.re)
}

/// Filters an image with a frequency-domain transfer function.
///
/// The image spectrum is scaled by `1 / (rows * cols)`, multiplied pointwise (no conjugation) with
/// `transfer` promoted to complex, and transformed back. Only the real part is kept and no
/// clamping is applied.
///
/// # Arguments
/// - `image`: The spatial image.
/// - `transfer`: The real transfer function, laid out with DC at `[0, 0]`.
///
/// # Errors
/// - `DeblurError::DimensionMismatch` if the shapes differ.
/// - `DeblurError::EmptyRegion` if the image has no pixels.
pub fn filter_2d_freq(
    image: &Array2<f32>,
    transfer: &Array2<f32>,
) -> Result<Array2<f32>, DeblurError> {
    ensure_same_shape(image.dim(), transfer.dim())?;
    let (spectrum, transfer) = rayon::join(
        || fft2(image),
        || transfer.mapv(|h| Complex32::new(h, 0.0)),
    );
    Ok(multiply_and_invert(spectrum, &transfer))
}

/// Circularly convolves an image with a spatial kernel anchored at the origin.
///
/// The kernel's unscaled spectrum is used as transfer function, so a unit impulse at `[0, 0]`
/// leaves the image unchanged. A center-anchored kernel must be passed through [`fftshift`] first.
#[cfg(test)]
pub fn convolve_2d_freq(
    image: &Array2<f32>,
    kernel: &Array2<f32>,
) -> Result<Array2<f32>, DeblurError> {
    ensure_same_shape(image.dim(), kernel.dim())?;
    let (image_spectrum, kernel_spectrum) = rayon::join(|| fft2(image), || fft2(kernel));
    Ok(multiply_and_invert(image_spectrum, &kernel_spectrum))
}
