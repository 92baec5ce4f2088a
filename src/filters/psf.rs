use crate::error::DeblurError;
use ndarray::Array2;

/// Value written for every pixel covered by the motion path before normalization.
const LINE_INTENSITY: f32 = 255.0;

/// Offsets of an 8-connected line from the origin towards `(end_y, end_x)`, both ends included.
///
/// Tracing stops early once `|y| >= max_y` or `|x| >= max_x`. Both coordinates grow monotonically
/// along the line, so no later offset can land inside an array of `max_y` rows and `max_x`
/// columns, mirrored or not.
fn line_offsets(
    end_y: isize,
    end_x: isize,
    max_y: isize,
    max_x: isize,
) -> Vec<(isize, isize)> {
    let dx = end_x.abs();
    let dy = -end_y.abs();
    let (sx, sy) = (end_x.signum(), end_y.signum());
    let (mut x, mut y): (isize, isize) = (0, 0);
    let mut err = dx + dy;

    let steps = dx.min(max_x).max((-dy).min(max_y)) + 1;
    let mut offsets = Vec::with_capacity(steps as usize);
    loop {
        if y.abs() >= max_y || x.abs() >= max_x {
            break;
        }
        offsets.push((y, x));
        if x == end_x && y == end_y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    offsets
}

/// Creates the point-spread function of a linear motion blur.
///
/// The PSF is a line segment through the center `[rows / 2, cols / 2]` with half-length `length`,
/// i.e. a filled ellipse with semi-axes `(0, length)` rotated by `90 - angle` degrees. In image
/// coordinates (y pointing down) the segment runs along `(-cos(angle), sin(angle))`, so `angle`
/// is measured counter-clockwise from the horizontal. Every covered offset is mirrored through
/// the center, which keeps the kernel point-symmetric, and pixels outside the array are clipped.
///
/// # Arguments
/// - `shape` (*(usize, usize)*): `(rows, cols)` of the PSF, normally the size of the image.
/// - `length` (*u32*): Half-length of the motion in pixels. `0` yields a single center pixel.
/// - `angle` (*f32*): Direction of the motion in degrees.
///
/// # Returns
/// - (*Array2<f32>*): The non-negative kernel, normalized so that its elements sum to 1.
///
/// # Errors
/// - `DeblurError::DegeneratePsf` if the shape has no area or the angle is not finite.
pub fn motion_psf(
    shape: (usize, usize),
    length: u32,
    angle: f32,
) -> Result<Array2<f32>, DeblurError> {
    let (rows, cols) = shape;
    if rows == 0 || cols == 0 || !angle.is_finite() {
        return Err(DeblurError::DegeneratePsf);
    }

    let theta = angle.to_radians();
    let end_x = (-(length as f32) * theta.cos()).round() as isize;
    let end_y = (length as f32 * theta.sin()).round() as isize;
    let (cy, cx) = ((rows / 2) as isize, (cols / 2) as isize);

    let mut psf = Array2::<f32>::zeros(shape);
    for (dy, dx) in line_offsets(end_y, end_x, rows as isize, cols as isize) {
        for (y, x) in [(cy + dy, cx + dx), (cy - dy, cx - dx)] {
            if (0..rows as isize).contains(&y) && (0..cols as isize).contains(&x) {
                psf[(y as usize, x as usize)] = LINE_INTENSITY;
            }
        }
    }

    let total: f64 = psf.iter().map(|&v| v as f64).sum();
    if total <= 0.0 {
        return Err(DeblurError::DegeneratePsf);
    }
    psf.mapv_inplace(|v| (v as f64 / total) as f32);
    Ok(psf)
}
