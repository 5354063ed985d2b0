//! Tolerance-based assertions.
//!
//! NaN never compares equal, so a NaN on either side always fails.

/// Assert `|left - right| <= epsilon`, comparing as `f64`.
///
/// ```ignore
/// assert_approx_eq!(52.10168, 52.1017, 1e-4);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (l, r, eps) = ($left as f64, $right as f64, $epsilon as f64);
        if !((l - r).abs() <= eps) {
            panic!(
                "approx assertion failed: {} = {:?}, {} = {:?}, |diff| = {:?}, epsilon = {:?}",
                stringify!($left),
                l,
                stringify!($right),
                r,
                (l - r).abs(),
                eps
            );
        }
    }};
}

/// Assert two `(x, y)` pairs match component-wise within `epsilon`.
///
/// ```ignore
/// assert_coords_approx_eq!(projected_to_geographic(x, y, &p)?, (5.17834, 52.10168), 1e-6);
/// ```
#[macro_export]
macro_rules! assert_coords_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (lx, ly) = $left;
        let (rx, ry) = $right;
        $crate::assert_approx_eq!(lx, rx, $epsilon);
        $crate::assert_approx_eq!(ly, ry, $epsilon);
    }};
}

/// Assert a [`CellValue`](radar_common::CellValue) is present and within
/// `epsilon` of `expected`.
#[macro_export]
macro_rules! assert_present_approx {
    ($cell:expr, $expected:expr, $epsilon:expr) => {{
        match $cell {
            $crate::__radar_common::CellValue::Present(v) => $crate::assert_approx_eq!(v, $expected, $epsilon),
            other => panic!("expected a present value near {:?}, got {:?}", $expected, other),
        }
    }};
}
