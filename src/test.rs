//! Assertions and utilities for testing fits
//!
//! The macros here compare floating-point results with an explicit or default
//! tolerance, and are exported for use in downstream tests as well as this
//! crate's own.

/// Asserts that two values are within a tolerance of each other.
///
/// The default tolerance is `1e-9` cast into the value type; pass a third
/// argument to override it.
///
/// # Example
/// ```
/// blurfit::assert_close!(0.1 + 0.2, 0.3);
/// blurfit::assert_close!(1.0, 1.05, 0.1);
/// ```
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr) => {
        $crate::assert_close!(
            $left,
            $right,
            <_ as $crate::value::Value>::try_cast(1e-9).unwrap()
        );
    };

    ($left:expr, $right:expr, $tolerance:expr) => {{
        let (l, r, tol) = ($left, $right, $tolerance);
        let delta = $crate::value::Value::abs(l - r);
        assert!(
            delta <= tol,
            "assertion failed: `(left ≈ right)`\n  left: `{l:?}`,\n right: `{r:?}`,\n delta: `{delta:?}` > `{tol:?}`",
        );
    }};
}

/// Asserts that two sequences are element-wise within a tolerance of each
/// other. Lengths must match exactly.
///
/// # Example
/// ```
/// let observed = vec![0.1 + 0.2, 2.0];
/// blurfit::assert_all_close!(observed, [0.3, 2.0]);
/// ```
#[macro_export]
macro_rules! assert_all_close {
    ($left:expr, $right:expr) => {
        $crate::assert_all_close!(
            $left,
            $right,
            <_ as $crate::value::Value>::try_cast(1e-9).unwrap()
        );
    };

    ($left:expr, $right:expr, $tolerance:expr) => {{
        let tol = $tolerance;
        let l: Vec<_> = $left.into_iter().collect();
        let r: Vec<_> = $right.into_iter().collect();
        assert_eq!(
            l.len(),
            r.len(),
            "assertion failed: sequences have different lengths ({} vs {})",
            l.len(),
            r.len(),
        );
        for (i, (a, b)) in l.into_iter().zip(r).enumerate() {
            let delta = $crate::value::Value::abs(a - b);
            assert!(
                delta <= tol,
                "assertion failed: sequences differ at index {i}\n  left: `{a:?}`,\n right: `{b:?}`,\n delta: `{delta:?}` > `{tol:?}`",
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_close() {
        assert_close!(1.0, 1.0);
        assert_close!(0.1_f64 + 0.2, 0.3);
        assert_close!(10.0, 10.4, 0.5);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_close_panics_outside_tolerance() {
        assert_close!(1.0, 2.0, 0.5);
    }

    #[test]
    fn test_assert_all_close() {
        assert_all_close!(vec![1.0, 2.0], [1.0, 2.0]);
        assert_all_close!([0.1_f64 + 0.2], [0.3]);
    }

    #[test]
    fn test_assert_all_close_default_tolerance_infers_type() {
        // The default tolerance must take its type from the compared values
        assert_all_close!(vec![1.0_f32, 0.5], [1.0, 0.5]);
        assert_all_close!(vec![1.0_f64], [1.0]);
    }

    #[test]
    #[should_panic(expected = "different lengths")]
    fn test_assert_all_close_length_mismatch() {
        assert_all_close!(vec![1.0], [1.0, 2.0]);
    }

    #[test]
    #[should_panic(expected = "sequences differ at index 1")]
    fn test_assert_all_close_element_mismatch() {
        assert_all_close!(vec![1.0, 5.0], [1.0, 2.0]);
    }
}
