use crate::FxError;

/// Floating point type used throughout the engine.
pub type Real = f64;

/// One tolerance pair for every comparison in the workspace.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// True when `a` and `b` agree within the absolute or relative bound.
    pub fn close(self, a: Real, b: Real) -> bool {
        let diff = (a - b).abs();
        diff <= self.abs || diff <= self.rel * a.abs().max(b.abs())
    }
}

/// Reject NaN and infinities before they poison a linear system.
pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, FxError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FxError::NonFinite { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn close_accepts_tiny_differences() {
        let tol = Tolerances::default();
        assert!(tol.close(1.0, 1.0 + 1e-12));
        assert!(tol.close(0.0, 5e-13));
        assert!(!tol.close(1.0, 1.0 + 1e-6));
    }

    #[test]
    fn ensure_finite_rejects_nan_and_inf() {
        assert!(ensure_finite(Real::NAN, "x").is_err());
        assert!(ensure_finite(Real::INFINITY, "x").is_err());
        assert_eq!(ensure_finite(2.5, "x").unwrap(), 2.5);
    }

    proptest! {
        #[test]
        fn close_is_reflexive(v in -1e12f64..1e12) {
            prop_assert!(Tolerances::default().close(v, v));
        }
    }
}
