//! Float routines that fall back to `libm` when built without `std`.

pub(crate) fn hypot(x: f32, y: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        x.hypot(y)
    }
    #[cfg(not(feature = "std"))]
    {
        libm::hypotf(x, y)
    }
}

pub(crate) fn atan2(y: f32, x: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        y.atan2(x)
    }
    #[cfg(not(feature = "std"))]
    {
        libm::atan2f(y, x)
    }
}

pub(crate) fn sin_cos(angle: f32) -> (f32, f32) {
    #[cfg(feature = "std")]
    {
        angle.sin_cos()
    }
    #[cfg(not(feature = "std"))]
    {
        (libm::sinf(angle), libm::cosf(angle))
    }
}
