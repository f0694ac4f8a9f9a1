// The arithmetic kernels. Each module implements one operation family over
// raw unscaled i64 values; the `Arithmetic` façade selects and parameterizes
// them by scale, rounding mode and overflow mode.

pub(crate) mod add;
pub(crate) mod checked;
pub(crate) mod div;
pub(crate) mod mul;
pub(crate) mod pow;
pub(crate) mod pow10;
pub(crate) mod round;
pub(crate) mod shift;
pub(crate) mod sqrt;
