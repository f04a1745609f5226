//! Whitelisted constants and unary mathematical functions.
//!
//! This module is the only place expression identifiers resolve to values:
//! the constant table (`pi`, `e`) and the fixed set of unary functions. Both
//! tables are compile-time constant; there is no registration mechanism, so
//! nothing an expression does can extend or alter them.
//!
//! All functions use the `libm` crate for their implementations, which keeps
//! the crate usable in no_std environments. Depending on the selected
//! floating-point precision (f32 or f64, controlled by the "f32" feature),
//! different versions of the math functions are used.

#[cfg(feature = "f32")]
use libm::{
    ceilf as libm_ceil, cosf as libm_cos, expf as libm_exp, fabsf as libm_fabs,
    floorf as libm_floor, log10f as libm_log10, logf as libm_ln, powf as libm_pow,
    roundf as libm_round, sinf as libm_sin, sqrtf as libm_sqrt, tanf as libm_tan,
};

#[cfg(not(feature = "f32"))]
use libm::{
    ceil as libm_ceil, cos as libm_cos, exp as libm_exp, fabs as libm_fabs, floor as libm_floor,
    log as libm_ln, log10 as libm_log10, pow as libm_pow, round as libm_round, sin as libm_sin,
    sqrt as libm_sqrt, tan as libm_tan,
};

use crate::Real;
use crate::constants;
use crate::error::{ArithmeticError, Result, SecurityError, ident_buf};

/// Names accepted as function identifiers.
pub const FUNCTION_NAMES: [&str; 11] = [
    "sqrt", "abs", "sin", "cos", "tan", "log", "ln", "exp", "ceil", "floor", "round",
];

/// Whether `name` is a whitelisted function. Whole-identifier match only.
pub fn is_function(name: &str) -> bool {
    FUNCTION_NAMES.contains(&name)
}

/// Resolve a whitelisted constant by whole-identifier match.
pub fn constant(name: &str) -> Option<Real> {
    match name {
        "pi" => Some(constants::PI),
        "e" => Some(constants::E),
        _ => None,
    }
}

/// Apply a whitelisted unary function to an already-evaluated argument.
///
/// Domain checks come first: `sqrt` of a negative argument and `log`/`ln` of
/// a non-positive argument fail with the matching [`ArithmeticError`] instead
/// of producing NaN. The remaining functions are total over the reals, but
/// `exp` can overflow, so every result is checked for finiteness on the way
/// out.
///
/// The parser only calls this with names that passed [`is_function`]; an
/// unlisted name still gets a well-formed `UnknownIdentifier` error rather
/// than a panic.
pub fn apply(name: &str, arg: Real) -> Result<Real> {
    let value = match name {
        "sqrt" => {
            if arg < 0.0 {
                return Err(ArithmeticError::NegativeSqrt.into());
            }
            libm_sqrt(arg)
        }
        "abs" => libm_fabs(arg),
        "sin" => libm_sin(arg),
        "cos" => libm_cos(arg),
        "tan" => libm_tan(arg),
        "log" => {
            if arg <= 0.0 {
                return Err(ArithmeticError::NonPositiveLog.into());
            }
            libm_log10(arg)
        }
        "ln" => {
            if arg <= 0.0 {
                return Err(ArithmeticError::NonPositiveLog.into());
            }
            libm_ln(arg)
        }
        "exp" => libm_exp(arg),
        "ceil" => libm_ceil(arg),
        "floor" => libm_floor(arg),
        "round" => libm_round(arg),
        _ => return Err(SecurityError::UnknownIdentifier { name: ident_buf(name) }.into()),
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(ArithmeticError::NonFiniteResult.into())
    }
}

/// Exponentiation backing the `^` operator.
pub fn pow(base: Real, exponent: Real) -> Real {
    libm_pow(base, exponent)
}
