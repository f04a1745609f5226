//! Public evaluation boundary.

use crate::Real;
use crate::error::Result;
use crate::eval;
use crate::policy;

/// Evaluate a user-supplied arithmetic expression to a single number.
///
/// The pipeline is: policy validation (length bound, character-class
/// whitelist, denylist scan), then the recursive-descent grammar, which must
/// consume the entire input and yields either a finite value or a typed
/// error. No host-language interpreter, reflection, or shell is ever
/// involved.
///
/// The call is pure and stateless: it performs no I/O, allocates nothing on
/// the heap, and shares no mutable state, so concurrent calls from multiple
/// threads need no synchronization.
///
/// # Examples
///
/// ```
/// use safexpr::evaluate;
///
/// assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
/// assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
/// assert_eq!(evaluate("2 ^ 3 ^ 2").unwrap(), 512.0); // right-associative
/// ```
///
/// Errors identify their category without leaking internals:
///
/// ```
/// use safexpr::{evaluate, ArithmeticError, EvalError, SecurityError};
///
/// match evaluate("10 / 0") {
///     Err(EvalError::Arithmetic(ArithmeticError::DivisionByZero)) => {}
///     other => panic!("expected a division error, got {:?}", other),
/// }
///
/// assert!(matches!(
///     evaluate("foo(1)"),
///     Err(EvalError::Security(SecurityError::UnknownIdentifier { .. }))
/// ));
/// ```
pub fn evaluate(expression: &str) -> Result<Real> {
    policy::validate(expression)?;
    eval::parse(expression)
}
