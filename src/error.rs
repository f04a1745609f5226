//! Error types for expression validation, parsing, and evaluation.
//!
//! Every failure an [`evaluate`](crate::evaluate) call can produce falls into
//! one of four categories: validation (pre-parse policy checks), syntax,
//! security (whitelist and resource-bound violations), and arithmetic (domain
//! errors). The categories stay separate so a caller can phrase a helpful
//! message without exposing evaluator internals, and so tests can assert on
//! the exact failure class.

use core::fmt;
use core::result;

/// Result type used throughout the crate.
///
/// This is a convenience type alias that uses the `EvalError` type for the
/// error variant.
pub type Result<T> = result::Result<T, EvalError>;

/// Maximum identifier length preserved inside error values.
///
/// Offending names longer than this are truncated; nothing that long is
/// whitelisted anyway.
pub const MAX_ERROR_IDENT: usize = 32;

/// Bounded buffer for identifier names carried inside error values.
///
/// The crate is no_std without an allocator, so error payloads use a
/// fixed-capacity heapless string instead of an owned `String`.
pub type IdentBuf = heapless::String<MAX_ERROR_IDENT>;

/// Copy an identifier into a bounded buffer, truncating if oversized.
pub(crate) fn ident_buf(name: &str) -> IdentBuf {
    let mut buf = IdentBuf::new();
    for ch in name.chars() {
        if buf.push(ch).is_err() {
            break;
        }
    }
    buf
}

/// Top-level error type returned by [`evaluate`](crate::evaluate).
///
/// Each variant wraps the error enum of one failure category. All categories
/// are equally fatal to a single call; retrying is the caller's decision.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The input failed the pre-parse safety policy.
    Validation(ValidationError),
    /// The input is not a well-formed expression.
    Syntax(SyntaxError),
    /// The input asked for something outside the sandbox: a non-whitelisted
    /// identifier or more nesting than the depth guard allows.
    Security(SecurityError),
    /// The expression is well-formed but a value fell outside a function's
    /// or operator's domain.
    Arithmetic(ArithmeticError),
}

/// Rejections produced by [`policy::validate`](crate::policy::validate)
/// before any parsing begins.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The input exceeds [`MAX_LENGTH`](crate::policy::MAX_LENGTH) bytes.
    TooLong { len: usize, max: usize },
    /// A character outside the whitelist class was found.
    IllegalCharacter { ch: char, position: usize },
    /// A denylisted substring was found by the case-insensitive scan.
    SuspiciousPattern { pattern: &'static str },
}

/// Malformed expression structure.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// The input is empty, or whitespace only.
    EmptyExpression,
    /// A numeric literal could not be read: more than one dot, a lone dot,
    /// or a value too large for the numeric type.
    InvalidNumber { position: usize },
    /// A required parenthesis is missing.
    UnbalancedParens { position: usize },
    /// Characters remain after a complete expression was consumed.
    TrailingInput { position: usize },
    /// An operand was required but the input ended or an operator/paren
    /// appeared instead.
    MissingOperand { position: usize },
}

/// Whitelist and resource-bound violations.
///
/// These are kept apart from plain syntax errors: a non-whitelisted
/// identifier is the class of input that would indicate an attempted escape
/// into host semantics, and excessive nesting is a resource attack.
#[derive(Debug, Clone, PartialEq)]
pub enum SecurityError {
    /// The identifier matches neither the function nor the constant table.
    UnknownIdentifier { name: IdentBuf },
    /// Nesting depth exceeded [`MAX_DEPTH`](crate::policy::MAX_DEPTH).
    TooComplex { max_depth: usize },
}

/// Domain errors raised during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum ArithmeticError {
    /// Division with a zero divisor.
    DivisionByZero,
    /// Modulo with a zero divisor.
    ModuloByZero,
    /// `sqrt` of a negative argument.
    NegativeSqrt,
    /// `log` or `ln` of a non-positive argument.
    NonPositiveLog,
    /// An operation produced an infinity or NaN; non-finite values are
    /// surfaced as errors, never returned.
    NonFiniteResult,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Validation(err) => write!(f, "Validation error: {}", err),
            EvalError::Syntax(err) => write!(f, "Syntax error: {}", err),
            EvalError::Security(err) => write!(f, "Security error: {}", err),
            EvalError::Arithmetic(err) => write!(f, "Arithmetic error: {}", err),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::TooLong { len, max } => {
                write!(f, "expression too long: {} characters (maximum is {})", len, max)
            }
            ValidationError::IllegalCharacter { ch, position } => {
                write!(f, "illegal character '{}' at position {}", ch, position)
            }
            ValidationError::SuspiciousPattern { pattern } => {
                write!(f, "expression contains the forbidden pattern \"{}\"", pattern)
            }
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::EmptyExpression => write!(f, "expression is empty"),
            SyntaxError::InvalidNumber { position } => {
                write!(f, "invalid numeric literal at position {}", position)
            }
            SyntaxError::UnbalancedParens { position } => {
                write!(f, "unbalanced parenthesis at position {}", position)
            }
            SyntaxError::TrailingInput { position } => {
                write!(f, "unexpected trailing input at position {}", position)
            }
            SyntaxError::MissingOperand { position } => {
                write!(f, "expected an operand at position {}", position)
            }
        }
    }
}

impl fmt::Display for SecurityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityError::UnknownIdentifier { name } => {
                write!(
                    f,
                    "unknown identifier '{}': only whitelisted functions and constants are allowed",
                    name
                )
            }
            SecurityError::TooComplex { max_depth } => {
                write!(f, "expression too deeply nested (maximum depth is {})", max_depth)
            }
        }
    }
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticError::DivisionByZero => write!(f, "division by zero"),
            ArithmeticError::ModuloByZero => write!(f, "modulo by zero"),
            ArithmeticError::NegativeSqrt => write!(f, "square root of a negative number"),
            ArithmeticError::NonPositiveLog => write!(f, "logarithm of a non-positive number"),
            ArithmeticError::NonFiniteResult => write!(f, "result is not a finite number"),
        }
    }
}

impl From<ValidationError> for EvalError {
    fn from(err: ValidationError) -> EvalError {
        EvalError::Validation(err)
    }
}

impl From<SyntaxError> for EvalError {
    fn from(err: SyntaxError) -> EvalError {
        EvalError::Syntax(err)
    }
}

impl From<SecurityError> for EvalError {
    fn from(err: SecurityError) -> EvalError {
        EvalError::Security(err)
    }
}

impl From<ArithmeticError> for EvalError {
    fn from(err: ArithmeticError) -> EvalError {
        EvalError::Arithmetic(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages_name_the_category() {
        let err: EvalError = ArithmeticError::DivisionByZero.into();
        assert_eq!(format!("{}", err), "Arithmetic error: division by zero");

        let err: EvalError = SyntaxError::TrailingInput { position: 4 }.into();
        assert_eq!(
            format!("{}", err),
            "Syntax error: unexpected trailing input at position 4"
        );

        let err: EvalError = ValidationError::SuspiciousPattern { pattern: "eval" }.into();
        assert_eq!(
            format!("{}", err),
            "Validation error: expression contains the forbidden pattern \"eval\""
        );
    }

    #[test]
    fn test_ident_buf_truncates_long_names() {
        let long = "a".repeat(MAX_ERROR_IDENT + 10);
        let buf = ident_buf(&long);
        assert_eq!(buf.len(), MAX_ERROR_IDENT);
    }

    #[test]
    fn test_unknown_identifier_display_carries_the_name() {
        let err = SecurityError::UnknownIdentifier { name: ident_buf("foo") };
        let msg = format!("{}", err);
        assert!(msg.contains("'foo'"), "message should name the identifier: {}", msg);
    }
}
