#![cfg_attr(not(test), no_std)]
#![doc = r#"
# safexpr

A sandboxed arithmetic expression evaluator: the safe replacement for handing
user input to `eval`, a shell, or any other host-language interpreter.

## Overview

`safexpr` accepts a user-supplied string, validates it against a strict
safety policy, parses it with a fused recursive-descent parser/evaluator, and
returns one floating-point result per call. The parser builds no AST and the
evaluator is stateless across calls.

Key properties:

- Whitelist-only input: ASCII digits, `.`, the operators `+ - * / % ^`,
  parentheses, and letter runs that resolve against fixed function/constant
  tables. Everything else is rejected with a typed error.
- Defense in depth: a length bound, a character-class whitelist, and a
  case-insensitive denylist scan all run before parsing even starts.
- Bounded resources: recursion depth is capped by an explicit counter, so a
  wall of nested parentheses yields a well-formed error instead of exhausting
  the native call stack. Work is O(input length) regardless of input shape.
- Explicit arithmetic failures: division/modulo by zero and out-of-domain
  function arguments are errors, and no infinity or NaN is ever returned.
- no_std compatible, with no allocator requirement; all math goes through
  `libm`.

## Quick start

```rust
use safexpr::evaluate;

assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
assert_eq!(evaluate("sqrt(16) + abs(-5)").unwrap(), 9.0);

// Constants resolve as whole identifiers.
let result = evaluate("sin(pi / 2)").unwrap();
assert!((result - 1.0).abs() < 1e-10);
```

## Grammar

Lowest to highest precedence, `^` right-associative:

```text
expression := term { ('+' | '-') term }
term       := power { ('*' | '/' | '%') power }
power      := unary [ '^' power ]
unary      := ('+' | '-') unary | primary
primary    := NUMBER | CONSTANT | FUNCTION '(' expression ')' | '(' expression ')'
```

Functions (all unary): `sqrt`, `abs`, `sin`, `cos`, `tan`, `log` (base 10),
`ln`, `exp`, `ceil`, `floor`, `round`. Constants: `pi`, `e`.

## Error handling

Every failure is one of four categories, so a user interface can phrase a
helpful message without seeing evaluator internals:

```rust
use safexpr::{evaluate, ArithmeticError, EvalError};

match evaluate("sqrt(-1)") {
    Err(EvalError::Arithmetic(ArithmeticError::NegativeSqrt)) => {}
    other => panic!("expected a domain error, got {:?}", other),
}
```

- `Validation`: too long, illegal character, suspicious pattern.
- `Syntax`: empty input, malformed number, unbalanced parens, trailing
  input, missing operand.
- `Security`: non-whitelisted identifier, nesting depth exceeded.
- `Arithmetic`: division/modulo by zero, negative sqrt, non-positive log,
  non-finite result.

## Feature flags

- `f32`: use 32-bit floating point for calculations; 64-bit is the default.
"#]

pub mod engine;
pub mod error;
pub mod eval;
pub mod functions;
pub mod lexer;
pub mod policy;

pub use engine::evaluate;
pub use error::{
    ArithmeticError, EvalError, Result, SecurityError, SyntaxError, ValidationError,
};

/// Define the floating-point type based on feature flags.
#[cfg(feature = "f32")]
pub type Real = f32;

#[cfg(not(feature = "f32"))]
pub type Real = f64;

pub mod constants {
    use super::Real;

    #[cfg(feature = "f32")]
    pub const PI: Real = core::f32::consts::PI;
    #[cfg(feature = "f32")]
    pub const E: Real = core::f32::consts::E;
    #[cfg(feature = "f32")]
    pub const TEST_PRECISION: Real = 1e-6;

    #[cfg(not(feature = "f32"))]
    pub const PI: Real = core::f64::consts::PI;
    #[cfg(not(feature = "f32"))]
    pub const E: Real = core::f64::consts::E;
    #[cfg(not(feature = "f32"))]
    pub const TEST_PRECISION: Real = 1e-10;
}

/// Utility macro to check if two floating point values are approximately
/// equal within a specified epsilon.
#[macro_export]
macro_rules! assert_approx_eq {
    // Case 1: assert_approx_eq!(left, right) -> use default epsilon
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($left, $right, $crate::constants::TEST_PRECISION)
    };
    // Case 2: assert_approx_eq!(left, right, epsilon) -> use specified epsilon
    ($left:expr, $right:expr, $epsilon:expr $(,)?) => {{
        let left_val = $left;
        let right_val = $right;
        let eps = $epsilon;
        assert!(
            (left_val - right_val).abs() < eps,
            "assertion failed: `(left ≈ right)` (left: `{}`, right: `{}`, epsilon: `{}`)",
            left_val,
            right_val,
            eps
        );
    }};
}
