//! Fused recursive-descent parser and evaluator.
//!
//! Each grammar rule is one function that both consumes characters and
//! returns the computed value directly; no AST is built. Grammar, lowest to
//! highest precedence, with `^` right-associative:
//!
//! ```text
//! expression := term { ('+' | '-') term }
//! term       := power { ('*' | '/' | '%') power }
//! power      := unary [ '^' power ]
//! unary      := ('+' | '-') unary | primary
//! primary    := NUMBER
//!             | CONSTANT
//!             | FUNCTION '(' expression ')'
//!             | '(' expression ')'
//! ```
//!
//! Every rule passes through the [`DepthGuard`] on entry and decrements it on
//! every exit path, so nesting is bounded by
//! [`MAX_DEPTH`](crate::policy::MAX_DEPTH) rather than by whatever the native
//! call stack happens to hold on this platform. A thousand nested
//! parentheses produce a well-formed [`SecurityError::TooComplex`], not a
//! stack overflow.

use crate::Real;
use crate::error::{ArithmeticError, Result, SecurityError, SyntaxError, ident_buf};
use crate::functions;
use crate::lexer::Cursor;
use crate::policy::MAX_DEPTH;

/// Explicit recursion counter threaded through every grammar rule.
///
/// Incremented on rule entry, decremented on every exit path. The counter is
/// owned by one parse and dropped with it; there is no process-wide state.
#[derive(Debug, Default)]
pub struct DepthGuard {
    depth: usize,
}

impl DepthGuard {
    /// Claim one level of depth, failing once `MAX_DEPTH` levels are active.
    pub fn enter(&mut self) -> core::result::Result<(), SecurityError> {
        if self.depth >= MAX_DEPTH {
            return Err(SecurityError::TooComplex { max_depth: MAX_DEPTH });
        }
        self.depth += 1;
        Ok(())
    }

    /// Release one level of depth. Saturates at zero.
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Number of currently active rule invocations.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Per-call parse state: one cursor plus one depth counter.
///
/// Created fresh for every [`parse`] call and discarded on return; never
/// shared and never reused.
struct ParseState<'a> {
    cursor: Cursor<'a>,
    guard: DepthGuard,
}

/// Evaluate `expression` at the grammar level, without the policy pre-filter.
///
/// [`evaluate`](crate::evaluate) is the normal entry point; this one exists
/// so the grammar can be exercised on inputs the validator would reject. The
/// denylist is thereby purely defense-in-depth: everything it blocks is also
/// rejected here, by the whitelist lookups and the operator-only syntax.
///
/// A successful parse consumes the entire input and yields a finite value.
pub fn parse(expression: &str) -> Result<Real> {
    let mut state = ParseState {
        cursor: Cursor::new(expression),
        guard: DepthGuard::default(),
    };

    state.cursor.skip_whitespace();
    if state.cursor.at_end() {
        return Err(SyntaxError::EmptyExpression.into());
    }

    let value = state.expression()?;

    state.cursor.skip_whitespace();
    if !state.cursor.at_end() {
        return Err(SyntaxError::TrailingInput { position: state.cursor.pos() }.into());
    }

    Ok(value)
}

/// Convert a non-finite intermediate into an explicit arithmetic error.
///
/// Applied to every binary operation, so an overflow deep inside an
/// expression cannot wash out to a plausible-looking finite result.
fn checked(value: Real) -> Result<Real> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ArithmeticError::NonFiniteResult.into())
    }
}

// Each rule is split into a guard wrapper and a `_rule` body so the depth
// counter is released on error paths as well as on normal returns.
impl ParseState<'_> {
    fn expression(&mut self) -> Result<Real> {
        self.guard.enter()?;
        let result = self.expression_rule();
        self.guard.leave();
        result
    }

    /// expression := term { ('+' | '-') term }, folded left-to-right.
    fn expression_rule(&mut self) -> Result<Real> {
        let mut value = self.term()?;
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                Some('+') => {
                    self.cursor.advance();
                    value = checked(value + self.term()?)?;
                }
                Some('-') => {
                    self.cursor.advance();
                    value = checked(value - self.term()?)?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<Real> {
        self.guard.enter()?;
        let result = self.term_rule();
        self.guard.leave();
        result
    }

    /// term := power { ('*' | '/' | '%') power }, folded left-to-right.
    ///
    /// A zero right operand of `/` or `%` is rejected before the operation;
    /// silent infinities and NaNs never escape.
    fn term_rule(&mut self) -> Result<Real> {
        let mut value = self.power()?;
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                Some('*') => {
                    self.cursor.advance();
                    value = checked(value * self.power()?)?;
                }
                Some('/') => {
                    self.cursor.advance();
                    let divisor = self.power()?;
                    if divisor == 0.0 {
                        return Err(ArithmeticError::DivisionByZero.into());
                    }
                    value = checked(value / divisor)?;
                }
                Some('%') => {
                    self.cursor.advance();
                    let divisor = self.power()?;
                    if divisor == 0.0 {
                        return Err(ArithmeticError::ModuloByZero.into());
                    }
                    value = checked(value % divisor)?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn power(&mut self) -> Result<Real> {
        self.guard.enter()?;
        let result = self.power_rule();
        self.guard.leave();
        result
    }

    /// power := unary [ '^' power ]
    ///
    /// Right-associative: the right-hand side recurses into `power` itself,
    /// so `2 ^ 3 ^ 2` is `2 ^ (3 ^ 2)`.
    fn power_rule(&mut self) -> Result<Real> {
        let base = self.unary()?;
        self.cursor.skip_whitespace();
        if self.cursor.peek() == Some('^') {
            self.cursor.advance();
            let exponent = self.power()?;
            return checked(functions::pow(base, exponent));
        }
        Ok(base)
    }

    fn unary(&mut self) -> Result<Real> {
        self.guard.enter()?;
        let result = self.unary_rule();
        self.guard.leave();
        result
    }

    /// unary := ('+' | '-') unary | primary. Signs chain: `--5` is `5`.
    fn unary_rule(&mut self) -> Result<Real> {
        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            Some('+') => {
                self.cursor.advance();
                self.unary()
            }
            Some('-') => {
                self.cursor.advance();
                Ok(-self.unary()?)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Real> {
        self.guard.enter()?;
        let result = self.primary_rule();
        self.guard.leave();
        result
    }

    /// primary := NUMBER | CONSTANT | FUNCTION '(' expression ')' | '(' expression ')'
    fn primary_rule(&mut self) -> Result<Real> {
        self.cursor.skip_whitespace();
        let position = self.cursor.pos();
        match self.cursor.peek() {
            Some('(') => {
                self.cursor.advance();
                let value = self.expression()?;
                self.expect_close_paren()?;
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => Ok(self.cursor.scan_number()?),
            Some(c) if c.is_ascii_alphabetic() => self.identifier(),
            _ => Err(SyntaxError::MissingOperand { position }.into()),
        }
    }

    /// Resolve a letter run: function table first, then the constant table.
    ///
    /// Anything else is a security rejection, not a generic syntax error:
    /// an unlisted identifier is the shape an escape attempt takes.
    fn identifier(&mut self) -> Result<Real> {
        let name = self.cursor.scan_identifier();

        if functions::is_function(name) {
            self.cursor.skip_whitespace();
            if self.cursor.peek() != Some('(') {
                return Err(SyntaxError::UnbalancedParens { position: self.cursor.pos() }.into());
            }
            self.cursor.advance();
            let arg = self.expression()?;
            self.expect_close_paren()?;
            return functions::apply(name, arg);
        }

        if let Some(value) = functions::constant(name) {
            return Ok(value);
        }

        Err(SecurityError::UnknownIdentifier { name: ident_buf(name) }.into())
    }

    fn expect_close_paren(&mut self) -> Result<()> {
        self.cursor.skip_whitespace();
        if self.cursor.peek() != Some(')') {
            return Err(SyntaxError::UnbalancedParens { position: self.cursor.pos() }.into());
        }
        self.cursor.advance();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;

    #[test]
    fn test_depth_guard_enter_and_leave_balance() {
        let mut guard = DepthGuard::default();
        guard.enter().unwrap();
        guard.enter().unwrap();
        assert_eq!(guard.depth(), 2);
        guard.leave();
        guard.leave();
        assert_eq!(guard.depth(), 0);

        // Leaving at zero saturates instead of underflowing.
        guard.leave();
        assert_eq!(guard.depth(), 0);
    }

    #[test]
    fn test_depth_guard_caps_at_max_depth() {
        let mut guard = DepthGuard::default();
        for _ in 0..MAX_DEPTH {
            guard.enter().unwrap();
        }
        assert_eq!(
            guard.enter(),
            Err(SecurityError::TooComplex { max_depth: MAX_DEPTH })
        );
    }

    #[test]
    fn test_parse_requires_full_consumption() {
        assert_eq!(parse("2 3"), Err(EvalError::Syntax(SyntaxError::TrailingInput { position: 2 })));
        assert_eq!(parse("2 + 3)"), Err(EvalError::Syntax(SyntaxError::TrailingInput { position: 5 })));
    }

    #[test]
    fn test_parse_rejects_what_the_denylist_would_have_caught() {
        // The grammar alone confines input: denylisted vocabulary dies here
        // as non-whitelisted identifiers even without the pre-filter.
        for hostile in ["eval(1)", "exec(2)", "system(0)", "import", "runtime(3) + 1"] {
            assert!(matches!(
                parse(hostile),
                Err(EvalError::Security(SecurityError::UnknownIdentifier { .. }))
            ));
        }
    }

    #[test]
    fn test_parse_survives_a_thousand_nested_parens() {
        let mut hostile = String::new();
        for _ in 0..1000 {
            hostile.push('(');
        }
        hostile.push('1');
        for _ in 0..1000 {
            hostile.push(')');
        }
        // Returns normally with a typed error; no stack overflow.
        assert_eq!(
            parse(&hostile),
            Err(EvalError::Security(SecurityError::TooComplex { max_depth: MAX_DEPTH }))
        );
    }
}
