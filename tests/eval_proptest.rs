//! Property-based tests for the evaluator: purity, whitespace
//! insensitivity, precedence against a reference model, and no-panic
//! robustness on arbitrary input.

use proptest::prelude::*;
use safexpr::{Real, evaluate};

/// Reference model for flat `+ - *` chains: fold `*` into the current term,
/// then sum the terms.
fn precedence_model(first: Real, rest: &[(char, Real)]) -> Real {
    let mut terms = vec![first];
    for &(op, value) in rest {
        match op {
            '*' => {
                let last = terms.last_mut().unwrap();
                *last *= value;
            }
            '+' => terms.push(value),
            '-' => terms.push(-value),
            _ => unreachable!(),
        }
    }
    terms.iter().sum()
}

fn flat_op() -> impl Strategy<Value = char> {
    prop_oneof![Just('+'), Just('-'), Just('*')]
}

proptest! {
    /// Two calls on identical input return identical results.
    #[test]
    fn prop_evaluation_is_idempotent(a in -999i32..999, b in -999i32..999) {
        let expr = format!("{} + {} * {}", a, b, a);
        prop_assert_eq!(evaluate(&expr), evaluate(&expr));
    }

    /// Whitespace placement never changes the result.
    #[test]
    fn prop_whitespace_insensitivity(
        a in -999i32..999,
        b in 1i32..999,
        op_index in 0usize..4,
    ) {
        let op = ['+', '-', '*', '/'][op_index];
        let compact = format!("{}{}{}", a, op, b);
        let spaced = format!("  {}   {} {} ", a, op, b);
        prop_assert_eq!(evaluate(&compact), evaluate(&spaced));
    }

    /// Flat chains of `+ - *` agree with the precedence reference model.
    #[test]
    fn prop_flat_chains_match_the_precedence_model(
        first in -99i32..99,
        rest in prop::collection::vec((flat_op(), -99i32..99), 1..6),
    ) {
        let mut expr = format!("{}", first);
        let mut model_rest = Vec::new();
        for &(op, value) in &rest {
            // Parenthesize negative operands so the chain stays flat syntax.
            if value < 0 {
                expr.push_str(&format!(" {} ({})", op, value));
            } else {
                expr.push_str(&format!(" {} {}", op, value));
            }
            model_rest.push((op, value as Real));
        }
        let expected = precedence_model(first as Real, &model_rest);
        let actual = evaluate(&expr).unwrap();
        prop_assert_eq!(actual, expected, "expression: {}", expr);
    }

    /// Division folds left-to-right with `*` and never panics for nonzero
    /// divisors.
    #[test]
    fn prop_division_chains(a in 1i32..1000, b in 1i32..100, c in 1i32..100) {
        let expr = format!("{} / {} / {}", a, b, c);
        let expected = a as Real / b as Real / c as Real;
        prop_assert_eq!(evaluate(&expr).unwrap(), expected);
    }

    /// Parenthesis nesting within the depth budget is transparent.
    #[test]
    fn prop_nested_parens_are_transparent(value in -999i32..999, depth in 0usize..15) {
        let expr = format!("{}({}){}", "(".repeat(depth), value, ")".repeat(depth));
        prop_assert_eq!(evaluate(&expr).unwrap(), value as Real);
    }

    /// Chained unary signs resolve by parity.
    #[test]
    fn prop_unary_sign_parity(value in 0i32..999, signs in 1usize..8) {
        let expr = format!("{}{}", "-".repeat(signs), value);
        let expected = if signs % 2 == 0 { value as Real } else { -(value as Real) };
        prop_assert_eq!(evaluate(&expr).unwrap(), expected);
    }

    /// `evaluate` returns a Result for arbitrary input; it never panics and
    /// never returns a non-finite value.
    #[test]
    fn prop_never_panics_and_never_leaks_non_finite(input in ".{0,60}") {
        if let Ok(value) = evaluate(&input) {
            prop_assert!(value.is_finite());
        }
    }

    /// Random well-formed input built only from the whitelist either
    /// evaluates or fails with a typed error; both outcomes are stable.
    #[test]
    fn prop_whitelisted_soup_is_handled(input in "[0-9+\\-*/%^(). ]{0,40}") {
        let first = evaluate(&input);
        let second = evaluate(&input);
        prop_assert_eq!(first, second);
    }
}
