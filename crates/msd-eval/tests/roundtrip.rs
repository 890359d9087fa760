//! Property tests for printing and re-parsing.
//!
//! Generated programs are printed, parsed back and compared:
//! 1. the pretty form always re-parses to the same tree
//! 2. the canonical form re-parses to the same tree when no call is involved
//! 3. re-parsed programs evaluate to the same result

use msd_ast::prelude::*;
use msd_eval::prelude::*;
use msd_parse::prelude::*;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

// -- Program Generation Strategies --

fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("x".to_string()),
        Just("y".to_string()),
        Just("fn".to_string()),
        prop::string::string_regex("[a-zA-Z]{1,6}").expect("valid regex"),
    ]
}

fn leaf_strategy() -> impl Strategy<Value = Expr> {
    prop_oneof![
        any::<i64>().prop_map(Expr::num),
        (-20i64..20).prop_map(Expr::num),
        name_strategy().prop_map(Expr::var),
        any::<bool>().prop_map(Expr::bool),
    ]
}

/// Every `_let` body mentions its name, as the parser demands.
fn expr_strategy(with_calls: bool) -> impl Strategy<Value = Expr> {
    leaf_strategy().prop_recursive(4, 48, 3, move |inner| {
        let forms = prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::add(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::mult(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::eq(l, r)),
            (inner.clone(), inner.clone(), inner.clone()).prop_map(|(t, a, b)| Expr::if_(t, a, b)),
            (name_strategy(), inner.clone(), inner.clone()).prop_map(|(n, v, b)| {
                let body = Expr::add(Expr::var(n.as_str()), b);
                Expr::let_(n, v, body)
            }),
            (name_strategy(), inner.clone()).prop_map(|(p, b)| Expr::fun(p, b)),
        ];
        if with_calls {
            prop_oneof![
                3 => forms,
                1 => (inner.clone(), inner).prop_map(|(f, a)| Expr::call(f, a)),
            ]
            .boxed()
        } else {
            forms.boxed()
        }
    })
}

fn outcome(expr: &Expr) -> Result<String, String> {
    eval(expr).map(|v| v.to_string()).map_err(|e| e.to_string())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn pretty_form_reparses(expr in expr_strategy(true)) {
        let text = expr.to_pretty_string();
        prop_assert_eq!(parse(&text), Ok(expr), "text was:\n{}", text);
    }

    #[test]
    fn canonical_form_reparses(expr in expr_strategy(false)) {
        let text = expr.to_string();
        prop_assert_eq!(parse(&text), Ok(expr), "text was: {}", text);
    }

    #[test]
    fn reparsed_programs_agree(expr in expr_strategy(false)) {
        let expected = outcome(&expr);
        let canonical = parse(&expr.to_string()).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let pretty = parse(&expr.to_pretty_string()).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(outcome(&canonical), expected.clone());
        prop_assert_eq!(outcome(&pretty), expected);
    }

    #[test]
    fn subst_of_absent_name_is_identity(expr in expr_strategy(true)) {
        prop_assert_eq!(expr.subst("absentname", &Expr::num(0)), expr);
    }
}
