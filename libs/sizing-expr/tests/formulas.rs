use approx::assert_relative_eq;
use sizing_expr::{parse, Expr, ExprError};

fn eval(source: &str, vars: &[(&str, f64)]) -> f64 {
    let expr = parse(source).unwrap();
    let result: Result<f64, String> = expr.evaluate(
        &mut |name| {
            vars.iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| *v)
                .ok_or_else(|| format!("unbound {name}"))
        },
        &mut |_| Ok(()),
    );
    result.unwrap()
}

#[test]
fn evaluates_attractor_scaling_formula() {
    assert_relative_eq!(eval("0.05*F1 + 0.001", &[("F1", 0.0)]), 0.001);
    assert_relative_eq!(eval("0.05*F1 + 0.001", &[("F1", 4.0)]), 0.201);
}

#[test]
fn evaluates_nested_groups_and_powers() {
    assert_relative_eq!(eval("((x - 1) ^ 2 + y ^ 2) ^ 0.5", &[("x", 4.0), ("y", 4.0)]), 5.0);
    assert_relative_eq!(eval("1 / 4 / 2", &[]), 0.125);
    assert_relative_eq!(eval("2e-3 * 1E3", &[]), 2.0);
}

#[test]
fn printed_form_reparses_to_same_tree() {
    for source in ["0.05*F1+0.001", "-(a+b)*c", "a-(b-c)", "2^3^2", "-x^2/(1+y)"] {
        let expr = parse(source).unwrap();
        let reparsed = parse(&expr.to_string()).unwrap();
        assert_eq!(expr, reparsed, "source {source}");
    }
}

#[test]
fn rejects_trailing_tokens() {
    match parse("F1 F2").unwrap_err() {
        ExprError::UnexpectedToken { found, .. } => assert_eq!(found, "F2"),
        other => panic!("expected unexpected token, got {other:?}"),
    }
}

#[test]
fn rejects_unknown_characters() {
    assert!(matches!(
        parse("F1 # 2").unwrap_err(),
        ExprError::UnexpectedCharacter { ch: '#', .. }
    ));
}

#[test]
fn collects_symbols_in_order() {
    let expr = parse("F2 * x + F1 * F2").unwrap();
    assert_eq!(expr.symbols(), vec!["F2", "x", "F1"]);
    assert!(matches!(parse("7").unwrap(), Expr::Literal(v) if v == 7.0));
}

#[test]
fn rejects_deeply_nested_groups() {
    let source = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
    let err = parse(&source).unwrap_err();
    assert!(matches!(err, ExprError::TooDeep { .. }), "{err}");
}

#[test]
fn rejects_overlong_operator_chain() {
    let source = vec!["1"; 100_000].join(" + ");
    assert!(matches!(parse(&source), Err(ExprError::TooDeep { .. })));

    let source = format!("{}x", "-".repeat(100_000));
    assert!(matches!(parse(&source), Err(ExprError::TooDeep { .. })));
}

#[test]
fn accepts_moderate_nesting() {
    let nested = format!("{}x{}", "(".repeat(50), ")".repeat(50));
    assert_relative_eq!(eval(&nested, &[("x", 3.0)]), 3.0);
    assert_relative_eq!(eval(&vec!["1"; 200].join(" + "), &[]), 200.0);
}
