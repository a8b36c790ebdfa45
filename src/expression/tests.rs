use std::rc::Rc;

use proptest::prelude::*;

use crate::expression::parse::parse_with_precedence;
use crate::expression::{Expression, ExpressionError, Operator, RenderStyle};

fn leaf(value: i64) -> Rc<Expression> {
    Rc::new(Expression::leaf(value))
}

fn node(operator: Operator, left: Rc<Expression>, right: Rc<Expression>) -> Rc<Expression> {
    match Expression::combine(operator, left, right) {
        Ok(expr) => Rc::new(expr),
        Err(e) => panic!("test tree failed to combine: {}", e),
    }
}

fn strict(expr: &Expression) -> String {
    expr.render(RenderStyle::Strict)
}

/// Common table where `*`, `//` and `%` share one level
fn conventional_precedence(op: Operator) -> u8 {
    match op {
        Operator::Add | Operator::Sub => 0,
        Operator::Mul | Operator::Div | Operator::Mod => 1,
        Operator::Pow => 3,
    }
}

#[test]
fn test_leaf_renders_as_value() {
    assert_eq!(leaf(5).to_string(), "5");
    assert_eq!(leaf(-12).to_string(), "-12");
}

#[test]
fn test_simple_sum() {
    let expr = node(Operator::Add, leaf(1), leaf(2));
    assert_eq!(expr.to_string(), "1 + 2");
    assert_eq!(expr.value(), 3);
    assert_eq!(expr.length(), 2);
}

#[test]
fn test_lower_precedence_child_is_bracketed() {
    let expr = node(Operator::Mul, node(Operator::Add, leaf(1), leaf(2)), leaf(3));
    assert_eq!(expr.to_string(), "(1 + 2) * 3");

    let expr = node(Operator::Mod, node(Operator::Add, leaf(5), leaf(4)), leaf(5));
    assert_eq!(expr.to_string(), "(5 + 4) % 5");
    assert_eq!(expr.value(), 4);
}

#[test]
fn test_division_brackets_both_sides() {
    let expr = node(Operator::Div, leaf(8), leaf(2));
    assert_eq!(expr.to_string(), "(8) // (2)");

    let expr = node(Operator::Div, node(Operator::Add, leaf(6), leaf(2)), leaf(4));
    assert_eq!(expr.to_string(), "(6 + 2) // (4)");
    assert_eq!(expr.value(), 2);
}

#[test]
fn test_division_under_equal_precedence_parent() {
    let expr = node(Operator::Mul, node(Operator::Div, leaf(8), leaf(2)), leaf(3));
    assert_eq!(expr.to_string(), "(8) // (2) * 3");
    assert_eq!(strict(&expr), "(8) // (2) * 3");
}

#[test]
fn test_power_only_compares_precedence() {
    let right_nested = node(Operator::Pow, leaf(2), node(Operator::Pow, leaf(3), leaf(2)));
    let left_nested = node(Operator::Pow, node(Operator::Pow, leaf(2), leaf(3)), leaf(2));

    assert_eq!(right_nested.to_string(), "2 ** 3 ** 2");
    assert_eq!(left_nested.to_string(), "2 ** 3 ** 2");

    assert_eq!(strict(&right_nested), "2 ** 3 ** 2");
    assert_eq!(strict(&left_nested), "(2 ** 3) ** 2");
    assert_eq!(left_nested.value(), 64);
}

#[test]
fn test_equal_precedence_right_child_is_not_bracketed() {
    let expr = node(Operator::Sub, leaf(7), node(Operator::Sub, leaf(3), leaf(1)));
    assert_eq!(expr.to_string(), "7 - 3 - 1");
    assert_eq!(strict(&expr), "7 - (3 - 1)");
    assert_eq!(expr.value(), 5);

    let expr = node(
        Operator::Sub,
        node(Operator::Mul, leaf(3), leaf(4)),
        node(Operator::Add, leaf(1), leaf(2)),
    );
    assert_eq!(expr.to_string(), "3 * 4 - 1 + 2");
    assert_eq!(strict(&expr), "3 * 4 - (1 + 2)");
}

#[test]
fn test_strict_keeps_regroupable_chains_flat() {
    let expr = node(Operator::Add, leaf(7), node(Operator::Sub, leaf(3), leaf(1)));
    assert_eq!(strict(&expr), "7 + 3 - 1");

    let expr = node(Operator::Mul, leaf(2), node(Operator::Mul, leaf(3), leaf(4)));
    assert_eq!(strict(&expr), "2 * 3 * 4");
}

#[test]
fn test_modulo_under_multiplication() {
    let expr = node(Operator::Mul, leaf(2), node(Operator::Mod, leaf(7), leaf(4)));
    assert_eq!(expr.to_string(), "2 * 7 % 4");
    assert_eq!(strict(&expr), "2 * (7 % 4)");
    assert_eq!(expr.value(), 6);
}

#[test]
fn test_negative_base_of_power() {
    let expr = node(Operator::Pow, leaf(-3), leaf(2));
    assert_eq!(expr.to_string(), "-3 ** 2");
    assert_eq!(strict(&expr), "(-3) ** 2");
    assert_eq!(expr.value(), 9);
}

#[test]
fn test_rendering_is_idempotent() {
    let expr = node(
        Operator::Mul,
        leaf(9),
        node(Operator::Add, node(Operator::Pow, leaf(4), leaf(5)), leaf(7)),
    );
    assert_eq!(expr.to_string(), expr.to_string());
    assert_eq!(expr.to_string(), "9 * (4 ** 5 + 7)");
    assert_eq!(strict(&expr), strict(&expr));
}

#[test]
fn test_operands_in_order() {
    let expr = node(
        Operator::Mul,
        leaf(9),
        node(Operator::Add, node(Operator::Pow, leaf(4), leaf(5)), leaf(7)),
    );
    assert_eq!(expr.operands(), vec![9, 4, 5, 7]);
    assert_eq!(expr.length(), 4);
    assert_eq!(expr.value(), 9279);
}

#[test]
fn test_evaluate_agrees_with_cached_value() {
    let expr = node(
        Operator::Sub,
        node(Operator::Div, leaf(-7), leaf(2)),
        node(Operator::Mod, leaf(-7), leaf(3)),
    );
    // -7 // 2 == -3 and -7 % 3 == -1
    assert_eq!(expr.evaluate(), Ok(-2));
    assert!(expr.is_consistent());
}

#[test]
fn test_combine_reports_arithmetic_errors() {
    let result = Expression::combine(Operator::Div, leaf(4), leaf(0));
    assert!(matches!(result, Err(ExpressionError::DivisionByZero)));

    let result = Expression::combine(Operator::Pow, leaf(16), leaf(16));
    assert!(matches!(result, Err(ExpressionError::Overflow { .. })));
}

#[test]
fn test_parse_precedence_and_associativity() {
    let cases = [
        ("9 * (4 ** 5 + 7)", 9279),
        ("2 ** 3 ** 2", 512),
        ("7 - 3 - 1", 3),
        ("2 * 7 % 4", 6),
        ("7 % 4 * 2", 6),
        ("(8) // (2)", 4),
        ("-7 // 2", -3),
        ("-7 % 2", -1),
        ("2 - -3", 5),
        ("(-3) ** 2", 9),
        ("  1+2*3  ", 7),
    ];
    for (text, expected) in cases {
        let parsed = text.parse::<Expression>();
        assert!(parsed.is_ok(), "failed to parse '{}': {:?}", text, parsed.err());
        if let Ok(expr) = parsed {
            assert_eq!(expr.value(), expected, "wrong value for '{}'", text);
        }
    }
}

#[test]
fn test_parse_counts_operands() {
    let parsed = "9 * (4 ** 5 + 7)".parse::<Expression>();
    assert!(parsed.is_ok());
    if let Ok(expr) = parsed {
        assert_eq!(expr.length(), 4);
        assert_eq!(expr.operator(), Some(Operator::Mul));
    }
}

#[test]
fn test_parse_errors() {
    assert_eq!("1 +".parse::<Expression>().err(), Some(ExpressionError::UnexpectedEnd));
    assert_eq!("(1 + 2".parse::<Expression>().err(), Some(ExpressionError::UnexpectedEnd));
    assert_eq!(
        "1 2".parse::<Expression>().err(),
        Some(ExpressionError::UnexpectedToken {
            position: 2,
            found: "2".to_string()
        })
    );
    assert_eq!(
        "1 / 2".parse::<Expression>().err(),
        Some(ExpressionError::UnexpectedCharacter {
            position: 2,
            found: '/'
        })
    );
    assert_eq!(
        "1 // 0".parse::<Expression>().err(),
        Some(ExpressionError::DivisionByZero)
    );
    assert!(matches!(
        "2 ** -1".parse::<Expression>(),
        Err(ExpressionError::NegativeExponent { .. })
    ));
    assert_eq!("".parse::<Expression>().err(), Some(ExpressionError::UnexpectedEnd));
}

#[test]
fn test_conventional_table_reads_mod_and_mul_left_to_right() {
    let declared = "2 * 7 % 4".parse::<Expression>();
    let conventional = parse_with_precedence("2 * 7 % 4", conventional_precedence);
    assert_eq!(declared.map(|e| e.value()), Ok(6));
    assert_eq!(conventional.map(|e| e.value()), Ok(2));
}

#[test]
fn test_strict_rendering_round_trips_handmade_trees() {
    let trees = [
        node(Operator::Pow, node(Operator::Pow, leaf(2), leaf(3)), leaf(2)),
        node(Operator::Sub, leaf(7), node(Operator::Sub, leaf(3), leaf(1))),
        node(Operator::Mul, leaf(2), node(Operator::Mod, leaf(7), leaf(4))),
        node(Operator::Pow, leaf(-3), leaf(3)),
        node(
            Operator::Mod,
            leaf(100),
            node(Operator::Mod, leaf(17), leaf(5)),
        ),
    ];
    for tree in trees {
        let text = strict(&tree);
        let parsed = text.parse::<Expression>();
        assert!(parsed.is_ok(), "failed to parse '{}'", text);
        if let Ok(parsed) = parsed {
            assert_eq!(parsed.value(), tree.value(), "value changed for '{}'", text);
        }
        let conventional = parse_with_precedence(&text, conventional_precedence);
        assert_eq!(
            conventional.map(|e| e.value()),
            Ok(tree.value()),
            "conventional reading changed '{}'",
            text
        );
    }
}

#[derive(Debug, Clone)]
enum Shape {
    Leaf(i64),
    Node(Operator, Box<Shape>, Box<Shape>),
}

const VALUE_BOUND: u64 = 1_000_000;

fn build(shape: &Shape) -> Option<Rc<Expression>> {
    match shape {
        Shape::Leaf(value) => Some(leaf(*value)),
        Shape::Node(op, left, right) => {
            let expr = Expression::combine(*op, build(left)?, build(right)?).ok()?;
            (expr.value().unsigned_abs() < VALUE_BOUND).then(|| Rc::new(expr))
        }
    }
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = (-20i64..=20).prop_map(Shape::Leaf);
    leaf.prop_recursive(4, 16, 2, |inner| {
        (
            prop::sample::select(Operator::ALL.to_vec()),
            inner.clone(),
            inner,
        )
            .prop_map(|(op, left, right)| Shape::Node(op, Box::new(left), Box::new(right)))
    })
}

proptest! {
    #[test]
    fn strict_rendering_parses_back_to_same_value(shape in shape()) {
        let Some(expr) = build(&shape) else {
            return Ok(());
        };
        let text = strict(&expr);
        let parsed = text.parse::<Expression>();
        prop_assert!(parsed.is_ok(), "failed to parse '{}': {:?}", text, parsed.as_ref().err());
        if let Ok(parsed) = parsed {
            prop_assert_eq!(parsed.value(), expr.value());
            prop_assert_eq!(parsed.length(), expr.length());
            prop_assert_eq!(strict(&parsed), text);
        }
    }

    #[test]
    fn strict_rendering_reads_the_same_under_conventional_precedence(shape in shape()) {
        let Some(expr) = build(&shape) else {
            return Ok(());
        };
        let text = strict(&expr);
        let parsed = parse_with_precedence(&text, conventional_precedence);
        prop_assert!(parsed.is_ok(), "failed to parse '{}': {:?}", text, parsed.as_ref().err());
        if let Ok(parsed) = parsed {
            prop_assert_eq!(parsed.value(), expr.value());
            prop_assert_eq!(parsed.length(), expr.length());
        }
    }

    #[test]
    fn rendering_is_deterministic(shape in shape()) {
        if let Some(expr) = build(&shape) {
            prop_assert_eq!(expr.to_string(), expr.to_string());
            prop_assert_eq!(strict(&expr), strict(&expr));
            prop_assert!(expr.is_consistent());
        }
    }
}
