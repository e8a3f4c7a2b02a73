//! Tests for expression compilation and evaluation.

use super::*;

// ==================== Test Helpers ====================

fn op(key: &str) -> Token {
    Operand::at_least(key, 1).into()
}

fn leaf(key: &str) -> ExpressionNode {
    ExpressionNode::leaf(Operand::at_least(key, 1))
}

fn compile(tokens: &[Token]) -> ExpressionTree {
    ExpressionTree::compile(tokens).unwrap()
}

fn inventory(entries: &[(&str, u32)]) -> (Vec<String>, Vec<u32>) {
    (
        entries.iter().map(|(n, _)| n.to_string()).collect(),
        entries.iter().map(|(_, q)| *q).collect(),
    )
}

fn eval(tree: &ExpressionTree, entries: &[(&str, u32)]) -> bool {
    let (names, quantities) = inventory(entries);
    tree.evaluate(&names, &quantities).unwrap()
}

// ==================== Precedence ====================

#[test]
fn test_and_binds_tighter_than_or() {
    let tree = compile(&[op("A"), Token::AND, op("B"), Token::OR, op("C")]);
    assert_eq!(
        tree.root(),
        Some(&ExpressionNode::Group {
            op: Operator::Or,
            children: vec![
                ExpressionNode::Group {
                    op: Operator::And,
                    children: vec![leaf("A"), leaf("B")],
                },
                leaf("C"),
            ],
        })
    );
}

#[test]
fn test_or_then_and() {
    let tree = compile(&[op("A"), Token::OR, op("B"), Token::AND, op("C")]);
    assert_eq!(
        tree.root(),
        Some(&ExpressionNode::Group {
            op: Operator::Or,
            children: vec![
                leaf("A"),
                ExpressionNode::Group {
                    op: Operator::And,
                    children: vec![leaf("B"), leaf("C")],
                },
            ],
        })
    );
}

#[test]
fn test_chains_are_flat() {
    let tree = compile(&[op("A"), Token::AND, op("B"), Token::AND, op("C")]);
    assert_eq!(
        tree.root(),
        Some(&ExpressionNode::Group {
            op: Operator::And,
            children: vec![leaf("A"), leaf("B"), leaf("C")],
        })
    );
}

#[test]
fn test_nested_same_operator_group_is_spliced() {
    let tree = compile(&[
        op("A"),
        Token::AND,
        Token::LeftParen,
        op("B"),
        Token::AND,
        op("C"),
        Token::RightParen,
    ]);
    assert_eq!(
        tree.root(),
        Some(&ExpressionNode::Group {
            op: Operator::And,
            children: vec![leaf("A"), leaf("B"), leaf("C")],
        })
    );
}

// ==================== Parenthesization ====================

#[test]
fn test_parentheses_change_tree_and_result() {
    let grouped_right = compile(&[
        op("A"),
        Token::AND,
        Token::LeftParen,
        op("B"),
        Token::OR,
        op("C"),
        Token::RightParen,
    ]);
    let grouped_left = compile(&[
        Token::LeftParen,
        op("A"),
        Token::AND,
        op("B"),
        Token::RightParen,
        Token::OR,
        op("C"),
    ]);

    assert_ne!(grouped_right, grouped_left);

    let only_a_and_c = [("A", 1), ("C", 1)];
    assert!(eval(&grouped_right, &only_a_and_c));
    assert!(eval(&grouped_left, &only_a_and_c));

    let only_c = [("C", 1)];
    assert!(!eval(&grouped_right, &only_c));
    assert!(eval(&grouped_left, &only_c));
}

#[test]
fn test_no_group_contains_same_operator_child() {
    fn check(node: &ExpressionNode) {
        if let ExpressionNode::Group { op, children } = node {
            assert!(children.len() > 1);
            for child in children {
                if let ExpressionNode::Group { op: child_op, .. } = child {
                    assert_ne!(child_op, op);
                }
                check(child);
            }
        }
    }

    let tree = ExpressionTree::parse("((1 A & (2 B & 3 C)) | (4 D | (5 E))) & ((6 F))").unwrap();
    check(tree.root().unwrap());
}

// ==================== Malformed streams ====================

#[test]
fn test_compile_rejects_malformed_streams() {
    let malformed: Vec<Vec<Token>> = vec![
        vec![Token::AND],
        vec![Token::AND, op("A")],
        vec![op("A"), Token::OR],
        vec![op("A"), op("B")],
        vec![op("A"), Token::AND, Token::OR, op("B")],
        vec![Token::LeftParen, op("A")],
        vec![op("A"), Token::RightParen],
        vec![Token::LeftParen, Token::RightParen],
        vec![Token::RightParen, op("A"), Token::LeftParen],
        vec![Token::LeftParen, op("A"), Token::RightParen, Token::LeftParen, op("B"), Token::RightParen],
    ];

    for tokens in malformed {
        let result = ExpressionTree::compile(&tokens);
        assert!(
            matches!(result, Err(FilterError::MalformedExpression { .. })),
            "{} should not compile",
            render_tokens(&tokens)
        );
    }
}

// ==================== End to end ====================

#[test]
fn test_medium_laser_srm_scenario() {
    let mut tree = ExpressionTree::parse("2 MediumLaser And 1 SRM6").unwrap();
    assert_eq!(
        tree.root(),
        Some(&ExpressionNode::Group {
            op: Operator::And,
            children: vec![
                ExpressionNode::leaf(Operand::at_least("MediumLaser", 2)),
                ExpressionNode::leaf(Operand::at_least("SRM6", 1)),
            ],
        })
    );

    let unit = [("Medium Laser", 2), ("SRM 6", 1)];
    assert!(eval(&tree, &unit));

    tree.leaves_mut()[1].quantity = 2;
    assert!(!eval(&tree, &unit));
}

#[test]
fn test_builder_and_text_agree() {
    let mut builder = ExpressionBuilder::new();
    builder.open_paren().unwrap();
    builder.push_operand(Operand::at_least("A", 1)).unwrap();
    builder.push_operator(Operator::Or).unwrap();
    builder
        .push_operand(Operand::class(
            mechsieve_catalog_rs::WeaponClass::Laser,
            3,
            Comparison::LessThan,
        ))
        .unwrap();
    builder.close_paren().unwrap();

    let from_text = ExpressionTree::parse(&builder.render()).unwrap();
    assert_eq!(builder.compile().unwrap(), from_text);
}
