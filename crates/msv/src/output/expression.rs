//! Equipment expression output formatting (explain and build).

use mechsieve_filter_rs::filter::{Comparison, ExpressionNode, ExpressionTree, Operator, Target};
use serde::Serialize;

use super::helpers::format_label;

/// JSON output structure for a compiled expression.
#[derive(Serialize)]
pub struct ExpressionOutput {
    pub expression: String,
    pub tree: Option<NodeOutput>,
}

/// JSON output for one expression node.
#[derive(Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum NodeOutput {
    Leaf {
        #[serde(skip_serializing_if = "Option::is_none")]
        equipment: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        class: Option<&'static str>,
        comparison: Comparison,
        quantity: u32,
    },
    Group {
        op: Operator,
        children: Vec<NodeOutput>,
    },
}

impl NodeOutput {
    fn from_node(node: &ExpressionNode) -> Self {
        match node {
            ExpressionNode::Leaf(leaf) => {
                let (equipment, class) = match &leaf.target {
                    Target::Equipment(key) => (Some(key.clone()), None),
                    Target::Class(class) => (None, Some(class.label())),
                };
                NodeOutput::Leaf {
                    equipment,
                    class,
                    comparison: leaf.comparison,
                    quantity: leaf.quantity,
                }
            }
            ExpressionNode::Group { op, children } => NodeOutput::Group {
                op: *op,
                children: children.iter().map(NodeOutput::from_node).collect(),
            },
        }
    }
}

/// Formats a compiled expression as JSON.
pub fn format_expression_json(tree: &ExpressionTree) -> Result<String, serde_json::Error> {
    let output = ExpressionOutput {
        expression: tree.to_string(),
        tree: tree.root().map(NodeOutput::from_node),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats a compiled expression as its normalized text plus an outline.
pub fn format_expression_table(tree: &ExpressionTree, use_colors: bool) -> String {
    let mut output = String::new();
    if !tree.is_empty() {
        output.push_str(&format!(
            "{} {}\n\n",
            format_label("Expression:", use_colors),
            tree
        ));
    }
    output.push_str(&tree.outline());
    output
}
