//! Equipment expression trees.
//!
//! An [`ExpressionTree`] owns a tree of [`ExpressionNode`]s: leaves test one
//! equipment key or weapon class against a quantity threshold, groups combine
//! their children with a single operator. Trees are plain owned values, so
//! `clone()` is a deep copy that shares nothing with its source.

use std::fmt;

use mechsieve_catalog_rs::{normalize_equipment_name, Catalog, Inventory};

use super::error::{FilterError, FilterResult};
use super::lexer::tokenize;
use super::parser::ExpressionParser;
use super::token::{Comparison, Operand, Operator, Target, Token};

/// A terminal quantity test.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Leaf {
    pub target: Target,
    pub quantity: u32,
    pub comparison: Comparison,
}

impl Leaf {
    /// Evaluates this leaf against an inventory.
    pub fn evaluate(&self, inventory: &Inventory<'_>) -> bool {
        match &self.target {
            Target::Equipment(key) => self.evaluate_key(key, inventory),
            Target::Class(class) => {
                let total: u64 = inventory
                    .iter()
                    .filter(|(name, _)| class.matches(name))
                    .map(|(_, quantity)| u64::from(quantity))
                    .sum();
                match self.comparison {
                    Comparison::AtLeast => total >= u64::from(self.quantity),
                    Comparison::LessThan => total < u64::from(self.quantity),
                }
            }
        }
    }

    /// Scans same-named entries one at a time; quantities are not summed across entries.
    fn evaluate_key(&self, key: &str, inventory: &Inventory<'_>) -> bool {
        for (name, quantity) in inventory.iter() {
            if same_equipment(key, name) && quantity >= self.quantity {
                return self.comparison == Comparison::AtLeast;
            }
        }
        self.comparison == Comparison::LessThan
    }
}

impl From<Operand> for Leaf {
    fn from(operand: Operand) -> Self {
        Self {
            target: operand.target,
            quantity: operand.quantity,
            comparison: operand.comparison,
        }
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.comparison {
            Comparison::AtLeast => write!(f, "{} {}", self.quantity, self.target),
            Comparison::LessThan => write!(f, "<{} {}", self.quantity, self.target),
        }
    }
}

/// Compares an equipment key with an inventory name, ignoring case and whitespace.
///
/// Agrees with comparing [`normalize_equipment_name`] of both sides, without
/// allocating. `MediumLaser`, `medium laser` and `Medium Laser` all name the
/// same equipment.
pub fn same_equipment(key: &str, name: &str) -> bool {
    folded_chars(key).eq(folded_chars(name))
}

fn folded_chars(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
}

/// A node of an equipment expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExpressionNode {
    Leaf(Leaf),
    Group {
        op: Operator,
        children: Vec<ExpressionNode>,
    },
}

impl ExpressionNode {
    /// Creates a leaf node.
    pub fn leaf(operand: Operand) -> Self {
        ExpressionNode::Leaf(operand.into())
    }

    /// Combines `children` under `op`.
    ///
    /// Children that are themselves `op` groups are spliced in, and a single
    /// child is returned as-is, so a group never wraps a group of its own
    /// operator nor stands alone over one child.
    pub fn group(op: Operator, children: Vec<ExpressionNode>) -> Self {
        let mut flat = Vec::with_capacity(children.len());
        for child in children {
            match child {
                ExpressionNode::Group {
                    op: child_op,
                    children: grandchildren,
                } if child_op == op => flat.extend(grandchildren),
                other => flat.push(other),
            }
        }

        if flat.len() == 1 {
            if let Some(only) = flat.pop() {
                return only;
            }
        }
        ExpressionNode::Group { op, children: flat }
    }

    /// Shorthand for an AND group.
    pub fn and(children: Vec<ExpressionNode>) -> Self {
        Self::group(Operator::And, children)
    }

    /// Shorthand for an OR group.
    pub fn or(children: Vec<ExpressionNode>) -> Self {
        Self::group(Operator::Or, children)
    }

    /// Evaluates the node. Groups short-circuit; an empty group is true.
    pub fn evaluate(&self, inventory: &Inventory<'_>) -> bool {
        match self {
            ExpressionNode::Leaf(leaf) => leaf.evaluate(inventory),
            ExpressionNode::Group { children, .. } if children.is_empty() => true,
            ExpressionNode::Group {
                op: Operator::And,
                children,
            } => children.iter().all(|child| child.evaluate(inventory)),
            ExpressionNode::Group {
                op: Operator::Or,
                children,
            } => children.iter().any(|child| child.evaluate(inventory)),
        }
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        match self {
            ExpressionNode::Leaf(leaf) => out.push(leaf),
            ExpressionNode::Group { children, .. } => {
                children.iter().for_each(|child| child.collect_leaves(out))
            }
        }
    }

    fn collect_leaves_mut<'a>(&'a mut self, out: &mut Vec<&'a mut Leaf>) {
        match self {
            ExpressionNode::Leaf(leaf) => out.push(leaf),
            ExpressionNode::Group { children, .. } => children
                .iter_mut()
                .for_each(|child| child.collect_leaves_mut(out)),
        }
    }

    fn write_tree(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            ExpressionNode::Leaf(leaf) => {
                out.push_str(&format!(
                    "{indent}{} {} {}\n",
                    leaf.target,
                    leaf.comparison.symbol(),
                    leaf.quantity
                ));
            }
            ExpressionNode::Group { op, children } => {
                let name = match op {
                    Operator::And => "AND",
                    Operator::Or => "OR",
                };
                out.push_str(&format!("{indent}{name}\n"));
                for child in children {
                    child.write_tree(out, depth + 1);
                }
            }
        }
    }
}

impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionNode::Leaf(leaf) => write!(f, "{leaf}"),
            ExpressionNode::Group { op, children } => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {op} ")?;
                    }
                    match child {
                        ExpressionNode::Group {
                            op: Operator::And, ..
                        } if *op == Operator::Or => write!(f, "{child}")?,
                        ExpressionNode::Group { .. } => write!(f, "({child})")?,
                        ExpressionNode::Leaf(_) => write!(f, "{child}")?,
                    }
                }
                Ok(())
            }
        }
    }
}

/// A compiled equipment expression.
///
/// The empty tree places no constraint on equipment and matches every inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExpressionTree {
    root: Option<ExpressionNode>,
}

impl ExpressionTree {
    /// Creates the empty tree.
    pub fn empty() -> Self {
        Self { root: None }
    }

    /// Wraps an existing node.
    pub fn from_root(root: ExpressionNode) -> Self {
        Self { root: Some(root) }
    }

    /// Compiles a token stream.
    ///
    /// An empty stream yields the empty tree.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::MalformedExpression` for unbalanced parentheses,
    /// empty groups, operators at either end, or adjacent operators or operands.
    pub fn compile(tokens: &[Token]) -> FilterResult<Self> {
        ExpressionParser::parse(tokens)
    }

    /// Lexes and compiles a textual expression.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::MalformedExpression` for lexical or grammatical
    /// errors and `FilterError::UnknownValue` for unknown weapon classes.
    pub fn parse(text: &str) -> FilterResult<Self> {
        Self::compile(&tokenize(text)?)
    }

    /// Returns true if the tree places no constraint.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the root node, if any.
    pub fn root(&self) -> Option<&ExpressionNode> {
        self.root.as_ref()
    }

    /// Returns the root node mutably, if any.
    pub fn root_mut(&mut self) -> Option<&mut ExpressionNode> {
        self.root.as_mut()
    }

    /// Returns every leaf in left-to-right order.
    pub fn leaves(&self) -> Vec<&Leaf> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.collect_leaves(&mut out);
        }
        out
    }

    /// Returns every leaf mutably, in left-to-right order.
    pub fn leaves_mut(&mut self) -> Vec<&mut Leaf> {
        let mut out = Vec::new();
        if let Some(root) = &mut self.root {
            root.collect_leaves_mut(&mut out);
        }
        out
    }

    /// Evaluates against parallel name and quantity lists.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidInventory` if the lists differ in length.
    pub fn evaluate(&self, names: &[String], quantities: &[u32]) -> FilterResult<bool> {
        let inventory =
            Inventory::new(names, quantities).map_err(|e| FilterError::InvalidInventory {
                unit: String::new(),
                names: e.names,
                quantities: e.quantities,
            })?;
        Ok(self.evaluate_inventory(&inventory))
    }

    /// Evaluates against a validated inventory.
    pub fn evaluate_inventory(&self, inventory: &Inventory<'_>) -> bool {
        match &self.root {
            Some(root) => root.evaluate(inventory),
            None => true,
        }
    }

    /// Rewrites equipment targets to the catalog's keys.
    ///
    /// A target may be written as a key or as a display name; both are
    /// compared ignoring case and whitespace, so `"Medium Laser"` and `AC/20`
    /// resolve to `MediumLaser` and `AC20`. Inventories hold keys, so resolved
    /// leaves match them directly. A catalog without equipment records leaves
    /// the tree untouched.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::UnknownValue` for a target the catalog does not
    /// know, suggesting the closest key or display name.
    pub fn resolve_keys(&mut self, catalog: &Catalog) -> FilterResult<()> {
        if catalog.equipment.is_empty() {
            return Ok(());
        }
        for leaf in self.leaves_mut() {
            let Target::Equipment(key) = &mut leaf.target else {
                continue;
            };
            match catalog.resolve_equipment(key) {
                Some(record) => *key = record.key.clone(),
                None => {
                    return Err(FilterError::unknown_value(
                        "equipment",
                        key.as_str(),
                        catalog
                            .equipment
                            .iter()
                            .flat_map(|r| [r.key.as_str(), r.name.as_str()]),
                    ))
                }
            }
        }
        Ok(())
    }

    /// Renders the tree as an indented outline, one node per line.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        match &self.root {
            Some(root) => root.write_tree(&mut out, 0),
            None => out.push_str("(no equipment constraint)\n"),
        }
        out
    }
}

impl fmt::Display for ExpressionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{root}"),
            None => Ok(()),
        }
    }
}
