//! Textual forms of an expression tree.

use std::fmt;

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::arena::ExpressionArena;
use crate::domain::Operation;

/// Placeholder emitted for an unknown index or an incomplete provenance.
pub const UNKNOWN: &str = "?";

/// Expression rooted at one node of an arena.
///
/// `Display` yields the fully parenthesised infix form, e.g. `(3)+(4)`.
#[derive(Debug, Clone, Copy)]
pub struct Expression<'a> {
    arena: &'a ExpressionArena,
    index: Index,
}

impl<'a> Expression<'a> {
    pub fn new(arena: &'a ExpressionArena, index: Index) -> Self {
        Self { arena, index }
    }

    pub fn index(&self) -> Index {
        self.index
    }

    fn operand(&self, idx: Option<Index>) -> Option<Expression<'a>> {
        idx.map(|index| Expression::new(self.arena, index))
    }
}

impl fmt::Display for Expression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(node) = self.arena.get_node(self.index) else {
            return f.write_str(UNKNOWN);
        };
        let provenance = node.provenance();
        let left = self.operand(provenance.left);
        let right = self.operand(provenance.right);

        match (provenance.operation, left, right) {
            (Operation::Leaf, _, _) => write!(f, "{}", node.value()),
            (Operation::Add, Some(l), Some(r)) => write!(f, "({l})+({r})"),
            (Operation::Subtract, Some(l), Some(r)) => write!(f, "({l})-({r})"),
            (Operation::Divide, Some(l), Some(r)) => write!(f, "({l})/({r})"),
            (Operation::Multiply, Some(l), Some(r)) => write!(f, "({l})*({r})"),
            (Operation::Power, Some(l), Some(r)) => write!(f, "({l})^({r})"),
            (Operation::Root, Some(l), Some(r)) => write!(f, "({l})^(1/({r}))"),
            (Operation::LogBase, Some(l), Some(r)) => write!(f, "log[{l}]({r})"),
            (Operation::Negate, Some(l), None) => write!(f, "-({l})"),
            (Operation::Factorial, Some(l), None) => write!(f, "({l})!"),
            (Operation::SquareRoot, Some(l), None) => write!(f, "({l})^(1/2)"),
            (Operation::NaturalLog, Some(l), None) => write!(f, "ln({l})"),
            (Operation::Log10, Some(l), None) => write!(f, "log({l})"),
            _ => f.write_str(UNKNOWN),
        }
    }
}

pub trait TreeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeConvert for Expression<'_> {
    #[instrument(level = "trace", skip(self), fields(index = ?self.index))]
    fn to_tree_string(&self) -> Tree<String> {
        let Some(node) = self.arena.get_node(self.index) else {
            return Tree::new(UNKNOWN.to_string());
        };

        let label = if node.is_leaf() {
            node.value().to_string()
        } else {
            format!("{} = {}", node.operation(), node.value())
        };

        // Recursively construct the operands
        let leaves: Vec<_> = node
            .provenance()
            .operands()
            .map(|idx| Expression::new(self.arena, idx).to_tree_string())
            .collect();

        Tree::new(label).with_leaves(leaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_renders_plain_value() {
        let mut arena = ExpressionArena::new();
        let a = arena.insert_leaf(3.0);
        let b = arena.insert_leaf(0.5);
        assert_eq!(arena.render(a), "3");
        assert_eq!(arena.render(b), "0.5");
    }

    #[test]
    fn test_unknown_index_renders_placeholder() {
        let mut other = ExpressionArena::new();
        other.insert_leaf(1.0);
        let foreign = other.insert_leaf(2.0);

        let arena = ExpressionArena::new();
        assert_eq!(arena.render(foreign), UNKNOWN);
    }

    #[test]
    fn test_tree_lists_operands() {
        let mut arena = ExpressionArena::new();
        let a = arena.insert_leaf(3.0);
        let b = arena.insert_leaf(4.0);
        let sum = arena.combine_with(a, b)[0];

        let tree = arena.expression(sum).to_tree_string().to_string();
        assert!(tree.starts_with("add = 7"));
        assert!(tree.contains('3'));
        assert!(tree.contains('4'));
    }
}
