//! Operation tags and provenance records

use std::fmt;

use generational_arena::Index;

/// How a node was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Original input value, not derived from anything
    Leaf,
    Add,
    Subtract,
    Divide,
    Multiply,
    Power,
    /// `left` is the radicand, `right` the degree
    Root,
    /// `left` is the base, `right` the argument
    LogBase,
    Negate,
    Factorial,
    SquareRoot,
    NaturalLog,
    Log10,
}

impl Operation {
    /// Number of operands the operation consumes.
    pub fn arity(self) -> usize {
        match self {
            Operation::Leaf => 0,
            Operation::Negate
            | Operation::Factorial
            | Operation::SquareRoot
            | Operation::NaturalLog
            | Operation::Log10 => 1,
            Operation::Add
            | Operation::Subtract
            | Operation::Divide
            | Operation::Multiply
            | Operation::Power
            | Operation::Root
            | Operation::LogBase => 2,
        }
    }

    pub fn is_unary(self) -> bool {
        self.arity() == 1
    }

    pub fn is_binary(self) -> bool {
        self.arity() == 2
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::Leaf => "leaf",
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Divide => "divide",
            Operation::Multiply => "multiply",
            Operation::Power => "power",
            Operation::Root => "root",
            Operation::LogBase => "log-base",
            Operation::Negate => "negate",
            Operation::Factorial => "factorial",
            Operation::SquareRoot => "square-root",
            Operation::NaturalLog => "natural-log",
            Operation::Log10 => "log-base-10",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Record of which operation and operands produced a node.
///
/// Operands are non-owning handles into the arena that holds the node.
/// `left` is `None` only for leaves; `right` is `Some` only for binary operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Provenance {
    pub operation: Operation,
    pub left: Option<Index>,
    pub right: Option<Index>,
}

impl Provenance {
    pub(crate) fn leaf() -> Self {
        Self {
            operation: Operation::Leaf,
            left: None,
            right: None,
        }
    }

    pub(crate) fn unary(operation: Operation, operand: Index) -> Self {
        debug_assert!(operation.is_unary());
        Self {
            operation,
            left: Some(operand),
            right: None,
        }
    }

    pub(crate) fn binary(operation: Operation, left: Index, right: Index) -> Self {
        debug_assert!(operation.is_binary());
        Self {
            operation,
            left: Some(left),
            right: Some(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.operation == Operation::Leaf
    }

    /// Operand handles in left-to-right order.
    pub fn operands(&self) -> impl Iterator<Item = Index> {
        self.left.into_iter().chain(self.right)
    }
}
