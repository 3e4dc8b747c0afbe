//! Derived-value nodes

use generational_arena::Index;

use crate::domain::operation::{Operation, Provenance};

/// Immutable numeric result plus the operation that produced it.
///
/// `leaf_count` is the number of original leaves consumed to reach `value`;
/// callers compare it against their leaf budget before combining further.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultNode {
    value: f64,
    provenance: Provenance,
    leaf_count: usize,
}

impl ResultNode {
    /// Node for an original input value.
    pub fn leaf(value: f64) -> Self {
        Self {
            value,
            provenance: Provenance::leaf(),
            leaf_count: 1,
        }
    }

    pub(crate) fn unary(value: f64, operation: Operation, operand: (Index, &ResultNode)) -> Self {
        Self {
            value,
            provenance: Provenance::unary(operation, operand.0),
            leaf_count: operand.1.leaf_count,
        }
    }

    /// `leaf_count` is the operands' summed count, computed once per pair by the combiner.
    pub(crate) fn binary(
        value: f64,
        operation: Operation,
        left: Index,
        right: Index,
        leaf_count: usize,
    ) -> Self {
        Self {
            value,
            provenance: Provenance::binary(operation, left, right),
            leaf_count,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn operation(&self) -> Operation {
        self.provenance.operation
    }

    pub fn is_leaf(&self) -> bool {
        self.provenance.is_leaf()
    }
}
