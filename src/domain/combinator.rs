//! Operator enumeration: try every enabled operator, keep only the successes.

use std::fmt;
use std::sync::Arc;

use generational_arena::Index;
use tracing::{instrument, trace};

use crate::domain::arithmetic::{CheckedArithmetic, SafeArithmetic};
use crate::domain::error::{ArithmeticResult, LimitError};
use crate::domain::limits::{ArithmeticLimits, OperatorSettings};
use crate::domain::node::ResultNode;
use crate::domain::operation::Operation;

/// A node together with its handle in the owning arena.
#[derive(Debug, Clone, Copy)]
pub struct Operand<'a> {
    pub index: Index,
    pub node: &'a ResultNode,
}

impl<'a> Operand<'a> {
    pub fn new(index: Index, node: &'a ResultNode) -> Self {
        Self { index, node }
    }

    fn value(&self) -> f64 {
        self.node.value()
    }
}

/// Builds candidate nodes in a fixed, deterministic operator order.
#[derive(Clone)]
pub struct Combiner {
    arithmetic: Arc<dyn CheckedArithmetic>,
    operators: OperatorSettings,
}

impl fmt::Debug for Combiner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Combiner")
            .field("operators", &self.operators)
            .finish_non_exhaustive()
    }
}

impl Default for Combiner {
    fn default() -> Self {
        Self::new(Arc::new(SafeArithmetic::default()), OperatorSettings::default())
    }
}

impl Combiner {
    pub fn new(arithmetic: Arc<dyn CheckedArithmetic>, operators: OperatorSettings) -> Self {
        Self {
            arithmetic,
            operators,
        }
    }

    /// Combiner over [`SafeArithmetic`]; fails on limits it cannot honour.
    pub fn with_limits(
        limits: ArithmeticLimits,
        operators: OperatorSettings,
    ) -> Result<Self, LimitError> {
        Ok(Self::new(Arc::new(SafeArithmetic::new(limits)?), operators))
    }

    pub fn operators(&self) -> &OperatorSettings {
        &self.operators
    }

    /// Every binary candidate between `lhs` and `rhs`, in operator order.
    ///
    /// Order: add, subtract, divide, inverse divide, multiply, power, inverse
    /// power, then root both ways and log-base both ways when enabled.
    #[instrument(level = "trace", skip(self))]
    pub fn binary_candidates(&self, lhs: Operand<'_>, rhs: Operand<'_>) -> Vec<ResultNode> {
        // saturated counts still exceed any leaf budget
        let leaf_count = lhs.node.leaf_count().saturating_add(rhs.node.leaf_count());

        let (a, b) = (lhs.value(), rhs.value());
        let math = &self.arithmetic;
        let mut candidates = Vec::new();
        let mut push =
            |operation: Operation, left: Index, right: Index, outcome: ArithmeticResult<f64>| {
                match outcome {
                    Ok(value) => candidates.push(ResultNode::binary(
                        value, operation, left, right, leaf_count,
                    )),
                    Err(e) => trace!("skip {}({}, {}): {}", operation, a, b, e),
                }
            };
        let (l, r) = (lhs.index, rhs.index);

        push(Operation::Add, l, r, math.add(a, b));
        push(Operation::Subtract, l, r, math.subtract(a, b));
        push(Operation::Divide, l, r, math.divide(a, b));
        push(Operation::Divide, r, l, math.divide(b, a));
        push(Operation::Multiply, l, r, math.multiply(a, b));
        push(Operation::Power, l, r, math.power(a, b));
        push(Operation::Power, r, l, math.power(b, a));
        if self.operators.enable_root_log_operations {
            // Root renders as (radicand)^(1/(degree)): left is the radicand
            push(Operation::Root, r, l, math.root(a, b));
            push(Operation::Root, l, r, math.root(b, a));
        }
        if self.operators.enable_logarithm_operations {
            // LogBase renders as log[base](argument): left is the base
            push(Operation::LogBase, l, r, math.log_base(a, b));
            push(Operation::LogBase, r, l, math.log_base(b, a));
        }

        candidates
    }

    /// Every unary candidate of `operand`, in operator order.
    ///
    /// Order: negate, factorial, then square root and natural/decimal log when enabled.
    #[instrument(level = "trace", skip(self))]
    pub fn unary_candidates(&self, operand: Operand<'_>) -> Vec<ResultNode> {
        let a = operand.value();
        let math = &self.arithmetic;
        let mut candidates = Vec::new();
        let mut push = |operation: Operation, outcome: ArithmeticResult<f64>| match outcome {
            Ok(value) => candidates.push(ResultNode::unary(
                value,
                operation,
                (operand.index, operand.node),
            )),
            Err(e) => trace!("skip {}({}): {}", operation, a, e),
        };

        push(Operation::Negate, math.negate(a));
        push(Operation::Factorial, math.factorial(a));
        if self.operators.enable_root_log_operations {
            push(Operation::SquareRoot, math.square_root(a));
        }
        if self.operators.enable_logarithm_operations {
            push(Operation::NaturalLog, math.natural_log(a));
            push(Operation::Log10, math.log10(a));
        }

        candidates
    }
}
