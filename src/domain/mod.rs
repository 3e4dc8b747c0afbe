//! Domain layer: nodes, operators and checked arithmetic
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arithmetic;
pub mod combinator;
pub mod error;
pub mod limits;
pub mod node;
pub mod operation;

pub use arithmetic::{CheckedArithmetic, SafeArithmetic};
pub use combinator::{Combiner, Operand};
pub use error::{ArithmeticError, ArithmeticResult, LimitError};
pub use limits::{ArithmeticLimits, OperatorSettings, MAX_REPRESENTABLE_FACTORIAL};
pub use node::ResultNode;
pub use operation::{Operation, Provenance};
