//! Reverse-mode computational graph: nodes record a forward operation and
//! accumulate an adjoint during a reverse sweep.

mod cgraph;
mod node;

pub use cgraph::{CGraph, IntoNodeRef};
pub use node::{Node, NodeId, NodeValue, OpKind, Operands};
