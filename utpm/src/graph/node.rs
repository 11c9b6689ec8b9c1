//! A single recorded operation: its tag, its operands, and its forward
//! value / adjoint.

use crate::value::Utpm;

pub type NodeId = usize;

/// The closed set of operator tags a recorded node can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Leaf,
    Combine,
    Add,
    Sub,
    Mul,
    Div,
    Dot,
    Trace,
    Inv,
    Transpose,
    Solve,
    Qr,
    Eigh,
}

/// Operand references for a node: a flat list for most operators, or a
/// rectangular grid of `(node, slot)` references for `Combine`.
#[derive(Debug, Clone)]
pub enum Operands {
    Args(Vec<(NodeId, usize)>),
    Grid(Vec<Vec<(NodeId, usize)>>),
}

/// A node's forward value or adjoint: most operators produce one UTPM,
/// but `Qr` and `Eigh` each produce a pair of co-dependent ones. A
/// `(NodeId, slot)` reference elsewhere in the graph selects `0` for
/// `Single`, or `0`/`1` for which half of a `Pair` it means.
#[derive(Debug, Clone)]
pub enum NodeValue {
    Single(Utpm),
    Pair(Utpm, Utpm),
}

impl NodeValue {
    pub fn slot(&self, slot: usize) -> &Utpm {
        match (self, slot) {
            (NodeValue::Single(v), 0) => v,
            (NodeValue::Pair(a, _), 0) => a,
            (NodeValue::Pair(_, b), 1) => b,
            _ => panic!("node value has no slot {slot}"),
        }
    }

    pub fn slot_mut(&mut self, slot: usize) -> &mut Utpm {
        match (self, slot) {
            (NodeValue::Single(v), 0) => v,
            (NodeValue::Pair(a, _), 0) => a,
            (NodeValue::Pair(_, b), 1) => b,
            _ => panic!("node value has no slot {slot}"),
        }
    }

    pub fn zeros_like(&self) -> NodeValue {
        match self {
            NodeValue::Single(v) => NodeValue::Single(v.zeros_like()),
            NodeValue::Pair(a, b) => NodeValue::Pair(a.zeros_like(), b.zeros_like()),
        }
    }
}

pub struct Node {
    pub kind: OpKind,
    pub operands: Operands,
    pub value: NodeValue,
    pub adjoint: NodeValue,
}
