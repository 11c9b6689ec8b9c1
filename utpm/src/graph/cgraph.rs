//! The computational graph: records operations as nodes, supports a
//! forward re-evaluation pass over fresh leaf values, and a reverse
//! sweep that accumulates adjoints via each node's local pullback.
//!
//! Recording is explicit rather than process-wide: callers hold a
//! `&mut CGraph` and thread it through every call (see SPEC_FULL.md §9,
//! "process-wide graph").

use crate::combine;
use crate::error::{Result, UtpmError};
use crate::raw;
use crate::value::Utpm;

use super::node::{Node, NodeId, NodeValue, OpKind, Operands};

/// Lets ergonomic graph methods accept either a bare [`NodeId`] (meaning
/// slot `0`, the common case) or an explicit `(NodeId, usize)` pair (for
/// referencing one half of a `qr`/`eigh` node's pair output).
pub trait IntoNodeRef {
    fn into_node_ref(self) -> (NodeId, usize);
}

impl IntoNodeRef for NodeId {
    fn into_node_ref(self) -> (NodeId, usize) {
        (self, 0)
    }
}

impl IntoNodeRef for (NodeId, usize) {
    fn into_node_ref(self) -> (NodeId, usize) {
        self
    }
}

pub struct CGraph {
    nodes: Vec<Node>,
    independents: Vec<(NodeId, usize)>,
    dependents: Vec<(NodeId, usize)>,
}

impl Default for CGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl CGraph {
    pub fn new() -> Self {
        CGraph {
            nodes: Vec::new(),
            independents: Vec::new(),
            dependents: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn record_leaf(&mut self, value: Utpm) -> NodeId {
        let adjoint = NodeValue::Single(value.zeros_like());
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind: OpKind::Leaf,
            operands: Operands::Args(vec![]),
            value: NodeValue::Single(value),
            adjoint,
        });
        id
    }

    pub fn record_op(&mut self, kind: OpKind, operands: Operands) -> Result<NodeId> {
        let value = self.eval(kind, &operands)?;
        let adjoint = value.zeros_like();
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            operands,
            value,
            adjoint,
        });
        Ok(id)
    }

    pub fn add(&mut self, a: impl IntoNodeRef, b: impl IntoNodeRef) -> Result<NodeId> {
        self.record_op(
            OpKind::Add,
            Operands::Args(vec![a.into_node_ref(), b.into_node_ref()]),
        )
    }

    pub fn sub(&mut self, a: impl IntoNodeRef, b: impl IntoNodeRef) -> Result<NodeId> {
        self.record_op(
            OpKind::Sub,
            Operands::Args(vec![a.into_node_ref(), b.into_node_ref()]),
        )
    }

    pub fn mul(&mut self, a: impl IntoNodeRef, b: impl IntoNodeRef) -> Result<NodeId> {
        self.record_op(
            OpKind::Mul,
            Operands::Args(vec![a.into_node_ref(), b.into_node_ref()]),
        )
    }

    pub fn div(&mut self, a: impl IntoNodeRef, b: impl IntoNodeRef) -> Result<NodeId> {
        self.record_op(
            OpKind::Div,
            Operands::Args(vec![a.into_node_ref(), b.into_node_ref()]),
        )
    }

    pub fn dot(&mut self, a: impl IntoNodeRef, b: impl IntoNodeRef) -> Result<NodeId> {
        self.record_op(
            OpKind::Dot,
            Operands::Args(vec![a.into_node_ref(), b.into_node_ref()]),
        )
    }

    pub fn trace(&mut self, a: impl IntoNodeRef) -> Result<NodeId> {
        self.record_op(OpKind::Trace, Operands::Args(vec![a.into_node_ref()]))
    }

    pub fn inv(&mut self, a: impl IntoNodeRef) -> Result<NodeId> {
        self.record_op(OpKind::Inv, Operands::Args(vec![a.into_node_ref()]))
    }

    pub fn transpose(&mut self, a: impl IntoNodeRef) -> Result<NodeId> {
        self.record_op(OpKind::Transpose, Operands::Args(vec![a.into_node_ref()]))
    }

    /// Records `A . y = x`; operand order is `(A, x)`.
    pub fn solve(&mut self, a: impl IntoNodeRef, x: impl IntoNodeRef) -> Result<NodeId> {
        self.record_op(
            OpKind::Solve,
            Operands::Args(vec![a.into_node_ref(), x.into_node_ref()]),
        )
    }

    /// Records a QR decomposition. Returns `(Q, R)` references into the
    /// single node produced (slot 0 is Q, slot 1 is R).
    pub fn qr(&mut self, a: impl IntoNodeRef) -> Result<((NodeId, usize), (NodeId, usize))> {
        let id = self.record_op(OpKind::Qr, Operands::Args(vec![a.into_node_ref()]))?;
        Ok(((id, 0), (id, 1)))
    }

    /// Records a symmetric eigendecomposition. Returns `(L, Q)`
    /// references into the single node produced.
    pub fn eigh(&mut self, a: impl IntoNodeRef) -> Result<((NodeId, usize), (NodeId, usize))> {
        let id = self.record_op(OpKind::Eigh, Operands::Args(vec![a.into_node_ref()]))?;
        Ok(((id, 0), (id, 1)))
    }

    pub fn combine(&mut self, grid: Vec<Vec<impl IntoNodeRef + Copy>>) -> Result<NodeId> {
        let grid: Vec<Vec<(NodeId, usize)>> = grid
            .into_iter()
            .map(|row| row.into_iter().map(IntoNodeRef::into_node_ref).collect())
            .collect();
        self.record_op(OpKind::Combine, Operands::Grid(grid))
    }

    pub fn set_independents(&mut self, ids: Vec<(NodeId, usize)>) {
        self.independents = ids;
    }

    pub fn set_dependents(&mut self, ids: Vec<(NodeId, usize)>) {
        self.dependents = ids;
    }

    pub fn value(&self, id: NodeId, slot: usize) -> &Utpm {
        self.nodes[id].value.slot(slot)
    }

    pub fn adjoint(&self, id: NodeId, slot: usize) -> &Utpm {
        self.nodes[id].adjoint.slot(slot)
    }

    fn eval(&self, kind: OpKind, operands: &Operands) -> Result<NodeValue> {
        match (kind, operands) {
            (OpKind::Leaf, _) => Err(UtpmError::Usage(
                "leaf nodes are not re-evaluated; set their value directly".into(),
            )),
            (OpKind::Add, Operands::Args(a)) => {
                let x = self.value(a[0].0, a[0].1);
                let y = self.value(a[1].0, a[1].1);
                Ok(NodeValue::Single((x + y)?))
            }
            (OpKind::Sub, Operands::Args(a)) => {
                let x = self.value(a[0].0, a[0].1);
                let y = self.value(a[1].0, a[1].1);
                Ok(NodeValue::Single((x - y)?))
            }
            (OpKind::Mul, Operands::Args(a)) => {
                let x = self.value(a[0].0, a[0].1);
                let y = self.value(a[1].0, a[1].1);
                Ok(NodeValue::Single((x * y)?))
            }
            (OpKind::Div, Operands::Args(a)) => {
                let x = self.value(a[0].0, a[0].1);
                let y = self.value(a[1].0, a[1].1);
                Ok(NodeValue::Single((x / y)?))
            }
            (OpKind::Dot, Operands::Args(a)) => {
                let x = self.value(a[0].0, a[0].1);
                let y = self.value(a[1].0, a[1].1);
                Ok(NodeValue::Single(x.dot(y)?))
            }
            (OpKind::Trace, Operands::Args(a)) => {
                let x = self.value(a[0].0, a[0].1);
                Ok(NodeValue::Single(x.trace()?))
            }
            (OpKind::Inv, Operands::Args(a)) => {
                let x = self.value(a[0].0, a[0].1);
                Ok(NodeValue::Single(x.inv()?))
            }
            (OpKind::Transpose, Operands::Args(a)) => {
                let x = self.value(a[0].0, a[0].1);
                Ok(NodeValue::Single(x.transpose()))
            }
            (OpKind::Solve, Operands::Args(a)) => {
                let mat = self.value(a[0].0, a[0].1);
                let rhs = self.value(a[1].0, a[1].1);
                Ok(NodeValue::Single(mat.solve(rhs)?))
            }
            (OpKind::Qr, Operands::Args(a)) => {
                let x = self.value(a[0].0, a[0].1);
                let (q, r) = x.qr()?;
                Ok(NodeValue::Pair(q, r))
            }
            (OpKind::Eigh, Operands::Args(a)) => {
                let x = self.value(a[0].0, a[0].1);
                let (l, q) = x.eigh()?;
                Ok(NodeValue::Pair(l, q))
            }
            (OpKind::Combine, Operands::Grid(grid)) => {
                let blocks: Vec<Vec<Utpm>> = grid
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|&(id, slot)| self.value(id, slot).clone())
                            .collect()
                    })
                    .collect();
                Ok(NodeValue::Single(combine::combine_blocks(&blocks)?))
            }
            _ => Err(UtpmError::Usage(
                "operand shape doesn't match the node's operator kind".into(),
            )),
        }
    }

    /// Replaces each independent's value with the corresponding entry of
    /// `new_values`, then re-evaluates every non-leaf, non-independent
    /// node in insertion order.
    pub fn forward(&mut self, new_values: Vec<Utpm>) -> Result<()> {
        if new_values.len() != self.independents.len() {
            return Err(UtpmError::Usage(format!(
                "forward: expected {} independent values, got {}",
                self.independents.len(),
                new_values.len()
            )));
        }

        let independents = self.independents.clone();
        let independent_ids: std::collections::HashSet<NodeId> =
            independents.iter().map(|&(id, _)| id).collect();
        for ((id, slot), v) in independents.into_iter().zip(new_values) {
            *self.nodes[id].value.slot_mut(slot) = v;
        }

        for idx in 0..self.nodes.len() {
            if matches!(self.nodes[idx].kind, OpKind::Leaf) || independent_ids.contains(&idx) {
                continue;
            }
            let kind = self.nodes[idx].kind;
            let operands = self.nodes[idx].operands.clone();
            let value = self.eval(kind, &operands)?;
            self.nodes[idx].value = value;
        }
        Ok(())
    }

    /// Zeroes all adjoints, seeds each dependent with the corresponding
    /// entry of `seeds`, then walks nodes in reverse insertion order
    /// applying each one's local pullback.
    pub fn reverse(&mut self, seeds: Vec<Utpm>) -> Result<()> {
        if self.dependents.is_empty() {
            return Err(UtpmError::Usage(
                "reverse called with no dependents set".into(),
            ));
        }
        if seeds.len() != self.dependents.len() {
            return Err(UtpmError::Usage(format!(
                "reverse: expected {} seed adjoints, got {}",
                self.dependents.len(),
                seeds.len()
            )));
        }

        for node in &mut self.nodes {
            node.adjoint = node.value.zeros_like();
        }

        let dependents = self.dependents.clone();
        for ((id, slot), seed) in dependents.into_iter().zip(seeds) {
            *self.nodes[id].adjoint.slot_mut(slot) = seed;
        }

        for idx in (0..self.nodes.len()).rev() {
            self.apply_pullback(idx)?;
        }
        Ok(())
    }

    fn apply_pullback(&mut self, idx: NodeId) -> Result<()> {
        let kind = self.nodes[idx].kind;
        let operands = self.nodes[idx].operands.clone();
        let ybar = self.nodes[idx].adjoint.clone();

        let contributions: Vec<((NodeId, usize), Utpm)> = match (kind, &operands) {
            (OpKind::Leaf, _) => vec![],
            (OpKind::Add, Operands::Args(a)) => {
                let (g1, g2) = raw::pullback::add_pullback(ybar.slot(0).coeffs());
                vec![
                    (a[0], Utpm::from_coeffs(g1)),
                    (a[1], Utpm::from_coeffs(g2)),
                ]
            }
            (OpKind::Sub, Operands::Args(a)) => {
                let (g1, g2) = raw::pullback::sub_pullback(ybar.slot(0).coeffs());
                vec![
                    (a[0], Utpm::from_coeffs(g1)),
                    (a[1], Utpm::from_coeffs(g2)),
                ]
            }
            (OpKind::Mul, Operands::Args(a)) => {
                let x1 = self.value(a[0].0, a[0].1);
                let x2 = self.value(a[1].0, a[1].1);
                let (g1, g2) =
                    raw::pullback::mul_pullback(ybar.slot(0).coeffs(), x1.coeffs(), x2.coeffs())?;
                vec![
                    (a[0], Utpm::from_coeffs(g1)),
                    (a[1], Utpm::from_coeffs(g2)),
                ]
            }
            (OpKind::Div, Operands::Args(a)) => {
                let x1 = self.value(a[0].0, a[0].1);
                let x2 = self.value(a[1].0, a[1].1);
                let (g1, g2) =
                    raw::pullback::div_pullback(ybar.slot(0).coeffs(), x1.coeffs(), x2.coeffs())?;
                vec![
                    (a[0], Utpm::from_coeffs(g1)),
                    (a[1], Utpm::from_coeffs(g2)),
                ]
            }
            (OpKind::Dot, Operands::Args(a)) => {
                let x1 = self.value(a[0].0, a[0].1);
                let x2 = self.value(a[1].0, a[1].1);
                let (g1, g2) =
                    raw::pullback::dot_pullback(ybar.slot(0).coeffs(), x1.coeffs(), x2.coeffs())?;
                vec![
                    (a[0], Utpm::from_coeffs(g1)),
                    (a[1], Utpm::from_coeffs(g2)),
                ]
            }
            (OpKind::Trace, Operands::Args(a)) => {
                let x = self.value(a[0].0, a[0].1);
                let n = x.shape().0;
                let g = raw::pullback::trace_pullback(ybar.slot(0).coeffs(), n);
                vec![(a[0], Utpm::from_coeffs(g))]
            }
            (OpKind::Inv, Operands::Args(a)) => {
                let y = self.value(idx, 0);
                let g = raw::pullback::inv_pullback(ybar.slot(0).coeffs(), y.coeffs())?;
                vec![(a[0], Utpm::from_coeffs(g))]
            }
            (OpKind::Transpose, Operands::Args(a)) => {
                let g = raw::pullback::transpose_pullback(ybar.slot(0).coeffs());
                vec![(a[0], Utpm::from_coeffs(g))]
            }
            (OpKind::Solve, Operands::Args(a)) => {
                let mat = self.value(a[0].0, a[0].1);
                let y = self.value(idx, 0);
                let (xg, ag) =
                    raw::pullback::solve_pullback(ybar.slot(0).coeffs(), mat.coeffs(), y.coeffs())?;
                vec![(a[1], Utpm::from_coeffs(xg)), (a[0], Utpm::from_coeffs(ag))]
            }
            (OpKind::Qr, Operands::Args(a)) => {
                let q = self.value(idx, 0);
                let r = self.value(idx, 1);
                let g = raw::pullback::qr_pullback(
                    ybar.slot(0).coeffs(),
                    ybar.slot(1).coeffs(),
                    q.coeffs(),
                    r.coeffs(),
                )?;
                vec![(a[0], Utpm::from_coeffs(g))]
            }
            (OpKind::Eigh, Operands::Args(a)) => {
                let l = self.value(idx, 0);
                let q = self.value(idx, 1);
                let g = raw::pullback::eigh_pullback(
                    ybar.slot(0).coeffs(),
                    ybar.slot(1).coeffs(),
                    l.coeffs(),
                    q.coeffs(),
                )?;
                vec![(a[0], Utpm::from_coeffs(g))]
            }
            (OpKind::Combine, Operands::Grid(grid)) => {
                let row_sizes: Vec<usize> = grid
                    .iter()
                    .map(|row| self.value(row[0].0, row[0].1).shape().0)
                    .collect();
                let col_sizes: Vec<usize> = grid[0]
                    .iter()
                    .map(|&(id, slot)| self.value(id, slot).shape().1)
                    .collect();
                let blocks = combine::split_blocks(ybar.slot(0).coeffs(), &row_sizes, &col_sizes);
                let mut out = Vec::new();
                for (r, row) in grid.iter().enumerate() {
                    for (c, &operand) in row.iter().enumerate() {
                        out.push((operand, Utpm::from_coeffs(blocks[r][c].clone())));
                    }
                }
                out
            }
            _ => {
                return Err(UtpmError::Usage(
                    "operand shape doesn't match the node's operator kind during reverse".into(),
                ))
            }
        };

        for ((id, slot), grad) in contributions {
            let current = self.nodes[id].adjoint.slot(slot).clone();
            let updated = (&current + &grad)?;
            *self.nodes[id].adjoint.slot_mut(slot) = updated;
        }
        Ok(())
    }
}
