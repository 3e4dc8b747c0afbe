use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use generational_arena::{Arena, Index};
use rayon::prelude::*;
use termtree::Tree;
use tracing::{debug, instrument, warn};

use crate::config::Settings;
use crate::domain::{CheckedArithmetic, Combiner, Operand, OperatorSettings, ResultNode};
use crate::errors::SettingsResult;
use crate::render::{Expression, TreeConvert};

static NEXT_ARENA_ID: AtomicU64 = AtomicU64::new(0);

/// Derived node computed by one arena and not yet stored.
///
/// Its provenance refers to that arena's indices, so only that arena accepts it.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    origin: u64,
    node: ResultNode,
}

impl Candidate {
    pub fn node(&self) -> &ResultNode {
        &self.node
    }
}

/// Arena owning every node of one expression forest.
///
/// Uses generational arena for memory-safe operand references and O(1) lookups.
/// Nodes are never removed, so every `Index` handed out stays valid for the
/// lifetime of the arena. Many nodes may point at the same operand.
#[derive(Debug)]
pub struct ExpressionArena {
    /// Distinguishes candidates of this arena from those of any other
    id: u64,
    /// Arena storage for all nodes
    arena: Arena<ResultNode>,
    /// Leaf indices in insertion order
    leaves: Vec<Index>,
    /// Operator enumeration used by the combine operations
    combiner: Combiner,
}

impl Default for ExpressionArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionArena {
    pub fn new() -> Self {
        Self::with_combiner(Combiner::default())
    }

    /// Fails with `SettingsError::InvalidLimit` if the limits do not validate.
    pub fn with_settings(settings: &Settings) -> SettingsResult<Self> {
        let combiner = Combiner::with_limits(settings.limits, settings.operators)?;
        Ok(Self::with_combiner(combiner))
    }

    /// Arena backed by a custom arithmetic implementation.
    pub fn with_arithmetic(
        arithmetic: Arc<dyn CheckedArithmetic>,
        operators: OperatorSettings,
    ) -> Self {
        Self::with_combiner(Combiner::new(arithmetic, operators))
    }

    pub fn with_combiner(combiner: Combiner) -> Self {
        Self {
            id: NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed),
            arena: Arena::new(),
            leaves: Vec::new(),
            combiner,
        }
    }

    pub fn combiner(&self) -> &Combiner {
        &self.combiner
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_leaf(&mut self, value: f64) -> Index {
        let idx = self.arena.insert(ResultNode::leaf(value));
        self.leaves.push(idx);
        idx
    }

    /// Store a candidate produced by this arena's `candidates_*`.
    ///
    /// Returns `None` for a candidate computed by another arena.
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, candidate: Candidate) -> Option<Index> {
        if candidate.origin != self.id {
            warn!(
                "insert: candidate from arena {} refused by arena {}",
                candidate.origin, self.id
            );
            return None;
        }
        Some(self.arena.insert(candidate.node))
    }

    pub fn get_node(&self, idx: Index) -> Option<&ResultNode> {
        self.arena.get(idx)
    }

    pub fn leaves(&self) -> &[Index] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Index, &ResultNode)> {
        self.arena.iter()
    }

    fn operand(&self, idx: Index) -> Option<Operand<'_>> {
        let node = self.get_node(idx);
        if node.is_none() {
            warn!("operand: unknown index {:?}", idx);
        }
        node.map(|node| Operand::new(idx, node))
    }

    fn binary_nodes(&self, a: Index, b: Index) -> Vec<ResultNode> {
        match (self.operand(a), self.operand(b)) {
            (Some(lhs), Some(rhs)) => self.combiner.binary_candidates(lhs, rhs),
            _ => Vec::new(),
        }
    }

    fn unary_nodes(&self, a: Index) -> Vec<ResultNode> {
        self.operand(a)
            .map(|operand| self.combiner.unary_candidates(operand))
            .unwrap_or_default()
    }

    fn tag(&self, nodes: Vec<ResultNode>) -> Vec<Candidate> {
        nodes
            .into_iter()
            .map(|node| Candidate {
                origin: self.id,
                node,
            })
            .collect()
    }

    /// Binary candidates for `(a, b)` without inserting them.
    #[instrument(level = "debug", skip(self))]
    pub fn candidates_with(&self, a: Index, b: Index) -> Vec<Candidate> {
        self.tag(self.binary_nodes(a, b))
    }

    /// Unary candidates for `a` without inserting them.
    #[instrument(level = "debug", skip(self))]
    pub fn candidates_self(&self, a: Index) -> Vec<Candidate> {
        self.tag(self.unary_nodes(a))
    }

    /// Combines `a` with `b` using every enabled binary operator.
    ///
    /// Returns the indices of the new nodes in operator order; operators whose
    /// arithmetic fails produce nothing.
    #[instrument(level = "debug", skip(self))]
    pub fn combine_with(&mut self, a: Index, b: Index) -> Vec<Index> {
        let candidates = self.binary_nodes(a, b);
        debug!("combine_with: {} candidates", candidates.len());
        self.insert_all(candidates)
    }

    /// Applies every enabled unary operator to `a`.
    #[instrument(level = "debug", skip(self))]
    pub fn combine_self(&mut self, a: Index) -> Vec<Index> {
        let candidates = self.unary_nodes(a);
        debug!("combine_self: {} candidates", candidates.len());
        self.insert_all(candidates)
    }

    /// Combines many caller-chosen pairs.
    ///
    /// Uses parallel execution with rayon for the arithmetic; insertion
    /// happens afterwards in pair order, so the result equals calling
    /// `combine_with` for each pair in turn.
    #[instrument(level = "debug", skip(self, pairs))]
    pub fn combine_pairs(&mut self, pairs: &[(Index, Index)]) -> Vec<Index> {
        let this = &*self;
        let batches: Vec<Vec<ResultNode>> = pairs
            .par_iter()
            .map(|&(a, b)| this.binary_nodes(a, b))
            .collect();

        let indices = self.insert_all(batches.into_iter().flatten());
        debug!(
            "combine_pairs: {} pairs produced {} nodes",
            pairs.len(),
            indices.len()
        );
        indices
    }

    fn insert_all(&mut self, nodes: impl IntoIterator<Item = ResultNode>) -> Vec<Index> {
        nodes.into_iter().map(|node| self.arena.insert(node)).collect()
    }

    /// Displayable expression rooted at `idx`.
    pub fn expression(&self, idx: Index) -> Expression<'_> {
        Expression::new(self, idx)
    }

    /// Fully parenthesised infix text of the expression rooted at `idx`.
    #[instrument(level = "trace", skip(self))]
    pub fn render(&self, idx: Index) -> String {
        self.expression(idx).to_string()
    }

    /// Indented tree view of the expression rooted at `idx`.
    pub fn to_tree(&self, idx: Index) -> Tree<String> {
        self.expression(idx).to_tree_string()
    }

    /// Height of the expression rooted at `idx`; a leaf has depth 1.
    #[instrument(level = "trace", skip(self))]
    pub fn depth(&self, idx: Index) -> usize {
        if let Some(node) = self.get_node(idx) {
            1 + node
                .provenance()
                .operands()
                .map(|operand| self.depth(operand))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Original leaf values consumed by `idx`, left to right.
    ///
    /// Shared sub-expressions contribute once per use, so the length equals
    /// the node's `leaf_count`.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_values(&self, idx: Index) -> Vec<f64> {
        let mut values = Vec::new();
        self.collect_leaves(idx, &mut values);
        values
    }

    fn collect_leaves(&self, idx: Index, values: &mut Vec<f64>) {
        if let Some(node) = self.get_node(idx) {
            if node.is_leaf() {
                values.push(node.value());
            } else {
                for operand in node.provenance().operands() {
                    self.collect_leaves(operand, values);
                }
            }
        }
    }
}
