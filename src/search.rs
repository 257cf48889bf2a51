//! Resource-bounded alpha-beta search.
//!
//! The search builds an explicit tree of explored positions and runs minimax
//! with alpha-beta pruning over it. Expansion stops at a node, and the node
//! is scored with [`eval`], when any of these holds:
//! - the turn's time budget has run out
//! - the node lies deeper than the ply limit
//! - the side to move has no capture (terminal)
//! - the tree's tracked memory exceeds the memory budget
//!
//! Every explored node stays in the tree until the search call returns, so
//! the memory budget bounds the whole explored subtree, not just the current
//! path. Budgets and counters live in a [`SearchContext`] passed to every call.

use std::mem::size_of;
use std::time::{Duration, Instant};

use crate::constants::{MAX_DEPTH, MEMORY_BUDGET, TIME_BUDGET};
use crate::error::{KonaneError, Result};
use crate::eval::eval;
use crate::movegen::actions;
use crate::position::{Move, State, apply};

/// Bytes charged for each node kept in the tree.
const NODE_BYTES: usize = size_of::<SearchNode>();

/// Bytes charged for each move held in a generated action list.
const MOVE_BYTES: usize = size_of::<Move>();

/// Budgets that bound a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Nodes deeper than this many plies are evaluated statically
    pub max_depth: usize,
    /// Wall-clock time after which expansion stops
    pub time_budget: Duration,
    /// Tracked bytes after which expansion stops
    pub memory_budget: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            time_budget: TIME_BUDGET,
            memory_budget: MEMORY_BUDGET,
        }
    }
}

impl SearchLimits {
    /// Limits that never trigger.
    pub fn unbounded() -> Self {
        Self {
            max_depth: usize::MAX,
            time_budget: Duration::MAX,
            memory_budget: usize::MAX,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget;
        self
    }

    pub fn with_memory_budget(mut self, memory_budget: usize) -> Self {
        self.memory_budget = memory_budget;
        self
    }
}

/// The reason expansion stopped at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cutoff {
    Time,
    Depth,
    Terminal,
    Memory,
}

/// How many nodes each cutoff stopped during a turn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CutoffCounts {
    pub time: usize,
    pub depth: usize,
    pub terminal: usize,
    pub memory: usize,
}

impl CutoffCounts {
    fn record(&mut self, cutoff: Cutoff) {
        match cutoff {
            Cutoff::Time => self.time += 1,
            Cutoff::Depth => self.depth += 1,
            Cutoff::Terminal => self.terminal += 1,
            Cutoff::Memory => self.memory += 1,
        }
    }
}

/// Clock, memory counter, and budgets shared by every call of one search.
#[derive(Debug, Clone)]
pub struct SearchContext {
    limits: SearchLimits,
    started: Instant,
    memory: usize,
    peak_memory: usize,
    cutoffs: CutoffCounts,
}

impl SearchContext {
    pub fn new(limits: SearchLimits) -> Self {
        Self {
            limits,
            started: Instant::now(),
            memory: 0,
            peak_memory: 0,
            cutoffs: CutoffCounts::default(),
        }
    }

    /// Restart the clock and statistics at the beginning of a computer turn.
    ///
    /// The memory counter carries over.
    pub fn start_turn(&mut self) {
        self.started = Instant::now();
        self.peak_memory = self.memory;
        self.cutoffs = CutoffCounts::default();
    }

    #[inline]
    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Bytes currently charged to the counter.
    #[inline]
    pub fn memory(&self) -> usize {
        self.memory
    }

    /// Highest value of the counter since the turn started.
    #[inline]
    pub fn peak_memory(&self) -> usize {
        self.peak_memory
    }

    #[inline]
    pub fn cutoffs(&self) -> CutoffCounts {
        self.cutoffs
    }

    pub fn allocate(&mut self, bytes: usize) {
        self.memory = self.memory.saturating_add(bytes);
        self.peak_memory = self.peak_memory.max(self.memory);
    }

    /// Release bytes from the counter, clamping at zero.
    pub fn release(&mut self, bytes: usize) {
        if bytes > self.memory {
            log::trace!(
                "memory counter underflow: releasing {bytes} of {} bytes",
                self.memory
            );
            self.memory = 0;
        } else {
            self.memory -= bytes;
        }
    }

    /// Check the time, depth, and memory budgets. Terminal positions are
    /// detected by the caller, which already holds the action list.
    fn budget_cutoff(&self, depth: usize) -> Option<Cutoff> {
        if self.elapsed() > self.limits.time_budget {
            Some(Cutoff::Time)
        } else if depth > self.limits.max_depth {
            Some(Cutoff::Depth)
        } else if self.memory > self.limits.memory_budget {
            Some(Cutoff::Memory)
        } else {
            None
        }
    }
}

/// Index of a node within a [`SearchTree`].
pub type NodeId = usize;

/// The root of every tree.
pub const ROOT: NodeId = 0;

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// The position at this node
    pub state: State,
    /// The node this one was expanded from (`None` at the root)
    pub parent: Option<NodeId>,
    /// The move played from the parent to reach this node
    pub action: Option<Move>,
    /// Expanded children, in generation order
    pub children: Vec<NodeId>,
    /// Move leading to the best child found so far
    pub best_move: Option<Move>,
    /// Backed-up minimax value
    pub best_value: i32,
}

/// Arena holding every node explored by one search.
#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    /// Create a tree holding only `root`, charging it to the counter.
    pub fn new(root: State, ctx: &mut SearchContext) -> Self {
        ctx.allocate(NODE_BYTES);
        Self {
            nodes: vec![SearchNode {
                state: root,
                parent: None,
                action: None,
                children: Vec::new(),
                best_move: None,
                best_value: 0,
            }],
        }
    }

    #[inline]
    pub fn root(&self) -> &SearchNode {
        &self.nodes[ROOT]
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn add_child(&mut self, parent: NodeId, action: Move, ctx: &mut SearchContext) -> NodeId {
        ctx.allocate(NODE_BYTES);
        let state = apply(&self.nodes[parent].state, &action);
        let id = self.nodes.len();
        self.nodes.push(SearchNode {
            state,
            parent: Some(parent),
            action: Some(action),
            children: Vec::new(),
            best_move: None,
            best_value: 0,
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Drop the tree and release every node from the counter.
    pub fn discard(self, ctx: &mut SearchContext) {
        ctx.release(self.nodes.len() * NODE_BYTES);
    }
}

/// Summary of one top-level search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Best root move, if any child was evaluated
    pub best_move: Option<Move>,
    /// Backed-up value of the root
    pub value: i32,
    /// Nodes held by the tree when the search finished
    pub nodes: usize,
    /// Peak of the memory counter during the turn
    pub peak_memory: usize,
    pub elapsed: Duration,
    pub cutoffs: CutoffCounts,
}

/// What the computer should do in a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Play(Move),
    /// The side to move has no capture and loses
    NoLegalMove,
}

/// Expand `id`, or score it if a cutoff applies.
///
/// Returns the child actions to search, or the static value at a cutoff.
fn expand_or_cut(
    tree: &SearchTree,
    id: NodeId,
    depth: usize,
    ctx: &mut SearchContext,
) -> std::result::Result<Vec<Move>, i32> {
    let state = &tree.nodes[id].state;
    let cutoff = match ctx.budget_cutoff(depth) {
        Some(cutoff) => cutoff,
        None => {
            let moves = actions(state);
            if !moves.is_empty() {
                ctx.allocate(moves.len() * MOVE_BYTES);
                return Ok(moves);
            }
            Cutoff::Terminal
        }
    };
    ctx.cutoffs.record(cutoff);
    Err(eval(state))
}

fn max_value(
    tree: &mut SearchTree,
    id: NodeId,
    depth: usize,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext,
) -> i32 {
    let moves = match expand_or_cut(tree, id, depth, ctx) {
        Ok(moves) => moves,
        Err(value) => {
            tree.nodes[id].best_value = value;
            return value;
        }
    };
    let mut v = i32::MIN;
    for mv in &moves {
        let child = tree.add_child(id, *mv, ctx);
        let value = min_value(tree, child, depth + 1, alpha, beta, ctx);
        if value > v {
            v = value;
            tree.nodes[id].best_move = Some(*mv);
        }
        if v >= beta {
            break;
        }
        alpha = alpha.max(v);
    }

    ctx.release(moves.len() * MOVE_BYTES);
    tree.nodes[id].best_value = v;
    v
}

fn min_value(
    tree: &mut SearchTree,
    id: NodeId,
    depth: usize,
    alpha: i32,
    mut beta: i32,
    ctx: &mut SearchContext,
) -> i32 {
    let moves = match expand_or_cut(tree, id, depth, ctx) {
        Ok(moves) => moves,
        Err(value) => {
            tree.nodes[id].best_value = value;
            return value;
        }
    };
    let mut v = i32::MAX;
    for mv in &moves {
        let child = tree.add_child(id, *mv, ctx);
        let value = max_value(tree, child, depth + 1, alpha, beta, ctx);
        if value < v {
            v = value;
            tree.nodes[id].best_move = Some(*mv);
        }
        if v <= alpha {
            break;
        }
        beta = beta.min(v);
    }

    ctx.release(moves.len() * MOVE_BYTES);
    tree.nodes[id].best_value = v;
    v
}

/// Run alpha-beta from `state`, with the side to move as the maximizing player.
///
/// The clock is read from `ctx`; call [`SearchContext::start_turn`] first.
/// The tree is discarded before returning, so the memory counter ends where
/// it started.
pub fn alpha_beta_search(state: &State, ctx: &mut SearchContext) -> SearchOutcome {
    let mut tree = SearchTree::new(*state, ctx);
    let value = max_value(&mut tree, ROOT, 0, i32::MIN, i32::MAX, ctx);

    let outcome = SearchOutcome {
        best_move: tree.root().best_move,
        value,
        nodes: tree.len(),
        peak_memory: ctx.peak_memory(),
        elapsed: ctx.elapsed(),
        cutoffs: ctx.cutoffs(),
    };
    dump_children(&tree);
    tree.discard(ctx);

    log::debug!(
        "search: value={} nodes={} peak_memory={} elapsed={:?} cutoffs={:?}",
        outcome.value,
        outcome.nodes,
        outcome.peak_memory,
        outcome.elapsed,
        outcome.cutoffs
    );
    outcome
}

/// Choose the computer's move in `state`.
///
/// # Errors
/// [`KonaneError::NoDecision`] if the position has captures but the search
/// was cut off before scoring any of them.
pub fn decide(state: &State, ctx: &mut SearchContext) -> Result<Decision> {
    if actions(state).is_empty() {
        return Ok(Decision::NoLegalMove);
    }
    alpha_beta_search(state, ctx)
        .best_move
        .map(Decision::Play)
        .ok_or(KonaneError::NoDecision)
}

/// Log the root's children and their backed-up values.
fn dump_children(tree: &SearchTree) {
    if !log::log_enabled!(log::Level::Trace) {
        return;
    }
    let root = tree.root();
    for &id in &root.children {
        let child = tree.node(id);
        if let Some(mv) = child.action {
            log::trace!(
                "move {} value={} children={}",
                mv,
                child.best_value,
                child.children.len()
            );
        }
    }
}
