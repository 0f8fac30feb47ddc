//! Generic graph search over puzzle states.
//!
//! The driver pops the best frontier entry, goal-tests it, and expands it
//! until the goal is found or the frontier runs dry. How "best" is decided
//! belongs to the frontier: a [`PriorityFrontier`] gives best-first order
//! under an explicit key function, a [`StackFrontier`] gives depth-first
//! order.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::{Duration, Instant};

use log::{debug, trace};
use serde::Serialize;
use smallvec::SmallVec;

use crate::error::Result;
use crate::path::reconstruct_path;

/// States produced by a single expansion. Neither puzzle branches more than
/// five ways, so this stays on the stack.
pub type Successors<N> = SmallVec<[N; 5]>;

/// A state the driver can search over.
pub trait SearchNode: Clone {
    /// Canonical identity. Two states are the same state iff their ids match.
    fn id(&self) -> String;

    /// All states reachable by one legal action.
    fn expand(&self) -> Result<Successors<Self>>;

    /// Domain constraint; invalid children never enter the frontier.
    fn is_valid(&self) -> bool {
        true
    }
}

/// A frontier entry: a state plus the identity of the state that found it.
#[derive(Debug, Clone)]
pub struct Discovered<N> {
    pub node: N,
    pub parent: Option<String>,
}

impl<N> Discovered<N> {
    pub fn root(node: N) -> Self {
        Self { node, parent: None }
    }

    pub fn child_of(node: N, parent: String) -> Self {
        Self {
            node,
            parent: Some(parent),
        }
    }
}

/// Discovered-but-unexpanded states, in whatever order the strategy wants.
pub trait Frontier<N> {
    fn push(&mut self, entry: Discovered<N>);
    fn pop(&mut self) -> Option<Discovered<N>>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// LIFO frontier: depth-first search.
#[derive(Debug)]
pub struct StackFrontier<N> {
    entries: Vec<Discovered<N>>,
}

impl<N> StackFrontier<N> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<N> Default for StackFrontier<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Frontier<N> for StackFrontier<N> {
    fn push(&mut self, entry: Discovered<N>) {
        self.entries.push(entry);
    }

    fn pop(&mut self) -> Option<Discovered<N>> {
        self.entries.pop()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Heap slot ordered so that `BinaryHeap` (a max-heap) yields the lowest
/// priority first, and among equal priorities the earliest insertion.
struct Ranked<N> {
    priority: u32,
    sequence: u64,
    entry: Discovered<N>,
}

impl<N> PartialEq for Ranked<N> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}

impl<N> Eq for Ranked<N> {}

impl<N> PartialOrd for Ranked<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> Ord for Ranked<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Min-priority frontier keyed by an explicit function: best-first search.
pub struct PriorityFrontier<N, K> {
    heap: BinaryHeap<Ranked<N>>,
    key: K,
    next_sequence: u64,
}

impl<N, K> PriorityFrontier<N, K>
where
    K: Fn(&N) -> u32,
{
    pub fn new(key: K) -> Self {
        Self {
            heap: BinaryHeap::new(),
            key,
            next_sequence: 0,
        }
    }
}

impl<N, K> Frontier<N> for PriorityFrontier<N, K>
where
    K: Fn(&N) -> u32,
{
    fn push(&mut self, entry: Discovered<N>) {
        let priority = (self.key)(&entry.node);
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Ranked {
            priority,
            sequence,
            entry,
        });
    }

    fn pop(&mut self) -> Option<Discovered<N>> {
        self.heap.pop().map(|ranked| ranked.entry)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Safety bounds for a single search call
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Stop after this many expansions
    pub max_expansions: usize,
    /// Stop once this much wall time has passed
    pub timeout: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_expansions: 1_000_000,
            timeout: None,
        }
    }
}

/// How a search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// Goal state popped from the frontier
    Solved,
    /// Frontier emptied without reaching the goal
    Exhausted,
    /// Hit `max_expansions`
    LimitReached,
    /// Hit `timeout`
    TimedOut,
}

/// Counters collected while searching
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    pub expanded: usize,
    pub generated: usize,
    pub duplicates_skipped: usize,
    pub max_frontier: usize,
    pub elapsed_ms: u64,
}

/// A goal state together with the path that reached it.
#[derive(Debug, Clone)]
pub struct Solution<N> {
    pub goal: N,
    /// Identities from start to goal, inclusive
    pub path: Vec<String>,
    /// Number of actions, always `path.len() - 1`
    pub moves: usize,
}

/// Result of a search
#[derive(Debug, Clone)]
pub struct SearchResult<N> {
    pub status: SearchStatus,
    pub solution: Option<Solution<N>>,
    pub stats: SearchStats,
}

impl<N> SearchResult<N> {
    pub fn is_solved(&self) -> bool {
        self.status == SearchStatus::Solved
    }
}

/// Search from `start` until a state whose id equals `goal` is popped.
///
/// Every popped state is closed before it is expanded, and an entry whose
/// identity is already closed is dropped without expansion. The parent link
/// of a state is committed when that state is popped, so the reconstructed
/// path is exactly the chain of expansions that produced the goal.
pub fn search<N, F>(
    start: N,
    goal: &str,
    mut frontier: F,
    config: &SearchConfig,
) -> Result<SearchResult<N>>
where
    N: SearchNode,
    F: Frontier<N>,
{
    let start_time = Instant::now();
    let deadline = config.timeout.map(|timeout| start_time + timeout);

    let mut closed: HashSet<String> = HashSet::new();
    let mut parents: HashMap<String, String> = HashMap::new();
    let mut stats = SearchStats::default();

    debug!("searching from {} towards {}", start.id(), goal);
    frontier.push(Discovered::root(start));
    stats.max_frontier = 1;

    while let Some(Discovered { node, parent }) = frontier.pop() {
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Ok(finish(SearchStatus::TimedOut, None, stats, start_time));
        }

        let id = node.id();
        if closed.contains(&id) {
            stats.duplicates_skipped += 1;
            continue;
        }
        if let Some(parent) = parent {
            parents.insert(id.clone(), parent);
        }
        closed.insert(id.clone());

        // goal test before expansion
        if id == goal {
            let path = reconstruct_path(&parents, &id);
            let moves = path.len() - 1;
            let solution = Solution {
                goal: node,
                path,
                moves,
            };
            return Ok(finish(SearchStatus::Solved, Some(solution), stats, start_time));
        }

        if stats.expanded >= config.max_expansions {
            return Ok(finish(SearchStatus::LimitReached, None, stats, start_time));
        }

        let children = node.expand()?;
        stats.expanded += 1;
        trace!("expanding {} ({} children)", id, children.len());

        for child in children {
            if closed.contains(&child.id()) || !child.is_valid() {
                continue;
            }
            stats.generated += 1;
            frontier.push(Discovered::child_of(child, id.clone()));
        }
        stats.max_frontier = stats.max_frontier.max(frontier.len());
    }

    Ok(finish(SearchStatus::Exhausted, None, stats, start_time))
}

fn finish<N>(
    status: SearchStatus,
    solution: Option<Solution<N>>,
    mut stats: SearchStats,
    start_time: Instant,
) -> SearchResult<N> {
    stats.elapsed_ms = start_time.elapsed().as_millis() as u64;
    debug!(
        "search finished: {:?} after {} expansions ({} generated, {} duplicates skipped)",
        status, stats.expanded, stats.generated, stats.duplicates_skipped
    );
    SearchResult {
        status,
        solution,
        stats,
    }
}
