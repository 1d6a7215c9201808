//! Branch-and-bound search for the minimum number of bins.
//!
//! Items are sorted largest first and assigned one at a time. A node either
//! places the next item in one of its open bins or opens a new bin for it.
//! The search is depth first over an explicit stack, seeded with the
//! Best-Fit-Decreasing packing as the incumbent, and a node is discarded as
//! soon as its lower bound can't beat the incumbent.

use crate::bounds::{capacity_bound, large_item_bound, node_bound, validate};
use crate::heuristic::{pack_in_order, sorted_descending, BestFit};
use crate::limits::{AbortReason, Budget, SearchLimits};
use crate::{Partition, Result};
use fnv::FnvHashSet;
use log::{debug, info};
use smallvec::SmallVec;
use std::time::Duration;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// How an exact search ended.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// The returned packing uses the minimum number of bins.
    Optimal,

    /// A search limit stopped the search. The returned packing is valid but
    /// may use more bins than necessary.
    Aborted(AbortReason),
}

/// Counters collected during one exact search.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Nodes taken off the frontier.
    pub nodes_explored: u64,

    /// Nodes discarded by the lower bound, including new-bin branches that
    /// were never created.
    pub nodes_pruned: u64,

    /// Number of times a complete packing improved on the incumbent.
    pub incumbent_updates: u64,

    /// Wall-clock time spent in the search.
    pub elapsed: Duration,
}

/// Result of the exact solver.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Clone, Debug)]
pub struct ExactOutcome {
    partition: Partition,
    status: SearchStatus,
    statistics: SearchStatistics,
}

impl ExactOutcome {
    /// Number of bins in the returned packing.
    pub fn bin_count(&self) -> usize {
        self.partition.len()
    }

    /// The best packing found.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Consumes the outcome, returning the best packing found.
    pub fn into_partition(self) -> Partition {
        self.partition
    }

    /// How the search ended.
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Returns whether the bin count is proven minimal.
    pub fn is_optimal(&self) -> bool {
        self.status == SearchStatus::Optimal
    }

    /// Search counters.
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}

/// A partial packing of the sorted items.
#[derive(Clone, Debug)]
struct SearchNode {
    // Index of the next unassigned item.
    next: usize,
    // Unused capacity summed over the open bins.
    free: u128,
    loads: SmallVec<[usize; 16]>,
    // Bin of each assigned item, in sorted item order.
    assignment: SmallVec<[usize; 32]>,
}

impl SearchNode {
    fn root() -> Self {
        SearchNode {
            next: 0,
            free: 0,
            loads: SmallVec::new(),
            assignment: SmallVec::new(),
        }
    }

    fn opened(&self) -> usize {
        self.loads.len()
    }

    /// Child with the next item added to open bin `bin`.
    fn place(&self, bin: usize, size: usize) -> Self {
        let mut child = self.clone();
        child.loads[bin] += size;
        child.free -= size as u128;
        child.assignment.push(bin);
        child.next += 1;
        child
    }

    /// Child with the next item alone in a new bin.
    fn open_bin(&self, size: usize, capacity: usize) -> Self {
        let mut child = self.clone();
        child.assignment.push(child.loads.len());
        child.loads.push(size);
        child.free += (capacity - size) as u128;
        child.next += 1;
        child
    }

    fn to_partition(&self, sorted: &[usize], capacity: usize) -> Partition {
        let mut bins = vec![Vec::new(); self.opened()];
        for (&size, &bin) in sorted.iter().zip(self.assignment.iter()) {
            bins[bin].push(size);
        }
        Partition::new(capacity, bins)
    }
}

pub(crate) fn branch_and_bound(
    items: &[usize],
    capacity: usize,
    limits: &SearchLimits,
) -> Result<ExactOutcome> {
    validate(items, capacity)?;

    let budget = Budget::start(limits);
    let sorted = sorted_descending(items);

    // suffix[i] is the total size of items i.. in sorted order.
    let mut suffix = vec![0u128; sorted.len() + 1];
    for i in (0..sorted.len()).rev() {
        suffix[i] = suffix[i + 1] + sorted[i] as u128;
    }

    let target = capacity_bound(suffix[0], capacity).max(large_item_bound(&sorted, capacity));
    let mut best = Partition::from_bins(
        capacity,
        pack_in_order(&BestFit, sorted.iter().copied(), capacity),
    );
    let mut statistics = SearchStatistics::default();
    let mut status = SearchStatus::Optimal;

    debug!(
        "exact search over {} items: lower bound {}, best-fit-decreasing {}",
        sorted.len(),
        target,
        best.len()
    );

    let mut frontier = vec![SearchNode::root()];

    // Stop as soon as the incumbent meets the lower bound.
    while best.len() > target {
        let node = match frontier.pop() {
            Some(node) => node,
            None => break,
        };

        if let Some(reason) = budget.exhausted(statistics.nodes_explored) {
            info!(
                "exact search stopped ({}) after {} nodes with {} bins",
                reason,
                statistics.nodes_explored,
                best.len()
            );
            status = SearchStatus::Aborted(reason);
            break;
        }
        statistics.nodes_explored += 1;

        let opened = node.opened();
        if node_bound(opened, node.free, suffix[node.next], capacity) >= best.len() {
            statistics.nodes_pruned += 1;
            continue;
        }

        if node.next == sorted.len() {
            best = node.to_partition(&sorted, capacity);
            statistics.incumbent_updates += 1;
            debug!(
                "new incumbent with {} bins after {} nodes",
                best.len(),
                statistics.nodes_explored
            );
            continue;
        }

        let size = sorted[node.next];

        // Pushed first so it is expanded after every placement in an open bin.
        let new_bin_bound = node_bound(
            opened + 1,
            node.free + (capacity - size) as u128,
            suffix[node.next + 1],
            capacity,
        );
        if new_bin_bound < best.len() {
            frontier.push(node.open_bin(size, capacity));
        } else {
            statistics.nodes_pruned += 1;
        }

        // Bins with equal loads lead to identical subtrees; keep the first.
        let mut seen_loads: FnvHashSet<usize> = FnvHashSet::default();
        let mut children: SmallVec<[SearchNode; 8]> = SmallVec::new();
        for (bin, &load) in node.loads.iter().enumerate() {
            if size <= capacity - load && seen_loads.insert(load) {
                children.push(node.place(bin, size));
            }
        }
        frontier.extend(children.into_iter().rev());
    }

    statistics.elapsed = budget.elapsed();

    Ok(ExactOutcome {
        partition: best,
        status,
        statistics,
    })
}
