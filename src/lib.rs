//! bin-packer-1d packs integer-sized items into the fewest bins of a fixed
//! capacity. It offers two greedy heuristics (First-Fit-Decreasing and
//! Best-Fit-Decreasing), an exhaustive solver for small inputs, and an exact
//! branch-and-bound solver that proves the minimal bin count.

#![deny(missing_docs)]

mod basic;
mod bounds;
mod exact;
mod exhaustive;
mod heuristic;
mod limits;


use basic::BasicBin;
use thiserror::Error;

pub use bounds::lower_bound;
pub use exact::{ExactOutcome, SearchStatistics, SearchStatus};
pub use exhaustive::DEFAULT_MAX_EXHAUSTIVE_ITEMS;
pub use limits::{AbortReason, CancelToken, SearchLimits};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Error while packing. Every error is detected before any packing work starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No items were given.
    #[error("no items to pack")]
    EmptyInput,

    /// An item is larger than the bin capacity, so no bin can ever hold it.
    #[error("item {index} of size {size} does not fit in a bin of capacity {capacity}")]
    UnplaceableItem {
        /// Position of the item in the input.
        index: usize,
        /// Size of the item.
        size: usize,
        /// Bin capacity it was checked against.
        capacity: usize,
    },

    /// An item has size zero.
    #[error("item {index} has size zero")]
    NonPositiveItem {
        /// Position of the item in the input.
        index: usize,
    },

    /// The bin capacity is zero.
    #[error("bin capacity must be positive")]
    NonPositiveCapacity,

    /// Too many items for the exhaustive solver to enumerate.
    #[error("{len} items is too many for exhaustive packing (at most {max})")]
    InputTooLarge {
        /// Number of items given.
        len: usize,
        /// Largest number of items accepted.
        max: usize,
    },
}

type Result<T> = std::result::Result<T, Error>;

/// Items assigned to bins. Every input item appears in exactly one bin and no
/// bin's load exceeds the capacity.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    capacity: usize,
    bins: Vec<Vec<usize>>,
}

impl Partition {
    pub(crate) fn new(capacity: usize, bins: Vec<Vec<usize>>) -> Self {
        Self { capacity, bins }
    }

    pub(crate) fn from_bins(capacity: usize, bins: Vec<BasicBin>) -> Self {
        Self::new(capacity, bins.into_iter().map(Into::into).collect())
    }

    /// Capacity shared by all bins.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of bins used.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Returns `true` if no bins are used.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Item sizes in each bin, in bin order.
    pub fn bins(&self) -> &[Vec<usize>] {
        &self.bins
    }

    /// Sum of item sizes in each bin, in bin order.
    pub fn loads(&self) -> impl Iterator<Item = usize> + '_ {
        self.bins
            .iter()
            .map(|bin| bin.iter().fold(0, |acc: usize, &size| acc.saturating_add(size)))
    }

    /// Unused capacity summed over all bins. Overfull bins count as no waste.
    pub fn waste(&self) -> usize {
        self.loads()
            .map(|load| self.capacity.saturating_sub(load))
            .fold(0, usize::saturating_add)
    }

    /// Consumes the partition, returning the item sizes in each bin.
    pub fn into_bins(self) -> Vec<Vec<usize>> {
        self.bins
    }
}

/// Packing algorithm to run.
#[cfg_attr(feature = "serialize", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Try every ordering of the items with first fit. Only for small inputs.
    Exhaustive,

    /// Largest item first, into the first bin with room.
    FirstFitDecreasing,

    /// Largest item first, into the fullest bin with room.
    BestFitDecreasing,

    /// Branch-and-bound search for the minimum number of bins.
    Exact,
}

/// Packs items into bins of one capacity.
pub struct Packer {
    items: Vec<usize>,
    capacity: usize,
    max_exhaustive_items: usize,
    search_limits: SearchLimits,
}

impl Default for Packer {
    fn default() -> Self {
        Self {
            items: Default::default(),
            capacity: Default::default(),
            max_exhaustive_items: DEFAULT_MAX_EXHAUSTIVE_ITEMS,
            search_limits: Default::default(),
        }
    }
}

impl Packer {
    /// Create a new packer.
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the capacity of every bin.
    pub fn set_capacity(&mut self, capacity: usize) -> &mut Self {
        self.capacity = capacity;
        self
    }

    /// Add an item that needs to be packed.
    pub fn add_item(&mut self, size: usize) -> &mut Self {
        self.items.push(size);
        self
    }

    /// Add items that need to be packed.
    pub fn add_items<I>(&mut self, sizes: I) -> &mut Self
    where
        I: IntoIterator<Item = usize>,
    {
        self.items.extend(sizes);
        self
    }

    /// Set the largest number of items the exhaustive solver will accept. Its
    /// running time grows with the factorial of the item count.
    pub fn set_max_exhaustive_items(&mut self, max_items: usize) -> &mut Self {
        self.max_exhaustive_items = max_items;
        self
    }

    /// Set the node, time and cancellation limits of the exact solver.
    pub fn set_search_limits(&mut self, limits: SearchLimits) -> &mut Self {
        self.search_limits = limits;
        self
    }

    /// Pack using the given strategy. For `Strategy::Exact` the search limits
    /// apply and an aborted search still returns its best packing.
    pub fn pack(&self, strategy: Strategy) -> Result<Partition> {
        match strategy {
            Strategy::Exhaustive => self.exhaustive(),
            Strategy::FirstFitDecreasing => self.first_fit_decreasing(),
            Strategy::BestFitDecreasing => self.best_fit_decreasing(),
            Strategy::Exact => self.exact().map(ExactOutcome::into_partition),
        }
    }

    /// Pack with the exhaustive solver.
    pub fn exhaustive(&self) -> Result<Partition> {
        exhaustive::exhaustive(&self.items, self.capacity, self.max_exhaustive_items)
    }

    /// Pack with First-Fit-Decreasing.
    pub fn first_fit_decreasing(&self) -> Result<Partition> {
        heuristic::first_fit_decreasing(&self.items, self.capacity)
    }

    /// Pack with Best-Fit-Decreasing.
    pub fn best_fit_decreasing(&self) -> Result<Partition> {
        heuristic::best_fit_decreasing(&self.items, self.capacity)
    }

    /// Search for a packing with the minimum number of bins, within the
    /// configured search limits.
    pub fn exact(&self) -> Result<ExactOutcome> {
        exact::branch_and_bound(&self.items, self.capacity, &self.search_limits)
    }
}

/// Pack every ordering of `items` with first fit and return the packing with
/// the fewest bins. Fails with `Error::InputTooLarge` for more than
/// `DEFAULT_MAX_EXHAUSTIVE_ITEMS` items.
pub fn exhaustive_pack(items: &[usize], capacity: usize) -> Result<Partition> {
    exhaustive::exhaustive(items, capacity, DEFAULT_MAX_EXHAUSTIVE_ITEMS)
}

/// Pack `items` with First-Fit-Decreasing.
pub fn ffd_pack(items: &[usize], capacity: usize) -> Result<Partition> {
    heuristic::first_fit_decreasing(items, capacity)
}

/// Pack `items` with Best-Fit-Decreasing.
pub fn bfd_pack(items: &[usize], capacity: usize) -> Result<Partition> {
    heuristic::best_fit_decreasing(items, capacity)
}

/// Minimum number of bins of `capacity` that can hold `items`.
pub fn exact_min_bins(items: &[usize], capacity: usize) -> Result<usize> {
    exact_pack(items, capacity).map(|outcome| outcome.bin_count())
}

/// Packing of `items` into the minimum number of bins, without search limits.
pub fn exact_pack(items: &[usize], capacity: usize) -> Result<ExactOutcome> {
    exact::branch_and_bound(items, capacity, &SearchLimits::default())
}
