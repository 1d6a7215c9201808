//! Greedy packers: First-Fit-Decreasing and Best-Fit-Decreasing.

use crate::basic::BasicBin;
use crate::bounds::validate;
use crate::{Partition, Result};
use std::cmp;

/// Rule deciding which open bin receives the next item.
pub(crate) trait Placement {
    /// Returns the index of the bin that should receive an item of `size`, or
    /// `None` if a new bin must be opened.
    fn choose(&self, bins: &[BasicBin], size: usize) -> Option<usize>;
}

/// First bin, in creation order, with enough room.
pub(crate) struct FirstFit;

impl Placement for FirstFit {
    fn choose(&self, bins: &[BasicBin], size: usize) -> Option<usize> {
        bins.iter().position(|bin| bin.fits(size))
    }
}

/// Fullest bin that still has room. Ties go to the lowest index.
pub(crate) struct BestFit;

impl Placement for BestFit {
    fn choose(&self, bins: &[BasicBin], size: usize) -> Option<usize> {
        bins.iter()
            .enumerate()
            .filter(|(_, bin)| bin.fits(size))
            // `min_by_key` keeps the first of equal minimums.
            .min_by_key(|(_, bin)| bin.remaining() - size)
            .map(|(i, _)| i)
    }
}

/// Packs the items in the given order, opening a new bin whenever `rule`
/// finds no room. Items must already be validated against `capacity`.
pub(crate) fn pack_in_order<P, I>(rule: &P, items: I, capacity: usize) -> Vec<BasicBin>
where
    P: Placement,
    I: IntoIterator<Item = usize>,
{
    let mut bins: Vec<BasicBin> = Vec::new();

    for size in items {
        match rule.choose(&bins, size) {
            Some(i) => {
                let inserted = bins[i].insert_item(size);
                debug_assert!(inserted, "placement chose a bin without room");
            }
            None => {
                let mut bin = BasicBin::new(capacity);
                let inserted = bin.insert_item(size);
                debug_assert!(inserted, "item larger than an empty bin");
                bins.push(bin);
            }
        }
    }

    bins
}

/// Copy of `items` sorted by size descending. Equal sizes keep input order.
pub(crate) fn sorted_descending(items: &[usize]) -> Vec<usize> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|&size| cmp::Reverse(size));
    sorted
}

pub(crate) fn first_fit_decreasing(items: &[usize], capacity: usize) -> Result<Partition> {
    validate(items, capacity)?;
    let bins = pack_in_order(&FirstFit, sorted_descending(items), capacity);
    Ok(Partition::from_bins(capacity, bins))
}

pub(crate) fn best_fit_decreasing(items: &[usize], capacity: usize) -> Result<Partition> {
    validate(items, capacity)?;
    let bins = pack_in_order(&BestFit, sorted_descending(items), capacity);
    Ok(Partition::from_bins(capacity, bins))
}
