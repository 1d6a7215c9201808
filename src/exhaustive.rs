//! Baseline packer that tries every ordering of the items.
//!
//! Each ordering is packed with a first-fit scan and the ordering producing the
//! fewest bins wins. Some ordering always reproduces an optimal packing under
//! first fit, so the result is a minimum, but the cost is `O(n! * n * k)`.
//! Inputs larger than the configured maximum are rejected instead of run.

use crate::bounds::{lower_bound, validate};
use crate::heuristic::{pack_in_order, FirstFit};
use crate::{Error, Partition, Result};
use log::trace;

/// Largest input accepted by the exhaustive packer unless configured otherwise.
pub const DEFAULT_MAX_EXHAUSTIVE_ITEMS: usize = 10;

pub(crate) fn exhaustive(items: &[usize], capacity: usize, max_items: usize) -> Result<Partition> {
    validate(items, capacity)?;
    if items.len() > max_items {
        return Err(Error::InputTooLarge {
            len: items.len(),
            max: max_items,
        });
    }

    let target = lower_bound(items, capacity);
    let mut order: Vec<usize> = (0..items.len()).collect();
    let mut best = pack_in_order(&FirstFit, items.iter().copied(), capacity);
    let mut orderings: u64 = 1;

    // Later orderings only replace the best on a strict improvement, so once
    // the lower bound is reached nothing can displace it.
    while best.len() > target && next_permutation(&mut order) {
        orderings += 1;
        let bins = pack_in_order(&FirstFit, order.iter().map(|&i| items[i]), capacity);
        if bins.len() < best.len() {
            trace!(
                "ordering {} packs into {} bins (was {})",
                orderings,
                bins.len(),
                best.len()
            );
            best = bins;
        }
    }

    trace!(
        "exhaustive search tried {} orderings, best uses {} bins",
        orderings,
        best.len()
    );

    Ok(Partition::from_bins(capacity, best))
}

/// Rearranges `order` into the next lexicographically greater permutation.
/// Returns `false`, leaving `order` untouched, if it is already the last one.
fn next_permutation(order: &mut [usize]) -> bool {
    let pivot = match order.windows(2).rposition(|pair| pair[0] < pair[1]) {
        Some(i) => i,
        None => return false,
    };

    // A successor exists because `order[pivot + 1] > order[pivot]`.
    let successor = order
        .iter()
        .rposition(|&x| x > order[pivot])
        .unwrap_or(pivot + 1);
    order.swap(pivot, successor);
    order[pivot + 1..].reverse();
    true
}
