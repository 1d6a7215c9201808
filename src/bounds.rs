use crate::{Error, Result};

/// Checks the inputs shared by every packer: a positive capacity, at least one
/// item, and no item larger than the capacity.
pub(crate) fn validate(items: &[usize], capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(Error::NonPositiveCapacity);
    }

    if items.is_empty() {
        return Err(Error::EmptyInput);
    }

    match items.iter().position(|&size| size == 0 || size > capacity) {
        Some(index) if items[index] == 0 => Err(Error::NonPositiveItem { index }),
        Some(index) => Err(Error::UnplaceableItem {
            index,
            size: items[index],
            capacity,
        }),
        None => Ok(()),
    }
}

pub(crate) fn ceil_div(numerator: u128, denominator: u128) -> u128 {
    numerator / denominator + u128::from(numerator % denominator != 0)
}

/// Total size of `items`. Widened so that sums of sizes near `usize::MAX`
/// can't overflow.
pub(crate) fn total_size(items: &[usize]) -> u128 {
    items.iter().map(|&size| size as u128).sum()
}

/// Minimum number of bins needed to hold `total` units of size.
pub(crate) fn capacity_bound(total: u128, capacity: usize) -> usize {
    // Validated items never total more than `items.len() * capacity`, so the
    // bound fits back into a `usize`.
    usize::try_from(ceil_div(total, capacity as u128)).unwrap_or(usize::MAX)
}

/// `ceil(sum(items) / capacity)`. Never exceeds the optimal bin count.
pub fn lower_bound(items: &[usize], capacity: usize) -> usize {
    capacity_bound(total_size(items), capacity)
}

/// Items larger than half the capacity can never share a bin with each other.
pub(crate) fn large_item_bound(items: &[usize], capacity: usize) -> usize {
    items
        .iter()
        .filter(|&&size| size > capacity - size)
        .count()
}

/// Lower bound on the final bin count of a partial packing with `opened` bins
/// and `free` unused capacity spread across them, when `remaining` units of
/// size are still unassigned.
pub(crate) fn node_bound(opened: usize, free: u128, remaining: u128, capacity: usize) -> usize {
    opened + capacity_bound(remaining.saturating_sub(free), capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_item_equal_to_capacity() {
        assert!(validate(&[10, 3], 10).is_ok());
    }

    #[test]
    fn validate_reports_first_oversized_item() {
        let result = validate(&[3, 12, 11], 10);
        assert!(
            matches!(
                result,
                Err(Error::UnplaceableItem {
                    index: 1,
                    size: 12,
                    capacity: 10
                })
            ),
            "should have returned Error::UnplaceableItem for the second item"
        );
    }

    #[test]
    fn validate_checks_capacity_before_items() {
        assert!(matches!(validate(&[], 0), Err(Error::NonPositiveCapacity)));
        assert!(matches!(validate(&[], 5), Err(Error::EmptyInput)));
    }

    #[test]
    fn validate_rejects_zero_sized_item() {
        assert!(matches!(
            validate(&[1, 0], 5),
            Err(Error::NonPositiveItem { index: 1 })
        ));
    }

    #[test]
    fn lower_bound_rounds_up() {
        assert_eq!(lower_bound(&[4, 8, 1, 4, 2, 1], 10), 2);
        assert_eq!(lower_bound(&[4, 8, 1, 4, 2, 2], 10), 3);
        assert_eq!(lower_bound(&[10], 10), 1);
    }

    #[test]
    fn large_item_bound_counts_items_over_half() {
        assert_eq!(large_item_bound(&[6, 6, 5, 5, 1], 10), 2);
        assert_eq!(large_item_bound(&[6, 6, 6], 11), 3);
    }

    #[test]
    fn bounds_near_usize_max() {
        let half = usize::MAX / 2 + 1;

        assert_eq!(large_item_bound(&[usize::MAX], usize::MAX), 1);
        assert_eq!(large_item_bound(&[half, half, 1], usize::MAX), 2);

        assert_eq!(lower_bound(&[usize::MAX], usize::MAX), 1);
        assert_eq!(lower_bound(&[half, half], usize::MAX), 2);
        assert_eq!(lower_bound(&[usize::MAX; 3], usize::MAX), 3);
    }

    #[test]
    fn node_bound_uses_free_space_in_open_bins() {
        // Two open bins with 9 free units can absorb the remaining 5 units.
        assert_eq!(node_bound(2, 9, 5, 10), 2);
        // 12 remaining, 9 free: at least one more bin.
        assert_eq!(node_bound(2, 9, 12, 10), 3);
        assert_eq!(node_bound(0, 0, 20, 10), 2);
    }
}
