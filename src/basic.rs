use smallvec::SmallVec;

/// A bin being filled by one of the packers.
#[derive(Clone, Debug)]
pub(crate) struct BasicBin {
    capacity: usize,
    load: usize,
    items: SmallVec<[usize; 8]>,
}

impl BasicBin {
    pub(crate) fn new(capacity: usize) -> Self {
        BasicBin {
            capacity,
            load: 0,
            items: Default::default(),
        }
    }

    /// Capacity left in this bin.
    pub(crate) fn remaining(&self) -> usize {
        self.capacity - self.load
    }

    pub(crate) fn fits(&self, size: usize) -> bool {
        size <= self.remaining()
    }

    /// Insert item in bin if it fits. Returns `true` if inserted.
    pub(crate) fn insert_item(&mut self, size: usize) -> bool {
        if self.fits(size) {
            self.items.push(size);
            self.load += size;
            true
        } else {
            false
        }
    }
}

impl From<BasicBin> for Vec<usize> {
    fn from(bin: BasicBin) -> Self {
        bin.items.into_vec()
    }
}
