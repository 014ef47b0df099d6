//! Locations of values inside the function being encoded.

use std::collections::HashMap;

use aotir_core::InstId;

/// Binary coordinates of a value-producing instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstrLoc {
    pub block: usize,
    /// Position among the emitted instructions of the block.
    pub inst: usize,
}

impl InstrLoc {
    pub fn new(block: usize, inst: usize) -> Self {
        Self { block, inst }
    }
}

/// Maps instructions of one function to their [`InstrLoc`].
///
/// Only instructions that produce a value are recorded. A map lives for the
/// encoding of one function.
#[derive(Debug, Default)]
pub struct ValueLocationMap {
    locs: HashMap<InstId, InstrLoc>,
}

impl ValueLocationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where `inst` was emitted. Instructions whose result type is
    /// void are not recorded.
    pub fn record(&mut self, inst: InstId, produces_value: bool, loc: InstrLoc) {
        if produces_value {
            self.locs.insert(inst, loc);
        }
    }

    pub fn lookup(&self, inst: InstId) -> Option<InstrLoc> {
        self.locs.get(&inst).copied()
    }

    pub fn len(&self) -> usize {
        self.locs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn void_instructions_are_not_recorded() {
        let mut map = ValueLocationMap::new();
        let store = InstId::from_raw(0);
        let load = InstId::from_raw(1);

        map.record(store, false, InstrLoc::new(0, 0));
        map.record(load, true, InstrLoc::new(0, 1));

        assert_eq!(map.lookup(store), None);
        assert_eq!(map.lookup(load), Some(InstrLoc::new(0, 1)));
        assert_eq!(map.len(), 1);
    }
}
