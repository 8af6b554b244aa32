//! Cube state store: the flat collection of cubelets at rest.
//!
//! Cubelets live in fixed slots indexed by [`CubeletId`]. A slot is empty
//! while its cubelet is owned by a pivot group, so no cubelet can ever be
//! held by two containers at once.

use rustc_hash::FxHashMap;

use crate::cubelet::{Cubelet, CubeletId};
use crate::geometry::Coord;

/// Cells per axis.
pub const DIM: usize = 3;

/// Total number of cubelets.
pub const CUBELET_COUNT: usize = DIM * DIM * DIM;

/// Converts a slot index to its centered lattice coordinate.
///
/// Index order is x-major: `idx = (x + 1) * 9 + (y + 1) * 3 + (z + 1)`.
#[inline]
pub const fn idx_to_coord(index: usize) -> Coord {
    (
        (index / (DIM * DIM)) as i32 - 1,
        ((index / DIM) % DIM) as i32 - 1,
        (index % DIM) as i32 - 1,
    )
}

/// Converts a centered lattice coordinate to its slot index.
#[inline]
pub const fn coord_to_idx((x, y, z): Coord) -> usize {
    (x + 1) as usize * DIM * DIM + (y + 1) as usize * DIM + (z + 1) as usize
}

#[derive(Debug, Clone)]
pub struct CubeStore {
    slots: Vec<Option<Cubelet>>,
}

impl Default for CubeStore {
    fn default() -> Self {
        Self::initialize()
    }
}

impl CubeStore {
    /// Creates the 27 cubelets in their solved slots.
    pub fn initialize() -> Self {
        let slots = (0..CUBELET_COUNT)
            .map(|index| Some(Cubelet::new(CubeletId(index), idx_to_coord(index))))
            .collect();
        Self { slots }
    }

    /// Cubelets currently held by the store, in id order.
    pub fn all(&self) -> impl Iterator<Item = &Cubelet> + '_ {
        self.slots.iter().flatten()
    }

    /// Number of cubelets currently held by the store.
    pub fn len(&self) -> usize {
        self.all().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The cubelet with `id`, or `None` while a pivot holds it.
    pub fn get(&self, id: CubeletId) -> Option<&Cubelet> {
        self.slots.get(id.0)?.as_ref()
    }

    /// Removes and returns every cubelet matching `predicate`.
    ///
    /// The extracted cubelets are moved out untouched; their transforms are
    /// exactly what they were in the store.
    pub fn extract(&mut self, mut predicate: impl FnMut(&Cubelet) -> bool) -> Vec<Cubelet> {
        let mut extracted = Vec::new();
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(|cubelet| predicate(cubelet)) {
                extracted.extend(slot.take());
            }
        }
        extracted
    }

    /// Puts previously extracted cubelets back into their slots.
    ///
    /// # Panics
    ///
    /// Panics if any cubelet is already present in the store.
    pub fn reclaim(&mut self, members: impl IntoIterator<Item = Cubelet>) {
        for cubelet in members {
            let id = cubelet.id();
            let slot = &mut self.slots[id.0];
            assert!(
                slot.is_none(),
                "cubelet {id} reclaimed while already present in the store"
            );
            *slot = Some(cubelet);
        }
    }

    /// Maps each occupied lattice position to the cubelet resting there.
    ///
    /// # Panics
    ///
    /// Panics if two cubelets share a lattice position.
    pub fn lattice_map(&self) -> FxHashMap<Coord, &Cubelet> {
        let mut map = FxHashMap::default();
        for cubelet in self.all() {
            if let Some(other) = map.insert(cubelet.lattice(), cubelet) {
                panic!(
                    "cubelets {} and {} share lattice position {:?}",
                    other.id(),
                    cubelet.id(),
                    cubelet.lattice()
                );
            }
        }
        map
    }

    /// Checks the at-rest invariant: all 27 cubelets present, one per lattice slot.
    ///
    /// # Panics
    ///
    /// Panics if a cubelet is missing, duplicated, or outside the lattice.
    pub fn assert_lattice_complete(&self) {
        let map = self.lattice_map();
        assert_eq!(map.len(), CUBELET_COUNT, "store is missing cubelets");
        for index in 0..CUBELET_COUNT {
            let coord = idx_to_coord(index);
            assert!(map.contains_key(&coord), "no cubelet at lattice position {coord:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_conversion_roundtrip() {
        for index in 0..CUBELET_COUNT {
            let (x, y, z) = idx_to_coord(index);
            assert!(
                (-1..=1).contains(&x) && (-1..=1).contains(&y) && (-1..=1).contains(&z),
                "idx_to_coord({index}) produced out-of-range ({x},{y},{z})"
            );
            assert_eq!(coord_to_idx((x, y, z)), index, "Roundtrip failed for index {index}");
        }
    }

    #[test]
    fn test_initialize_covers_lattice() {
        let store = CubeStore::initialize();
        assert_eq!(store.len(), CUBELET_COUNT);
        store.assert_lattice_complete();
        for cubelet in store.all() {
            assert_eq!(coord_to_idx(cubelet.lattice()), cubelet.id().0);
        }
    }

    #[test]
    fn test_extract_moves_cubelets_out_unchanged() {
        let mut store = CubeStore::initialize();
        let before: Vec<_> = store.all().map(|c| (c.id(), *c.transform())).collect();

        let extracted = store.extract(|c| c.lattice().1 == 1);
        assert_eq!(extracted.len(), 9);
        assert_eq!(store.len(), CUBELET_COUNT - 9);
        for cubelet in &extracted {
            assert!(store.get(cubelet.id()).is_none());
            let (_, transform) = before[cubelet.id().0];
            assert_eq!(*cubelet.transform(), transform);
        }

        store.reclaim(extracted);
        store.assert_lattice_complete();
    }

    #[test]
    fn test_extract_nothing() {
        let mut store = CubeStore::initialize();
        assert!(store.extract(|_| false).is_empty());
        assert_eq!(store.len(), CUBELET_COUNT);
    }

    #[test]
    #[should_panic(expected = "already present")]
    fn test_reclaim_present_cubelet_panics() {
        let mut store = CubeStore::initialize();
        let duplicate = store.get(CubeletId(4)).cloned();
        store.reclaim(duplicate);
    }

    #[test]
    #[should_panic(expected = "missing")]
    fn test_incomplete_store_fails_lattice_check() {
        let mut store = CubeStore::initialize();
        let _held = store.extract(|c| c.lattice().0 == -1);
        store.assert_lattice_complete();
    }
}
