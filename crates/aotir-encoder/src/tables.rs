//! Append-only deduplicating symbol tables.
//!
//! A table maps a structural key to the index it was first registered at.
//! Entries are never removed or reordered, so an index handed out once stays
//! valid until the table is flushed.

use std::hash::Hash;

use aotir_core::{ConstantData, GlobalId, Program, TypeId, Types};
use indexmap::IndexSet;

/// Insertion-ordered set of keys, indexed from zero.
#[derive(Debug, Clone)]
pub struct Table<K> {
    entries: IndexSet<K>,
}

/// Constants referenced by the program, keyed on their shape.
pub type ConstantTable = Table<ConstantData>;
/// Global variables referenced by the program.
pub type GlobalTable = Table<GlobalId>;
/// Types referenced by the program or by other types.
pub type TypeTable = Table<TypeId>;

impl<K: Hash + Eq + Clone> Table<K> {
    pub fn new() -> Self {
        Self {
            entries: IndexSet::new(),
        }
    }

    /// Index of `key`, registering it if unseen.
    pub fn index_of(&mut self, key: &K) -> usize {
        self.insert(key).0
    }

    /// Register `key`. Returns its index and whether it was new.
    pub fn insert(&mut self, key: &K) -> (usize, bool) {
        if let Some(index) = self.entries.get_index_of(key) {
            return (index, false);
        }
        self.entries.insert_full(key.clone())
    }

    /// Index of `key` without registering it.
    pub fn position(&self, key: &K) -> Option<usize> {
        self.entries.get_index_of(key)
    }

    pub fn get(&self, index: usize) -> Option<&K> {
        self.entries.get_index(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.entries.iter()
    }
}

impl<K: Hash + Eq + Clone> Default for Table<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl Table<TypeId> {
    /// Index of `ty`, registering it and then every type it contains.
    ///
    /// A type gets its index before its subtypes, so subtype indices may be
    /// larger than the index of the type containing them.
    pub fn register(&mut self, types: &Types, ty: TypeId) -> usize {
        let (index, fresh) = self.insert(&ty);
        if fresh {
            for sub in types.subtypes(ty) {
                self.register(types, sub);
            }
        }
        index
    }
}

impl Table<GlobalId> {
    /// Index of `global`, registering its initializer (if any) the first time
    /// the global is seen.
    pub fn register(
        &mut self,
        program: &Program,
        constants: &mut ConstantTable,
        global: GlobalId,
    ) -> usize {
        let (index, fresh) = self.insert(&global);
        if fresh {
            if let Some(init) = program.global(global).initializer {
                constants.index_of(program.constant(init));
            }
        }
        index
    }
}
