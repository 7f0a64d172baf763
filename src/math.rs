use std::collections::BTreeSet;

/// A set that remembers the order in which its elements were inserted. Used wherever
/// the order of declaration in a definition should survive, e.g. when writing it back out.
/// Hashing goes through `fxhash`, as the keys are short labels.
pub type IndexedSet<S> = indexmap::IndexSet<S, fxhash::FxBuildHasher>;
/// A map that remembers the order in which its keys were inserted, see [`IndexedSet`].
pub type IndexedMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;

/// A set whose iteration order is given by the ordering on its elements.
pub type OrderedSet<S> = BTreeSet<S>;
