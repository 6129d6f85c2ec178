use std::collections::BTreeMap;

/// One key's sides after a full outer join of two keyed maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Joined<A, B> {
    Left(A),
    Right(B),
    Both(A, B),
}

/// Full outer join of two keyed maps. Every key present in either side
/// appears exactly once in the result; the `BTreeMap` keeps keys ordered
/// so iteration is deterministic.
pub fn outer_join<K: Ord, A, B>(
    left: BTreeMap<K, A>,
    mut right: BTreeMap<K, B>,
) -> BTreeMap<K, Joined<A, B>> {
    let mut joined = BTreeMap::new();
    for (key, a) in left {
        match right.remove(&key) {
            Some(b) => joined.insert(key, Joined::Both(a, b)),
            None => joined.insert(key, Joined::Left(a)),
        };
    }
    for (key, b) in right {
        joined.insert(key, Joined::Right(b));
    }
    joined
}
