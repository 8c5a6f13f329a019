use std::sync::atomic::{AtomicUsize, Ordering};

use bevy_math::DVec2;
use math::Position;


/// Classifies world positions as land or water.
///
/// Implementations must be total:
/// every finite position gets an answer, including positions outside the map.
/// A classifier without any data source should report land.
pub trait Classify {
    /// Returns `true` if `position` is on traversable land.
    fn is_land(&self, position: Position<DVec2>) -> bool;
}

impl<F> Classify for F
where
    F: Fn(Position<DVec2>) -> bool,
{
    fn is_land(&self, position: Position<DVec2>) -> bool { self(position) }
}

/// Reports land everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysLand;

impl Classify for AlwaysLand {
    fn is_land(&self, _: Position<DVec2>) -> bool { true }
}

/// Wraps a classifier and counts how many times it was queried.
#[derive(Debug, Default)]
pub struct Counting<C> {
    inner: C,
    calls: AtomicUsize,
}

impl<C> Counting<C> {
    pub const fn new(inner: C) -> Self { Self { inner, calls: AtomicUsize::new(0) } }

    /// Number of queries so far.
    pub fn calls(&self) -> usize { self.calls.load(Ordering::Relaxed) }

    pub fn reset(&self) { self.calls.store(0, Ordering::Relaxed); }
}

impl<C: Classify> Classify for Counting<C> {
    fn is_land(&self, position: Position<DVec2>) -> bool {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.is_land(position)
    }
}
