//! Anchor position sources for cable endpoints.

use crate::vec::Vec;

/// Something a cable end can be attached to.
///
/// Queried once per tick; the cable end snaps to the returned position with
/// no smoothing, so anchors may move arbitrarily between ticks.
pub trait AnchorSource<V: Vec> {
    fn anchor_position(&self) -> V;
}

/// An anchor fixed in space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StaticAnchor<V: Vec>(pub V);

impl<V: Vec> AnchorSource<V> for StaticAnchor<V> {
    fn anchor_position(&self) -> V {
        self.0
    }
}

/// An anchor whose position comes from a closure, typically reading a body
/// owned elsewhere.
pub struct FnAnchor<F>(pub F);

impl<V: Vec, F: Fn() -> V> AnchorSource<V> for FnAnchor<F> {
    fn anchor_position(&self) -> V {
        (self.0)()
    }
}

impl<V: Vec, T: AnchorSource<V> + ?Sized> AnchorSource<V> for &T {
    fn anchor_position(&self) -> V {
        (**self).anchor_position()
    }
}
