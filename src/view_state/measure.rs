//! Row height measurement
//!
//! Table rows are laid out as transparent wrappers: their cells are placed straight into the
//! parent grid, so the row itself has no box and a plain box-height query returns zero. The
//! measurement here falls back to the extent of the row's children in that case.
//!
//! Hosts expose their geometry through [`LayoutNode`]. A host with its own notion of geometry
//! can instead implement [`MeasureStrategy`] directly.

/// Geometry queries a host answers for one laid-out node.
pub trait LayoutNode {
    /// Height of the node's own box. Zero (or less) for transparent wrappers.
    fn box_height(&self) -> f64;

    /// Whether the node has any child content.
    fn has_children(&self) -> bool;

    /// Height of the range spanning the node's first child to its last child.
    fn children_range_height(&self) -> f64;
}

impl<N: LayoutNode + ?Sized> LayoutNode for &N {
    fn box_height(&self) -> f64 {
        (**self).box_height()
    }

    fn has_children(&self) -> bool {
        (**self).has_children()
    }

    fn children_range_height(&self) -> f64 {
        (**self).children_range_height()
    }
}

/// Capability interface: "how tall is this element".
pub trait MeasureStrategy {
    /// The element type this strategy measures.
    type Element: ?Sized;

    /// Rendered height of `element`. Never negative.
    fn measure(&self, element: &Self::Element) -> f64;
}

/// Default strategy: box height, falling back to the children's range when the box is empty.
pub struct TwoTierMeasure<N: ?Sized>(std::marker::PhantomData<fn(&N)>);

impl<N: ?Sized> TwoTierMeasure<N> {
    /// The default strategy.
    pub fn new() -> Self {
        Self(std::marker::PhantomData)
    }
}

impl<N: ?Sized> Default for TwoTierMeasure<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: LayoutNode + ?Sized> MeasureStrategy for TwoTierMeasure<N> {
    type Element = N;

    fn measure(&self, element: &N) -> f64 {
        measure_element_height(Some(element))
    }
}

fn non_negative(px: f64) -> f64 {
    if px.is_nan() || px < 0.0 {
        0.0
    } else {
        px
    }
}

/// True rendered height of a row node.
///
/// `None` stands for a node that was unmounted between scheduling the measurement and
/// running it, and measures as `0.0`. An empty node with no children is also `0.0`.
///
/// # Examples
///
/// ```
/// # use gridwin::view_state::measure::{measure_element_height, LayoutNode};
/// struct Contents(Vec<f64>);
/// impl LayoutNode for Contents {
///     fn box_height(&self) -> f64 { 0.0 }
///     fn has_children(&self) -> bool { !self.0.is_empty() }
///     fn children_range_height(&self) -> f64 { self.0.iter().cloned().fold(0.0, f64::max) }
/// }
/// assert_eq!(measure_element_height(Some(&Contents(vec![18.0, 40.0]))), 40.0);
/// assert_eq!(measure_element_height::<Contents>(None), 0.0);
/// ```
pub fn measure_element_height<N: LayoutNode + ?Sized>(node: Option<&N>) -> f64 {
    let Some(node) = node else {
        return 0.0;
    };

    let height = node.box_height();
    if (height <= 0.0 || height.is_nan()) && node.has_children() {
        return non_negative(node.children_range_height());
    }
    non_negative(height)
}

/// Height of a row plus its expanded sibling row, if it has one.
///
/// Expanded content renders as a separate row right after its parent; both are measured
/// together so the window reserves space for the pair.
pub fn measure_row_height<N: LayoutNode + ?Sized>(row: Option<&N>, expander: Option<&N>) -> f64 {
    let mut total = measure_element_height(row);
    if expander.is_some() {
        total += measure_element_height(expander);
    }
    total
}

/// Largest extent a single row can take. Keeps prefix sums over many rows from overflowing.
pub const MAX_EXTENT: usize = i32::MAX as usize;

/// Convert a measurement into integral host units, rounding up so content is never clipped.
///
/// Saturates at [`MAX_EXTENT`].
pub fn to_extent(px: f64) -> usize {
    let px = non_negative(px);
    if px >= MAX_EXTENT as f64 {
        MAX_EXTENT
    } else {
        px.ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct FakeNode {
        box_height: f64,
        children: Vec<(f64, f64)>,
    }

    impl FakeNode {
        fn boxed(height: f64) -> Self {
            Self {
                box_height: height,
                children: Vec::new(),
            }
        }

        fn contents(children: Vec<(f64, f64)>) -> Self {
            Self {
                box_height: 0.0,
                children,
            }
        }
    }

    impl LayoutNode for FakeNode {
        fn box_height(&self) -> f64 {
            self.box_height
        }

        fn has_children(&self) -> bool {
            !self.children.is_empty()
        }

        // Children are (top, bottom) pairs; the range spans the lowest top to the highest bottom.
        fn children_range_height(&self) -> f64 {
            let top = self.children.iter().map(|c| c.0).fold(f64::INFINITY, f64::min);
            let bottom = self.children.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max);
            bottom - top
        }
    }

    #[test]
    fn positive_box_wins_over_children() {
        let mut node = FakeNode::boxed(52.0);
        node.children = vec![(0.0, 300.0)];
        assert_eq!(measure_element_height(Some(&node)), 52.0);
    }

    #[test]
    fn empty_box_falls_back_to_children_range() {
        let node = FakeNode::contents(vec![(100.0, 130.0), (100.0, 148.5)]);
        assert_eq!(measure_element_height(Some(&node)), 48.5);
    }

    #[test]
    fn no_box_no_children_is_zero() {
        assert_eq!(measure_element_height(Some(&FakeNode::boxed(0.0))), 0.0);
    }

    #[test]
    fn unmounted_is_zero() {
        assert_eq!(measure_element_height::<FakeNode>(None), 0.0);
    }

    #[test]
    fn negative_or_nan_never_escapes() {
        assert_eq!(measure_element_height(Some(&FakeNode::boxed(-3.0))), 0.0);
        assert_eq!(measure_element_height(Some(&FakeNode::boxed(f64::NAN))), 0.0);
        let inverted = FakeNode::contents(vec![(50.0, 10.0)]);
        assert_eq!(measure_element_height(Some(&inverted)), 0.0);
    }

    #[test]
    fn row_with_expander_adds_both() {
        let row = FakeNode::contents(vec![(0.0, 40.0)]);
        let expander = FakeNode::boxed(120.0);
        assert_eq!(measure_row_height(Some(&row), Some(&expander)), 160.0);
        assert_eq!(measure_row_height(Some(&row), None), 40.0);
    }

    #[test]
    fn strategy_matches_free_function() {
        let strategy = TwoTierMeasure::<FakeNode>::new();
        let node = FakeNode::contents(vec![(0.0, 12.0)]);
        assert_eq!(strategy.measure(&node), 12.0);
    }

    #[test]
    fn to_extent_rounds_up() {
        assert_eq!(to_extent(51.2), 52);
        assert_eq!(to_extent(52.0), 52);
        assert_eq!(to_extent(-1.0), 0);
        assert_eq!(to_extent(f64::NAN), 0);
    }

    #[test]
    fn to_extent_saturates() {
        assert_eq!(to_extent(f64::INFINITY), MAX_EXTENT);
        assert_eq!(to_extent(1e300), MAX_EXTENT);
        assert_eq!(to_extent(MAX_EXTENT as f64 - 0.5), MAX_EXTENT);
    }

    proptest! {
        #[test]
        fn prop_positive_box_returned_as_is(h in 0.001f64..10_000.0, child in 0.0f64..10_000.0) {
            let mut node = FakeNode::boxed(h);
            node.children = vec![(0.0, child)];
            prop_assert_eq!(measure_element_height(Some(&node)), h);
        }

        #[test]
        fn prop_contents_height_non_negative(children in prop::collection::vec((0.0f64..500.0, 0.0f64..500.0), 1..8)) {
            let node = FakeNode::contents(children);
            prop_assert!(measure_element_height(Some(&node)) >= 0.0);
        }
    }
}
