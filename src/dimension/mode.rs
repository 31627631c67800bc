//! # Index modes
//!
//! A [`Mode`] says how a dimension's index is to be read: whether it carries
//! coordinates at all, whether those are discrete labels or physical samples,
//! how they are ordered, how they are spaced and whether each value marks a
//! point or an interval.
//!
//! ## Order bookkeeping
//!
//! An [`Order::Ordered`] triple records three directions:
//!
//! - `index`: the direction of the index in its own coordinate space,
//! - `array`: the direction of payload storage relative to that index,
//! - `relation`: whether the two agree.
//!
//! `relation` is `Forward` exactly when `index == array`. Because the index is
//! always stored aligned with the payload, `relation` is also the direction of
//! the stored coordinate sequence: increasing when `Forward`, decreasing when
//! `Reverse`. A `Regular` step carries the same sign.
//!
//! Flipping any one component flips exactly one other:
//!
//! | target       | flips                |
//! |--------------|----------------------|
//! | `IndexOrder` | index, relation      |
//! | `ArrayOrder` | array, relation      |
//! | `Relation`   | relation, array      |
//!
//! ```rust
//! use dimarray::{Direction, Order, OrderTarget};
//!
//! let order = Order::forward().flip(OrderTarget::IndexOrder);
//! assert_eq!(order.index_order(), Some(Direction::Reverse));
//! assert_eq!(order.relation(), Some(Direction::Reverse));
//! assert!(order.is_consistent());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    pub fn flip(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    pub fn is_forward(self) -> bool {
        self == Direction::Forward
    }

    /// `Forward` when both directions agree.
    pub fn relative_to(self, other: Direction) -> Direction {
        if self == other {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }
}

/// Which component of an [`Order`] a reversal targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderTarget {
    IndexOrder,
    ArrayOrder,
    Relation,
}

impl fmt::Display for OrderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderTarget::IndexOrder => write!(f, "IndexOrder"),
            OrderTarget::ArrayOrder => write!(f, "ArrayOrder"),
            OrderTarget::Relation => write!(f, "Relation"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Order {
    Ordered {
        index: Direction,
        array: Direction,
        relation: Direction,
    },
    Unordered,
}

impl Order {
    /// Builds an ordered triple, deriving the relation.
    pub fn ordered(index: Direction, array: Direction) -> Self {
        Order::Ordered {
            index,
            array,
            relation: index.relative_to(array),
        }
    }

    pub fn forward() -> Self {
        Order::ordered(Direction::Forward, Direction::Forward)
    }

    /// Order of an index that decreases along a forward-stored array.
    pub fn reverse_index() -> Self {
        Order::ordered(Direction::Reverse, Direction::Forward)
    }

    /// Order whose stored sequence runs in `stored`, keeping `array` as is.
    pub fn with_stored_direction(array: Direction, stored: Direction) -> Self {
        let index = if stored.is_forward() { array } else { array.flip() };
        Order::Ordered {
            index,
            array,
            relation: stored,
        }
    }

    pub fn is_ordered(&self) -> bool {
        matches!(self, Order::Ordered { .. })
    }

    pub fn index_order(&self) -> Option<Direction> {
        match self {
            Order::Ordered { index, .. } => Some(*index),
            Order::Unordered => None,
        }
    }

    pub fn array_order(&self) -> Option<Direction> {
        match self {
            Order::Ordered { array, .. } => Some(*array),
            Order::Unordered => None,
        }
    }

    pub fn relation(&self) -> Option<Direction> {
        match self {
            Order::Ordered { relation, .. } => Some(*relation),
            Order::Unordered => None,
        }
    }

    /// Direction of the stored coordinate sequence.
    pub fn stored_direction(&self) -> Option<Direction> {
        self.relation()
    }

    pub fn component(&self, target: OrderTarget) -> Option<Direction> {
        match target {
            OrderTarget::IndexOrder => self.index_order(),
            OrderTarget::ArrayOrder => self.array_order(),
            OrderTarget::Relation => self.relation(),
        }
    }

    pub fn is_consistent(&self) -> bool {
        match self {
            Order::Ordered {
                index,
                array,
                relation,
            } => index.relative_to(*array) == *relation,
            Order::Unordered => true,
        }
    }

    /// Flips `target` and the one other component that keeps the triple
    /// consistent. `Unordered` is returned unchanged.
    pub fn flip(self, target: OrderTarget) -> Self {
        match self {
            Order::Ordered {
                index,
                array,
                relation,
            } => match target {
                OrderTarget::IndexOrder => Order::Ordered {
                    index: index.flip(),
                    array,
                    relation: relation.flip(),
                },
                OrderTarget::ArrayOrder | OrderTarget::Relation => Order::Ordered {
                    index,
                    array: array.flip(),
                    relation: relation.flip(),
                },
            },
            Order::Unordered => Order::Unordered,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Ordered {
                index,
                array,
                relation,
            } => write!(f, "Ordered({:?}, {:?}, {:?})", index, array, relation),
            Order::Unordered => write!(f, "Unordered"),
        }
    }
}

/// Anchor of an index value inside the interval it stands for.
///
/// `Start` marks the lower edge in coordinate space, `End` the upper edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locus {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sampling {
    Points,
    Intervals(Locus),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Span {
    /// Constant step, signed like the stored sequence.
    Regular(f64),
    /// Explicit `(min, max)` extent.
    Irregular(f64, f64),
}

impl Span {
    pub fn step(&self) -> Option<f64> {
        match self {
            Span::Regular(step) => Some(*step),
            Span::Irregular(_, _) => None,
        }
    }

    pub fn is_regular(&self) -> bool {
        matches!(self, Span::Regular(_))
    }

    /// Span of the same index stored in the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Span::Regular(step) => Span::Regular(-step),
            irregular => irregular,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Span::Regular(step) => write!(f, "Regular({})", step),
            Span::Irregular(min, max) => write!(f, "Irregular({}, {})", min, max),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Mode {
    /// Positions only; selectors are rejected.
    NoIndex,
    /// Discrete labels (or values) selected by equality or order.
    Categorical { order: Order },
    /// Samples of a continuous coordinate.
    Sampled {
        order: Order,
        span: Span,
        sampling: Sampling,
    },
    /// Placeholder resolved from the index when the array is built.
    Auto { order: Option<Order> },
}

impl Mode {
    pub fn sampled(order: Order, span: Span, sampling: Sampling) -> Self {
        Mode::Sampled {
            order,
            span,
            sampling,
        }
    }

    pub fn categorical(order: Order) -> Self {
        Mode::Categorical { order }
    }

    pub fn auto() -> Self {
        Mode::Auto { order: None }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Mode::Auto { .. })
    }

    pub fn order(&self) -> Option<Order> {
        match self {
            Mode::Categorical { order } | Mode::Sampled { order, .. } => Some(*order),
            Mode::Auto { order } => *order,
            Mode::NoIndex => None,
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.order().is_some_and(|order| order.is_ordered())
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Mode::Sampled { span, .. } => Some(*span),
            _ => None,
        }
    }

    pub fn sampling(&self) -> Option<Sampling> {
        match self {
            Mode::Sampled { sampling, .. } => Some(*sampling),
            _ => None,
        }
    }

    /// Mode after the stored index is reversed for `target`.
    pub fn reversed(self, target: OrderTarget) -> Self {
        match self {
            Mode::Sampled {
                order,
                span,
                sampling,
            } => Mode::Sampled {
                order: order.flip(target),
                span: span.reversed(),
                sampling,
            },
            Mode::Categorical { order } => Mode::Categorical {
                order: order.flip(target),
            },
            Mode::Auto { order } => Mode::Auto {
                order: order.map(|order| order.flip(target)),
            },
            Mode::NoIndex => Mode::NoIndex,
        }
    }

    /// Short name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Mode::NoIndex => "NoIndex",
            Mode::Categorical { order } if order.is_ordered() => "ordered Categorical",
            Mode::Categorical { .. } => "unordered Categorical",
            Mode::Sampled { order, .. } if order.is_ordered() => "ordered Sampled",
            Mode::Sampled { .. } => "unordered Sampled",
            Mode::Auto { .. } => "Auto",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::NoIndex => write!(f, "NoIndex"),
            Mode::Categorical { order } => write!(f, "Categorical({})", order),
            Mode::Sampled {
                order,
                span,
                sampling,
            } => write!(f, "Sampled({}, {}, {:?})", order, span, sampling),
            Mode::Auto { .. } => write!(f, "Auto"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use Direction::{Forward, Reverse};

    #[test]
    fn test_ordered_derives_relation() {
        assert_eq!(Order::ordered(Forward, Forward).relation(), Some(Forward));
        assert_eq!(Order::ordered(Reverse, Forward).relation(), Some(Reverse));
        assert_eq!(Order::ordered(Reverse, Reverse).relation(), Some(Forward));
    }

    #[test]
    fn test_flip_keeps_relation_consistent() {
        let targets = [
            OrderTarget::IndexOrder,
            OrderTarget::ArrayOrder,
            OrderTarget::Relation,
        ];
        for index in [Forward, Reverse] {
            for array in [Forward, Reverse] {
                for target in targets {
                    let flipped = Order::ordered(index, array).flip(target);
                    assert!(flipped.is_consistent(), "{:?} via {:?}", flipped, target);
                    assert_ne!(
                        flipped.component(target),
                        Order::ordered(index, array).component(target)
                    );
                }
            }
        }
    }

    #[test]
    fn test_flip_keeps_index_for_relation() {
        let order = Order::forward().flip(OrderTarget::Relation);
        assert_eq!(order.index_order(), Some(Forward));
        assert_eq!(order.array_order(), Some(Reverse));
        assert_eq!(order.relation(), Some(Reverse));
    }

    #[test]
    fn test_flip_is_an_involution() {
        let order = Order::reverse_index();
        assert_eq!(
            order
                .flip(OrderTarget::ArrayOrder)
                .flip(OrderTarget::ArrayOrder),
            order
        );
    }

    #[test]
    fn test_with_stored_direction() {
        let order = Order::with_stored_direction(Forward, Reverse);
        assert_eq!(order, Order::reverse_index());
        let order = Order::with_stored_direction(Reverse, Forward);
        assert_eq!(order, Order::ordered(Reverse, Reverse));
    }

    #[test]
    fn test_unordered_flip_is_noop() {
        assert_eq!(Order::Unordered.flip(OrderTarget::IndexOrder), Order::Unordered);
    }

    #[test]
    fn test_reversed_mode_negates_regular_step() {
        let mode = Mode::sampled(Order::forward(), Span::Regular(10.0), Sampling::Points);
        let reversed = mode.reversed(OrderTarget::IndexOrder);
        assert_eq!(reversed.span(), Some(Span::Regular(-10.0)));
        assert_eq!(reversed.order(), Some(Order::reverse_index()));
    }
}
