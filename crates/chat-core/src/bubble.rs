//! Bubble shaping — per-corner rounding that joins the fragments of one
//! message into a single blob.
//!
//! Corners are computed in logical terms ("outer" = away from the avatar,
//! "inner" = the avatar/tail side) and mapped onto physical corners by
//! sender: assistant avatars sit on the left, the user's side is the right.

use chat_types::message::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerSize {
    /// Fully rounded
    Large,
    /// Near-square continuation joint
    Small,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Side of the conversation the sender's bubbles hang from
    pub fn of(sender: Role) -> Self {
        match sender {
            Role::User => Side::Right,
            Role::Assistant => Side::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BubbleCorners {
    pub top_outer: CornerSize,
    pub top_inner: CornerSize,
    pub bottom_inner: CornerSize,
    pub bottom_outer: CornerSize,
    /// Physical side holding the two inner corners
    pub inner_side: Side,
}

/// Physical corner assignment, clockwise from top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalCorners {
    pub nw: CornerSize,
    pub ne: CornerSize,
    pub se: CornerSize,
    pub sw: CornerSize,
}

impl BubbleCorners {
    pub fn to_physical(&self) -> PhysicalCorners {
        match self.inner_side {
            Side::Left => PhysicalCorners {
                nw: self.top_inner,
                ne: self.top_outer,
                se: self.bottom_outer,
                sw: self.bottom_inner,
            },
            Side::Right => PhysicalCorners {
                nw: self.top_outer,
                ne: self.top_inner,
                se: self.bottom_inner,
                sw: self.bottom_outer,
            },
        }
    }
}

/// Corner sizes for fragment `index` of a message split into `count`
/// fragments.
pub fn shape(index: usize, count: usize, sender: Role) -> BubbleCorners {
    let is_first = index == 0;
    let is_last = index + 1 >= count;
    let inner = |rounded: bool| if rounded { CornerSize::Large } else { CornerSize::Small };

    BubbleCorners {
        top_outer: CornerSize::Large,
        top_inner: inner(is_first),
        bottom_inner: inner(is_last),
        bottom_outer: CornerSize::Large,
        inner_side: Side::of(sender),
    }
}
