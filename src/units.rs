use derive_more::{Add, AddAssign, Display, From, Into, Sub};
use std::ops::{Div, Mul, Neg};

/// A distance in whole pixels. All layout maths in the crate happens in `Px`
/// so that pixel budgets, measured text widths, and raster coordinates can't
/// be mixed up with bare integers. Values may be negative: placements above
/// or left of the canvas origin are clipped at draw time.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Add, AddAssign, Sub, Display, From,
    Into,
)]
pub struct Px(pub i32);

impl Px {
    pub const ZERO: Px = Px(0);

    /// Convert a raster dimension (always unsigned) into a distance
    pub fn from_u32(value: u32) -> Px {
        Px(value as i32)
    }
}

impl Mul<i32> for Px {
    type Output = Px;

    fn mul(self, rhs: i32) -> Px {
        Px(self.0 * rhs)
    }
}

impl Div<i32> for Px {
    type Output = Px;

    fn div(self, rhs: i32) -> Px {
        Px(self.0 / rhs)
    }
}

impl Neg for Px {
    type Output = Px;

    fn neg(self) -> Px {
        Px(-self.0)
    }
}
