//=========================================================================
// Grid Index
//=========================================================================
//
// Coordinate value types identifying an element inside a grid topology.
//
// Topologies:
//   Index1D  (x)        lists, carousels
//   Index2D  (x, y)     tile maps, menus
//   Index3D  (x, y, z)  voxel grids
//   KeyIndex (u64)      opaque keys, no arithmetic
//
// Arithmetic topologies expose their components through `axis()` so the
// wraparound algorithm and the delta arithmetic (`offset`, `inverse`) are
// written once for every dimension. Component arithmetic wraps on overflow.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== GridIndex Trait =====================================================

/// Position of an element within a grid topology.
///
/// Equality is structural: two indices are equal iff every component is.
///
/// # Example
///
/// ```
/// use aetheric_grid::prelude::*;
///
/// let here = Index2D::new(4, 0);
/// assert_eq!(here.offset(Index2D::RIGHT), Index2D::new(5, 0));
/// assert_eq!(Index2D::RIGHT.inverse(), Index2D::LEFT);
/// assert_eq!(Index2D::origin(), Index2D::new(0, 0));
/// ```
pub trait GridIndex: Copy + Eq + Hash + Debug + Send + 'static {
    /// Number of arithmetic axes. Zero marks a key-based topology on
    /// which delta movement is rejected.
    const AXES: usize;

    /// The topology's zero index.
    fn origin() -> Self;

    /// Returns component `axis` (0 = x, 1 = y, 2 = z).
    ///
    /// Axes outside `0..AXES` read as zero.
    fn axis(&self, axis: usize) -> i32;

    /// Returns a copy with component `axis` replaced.
    ///
    /// Axes outside `0..AXES` leave the index unchanged.
    fn with_axis(self, axis: usize, value: i32) -> Self;

    /// Component-wise wrapping sum. Identity on key-based topologies.
    fn offset(self, delta: Self) -> Self {
        (0..Self::AXES).fold(self, |acc, axis| {
            acc.with_axis(axis, acc.axis(axis).wrapping_add(delta.axis(axis)))
        })
    }

    /// The opposite direction, component-wise.
    fn inverse(self) -> Self {
        (0..Self::AXES).fold(self, |acc, axis| acc.with_axis(axis, acc.axis(axis).wrapping_neg()))
    }

    /// Unit step of `step` along `axis`, zero elsewhere.
    fn unit(axis: usize, step: i32) -> Self {
        Self::origin().with_axis(axis, step)
    }
}

//=== Index1D =============================================================

/// Position in a one-dimensional list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Index1D(pub i32);

impl Index1D {
    pub const NEXT: Self = Self(1);
    pub const PREVIOUS: Self = Self(-1);

    #[inline]
    pub const fn new(x: i32) -> Self {
        Self(x)
    }
}

impl GridIndex for Index1D {
    const AXES: usize = 1;

    fn origin() -> Self {
        Self(0)
    }

    fn axis(&self, axis: usize) -> i32 {
        match axis {
            0 => self.0,
            _ => 0,
        }
    }

    fn with_axis(self, axis: usize, value: i32) -> Self {
        match axis {
            0 => Self(value),
            _ => self,
        }
    }
}

impl From<i32> for Index1D {
    fn from(x: i32) -> Self {
        Self(x)
    }
}

//=== Index2D =============================================================

/// Position on a two-dimensional tile grid (y grows upward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Index2D {
    pub x: i32,
    pub y: i32,
}

impl Index2D {
    pub const UP: Self = Self::new(0, 1);
    pub const DOWN: Self = Self::new(0, -1);
    pub const LEFT: Self = Self::new(-1, 0);
    pub const RIGHT: Self = Self::new(1, 0);

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl GridIndex for Index2D {
    const AXES: usize = 2;

    fn origin() -> Self {
        Self::new(0, 0)
    }

    fn axis(&self, axis: usize) -> i32 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => 0,
        }
    }

    fn with_axis(self, axis: usize, value: i32) -> Self {
        match axis {
            0 => Self { x: value, ..self },
            1 => Self { y: value, ..self },
            _ => self,
        }
    }
}

impl From<(i32, i32)> for Index2D {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

//=== Index3D =============================================================

/// Position inside a voxel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Index3D {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Index3D {
    pub const UP: Self = Self::new(0, 1, 0);
    pub const DOWN: Self = Self::new(0, -1, 0);
    pub const LEFT: Self = Self::new(-1, 0, 0);
    pub const RIGHT: Self = Self::new(1, 0, 0);
    pub const FORWARD: Self = Self::new(0, 0, 1);
    pub const BACK: Self = Self::new(0, 0, -1);

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl GridIndex for Index3D {
    const AXES: usize = 3;

    fn origin() -> Self {
        Self::new(0, 0, 0)
    }

    fn axis(&self, axis: usize) -> i32 {
        match axis {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => 0,
        }
    }

    fn with_axis(self, axis: usize, value: i32) -> Self {
        match axis {
            0 => Self { x: value, ..self },
            1 => Self { y: value, ..self },
            2 => Self { z: value, ..self },
            _ => self,
        }
    }
}

impl From<(i32, i32, i32)> for Index3D {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

//=== KeyIndex ============================================================

/// Opaque key for non-coordinate topologies (radial menus, graphs).
///
/// Has no arithmetic; only direct lookups and actions apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct KeyIndex(pub u64);

impl GridIndex for KeyIndex {
    const AXES: usize = 0;

    fn origin() -> Self {
        Self(0)
    }

    fn axis(&self, _axis: usize) -> i32 {
        0
    }

    fn with_axis(self, _axis: usize, _value: i32) -> Self {
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
