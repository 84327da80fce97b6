//! Slot and object geometry.

use crate::common::unit::inches_to_emu;

/// Position and size of a shape, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Geometry {
    pub const fn new(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self { x, y, cx, cy }
    }

    /// Build a geometry from `[x, y, width, height]` in inches.
    pub fn from_inches(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x: inches_to_emu(x),
            y: inches_to_emu(y),
            cx: inches_to_emu(w),
            cy: inches_to_emu(h),
        }
    }
}

/// Slide dimensions, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSize {
    pub cx: i64,
    pub cy: i64,
}

impl SlideSize {
    pub fn from_inches(width: f64, height: f64) -> Self {
        Self {
            cx: inches_to_emu(width),
            cy: inches_to_emu(height),
        }
    }
}

/// Caller-supplied geometry where each field may be left to inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeometryOverride {
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub cx: Option<i64>,
    pub cy: Option<i64>,
}

impl GeometryOverride {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.cx.is_none() && self.cy.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.x.is_some() && self.y.is_some() && self.cx.is_some() && self.cy.is_some()
    }

    /// Lay these overrides over an inherited geometry.
    ///
    /// With no base, a partial override cannot produce a position and the
    /// result is `None`; the serializer then leaves the shape to inherit.
    pub fn over(&self, base: Option<Geometry>) -> Option<Geometry> {
        match base {
            Some(base) => Some(Geometry {
                x: self.x.unwrap_or(base.x),
                y: self.y.unwrap_or(base.y),
                cx: self.cx.unwrap_or(base.cx),
                cy: self.cy.unwrap_or(base.cy),
            }),
            None if self.is_complete() => Some(Geometry {
                x: self.x.unwrap_or_default(),
                y: self.y.unwrap_or_default(),
                cx: self.cx.unwrap_or_default(),
                cy: self.cy.unwrap_or_default(),
            }),
            None => None,
        }
    }
}

impl From<Geometry> for GeometryOverride {
    fn from(g: Geometry) -> Self {
        Self {
            x: Some(g.x),
            y: Some(g.y),
            cx: Some(g.cx),
            cy: Some(g.cy),
        }
    }
}
