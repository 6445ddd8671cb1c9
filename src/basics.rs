//! Path commands, small geometric value types and the vertex source trait.
//!
//! Port of the parts of `agg_basics.h` that the vertex generators depend on.
//! A path is a lazily pulled stream of `(x, y, cmd)` triples; `cmd` packs a
//! command kind in the low nibble and orientation/close flags in the high
//! nibble.

// ============================================================================
// Path commands
// ============================================================================

pub const PATH_CMD_STOP: u32 = 0;
pub const PATH_CMD_MOVE_TO: u32 = 1;
pub const PATH_CMD_LINE_TO: u32 = 2;
pub const PATH_CMD_CURVE3: u32 = 3;
pub const PATH_CMD_CURVE4: u32 = 4;
pub const PATH_CMD_END_POLY: u32 = 0x0F;
pub const PATH_CMD_MASK: u32 = 0x0F;

// ============================================================================
// Path flags (only meaningful together with PATH_CMD_END_POLY)
// ============================================================================

pub const PATH_FLAGS_NONE: u32 = 0;
pub const PATH_FLAGS_CCW: u32 = 0x10;
pub const PATH_FLAGS_CW: u32 = 0x20;
pub const PATH_FLAGS_CLOSE: u32 = 0x40;
pub const PATH_FLAGS_MASK: u32 = 0xF0;

/// Returns `true` for commands that carry a real point (move, line, curves).
#[inline]
pub fn is_vertex(c: u32) -> bool {
    (PATH_CMD_MOVE_TO..PATH_CMD_END_POLY).contains(&c)
}

/// Returns `true` for point commands other than `move_to`.
#[inline]
pub fn is_drawing(c: u32) -> bool {
    (PATH_CMD_LINE_TO..PATH_CMD_END_POLY).contains(&c)
}

#[inline]
pub fn is_stop(c: u32) -> bool {
    c == PATH_CMD_STOP
}

#[inline]
pub fn is_move_to(c: u32) -> bool {
    c == PATH_CMD_MOVE_TO
}

#[inline]
pub fn is_line_to(c: u32) -> bool {
    c == PATH_CMD_LINE_TO
}

/// Returns `true` for `curve3` and `curve4` control/end points.
#[inline]
pub fn is_curve(c: u32) -> bool {
    c == PATH_CMD_CURVE3 || c == PATH_CMD_CURVE4
}

/// Returns `true` for `end_poly` regardless of its flags.
#[inline]
pub fn is_end_poly(c: u32) -> bool {
    (c & PATH_CMD_MASK) == PATH_CMD_END_POLY
}

/// Returns `true` for `end_poly | close`, ignoring orientation bits.
#[inline]
pub fn is_close(c: u32) -> bool {
    (c & !(PATH_FLAGS_CW | PATH_FLAGS_CCW)) == (PATH_CMD_END_POLY | PATH_FLAGS_CLOSE)
}

/// Returns `true` if the close flag is set.
#[inline]
pub fn is_closed(c: u32) -> bool {
    (c & PATH_FLAGS_CLOSE) != 0
}

#[inline]
pub fn is_cw(c: u32) -> bool {
    (c & PATH_FLAGS_CW) != 0
}

#[inline]
pub fn is_ccw(c: u32) -> bool {
    (c & PATH_FLAGS_CCW) != 0
}

#[inline]
pub fn is_oriented(c: u32) -> bool {
    (c & (PATH_FLAGS_CW | PATH_FLAGS_CCW)) != 0
}

/// Extract the close flag (either `PATH_FLAGS_CLOSE` or 0).
#[inline]
pub fn get_close_flag(c: u32) -> u32 {
    c & PATH_FLAGS_CLOSE
}

// ============================================================================
// Angles
// ============================================================================

pub const PI: f64 = std::f64::consts::PI;

#[inline]
pub fn deg2rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

#[inline]
pub fn rad2deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

// ============================================================================
// Rect
// ============================================================================

/// Axis-aligned rectangle given by two corners.
///
/// Clip routines expect `x1 <= x2` and `y1 <= y2`; call [`Rect::normalize`]
/// first if the corners may arrive in any order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Copy + PartialOrd> Rect<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Swap corners so that `x1 <= x2` and `y1 <= y2`.
    pub fn normalize(&mut self) -> &mut Self {
        if self.x1 > self.x2 {
            core::mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            core::mem::swap(&mut self.y1, &mut self.y2);
        }
        self
    }

    /// Intersect with `r` in place. Returns `false` if the result is empty.
    pub fn clip(&mut self, r: &Self) -> bool {
        if self.x2 > r.x2 {
            self.x2 = r.x2;
        }
        if self.y2 > r.y2 {
            self.y2 = r.y2;
        }
        if self.x1 < r.x1 {
            self.x1 = r.x1;
        }
        if self.y1 < r.y1 {
            self.y1 = r.y1;
        }
        self.is_valid()
    }

    pub fn is_valid(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Inclusive containment test.
    pub fn hit_test(&self, x: T, y: T) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

pub type RectI = Rect<i32>;
pub type RectD = Rect<f64>;

// ============================================================================
// Point / Vertex
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointBase<T: Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> PointBase<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

pub type PointD = PointBase<f64>;

/// A point together with the command that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexBase<T: Copy> {
    pub x: T,
    pub y: T,
    pub cmd: u32,
}

impl<T: Copy> VertexBase<T> {
    pub fn new(x: T, y: T, cmd: u32) -> Self {
        Self { x, y, cmd }
    }
}

pub type VertexD = VertexBase<f64>;

// ============================================================================
// Approximate equality
// ============================================================================

/// `true` when `v1` and `v2` differ by at most `epsilon`.
#[inline]
pub fn is_equal_eps(v1: f64, v2: f64, epsilon: f64) -> bool {
    (v1 - v2).abs() <= epsilon
}

// ============================================================================
// VertexSource
// ============================================================================

/// The pull interface every shape, path and converter implements.
///
/// Consumers call [`rewind`](VertexSource::rewind) once and then
/// [`vertex`](VertexSource::vertex) until it returns [`PATH_CMD_STOP`].
/// Implementations are not reentrant; one consumer drives one source.
pub trait VertexSource {
    /// Reset iteration. Most sources ignore `path_id`.
    fn rewind(&mut self, path_id: u32);

    /// Produce the next command. `x`/`y` are written only when the command
    /// carries a point.
    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32;
}

/// Lets a pipeline stage borrow its upstream instead of owning it.
impl<T: VertexSource + ?Sized> VertexSource for &mut T {
    fn rewind(&mut self, path_id: u32) {
        (**self).rewind(path_id);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        (**self).vertex(x, y)
    }
}

// ============================================================================
// Tests
// ============================================================================
