//! Line clipping against an axis-aligned rectangle.
//!
//! Port of `agg_clip_liang_barsky.h`: Cohen-Sutherland style outcodes, the
//! endpoint-moving segment clipper used by polyline clipping, and the
//! parametric Liang-Barsky clipper used for polygons.
//!
//! The clip box must be normalized (`x1 <= x2`, `y1 <= y2`); nothing here
//! reorders it.

use crate::basics::{PointD, RectD};

// ============================================================================
// Outcodes
// ============================================================================

pub const CLIPPING_FLAGS_X1_CLIPPED: u32 = 4;
pub const CLIPPING_FLAGS_X2_CLIPPED: u32 = 1;
pub const CLIPPING_FLAGS_Y1_CLIPPED: u32 = 8;
pub const CLIPPING_FLAGS_Y2_CLIPPED: u32 = 2;
pub const CLIPPING_FLAGS_X_CLIPPED: u32 = CLIPPING_FLAGS_X1_CLIPPED | CLIPPING_FLAGS_X2_CLIPPED;
pub const CLIPPING_FLAGS_Y_CLIPPED: u32 = CLIPPING_FLAGS_Y1_CLIPPED | CLIPPING_FLAGS_Y2_CLIPPED;

/// Outcode of `(x, y)` relative to `clip_box`.
///
/// ```text
///         |        |
///   0110  |  0010  | 0011
///         |        |
///  -------+--------+-------- clip_box.y2
///         |        |
///   0100  |  0000  | 0001
///         |        |
///  -------+--------+-------- clip_box.y1
///         |        |
///   1100  |  1000  | 1001
///         |        |
///   clip_box.x1  clip_box.x2
/// ```
#[inline]
pub fn clipping_flags(x: f64, y: f64, clip_box: &RectD) -> u32 {
    clipping_flags_x(x, clip_box) | clipping_flags_y(y, clip_box)
}

#[inline]
pub fn clipping_flags_x(x: f64, clip_box: &RectD) -> u32 {
    ((x > clip_box.x2) as u32) | (((x < clip_box.x1) as u32) << 2)
}

#[inline]
pub fn clipping_flags_y(y: f64, clip_box: &RectD) -> u32 {
    (((y > clip_box.y2) as u32) << 1) | (((y < clip_box.y1) as u32) << 3)
}

// ============================================================================
// Segment clipping by moving endpoints
// ============================================================================

/// Both endpoints inside; nothing changed.
pub const CLIP_FULLY_VISIBLE: u32 = 0;
/// The first endpoint was moved onto the boundary.
pub const CLIP_FIRST_MOVED: u32 = 1;
/// The second endpoint was moved onto the boundary.
pub const CLIP_SECOND_MOVED: u32 = 2;
/// Nothing of the segment is inside. Any result `>= 4` means this.
pub const CLIP_FULLY_CLIPPED: u32 = 4;

/// Slide the point `p` along the line `a`-`b` onto the boundary named by
/// `flags`: first onto the violated x edge, then, if still outside, onto
/// the violated y edge.
///
/// Returns `false` when the segment has no extent along an axis that needs
/// correcting, so the point cannot be moved.
pub fn clip_move_point(a: PointD, b: PointD, clip_box: &RectD, p: &mut PointD, flags: u32) -> bool {
    if flags & CLIPPING_FLAGS_X_CLIPPED != 0 {
        if a.x == b.x {
            return false;
        }
        let bound = if flags & CLIPPING_FLAGS_X1_CLIPPED != 0 {
            clip_box.x1
        } else {
            clip_box.x2
        };
        p.y = (bound - a.x) * (b.y - a.y) / (b.x - a.x) + a.y;
        p.x = bound;
    }

    let flags = clipping_flags_y(p.y, clip_box);
    if flags & CLIPPING_FLAGS_Y_CLIPPED != 0 {
        if a.y == b.y {
            return false;
        }
        let bound = if flags & CLIPPING_FLAGS_Y1_CLIPPED != 0 {
            clip_box.y1
        } else {
            clip_box.y2
        };
        p.x = (bound - a.y) * (b.x - a.x) / (b.y - a.y) + a.x;
        p.y = bound;
    }
    true
}

/// Clip the segment `p1`-`p2` in place.
///
/// Returns [`CLIP_FULLY_VISIBLE`], [`CLIP_FULLY_CLIPPED`], or a combination
/// of [`CLIP_FIRST_MOVED`] / [`CLIP_SECOND_MOVED`] telling which endpoints
/// now lie on the boundary (a moved first point means the caller has to
/// start a new sub-path there).
pub fn clip_line_segment(p1: &mut PointD, p2: &mut PointD, clip_box: &RectD) -> u32 {
    let f1 = clipping_flags(p1.x, p1.y, clip_box);
    let f2 = clipping_flags(p2.x, p2.y, clip_box);

    if (f1 | f2) == 0 {
        return CLIP_FULLY_VISIBLE;
    }

    let same_side = |mask: u32| (f1 & mask) != 0 && (f1 & mask) == (f2 & mask);
    if same_side(CLIPPING_FLAGS_X_CLIPPED) || same_side(CLIPPING_FLAGS_Y_CLIPPED) {
        return CLIP_FULLY_CLIPPED;
    }

    let a = *p1;
    let b = *p2;
    let mut ret = CLIP_FULLY_VISIBLE;

    if f1 != 0 {
        if !clip_move_point(a, b, clip_box, p1, f1) || p1 == p2 {
            return CLIP_FULLY_CLIPPED;
        }
        ret |= CLIP_FIRST_MOVED;
    }

    if f2 != 0 {
        if !clip_move_point(a, b, clip_box, p2, f2) || p1 == p2 {
            return CLIP_FULLY_CLIPPED;
        }
        ret |= CLIP_SECOND_MOVED;
    }

    ret
}

// ============================================================================
// Parametric Liang-Barsky
// ============================================================================

/// Clip `(x1, y1)`-`(x2, y2)` for polygon clipping and write the points the
/// clipped edge contributes into `out`. Returns how many were written (0..=3).
///
/// The start point is implied by the previous edge and is not written
/// unless it was clipped; when the edge passes outside a corner the corner
/// itself is emitted so that clipped polygons stay closed along the box.
pub fn clip_liang_barsky(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    clip_box: &RectD,
    out: &mut [PointD; 3],
) -> usize {
    const NEARZERO: f64 = 1e-30;

    let mut deltax = x2 - x1;
    let mut deltay = y2 - y1;
    if deltax == 0.0 {
        deltax = if x1 > clip_box.x1 { -NEARZERO } else { NEARZERO };
    }
    if deltay == 0.0 {
        deltay = if y1 > clip_box.y1 { -NEARZERO } else { NEARZERO };
    }

    let (xin, xout) = if deltax > 0.0 {
        (clip_box.x1, clip_box.x2)
    } else {
        (clip_box.x2, clip_box.x1)
    };
    let (yin, yout) = if deltay > 0.0 {
        (clip_box.y1, clip_box.y2)
    } else {
        (clip_box.y2, clip_box.y1)
    };

    let tinx = (xin - x1) / deltax;
    let tiny = (yin - y1) / deltay;
    let (tin1, tin2) = if tinx < tiny { (tinx, tiny) } else { (tiny, tinx) };

    let mut np = 0;

    if tin1 > 1.0 {
        return 0;
    }
    if tin1 > 0.0 {
        emit(out, &mut np, xin, yin);
    }
    if tin2 > 1.0 {
        return np;
    }

    let toutx = (xout - x1) / deltax;
    let touty = (yout - y1) / deltay;
    let tout1 = toutx.min(touty);

    if tin2 > 0.0 || tout1 > 0.0 {
        if tin2 <= tout1 {
            if tin2 > 0.0 {
                if tinx > tiny {
                    emit(out, &mut np, xin, y1 + tinx * deltay);
                } else {
                    emit(out, &mut np, x1 + tiny * deltax, yin);
                }
            }
            if tout1 < 1.0 {
                if toutx < touty {
                    emit(out, &mut np, xout, y1 + toutx * deltay);
                } else {
                    emit(out, &mut np, x1 + touty * deltax, yout);
                }
            } else {
                emit(out, &mut np, x2, y2);
            }
        } else if tinx > tiny {
            emit(out, &mut np, xin, yout);
        } else {
            emit(out, &mut np, xout, yin);
        }
    }
    np
}

#[inline]
fn emit(out: &mut [PointD; 3], np: &mut usize, x: f64, y: f64) {
    out[*np] = PointD::new(x, y);
    *np += 1;
}

// ============================================================================
// Tests
// ============================================================================
