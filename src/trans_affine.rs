//! 2D affine transformations.
//!
//! Port of `agg_trans_affine.h` / `agg_trans_affine.cpp`. Matrices compose
//! left to right: `a * b` applies `a` first, then `b`.

use log::debug;

use crate::basics::is_equal_eps;

/// Default tolerance for the identity, validity and equality checks.
pub const AFFINE_EPSILON: f64 = 1e-14;

/// Affine matrix stored as `[sx, shy, shx, sy, tx, ty]`:
///
/// ```text
///   x' = x * sx  + y * shx + tx
///   y' = x * shy + y * sy  + ty
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransAffine {
    pub sx: f64,
    pub shy: f64,
    pub shx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl TransAffine {
    /// Identity.
    pub const IDENTITY: TransAffine = TransAffine::new_custom(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    pub fn new() -> Self {
        Self::IDENTITY
    }

    pub const fn new_custom(sx: f64, shy: f64, shx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Self {
            sx,
            shy,
            shx,
            sy,
            tx,
            ty,
        }
    }

    pub fn new_rotation(a: f64) -> Self {
        let (sa, ca) = a.sin_cos();
        Self::new_custom(ca, sa, -sa, ca, 0.0, 0.0)
    }

    pub fn new_scaling(x: f64, y: f64) -> Self {
        Self::new_custom(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    pub fn new_scaling_uniform(s: f64) -> Self {
        Self::new_scaling(s, s)
    }

    pub fn new_translation(x: f64, y: f64) -> Self {
        Self::new_custom(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Shear by the angles `x` and `y` (radians).
    pub fn new_skewing(x: f64, y: f64) -> Self {
        Self::new_custom(1.0, y.tan(), x.tan(), 1.0, 0.0, 0.0)
    }

    /// Matrix taking the parallelogram `src` onto `dst`.
    ///
    /// A parallelogram is three corners `[x1, y1, x2, y2, x3, y3]`; the
    /// fourth is implied.
    pub fn new_parl_to_parl(src: &[f64; 6], dst: &[f64; 6]) -> Self {
        let mut m = Self::new();
        m.parl_to_parl(src, dst);
        m
    }

    /// Matrix mapping the unit square's corners `(0,0)`, `(1,0)`, `(0,1)`
    /// onto the three given parallelogram corners.
    fn from_parl(p: &[f64; 6]) -> Self {
        Self::new_custom(p[2] - p[0], p[3] - p[1], p[4] - p[0], p[5] - p[1], p[0], p[1])
    }

    // ========================================================================
    // Parallelograms
    // ========================================================================

    pub fn parl_to_parl(&mut self, src: &[f64; 6], dst: &[f64; 6]) -> &mut Self {
        *self = Self::from_parl(src);
        self.invert();
        self.multiply(&Self::from_parl(dst))
    }

    pub fn rect_to_parl(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        parl: &[f64; 6],
    ) -> &mut Self {
        self.parl_to_parl(&[x1, y1, x2, y1, x2, y2], parl)
    }

    pub fn parl_to_rect(
        &mut self,
        parl: &[f64; 6],
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    ) -> &mut Self {
        self.parl_to_parl(parl, &[x1, y1, x2, y1, x2, y2])
    }

    // ========================================================================
    // In-place operations
    // ========================================================================

    pub fn reset(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.tx += x;
        self.ty += y;
        self
    }

    pub fn rotate(&mut self, a: f64) -> &mut Self {
        self.multiply(&Self::new_rotation(a))
    }

    pub fn scale(&mut self, x: f64, y: f64) -> &mut Self {
        self.sx *= x;
        self.shx *= x;
        self.tx *= x;
        self.shy *= y;
        self.sy *= y;
        self.ty *= y;
        self
    }

    /// `self = self * m`: apply `self`, then `m`.
    pub fn multiply(&mut self, m: &TransAffine) -> &mut Self {
        let a = *self;
        self.sx = a.sx * m.sx + a.shy * m.shx;
        self.shy = a.sx * m.shy + a.shy * m.sy;
        self.shx = a.shx * m.sx + a.sy * m.shx;
        self.sy = a.shx * m.shy + a.sy * m.sy;
        self.tx = a.tx * m.sx + a.ty * m.shx + m.tx;
        self.ty = a.tx * m.shy + a.ty * m.sy + m.ty;
        self
    }

    /// `self = m * self`: apply `m`, then `self`.
    pub fn premultiply(&mut self, m: &TransAffine) -> &mut Self {
        let mut t = *m;
        t.multiply(self);
        *self = t;
        self
    }

    /// Invert in place. A singular matrix yields non-finite coefficients;
    /// check [`is_valid`](TransAffine::is_valid) first.
    pub fn invert(&mut self) -> &mut Self {
        if !self.is_valid(AFFINE_EPSILON) {
            debug!("inverting a degenerate affine matrix {self:?}");
        }
        let d = self.determinant_reciprocal();
        let a = *self;
        self.sx = a.sy * d;
        self.sy = a.sx * d;
        self.shy = -a.shy * d;
        self.shx = -a.shx * d;
        self.tx = -a.tx * self.sx - a.ty * self.shx;
        self.ty = -a.tx * self.shy - a.ty * self.sy;
        self
    }

    /// Inverted copy.
    pub fn inverted(&self) -> Self {
        let mut m = *self;
        m.invert();
        m
    }

    // ========================================================================
    // Points
    // ========================================================================

    #[inline]
    pub fn transform(&self, x: &mut f64, y: &mut f64) {
        let x0 = *x;
        *x = x0 * self.sx + *y * self.shx + self.tx;
        *y = x0 * self.shy + *y * self.sy + self.ty;
    }

    /// Apply the inverse without building it.
    #[inline]
    pub fn inverse_transform(&self, x: &mut f64, y: &mut f64) {
        let d = self.determinant_reciprocal();
        let a = (*x - self.tx) * d;
        let b = (*y - self.ty) * d;
        *x = a * self.sy - b * self.shx;
        *y = b * self.sx - a * self.shy;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.sx * self.sy - self.shy * self.shx
    }

    #[inline]
    pub fn determinant_reciprocal(&self) -> f64 {
        1.0 / self.determinant()
    }

    /// Average scale factor; curve generators use it as their
    /// approximation scale under this transform.
    pub fn get_scale(&self) -> f64 {
        let x = core::f64::consts::FRAC_1_SQRT_2 * (self.sx + self.shx);
        let y = core::f64::consts::FRAC_1_SQRT_2 * (self.shy + self.sy);
        (x * x + y * y).sqrt()
    }

    /// Invertible: the determinant is farther than `epsilon` from zero.
    pub fn is_valid(&self, epsilon: f64) -> bool {
        self.determinant().abs() > epsilon
    }

    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.is_equal(&Self::IDENTITY, epsilon)
    }

    pub fn is_equal(&self, m: &TransAffine, epsilon: f64) -> bool {
        is_equal_eps(self.sx, m.sx, epsilon)
            && is_equal_eps(self.shy, m.shy, epsilon)
            && is_equal_eps(self.shx, m.shx, epsilon)
            && is_equal_eps(self.sy, m.sy, epsilon)
            && is_equal_eps(self.tx, m.tx, epsilon)
            && is_equal_eps(self.ty, m.ty, epsilon)
    }
}

impl Default for TransAffine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for TransAffine {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other, AFFINE_EPSILON)
    }
}

impl core::ops::Mul for TransAffine {
    type Output = TransAffine;

    fn mul(mut self, rhs: TransAffine) -> TransAffine {
        self.multiply(&rhs);
        self
    }
}

impl core::ops::MulAssign for TransAffine {
    fn mul_assign(&mut self, rhs: TransAffine) {
        self.multiply(&rhs);
    }
}

// ============================================================================
// Tests
// ============================================================================
