//! Arcs as cubic Bezier curves.
//!
//! Port of `agg_bezier_arc.h` / `agg_bezier_arc.cpp`. [`BezierArc`] splits
//! a center-parameterized arc into quarter-turn cubic segments;
//! [`BezierArcSvg`] accepts the SVG endpoint form (`A` path command) and
//! converts it to the center form first.

use log::debug;

use crate::basics::{
    VertexSource, PATH_CMD_CURVE4, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP, PI,
};
use crate::math::{calc_distance, VERTEX_DIST_EPSILON};
use crate::trans_affine::TransAffine;

/// Sweeps closer than this to a quarter-turn boundary are not split again.
const BEZIER_ARC_ANGLE_EPSILON: f64 = 0.01;

/// Capacity of the coordinate buffer: a start point plus four curves of
/// three points each.
pub const BEZIER_ARC_MAX_COORDS: usize = 26;

/// One cubic Bezier for an arc of at most a quarter turn, as
/// `[x0, y0, x1, y1, x2, y2, x3, y3]`.
pub fn arc_to_bezier(
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    start_angle: f64,
    sweep_angle: f64,
) -> [f64; 8] {
    let x0 = (sweep_angle / 2.0).cos();
    let y0 = (sweep_angle / 2.0).sin();
    let tx = (1.0 - x0) * 4.0 / 3.0;
    let ty = y0 - tx * x0 / y0;

    // Control points of the arc symmetric about the x axis, then rotated
    // onto the bisector of the real arc.
    let px = [x0, x0 + tx, x0 + tx, x0];
    let py = [-y0, -ty, ty, y0];
    let (sn, cs) = (start_angle + sweep_angle / 2.0).sin_cos();

    let mut curve = [0.0; 8];
    for i in 0..4 {
        curve[i * 2] = cx + rx * (px[i] * cs - py[i] * sn);
        curve[i * 2 + 1] = cy + ry * (px[i] * sn + py[i] * cs);
    }
    curve
}

// ============================================================================
// BezierArc
// ============================================================================

/// Arc around a center, emitted as `move_to` followed by up to four
/// `curve4` triples (or a single `line_to` when the sweep is ~0).
#[derive(Debug, Clone)]
pub struct BezierArc {
    vertex: usize,
    num_vertices: usize,
    vertices: [f64; BEZIER_ARC_MAX_COORDS],
    cmd: u32,
}

impl BezierArc {
    pub fn new() -> Self {
        Self {
            vertex: BEZIER_ARC_MAX_COORDS,
            num_vertices: 0,
            vertices: [0.0; BEZIER_ARC_MAX_COORDS],
            cmd: PATH_CMD_LINE_TO,
        }
    }

    pub fn new_with_params(
        x: f64,
        y: f64,
        rx: f64,
        ry: f64,
        start_angle: f64,
        sweep_angle: f64,
    ) -> Self {
        let mut arc = Self::new();
        arc.init(x, y, rx, ry, start_angle, sweep_angle);
        arc
    }

    /// Split the arc into quarter-turn pieces. The sweep is clamped to one
    /// full turn in either direction.
    pub fn init(&mut self, x: f64, y: f64, rx: f64, ry: f64, start_angle: f64, sweep_angle: f64) {
        let mut start_angle = start_angle % (2.0 * PI);
        let sweep_angle = sweep_angle.clamp(-2.0 * PI, 2.0 * PI);

        if sweep_angle.abs() < 1e-10 {
            let (sn1, cs1) = start_angle.sin_cos();
            let (sn2, cs2) = (start_angle + sweep_angle).sin_cos();
            self.set_line(x + rx * cs1, y + ry * sn1, x + rx * cs2, y + ry * sn2);
            return;
        }

        let step = if sweep_angle < 0.0 { -PI * 0.5 } else { PI * 0.5 };
        let mut total_sweep = 0.0;
        self.num_vertices = 2;
        self.cmd = PATH_CMD_CURVE4;
        loop {
            let prev_sweep = total_sweep;
            total_sweep += step;
            let done = if sweep_angle < 0.0 {
                total_sweep <= sweep_angle + BEZIER_ARC_ANGLE_EPSILON
            } else {
                total_sweep >= sweep_angle - BEZIER_ARC_ANGLE_EPSILON
            };
            let local_sweep = if done { sweep_angle - prev_sweep } else { step };

            let n = self.num_vertices;
            self.vertices[n - 2..n + 6]
                .copy_from_slice(&arc_to_bezier(x, y, rx, ry, start_angle, local_sweep));
            self.num_vertices += 6;
            start_angle += local_sweep;

            if done || self.num_vertices >= BEZIER_ARC_MAX_COORDS {
                break;
            }
        }
    }

    /// Replace the arc with the straight segment `(x0, y0)`-`(x1, y1)`.
    pub(crate) fn set_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.num_vertices = 4;
        self.cmd = PATH_CMD_LINE_TO;
        self.vertices[..4].copy_from_slice(&[x0, y0, x1, y1]);
    }

    /// Number of coordinates in use (twice the number of points).
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn vertices(&self) -> &[f64; BEZIER_ARC_MAX_COORDS] {
        &self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut [f64; BEZIER_ARC_MAX_COORDS] {
        &mut self.vertices
    }
}

impl Default for BezierArc {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexSource for BezierArc {
    fn rewind(&mut self, _path_id: u32) {
        self.vertex = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if self.vertex >= self.num_vertices {
            return PATH_CMD_STOP;
        }
        *x = self.vertices[self.vertex];
        *y = self.vertices[self.vertex + 1];
        self.vertex += 2;
        if self.vertex == 2 {
            PATH_CMD_MOVE_TO
        } else {
            self.cmd
        }
    }
}

// ============================================================================
// BezierArcSvg
// ============================================================================

/// Elliptical arc in SVG endpoint form.
///
/// The first and last emitted points are exactly the requested endpoints.
/// When the radii cannot reach from one endpoint to the other they are
/// scaled up; [`radii_ok`](BezierArcSvg::radii_ok) turns `false` if that
/// needed more than a `sqrt(10)` enlargement, or if the input was
/// degenerate (a zero radius or coincident endpoints), in which case the
/// arc is a straight line.
#[derive(Debug, Clone, Default)]
pub struct BezierArcSvg {
    arc: BezierArc,
    radii_ok: bool,
}

impl BezierArcSvg {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new_with_params(
        x1: f64,
        y1: f64,
        rx: f64,
        ry: f64,
        angle: f64,
        large_arc_flag: bool,
        sweep_flag: bool,
        x2: f64,
        y2: f64,
    ) -> Self {
        let mut svg = Self::new();
        svg.init(x1, y1, rx, ry, angle, large_arc_flag, sweep_flag, x2, y2);
        svg
    }

    /// Arc from `(x0, y0)` to `(x2, y2)` on an ellipse with radii `rx`,
    /// `ry` rotated by `angle`. The flags pick one of the four candidate
    /// arcs as in SVG.
    #[allow(clippy::too_many_arguments)]
    pub fn init(
        &mut self,
        x0: f64,
        y0: f64,
        rx: f64,
        ry: f64,
        angle: f64,
        large_arc_flag: bool,
        sweep_flag: bool,
        x2: f64,
        y2: f64,
    ) {
        self.radii_ok = true;
        let mut rx = rx.abs();
        let mut ry = ry.abs();

        if rx < VERTEX_DIST_EPSILON
            || ry < VERTEX_DIST_EPSILON
            || calc_distance(x0, y0, x2, y2) < VERTEX_DIST_EPSILON
        {
            debug!("degenerate SVG arc ({x0}, {y0}) -> ({x2}, {y2}) with radii {rx}x{ry}");
            self.radii_ok = false;
            self.arc.set_line(x0, y0, x2, y2);
            return;
        }

        // Half the chord, in the ellipse's own axes.
        let dx2 = (x0 - x2) / 2.0;
        let dy2 = (y0 - y2) / 2.0;
        let (sin_a, cos_a) = angle.sin_cos();
        let x1 = cos_a * dx2 + sin_a * dy2;
        let y1 = -sin_a * dx2 + cos_a * dy2;

        let mut prx = rx * rx;
        let mut pry = ry * ry;
        let px1 = x1 * x1;
        let py1 = y1 * y1;

        let radii_check = px1 / prx + py1 / pry;
        if radii_check > 1.0 {
            let k = radii_check.sqrt();
            rx *= k;
            ry *= k;
            prx = rx * rx;
            pry = ry * ry;
            if radii_check > 10.0 {
                self.radii_ok = false;
            }
            debug!("SVG arc radii scaled by {k} to {rx}x{ry}");
        }

        // Center in the rotated frame.
        let sign = if large_arc_flag == sweep_flag { -1.0 } else { 1.0 };
        let sq = (prx * pry - prx * py1 - pry * px1) / (prx * py1 + pry * px1);
        let coef = sign * sq.max(0.0).sqrt();
        let cx1 = coef * ((rx * y1) / ry);
        let cy1 = coef * -((ry * x1) / rx);

        let sx2 = (x0 + x2) / 2.0;
        let sy2 = (y0 + y2) / 2.0;
        let cx = sx2 + (cos_a * cx1 - sin_a * cy1);
        let cy = sy2 + (sin_a * cx1 + cos_a * cy1);

        let ux = (x1 - cx1) / rx;
        let uy = (y1 - cy1) / ry;
        let vx = (-x1 - cx1) / rx;
        let vy = (-y1 - cy1) / ry;

        let n = (ux * ux + uy * uy).sqrt();
        let sign = if uy < 0.0 { -1.0 } else { 1.0 };
        let start_angle = sign * (ux / n).clamp(-1.0, 1.0).acos();

        let n = ((ux * ux + uy * uy) * (vx * vx + vy * vy)).sqrt();
        let p = ux * vx + uy * vy;
        let sign = if ux * vy - uy * vx < 0.0 { -1.0 } else { 1.0 };
        let mut sweep_angle = sign * (p / n).clamp(-1.0, 1.0).acos();
        if !sweep_flag && sweep_angle > 0.0 {
            sweep_angle -= PI * 2.0;
        } else if sweep_flag && sweep_angle < 0.0 {
            sweep_angle += PI * 2.0;
        }

        self.arc.init(0.0, 0.0, rx, ry, start_angle, sweep_angle);

        let mut mtx = TransAffine::new_rotation(angle);
        mtx.multiply(&TransAffine::new_translation(cx, cy));

        let nv = self.arc.num_vertices();
        let verts = self.arc.vertices_mut();
        for pair in verts[2..nv - 2].chunks_exact_mut(2) {
            let (mut px, mut py) = (pair[0], pair[1]);
            mtx.transform(&mut px, &mut py);
            pair[0] = px;
            pair[1] = py;
        }

        // Exact joints with the neighbouring path segments.
        verts[0] = x0;
        verts[1] = y0;
        verts[nv - 2] = x2;
        verts[nv - 1] = y2;
    }

    pub fn radii_ok(&self) -> bool {
        self.radii_ok
    }

    pub fn num_vertices(&self) -> usize {
        self.arc.num_vertices()
    }

    pub fn vertices(&self) -> &[f64; BEZIER_ARC_MAX_COORDS] {
        self.arc.vertices()
    }
}

impl VertexSource for BezierArcSvg {
    fn rewind(&mut self, _path_id: u32) {
        self.arc.rewind(0);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        self.arc.vertex(x, y)
    }
}

// ============================================================================
// Tests
// ============================================================================
