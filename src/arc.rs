//! Circular and elliptical arc generator.
//!
//! Port of `agg_arc.h` / `agg_arc.cpp`. The arc is flattened into a
//! polyline whose angular step follows from the mean radius and the
//! approximation scale.

use crate::basics::{is_stop, VertexSource, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP, PI};

/// Angular step that keeps the chord error of a curve with radii `rx`/`ry`
/// below `0.125 / scale` units.
pub fn arc_step(rx: f64, ry: f64, scale: f64) -> f64 {
    let ra = (rx.abs() + ry.abs()) / 2.0;
    (ra / (ra + 0.125 / scale)).acos() * 2.0
}

/// Flattened arc from angle `start` to `end` around `(x, y)`.
///
/// Emits a `move_to` at the start angle, `line_to`s every `da` radians and
/// a final `line_to` exactly on the end angle.
#[derive(Debug, Clone)]
pub struct Arc {
    x: f64,
    y: f64,
    rx: f64,
    ry: f64,
    angle: f64,
    start: f64,
    end: f64,
    scale: f64,
    da: f64,
    ccw: bool,
    initialized: bool,
    path_cmd: u32,
}

impl Arc {
    /// Arc from `a1` to `a2` (radians). With `ccw` the angle grows from
    /// `a1`; otherwise it shrinks.
    #[allow(clippy::too_many_arguments)]
    pub fn new(x: f64, y: f64, rx: f64, ry: f64, a1: f64, a2: f64, ccw: bool) -> Self {
        let mut arc = Self::default();
        arc.init(x, y, rx, ry, a1, a2, ccw);
        arc
    }

    #[allow(clippy::too_many_arguments)]
    pub fn init(&mut self, x: f64, y: f64, rx: f64, ry: f64, a1: f64, a2: f64, ccw: bool) {
        self.x = x;
        self.y = y;
        self.rx = rx;
        self.ry = ry;
        self.normalize(a1, a2, ccw);
    }

    /// Set the flatness. Larger values give a finer polyline.
    pub fn set_approximation_scale(&mut self, s: f64) {
        self.scale = s;
        if self.initialized {
            self.normalize(self.start, self.end, self.ccw);
        }
    }

    pub fn approximation_scale(&self) -> f64 {
        self.scale
    }

    /// Unwrap the angles so the sweep runs in the requested direction and
    /// derive the signed step. A reversed range sweeps less than a full
    /// turn. The start is rebased into `[0, 2π)` so the step still advances
    /// for huge angles; non-finite angles leave the arc empty.
    fn normalize(&mut self, a1: f64, a2: f64, ccw: bool) {
        let two_pi = PI * 2.0;
        self.da = arc_step(self.rx, self.ry, self.scale);
        let sweep = if ccw {
            if a2 < a1 {
                (a2 - a1).rem_euclid(two_pi)
            } else {
                a2 - a1
            }
        } else {
            self.da = -self.da;
            if a1 < a2 {
                (a1 - a2).rem_euclid(two_pi)
            } else {
                a1 - a2
            }
        };
        self.ccw = ccw;
        self.start = a1.rem_euclid(two_pi);
        self.end = if ccw {
            self.start + sweep
        } else {
            self.start - sweep
        };
        self.initialized = self.start.is_finite() && self.end.is_finite();
    }
}

impl Default for Arc {
    /// An uninitialized arc; it produces nothing until [`Arc::init`].
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rx: 0.0,
            ry: 0.0,
            angle: 0.0,
            start: 0.0,
            end: 0.0,
            scale: 1.0,
            da: 0.0,
            ccw: false,
            initialized: false,
            path_cmd: PATH_CMD_STOP,
        }
    }
}

impl VertexSource for Arc {
    fn rewind(&mut self, _path_id: u32) {
        self.path_cmd = if self.initialized {
            PATH_CMD_MOVE_TO
        } else {
            PATH_CMD_STOP
        };
        self.angle = self.start;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if is_stop(self.path_cmd) {
            return PATH_CMD_STOP;
        }

        // A quarter step of slack so drift never adds or drops the last point.
        if (self.angle < self.end - self.da / 4.0) != self.ccw {
            *x = self.x + self.end.cos() * self.rx;
            *y = self.y + self.end.sin() * self.ry;
            self.path_cmd = PATH_CMD_STOP;
            return PATH_CMD_LINE_TO;
        }

        *x = self.x + self.angle.cos() * self.rx;
        *y = self.y + self.angle.sin() * self.ry;
        self.angle += self.da;

        core::mem::replace(&mut self.path_cmd, PATH_CMD_LINE_TO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_vertices(arc: &mut Arc) -> Vec<(f64, f64, u32)> {
        arc.rewind(0);
        let mut out = Vec::new();
        let (mut x, mut y) = (0.0, 0.0);
        loop {
            let cmd = arc.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                return out;
            }
            out.push((x, y, cmd));
        }
    }

    #[test]
    fn test_quarter_ccw_ends_on_end_angle() {
        let mut arc = Arc::new(0.0, 0.0, 10.0, 10.0, 0.0, PI / 2.0, true);
        let v = collect_vertices(&mut arc);
        assert_eq!(v[0].2, PATH_CMD_MOVE_TO);
        assert!((v[0].0 - 10.0).abs() < 1e-9 && v[0].1.abs() < 1e-9);
        assert!(v[1..].iter().all(|p| p.2 == PATH_CMD_LINE_TO));
        let last = v[v.len() - 1];
        assert!(last.0.abs() < 1e-9);
        assert!((last.1 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_cw_sweep_runs_backwards() {
        let mut arc = Arc::new(0.0, 0.0, 10.0, 10.0, PI / 2.0, 0.0, false);
        let v = collect_vertices(&mut arc);
        assert!(v[0].0.abs() < 1e-9 && (v[0].1 - 10.0).abs() < 1e-9);
        let last = v[v.len() - 1];
        assert!((last.0 - 10.0).abs() < 1e-9 && last.1.abs() < 1e-9);
        // Every intermediate point stays in the first quadrant.
        assert!(v.iter().all(|p| p.0 > -1e-9 && p.1 > -1e-9));
    }

    #[test]
    fn test_cw_with_increasing_angles_wraps() {
        // cw from 0 to PI/2 goes the long way round, through negative y.
        let mut arc = Arc::new(0.0, 0.0, 10.0, 10.0, 0.0, PI / 2.0, false);
        let v = collect_vertices(&mut arc);
        assert!(v.iter().any(|p| p.1 < -5.0));
        let last = v[v.len() - 1];
        assert!(last.0.abs() < 1e-9 && (last.1 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_huge_angles_stay_within_one_turn() {
        let mut arc = Arc::new(0.0, 0.0, 10.0, 10.0, 0.0, 1e17, false);
        let v = collect_vertices(&mut arc);
        assert!(!v.is_empty());
        assert!(v.len() < 200);
        assert_eq!(v[0].2, PATH_CMD_MOVE_TO);

        let mut arc = Arc::new(0.0, 0.0, 10.0, 10.0, 1e6, 0.5, true);
        let v = collect_vertices(&mut arc);
        assert!(v.len() < 200);
        let last = v[v.len() - 1];
        assert!((last.0 - 10.0 * 0.5f64.cos()).abs() < 1e-6);
        assert!((last.1 - 10.0 * 0.5f64.sin()).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_angles_emit_nothing() {
        let mut arc = Arc::new(0.0, 0.0, 10.0, 10.0, 0.0, f64::INFINITY, false);
        assert!(collect_vertices(&mut arc).is_empty());
        let mut arc = Arc::new(0.0, 0.0, 10.0, 10.0, f64::NAN, 1.0, true);
        assert!(collect_vertices(&mut arc).is_empty());
    }

    #[test]
    fn test_elliptical_endpoints() {
        let mut arc = Arc::new(5.0, 5.0, 20.0, 10.0, 0.0, PI / 2.0, true);
        let v = collect_vertices(&mut arc);
        assert!((v[0].0 - 25.0).abs() < 1e-9 && (v[0].1 - 5.0).abs() < 1e-9);
        let last = v[v.len() - 1];
        assert!((last.0 - 5.0).abs() < 1e-9 && (last.1 - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_finer_scale_gives_more_points() {
        let mut arc = Arc::new(0.0, 0.0, 100.0, 100.0, 0.0, PI * 2.0, true);
        let coarse = collect_vertices(&mut arc).len();
        arc.set_approximation_scale(4.0);
        assert_eq!(arc.approximation_scale(), 4.0);
        let fine = collect_vertices(&mut arc).len();
        assert!(fine > coarse, "{fine} <= {coarse}");
    }

    #[test]
    fn test_rewind_restarts() {
        let mut arc = Arc::new(0.0, 0.0, 10.0, 10.0, 0.0, PI, true);
        let first = collect_vertices(&mut arc);
        let second = collect_vertices(&mut arc);
        assert_eq!(first, second);
    }

    #[test]
    fn test_uninitialized_is_empty() {
        let mut arc = Arc::default();
        assert!(collect_vertices(&mut arc).is_empty());
    }

    #[test]
    fn test_step_shrinks_with_scale() {
        let d1 = arc_step(10.0, 10.0, 1.0);
        let d2 = arc_step(10.0, 10.0, 10.0);
        assert!(d2 < d1);
        assert!(d1 > 0.0);
    }
}
