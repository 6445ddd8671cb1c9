//! Rectangle with elliptical corners.
//!
//! Port of `agg_rounded_rect.h` / `agg_rounded_rect.cpp`. The outline is
//! four quarter arcs, joined by the straight edges between them, closed
//! counter-clockwise.

use crate::arc::Arc;
use crate::basics::{
    is_stop, VertexSource, PATH_CMD_END_POLY, PATH_CMD_LINE_TO, PATH_CMD_STOP, PATH_FLAGS_CCW,
    PATH_FLAGS_CLOSE, PI,
};

/// Corner order, which is also the emission order.
const BOTTOM_LEFT: usize = 0;
const BOTTOM_RIGHT: usize = 1;
const TOP_RIGHT: usize = 2;
const TOP_LEFT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    /// Set up the arc for the given corner.
    StartCorner(usize),
    /// Drain the arc of the given corner.
    Corner(usize),
    EndPoly,
    Stop,
}

/// Rounded rectangle vertex source.
///
/// Corners are numbered from the bottom-left going counter-clockwise
/// (y up): 1 bottom-left, 2 bottom-right, 3 top-right, 4 top-left. Each
/// has its own `rx`/`ry`.
#[derive(Debug, Clone)]
pub struct RoundedRect {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    rx: [f64; 4],
    ry: [f64; 4],
    status: Status,
    arc: Arc,
}

impl RoundedRect {
    /// Rectangle spanned by two corners, with a uniform radius `r`.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, r: f64) -> Self {
        let mut rr = Self::default();
        rr.rect(x1, y1, x2, y2);
        rr.radius(r);
        rr
    }

    /// Set the rectangle; the corners may be given in any order.
    pub fn rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.x1 = x1.min(x2);
        self.x2 = x1.max(x2);
        self.y1 = y1.min(y2);
        self.y2 = y1.max(y2);
    }

    pub fn radius(&mut self, r: f64) {
        self.radius_xy(r, r);
    }

    pub fn radius_xy(&mut self, rx: f64, ry: f64) {
        self.rx = [rx; 4];
        self.ry = [ry; 4];
    }

    /// Bottom corners get `(rx_bottom, ry_bottom)`, top corners
    /// `(rx_top, ry_top)`.
    pub fn radius_bottom_top(&mut self, rx_bottom: f64, ry_bottom: f64, rx_top: f64, ry_top: f64) {
        self.rx = [rx_bottom, rx_bottom, rx_top, rx_top];
        self.ry = [ry_bottom, ry_bottom, ry_top, ry_top];
    }

    #[allow(clippy::too_many_arguments)]
    pub fn radius_all(
        &mut self,
        rx1: f64,
        ry1: f64,
        rx2: f64,
        ry2: f64,
        rx3: f64,
        ry3: f64,
        rx4: f64,
        ry4: f64,
    ) {
        self.rx = [rx1, rx2, rx3, rx4];
        self.ry = [ry1, ry2, ry3, ry4];
    }

    /// Current `(rx, ry)` of each corner, bottom-left first.
    pub fn radii(&self) -> [(f64, f64); 4] {
        [0, 1, 2, 3].map(|i| (self.rx[i], self.ry[i]))
    }

    /// Scale all radii by one factor so corners never overlap: horizontal
    /// radii of neighbouring and opposite corners fit the width, vertical
    /// radii of neighbouring and opposite corners fit the height.
    pub fn normalize_radius(&mut self) {
        let width = self.x2 - self.x1;
        let height = self.y2 - self.y1;

        let pairs = [
            (width, self.rx[BOTTOM_LEFT] + self.rx[BOTTOM_RIGHT]),
            (width, self.rx[TOP_RIGHT] + self.rx[TOP_LEFT]),
            (height, self.ry[BOTTOM_LEFT] + self.ry[TOP_LEFT]),
            (height, self.ry[BOTTOM_RIGHT] + self.ry[TOP_RIGHT]),
            (width, self.rx[BOTTOM_LEFT] + self.rx[TOP_RIGHT]),
            (width, self.rx[BOTTOM_RIGHT] + self.rx[TOP_LEFT]),
            (height, self.ry[BOTTOM_LEFT] + self.ry[TOP_RIGHT]),
            (height, self.ry[BOTTOM_RIGHT] + self.ry[TOP_LEFT]),
        ];
        let k = pairs
            .iter()
            .filter(|&&(_, sum)| sum > 0.0)
            .map(|&(side, sum)| side / sum)
            .fold(1.0_f64, f64::min);

        if k < 1.0 {
            self.rx.iter_mut().for_each(|r| *r *= k);
            self.ry.iter_mut().for_each(|r| *r *= k);
        }
    }

    pub fn set_approximation_scale(&mut self, s: f64) {
        self.arc.set_approximation_scale(s);
    }

    pub fn approximation_scale(&self) -> f64 {
        self.arc.approximation_scale()
    }

    /// Center and angle range of the quarter arc at `corner`.
    fn corner_arc(&self, corner: usize) -> (f64, f64, f64, f64) {
        let (rx, ry) = (self.rx[corner], self.ry[corner]);
        match corner {
            BOTTOM_LEFT => (self.x1 + rx, self.y1 + ry, PI, PI * 1.5),
            BOTTOM_RIGHT => (self.x2 - rx, self.y1 + ry, PI * 1.5, 0.0),
            TOP_RIGHT => (self.x2 - rx, self.y2 - ry, 0.0, PI * 0.5),
            _ => (self.x1 + rx, self.y2 - ry, PI * 0.5, PI),
        }
    }
}

impl Default for RoundedRect {
    /// Empty rectangle at the origin with square corners.
    fn default() -> Self {
        Self {
            x1: 0.0,
            y1: 0.0,
            x2: 0.0,
            y2: 0.0,
            rx: [0.0; 4],
            ry: [0.0; 4],
            status: Status::StartCorner(BOTTOM_LEFT),
            arc: Arc::default(),
        }
    }
}

impl VertexSource for RoundedRect {
    fn rewind(&mut self, _path_id: u32) {
        self.status = Status::StartCorner(BOTTOM_LEFT);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        loop {
            match self.status {
                Status::StartCorner(corner) => {
                    let (cx, cy, a1, a2) = self.corner_arc(corner);
                    self.arc
                        .init(cx, cy, self.rx[corner], self.ry[corner], a1, a2, true);
                    self.arc.rewind(0);
                    self.status = Status::Corner(corner);
                }
                Status::Corner(corner) => {
                    let cmd = self.arc.vertex(x, y);
                    if !is_stop(cmd) {
                        // Later arcs join the previous one with an edge.
                        return if corner == BOTTOM_LEFT {
                            cmd
                        } else {
                            PATH_CMD_LINE_TO
                        };
                    }
                    self.status = if corner == TOP_LEFT {
                        Status::EndPoly
                    } else {
                        Status::StartCorner(corner + 1)
                    };
                }
                Status::EndPoly => {
                    self.status = Status::Stop;
                    return PATH_CMD_END_POLY | PATH_FLAGS_CLOSE | PATH_FLAGS_CCW;
                }
                Status::Stop => return PATH_CMD_STOP,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::{is_close, is_end_poly, is_move_to, is_vertex, PATH_CMD_MOVE_TO};

    fn collect_vertices<VS: VertexSource>(vs: &mut VS) -> Vec<(f64, f64, u32)> {
        vs.rewind(0);
        let mut out = Vec::new();
        loop {
            let (mut x, mut y) = (0.0, 0.0);
            let cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                return out;
            }
            out.push((x, y, cmd));
        }
    }

    fn assert_fits(rr: &RoundedRect, w: f64, h: f64) {
        let r = rr.radii();
        let eps = 1e-9;
        assert!(r[0].0 + r[1].0 <= w + eps);
        assert!(r[2].0 + r[3].0 <= w + eps);
        assert!(r[0].1 + r[3].1 <= h + eps);
        assert!(r[1].1 + r[2].1 <= h + eps);
        assert!(r[0].0 + r[2].0 <= w + eps);
        assert!(r[1].0 + r[3].0 <= w + eps);
        assert!(r[0].1 + r[2].1 <= h + eps);
        assert!(r[1].1 + r[3].1 <= h + eps);
    }

    #[test]
    fn test_rect_is_normalized() {
        let rr = RoundedRect::new(100.0, 200.0, 50.0, 30.0, 5.0);
        assert_eq!((rr.x1, rr.y1, rr.x2, rr.y2), (50.0, 30.0, 100.0, 200.0));
    }

    #[test]
    fn test_radius_overloads() {
        let mut rr = RoundedRect::default();
        rr.radius(10.0);
        assert_eq!(rr.radii(), [(10.0, 10.0); 4]);

        rr.radius_xy(10.0, 5.0);
        assert_eq!(rr.radii(), [(10.0, 5.0); 4]);

        rr.radius_bottom_top(3.0, 4.0, 5.0, 6.0);
        assert_eq!(rr.radii(), [(3.0, 4.0), (3.0, 4.0), (5.0, 6.0), (5.0, 6.0)]);

        rr.radius_all(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0);
        assert_eq!(rr.radii(), [(1.0, 2.0), (3.0, 4.0), (5.0, 6.0), (7.0, 8.0)]);
    }

    #[test]
    fn test_normalize_keeps_small_radii() {
        let mut rr = RoundedRect::new(0.0, 0.0, 100.0, 50.0, 5.0);
        rr.normalize_radius();
        assert_eq!(rr.radii(), [(5.0, 5.0); 4]);
    }

    #[test]
    fn test_normalize_uses_width_for_rx_and_height_for_ry() {
        // Wide and short: only the vertical radii overflow.
        let mut rr = RoundedRect::new(0.0, 0.0, 100.0, 10.0, 0.0);
        rr.radius_xy(10.0, 10.0);
        rr.normalize_radius();
        let r = rr.radii();
        assert!((r[0].1 - 5.0).abs() < 1e-12);
        assert!((r[0].0 - 5.0).abs() < 1e-12);
        assert_fits(&rr, 100.0, 10.0);
    }

    #[test]
    fn test_normalize_limits_diagonal_corners() {
        // Only the bottom-left and top-right corners are rounded, so no
        // edge pair overflows but the diagonal pair does.
        let mut rr = RoundedRect::new(0.0, 0.0, 100.0, 10.0, 0.0);
        rr.radius_all(0.0, 9.0, 0.0, 0.0, 0.0, 9.0, 0.0, 0.0);
        rr.normalize_radius();
        let r = rr.radii();
        assert!((r[BOTTOM_LEFT].1 - 5.0).abs() < 1e-12);
        assert!((r[TOP_RIGHT].1 - 5.0).abs() < 1e-12);
        assert_fits(&rr, 100.0, 10.0);
    }

    #[test]
    fn test_normalize_oversized_radii() {
        let cases = [
            (20.0, 20.0, [15.0, 15.0, 15.0, 15.0, 15.0, 15.0, 15.0, 15.0]),
            (40.0, 10.0, [30.0, 1.0, 1.0, 30.0, 50.0, 2.0, 0.0, 9.0]),
            (5.0, 80.0, [1.0, 70.0, 9.0, 0.5, 3.0, 3.0, 0.0, 40.0]),
        ];
        for (w, h, r) in cases {
            let mut rr = RoundedRect::new(0.0, 0.0, w, h, 0.0);
            rr.radius_all(r[0], r[1], r[2], r[3], r[4], r[5], r[6], r[7]);
            rr.normalize_radius();
            assert_fits(&rr, w, h);
        }
    }

    #[test]
    fn test_outline_shape() {
        let mut rr = RoundedRect::new(10.0, 10.0, 90.0, 90.0, 10.0);
        let v = collect_vertices(&mut rr);

        assert!(is_move_to(v[0].2));
        assert_eq!(v.iter().filter(|p| is_move_to(p.2)).count(), 1);
        assert!(v.iter().filter(|p| is_vertex(p.2)).count() > 8);

        let last = v[v.len() - 1];
        assert!(is_end_poly(last.2) && is_close(last.2));
        assert_ne!(last.2 & PATH_FLAGS_CCW, 0);

        for p in v.iter().filter(|p| is_vertex(p.2)) {
            assert!(p.0 >= 10.0 - 1e-9 && p.0 <= 90.0 + 1e-9);
            assert!(p.1 >= 10.0 - 1e-9 && p.1 <= 90.0 + 1e-9);
        }
    }

    #[test]
    fn test_corner_end_points() {
        let mut rr = RoundedRect::new(10.0, 20.0, 90.0, 80.0, 10.0);
        let v = collect_vertices(&mut rr);
        let near = |x: f64, y: f64| v.iter().any(|p| (p.0 - x).abs() < 1e-9 && (p.1 - y).abs() < 1e-9);

        assert_eq!(v[0].2, PATH_CMD_MOVE_TO);
        assert!((v[0].0 - 10.0).abs() < 1e-9 && (v[0].1 - 30.0).abs() < 1e-9);
        assert!(near(20.0, 20.0));
        assert!(near(80.0, 20.0));
        assert!(near(90.0, 30.0));
        assert!(near(90.0, 70.0));
        assert!(near(80.0, 80.0));
        assert!(near(20.0, 80.0));
        assert!(near(10.0, 70.0));
    }

    #[test]
    fn test_square_corners() {
        let mut rr = RoundedRect::new(0.0, 0.0, 100.0, 50.0, 0.0);
        let v = collect_vertices(&mut rr);
        let pts: Vec<_> = v.iter().filter(|p| is_vertex(p.2)).collect();
        assert!(pts.len() >= 4);
        for p in pts {
            let on_x = p.0.abs() < 1e-9 || (p.0 - 100.0).abs() < 1e-9;
            let on_y = p.1.abs() < 1e-9 || (p.1 - 50.0).abs() < 1e-9;
            assert!(on_x && on_y, "({}, {}) is not a corner", p.0, p.1);
        }
    }

    #[test]
    fn test_rewind_replays() {
        let mut rr = RoundedRect::new(0.0, 0.0, 30.0, 20.0, 4.0);
        rr.set_approximation_scale(2.0);
        assert_eq!(rr.approximation_scale(), 2.0);
        assert_eq!(collect_vertices(&mut rr), collect_vertices(&mut rr));
    }

    #[test]
    fn test_finer_scale_adds_vertices() {
        let mut coarse = RoundedRect::new(0.0, 0.0, 300.0, 300.0, 50.0);
        let mut fine = coarse.clone();
        fine.set_approximation_scale(8.0);
        assert!(collect_vertices(&mut fine).len() > collect_vertices(&mut coarse).len());
    }
}
