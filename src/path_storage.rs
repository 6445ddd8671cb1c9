//! Path container feeding the generators.
//!
//! Port of the parts of `agg_path_storage.h` that build paths: absolute
//! `move_to`/`line_to`/`curve4`, SVG arcs, polygon ends and joining other
//! sources. Records live in a [`PodBvector`], so growing a long path never
//! moves the vertices already stored.

use bytemuck::{Pod, Zeroable};

use crate::basics::{
    is_move_to, is_stop, is_vertex, VertexSource, PATH_CMD_CURVE4, PATH_CMD_END_POLY,
    PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP, PATH_FLAGS_CLOSE,
};
use crate::bezier_arc::BezierArcSvg;
use crate::math::{calc_distance, VERTEX_DIST_EPSILON};
use crate::pod_bvector::PodBvector;

/// One stored vertex. `cmd` is kept as `u32` with explicit padding so the
/// record stays plain old data.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
struct PathRecord {
    x: f64,
    y: f64,
    cmd: u32,
    _pad: u32,
}

impl PathRecord {
    fn new(x: f64, y: f64, cmd: u32) -> Self {
        Self { x, y, cmd, _pad: 0 }
    }
}

/// Ordered `(x, y, cmd)` records; a [`VertexSource`] over them.
#[derive(Debug, Clone, Default)]
pub struct PathStorage {
    records: PodBvector<PathRecord>,
    iterator: usize,
}

impl PathStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove_all(&mut self) {
        self.records.remove_all();
        self.iterator = 0;
    }

    pub fn total_vertices(&self) -> usize {
        self.records.size()
    }

    /// Command of the last record, or `PATH_CMD_STOP` when empty.
    pub fn last_command(&self) -> u32 {
        self.records.last().map_or(PATH_CMD_STOP, |r| r.cmd)
    }

    /// Coordinates and command of the last record.
    pub fn last_vertex(&self) -> Option<(f64, f64, u32)> {
        self.records.last().map(|r| (r.x, r.y, r.cmd))
    }

    /// Coordinates and command of record `idx`.
    pub fn vertex_at(&self, idx: usize) -> Option<(f64, f64, u32)> {
        self.records.get(idx).map(|r| (r.x, r.y, r.cmd))
    }

    fn push(&mut self, x: f64, y: f64, cmd: u32) {
        self.records.add(PathRecord::new(x, y, cmd));
    }

    // ========================================================================
    // Building
    // ========================================================================

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.push(x, y, PATH_CMD_MOVE_TO);
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.push(x, y, PATH_CMD_LINE_TO);
    }

    /// Cubic Bezier from the current point through two control points.
    pub fn curve4(
        &mut self,
        x_ctrl1: f64,
        y_ctrl1: f64,
        x_ctrl2: f64,
        y_ctrl2: f64,
        x: f64,
        y: f64,
    ) {
        self.push(x_ctrl1, y_ctrl1, PATH_CMD_CURVE4);
        self.push(x_ctrl2, y_ctrl2, PATH_CMD_CURVE4);
        self.push(x, y, PATH_CMD_CURVE4);
    }

    /// SVG `A` command from the current point to `(x, y)`.
    ///
    /// With no current point this is a `move_to`. A zero radius draws a
    /// straight line, and an arc ending where it starts adds nothing.
    #[allow(clippy::too_many_arguments)]
    pub fn arc_to(
        &mut self,
        rx: f64,
        ry: f64,
        angle: f64,
        large_arc_flag: bool,
        sweep_flag: bool,
        x: f64,
        y: f64,
    ) {
        let Some((x0, y0, _)) = self.last_vertex().filter(|v| is_vertex(v.2)) else {
            self.move_to(x, y);
            return;
        };

        if rx.abs() < VERTEX_DIST_EPSILON || ry.abs() < VERTEX_DIST_EPSILON {
            self.line_to(x, y);
            return;
        }
        if calc_distance(x0, y0, x, y) < VERTEX_DIST_EPSILON {
            return;
        }

        let mut arc =
            BezierArcSvg::new_with_params(x0, y0, rx, ry, angle, large_arc_flag, sweep_flag, x, y);
        if arc.radii_ok() {
            self.join_path(&mut arc, 0);
        } else {
            self.line_to(x, y);
        }
    }

    /// Terminate the current polygon with `flags` (close, orientation).
    /// Ignored unless the last record is a vertex.
    pub fn end_poly(&mut self, flags: u32) {
        if is_vertex(self.last_command()) {
            self.push(0.0, 0.0, PATH_CMD_END_POLY | flags);
        }
    }

    pub fn close_polygon(&mut self) {
        self.end_poly(PATH_FLAGS_CLOSE);
    }

    // ========================================================================
    // Combining
    // ========================================================================

    /// Append every command of `vs` unchanged.
    pub fn concat_path<VS: VertexSource + ?Sized>(&mut self, vs: &mut VS, path_id: u32) {
        vs.rewind(path_id);
        loop {
            let (mut x, mut y) = (0.0, 0.0);
            let cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            self.push(x, y, cmd);
        }
    }

    /// Append `vs` as a continuation of the current sub-path: its
    /// `move_to`s become `line_to`s, and a first point equal to the current
    /// point is dropped.
    pub fn join_path<VS: VertexSource + ?Sized>(&mut self, vs: &mut VS, path_id: u32) {
        vs.rewind(path_id);
        let (mut x, mut y) = (0.0, 0.0);
        let mut cmd = vs.vertex(&mut x, &mut y);
        if is_stop(cmd) {
            return;
        }

        if is_vertex(cmd) {
            match self.last_vertex() {
                Some((x0, y0, cmd0)) if is_vertex(cmd0) => {
                    if calc_distance(x, y, x0, y0) > VERTEX_DIST_EPSILON {
                        if is_move_to(cmd) {
                            cmd = PATH_CMD_LINE_TO;
                        }
                        self.push(x, y, cmd);
                    }
                }
                last => {
                    if last.is_none() || last.is_some_and(|v| is_stop(v.2)) {
                        cmd = PATH_CMD_MOVE_TO;
                    } else if is_move_to(cmd) {
                        cmd = PATH_CMD_LINE_TO;
                    }
                    self.push(x, y, cmd);
                }
            }
        }

        loop {
            cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            self.push(x, y, if is_move_to(cmd) { PATH_CMD_LINE_TO } else { cmd });
        }
    }
}

impl VertexSource for PathStorage {
    /// `path_id` is the record index iteration starts from.
    fn rewind(&mut self, path_id: u32) {
        self.iterator = path_id as usize;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        let Some(r) = self.records.get(self.iterator) else {
            return PATH_CMD_STOP;
        };
        *x = r.x;
        *y = r.y;
        self.iterator += 1;
        r.cmd
    }
}
