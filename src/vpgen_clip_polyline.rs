//! Polyline clipping processor.
//!
//! Port of `agg_vpgen_clip_polyline.h`. Each incoming segment is clipped
//! with [`clip_line_segment`]; whenever the visible part starts on the
//! boundary, a fresh `move_to` opens a new sub-path there.

use crate::basics::{PointD, RectD, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP};
use crate::clip_liang_barsky::{
    clip_line_segment, CLIP_FIRST_MOVED, CLIP_FULLY_CLIPPED, CLIP_SECOND_MOVED,
};
use crate::conv_adaptor_vpgen::VpgenProcessor;

/// Clips open polylines to a rectangle, splitting them where they leave
/// and re-enter the box.
#[derive(Debug, Clone)]
pub struct VpgenClipPolyline {
    clip_box: RectD,
    last: PointD,
    out: [PointD; 2],
    cmds: [u32; 2],
    num_vertices: usize,
    vertex: usize,
    move_to: bool,
}

impl VpgenClipPolyline {
    pub fn new() -> Self {
        Self {
            clip_box: RectD::new(0.0, 0.0, 1.0, 1.0),
            last: PointD::default(),
            out: [PointD::default(); 2],
            cmds: [PATH_CMD_STOP; 2],
            num_vertices: 0,
            vertex: 0,
            move_to: false,
        }
    }

    /// Set the clip rectangle; the corners may come in any order.
    pub fn clip_box(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.clip_box = RectD::new(x1, y1, x2, y2);
        self.clip_box.normalize();
    }

    pub fn x1(&self) -> f64 {
        self.clip_box.x1
    }

    pub fn y1(&self) -> f64 {
        self.clip_box.y1
    }

    pub fn x2(&self) -> f64 {
        self.clip_box.x2
    }

    pub fn y2(&self) -> f64 {
        self.clip_box.y2
    }

    fn push(&mut self, p: PointD, cmd: u32) {
        self.out[self.num_vertices] = p;
        self.cmds[self.num_vertices] = cmd;
        self.num_vertices += 1;
    }
}

impl Default for VpgenClipPolyline {
    fn default() -> Self {
        Self::new()
    }
}

impl VpgenProcessor for VpgenClipPolyline {
    const AUTO_CLOSE: bool = false;
    const AUTO_UNCLOSE: bool = true;

    fn reset(&mut self) {
        self.vertex = 0;
        self.num_vertices = 0;
        self.move_to = false;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.vertex = 0;
        self.num_vertices = 0;
        self.last = PointD::new(x, y);
        self.move_to = true;
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let mut p1 = self.last;
        let mut p2 = PointD::new(x, y);
        let flags = clip_line_segment(&mut p1, &mut p2, &self.clip_box);

        self.vertex = 0;
        self.num_vertices = 0;
        if flags & CLIP_FULLY_CLIPPED == 0 {
            if flags & CLIP_FIRST_MOVED != 0 || self.move_to {
                self.push(p1, PATH_CMD_MOVE_TO);
            }
            self.push(p2, PATH_CMD_LINE_TO);
            self.move_to = flags & CLIP_SECOND_MOVED != 0;
        }
        self.last = PointD::new(x, y);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if self.vertex >= self.num_vertices {
            return PATH_CMD_STOP;
        }
        let p = self.out[self.vertex];
        *x = p.x;
        *y = p.y;
        let cmd = self.cmds[self.vertex];
        self.vertex += 1;
        cmd
    }
}
