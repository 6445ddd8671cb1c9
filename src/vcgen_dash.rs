//! Dash generator.
//!
//! Port of `agg_vcgen_dash.h`. One sub-path is buffered into a
//! [`VertexSequence`] and re-emitted as alternating drawn and skipped runs:
//! a drawn run ends in `line_to`, a gap ends in `move_to`.

use log::debug;

use crate::basics::{
    get_close_flag, is_move_to, is_vertex, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP,
};
use crate::conv_adaptor_vcgen::VcgenGenerator;
use crate::shorten_path::shorten_path;
use crate::vertex_sequence::{VertexDist, VertexSequence};

/// Capacity of the pattern, in lengths (16 dash/gap pairs).
pub const MAX_DASHES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Initial,
    Ready,
    Polyline,
    Stop,
}

// ============================================================================
// VcgenDash
// ============================================================================

/// Re-segments a polyline according to a dash pattern.
///
/// The pattern is a cyclic list of lengths: even entries are drawn, odd
/// entries are gaps. A non-negative phase set with
/// [`dash_start`](Self::dash_start) is consumed before the first vertex.
#[derive(Debug, Clone)]
pub struct VcgenDash {
    dashes: [f64; MAX_DASHES],
    num_dashes: usize,
    total_dash_len: f64,
    dash_start: f64,
    shorten: f64,

    // Cursor into the pattern.
    curr_dash: usize,
    curr_dash_start: f64,

    // Cursor along the path.
    curr_rest: f64,
    v1: usize,
    v2: usize,
    src_vertex: usize,

    src_vertices: VertexSequence,
    closed: bool,
    status: Status,
}

impl VcgenDash {
    pub fn new() -> Self {
        Self {
            dashes: [0.0; MAX_DASHES],
            num_dashes: 0,
            total_dash_len: 0.0,
            dash_start: 0.0,
            shorten: 0.0,
            curr_dash: 0,
            curr_dash_start: 0.0,
            curr_rest: 0.0,
            v1: 0,
            v2: 0,
            src_vertex: 0,
            src_vertices: VertexSequence::new(),
            closed: false,
            status: Status::Initial,
        }
    }

    // ------------------------------------------------------------------
    // Pattern
    // ------------------------------------------------------------------

    pub fn remove_all_dashes(&mut self) {
        self.num_dashes = 0;
        self.total_dash_len = 0.0;
        self.curr_dash = 0;
        self.curr_dash_start = 0.0;
    }

    /// Append a dash/gap pair. Pairs past the capacity are ignored.
    pub fn add_dash(&mut self, dash_len: f64, gap_len: f64) {
        if self.num_dashes + 2 > MAX_DASHES {
            debug!(
                "dash pattern full ({} lengths); ignoring ({}, {})",
                MAX_DASHES, dash_len, gap_len
            );
            return;
        }
        self.dashes[self.num_dashes] = dash_len;
        self.dashes[self.num_dashes + 1] = gap_len;
        self.num_dashes += 2;
        self.total_dash_len += dash_len + gap_len;
    }

    /// Set the phase. A negative value keeps the pattern cursor where the
    /// previous sub-path left it.
    pub fn dash_start(&mut self, ds: f64) {
        self.dash_start = ds;
        self.calc_dash_start(ds.abs());
    }

    pub fn num_dashes(&self) -> usize {
        self.num_dashes
    }

    pub fn total_dash_len(&self) -> f64 {
        self.total_dash_len
    }

    pub fn set_shorten(&mut self, s: f64) {
        self.shorten = s;
    }

    pub fn shorten(&self) -> f64 {
        self.shorten
    }

    /// Walk the pattern until `ds` falls strictly inside one element. A
    /// phase ending exactly on an element boundary starts the next one.
    fn calc_dash_start(&mut self, ds: f64) {
        self.curr_dash = 0;
        self.curr_dash_start = 0.0;
        if self.num_dashes < 2 || self.total_dash_len <= 0.0 {
            return;
        }

        let mut ds = ds % self.total_dash_len;
        while ds > 0.0 {
            let len = self.dashes[self.curr_dash];
            if ds >= len {
                ds -= len;
                self.next_dash();
            } else {
                self.curr_dash_start = ds;
                ds = 0.0;
            }
        }
    }

    fn next_dash(&mut self) {
        self.curr_dash += 1;
        if self.curr_dash >= self.num_dashes {
            self.curr_dash = 0;
        }
        self.curr_dash_start = 0.0;
    }

    // ------------------------------------------------------------------
    // Generator interface
    // ------------------------------------------------------------------

    pub fn remove_all(&mut self) {
        self.status = Status::Initial;
        self.src_vertices.remove_all();
        self.closed = false;
    }

    pub fn add_vertex(&mut self, x: f64, y: f64, cmd: u32) {
        self.status = Status::Initial;
        if is_move_to(cmd) {
            self.src_vertices.modify_last(VertexDist::new(x, y));
        } else if is_vertex(cmd) {
            self.src_vertices.add(VertexDist::new(x, y));
        } else {
            self.closed = get_close_flag(cmd) != 0;
        }
    }

    pub fn rewind(&mut self, _path_id: u32) {
        if self.status == Status::Initial {
            self.src_vertices.close(self.closed);
            shorten_path(&mut self.src_vertices, self.shorten, self.closed);
        }
        self.status = Status::Ready;
        self.src_vertex = 0;
    }

    pub fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        loop {
            match self.status {
                Status::Initial => self.rewind(0),
                Status::Ready => {
                    if self.num_dashes < 2
                        || self.total_dash_len <= 0.0
                        || self.src_vertices.size() < 2
                    {
                        self.status = Status::Stop;
                        continue;
                    }
                    self.status = Status::Polyline;
                    self.src_vertex = 1;
                    self.v1 = 0;
                    self.v2 = 1;
                    self.curr_rest = self.src_vertices[0].dist;
                    *x = self.src_vertices[0].x;
                    *y = self.src_vertices[0].y;
                    if self.dash_start >= 0.0 {
                        self.calc_dash_start(self.dash_start);
                    }
                    return PATH_CMD_MOVE_TO;
                }
                Status::Polyline => return self.step(x, y),
                Status::Stop => return PATH_CMD_STOP,
            }
        }
    }

    /// Emit the next dash boundary or path vertex, whichever comes first.
    fn step(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        let cmd = if self.curr_dash & 1 == 0 {
            PATH_CMD_LINE_TO
        } else {
            PATH_CMD_MOVE_TO
        };
        let dash_rest = self.dashes[self.curr_dash] - self.curr_dash_start;
        let v1 = self.src_vertices[self.v1];
        let v2 = self.src_vertices[self.v2];

        if self.curr_rest > dash_rest {
            // Boundary falls inside the current segment.
            self.curr_rest -= dash_rest;
            self.next_dash();
            let k = self.curr_rest / v1.dist;
            *x = v2.x - (v2.x - v1.x) * k;
            *y = v2.y - (v2.y - v1.y) * k;
            return cmd;
        }

        self.curr_dash_start += self.curr_rest;
        *x = v2.x;
        *y = v2.y;
        self.src_vertex += 1;
        self.v1 = self.v2;
        self.curr_rest = self.src_vertices[self.v1].dist;

        let n = self.src_vertices.size();
        if self.closed {
            if self.src_vertex > n {
                self.status = Status::Stop;
            } else {
                self.v2 = if self.src_vertex >= n { 0 } else { self.src_vertex };
            }
        } else if self.src_vertex >= n {
            self.status = Status::Stop;
        } else {
            self.v2 = self.src_vertex;
        }
        cmd
    }
}

impl Default for VcgenDash {
    fn default() -> Self {
        Self::new()
    }
}

impl VcgenGenerator for VcgenDash {
    fn remove_all(&mut self) {
        VcgenDash::remove_all(self);
    }

    fn add_vertex(&mut self, x: f64, y: f64, cmd: u32) {
        VcgenDash::add_vertex(self, x, y, cmd);
    }

    fn rewind(&mut self, path_id: u32) {
        VcgenDash::rewind(self, path_id);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        VcgenDash::vertex(self, x, y)
    }
}

// ============================================================================
// Tests
// ============================================================================
