//! Pipeline stage that runs a source through a segment-at-a-time processor.
//!
//! Port of `agg_conv_adaptor_vpgen.h`. The adaptor owns the path bookkeeping
//! (sub-path start, close flags, automatic closing) so processors only see
//! `move_to`/`line_to` and hand back whatever vertices each segment became.

use crate::basics::{
    is_closed, is_end_poly, is_move_to, is_stop, is_vertex, PointD, VertexSource,
    PATH_CMD_END_POLY, PATH_CMD_STOP, PATH_FLAGS_CLOSE,
};

/// A vertex processor: consumes one segment at a time and buffers the
/// vertices it produces until they are drained through `vertex`.
pub trait VpgenProcessor {
    /// Close every polygon with an explicit edge back to its start.
    const AUTO_CLOSE: bool;
    /// Swallow the end-of-polygon commands of the source.
    const AUTO_UNCLOSE: bool;

    fn reset(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32;
}

/// What to do once the processor runs dry, before reading the source again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Nothing,
    /// A polygon was auto-closed because a new one started; open it now.
    MoveToStart,
    /// A polygon was auto-closed because the source ended.
    Finish,
}

/// Feeds a [`VertexSource`] through a [`VpgenProcessor`].
pub struct ConvAdaptorVpgen<VS, Gen> {
    source: VS,
    vpgen: Gen,
    start: PointD,
    poly_flags: u32,
    vertices: usize,
    pending: Pending,
}

impl<VS: VertexSource, Gen: VpgenProcessor> ConvAdaptorVpgen<VS, Gen> {
    pub fn new(source: VS, vpgen: Gen) -> Self {
        Self {
            source,
            vpgen,
            start: PointD::default(),
            poly_flags: 0,
            vertices: 0,
            pending: Pending::Nothing,
        }
    }

    pub fn source(&self) -> &VS {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut VS {
        &mut self.source
    }

    pub fn vpgen(&self) -> &Gen {
        &self.vpgen
    }

    pub fn vpgen_mut(&mut self) -> &mut Gen {
        &mut self.vpgen
    }

    fn close_to_start(&mut self) {
        self.vpgen.line_to(self.start.x, self.start.y);
        self.poly_flags = PATH_CMD_END_POLY | PATH_FLAGS_CLOSE;
    }
}

impl<VS: VertexSource, Gen: VpgenProcessor> VertexSource for ConvAdaptorVpgen<VS, Gen> {
    fn rewind(&mut self, path_id: u32) {
        self.source.rewind(path_id);
        self.vpgen.reset();
        self.start = PointD::default();
        self.poly_flags = 0;
        self.vertices = 0;
        self.pending = Pending::Nothing;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        loop {
            let cmd = self.vpgen.vertex(x, y);
            if !is_stop(cmd) {
                return cmd;
            }

            if self.poly_flags != 0 && !Gen::AUTO_UNCLOSE {
                *x = 0.0;
                *y = 0.0;
                return core::mem::take(&mut self.poly_flags);
            }

            match self.pending {
                Pending::Finish => {
                    self.pending = Pending::Nothing;
                    self.vertices = 0;
                    return PATH_CMD_STOP;
                }
                Pending::MoveToStart => {
                    self.pending = Pending::Nothing;
                    self.vpgen.move_to(self.start.x, self.start.y);
                    self.vertices = 1;
                    continue;
                }
                Pending::Nothing => {}
            }

            let (mut tx, mut ty) = (0.0, 0.0);
            let cmd = self.source.vertex(&mut tx, &mut ty);

            if is_vertex(cmd) {
                if is_move_to(cmd) {
                    if Gen::AUTO_CLOSE && self.vertices > 2 {
                        self.close_to_start();
                        self.start = PointD::new(tx, ty);
                        self.vertices = 0;
                        self.pending = Pending::MoveToStart;
                        continue;
                    }
                    self.vpgen.move_to(tx, ty);
                    self.start = PointD::new(tx, ty);
                    self.vertices = 1;
                } else {
                    self.vpgen.line_to(tx, ty);
                    self.vertices += 1;
                }
            } else if is_end_poly(cmd) {
                self.poly_flags = cmd;
                if is_closed(cmd) || Gen::AUTO_CLOSE {
                    if Gen::AUTO_CLOSE {
                        self.poly_flags |= PATH_FLAGS_CLOSE;
                    }
                    if self.vertices > 2 {
                        self.vpgen.line_to(self.start.x, self.start.y);
                    }
                    self.vertices = 0;
                }
            } else {
                if Gen::AUTO_CLOSE && self.vertices > 2 {
                    self.close_to_start();
                    self.pending = Pending::Finish;
                    continue;
                }
                return PATH_CMD_STOP;
            }
        }
    }
}
