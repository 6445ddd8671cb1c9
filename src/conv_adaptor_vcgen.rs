//! Pipeline stage that buffers one sub-path at a time into a generator.
//!
//! Port of `agg_conv_adaptor_vcgen.h` (without markers). The adaptor reads
//! the source until the next `move_to`, end of polygon or stop, hands that
//! sub-path to the generator and then drains the generator's output.

use crate::basics::{
    is_end_poly, is_move_to, is_stop, is_vertex, PointD, VertexSource, PATH_CMD_MOVE_TO,
    PATH_CMD_STOP,
};

/// A vertex generator: accumulates a sub-path, then re-emits it reshaped.
pub trait VcgenGenerator {
    fn remove_all(&mut self);
    fn add_vertex(&mut self, x: f64, y: f64, cmd: u32);
    fn rewind(&mut self, path_id: u32);
    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Initial,
    Accumulate,
    Generate,
}

/// Connects a [`VertexSource`] to a [`VcgenGenerator`].
pub struct ConvAdaptorVcgen<VS, Gen> {
    source: VS,
    generator: Gen,
    status: Status,
    last_cmd: u32,
    start: PointD,
}

impl<VS: VertexSource, Gen: VcgenGenerator> ConvAdaptorVcgen<VS, Gen> {
    pub fn new(source: VS, generator: Gen) -> Self {
        Self {
            source,
            generator,
            status: Status::Initial,
            last_cmd: PATH_CMD_STOP,
            start: PointD::default(),
        }
    }

    pub fn generator(&self) -> &Gen {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut Gen {
        &mut self.generator
    }

    pub fn source(&self) -> &VS {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut VS {
        &mut self.source
    }

    /// Feed the generator the sub-path opened by `self.start`. Stops at the
    /// next `move_to` (remembered as the next start), end of polygon or stop.
    fn accumulate(&mut self, x: &mut f64, y: &mut f64) {
        self.generator.remove_all();
        self.generator
            .add_vertex(self.start.x, self.start.y, PATH_CMD_MOVE_TO);

        loop {
            let cmd = self.source.vertex(x, y);
            if is_vertex(cmd) {
                self.last_cmd = cmd;
                if is_move_to(cmd) {
                    self.start = PointD::new(*x, *y);
                    return;
                }
                self.generator.add_vertex(*x, *y, cmd);
            } else if is_stop(cmd) {
                self.last_cmd = PATH_CMD_STOP;
                return;
            } else if is_end_poly(cmd) {
                self.generator.add_vertex(*x, *y, cmd);
                return;
            }
        }
    }
}

impl<VS: VertexSource, Gen: VcgenGenerator> VertexSource for ConvAdaptorVcgen<VS, Gen> {
    fn rewind(&mut self, path_id: u32) {
        self.source.rewind(path_id);
        self.status = Status::Initial;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        loop {
            match self.status {
                Status::Initial => {
                    let (mut sx, mut sy) = (0.0, 0.0);
                    self.last_cmd = self.source.vertex(&mut sx, &mut sy);
                    self.start = PointD::new(sx, sy);
                    self.status = Status::Accumulate;
                }
                Status::Accumulate => {
                    if is_stop(self.last_cmd) {
                        return PATH_CMD_STOP;
                    }
                    self.accumulate(x, y);
                    self.generator.rewind(0);
                    self.status = Status::Generate;
                }
                Status::Generate => {
                    let cmd = self.generator.vertex(x, y);
                    if !is_stop(cmd) {
                        return cmd;
                    }
                    self.status = Status::Accumulate;
                }
            }
        }
    }
}
