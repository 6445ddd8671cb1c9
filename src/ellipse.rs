//! Ellipse generator.
//!
//! Port of `agg_ellipse.h`: a closed regular polygon inscribed in the
//! ellipse, with the vertex count either given or derived from the
//! approximation scale.

use crate::arc::arc_step;
use crate::basics::{
    VertexSource, PATH_CMD_END_POLY, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP,
    PATH_FLAGS_CCW, PATH_FLAGS_CLOSE, PI,
};

/// Closed polygon approximating an ellipse.
#[derive(Debug, Clone)]
pub struct Ellipse {
    x: f64,
    y: f64,
    rx: f64,
    ry: f64,
    scale: f64,
    num: u32,
    step: u32,
    cw: bool,
}

impl Ellipse {
    /// `num_steps == 0` derives the vertex count from the radii.
    pub fn new(x: f64, y: f64, rx: f64, ry: f64, num_steps: u32, cw: bool) -> Self {
        let mut e = Self::default();
        e.init(x, y, rx, ry, num_steps, cw);
        e
    }

    pub fn init(&mut self, x: f64, y: f64, rx: f64, ry: f64, num_steps: u32, cw: bool) {
        self.x = x;
        self.y = y;
        self.rx = rx;
        self.ry = ry;
        self.num = num_steps;
        self.step = 0;
        self.cw = cw;
        if self.num == 0 {
            self.calc_num_steps();
        }
    }

    pub fn set_approximation_scale(&mut self, scale: f64) {
        self.scale = scale;
        self.calc_num_steps();
    }

    pub fn approximation_scale(&self) -> f64 {
        self.scale
    }

    /// Number of polygon vertices emitted per traversal.
    pub fn num_steps(&self) -> u32 {
        self.num
    }

    fn calc_num_steps(&mut self) {
        let da = arc_step(self.rx, self.ry, self.scale);
        self.num = ((2.0 * PI / da) + 0.5) as u32;
    }
}

impl Default for Ellipse {
    /// Unit circle at the origin drawn as a square.
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rx: 1.0,
            ry: 1.0,
            scale: 1.0,
            num: 4,
            step: 0,
            cw: false,
        }
    }
}

impl VertexSource for Ellipse {
    fn rewind(&mut self, _path_id: u32) {
        self.step = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if self.step == self.num {
            self.step += 1;
            return PATH_CMD_END_POLY | PATH_FLAGS_CLOSE | PATH_FLAGS_CCW;
        }
        if self.step > self.num {
            return PATH_CMD_STOP;
        }

        let mut angle = f64::from(self.step) / f64::from(self.num) * 2.0 * PI;
        if self.cw {
            angle = 2.0 * PI - angle;
        }
        *x = self.x + angle.cos() * self.rx;
        *y = self.y + angle.sin() * self.ry;
        self.step += 1;
        if self.step == 1 {
            PATH_CMD_MOVE_TO
        } else {
            PATH_CMD_LINE_TO
        }
    }
}
