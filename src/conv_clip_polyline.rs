//! Polyline clipping converter.
//!
//! Port of `agg_conv_clip_polyline.h`: a [`ConvAdaptorVpgen`] bound to
//! [`VpgenClipPolyline`]. Close commands of the source are dropped; the
//! output is always a set of open polylines.

use crate::basics::VertexSource;
use crate::conv_adaptor_vpgen::ConvAdaptorVpgen;
use crate::vpgen_clip_polyline::VpgenClipPolyline;

/// Clips the polylines of a vertex source to a rectangle.
pub struct ConvClipPolyline<VS> {
    inner: ConvAdaptorVpgen<VS, VpgenClipPolyline>,
}

impl<VS: VertexSource> ConvClipPolyline<VS> {
    pub fn new(source: VS) -> Self {
        Self {
            inner: ConvAdaptorVpgen::new(source, VpgenClipPolyline::new()),
        }
    }

    pub fn clip_box(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.inner.vpgen_mut().clip_box(x1, y1, x2, y2);
    }

    pub fn x1(&self) -> f64 {
        self.inner.vpgen().x1()
    }

    pub fn y1(&self) -> f64 {
        self.inner.vpgen().y1()
    }

    pub fn x2(&self) -> f64 {
        self.inner.vpgen().x2()
    }

    pub fn y2(&self) -> f64 {
        self.inner.vpgen().y2()
    }

    pub fn source(&self) -> &VS {
        self.inner.source()
    }

    pub fn source_mut(&mut self) -> &mut VS {
        self.inner.source_mut()
    }
}

impl<VS: VertexSource> VertexSource for ConvClipPolyline<VS> {
    fn rewind(&mut self, path_id: u32) {
        self.inner.rewind(path_id);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        self.inner.vertex(x, y)
    }
}
