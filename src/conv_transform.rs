//! Affine transform stage.
//!
//! Port of `agg_conv_transform.h`: forwards every vertex of the source
//! through a [`TransAffine`]. Nothing is buffered.

use crate::basics::{is_vertex, VertexSource};
use crate::trans_affine::TransAffine;

/// Maps each point-carrying command of `source` through `trans`.
///
/// Owns its source; wrap a `&mut` source to keep it borrowed.
pub struct ConvTransform<VS> {
    source: VS,
    trans: TransAffine,
}

impl<VS: VertexSource> ConvTransform<VS> {
    pub fn new(source: VS, trans: TransAffine) -> Self {
        Self { source, trans }
    }

    pub fn set_transform(&mut self, trans: TransAffine) {
        self.trans = trans;
    }

    pub fn transform(&self) -> &TransAffine {
        &self.trans
    }

    pub fn source(&self) -> &VS {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut VS {
        &mut self.source
    }
}

impl<VS: VertexSource> VertexSource for ConvTransform<VS> {
    fn rewind(&mut self, path_id: u32) {
        self.source.rewind(path_id);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        let cmd = self.source.vertex(x, y);
        if is_vertex(cmd) {
            self.trans.transform(x, y);
        }
        cmd
    }
}
