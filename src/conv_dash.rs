//! Dash stage.
//!
//! Port of `agg_conv_dash.h`: a [`ConvAdaptorVcgen`] driving a [`VcgenDash`]
//! with the dash configuration exposed on the wrapper.

use crate::basics::VertexSource;
use crate::conv_adaptor_vcgen::ConvAdaptorVcgen;
use crate::vcgen_dash::VcgenDash;

/// Dashes every sub-path of `source`.
pub struct ConvDash<VS> {
    base: ConvAdaptorVcgen<VS, VcgenDash>,
}

impl<VS: VertexSource> ConvDash<VS> {
    pub fn new(source: VS) -> Self {
        Self {
            base: ConvAdaptorVcgen::new(source, VcgenDash::new()),
        }
    }

    pub fn remove_all_dashes(&mut self) {
        self.base.generator_mut().remove_all_dashes();
    }

    pub fn add_dash(&mut self, dash_len: f64, gap_len: f64) {
        self.base.generator_mut().add_dash(dash_len, gap_len);
    }

    pub fn dash_start(&mut self, ds: f64) {
        self.base.generator_mut().dash_start(ds);
    }

    pub fn set_shorten(&mut self, s: f64) {
        self.base.generator_mut().set_shorten(s);
    }

    pub fn shorten(&self) -> f64 {
        self.base.generator().shorten()
    }

    pub fn generator(&self) -> &VcgenDash {
        self.base.generator()
    }

    pub fn source(&self) -> &VS {
        self.base.source()
    }

    pub fn source_mut(&mut self) -> &mut VS {
        self.base.source_mut()
    }
}

impl<VS: VertexSource> VertexSource for ConvDash<VS> {
    fn rewind(&mut self, path_id: u32) {
        self.base.rewind(path_id);
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        self.base.vertex(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::{is_stop, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO};
    use crate::path_storage::PathStorage;

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

    #[test]
    fn test_empty_path() {
        let mut dash = ConvDash::new(PathStorage::new());
        dash.add_dash(10.0, 5.0);
        assert!(collect_vertices(&mut dash).is_empty());
    }

    #[test]
    fn test_single_segment() {
        let mut path = PathStorage::new();
        path.move_to(0.0, 0.0);
        path.line_to(10.0, 0.0);

        let mut dash = ConvDash::new(path);
        dash.add_dash(4.0, 2.0);
        assert_eq!(
            collect_vertices(&mut dash),
            vec![
                (0.0, 0.0, PATH_CMD_MOVE_TO),
                (4.0, 0.0, PATH_CMD_LINE_TO),
                (6.0, 0.0, PATH_CMD_MOVE_TO),
                (10.0, 0.0, PATH_CMD_LINE_TO),
            ]
        );
    }

    #[test]
    fn test_sub_paths_dashed_independently() {
        let mut path = PathStorage::new();
        path.move_to(0.0, 0.0);
        path.line_to(10.0, 0.0);
        path.move_to(0.0, 5.0);
        path.line_to(10.0, 5.0);

        let mut dash = ConvDash::new(path);
        dash.add_dash(4.0, 2.0);
        dash.dash_start(0.0);
        let v = collect_vertices(&mut dash);
        assert_eq!(v.len(), 8);
        // Phase restarts for the second sub-path.
        assert_eq!(v[4], (0.0, 5.0, PATH_CMD_MOVE_TO));
        assert_eq!(v[5], (4.0, 5.0, PATH_CMD_LINE_TO));
    }

    #[test]
    fn test_configuration_passthrough() {
        let mut dash = ConvDash::new(PathStorage::new());
        dash.add_dash(1.0, 2.0);
        dash.add_dash(3.0, 4.0);
        dash.set_shorten(1.5);
        assert_eq!(dash.generator().num_dashes(), 4);
        assert_eq!(dash.shorten(), 1.5);
        dash.remove_all_dashes();
        assert_eq!(dash.generator().num_dashes(), 0);
    }

    #[test]
    fn test_no_pattern_no_output() {
        let mut path = PathStorage::new();
        path.move_to(0.0, 0.0);
        path.line_to(100.0, 0.0);
        let mut dash = ConvDash::new(path);
        assert!(collect_vertices(&mut dash).is_empty());
    }
}
