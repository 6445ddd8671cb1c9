//! Trim a length off the end of a vertex sequence.
//!
//! Port of `agg_shorten_path.h`.

use crate::vertex_sequence::VertexSequence;

/// Remove `s` units of length from the end of `vs`.
///
/// Whole trailing segments shorter than the remaining amount are dropped;
/// the last surviving segment is cut at the exact point. A sequence whose
/// whole length is consumed is emptied. Distances must already be
/// computed (see [`VertexSequence::close`]).
pub fn shorten_path(vs: &mut VertexSequence, s: f64, closed: bool) {
    if s <= 0.0 || vs.size() < 2 {
        return;
    }

    let mut s = s;
    let mut n = vs.size() - 2;
    while n > 0 {
        let d = vs[n].dist;
        if d > s {
            break;
        }
        vs.remove_last();
        s -= d;
        n -= 1;
    }

    // Nothing would be left of the first segment either.
    if vs.size() < 2 || s >= vs[vs.size() - 2].dist {
        vs.remove_all();
        return;
    }

    let last_idx = vs.size() - 1;
    let prev = vs[last_idx - 1];
    let k = (prev.dist - s) / prev.dist;
    {
        let last = &mut vs[last_idx];
        last.x = prev.x + (last.x - prev.x) * k;
        last.y = prev.y + (last.y - prev.y) * k;
    }
    let last = vs[last_idx];
    if !vs[last_idx - 1].calc_dist(&last) {
        vs.remove_last();
    }
    vs.close(closed);
}
