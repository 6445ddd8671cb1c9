//! Vertices with distances, and the sequence that collapses coincident points.
//!
//! Port of `agg_vertex_sequence.h`. The sequence is what dash (and other
//! polyline) generators buffer a sub-path into before re-segmenting it.

use bytemuck::{Pod, Zeroable};

use crate::error::Result;
use crate::math::{calc_distance, VERTEX_DIST_EPSILON};
use crate::pod_bvector::PodBvector;

// ============================================================================
// VertexDist
// ============================================================================

/// A point and the distance from it to the next point of its sequence.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct VertexDist {
    pub x: f64,
    pub y: f64,
    pub dist: f64,
}

impl VertexDist {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, dist: 0.0 }
    }

    /// Store the distance to `next`. Returns `false` when the two points are
    /// coincident; the stored distance is then `1 / VERTEX_DIST_EPSILON` so
    /// nothing downstream divides by zero.
    pub fn calc_dist(&mut self, next: &VertexDist) -> bool {
        self.dist = calc_distance(self.x, self.y, next.x, next.y);
        let distinct = self.dist > VERTEX_DIST_EPSILON;
        if !distinct {
            self.dist = 1.0 / VERTEX_DIST_EPSILON;
        }
        distinct
    }
}

// ============================================================================
// VertexSequence
// ============================================================================

/// Ordered sub-path storage that drops coincident neighbours.
///
/// Coincidence is checked lazily: when a vertex is added, the previous pair
/// is measured and the previous vertex dropped if it duplicates its
/// predecessor. [`close`](VertexSequence::close) settles the tail.
#[derive(Debug, Clone, Default)]
pub struct VertexSequence {
    vertices: PodBvector<VertexDist>,
}

impl VertexSequence {
    pub fn new() -> Self {
        Self {
            vertices: PodBvector::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.vertices.size()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn add(&mut self, val: VertexDist) {
        let n = self.vertices.size();
        if n > 1 {
            let last = self.vertices[n - 1];
            if !self.vertices[n - 2].calc_dist(&last) {
                self.vertices.remove_last();
            }
        }
        self.vertices.add(val);
    }

    /// Replace the most recent vertex (consecutive `move_to`s collapse into
    /// the last one).
    pub fn modify_last(&mut self, val: VertexDist) {
        self.vertices.remove_last();
        self.add(val);
    }

    pub fn remove_last(&mut self) {
        self.vertices.remove_last();
    }

    pub fn remove_all(&mut self) {
        self.vertices.remove_all();
    }

    /// Finish the sequence: drop trailing duplicates and compute every
    /// segment distance. For a closed sequence, trailing vertices that
    /// coincide with the first are dropped and the last vertex's distance
    /// becomes the closing segment back to vertex 0.
    pub fn close(&mut self, closed: bool) {
        while self.vertices.size() > 1 {
            let n = self.vertices.size();
            let last = self.vertices[n - 1];
            if self.vertices[n - 2].calc_dist(&last) {
                break;
            }
            self.vertices.remove_last();
            self.modify_last(last);
        }

        if closed {
            while self.vertices.size() > 1 {
                let n = self.vertices.size();
                let first = self.vertices[0];
                if self.vertices[n - 1].calc_dist(&first) {
                    break;
                }
                self.vertices.remove_last();
            }
        }
    }

    /// Sum of the stored segment distances over the first `size - 1`
    /// vertices (plus the closing segment when `closed`).
    pub fn length(&self, closed: bool) -> f64 {
        let n = self.size();
        if n < 2 {
            return 0.0;
        }
        let segments = if closed { n } else { n - 1 };
        (0..segments).map(|i| self.vertices[i].dist).sum()
    }

    pub fn last(&self) -> Option<&VertexDist> {
        self.vertices.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VertexDist> + '_ {
        self.vertices.iter()
    }

    pub fn byte_size(&self) -> usize {
        self.vertices.byte_size()
    }

    pub fn serialize(&self, dst: &mut [u8]) -> Result<usize> {
        self.vertices.serialize(dst)
    }

    pub fn deserialize(&mut self, data: &[u8]) -> Result<()> {
        self.vertices.deserialize(data)
    }
}

impl core::ops::Index<usize> for VertexSequence {
    type Output = VertexDist;

    fn index(&self, i: usize) -> &VertexDist {
        &self.vertices[i]
    }
}

impl core::ops::IndexMut<usize> for VertexSequence {
    fn index_mut(&mut self, i: usize) -> &mut VertexDist {
        &mut self.vertices[i]
    }
}

// ============================================================================
// Tests
// ============================================================================
