//! Polygon exclusion geometry.
//!
//! Purpose
//! - Answer "how far does the shape reach to the left/right within the band
//!   `[y1, y2]`" for an arbitrary simple polygon, optionally expanded by a
//!   uniform shape margin.
//!
//! Construction
//! - Vertices are walked in clockwise (y-down) order starting at index 0.
//!   Coincident and nearly collinear vertices are skipped while walking, and
//!   a final pass merges consecutive nearly collinear edges while more than
//!   three edges remain.
//! - With a positive margin every edge contributes two offset copies, one
//!   along each normal. Rounded corners are accounted for at query time by
//!   disks of radius `margin` around the vertices.
//!
//! Invariants
//! - Fewer than three vertices or fewer than three edges after simplification
//!   yield an empty polygon: every exclusion query returns `None`.
//! - The polygon is immutable after construction; derived collections are
//!   always consistent with `(vertices, fill_rule, shape_margin, cfg)`.

mod edge;

pub use edge::{Edge, EdgeOffset};

use crate::geom::{
    are_coincident_points, are_collinear_points, clipped_circle_x_range, compare_line_slopes,
    GeomCfg, Point, Rect, Side,
};
use serde::{Deserialize, Serialize};

/// Rule deciding which points are inside a self-overlapping outline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillRule {
    #[default]
    Nonzero,
    Evenodd,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
    fill_rule: FillRule,
    shape_margin: f64,
    cfg: GeomCfg,
    edges: Vec<Edge>,
    margin_edges: Vec<Edge>,
    bounds: Rect,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>, fill_rule: FillRule, shape_margin: f64) -> Self {
        Self::with_cfg(vertices, fill_rule, shape_margin, GeomCfg::default())
    }

    /// Build from flat `[x0, y0, x1, y1, ...]` coordinates; a trailing odd value is ignored.
    pub fn from_coords(coords: &[f64], fill_rule: FillRule, shape_margin: f64) -> Self {
        let vertices = coords
            .chunks_exact(2)
            .map(|c| Point::new(c[0], c[1]))
            .collect();
        Self::new(vertices, fill_rule, shape_margin)
    }

    pub fn with_cfg(vertices: Vec<Point>, fill_rule: FillRule, shape_margin: f64, cfg: GeomCfg) -> Self {
        let shape_margin = if shape_margin.is_finite() {
            shape_margin.max(0.0)
        } else {
            0.0
        };
        let (edges, walked) = build_edges(&vertices, cfg);
        let bounds = match Rect::bounding(walked) {
            Some(b) if vertices.len() >= 3 => b.inflate(shape_margin),
            _ => Rect::default(),
        };
        let margin_edges = if shape_margin == 0.0 {
            edges.clone()
        } else {
            edges
                .iter()
                .enumerate()
                .flat_map(|(i, e)| {
                    [
                        Edge::offset_from(i, e, e.outward_normal(), shape_margin),
                        Edge::offset_from(i, e, e.inward_normal(), shape_margin),
                    ]
                })
                .collect()
        };
        tracing::debug!(
            vertices = vertices.len(),
            edges = edges.len(),
            shape_margin,
            "built polygon"
        );
        Self {
            vertices,
            fill_rule,
            shape_margin,
            cfg,
            edges,
            margin_edges,
            bounds,
        }
    }

    /// Same polygon with different vertices; derived data is rebuilt.
    pub fn with_vertices(&self, vertices: Vec<Point>) -> Self {
        Self::with_cfg(vertices, self.fill_rule, self.shape_margin, self.cfg)
    }

    /// Same polygon with a different margin; derived data is rebuilt.
    pub fn with_shape_margin(&self, shape_margin: f64) -> Self {
        Self::with_cfg(self.vertices.clone(), self.fill_rule, shape_margin, self.cfg)
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn vertex_at(&self, i: usize) -> Option<Point> {
        self.vertices.get(i).copied()
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn edge_at(&self, i: usize) -> Option<&Edge> {
        self.edges.get(i)
    }

    /// Edges used by the exclusion queries: the polygon edges for a zero
    /// margin, otherwise two offset copies per edge.
    #[inline]
    pub fn margin_edges(&self) -> &[Edge] {
        &self.margin_edges
    }

    #[inline]
    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    #[inline]
    pub fn shape_margin(&self) -> f64 {
        self.shape_margin
    }

    /// Vertex bounding box inflated by the shape margin.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.len() < 3 || self.bounds.is_empty()
    }

    /// Half-open band overlap with the (margin-inflated) bounds.
    #[inline]
    pub fn overlaps_y_range(&self, y1: f64, y2: f64) -> bool {
        self.bounds.overlaps_y_range(y1, y2)
    }

    /// Point-in-polygon under the fill rule. Points on an edge are inside.
    pub fn contains_point(&self, p: Point) -> bool {
        if self.is_empty() || !self.bounds.encloses_point(p) {
            return false;
        }
        let tol = self.cfg.collinear_tolerance;
        match self.fill_rule {
            FillRule::Evenodd => {
                let mut crossings = 0usize;
                for e in &self.edges {
                    if e.contains_point(p, tol) {
                        return true;
                    }
                    let (v1, v2) = (e.vertex1, e.vertex2);
                    if (v1.y <= p.y && v2.y > p.y) || (v1.y > p.y && v2.y <= p.y) {
                        let vt = (p.y - v1.y) / (v2.y - v1.y);
                        if p.x < v1.x + vt * (v2.x - v1.x) {
                            crossings += 1;
                        }
                    }
                }
                crossings % 2 == 1
            }
            FillRule::Nonzero => {
                let mut winding = 0i32;
                for e in &self.edges {
                    if e.contains_point(p, tol) {
                        return true;
                    }
                    let (v1, v2) = (e.vertex1, e.vertex2);
                    if v2.y < p.y {
                        if v1.y > p.y && compare_line_slopes(v1, v2, p) > 0.0 {
                            winding += 1;
                        }
                    } else if v2.y > p.y && v1.y <= p.y && compare_line_slopes(v1, v2, p) < 0.0 {
                        winding -= 1;
                    }
                }
                winding != 0
            }
        }
    }

    /// Starting vertices of the polygon edges with `y1 ≤ y < y2`.
    pub fn edge_vertices_in_y_range(&self, y1: f64, y2: f64) -> Vec<Point> {
        self.edges
            .iter()
            .map(|e| e.vertex1)
            .filter(|v| v.y >= y1 && v.y < y2)
            .collect()
    }

    /// Polygon edges with a closed overlap of `[y1, y2]`.
    pub fn edges_overlapping(&self, y1: f64, y2: f64) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| e.overlaps_y_range(y1, y2))
            .collect()
    }

    /// Margin edges with a closed overlap of `[y1, y2]`.
    pub fn margin_edges_overlapping(&self, y1: f64, y2: f64) -> Vec<&Edge> {
        self.margin_edges
            .iter()
            .filter(|e| e.overlaps_y_range(y1, y2))
            .collect()
    }

    /// Leftmost x of the (margin-expanded) polygon within `[y1, y2]`.
    pub fn left_exclusion_edge(&self, y1: f64, y2: f64) -> Option<f64> {
        self.exclusion_edge(Side::Left, y1, y2)
    }

    /// Rightmost x of the (margin-expanded) polygon within `[y1, y2]`.
    pub fn right_exclusion_edge(&self, y1: f64, y2: f64) -> Option<f64> {
        self.exclusion_edge(Side::Right, y1, y2)
    }

    fn exclusion_edge(&self, side: Side, y1: f64, y2: f64) -> Option<f64> {
        if self.is_empty() || !self.overlaps_y_range(y1, y2) {
            return None;
        }
        // Scan from the extreme end; once an edge's nearest x cannot beat the
        // current result no later edge can either.
        let mut edges = self.margin_edges_overlapping(y1, y2);
        match side {
            Side::Left => edges.sort_by(|a, b| a.min_x.total_cmp(&b.min_x)),
            Side::Right => edges.sort_by(|a, b| b.max_x.total_cmp(&a.max_x)),
        }
        let mut result: Option<f64> = None;
        for e in edges {
            if let Some(r) = result {
                let beyond = match side {
                    Side::Left => e.min_x > r,
                    Side::Right => e.max_x < r,
                };
                if beyond {
                    break;
                }
            }
            let range = e.clipped_x_range(y1, y2);
            result = Some(pick(side, result, range.x1, range.x2));
        }

        let m = self.shape_margin;
        if m > 0.0 {
            let mut vertices = self.edge_vertices_in_y_range(y1 - m, y2 + m);
            match side {
                Side::Left => vertices.sort_by(|a, b| a.x.total_cmp(&b.x)),
                Side::Right => vertices.sort_by(|a, b| b.x.total_cmp(&a.x)),
            }
            for v in vertices {
                if let Some(r) = result {
                    let beyond = match side {
                        Side::Left => v.x - m > r,
                        Side::Right => v.x + m < r,
                    };
                    if beyond {
                        break;
                    }
                }
                let range = clipped_circle_x_range(v, m, y1, y2);
                result = Some(pick(side, result, range.x1, range.x2));
            }
        }

        if result.is_none() {
            tracing::error!(?side, y1, y2, "polygon band overlaps its bounds but no edge does");
        }
        result
    }
}

#[inline]
fn pick(side: Side, current: Option<f64>, x1: f64, x2: f64) -> f64 {
    match (side, current) {
        (Side::Left, Some(r)) => r.min(x1),
        (Side::Left, None) => x1,
        (Side::Right, Some(r)) => r.max(x2),
        (Side::Right, None) => x2,
    }
}

/// Clockwise (y-down) iff the turn at the topmost (then leftmost) vertex is clockwise.
fn is_vertex_order_clockwise(vertices: &[Point]) -> bool {
    let n = vertices.len();
    let mut min_index = 0;
    for (i, v) in vertices.iter().enumerate().skip(1) {
        let m = vertices[min_index];
        if v.y < m.y || (v.y == m.y && v.x < m.x) {
            min_index = i;
        }
    }
    let prev = vertices[(min_index + n - 1) % n];
    let next = vertices[(min_index + 1) % n];
    compare_line_slopes(prev, vertices[min_index], next) < 0.0
}

/// Walk the vertices clockwise and return the simplified edges together with
/// the vertices visited as edge starts.
fn build_edges(vertices: &[Point], cfg: GeomCfg) -> (Vec<Edge>, Vec<Point>) {
    let n = vertices.len();
    if n < 3 {
        return (Vec::new(), Vec::new());
    }
    let clockwise = is_vertex_order_clockwise(vertices);
    let next = |i: usize| if clockwise { (i + 1) % n } else { (i + n - 1) % n };
    let tol = cfg.collinear_tolerance;

    let next_edge_vertex = |v1: usize| {
        let mut v2 = next(v1);
        while v2 != 0 && are_coincident_points(vertices[v1], vertices[v2]) {
            v2 = next(v2);
        }
        while v2 != 0 {
            let v3 = next(v2);
            if !are_collinear_points(vertices[v1], vertices[v2], vertices[v3], tol) {
                break;
            }
            v2 = v3;
        }
        v2
    };

    let mut edges = Vec::with_capacity(n);
    let mut walked = Vec::with_capacity(n);
    let mut v1 = 0;
    loop {
        let v2 = next_edge_vertex(v1);
        edges.push(Edge::new(vertices[v1], vertices[v2]));
        walked.push(vertices[v1]);
        v1 = v2;
        if v1 == 0 {
            break;
        }
    }

    // Merge runs that only became collinear across the wrap at vertex 0.
    let mut i = 0;
    while i < edges.len() && edges.len() > 3 {
        let j = (i + 1) % edges.len();
        if are_collinear_points(edges[i].vertex1, edges[i].vertex2, edges[j].vertex2, tol) {
            edges[i] = Edge::new(edges[i].vertex1, edges[j].vertex2);
            edges.remove(j);
        } else {
            i += 1;
        }
    }
    (edges, walked)
}
