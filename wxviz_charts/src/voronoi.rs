// Copyright 2025 the wxviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded Voronoi partition for nearest-point hover targeting.
//!
//! Each distinct site owns the convex region of the bounds that is closer to it than to any
//! other site. Cells are built by clipping the bounding rectangle against perpendicular
//! bisectors, visiting neighbors nearest-first through an R-tree and stopping once no farther
//! site can reach the cell.
//!
//! Coincident sites share one cell: the lowest index owns it and later duplicates get an empty
//! cell. Sites with non-finite coordinates never own a cell.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashSet;
use kurbo::{BezPath, Point, Rect};
use rstar::{AABB, PointDistance, RTree, RTreeObject};
use smallvec::SmallVec;

/// A convex cell polygon, wound the same way as its bounding rectangle.
pub type Cell = SmallVec<[Point; 8]>;

#[derive(Clone, Copy, Debug, PartialEq)]
struct IndexedSite {
    index: usize,
    pos: [f64; 2],
}

impl RTreeObject for IndexedSite {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.pos)
    }
}

impl PointDistance for IndexedSite {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.pos[0] - point[0];
        let dy = self.pos[1] - point[1];
        dx * dx + dy * dy
    }
}

/// A Voronoi partition of a rectangle.
pub struct Voronoi {
    bounds: Rect,
    tree: RTree<IndexedSite>,
    cells: Vec<Cell>,
}

impl core::fmt::Debug for Voronoi {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Voronoi")
            .field("bounds", &self.bounds)
            .field("sites", &self.tree.size())
            .field("cells", &self.cells)
            .finish()
    }
}

impl Voronoi {
    /// Partitions `bounds` among `sites`.
    pub fn new(sites: &[Point], bounds: Rect) -> Self {
        let bounds = bounds.abs();
        let mut seen: HashSet<(u64, u64)> = HashSet::new();
        let mut unique = Vec::new();
        for (index, p) in sites.iter().enumerate() {
            if !(p.x.is_finite() && p.y.is_finite()) {
                continue;
            }
            // `+ 0.0` folds -0.0 into 0.0 so both spellings share a cell.
            if seen.insert(((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())) {
                unique.push(IndexedSite {
                    index,
                    pos: [p.x, p.y],
                });
            }
        }
        let tree = RTree::bulk_load(unique.clone());

        let mut cells: Vec<Cell> = alloc::vec![Cell::new(); sites.len()];
        for site in &unique {
            cells[site.index] = build_cell(&tree, site, bounds);
        }
        log::trace!("voronoi: {} sites, {} distinct", sites.len(), tree.size());

        Self {
            bounds,
            tree,
            cells,
        }
    }

    /// The partitioned rectangle.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Number of sites passed to [`Voronoi::new`], including duplicates.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if there are no sites.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell polygon of site `i`; empty for duplicates, invalid sites and out-of-range `i`.
    pub fn cell(&self, i: usize) -> &[Point] {
        self.cells.get(i).map_or(&[], |c| c.as_slice())
    }

    /// The cell of site `i` as a closed path, or `None` if the cell is empty.
    pub fn cell_path(&self, i: usize) -> Option<BezPath> {
        let cell = self.cell(i);
        let (first, rest) = cell.split_first()?;
        let mut path = BezPath::new();
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
        Some(path)
    }

    /// Index of the site whose cell contains `p` (the nearest site).
    ///
    /// Points outside the bounds still resolve to the nearest site; callers hit-test against
    /// the bounds when that matters.
    pub fn find(&self, p: Point) -> Option<usize> {
        self.tree.nearest_neighbor(&[p.x, p.y]).map(|s| s.index)
    }
}

fn build_cell(tree: &RTree<IndexedSite>, site: &IndexedSite, bounds: Rect) -> Cell {
    let mut cell: Cell = SmallVec::from_slice(&[
        Point::new(bounds.x0, bounds.y0),
        Point::new(bounds.x1, bounds.y0),
        Point::new(bounds.x1, bounds.y1),
        Point::new(bounds.x0, bounds.y1),
    ]);
    let s = Point::new(site.pos[0], site.pos[1]);
    let mut reach2 = max_distance2(&cell, s);
    for other in tree.nearest_neighbor_iter(&site.pos) {
        if other.index == site.index {
            continue;
        }
        // A site farther than twice the cell radius cannot cut the cell.
        if other.distance_2(&site.pos) > 4.0 * reach2 {
            break;
        }
        let o = Point::new(other.pos[0], other.pos[1]);
        // Keep points no farther from `s` than from `o`: n·p <= c.
        let n = o - s;
        let c = 0.5 * (o.to_vec2().hypot2() - s.to_vec2().hypot2());
        cell = clip(&cell, n.x, n.y, c);
        if cell.is_empty() {
            break;
        }
        reach2 = max_distance2(&cell, s);
    }
    cell
}

fn max_distance2(cell: &[Point], s: Point) -> f64 {
    cell.iter()
        .map(|p| (*p - s).hypot2())
        .fold(0.0, f64::max)
}

/// Sutherland-Hodgman clip of a convex polygon to the half-plane `nx*x + ny*y <= c`.
fn clip(poly: &[Point], nx: f64, ny: f64, c: f64) -> Cell {
    let mut out = Cell::new();
    let side = |p: Point| nx * p.x + ny * p.y - c;
    for (i, &cur) in poly.iter().enumerate() {
        let prev = poly[(i + poly.len() - 1) % poly.len()];
        let (dc, dp) = (side(cur), side(prev));
        if dc <= 0.0 {
            if dp > 0.0 && dc < 0.0 {
                out.push(prev.lerp(cur, dp / (dp - dc)));
            }
            out.push(cur);
        } else if dp < 0.0 {
            out.push(prev.lerp(cur, dp / (dp - dc)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn area(poly: &[Point]) -> f64 {
        let n = poly.len();
        (0..n)
            .map(|i| {
                let (a, b) = (poly[i], poly[(i + 1) % n]);
                a.x * b.y - b.x * a.y
            })
            .sum::<f64>()
            .abs()
            * 0.5
    }

    fn sites() -> Vec<Point> {
        // A deterministic scatter, including a pair that sits very close together.
        (0..40)
            .map(|i| {
                let t = i as f64;
                Point::new(
                    10.0 + (t * 37.0) % 180.0,
                    15.0 + (t * 53.0 + 7.0) % 170.0,
                )
            })
            .chain([Point::new(100.0, 100.0), Point::new(100.5, 100.0)])
            .collect()
    }

    #[test]
    fn cells_are_convex_and_cover_the_bounds() {
        let bounds = Rect::new(0.0, 0.0, 200.0, 200.0);
        let v = Voronoi::new(&sites(), bounds);
        let mut total = 0.0;
        for i in 0..v.len() {
            let cell = v.cell(i);
            assert!(cell.len() >= 3, "cell {i} is degenerate");
            let n = cell.len();
            let mut sign = 0.0_f64;
            for k in 0..n {
                let (a, b, c) = (cell[k], cell[(k + 1) % n], cell[(k + 2) % n]);
                let cross = (b - a).cross(c - b);
                if cross.abs() > 1e-9 {
                    assert!(sign == 0.0 || sign.signum() == cross.signum(), "cell {i} is concave");
                    sign = cross;
                }
            }
            total += area(cell);
        }
        assert!((total - bounds.area()).abs() < 1e-6 * bounds.area(), "{total}");
    }

    #[test]
    fn each_site_finds_itself() {
        let pts = sites();
        let v = Voronoi::new(&pts, Rect::new(0.0, 0.0, 200.0, 200.0));
        for (i, p) in pts.iter().enumerate() {
            assert_eq!(v.find(*p), Some(i));
        }
    }

    #[test]
    fn duplicates_share_the_first_cell() {
        let pts = vec![
            Point::new(10.0, 10.0),
            Point::new(50.0, 50.0),
            Point::new(10.0, 10.0),
            Point::new(f64::NAN, 3.0),
        ];
        let v = Voronoi::new(&pts, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(!v.cell(0).is_empty());
        assert!(v.cell(2).is_empty());
        assert!(v.cell(3).is_empty());
        assert!(v.cell_path(2).is_none());
        assert_eq!(v.find(Point::new(10.0, 10.0)), Some(0));
        assert_eq!(v.find(Point::new(90.0, 90.0)), Some(1));
    }

    #[test]
    fn empty_input_finds_nothing() {
        let v = Voronoi::new(&[], Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(v.is_empty());
        assert_eq!(v.find(Point::new(1.0, 1.0)), None);
    }
}
