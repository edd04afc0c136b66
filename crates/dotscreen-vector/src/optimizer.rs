//! Path optimizer
//!
//! Plot-oriented cleanups applied per layer: joining paths that meet end to
//! end, Ramer-Douglas-Peucker simplification, canonical start points for
//! closed paths, and greedy nearest-neighbour ordering to cut pen-up travel.

use crate::document::Polyline;
use nalgebra::{distance, Point2};
use std::collections::HashMap;

/// Polyline optimization strategies
#[derive(Debug)]
pub struct PathOptimizer;

impl PathOptimizer {
    /// Join open polylines whose endpoints lie within `tolerance`
    ///
    /// Paths are taken in order; each one absorbs every later path it can
    /// reach from either end, reversing candidates as needed. A merged path
    /// whose ends meet becomes closed. Closed paths pass through untouched.
    pub fn merge(paths: Vec<Polyline>, tolerance: f64) -> Vec<Polyline> {
        let mut slots: Vec<Option<Polyline>> = paths.into_iter().map(Some).collect();
        let mut merged = Vec::new();

        for i in 0..slots.len() {
            let Some(mut current) = slots[i].take() else {
                continue;
            };
            if current.closed || current.is_empty() {
                merged.push(current);
                continue;
            }

            // Grow from the tail, then from the head; the two reversals
            // restore the original direction.
            for _ in 0..2 {
                while let Some(end) = current.points.last().copied() {
                    let Some(next) = Self::take_joinable(&mut slots[i + 1..], end, tolerance)
                    else {
                        break;
                    };
                    let skip = usize::from(
                        next.first()
                            .is_some_and(|p| distance(&p, &end) <= tolerance),
                    );
                    current.points.extend(next.points.into_iter().skip(skip));
                }
                current.reverse();
            }

            let ends_meet = match (current.first(), current.points.last()) {
                (Some(first), Some(last)) => {
                    current.len() > 3 && distance(&first, last) <= tolerance
                }
                _ => false,
            };
            if ends_meet {
                current.points.pop();
                current.closed = true;
            }
            merged.push(current);
        }

        merged
    }

    /// Remove the first open path with an endpoint near `end`, oriented to start there
    fn take_joinable(
        slots: &mut [Option<Polyline>],
        end: Point2<f64>,
        tolerance: f64,
    ) -> Option<Polyline> {
        for slot in slots.iter_mut() {
            let Some(candidate) = slot.as_ref() else {
                continue;
            };
            if candidate.closed || candidate.is_empty() {
                continue;
            }
            let starts_here = candidate
                .first()
                .is_some_and(|p| distance(&p, &end) <= tolerance);
            let ends_here = candidate
                .points
                .last()
                .is_some_and(|p| distance(p, &end) <= tolerance);
            if starts_here || ends_here {
                let mut taken = slot.take()?;
                if !starts_here {
                    taken.reverse();
                }
                return Some(taken);
            }
        }
        None
    }

    /// Ramer-Douglas-Peucker simplification of every path
    ///
    /// Paths that collapse below two distinct points (three for closed
    /// paths) are dropped.
    pub fn simplify(paths: Vec<Polyline>, tolerance: f64) -> Vec<Polyline> {
        paths
            .into_iter()
            .filter_map(|path| Self::simplify_path(path, tolerance))
            .collect()
    }

    fn simplify_path(path: Polyline, tolerance: f64) -> Option<Polyline> {
        let mut points = path.points;
        points.dedup_by(|a, b| distance(a, b) <= f64::EPSILON);

        if path.closed {
            let first = *points.first()?;
            points.push(first);
            let mut simplified = rdp(&points, tolerance);
            simplified.pop();
            (simplified.len() >= 3).then(|| Polyline::closed(simplified))
        } else {
            let simplified = rdp(&points, tolerance);
            (simplified.len() >= 2).then(|| Polyline::open(simplified))
        }
    }

    /// Rotate closed paths to start at their lowest `(y, x)` vertex
    pub fn reloop(paths: &mut [Polyline]) {
        for path in paths.iter_mut().filter(|p| p.closed && !p.is_empty()) {
            let start = path
                .points
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)))
                .map(|(idx, _)| idx)
                .unwrap_or(0);
            path.points.rotate_left(start);
        }
    }

    /// Greedy nearest-neighbour ordering starting from the origin
    ///
    /// Open paths may be reversed when their far end is closer; closed paths
    /// are entered at their existing start vertex.
    pub fn sort(paths: Vec<Polyline>) -> Vec<Polyline> {
        let paths: Vec<Polyline> = paths.into_iter().filter(|p| !p.is_empty()).collect();
        if paths.len() < 2 {
            return paths;
        }

        let mut index = EndpointIndex::new(&paths);
        let mut slots: Vec<Option<Polyline>> = paths.into_iter().map(Some).collect();
        let mut sorted = Vec::with_capacity(slots.len());
        let mut pos = Point2::origin();

        while let Some((idx, reversed)) = index.take_nearest(pos) {
            let Some(mut path) = slots[idx].take() else {
                continue;
            };
            if reversed {
                path.reverse();
            }
            if let Some(end) = path.end() {
                pos = end;
            }
            sorted.push(path);
        }

        sorted
    }
}

/// Perpendicular distance from `p` to the segment `a`-`b`
fn segment_distance(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq <= f64::EPSILON {
        return distance(p, a);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    distance(p, &(a + ab * t))
}

fn rdp(points: &[Point2<f64>], tolerance: f64) -> Vec<Point2<f64>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut stack = vec![(0, points.len() - 1)];
    while let Some((start, end)) = stack.pop() {
        let mut max_dist = 0.0;
        let mut max_idx = start;
        for i in start + 1..end {
            let d = segment_distance(&points[i], &points[start], &points[end]);
            if d > max_dist {
                max_dist = d;
                max_idx = i;
            }
        }
        if max_dist > tolerance {
            keep[max_idx] = true;
            stack.push((start, max_idx));
            stack.push((max_idx, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// Uniform grid over path entry points for nearest-neighbour queries
struct EndpointIndex {
    cell: f64,
    origin: Point2<f64>,
    cols: i64,
    rows: i64,
    buckets: HashMap<(i64, i64), Vec<Entry>>,
    remaining: usize,
    used: Vec<bool>,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    path: usize,
    point: Point2<f64>,
    reversed: bool,
}

impl EndpointIndex {
    fn new(paths: &[Polyline]) -> Self {
        let mut entries = Vec::new();
        for (idx, path) in paths.iter().enumerate() {
            if let Some(first) = path.first() {
                entries.push(Entry {
                    path: idx,
                    point: first,
                    reversed: false,
                });
            }
            if !path.closed && path.len() > 1 {
                if let Some(last) = path.points.last() {
                    entries.push(Entry {
                        path: idx,
                        point: *last,
                        reversed: true,
                    });
                }
            }
        }

        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for e in &entries {
            min_x = min_x.min(e.point.x);
            min_y = min_y.min(e.point.y);
            max_x = max_x.max(e.point.x);
            max_y = max_y.max(e.point.y);
        }
        let span = (max_x - min_x).max(max_y - min_y).max(1e-9);
        let per_side = (entries.len() as f64).sqrt().ceil().max(1.0);
        let cell = span / per_side;

        let origin = Point2::new(min_x, min_y);
        let mut index = Self {
            cell,
            origin,
            cols: ((max_x - min_x) / cell).floor() as i64 + 1,
            rows: ((max_y - min_y) / cell).floor() as i64 + 1,
            buckets: HashMap::new(),
            remaining: paths.len(),
            used: vec![false; paths.len()],
        };
        for e in entries {
            let key = index.cell_of(e.point);
            index.buckets.entry(key).or_default().push(e);
        }
        index
    }

    fn cell_of(&self, p: Point2<f64>) -> (i64, i64) {
        (
            (((p.x - self.origin.x) / self.cell).floor() as i64).clamp(0, self.cols - 1),
            (((p.y - self.origin.y) / self.cell).floor() as i64).clamp(0, self.rows - 1),
        )
    }

    /// Lower bound on the distance from `p` to anything in ring `ring` around its cell
    fn ring_lower_bound(&self, p: Point2<f64>, ring: i64) -> f64 {
        let (cx, cy) = self.cell_of(p);
        let x0 = self.origin.x + cx as f64 * self.cell;
        let y0 = self.origin.y + cy as f64 * self.cell;
        let inside_x = (p.x - x0).min(x0 + self.cell - p.x).max(0.0);
        let inside_y = (p.y - y0).min(y0 + self.cell - p.y).max(0.0);
        ((ring - 1) as f64 * self.cell + inside_x.min(inside_y)).max(0.0)
    }

    fn take_nearest(&mut self, p: Point2<f64>) -> Option<(usize, bool)> {
        if self.remaining == 0 {
            return None;
        }

        let (cx, cy) = self.cell_of(p);
        let max_ring = self.cols.max(self.rows);
        let mut best: Option<(f64, Entry)> = None;

        for ring in 0..=max_ring {
            if let Some((d, _)) = best {
                if d <= self.ring_lower_bound(p, ring) {
                    break;
                }
            }
            for gy in (cy - ring)..=(cy + ring) {
                for gx in (cx - ring)..=(cx + ring) {
                    if (gx - cx).abs() != ring && (gy - cy).abs() != ring {
                        continue;
                    }
                    let Some(bucket) = self.buckets.get(&(gx, gy)) else {
                        continue;
                    };
                    for e in bucket.iter().filter(|e| !self.used[e.path]) {
                        let d = distance(&p, &e.point);
                        if best.map_or(true, |(bd, be)| {
                            d < bd || (d == bd && e.path < be.path)
                        }) {
                            best = Some((d, *e));
                        }
                    }
                }
            }
        }

        let (_, entry) = best?;
        self.used[entry.path] = true;
        self.remaining -= 1;
        Some((entry.path, entry.reversed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn test_merge_joins_touching_lines() {
        let paths = vec![
            Polyline::open(vec![p(0.0, 0.0), p(1.0, 0.0)]),
            Polyline::open(vec![p(2.0, 0.0), p(1.0, 0.0)]),
            Polyline::open(vec![p(5.0, 5.0), p(6.0, 5.0)]),
        ];
        let merged = PathOptimizer::merge(paths, 0.01);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].points, vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]);
        assert_eq!(merged[1].points, vec![p(5.0, 5.0), p(6.0, 5.0)]);
    }

    #[test]
    fn test_merge_extends_from_head() {
        let paths = vec![
            Polyline::open(vec![p(1.0, 0.0), p(2.0, 0.0)]),
            Polyline::open(vec![p(0.0, 0.0), p(1.0, 0.0)]),
        ];
        let merged = PathOptimizer::merge(paths, 0.01);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].points, vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]);
    }

    #[test]
    fn test_merge_closes_loops_and_skips_closed_paths() {
        let paths = vec![
            Polyline::open(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)]),
            Polyline::open(vec![p(1.0, 1.0), p(0.0, 1.0), p(0.0, 0.0)]),
            Polyline::closed(vec![p(1.0, 1.0), p(2.0, 1.0), p(2.0, 2.0)]),
        ];
        let merged = PathOptimizer::merge(paths, 0.01);
        assert_eq!(merged.len(), 2);
        assert!(merged[0].closed);
        assert_eq!(merged[0].len(), 4);
        assert_eq!(merged[1].len(), 3);
    }

    #[test]
    fn test_simplify_drops_collinear_points() {
        let paths = vec![Polyline::open(vec![
            p(0.0, 0.0),
            p(1.0, 0.001),
            p(2.0, 0.0),
            p(2.0, 2.0),
        ])];
        let simplified = PathOptimizer::simplify(paths, 0.01);
        assert_eq!(simplified[0].points, vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0)]);
    }

    #[test]
    fn test_simplify_drops_degenerate_paths() {
        let paths = vec![
            Polyline::open(vec![p(1.0, 1.0), p(1.0, 1.0)]),
            Polyline::closed(vec![p(0.0, 0.0), p(0.001, 0.0), p(0.0, 0.001)]),
        ];
        assert!(PathOptimizer::simplify(paths, 0.01).is_empty());
    }

    #[test]
    fn test_reloop_starts_at_lowest_vertex() {
        let mut paths = vec![Polyline::closed(vec![
            p(1.0, 1.0),
            p(0.0, 1.0),
            p(0.0, 0.0),
            p(1.0, 0.0),
        ])];
        PathOptimizer::reloop(&mut paths);
        assert_eq!(paths[0].first(), Some(p(0.0, 0.0)));
        assert_eq!(paths[0].points[1], p(1.0, 0.0));
    }

    #[test]
    fn test_sort_visits_nearest_first() {
        let paths = vec![
            Polyline::open(vec![p(10.0, 0.0), p(11.0, 0.0)]),
            Polyline::open(vec![p(3.0, 0.0), p(1.0, 0.0)]),
            Polyline::open(vec![p(5.0, 0.0), p(6.0, 0.0)]),
        ];
        let sorted = PathOptimizer::sort(paths);
        assert_eq!(sorted[0].points, vec![p(1.0, 0.0), p(3.0, 0.0)]);
        assert_eq!(sorted[1].first(), Some(p(5.0, 0.0)));
        assert_eq!(sorted[2].first(), Some(p(10.0, 0.0)));
    }

    #[test]
    fn test_sort_keeps_every_path() {
        let paths: Vec<Polyline> = (0..200)
            .map(|i| {
                let x = ((i * 37) % 101) as f64;
                let y = ((i * 53) % 97) as f64;
                Polyline::closed(vec![p(x, y), p(x + 0.5, y), p(x, y + 0.5)])
            })
            .collect();
        let sorted = PathOptimizer::sort(paths.clone());
        assert_eq!(sorted.len(), paths.len());
        for path in &paths {
            assert!(sorted.contains(path));
        }
    }

    proptest! {
        #[test]
        fn prop_sort_is_a_permutation_of_closed_paths(
            coords in prop::collection::vec((0.0f64..500.0, 0.0f64..500.0), 1..60)
        ) {
            let paths: Vec<Polyline> = coords
                .iter()
                .map(|&(x, y)| Polyline::closed(vec![p(x, y), p(x + 1.0, y), p(x, y + 1.0)]))
                .collect();
            let sorted = PathOptimizer::sort(paths.clone());
            prop_assert_eq!(sorted.len(), paths.len());
            for path in &paths {
                prop_assert!(sorted.contains(path));
            }
        }

        #[test]
        fn prop_reloop_keeps_vertex_cycle(
            coords in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 3..20)
        ) {
            let original = Polyline::closed(coords.iter().map(|&(x, y)| p(x, y)).collect());
            let mut paths = vec![original.clone()];
            PathOptimizer::reloop(&mut paths);

            let n = original.len();
            let start = original
                .points
                .iter()
                .position(|q| *q == paths[0].points[0])
                .unwrap();
            for i in 0..n {
                prop_assert_eq!(paths[0].points[i], original.points[(start + i) % n]);
            }
            let lowest = original
                .points
                .iter()
                .all(|q| (q.y, q.x) >= (paths[0].points[0].y, paths[0].points[0].x));
            prop_assert!(lowest);
        }
    }
}
