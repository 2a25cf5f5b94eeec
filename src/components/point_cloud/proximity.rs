//! Brute-force proximity queries over the point store.
//!
//! Both queries scan every point once (O(n)) and run on each qualifying click.
//! Datasets are a few hundred points, so no spatial index is kept.

use std::cmp::Ordering;

use super::types::{Point, PointId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
	pub id: PointId,
	pub distance: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Neighborhood {
	/// Ascending by distance, ties in store order.
	pub neighbors: Vec<Neighbor>,
	/// Distance to the farthest member, used as the bounding sphere radius.
	pub radius: f64,
}

impl Neighborhood {
	pub fn ids(&self) -> impl Iterator<Item = PointId> + '_ {
		self.neighbors.iter().map(|n| n.id)
	}
}

fn others(selected: PointId, points: &[Point]) -> impl Iterator<Item = Neighbor> + '_ {
	let origin = points.get(selected.0).map(|p| p.position);
	points
		.iter()
		.enumerate()
		.filter(move |(i, _)| *i != selected.0)
		.filter_map(move |(i, p)| {
			origin.map(|o| Neighbor {
				id: PointId(i),
				distance: o.distance(p.position),
			})
		})
}

/// Closest other point to `selected`. O(n).
///
/// Ties go to the first point in store order. `None` when `selected` is not in
/// `points` or nothing else is.
pub fn nearest(selected: PointId, points: &[Point]) -> Option<Neighbor> {
	others(selected, points).fold(None, |best: Option<Neighbor>, candidate| match best {
		Some(b) if b.distance <= candidate.distance => Some(b),
		_ => Some(candidate),
	})
}

/// The `k` closest other points to `selected`, ascending. O(n log n) with the
/// sort, O(n) distance evaluations.
///
/// `None` when the store holds fewer than `k + 1` points or `k` is zero.
pub fn k_nearest(selected: PointId, points: &[Point], k: usize) -> Option<Neighborhood> {
	if k == 0 || points.len() < k + 1 {
		return None;
	}
	let mut candidates: Vec<Neighbor> = others(selected, points).collect();
	if candidates.len() < k {
		return None;
	}
	// Stable sort keeps store order among equal distances.
	candidates.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
	candidates.truncate(k);
	let radius = candidates.last().map(|n| n.distance)?;
	Some(Neighborhood {
		neighbors: candidates,
		radius,
	})
}

#[cfg(test)]
mod tests {
	use super::super::types::{Genre, Vec3};
	use super::*;
	use pretty_assertions::assert_eq;

	fn cloud(coords: &[(f64, f64, f64)]) -> Vec<Point> {
		coords
			.iter()
			.enumerate()
			.map(|(i, &(x, y, z))| Point::new(Vec3::new(x, y, z), format!("p{i}"), Genre::Pop, ""))
			.collect()
	}

	fn pseudo_random_cloud(n: usize) -> Vec<Point> {
		let coords: Vec<_> = (0..n)
			.map(|i| {
				let f = |s: usize| (((s + 1) * 9301 + 49297) % 233280) as f64 / 233280.0 * 100.0;
				(f(i * 3), f(i * 3 + 1), f(i * 3 + 2))
			})
			.collect();
		cloud(&coords)
	}

	#[test]
	fn nearest_prefers_closer_point() {
		let points = cloud(&[(0.0, 0.0, 0.0), (10.0, 0.0, 0.0), (100.0, 0.0, 0.0)]);
		let hit = nearest(PointId(0), &points).unwrap();
		assert_eq!(hit.id, PointId(1));
		assert_eq!(hit.distance, 10.0);
	}

	#[test]
	fn nearest_needs_two_points() {
		assert_eq!(nearest(PointId(0), &[]), None);
		assert_eq!(nearest(PointId(0), &cloud(&[(1.0, 1.0, 1.0)])), None);
	}

	#[test]
	fn nearest_ties_go_to_store_order() {
		let points = cloud(&[(5.0, 0.0, 0.0), (0.0, 0.0, 0.0), (-5.0, 0.0, 0.0)]);
		assert_eq!(nearest(PointId(1), &points).unwrap().id, PointId(0));
	}

	#[test]
	fn nearest_is_never_self_and_is_minimal() {
		let points = pseudo_random_cloud(60);
		for i in 0..points.len() {
			let hit = nearest(PointId(i), &points).unwrap();
			assert_ne!(hit.id, PointId(i));
			for (j, other) in points.iter().enumerate() {
				if j != i {
					assert!(hit.distance <= points[i].position.distance(other.position));
				}
			}
		}
	}

	#[test]
	fn k_nearest_returns_sorted_neighbors_and_radius() {
		let points = cloud(&[
			(0.0, 0.0, 0.0),
			(7.0, 0.0, 0.0),
			(1.0, 0.0, 0.0),
			(50.0, 0.0, 0.0),
			(3.0, 0.0, 0.0),
			(2.0, 0.0, 0.0),
			(9.0, 0.0, 0.0),
		]);
		let hood = k_nearest(PointId(0), &points, 5).unwrap();
		let ids: Vec<_> = hood.ids().collect();
		assert_eq!(ids, vec![PointId(2), PointId(5), PointId(4), PointId(1), PointId(6)]);
		assert_eq!(hood.radius, 9.0);
	}

	#[test]
	fn k_nearest_properties_hold_on_a_cloud() {
		let points = pseudo_random_cloud(40);
		for i in 0..points.len() {
			let hood = k_nearest(PointId(i), &points, 5).unwrap();
			assert_eq!(hood.neighbors.len(), 5);
			assert!(hood.ids().all(|id| id != PointId(i)));
			assert!(hood.neighbors.windows(2).all(|w| w[0].distance <= w[1].distance));
			assert_eq!(hood.radius, hood.neighbors[4].distance);
		}
	}

	#[test]
	fn k_nearest_needs_k_plus_one_points() {
		let points = cloud(&[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (2.0, 0.0, 0.0)]);
		assert_eq!(k_nearest(PointId(0), &points, 3), None);
		assert_eq!(k_nearest(PointId(0), &points, 0), None);
		assert!(k_nearest(PointId(0), &points, 2).is_some());
	}
}
