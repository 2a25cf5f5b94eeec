use log::warn;

use super::types::{Genre, Point, PointId, SongRecord, Vec3};
use crate::error::{Error, Result};

/// Ordered, append-only collection of points for one session.
#[derive(Clone, Debug, Default)]
pub struct PointStore {
	points: Vec<Point>,
}

impl PointStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds the store from decoded service records, scaling each embedding
	/// into display space. Records with a malformed embedding are skipped.
	pub fn from_records(records: &[SongRecord], scale: f64) -> Self {
		let mut store = Self::new();
		for (index, record) in records.iter().enumerate() {
			match point_from_record(index, record, scale) {
				Ok(point) => {
					store.add(point);
				}
				Err(err) => warn!("skipping record: {err}"),
			}
		}
		store
	}

	pub fn add(&mut self, point: Point) -> PointId {
		self.points.push(point);
		PointId(self.points.len() - 1)
	}

	pub fn all(&self) -> &[Point] {
		&self.points
	}

	pub fn get(&self, id: PointId) -> Option<&Point> {
		self.points.get(id.0)
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (PointId, &Point)> {
		self.points.iter().enumerate().map(|(i, p)| (PointId(i), p))
	}
}

fn point_from_record(index: usize, record: &SongRecord, scale: f64) -> Result<Point> {
	let invalid = |reason: String| Error::InvalidRecord {
		index,
		name: record.name.clone(),
		reason,
	};
	let [x, y, z] = record.umap_3d[..] else {
		return Err(invalid(format!(
			"expected 3 coordinates, got {}",
			record.umap_3d.len()
		)));
	};
	if !(x.is_finite() && y.is_finite() && z.is_finite()) {
		return Err(invalid("non-finite coordinate".into()));
	}
	Ok(Point::new(
		Vec3::new(x, y, z).scale(scale),
		record.name.clone(),
		Genre::parse(&record.genre),
		record.prompt.clone(),
	))
}
