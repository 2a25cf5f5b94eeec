use super::camera::OrbitCamera;
use super::highlight::SessionKind;
use super::interaction::{Action, Explorer, PointerInput};
use super::store::PointStore;
use super::types::PointId;
use crate::config::VisualizerConfig;

/// World-space radius of a point's disc.
pub const POINT_RADIUS: f64 = 15.0;
/// Length of each axis in the axes helper.
pub const AXES_LENGTH: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
	Move,
	Primary,
	Secondary,
	Double,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub last_x: f64,
	pub last_y: f64,
}

pub struct PointCloudState {
	pub explorer: Explorer,
	pub camera: OrbitCamera,
	pub drag: DragState,
	pub width: f64,
	pub height: f64,
	auto_rotate_rad_per_ms: f64,
	last_frame_ms: Option<f64>,
}

impl PointCloudState {
	pub fn new(config: &VisualizerConfig, width: f64, height: f64) -> Self {
		Self {
			explorer: Explorer::new(PointStore::new(), config),
			camera: OrbitCamera::default(),
			drag: DragState::default(),
			width,
			height,
			auto_rotate_rad_per_ms: config.auto_rotate_rad_per_s / 1000.0,
			last_frame_ms: None,
		}
	}

	pub fn load(&mut self, store: PointStore) {
		self.explorer.replace_store(store);
	}

	/// Front-most point whose disc covers the screen position.
	pub fn point_at_position(&self, sx: f64, sy: f64) -> Option<PointId> {
		let mut found: Option<(PointId, f64)> = None;
		for (id, point) in self.explorer.store.iter() {
			let Some(p) = self.camera.project(point.position, self.width, self.height) else {
				continue;
			};
			let (dx, dy) = (p.x - sx, p.y - sy);
			if (dx * dx + dy * dy).sqrt() > POINT_RADIUS * p.scale {
				continue;
			}
			if found.is_none_or(|(_, depth)| p.depth < depth) {
				found = Some((id, p.depth));
			}
		}
		found.map(|(id, _)| id)
	}

	/// Hit-tests a pointer event at canvas position (`sx`, `sy`) and
	/// dispatches it.
	pub fn pointer(&mut self, kind: PointerKind, sx: f64, sy: f64) -> Vec<Action> {
		let hit = self.point_at_position(sx, sy);
		self.explorer.dispatch(match kind {
			PointerKind::Move => PointerInput::Move { hit, x: sx, y: sy },
			PointerKind::Primary => PointerInput::Primary { hit },
			PointerKind::Secondary => PointerInput::Secondary { hit },
			PointerKind::Double => PointerInput::Double { hit },
		})
	}

	/// Advances all time-driven state to the frame timestamp `now_ms`.
	pub fn tick(&mut self, now_ms: f64) -> Vec<SessionKind> {
		let dt = self.last_frame_ms.map_or(0.0, |last| (now_ms - last).max(0.0));
		self.last_frame_ms = Some(now_ms);
		if self.explorer.ui.auto_rotate {
			self.camera.spin(self.auto_rotate_rad_per_ms * dt);
		}
		self.explorer.advance(dt)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::super::types::{Genre, Point, Vec3};
	use super::*;

	fn state_with(points: &[Vec3]) -> PointCloudState {
		let mut store = PointStore::new();
		for (i, &p) in points.iter().enumerate() {
			store.add(Point::new(p, format!("p{i}"), Genre::Rock, ""));
		}
		let mut state = PointCloudState::new(&VisualizerConfig::default(), 800.0, 600.0);
		state.load(store);
		state
	}

	#[test]
	fn picks_front_most_point() {
		// Both project to the centre; the one closer to the eye wins.
		let state = state_with(&[Vec3::ZERO, Vec3::new(200.0, 200.0, 200.0)]);
		assert_eq!(state.point_at_position(400.0, 300.0), Some(PointId(1)));
		assert_eq!(state.point_at_position(10.0, 10.0), None);
	}

	#[test]
	fn pointer_hit_tests_before_dispatch() {
		let mut state = state_with(&[Vec3::ZERO, Vec3::new(0.0, 0.0, -900.0)]);
		let actions = state.pointer(PointerKind::Primary, 400.0, 300.0);
		assert_eq!(
			actions,
			vec![Action::DismissTitle, Action::Highlight(SessionKind::Connection)]
		);
		assert!(state.explorer.highlighter.is_highlighted(PointId(1)));
		assert_eq!(state.pointer(PointerKind::Secondary, 400.0, 300.0), vec![]);
	}

	#[test]
	fn first_frame_has_no_elapsed_time() {
		let mut state = state_with(&[Vec3::ZERO]);
		let yaw = state.camera.yaw;
		state.tick(12_345.0);
		assert_eq!(state.camera.yaw, yaw);
		state.tick(13_345.0);
		assert!((state.camera.yaw - yaw - 0.06).abs() < 1e-9);
	}

	#[test]
	fn frozen_rotation_keeps_camera_still() {
		let mut state = state_with(&[Vec3::ZERO]);
		state.explorer.ui.auto_rotate = false;
		let yaw = state.camera.yaw;
		state.tick(0.0);
		state.tick(5000.0);
		assert_eq!(state.camera.yaw, yaw);
	}
}
