use std::f64::consts::FRAC_PI_4;

use super::types::Vec3;

const ORBIT_SPEED: f64 = 0.005;
const MAX_PITCH: f64 = 1.5;
const MIN_DISTANCE: f64 = 100.0;
const MAX_DISTANCE: f64 = 9000.0;
const NEAR: f64 = 1.0;

/// A point after projection onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	pub x: f64,
	pub y: f64,
	/// Distance along the view direction.
	pub depth: f64,
	/// Screen pixels per world unit at this depth.
	pub scale: f64,
}

/// Perspective camera orbiting a target.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
	pub target: Vec3,
	pub yaw: f64,
	pub pitch: f64,
	pub distance: f64,
	pub fov_y: f64,
}

impl Default for OrbitCamera {
	/// Eye at (2000, 2000, 2000) looking at the origin.
	fn default() -> Self {
		Self {
			target: Vec3::ZERO,
			yaw: FRAC_PI_4,
			pitch: (1.0 / 3f64.sqrt()).asin(),
			distance: 2000.0 * 3f64.sqrt(),
			fov_y: 45f64.to_radians(),
		}
	}
}

impl OrbitCamera {
	pub fn eye(&self) -> Vec3 {
		let ((sy, cy), (sp, cp)) = (self.yaw.sin_cos(), self.pitch.sin_cos());
		Vec3::new(
			self.target.x + self.distance * cp * sy,
			self.target.y + self.distance * sp,
			self.target.z + self.distance * cp * cy,
		)
	}

	fn basis(&self) -> (Vec3, Vec3, Vec3) {
		let ((sy, cy), (sp, cp)) = (self.yaw.sin_cos(), self.pitch.sin_cos());
		(
			Vec3::new(-cp * sy, -sp, -cp * cy),
			Vec3::new(cy, 0.0, -sy),
			Vec3::new(-sp * sy, cp, -sp * cy),
		)
	}

	/// `None` for points behind the near plane.
	pub fn project(&self, p: Vec3, width: f64, height: f64) -> Option<Projected> {
		let (forward, right, up) = self.basis();
		let d = p - self.eye();
		let depth = d.dot(forward);
		if depth < NEAR {
			return None;
		}
		let focal = (height / 2.0) / (self.fov_y / 2.0).tan();
		let scale = focal / depth;
		Some(Projected {
			x: width / 2.0 + d.dot(right) * scale,
			y: height / 2.0 - d.dot(up) * scale,
			depth,
			scale,
		})
	}

	/// Drag in screen pixels.
	pub fn orbit(&mut self, dx: f64, dy: f64) {
		self.yaw -= dx * ORBIT_SPEED;
		self.pitch = (self.pitch + dy * ORBIT_SPEED).clamp(-MAX_PITCH, MAX_PITCH);
	}

	pub fn zoom(&mut self, delta_y: f64) {
		let factor = if delta_y > 0.0 { 1.1 } else { 0.9 };
		self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
	}

	/// Spins the eye around the vertical axis through the target.
	pub fn spin(&mut self, radians: f64) {
		self.yaw = (self.yaw + radians) % std::f64::consts::TAU;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-6
	}

	#[test]
	fn default_eye_matches_start_position() {
		let eye = OrbitCamera::default().eye();
		assert!(close(eye.x, 2000.0) && close(eye.y, 2000.0) && close(eye.z, 2000.0));
	}

	#[test]
	fn target_projects_to_centre() {
		let cam = OrbitCamera::default();
		let p = cam.project(Vec3::ZERO, 800.0, 600.0).unwrap();
		assert!(close(p.x, 400.0) && close(p.y, 300.0));
		assert!(close(p.depth, cam.distance));
	}

	#[test]
	fn up_is_up_on_screen() {
		let cam = OrbitCamera::default();
		let above = cam.project(Vec3::new(0.0, 100.0, 0.0), 800.0, 600.0).unwrap();
		assert!(above.y < 300.0);
	}

	#[test]
	fn points_behind_camera_are_culled() {
		let cam = OrbitCamera::default();
		assert!(cam.project(Vec3::new(4000.0, 4000.0, 4000.0), 800.0, 600.0).is_none());
	}

	#[test]
	fn zoom_and_pitch_are_clamped() {
		let mut cam = OrbitCamera::default();
		for _ in 0..100 {
			cam.zoom(-1.0);
			cam.orbit(0.0, 1000.0);
		}
		assert_eq!(cam.distance, MIN_DISTANCE);
		assert_eq!(cam.pitch, MAX_PITCH);
	}
}
