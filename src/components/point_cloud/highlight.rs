//! Timed, self-reverting highlights.
//!
//! A session is a pure function of its elapsed time: it holds at its initial
//! opacity, then steps down once per tick until it reaches the floor, at which
//! point it is dropped and its points go back to the neutral colour. All
//! sessions are advanced by one scheduler call per frame, so a replaced session
//! can never touch points after its successor has taken over.

use log::debug;

use super::palette::Paint;
use super::proximity::{Neighbor, Neighborhood};
use super::store::PointStore;
use super::types::{PointId, Rgb, Vec3};

/// Fade timing for one kind of session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeConfig {
	/// Time spent at `initial_opacity` before fading starts.
	pub hold_ms: f64,
	pub step_opacity: f64,
	pub tick_ms: f64,
	/// The session ends on the first tick at or below this opacity.
	pub floor_opacity: f64,
	pub initial_opacity: f64,
}

impl FadeConfig {
	pub const CONNECTION: FadeConfig = FadeConfig {
		hold_ms: 300.0,
		step_opacity: 0.1,
		tick_ms: 50.0,
		floor_opacity: 0.1,
		initial_opacity: 1.0,
	};

	pub const NEIGHBORHOOD: FadeConfig = FadeConfig {
		hold_ms: 5000.0,
		step_opacity: 0.1,
		tick_ms: 100.0,
		floor_opacity: 0.1,
		initial_opacity: 0.3,
	};

	/// Number of ticks needed to get from the initial opacity to the floor.
	pub fn fade_ticks(&self) -> u32 {
		if self.step_opacity <= 0.0 || self.initial_opacity <= self.floor_opacity {
			return 0;
		}
		((self.initial_opacity - self.floor_opacity) / self.step_opacity - 1e-9).ceil() as u32
	}

	pub fn lifetime_ms(&self) -> f64 {
		self.hold_ms + self.fade_ticks() as f64 * self.tick_ms.max(0.0)
	}

	pub fn phase_at(&self, elapsed_ms: f64) -> Phase {
		if elapsed_ms >= self.lifetime_ms() {
			Phase::Idle
		} else if elapsed_ms < self.hold_ms {
			Phase::Active
		} else {
			Phase::Decaying
		}
	}

	pub fn opacity_at(&self, elapsed_ms: f64) -> f64 {
		match self.phase_at(elapsed_ms) {
			Phase::Idle => 0.0,
			Phase::Active => self.initial_opacity,
			Phase::Decaying => {
				let ticks = ((elapsed_ms - self.hold_ms) / self.tick_ms).floor();
				(self.initial_opacity - self.step_opacity * ticks).max(self.floor_opacity)
			}
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	Idle,
	Active,
	Decaying,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionKind {
	Connection,
	Neighborhood,
}

/// Scene geometry owned by a session.
#[derive(Clone, Debug, PartialEq)]
pub enum Artifact {
	Segment {
		from: Vec3,
		to: Vec3,
	},
	/// Arrow from `origin` along `direction` (unit length), head at the far end.
	Arrow {
		origin: Vec3,
		direction: Vec3,
		length: f64,
		head_length: f64,
		head_width: f64,
	},
	Sphere {
		center: Vec3,
		radius: f64,
	},
}

/// How the neighbourhood overlay gets its radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OverlayRadius {
	/// Distance to the farthest of the k neighbours.
	KthNeighbor,
	Fixed(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct HighlightSession {
	pub kind: SessionKind,
	pub selected: PointId,
	pub affected: Vec<PointId>,
	pub artifacts: Vec<Artifact>,
	pub fade: FadeConfig,
	elapsed_ms: f64,
}

impl HighlightSession {
	pub const ARROW_HEAD_LENGTH: f64 = 20.0;
	pub const ARROW_HEAD_WIDTH: f64 = 10.0;

	/// Both endpoints highlighted, joined by a segment and optionally an arrow.
	pub fn connection(
		store: &PointStore,
		selected: PointId,
		nearest: Neighbor,
		fade: FadeConfig,
		direction_indicator: bool,
	) -> Option<Self> {
		let from = store.get(selected)?.position;
		let to = store.get(nearest.id)?.position;
		let mut artifacts = vec![Artifact::Segment { from, to }];
		if direction_indicator && nearest.distance > 0.0 {
			artifacts.push(Artifact::Arrow {
				origin: from,
				direction: (to - from).scale(1.0 / nearest.distance),
				length: nearest.distance,
				head_length: Self::ARROW_HEAD_LENGTH,
				head_width: Self::ARROW_HEAD_WIDTH,
			});
		}
		Some(Self {
			kind: SessionKind::Connection,
			selected,
			affected: vec![selected, nearest.id],
			artifacts,
			fade,
			elapsed_ms: 0.0,
		})
	}

	/// The k neighbours highlighted inside a sphere around the selection.
	pub fn neighborhood(
		store: &PointStore,
		selected: PointId,
		hood: &Neighborhood,
		fade: FadeConfig,
		radius: OverlayRadius,
	) -> Option<Self> {
		let center = store.get(selected)?.position;
		let radius = match radius {
			OverlayRadius::KthNeighbor => hood.radius,
			OverlayRadius::Fixed(r) => r,
		};
		Some(Self {
			kind: SessionKind::Neighborhood,
			selected,
			affected: hood.ids().collect(),
			artifacts: vec![Artifact::Sphere { center, radius }],
			fade,
			elapsed_ms: 0.0,
		})
	}

	pub fn elapsed_ms(&self) -> f64 {
		self.elapsed_ms
	}

	pub fn phase(&self) -> Phase {
		self.fade.phase_at(self.elapsed_ms)
	}

	pub fn opacity(&self) -> f64 {
		self.fade.opacity_at(self.elapsed_ms)
	}

	fn reset(&self, paint: &mut Paint) {
		for &id in &self.affected {
			paint.set(id, Rgb::NEUTRAL);
		}
	}
}

/// At most one live session per kind.
#[derive(Clone, Debug, Default)]
pub struct Highlighter {
	connection: Option<HighlightSession>,
	neighborhood: Option<HighlightSession>,
}

impl Highlighter {
	fn slot(&mut self, kind: SessionKind) -> &mut Option<HighlightSession> {
		match kind {
			SessionKind::Connection => &mut self.connection,
			SessionKind::Neighborhood => &mut self.neighborhood,
		}
	}

	pub fn session(&self, kind: SessionKind) -> Option<&HighlightSession> {
		match kind {
			SessionKind::Connection => self.connection.as_ref(),
			SessionKind::Neighborhood => self.neighborhood.as_ref(),
		}
	}

	pub fn sessions(&self) -> impl Iterator<Item = &HighlightSession> {
		self.connection.iter().chain(self.neighborhood.iter())
	}

	pub fn phase(&self, kind: SessionKind) -> Phase {
		self.session(kind).map_or(Phase::Idle, HighlightSession::phase)
	}

	/// Activates `session`, first resetting whatever session of the same kind
	/// it replaces. Returns the replaced session.
	pub fn start(&mut self, session: HighlightSession, paint: &mut Paint) -> Option<HighlightSession> {
		debug!(
			"{:?} highlight on {:?} ({} points)",
			session.kind,
			session.selected,
			session.affected.len()
		);
		let previous = self.slot(session.kind).replace(session);
		if let Some(prev) = &previous {
			prev.reset(paint);
		}
		previous
	}

	/// Moves every live session forward. Sessions that reach the end are
	/// removed and their points painted neutral; their kinds are returned.
	pub fn advance(&mut self, dt_ms: f64, paint: &mut Paint) -> Vec<SessionKind> {
		let mut finished = Vec::new();
		for kind in [SessionKind::Connection, SessionKind::Neighborhood] {
			let slot = self.slot(kind);
			let done = match slot {
				Some(session) => {
					session.elapsed_ms += dt_ms.max(0.0);
					session.phase() == Phase::Idle
				}
				None => false,
			};
			if done {
				if let Some(session) = slot.take() {
					session.reset(paint);
					debug!("{kind:?} highlight faded after {:.0}ms", session.elapsed_ms());
					finished.push(kind);
				}
			}
		}
		finished
	}

	pub fn is_highlighted(&self, id: PointId) -> bool {
		self.sessions().any(|s| s.affected.contains(&id))
	}

	/// Colour to draw `id` with this frame.
	pub fn display_color(&self, id: PointId, paint: &Paint) -> Rgb {
		if self.is_highlighted(id) {
			Rgb::HIGHLIGHT
		} else {
			paint.color(id)
		}
	}

	/// Live artifacts with their current opacity.
	pub fn artifacts(&self) -> impl Iterator<Item = (&Artifact, f64)> {
		self.sessions()
			.flat_map(|s| s.artifacts.iter().map(move |a| (a, s.opacity())))
	}
}

#[cfg(test)]
mod tests {
	use super::super::proximity::{k_nearest, nearest};
	use super::super::types::{Genre, Point};
	use super::*;

	fn line_store(n: usize) -> PointStore {
		let mut store = PointStore::new();
		for i in 0..n {
			let x = (i * i) as f64;
			store.add(Point::new(Vec3::new(x, 0.0, 0.0), format!("p{i}"), Genre::Blues, ""));
		}
		store
	}

	fn connect(store: &PointStore, from: usize) -> HighlightSession {
		let hit = nearest(PointId(from), store.all()).unwrap();
		HighlightSession::connection(store, PointId(from), hit, FadeConfig::CONNECTION, true).unwrap()
	}

	#[test]
	fn default_lifetimes() {
		assert_eq!(FadeConfig::CONNECTION.fade_ticks(), 9);
		assert_eq!(FadeConfig::CONNECTION.lifetime_ms(), 750.0);
		assert_eq!(FadeConfig::NEIGHBORHOOD.fade_ticks(), 2);
		assert_eq!(FadeConfig::NEIGHBORHOOD.lifetime_ms(), 5200.0);
	}

	#[test]
	fn opacity_steps_down_after_hold() {
		let fade = FadeConfig::CONNECTION;
		assert_eq!(fade.phase_at(0.0), Phase::Active);
		assert_eq!(fade.opacity_at(299.0), 1.0);
		assert_eq!(fade.phase_at(300.0), Phase::Decaying);
		assert_eq!(fade.opacity_at(349.0), 1.0);
		assert!((fade.opacity_at(350.0) - 0.9).abs() < 1e-9);
		assert!((fade.opacity_at(749.0) - 0.2).abs() < 1e-9);
		assert_eq!(fade.phase_at(750.0), Phase::Idle);
	}

	#[test]
	fn alternate_fade_runs_five_steps_to_half() {
		let fade = FadeConfig {
			hold_ms: 5000.0,
			step_opacity: 0.1,
			tick_ms: 100.0,
			floor_opacity: 0.5,
			initial_opacity: 1.0,
		};
		assert_eq!(fade.fade_ticks(), 5);
		assert_eq!(fade.lifetime_ms(), 5500.0);
	}

	#[test]
	fn connection_clears_at_750ms() {
		let store = line_store(4);
		let mut paint = Paint::new(&store);
		let mut hl = Highlighter::default();
		hl.start(connect(&store, 0), &mut paint);
		assert_eq!(hl.display_color(PointId(0), &paint), Rgb::HIGHLIGHT);
		assert_eq!(hl.display_color(PointId(1), &paint), Rgb::HIGHLIGHT);
		assert_eq!(hl.artifacts().count(), 2);

		for _ in 0..749 {
			assert!(hl.advance(1.0, &mut paint).is_empty());
		}
		assert_eq!(hl.phase(SessionKind::Connection), Phase::Decaying);

		assert_eq!(hl.advance(1.0, &mut paint), vec![SessionKind::Connection]);
		assert_eq!(hl.phase(SessionKind::Connection), Phase::Idle);
		assert_eq!(hl.artifacts().count(), 0);
		assert_eq!(hl.display_color(PointId(0), &paint), Rgb::NEUTRAL);
		assert_eq!(hl.display_color(PointId(1), &paint), Rgb::NEUTRAL);
		assert_eq!(hl.display_color(PointId(3), &paint), Rgb::WHITE);
	}

	#[test]
	fn restart_resets_previous_points_first() {
		let store = line_store(8);
		let mut paint = Paint::new(&store);
		let mut hl = Highlighter::default();
		hl.start(connect(&store, 0), &mut paint);
		hl.advance(400.0, &mut paint);

		let replaced = hl.start(connect(&store, 6), &mut paint).unwrap();
		assert_eq!(replaced.affected, vec![PointId(0), PointId(1)]);
		for id in replaced.affected {
			assert!(!hl.is_highlighted(id));
			assert_eq!(hl.display_color(id, &paint), Rgb::NEUTRAL);
		}
		assert!(hl.is_highlighted(PointId(6)));
		assert!(hl.is_highlighted(PointId(5)));
		assert_eq!(hl.session(SessionKind::Connection).unwrap().elapsed_ms(), 0.0);
	}

	#[test]
	fn kinds_fade_independently() {
		let store = line_store(8);
		let mut paint = Paint::new(&store);
		let mut hl = Highlighter::default();
		let hood = k_nearest(PointId(0), store.all(), 5).unwrap();
		let session = HighlightSession::neighborhood(
			&store,
			PointId(0),
			&hood,
			FadeConfig::NEIGHBORHOOD,
			OverlayRadius::KthNeighbor,
		)
		.unwrap();
		hl.start(session, &mut paint);
		hl.start(connect(&store, 7), &mut paint);

		assert_eq!(hl.advance(750.0, &mut paint), vec![SessionKind::Connection]);
		assert_eq!(hl.phase(SessionKind::Neighborhood), Phase::Active);
		let (sphere, opacity) = hl.artifacts().next().unwrap();
		assert_eq!(
			sphere,
			&Artifact::Sphere {
				center: Vec3::ZERO,
				radius: 25.0
			}
		);
		assert!((opacity - 0.3).abs() < 1e-9);

		assert_eq!(hl.advance(4450.0, &mut paint), vec![SessionKind::Neighborhood]);
		for id in 1..=5 {
			assert_eq!(hl.display_color(PointId(id), &paint), Rgb::NEUTRAL);
		}
	}

	#[test]
	fn arrow_points_at_nearest() {
		let store = line_store(3);
		let session = connect(&store, 2);
		match &session.artifacts[1] {
			Artifact::Arrow {
				origin,
				direction,
				length,
				..
			} => {
				assert_eq!(*origin, Vec3::new(4.0, 0.0, 0.0));
				assert_eq!(*direction, Vec3::new(-1.0, 0.0, 0.0));
				assert_eq!(*length, 3.0);
			}
			other => panic!("expected arrow, got {other:?}"),
		}
	}
}
