//! Pointer input → proximity queries → highlight transitions.
//!
//! Everything here works on already hit-tested input, so it runs without a
//! canvas or a browser.

use log::{debug, info, warn};

use super::highlight::{FadeConfig, HighlightSession, Highlighter, OverlayRadius, SessionKind};
use super::palette::{ColorMode, GenreColorMap, Paint};
use super::proximity::{k_nearest, nearest};
use super::store::PointStore;
use super::types::{PointId, Rgb};
use crate::config::VisualizerConfig;

/// Pointer input after the shell has hit-tested it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
	Move { hit: Option<PointId>, x: f64, y: f64 },
	Primary { hit: Option<PointId> },
	Secondary { hit: Option<PointId> },
	Double { hit: Option<PointId> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	pub prompt: String,
	pub genre: String,
	/// Cursor position the tooltip is anchored to.
	pub anchor: (f64, f64),
}

/// What the shell has to do in response to an input.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
	ShowTooltip(Tooltip),
	HideTooltip,
	Highlight(SessionKind),
	CopyToClipboard(String),
	DismissTitle,
	FreezeRotation,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TitleState {
	Shown,
	Fading { elapsed_ms: f64 },
	Removed,
}

/// Session-wide UI flags.
#[derive(Clone, Debug)]
pub struct UiState {
	clicks: u32,
	title: TitleState,
	title_fade_ms: f64,
	pub auto_rotate: bool,
	pub color_mode: ColorMode,
}

impl UiState {
	pub fn new(title_fade_ms: f64) -> Self {
		Self {
			clicks: 0,
			title: TitleState::Shown,
			title_fade_ms,
			auto_rotate: true,
			color_mode: ColorMode::Original,
		}
	}

	pub fn clicks(&self) -> u32 {
		self.clicks
	}

	/// Counts a primary click. The first one dismisses the title, the second
	/// stops the ambient rotation.
	pub fn register_primary_click(&mut self) -> Option<Action> {
		self.clicks = self.clicks.saturating_add(1);
		match self.clicks {
			1 => {
				self.title = TitleState::Fading { elapsed_ms: 0.0 };
				Some(Action::DismissTitle)
			}
			2 => {
				self.auto_rotate = false;
				Some(Action::FreezeRotation)
			}
			_ => None,
		}
	}

	pub fn toggle_rotation(&mut self) {
		self.auto_rotate = !self.auto_rotate;
	}

	/// `None` once the title has been removed.
	pub fn title_opacity(&self) -> Option<f64> {
		match self.title {
			TitleState::Shown => Some(1.0),
			TitleState::Fading { elapsed_ms } => {
				Some((1.0 - elapsed_ms / self.title_fade_ms.max(1.0)).clamp(0.0, 1.0))
			}
			TitleState::Removed => None,
		}
	}

	pub fn advance(&mut self, dt_ms: f64) {
		if let TitleState::Fading { elapsed_ms } = self.title {
			let elapsed_ms = elapsed_ms + dt_ms.max(0.0);
			self.title = if elapsed_ms >= self.title_fade_ms {
				TitleState::Removed
			} else {
				TitleState::Fading { elapsed_ms }
			};
		}
	}
}

/// Shell-independent explorer state.
#[derive(Clone, Debug)]
pub struct Explorer {
	pub store: PointStore,
	pub paint: Paint,
	pub highlighter: Highlighter,
	pub ui: UiState,
	neighbor_count: usize,
	connection: FadeConfig,
	neighborhood: FadeConfig,
	overlay_radius: OverlayRadius,
	direction_indicator: bool,
}

impl Explorer {
	pub fn new(store: PointStore, config: &VisualizerConfig) -> Self {
		let unmapped = GenreColorMap::unmapped(&store);
		if !unmapped.is_empty() {
			warn!("genres without a colour: {}", unmapped.join(", "));
		}
		Self {
			paint: Paint::new(&store),
			store,
			highlighter: Highlighter::default(),
			ui: UiState::new(config.title_fade_ms),
			neighbor_count: config.neighbor_count,
			connection: config.connection,
			neighborhood: config.neighborhood,
			overlay_radius: config.overlay_radius,
			direction_indicator: config.direction_indicator,
		}
	}

	/// Swaps in freshly loaded points, keeping UI flags and colour mode.
	pub fn replace_store(&mut self, store: PointStore) {
		if store.is_empty() {
			warn!("no points to show");
		}
		let unmapped = GenreColorMap::unmapped(&store);
		if !unmapped.is_empty() {
			warn!("genres without a colour: {}", unmapped.join(", "));
		}
		self.paint = Paint::new(&store);
		self.paint.apply_mode(&store, self.ui.color_mode);
		self.highlighter = Highlighter::default();
		self.store = store;
	}

	pub fn dispatch(&mut self, input: PointerInput) -> Vec<Action> {
		let mut actions = Vec::new();
		match input {
			PointerInput::Move { hit, x, y } => {
				actions.push(match hit.and_then(|id| self.store.get(id)) {
					Some(point) => Action::ShowTooltip(Tooltip {
						prompt: point.prompt.clone(),
						genre: point.genre.to_string(),
						anchor: (x, y),
					}),
					None => Action::HideTooltip,
				});
			}
			PointerInput::Primary { hit } => {
				actions.extend(self.ui.register_primary_click());
				debug!("primary click #{}", self.ui.clicks());
				if let Some(id) = hit {
					actions.extend(self.connect(id));
				}
			}
			PointerInput::Secondary { hit } => {
				if let Some(id) = hit {
					actions.extend(self.surround(id));
				}
			}
			PointerInput::Double { hit } => {
				if let Some(point) = hit.and_then(|id| self.store.get(id)) {
					info!("copying prompt of {:?}", point.name);
					actions.push(Action::CopyToClipboard(point.prompt.clone()));
				}
			}
		}
		actions
	}

	fn connect(&mut self, id: PointId) -> Option<Action> {
		let hit = nearest(id, self.store.all())?;
		let session = HighlightSession::connection(
			&self.store,
			id,
			hit,
			self.connection,
			self.direction_indicator,
		)?;
		debug!(
			"connection replaces a session in phase {:?}",
			self.highlighter.phase(SessionKind::Connection)
		);
		self.highlighter.start(session, &mut self.paint);
		Some(Action::Highlight(SessionKind::Connection))
	}

	fn surround(&mut self, id: PointId) -> Option<Action> {
		let Some(hood) = k_nearest(id, self.store.all(), self.neighbor_count) else {
			debug!("not enough points for a {}-neighbourhood", self.neighbor_count);
			return None;
		};
		let session = HighlightSession::neighborhood(
			&self.store,
			id,
			&hood,
			self.neighborhood,
			self.overlay_radius,
		)?;
		self.highlighter.start(session, &mut self.paint);
		Some(Action::Highlight(SessionKind::Neighborhood))
	}

	pub fn toggle_color_mode(&mut self) -> ColorMode {
		self.ui.color_mode = self.ui.color_mode.toggled();
		self.paint.apply_mode(&self.store, self.ui.color_mode);
		self.ui.color_mode
	}

	pub fn advance(&mut self, dt_ms: f64) -> Vec<SessionKind> {
		self.ui.advance(dt_ms);
		self.highlighter.advance(dt_ms, &mut self.paint)
	}

	pub fn display_color(&self, id: PointId) -> Rgb {
		self.highlighter.display_color(id, &self.paint)
	}
}

/// Offsets a tooltip from the cursor and keeps it inside the viewport.
pub fn place_tooltip(anchor: (f64, f64), size: (f64, f64), viewport: (f64, f64)) -> (f64, f64) {
	const OFFSET: f64 = 10.0;
	let clamp = |pos: f64, extent: f64, limit: f64| {
		let p = pos + OFFSET;
		if p + extent > limit {
			(limit - extent - OFFSET).max(0.0)
		} else {
			p
		}
	};
	(
		clamp(anchor.0, size.0, viewport.0),
		clamp(anchor.1, size.1, viewport.1),
	)
}
