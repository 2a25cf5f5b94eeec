//! Tunables for the point-cloud explorer.

use crate::components::point_cloud::{FadeConfig, OverlayRadius};

/// Everything the explorer can be tuned with. Two presets exist, matching the
/// two presentation variants the explorer ships with.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualizerConfig {
	/// Coordinate service endpoint.
	pub data_url: String,
	/// Factor applied to each embedding coordinate.
	pub position_scale: f64,
	/// Neighbours shown by a context click.
	pub neighbor_count: usize,
	/// Fade of the click-to-connect highlight.
	pub connection: FadeConfig,
	/// Fade of the context-click neighbourhood highlight.
	pub neighborhood: FadeConfig,
	/// Radius source of the neighbourhood sphere.
	pub overlay_radius: OverlayRadius,
	/// Whether a connection also draws an arrow toward the nearest point.
	pub direction_indicator: bool,
	/// Ambient camera spin while auto-rotation is on.
	pub auto_rotate_rad_per_s: f64,
	/// Fade-out of the title overlay after the first click.
	pub title_fade_ms: f64,
}

impl Default for VisualizerConfig {
	fn default() -> Self {
		Self {
			data_url: "https://embedding-visualizer-backend.onrender.com/fixed".into(),
			position_scale: 1000.0,
			neighbor_count: 5,
			connection: FadeConfig::CONNECTION,
			neighborhood: FadeConfig::NEIGHBORHOOD,
			overlay_radius: OverlayRadius::KthNeighbor,
			direction_indicator: true,
			auto_rotate_rad_per_s: 0.06,
			title_fade_ms: 1000.0,
		}
	}
}

impl VisualizerConfig {
	/// Long-hold variant: connections linger 5s and fade to half, the
	/// neighbourhood sphere has a fixed size and there is no arrow.
	pub fn long_hold() -> Self {
		Self {
			connection: FadeConfig {
				hold_ms: 5000.0,
				step_opacity: 0.1,
				tick_ms: 100.0,
				floor_opacity: 0.5,
				initial_opacity: 1.0,
			},
			overlay_radius: OverlayRadius::Fixed(150.0),
			direction_indicator: false,
			..Self::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn presets_differ_only_in_variant_knobs() {
		let (a, b) = (VisualizerConfig::default(), VisualizerConfig::long_hold());
		assert_eq!(a.data_url, b.data_url);
		assert_eq!(a.neighborhood, b.neighborhood);
		assert_ne!(a.connection, b.connection);
		assert_eq!(b.connection.lifetime_ms(), 5500.0);
		assert!(!b.direction_indicator);
	}
}
