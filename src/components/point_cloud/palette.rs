use std::collections::BTreeSet;

use super::store::PointStore;
use super::types::{Genre, PointId, Rgb};

/// Static genre palette.
pub struct GenreColorMap;

impl GenreColorMap {
	pub fn color(genre: &Genre) -> Option<Rgb> {
		let hex = match genre {
			Genre::Blues => 0x1f77b4,
			Genre::Classical => 0xf89727,
			Genre::Country => 0x2ca02c,
			Genre::Disco => 0x1cc47e,
			Genre::HipHop => 0x9467bd,
			Genre::Jazz => 0xf74e72,
			Genre::Metal => 0xfc54c9,
			Genre::Pop => 0xf87f7f,
			Genre::Reggae => 0xf1f132,
			Genre::Rock => 0x48cbda,
			Genre::Unknown(_) => return None,
		};
		Some(Rgb::from_hex(hex))
	}

	/// Every genre label in the store that has no palette entry, sorted.
	pub fn unmapped(store: &PointStore) -> Vec<String> {
		store
			.all()
			.iter()
			.filter(|p| Self::color(&p.genre).is_none())
			.map(|p| p.genre.label().to_string())
			.collect::<BTreeSet<_>>()
			.into_iter()
			.collect()
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
	#[default]
	Original,
	ByGenre,
}

impl ColorMode {
	pub fn toggled(self) -> Self {
		match self {
			ColorMode::Original => ColorMode::ByGenre,
			ColorMode::ByGenre => ColorMode::Original,
		}
	}
}

/// Resting colour of every point, underneath any active highlight.
#[derive(Clone, Debug, Default)]
pub struct Paint {
	colors: Vec<Rgb>,
}

impl Paint {
	pub fn new(store: &PointStore) -> Self {
		Self {
			colors: store.all().iter().map(|p| p.base_color).collect(),
		}
	}

	pub fn color(&self, id: PointId) -> Rgb {
		self.colors.get(id.0).copied().unwrap_or(Rgb::NEUTRAL)
	}

	pub fn set(&mut self, id: PointId, color: Rgb) {
		if let Some(slot) = self.colors.get_mut(id.0) {
			*slot = color;
		}
	}

	/// Resets every point to its base colour, then applies `mode`.
	pub fn apply_mode(&mut self, store: &PointStore, mode: ColorMode) {
		for (id, point) in store.iter() {
			self.set(id, point.base_color);
			if mode == ColorMode::ByGenre {
				if let Some(c) = GenreColorMap::color(&point.genre) {
					self.set(id, c);
				}
			}
		}
	}
}
