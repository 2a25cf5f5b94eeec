use std::fmt;
use std::ops::{Add, Sub};

use serde::Deserialize;

/// Position of a point in display space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

impl Vec3 {
	pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

	pub const fn new(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z }
	}

	pub fn dot(self, other: Self) -> f64 {
		self.x * other.x + self.y * other.y + self.z * other.z
	}

	pub fn length(self) -> f64 {
		self.dot(self).sqrt()
	}

	pub fn distance(self, other: Self) -> f64 {
		(self - other).length()
	}

	pub fn scale(self, k: f64) -> Self {
		Self::new(self.x * k, self.y * k, self.z * k)
	}
}

impl Add for Vec3 {
	type Output = Self;

	fn add(self, other: Self) -> Self {
		Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
	}
}

impl Sub for Vec3 {
	type Output = Self;

	fn sub(self, other: Self) -> Self {
		Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
	}
}

/// 8-bit sRGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
	pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
	/// Colour every point falls back to once a highlight has decayed.
	pub const NEUTRAL: Rgb = Rgb(0xe9, 0xe9, 0xe9);
	pub const HIGHLIGHT: Rgb = Rgb(0x00, 0xac, 0xe0);

	pub const fn from_hex(hex: u32) -> Self {
		Self((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
	}

	pub fn css(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
	}

	pub fn css_alpha(self, alpha: f64) -> String {
		format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha.clamp(0.0, 1.0))
	}

	/// Scales each channel, used for the shaded rim of a disc.
	pub fn shade(self, factor: f64) -> Self {
		let f = |c: u8| (c as f64 * factor).round().clamp(0.0, 255.0) as u8;
		Self(f(self.0), f(self.1), f(self.2))
	}
}

/// Song genre. Labels outside the known set are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Genre {
	Blues,
	Classical,
	Country,
	Disco,
	HipHop,
	Jazz,
	Metal,
	Pop,
	Reggae,
	Rock,
	Unknown(String),
}

impl Genre {
	pub const KNOWN: [Genre; 10] = [
		Genre::Blues,
		Genre::Classical,
		Genre::Country,
		Genre::Disco,
		Genre::HipHop,
		Genre::Jazz,
		Genre::Metal,
		Genre::Pop,
		Genre::Reggae,
		Genre::Rock,
	];

	pub fn parse(label: &str) -> Self {
		let label = label.trim();
		Self::KNOWN
			.into_iter()
			.find(|g| g.label() == label)
			.unwrap_or_else(|| Genre::Unknown(label.to_string()))
	}

	pub fn label(&self) -> &str {
		match self {
			Genre::Blues => "Blues",
			Genre::Classical => "Classical",
			Genre::Country => "Country",
			Genre::Disco => "Disco",
			Genre::HipHop => "Hip-hop",
			Genre::Jazz => "Jazz",
			Genre::Metal => "Metal",
			Genre::Pop => "Pop",
			Genre::Reggae => "Reggae",
			Genre::Rock => "Rock",
			Genre::Unknown(label) => label,
		}
	}
}

impl fmt::Display for Genre {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Index of a point in the store. Stable for the whole session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub struct Point {
	pub position: Vec3,
	pub name: String,
	pub genre: Genre,
	pub prompt: String,
	pub base_color: Rgb,
}

impl Point {
	pub fn new(position: Vec3, name: impl Into<String>, genre: Genre, prompt: impl Into<String>) -> Self {
		Self {
			position,
			name: name.into(),
			genre,
			prompt: prompt.into(),
			base_color: Rgb::WHITE,
		}
	}
}

/// One element of the coordinate service's JSON array.
#[derive(Clone, Debug, Deserialize)]
pub struct SongRecord {
	pub umap_3d: Vec<f64>,
	pub name: String,
	pub genre: String,
	pub prompt: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn genre_labels_round_trip_through_parse() {
		for genre in Genre::KNOWN {
			assert_eq!(Genre::parse(genre.label()), genre);
		}
		assert_eq!(Genre::parse("Shoegaze"), Genre::Unknown("Shoegaze".into()));
	}

	#[test]
	fn rgb_formats_as_css() {
		assert_eq!(Rgb::from_hex(0x00ace0), Rgb::HIGHLIGHT);
		assert_eq!(Rgb::HIGHLIGHT.css(), "#00ace0");
		assert_eq!(Rgb::WHITE.css_alpha(0.5), "rgba(255, 255, 255, 0.5)");
	}

	#[test]
	fn distance_is_euclidean() {
		let a = Vec3::new(1.0, 2.0, 2.0);
		assert_eq!(a.distance(Vec3::ZERO), 3.0);
	}
}
