use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorFade};
use crate::coords::{GridCoordinate, WorldPos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
	Grass,
	Forest,
	Desert,
	Mountain,
	Water,
}

impl TileKind {
	pub const ALL: [TileKind; 5] = [
		TileKind::Grass,
		TileKind::Forest,
		TileKind::Desert,
		TileKind::Mountain,
		TileKind::Water,
	];

	/// Terrain cost of standing on the tile. Water is -1 and never walked.
	pub fn cost(self) -> i32 {
		match self {
			TileKind::Grass => 1,
			TileKind::Forest => 3,
			TileKind::Desert => 5,
			TileKind::Mountain => 10,
			TileKind::Water => -1,
		}
	}

	pub fn is_walkable(self) -> bool {
		self != TileKind::Water
	}

	pub fn name(self) -> &'static str {
		match self {
			TileKind::Grass => "Grass",
			TileKind::Forest => "Forest",
			TileKind::Desert => "Desert",
			TileKind::Mountain => "Mountain",
			TileKind::Water => "Water",
		}
	}
}

/// Index into the tile table of the owning [`crate::Map`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub usize);

#[derive(Debug, Clone)]
pub struct Tile {
	pub kind: TileKind,
	pub coordinate: GridCoordinate,
	pub position: WorldPos,
	color: ColorFade,
}

impl Tile {
	pub fn new(kind: TileKind, coordinate: GridCoordinate, position: WorldPos, color: Color) -> Self {
		Self { kind, coordinate, position, color: ColorFade::new(color) }
	}

	pub fn cost(&self) -> i32 {
		self.kind.cost()
	}

	pub fn is_walkable(&self) -> bool {
		self.kind.is_walkable()
	}

	pub fn name(&self) -> String {
		format!("{} ({},{})", self.kind.name(), self.coordinate.x, self.coordinate.z)
	}

	pub fn displayed_color(&self) -> Color {
		self.color.current()
	}

	pub fn target_color(&self) -> Color {
		self.color.target()
	}

	/// Start moving toward `color`; a zero rate applies it at once.
	pub fn set_color(&mut self, color: Color, animation_rate: f32) {
		self.color.set(color, animation_rate);
	}

	pub fn reset_color(&mut self, color: Color) {
		self.color.reset_to(color);
	}

	pub(crate) fn animate(&mut self, delta_time: f32, animation_rate: f32) -> bool {
		self.color.advance(delta_time, animation_rate)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn costs_follow_terrain() {
		assert_eq!(TileKind::Grass.cost(), 1);
		assert_eq!(TileKind::Forest.cost(), 3);
		assert_eq!(TileKind::Desert.cost(), 5);
		assert_eq!(TileKind::Mountain.cost(), 10);
		assert_eq!(TileKind::Water.cost(), -1);
	}

	#[test]
	fn only_water_blocks() {
		for k in TileKind::ALL {
			assert_eq!(k.is_walkable(), k != TileKind::Water);
		}
	}

	#[test]
	fn tile_name_includes_coordinate() {
		let t = Tile::new(TileKind::Forest, GridCoordinate::new(3, 4), WorldPos::default(), Color::WHITE);
		assert_eq!(t.name(), "Forest (3,4)");
	}
}
