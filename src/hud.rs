use crate::engine::Engine;
use crate::map::Map;
use crate::tile::{Tile, TileId};

/// Seconds between info panel refreshes.
pub const INFO_REFRESH_INTERVAL: f32 = 0.08;

const MISSING: &str = "NULL";

fn tile_name(map: &Map, tile: Option<TileId>) -> String {
	tile.and_then(|id| map.get(id))
		.map(Tile::name)
		.unwrap_or_else(|| MISSING.to_string())
}

pub fn format_info(map: &Map, hovered: Option<TileId>, origin: Option<TileId>, goal: Option<TileId>) -> String {
	format!(
		"Selected: \t{}\nOrigin: \t{}\nGoal: \t\t{}",
		tile_name(map, hovered),
		tile_name(map, origin),
		tile_name(map, goal)
	)
}

/// One block of the side panel: a title line, then the tile name and its cost.
pub fn format_tile_info(title: &str, tile: Option<&Tile>) -> Vec<String> {
	let mut out = vec![format!("[{title}]")];
	match tile {
		Some(t) => {
			out.push(t.name());
			out.push(format!("HCost:{}", t.cost()));
		}
		None => out.push(MISSING.to_string()),
	}
	out
}

/// Info text that is rebuilt on a fixed interval and reported only when it changed.
#[derive(Debug, Clone, Default)]
pub struct InfoPanel {
	text: String,
	since_refresh: f32,
	primed: bool,
}

impl InfoPanel {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	/// Returns the new text when a refresh produced something different.
	pub fn update(&mut self, delta_time: f32, engine: &Engine) -> Option<&str> {
		self.since_refresh += delta_time;
		if self.primed && self.since_refresh < INFO_REFRESH_INTERVAL {
			return None;
		}
		self.since_refresh = 0.0;
		let text = format_info(engine.map(), engine.hovered(), engine.origin(), engine.goal());
		if self.primed && text == self.text {
			return None;
		}
		self.primed = true;
		self.text = text;
		Some(&self.text)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::MapConfig;
	use crate::coords::GridCoordinate;
	use crate::tile::TileKind;

	fn engine() -> Engine {
		let config = MapConfig { width: 4, height: 4, ..MapConfig::default() };
		let mut map = Map::new(&config, TileKind::Grass).unwrap();
		map.set_kind(GridCoordinate::new(3, 3), TileKind::Forest);
		Engine::from_map(map)
	}

	#[test]
	fn empty_selection_reads_null() {
		let e = engine();
		let s = format_info(e.map(), None, None, None);
		assert_eq!(s, "Selected: \tNULL\nOrigin: \tNULL\nGoal: \t\tNULL");
	}

	#[test]
	fn tile_block_has_name_and_cost() {
		let e = engine();
		let forest = e.map().tile_at(GridCoordinate::new(3, 3));
		let lines = format_tile_info("Origin", forest);
		assert_eq!(lines, vec!["[Origin]", "Forest (3,3)", "HCost:3"]);
		assert_eq!(format_tile_info("Goal", None), vec!["[Goal]", "NULL"]);
	}

	#[test]
	fn panel_is_throttled_and_change_driven() {
		let mut e = engine();
		let mut panel = InfoPanel::new();
		assert!(panel.update(0.0, &e).is_some());
		assert!(panel.update(0.1, &e).is_none());

		let id = e.map().id_at(GridCoordinate::new(1, 0)).unwrap();
		e.hover(Some(id));
		assert!(panel.update(0.02, &e).is_none());
		let text = panel.update(0.07, &e).map(str::to_string);
		assert_eq!(text.as_deref(), Some("Selected: \tGrass (1,0)\nOrigin: \tNULL\nGoal: \t\tNULL"));
	}
}
