use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};

use crate::astar::{find_path, path_cost};
use crate::color::Color;
use crate::config::{ConfigError, MapConfig};
use crate::map::Map;
use crate::reveal::PathReveal;
use crate::selection::{Channel, ChannelState, ClickEffect, Endpoint, PathStatus, Selection};
use crate::tile::TileId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOutcome {
	Found { length: usize, cost: f32 },
	Unreachable,
}

/// What one [`Engine::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
	pub faded: Option<TileId>,
	pub revealed: Option<TileId>,
	pub solved: Option<PathOutcome>,
	pub regenerated: bool,
	/// Tiles whose displayed color moved this tick.
	pub recolored: usize,
}

/// Owns the map and everything the player has selected on it.
///
/// The host feeds it hover changes, the two click actions and a per-frame
/// `tick`; it reads tile colors back from [`Engine::map`].
#[derive(Debug)]
pub struct Engine {
	config: MapConfig,
	map: Map,
	selection: Selection,
	reveal: PathReveal,
	rng: StdRng,
}

impl Engine {
	/// Validates `config` and generates the first map.
	pub fn new(config: MapConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		let mut rng = match config.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};
		let map = Map::generate(&config, &mut rng)?;
		Ok(Self::with_parts(config, map, rng))
	}

	/// Wraps an already built map. Regenerating later uses the map's size,
	/// layout and colors with the default palette.
	pub fn from_map(map: Map) -> Self {
		let config = MapConfig {
			width: map.width(),
			height: map.height(),
			layout: map.layout(),
			colors: map.colors,
			animation_rate: map.animation_rate,
			..MapConfig::default()
		};
		let rng = StdRng::seed_from_u64(config.seed.unwrap_or_default());
		Self::with_parts(config, map, rng)
	}

	fn with_parts(config: MapConfig, map: Map, rng: StdRng) -> Self {
		Self { config, map, selection: Selection::default(), reveal: PathReveal::default(), rng }
	}

	pub fn config(&self) -> &MapConfig {
		&self.config
	}

	pub fn map(&self) -> &Map {
		&self.map
	}

	pub fn selection(&self) -> &Selection {
		&self.selection
	}

	pub fn reveal(&self) -> &PathReveal {
		&self.reveal
	}

	pub fn hovered(&self) -> Option<TileId> {
		self.selection.hovered
	}

	pub fn origin(&self) -> Option<TileId> {
		self.selection.origin
	}

	pub fn goal(&self) -> Option<TileId> {
		self.selection.goal
	}

	pub fn path_status(&self) -> PathStatus {
		self.selection.path
	}

	pub fn channel_state(&self, channel: Channel) -> ChannelState {
		self.selection.channels.state(channel)
	}

	/// Origin, goal, or part of the path currently drawn.
	pub fn is_selected(&self, tile: TileId) -> bool {
		self.selection.is_endpoint(tile) || self.reveal.is_revealed(tile)
	}

	// ---------- Map lifecycle ----------

	/// Swaps the config used by later regenerations.
	pub fn set_config(&mut self, config: MapConfig) -> Result<(), ConfigError> {
		config.validate()?;
		self.config = config;
		Ok(())
	}

	/// Replaces every tile with a freshly generated map and drops the selection.
	pub fn regenerate(&mut self) -> Result<(), ConfigError> {
		self.map = Map::generate(&self.config, &mut self.rng)?;
		self.reset_selection();
		Ok(())
	}

	pub fn clear(&mut self) {
		self.map.clear();
		self.reset_selection();
	}

	fn reset_selection(&mut self) {
		self.selection = Selection::default();
		self.reveal.reset();
	}

	// ---------- Input ----------

	/// Moves the hover target. `None` means the pointer is over no tile.
	pub fn hover(&mut self, tile: Option<TileId>) {
		let tile = tile.filter(|t| self.map.get(*t).is_some());
		let previous = std::mem::replace(&mut self.selection.hovered, tile);
		if let Some(p) = previous.filter(|p| Some(*p) != tile) {
			self.restore(p);
		}
		if let Some(t) = tile {
			if !self.is_selected(t) {
				let color = self.hover_color(t);
				self.map.paint(t, color);
			}
		}
	}

	pub fn primary_action(&mut self) -> bool {
		self.press(Channel::Primary)
	}

	pub fn secondary_action(&mut self) -> bool {
		self.press(Channel::Secondary)
	}

	/// Applies one click on `channel` to the hovered tile. Returns `false`
	/// when the click was ignored.
	pub fn press(&mut self, channel: Channel) -> bool {
		let Some(tile) = self.selection.hovered else {
			return false;
		};
		if !self.map.is_walkable(tile) {
			return false;
		}
		let (next, effect) = self.selection.channels.press(channel);
		match effect {
			ClickEffect::ClearAll => self.clear_selection(),
			ClickEffect::Place { endpoint, clear_first } => {
				if !clear_first && self.selection.endpoint(endpoint.other()) == Some(tile) {
					return false;
				}
				if clear_first {
					self.clear_selection();
				}
				self.place(endpoint, tile);
			}
		}
		debug!("{channel:?} click: {:?} -> {next:?}", self.selection.channels);
		self.selection.channels = next;
		true
	}

	/// Puts `tile` at the origin without going through the click channels.
	pub fn set_origin(&mut self, tile: TileId) -> bool {
		self.set_endpoint(Endpoint::Origin, tile)
	}

	/// Puts `tile` at the goal without going through the click channels.
	pub fn set_goal(&mut self, tile: TileId) -> bool {
		self.set_endpoint(Endpoint::Goal, tile)
	}

	fn set_endpoint(&mut self, endpoint: Endpoint, tile: TileId) -> bool {
		if !self.map.is_walkable(tile) || self.selection.endpoint(endpoint.other()) == Some(tile) {
			return false;
		}
		self.place(endpoint, tile);
		true
	}

	fn place(&mut self, endpoint: Endpoint, tile: TileId) {
		let replaced = self.selection.set_endpoint(endpoint, Some(tile));
		self.selection.origin_first = endpoint == Endpoint::Goal;
		self.map.paint(tile, self.map.colors.select);

		self.selection.path = PathStatus::NotCalculated;
		for stale in self.reveal.cancel() {
			self.restore(stale);
		}
		if let Some(old) = replaced.filter(|old| *old != tile) {
			self.restore(old);
		}
	}

	fn clear_selection(&mut self) {
		let mut released = self.reveal.clear();
		released.extend(self.selection.set_endpoint(Endpoint::Origin, None));
		released.extend(self.selection.set_endpoint(Endpoint::Goal, None));
		self.selection.path = PathStatus::NotCalculated;
		for t in released {
			self.restore(t);
		}
	}

	// ---------- Coloring ----------

	fn hover_color(&self, tile: TileId) -> Color {
		if self.map.is_walkable(tile) {
			self.map.colors.hover
		} else {
			self.map.colors.invalid
		}
	}

	/// Puts an unselected tile back to its resting color: hover color if the
	/// pointer is on it, default otherwise. Selected tiles are left alone.
	fn restore(&mut self, tile: TileId) {
		if self.is_selected(tile) {
			return;
		}
		let color = if self.selection.hovered == Some(tile) {
			self.hover_color(tile)
		} else {
			self.map.colors.default
		};
		self.map.paint(tile, color);
	}

	// ---------- Tick ----------

	/// Advances one frame: fades one tile of the previous path, then either
	/// solves a new origin/goal pair or reveals one more tile of the current
	/// path, then moves every tile's color along.
	pub fn tick(&mut self, delta_time: f32) -> TickReport {
		let mut report = TickReport::default();

		if let Some(t) = self.reveal.next_fade() {
			self.restore(t);
			report.faded = Some(t);
		}

		if let Some((origin, goal)) = self.selection.pair() {
			match self.selection.path {
				PathStatus::NotCalculated => {
					let outcome = self.solve(origin, goal);
					report.solved = Some(outcome);
					if outcome == PathOutcome::Unreachable && self.config.regenerate_on_unreachable {
						match self.regenerate() {
							Ok(()) => report.regenerated = true,
							Err(e) => warn!("Regenerate after unreachable path failed: {e}"),
						}
					}
				}
				PathStatus::Solved { .. } => {
					if let Some(t) = self.reveal.next_reveal(self.selection.origin_first) {
						if !self.selection.is_endpoint(t) {
							self.map.paint(t, self.map.colors.path);
						}
						report.revealed = Some(t);
					}
				}
				PathStatus::Unreachable => {}
			}
		}

		report.recolored = self.map.animate(delta_time);
		report
	}

	fn solve(&mut self, origin: TileId, goal: TileId) -> PathOutcome {
		let (path, cost) = {
			let nodes = find_path(self.map.node(origin), self.map.node(goal));
			let cost = path_cost(&nodes);
			(nodes.into_iter().map(|n| n.id).collect::<Vec<_>>(), cost)
		};
		if path.is_empty() {
			warn!("No path from {origin:?} to {goal:?}");
			self.selection.path = PathStatus::Unreachable;
			return PathOutcome::Unreachable;
		}
		let length = path.len();
		info!("Path from {origin:?} to {goal:?}: {length} tiles, cost {cost}");
		self.selection.path = PathStatus::Solved { length };
		self.reveal.load(path);
		PathOutcome::Found { length, cost }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::coords::GridCoordinate;
	use crate::tile::TileKind;

	fn engine(width: i32, height: i32) -> Engine {
		let config = MapConfig { width, height, animation_rate: 0.0, ..MapConfig::default() };
		Engine::from_map(Map::new(&config, TileKind::Grass).unwrap())
	}

	fn at(e: &Engine, x: i32, z: i32) -> TileId {
		e.map().id_at(GridCoordinate::new(x, z)).unwrap()
	}

	fn color(e: &Engine, t: TileId) -> Color {
		e.map().get(t).unwrap().displayed_color()
	}

	#[test]
	fn hover_paints_and_restores() {
		let mut e = engine(3, 3);
		let a = at(&e, 0, 0);
		let b = at(&e, 1, 0);
		e.hover(Some(a));
		assert_eq!(color(&e, a), Color::MAGENTA);
		e.hover(Some(b));
		assert_eq!(color(&e, a), Color::WHITE);
		assert_eq!(color(&e, b), Color::MAGENTA);
		e.hover(None);
		assert_eq!(color(&e, b), Color::WHITE);
		assert_eq!(e.hovered(), None);
	}

	#[test]
	fn hovering_water_shows_invalid() {
		let mut e = engine(2, 1);
		let mut map = e.map().clone();
		map.set_kind(GridCoordinate::new(1, 0), TileKind::Water);
		e = Engine::from_map(map);
		let w = at(&e, 1, 0);
		e.hover(Some(w));
		assert_eq!(color(&e, w), Color::GREY);
		assert!(!e.primary_action());
		assert_eq!(e.origin(), None);
	}

	#[test]
	fn click_without_hover_is_ignored() {
		let mut e = engine(2, 2);
		assert!(!e.primary_action());
		assert_eq!(e.channel_state(Channel::Primary), ChannelState::Idle);
	}

	#[test]
	fn hover_leaves_selected_tile_alone() {
		let mut e = engine(3, 3);
		let a = at(&e, 0, 0);
		e.hover(Some(a));
		e.primary_action();
		assert_eq!(color(&e, a), Color::RED);
		e.hover(Some(at(&e, 1, 1)));
		assert_eq!(color(&e, a), Color::RED);
		e.hover(Some(a));
		assert_eq!(color(&e, a), Color::RED);
	}

	#[test]
	fn goal_cannot_equal_origin() {
		let mut e = engine(3, 3);
		let a = at(&e, 1, 1);
		e.hover(Some(a));
		assert!(e.primary_action());
		assert!(!e.primary_action());
		assert_eq!(e.goal(), None);
		assert_eq!(e.channel_state(Channel::Primary), ChannelState::OriginArmed);
		assert!(!e.set_goal(a));
	}

	#[test]
	fn path_is_solved_once_per_pair() {
		let mut e = engine(4, 4);
		e.set_origin(at(&e, 0, 0));
		e.set_goal(at(&e, 3, 3));
		let first = e.tick(0.016);
		assert!(matches!(first.solved, Some(PathOutcome::Found { .. })));
		for _ in 0..10 {
			assert!(e.tick(0.016).solved.is_none());
		}
	}

	#[test]
	fn origin_and_goal_keep_select_color_on_path() {
		let mut e = engine(4, 1);
		let o = at(&e, 0, 0);
		let g = at(&e, 3, 0);
		e.set_origin(o);
		e.set_goal(g);
		for _ in 0..5 {
			e.tick(0.016);
		}
		assert_eq!(e.reveal().revealed().len(), 4);
		assert_eq!(color(&e, o), Color::RED);
		assert_eq!(color(&e, g), Color::RED);
		assert_eq!(color(&e, at(&e, 1, 0)), Color::GREEN);
		assert_eq!(color(&e, at(&e, 2, 0)), Color::GREEN);
	}

	#[test]
	fn clear_drops_selection() {
		let mut e = engine(3, 3);
		e.set_origin(at(&e, 0, 0));
		e.set_goal(at(&e, 2, 2));
		e.tick(0.016);
		e.clear();
		assert!(e.map().is_empty());
		assert_eq!(e.origin(), None);
		assert_eq!(e.reveal().held(), 0);
		assert_eq!(e.tick(0.016), TickReport::default());
	}
}
