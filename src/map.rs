use log::{debug, info};
use rand::Rng;

use crate::astar::Node;
use crate::color::{Color, ColorPalette};
use crate::config::{ConfigError, MapConfig};
use crate::coords::{GridCoordinate, GridLayout, HexDirection, WorldPos};
use crate::tile::{Tile, TileId, TileKind};

/// Hits further than this many cell sizes from every tile centre miss.
const HIT_RADIUS_FACTOR: f32 = 0.6;

/// The tile table plus everything needed to paint it.
#[derive(Debug, Clone)]
pub struct Map {
    width: i32,
    height: i32,
    layout: GridLayout,
    pub colors: ColorPalette,
    pub animation_rate: f32,
    tiles: Vec<Tile>,
}

impl Map {
    /// Builds a map where every tile is `fill`.
    pub fn new(config: &MapConfig, fill: TileKind) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, |_| fill))
    }

    /// Builds a map whose tiles are drawn from the configured palette.
    pub fn generate<R: Rng>(config: &MapConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let map = Self::build(config, |_| config.palette[rng.gen_range(0..config.palette.len())]);
        info!(
            "Generated {}x{} map ({} tiles)",
            map.width,
            map.height,
            map.tiles.len()
        );
        Ok(map)
    }

    fn build(config: &MapConfig, mut kind_at: impl FnMut(GridCoordinate) -> TileKind) -> Self {
        let mut tiles = Vec::with_capacity((config.width as usize) * (config.height as usize));
        for z in 0..config.height {
            for x in 0..config.width {
                let c = GridCoordinate::new(x, z);
                let position = config.layout.position(x, z);
                tiles.push(Tile::new(kind_at(c), c, position, config.colors.default));
            }
        }
        Self {
            width: config.width,
            height: config.height,
            layout: config.layout,
            colors: config.colors,
            animation_rate: config.animation_rate,
            tiles,
        }
    }

    /// Drops every tile. Dimensions are kept so a later regenerate knows the size.
    pub fn clear(&mut self) {
        debug!("Clearing {} tiles", self.tiles.len());
        self.tiles.clear();
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    fn index(&self, c: GridCoordinate) -> Option<usize> {
        if self.tiles.is_empty() || !c.in_bounds(self.width, self.height) {
            return None;
        }
        Some((c.z * self.width + c.x) as usize)
    }

    pub fn id_at(&self, c: GridCoordinate) -> Option<TileId> {
        self.index(c).map(TileId)
    }

    pub fn tile_at(&self, c: GridCoordinate) -> Option<&Tile> {
        self.index(c).map(|i| &self.tiles[i])
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0)
    }

    pub fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id.0)
    }

    pub fn set_kind(&mut self, c: GridCoordinate, kind: TileKind) {
        if let Some(i) = self.index(c) {
            self.tiles[i].kind = kind;
        }
    }

    pub fn tiles(&self) -> impl Iterator<Item = (TileId, &Tile)> {
        self.tiles.iter().enumerate().map(|(i, t)| (TileId(i), t))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width.max(1) as usize)
    }

    pub fn node(&self, id: TileId) -> TileRef<'_> {
        TileRef { map: self, id }
    }

    pub fn is_walkable(&self, id: TileId) -> bool {
        self.get(id).is_some_and(Tile::is_walkable)
    }

    /// In-bounds walkable neighbours of `id`, in direction order.
    pub fn walkable_neighbours(&self, id: TileId) -> Vec<TileId> {
        let Some(tile) = self.get(id) else {
            return Vec::new();
        };
        tile.coordinate
            .neighbors()
            .filter_map(|c| self.id_at(c))
            .filter(|n| self.is_walkable(*n))
            .collect()
    }

    /// World positions of all six neighbour cells, whether a tile exists there or not.
    pub fn neighbour_positions(&self, id: TileId) -> Vec<WorldPos> {
        let Some(tile) = self.get(id) else {
            return Vec::new();
        };
        HexDirection::ALL
            .iter()
            .map(|d| self.layout.coordinate_position(tile.coordinate.neighbor(*d)))
            .collect()
    }

    /// Tile under a point on the map plane, if any.
    pub fn tile_at_world(&self, x: f32, z: f32) -> Option<TileId> {
        let p = WorldPos::new(x, 0.0, z);
        let reach = self.layout.cell_width.max(self.layout.cell_depth) * HIT_RADIUS_FACTOR;
        self.tiles()
            .map(|(id, t)| (id, t.position.planar_distance_sq(&p)))
            .filter(|(_, d)| *d <= reach * reach)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    pub(crate) fn paint(&mut self, id: TileId, color: Color) {
        let rate = self.animation_rate;
        if let Some(t) = self.get_mut(id) {
            t.set_color(color, rate);
        }
    }

    /// Advances every tile's color fade. Returns how many tiles changed.
    pub(crate) fn animate(&mut self, delta_time: f32) -> usize {
        let rate = self.animation_rate;
        self.tiles
            .iter_mut()
            .map(|t| t.animate(delta_time, rate))
            .filter(|changed| *changed)
            .count()
    }
}

/// A tile seen as a pathfinding node.
#[derive(Debug, Clone, Copy)]
pub struct TileRef<'a> {
    map: &'a Map,
    pub id: TileId,
}

impl TileRef<'_> {
    pub fn tile(&self) -> &Tile {
        &self.map.tiles[self.id.0]
    }
}

impl PartialEq for TileRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.map, other.map)
    }
}

impl Eq for TileRef<'_> {}

impl std::hash::Hash for TileRef<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Node for TileRef<'_> {
    fn neighbours(&self) -> Vec<Self> {
        self.map
            .walkable_neighbours(self.id)
            .into_iter()
            .map(|id| self.map.node(id))
            .collect()
    }

    /// Both ends of a step are charged.
    fn cost_to(&self, neighbour: &Self) -> f32 {
        (neighbour.tile().cost() + self.tile().cost()) as f32
    }

    /// Mean of the absolute x and z distances between the two centres.
    fn estimated_cost_to(&self, goal: &Self) -> f32 {
        let a = self.tile().position;
        let b = goal.tile().position;
        ((b.x - a.x).abs() + (b.z - a.z).abs()) / 2.0
    }
}
