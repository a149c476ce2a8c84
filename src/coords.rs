use serde::{Deserialize, Serialize};

/// Integer cell address. `x` is the column, `z` the row; `y` is the plane
/// marker and stays 0 for every map tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridCoordinate {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, y: 0, z }
    }

    pub fn in_bounds(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.z >= 0 && self.x < width && self.z < height
    }

    /// Neighbouring cell in `direction`. Rows alternate a half-cell shear, so
    /// from an even row the x offset of the odd rows above and below is
    /// pulled back by one.
    pub fn neighbor(&self, direction: HexDirection) -> GridCoordinate {
        let (dx, dy, dz) = direction.offset();
        let mut n = GridCoordinate {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        };
        if self.z.rem_euclid(2) == 0 {
            n.x -= n.z & 1;
        }
        n
    }

    pub fn neighbors(&self) -> impl Iterator<Item = GridCoordinate> + '_ {
        HexDirection::ALL.iter().map(move |d| self.neighbor(*d))
    }
}

/// Free-function form of [`GridCoordinate::neighbor`].
pub fn neighbor_coordinate(origin: GridCoordinate, direction: HexDirection) -> GridCoordinate {
    origin.neighbor(direction)
}

/// The six sides of a tile, indexed 0..5 starting on the right and going
/// counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HexDirection {
    Right,
    UpperRight,
    UpperLeft,
    Left,
    LowerLeft,
    LowerRight,
}

impl HexDirection {
    pub const ALL: [HexDirection; 6] = [
        HexDirection::Right,
        HexDirection::UpperRight,
        HexDirection::UpperLeft,
        HexDirection::Left,
        HexDirection::LowerLeft,
        HexDirection::LowerRight,
    ];

    pub fn from_index(index: usize) -> Option<HexDirection> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> HexDirection {
        Self::ALL[(self.index() + 3) % 6]
    }

    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            HexDirection::Right => (1, 0, 0),
            HexDirection::UpperRight => (1, 0, 1),
            HexDirection::UpperLeft => (0, 0, 1),
            HexDirection::Left => (-1, 0, 0),
            HexDirection::LowerLeft => (0, 0, -1),
            HexDirection::LowerRight => (1, 0, -1),
        }
    }
}

/// Continuous position on the map plane (`y` is up).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPos {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn planar_distance_sq(&self, other: &WorldPos) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        dx * dx + dz * dz
    }
}

/// Cell dimensions of the underlying rectangular grid that tiles are laid on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub cell_width: f32,
    pub cell_depth: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            cell_width: 1.0,
            cell_depth: 1.0,
        }
    }
}

impl GridLayout {
    pub fn new(cell_width: f32, cell_depth: f32) -> Self {
        Self {
            cell_width,
            cell_depth,
        }
    }

    pub fn cell_to_world(&self, x: i32, z: i32) -> WorldPos {
        WorldPos::new(x as f32 * self.cell_width, 0.0, z as f32 * self.cell_depth)
    }

    /// Centre of the tile at column `x`, row `z`. Odd rows sit half a cell to
    /// the right and rows overlap by a quarter cell.
    ///
    /// Tile placement, neighbour markers, the map preview and hit-testing all
    /// go through here so they can never disagree.
    pub fn position(&self, x: i32, z: i32) -> WorldPos {
        let mut p = self.cell_to_world(x, z);
        p.x += (self.cell_width + (z & 1) as f32) / 2.0;
        p.z -= z as f32 * (self.cell_depth / 4.0);
        p
    }

    pub fn coordinate_position(&self, c: GridCoordinate) -> WorldPos {
        self.position(c.x, c.z)
    }

    pub fn preview_positions(&self, width: i32, height: i32) -> impl Iterator<Item = WorldPos> + '_ {
        (0..height).flat_map(move |z| (0..width).map(move |x| self.position(x, z)))
    }
}
