pub mod astar;
pub mod color;
pub mod config;
pub mod coords;
pub mod engine;
pub mod hud;
pub mod map;
pub mod reveal;
pub mod selection;
pub mod tile;

// Re-exports for convenience in tests and integration users.
pub use astar::{Node, find_path, path_cost};
pub use color::{Color, ColorPalette};
pub use config::{ConfigError, MapConfig};
pub use coords::{GridCoordinate, GridLayout, HexDirection, WorldPos, neighbor_coordinate};
pub use engine::{Engine, PathOutcome, TickReport};
pub use hud::{InfoPanel, format_info, format_tile_info};
pub use map::{Map, TileRef};
pub use reveal::PathReveal;
pub use selection::{Channel, ChannelState, ClickChannels, ClickEffect, Endpoint, PathStatus, Selection};
pub use tile::{Tile, TileId, TileKind};
