use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};
use hexpath::{Color as TileColor, Engine, InfoPanel, MapConfig, PathStatus, TileId, format_tile_info};

// ---------- Constants ----------
const TILE_SCALE: f32 = 48.0;
const TILE_FILL: f32 = 0.92;
const MARKER_SIZE: f32 = 8.0;
const CONFIG_PATH: &str = "hexpath.json";

// ---------- Components ----------
#[derive(Component)]
struct TileSprite {
	id: TileId,
}

#[derive(Component)]
struct TilesLayer; // Marker to despawn/rebuild after regenerate or clear

#[derive(Component)]
struct NeighbourMarker;

#[derive(Component)]
struct PreviewMarker;

// ---------- Resources ----------
#[derive(Resource)]
struct UiState {
	request_rebuild_tiles: bool,
	show_neighbours: bool,
	markers_for: Option<TileId>,
	pointer_over_ui: bool,
	info: InfoPanel,
	status: Option<String>,
}

impl Default for UiState {
	fn default() -> Self {
		Self {
			request_rebuild_tiles: true,
			show_neighbours: false,
			markers_for: None,
			pointer_over_ui: false,
			info: InfoPanel::new(),
			status: None,
		}
	}
}

#[derive(Resource)]
struct GameEngine {
	engine: Engine,
}

// ---------- Entry ----------
fn main() {
	let mut app = App::new();
	app.add_plugins(DefaultPlugins.set(WindowPlugin {
		primary_window: Some(Window {
			title: "Hexpath".to_string(),
			resolution: (1280, 800).into(),
			..Default::default()
		}),
		..Default::default()
	}))
	.add_plugins(EguiPlugin::default());

	// LogPlugin is installed by now, so config problems reach the log.
	let config = load_config();
	let engine = match Engine::new(config) {
		Ok(e) => e,
		Err(e) => {
			error!("Cannot build map: {e}");
			std::process::exit(1);
		}
	};

	app
		// Resources
		.insert_resource(UiState::default())
		.insert_resource(GameEngine { engine })
		// Setup
		.add_systems(Startup, setup_camera)
		// Frame systems
		.add_systems(
			Update,
			(
				handle_keyboard,
				handle_pointer,
				tick_engine,
				build_tiles_when_needed,
				update_tile_colors,
				update_neighbour_markers,
			)
				.chain(),
		)
		.add_systems(EguiPrimaryContextPass, draw_ui)
		.run();
}

/// Reads the JSON config named on the command line, or `hexpath.json` if present.
fn load_config() -> MapConfig {
	let explicit = std::env::args().nth(1);
	let path = explicit.clone().unwrap_or_else(|| CONFIG_PATH.to_string());
	match std::fs::read_to_string(&path) {
		Ok(text) => match MapConfig::from_json_str(&text) {
			Ok(c) => {
				info!("Loaded config from {path}");
				c
			}
			Err(e) => {
				warn!("Ignoring {path}: {e}");
				MapConfig::default()
			}
		},
		Err(e) => {
			if explicit.is_some() {
				warn!("Cannot read {path}: {e}");
			}
			MapConfig::default()
		}
	}
}

// ---------- Setup ----------
fn setup_camera(mut commands: Commands, engine: Res<GameEngine>) {
	let map = engine.engine.map();
	let layout = map.layout();
	let center_x = (map.width() as f32 + 0.5) * layout.cell_width * TILE_SCALE * 0.5;
	let center_y = map.height() as f32 * layout.cell_depth * 0.75 * TILE_SCALE * 0.5;
	commands.spawn((Camera2d, Transform::from_xyz(center_x, center_y, 1000.0)));
}

// ---------- Utilities ----------
fn to_bevy_color(c: TileColor) -> Color {
	Color::srgba(c.r, c.g, c.b, c.a)
}

fn kind_tint(k: hexpath::TileKind) -> Color {
	use hexpath::TileKind;
	match k {
		TileKind::Grass => Color::srgb(0.35, 0.7, 0.3),
		TileKind::Forest => Color::srgb(0.1, 0.4, 0.15),
		TileKind::Desert => Color::srgb(0.85, 0.75, 0.45),
		TileKind::Mountain => Color::srgb(0.45, 0.42, 0.4),
		TileKind::Water => Color::srgb(0.15, 0.35, 0.8),
	}
}

/// Tile color multiplied by the terrain tint so selection colors stay readable.
fn sprite_color(tile: &hexpath::Tile) -> Color {
	let shown = to_bevy_color(tile.displayed_color()).to_srgba();
	let tint = kind_tint(tile.kind).to_srgba();
	Color::srgba(shown.red * tint.red, shown.green * tint.green, shown.blue * tint.blue, shown.alpha)
}

fn map_to_screen(x: f32, z: f32) -> Vec2 {
	Vec2::new(x * TILE_SCALE, z * TILE_SCALE)
}

fn screen_to_world_2d(camera_q: &Query<(&Camera, &GlobalTransform)>, screen_pos: Vec2) -> Option<Vec2> {
	let (camera, camera_transform) = camera_q.single().ok()?;
	camera.viewport_to_world_2d(camera_transform, screen_pos).ok()
}

// ---------- Systems: Map Rendering ----------
fn build_tiles_when_needed(
	mut commands: Commands,
	mut ui: ResMut<UiState>,
	engine: Res<GameEngine>,
	existing_layers: Query<Entity, With<TilesLayer>>,
) {
	if !ui.request_rebuild_tiles {
		return;
	}
	for e in &existing_layers {
		commands.entity(e).despawn();
	}
	let map = engine.engine.map();
	let layout = map.layout();
	if map.is_empty() {
		// Cleared map: outline where the next one will go.
		let config = engine.engine.config();
		for pos in config.layout.preview_positions(config.width, config.height) {
			commands.spawn((
				Sprite::from_color(Color::srgba(1.0, 1.0, 1.0, 0.25), Vec2::splat(MARKER_SIZE)),
				Transform::from_translation(map_to_screen(pos.x, pos.z).extend(0.0)),
				PreviewMarker,
				TilesLayer,
			));
		}
	}
	let size = Vec2::new(layout.cell_width, layout.cell_depth) * TILE_SCALE * TILE_FILL;
	for (id, tile) in map.tiles() {
		let p = map_to_screen(tile.position.x, tile.position.z);
		commands.spawn((
			Sprite::from_color(sprite_color(tile), size),
			Transform::from_translation(p.extend(0.0)),
			Visibility::Visible,
			TileSprite { id },
			TilesLayer,
		));
	}
	ui.request_rebuild_tiles = false;
	ui.markers_for = None;
}

fn update_tile_colors(engine: Res<GameEngine>, mut q: Query<(&TileSprite, &mut Sprite)>) {
	let map = engine.engine.map();
	for (tile_sprite, mut sprite) in &mut q {
		if let Some(tile) = map.get(tile_sprite.id) {
			sprite.color = sprite_color(tile);
		}
	}
}

fn update_neighbour_markers(
	mut commands: Commands,
	mut ui: ResMut<UiState>,
	engine: Res<GameEngine>,
	markers: Query<Entity, With<NeighbourMarker>>,
) {
	let wanted = engine.engine.hovered().filter(|_| ui.show_neighbours);
	if wanted == ui.markers_for && !markers.is_empty() == wanted.is_some() {
		return;
	}
	for e in &markers {
		commands.entity(e).despawn();
	}
	if let Some(id) = wanted {
		for pos in engine.engine.map().neighbour_positions(id) {
			let p = map_to_screen(pos.x, pos.z);
			commands.spawn((
				Sprite::from_color(Color::srgb(1.0, 1.0, 0.2), Vec2::splat(MARKER_SIZE)),
				Transform::from_translation(p.extend(5.0)),
				NeighbourMarker,
			));
		}
	}
	ui.markers_for = wanted;
}

// ---------- Systems: Input ----------
fn handle_keyboard(keys: Res<ButtonInput<KeyCode>>, mut eng: ResMut<GameEngine>, mut ui: ResMut<UiState>) {
	if keys.any_just_pressed([KeyCode::Space, KeyCode::Enter]) {
		regenerate(&mut eng, &mut ui);
	}
	if keys.any_just_pressed([KeyCode::Backspace, KeyCode::Delete]) {
		eng.engine.clear();
		ui.request_rebuild_tiles = true;
	}
}

fn handle_pointer(
	windows: Query<&Window, With<PrimaryWindow>>,
	q_cam: Query<(&Camera, &GlobalTransform)>,
	mouse_buttons: Res<ButtonInput<MouseButton>>,
	mut eng: ResMut<GameEngine>,
	ui: Res<UiState>,
) {
	let window = if let Ok(w) = windows.single() { w } else { return };
	let hovered = if ui.pointer_over_ui {
		None
	} else {
		window
			.cursor_position()
			.and_then(|cursor| screen_to_world_2d(&q_cam, cursor))
			.and_then(|p| eng.engine.map().tile_at_world(p.x / TILE_SCALE, p.y / TILE_SCALE))
	};
	if hovered != eng.engine.hovered() {
		eng.engine.hover(hovered);
	}

	if mouse_buttons.just_pressed(MouseButton::Left) {
		eng.engine.primary_action();
	}
	if mouse_buttons.just_pressed(MouseButton::Right) {
		eng.engine.secondary_action();
	}
}

// ---------- Systems: Engine ----------
fn tick_engine(time: Res<Time>, mut eng: ResMut<GameEngine>, mut ui: ResMut<UiState>) {
	let report = eng.engine.tick(time.delta_secs());
	if report.regenerated {
		ui.status = Some("No path; generated a new map".to_string());
		ui.request_rebuild_tiles = true;
	}
}

fn regenerate(eng: &mut GameEngine, ui: &mut UiState) {
	match eng.engine.regenerate() {
		Ok(()) => ui.status = None,
		Err(e) => {
			error!("Regenerate failed: {e}");
			ui.status = Some(e.to_string());
		}
	}
	ui.request_rebuild_tiles = true;
}

// ---------- Systems: UI ----------
fn draw_ui(mut egui_ctx: EguiContexts, time: Res<Time>, mut ui: ResMut<UiState>, mut eng: ResMut<GameEngine>) {
	if let Ok(ctx) = egui_ctx.ctx_mut() {
		ui.info.update(time.delta_secs(), &eng.engine);

		egui::SidePanel::right("right_panel")
			.resizable(true)
			.default_width(240.0)
			.show(&*ctx, |ui_right| {
				ui_right.heading("Map");
				ui_right.horizontal(|ui_row| {
					if ui_row.button("Generate").clicked() {
						regenerate(&mut eng, &mut ui);
					}
					if ui_row.button("Clear").clicked() {
						eng.engine.clear();
						ui.request_rebuild_tiles = true;
					}
				});
				ui_right.checkbox(&mut ui.show_neighbours, "Show Neighbours");
				ui_right.separator();

				ui_right.label(ui.info.text());
				ui_right.separator();

				let map = eng.engine.map();
				let blocks = [
					("Hover", eng.engine.hovered()),
					("Origin", eng.engine.origin()),
					("Goal", eng.engine.goal()),
				];
				for (title, id) in blocks {
					for line in format_tile_info(title, id.and_then(|id| map.get(id))) {
						ui_right.label(line);
					}
				}
				ui_right.separator();
				let path = match eng.engine.path_status() {
					PathStatus::NotCalculated => "Path: -".to_string(),
					PathStatus::Unreachable => "Path: unreachable".to_string(),
					PathStatus::Solved { length } if eng.engine.reveal().is_revealing() => {
						format!("Path: {length} tiles ({} left to show)", eng.engine.reveal().pending_len())
					}
					PathStatus::Solved { length } => format!("Path: {length} tiles"),
				};
				ui_right.label(path);
				if let Some(ref msg) = ui.status {
					ui_right.colored_label(egui::Color32::YELLOW, msg);
				}
			});

		ui.pointer_over_ui = ctx.is_pointer_over_area();
	}
}
