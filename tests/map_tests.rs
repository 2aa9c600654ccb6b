// tests/map_tests.rs

mod common;

use std::fs;
use std::path::Path;

use common::{assets_dir, FakeTextures, RecordingBackend};
use tiled_batch::{
    FlipMode, IntRect, Map, MapError, RenderConfig, SpriteBatch, FLIP_D, FLIP_H, FLIP_V,
};

fn simple_map() -> Map {
    let mut textures = FakeTextures::new(128, 32);
    Map::load(assets_dir().join("simple_map.tmj"), &mut textures).expect("simple map should load")
}

fn draw_layer(map: &Map, name: &str) -> SpriteBatch<RecordingBackend> {
    let mut batch = SpriteBatch::new(RecordingBackend::default());
    batch.begin().unwrap();
    map.draw_layer(map.layer(name).expect("layer"), &mut batch)
        .unwrap();
    batch.end().unwrap();
    batch
}

/// Writes a 4-column, 32px tileset and a map whose single layer holds `data`.
fn write_map(dir: &Path, width: usize, data: &[u32], extra: &str) -> std::path::PathBuf {
    let height = data.len() / width;
    let data = data
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let map = format!(
        r#"{{
          "width": {width}, "height": {height}, "tilewidth": 32, "tileheight": 32,
          {extra}
          "layers": [{{"type":"tilelayer","name":"main","width":{width},"height":{height},"data":[{data}]}}],
          "tilesets": [{{
            "firstgid": 1, "name": "tiles", "image": "tiles.png",
            "imagewidth": 128, "imageheight": 32, "tilewidth": 32, "tileheight": 32,
            "tilecount": 4, "columns": 4
          }}]
        }}"#
    );
    let path = dir.join("map.json");
    fs::write(&path, map).expect("failed to write map");
    path
}

#[test]
fn cell_resolves_to_expected_tile_and_position() {
    let map = simple_map();
    let main = map.layer("main").unwrap();
    let gid = main.tile_at(1, 1).unwrap();
    assert_eq!(gid.clean(), 3);

    let cell = map.tile_cell(gid.raw()).unwrap();
    assert_eq!(cell.local_id, 2);
    assert_eq!((cell.col, cell.row), (2, 0));

    let batch = draw_layer(&map, "main");
    let cmds = &batch.backend().commands;
    assert_eq!(cmds.len(), 16);
    // Row-major: cell (1, 1) is the sixth command.
    assert_eq!(cmds[5].dest, IntRect::new(32, 32, 32, 32));
    assert_eq!(cmds[5].source, Some(IntRect::new(64, 0, 32, 32)));
}

#[test]
fn single_atlas_layer_is_one_flush() {
    let map = simple_map();
    let batch = draw_layer(&map, "main");
    assert_eq!(batch.stats().flushes, 1);
    assert_eq!(batch.stats().commands, 16);
}

#[test]
fn empty_cells_never_draw() {
    let map = simple_map();
    let batch = draw_layer(&map, "bg");
    // bg has four gid=4 cells and twelve empty ones.
    assert_eq!(batch.backend().commands.len(), 4);
    assert!(batch
        .backend()
        .commands
        .iter()
        .all(|c| c.source == Some(IntRect::new(96, 0, 32, 32))));
}

#[test]
fn full_draw_walks_layers_in_order_and_skips_objects() {
    let map = simple_map();
    let mut batch = SpriteBatch::new(RecordingBackend::default());
    batch.begin().unwrap();
    map.draw(&mut batch).unwrap();
    batch.end().unwrap();

    let cmds = &batch.backend().commands;
    assert_eq!(cmds.len(), 4 + 16);
    // bg first, then main painted over it.
    assert_eq!(cmds[0].dest, IntRect::new(32, 32, 32, 32));
    assert_eq!(cmds[4].dest, IntRect::new(0, 0, 32, 32));
}

#[test]
fn origin_shifts_world_positions() {
    let mut map = simple_map();
    map.set_origin(macroquad::prelude::vec2(100.0, 50.0));
    let batch = draw_layer(&map, "main");
    assert_eq!(batch.backend().commands[0].dest, IntRect::new(100, 50, 32, 32));
}

#[test]
fn render_order_controls_cell_sequence() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_map(dir.path(), 2, &[1, 2, 3, 4], r#""renderorder": "left-up","#);
    let map = Map::load(&path, &mut FakeTextures::new(128, 32)).unwrap();

    let batch = draw_layer(&map, "main");
    let xs: Vec<(i32, i32)> = batch
        .backend()
        .commands
        .iter()
        .map(|c| (c.dest.x, c.dest.y))
        .collect();
    assert_eq!(xs, vec![(32, 32), (0, 32), (32, 0), (0, 0)]);
}

#[test]
fn flip_flags_reach_the_backend() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data = [1 | FLIP_H, 1 | FLIP_V, 1 | FLIP_D | FLIP_H, 1];
    let path = write_map(dir.path(), 4, &data, "");
    let map = Map::load(&path, &mut FakeTextures::new(128, 32)).unwrap();

    let batch = draw_layer(&map, "main");
    let got: Vec<(FlipMode, f64)> = batch
        .backend()
        .commands
        .iter()
        .map(|c| (c.flip, c.angle))
        .collect();
    assert_eq!(
        got,
        vec![
            (FlipMode::Horizontal, 0.0),
            (FlipMode::Vertical, 0.0),
            (FlipMode::None, 90.0),
            (FlipMode::None, 0.0),
        ]
    );
    assert!(batch
        .backend()
        .commands
        .iter()
        .all(|c| c.source == Some(IntRect::new(0, 0, 32, 32))));
}

#[test]
fn visible_rect_culls_far_cells() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data = vec![1u32; 20 * 20];
    let path = write_map(dir.path(), 20, &data, "");
    let map = Map::load(&path, &mut FakeTextures::new(128, 32)).unwrap();

    let mut batch = SpriteBatch::new(RecordingBackend::default());
    batch.begin().unwrap();
    map.draw_visible_rect(
        &mut batch,
        macroquad::prelude::vec2(0.0, 0.0),
        macroquad::prelude::vec2(63.0, 63.0),
    )
    .unwrap();
    batch.end().unwrap();

    // 2x2 visible cells plus one cell of padding on the far sides.
    assert_eq!(batch.backend().commands.len(), 9);
}

#[test]
fn atlas_size_mismatch_fails_the_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_map(dir.path(), 1, &[1], "");
    // Declared 128x32, actual texture holds only three columns.
    let err = Map::load(&path, &mut FakeTextures::new(96, 32))
        .err()
        .expect("mismatch should fail");
    assert!(matches!(err, MapError::TilesetMismatch { .. }));
}

#[test]
fn non_orthogonal_maps_draw_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_map(dir.path(), 2, &[1, 1, 1, 1], r#""orientation": "isometric","#);
    let map = Map::load(&path, &mut FakeTextures::new(128, 32)).unwrap();

    let batch = draw_layer(&map, "main");
    assert!(batch.backend().commands.is_empty());
}

#[test]
fn small_batch_capacity_splits_runs() {
    let map = simple_map();
    let config = RenderConfig {
        batch_capacity: 5,
        ..RenderConfig::default()
    };
    let mut batch = SpriteBatch::from_config(RecordingBackend::default(), &config);
    batch.begin().unwrap();
    map.draw_layer(map.layer("main").unwrap(), &mut batch).unwrap();
    batch.end().unwrap();
    // 16 commands in runs of 5, 5, 5, 1.
    assert_eq!(batch.stats().flushes, 4);
    assert_eq!(batch.backend().commands.len(), 16);
}
