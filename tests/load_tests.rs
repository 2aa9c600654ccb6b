// tests/load_tests.rs

mod common;

use std::fs;
use std::path::Path;

use common::{assets_dir, FakeTextures};
use tiled_batch::{
    Map, MapError, ObjectShape, RenderConfig, Result, Texture, TextureProvider,
};

#[test]
fn example_assets_load() {
    let mut textures = FakeTextures::new(128, 32);
    let map = Map::load(assets_dir().join("simple_map.tmj"), &mut textures)
        .expect("example assets should load");

    assert_eq!((map.width(), map.height()), (4, 4));
    assert_eq!(map.tile_size(), (32, 32));
    let names: Vec<&str> = map.layers().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["bg", "main", "object"]);
    assert_eq!(textures.requests, vec![assets_dir().join("tiles.png")]);
}

#[test]
fn object_layer_is_exposed_as_data() {
    let map = Map::load(assets_dir().join("simple_map.tmj"), &mut FakeTextures::new(128, 32)).unwrap();

    assert_eq!(map.object_layers().len(), 1);
    let door = map
        .objects()
        .find(|o| o.name == "out_1")
        .expect("door object");
    assert_eq!(door.class_name, "door");
    assert_eq!((door.x, door.y, door.width, door.height), (-2.0, 61.0, 11.0, 53.0));
    assert_eq!(door.shape, ObjectShape::Rectangle);
    assert_eq!(door.properties.get_string("map"), Some("stomach_14"));
    assert_eq!(door.properties.get_string("to"), Some("in_1"));
}

#[test]
fn tileset_animation_is_parsed_but_static() {
    let map = Map::load(assets_dir().join("simple_map.tmj"), &mut FakeTextures::new(128, 32)).unwrap();
    let ts = &map.tilesets()[0];
    assert!(ts.is_external());
    assert_eq!(ts.name, "tiles");

    let frames = ts.animation(3);
    assert_eq!(frames.len(), 2);
    assert_eq!((frames[0].tile_id, frames[0].duration_ms), (3, 300));
    assert_eq!(frames[1].tile_id, 2);

    // gid 4 is the animated tile; it still resolves to its own static cell.
    let cell = map.tile_cell(4).unwrap();
    assert_eq!((cell.col, cell.row), (3, 0));
}

#[test]
fn unsupported_format() {
    let err = Map::load("foo.tmx", &mut FakeTextures::new(32, 32))
        .err()
        .expect("tmx is not supported");
    assert!(matches!(err, MapError::InvalidMap(msg) if msg.contains("foo.tmx")));
}

#[test]
fn missing_map_file_is_io_error() {
    let err = Map::load("does/not/exist.json", &mut FakeTextures::new(32, 32))
        .err()
        .expect("missing file");
    assert!(matches!(err, MapError::Io { .. }));
    assert!(err.is_resource_error());
}

#[test]
fn layer_size_mismatch_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{
          "width": 2, "height": 2, "tilewidth": 8, "tileheight": 8,
          "layers": [{ "type": "tilelayer", "name": "oops", "width": 2, "height": 2, "data": [0, 0, 0] }]
        }"#,
    )
    .unwrap();

    let err = Map::load(&path, &mut FakeTextures::new(8, 8)).err().unwrap();
    assert!(matches!(err, MapError::InvalidLayerSize { layer, .. } if layer == "oops"));
}

#[test]
fn load_ignores_extra_fields() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("extra.json");
    fs::write(
        &path,
        r#"{
          "width": 1, "height": 1, "tilewidth": 8, "tileheight": 8,
          "dummyField": "ignored",
          "layers": [{ "name": "L", "data": [0], "width": 1, "height": 1, "opacity": 0.5, "properties": [] }]
        }"#,
    )
    .unwrap();

    let map = Map::load(&path, &mut FakeTextures::new(8, 8)).expect("should ignore unknown fields");
    assert_eq!(map.layers()[0].name, "L");
    assert_eq!(map.layers()[0].opacity, 0.5);
    assert!(map.layers()[0].is_tile_layer());
}

#[test]
fn overflowing_tileset_range_fails_the_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("overflow.json");
    fs::write(
        &path,
        r#"{
          "width": 1, "height": 1, "tilewidth": 32, "tileheight": 32,
          "layers": [{ "type": "tilelayer", "name": "L", "width": 1, "height": 1, "data": [0] }],
          "tilesets": [{
            "firstgid": 4294967295, "name": "edge", "image": "tiles.png",
            "imagewidth": 64, "imageheight": 32, "tilewidth": 32, "tileheight": 32,
            "tilecount": 2, "columns": 2
          }]
        }"#,
    )
    .unwrap();

    let mut textures = FakeTextures::new(64, 32);
    let err = Map::load(&path, &mut textures).err().expect("range past u32 must fail");
    assert!(err.is_parse_error());
    assert!(textures.requests.is_empty(), "no texture is loaded for a rejected map");
}

struct FailingTextures;

impl TextureProvider for FailingTextures {
    fn get_texture(&mut self, path: &Path) -> Result<Texture> {
        Err(MapError::Resource {
            path: path.to_path_buf(),
            reason: "decoder refused".into(),
        })
    }
}

#[test]
fn texture_failure_aborts_construction() {
    let err = Map::load(assets_dir().join("simple_map.tmj"), &mut FailingTextures)
        .err()
        .expect("texture failure must fail the load");
    assert!(matches!(err, MapError::Resource { .. }));
}

#[test]
fn asset_root_from_config() {
    let maps = tempfile::tempdir().expect("tempdir");
    let path = maps.path().join("level.json");
    fs::write(
        &path,
        r#"{
          "width": 1, "height": 1, "tilewidth": 32, "tileheight": 32,
          "layers": [{ "type": "tilelayer", "name": "L", "width": 1, "height": 1, "data": [1] }],
          "tilesets": [{ "firstgid": 1, "source": "tiles.tsj" }]
        }"#,
    )
    .unwrap();

    let config = RenderConfig {
        asset_root: Some(assets_dir()),
        ..RenderConfig::default()
    };
    let mut textures = FakeTextures::new(128, 32);
    let map = Map::load_with_config(&path, &mut textures, &config).expect("load via asset root");
    assert_eq!(map.tilesets()[0].image, assets_dir().join("tiles.png"));
}
