//! Tiled JSON (`.json`/`.tmj` maps, `.json`/`.tsj` tilesets) → [`MapDocument`].

use std::path::{Path, PathBuf};

use macroquad::prelude::*;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::document::MapDocument;
use crate::error::{MapError, Result};
use crate::gid::GID_MASK;
use crate::layer::{Layer, LayerKind, ObjectShape, TiledObject};
use crate::loader::paths::{parent_dir, resolve_asset_path};
use crate::properties::{Properties, PropertyValue};
use crate::tileset::{AnimationFrame, TileMetadata, Tileset};

#[derive(Deserialize)]
struct JsonLayer {
    #[serde(default)]
    data: Vec<u32>,
    #[serde(default)]
    width: usize,
    #[serde(default)]
    height: usize,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default = "one")]
    opacity: f32,
    #[serde(default)]
    offsetx: f32,
    #[serde(default)]
    offsety: f32,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: Option<String>, // "tilelayer" expected here
    #[serde(default)]
    properties: Vec<JsonProperty>,
    #[serde(default)]
    objects: Vec<JsonObject>,
}

fn default_true() -> bool {
    true
}
fn one() -> f32 {
    1.0
}
fn orthogonal() -> String {
    "orthogonal".to_owned()
}
fn right_down() -> String {
    "right-down".to_owned()
}

#[derive(Deserialize)]
struct JsonMap {
    width: u32,
    height: u32,
    tilewidth: u32,
    tileheight: u32,
    #[serde(default = "orthogonal")]
    orientation: String,
    #[serde(default = "right_down")]
    renderorder: String,
    #[serde(default)]
    infinite: bool,
    layers: Vec<JsonLayer>,
    #[serde(default)]
    tilesets: Vec<JsonTilesetRef>,
    #[serde(default)]
    properties: Vec<JsonProperty>,
}

/// A map's tileset entry: either `source` or the inline definition.
#[derive(Deserialize)]
struct JsonTilesetRef {
    firstgid: u32,
    #[serde(default)]
    source: Option<String>,
    #[serde(flatten)]
    inline: JsonTileset,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct JsonTileset {
    name: String,
    image: Option<String>,
    imagewidth: u32,
    imageheight: u32,
    tilewidth: Option<u32>,
    tileheight: Option<u32>,
    tilecount: Option<u32>,
    columns: Option<u32>,
    spacing: u32,
    margin: u32,
    properties: Vec<JsonProperty>,
    tiles: Vec<JsonTile>,
}

#[derive(Deserialize)]
struct JsonProperty {
    name: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    value: JsonValue,
}

#[derive(Deserialize)]
struct JsonObject {
    #[serde(default)]
    id: u32,
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    class: String,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default)]
    rotation: f32,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    point: bool,
    #[serde(default)]
    ellipse: bool,
    #[serde(default)]
    polygon: Vec<JsonObjectPoint>,
    #[serde(default)]
    polyline: Vec<JsonObjectPoint>,
    #[serde(default)]
    gid: Option<u32>,
    #[serde(default)]
    properties: Vec<JsonProperty>,
}

#[derive(Deserialize)]
struct JsonObjectPoint {
    x: f32,
    y: f32,
}

#[derive(Deserialize)]
struct JsonTile {
    id: u32,
    #[serde(default)]
    properties: Vec<JsonProperty>,
    #[serde(default)]
    animation: Vec<JsonFrame>,
}

#[derive(Deserialize)]
struct JsonFrame {
    tileid: u32,
    duration: u32,
}

fn json_property(prop: JsonProperty) -> Result<Option<(String, PropertyValue)>> {
    let JsonProperty { name, kind, value } = prop;

    let parsed = match kind.as_deref() {
        Some("bool") => value.as_bool().map(PropertyValue::Bool),
        Some("int") | Some("object") => value.as_i64().map(PropertyValue::I64),
        Some("float") => value.as_f64().map(|n| PropertyValue::F32(n as f32)),
        Some("string") | Some("file") | Some("color") | Some("class") => {
            value.as_str().map(|s| PropertyValue::String(s.to_owned()))
        }
        Some(other) => {
            return Err(MapError::UnsupportedPropertyType {
                name,
                kind: other.to_owned(),
            });
        }
        None => {
            if let Some(v) = value.as_bool() {
                Some(PropertyValue::Bool(v))
            } else if let Some(v) = value.as_i64() {
                Some(PropertyValue::I64(v))
            } else if let Some(v) = value.as_f64() {
                Some(PropertyValue::F32(v as f32))
            } else {
                value.as_str().map(|s| PropertyValue::String(s.to_owned()))
            }
        }
    };

    Ok(parsed.map(|value| (name, value)))
}

fn properties_from_json(props: Vec<JsonProperty>) -> Result<Properties> {
    let mut out = Properties::new();
    for p in props {
        if let Some((name, value)) = json_property(p)? {
            out.insert(name, value);
        }
    }
    Ok(out)
}

fn object_from_json(obj: JsonObject) -> Result<TiledObject> {
    let shape = if let Some(gid) = obj.gid {
        ObjectShape::Tile { gid }
    } else if obj.point {
        ObjectShape::Point
    } else if obj.ellipse {
        ObjectShape::Ellipse
    } else if !obj.polygon.is_empty() {
        ObjectShape::Polygon(obj.polygon.into_iter().map(|p| vec2(p.x, p.y)).collect())
    } else if !obj.polyline.is_empty() {
        ObjectShape::Polyline(obj.polyline.into_iter().map(|p| vec2(p.x, p.y)).collect())
    } else {
        ObjectShape::Rectangle
    };

    let class_name = if !obj.class.is_empty() {
        obj.class
    } else {
        obj.kind
    };

    Ok(TiledObject {
        id: obj.id,
        name: obj.name,
        class_name,
        x: obj.x,
        y: obj.y,
        width: obj.width,
        height: obj.height,
        rotation: obj.rotation,
        visible: obj.visible,
        shape,
        properties: properties_from_json(obj.properties)?,
    })
}

fn required(value: Option<u32>, tileset: &str, field: &str) -> Result<u32> {
    value.ok_or_else(|| MapError::InvalidMap(format!("tileset '{tileset}' is missing '{field}'")))
}

fn tileset_from_json(
    ts: JsonTileset,
    first_gid: u32,
    source: Option<PathBuf>,
    image_base: &Path,
) -> Result<Tileset> {
    let name = ts.name;
    let Some(image) = ts.image else {
        return Err(MapError::InvalidMap(format!(
            "tileset '{name}' has no atlas image; image collection tilesets are not supported"
        )));
    };
    let tile_w = required(ts.tilewidth, &name, "tilewidth")?;
    let tile_h = required(ts.tileheight, &name, "tileheight")?;
    let tilecount = required(ts.tilecount, &name, "tilecount")?;
    let columns = required(ts.columns, &name, "columns")?;
    if tile_w == 0 || tile_h == 0 || columns == 0 {
        return Err(MapError::InvalidMap(format!(
            "tileset '{name}' needs non-zero tile size and columns"
        )));
    }

    let tiles = ts
        .tiles
        .into_iter()
        .map(|tile| -> Result<TileMetadata> {
            Ok(TileMetadata {
                id: tile.id,
                properties: properties_from_json(tile.properties)?,
                animation: tile
                    .animation
                    .into_iter()
                    .map(|f| AnimationFrame {
                        tile_id: f.tileid,
                        duration_ms: f.duration,
                    })
                    .collect(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Tileset {
        first_gid,
        source,
        image: resolve_asset_path(image_base, &image),
        image_w: ts.imagewidth,
        image_h: ts.imageheight,
        tile_w,
        tile_h,
        tilecount,
        columns,
        spacing: ts.spacing,
        margin: ts.margin,
        properties: properties_from_json(ts.properties)?,
        tiles,
        name,
    })
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn has_extension(path: &str, allowed: &[&str]) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| allowed.contains(&e))
}

fn load_tileset_ref(ts: JsonTilesetRef, base_dir: &Path) -> Result<Tileset> {
    let Some(source) = ts.source else {
        return tileset_from_json(ts.inline, ts.firstgid, None, base_dir);
    };

    if !has_extension(&source, &["json", "tsj"]) {
        return Err(MapError::InvalidMap(format!(
            "External tileset must be JSON: {source}"
        )));
    }
    let ts_path = resolve_asset_path(base_dir, &source);
    let ext_txt = read_text(&ts_path)?;
    let ext: JsonTileset = serde_json::from_str(&ext_txt).map_err(|source| MapError::Json {
        path: ts_path.clone(),
        source,
    })?;
    // The atlas path inside an external tileset is relative to that tileset.
    let image_base = parent_dir(&ts_path);
    tileset_from_json(ext, ts.firstgid, Some(ts_path), &image_base)
}

fn layer_from_json(l: JsonLayer, infinite: bool) -> Result<Layer> {
    let layer_name = l.name.clone();
    let kind = match l.kind.as_deref().unwrap_or("tilelayer") {
        "tilelayer" if infinite && l.data.is_empty() => {
            tracing::warn!(layer = %layer_name, "chunked tile layers of infinite maps are not drawn");
            LayerKind::Unsupported
        }
        "tilelayer" => LayerKind::Tiles {
            width: l.width,
            height: l.height,
            data: l.data,
        },
        "objectgroup" => LayerKind::Objects {
            objects: l
                .objects
                .into_iter()
                .map(object_from_json)
                .collect::<Result<Vec<_>>>()?,
        },
        other => {
            tracing::warn!(layer = %layer_name, kind = other, "skipping unsupported layer type");
            LayerKind::Unsupported
        }
    };

    Ok(Layer {
        name: l.name,
        visible: l.visible,
        opacity: l.opacity,
        offset: vec2(l.offsetx, l.offsety),
        properties: properties_from_json(l.properties)?,
        kind,
    })
}

/// Decodes map JSON. `origin` names the source in errors; relative tileset
/// and image paths resolve against `base_dir`.
pub fn decode_map_str(json: &str, origin: &Path, base_dir: &Path) -> Result<MapDocument> {
    let j: JsonMap = serde_json::from_str(json).map_err(|source| MapError::Json {
        path: origin.to_path_buf(),
        source,
    })?;

    let tilesets = j
        .tilesets
        .into_iter()
        .map(|ts| load_tileset_ref(ts, base_dir))
        .collect::<Result<Vec<_>>>()?;

    let layers = j
        .layers
        .into_iter()
        .map(|l| layer_from_json(l, j.infinite))
        .collect::<Result<Vec<_>>>()?;

    let mut doc = MapDocument {
        width: j.width,
        height: j.height,
        tile_w: j.tilewidth,
        tile_h: j.tileheight,
        orientation: j.orientation.parse()?,
        render_order: j.renderorder.parse()?,
        infinite: j.infinite,
        properties: properties_from_json(j.properties)?,
        layers,
        tilesets,
    };
    doc.validate()?;

    let max_gid = doc.max_gid();
    for layer in &doc.layers {
        for obj in layer.objects() {
            if let ObjectShape::Tile { gid } = obj.shape {
                let gid = gid & GID_MASK;
                if gid == 0 || gid > max_gid {
                    return Err(MapError::InvalidTileGid {
                        layer: layer.name.clone(),
                        gid,
                        max_gid,
                    });
                }
            }
        }
    }
    Ok(doc)
}

/// Reads and decodes a map file, returning it with the directory its
/// relative paths were resolved against (`asset_root` when given).
pub fn decode_map_file(path: &Path, asset_root: Option<&Path>) -> Result<(MapDocument, PathBuf)> {
    let shown = path.display().to_string();
    if !has_extension(&shown, &["json", "tmj"]) {
        return Err(MapError::InvalidMap(format!(
            "Map file must be a JSON file: {shown}"
        )));
    }

    let txt = read_text(path)?;
    let base_dir = match asset_root {
        Some(root) => root.to_path_buf(),
        None => parent_dir(path),
    };
    let doc = decode_map_str(&txt, path, &base_dir)?;
    Ok((doc, base_dir))
}
