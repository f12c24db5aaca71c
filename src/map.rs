use crate::decode::decode_layer_data;
use crate::document::{Encoding, Layer, Tileset, TilesetRef, TmxMap};
use crate::error::MapError;
use crate::loader::tmx_loader::{parse_tmx, parse_tsx};
use crate::source::{DirSource, MapSource};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Flattened map handed to a renderer: one gid array per layer plus tileset references.
///
/// `tile_width` comes from the map's `tilewidth` attribute and `tile_height`
/// from `tileheight`. Loaders that swapped the two produce different values
/// for non-square tiles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    /// Tile width in pixels
    pub tile_width: u32,
    /// Tile height in pixels
    pub tile_height: u32,
    /// Map width in tiles
    pub map_width: u32,
    /// Map height in tiles
    pub map_height: u32,
    /// Row-major gids, one entry per layer in document order
    pub layers: Vec<Vec<u32>>,
    /// Tileset references in document order
    pub tilesets: Vec<TilesetRef>,
}

impl Map {
    /// Loads `path` relative to the current directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        Self::load_from(&DirSource::new("."), path)
    }

    /// Reads, parses and transforms the map at `path` within `source`.
    pub fn load_from(source: &impl MapSource, path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let bytes = read(source, path)?;
        let tmx = parse_tmx(&bytes)?;
        log::debug!("loaded {} ({} layer(s))", path.display(), tmx.layers.len());
        Self::from_tmx(tmx)
    }

    /// Decodes every layer in document order. The first failing layer aborts the transform.
    pub fn from_tmx(tmx: TmxMap) -> Result<Self, MapError> {
        if tmx.infinite {
            return Err(MapError::InfiniteMap);
        }

        let layers = tmx
            .layers
            .iter()
            .map(decode_layer)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            tile_width: tmx.tile_width,
            tile_height: tmx.tile_height,
            map_width: tmx.width,
            map_height: tmx.height,
            layers,
            tilesets: tmx.tilesets,
        })
    }
}

fn decode_layer(layer: &Layer) -> Result<Vec<u32>, MapError> {
    let data = &layer.data;
    let ids = match data.encoding {
        Encoding::Xml => data.tiles.clone(),
        encoding => decode_layer_data(encoding, data.compression, &data.raw).map_err(|source| {
            MapError::Layer {
                layer: layer.name.clone(),
                source,
            }
        })?,
    };

    let expected = u64::from(layer.width) * u64::from(layer.height);
    if ids.len() as u64 != expected {
        log::warn!(
            "layer '{}' has {} tile(s), expected {}x{}",
            layer.name,
            ids.len(),
            layer.width,
            layer.height
        );
    }
    log::trace!("decoded layer '{}' ({} tiles)", layer.name, ids.len());
    Ok(ids)
}

/// Loads and parses an external tileset at `path` within `source`.
pub fn load_tileset_from(source: &impl MapSource, path: impl AsRef<Path>) -> Result<Tileset, MapError> {
    let bytes = read(source, path.as_ref())?;
    parse_tsx(&bytes)
}

impl TilesetRef {
    /// Path of the referenced TSX, resolved against the directory of `map_path`.
    pub fn resolve(&self, map_path: impl AsRef<Path>) -> PathBuf {
        map_path
            .as_ref()
            .parent()
            .map(|d| d.join(&self.source))
            .unwrap_or_else(|| PathBuf::from(&self.source))
    }
}

fn read(source: &impl MapSource, path: &Path) -> Result<Vec<u8>, MapError> {
    source.read(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })
}
