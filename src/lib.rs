#![warn(missing_docs)]

//! Minimal Tiled TMX loader: flattens a map into per-layer tile id arrays.

mod decode;
mod document;
mod error;
mod loader {
    pub mod tmx_loader;
}
mod map;
mod source;

pub use decode::{decode_layer_data, unpack_le_u32};
pub use document::{
    Compression, Data, Encoding, Image, Layer, Object, ObjectGroup, Properties, Property, Tile,
    Tileset, TilesetRef, TmxMap,
};
pub use error::{DecodeError, MapError};
pub use loader::tmx_loader::{parse_tmx, parse_tsx};
pub use map::{load_tileset_from, Map};
pub use source::{DirSource, MapSource, MemorySource};
