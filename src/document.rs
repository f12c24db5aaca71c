//! Typed mirror of the TMX / TSX markup.
//!
//! Values here are a mostly 1:1 mapping of the Tiled schema and are produced by
//! [`crate::parse_tmx`] and [`crate::parse_tsx`]. Nothing is interpreted beyond
//! attribute typing; [`crate::Map`] is the simplified view built from a [`TmxMap`].

/// Root of a TMX document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TmxMap {
    /// `version` attribute
    pub version: String,
    /// Editor version that saved the map
    pub tiled_version: String,
    /// `orthogonal`, `isometric`, ...
    pub orientation: String,
    /// `right-down`, ...
    pub render_order: String,
    /// Width in tiles
    pub width: u32,
    /// Height in tiles
    pub height: u32,
    /// Tile width in pixels
    pub tile_width: u32,
    /// Tile height in pixels
    pub tile_height: u32,
    /// Chunked map
    pub infinite: bool,
    /// Tile layers in document order
    pub layers: Vec<Layer>,
    /// Tileset references in document order
    pub tilesets: Vec<TilesetRef>,
    /// Object layers in document order
    pub object_groups: Vec<ObjectGroup>,
}

/// A `<layer>` element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layer {
    /// Unique layer id
    pub id: u32,
    /// Layer name
    pub name: String,
    /// Width in tiles
    pub width: u32,
    /// Height in tiles
    pub height: u32,
    /// The `<data>` payload
    pub data: Data,
}

/// Text scheme of a layer payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Comma separated decimal ids
    Csv,
    /// Base64 of packed little-endian `u32`s, optionally compressed
    Base64,
    /// No `encoding` attribute: one `<tile gid=".."/>` child per cell
    #[default]
    Xml,
}

impl Encoding {
    /// Maps the `encoding` attribute; an absent attribute is the empty string.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "csv" => Some(Encoding::Csv),
            "base64" => Some(Encoding::Base64),
            "" => Some(Encoding::Xml),
            _ => None,
        }
    }
}

/// Stream compression applied before base64.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Compression {
    /// Plain base64
    #[default]
    None,
    /// zlib stream
    Zlib,
    /// gzip stream
    Gzip,
}

impl Compression {
    /// Maps the `compression` attribute; `zstd` and anything else is rejected.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "" => Some(Compression::None),
            "zlib" => Some(Compression::Zlib),
            "gzip" => Some(Compression::Gzip),
            _ => None,
        }
    }
}

/// Contents of a layer's `<data>` element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Data {
    /// Payload text scheme
    pub encoding: Encoding,
    /// Always `None` unless `encoding` is base64
    pub compression: Compression,
    /// Inner text, untrimmed
    pub raw: Vec<u8>,
    /// Gids of `<tile>` children, only populated for [`Encoding::Xml`]
    pub tiles: Vec<u32>,
}

/// A `<tileset>` element inside a map. Only the reference is kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TilesetRef {
    /// First global tile id covered by the tileset
    pub first_gid: u32,
    /// Path of the external TSX document, relative to the map
    pub source: String,
}

/// An `<objectgroup>` layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectGroup {
    /// Unique layer id
    pub id: u32,
    /// Group name
    pub name: String,
    /// Objects in document order
    pub objects: Vec<Object>,
}

/// An `<object>`. Shapes and templates are not read.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Object {
    /// Unique object id
    pub id: u32,
    /// Object name
    pub name: String,
    /// `type` or `class` attribute
    pub kind: String,
    /// X position in pixels
    pub x: f64,
    /// Y position in pixels
    pub y: f64,
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
    /// Custom properties
    pub properties: Properties,
}

/// Custom properties, kept as raw strings in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Properties(pub Vec<Property>);

impl Properties {
    /// First property called `name`.
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.0.iter().find(|p| p.name == name)
    }

    /// Properties in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.0.iter()
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no properties.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single `<property>`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Property {
    /// Property name
    pub name: String,
    /// `type` attribute, empty for strings
    pub kind: String,
    /// `value` attribute
    pub value: String,
    /// Inner text, used by multi-line string properties
    pub text: String,
}

/// Root of a TSX document, or the body of an embedded `<tileset>`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tileset {
    /// `version` attribute
    pub version: String,
    /// Tileset name
    pub name: String,
    /// Tile width in pixels
    pub tile_width: u32,
    /// Tile height in pixels
    pub tile_height: u32,
    /// Number of tiles
    pub tile_count: u32,
    /// Tiles per image row
    pub columns: u32,
    /// Atlas image, if any
    pub image: Option<Image>,
    /// Per-tile metadata
    pub tiles: Vec<Tile>,
}

/// A tileset `<image>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    /// Embedded image format
    pub format: String,
    /// Image path relative to the tileset
    pub source: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Per-tile metadata inside a tileset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tile {
    /// Local tile id
    pub id: u32,
    /// `type` or `class` attribute
    pub kind: String,
    /// Custom properties
    pub properties: Properties,
    /// Collision shapes
    pub object_groups: Vec<ObjectGroup>,
}
