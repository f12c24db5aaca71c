// src/loader/tmx_loader.rs
use crate::document::*;
use crate::error::MapError;
use roxmltree::{Document, Node};
use std::str::FromStr;

/// Parses TMX bytes into the untransformed document model.
pub fn parse_tmx(bytes: &[u8]) -> Result<TmxMap, MapError> {
    let source = std::str::from_utf8(bytes)?;
    let doc = Document::parse(source)?;
    let root = doc.root_element();
    if root.tag_name().name() != "map" {
        return Err(MapError::UnexpectedRoot {
            expected: "map",
            found: root.tag_name().name().to_owned(),
        });
    }
    parse_map_node(root)
}

/// Parses an external tileset (TSX) document.
pub fn parse_tsx(bytes: &[u8]) -> Result<Tileset, MapError> {
    let source = std::str::from_utf8(bytes)?;
    let doc = Document::parse(source)?;
    let root = doc.root_element();
    if root.tag_name().name() != "tileset" {
        return Err(MapError::UnexpectedRoot {
            expected: "tileset",
            found: root.tag_name().name().to_owned(),
        });
    }
    parse_tileset_node(root)
}

fn value<T: FromStr>(
    element: &'static str,
    attribute: &'static str,
    value: &str,
) -> Result<T, MapError> {
    value.trim().parse().map_err(|_| MapError::InvalidAttribute {
        element,
        attribute,
        value: value.to_owned(),
    })
}

fn inner_text(node: Node) -> String {
    node.children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

fn parse_map_node(map_node: Node) -> Result<TmxMap, MapError> {
    let mut map = TmxMap::default();
    for attribute in map_node.attributes() {
        let v = attribute.value();
        match attribute.name() {
            "version" => map.version = v.to_owned(),
            "tiledversion" => map.tiled_version = v.to_owned(),
            "orientation" => map.orientation = v.to_owned(),
            "renderorder" => map.render_order = v.to_owned(),
            "width" => map.width = value("map", "width", v)?,
            "height" => map.height = value("map", "height", v)?,
            "tilewidth" => map.tile_width = value("map", "tilewidth", v)?,
            "tileheight" => map.tile_height = value("map", "tileheight", v)?,
            "infinite" => {
                map.infinite = match v {
                    "0" | "false" => false,
                    "1" | "true" => true,
                    _ => {
                        return Err(MapError::InvalidAttribute {
                            element: "map",
                            attribute: "infinite",
                            value: v.to_owned(),
                        })
                    }
                }
            }
            _ => {}
        }
    }

    for node in map_node.children().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "layer" => map.layers.push(parse_layer_node(node)?),
            "tileset" => map.tilesets.push(parse_tileset_ref(node)?),
            "objectgroup" => map.object_groups.push(parse_object_group(node)?),
            _ => {}
        }
    }

    log::trace!(
        "parsed map {}x{} with {} layer(s), {} tileset(s)",
        map.width,
        map.height,
        map.layers.len(),
        map.tilesets.len()
    );
    Ok(map)
}

fn parse_layer_node(layer_node: Node) -> Result<Layer, MapError> {
    let mut layer = Layer::default();
    for attribute in layer_node.attributes() {
        let v = attribute.value();
        match attribute.name() {
            "id" => layer.id = value("layer", "id", v)?,
            "name" => layer.name = v.to_owned(),
            "width" => layer.width = value("layer", "width", v)?,
            "height" => layer.height = value("layer", "height", v)?,
            _ => {}
        }
    }

    if let Some(data_node) = layer_node
        .children()
        .find(|n| n.has_tag_name("data"))
    {
        layer.data = parse_data_node(data_node, &layer.name)?;
    }
    Ok(layer)
}

// Tags are resolved here so unknown values never reach the payload decoder.
fn parse_data_node(data_node: Node, layer_name: &str) -> Result<Data, MapError> {
    let encoding_tag = data_node.attribute("encoding").unwrap_or("");
    let encoding = Encoding::from_tag(encoding_tag).ok_or_else(|| MapError::UnsupportedEncoding {
        layer: layer_name.to_owned(),
        value: encoding_tag.to_owned(),
    })?;

    // Compression only applies to base64 payloads.
    let compression = if encoding == Encoding::Base64 {
        let compression_tag = data_node.attribute("compression").unwrap_or("");
        Compression::from_tag(compression_tag).ok_or_else(|| MapError::UnsupportedCompression {
            layer: layer_name.to_owned(),
            value: compression_tag.to_owned(),
        })?
    } else {
        Compression::None
    };

    let mut tiles = Vec::new();
    if encoding == Encoding::Xml {
        for tile in data_node.children().filter(|n| n.has_tag_name("tile")) {
            let gid: u32 = match tile.attribute("gid") {
                Some(v) => value("tile", "gid", v)?,
                None => 0,
            };
            tiles.push(gid);
        }
    }

    Ok(Data {
        encoding,
        compression,
        raw: inner_text(data_node).into_bytes(),
        tiles,
    })
}

fn parse_tileset_ref(entry_node: Node) -> Result<TilesetRef, MapError> {
    let first_gid = entry_node
        .attribute("firstgid")
        .ok_or(MapError::MissingAttribute {
            element: "tileset",
            attribute: "firstgid",
        })?;
    Ok(TilesetRef {
        first_gid: value("tileset", "firstgid", first_gid)?,
        source: entry_node.attribute("source").unwrap_or_default().to_owned(),
    })
}

fn parse_object_group(group_node: Node) -> Result<ObjectGroup, MapError> {
    let mut group = ObjectGroup::default();
    for attribute in group_node.attributes() {
        let v = attribute.value();
        match attribute.name() {
            "id" => group.id = value("objectgroup", "id", v)?,
            "name" => group.name = v.to_owned(),
            _ => {}
        }
    }
    for node in group_node.children().filter(|n| n.has_tag_name("object")) {
        group.objects.push(parse_object(node)?);
    }
    Ok(group)
}

fn parse_object(object_node: Node) -> Result<Object, MapError> {
    let mut object = Object::default();
    for attribute in object_node.attributes() {
        let v = attribute.value();
        match attribute.name() {
            "id" => object.id = value("object", "id", v)?,
            "name" => object.name = v.to_owned(),
            "type" | "class" => object.kind = v.to_owned(),
            "x" => object.x = value("object", "x", v)?,
            "y" => object.y = value("object", "y", v)?,
            "width" => object.width = value("object", "width", v)?,
            "height" => object.height = value("object", "height", v)?,
            _ => {}
        }
    }
    object.properties = parse_properties(object_node);
    Ok(object)
}

fn parse_properties(owner: Node) -> Properties {
    let Some(props) = owner.children().find(|n| n.has_tag_name("properties")) else {
        return Properties::default();
    };
    Properties(
        props
            .children()
            .filter(|n| n.has_tag_name("property"))
            .map(|p| Property {
                name: p.attribute("name").unwrap_or_default().to_owned(),
                kind: p.attribute("type").unwrap_or_default().to_owned(),
                value: p.attribute("value").unwrap_or_default().to_owned(),
                text: inner_text(p),
            })
            .collect(),
    )
}

fn parse_tileset_node(tileset_node: Node) -> Result<Tileset, MapError> {
    let mut tileset = Tileset::default();
    for attribute in tileset_node.attributes() {
        let v = attribute.value();
        match attribute.name() {
            "version" => tileset.version = v.to_owned(),
            "name" => tileset.name = v.to_owned(),
            "tilewidth" => tileset.tile_width = value("tileset", "tilewidth", v)?,
            "tileheight" => tileset.tile_height = value("tileset", "tileheight", v)?,
            "tilecount" => tileset.tile_count = value("tileset", "tilecount", v)?,
            "columns" => tileset.columns = value("tileset", "columns", v)?,
            _ => {}
        }
    }

    for child in tileset_node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "image" => tileset.image = Some(parse_image(child)?),
            "tile" => tileset.tiles.push(parse_tile(child)?),
            _ => {}
        }
    }
    Ok(tileset)
}

fn parse_image(image_node: Node) -> Result<Image, MapError> {
    let mut image = Image::default();
    for attribute in image_node.attributes() {
        let v = attribute.value();
        match attribute.name() {
            "format" => image.format = v.to_owned(),
            "source" => image.source = v.to_owned(),
            "width" => image.width = value("image", "width", v)?,
            "height" => image.height = value("image", "height", v)?,
            _ => {}
        }
    }
    Ok(image)
}

fn parse_tile(tile_node: Node) -> Result<Tile, MapError> {
    let mut tile = Tile::default();
    for attribute in tile_node.attributes() {
        let v = attribute.value();
        match attribute.name() {
            "id" => tile.id = value("tile", "id", v)?,
            "type" | "class" => tile.kind = v.to_owned(),
            _ => {}
        }
    }
    tile.properties = parse_properties(tile_node);
    for group in tile_node.children().filter(|n| n.has_tag_name("objectgroup")) {
        tile.object_groups.push(parse_object_group(group)?);
    }
    Ok(tile)
}
