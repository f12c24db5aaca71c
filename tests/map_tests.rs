// tests/map_tests.rs

use base64::Engine;
use flate2::write::ZlibEncoder;
use std::io::Write;
use tmx_loader::{parse_tmx, DecodeError, Map, MapError};

fn zlib_base64(ids: &[u32]) -> String {
    let mut enc = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    for id in ids {
        enc.write_all(&id.to_le_bytes()).unwrap();
    }
    base64::engine::general_purpose::STANDARD.encode(enc.finish().unwrap())
}

fn two_layer_map() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" orientation="orthogonal" width="2" height="2" tilewidth="2" tileheight="2" infinite="0">
 <tileset firstgid="1" source="a.tsx"/>
 <tileset firstgid="1" source="a.tsx"/>
 <layer id="1" name="csv" width="2" height="2">
  <data encoding="csv">
0,1,
2,3
</data>
 </layer>
 <layer id="2" name="packed" width="2" height="2">
  <data encoding="base64" compression="zlib">
   {}
  </data>
 </layer>
</map>
"#,
        zlib_base64(&[0, 1, 2, 3])
    )
}

#[test]
fn csv_and_zlib_layers_decode_to_the_same_ids() {
    let map = Map::from_tmx(parse_tmx(two_layer_map().as_bytes()).unwrap()).unwrap();
    assert_eq!(map.layers, vec![vec![0, 1, 2, 3], vec![0, 1, 2, 3]]);
    assert_eq!(map.map_width, 2);
    assert_eq!(map.map_height, 2);
}

#[test]
fn duplicate_tileset_references_are_kept() {
    let map = Map::from_tmx(parse_tmx(two_layer_map().as_bytes()).unwrap()).unwrap();
    assert_eq!(map.tilesets.len(), 2);
    assert!(map.tilesets.iter().all(|t| t.first_gid == 1 && t.source == "a.tsx"));
}

const NON_SQUARE: &str = r#"
<map width="3" height="1" tilewidth="32" tileheight="16">
 <layer name="L" width="3" height="1"><data encoding="csv">7,8,9</data></layer>
</map>
"#;

#[test]
fn tile_size_is_not_swapped() {
    let map = Map::from_tmx(parse_tmx(NON_SQUARE.as_bytes()).unwrap()).unwrap();
    assert_eq!(map.tile_width, 32);
    assert_eq!(map.tile_height, 16);
    assert_eq!(map.layers[0], vec![7, 8, 9]);
}

const LZMA: &str = r#"
<map width="1" height="1" tilewidth="8" tileheight="8">
 <layer name="future" width="1" height="1">
  <data encoding="base64" compression="lzma">AQAAAA==</data>
 </layer>
</map>
"#;

#[test]
fn error_on_unknown_compression() {
    let err = parse_tmx(LZMA.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        MapError::UnsupportedCompression { ref layer, ref value } if layer == "future" && value == "lzma"
    ));
}

const BAD_CSV: &str = r#"
<map width="3" height="1" tilewidth="8" tileheight="8">
 <layer name="oops" width="3" height="1"><data encoding="csv">1,x,3</data></layer>
</map>
"#;

#[test]
fn error_names_layer_and_token() {
    let err = Map::from_tmx(parse_tmx(BAD_CSV.as_bytes()).unwrap()).unwrap_err();
    assert_eq!(err.to_string(), "layer 'oops': 'x' is not a number");
    assert!(matches!(
        err,
        MapError::Layer { source: DecodeError::MalformedNumber { ref token }, .. } if token == "x"
    ));
}

const BAD_BASE64: &str = r#"
<map width="1" height="1" tilewidth="8" tileheight="8">
 <layer name="b" width="1" height="1"><data encoding="base64">@@@@</data></layer>
</map>
"#;

#[test]
fn error_on_invalid_base64() {
    let err = Map::from_tmx(parse_tmx(BAD_BASE64.as_bytes()).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        MapError::Layer { ref layer, source: DecodeError::Encoding(_) } if layer == "b"
    ));
}

const SHORT_LAYER: &str = r#"
<map width="2" height="2" tilewidth="8" tileheight="8">
 <layer name="short" width="2" height="2"><data encoding="csv">1,2,3</data></layer>
</map>
"#;

#[test]
fn size_mismatch_is_not_an_error() {
    let map = Map::from_tmx(parse_tmx(SHORT_LAYER.as_bytes()).unwrap()).unwrap();
    assert_eq!(map.layers[0], vec![1, 2, 3]);
}

#[test]
fn output_serializes_to_json() {
    let map = Map::from_tmx(parse_tmx(NON_SQUARE.as_bytes()).unwrap()).unwrap();
    let json = serde_json::to_value(&map).unwrap();
    assert_eq!(json["tile_width"], 32);
    assert_eq!(json["layers"][0][2], 9);

    let back: Map = serde_json::from_value(json).unwrap();
    assert_eq!(back, map);
}

const CSV_WITH_COMPRESSION: &str = r#"
<map width="2" height="1" tilewidth="8" tileheight="8">
 <layer name="c" width="2" height="1"><data encoding="csv" compression="zstd">1,2</data></layer>
</map>
"#;

#[test]
fn compression_tag_is_ignored_on_csv_layers() {
    let map = Map::from_tmx(parse_tmx(CSV_WITH_COMPRESSION.as_bytes()).unwrap()).unwrap();
    assert_eq!(map.layers, vec![vec![1, 2]]);
}
