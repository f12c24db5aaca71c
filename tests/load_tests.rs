// tests/load_tests.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tmx_loader::{load_tileset_from, parse_tmx, DirSource, Map, MapError, MemorySource};

const MAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" width="2" height="1" tilewidth="16" tileheight="16">
 <tileset firstgid="1" source="tiles/terrain.tsx"/>
 <layer id="1" name="ground" width="2" height="1">
  <data encoding="base64">AQAAAAIAAAA=</data>
 </layer>
</map>
"#;

const TSX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tileset name="terrain" tilewidth="16" tileheight="16" tilecount="4" columns="2">
 <image source="terrain.png" width="32" height="32"/>
</tileset>
"#;

fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("tmx_loader_{nanos}"));
    fs::create_dir_all(dir.join("maps/tiles")).expect("failed to create temp dir");
    dir
}

#[test]
fn integration_load_from_dir() {
    let dir = temp_dir();
    fs::write(dir.join("maps/level.tmx"), MAP).expect("failed to write map");
    fs::write(dir.join("maps/tiles/terrain.tsx"), TSX).expect("failed to write tileset");

    let source = DirSource::new(&dir);
    let map = Map::load_from(&source, "maps/level.tmx").expect("should load map");
    assert_eq!(map.layers, vec![vec![1, 2]]);
    assert_eq!(map.tilesets[0].source, "tiles/terrain.tsx");

    let ts_path = map.tilesets[0].resolve("maps/level.tmx");
    let tileset = load_tileset_from(&source, &ts_path).expect("should load tileset");
    assert_eq!(tileset.name, "terrain");
    assert_eq!(tileset.image.unwrap().source, "terrain.png");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn integration_load_from_memory() {
    let mut source = MemorySource::new();
    source.insert("level.tmx", MAP);
    let map = Map::load_from(&source, "level.tmx").unwrap();
    assert_eq!((map.map_width, map.map_height), (2, 1));
    assert_eq!(map.layers[0], vec![1, 2]);
}

#[test]
fn document_can_be_parsed_without_transforming() {
    let tmx = parse_tmx(MAP.as_bytes()).unwrap();
    assert_eq!(tmx.version, "1.10");
    assert_eq!(tmx.layers[0].data.raw, b"AQAAAAIAAAA=".to_vec());
}

#[test]
fn integration_missing_file_reports_path() {
    let err = Map::load_from(&MemorySource::new(), "nowhere.tmx").unwrap_err();
    match err {
        MapError::Io { path, .. } => assert_eq!(path, Path::new("nowhere.tmx")),
        other => panic!("expected Io, got {:?}", other),
    }
}

#[test]
fn integration_malformed_markup() {
    let mut source = MemorySource::new();
    source.insert("broken.tmx", "<map><layer></map>");
    let err = Map::load_from(&source, "broken.tmx").unwrap_err();
    assert!(matches!(err, MapError::Xml(_)));
}

#[test]
fn integration_load_relative_to_cwd() {
    let err = Map::load("definitely/not/here.tmx").unwrap_err();
    assert!(matches!(err, MapError::Io { .. }));
}
