//! Prints the flattened form of a TMX map as JSON.
//!
//! Usage: `tmx2json <map.tmx> [--pretty]`. Set `RUST_LOG=debug` for decode details.

use anyhow::Context;
use std::path::Path;
use tmx_loader::{DirSource, Map};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut path = None;
    let mut pretty = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--pretty" => pretty = true,
            _ if path.is_none() => path = Some(arg),
            other => anyhow::bail!("unexpected argument: {other}"),
        }
    }
    let Some(path) = path else {
        anyhow::bail!("usage: tmx2json <map.tmx> [--pretty]");
    };

    let path = Path::new(&path);
    let root = path.parent().unwrap_or_else(|| Path::new("."));
    let file = path.file_name().context("map path has no file name")?;

    let map = Map::load_from(&DirSource::new(root), file)
        .with_context(|| format!("Loading map {}", path.display()))?;

    let json = if pretty {
        serde_json::to_string_pretty(&map)?
    } else {
        serde_json::to_string(&map)?
    };
    println!("{json}");
    Ok(())
}
