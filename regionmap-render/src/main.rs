use anyhow::{Context, Result};
use clap::Parser;
use regionmap::constants::{DESIGN_HEIGHT, DESIGN_WIDTH};
use regionmap::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a region map with labelled nodes to SVG")]
struct Args {
    /// Node list (JSON array of nodes)
    nodes: PathBuf,

    /// Output SVG file
    output: PathBuf,

    /// Regions as ID=file.geojson
    #[arg(value_parser = parse_region)]
    regions: Vec<(String, PathBuf)>,

    /// Drawing size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size, default_value_t = default_size())]
    size: Size,

    /// Map configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Size {
    width: f64,
    height: f64,
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

fn default_size() -> Size {
    Size {
        width: DESIGN_WIDTH,
        height: DESIGN_HEIGHT,
    }
}

fn parse_size(value: &str) -> std::result::Result<Size, String> {
    let (w, h) = value
        .split_once('x')
        .ok_or_else(|| format!("size {value} is not WIDTHxHEIGHT"))?;
    let width: f64 = w.parse().map_err(|_| format!("bad width {w}"))?;
    let height: f64 = h.parse().map_err(|_| format!("bad height {h}"))?;
    if width <= 0.0 || height <= 0.0 {
        return Err(format!("size {value} must be positive"));
    }
    Ok(Size { width, height })
}

fn parse_region(value: &str) -> std::result::Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((id, path)) if !id.is_empty() && !path.is_empty() => {
            Ok((id.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("region {value} is not ID=file.geojson")),
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn main() -> Result<()> {
    regionmap::init_logging();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => MapConfig::from_json(&read(path)?)?,
        None => MapConfig::default(),
    };
    let nodes = Node::list_from_json(&read(&args.nodes)?)?;

    let mut builder = MapBuilder::new()
        .with_config(config)
        .with_viewport(Viewport::new(args.size.width, args.size.height))
        .with_nodes(nodes);
    for (id, path) in &args.regions {
        builder = builder
            .with_region_geojson(id, &read(path)?)
            .with_context(|| format!("loading region {id}"))?;
    }

    let session = builder.build()?;
    if let Some(layout) = session.layout() {
        for (a, b) in layout.labels.overlaps() {
            log::warn!(
                "labels of {} and {} overlap",
                session.nodes()[a].id,
                session.nodes()[b].id
            );
        }
    }

    let svg = session.scene().to_svg()?;
    fs::write(&args.output, svg)
        .with_context(|| format!("writing {}", args.output.display()))?;
    log::info!("wrote {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_size_flag_with_equals() {
        let args = Args::try_parse_from([
            "regionmap-render",
            "n.json",
            "out.svg",
            "--size=400x600",
            "SE=se.geojson",
        ])
        .unwrap();
        assert_eq!(args.size, Size { width: 400.0, height: 600.0 });
        assert_eq!(args.regions, vec![("SE".to_string(), PathBuf::from("se.geojson"))]);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_defaults_to_design_size() {
        let args = Args::try_parse_from(["regionmap-render", "n.json", "out.svg"]).unwrap();
        assert_eq!(args.size, default_size());
        assert!(args.regions.is_empty());
    }

    #[test]
    fn test_rejects_unknown_flags_and_bad_values() {
        for argv in [
            vec!["regionmap-render", "n.json", "out.svg", "--sise", "400x600"],
            vec!["regionmap-render", "n.json", "out.svg", "--size", "400"],
            vec!["regionmap-render", "n.json", "out.svg", "se.geojson"],
            vec!["regionmap-render", "n.json"],
        ] {
            assert!(Args::try_parse_from(argv.clone()).is_err(), "{:?}", argv);
        }
    }
}
