mod provenance;
mod scene_io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use raysweep::prelude::*;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

use provenance::Provenance;
use scene_io::{load_scene, write_hits_csv, write_json, ResultFile, SceneFile};

#[derive(Parser)]
#[command(name = "raysweep-cli")]
#[command(about = "Visibility polygons for 2D scenes")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Sweep a scene from one source and write the polygon as JSON
    Sweep {
        /// Scene file (.json, or .csv with columns x1,y1,x2,y2)
        #[arg(long)]
        scene: PathBuf,
        /// Source point as `X,Y`
        #[arg(long, value_parser = parse_point)]
        source: Point,
        #[arg(long)]
        out: PathBuf,
        /// Re-fire the first event so the fan closes
        #[arg(long)]
        close_fan: bool,
        /// Include one diagnostic ray per event in the output
        #[arg(long)]
        rays: bool,
        /// Also write the polygon points as an `x,y` CSV
        #[arg(long)]
        hits_csv: Option<PathBuf>,
        /// Scene size for CSV input
        #[arg(long, default_value_t = 800.0)]
        width: f64,
        #[arg(long, default_value_t = 600.0)]
        height: f64,
    },
    /// Write a seeded random scene as JSON
    Generate {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long, default_value_t = 12)]
        segments: usize,
        #[arg(long, default_value_t = 800.0)]
        width: f64,
        #[arg(long, default_value_t = 600.0)]
        height: f64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Sweep {
            scene,
            source,
            out,
            close_fan,
            rays,
            hits_csv,
            width,
            height,
        } => {
            let cfg = SweepCfg {
                close_fan,
                diagnostics: rays,
                ..SweepCfg::default()
            };
            run_sweep(&scene, source, &out, cfg, hits_csv.as_deref(), (width, height))
        }
        Action::Generate {
            seed,
            index,
            segments,
            width,
            height,
            out,
        } => generate(ReplayToken { seed, index }, segments, (width, height), &out),
        Action::Report => report(),
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad coordinate {v:?}: {e}"))
    };
    Ok(Vector2::new(coord(x)?, coord(y)?))
}

fn run_sweep(
    scene_path: &Path,
    source: Point,
    out: &Path,
    cfg: SweepCfg,
    hits_csv: Option<&Path>,
    csv_size: (f64, f64),
) -> Result<()> {
    tracing::info!(
        scene = %scene_path.display(),
        x = source.x,
        y = source.y,
        out = %out.display(),
        "sweep"
    );
    let scene = load_scene(scene_path, csv_size)?;
    let vis = scene
        .sweep(source, &cfg)
        .with_context(|| format!("sweeping {} from ({}, {})", scene_path.display(), source.x, source.y))?;
    tracing::info!(
        segments = scene.len(),
        hits = vis.polygon.len(),
        area = vis.polygon.area(),
        "sweep_done"
    );
    write_json(out, &ResultFile::new(&vis))?;

    let mut prov = Provenance::new(
        "sweep",
        json!({
            "scene": scene_path.to_string_lossy(),
            "source": [source.x, source.y],
            "close_fan": cfg.close_fan,
            "rays": cfg.diagnostics,
            "endpoint_quantum": cfg.endpoint_quantum,
        }),
    )
    .output(out);
    if let Some(csv) = hits_csv {
        write_hits_csv(csv, &vis.polygon.points)?;
        prov = prov.output(csv);
    }
    prov.write_beside(out)?;
    Ok(())
}

fn generate(tok: ReplayToken, segments: usize, size: (f64, f64), out: &Path) -> Result<()> {
    tracing::info!(seed = tok.seed, index = tok.index, segments, out = %out.display(), "generate");
    let bounds = Bounds::from_size(size.0, size.1);
    if !bounds.is_valid() {
        anyhow::bail!("scene size must be positive, got {}x{}", size.0, size.1);
    }
    let cfg = SceneCfg {
        segments,
        ..SceneCfg::default()
    };
    let scene = random_scene(bounds, cfg, tok);
    if scene.len() < segments {
        tracing::warn!(requested = segments, drawn = scene.len(), "scene too small for segment lengths");
    }
    write_json(out, &SceneFile::from_scene(&scene))?;
    Provenance::new(
        "generate",
        json!({
            "seed": tok.seed,
            "index": tok.index,
            "segments": segments,
            "width": size.0,
            "height": size.1,
        }),
    )
    .output(out)
    .write_beside(out)?;
    Ok(())
}

fn report() -> Result<()> {
    let doc = Provenance::new("report", json!({}));
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_source_points() {
        assert_eq!(parse_point("1.5, -2").unwrap(), Vector2::new(1.5, -2.0));
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn generate_then_sweep_writes_outputs() {
        let dir = tempdir().unwrap();
        let scene = dir.path().join("scene.json");
        generate(ReplayToken { seed: 3, index: 1 }, 6, (400.0, 300.0), &scene).unwrap();
        assert!(dir.path().join("scene.provenance.json").exists());

        let loaded = load_scene(&scene, (1.0, 1.0)).unwrap();
        let source = random_source(&loaded, 2.0, ReplayToken { seed: 3, index: 1 }).unwrap();
        let out = dir.path().join("vis.json");
        let hits = dir.path().join("hits.csv");
        run_sweep(&scene, source, &out, SweepCfg::default(), Some(&hits), (1.0, 1.0)).unwrap();

        let doc: serde_json::Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert!(doc["polygon"].as_array().unwrap().len() >= 4);
        assert!(hits.exists());
        let prov: serde_json::Value =
            serde_json::from_slice(&std::fs::read(dir.path().join("vis.provenance.json")).unwrap())
                .unwrap();
        assert_eq!(prov["outputs"].as_array().unwrap().len(), 2);
    }
}
