//! Scene and result files.
//!
//! - Scene JSON: `{ "width", "height", "segments": [[x1, y1, x2, y2], ...] }`.
//! - Scene CSV: columns `x1,y1,x2,y2`, one obstacle per row; the bounds come
//!   from the command line.
//! - Result JSON: source, polygon points, fan triangles and diagnostic rays.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use raysweep::prelude::*;
use raysweep::prelude::Bounds;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SceneFile {
    pub width: f64,
    pub height: f64,
    pub segments: Vec<[f64; 4]>,
}

impl SceneFile {
    pub fn from_scene(scene: &Scene) -> Self {
        let b = scene.bounds();
        Self {
            width: b.width(),
            height: b.height(),
            segments: scene
                .segments()
                .iter()
                .map(|(a, q)| [a.x, a.y, q.x, q.y])
                .collect(),
        }
    }

    pub fn into_scene(self) -> Result<Scene> {
        let mut scene = Scene::new(Bounds::from_size(self.width, self.height));
        push_rows(&mut scene, self.segments)?;
        Ok(scene)
    }
}

#[derive(Debug, Serialize)]
pub struct ResultFile {
    pub source: [f64; 2],
    pub polygon: Vec<[f64; 2]>,
    pub triangles: Vec<[[f64; 2]; 3]>,
    pub rays: Vec<[f64; 4]>,
}

impl ResultFile {
    pub fn new(vis: &Visibility) -> Self {
        let xy = |p: &Point| [p.x, p.y];
        Self {
            source: xy(&vis.polygon.source),
            polygon: vis.polygon.points.iter().map(xy).collect(),
            triangles: vis
                .polygon
                .triangles()
                .map(|t| [xy(&t[0]), xy(&t[1]), xy(&t[2])])
                .collect(),
            rays: vis
                .rays
                .iter()
                .map(|r| [r.source.x, r.source.y, r.hit.x, r.hit.y])
                .collect(),
        }
    }
}

fn push_rows(scene: &mut Scene, rows: Vec<[f64; 4]>) -> Result<()> {
    for (i, [x1, y1, x2, y2]) in rows.into_iter().enumerate() {
        let kept = scene
            .push_segment(Vector2::new(x1, y1), Vector2::new(x2, y2))
            .with_context(|| format!("segment {i}"))?;
        if !kept {
            tracing::warn!(index = i, "skipping zero-length segment");
        }
    }
    Ok(())
}

/// Load a scene from `.json`, or from `.csv` with the given bounds size.
pub fn load_scene(path: &Path, csv_size: (f64, f64)) -> Result<Scene> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            let file: SceneFile = serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing {}", path.display()))?;
            file.into_scene()
        }
        Some("csv") => {
            let rows = read_segments_csv(path)?;
            let mut scene = Scene::new(Bounds::from_size(csv_size.0, csv_size.1));
            push_rows(&mut scene, rows)?;
            Ok(scene)
        }
        _ => bail!("unsupported scene file {} (expected .json or .csv)", path.display()),
    }
}

fn read_segments_csv(path: &Path) -> Result<Vec<[f64; 4]>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .and_then(|lf| lf.collect())
        .with_context(|| format!("reading {}", path.display()))?;
    let mut cols = Vec::with_capacity(4);
    for name in ["x1", "y1", "x2", "y2"] {
        let s = df
            .column(name)
            .and_then(|c| c.cast(&DataType::Float64))
            .with_context(|| format!("column {name} in {}", path.display()))?;
        let values: Vec<Option<f64>> = s.f64()?.into_iter().collect();
        cols.push(values);
    }
    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        match (cols[0][i], cols[1][i], cols[2][i], cols[3][i]) {
            (Some(x1), Some(y1), Some(x2), Some(y2)) => rows.push([x1, y1, x2, y2]),
            _ => bail!("row {i} of {} has a missing coordinate", path.display()),
        }
    }
    Ok(rows)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

/// Write the polygon hits as a two-column `x,y` CSV.
pub fn write_hits_csv(path: &Path, points: &[Point]) -> Result<()> {
    ensure_parent(path)?;
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let mut df = DataFrame::new(vec![Series::new("x".into(), xs), Series::new("y".into(), ys)])?;
    let mut file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file).finish(&mut df)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating dir {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn json_scene_round_trips_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.json");
        let mut scene = Scene::new(Bounds::from_size(200.0, 100.0));
        scene
            .push_segment(Vector2::new(10.0, 10.0), Vector2::new(50.0, 60.0))
            .unwrap();
        write_json(&path, &SceneFile::from_scene(&scene)).unwrap();
        let loaded = load_scene(&path, (1.0, 1.0)).unwrap();
        assert_eq!(loaded, scene);
    }

    #[test]
    fn csv_scene_uses_given_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("walls.csv");
        fs::write(&path, "x1,y1,x2,y2\n10,5,10,15\n20,20,30.5,20\n").unwrap();
        let scene = load_scene(&path, (40.0, 30.0)).unwrap();
        assert_eq!(scene.bounds(), &Bounds::from_size(40.0, 30.0));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.segments()[1].1, Vector2::new(30.5, 20.0));
    }

    #[test]
    fn out_of_bounds_rows_are_rejected() {
        let file = SceneFile {
            width: 10.0,
            height: 10.0,
            segments: vec![[1.0, 1.0, 12.0, 1.0]],
        };
        let err = file.into_scene().unwrap_err();
        assert!(format!("{err:#}").contains("segment 0"));
    }

    #[test]
    fn unknown_extension_is_an_error() {
        assert!(load_scene(Path::new("scene.txt"), (1.0, 1.0)).is_err());
    }

    #[test]
    fn result_and_hits_files_are_written() {
        let dir = tempdir().unwrap();
        let vis = sweep(
            Vector2::new(50.0, 50.0),
            &[],
            &Bounds::from_size(100.0, 100.0),
            &SweepCfg::default(),
        )
        .unwrap();
        let res = ResultFile::new(&vis);
        assert_eq!(res.polygon.len(), 4);
        assert_eq!(res.triangles.len(), 3);
        assert_eq!(res.triangles[0][0], [50.0, 50.0]);

        let csv = dir.path().join("out/hits.csv");
        write_hits_csv(&csv, &vis.polygon.points).unwrap();
        let text = fs::read_to_string(&csv).unwrap();
        assert_eq!(text.lines().next(), Some("x,y"));
        assert_eq!(text.lines().count(), 5);
    }
}
