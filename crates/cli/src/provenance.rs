use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Sidecar document written next to every CLI artifact.
#[derive(Debug, Serialize)]
pub struct Provenance {
    pub code_rev: String,
    pub raysweep: &'static str,
    pub command: &'static str,
    pub params: Value,
    pub outputs: Vec<String>,
}

impl Provenance {
    pub fn new(command: &'static str, params: Value) -> Self {
        Self {
            code_rev: current_git_rev(),
            raysweep: raysweep::VERSION,
            command,
            params,
            outputs: Vec::new(),
        }
    }

    pub fn output(mut self, path: &Path) -> Self {
        self.outputs.push(path.to_string_lossy().into_owned());
        self
    }

    /// Write `<stem>.provenance.json` beside `artifact`.
    pub fn write_beside(&self, artifact: &Path) -> Result<PathBuf> {
        let path = sidecar_path(artifact);
        fs::write(&path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), "provenance");
        Ok(path)
    }
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "artifact".into());
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Build-time `GIT_COMMIT`, then the runtime variable, then `git rev-parse`.
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn sidecar_replaces_extension() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/out/vis.json")),
            Path::new("/tmp/out/vis.provenance.json")
        );
    }

    #[test]
    fn sidecar_lists_outputs_and_params() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("vis.json");
        let hits = dir.path().join("hits.csv");
        let written = Provenance::new("sweep", json!({"source": [1.0, 2.0]}))
            .output(&artifact)
            .output(&hits)
            .write_beside(&artifact)
            .unwrap();
        let doc: Value = serde_json::from_slice(&fs::read(written).unwrap()).unwrap();
        assert_eq!(doc["command"], "sweep");
        assert_eq!(doc["params"]["source"][1], 2.0);
        assert_eq!(doc["outputs"].as_array().unwrap().len(), 2);
        assert_eq!(doc["raysweep"], raysweep::VERSION);
    }
}
