//! Shared test fixtures: animation clips and shader sources under the
//! workspace `fixtures/` directory, indexed by `fixtures/manifest.json`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    clips: HashMap<String, String>,
    shaders: HashMap<String, ShaderEntry>,
}

#[derive(Debug, Deserialize)]
struct ShaderEntry {
    vertex: String,
    #[serde(default)]
    fragment: Option<String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Animation clip documents.
pub mod clips {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.clips.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.clips, "clip", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.clips, "clip", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.clips, "clip", name)?;
        Ok(resolve_path(rel))
    }
}

/// GLSL vertex/fragment pairs. Some entries deliberately omit a stage.
pub mod shaders {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.shaders.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn vertex(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.shaders, "shader", name)?;
        read_to_string(&entry.vertex)
    }

    pub fn fragment(name: &str) -> Result<Option<String>> {
        let entry = lookup(&MANIFEST.shaders, "shader", name)?;
        match &entry.fragment {
            Some(fragment) => read_to_string(fragment).map(Some),
            None => Ok(None),
        }
    }

    pub fn vertex_path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.shaders, "shader", name)?;
        Ok(resolve_path(&entry.vertex))
    }
}
