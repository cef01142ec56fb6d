use anyhow::{Context, Result};
use serde::Deserialize;
use shape_outside::api::{BoxMetrics, ReferenceBox, ShapeSource, ShapeValue};
use std::fs;
use std::path::{Path, PathBuf};

/// A floated element as read from a JSON file.
#[derive(Clone, Debug, Deserialize)]
pub struct ElementSpec {
    pub metrics: BoxMetrics,
    pub shape: ShapeSource,
    #[serde(default, rename = "box")]
    pub reference_box: ReferenceBox,
    #[serde(default)]
    pub shape_margin: f64,
    #[serde(default)]
    pub shape_image_threshold: f64,
}

impl ElementSpec {
    pub fn value(&self) -> ShapeValue {
        ShapeValue::resolve(
            &self.metrics,
            self.shape.clone(),
            self.reference_box,
            self.shape_margin,
            self.shape_image_threshold,
        )
    }
}

/// Read and parse an element description.
pub fn load<P: AsRef<Path>>(path: P) -> Result<ElementSpec> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("reading element {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing element {}", path.display()))
}

/// Directory image URLs in `path` are resolved against.
pub fn image_base(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
