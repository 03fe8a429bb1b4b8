use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fnv::FnvHashMap;
use log::{debug, info, warn};
use polars::error::PolarsError;
use polars::prelude::*;

use crate::curve::Curve;

pub const DIRECTORY_COLUMN: &str = "directory";
pub const CATEGORY_COLUMN: &str = "category";
pub const ENERGY_COLUMN: &str = "energy";
pub const XSEC_COLUMN: &str = "xsec";

#[derive(Debug)]
pub enum SourceError {
    File(std::io::Error),
    Yaml(serde_yaml::Error),
    Json(serde_json::Error),
    DataFrame(PolarsError),
    UnknownFormat(PathBuf),
    Malformed {
        directory: String,
        category: String,
        reason: String,
    },
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> SourceError {
        SourceError::File(err)
    }
}

impl From<serde_yaml::Error> for SourceError {
    fn from(err: serde_yaml::Error) -> SourceError {
        SourceError::Yaml(err)
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> SourceError {
        SourceError::Json(err)
    }
}

impl From<PolarsError> for SourceError {
    fn from(err: PolarsError) -> SourceError {
        SourceError::DataFrame(err)
    }
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::File(x) => write!(f, "Source had a file I/O error: {x}"),
            SourceError::Yaml(x) => write!(f, "Source could not be parsed as YAML: {x}"),
            SourceError::Json(x) => write!(f, "Source could not be parsed as JSON: {x}"),
            SourceError::DataFrame(x) => write!(f, "Source had an error using polars: {x}"),
            SourceError::UnknownFormat(path) => write!(
                f,
                "Source {} has no recognised extension (.yaml, .yml, .json, .parquet)",
                path.display()
            ),
            SourceError::Malformed {
                directory,
                category,
                reason,
            } => write!(f, "Curve {directory}/{category} is malformed: {reason}"),
        }
    }
}

impl std::error::Error for SourceError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Json,
    Parquet,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            "json" => Some(SourceFormat::Json),
            "parquet" => Some(SourceFormat::Parquet),
            _ => None,
        }
    }
}

/// On-disk layout of YAML and JSON sources.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
pub struct SourceDocument {
    pub directories: Vec<DirectoryDocument>,
}

#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
pub struct DirectoryDocument {
    pub name: String,
    pub curves: BTreeMap<String, CurveDocument>,
}

#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
pub struct CurveDocument {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct Directory {
    pub name: String,
    curves: FnvHashMap<String, Arc<Curve>>,
}

impl Directory {
    pub fn get(&self, category: &str) -> Option<&Arc<Curve>> {
        self.curves.get(category)
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

/// A read-only set of named curves grouped into directories, in file order.
#[derive(Debug, Clone, Default)]
pub struct CurveSource {
    pub path: PathBuf,
    directories: Vec<Directory>,
    index: FnvHashMap<String, usize>,
}

impl CurveSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let format =
            SourceFormat::from_path(path).ok_or_else(|| SourceError::UnknownFormat(path.into()))?;

        info!("Opening {:?} source {}", format, path.display());

        let mut builder = SourceBuilder::default();
        match format {
            SourceFormat::Yaml => {
                let document: SourceDocument = serde_yaml::from_reader(File::open(path)?)?;
                builder.extend_from_document(document)?;
            }
            SourceFormat::Json => {
                let document: SourceDocument = serde_json::from_reader(File::open(path)?)?;
                builder.extend_from_document(document)?;
            }
            SourceFormat::Parquet => builder.extend_from_parquet(path)?,
        }

        let source = builder.finish(path);
        info!(
            "Loaded {} directories from {}",
            source.directories.len(),
            path.display()
        );
        Ok(source)
    }

    pub fn from_document(path: &Path, document: SourceDocument) -> Result<Self, SourceError> {
        let mut builder = SourceBuilder::default();
        builder.extend_from_document(document)?;
        Ok(builder.finish(path))
    }

    /// One-shot lookup straight from a file. A source that cannot be opened
    /// simply has no curve.
    pub fn curve(path: &Path, directory: &str, category: &str) -> Option<Arc<Curve>> {
        match Self::open(path) {
            Ok(source) => source.lookup(directory, category),
            Err(e) => {
                warn!("Could not open {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn lookup(&self, directory: &str, category: &str) -> Option<Arc<Curve>> {
        let dir = self.directory(directory)?;
        let curve = dir.get(category).cloned();
        if curve.is_none() {
            debug!("{} has no curve {}/{}", self.path.display(), directory, category);
        }
        curve
    }

    pub fn directory(&self, name: &str) -> Option<&Directory> {
        self.index.get(name).map(|&i| &self.directories[i])
    }

    pub fn directory_names(&self) -> impl Iterator<Item = &str> {
        self.directories.iter().map(|d| d.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }
}

#[derive(Default)]
struct SourceBuilder {
    order: Vec<String>,
    points: FnvHashMap<String, FnvHashMap<String, Vec<[f64; 2]>>>,
}

impl SourceBuilder {
    fn directory(&mut self, name: &str) -> &mut FnvHashMap<String, Vec<[f64; 2]>> {
        if !self.points.contains_key(name) {
            self.order.push(name.to_owned());
        }
        self.points.entry(name.to_owned()).or_default()
    }

    fn extend_from_document(&mut self, document: SourceDocument) -> Result<(), SourceError> {
        for dir in document.directories {
            for (category, curve) in dir.curves {
                if curve.x.len() != curve.y.len() {
                    return Err(SourceError::Malformed {
                        directory: dir.name,
                        category,
                        reason: format!(
                            "{} x values but {} y values",
                            curve.x.len(),
                            curve.y.len()
                        ),
                    });
                }
                let points = curve.x.iter().zip(curve.y.iter()).map(|(&x, &y)| [x, y]);
                let slot = self.directory(&dir.name).entry(category).or_default();
                if !slot.is_empty() {
                    warn!("Duplicate curve in directory {}, later samples are appended", dir.name);
                }
                slot.extend(points);
            }
            // directories without curves still show up in file order
            self.directory(&dir.name);
        }
        Ok(())
    }

    fn extend_from_parquet(&mut self, path: &Path) -> Result<(), SourceError> {
        let file = File::open(path)?;
        let df = ParquetReader::new(file).finish()?;

        let directories = df.column(DIRECTORY_COLUMN)?.str()?;
        let categories = df.column(CATEGORY_COLUMN)?.str()?;
        let energy = df.column(ENERGY_COLUMN)?.cast(&DataType::Float64)?;
        let xsec = df.column(XSEC_COLUMN)?.cast(&DataType::Float64)?;
        let energy = energy.f64()?;
        let xsec = xsec.f64()?;

        let mut skipped = 0usize;
        for (((dir, category), x), y) in directories
            .iter()
            .zip(categories.iter())
            .zip(energy.iter())
            .zip(xsec.iter())
        {
            let (Some(dir), Some(category), Some(x), Some(y)) = (dir, category, x, y) else {
                skipped += 1;
                continue;
            };
            self.directory(dir)
                .entry(category.to_owned())
                .or_default()
                .push([x, y]);
        }

        if skipped > 0 {
            warn!("Skipped {skipped} rows with null values in {}", path.display());
        }
        Ok(())
    }

    fn finish(mut self, path: &Path) -> CurveSource {
        let mut directories = Vec::with_capacity(self.order.len());
        let mut index = FnvHashMap::default();

        for name in self.order {
            let raw = self.points.remove(&name).unwrap_or_default();
            let mut curves = FnvHashMap::default();
            for (category, points) in raw {
                let curve = Curve::new(points);
                if curve.is_empty() {
                    debug!("Ignoring empty curve {name}/{category}");
                    continue;
                }
                curves.insert(category, Arc::new(curve));
            }
            index.insert(name.clone(), directories.len());
            directories.push(Directory { name, curves });
        }

        CurveSource {
            path: path.to_path_buf(),
            directories,
            index,
        }
    }
}
