use std::path::Path;
use std::sync::Arc;

use log::{info, warn};

use super::source::{CurveSource, SourceError};
use crate::curve::Curve;

/// Current and reference curves of one category within one directory.
#[derive(Debug, Clone)]
pub struct NamedCurveSet {
    pub directory: String,
    pub category: String,
    pub current: Option<Arc<Curve>>,
    pub reference: Option<Arc<Curve>>,
}

/// The "current" source and the optional "reference" source of a run.
#[derive(Debug, Clone)]
pub struct CurveStore {
    current: CurveSource,
    reference: Option<CurveSource>,
}

impl CurveStore {
    /// Opens both sources. Failing to open the current source is fatal; a
    /// reference source that cannot be opened is dropped with a warning.
    pub fn open(current: &Path, reference: Option<&Path>) -> Result<Self, SourceError> {
        let current = CurveSource::open(current)?;

        let reference = reference.and_then(|path| match CurveSource::open(path) {
            Ok(source) => Some(source),
            Err(e) => {
                warn!(
                    "Reference source {} is unusable ({}); no reference plots will be shown",
                    path.display(),
                    e
                );
                None
            }
        });

        Ok(Self::from_sources(current, reference))
    }

    pub fn from_sources(current: CurveSource, reference: Option<CurveSource>) -> Self {
        if reference.is_none() {
            info!("No reference cross section source");
        }
        CurveStore { current, reference }
    }

    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Directories of the current source, in file order.
    pub fn directories(&self) -> impl Iterator<Item = &str> {
        self.current.directory_names()
    }

    pub fn curve_set(&self, directory: &str, category: &str) -> NamedCurveSet {
        NamedCurveSet {
            directory: directory.to_owned(),
            category: category.to_owned(),
            current: self.current.lookup(directory, category),
            reference: self
                .reference
                .as_ref()
                .and_then(|r| r.lookup(directory, category)),
        }
    }
}
