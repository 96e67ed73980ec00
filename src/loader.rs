use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{ListingOrder, LoaderConfig};
use crate::errors::FitsLoaderError;
use crate::fits::{CardValue, FitsFile, FitsReadError, ImageData};

/// What happened to one matching file during [`FitsLoader::load_images`].
#[derive(Debug)]
pub enum FileOutcome {
    Loaded { path: PathBuf, shape: Vec<usize> },
    Failed { path: PathBuf, reason: FitsReadError },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Loaded { path, .. } | FileOutcome::Failed { path, .. } => path,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, FileOutcome::Loaded { .. })
    }
}

/// Per-file outcomes of one `load_images` call, in visiting order.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub outcomes: Vec<FileOutcome>,
}

impl LoadReport {
    pub fn loaded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_loaded()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.loaded()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &FitsReadError)> {
        self.outcomes.iter().filter_map(|o| match o {
            FileOutcome::Failed { path, reason } => Some((path.as_path(), reason)),
            FileOutcome::Loaded { .. } => None,
        })
    }
}

/// Loads the primary data arrays of every matching file in one directory.
///
/// The directory is not touched until an operation runs. Loaded arrays
/// accumulate across calls to [`FitsLoader::load_images`]; nothing is ever
/// removed or deduplicated.
#[derive(Debug, Clone)]
pub struct FitsLoader {
    folder: PathBuf,
    config: LoaderConfig,
    images: Vec<ImageData>,
}

impl FitsLoader {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self::with_config(folder, LoaderConfig::default())
    }

    pub fn with_config(folder: impl Into<PathBuf>, config: LoaderConfig) -> Self {
        FitsLoader {
            folder: folder.into(),
            config,
            images: Vec::new(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn images(&self) -> &[ImageData] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn into_images(self) -> Vec<ImageData> {
        self.images
    }

    /// Paths of the directory entries whose name ends with the configured
    /// suffix, in the configured order.
    pub fn matching_files(&self) -> Result<Vec<PathBuf>, FitsLoaderError> {
        let list_err = |source| FitsLoaderError::Io {
            path: self.folder.clone(),
            source,
        };
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.folder).map_err(list_err)? {
            let entry = entry.map_err(list_err)?;
            if self.config.matches(&entry.file_name().to_string_lossy()) {
                files.push(entry.path());
            }
        }
        if self.config.order == ListingOrder::Sorted {
            files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        }
        log::debug!(
            "{} file(s) matching '{}' in {}",
            files.len(),
            self.config.suffix,
            self.folder.display()
        );
        Ok(files)
    }

    /// Appends the primary data array of every matching file that reads
    /// cleanly. A file that fails is logged, reported and skipped; only a
    /// directory that cannot be listed is an error.
    pub fn load_images(&mut self) -> Result<LoadReport, FitsLoaderError> {
        let mut report = LoadReport::default();
        for path in self.matching_files()? {
            match FitsFile::open(&path).and_then(FitsFile::into_data) {
                Ok(data) => {
                    report.outcomes.push(FileOutcome::Loaded {
                        path,
                        shape: data.shape().to_vec(),
                    });
                    self.images.push(data);
                }
                Err(reason) => {
                    log::warn!("Error reading {}: {}", path.display(), reason);
                    report.outcomes.push(FileOutcome::Failed { path, reason });
                }
            }
        }
        Ok(report)
    }

    /// Looks `key` up in the primary header of the first matching file.
    ///
    /// "First" follows [`LoaderConfig::order`]; with the default raw order
    /// it is whatever the platform lists first. Every error path logs one
    /// warning.
    pub fn get_header_info(&self, key: &str) -> Result<CardValue, FitsLoaderError> {
        self.lookup_header(key)
            .inspect_err(|e| log::warn!("{e}"))
    }

    /// [`FitsLoader::get_header_info`] with the failure collapsed to `None`.
    pub fn header_value(&self, key: &str) -> Option<CardValue> {
        self.get_header_info(key).ok()
    }

    fn lookup_header(&self, key: &str) -> Result<CardValue, FitsLoaderError> {
        let first = self
            .matching_files()?
            .into_iter()
            .next()
            .ok_or_else(|| FitsLoaderError::NoMatchingFiles {
                dir: self.folder.clone(),
                suffix: self.config.suffix.clone(),
            })?;
        let header = FitsFile::open_header(&first).map_err(|source| FitsLoaderError::Fits {
            path: first.clone(),
            source,
        })?;
        header
            .get(key)
            .cloned()
            .ok_or_else(|| FitsLoaderError::MissingHeaderKey {
                key: key.to_string(),
                path: first,
            })
    }
}
