//! # Step Content Collection
//!
//! Discovers step documents under a base directory by glob, validates each
//! one against the [`StepContentSchema`], and builds a typed collection
//! keyed by the declared step `id`.
//!
//! ## Failure Semantics
//!
//! The load is all-or-nothing. Every matched document is checked, every
//! failure is recorded with its path, and if any document fails the whole
//! load fails with the complete list. No document is dropped, defaulted or
//! coerced, and no partial collection is returned.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use thiserror::Error;
use workshop_core::StepId;

use crate::frontmatter;
use crate::schema::{ContentValidationError, SchemaError, StepContent, StepContentSchema};

/// Directory, relative to the site root, that holds the step pages.
pub const DEFAULT_CONTENT_BASE: &str = "src/content/steps";

/// Pattern selecting step pages under the base directory.
pub const DEFAULT_CONTENT_PATTERN: &str = "**/*.mdx";

/// Where to look for step documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionConfig {
    /// Base directory searched recursively.
    pub base: PathBuf,
    /// Glob matched against paths relative to `base`, using `/` separators.
    /// `*` does not cross directory boundaries; `**` does.
    pub pattern: String,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            base: PathBuf::from(DEFAULT_CONTENT_BASE),
            pattern: DEFAULT_CONTENT_PATTERN.to_string(),
        }
    }
}

impl CollectionConfig {
    pub fn new(base: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            pattern: pattern.into(),
        }
    }
}

/// Error building a content collection.
#[derive(Error, Debug)]
pub enum CollectionError {
    /// The base directory does not exist or is not a directory.
    #[error("content base directory not found: {0}")]
    BaseNotFound(String),

    /// The discovery pattern is not a valid glob.
    #[error("invalid content pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Parser message.
        reason: String,
    },

    /// The step schema could not be compiled.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A directory could not be listed during discovery.
    #[error("cannot list '{path}': {reason}")]
    Io {
        /// Directory being listed.
        path: String,
        /// Underlying I/O message.
        reason: String,
    },

    /// One or more documents failed validation.
    #[error("{} of {total} content document(s) failed validation:\n{failures}", .failures.len())]
    Documents {
        /// Number of documents matched by the pattern.
        total: usize,
        /// Every failing document.
        failures: DocumentFailures,
    },
}

/// A single document that failed to load.
#[derive(Debug)]
pub struct DocumentFailure {
    /// Path of the offending document.
    pub path: PathBuf,
    /// Why it was rejected.
    pub error: ContentValidationError,
}

/// Every document that failed in one load, in discovery order.
#[derive(Debug)]
pub struct DocumentFailures(Vec<DocumentFailure>);

impl DocumentFailures {
    /// Returns the number of failing documents.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no document failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a slice of all failures.
    pub fn failures(&self) -> &[DocumentFailure] {
        &self.0
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<DocumentFailure> {
        self.0
    }
}

impl fmt::Display for DocumentFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}: {}", failure.path.display(), failure.error)?;
        }
        Ok(())
    }
}

/// One validated step page.
#[derive(Debug, Clone, PartialEq)]
pub struct StepEntry {
    /// File the entry was loaded from.
    pub source: PathBuf,
    /// Validated frontmatter.
    pub data: StepContent,
    /// MDX body after the frontmatter fence.
    pub body: String,
}

/// Validated step pages keyed by declared step id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentCollection {
    entries: BTreeMap<StepId, StepEntry>,
}

impl ContentCollection {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by step id.
    pub fn get(&self, id: &str) -> Option<&StepEntry> {
        self.entries.get(id)
    }

    /// Returns true if an entry with this step id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Entries ordered by step id.
    pub fn iter(&self) -> impl Iterator<Item = &StepEntry> {
        self.entries.values()
    }

    /// Step ids, in order.
    pub fn ids(&self) -> impl Iterator<Item = &StepId> {
        self.entries.keys()
    }
}

/// Loads a [`ContentCollection`] from disk.
#[derive(Debug)]
pub struct CollectionLoader {
    config: CollectionConfig,
    matcher: GlobMatcher,
    schema: StepContentSchema,
}

impl CollectionLoader {
    /// Prepare a loader: compile the pattern and the schema.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidPattern` for a malformed glob and
    /// `CollectionError::Schema` if the schema cannot be compiled.
    pub fn new(config: CollectionConfig) -> Result<Self, CollectionError> {
        let matcher = GlobBuilder::new(&config.pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| CollectionError::InvalidPattern {
                pattern: config.pattern.clone(),
                reason: e.to_string(),
            })?
            .compile_matcher();
        let schema = StepContentSchema::new()?;
        Ok(Self {
            config,
            matcher,
            schema,
        })
    }

    /// The discovery settings.
    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// The compiled step schema.
    pub fn schema(&self) -> &StepContentSchema {
        &self.schema
    }

    /// Find every document under the base directory matching the pattern.
    ///
    /// Returns paths sorted lexicographically.
    pub fn discover(&self) -> Result<Vec<PathBuf>, CollectionError> {
        let base = &self.config.base;
        if !base.is_dir() {
            return Err(CollectionError::BaseNotFound(base.display().to_string()));
        }

        let mut results = Vec::new();
        let mut visited = HashSet::new();
        self.walk(base, &mut visited, &mut results)?;
        results.sort();
        Ok(results)
    }

    /// Discover, validate and collect every document.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::Documents` listing every failing document
    /// if any fails. Discovery errors are returned as-is.
    pub fn load(&self) -> Result<ContentCollection, CollectionError> {
        let paths = self.discover()?;
        let total = paths.len();

        if total == 0 {
            tracing::warn!(
                base = %self.config.base.display(),
                pattern = %self.config.pattern,
                "no content documents matched"
            );
        }

        let mut entries: BTreeMap<StepId, StepEntry> = BTreeMap::new();
        let mut failures = Vec::new();

        for path in paths {
            match self.load_document(&path) {
                Ok(entry) => {
                    if let Some(existing) = entries.get(&entry.data.id) {
                        failures.push(DocumentFailure {
                            error: ContentValidationError::DuplicateId {
                                id: entry.data.id.to_string(),
                                first: existing.source.display().to_string(),
                            },
                            path,
                        });
                    } else {
                        tracing::debug!(path = %path.display(), id = %entry.data.id, "content document valid");
                        entries.insert(entry.data.id.clone(), entry);
                    }
                }
                Err(error) => {
                    tracing::debug!(path = %path.display(), %error, "content document rejected");
                    failures.push(DocumentFailure { path, error });
                }
            }
        }

        if !failures.is_empty() {
            return Err(CollectionError::Documents {
                total,
                failures: DocumentFailures(failures),
            });
        }

        tracing::info!(documents = entries.len(), "content collection loaded");
        Ok(ContentCollection { entries })
    }

    /// Read and validate a single document.
    pub fn load_document(&self, path: &Path) -> Result<StepEntry, ContentValidationError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ContentValidationError::Read(e.to_string()))?;
        let (value, body) = frontmatter::parse(&text)?;
        let data = self
            .schema
            .parse(&value)
            .map_err(ContentValidationError::Schema)?;
        Ok(StepEntry {
            source: path.to_path_buf(),
            data,
            body: body.to_string(),
        })
    }

    /// Directories are tracked by canonical path, so a symlink that leads
    /// back into an already visited directory is not walked twice.
    fn walk(
        &self,
        dir: &Path,
        visited: &mut HashSet<PathBuf>,
        acc: &mut Vec<PathBuf>,
    ) -> Result<(), CollectionError> {
        let io_error = |e: std::io::Error| CollectionError::Io {
            path: dir.display().to_string(),
            reason: e.to_string(),
        };

        let canonical = std::fs::canonicalize(dir).map_err(io_error)?;
        if !visited.insert(canonical) {
            tracing::debug!(dir = %dir.display(), "directory already visited, skipping");
            return Ok(());
        }

        for entry in std::fs::read_dir(dir).map_err(io_error)? {
            let entry = entry.map_err(io_error)?;
            let file_type = entry.file_type().map_err(io_error)?;
            let path = entry.path();
            let is_dir = if file_type.is_symlink() {
                path.is_dir()
            } else {
                file_type.is_dir()
            };
            if is_dir {
                self.walk(&path, visited, acc)?;
            } else if self.matches(&path) {
                acc.push(path);
            }
        }
        Ok(())
    }

    fn matches(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.config.base) else {
            return false;
        };
        // Match on `/`-joined components so patterns behave the same on Windows.
        let candidate: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        self.matcher.is_match(candidate.join("/"))
    }
}
