//! # Presentation Files
//!
//! Loading congruence presentations from disk.
//!
//! Two formats are accepted, chosen by file extension:
//!
//! ```toml
//! # monogenic.toml
//! kind = "twosided"
//! generators = 1
//! relations = [["aaaaa", "aa"]]
//! extra = []
//!
//! [config]
//! default_nr_steps = 500
//! ```
//!
//! ```json
//! { "generators": 2, "relations": [["ab", "ba"]], "extra": [["a", "aa"]] }
//! ```

use semicong_core::{CongruenceError, CongruenceKind, CongruenceSpec, CoordinatorConfig, Relation};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE LIMITS
// =============================================================================

/// Maximum size of a presentation file (16 MB).
///
/// This prevents memory exhaustion from accidental large files.
pub const MAX_PRESENTATION_FILE_SIZE: u64 = 16 * 1024 * 1024;

// =============================================================================
// FORMAT
// =============================================================================

/// On-disk format of a presentation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, CongruenceError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(FileFormat::Toml),
            Some("json") => Ok(FileFormat::Json),
            _ => Err(CongruenceError::Config(format!(
                "Unknown presentation format for '{}'. Use: .toml, .json",
                path.display()
            ))),
        }
    }
}

// =============================================================================
// PRESENTATION FILE
// =============================================================================

/// Contents of a presentation file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PresentationFile {
    /// Sidedness of the congruence.
    #[serde(default)]
    pub kind: CongruenceKind,

    /// Number of generators, written `a`, `b`, `c`, ... in words.
    pub generators: usize,

    /// Defining relations of the semigroup.
    #[serde(default)]
    pub relations: Vec<Relation>,

    /// Extra generating pairs of the congruence.
    #[serde(default)]
    pub extra: Vec<Relation>,

    /// Relations describe a concrete semigroup rather than a presentation.
    #[serde(default)]
    pub over_semigroup: bool,

    /// Coordinator tunables.
    #[serde(default)]
    pub config: CoordinatorConfig,
}

impl PresentationFile {
    /// Parse file contents in the given format.
    pub fn parse(text: &str, format: FileFormat) -> Result<Self, CongruenceError> {
        match format {
            FileFormat::Toml => toml::from_str(text)
                .map_err(|e| CongruenceError::Config(format!("Invalid TOML: {}", e))),
            FileFormat::Json => serde_json::from_str(text)
                .map_err(|e| CongruenceError::Config(format!("Invalid JSON: {}", e))),
        }
    }

    /// Build the validated congruence specification.
    pub fn to_spec(&self) -> Result<CongruenceSpec, CongruenceError> {
        let spec = if self.over_semigroup {
            CongruenceSpec::over_semigroup(
                self.kind,
                self.generators,
                self.relations.clone(),
                self.extra.clone(),
            )
        } else {
            CongruenceSpec::new(
                self.kind,
                self.generators,
                self.relations.clone(),
                self.extra.clone(),
            )
        };
        spec.validate()?;
        Ok(spec)
    }
}

// =============================================================================
// LOADING
// =============================================================================

/// Validate file path.
///
/// Canonicalizes the path to resolve symlinks and "..", and ensures it
/// names an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, CongruenceError> {
    let canonical = path.canonicalize().map_err(|e| {
        CongruenceError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(CongruenceError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), CongruenceError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| CongruenceError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(CongruenceError::Config(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Load a presentation file from disk.
pub fn load_presentation(path: &Path) -> Result<PresentationFile, CongruenceError> {
    let format = FileFormat::from_path(path)?;
    let validated_path = validate_file_path(path)?;
    validate_file_size(&validated_path, MAX_PRESENTATION_FILE_SIZE)?;

    let text = std::fs::read_to_string(&validated_path)
        .map_err(|e| CongruenceError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;

    let presentation = PresentationFile::parse(&text, format)?;
    tracing::debug!(
        file = %validated_path.display(),
        generators = presentation.generators,
        relations = presentation.relations.len(),
        extra = presentation.extra.len(),
        "presentation loaded"
    );
    Ok(presentation)
}

// =============================================================================
// TESTS
// =============================================================================
