//! Per-file validation checks.
//!
//! All checks here are synchronous and pure. The PDF signature check
//! operates on a caller-supplied prefix; reading those bytes is the
//! host layer's job (the only asynchronous step in the pipeline).

use crate::config::{UploaderConfig, extension_of, format_size};

/// Seam between the core and the host's file handles.
///
/// The browser layer implements this over its file objects; tests use a
/// plain struct. Handles are never mutated after creation.
pub trait FileLike {
    /// File name as reported by the source.
    fn name(&self) -> &str;
    /// Size in bytes.
    fn size(&self) -> u64;
    /// MIME type, when the source reports one.
    fn mime_type(&self) -> Option<&str>;
}

/// Magic bytes every well-formed PDF starts with.
pub const PDF_MAGIC: &[u8] = b"%PDF-";

/// Number of leading bytes the signature check needs.
pub const PDF_SNIFF_LEN: usize = 8;

/// Maximum accepted file-name length.
pub const MAX_NAME_LEN: usize = 255;

/// Fraction of the size limit above which a warning is recorded.
pub const LARGE_FILE_FRACTION: f64 = 0.8;

/// Outcome of validating a single file.
///
/// Ephemeral; folded into events and then discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileValidation {
    /// Rejection reasons; empty means the file is accepted.
    pub errors: Vec<String>,
    /// Non-blocking observations.
    pub warnings: Vec<String>,
}

impl FileValidation {
    /// Whether the file passed every check.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Run the synchronous per-file checks.
#[must_use]
pub fn validate_file<F: FileLike>(file: &F, config: &UploaderConfig) -> FileValidation {
    let mut result = FileValidation::default();
    let name = file.name();

    if name.is_empty() {
        result.errors.push("File has no name".to_owned());
        return result;
    }

    let size = file.size();
    if size == 0 {
        result.errors.push("File is empty".to_owned());
    } else if size > config.max_size {
        result.errors.push(format!(
            "File size {} exceeds the {} limit",
            format_size(size),
            config.max_size_label
        ));
    } else {
        #[allow(clippy::cast_precision_loss)]
        let fraction = size as f64 / config.max_size as f64;
        if fraction > LARGE_FILE_FRACTION {
            result.warnings.push(format!(
                "{} is close to the {} limit and may take longer to process",
                format_size(size),
                config.max_size_label
            ));
        }
    }

    if !config.accept.matches(name, file.mime_type()) {
        let shown = extension_of(name).map_or_else(
            || {
                file.mime_type()
                    .map_or_else(|| "unknown".to_owned(), str::to_owned)
            },
            |ext| format!(".{}", ext.to_ascii_uppercase()),
        );
        result.errors.push(format!(
            "File type \"{shown}\" not supported. Accepted types: {}",
            config.accept.describe()
        ));
    }

    if name.chars().count() > MAX_NAME_LEN {
        result.errors.push(format!(
            "File name is too long (maximum {MAX_NAME_LEN} characters)"
        ));
    }

    if has_problematic_characters(name) {
        result
            .warnings
            .push("File name contains characters that may cause problems".to_owned());
    }

    result
}

/// Whether a file should go through the PDF signature check.
///
/// Applies to PDF-typed inputs only: a `.pdf` extension or an
/// `application/pdf` MIME type.
#[must_use]
pub fn needs_signature_check<F: FileLike>(file: &F) -> bool {
    extension_of(file.name()).as_deref() == Some("pdf")
        || file
            .mime_type()
            .is_some_and(|m| m.eq_ignore_ascii_case("application/pdf"))
}

/// Whether the decoded leading bytes carry the `%PDF-` signature.
#[must_use]
pub fn has_pdf_signature(prefix: &[u8]) -> bool {
    prefix.starts_with(PDF_MAGIC)
}

/// Characters in a file name that are rejected or mangled by common
/// filesystems: `< > : " | ? *` and ASCII control characters.
#[must_use]
pub fn has_problematic_characters(name: &str) -> bool {
    name.chars()
        .any(|c| matches!(c, '<' | '>' | ':' | '"' | '|' | '?' | '*') || (c as u32) < 0x20)
}
