//! File intake: mode-sensitive adaptation and batch validation.
//!
//! The pipeline is synchronous. Its one asynchronous dependency — the
//! 8-byte prefix read behind the PDF signature check — is inverted:
//! the host reads prefixes for the files [`crate::validate::needs_signature_check`]
//! selects and passes them in as [`PrefixRead`] values.

use serde::Serialize;

use crate::config::UploaderConfig;
use crate::mode::Mode;
use crate::validate::{self, FileLike, FileValidation};

/// Where an intake came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeSource {
    /// The file dialog's change event.
    Selection,
    /// A drop gesture.
    Drop,
}

/// Why an intake list was adapted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AdaptationReason {
    /// Single mode admits one file per intake.
    #[serde(rename = "mode-limitation")]
    ModeLimitation,
    /// Switching to single mode keeps only the first file.
    #[serde(rename = "mode-switch")]
    ModeSwitch,
}

/// Record of a mode-dictated projection applied to a file list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adaptation {
    /// Files before the projection.
    pub original: usize,
    /// Files after the projection.
    pub retained: usize,
    /// Why files were discarded.
    pub reason: AdaptationReason,
}

impl Adaptation {
    /// Human-readable warning line for the aggregate result.
    #[must_use]
    pub fn warning(&self) -> String {
        format!(
            "Only {} of {} files kept: single file mode accepts one file",
            self.retained, self.original
        )
    }
}

/// Apply the mode-dictated selection policy to an intake list.
///
/// - `batch` retains everything.
/// - `single` + drop retains the first file.
/// - `single` + dialog selection retains the last file (the dialog's
///   most recent pick).
///
/// Returns the retained files and, when anything was discarded, an
/// [`Adaptation`] with reason `mode-limitation`.
#[must_use]
pub fn adapt_intake<F>(
    files: Vec<F>,
    mode: Mode,
    source: IntakeSource,
) -> (Vec<F>, Option<Adaptation>) {
    if mode == Mode::Batch || files.len() <= 1 {
        return (files, None);
    }
    let original = files.len();
    let mut files = files;
    let kept = match source {
        IntakeSource::Drop => files.into_iter().next(),
        IntakeSource::Selection => files.pop(),
    };
    let Some(kept) = kept else {
        return (Vec::new(), None);
    };
    (
        vec![kept],
        Some(Adaptation {
            original,
            retained: 1,
            reason: AdaptationReason::ModeLimitation,
        }),
    )
}

/// Result of reading a file's leading bytes for the signature check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixRead {
    /// The leading bytes, up to [`crate::validate::PDF_SNIFF_LEN`].
    Bytes(Vec<u8>),
    /// The read failed; degrades to a warning, not a rejection.
    Failed(String),
}

/// A file that failed validation, with its reasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedFile<F> {
    /// The rejected handle.
    pub file: F,
    /// Every reason it was rejected.
    pub reasons: Vec<String>,
}

/// Partitioned result of one intake.
///
/// `accepted` and `rejected` are disjoint and together cover the
/// adapted input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeOutcome<F> {
    /// Files that passed every check, in input order.
    pub accepted: Vec<F>,
    /// Files that failed, with reasons, in input order.
    pub rejected: Vec<RejectedFile<F>>,
    /// Aggregate non-blocking observations, each prefixed with the
    /// file name it concerns.
    pub warnings: Vec<String>,
}

impl<F> IntakeOutcome<F> {
    /// Number of files that went through validation.
    #[must_use]
    pub fn total(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }

    /// Flat list of rejection lines (`name: reason, reason`).
    #[must_use]
    pub fn rejection_lines(&self) -> Vec<String>
    where
        F: FileLike,
    {
        self.rejected
            .iter()
            .map(|r| format!("{}: {}", r.file.name(), r.reasons.join(", ")))
            .collect()
    }

    /// The consolidated inline error string, if the intake produced one.
    ///
    /// One rejection renders its line alone; several render as a count
    /// header plus one line per file. An intake that accepted nothing
    /// and rejected nothing reports the no-valid-files fallback.
    #[must_use]
    pub fn consolidated_error(&self) -> Option<String>
    where
        F: FileLike,
    {
        let lines = self.rejection_lines();
        match lines.len() {
            0 if self.accepted.is_empty() => Some("No valid files were selected.".to_owned()),
            0 => None,
            1 => Some(lines[0].clone()),
            n => Some(format!("{n} files failed validation:\n{}", lines.join("\n"))),
        }
    }
}

/// Validate an adapted intake list.
///
/// `prefixes` is aligned with `files`: `prefixes[i]` carries the prefix
/// read for `files[i]` when the host performed one, `None` otherwise.
/// Files selected by [`validate::needs_signature_check`] without a
/// prefix read degrade to a warning.
#[must_use]
pub fn run_intake<F: FileLike>(
    files: Vec<F>,
    config: &UploaderConfig,
    prefixes: &[Option<PrefixRead>],
) -> IntakeOutcome<F> {
    let mut outcome = IntakeOutcome {
        accepted: Vec::new(),
        rejected: Vec::new(),
        warnings: Vec::new(),
    };

    for (index, file) in files.into_iter().enumerate() {
        let mut validation = validate::validate_file(&file, config);

        if validation.is_valid() && validate::needs_signature_check(&file) {
            apply_signature_check(prefixes.get(index).and_then(Option::as_ref), &mut validation);
        }

        for warning in &validation.warnings {
            outcome.warnings.push(format!("{}: {warning}", file.name()));
        }

        if validation.is_valid() {
            outcome.accepted.push(file);
        } else {
            outcome.rejected.push(RejectedFile {
                file,
                reasons: validation.errors,
            });
        }
    }

    outcome
}

fn apply_signature_check(prefix: Option<&PrefixRead>, validation: &mut FileValidation) {
    match prefix {
        Some(PrefixRead::Bytes(bytes)) => {
            if !validate::has_pdf_signature(bytes) {
                validation
                    .errors
                    .push("File does not appear to be a valid PDF".to_owned());
            }
        }
        Some(PrefixRead::Failed(reason)) => {
            validation
                .warnings
                .push(format!("could not verify PDF format ({reason})"));
        }
        None => {
            validation
                .warnings
                .push("could not verify PDF format".to_owned());
        }
    }
}
