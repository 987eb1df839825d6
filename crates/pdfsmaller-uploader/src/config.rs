//! Uploader configuration: attribute parsing, the accept filter, and
//! the human-readable size limit.
//!
//! Malformed inputs never fail construction. Each one falls back to a
//! safe default and is reported as an [`AttributeIssue`] for the caller
//! to log and surface as an `attribute-validation-error` event.

use crate::mode::Mode;

/// Fallback maximum file size when `max-size` is absent or malformed:
/// 50 MiB.
pub const DEFAULT_MAX_SIZE: u64 = 50 * 1024 * 1024;

/// Default accept list: PDF by extension or MIME type.
pub const DEFAULT_ACCEPT: &str = ".pdf,application/pdf";

/// Default session-storage key for the mode preference.
///
/// The key namespace is process-wide: instances sharing a key see each
/// other's writes. Callers wanting isolation supply their own key.
pub const DEFAULT_PREFERENCE_KEY: &str = "pdfsmaller-uploader-mode";

/// One rule from a parsed accept list.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AcceptRule {
    /// `.pdf` style: matches the lowercase file extension.
    Extension(String),
    /// `application/pdf` style: matches the full MIME type.
    Mime(String),
    /// `image/*` style: matches by media-type prefix (`image/`).
    MimePrefix(String),
}

/// A parsed `accept` list.
///
/// Comma-separated items; items starting with `.` are case-insensitive
/// extension rules, everything else is a MIME rule where `type/*`
/// matches by media-type prefix. An empty list accepts everything,
/// matching the behavior of a file input without an `accept` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptFilter {
    rules: Vec<AcceptRule>,
    source: String,
}

impl AcceptFilter {
    /// Parse a comma-separated accept list.
    #[must_use]
    pub fn parse(accept: &str) -> Self {
        let rules = accept
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| {
                let lower = item.to_ascii_lowercase();
                if let Some(ext) = lower.strip_prefix('.') {
                    AcceptRule::Extension(ext.to_owned())
                } else if let Some(prefix) = lower.strip_suffix("/*") {
                    AcceptRule::MimePrefix(format!("{prefix}/"))
                } else {
                    AcceptRule::Mime(lower)
                }
            })
            .collect();
        Self {
            rules,
            source: accept.trim().to_owned(),
        }
    }

    /// Whether a file with this name and MIME type passes the filter.
    ///
    /// An empty filter accepts everything.
    #[must_use]
    pub fn matches(&self, name: &str, mime_type: Option<&str>) -> bool {
        if self.rules.is_empty() {
            return true;
        }
        let extension = extension_of(name);
        let mime = mime_type.map(str::to_ascii_lowercase);
        self.rules.iter().any(|rule| match rule {
            AcceptRule::Extension(ext) => extension.as_deref() == Some(ext.as_str()),
            AcceptRule::Mime(full) => mime.as_deref() == Some(full.as_str()),
            AcceptRule::MimePrefix(prefix) => {
                mime.as_deref().is_some_and(|m| m.starts_with(prefix))
            }
        })
    }

    /// The accept list as supplied, for use in rejection messages.
    #[must_use]
    pub fn describe(&self) -> &str {
        &self.source
    }

    /// Whether the filter has no rules (accepts everything).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Lowercase extension of a file name, without the dot.
#[must_use]
pub fn extension_of(name: &str) -> Option<String> {
    name.rsplit_once('.')
        .filter(|(base, ext)| !base.is_empty() && !ext.is_empty())
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Parse a human-readable size string (`"50MB"`, `"1.5 GB"`, `"512 kb"`).
///
/// Accepts `^\s*\d+(\.\d+)?\s*(B|KB|MB|GB)\s*$` case-insensitively with
/// binary multipliers. Returns `None` for any other form; callers fall
/// back to [`DEFAULT_MAX_SIZE`].
#[must_use]
pub fn parse_size(input: &str) -> Option<u64> {
    let s = input.trim();
    let digits_end = s
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    let (number, unit) = s.split_at(digits_end);

    // Exactly one optional fractional part, digits on both sides of it.
    let mut parts = number.splitn(3, '.');
    let whole = parts.next()?;
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Some(frac) = parts.next() {
        if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }
    if parts.next().is_some() {
        return None;
    }

    let value: f64 = number.parse().ok()?;
    let multiplier: u64 = match unit.trim().to_ascii_uppercase().as_str() {
        "B" => 1,
        "KB" => 1024,
        "MB" => 1024 * 1024,
        "GB" => 1024 * 1024 * 1024,
        _ => return None,
    };

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bytes = (value * multiplier as f64).round() as u64;
    Some(bytes)
}

/// Render a byte count as a short human-readable size (`"2 MB"`,
/// `"1.5 GB"`, `"640 KB"`).
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const UNITS: [(&str, u64); 3] = [
        ("GB", 1024 * 1024 * 1024),
        ("MB", 1024 * 1024),
        ("KB", 1024),
    ];
    for (unit, factor) in UNITS {
        if bytes >= factor {
            #[allow(clippy::cast_precision_loss)]
            let value = bytes as f64 / factor as f64;
            return if (value - value.round()).abs() < 0.05 {
                format!("{} {unit}", value.round())
            } else {
                format!("{value:.1} {unit}")
            };
        }
    }
    format!("{bytes} B")
}

/// A non-fatal problem with a configuration attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeIssue {
    /// Attribute name as it appears on the element.
    pub attribute: &'static str,
    /// The rejected value.
    pub value: String,
    /// Human-readable description of the problem.
    pub message: String,
}

/// Raw attribute surface of the uploader, prior to parsing.
///
/// Field names mirror the element attributes; presence booleans are
/// already folded to `bool` by the host layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploaderAttributes {
    /// `accept` attribute value.
    pub accept: Option<String>,
    /// Legacy `multiple` presence flag.
    pub multiple: bool,
    /// `max-size` attribute value (human string, e.g. `"50MB"`).
    pub max_size: Option<String>,
    /// `disabled` presence flag.
    pub disabled: bool,
    /// `default-mode` attribute value.
    pub default_mode: Option<String>,
    /// `remember-preference` attribute value; enabled when present and
    /// not `"false"`.
    pub remember_preference: Option<String>,
    /// `toggle-disabled` presence flag.
    pub toggle_disabled: bool,
    /// Preference-store key override.
    pub preference_key: Option<String>,
}

/// Immutable configuration of one uploader instance.
#[derive(Debug, Clone, PartialEq)]
pub struct UploaderConfig {
    /// Parsed accept filter.
    pub accept: AcceptFilter,
    /// Maximum file size in bytes.
    pub max_size: u64,
    /// Human label of the size limit, for rejection messages.
    pub max_size_label: String,
    /// Component-wide disabled flag.
    pub component_disabled: bool,
    /// Toggle-only disabled flag.
    pub toggle_disabled: bool,
    /// Explicit starting mode, when supplied and valid.
    pub default_mode: Option<Mode>,
    /// Whether the last user-chosen mode is persisted for the session.
    pub remember_preference: bool,
    /// Legacy multi-select flag (lowest-priority mode input).
    pub legacy_multiple: bool,
    /// Session-storage key for the mode preference.
    pub preference_key: String,
}

impl UploaderConfig {
    /// Parse the raw attribute surface into a configuration.
    ///
    /// Never fails: malformed values fall back to defaults and are
    /// returned as [`AttributeIssue`]s. An invalid `default-mode` is
    /// ignored here; its resolution-priority handling happens in
    /// [`crate::mode::resolve_initial`], which receives the raw value.
    #[must_use]
    pub fn from_attributes(attrs: &UploaderAttributes) -> (Self, Vec<AttributeIssue>) {
        let mut issues = Vec::new();

        let accept_source = attrs.accept.as_deref().unwrap_or(DEFAULT_ACCEPT);
        let accept = AcceptFilter::parse(accept_source);

        let (max_size, max_size_label) = match attrs.max_size.as_deref() {
            None => (DEFAULT_MAX_SIZE, "50MB".to_owned()),
            Some(raw) => match parse_size(raw) {
                Some(parsed) => (parsed, raw.trim().to_owned()),
                None => {
                    issues.push(AttributeIssue {
                        attribute: "max-size",
                        value: raw.to_owned(),
                        message: format!(
                            "could not parse {raw:?} as a size, using the 50MB default"
                        ),
                    });
                    (DEFAULT_MAX_SIZE, "50MB".to_owned())
                }
            },
        };

        let default_mode = match attrs.default_mode.as_deref() {
            None => None,
            Some(raw) => match raw.parse::<Mode>() {
                Ok(mode) => Some(mode),
                Err(_) => {
                    issues.push(AttributeIssue {
                        attribute: "default-mode",
                        value: raw.to_owned(),
                        message: format!(
                            "invalid default-mode {raw:?}, expected \"single\" or \"batch\""
                        ),
                    });
                    None
                }
            },
        };

        let remember_preference = attrs
            .remember_preference
            .as_deref()
            .is_some_and(|v| !v.eq_ignore_ascii_case("false"));

        let config = Self {
            accept,
            max_size,
            max_size_label,
            component_disabled: attrs.disabled,
            toggle_disabled: attrs.toggle_disabled,
            default_mode,
            remember_preference,
            legacy_multiple: attrs.multiple,
            preference_key: attrs
                .preference_key
                .clone()
                .unwrap_or_else(|| DEFAULT_PREFERENCE_KEY.to_owned()),
        };
        (config, issues)
    }
}

impl Default for UploaderConfig {
    fn default() -> Self {
        let (config, _) = Self::from_attributes(&UploaderAttributes::default());
        config
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn accept_extension_rule_is_case_insensitive() {
        let filter = AcceptFilter::parse(".pdf");
        assert!(filter.matches("report.PDF", None));
        assert!(filter.matches("report.pdf", Some("application/octet-stream")));
        assert!(!filter.matches("notes.txt", Some("text/plain")));
    }

    #[test]
    fn accept_mime_rule_matches_full_type() {
        let filter = AcceptFilter::parse("application/pdf");
        assert!(filter.matches("anything.bin", Some("application/pdf")));
        assert!(filter.matches("anything.bin", Some("Application/PDF")));
        assert!(!filter.matches("anything.bin", Some("application/zip")));
        assert!(!filter.matches("anything.bin", None));
    }

    #[test]
    fn accept_wildcard_matches_media_type_prefix() {
        let filter = AcceptFilter::parse("image/*");
        assert!(filter.matches("photo.raw", Some("image/png")));
        assert!(!filter.matches("clip.mp4", Some("video/mp4")));
    }

    #[test]
    fn accept_mixed_list_matches_any_rule() {
        let filter = AcceptFilter::parse(" .pdf , image/* ,application/zip");
        assert!(filter.matches("a.pdf", None));
        assert!(filter.matches("b.xyz", Some("image/webp")));
        assert!(filter.matches("c.xyz", Some("application/zip")));
        assert!(!filter.matches("d.doc", Some("application/msword")));
    }

    #[test]
    fn empty_accept_list_accepts_everything() {
        let filter = AcceptFilter::parse("");
        assert!(filter.is_empty());
        assert!(filter.matches("anything.xyz", None));
    }

    #[test]
    fn extension_of_handles_edge_names() {
        assert_eq!(extension_of("a.PDF"), Some("pdf".to_owned()));
        assert_eq!(extension_of("archive.tar.gz"), Some("gz".to_owned()));
        assert_eq!(extension_of("noext"), None);
        // A leading dot marks a hidden file, not an extension.
        assert_eq!(extension_of(".gitignore"), None);
        assert_eq!(extension_of("trailing."), None);
    }

    #[test]
    fn parse_size_accepts_the_documented_grammar() {
        assert_eq!(parse_size("50MB"), Some(50 * 1024 * 1024));
        assert_eq!(parse_size("  10 kb "), Some(10 * 1024));
        assert_eq!(parse_size("1.5GB"), Some(1_610_612_736));
        assert_eq!(parse_size("100B"), Some(100));
        assert_eq!(parse_size("0.5 MB"), Some(512 * 1024));
    }

    #[test]
    fn parse_size_rejects_other_forms() {
        for bad in ["", "MB", "50", "50 TB", "1..5MB", ".5MB", "5.MB", "-1MB", "1e3MB"] {
            assert_eq!(parse_size(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn format_size_picks_the_largest_fitting_unit() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2 * 1024 * 1024), "2 MB");
        assert_eq!(format_size(1_610_612_736), "1.5 GB");
        assert_eq!(format_size(640 * 1024), "640 KB");
    }

    #[test]
    fn default_config_matches_documented_fallbacks() {
        let config = UploaderConfig::default();
        assert_eq!(config.max_size, DEFAULT_MAX_SIZE);
        assert!(config.accept.matches("a.pdf", None));
        assert!(!config.remember_preference);
        assert_eq!(config.preference_key, DEFAULT_PREFERENCE_KEY);
    }

    #[test]
    fn bad_max_size_falls_back_with_an_issue() {
        let attrs = UploaderAttributes {
            max_size: Some("huge".to_owned()),
            ..UploaderAttributes::default()
        };
        let (config, issues) = UploaderConfig::from_attributes(&attrs);
        assert_eq!(config.max_size, DEFAULT_MAX_SIZE);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].attribute, "max-size");
    }

    #[test]
    fn bad_default_mode_is_reported_and_ignored() {
        let attrs = UploaderAttributes {
            default_mode: Some("dual".to_owned()),
            ..UploaderAttributes::default()
        };
        let (config, issues) = UploaderConfig::from_attributes(&attrs);
        assert_eq!(config.default_mode, None);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].attribute, "default-mode");
    }

    #[test]
    fn remember_preference_requires_presence_and_not_false() {
        let enabled = UploaderAttributes {
            remember_preference: Some("true".to_owned()),
            ..UploaderAttributes::default()
        };
        assert!(UploaderConfig::from_attributes(&enabled).0.remember_preference);

        let disabled = UploaderAttributes {
            remember_preference: Some("false".to_owned()),
            ..UploaderAttributes::default()
        };
        assert!(!UploaderConfig::from_attributes(&disabled).0.remember_preference);

        assert!(!UploaderConfig::from_attributes(&UploaderAttributes::default())
            .0
            .remember_preference);
    }
}
