//! Job template loading and placeholder injection.
//!
//! The template is opaque text; the only thing this module knows about it is
//! the literal placeholder token. There is no escaping and no other syntax:
//! every occurrence of the token is replaced with the rendered fragment.

use crate::error::{EnvJobError, Result};
use crate::fs::atomic_write_file;
use std::path::Path;

/// Placeholder token replaced by the rendered env fragment.
pub const DEFAULT_PLACEHOLDER: &str = "{{ENV_VARS}}";

/// Result of injecting a fragment into a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    /// The generated document.
    pub content: String,
    /// Number of placeholder occurrences that were replaced.
    pub replacements: usize,
}

impl Injection {
    /// Whether the template contained the placeholder at all.
    pub fn found_placeholder(&self) -> bool {
        self.replacements > 0
    }
}

/// Replace every occurrence of `placeholder` in `template` with `fragment`.
///
/// When the placeholder does not occur the content is returned unchanged and
/// `replacements` is zero. `placeholder` must be non-empty; configuration
/// validation rejects an empty token before it reaches this point.
pub fn inject(template: &str, placeholder: &str, fragment: &str) -> Injection {
    debug_assert!(!placeholder.is_empty());

    let replacements = template.matches(placeholder).count();
    let content = if replacements == 0 {
        template.to_string()
    } else {
        template.replace(placeholder, fragment)
    };

    Injection {
        content,
        replacements,
    }
}

/// Read a job template from disk.
pub fn load_template<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();

    std::fs::read_to_string(path).map_err(|e| {
        EnvJobError::Template(format!(
            "failed to read job template '{}': {}\n\
             Fix: create the template or pass --template <PATH>.",
            path.display(),
            e
        ))
    })
}

/// Write the generated job specification, overwriting any existing file.
pub fn write_output<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    atomic_write_file(path, content)?;
    tracing::info!(path = %path.display(), bytes = content.len(), "wrote job specification");
    Ok(())
}
