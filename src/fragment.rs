//! Rendering of env variables as an HCL fragment.
//!
//! The fragment is spliced into a template at a position that already carries
//! the indentation of the first line, e.g.
//!
//! ```hcl
//!       env {
//!         {{ENV_VARS}}
//!       }
//! ```
//!
//! so the first line is emitted bare and every following line is indented to
//! line up underneath it.

use crate::env::EnvMap;

/// Indentation applied to every line after the first.
pub const CONTINUATION_INDENT: usize = 8;

/// Largest continuation indent accepted from configuration.
pub const MAX_INDENT: usize = 64;

/// Render `map` as `KEY = "VALUE"` lines using the default indentation.
///
/// Values are written verbatim between the quotes; no escaping is applied.
/// An empty map renders as the empty string.
#[cfg(test)]
pub fn format_fragment(map: &EnvMap) -> String {
    format_fragment_with_indent(map, CONTINUATION_INDENT)
}

/// Render `map` with a custom continuation indent.
pub fn format_fragment_with_indent(map: &EnvMap, indent: usize) -> String {
    let pad = " ".repeat(indent);

    map.iter()
        .enumerate()
        .map(|(i, (key, value))| {
            if i == 0 {
                format!("{} = \"{}\"", key, value)
            } else {
                format!("{}{} = \"{}\"", pad, key, value)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
