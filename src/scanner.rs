//! Text scanner for companion includes and the reflectable-type marker
//!
//! Both patterns are line-anchored and allow leading horizontal whitespace.
//!
//! Companion include grammar:
//!
//! ```text
//! line      := ws* "#" ws* "include" ws+ open name close
//! open      := '"' | '<'
//! close     := '"' | '>'
//! name      := [dir "/"] "moc_" stem ".cpp"     ; stem has no '/'
//!            | path ".moc"
//! ws        := ' ' | '\t'
//! ```
//!
//! Marker grammar: `ws* "Q_OBJECT"` followed by a word boundary.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Token marking a class declaration that needs a companion.
pub const REFLECTABLE_MARKER: &str = "Q_OBJECT";

/// Prefix of header-derived companion file names.
pub const COMPANION_PREFIX: &str = "moc_";

fn companion_include_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?m)^[ \t]*#[ \t]*include[ \t]+["<]((?:[^ ">\n]+/)?moc_[^ ">/\n]+\.cpp|[^ ">\n]+\.moc)[">]"#,
        )
        .expect("valid regex")
    })
}

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*Q_OBJECT\b").expect("valid regex"))
}

/// A companion include found in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompanionReference<'a> {
    /// The included file name exactly as written, e.g. `sub/moc_foo.cpp`.
    pub name: &'a str,
    /// Byte offset of the name within the scanned text.
    pub offset: usize,
}

impl<'a> CompanionReference<'a> {
    /// File name without directory and last extension (`sub/moc_foo.cpp` -> `moc_foo`).
    pub fn stem(&self) -> &'a str {
        Path::new(self.name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(self.name)
    }

    /// True for `moc_<name>.cpp` includes, which always come from a header.
    pub fn is_moc_style(&self) -> bool {
        self.stem().starts_with(COMPANION_PREFIX)
    }

    /// Base name used to look up the originating header.
    pub fn header_base_name(&self) -> &'a str {
        let stem = self.stem();
        stem.strip_prefix(COMPANION_PREFIX).unwrap_or(stem)
    }

    /// Directory part of the include, if the name contains one.
    pub fn subdirectory(&self) -> Option<&'a str> {
        self.name.rfind('/').map(|idx| &self.name[..idx])
    }
}

/// Lazily yields every companion include in `text`, in file order.
pub fn find_companion_references(text: &str) -> impl Iterator<Item = CompanionReference<'_>> {
    companion_include_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|name| CompanionReference {
            name: name.as_str(),
            offset: name.start(),
        })
}

/// Whether `text` declares a reflectable type.
pub fn has_reflectable_marker(text: &str) -> bool {
    marker_regex().is_match(text)
}
