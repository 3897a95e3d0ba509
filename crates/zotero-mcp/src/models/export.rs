//! Export formats and rendered bibliographies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Citation export formats understood by the `format` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// BibTeX.
    #[default]
    Bibtex,
    /// BibLaTeX.
    Biblatex,
    /// Research Information Systems.
    Ris,
    /// Refer/BibIX.
    Refer,
    /// RDF using the Bibliontology.
    RdfBibliontology,
    /// RDF using Dublin Core.
    RdfDc,
    /// Zotero RDF.
    RdfZotero,
    /// MODS XML.
    Mods,
    /// TEI XML.
    Tei,
    /// CSL JSON.
    Csljson,
    /// Comma-separated values.
    Csv,
    /// COinS spans.
    Coins,
    /// Wikipedia citation templates.
    Wikipedia,
}

impl ExportFormat {
    /// All supported formats.
    pub const ALL: [Self; 13] = [
        Self::Bibtex,
        Self::Biblatex,
        Self::Ris,
        Self::Refer,
        Self::RdfBibliontology,
        Self::RdfDc,
        Self::RdfZotero,
        Self::Mods,
        Self::Tei,
        Self::Csljson,
        Self::Csv,
        Self::Coins,
        Self::Wikipedia,
    ];

    /// Value of the `format` query parameter.
    #[must_use]
    pub const fn as_api_str(self) -> &'static str {
        match self {
            Self::Bibtex => "bibtex",
            Self::Biblatex => "biblatex",
            Self::Ris => "ris",
            Self::Refer => "refer",
            Self::RdfBibliontology => "rdf_bibliontology",
            Self::RdfDc => "rdf_dc",
            Self::RdfZotero => "rdf_zotero",
            Self::Mods => "mods",
            Self::Tei => "tei",
            Self::Csljson => "csljson",
            Self::Csv => "csv",
            Self::Coins => "coins",
            Self::Wikipedia => "wikipedia",
        }
    }

    /// Parse a format name case-insensitively, accepting `-` for `_`.
    #[must_use]
    pub fn from_str_loose(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "bib" => Some(Self::Bibtex),
            "csl_json" => Some(Self::Csljson),
            other => Self::ALL.into_iter().find(|f| f.as_api_str() == other),
        }
    }

    /// Names of all supported formats, for error messages and schemas.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.as_api_str()).collect()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

/// A rendered bibliography: one text entry per exported record, in server order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportBundle {
    /// Format the entries are rendered in.
    pub format: ExportFormat,
    /// Rendered entries.
    pub entries: Vec<String>,
}

impl ExportBundle {
    /// An export of nothing.
    #[must_use]
    pub const fn empty(format: ExportFormat) -> Self {
        Self { format, entries: Vec::new() }
    }

    /// Split an export response body into entries.
    ///
    /// BibTeX-like bodies split at each line opening with `@`, RIS at each
    /// `ER  -` terminator, Refer at blank lines. Other formats are a single
    /// document and stay whole.
    #[must_use]
    pub fn from_body(format: ExportFormat, body: &str) -> Self {
        let entries = match format {
            ExportFormat::Bibtex | ExportFormat::Biblatex => split_at_marker(body),
            ExportFormat::Ris => split_after_terminator(body, "ER  -"),
            ExportFormat::Refer => split_on_blank_lines(body),
            _ => whole(body),
        };
        Self { format, entries }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries joined by newlines.
    #[must_use]
    pub fn render(&self) -> String {
        self.entries.join("\n")
    }
}

fn push_entry(entries: &mut Vec<String>, current: &mut Vec<&str>) {
    let entry = current.join("\n");
    let entry = entry.trim();
    if !entry.is_empty() {
        entries.push(entry.to_string());
    }
    current.clear();
}

fn split_at_marker(body: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut current = Vec::new();
    for line in body.lines() {
        if line.starts_with('@') {
            push_entry(&mut entries, &mut current);
        }
        current.push(line);
    }
    push_entry(&mut entries, &mut current);
    entries
}

fn split_after_terminator(body: &str, terminator: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut current = Vec::new();
    for line in body.lines() {
        current.push(line);
        if line.starts_with(terminator) {
            push_entry(&mut entries, &mut current);
        }
    }
    push_entry(&mut entries, &mut current);
    entries
}

fn split_on_blank_lines(body: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut current = Vec::new();
    for line in body.lines() {
        if line.trim().is_empty() {
            push_entry(&mut entries, &mut current);
        } else {
            current.push(line);
        }
    }
    push_entry(&mut entries, &mut current);
    entries
}

fn whole(body: &str) -> Vec<String> {
    if body.trim().is_empty() { Vec::new() } else { vec![body.to_string()] }
}
