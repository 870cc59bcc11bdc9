//! Built-in placeholder content source.
//!
//! # Responsibility
//! - Provide the fixed notebook/section/page lookup tables used at startup.
//! - Load the same shape from a JSON document when configured.
//! - Render placeholder editor text for a selected page.
//!
//! # Invariants
//! - Lookups are exact label matches; unknown keys yield empty lists.
//! - Loaded catalogs never contain blank labels.

use crate::spi::{ContentListing, ContentRenderer, ListingEntry, ListingResult};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Errors from catalog loading.
#[derive(Debug)]
pub enum CatalogError {
    /// Catalog file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// Catalog JSON is malformed.
    Parse(serde_json::Error),
    /// Catalog contains a blank notebook, section, or page label.
    BlankLabel,
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read catalog `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid catalog json: {err}"),
            Self::BlankLabel => write!(f, "catalog labels must not be blank"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::BlankLabel => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Section entry with its page labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSection {
    pub label: String,
    #[serde(default)]
    pub pages: Vec<String>,
}

/// Notebook entry with its sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogNotebook {
    pub label: String,
    #[serde(default)]
    pub sections: Vec<CatalogSection>,
}

/// Static lookup table standing in for real storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticCatalog {
    #[serde(default)]
    pub notebooks: Vec<CatalogNotebook>,
}

impl StaticCatalog {
    /// Built-in placeholder data shown on first launch.
    pub fn seeded() -> Self {
        fn section(label: &str, pages: &[&str]) -> CatalogSection {
            CatalogSection {
                label: label.to_string(),
                pages: pages.iter().map(|page| page.to_string()).collect(),
            }
        }
        fn notebook(label: &str, sections: Vec<CatalogSection>) -> CatalogNotebook {
            CatalogNotebook {
                label: label.to_string(),
                sections,
            }
        }

        Self {
            notebooks: vec![
                notebook(
                    "Aspekte B1-B2",
                    vec![
                        section("1", &["1", "Explain"]),
                        section("2", &["2a", "2b Notes"]),
                        section("3", &[]),
                    ],
                ),
                notebook("Fouks_B1_B2", Vec::new()),
                notebook("VHK B2", Vec::new()),
                notebook(
                    "PC3",
                    vec![
                        section("Chapter A", &["Intro", "Topic 1"]),
                        section("Chapter B", &[]),
                    ],
                ),
            ],
        }
    }

    /// Parses a catalog from JSON text.
    ///
    /// Labels are trimmed the same way the outline trims them, so lookups by
    /// a node's label always hit the entry it was created from.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let mut catalog: Self = serde_json::from_str(json)?;
        catalog.normalize_labels();
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads and parses a catalog JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(json.as_str())
    }

    fn normalize_labels(&mut self) {
        fn trim(value: &mut String) {
            let trimmed = value.trim();
            if trimmed.len() != value.len() {
                *value = trimmed.to_string();
            }
        }
        for notebook in &mut self.notebooks {
            trim(&mut notebook.label);
            for section in &mut notebook.sections {
                trim(&mut section.label);
                section.pages.iter_mut().for_each(trim);
            }
        }
    }

    fn validate(&self) -> Result<(), CatalogError> {
        fn blank(value: &str) -> bool {
            value.trim().is_empty()
        }
        let has_blank = self.notebooks.iter().any(|notebook| {
            blank(&notebook.label)
                || notebook.sections.iter().any(|section| {
                    blank(&section.label) || section.pages.iter().any(|page| blank(page))
                })
        });
        if has_blank {
            return Err(CatalogError::BlankLabel);
        }
        Ok(())
    }

    fn notebook(&self, label: &str) -> Option<&CatalogNotebook> {
        self.notebooks.iter().find(|notebook| notebook.label == label)
    }
}

impl ContentListing for StaticCatalog {
    fn list_notebooks(&self) -> ListingResult {
        Ok(self
            .notebooks
            .iter()
            .map(|notebook| ListingEntry::new(notebook.label.as_str()))
            .collect())
    }

    fn list_sections(&self, notebook: &str) -> ListingResult {
        Ok(self
            .notebook(notebook)
            .map(|found| {
                found
                    .sections
                    .iter()
                    .map(|section| ListingEntry::new(section.label.as_str()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_pages(&self, notebook: &str, section: &str) -> ListingResult {
        Ok(self
            .notebook(notebook)
            .and_then(|found| found.sections.iter().find(|entry| entry.label == section))
            .map(|found| {
                found
                    .pages
                    .iter()
                    .map(|page| ListingEntry::new(page.as_str()))
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Renderer producing the placeholder editor text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaceholderRenderer;

impl ContentRenderer for PlaceholderRenderer {
    fn render_content(&self, notebook: &str, section: &str, page: &str) -> String {
        format!(
            "Content for page '{page}' in section '{section}' of notebook '{notebook}'.\n\n\
             Replace this with actual loaded content."
        )
    }
}
