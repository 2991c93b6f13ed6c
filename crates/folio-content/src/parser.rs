//! Content document parser.

use serde::de::DeserializeOwned;

use crate::document::{
    AboutDocument, ContactDocument, FooterDocument, HeroDocument, NavigationDocument,
    ProjectsDocument, SiteConfig, SkillsDocument,
};
use crate::section::Section;

/// A decoded content document, typed by section.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    SiteConfig(SiteConfig),
    Navigation(NavigationDocument),
    Hero(HeroDocument),
    About(AboutDocument),
    Projects(ProjectsDocument),
    Skills(SkillsDocument),
    Contact(ContactDocument),
    Footer(FooterDocument),
    /// Loaded but not rendered (experience, education).
    Opaque(Section, serde_json::Value),
}

impl Document {
    /// The section this document belongs to.
    pub fn section(&self) -> Section {
        match self {
            Self::SiteConfig(_) => Section::SiteConfig,
            Self::Navigation(_) => Section::Navigation,
            Self::Hero(_) => Section::Hero,
            Self::About(_) => Section::About,
            Self::Projects(_) => Section::Projects,
            Self::Skills(_) => Section::Skills,
            Self::Contact(_) => Section::Contact,
            Self::Footer(_) => Section::Footer,
            Self::Opaque(section, _) => *section,
        }
    }
}

/// Errors that can occur when reading a content document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Unexpected document shape: {0}")]
    Shape(String),
}

/// Parse a response body into the typed document for `section`.
///
/// Syntax errors and shape errors are reported separately so callers can tell
/// a corrupt file from one written against an unknown schema.
pub fn parse_document(section: Section, body: &[u8]) -> Result<Document, DocumentError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| DocumentError::InvalidJson(e.to_string()))?;

    let document = match section {
        Section::SiteConfig => Document::SiteConfig(decode(value)?),
        Section::Navigation => Document::Navigation(decode(value)?),
        Section::Hero => Document::Hero(decode(value)?),
        Section::About => Document::About(decode(value)?),
        Section::Projects => Document::Projects(decode(value)?),
        Section::Skills => Document::Skills(decode(value)?),
        Section::Contact => Document::Contact(decode(value)?),
        Section::Footer => Document::Footer(decode(value)?),
        Section::Experience | Section::Education => Document::Opaque(section, value),
    };

    Ok(document)
}

fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, DocumentError> {
    serde_json::from_value(value).map_err(|e| DocumentError::Shape(e.to_string()))
}
