//! Portfolio content documents and shape normalization.
//!
//! Each section of the portfolio page is driven by one independent JSON
//! document. This crate knows where each document lives, how its historical
//! shapes deserialize, and how every shape collapses into one canonical view
//! that the renderer consumes.

pub mod document;
pub mod normalize;
pub mod parser;
pub mod section;

pub use document::{
    AboutDocument, Brand, ContactDocument, CtaButton, CtaField, CtaGroup, FooterDocument,
    Highlight, HeroDocument, Link, NavigationDocument, ProjectItem, ProjectsDocument, Scalar,
    SiteConfig, SkillCategory, SkillsDocument, SocialLink, StatEntry,
};
pub use normalize::{
    normalize_about, normalize_contact, normalize_footer, normalize_hero, normalize_navigation,
    normalize_projects, normalize_site_config, normalize_skills, AboutView, ButtonView,
    CategoryView, ContactView, FooterView, HeroView, HighlightView, LinkView, NavigationView,
    ProjectView, ProjectsView, SiteMeta, SkillsView, SocialView, StatView, DEFAULT_WORK_TITLE,
};
pub use parser::{parse_document, Document, DocumentError};
pub use section::Section;
