//! Section loaders.
//!
//! A loader fetches one document, parses and normalizes it, and turns the
//! canonical view into a list of writes against its own targets. Every failure
//! stays inside the loader and comes back as a [`LoadOutcome`].

use minijinja::context;

use folio_content::{
    normalize_about, normalize_contact, normalize_footer, normalize_hero, normalize_navigation,
    normalize_projects, normalize_site_config, normalize_skills, parse_document, Document,
    DocumentError, Section,
};

use crate::markup::{self, Fragments};
use crate::targets::{Page, Target, Write, WriteReport};
use crate::traits::{ContentSource, FetchError};

/// Why a loader left its section unrendered.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to fetch {path}: {source}")]
    Transport {
        path: &'static str,
        #[source]
        source: FetchError,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: &'static str, message: String },

    #[error("Unexpected shape in {path}: {message}")]
    Shape { path: &'static str, message: String },

    #[error("Failed to render {path}: {message}")]
    Render { path: &'static str, message: String },
}

impl LoadError {
    /// Short category name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Parse { .. } => "parse",
            Self::Shape { .. } => "shape",
            Self::Render { .. } => "render",
        }
    }
}

/// What a successful loader did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionReport {
    /// `false` for documents that are loaded but reserved
    pub rendered: bool,
    pub written: Vec<Target>,
    /// Writes dropped because the host page lacks the element
    pub skipped: Vec<Target>,
}

/// Settled state of one loader.
#[derive(Debug)]
pub struct LoadOutcome {
    pub section: Section,
    pub result: Result<SectionReport, LoadError>,
}

impl LoadOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Fetch and parse the document for `section`.
pub async fn fetch_section(
    source: &dyn ContentSource,
    section: Section,
) -> Result<Document, LoadError> {
    let path = section.path();

    let body = source
        .fetch(path)
        .await
        .map_err(|source| LoadError::Transport { path, source })?;

    parse_document(section, &body).map_err(|e| match e {
        DocumentError::InvalidJson(message) => LoadError::Parse { path, message },
        DocumentError::Shape(message) => LoadError::Shape { path, message },
    })
}

/// Render a parsed document into the page.
///
/// All fragments are built before the first write, so a failure leaves the
/// section's targets untouched.
pub fn render_section(
    page: &mut Page,
    fragments: &Fragments,
    document: Document,
) -> Result<SectionReport, LoadError> {
    let section = document.section();

    if let Document::Opaque(_, value) = &document {
        tracing::debug!("{} data loaded (not rendered): {}", section, value);
        return Ok(SectionReport::default());
    }

    let writes = plan_writes(fragments, document).map_err(|e| LoadError::Render {
        path: section.path(),
        message: e.to_string(),
    })?;

    let WriteReport { written, skipped } = page.apply(writes);

    Ok(SectionReport {
        rendered: true,
        written,
        skipped,
    })
}

/// Run one loader to completion against the page. Never fails; the outcome
/// carries the error instead.
pub async fn load_section(
    source: &dyn ContentSource,
    page: &mut Page,
    fragments: &Fragments,
    section: Section,
) -> LoadOutcome {
    let result = match fetch_section(source, section).await {
        Ok(document) => render_section(page, fragments, document),
        Err(e) => Err(e),
    };
    settle(section, result)
}

/// Log a loader result and wrap it as an outcome.
pub(crate) fn settle(section: Section, result: Result<SectionReport, LoadError>) -> LoadOutcome {
    match &result {
        Ok(report) if report.rendered => tracing::debug!(
            "Rendered {} ({} written, {} skipped)",
            section,
            report.written.len(),
            report.skipped.len()
        ),
        Ok(_) => {}
        Err(e) => tracing::error!("Error loading {}: {}", section, e),
    }

    LoadOutcome { section, result }
}

/// Turn a document into the writes for its targets.
fn plan_writes(fragments: &Fragments, document: Document) -> Result<Vec<Write>, minijinja::Error> {
    let writes = match document {
        Document::SiteConfig(doc) => {
            let meta = normalize_site_config(doc);
            vec![
                Write::text(Target::PageTitle, meta.title),
                Write::attribute(Target::MetaDescription, "content", meta.description),
                Write::attribute(Target::MetaAuthor, "content", meta.author),
            ]
        }

        Document::Navigation(doc) => {
            let view = normalize_navigation(doc);
            let menu = fragments.render(markup::NAV_MENU, context! { menu => view.menu })?;
            vec![
                Write::text(Target::NavBrand, view.brand),
                Write::markup(Target::NavMenu, menu),
            ]
        }

        Document::Hero(doc) => {
            let view = normalize_hero(doc);
            let cta = fragments.render(markup::HERO_CTA, context! { buttons => view.cta })?;
            let stats = fragments.render(markup::HERO_STATS, context! { stats => view.stats })?;

            let mut writes = vec![
                Write::text(Target::HeroGreeting, view.greeting),
                Write::text(Target::HeroName, view.name),
                Write::text(Target::HeroTitle, view.title),
                Write::text(Target::HeroTagline, view.tagline),
                Write::text(Target::HeroDescription, view.description),
                Write::markup(Target::HeroCta, cta),
            ];
            if let Some(links) = view.social {
                let social = fragments.render(markup::SOCIAL_LINKS, context! { links => links })?;
                writes.push(Write::markup(Target::HeroSocial, social));
            }
            writes.push(Write::markup(Target::HeroStats, stats));
            writes
        }

        Document::About(doc) => {
            let view = normalize_about(doc);
            let content = fragments.render(
                markup::ABOUT_CONTENT,
                context! { paragraphs => view.paragraphs },
            )?;
            let highlights = fragments.render(
                markup::ABOUT_HIGHLIGHTS,
                context! { highlights => view.highlights },
            )?;
            vec![
                Write::text(Target::AboutTitle, view.title),
                Write::markup(Target::AboutContent, content),
                Write::markup(Target::AboutHighlights, highlights),
            ]
        }

        Document::Projects(doc) => {
            let view = normalize_projects(doc);
            let mut writes = vec![Write::text(Target::WorkTitle, view.title)];
            // An empty collection keeps the grid's placeholder.
            if !view.projects.is_empty() {
                let grid =
                    fragments.render(markup::WORK_GRID, context! { projects => view.projects })?;
                writes.push(Write::markup(Target::WorkGrid, grid));
            }
            writes
        }

        Document::Skills(doc) => {
            let view = normalize_skills(doc);
            let grid = fragments.render(
                markup::SKILLS_GRID,
                context! { categories => view.categories },
            )?;
            vec![
                Write::text(Target::SkillsTitle, view.title),
                Write::markup(Target::SkillsGrid, grid),
            ]
        }

        Document::Contact(doc) => {
            let view = normalize_contact(doc);
            let info = fragments.render(
                markup::CONTACT_INFO,
                context! {
                    email => view.email,
                    location => view.location,
                    availability => view.availability,
                },
            )?;
            let social =
                fragments.render(markup::SOCIAL_LINKS, context! { links => view.social })?;
            vec![
                Write::text(Target::ContactTitle, view.title),
                Write::text(Target::ContactSubtitle, view.subtitle),
                Write::markup(Target::ContactInfo, info),
                Write::markup(Target::ContactSocial, social),
            ]
        }

        Document::Footer(doc) => {
            let view = normalize_footer(doc);
            let links = fragments.render(markup::FOOTER_LINKS, context! { links => view.links })?;
            vec![
                Write::text(Target::FooterText, view.text),
                Write::text(Target::FooterCopyright, view.copyright),
                Write::markup(Target::FooterLinks, links),
            ]
        }

        Document::Opaque(_, _) => Vec::new(),
    };

    Ok(writes)
}
