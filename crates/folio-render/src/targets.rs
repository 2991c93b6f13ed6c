//! Render targets: logical names for the host elements the loaders fill.
//!
//! Targets are resolved against the host document once. Writes to a target
//! that did not resolve are skipped and recorded, so no loader ever checks for
//! element presence itself.

use std::collections::HashMap;

use folio_content::Section;

use crate::dom::{HostDocument, Selector};

/// One host element a loader or UI behavior writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    PageTitle,
    MetaDescription,
    MetaAuthor,
    NavBrand,
    NavMenu,
    NavToggle,
    HeroGreeting,
    HeroName,
    HeroTitle,
    HeroTagline,
    HeroDescription,
    HeroCta,
    HeroSocial,
    HeroStats,
    AboutTitle,
    AboutContent,
    AboutHighlights,
    WorkTitle,
    WorkGrid,
    SkillsTitle,
    SkillsGrid,
    ContactTitle,
    ContactSubtitle,
    ContactInfo,
    ContactSocial,
    FooterText,
    FooterCopyright,
    FooterLinks,
    BackToTop,
}

impl Target {
    pub const ALL: [Target; 29] = [
        Target::PageTitle,
        Target::MetaDescription,
        Target::MetaAuthor,
        Target::NavBrand,
        Target::NavMenu,
        Target::NavToggle,
        Target::HeroGreeting,
        Target::HeroName,
        Target::HeroTitle,
        Target::HeroTagline,
        Target::HeroDescription,
        Target::HeroCta,
        Target::HeroSocial,
        Target::HeroStats,
        Target::AboutTitle,
        Target::AboutContent,
        Target::AboutHighlights,
        Target::WorkTitle,
        Target::WorkGrid,
        Target::SkillsTitle,
        Target::SkillsGrid,
        Target::ContactTitle,
        Target::ContactSubtitle,
        Target::ContactInfo,
        Target::ContactSocial,
        Target::FooterText,
        Target::FooterCopyright,
        Target::FooterLinks,
        Target::BackToTop,
    ];

    /// How the target is found in the host document.
    pub fn selector(&self) -> Selector<'static> {
        match self {
            Self::PageTitle => Selector::Tag("title", 0),
            Self::MetaDescription => Selector::Meta("description"),
            Self::MetaAuthor => Selector::Meta("author"),
            other => Selector::Id(other.element_id().unwrap_or_default()),
        }
    }

    /// Element id for targets addressed by id.
    pub fn element_id(&self) -> Option<&'static str> {
        let id = match self {
            Self::PageTitle | Self::MetaDescription | Self::MetaAuthor => return None,
            Self::NavBrand => "nav-brand",
            Self::NavMenu => "nav-menu",
            Self::NavToggle => "nav-toggle",
            Self::HeroGreeting => "hero-greeting",
            Self::HeroName => "hero-name",
            Self::HeroTitle => "hero-title",
            Self::HeroTagline => "hero-tagline",
            Self::HeroDescription => "hero-description",
            Self::HeroCta => "hero-cta",
            Self::HeroSocial => "hero-social",
            Self::HeroStats => "hero-stats",
            Self::AboutTitle => "about-title",
            Self::AboutContent => "about-content",
            Self::AboutHighlights => "about-highlights",
            Self::WorkTitle => "work-title",
            Self::WorkGrid => "work-grid",
            Self::SkillsTitle => "skills-title",
            Self::SkillsGrid => "skills-grid",
            Self::ContactTitle => "contact-title",
            Self::ContactSubtitle => "contact-subtitle",
            Self::ContactInfo => "contact-info",
            Self::ContactSocial => "contact-social",
            Self::FooterText => "footer-text",
            Self::FooterCopyright => "footer-copyright",
            Self::FooterLinks => "footer-links",
            Self::BackToTop => "back-to-top",
        };
        Some(id)
    }

    /// Section whose loader owns the target. UI controls have no owner.
    pub fn owner(&self) -> Option<Section> {
        let section = match self {
            Self::PageTitle | Self::MetaDescription | Self::MetaAuthor => Section::SiteConfig,
            Self::NavBrand | Self::NavMenu => Section::Navigation,
            Self::HeroGreeting
            | Self::HeroName
            | Self::HeroTitle
            | Self::HeroTagline
            | Self::HeroDescription
            | Self::HeroCta
            | Self::HeroSocial
            | Self::HeroStats => Section::Hero,
            Self::AboutTitle | Self::AboutContent | Self::AboutHighlights => Section::About,
            Self::WorkTitle | Self::WorkGrid => Section::Projects,
            Self::SkillsTitle | Self::SkillsGrid => Section::Skills,
            Self::ContactTitle
            | Self::ContactSubtitle
            | Self::ContactInfo
            | Self::ContactSocial => Section::Contact,
            Self::FooterText | Self::FooterCopyright | Self::FooterLinks => Section::Footer,
            Self::NavToggle | Self::BackToTop => return None,
        };
        Some(section)
    }

    /// Human readable name for diagnostics.
    pub fn label(&self) -> String {
        match self {
            Self::PageTitle => "<title>".to_string(),
            Self::MetaDescription => "meta[name=description]".to_string(),
            Self::MetaAuthor => "meta[name=author]".to_string(),
            other => format!("#{}", other.element_id().unwrap_or_default()),
        }
    }
}

/// Proof that a target resolved to an element of the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetHandle {
    selector: Selector<'static>,
}

impl TargetHandle {
    pub fn selector(&self) -> Selector<'static> {
        self.selector
    }
}

/// Every target mapped to an optional handle, resolved once per page.
#[derive(Debug, Clone, Default)]
pub struct RenderTargets {
    handles: HashMap<Target, Option<TargetHandle>>,
}

impl RenderTargets {
    /// Resolve all targets against the host document.
    pub fn resolve(document: &HostDocument) -> Self {
        let handles = Target::ALL
            .into_iter()
            .map(|target| {
                let selector = target.selector();
                let handle = document
                    .contains(selector)
                    .then_some(TargetHandle { selector });
                (target, handle)
            })
            .collect();

        Self { handles }
    }

    pub fn get(&self, target: Target) -> Option<TargetHandle> {
        self.handles.get(&target).copied().flatten()
    }

    pub fn is_present(&self, target: Target) -> bool {
        self.get(target).is_some()
    }

    /// Targets absent from the host document, in declaration order.
    pub fn missing(&self) -> Vec<Target> {
        let mut missing: Vec<Target> = self
            .handles
            .iter()
            .filter(|(_, handle)| handle.is_none())
            .map(|(target, _)| *target)
            .collect();
        missing.sort();
        missing
    }
}

/// What to put into a target.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Escaped text content
    Text(String),
    /// Serialized markup fragment
    Markup(String),
    /// Attribute value on the element itself
    Attribute { name: &'static str, value: String },
}

/// A single pending write.
#[derive(Debug, Clone, PartialEq)]
pub struct Write {
    pub target: Target,
    pub content: Content,
}

impl Write {
    pub fn text(target: Target, text: impl Into<String>) -> Self {
        Self {
            target,
            content: Content::Text(text.into()),
        }
    }

    pub fn markup(target: Target, markup: impl Into<String>) -> Self {
        Self {
            target,
            content: Content::Markup(markup.into()),
        }
    }

    pub fn attribute(target: Target, name: &'static str, value: impl Into<String>) -> Self {
        Self {
            target,
            content: Content::Attribute {
                name,
                value: value.into(),
            },
        }
    }
}

/// Which writes of one render step landed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteReport {
    pub written: Vec<Target>,
    pub skipped: Vec<Target>,
}

/// The host document together with its resolved render targets.
#[derive(Debug, Clone)]
pub struct Page {
    document: HostDocument,
    targets: RenderTargets,
}

impl Page {
    /// Wrap a host document, resolving its targets.
    pub fn new(document: HostDocument) -> Self {
        let targets = RenderTargets::resolve(&document);
        Self { document, targets }
    }

    pub fn document(&self) -> &HostDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut HostDocument {
        &mut self.document
    }

    pub fn into_document(self) -> HostDocument {
        self.document
    }

    pub fn targets(&self) -> &RenderTargets {
        &self.targets
    }

    /// Apply writes in order, skipping targets that did not resolve.
    pub fn apply(&mut self, writes: Vec<Write>) -> WriteReport {
        let mut report = WriteReport::default();

        for write in writes {
            let Some(handle) = self.targets.get(write.target) else {
                tracing::debug!("{} not in host document, skipped", write.target.label());
                report.skipped.push(write.target);
                continue;
            };

            let selector = handle.selector();
            let landed = match &write.content {
                Content::Text(text) => self.document.set_text(selector, text),
                Content::Markup(markup) => self.document.set_inner_html(selector, markup),
                Content::Attribute { name, value } => {
                    self.document.set_attribute(selector, name, value)
                }
            };

            if landed {
                report.written.push(write.target);
            } else {
                tracing::debug!("{} cannot hold content, skipped", write.target.label());
                report.skipped.push(write.target);
            }
        }

        report
    }
}
