//! Shape normalization.
//!
//! Every content document collapses into one canonical view before rendering.
//! When several historical keys could supply a value, the preferred key wins
//! if it is present and non-empty; otherwise the next key in order is tried;
//! when all are absent the value is an empty string or empty list.

use serde::Serialize;

use crate::document::{
    AboutDocument, ContactDocument, CtaButton, CtaField, FooterDocument, HeroDocument, Link,
    NavigationDocument, ProjectItem, ProjectsDocument, Scalar, SiteConfig, SkillsDocument,
    SocialLink, StatEntry,
};

/// Projects section title used when the document has none.
pub const DEFAULT_WORK_TITLE: &str = "Featured Work";

/// Page metadata.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SiteMeta {
    pub title: String,
    pub description: String,
    pub author: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct LinkView {
    pub href: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct NavigationView {
    pub brand: String,
    pub menu: Vec<LinkView>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ButtonView {
    pub href: String,
    pub text: String,
    pub kind: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SocialView {
    pub url: String,
    pub platform: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct StatView {
    pub number: String,
    pub label: String,
}

/// Canonical hero banner.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct HeroView {
    pub greeting: String,
    pub name: String,
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub cta: Vec<ButtonView>,
    /// `None` when the document has no social links at all; the target then
    /// keeps its placeholder.
    pub social: Option<Vec<SocialView>>,
    pub stats: Vec<StatView>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct HighlightView {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AboutView {
    pub title: String,
    pub paragraphs: Vec<String>,
    pub highlights: Vec<HighlightView>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ProjectView {
    pub image: String,
    pub icon: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ProjectsView {
    pub title: String,
    pub projects: Vec<ProjectView>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CategoryView {
    pub icon: String,
    pub name: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SkillsView {
    pub title: String,
    pub categories: Vec<CategoryView>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ContactView {
    pub title: String,
    pub subtitle: String,
    pub email: String,
    pub location: String,
    pub availability: String,
    pub social: Vec<SocialView>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FooterView {
    pub text: String,
    pub copyright: String,
    pub links: Vec<LinkView>,
}

/// First present, non-empty string among the candidates.
fn pick_text<const N: usize>(candidates: [Option<String>; N]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// First present, non-empty list among the candidates.
fn pick_list<T, const N: usize>(candidates: [Option<Vec<T>>; N]) -> Vec<T> {
    candidates
        .into_iter()
        .flatten()
        .find(|v| !v.is_empty())
        .unwrap_or_default()
}

/// First candidate that is present and non-empty. Only an empty string
/// counts as empty: `0` and `false` are displayed.
fn pick_scalar<const N: usize>(candidates: [Option<Scalar>; N]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

fn link_view(link: Link) -> LinkView {
    LinkView {
        href: link.href.unwrap_or_default(),
        text: link.text.unwrap_or_default(),
    }
}

fn social_view(link: SocialLink) -> SocialView {
    SocialView {
        url: link.url.unwrap_or_default(),
        platform: link.platform.unwrap_or_default(),
        icon: link.icon.unwrap_or_default(),
    }
}

fn button_view(button: CtaButton) -> ButtonView {
    ButtonView {
        href: button.href.unwrap_or_default(),
        text: button.text.unwrap_or_default(),
        kind: button.kind.unwrap_or_default(),
    }
}

fn stat_view(stat: StatEntry) -> StatView {
    StatView {
        number: pick_scalar([stat.number, stat.text]),
        label: stat.label.unwrap_or_default(),
    }
}

pub fn normalize_site_config(doc: SiteConfig) -> SiteMeta {
    SiteMeta {
        title: doc.title.unwrap_or_default(),
        description: doc.description.unwrap_or_default(),
        author: doc.author.unwrap_or_default(),
    }
}

pub fn normalize_navigation(doc: NavigationDocument) -> NavigationView {
    NavigationView {
        brand: doc.brand.name,
        menu: doc.menu_items.into_iter().map(link_view).collect(),
    }
}

/// Collapse both hero schema generations.
pub fn normalize_hero(doc: HeroDocument) -> HeroView {
    let tagline = pick_text([doc.summary, doc.tagline]);
    let description = pick_text([doc.description, Some(tagline.clone())]);

    // A bare array is only consulted when there is no `buttons` key, which
    // the two variants already guarantee.
    let cta = match doc.cta {
        Some(CtaField::Nested(group)) => group.buttons.unwrap_or_default(),
        Some(CtaField::Bare(buttons)) => buttons,
        Some(CtaField::Other(_)) | None => Vec::new(),
    };

    HeroView {
        greeting: doc.greeting.unwrap_or_default(),
        name: doc.name.unwrap_or_default(),
        title: doc.title.unwrap_or_default(),
        tagline,
        description,
        cta: cta.into_iter().map(button_view).collect(),
        social: doc
            .social_links
            .map(|links| links.into_iter().map(social_view).collect()),
        stats: pick_list([doc.highlights, doc.stats])
            .into_iter()
            .map(stat_view)
            .collect(),
    }
}

pub fn normalize_about(doc: AboutDocument) -> AboutView {
    AboutView {
        title: doc.section_title.unwrap_or_default(),
        paragraphs: doc.content,
        highlights: doc
            .highlights
            .into_iter()
            .map(|h| HighlightView {
                icon: h.icon.unwrap_or_default(),
                title: h.title.unwrap_or_default(),
                description: h.description.unwrap_or_default(),
            })
            .collect(),
    }
}

fn project_view(item: ProjectItem) -> ProjectView {
    ProjectView {
        image: item.image.unwrap_or_default(),
        icon: item.icon.unwrap_or_default(),
        category: item.category.unwrap_or_default(),
        title: item.title.unwrap_or_default(),
        description: item.description.unwrap_or_default(),
        tags: pick_list([item.technologies, item.tags]),
    }
}

/// Collapse `projects`/`items` and `technologies`/`tags`.
pub fn normalize_projects(doc: ProjectsDocument) -> ProjectsView {
    ProjectsView {
        title: pick_text([doc.section_title, Some(DEFAULT_WORK_TITLE.to_string())]),
        projects: pick_list([doc.projects, doc.items])
            .into_iter()
            .map(project_view)
            .collect(),
    }
}

pub fn normalize_skills(doc: SkillsDocument) -> SkillsView {
    SkillsView {
        title: doc.section_title.unwrap_or_default(),
        categories: doc
            .categories
            .into_iter()
            .map(|c| CategoryView {
                icon: c.icon.unwrap_or_default(),
                name: c.name.unwrap_or_default(),
                skills: c.skills,
            })
            .collect(),
    }
}

pub fn normalize_contact(doc: ContactDocument) -> ContactView {
    ContactView {
        title: doc.section_title.unwrap_or_default(),
        subtitle: doc.subtitle.unwrap_or_default(),
        email: doc.email.unwrap_or_default(),
        location: doc.location.unwrap_or_default(),
        availability: doc.availability.unwrap_or_default(),
        social: doc.social_links.into_iter().map(social_view).collect(),
    }
}

pub fn normalize_footer(doc: FooterDocument) -> FooterView {
    FooterView {
        text: doc.text.unwrap_or_default(),
        copyright: doc.copyright.unwrap_or_default(),
        links: doc.links.into_iter().map(link_view).collect(),
    }
}
