//! The fixed catalogue of page sections and where their documents live.

use std::fmt;

/// One independently data-driven area of the portfolio page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    SiteConfig,
    Navigation,
    Hero,
    About,
    Experience,
    Projects,
    Skills,
    Education,
    Contact,
    Footer,
}

impl Section {
    /// Every section, in page bootstrap order.
    pub const ALL: [Section; 10] = [
        Section::SiteConfig,
        Section::Navigation,
        Section::Hero,
        Section::About,
        Section::Experience,
        Section::Projects,
        Section::Skills,
        Section::Education,
        Section::Contact,
        Section::Footer,
    ];

    /// Short kebab-case name, also the document file stem.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SiteConfig => "site-config",
            Self::Navigation => "navigation",
            Self::Hero => "hero",
            Self::About => "about",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Education => "education",
            Self::Contact => "contact",
            Self::Footer => "footer",
        }
    }

    /// Relative resource path of the section's document.
    pub fn path(&self) -> &'static str {
        match self {
            Self::SiteConfig => "data/site-config.json",
            Self::Navigation => "data/navigation.json",
            Self::Hero => "data/hero.json",
            Self::About => "data/about.json",
            Self::Experience => "data/experience.json",
            Self::Projects => "data/projects.json",
            Self::Skills => "data/skills.json",
            Self::Education => "data/education.json",
            Self::Contact => "data/contact.json",
            Self::Footer => "data/footer.json",
        }
    }

    /// Whether the section writes anything into the page.
    ///
    /// Experience and education documents are loaded but reserved for future
    /// sections.
    pub fn is_rendered(&self) -> bool {
        !matches!(self, Self::Experience | Self::Education)
    }

    /// Look up a section by its document path.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_start_matches("./").trim_start_matches('/');
        Self::ALL.into_iter().find(|s| s.path() == path)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
