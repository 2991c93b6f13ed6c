//! Raw content document shapes.
//!
//! These structs mirror the JSON as authored, including the keys of older
//! schema generations. Optional fields stay `Option` here; choosing between
//! historical keys happens in [`crate::normalize`].

use std::fmt;

use serde::{Deserialize, Deserializer};

/// `data/site-config.json`: page metadata.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SiteConfig {
    #[serde(default, deserialize_with = "display_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub author: Option<String>,
}

/// `data/navigation.json`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NavigationDocument {
    pub brand: Brand,
    pub menu_items: Vec<Link>,
}

/// Site brand shown in the navigation bar.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Brand {
    #[serde(deserialize_with = "required_display_text")]
    pub name: String,
}

/// A plain hyperlink (navigation menu and footer).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Link {
    pub href: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub text: Option<String>,
}

/// `data/hero.json`. Two schema generations coexist:
///
/// - old: `tagline`, bare `cta` array, `stats` keyed by `text`
/// - new: `summary`, `cta.buttons`, `highlights` keyed by `number`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeroDocument {
    #[serde(default, deserialize_with = "display_text")]
    pub greeting: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub tagline: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub description: Option<String>,
    pub cta: Option<CtaField>,
    pub social_links: Option<Vec<SocialLink>>,
    pub highlights: Option<Vec<StatEntry>>,
    pub stats: Option<Vec<StatEntry>>,
}

/// Call-to-action buttons, either bare or nested under `buttons`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CtaField {
    Bare(Vec<CtaButton>),
    Nested(CtaGroup),
    /// Anything else renders no buttons.
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CtaGroup {
    pub buttons: Option<Vec<CtaButton>>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CtaButton {
    pub href: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub text: Option<String>,
    /// Button style, e.g. `primary` or `secondary`
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// A link to a social profile, rendered as an icon.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SocialLink {
    pub url: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub platform: Option<String>,
    pub icon: Option<String>,
}

/// A hero stat. Old documents key the figure by `text`, new ones by `number`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct StatEntry {
    pub number: Option<Scalar>,
    pub text: Option<Scalar>,
    #[serde(default, deserialize_with = "display_text")]
    pub label: Option<String>,
}

/// A JSON scalar that is displayed as text.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl Scalar {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Flag(b) => write!(f, "{}", b),
        }
    }
}

/// Reads a displayed text field. Numbers and booleans are kept as their
/// JSON text, so `"copyright": 2024` shows `2024`.
fn display_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| value.to_string()))
}

fn required_display_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Scalar::deserialize(deserializer)?.to_string())
}

/// `data/about.json`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AboutDocument {
    #[serde(default, deserialize_with = "display_text")]
    pub section_title: Option<String>,
    /// Ordered paragraphs
    pub content: Vec<String>,
    pub highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Highlight {
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub description: Option<String>,
}

/// `data/projects.json`. Older documents use `items` and per-item `tags`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsDocument {
    #[serde(default, deserialize_with = "display_text")]
    pub section_title: Option<String>,
    pub projects: Option<Vec<ProjectItem>>,
    pub items: Option<Vec<ProjectItem>>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ProjectItem {
    pub image: Option<String>,
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

/// `data/skills.json`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkillsDocument {
    #[serde(default, deserialize_with = "display_text")]
    pub section_title: Option<String>,
    pub categories: Vec<SkillCategory>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SkillCategory {
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub name: Option<String>,
    pub skills: Vec<String>,
}

/// `data/contact.json`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactDocument {
    #[serde(default, deserialize_with = "display_text")]
    pub section_title: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub availability: Option<String>,
    pub social_links: Vec<SocialLink>,
}

/// `data/footer.json`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FooterDocument {
    #[serde(default, deserialize_with = "display_text")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub copyright: Option<String>,
    pub links: Vec<Link>,
}
