//! Scaffold a portfolio site.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio_content::Section;
use folio_static::{AssetPipeline, HostPageContext, TemplateEngine};

use crate::config::ConfigFile;

/// Run the init command.
pub async fn run(
    config_path: &Path,
    config: &ConfigFile,
    yes: bool,
    title: Option<String>,
) -> Result<()> {
    tracing::info!("Initializing folio...");

    let title = title.unwrap_or_else(|| config.site.title.clone());
    let site_dir = config.site_dir();

    if site_dir.exists() && !yes {
        tracing::warn!(
            "{}/ directory already exists. Use --yes to overwrite.",
            site_dir.display()
        );
        return Ok(());
    }

    if !config_path.exists() || yes {
        fs::write(config_path, default_config(&config.site.dir, &title))
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    }

    for path in scaffold(&site_dir, &config.site.page, &title)? {
        tracing::info!("Created {}", path.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'folio dev' to start the development server.");

    Ok(())
}

/// Write the host page, stylesheet and one sample document per section.
fn scaffold(site_dir: &Path, page: &str, title: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let engine = TemplateEngine::new();
    let host = engine
        .render_host_page(&HostPageContext {
            title: title.to_string(),
            ..Default::default()
        })
        .context("Failed to render host page")?;
    files.push(write_file(&site_dir.join(page), &host)?);

    files.push(write_file(
        &site_dir.join("css/style.css"),
        &AssetPipeline::generate_css(),
    )?);

    for section in Section::ALL {
        let body = sample_document(section, title)?;
        files.push(write_file(&site_dir.join(section.path()), &body)?);
    }

    Ok(files)
}

fn write_file(path: &Path, contents: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path.to_path_buf())
}

fn default_config(site_dir: &str, title: &str) -> String {
    format!(
        r#"# folio configuration

[site]
# Host page, data/ documents and static assets
dir = {}

# Host page within the site directory
page = "index.html"

# Output directory for built site
output = "dist"

# Site title used by scaffolding
title = {}

[source]
# Fetch section documents over HTTP instead of from the site directory
# base_url = "https://example.com/"

[build]
# Minify CSS
minify = true

# Emit and link the UI behaviors script
behaviors = true
"#,
        quoted(site_dir),
        quoted(title)
    )
}

/// A quoted string literal valid in both JSON and TOML.
fn quoted(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn sample_document(section: Section, title: &str) -> Result<String> {
    let body = match section {
        Section::SiteConfig => serde_json::to_string_pretty(&serde_json::json!({
            "title": title,
            "description": "Personal portfolio",
            "author": title,
        }))?,
        Section::Navigation => SAMPLE_NAVIGATION.to_string(),
        Section::Hero => SAMPLE_HERO.to_string(),
        Section::About => SAMPLE_ABOUT.to_string(),
        Section::Experience => SAMPLE_EXPERIENCE.to_string(),
        Section::Projects => SAMPLE_PROJECTS.to_string(),
        Section::Skills => SAMPLE_SKILLS.to_string(),
        Section::Education => SAMPLE_EDUCATION.to_string(),
        Section::Contact => SAMPLE_CONTACT.to_string(),
        Section::Footer => SAMPLE_FOOTER.to_string(),
    };
    Ok(body)
}

const SAMPLE_NAVIGATION: &str = r##"{
  "brand": { "name": "Your Name" },
  "menuItems": [
    { "href": "#about", "text": "About" },
    { "href": "#work", "text": "Work" },
    { "href": "#skills", "text": "Skills" },
    { "href": "#contact", "text": "Contact" }
  ]
}
"##;

const SAMPLE_HERO: &str = r##"{
  "greeting": "Hello, I'm",
  "name": "Your Name",
  "title": "Software Engineer",
  "summary": "I build reliable systems and tools.",
  "description": "A few sentences about what you do and what you care about.",
  "cta": {
    "buttons": [
      { "href": "#work", "text": "View Work", "type": "primary" },
      { "href": "#contact", "text": "Get in Touch", "type": "secondary" }
    ]
  },
  "socialLinks": [
    { "url": "https://github.com/", "platform": "GitHub", "icon": "fab fa-github" },
    { "url": "https://www.linkedin.com/", "platform": "LinkedIn", "icon": "fab fa-linkedin" }
  ],
  "highlights": [
    { "number": "5+", "label": "Years Experience" },
    { "number": 20, "label": "Projects Shipped" }
  ]
}
"##;

const SAMPLE_ABOUT: &str = r##"{
  "sectionTitle": "About Me",
  "content": [
    "Write a short introduction here.",
    "Add a second paragraph about your background."
  ],
  "highlights": [
    { "icon": "fas fa-code", "title": "Engineering", "description": "Backend services and tooling." },
    { "icon": "fas fa-users", "title": "Collaboration", "description": "Working across teams." }
  ]
}
"##;

const SAMPLE_EXPERIENCE: &str = r##"{
  "sectionTitle": "Experience",
  "positions": [
    { "company": "Company", "role": "Engineer", "period": "2020 - Present" }
  ]
}
"##;

const SAMPLE_PROJECTS: &str = r##"{
  "sectionTitle": "Featured Work",
  "projects": [
    {
      "image": "images/project.png",
      "icon": "fas fa-rocket",
      "category": "Open Source",
      "title": "Project One",
      "description": "What the project does and why it matters.",
      "technologies": ["Rust", "Tokio"]
    }
  ]
}
"##;

const SAMPLE_SKILLS: &str = r##"{
  "sectionTitle": "Skills",
  "categories": [
    { "icon": "fas fa-server", "name": "Backend", "skills": ["Rust", "PostgreSQL"] },
    { "icon": "fas fa-tools", "name": "Tooling", "skills": ["Git", "Docker"] }
  ]
}
"##;

const SAMPLE_EDUCATION: &str = r##"{
  "sectionTitle": "Education",
  "degrees": [
    { "school": "University", "degree": "B.Sc. Computer Science", "year": "2019" }
  ]
}
"##;

const SAMPLE_CONTACT: &str = r##"{
  "sectionTitle": "Get in Touch",
  "subtitle": "Open to new opportunities.",
  "email": "you@example.com",
  "location": "Your City",
  "availability": "Available for freelance work",
  "socialLinks": [
    { "url": "https://github.com/", "platform": "GitHub", "icon": "fab fa-github" }
  ]
}
"##;

const SAMPLE_FOOTER: &str = r##"{
  "text": "Built with folio.",
  "copyright": "All rights reserved.",
  "links": [
    { "href": "#hero", "text": "Back to top" }
  ]
}
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use folio_content::parse_document;
    use folio_render::{App, DirSource, HostDocument, Selector};
    use tempfile::tempdir;

    #[test]
    fn samples_parse_for_every_section() {
        for section in Section::ALL {
            let body = sample_document(section, "Jane \"JD\" Doe").unwrap();
            let parsed = parse_document(section, body.as_bytes());
            assert!(parsed.is_ok(), "{}: {:?}", section, parsed.err());
        }
    }

    #[test]
    fn config_template_round_trips() {
        let toml = default_config("site", "Jane \"JD\" Doe");

        let config: ConfigFile = toml::from_str(&toml).unwrap();

        assert_eq!(config.site.title, "Jane \"JD\" Doe");
        assert_eq!(config.site.dir, "site");
        assert!(config.source.base_url.is_none());
    }

    #[tokio::test]
    async fn scaffold_renders_cleanly() {
        let temp = tempdir().unwrap();
        let site = temp.path().join("site");

        let files = scaffold(&site, "index.html", "Jane Doe").unwrap();
        assert_eq!(files.len(), 12);

        let html = fs::read_to_string(site.join("index.html")).unwrap();
        let rendered = App::new(Arc::new(DirSource::new(&site)))
            .run(HostDocument::parse(html))
            .await;

        assert!(rendered.report().is_clean());
        assert_eq!(rendered.report().rendered(), 8);
        assert!(rendered.behaviors().is_some());

        let document = rendered.document();
        assert_eq!(document.inner_html(Selector::Tag("title", 0)), Some("Jane Doe"));
        assert_eq!(document.text_content("nav-brand").as_deref(), Some("Your Name"));
        assert!(document
            .inner_html("work-grid")
            .is_some_and(|grid| grid.contains("Project One")));
    }
}
