//! Template engine for scaffolding host pages.
//!
//! The scaffold carries every element the section loaders and UI behaviors
//! address, each with placeholder content that stays visible when a loader
//! fails.

use folio_render::escape_html;
use minijinja::{context, AutoEscape, Environment};

/// Context for rendering the host page scaffold.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HostPageContext {
    /// Initial document title, replaced by the site config loader
    pub title: String,
    /// Initial meta description
    pub description: String,
    /// Initial meta author
    pub author: String,
    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,
    /// Behaviors script to link, if any
    pub script: Option<String>,
}

impl Default for HostPageContext {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: String::new(),
            author: String::new(),
            styles: vec!["css/style.css".to_string()],
            script: None,
        }
    }
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with default templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("e", |value: String| escape_html(&value));

        env.add_template_owned("host.html".to_string(), HOST_TEMPLATE.to_string())
            .expect("Failed to add host template");

        env.add_template_owned("sections.html".to_string(), SECTIONS_TEMPLATE.to_string())
            .expect("Failed to add sections template");

        Self { env }
    }

    /// Render the host page scaffold.
    pub fn render_host_page(&self, context: &HostPageContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("host.html")?;

        tmpl.render(context! {
            title => &context.title,
            description => &context.description,
            author => &context.author,
            styles => &context.styles,
            script => &context.script,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const HOST_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="description" content="{{ description | e }}">
  <meta name="author" content="{{ author | e }}">
  <title>{{ title | e }}</title>
  {% for style in styles %}<link rel="stylesheet" href="{{ style | e }}">
  {% endfor %}
</head>
<body>
  <nav class="navbar">
    <a href="#hero" class="nav-brand" id="nav-brand">{{ title | e }}</a>
    <button class="nav-toggle" id="nav-toggle" aria-label="Toggle navigation">&#9776;</button>
    <ul class="nav-menu" id="nav-menu"></ul>
  </nav>

  <main>
    {% include "sections.html" %}
  </main>

  <footer>
    <div class="container">
      <p id="footer-text"></p>
      <p id="footer-copyright"></p>
      <div class="footer-links" id="footer-links"></div>
    </div>
  </footer>

  <button class="back-to-top" id="back-to-top" aria-label="Back to top" style="display: none">&#8593;</button>
  {% if script %}<script src="{{ script | e }}" defer></script>
  {% endif %}
</body>
</html>
"##;

const SECTIONS_TEMPLATE: &str = r##"<section id="hero" class="hero">
      <div class="container">
        <p class="hero-greeting" id="hero-greeting">Hello, I'm</p>
        <h1 class="hero-name" id="hero-name">Your Name</h1>
        <h2 class="hero-title" id="hero-title">Your Title</h2>
        <p class="hero-tagline" id="hero-tagline"></p>
        <p class="hero-description" id="hero-description"></p>
        <div class="hero-cta" id="hero-cta"></div>
        <div class="hero-social" id="hero-social"></div>
        <div class="hero-stats" id="hero-stats"></div>
      </div>
    </section>

    <section id="about" class="about">
      <div class="container">
        <h2 class="section-title" id="about-title">About</h2>
        <div class="about-content" id="about-content"></div>
        <div class="about-highlights" id="about-highlights"></div>
      </div>
    </section>

    <section id="work" class="work">
      <div class="container">
        <h2 class="section-title" id="work-title">Featured Work</h2>
        <div class="work-grid" id="work-grid"><p>Projects are loading.</p></div>
      </div>
    </section>

    <section id="skills" class="skills">
      <div class="container">
        <h2 class="section-title" id="skills-title">Skills</h2>
        <div class="skills-grid" id="skills-grid"></div>
      </div>
    </section>

    <section id="contact" class="contact">
      <div class="container">
        <h2 class="section-title" id="contact-title">Contact</h2>
        <p class="contact-subtitle" id="contact-subtitle"></p>
        <div class="contact-info" id="contact-info"></div>
        <div class="contact-social" id="contact-social"></div>
      </div>
    </section>"##;

#[cfg(test)]
mod tests {
    use super::*;
    use folio_render::{HostDocument, RenderTargets};

    #[test]
    fn scaffold_resolves_every_target() {
        let engine = TemplateEngine::new();

        let html = engine.render_host_page(&HostPageContext::default()).unwrap();
        let targets = RenderTargets::resolve(&HostDocument::parse(html));

        assert_eq!(targets.missing(), vec![]);
    }

    #[test]
    fn renders_head_fields() {
        let engine = TemplateEngine::new();

        let html = engine
            .render_host_page(&HostPageContext {
                title: "Jane Doe".to_string(),
                author: "Jane".to_string(),
                ..Default::default()
            })
            .unwrap();

        assert!(html.contains("<title>Jane Doe</title>"));
        assert!(html.contains(r#"<meta name="author" content="Jane">"#));
        assert!(html.contains(r#"<link rel="stylesheet" href="css/style.css">"#));
    }

    #[test]
    fn links_script_only_when_requested() {
        let engine = TemplateEngine::new();

        let without = engine.render_host_page(&HostPageContext::default()).unwrap();
        let with = engine
            .render_host_page(&HostPageContext {
                script: Some("assets/folio.js".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert!(!without.contains("<script"));
        assert!(with.contains(r#"<script src="assets/folio.js" defer></script>"#));
    }

    #[test]
    fn scaffold_has_five_sections() {
        let engine = TemplateEngine::new();

        let html = engine.render_host_page(&HostPageContext::default()).unwrap();

        assert_eq!(HostDocument::parse(html).count("section"), 5);
    }
}
