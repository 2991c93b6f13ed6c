//! App bootstrap: run every section loader concurrently, then wire behaviors.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinSet;

use folio_content::Section;

use crate::behaviors::{Behaviors, Effect, UiEvent};
use crate::dom::HostDocument;
use crate::loader::{fetch_section, render_section, settle, LoadOutcome};
use crate::markup::Fragments;
use crate::targets::Page;
use crate::traits::ContentSource;

/// Renders a host page from a content source.
pub struct App {
    source: Arc<dyn ContentSource>,
    fragments: Fragments,
    sections: Vec<Section>,
}

impl App {
    /// Create an app running all ten section loaders.
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            fragments: Fragments::new(),
            sections: Section::ALL.to_vec(),
        }
    }

    /// Restrict the loaders that run.
    pub fn with_sections(mut self, sections: &[Section]) -> Self {
        self.sections = sections.to_vec();
        self
    }

    pub fn source(&self) -> &Arc<dyn ContentSource> {
        &self.source
    }

    /// Render `document`.
    ///
    /// Fetches are issued concurrently; each document is rendered as soon as
    /// its fetch completes. Behaviors are wired only once every loader has
    /// settled. A loader task that is lost (panic or cancellation) is logged
    /// and post-load initialization is skipped.
    pub async fn run(&self, document: HostDocument) -> RenderedPage {
        let start = Instant::now();
        let mut page = Page::new(document);

        tracing::debug!(
            "Loading {} sections from {}",
            self.sections.len(),
            self.source.describe()
        );

        let mut tasks = JoinSet::new();
        for &section in &self.sections {
            let source = Arc::clone(&self.source);
            tasks.spawn(async move {
                let fetched = fetch_section(source.as_ref(), section).await;
                (section, fetched)
            });
        }

        let mut outcomes = Vec::with_capacity(self.sections.len());
        let mut settled = true;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((section, fetched)) => {
                    let result = fetched
                        .and_then(|document| render_section(&mut page, &self.fragments, document));
                    outcomes.push(settle(section, result));
                }
                Err(e) => {
                    tracing::error!("Error initializing app: section loader lost: {}", e);
                    settled = false;
                }
            }
        }

        outcomes.sort_by_key(|outcome| outcome.section);

        let behaviors = if settled {
            Some(Behaviors::initialize(page.document()))
        } else {
            None
        };

        let report = BootstrapReport {
            outcomes,
            settled,
            duration: start.elapsed(),
        };

        RenderedPage {
            page,
            report,
            behaviors,
        }
    }
}

/// Aggregated loader outcomes for one render.
#[derive(Debug)]
pub struct BootstrapReport {
    /// One outcome per settled loader, in section order
    pub outcomes: Vec<LoadOutcome>,
    /// `false` when a loader task was lost before settling
    pub settled: bool,
    pub duration: Duration,
}

impl BootstrapReport {
    pub fn outcome(&self, section: Section) -> Option<&LoadOutcome> {
        self.outcomes.iter().find(|o| o.section == section)
    }

    /// Sections that wrote into the page.
    pub fn rendered(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(&o.result, Ok(report) if report.rendered))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &LoadOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    /// Every loader settled successfully.
    pub fn is_clean(&self) -> bool {
        self.settled && self.failed() == 0
    }
}

/// A host page after bootstrap.
#[derive(Debug)]
pub struct RenderedPage {
    page: Page,
    report: BootstrapReport,
    behaviors: Option<Behaviors>,
}

impl RenderedPage {
    pub fn document(&self) -> &HostDocument {
        self.page.document()
    }

    pub fn report(&self) -> &BootstrapReport {
        &self.report
    }

    /// `None` when post-load initialization was skipped.
    pub fn behaviors(&self) -> Option<&Behaviors> {
        self.behaviors.as_ref()
    }

    /// Deliver a UI event to the wired behaviors.
    pub fn dispatch(&mut self, event: &UiEvent) -> Vec<Effect> {
        match &self.behaviors {
            Some(behaviors) => behaviors.dispatch(self.page.document_mut(), event),
            None => Vec::new(),
        }
    }

    pub fn into_parts(self) -> (HostDocument, BootstrapReport) {
        (self.page.into_document(), self.report)
    }

    pub fn into_html(self) -> String {
        self.page.into_document().into_html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use crate::dom::Selector;
    use crate::loader::LoadError;
    use crate::source::MemorySource;
    use crate::targets::Target;
    use crate::traits::FetchError;

    const HOST: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Portfolio</title>
  <meta name="description" content="">
  <meta name="author" content="">
</head>
<body>
  <nav>
    <span id="nav-brand">Brand</span>
    <button id="nav-toggle">Menu</button>
    <ul id="nav-menu"></ul>
  </nav>
  <section id="hero">
    <p id="hero-greeting"></p><h1 id="hero-name"></h1><p id="hero-title"></p>
    <p id="hero-tagline"></p><p id="hero-description"></p>
    <div id="hero-cta"></div><div id="hero-social"></div><div id="hero-stats"></div>
  </section>
  <section id="about">
    <h2 id="about-title">About</h2><div id="about-content"></div><div id="about-highlights"></div>
  </section>
  <section id="work">
    <h2 id="work-title">Work</h2><div id="work-grid"></div>
  </section>
  <section id="skills">
    <h2 id="skills-title">Skills</h2><div id="skills-grid"></div>
  </section>
  <section id="contact">
    <h2 id="contact-title">Contact</h2><p id="contact-subtitle"></p>
    <div id="contact-info"></div><div id="contact-social"></div>
  </section>
  <footer>
    <p id="footer-text"></p><p id="footer-copyright"></p><div id="footer-links"></div>
  </footer>
  <button id="back-to-top" style="display: none">Top</button>
</body>
</html>"#;

    fn full_source() -> MemorySource {
        MemorySource::new()
            .with(
                "data/site-config.json",
                r#"{"title": "Jane Doe", "description": "Portfolio", "author": "Jane"}"#,
            )
            .with(
                "data/navigation.json",
                r##"{"brand": {"name": "JD"}, "menuItems": [{"href": "#about", "text": "About"}]}"##,
            )
            .with(
                "data/hero.json",
                r#"{"greeting": "Hi", "name": "Jane", "summary": "Engineer"}"#,
            )
            .with(
                "data/about.json",
                r#"{"sectionTitle": "About me", "content": ["One"], "highlights": []}"#,
            )
            .with("data/experience.json", r#"{"jobs": []}"#)
            .with("data/projects.json", r#"{"projects": [{"title": "X"}]}"#)
            .with(
                "data/skills.json",
                r#"{"sectionTitle": "Skills", "categories": [{"name": "Lang", "skills": ["Rust"]}]}"#,
            )
            .with("data/education.json", r#"{"degrees": []}"#)
            .with(
                "data/contact.json",
                r#"{"sectionTitle": "Say hi", "email": "j@x.io", "socialLinks": []}"#,
            )
            .with(
                "data/footer.json",
                r##"{"text": "Thanks", "copyright": "2024", "links": [{"href": "#top", "text": "Top"}]}"##,
            )
    }

    /// Inner markup of every target owned by a section other than `except`.
    fn foreign_targets(document: &HostDocument, except: Section) -> Vec<(Target, Option<String>)> {
        Target::ALL
            .into_iter()
            .filter(|t| t.owner().is_some() && t.owner() != Some(except))
            .map(|t| {
                let content = match t.selector() {
                    Selector::Meta(_) => document.attribute(t.selector(), "content"),
                    selector => document.inner_html(selector).map(str::to_string),
                };
                (t, content)
            })
            .collect()
    }

    #[tokio::test]
    async fn renders_every_section() {
        let app = App::new(Arc::new(full_source()));

        let rendered = app.run(HostDocument::parse(HOST)).await;
        let report = rendered.report();
        let doc = rendered.document();

        assert!(report.is_clean());
        assert_eq!(report.outcomes.len(), 10);
        assert_eq!(report.rendered(), 8);
        assert_eq!(doc.inner_html(Selector::Tag("title", 0)), Some("Jane Doe"));
        assert_eq!(doc.inner_html("nav-brand"), Some("JD"));
        assert_eq!(doc.inner_html("hero-description"), Some("Engineer"));
        assert_eq!(doc.inner_html("skills-title"), Some("Skills"));
        assert_eq!(doc.inner_html("footer-copyright"), Some("2024"));
        assert!(rendered.behaviors().is_some());
    }

    #[tokio::test]
    async fn failures_are_isolated_per_loader() {
        let healthy = App::new(Arc::new(full_source()))
            .run(HostDocument::parse(HOST))
            .await;

        for section in Section::ALL {
            let transport = full_source().fail(section.path(), "connection reset");
            let parse = full_source().with(section.path(), "{ truncated");

            for source in [transport, parse] {
                let rendered = App::new(Arc::new(source))
                    .run(HostDocument::parse(HOST))
                    .await;

                let outcome = rendered.report().outcome(section).unwrap();
                assert!(outcome.result.is_err(), "{} should fail", section);
                assert_eq!(rendered.report().failed(), 1);
                assert_eq!(
                    foreign_targets(rendered.document(), section),
                    foreign_targets(healthy.document(), section),
                    "failure in {} leaked into other sections",
                    section
                );
            }
        }
    }

    #[tokio::test]
    async fn offline_page_stays_scaffolded_and_interactive() {
        let app = App::new(Arc::new(MemorySource::new()));

        let mut rendered = app.run(HostDocument::parse(HOST)).await;

        assert_eq!(rendered.report().failed(), 10);
        assert!(rendered.report().settled);
        assert!(rendered
            .report()
            .failures()
            .all(|o| matches!(o.result, Err(LoadError::Transport { .. }))));
        assert_eq!(rendered.document().html(), HOST);

        let behaviors = rendered.behaviors().unwrap();
        assert!(behaviors.nav_toggle_enabled());
        assert!(behaviors.back_to_top_enabled());

        rendered.dispatch(&UiEvent::Click("nav-toggle".to_string()));
        rendered.dispatch(&UiEvent::Scroll { offset: 1200.0 });
        let effects = rendered.dispatch(&UiEvent::Click("back-to-top".to_string()));

        assert!(rendered.document().has_class("nav-menu", "active"));
        assert_eq!(
            rendered
                .document()
                .style_property("back-to-top", "display")
                .as_deref(),
            Some("flex")
        );
        assert_eq!(
            effects,
            vec![Effect::ScrollTo {
                top: 0.0,
                smooth: true
            }]
        );
    }

    #[tokio::test]
    async fn host_without_work_title_still_fills_grid() {
        let host = HOST.replace(r#"<h2 id="work-title">Work</h2>"#, "");
        let app = App::new(Arc::new(full_source()));

        let rendered = app.run(HostDocument::parse(host)).await;

        let projects = rendered.report().outcome(Section::Projects).unwrap();
        let report = projects.result.as_ref().unwrap();
        assert_eq!(report.skipped, vec![Target::WorkTitle]);
        assert!(rendered
            .document()
            .inner_html("work-grid")
            .unwrap()
            .contains("work-card"));
    }

    struct PanickingSource;

    #[async_trait]
    impl ContentSource for PanickingSource {
        fn describe(&self) -> String {
            "panicking".to_string()
        }

        async fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
            if path == Section::Hero.path() {
                panic!("loader bug");
            }
            Err(FetchError::NotFound(path.to_string()))
        }
    }

    #[tokio::test]
    async fn lost_loader_skips_behaviors() {
        let app = App::new(Arc::new(PanickingSource));

        let rendered = app.run(HostDocument::parse(HOST)).await;

        assert!(!rendered.report().settled);
        assert_eq!(rendered.report().outcomes.len(), 9);
        assert!(rendered.report().outcome(Section::Hero).is_none());
        assert!(rendered.behaviors().is_none());
    }

    #[tokio::test]
    async fn runs_selected_sections_only() {
        let app = App::new(Arc::new(full_source())).with_sections(&[Section::Footer]);

        let rendered = app.run(HostDocument::parse(HOST)).await;

        assert_eq!(rendered.report().outcomes.len(), 1);
        assert_eq!(rendered.document().inner_html("nav-brand"), Some("Brand"));
        assert_eq!(rendered.document().inner_html("footer-text"), Some("Thanks"));
    }
}
