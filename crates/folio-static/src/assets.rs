//! Asset pipeline for CSS and JavaScript processing.

use folio_render::behaviors::{BACK_TO_TOP_OFFSET, REVEAL_ROOT_MARGIN_PX, REVEAL_THRESHOLD};

/// Output path of the behaviors script, relative to the site root.
pub const BEHAVIORS_SCRIPT_PATH: &str = "assets/folio.js";

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the default portfolio stylesheet.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the UI behaviors script (nav toggle, scroll reveal, back-to-top).
    pub fn generate_js() -> String {
        BEHAVIORS_JS
            .replace("__THRESHOLD__", &REVEAL_THRESHOLD.to_string())
            .replace("__ROOT_MARGIN__", &REVEAL_ROOT_MARGIN_PX.to_string())
            .replace("__BACK_TO_TOP__", &BACK_TO_TOP_OFFSET.to_string())
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const BEHAVIORS_JS: &str = r#"// Page behaviors, wired once the rendered content is in place.
(function () {
  function initializeNavigation() {
    var navToggle = document.getElementById('nav-toggle');
    var navMenu = document.getElementById('nav-menu');
    if (!navToggle || !navMenu) return;
    navToggle.addEventListener('click', function () {
      navMenu.classList.toggle('active');
    });
    document.querySelectorAll('.nav-link').forEach(function (link) {
      link.addEventListener('click', function () {
        navMenu.classList.remove('active');
      });
    });
  }

  function initializeScrollEffects() {
    if (!('IntersectionObserver' in window)) return;
    var observer = new IntersectionObserver(function (entries) {
      entries.forEach(function (entry) {
        if (entry.isIntersecting) entry.target.classList.add('visible');
      });
    }, { threshold: __THRESHOLD__, rootMargin: '__ROOT_MARGIN__px' });
    document.querySelectorAll('section').forEach(function (section) {
      observer.observe(section);
    });
  }

  function initializeBackToTop() {
    var backToTop = document.getElementById('back-to-top');
    if (!backToTop) return;
    window.addEventListener('scroll', function () {
      backToTop.style.display = window.scrollY > __BACK_TO_TOP__ ? 'flex' : 'none';
    });
    backToTop.addEventListener('click', function () {
      window.scrollTo({ top: 0, behavior: 'smooth' });
    });
  }

  function initialize() {
    initializeNavigation();
    initializeScrollEffects();
    initializeBackToTop();
  }

  if (document.readyState === 'loading') {
    document.addEventListener('DOMContentLoaded', initialize);
  } else {
    initialize();
  }
})();
"#;

const DEFAULT_CSS: &str = r#"/* Portfolio theme */

:root {
  --background: #0b0d12;
  --surface: #141821;
  --foreground: #e6e8ee;
  --muted: #8a93a6;
  --accent: #7c5cff;
  --radius: 0.75rem;
  --content-max-width: 1100px;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

html {
  scroll-behavior: smooth;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

a {
  color: inherit;
}

.container {
  max-width: var(--content-max-width);
  margin: 0 auto;
  padding: 0 1.5rem;
}

/* Navigation */
.navbar {
  position: sticky;
  top: 0;
  z-index: 10;
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 1rem 1.5rem;
  background: rgba(11, 13, 18, 0.85);
  backdrop-filter: blur(8px);
}

.nav-brand {
  font-weight: 700;
  font-size: 1.25rem;
}

.nav-menu {
  display: flex;
  gap: 1.5rem;
  list-style: none;
}

.nav-link {
  text-decoration: none;
  color: var(--muted);
  transition: color 0.15s;
}

.nav-link:hover {
  color: var(--foreground);
}

.nav-toggle {
  display: none;
  background: none;
  border: 0;
  color: var(--foreground);
  font-size: 1.5rem;
  cursor: pointer;
}

/* Sections */
section {
  padding: 6rem 0;
  opacity: 0;
  transform: translateY(24px);
  transition: opacity 0.6s ease, transform 0.6s ease;
}

section.visible {
  opacity: 1;
  transform: none;
}

.section-title {
  font-size: 2rem;
  margin-bottom: 2rem;
}

/* Hero */
.hero-greeting {
  color: var(--accent);
  font-weight: 600;
}

.hero-name {
  font-size: 3.5rem;
  line-height: 1.1;
}

.hero-title {
  font-size: 1.5rem;
  color: var(--muted);
}

.hero-cta {
  display: flex;
  gap: 1rem;
  margin: 2rem 0;
}

.btn {
  display: inline-block;
  padding: 0.75rem 1.5rem;
  border-radius: var(--radius);
  text-decoration: none;
  font-weight: 600;
}

.btn-primary {
  background: var(--accent);
  color: #fff;
}

.btn-secondary {
  border: 1px solid var(--muted);
}

.social-link {
  margin-right: 1rem;
  font-size: 1.25rem;
  color: var(--muted);
}

.hero-stats {
  display: flex;
  gap: 3rem;
}

.stat-number {
  display: block;
  font-size: 2rem;
  font-weight: 700;
}

.stat-label {
  color: var(--muted);
}

/* Cards */
.highlight-card,
.work-card,
.skill-category {
  background: var(--surface);
  border-radius: var(--radius);
  padding: 1.5rem;
}

.about-highlights,
.work-grid,
.skills-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
  gap: 1.5rem;
}

.work-image {
  height: 180px;
  border-radius: var(--radius);
  background-size: cover;
  background-position: center;
  position: relative;
}

.work-icon {
  position: absolute;
  right: 1rem;
  bottom: 1rem;
}

.work-category {
  color: var(--accent);
  font-size: 0.875rem;
  margin-top: 1rem;
}

.tag,
.skill-tag {
  display: inline-block;
  margin: 0.25rem 0.25rem 0 0;
  padding: 0.25rem 0.75rem;
  border-radius: 999px;
  background: rgba(124, 92, 255, 0.15);
  font-size: 0.8rem;
}

.contact-item {
  margin-bottom: 0.75rem;
}

footer {
  padding: 2rem 0;
  text-align: center;
  color: var(--muted);
}

.footer-links a {
  margin: 0 0.5rem;
}

.back-to-top {
  position: fixed;
  right: 1.5rem;
  bottom: 1.5rem;
  width: 3rem;
  height: 3rem;
  align-items: center;
  justify-content: center;
  border-radius: 50%;
  border: 0;
  background: var(--accent);
  color: #fff;
  cursor: pointer;
}

@media (max-width: 768px) {
  .nav-toggle {
    display: block;
  }

  .nav-menu {
    display: none;
    position: absolute;
    top: 100%;
    left: 0;
    right: 0;
    flex-direction: column;
    padding: 1rem 1.5rem;
    background: var(--surface);
  }

  .nav-menu.active {
    display: flex;
  }

  .hero-name {
    font-size: 2.5rem;
  }
}
"#;
