//! Markup fragments for each section, rendered with minijinja.
//!
//! Auto-escaping is switched off and every interpolation goes through the
//! `e` filter explicitly, so the fragments escape exactly the characters the
//! host page expects and nothing more.
//!
//! About paragraphs are the one exception: they are authored as inline HTML
//! (`I love <strong>Rust</strong>`) and are inserted unescaped.

use minijinja::{AutoEscape, Environment};
use serde::Serialize;

use crate::dom::escape_html;

/// Template engine holding the section fragment templates.
pub struct Fragments {
    env: Environment<'static>,
}

impl Fragments {
    /// Create the engine with the built-in fragment templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("e", |value: String| escape_html(&value));

        for (name, source) in TEMPLATES {
            env.add_template_owned(name.to_string(), source.to_string())
                .expect("Failed to add fragment template");
        }

        Self { env }
    }

    /// Render one fragment template.
    pub fn render<S: Serialize>(&self, template: &str, ctx: S) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;
        tmpl.render(ctx)
    }
}

impl Default for Fragments {
    fn default() -> Self {
        Self::new()
    }
}

pub const NAV_MENU: &str = "nav_menu.html";
pub const HERO_CTA: &str = "hero_cta.html";
pub const SOCIAL_LINKS: &str = "social_links.html";
pub const HERO_STATS: &str = "hero_stats.html";
pub const ABOUT_CONTENT: &str = "about_content.html";
pub const ABOUT_HIGHLIGHTS: &str = "about_highlights.html";
pub const WORK_GRID: &str = "work_grid.html";
pub const SKILLS_GRID: &str = "skills_grid.html";
pub const CONTACT_INFO: &str = "contact_info.html";
pub const FOOTER_LINKS: &str = "footer_links.html";

const TEMPLATES: &[(&str, &str)] = &[
    (NAV_MENU, NAV_MENU_TEMPLATE),
    (HERO_CTA, HERO_CTA_TEMPLATE),
    (SOCIAL_LINKS, SOCIAL_LINKS_TEMPLATE),
    (HERO_STATS, HERO_STATS_TEMPLATE),
    (ABOUT_CONTENT, ABOUT_CONTENT_TEMPLATE),
    (ABOUT_HIGHLIGHTS, ABOUT_HIGHLIGHTS_TEMPLATE),
    (WORK_GRID, WORK_GRID_TEMPLATE),
    (SKILLS_GRID, SKILLS_GRID_TEMPLATE),
    (CONTACT_INFO, CONTACT_INFO_TEMPLATE),
    (FOOTER_LINKS, FOOTER_LINKS_TEMPLATE),
];

const NAV_MENU_TEMPLATE: &str = r##"{% for item in menu %}<li><a href="{{ item.href | e }}" class="nav-link">{{ item.text | e }}</a></li>{% endfor %}"##;

const HERO_CTA_TEMPLATE: &str = r##"{% for btn in buttons %}<a href="{{ btn.href | e }}" class="btn btn-{{ btn.kind | e }}">{{ btn.text | e }}</a>{% endfor %}"##;

const SOCIAL_LINKS_TEMPLATE: &str = r##"{% for link in links %}<a href="{{ link.url | e }}" target="_blank" class="social-link" aria-label="{{ link.platform | e }}"><i class="{{ link.icon | e }}"></i></a>{% endfor %}"##;

const HERO_STATS_TEMPLATE: &str = r##"{% for stat in stats %}<div class="stat-item"><span class="stat-number">{{ stat.number | e }}</span><span class="stat-label">{{ stat.label | e }}</span></div>{% endfor %}"##;

const ABOUT_CONTENT_TEMPLATE: &str =
    r##"{% for p in paragraphs %}<p>{{ p }}</p>{% endfor %}"##;

const ABOUT_HIGHLIGHTS_TEMPLATE: &str = r##"{% for h in highlights %}<div class="highlight-card"><i class="{{ h.icon | e }}"></i><h3>{{ h.title | e }}</h3><p>{{ h.description | e }}</p></div>{% endfor %}"##;

const WORK_GRID_TEMPLATE: &str = r##"{% for project in projects %}<div class="work-card">
  <div class="work-image" style="background-image: url('{{ project.image | e }}')">
    <div class="work-icon"><i class="{{ project.icon | e }}"></i></div>
  </div>
  <div class="work-content">
    <p class="work-category">{{ project.category | e }}</p>
    <h3 class="work-title">{{ project.title | e }}</h3>
    <p class="work-description">{{ project.description | e }}</p>
    <div class="work-tags">{% for tag in project.tags %}<span class="tag">{{ tag | e }}</span>{% endfor %}</div>
  </div>
</div>{% endfor %}"##;

const SKILLS_GRID_TEMPLATE: &str = r##"{% for cat in categories %}<div class="skill-category">
  <div class="skill-category-header">
    <i class="{{ cat.icon | e }}"></i>
    <h3 class="skill-category-name">{{ cat.name | e }}</h3>
  </div>
  <div class="skill-list">{% for skill in cat.skills %}<span class="skill-tag">{{ skill | e }}</span>{% endfor %}</div>
</div>{% endfor %}"##;

const CONTACT_INFO_TEMPLATE: &str = r##"
<div class="contact-item"><i class="fas fa-envelope"></i> <a href="mailto:{{ email | e }}">{{ email | e }}</a></div>
<div class="contact-item"><i class="fas fa-map-marker-alt"></i> {{ location | e }}</div>
<div class="contact-item"><i class="fas fa-clock"></i> {{ availability | e }}</div>
"##;

const FOOTER_LINKS_TEMPLATE: &str =
    r##"{% for link in links %}<a href="{{ link.href | e }}">{{ link.text | e }}</a>{% endfor %}"##;

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;
    use pretty_assertions::assert_eq;

    use folio_content::{ButtonView, LinkView};

    #[test]
    fn renders_nav_menu() {
        let fragments = Fragments::new();
        let menu = vec![
            LinkView {
                href: "#about".to_string(),
                text: "About".to_string(),
            },
            LinkView {
                href: "#work".to_string(),
                text: "Work".to_string(),
            },
        ];

        let html = fragments.render(NAV_MENU, context! { menu => menu }).unwrap();

        assert_eq!(
            html,
            r##"<li><a href="#about" class="nav-link">About</a></li><li><a href="#work" class="nav-link">Work</a></li>"##
        );
    }

    #[test]
    fn about_paragraphs_keep_inline_markup() {
        let fragments = Fragments::new();
        let paragraphs = vec!["I love <strong>Rust</strong>".to_string(), "Hi & bye".to_string()];

        let html = fragments
            .render(ABOUT_CONTENT, context! { paragraphs => paragraphs })
            .unwrap();

        assert_eq!(html, "<p>I love <strong>Rust</strong></p><p>Hi & bye</p>");
    }

    #[test]
    fn escapes_interpolated_values() {
        let fragments = Fragments::new();
        let buttons = vec![ButtonView {
            href: "/a?x=1&y=2".to_string(),
            text: "<script>".to_string(),
            kind: "primary\"".to_string(),
        }];

        let html = fragments
            .render(HERO_CTA, context! { buttons => buttons })
            .unwrap();

        assert_eq!(
            html,
            r#"<a href="/a?x=1&amp;y=2" class="btn btn-primary&quot;">&lt;script&gt;</a>"#
        );
    }

    #[test]
    fn renders_empty_lists_as_empty_markup() {
        let fragments = Fragments::new();
        let links: Vec<LinkView> = Vec::new();

        let html = fragments
            .render(FOOTER_LINKS, context! { links => links })
            .unwrap();

        assert_eq!(html, "");
    }
}
