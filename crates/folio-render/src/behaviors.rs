//! Interactive page behaviors, wired after all loaders settle.
//!
//! The three behaviors are modelled as event handlers over the host document
//! so they can be exercised without a browser. The static builder ships the
//! same behaviors as a script.

use crate::dom::{HostDocument, Selector};
use crate::targets::Target;

/// Fraction of a section that must be visible before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Observer root margin, in pixels.
pub const REVEAL_ROOT_MARGIN_PX: i32 = -50;

/// Scroll offset beyond which the back-to-top control is shown.
pub const BACK_TO_TOP_OFFSET: f64 = 300.0;

/// An interaction with the rendered page.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Click on the element with this id
    Click(String),
    /// Click on any `.nav-link`
    NavLinkClick,
    /// Window scrolled to this vertical offset
    Scroll { offset: f64 },
    /// The n-th `section` element intersects the viewport by `ratio`
    Intersect { section: usize, ratio: f64 },
}

/// A side effect outside the document that the host should perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ScrollTo { top: f64, smooth: bool },
}

/// The set of behaviors wired for one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Behaviors {
    nav_toggle: bool,
    observed_sections: usize,
    back_to_top: bool,
}

impl Behaviors {
    /// Wire every behavior whose elements exist in the document.
    pub fn initialize(document: &HostDocument) -> Self {
        let nav_toggle = document.contains(Target::NavToggle.selector())
            && document.contains(Target::NavMenu.selector());
        let observed_sections = document.count("section");
        let back_to_top = document.contains(Target::BackToTop.selector());

        tracing::debug!(
            "Behaviors: nav toggle {}, {} sections observed, back-to-top {}",
            if nav_toggle { "on" } else { "off" },
            observed_sections,
            if back_to_top { "on" } else { "off" }
        );

        Self {
            nav_toggle,
            observed_sections,
            back_to_top,
        }
    }

    pub fn nav_toggle_enabled(&self) -> bool {
        self.nav_toggle
    }

    pub fn observed_sections(&self) -> usize {
        self.observed_sections
    }

    pub fn back_to_top_enabled(&self) -> bool {
        self.back_to_top
    }

    /// Handle one event, mutating the document and returning any effects.
    pub fn dispatch(&self, document: &mut HostDocument, event: &UiEvent) -> Vec<Effect> {
        let menu = Target::NavMenu.selector();
        let mut effects = Vec::new();

        match event {
            UiEvent::Click(id) => {
                if self.nav_toggle && Target::NavToggle.element_id() == Some(id.as_str()) {
                    document.toggle_class(menu, "active");
                }
                if self.back_to_top && Target::BackToTop.element_id() == Some(id.as_str()) {
                    effects.push(Effect::ScrollTo {
                        top: 0.0,
                        smooth: true,
                    });
                }
            }

            UiEvent::NavLinkClick => {
                if self.nav_toggle {
                    document.remove_class(menu, "active");
                }
            }

            UiEvent::Scroll { offset } => {
                if self.back_to_top {
                    let display = if *offset > BACK_TO_TOP_OFFSET {
                        "flex"
                    } else {
                        "none"
                    };
                    document.set_style_property(Target::BackToTop.selector(), "display", display);
                }
            }

            UiEvent::Intersect { section, ratio } => {
                if *section < self.observed_sections && *ratio >= REVEAL_THRESHOLD {
                    document.add_class(Selector::Tag("section", *section), "visible");
                }
            }
        }

        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = r#"<body>
<button id="nav-toggle">Menu</button>
<ul id="nav-menu" class="nav-menu"></ul>
<section id="about"></section>
<section id="work"></section>
<button id="back-to-top">Top</button>
</body>"#;

    fn setup() -> (Behaviors, HostDocument) {
        let document = HostDocument::parse(HOST);
        (Behaviors::initialize(&document), document)
    }

    #[test]
    fn wires_present_controls() {
        let (behaviors, _) = setup();

        assert!(behaviors.nav_toggle_enabled());
        assert!(behaviors.back_to_top_enabled());
        assert_eq!(behaviors.observed_sections(), 2);
    }

    #[test]
    fn nav_toggle_requires_both_elements() {
        let document = HostDocument::parse(r#"<button id="nav-toggle"></button>"#);

        assert!(!Behaviors::initialize(&document).nav_toggle_enabled());
    }

    #[test]
    fn toggle_opens_and_nav_link_closes_menu() {
        let (behaviors, mut document) = setup();

        behaviors.dispatch(&mut document, &UiEvent::Click("nav-toggle".to_string()));
        assert!(document.has_class("nav-menu", "active"));

        behaviors.dispatch(&mut document, &UiEvent::NavLinkClick);
        assert!(!document.has_class("nav-menu", "active"));
    }

    #[test]
    fn back_to_top_follows_scroll_offset() {
        let (behaviors, mut document) = setup();

        behaviors.dispatch(&mut document, &UiEvent::Scroll { offset: 301.0 });
        assert_eq!(
            document.style_property("back-to-top", "display").as_deref(),
            Some("flex")
        );

        behaviors.dispatch(&mut document, &UiEvent::Scroll { offset: 300.0 });
        assert_eq!(
            document.style_property("back-to-top", "display").as_deref(),
            Some("none")
        );
    }

    #[test]
    fn back_to_top_click_scrolls_smoothly() {
        let (behaviors, mut document) = setup();

        let effects = behaviors.dispatch(&mut document, &UiEvent::Click("back-to-top".to_string()));

        assert_eq!(
            effects,
            vec![Effect::ScrollTo {
                top: 0.0,
                smooth: true
            }]
        );
    }

    #[test]
    fn reveals_sections_past_threshold() {
        let (behaviors, mut document) = setup();

        behaviors.dispatch(
            &mut document,
            &UiEvent::Intersect {
                section: 0,
                ratio: 0.05,
            },
        );
        behaviors.dispatch(
            &mut document,
            &UiEvent::Intersect {
                section: 1,
                ratio: 0.5,
            },
        );

        assert!(!document.has_class("about", "visible"));
        assert!(document.has_class("work", "visible"));
    }

    #[test]
    fn unwired_behaviors_ignore_events() {
        let mut document = HostDocument::parse("<body><ul id=\"nav-menu\"></ul></body>");
        let behaviors = Behaviors::initialize(&document);
        let before = document.clone();

        behaviors.dispatch(&mut document, &UiEvent::Click("nav-toggle".to_string()));
        behaviors.dispatch(&mut document, &UiEvent::Scroll { offset: 900.0 });

        assert_eq!(document, before);
    }
}
