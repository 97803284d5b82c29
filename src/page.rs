//! Everything the page does, behind one typed event entry point.

use std::cell::RefCell;

use serde_json::json;

use crate::anchor;
use crate::config::EffectsConfig;
use crate::dom::{selectors, Document, Element, Viewport};
use crate::forms::{FormFeedback, FormKind};
use crate::logging::Logger;
use crate::menu::MobileMenu;
use crate::reveal::{Intersection, RevealController};
use crate::scroll::{self, ScrollEffects};
use crate::timing::{debounce, throttle, Debounced, Scheduler, Throttled};

/// Elements looked up once at startup. Any of them may be absent.
pub struct PageContext<E> {
    pub navbar: Option<E>,
    pub hamburger: Option<E>,
    pub nav_menu: Option<E>,
    pub nav_links: Vec<E>,
    pub anchors: Vec<E>,
    pub scroll_top: Option<E>,
    pub year: Option<E>,
    pub body: Option<E>,
    pub animated: Vec<E>,
    pub google_form: Option<E>,
    pub contact_form: Option<E>,
}

impl<E: Element> PageContext<E> {
    pub fn discover<D: Document<Element = E>>(document: &D) -> Self {
        // without the iframe the post would navigate away from the page
        let google_form = document
            .query(selectors::GOOGLE_FORM)
            .filter(|_| document.query(selectors::HIDDEN_IFRAME).is_some());

        Self {
            navbar: document.query(selectors::NAVBAR),
            hamburger: document.query(selectors::HAMBURGER),
            nav_menu: document.query(selectors::NAV_MENU),
            nav_links: document.query_all(selectors::NAV_LINK),
            anchors: document.query_all(selectors::IN_PAGE_ANCHOR),
            scroll_top: document.query(selectors::SCROLL_TOP),
            year: document.query(selectors::YEAR),
            body: document.body(),
            animated: document.query_all(selectors::ANIMATED),
            google_form,
            contact_form: document.query(selectors::CONTACT_FORM),
        }
    }
}

pub enum PageEvent<'a, E> {
    Scroll,
    Resize,
    HamburgerClick,
    NavLinkClick,
    AnchorClick { href: &'a str },
    ScrollTopClick,
    KeyDown { key: &'a str },
    Submit(FormKind),
    Intersections(Vec<Intersection<E>>),
}

/// What the caller must do with the originating DOM event.
#[derive(Debug, PartialEq)]
pub struct Outcome<E> {
    pub prevent_default: bool,
    pub unobserve: Vec<E>,
}

impl<E> Outcome<E> {
    fn done() -> Self {
        Self {
            prevent_default: false,
            unobserve: Vec::new(),
        }
    }

    fn prevent(prevent_default: bool) -> Self {
        Self {
            prevent_default,
            unobserve: Vec::new(),
        }
    }
}

pub struct Page<D: Document, V, S: Scheduler> {
    document: D,
    viewport: V,
    config: EffectsConfig,
    context: PageContext<D::Element>,
    menu: Option<MobileMenu<D::Element>>,
    scroll: ScrollEffects<D::Element>,
    on_scroll: Throttled<f64, S>,
    on_resize: Debounced<f64, S>,
    reveal: RefCell<RevealController<D::Element>>,
    forms: Vec<FormFeedback<D::Element, S>>,
    logger: Logger,
}

impl<D, V, S> Page<D, V, S>
where
    D: Document,
    V: Viewport,
    S: Scheduler,
{
    pub fn new(document: D, viewport: V, config: EffectsConfig, scheduler: S, year: i32) -> Self {
        let logger = Logger::new(config.log_level);
        Self::with_logger(document, viewport, config, scheduler, year, logger)
    }

    pub fn with_logger(
        document: D,
        viewport: V,
        config: EffectsConfig,
        scheduler: S,
        year: i32,
        logger: Logger,
    ) -> Self {
        let context = PageContext::discover(&document);

        let menu = match (&context.hamburger, &context.nav_menu) {
            (Some(hamburger), Some(nav_menu)) => Some(MobileMenu::new(
                hamburger.clone(),
                nav_menu.clone(),
                context.body.clone(),
            )),
            _ => None,
        };

        let scroll = ScrollEffects::new(
            context.navbar.clone(),
            context.scroll_top.clone(),
            config.navbar_scrolled_offset,
            config.scroll_top_visible_offset,
        );

        let on_scroll = {
            let scroll = scroll.clone();
            throttle(
                move |offset: f64| {
                    scroll.apply(offset);
                },
                config.scroll_throttle_ms,
                scheduler.clone(),
            )
        };

        let on_resize = {
            let menu = menu.clone();
            let breakpoint = config.mobile_breakpoint;
            debounce(
                move |width: f64| {
                    if width > breakpoint {
                        if let Some(menu) = &menu {
                            menu.close();
                        }
                    }
                },
                config.resize_debounce_ms,
                scheduler.clone(),
            )
        };

        let mut reveal = RevealController::new(config.reveal.clone());
        reveal.register(context.animated.iter().cloned());
        if viewport.prefers_reduced_motion() {
            reveal.reveal_all();
        }

        let mut forms = Vec::new();
        if let Some(form) = &context.google_form {
            forms.push(FormFeedback::new(
                FormKind::GoogleForm,
                form.clone(),
                config.forms.clone(),
                scheduler.clone(),
            ));
        }
        if let Some(form) = &context.contact_form {
            forms.push(FormFeedback::new(
                FormKind::ContactForm,
                form.clone(),
                config.forms.clone(),
                scheduler,
            ));
        }

        if let Some(placeholder) = &context.year {
            placeholder.set_text(&year.to_string());
        }

        // the page may load already scrolled
        scroll.apply(viewport.scroll_y());

        logger.info(
            "page_ready",
            json!({
                "menu": menu.is_some(),
                "animated": reveal.len(),
                "anchors": context.anchors.len(),
                "forms": forms.iter().map(|form| form.kind().as_str()).collect::<Vec<_>>(),
                "config": config,
            }),
        );

        Self {
            document,
            viewport,
            config,
            context,
            menu,
            scroll,
            on_scroll,
            on_resize,
            reveal: RefCell::new(reveal),
            forms,
            logger,
        }
    }

    pub fn context(&self) -> &PageContext<D::Element> {
        &self.context
    }

    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }

    pub fn menu(&self) -> Option<&MobileMenu<D::Element>> {
        self.menu.as_ref()
    }

    /// Elements still waiting to be revealed; these need observing.
    pub fn pending_reveals(&self) -> Vec<D::Element> {
        self.reveal.borrow().pending().cloned().collect()
    }

    pub fn dispatch(&self, event: PageEvent<'_, D::Element>) -> Outcome<D::Element> {
        match event {
            PageEvent::Scroll => {
                self.on_scroll.call(self.viewport.scroll_y());
                Outcome::done()
            }
            PageEvent::Resize => {
                self.on_resize.call(self.viewport.width());
                Outcome::done()
            }
            PageEvent::HamburgerClick => {
                if let Some(menu) = &self.menu {
                    let open = menu.toggle();
                    self.logger.debug("menu_toggled", json!({ "open": open }));
                }
                Outcome::done()
            }
            PageEvent::NavLinkClick => {
                self.close_menu();
                Outcome::done()
            }
            PageEvent::AnchorClick { href } => {
                let navbar = self.context.navbar.as_ref();
                let handled = anchor::follow(&self.document, &self.viewport, navbar, href);
                if handled {
                    self.close_menu();
                }
                Outcome::prevent(handled)
            }
            PageEvent::ScrollTopClick => {
                if !self.scroll.has_scroll_top() {
                    return Outcome::done();
                }
                scroll::scroll_to_top(&self.viewport);
                Outcome::prevent(true)
            }
            PageEvent::KeyDown { key } => {
                if let Some(menu) = &self.menu {
                    menu.handle_key(key);
                }
                Outcome::done()
            }
            PageEvent::Submit(kind) => {
                let Some(form) = self.forms.iter().find(|form| form.kind() == kind) else {
                    return Outcome::done();
                };
                self.logger
                    .debug("form_submitted", json!({ "form": kind.as_str() }));
                Outcome::prevent(form.submit())
            }
            PageEvent::Intersections(entries) => {
                let unobserve = self.reveal.borrow_mut().observe(entries);
                if !unobserve.is_empty() {
                    self.logger
                        .debug("element_revealed", json!({ "count": unobserve.len() }));
                }
                Outcome {
                    prevent_default: false,
                    unobserve,
                }
            }
        }
    }

    fn close_menu(&self) {
        if let Some(menu) = &self.menu {
            menu.close();
        }
    }
}
