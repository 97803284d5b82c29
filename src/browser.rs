use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use js_sys::{Array, Date};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Event, EventTarget, HtmlElement, HtmlFormElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
    ScrollBehavior, ScrollToOptions, Window,
};

use crate::config::EffectsConfig;
use crate::dom::{layout_offset_top, Document, DomEvent, Element, Viewport};
use crate::forms::FormKind;
use crate::page::{Page, PageEvent};
use crate::reveal::Intersection;
use crate::timing::Scheduler;

type BrowserPage = Page<BrowserDocument, BrowserViewport, BrowserScheduler>;

#[derive(Clone, PartialEq)]
pub struct DomElement(HtmlElement);

impl Element for DomElement {
    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.0.style().set_property(property, value);
    }

    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn set_disabled(&self, disabled: bool) {
        if disabled {
            let _ = self.0.set_attribute("disabled", "");
        } else {
            let _ = self.0.remove_attribute("disabled");
        }
    }

    fn offset_top(&self) -> f64 {
        let chain = std::iter::successors(Some(self.0.clone()), |element| {
            element
                .offset_parent()
                .and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
        });
        layout_offset_top(chain.map(|element| element.offset_top()))
    }

    fn offset_height(&self) -> f64 {
        f64::from(self.0.offset_height())
    }

    fn query(&self, selector: &str) -> Option<Self> {
        let element = self.0.query_selector(selector).ok().flatten()?;
        element.dyn_into::<HtmlElement>().ok().map(Self)
    }

    fn reset_form(&self) {
        if let Some(form) = self.0.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }
}

pub struct BrowserDocument(web_sys::Document);

impl Document for BrowserDocument {
    type Element = DomElement;

    fn query(&self, selector: &str) -> Option<DomElement> {
        let element = self.0.query_selector(selector).ok().flatten()?;
        element.dyn_into::<HtmlElement>().ok().map(DomElement)
    }

    fn query_all(&self, selector: &str) -> Vec<DomElement> {
        let Ok(nodes) = self.0.query_selector_all(selector) else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(DomElement)
            .collect()
    }

    fn body(&self) -> Option<DomElement> {
        self.0.body().map(DomElement)
    }
}

pub struct BrowserViewport(Window);

impl Viewport for BrowserViewport {
    fn scroll_y(&self) -> f64 {
        self.0.scroll_y().unwrap_or(0.0)
    }

    fn width(&self) -> f64 {
        self.0
            .inner_width()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(1280.0)
    }

    fn scroll_to(&self, top: f64) {
        let behavior = if self.prefers_reduced_motion() {
            ScrollBehavior::Auto
        } else {
            ScrollBehavior::Smooth
        };

        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(behavior);
        self.0.scroll_to_with_scroll_to_options(&options);
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.0
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .map(|mq| mq.matches())
            .unwrap_or(false)
    }
}

#[derive(Clone, Copy)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

fn listen(target: &EventTarget, event: DomEvent, handler: impl FnMut(&Event) + 'static) {
    EventListener::new(target, event.as_str(), handler).forget();
}

/// Listener that may cancel the browser's default action.
fn listen_active(
    target: &EventTarget,
    event: DomEvent,
    handler: impl FnMut(&Event) + 'static,
) {
    EventListener::new_with_options(
        target,
        event.as_str(),
        EventListenerOptions::enable_prevent_default(),
        handler,
    )
    .forget();
}

fn observe_reveals(page: &Rc<BrowserPage>) {
    let pending = page.pending_reveals();
    if pending.is_empty() {
        return;
    }

    let reveal = &page.config().reveal;
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(reveal.threshold));
    options.set_root_margin(reveal.root_margin);

    let callback = {
        let page = Rc::clone(page);
        Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                let entries = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .filter_map(|entry| {
                        let target = entry.target().dyn_into::<HtmlElement>().ok()?;
                        Some(Intersection {
                            target: DomElement(target),
                            ratio: entry.intersection_ratio(),
                            is_intersecting: entry.is_intersecting(),
                        })
                    })
                    .collect();

                let outcome = page.dispatch(PageEvent::Intersections(entries));
                for element in outcome.unobserve {
                    observer.unobserve(&element.0);
                }
            },
        )
    };

    let Ok(observer) =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
    else {
        return;
    };
    callback.forget();

    for element in pending {
        observer.observe(&element.0);
    }
}

fn wire(page: &Rc<BrowserPage>, window: &Window) {
    let context = page.context();

    {
        let page = Rc::clone(page);
        listen(window, DomEvent::Scroll, move |_| {
            page.dispatch(PageEvent::Scroll);
        });
    }

    {
        let page = Rc::clone(page);
        listen(window, DomEvent::Resize, move |_| {
            page.dispatch(PageEvent::Resize);
        });
    }

    if let Some(hamburger) = &context.hamburger {
        let page = Rc::clone(page);
        listen(&hamburger.0, DomEvent::Click, move |_| {
            page.dispatch(PageEvent::HamburgerClick);
        });
    }

    for link in &context.nav_links {
        let page = Rc::clone(page);
        listen(&link.0, DomEvent::Click, move |_| {
            page.dispatch(PageEvent::NavLinkClick);
        });
    }

    for anchor in &context.anchors {
        let page = Rc::clone(page);
        let link = anchor.clone();
        listen_active(&anchor.0, DomEvent::Click, move |event| {
            let Some(href) = link.attribute("href") else {
                return;
            };
            if page.dispatch(PageEvent::AnchorClick { href: &href }).prevent_default {
                event.prevent_default();
            }
        });
    }

    if let Some(scroll_top) = &context.scroll_top {
        let page = Rc::clone(page);
        listen_active(&scroll_top.0, DomEvent::Click, move |event| {
            if page.dispatch(PageEvent::ScrollTopClick).prevent_default {
                event.prevent_default();
            }
        });
    }

    if let Some(document) = window.document() {
        let page = Rc::clone(page);
        listen(&document, DomEvent::KeyDown, move |event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
                page.dispatch(PageEvent::KeyDown { key: &key });
            }
        });
    }

    let forms = [
        (FormKind::GoogleForm, &context.google_form),
        (FormKind::ContactForm, &context.contact_form),
    ];
    for (kind, form) in forms {
        let Some(form) = form else {
            continue;
        };
        let page = Rc::clone(page);
        listen_active(&form.0, DomEvent::Submit, move |event| {
            if page.dispatch(PageEvent::Submit(kind)).prevent_default {
                event.prevent_default();
            }
        });
    }

    observe_reveals(page);
}

fn start() {
    let Some(window) = window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let page = Rc::new(Page::new(
        BrowserDocument(document),
        BrowserViewport(window.clone()),
        EffectsConfig::default(),
        BrowserScheduler,
        Date::new_0().get_full_year() as i32,
    ));
    wire(&page, &window);
}

pub fn run() {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() == "loading" {
        EventListener::once(&document, DomEvent::DomContentLoaded.as_str(), |_| start()).forget();
    } else {
        start();
    }
}
