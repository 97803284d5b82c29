//! Headless stand-ins for the browser: a mock DOM, a viewport and a
//! virtual-time scheduler.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::{Rc, Weak};

use crate::dom::{Document, Element, Viewport};
use crate::logging::{LogLevel, LogSink};
use crate::timing::Scheduler;

struct ScheduledTask {
    id: u64,
    due_ms: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct TaskQueue {
    now_ms: u64,
    next_id: u64,
    tasks: Vec<ScheduledTask>,
}

#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<TaskQueue>>,
}

pub struct ManualHandle {
    id: u64,
    queue: Weak<RefCell<TaskQueue>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        let Some(queue) = self.queue.upgrade() else {
            return;
        };

        let removed = {
            let mut queue = queue.borrow_mut();
            let index = queue.tasks.iter().position(|task| task.id == self.id);
            index.map(|index| queue.tasks.remove(index))
        };
        // the task may own other handles, drop it outside the borrow
        drop(removed);
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
        let mut queue = self.queue.borrow_mut();
        let id = queue.next_id;
        queue.next_id += 1;
        let due_ms = queue.now_ms + u64::from(delay_ms);
        queue.tasks.push(ScheduledTask { id, due_ms, task });

        ManualHandle {
            id,
            queue: Rc::downgrade(&self.queue),
        }
    }
}

impl ManualScheduler {
    pub fn now(&self) -> u64 {
        self.queue.borrow().now_ms
    }

    pub fn pending_tasks(&self) -> usize {
        self.queue.borrow().tasks.len()
    }

    /// Moves virtual time forward, running due tasks in order.
    pub fn advance(&self, ms: u64) {
        let target = self.now() + ms;

        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let index = queue
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, task)| task.due_ms <= target)
                    .min_by_key(|(_, task)| (task.due_ms, task.id))
                    .map(|(index, _)| index);

                match index {
                    Some(index) => {
                        let task = queue.tasks.remove(index);
                        queue.now_ms = task.due_ms;
                        Some(task)
                    }
                    None => {
                        queue.now_ms = target;
                        None
                    }
                }
            };

            match next {
                Some(task) => (task.task)(),
                None => break,
            }
        }
    }
}

#[derive(Default)]
struct MockNode {
    selectors: BTreeSet<String>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    disabled: bool,
    offset_top: f64,
    offset_height: f64,
    children: Vec<MockElement>,
    resets: u32,
}

#[derive(Clone, Default)]
pub struct MockElement {
    node: Rc<RefCell<MockNode>>,
}

impl PartialEq for MockElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl std::fmt::Debug for MockElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let node = self.node.borrow();
        f.debug_struct("MockElement")
            .field("selectors", &node.selectors)
            .field("classes", &node.classes)
            .finish()
    }
}

impl MockElement {
    /// An element matched by exactly the given selectors.
    pub fn matching(selectors: &[&str]) -> Self {
        let element = Self::default();
        element
            .node
            .borrow_mut()
            .selectors
            .extend(selectors.iter().map(|s| s.to_string()));
        element
    }

    pub fn with_text(self, text: &str) -> Self {
        self.node.borrow_mut().text = text.to_string();
        self
    }

    pub fn with_geometry(self, offset_top: f64, offset_height: f64) -> Self {
        {
            let mut node = self.node.borrow_mut();
            node.offset_top = offset_top;
            node.offset_height = offset_height;
        }
        self
    }

    pub fn with_child(self, child: MockElement) -> Self {
        self.node.borrow_mut().children.push(child);
        self
    }

    pub fn matches(&self, selector: &str) -> bool {
        self.node.borrow().selectors.contains(selector)
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.node.borrow().style.get(property).cloned()
    }

    pub fn is_disabled(&self) -> bool {
        self.node.borrow().disabled
    }

    pub fn reset_count(&self) -> u32 {
        self.node.borrow().resets
    }

    fn descendants(&self) -> Vec<MockElement> {
        let mut found = Vec::new();
        for child in &self.node.borrow().children {
            found.push(child.clone());
            found.extend(child.descendants());
        }
        found
    }
}

impl Element for MockElement {
    fn add_class(&self, class: &str) {
        self.node.borrow_mut().classes.insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.node.borrow_mut().classes.remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.node.borrow().classes.contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.node.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.node
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn set_style(&self, property: &str, value: &str) {
        self.node
            .borrow_mut()
            .style
            .insert(property.to_string(), value.to_string());
    }

    fn text(&self) -> String {
        self.node.borrow().text.clone()
    }

    fn set_text(&self, text: &str) {
        self.node.borrow_mut().text = text.to_string();
    }

    fn set_disabled(&self, disabled: bool) {
        self.node.borrow_mut().disabled = disabled;
    }

    fn offset_top(&self) -> f64 {
        self.node.borrow().offset_top
    }

    fn offset_height(&self) -> f64 {
        self.node.borrow().offset_height
    }

    fn query(&self, selector: &str) -> Option<Self> {
        self.descendants()
            .into_iter()
            .find(|element| element.matches(selector))
    }

    fn reset_form(&self) {
        self.node.borrow_mut().resets += 1;
    }
}

#[derive(Default)]
pub struct MockDocument {
    elements: Vec<MockElement>,
    body: MockElement,
}

impl MockDocument {
    pub fn with(mut self, element: MockElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn body_element(&self) -> MockElement {
        self.body.clone()
    }

    fn all(&self) -> Vec<MockElement> {
        let mut found = Vec::new();
        for element in &self.elements {
            found.push(element.clone());
            found.extend(element.descendants());
        }
        found
    }
}

impl Document for MockDocument {
    type Element = MockElement;

    fn query(&self, selector: &str) -> Option<MockElement> {
        self.all().into_iter().find(|element| element.matches(selector))
    }

    fn query_all(&self, selector: &str) -> Vec<MockElement> {
        self.all()
            .into_iter()
            .filter(|element| element.matches(selector))
            .collect()
    }

    fn body(&self) -> Option<MockElement> {
        Some(self.body.clone())
    }
}

#[derive(Clone)]
pub struct MockViewport {
    scroll_y: Rc<Cell<f64>>,
    width: Rc<Cell<f64>>,
    reduced_motion: Rc<Cell<bool>>,
    scrolls: Rc<RefCell<Vec<f64>>>,
}

impl Default for MockViewport {
    fn default() -> Self {
        Self {
            scroll_y: Rc::new(Cell::new(0.0)),
            width: Rc::new(Cell::new(1280.0)),
            reduced_motion: Rc::new(Cell::new(false)),
            scrolls: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl MockViewport {
    pub fn set_scroll_y(&self, offset: f64) {
        self.scroll_y.set(offset);
    }

    pub fn set_width(&self, width: f64) {
        self.width.set(width);
    }

    pub fn set_reduced_motion(&self, reduced: bool) {
        self.reduced_motion.set(reduced);
    }

    /// Every programmatic scroll target, oldest first.
    pub fn scrolls(&self) -> Vec<f64> {
        self.scrolls.borrow().clone()
    }
}

impl Viewport for MockViewport {
    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn width(&self) -> f64 {
        self.width.get()
    }

    fn scroll_to(&self, top: f64) {
        self.scrolls.borrow_mut().push(top);
        self.scroll_y.set(top);
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion.get()
    }
}

/// Keeps every log record instead of printing it.
#[derive(Default)]
pub struct MemorySink {
    records: RefCell<Vec<(LogLevel, serde_json::Value)>>,
}

impl MemorySink {
    pub fn records(&self) -> Vec<(LogLevel, serde_json::Value)> {
        self.records.borrow().clone()
    }
}

impl LogSink for MemorySink {
    fn write(&self, level: LogLevel, payload: &serde_json::Value) {
        self.records.borrow_mut().push((level, payload.clone()));
    }
}
