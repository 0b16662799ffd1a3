//! Scripted session and element doubles for testing assertions.
//!
//! Pages under assertion are moving targets, so the doubles here are
//! scripted rather than static: each observable (URL, text, find results,
//! field values...) holds a queue of consecutive return values, and once the
//! queue is down to its last entry that entry repeats forever. That lets a
//! test stage "empty on the first poll, loaded on the second" and exercise
//! the retry path deterministically.
//!
//! Doubles are cheap `Rc` handles; cloning shares the script state, which is
//! exactly what the engine's re-query-per-poll behavior needs.

use serde_json::Value;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::selector::Selector;
use crate::session::{Element, Session};

/// A queue of consecutive return values; the final value repeats.
#[derive(Debug)]
struct Script<T>(RefCell<VecDeque<T>>);

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self(RefCell::new(VecDeque::new()))
    }
}

impl<T: Clone> Script<T> {
    fn push(&self, value: T) {
        self.0.borrow_mut().push_back(value);
    }

    fn next(&self) -> Option<T> {
        let mut queue = self.0.borrow_mut();
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }

    fn next_or(&self, fallback: T) -> T {
        self.next().unwrap_or(fallback)
    }
}

#[derive(Debug, Default)]
struct ElementState {
    texts: Script<String>,
    contents: Script<String>,
    htmls: Script<String>,
    values: Script<Value>,
    checked: Script<bool>,
    attributes: RefCell<HashMap<String, String>>,
    finds: Script<Option<MockElement>>,
    find_alls: Script<Vec<MockElement>>,
    fields: Script<Option<MockElement>>,
}

/// Scripted element double.
#[derive(Debug, Clone, Default)]
pub struct MockElement(Rc<ElementState>);

impl MockElement {
    /// Create an element with no scripted observations
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a rendered-text observation
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.0.texts.push(text.into());
        self
    }

    /// Queue a raw-markup observation
    #[must_use]
    pub fn with_content(self, content: impl Into<String>) -> Self {
        self.0.contents.push(content.into());
        self
    }

    /// Queue an inner-markup observation
    #[must_use]
    pub fn with_html(self, html: impl Into<String>) -> Self {
        self.0.htmls.push(html.into());
        self
    }

    /// Queue a form-value observation
    #[must_use]
    pub fn with_value(self, value: impl Into<Value>) -> Self {
        self.0.values.push(value.into());
        self
    }

    /// Queue a checked-state observation
    #[must_use]
    pub fn with_checked(self, checked: bool) -> Self {
        self.0.checked.push(checked);
        self
    }

    /// Set an attribute (attributes are not scripted; they are fixed)
    #[must_use]
    pub fn with_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0
            .attributes
            .borrow_mut()
            .insert(name.into(), value.into());
        self
    }

    /// Queue a `find` result
    #[must_use]
    pub fn with_find(self, result: Option<MockElement>) -> Self {
        self.0.finds.push(result);
        self
    }

    /// Queue a `find_all` result
    #[must_use]
    pub fn with_find_all(self, results: Vec<MockElement>) -> Self {
        self.0.find_alls.push(results);
        self
    }

    /// Queue a `find_all` result of `count` anonymous elements
    #[must_use]
    pub fn with_find_all_count(self, count: usize) -> Self {
        let results = (0..count).map(|_| Self::new()).collect();
        self.0.find_alls.push(results);
        self
    }

    /// Queue a `find_field` result
    #[must_use]
    pub fn with_field(self, result: Option<MockElement>) -> Self {
        self.0.fields.push(result);
        self
    }
}

impl Element for MockElement {
    fn find(&self, _selector: &Selector) -> Option<Self> {
        self.0.finds.next().flatten()
    }

    fn find_all(&self, _selector: &Selector) -> Vec<Self> {
        self.0.find_alls.next_or(Vec::new())
    }

    fn find_field(&self, _locator: &str) -> Option<Self> {
        self.0.fields.next().flatten()
    }

    fn text(&self) -> String {
        self.0.texts.next_or(String::new())
    }

    fn content(&self) -> String {
        self.0.contents.next_or(String::new())
    }

    fn html(&self) -> String {
        self.0.htmls.next_or(String::new())
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.0.attributes.borrow().contains_key(name)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.attributes.borrow().get(name).cloned()
    }

    fn value(&self) -> Value {
        self.0.values.next_or(Value::Null)
    }

    fn is_checked(&self) -> bool {
        self.0.checked.next_or(false)
    }
}

#[derive(Debug)]
struct SessionState {
    urls: Script<String>,
    status_codes: Script<u16>,
    headers: RefCell<HashMap<String, String>>,
    cookies: RefCell<HashMap<String, String>>,
    page: MockElement,
}

/// Scripted session double.
#[derive(Debug, Clone)]
pub struct MockSession(Rc<SessionState>);

impl Default for MockSession {
    fn default() -> Self {
        Self(Rc::new(SessionState {
            urls: Script::default(),
            status_codes: Script::default(),
            headers: RefCell::new(HashMap::new()),
            cookies: RefCell::new(HashMap::new()),
            page: MockElement::new(),
        }))
    }
}

impl MockSession {
    /// Create a session whose page is the given element double
    #[must_use]
    pub fn with_page(page: MockElement) -> Self {
        Self(Rc::new(SessionState {
            urls: Script::default(),
            status_codes: Script::default(),
            headers: RefCell::new(HashMap::new()),
            cookies: RefCell::new(HashMap::new()),
            page,
        }))
    }

    /// Create a session with no scripted observations
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a current-URL observation
    #[must_use]
    pub fn with_url(self, url: impl Into<String>) -> Self {
        self.0.urls.push(url.into());
        self
    }

    /// Queue a status-code observation
    #[must_use]
    pub fn with_status_code(self, code: u16) -> Self {
        self.0.status_codes.push(code);
        self
    }

    /// Set a response header
    #[must_use]
    pub fn with_header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.headers.borrow_mut().insert(name.into(), value.into());
        self
    }

    /// Set a cookie
    #[must_use]
    pub fn with_cookie(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.cookies.borrow_mut().insert(name.into(), value.into());
        self
    }

    /// Handle to the page double, for scripting after construction
    #[must_use]
    pub fn page_handle(&self) -> MockElement {
        self.0.page.clone()
    }
}

impl Session for MockSession {
    type Element = MockElement;

    fn current_url(&self) -> String {
        self.0.urls.next_or(String::new())
    }

    fn status_code(&self) -> u16 {
        self.0.status_codes.next_or(200)
    }

    fn response_header(&self, name: &str) -> Option<String> {
        self.0.headers.borrow().get(name).cloned()
    }

    fn cookie(&self, name: &str) -> Option<String> {
        self.0.cookies.borrow().get(name).cloned()
    }

    fn page(&self) -> MockElement {
        self.0.page.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_replays_last_value() {
        let element = MockElement::new().with_text("first").with_text("second");
        assert_eq!(element.text(), "first");
        assert_eq!(element.text(), "second");
        assert_eq!(element.text(), "second");
    }

    #[test]
    fn test_unscripted_observables_have_defaults() {
        let element = MockElement::new();
        assert_eq!(element.text(), "");
        assert!(element.find(&Selector::css("p")).is_none());
        assert!(element.find_all(&Selector::css("p")).is_empty());
        assert!(!element.is_checked());

        let session = MockSession::new();
        assert_eq!(session.status_code(), 200);
        assert_eq!(session.current_url(), "");
    }

    #[test]
    fn test_clones_share_script_state() {
        let element = MockElement::new().with_text("a").with_text("b");
        let twin = element.clone();
        assert_eq!(element.text(), "a");
        assert_eq!(twin.text(), "b");
    }

    #[test]
    fn test_session_page_is_shared() {
        let session =
            MockSession::with_page(MockElement::new().with_text("body")).with_url("http://x/");
        assert_eq!(session.page().text(), "body");
        assert_eq!(session.page_handle().text(), "body");
    }
}
