//! Collaborator contracts: the page/session abstraction assertions run
//! against.
//!
//! The engine never drives a browser itself; it borrows a [`Session`] and
//! reads through it. Real navigation, DOM queries, and form introspection
//! belong to the implementor (a WebDriver bridge, a CDP client, an HTML
//! fixture, the in-crate [`crate::mock`] doubles). Everything here is
//! synchronous and read-only from the engine's point of view.

use serde_json::Value;

use crate::selector::Selector;

/// A live browsing session: current URL, response metadata, cookies, and the
/// document root.
pub trait Session {
    /// Element type produced by this session's page queries
    type Element: Element;

    /// The URL of the page currently loaded
    fn current_url(&self) -> String;

    /// Status code of the last response
    fn status_code(&self) -> u16;

    /// A response header by name, if present
    fn response_header(&self, name: &str) -> Option<String>;

    /// A cookie value by name, if set
    fn cookie(&self, name: &str) -> Option<String>;

    /// The document root of the current page
    fn page(&self) -> Self::Element;
}

/// A node in the page's element tree.
///
/// `find`/`find_all`/`find_field` are scoped to the receiver, so any element
/// can serve as the container for a narrower assertion.
pub trait Element: Clone {
    /// First descendant matching the selector, if any
    fn find(&self, selector: &Selector) -> Option<Self>;

    /// All descendants matching the selector
    fn find_all(&self, selector: &Selector) -> Vec<Self>;

    /// A form field looked up by id, name, label, or value
    fn find_field(&self, locator: &str) -> Option<Self>;

    /// Rendered text of this element
    fn text(&self) -> String;

    /// Raw markup of this element (outer HTML; on the document root, the
    /// full response body)
    fn content(&self) -> String;

    /// Inner markup of this element
    fn html(&self) -> String;

    /// Whether the attribute is present
    fn has_attribute(&self, name: &str) -> bool;

    /// Attribute value, if present
    fn attribute(&self, name: &str) -> Option<String>;

    /// Current form value; duck-typed because drivers report numbers,
    /// strings, or arrays depending on the control
    fn value(&self) -> Value;

    /// Checked state of a checkbox or radio control
    fn is_checked(&self) -> bool;
}
