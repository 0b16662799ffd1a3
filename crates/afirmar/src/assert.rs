//! The assertion surface: deadline-polled predicates over a borrowed
//! session.
//!
//! Every operation follows one shape: build a check closure that fetches the
//! actual value from the collaborator, compares it, and formats the exact
//! failure message; then hand the closure to the spin-wait executor with the
//! operation's timeout. Operations never loop themselves.
//!
//! ```text
//! caller ──► operation ──► check closure ──► spin ──► collaborator
//!                 │                            │
//!                 └── message templates ◄──────┘ (last failure surfaces)
//! ```

use serde_json::Value;
use std::time::Duration;

use crate::compare::{
    contains_ci, contains_normalized_ci, equals_loose, normalize_whitespace, stringify_value,
    Pattern,
};
use crate::result::{AssertError, AssertResult};
use crate::selector::Selector;
use crate::session::{Element, Session};
use crate::spin::{spin, SpinConfig};

/// Reduce a URL to its comparable form: scheme and host stripped, query
/// dropped, fragment kept, empty path mapped to `/`. A leading script
/// segment (`/name.php/`) is removed when more path follows it; a path that
/// *is* the script filename is left alone.
fn clean_url(url: &str) -> String {
    let (rest, fragment) = match url.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (url, None),
    };
    let rest = rest.split_once('?').map_or(rest, |(rest, _)| rest);

    let path = if let Some(idx) = rest.find("://") {
        let after_host = &rest[idx + 3..];
        after_host.find('/').map_or("", |i| &after_host[i..])
    } else {
        rest
    };
    let path = if path.is_empty() { "/" } else { path };

    let mut cleaned = strip_script_prefix(path).to_string();
    if let Some(fragment) = fragment {
        cleaned.push('#');
        cleaned.push_str(fragment);
    }
    cleaned
}

/// Drop a leading `/{name}.php/` segment, keeping the slash that follows.
fn strip_script_prefix(path: &str) -> &str {
    if let Some(rest) = path.strip_prefix('/') {
        if let Some((segment, _)) = rest.split_once('/') {
            if let Some(stem) = segment.strip_suffix(".php") {
                if !stem.is_empty() && !stem.contains('.') {
                    return &path[1 + segment.len()..];
                }
            }
        }
    }
    path
}

/// Retry-bounded assertions against a borrowed page/session collaborator.
///
/// One instance per test session; it holds only the session reference and
/// the default [`SpinConfig`], so it is freely reusable across assertion
/// calls. Every operation takes an optional trailing timeout that overrides
/// the default deadline for that call only.
#[derive(Debug)]
pub struct WebAssert<'a, S: Session> {
    session: &'a S,
    config: SpinConfig,
}

impl<'a, S: Session> WebAssert<'a, S> {
    /// Create an assertion surface over the session with default timing
    #[must_use]
    pub fn new(session: &'a S) -> Self {
        Self {
            session,
            config: SpinConfig::default(),
        }
    }

    /// Replace the default spin configuration
    #[must_use]
    pub const fn with_config(mut self, config: SpinConfig) -> Self {
        self.config = config;
        self
    }

    /// The session this surface asserts against
    #[must_use]
    pub const fn session(&self) -> &'a S {
        self.session
    }

    fn run<T>(
        &self,
        timeout: impl Into<Option<Duration>>,
        check: impl FnMut() -> AssertResult<T>,
    ) -> AssertResult<T> {
        let config = match timeout.into() {
            Some(timeout) => self.config.with_timeout(timeout),
            None => self.config,
        };
        spin(check, config)
    }

    /// Container element if given, otherwise the page root. Resolved once
    /// per operation; only the query inside the check is re-run per poll.
    fn root(&self, container: Option<&S::Element>) -> S::Element {
        container.map_or_else(|| self.session.page(), Clone::clone)
    }

    // ------------------------------------------------------------------
    // Address
    // ------------------------------------------------------------------

    /// Assert the current page address equals `page` (path plus fragment,
    /// scheme and host ignored).
    ///
    /// # Errors
    ///
    /// `Current page is "{actual}", but "{expected}" expected.`
    pub fn address_equals(
        &self,
        page: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let expected = clean_url(page);
        self.run(timeout, || {
            let actual = clean_url(&self.session.current_url());
            if actual == expected {
                Ok(())
            } else {
                Err(AssertError::expectation(format!(
                    "Current page is \"{actual}\", but \"{expected}\" expected."
                )))
            }
        })
    }

    /// Assert the current page address differs from `page`.
    ///
    /// # Errors
    ///
    /// `Current page is "{actual}", but should not be.`
    pub fn address_not_equals(
        &self,
        page: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let expected = clean_url(page);
        self.run(timeout, || {
            let actual = clean_url(&self.session.current_url());
            if actual == expected {
                Err(AssertError::expectation(format!(
                    "Current page is \"{actual}\", but should not be."
                )))
            } else {
                Ok(())
            }
        })
    }

    /// Assert the current page address matches a literal-notation regex.
    ///
    /// # Errors
    ///
    /// `Current page "{actual}" does not match the regex "{pattern}".`
    pub fn address_matches(
        &self,
        pattern: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let pattern = Pattern::parse(pattern)?;
        self.run(timeout, || {
            let actual = clean_url(&self.session.current_url());
            if pattern.is_match(&actual) {
                Ok(())
            } else {
                Err(AssertError::expectation(format!(
                    "Current page \"{actual}\" does not match the regex \"{pattern}\"."
                )))
            }
        })
    }

    // ------------------------------------------------------------------
    // Cookies, status, headers
    // ------------------------------------------------------------------

    /// Assert a cookie is set to `value` exactly. A missing cookie is a
    /// mismatch and renders as the empty string.
    ///
    /// # Errors
    ///
    /// `Cookie "{name}" value is "{actual}", but should be "{expected}".`
    pub fn cookie_equals(
        &self,
        name: &str,
        value: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        self.run(timeout, || {
            let actual = self.session.cookie(name);
            if actual.as_deref() == Some(value) {
                Ok(())
            } else {
                Err(AssertError::expectation(format!(
                    "Cookie \"{name}\" value is \"{}\", but should be \"{value}\".",
                    actual.unwrap_or_default()
                )))
            }
        })
    }

    /// Assert a cookie exists.
    ///
    /// # Errors
    ///
    /// `Cookie "{name}" is not set, but should be.`
    pub fn cookie_exists(
        &self,
        name: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        self.run(timeout, || {
            if self.session.cookie(name).is_some() {
                Ok(())
            } else {
                Err(AssertError::expectation(format!(
                    "Cookie \"{name}\" is not set, but should be."
                )))
            }
        })
    }

    /// Assert the response status code.
    ///
    /// # Errors
    ///
    /// `Current response status code is {actual}, but {expected} expected.`
    pub fn status_code_equals(
        &self,
        code: u16,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        self.run(timeout, || {
            let actual = self.session.status_code();
            if actual == code {
                Ok(())
            } else {
                Err(AssertError::expectation(format!(
                    "Current response status code is {actual}, but {code} expected."
                )))
            }
        })
    }

    /// Assert the response status code differs from `code`.
    ///
    /// # Errors
    ///
    /// `Current response status code is {actual}, but should not be.`
    pub fn status_code_not_equals(
        &self,
        code: u16,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        self.run(timeout, || {
            let actual = self.session.status_code();
            if actual == code {
                Err(AssertError::expectation(format!(
                    "Current response status code is {actual}, but should not be."
                )))
            } else {
                Ok(())
            }
        })
    }

    /// Assert a response header equals `value` exactly.
    ///
    /// # Errors
    ///
    /// `Current response header "{name}" is "{actual}", but "{expected}"
    /// expected.`
    pub fn response_header_equals(
        &self,
        name: &str,
        value: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        self.run(timeout, || {
            let actual = self.session.response_header(name);
            if actual.as_deref() == Some(value) {
                Ok(())
            } else {
                Err(AssertError::expectation(format!(
                    "Current response header \"{name}\" is \"{}\", but \"{value}\" expected.",
                    actual.unwrap_or_default()
                )))
            }
        })
    }

    /// Assert a response header differs from `value`.
    ///
    /// # Errors
    ///
    /// `Current response header "{name}" is "{actual}", but should not be.`
    pub fn response_header_not_equals(
        &self,
        name: &str,
        value: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        self.run(timeout, || {
            let actual = self.session.response_header(name);
            if actual.as_deref() == Some(value) {
                Err(AssertError::expectation(format!(
                    "Current response header \"{name}\" is \"{}\", but should not be.",
                    actual.unwrap_or_default()
                )))
            } else {
                Ok(())
            }
        })
    }

    /// Assert a response header contains `value`, ignoring case.
    ///
    /// # Errors
    ///
    /// `The text "{value}" was not found anywhere in the "{name}" response
    /// header.`
    pub fn response_header_contains(
        &self,
        name: &str,
        value: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        self.run(timeout, || {
            let actual = self.session.response_header(name).unwrap_or_default();
            if contains_ci(&actual, value) {
                Ok(())
            } else {
                Err(AssertError::expectation(format!(
                    "The text \"{value}\" was not found anywhere in the \"{name}\" response header."
                )))
            }
        })
    }

    /// Assert a response header does not contain `value`, ignoring case.
    ///
    /// # Errors
    ///
    /// `The text "{value}" was found in the "{name}" response header, but it
    /// should not.`
    pub fn response_header_not_contains(
        &self,
        name: &str,
        value: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        self.run(timeout, || {
            let actual = self.session.response_header(name).unwrap_or_default();
            if contains_ci(&actual, value) {
                Err(AssertError::expectation(format!(
                    "The text \"{value}\" was found in the \"{name}\" response header, but it should not."
                )))
            } else {
                Ok(())
            }
        })
    }

    /// Assert a response header matches a literal-notation regex.
    ///
    /// # Errors
    ///
    /// `The pattern "{pattern}" was not found anywhere in the "{name}"
    /// response header.`
    pub fn response_header_matches(
        &self,
        name: &str,
        pattern: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let pattern = Pattern::parse(pattern)?;
        self.run(timeout, || {
            let actual = self.session.response_header(name).unwrap_or_default();
            if pattern.is_match(&actual) {
                Ok(())
            } else {
                Err(AssertError::expectation(format!(
                    "The pattern \"{pattern}\" was not found anywhere in the \"{name}\" response header."
                )))
            }
        })
    }

    /// Assert a response header does not match a literal-notation regex.
    ///
    /// # Errors
    ///
    /// `The pattern "{pattern}" was found in the text of the "{name}"
    /// response header, but it should not.`
    pub fn response_header_not_matches(
        &self,
        name: &str,
        pattern: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let pattern = Pattern::parse(pattern)?;
        self.run(timeout, || {
            let actual = self.session.response_header(name).unwrap_or_default();
            if pattern.is_match(&actual) {
                Err(AssertError::expectation(format!(
                    "The pattern \"{pattern}\" was found in the text of the \"{name}\" response header, but it should not."
                )))
            } else {
                Ok(())
            }
        })
    }

    // ------------------------------------------------------------------
    // Page text and raw response
    // ------------------------------------------------------------------

    /// Assert the page text contains `text`, ignoring case and collapsing
    /// whitespace.
    ///
    /// # Errors
    ///
    /// `The text "{text}" was not found anywhere in the text of the current
    /// page ("{actual}").` — `{actual}` is whitespace-normalized.
    pub fn page_text_contains(
        &self,
        text: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let page = self.session.page();
        self.run(timeout, || {
            let actual = normalize_whitespace(&page.text());
            if contains_ci(&actual, text) {
                Ok(())
            } else {
                Err(AssertError::response_text(format!(
                    "The text \"{text}\" was not found anywhere in the text of the current page (\"{actual}\")."
                )))
            }
        })
    }

    /// Assert the page text does not contain `text`, ignoring case and
    /// collapsing whitespace.
    ///
    /// # Errors
    ///
    /// `The text "{text}" appears in the text of this page, but it should
    /// not.`
    pub fn page_text_not_contains(
        &self,
        text: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let page = self.session.page();
        self.run(timeout, || {
            if contains_normalized_ci(&page.text(), text) {
                Err(AssertError::response_text(format!(
                    "The text \"{text}\" appears in the text of this page, but it should not."
                )))
            } else {
                Ok(())
            }
        })
    }

    /// Assert the page text matches a literal-notation regex.
    ///
    /// # Errors
    ///
    /// `The pattern {pattern} was not found anywhere in the text of the
    /// current page ("{actual}").`
    pub fn page_text_matches(
        &self,
        pattern: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let pattern = Pattern::parse(pattern)?;
        let page = self.session.page();
        self.run(timeout, || {
            let actual = normalize_whitespace(&page.text());
            if pattern.is_match(&actual) {
                Ok(())
            } else {
                Err(AssertError::response_text(format!(
                    "The pattern {pattern} was not found anywhere in the text of the current page (\"{actual}\")."
                )))
            }
        })
    }

    /// Assert the page text does not match a literal-notation regex.
    ///
    /// # Errors
    ///
    /// `The pattern {pattern} was found in the text of the current page, but
    /// it should not.`
    pub fn page_text_not_matches(
        &self,
        pattern: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let pattern = Pattern::parse(pattern)?;
        let page = self.session.page();
        self.run(timeout, || {
            let actual = normalize_whitespace(&page.text());
            if pattern.is_match(&actual) {
                Err(AssertError::response_text(format!(
                    "The pattern {pattern} was found in the text of the current page, but it should not."
                )))
            } else {
                Ok(())
            }
        })
    }

    /// Assert the raw response markup contains `text`, ignoring case.
    ///
    /// # Errors
    ///
    /// `The string "{text}" was not found anywhere in the HTML response of
    /// the current page.`
    pub fn response_contains(
        &self,
        text: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let page = self.session.page();
        self.run(timeout, || {
            if contains_ci(&page.content(), text) {
                Ok(())
            } else {
                Err(AssertError::expectation(format!(
                    "The string \"{text}\" was not found anywhere in the HTML response of the current page."
                )))
            }
        })
    }

    /// Assert the raw response markup does not contain `text`, ignoring
    /// case.
    ///
    /// # Errors
    ///
    /// `The string "{text}" appears in the HTML response of this page, but
    /// it should not.`
    pub fn response_not_contains(
        &self,
        text: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let page = self.session.page();
        self.run(timeout, || {
            if contains_ci(&page.content(), text) {
                Err(AssertError::expectation(format!(
                    "The string \"{text}\" appears in the HTML response of this page, but it should not."
                )))
            } else {
                Ok(())
            }
        })
    }

    /// Assert the raw response markup matches a literal-notation regex.
    ///
    /// # Errors
    ///
    /// `The pattern {pattern} was not found anywhere in the HTML response of
    /// the page.`
    pub fn response_matches(
        &self,
        pattern: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let pattern = Pattern::parse(pattern)?;
        let page = self.session.page();
        self.run(timeout, || {
            if pattern.is_match(&page.content()) {
                Ok(())
            } else {
                Err(AssertError::expectation(format!(
                    "The pattern {pattern} was not found anywhere in the HTML response of the page."
                )))
            }
        })
    }

    /// Assert the raw response markup does not match a literal-notation
    /// regex.
    ///
    /// # Errors
    ///
    /// `The pattern {pattern} was found in the HTML response of the page,
    /// but it should not.`
    pub fn response_not_matches(
        &self,
        pattern: &str,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let pattern = Pattern::parse(pattern)?;
        let page = self.session.page();
        self.run(timeout, || {
            if pattern.is_match(&page.content()) {
                Err(AssertError::expectation(format!(
                    "The pattern {pattern} was found in the HTML response of the page, but it should not."
                )))
            } else {
                Ok(())
            }
        })
    }

    // ------------------------------------------------------------------
    // Elements
    // ------------------------------------------------------------------

    /// Assert exactly `count` elements match the selector. The count is
    /// re-polled; the failure reports the last observed count.
    ///
    /// # Errors
    ///
    /// `{actual} elements matching {kind} "{locator}" found on the page, but
    /// should be {expected}.`
    pub fn elements_count(
        &self,
        selector: &Selector,
        count: usize,
        container: Option<&S::Element>,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let root = self.root(container);
        self.run(timeout, || {
            let actual = root.find_all(selector).len();
            if actual == count {
                Ok(())
            } else {
                Err(AssertError::expectation(format!(
                    "{actual} elements matching {} found on the page, but should be {count}.",
                    selector.description()
                )))
            }
        })
    }

    /// Assert an element matching the selector exists and return it.
    ///
    /// # Errors
    ///
    /// The selector's "not found" template, e.g. `Element matching css
    /// "h2 > span" not found.`
    pub fn element_exists(
        &self,
        selector: &Selector,
        container: Option<&S::Element>,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<S::Element> {
        let root = self.root(container);
        self.run(timeout, || {
            root.find(selector)
                .ok_or_else(|| AssertError::element_not_found(selector.not_found_message()))
        })
    }

    /// Assert no element matches the selector.
    ///
    /// # Errors
    ///
    /// The selector's "appears" template, e.g. `An element matching css
    /// "h2 > span" appears on this page, but it should not.`
    pub fn element_not_exists(
        &self,
        selector: &Selector,
        container: Option<&S::Element>,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let root = self.root(container);
        self.run(timeout, || {
            if root.find(selector).is_some() {
                Err(AssertError::expectation(selector.appears_message()))
            } else {
                Ok(())
            }
        })
    }

    /// Assert the matched element's text contains `text`, ignoring case.
    ///
    /// # Errors
    ///
    /// `The text "{text}" was not found in the text of the element matching
    /// {kind} "{locator}".`
    pub fn element_text_contains(
        &self,
        selector: &Selector,
        text: &str,
        container: Option<&S::Element>,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let root = self.root(container);
        self.run(timeout, || {
            let element = root
                .find(selector)
                .ok_or_else(|| AssertError::element_not_found(selector.not_found_message()))?;
            if contains_ci(&element.text(), text) {
                Ok(())
            } else {
                Err(AssertError::expectation(format!(
                    "The text \"{text}\" was not found in the text of the element matching {}.",
                    selector.description()
                )))
            }
        })
    }

    /// Assert the matched element's text does not contain `text`, ignoring
    /// case.
    ///
    /// # Errors
    ///
    /// `The text "{text}" appears in the text of the element matching {kind}
    /// "{locator}", but it should not.`
    pub fn element_text_not_contains(
        &self,
        selector: &Selector,
        text: &str,
        container: Option<&S::Element>,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let root = self.root(container);
        self.run(timeout, || {
            let element = root
                .find(selector)
                .ok_or_else(|| AssertError::element_not_found(selector.not_found_message()))?;
            if contains_ci(&element.text(), text) {
                Err(AssertError::expectation(format!(
                    "The text \"{text}\" appears in the text of the element matching {}, but it should not.",
                    selector.description()
                )))
            } else {
                Ok(())
            }
        })
    }

    /// Assert the matched element's inner markup contains `html`, ignoring
    /// case.
    ///
    /// # Errors
    ///
    /// `The string "{html}" was not found in the HTML of the element
    /// matching {kind} "{locator}".`
    pub fn element_contains(
        &self,
        selector: &Selector,
        html: &str,
        container: Option<&S::Element>,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let root = self.root(container);
        self.run(timeout, || {
            let element = root
                .find(selector)
                .ok_or_else(|| AssertError::element_not_found(selector.not_found_message()))?;
            if contains_ci(&element.html(), html) {
                Ok(())
            } else {
                Err(AssertError::element_html(format!(
                    "The string \"{html}\" was not found in the HTML of the element matching {}.",
                    selector.description()
                )))
            }
        })
    }

    /// Assert the matched element's inner markup does not contain `html`,
    /// ignoring case.
    ///
    /// # Errors
    ///
    /// `The string "{html}" appears in the HTML of the element matching
    /// {kind} "{locator}", but it should not.`
    pub fn element_not_contains(
        &self,
        selector: &Selector,
        html: &str,
        container: Option<&S::Element>,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let root = self.root(container);
        self.run(timeout, || {
            let element = root
                .find(selector)
                .ok_or_else(|| AssertError::element_not_found(selector.not_found_message()))?;
            if contains_ci(&element.html(), html) {
                Err(AssertError::element_html(format!(
                    "The string \"{html}\" appears in the HTML of the element matching {}, but it should not.",
                    selector.description()
                )))
            } else {
                Ok(())
            }
        })
    }

    /// Assert the matched element carries the attribute and return the
    /// element.
    ///
    /// # Errors
    ///
    /// `The attribute "{attr}" was not found in the element matching {kind}
    /// "{locator}".`
    pub fn element_attribute_exists(
        &self,
        selector: &Selector,
        attribute: &str,
        container: Option<&S::Element>,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<S::Element> {
        let root = self.root(container);
        self.run(timeout, || {
            let element = root
                .find(selector)
                .ok_or_else(|| AssertError::element_not_found(selector.not_found_message()))?;
            if element.has_attribute(attribute) {
                Ok(element)
            } else {
                Err(AssertError::element_html(format!(
                    "The attribute \"{attribute}\" was not found in the element matching {}.",
                    selector.description()
                )))
            }
        })
    }

    /// Assert the attribute of the matched element contains `text`,
    /// ignoring case. The attribute must exist.
    ///
    /// # Errors
    ///
    /// `The text "{text}" was not found in the attribute "{attr}" of the
    /// element matching {kind} "{locator}".`
    pub fn element_attribute_contains(
        &self,
        selector: &Selector,
        attribute: &str,
        text: &str,
        container: Option<&S::Element>,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let root = self.root(container);
        self.run(timeout, || {
            let element = self.attribute_bearer(&root, selector, attribute)?;
            let actual = element.attribute(attribute).unwrap_or_default();
            if contains_ci(&actual, text) {
                Ok(())
            } else {
                Err(AssertError::element_html(format!(
                    "The text \"{text}\" was not found in the attribute \"{attribute}\" of the element matching {}.",
                    selector.description()
                )))
            }
        })
    }

    /// Assert the attribute of the matched element does not contain `text`,
    /// ignoring case. The attribute must exist.
    ///
    /// # Errors
    ///
    /// `The text "{text}" was found in the attribute "{attr}" of the
    /// element matching {kind} "{locator}".`
    pub fn element_attribute_not_contains(
        &self,
        selector: &Selector,
        attribute: &str,
        text: &str,
        container: Option<&S::Element>,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let root = self.root(container);
        self.run(timeout, || {
            let element = self.attribute_bearer(&root, selector, attribute)?;
            let actual = element.attribute(attribute).unwrap_or_default();
            if contains_ci(&actual, text) {
                Err(AssertError::element_html(format!(
                    "The text \"{text}\" was found in the attribute \"{attribute}\" of the element matching {}.",
                    selector.description()
                )))
            } else {
                Ok(())
            }
        })
    }

    fn attribute_bearer(
        &self,
        root: &S::Element,
        selector: &Selector,
        attribute: &str,
    ) -> AssertResult<S::Element> {
        let element = root
            .find(selector)
            .ok_or_else(|| AssertError::element_not_found(selector.not_found_message()))?;
        if element.has_attribute(attribute) {
            Ok(element)
        } else {
            Err(AssertError::element_html(format!(
                "The attribute \"{attribute}\" was not found in the element matching {}.",
                selector.description()
            )))
        }
    }

    // ------------------------------------------------------------------
    // Form fields
    // ------------------------------------------------------------------

    /// Assert a form field (looked up by id, name, label, or value) exists
    /// and return it.
    ///
    /// # Errors
    ///
    /// `Form field with id|name|label|value "{name}" not found.`
    pub fn field_exists(
        &self,
        field: &str,
        container: Option<&S::Element>,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<S::Element> {
        let root = self.root(container);
        self.run(timeout, || {
            root.find_field(field).ok_or_else(|| {
                AssertError::element_not_found(format!(
                    "Form field with id|name|label|value \"{field}\" not found."
                ))
            })
        })
    }

    /// Assert no form field matches `field`.
    ///
    /// # Errors
    ///
    /// `A field "{name}" appears on this page, but it should not.`
    pub fn field_not_exists(
        &self,
        field: &str,
        container: Option<&S::Element>,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let root = self.root(container);
        self.run(timeout, || {
            if root.find_field(field).is_some() {
                Err(AssertError::expectation(format!(
                    "A field \"{field}\" appears on this page, but it should not."
                )))
            } else {
                Ok(())
            }
        })
    }

    /// Assert a form field's value equals `value` under loose equality
    /// (canonical string forms compared exactly, so `234` equals `"234"`).
    ///
    /// # Errors
    ///
    /// `The field "{name}" value is "{actual}", but "{expected}" expected.`
    pub fn field_value_equals(
        &self,
        field: &str,
        value: impl Into<Value>,
        container: Option<&S::Element>,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let expected = value.into();
        let expected_str = stringify_value(&expected);
        let root = self.root(container);
        self.run(timeout, || {
            let element = self.field(&root, field)?;
            let actual = element.value();
            if equals_loose(&expected, &actual) {
                Ok(())
            } else {
                Err(AssertError::expectation(format!(
                    "The field \"{field}\" value is \"{}\", but \"{expected_str}\" expected.",
                    stringify_value(&actual)
                )))
            }
        })
    }

    /// Assert a form field's value differs from `value` under loose
    /// equality.
    ///
    /// # Errors
    ///
    /// `The field "{name}" value is "{actual}", but it should not be.`
    pub fn field_value_not_equals(
        &self,
        field: &str,
        value: impl Into<Value>,
        container: Option<&S::Element>,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let expected = value.into();
        let root = self.root(container);
        self.run(timeout, || {
            let element = self.field(&root, field)?;
            let actual = element.value();
            if equals_loose(&expected, &actual) {
                Err(AssertError::expectation(format!(
                    "The field \"{field}\" value is \"{}\", but it should not be.",
                    stringify_value(&actual)
                )))
            } else {
                Ok(())
            }
        })
    }

    /// Assert a checkbox field is checked.
    ///
    /// # Errors
    ///
    /// `Checkbox "{name}" is not checked, but it should be.`
    pub fn checkbox_checked(
        &self,
        field: &str,
        container: Option<&S::Element>,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let root = self.root(container);
        self.run(timeout, || {
            let element = self.field(&root, field)?;
            if element.is_checked() {
                Ok(())
            } else {
                Err(AssertError::expectation(format!(
                    "Checkbox \"{field}\" is not checked, but it should be."
                )))
            }
        })
    }

    /// Assert a checkbox field is not checked.
    ///
    /// # Errors
    ///
    /// `Checkbox "{name}" is checked, but it should not be.`
    pub fn checkbox_not_checked(
        &self,
        field: &str,
        container: Option<&S::Element>,
        timeout: impl Into<Option<Duration>>,
    ) -> AssertResult<()> {
        let root = self.root(container);
        self.run(timeout, || {
            let element = self.field(&root, field)?;
            if element.is_checked() {
                Err(AssertError::expectation(format!(
                    "Checkbox \"{field}\" is checked, but it should not be."
                )))
            } else {
                Ok(())
            }
        })
    }

    fn field(&self, root: &S::Element, field: &str) -> AssertResult<S::Element> {
        root.find_field(field).ok_or_else(|| {
            AssertError::element_not_found(format!(
                "Form field with id|name|label|value \"{field}\" not found."
            ))
        })
    }
}
