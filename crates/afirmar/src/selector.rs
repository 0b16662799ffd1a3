//! Selector abstraction for element lookup and failure messages.
//!
//! A selector pairs a lookup kind with its locator value. Structural kinds
//! (`Css`, `XPath`) carry a single query string; semantic kinds (`Named`,
//! `Custom`) carry a (sub-type, sub-value) pair, e.g. `named ("button",
//! "Sign in")`. The assertion surface never interprets the value itself;
//! interpretation belongs to the page collaborator. What lives here is the
//! rendering of selectors into the exact message fragments failures use.

/// Selector kind plus locator value for finding elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector (e.g., "h2 > span")
    Css(String),
    /// XPath selector
    XPath(String),
    /// Semantic lookup: (element kind, locator), e.g. ("button", "Sign in")
    Named(String, String),
    /// Engine-specific lookup: (engine name, locator)
    Custom(String, String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::XPath(selector.into())
    }

    /// Create a named selector from its sub-type and locator
    #[must_use]
    pub fn named(sub_type: impl Into<String>, locator: impl Into<String>) -> Self {
        Self::Named(sub_type.into(), locator.into())
    }

    /// Create a custom selector from its engine name and locator
    #[must_use]
    pub fn custom(engine: impl Into<String>, locator: impl Into<String>) -> Self {
        Self::Custom(engine.into(), locator.into())
    }

    /// The kind tag as it appears in failure messages
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Css(_) => "css",
            Self::XPath(_) => "xpath",
            Self::Named(..) => "named",
            Self::Custom(..) => "custom",
        }
    }

    /// The locator value rendered for messages: scalar values as-is,
    /// pair values joined by a single space.
    #[must_use]
    pub fn display_value(&self) -> String {
        match self {
            Self::Css(value) | Self::XPath(value) => value.clone(),
            Self::Named(sub_type, sub_value) | Self::Custom(sub_type, sub_value) => {
                format!("{sub_type} {sub_value}")
            }
        }
    }

    /// The `{kind} "{value}"` fragment embedded in element-scoped messages.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{} \"{}\"", self.kind(), self.display_value())
    }

    /// Message for an element that was required but absent.
    ///
    /// `Named` reads "with named"; every other kind reads "matching {kind}".
    #[must_use]
    pub fn not_found_message(&self) -> String {
        match self {
            Self::Named(..) => format!("Element with named \"{}\" not found.", self.display_value()),
            _ => format!("Element matching {} not found.", self.description()),
        }
    }

    /// Message for an element that must be absent but was found.
    ///
    /// Only `Named` gets the sub-type phrasing; tuple-valued `Custom` still
    /// renders through the generic template. The two templates are
    /// deliberately separate from [`Selector::not_found_message`].
    #[must_use]
    pub fn appears_message(&self) -> String {
        match self {
            Self::Named(sub_type, sub_value) => format!(
                "An {sub_type} matching locator \"{sub_value}\" appears on this page, but it should not."
            ),
            _ => format!(
                "An element matching {} appears on this page, but it should not.",
                self.description()
            ),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod display {
        use super::*;

        #[test]
        fn test_scalar_value_is_rendered_as_is() {
            let selector = Selector::css("h2 > span");
            assert_eq!(selector.display_value(), "h2 > span");
            assert_eq!(selector.description(), "css \"h2 > span\"");
        }

        #[test]
        fn test_pair_value_is_joined_by_single_space() {
            let selector = Selector::named("element", "Test");
            assert_eq!(selector.display_value(), "element Test");

            let selector = Selector::custom("test", "foo");
            assert_eq!(selector.display_value(), "test foo");
        }

        #[test]
        fn test_kind_tags() {
            assert_eq!(Selector::css("a").kind(), "css");
            assert_eq!(Selector::xpath("//a").kind(), "xpath");
            assert_eq!(Selector::named("a", "b").kind(), "named");
            assert_eq!(Selector::custom("a", "b").kind(), "custom");
        }
    }

    mod not_found_template {
        use super::*;

        #[test]
        fn test_named_uses_with_phrasing() {
            assert_eq!(
                Selector::named("element", "Test").not_found_message(),
                "Element with named \"element Test\" not found."
            );
        }

        #[test]
        fn test_other_kinds_use_matching_phrasing() {
            assert_eq!(
                Selector::css("h2 > span").not_found_message(),
                "Element matching css \"h2 > span\" not found."
            );
            assert_eq!(
                Selector::xpath("//h2/span").not_found_message(),
                "Element matching xpath \"//h2/span\" not found."
            );
            assert_eq!(
                Selector::custom("test", "foo").not_found_message(),
                "Element matching custom \"test foo\" not found."
            );
        }
    }

    mod appears_template {
        use super::*;

        #[test]
        fn test_named_pair_uses_sub_type_phrasing() {
            assert_eq!(
                Selector::named("button", "Test").appears_message(),
                "An button matching locator \"Test\" appears on this page, but it should not."
            );
        }

        #[test]
        fn test_custom_pair_stays_on_generic_template() {
            assert_eq!(
                Selector::custom("test", "foo").appears_message(),
                "An element matching custom \"test foo\" appears on this page, but it should not."
            );
        }

        #[test]
        fn test_scalar_kinds_use_generic_template() {
            assert_eq!(
                Selector::css("h2 > span").appears_message(),
                "An element matching css \"h2 > span\" appears on this page, but it should not."
            );
        }
    }
}
