//! Afirmar: retry-bounded assertions for browser-driven tests
//!
//! Afirmar (Spanish: "to assert") checks what a page *should* look like
//! against what a live session *currently* reports, and keeps re-checking
//! until the page agrees or a deadline elapses. Dynamic pages settle on
//! their own schedule; the assertion surface absorbs that instead of
//! forcing sleeps into test code.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  WebAssert (assertion surface, ~37 operations)               │
//! │     │ check closure + timeout                                │
//! │     ▼                                                        │
//! │  spin (deadline-bounded retry)     Selector (message-aware   │
//! │     │ reads through               locator union)             │
//! │     ▼                                                        │
//! │  Session / Element traits  ◄──  real driver or mock doubles  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use afirmar::{MockElement, MockSession, Selector, WebAssert};
//!
//! let session = MockSession::with_page(
//!     MockElement::new().with_text("Welcome back"),
//! )
//! .with_status_code(200);
//!
//! let assert = WebAssert::new(&session);
//! assert.status_code_equals(200, None).unwrap();
//! assert.page_text_contains("welcome", None).unwrap();
//! ```
//!
//! Failure messages are stable, exact strings; tests and step definitions
//! may match on them.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod assert;
pub mod compare;
pub mod mock;
pub mod result;
pub mod selector;
pub mod session;
pub mod spin;

pub use assert::WebAssert;
pub use mock::{MockElement, MockSession};
pub use result::{AssertError, AssertResult};
pub use selector::Selector;
pub use session::{Element, Session};
pub use spin::{spin, SpinConfig, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS};
