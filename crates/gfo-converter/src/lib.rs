//! Converter page logic: validates Google Fonts stylesheet URLs and rewrites
//! them to this site's `css` and `download/css` endpoints.
//!
//! Everything that touches the page goes through [`View`], so the whole
//! module is usable without a browser.

pub mod colors;
pub mod controller;
pub mod markup;
pub mod rewriter;
pub mod url_rules;
pub mod view;

pub use colors::{ColorConfig, ColorError, ColorSlot, apply_color_overrides};
pub use controller::{Controller, Outcome, Session};
pub use rewriter::{Mode, PageLocation, RewriteError, derive_target_url};
pub use url_rules::{InputCheck, Rejection, check_input, is_valid_url};
pub use view::{ResultRow, Validity, View};
