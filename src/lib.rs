//! folio: a portfolio and article reader.
//!
//! Articles are markdown files with YAML front matter. Each article is split into its
//! level-2 sections with tree-sitter, and read either as a full page or in a drawer
//! layered over the home page. The drawer is driven by the `?a=<slug>` query parameter
//! and a small state machine that animates it in and out, follows swipe gestures, traps
//! focus and keeps the page behind it inert until it is gone.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod content;
pub mod document;
pub mod error;
pub mod formats;
pub mod logging;
pub mod overlay;
pub mod render;
pub mod route;
pub mod section;
pub mod section_nav;
pub mod site;
pub mod slug;
pub mod theme;
pub mod ui;
