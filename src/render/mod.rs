//! Rendering module
//!
//! Converts Markdown documents into complete styled HTML pages: the markdown
//! submodule produces an HTML fragment, the template submodule wraps it in
//! the page shell.

pub mod markdown;
pub mod template;

pub use markdown::render_markdown;
pub use template::render_page;
