//! Report renderers for resolved licenses.
//!
//! - [`list`]: one `* name: license` line per package.
//! - [`document`]: Markdown embedding the full license text of every package.
//! - [`terminal`]: colored summary table; respects `--verbose` / `--quiet`.

pub mod document;
pub mod list;
pub mod terminal;
