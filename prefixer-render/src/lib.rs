//! Rendering helpers: console lines and a markdown run summary.

mod console;
mod markdown;

pub use console::{UNSATISFIABLE_HEADER, deferred_line, result_line, unsatisfiable_lines};
pub use markdown::render_report_md;
