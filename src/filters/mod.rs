pub mod apply;
pub mod content;

pub use apply::apply_filter;
pub use content::ContentFilter;
