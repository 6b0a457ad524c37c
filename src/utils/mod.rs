pub mod environment;
pub mod files;
pub mod terminal;
pub mod text;
pub mod timestamps;

pub use environment::{get_max_archive_bytes, get_seed_from_env};
pub use files::{format_path_with_tilde, read_file_as_text, validate_file_size};
pub use terminal::sanitize_for_terminal;
pub use text::decode_entities;
pub use timestamps::{format_absolute, format_relative, format_relative_at};
