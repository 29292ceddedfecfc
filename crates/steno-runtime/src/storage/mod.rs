mod fs;

pub use fs::{ensure_dir, list_files_with_extension, write_json_pretty, write_text};
