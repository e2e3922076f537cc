mod dump;
mod pipeline;

pub use dump::{format_symbols, typed_dump};
pub use pipeline::{build_files, transpile_file};
