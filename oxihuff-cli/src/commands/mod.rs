//! Command implementations for OxiHuff CLI.

pub mod compress;
pub mod decompress;
pub mod info;

pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
pub use info::cmd_info;
pub use test::cmd_test;

use std::path::Path;

/// Options shared by `compress` and `decompress`.
pub struct TransformOptions<'a> {
    /// Explicit output path (single input only).
    pub output: Option<&'a Path>,
    /// Overwrite existing outputs.
    pub force: bool,
    /// Print per-file statistics.
    pub verbose: bool,
}
