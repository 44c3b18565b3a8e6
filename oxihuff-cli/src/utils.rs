//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension given to compressed files.
pub const COMPRESSED_EXT: &str = "hf";

/// Extension given to decompressed files whose name does not end in `.hf`.
pub const UNCOMPRESSED_EXT: &str = "uhf";

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// Print a line above the progress bar, or plainly when the bar is hidden.
pub fn print_line(pb: &ProgressBar, line: String) {
    if pb.is_hidden() {
        println!("{}", line);
    } else {
        pb.println(line);
    }
}

/// `file.txt` -> `file.txt.hf`
pub fn compressed_path(input: &Path) -> PathBuf {
    append_extension(input, COMPRESSED_EXT)
}

/// `file.txt.hf` -> `file.txt`, anything else -> `name.uhf`
pub fn decompressed_path(input: &Path) -> PathBuf {
    match input.extension() {
        Some(ext) if ext == COMPRESSED_EXT => input.with_extension(""),
        _ => append_extension(input, UNCOMPRESSED_EXT),
    }
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Pick the output path for one input.
///
/// An explicit `-o` is only accepted together with a single input file.
pub fn resolve_output(
    input: &Path,
    explicit: Option<&Path>,
    input_count: usize,
    derive: fn(&Path) -> PathBuf,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match explicit {
        Some(_) if input_count > 1 => {
            Err("--output can only be used with a single input file".into())
        }
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(derive(input)),
    }
}

/// Refuse to clobber an existing file unless `force` is set.
pub fn check_overwrite(output: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !force && output.exists() {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            output.display()
        )
        .into());
    }
    Ok(())
}

/// Refuse an output path that names the input file itself.
///
/// Creating the output would truncate the input before it is read.
pub fn ensure_distinct(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let (Ok(a), Ok(b)) = (fs::canonicalize(input), fs::canonicalize(output)) {
        if a == b {
            return Err(format!("output {} is the input file", output.display()).into());
        }
    }
    Ok(())
}

/// Delete an output file this run created but could not finish.
pub fn remove_partial(output: &Path) {
    if let Err(e) = fs::remove_file(output) {
        log::warn!("could not remove partial output {}: {}", output.display(), e);
    }
}

/// Give `output` the modification time of `input`.
pub fn copy_mtime(input: &Path, output: &Path) -> std::io::Result<()> {
    let metadata = fs::metadata(input)?;
    let mtime = filetime::FileTime::from_last_modification_time(&metadata);
    filetime::set_file_mtime(output, mtime)
}

/// Format a byte count for humans.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

/// Fresh, empty directory under the system temp dir.
#[cfg(test)]
pub fn scratch_dir(name: &str) -> PathBuf {
    let unique = format!("oxihuff-cli-{}-{}", name, std::process::id());
    let dir = std::env::temp_dir().join(unique);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compressed_path() {
        assert_eq!(
            compressed_path(Path::new("notes.txt")),
            PathBuf::from("notes.txt.hf")
        );
        assert_eq!(
            compressed_path(Path::new("dir/README")),
            PathBuf::from("dir/README.hf")
        );
    }

    #[test]
    fn test_decompressed_path() {
        assert_eq!(
            decompressed_path(Path::new("notes.txt.hf")),
            PathBuf::from("notes.txt")
        );
        assert_eq!(
            decompressed_path(Path::new("dir/data.bin")),
            PathBuf::from("dir/data.bin.uhf")
        );
        assert_eq!(
            decompressed_path(Path::new("archive")),
            PathBuf::from("archive.uhf")
        );
    }

    #[test]
    fn test_resolve_output() {
        let input = Path::new("a.txt");
        let out = resolve_output(input, None, 3, compressed_path).unwrap();
        assert_eq!(out, PathBuf::from("a.txt.hf"));

        let out = resolve_output(input, Some(Path::new("x.hf")), 1, compressed_path).unwrap();
        assert_eq!(out, PathBuf::from("x.hf"));

        assert!(resolve_output(input, Some(Path::new("x.hf")), 2, compressed_path).is_err());
    }

    #[test]
    fn test_check_overwrite() {
        let dir = scratch_dir("overwrite");
        let existing = dir.join("exists.hf");
        fs::write(&existing, b"x").unwrap();

        assert!(check_overwrite(&existing, false).is_err());
        assert!(check_overwrite(&existing, true).is_ok());
        assert!(check_overwrite(&dir.join("missing.hf"), false).is_ok());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_ensure_distinct() {
        let dir = scratch_dir("distinct");
        let input = dir.join("in.txt");
        fs::write(&input, b"data").unwrap();

        assert!(ensure_distinct(&input, &input).is_err());
        assert!(ensure_distinct(&input, &dir.join(".").join("in.txt")).is_err());
        assert!(ensure_distinct(&input, &dir.join("in.txt.hf")).is_ok());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
