//! Compress command implementation.

use super::TransformOptions;
use crate::utils::{
    check_overwrite, compressed_path, copy_mtime, create_progress_bar, ensure_distinct,
    format_size, print_line, remove_partial, resolve_output,
};
use oxihuff_codec::{CompressionStats, HuffmanEncoder};
use oxihuff_core::{BitReader, BitWriter};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

pub fn cmd_compress(
    files: &[PathBuf],
    options: &TransformOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if files.is_empty() {
        return Err("no input files".into());
    }

    let pb = create_progress_bar(files.len() as u64, files.len() > 1);
    pb.set_message("Compressing");

    let mut failed = 0usize;
    for input in files {
        let result = resolve_output(input, options.output, files.len(), compressed_path)
            .and_then(|output| {
                ensure_distinct(input, &output)?;
                check_overwrite(&output, options.force)?;
                let stats = compress_file(input, &output)?;
                Ok((output, stats))
            });

        match result {
            Ok((output, stats)) => {
                if options.verbose {
                    let line = format!(
                        "  {} -> {}: {} -> {} ({} leaves, {:.2} bits/byte)",
                        input.display(),
                        output.display(),
                        format_size(stats.input_bytes),
                        format_size(stats.output_bytes()),
                        stats.leaf_count,
                        stats.bits_per_byte().unwrap_or(0.0),
                    );
                    print_line(&pb, line);
                }
            }
            Err(e) => {
                failed += 1;
                print_line(&pb, format!("  FAILED: {} - {}", input.display(), e));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if failed > 0 {
        return Err(format!("{} of {} files failed to compress", failed, files.len()).into());
    }
    Ok(())
}

/// Two passes over `input`; the buffered file reader is rewound in between.
fn compress_file(
    input: &Path,
    output: &Path,
) -> Result<CompressionStats, Box<dyn std::error::Error>> {
    let mut source = BitReader::new(BufReader::new(File::open(input)?));
    let encoder = HuffmanEncoder::scan(&mut source)?;
    log::debug!(
        "{}: {} distinct bytes, tree depth {}",
        input.display(),
        encoder.frequencies().distinct_bytes(),
        encoder.tree().depth()
    );

    let mut sink = BitWriter::new(BufWriter::new(File::create(output)?));
    match encoder.encode(&mut source, &mut sink) {
        Ok(stats) => {
            drop(sink);
            copy_mtime(input, output)?;
            Ok(stats)
        }
        Err(e) => {
            drop(sink);
            remove_partial(output);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cmd_decompress;
    use crate::utils::scratch_dir;
    use filetime::FileTime;
    use std::fs;

    fn options(output: Option<&Path>, force: bool) -> TransformOptions<'_> {
        TransformOptions {
            output,
            force,
            verbose: false,
        }
    }

    #[test]
    fn test_file_roundtrip_keeps_mtime() {
        let dir = scratch_dir("compress-roundtrip");
        let input = dir.join("notes.txt");
        let original = b"she sells sea shells by the sea shore".repeat(20);
        fs::write(&input, &original).unwrap();
        let mtime = FileTime::from_unix_time(1_000_000_000, 0);
        filetime::set_file_mtime(&input, mtime).unwrap();

        cmd_compress(&[input.clone()], &options(None, false)).unwrap();
        let packed = dir.join("notes.txt.hf");
        assert!(packed.exists());
        let packed_mtime = FileTime::from_last_modification_time(&fs::metadata(&packed).unwrap());
        assert_eq!(packed_mtime, mtime);

        let restored = dir.join("restored.txt");
        cmd_decompress(&[packed], &options(Some(&restored), false), None).unwrap();
        assert_eq!(fs::read(&restored).unwrap(), original);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_output_onto_input_keeps_input() {
        let dir = scratch_dir("compress-self");
        let input = dir.join("data.txt");
        fs::write(&input, b"eighteen bytes!!!!").unwrap();

        let result = cmd_compress(&[input.clone()], &options(Some(&input), true));
        assert!(result.is_err());
        assert_eq!(fs::read(&input).unwrap(), b"eighteen bytes!!!!");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_batch_continues_after_failure() {
        let dir = scratch_dir("compress-batch");
        let missing = dir.join("missing.txt");
        let good = dir.join("good.txt");
        fs::write(&good, b"still compressed").unwrap();

        let result = cmd_compress(&[missing, good], &options(None, false));
        assert!(result.is_err());
        assert!(!dir.join("missing.txt.hf").exists());
        assert!(dir.join("good.txt.hf").exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_output_flag_with_several_inputs() {
        let dir = scratch_dir("compress-multi-output");
        let a = dir.join("a.txt");
        let b = dir.join("b.txt");
        fs::write(&a, b"aaa").unwrap();
        fs::write(&b, b"bbb").unwrap();
        let out = dir.join("out.hf");

        let result = cmd_compress(&[a, b], &options(Some(&out), false));
        assert!(result.is_err());
        assert!(!out.exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_existing_output_needs_force() {
        let dir = scratch_dir("compress-force");
        let input = dir.join("log.txt");
        let packed = dir.join("log.txt.hf");
        fs::write(&input, b"line one\nline two\n").unwrap();
        fs::write(&packed, b"old").unwrap();

        assert!(cmd_compress(&[input.clone()], &options(None, false)).is_err());
        assert_eq!(fs::read(&packed).unwrap(), b"old");

        cmd_compress(&[input], &options(None, true)).unwrap();
        assert!(oxihuff_codec::is_huffman_stream(&fs::read(&packed).unwrap()));

        fs::remove_dir_all(&dir).unwrap();
    }
}
