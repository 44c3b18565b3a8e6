//! Decompress command implementation.

use super::TransformOptions;
use crate::utils::{
    check_overwrite, copy_mtime, create_progress_bar, decompressed_path, ensure_distinct,
    format_size, print_line, remove_partial, resolve_output,
};
use oxihuff_codec::{DecompressionStats, HuffmanDecoder};
use oxihuff_core::{BitReader, BitWriter};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

pub fn cmd_decompress(
    files: &[PathBuf],
    options: &TransformOptions,
    max_output: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    if files.is_empty() {
        return Err("no input files".into());
    }

    let mut decoder = HuffmanDecoder::new();
    if let Some(limit) = max_output {
        decoder = decoder.with_max_output(limit);
    }
    if let Some(limit) = decoder.max_output() {
        log::debug!("output limited to {} bytes per file", limit);
    }

    let pb = create_progress_bar(files.len() as u64, files.len() > 1);
    pb.set_message("Decompressing");

    let mut failed = 0usize;
    for input in files {
        let result = resolve_output(input, options.output, files.len(), decompressed_path)
            .and_then(|output| {
                ensure_distinct(input, &output)?;
                check_overwrite(&output, options.force)?;
                let stats = decompress_file(&decoder, input, &output)?;
                Ok((output, stats))
            });

        match result {
            Ok((output, stats)) => {
                if options.verbose {
                    let line = format!(
                        "  {} -> {}: {} ({} header bits, {} leaves)",
                        input.display(),
                        output.display(),
                        format_size(stats.output_bytes),
                        stats.header_bits,
                        stats.leaf_count,
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
        return Err(format!("{} of {} files failed to decompress", failed, files.len()).into());
    }
    Ok(())
}

/// A failed decode leaves no partial output behind.
fn decompress_file(
    decoder: &HuffmanDecoder,
    input: &Path,
    output: &Path,
) -> Result<DecompressionStats, Box<dyn std::error::Error>> {
    let mut source = BitReader::new(BufReader::new(File::open(input)?));
    let mut sink = BitWriter::new(BufWriter::new(File::create(output)?));

    match decoder.decode(&mut source, &mut sink) {
        Ok(stats) => {
            drop(sink);
            copy_mtime(input, output)?;
            Ok(stats)
        }
        Err(e) => {
            drop(sink);
            remove_partial(output);
            if e.is_format_error() {
                log::debug!("{} is corrupt or not an OxiHuff stream", input.display());
            }
            Err(e.into())
        }
    }
}
