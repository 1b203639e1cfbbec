//! SVG flamegraph output writer.
//!
//! Writes SVG content to files or any writer (stdout).

use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write SVG content to a file
///
/// **Public** - main entry point for SVG output
///
/// # Arguments
/// * `svg_content` - SVG string from flamegraph generator
/// * `output_path` - Path to output SVG file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
///
/// # Example
/// ```ignore
/// let svg = generate_flamegraph(&extraction, None);
/// write_svg(&svg, "flamegraph.svg")?;
/// ```
pub fn write_svg(svg_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing SVG to: {}", output_path.display());

    super::validate_path(output_path)?;
    super::ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    write_svg_to(svg_content, BufWriter::new(file))?;

    let file_size = svg_content.len();
    info!(
        "SVG written successfully ({} bytes, {:.2} KB)",
        file_size,
        file_size as f64 / 1024.0
    );

    Ok(())
}

/// Write SVG content to an arbitrary writer and flush it
pub fn write_svg_to(svg_content: &str, mut writer: impl Write) -> Result<(), OutputError> {
    writer
        .write_all(svg_content.as_bytes())
        .map_err(OutputError::WriteFailed)?;

    writer.flush().map_err(OutputError::WriteFailed)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="120">
</svg>
"#;

    #[test]
    fn test_write_svg_to_buffer() {
        let mut buffer = Vec::new();
        write_svg_to(VALID_SVG, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), VALID_SVG);
    }

    #[test]
    fn test_write_svg_rejects_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = write_svg(VALID_SVG, temp_dir.path());
        assert!(matches!(result, Err(OutputError::InvalidPath(_))));
    }
}
