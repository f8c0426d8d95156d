// crates/mapvisual-core/src/loader/common_io.rs
use crate::error::{BoundaryError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Opens a local file, buffers it, and wraps `*.gz` files in a Gzip decoder.
///
/// A missing file is reported as [`BoundaryError::SourceUnavailable`]; for
/// boundary caches that is the expected trigger for the next source.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path)
        .map_err(|e| BoundaryError::unavailable(&path.display().to_string(), e))?;

    let reader = BufReader::new(file);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            return Ok(Box::new(GzDecoder::new(reader)));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(BoundaryError::InvalidData(format!(
                "{} is gzip-compressed but 'compact' is disabled",
                path.display()
            )));
        }
    }

    Ok(Box::new(reader))
}

/// Reads a whole local file (decompressing `*.gz`).
pub fn read_all(path: &Path) -> Result<Vec<u8>> {
    let mut stream = open_stream(path)?;
    let mut data = Vec::new();
    stream.read_to_end(&mut data)?;
    Ok(data)
}

/// Writes `value` as pretty JSON, creating parent directories.
///
/// `*.gz` targets are gzip-compressed when the `compact` feature is enabled.
#[cfg(feature = "json")]
pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    use std::io::{BufWriter, Write};

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            use flate2::{write::GzEncoder, Compression};
            let mut encoder = GzEncoder::new(writer, Compression::default());
            serde_json::to_writer_pretty(&mut encoder, value)?;
            encoder.finish()?.flush()?;
            return Ok(());
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(BoundaryError::InvalidData(
                "Gzip requested but 'compact' disabled".into(),
            ));
        }
    }

    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
