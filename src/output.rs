//! Writing the projected catalog to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::OutputError;
use crate::products::ProjectedProduct;

/// Default output file name.
pub const DEFAULT_OUTPUT_FILE: &str = "products.json";

/// Writes `products` to `path` as a pretty-printed JSON array.
///
/// The file is UTF-8 with a 2-space indent; non-ASCII characters are written
/// as-is rather than escaped. An existing file is overwritten.
///
/// # Errors
///
/// Returns [`OutputError::Io`] if the file cannot be created or written, and
/// [`OutputError::Json`] if encoding fails.
pub fn write_products(path: &Path, products: &[ProjectedProduct]) -> Result<(), OutputError> {
    let io_error = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, products)?;
    writer.flush().map_err(io_error)?;
    Ok(())
}
