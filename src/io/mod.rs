//! Serialization of [`MeshData`] to bytes, JSON and files.
//!
//! Both codecs work on whole meshes. The binary form is compact and
//! renumbers ids densely; the JSON form is readable and keeps ids as they
//! are.
//!
//! ```
//! use meshdata::io::{from_json, to_json, JsonOptions};
//! use meshdata::math::Point3;
//! use meshdata::mesh::MeshData;
//!
//! let mut mesh = MeshData::with_name("demo");
//! let a = mesh.add_point(Point3::origin());
//! let b = mesh.add_point(Point3::new(1.0, 0.0, 0.0));
//! mesh.add_line(a, b);
//!
//! let json = to_json(&mesh, &JsonOptions::default()).unwrap();
//! assert_eq!(from_json(&json).unwrap(), mesh);
//! ```

mod binary;
mod json;
pub mod text;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

pub use binary::{from_bytes, read_binary, to_bytes, write_binary, BinaryOptions, Precision};
pub use json::{from_json, to_json, JsonOptions};

use crate::error::FormatError;
use crate::mesh::MeshData;

fn read_error(path: &Path, e: std::io::Error) -> FormatError {
    if e.kind() == std::io::ErrorKind::NotFound {
        FormatError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        FormatError::Io(e)
    }
}

/// Writes a mesh to a file in the binary format.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_binary<P: AsRef<Path>>(
    mesh: &MeshData,
    path: P,
    options: &BinaryOptions,
) -> Result<(), FormatError> {
    let file = File::create(path.as_ref())?;
    write_binary(mesh, BufWriter::new(file), options)
}

/// Reads a mesh from a file in the binary format.
///
/// # Errors
///
/// Returns [`FormatError::FileNotFound`] if the file does not exist, or
/// any decoding error.
pub fn load_binary<P: AsRef<Path>>(path: P, options: &BinaryOptions) -> Result<MeshData, FormatError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| read_error(path, e))?;
    read_binary(BufReader::new(file), options)
}

/// Writes a mesh to a file as JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_json<P: AsRef<Path>>(
    mesh: &MeshData,
    path: P,
    options: &JsonOptions,
) -> Result<(), FormatError> {
    std::fs::write(path, to_json(mesh, options)?)?;
    Ok(())
}

/// Reads a mesh from a JSON file.
///
/// # Errors
///
/// Returns [`FormatError::FileNotFound`] if the file does not exist, or
/// any decoding error.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<MeshData, FormatError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    from_json(&text)
}
