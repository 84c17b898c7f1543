//! # STL Writer
//!
//! Binary and ASCII STL output. Coordinates are written as `f32`, which is
//! all the format carries.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::MeshResult;
use crate::mesh::Mesh;

/// 80-byte binary STL header size.
const HEADER_SIZE: usize = 80;

/// STL encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StlFormat {
    /// 50 bytes per facet
    #[default]
    Binary,
    /// Human-readable text
    Ascii,
}

/// Saves a mesh as STL at `path`.
///
/// # Example
///
/// ```no_run
/// use pore_mesh::export::{save_stl, StlFormat};
/// use pore_mesh::primitives::create_cube;
///
/// let cube = create_cube(10.0).unwrap();
/// save_stl(&cube, "cube.stl", StlFormat::Binary).unwrap();
/// ```
pub fn save_stl<P: AsRef<Path>>(mesh: &Mesh, path: P, format: StlFormat) -> MeshResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_stl(mesh, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Writes a mesh as STL to any writer.
pub fn write_stl<W: Write>(mesh: &Mesh, writer: W, format: StlFormat) -> MeshResult<()> {
    match format {
        StlFormat::Binary => write_binary(mesh, writer),
        StlFormat::Ascii => write_ascii(mesh, writer),
    }
}

fn write_binary<W: Write>(mesh: &Mesh, mut writer: W) -> MeshResult<()> {
    let mut header = [b' '; HEADER_SIZE];
    let text = b"porous cube generated by pore-mesh";
    header[..text.len()].copy_from_slice(text);
    writer.write_all(&header)?;
    writer.write_all(&(mesh.triangle_count() as u32).to_le_bytes())?;

    for (i, corners) in mesh.iter_triangles().enumerate() {
        let normal = mesh.face_normal(i);
        for value in normal.to_array() {
            writer.write_all(&(value as f32).to_le_bytes())?;
        }
        for corner in corners {
            for value in corner.to_array() {
                writer.write_all(&(value as f32).to_le_bytes())?;
            }
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

fn write_ascii<W: Write>(mesh: &Mesh, mut writer: W) -> MeshResult<()> {
    writeln!(writer, "solid porous_cube")?;

    for (i, corners) in mesh.iter_triangles().enumerate() {
        let n = mesh.face_normal(i);
        writeln!(writer, "  facet normal {:.6e} {:.6e} {:.6e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in corners {
            writeln!(writer, "      vertex {:.6e} {:.6e} {:.6e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid porous_cube")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_cube;

    #[test]
    fn test_binary_size() {
        let cube = create_cube(1.0).unwrap();
        let mut bytes = Vec::new();
        write_stl(&cube, &mut bytes, StlFormat::Binary).unwrap();

        assert_eq!(bytes.len(), HEADER_SIZE + 4 + 12 * 50);
        assert_eq!(u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]), 12);
    }

    #[test]
    fn test_ascii_facets() {
        let cube = create_cube(1.0).unwrap();
        let mut bytes = Vec::new();
        write_stl(&cube, &mut bytes, StlFormat::Ascii).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("solid porous_cube"));
        assert_eq!(text.matches("facet normal").count(), 12);
        assert_eq!(text.matches("vertex").count(), 36);
        assert!(text.trim_end().ends_with("endsolid porous_cube"));
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.stl");
        let cube = create_cube(1.0).unwrap();

        save_stl(&cube, &path, StlFormat::Binary).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 684);
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("cube.stl");
        let cube = create_cube(1.0).unwrap();
        assert!(save_stl(&cube, &path, StlFormat::Ascii).is_err());
    }
}
