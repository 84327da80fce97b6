//! Package sinks.
//!
//! Rendering produces finished parts; a [`PackageSink`] decides where they
//! go. Content types, the master, the theme and document properties are
//! added by whatever assembles the final document.

use crate::common::error::Result;
use std::io::{Seek, Write};
use zip::write::{SimpleFileOptions, ZipWriter};

/// Destination for rendered package parts.
pub trait PackageSink {
    /// Store one part. `path` is relative to the package root, for example
    /// `ppt/slides/slide1.xml`.
    fn write_part(&mut self, path: &str, data: &[u8]) -> Result<()>;
}

/// Parts kept in memory in the order they were written.
///
/// Writing a path twice replaces the earlier data in place.
#[derive(Debug, Default, Clone)]
pub struct MemoryPackage {
    parts: Vec<(String, Vec<u8>)>,
}

impl MemoryPackage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, data)| data.as_slice())
    }

    /// Part as UTF-8 text, for XML parts.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|data| std::str::from_utf8(data).ok())
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(p, _)| p.as_str())
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn into_parts(self) -> Vec<(String, Vec<u8>)> {
        self.parts
    }
}

impl PackageSink for MemoryPackage {
    fn write_part(&mut self, path: &str, data: &[u8]) -> Result<()> {
        match self.parts.iter_mut().find(|(p, _)| p == path) {
            Some((_, existing)) => *existing = data.to_vec(),
            None => self.parts.push((path.to_string(), data.to_vec())),
        }
        Ok(())
    }
}

/// Parts written as deflated entries of a ZIP archive.
///
/// # Examples
///
/// ```no_run
/// use slidekit::{Presentation, ZipPackage};
///
/// let mut pres = Presentation::new()?;
/// pres.add_slide(Default::default());
/// let mut zip = ZipPackage::new(std::io::Cursor::new(Vec::new()));
/// pres.export(&mut zip)?;
/// let bytes = zip.finish()?.into_inner();
/// # let _ = bytes;
/// # Ok::<(), slidekit::Error>(())
/// ```
pub struct ZipPackage<W: Write + Seek> {
    zip_writer: ZipWriter<W>,
}

impl<W: Write + Seek> ZipPackage<W> {
    pub fn new(writer: W) -> Self {
        Self {
            zip_writer: ZipWriter::new(writer),
        }
    }

    /// Write the central directory and return the underlying writer.
    pub fn finish(self) -> Result<W> {
        Ok(self.zip_writer.finish()?)
    }
}

impl<W: Write + Seek> PackageSink for ZipPackage<W> {
    fn write_part(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip_writer.start_file(path, options)?;
        self.zip_writer.write_all(data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn test_memory_package_keeps_order() {
        let mut package = MemoryPackage::new();
        package.write_part("b.xml", b"<b/>").unwrap();
        package.write_part("a.xml", b"<a/>").unwrap();
        package.write_part("b.xml", b"<b2/>").unwrap();

        assert_eq!(package.paths().collect::<Vec<_>>(), vec!["b.xml", "a.xml"]);
        assert_eq!(package.get_str("b.xml"), Some("<b2/>"));
        assert_eq!(package.get("c.xml"), None);
        assert_eq!(package.len(), 2);

        let parts = package.into_parts();
        assert_eq!(parts[1], ("a.xml".to_string(), b"<a/>".to_vec()));
    }

    #[test]
    fn test_zip_package_round_trip() {
        let mut package = ZipPackage::new(Cursor::new(Vec::new()));
        package.write_part("ppt/slides/slide1.xml", b"<p:sld/>").unwrap();
        package.write_part("ppt/media/image1.png", &[0x89, b'P', b'N', b'G']).unwrap();
        let cursor = package.finish().unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap();
        assert_eq!(archive.len(), 2);
        let mut text = String::new();
        archive
            .by_name("ppt/slides/slide1.xml")
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "<p:sld/>");
    }

    #[test]
    fn test_zip_package_on_disk() {
        let file = tempfile::tempfile().unwrap();
        let mut package = ZipPackage::new(file);
        package.write_part("ppt/presentation.xml", b"<p:presentation/>").unwrap();
        let mut file = package.finish().unwrap();

        use std::io::SeekFrom;
        file.seek(SeekFrom::Start(0)).unwrap();
        let archive = zip::ZipArchive::new(file).unwrap();
        assert_eq!(archive.file_names().collect::<Vec<_>>(), vec!["ppt/presentation.xml"]);
    }
}
