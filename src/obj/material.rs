use std::{
    collections::HashMap,
    fmt, fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use super::read_mtl;
use crate::Material;

/// Resolves the material libraries named by `mtllib` statements.
///
/// On success, the implementation appends the parsed materials to
/// `materials` and registers them in `material_map`. An error is not fatal to
/// the OBJ load; it is recorded as a warning and the next library name is
/// tried.
pub trait MaterialReader {
    fn read(
        &mut self,
        name: &str,
        materials: &mut Vec<Material>,
        material_map: &mut HashMap<String, u32>,
        warnings: &mut Vec<String>,
    ) -> io::Result<()>;
}

type Reader<B> = fn(&Path) -> io::Result<B>;

fn default_reader(path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path)
}

/// Reads material libraries from files, relative to a base directory.
pub struct FileMaterialReader<B = Vec<u8>> {
    base_dir: Option<PathBuf>,
    reader: Reader<B>,
}

impl FileMaterialReader<Vec<u8>> {
    /// Creates a reader that resolves names against `base_dir` (or the
    /// current directory if `None`) and reads them with [`std::fs::read`].
    #[must_use]
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self::with_reader(base_dir, default_reader)
    }
}

impl<B: AsRef<[u8]>> FileMaterialReader<B> {
    /// Creates a reader that reads files with the given function.
    #[must_use]
    pub fn with_reader(base_dir: Option<PathBuf>, reader: Reader<B>) -> Self {
        Self { base_dir, reader }
    }

    fn path(&self, name: &str) -> PathBuf {
        match &self.base_dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }
}

impl<B: AsRef<[u8]>> MaterialReader for FileMaterialReader<B> {
    fn read(
        &mut self,
        name: &str,
        materials: &mut Vec<Material>,
        material_map: &mut HashMap<String, u32>,
        warnings: &mut Vec<String>,
    ) -> io::Result<()> {
        let path = self.path(name);
        let bytes = (self.reader)(&path)
            .map_err(|e| io::Error::new(e.kind(), format!("{e} ({})", path.display())))?;
        read_mtl(
            bytes.as_ref(),
            Some(&path),
            materials,
            material_map,
            warnings,
        )
    }
}

impl<B> fmt::Debug for FileMaterialReader<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileMaterialReader")
            .field("base_dir", &self.base_dir)
            .finish_non_exhaustive()
    }
}

/// Reads a material library from a stream, ignoring the requested name.
///
/// The stream is consumed by the first `mtllib`; later ones fail.
pub struct StreamMaterialReader<R> {
    stream: Option<R>,
}

impl<R: Read> StreamMaterialReader<R> {
    #[must_use]
    pub fn new(stream: R) -> Self {
        Self {
            stream: Some(stream),
        }
    }
}

impl<R: Read> MaterialReader for StreamMaterialReader<R> {
    fn read(
        &mut self,
        _name: &str,
        materials: &mut Vec<Material>,
        material_map: &mut HashMap<String, u32>,
        warnings: &mut Vec<String>,
    ) -> io::Result<()> {
        let mut stream = match self.stream.take() {
            Some(stream) => stream,
            None => bail!("material stream already consumed"),
        };
        let mut bytes = vec![];
        stream.read_to_end(&mut bytes)?;
        read_mtl(&bytes, None, materials, material_map, warnings)
    }
}

impl<R> fmt::Debug for StreamMaterialReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamMaterialReader")
            .field("consumed", &self.stream.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream() {
        let mut reader = StreamMaterialReader::new(&b"newmtl a\nKd 1 0 0\n"[..]);
        let mut materials = vec![];
        let mut map = HashMap::new();
        let mut warnings = vec![];
        reader
            .read("ignored.mtl", &mut materials, &mut map, &mut warnings)
            .unwrap();
        assert_eq!(materials.len(), 1);
        assert_eq!(map["a"], 0);
        let e = reader
            .read("a.mtl", &mut materials, &mut map, &mut warnings)
            .unwrap_err();
        assert!(e.to_string().contains("already consumed"), "{e}");
        assert_eq!(materials.len(), 1);
        assert_eq!(format!("{reader:?}"), "StreamMaterialReader { consumed: true }");
    }

    #[test]
    fn file_not_found() {
        let mut reader = FileMaterialReader::new(Some(PathBuf::from("does/not/exist")));
        let e = reader
            .read("missing.mtl", &mut vec![], &mut HashMap::new(), &mut vec![])
            .unwrap_err();
        assert_eq!(e.kind(), io::ErrorKind::NotFound);
        assert!(e.to_string().contains("missing.mtl"), "{e}");
    }

    #[test]
    fn custom_reader() {
        let mut reader = FileMaterialReader::with_reader(Some(PathBuf::from("lib")), |path| {
            assert_eq!(path, Path::new("lib").join("a.mtl"));
            Ok(b"newmtl from_fn\n")
        });
        let mut materials = vec![];
        reader
            .read("a.mtl", &mut materials, &mut HashMap::new(), &mut vec![])
            .unwrap();
        assert_eq!(materials[0].name, "from_fn");
    }
}
