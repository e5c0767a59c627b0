use std::{
    collections::HashMap,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    obj::{self, FileMaterialReader},
    Mtl, Obj,
};

type Reader<B> = fn(&Path) -> io::Result<B>;

pub struct Loader<B = Vec<u8>> {
    reader: Reader<B>,
    triangulate: bool,
    material_base_dir: Option<PathBuf>,
}

fn default_reader(path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path)
}

impl Default for Loader<Vec<u8>> {
    fn default() -> Self {
        Self::with_custom_reader(default_reader)
    }
}

impl<B: AsRef<[u8]>> Loader<B> {
    /// Sets whether or not to split polygons into triangles at load time.
    ///
    /// If set to `false`, each face is kept as a single polygon and
    /// [`Mesh::num_face_vertices`](crate::Mesh::num_face_vertices) holds its
    /// vertex count.
    ///
    /// Default: `true`
    #[must_use]
    pub fn triangulate(mut self, enable: bool) -> Self {
        self.triangulate = enable;
        self
    }

    /// Sets the directory that `mtllib` file names are resolved against.
    ///
    /// Default: the directory of the OBJ file
    #[must_use]
    pub fn material_base_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.material_base_dir = Some(dir.into());
        self
    }

    /// Use the given function as a file reader of this loader.
    ///
    /// The reader is used for both OBJ files and the material libraries they
    /// refer to.
    ///
    /// Default: [`std::fs::read`]
    ///
    /// # Example
    ///
    /// This is useful if you want to load a model from a location that the
    /// default reader does not support.
    ///
    /// ```
    /// use obj_loader::Loader;
    /// use std::fs;
    ///
    /// let loader = Loader::default().custom_reader(|path| {
    ///     match path.to_str() {
    ///         Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
    ///             // Fetch online file
    ///             // ...
    /// #           unimplemented!()
    ///         }
    ///         _ => fs::read(path), // Otherwise, read from a file (same as the default reader)
    ///     }
    /// });
    /// ```
    #[must_use]
    pub fn custom_reader(mut self, reader: Reader<B>) -> Self {
        self.reader = reader;
        self
    }

    /// Creates a new loader with the given file reader.
    ///
    /// This is similar to [`Loader::default().custom_reader()`](Self::custom_reader),
    /// but the reader can return a non-`Vec<u8>` type.
    ///
    /// # Example
    ///
    /// This is useful when using mmap.
    ///
    /// ```
    /// use memmap2::Mmap;
    /// use obj_loader::Loader;
    /// use std::fs::File;
    ///
    /// let loader = Loader::with_custom_reader(|path| unsafe { Mmap::map(&File::open(path)?) });
    /// ```
    #[must_use]
    pub fn with_custom_reader(reader: Reader<B>) -> Self {
        Self {
            reader,
            triangulate: true,
            material_base_dir: None,
        }
    }

    /// Loads an OBJ file and the material libraries it refers to.
    ///
    /// Missing or unreadable material libraries are reported in
    /// [`Obj::warnings`].
    pub fn load<P: AsRef<Path>>(&self, path: P) -> io::Result<Obj> {
        self.load_(path.as_ref())
    }
    fn load_(&self, path: &Path) -> io::Result<Obj> {
        self.load_from_slice_((self.reader)(path)?.as_ref(), path)
    }
    /// Loads an OBJ file from bytes.
    ///
    /// `path` is used to resolve material libraries (unless
    /// [`material_base_dir`](Self::material_base_dir) is set) and in error
    /// messages.
    pub fn load_from_slice<P: AsRef<Path>>(&self, bytes: &[u8], path: P) -> io::Result<Obj> {
        self.load_from_slice_(bytes, path.as_ref())
    }
    fn load_from_slice_(&self, bytes: &[u8], path: &Path) -> io::Result<Obj> {
        let base_dir = match &self.material_base_dir {
            Some(dir) => Some(dir.clone()),
            None => path.parent().map(Path::to_path_buf),
        };
        let mut material_reader = FileMaterialReader::with_reader(base_dir, self.reader);
        let obj = obj::from_slice(
            bytes,
            Some(path),
            Some(&mut material_reader),
            self.triangulate,
        )?;
        info!(
            path = %path.display(),
            vertices = obj.attributes.num_vertices(),
            shapes = obj.shapes.len(),
            materials = obj.materials.len(),
            warnings = obj.warnings.len(),
            "loaded OBJ"
        );
        Ok(obj)
    }

    /// Loads a standalone MTL file.
    pub fn load_mtl<P: AsRef<Path>>(&self, path: P) -> io::Result<Mtl> {
        self.load_mtl_(path.as_ref())
    }
    fn load_mtl_(&self, path: &Path) -> io::Result<Mtl> {
        let bytes = (self.reader)(path)?;
        let mut mtl = Mtl::default();
        obj::read_mtl(
            bytes.as_ref(),
            Some(path),
            &mut mtl.materials,
            &mut HashMap::new(),
            &mut mtl.warnings,
        )?;
        info!(
            path = %path.display(),
            materials = mtl.materials.len(),
            "loaded MTL"
        );
        Ok(mtl)
    }
}

impl<B> fmt::Debug for Loader<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("triangulate", &self.triangulate)
            .field("material_base_dir", &self.material_base_dir)
            .finish_non_exhaustive()
    }
}
