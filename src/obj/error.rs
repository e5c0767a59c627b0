use std::{error, fmt, io, path::Path};

use crate::Shape;

#[cfg_attr(test, derive(Debug))]
pub(super) enum ErrorKind {
    // f 0
    ZeroIndex(usize),
    // f x, f /1
    InvalidIndex(usize),
    // f -4 with fewer than 4 vertices, or a position past the end of `v`
    Oob(i64, usize),
}

impl ErrorKind {
    #[cold]
    #[inline(never)]
    pub(super) fn into_io_error(
        self,
        start: &[u8],
        path: Option<&Path>,
        shapes: Vec<Shape>,
    ) -> io::Error {
        let remaining = match self {
            Self::ZeroIndex(n) | Self::InvalidIndex(n) | Self::Oob(.., n) => n,
        };
        let location = crate::error::Location::find(remaining, start, path);
        io::Error::new(
            io::ErrorKind::InvalidData,
            PartialLoadError {
                message: format!("{self} ({location})"),
                shapes,
            },
        )
    }
}

impl fmt::Display for ErrorKind {
    #[cold]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ZeroIndex(..) => f.write_str("zero is not a valid face index"),
            Self::InvalidIndex(..) => f.write_str("invalid face index"),
            Self::Oob(i, ..) => write!(f, "face index out of bounds ({i})"),
        }
    }
}

/// A malformed face aborted the load.
///
/// This is the inner error of the [`io::Error`] returned by the OBJ loader.
/// It keeps the shapes that were complete before the malformed line; the
/// shape that was being built at that point is discarded.
///
/// ```
/// use obj_loader::obj::PartialLoadError;
///
/// let err = obj_loader::obj::from_slice(
///     b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\no next\nf 1 2 0\n",
///     None,
///     None,
///     true,
/// )
/// .unwrap_err();
/// let partial = err.get_ref().unwrap().downcast_ref::<PartialLoadError>().unwrap();
/// assert_eq!(partial.shapes().len(), 1);
/// ```
#[derive(Debug)]
pub struct PartialLoadError {
    message: String,
    shapes: Vec<Shape>,
}

impl PartialLoadError {
    /// Shapes that were complete before the error.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[must_use]
    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes
    }
}

impl fmt::Display for PartialLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl error::Error for PartialLoadError {}
