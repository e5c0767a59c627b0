//! [Wavefront OBJ] (.obj) and MTL (.mtl) parser.
//!
//! [Wavefront OBJ]: https://en.wikipedia.org/wiki/Wavefront_.obj_file

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

mod error;
mod material;
mod mtl;
mod triangulate;

use std::{cmp::Ordering, collections::HashMap, io, mem, path::Path};

use tracing::{debug, warn};

pub use self::{
    error::PartialLoadError,
    material::{FileMaterialReader, MaterialReader, StreamMaterialReader},
    mtl::read_mtl,
};
use self::error::ErrorKind;
use crate::{
    utils::{
        bytes::{from_utf8_lossy, Cursor},
        float, int,
        utf16::decode_bytes,
    },
    Attributes, Index, Material, Mesh, Obj, Shape, Tag, Vec3,
};

/// Parses shapes from bytes of Wavefront OBJ text.
///
/// `mtllib` statements are resolved with `material_reader`; if it is `None`,
/// they are ignored. If `triangulate` is `true`, every polygon is split into
/// triangles.
///
/// `path` is only used in error messages.
///
/// # Errors
///
/// Returns an error of kind [`io::ErrorKind::InvalidData`] if a face refers to
/// a vertex with an invalid index. Its inner error is a [`PartialLoadError`].
pub fn from_slice(
    bytes: &[u8],
    path: Option<&Path>,
    material_reader: Option<&mut dyn MaterialReader>,
    triangulate: bool,
) -> io::Result<Obj> {
    // If it is UTF-16 with BOM, it is converted to UTF-8, otherwise it is parsed as bytes.
    // We don't require UTF-8 here, as we want to support files that are partially non-UTF-8.
    let bytes = &decode_bytes(bytes)?;
    let mut cx = Context::new(triangulate);
    match read_obj(bytes, &mut cx, material_reader) {
        Ok(()) => {
            debug!(
                shapes = cx.shapes.len(),
                materials = cx.materials.len(),
                warnings = cx.warnings.len(),
                "parsed OBJ"
            );
            Ok(Obj {
                attributes: cx.attributes,
                shapes: cx.shapes,
                materials: cx.materials,
                warnings: cx.warnings,
            })
        }
        Err(e) => Err(e.into_io_error(bytes, path, cx.shapes)),
    }
}

// -----------------------------------------------------------------------------
// OBJ

struct Face {
    indices: Vec<Index>,
    smoothing_group_id: u32,
    // for error location
    remaining: usize,
}

/// Per-document parser state.
struct Context {
    triangulate: bool,
    attributes: Attributes,
    // faces not yet exported to `mesh`
    face_group: Vec<Face>,
    mesh: Mesh,
    name: String,
    tags: Vec<Tag>,
    material_id: Option<u32>,
    smoothing_group_id: u32,
    materials: Vec<Material>,
    material_map: HashMap<String, u32>,
    shapes: Vec<Shape>,
    warnings: Vec<String>,
}

impl Context {
    fn new(triangulate: bool) -> Self {
        Self {
            triangulate,
            attributes: Attributes::default(),
            face_group: vec![],
            mesh: Mesh::default(),
            name: String::new(),
            tags: vec![],
            material_id: None,
            smoothing_group_id: 0,
            materials: vec![],
            material_map: HashMap::new(),
            shapes: vec![],
            warnings: vec![],
        }
    }

    fn warn(&mut self, msg: String) {
        warn!("{msg}");
        self.warnings.push(msg);
    }

    /// Moves the pending face group into the current mesh, tagged with the
    /// current material.
    fn export_face_group(&mut self) -> Result<(), ErrorKind> {
        let face_group = mem::take(&mut self.face_group);
        let material_id = self.material_id;
        for face in face_group {
            if face.indices.len() < 3 {
                continue;
            }
            if self.triangulate {
                let mesh = &mut self.mesh;
                triangulate::triangulate(&face.indices, &self.attributes.vertices, |triangle| {
                    mesh.push_face(&triangle, material_id, face.smoothing_group_id);
                })
                .map_err(|i| ErrorKind::Oob(i64::from(i) + 1, face.remaining))?;
            } else {
                self.mesh
                    .push_face(&face.indices, material_id, face.smoothing_group_id);
            }
        }
        Ok(())
    }

    /// Flushes the face group and closes the current shape.
    fn finish_shape(&mut self) -> Result<(), ErrorKind> {
        self.export_face_group()?;
        let mut mesh = mem::take(&mut self.mesh);
        let tags = mem::take(&mut self.tags);
        if !mesh.indices.is_empty() {
            mesh.tags = tags;
            let name = mem::take(&mut self.name);
            debug!(name = %name, faces = mesh.num_faces(), "finished shape");
            self.shapes.push(Shape { name, mesh });
        }
        Ok(())
    }

    fn use_material(&mut self, name: &[u8]) -> Result<(), ErrorKind> {
        let name = from_utf8_lossy(name);
        let material_id = match self.material_map.get(&*name) {
            Some(&id) => id,
            None => {
                self.warn(format!("material {name:?} not found"));
                return Ok(());
            }
        };
        if self.material_id != Some(material_id) {
            // Faces read so far keep the previous material.
            self.export_face_group()?;
            self.material_id = Some(material_id);
        }
        Ok(())
    }

    fn load_material_libraries(
        &mut self,
        s: &mut Cursor<'_>,
        reader: Option<&mut (dyn MaterialReader + '_)>,
    ) {
        let reader = match reader {
            Some(reader) => reader,
            None => return,
        };
        let mut names = vec![];
        while let Some(name) = s.word() {
            names.push(from_utf8_lossy(name));
        }
        if names.is_empty() {
            self.warn("empty file name for mtllib; using default material".to_owned());
            return;
        }
        for name in &names {
            match reader.read(
                name,
                &mut self.materials,
                &mut self.material_map,
                &mut self.warnings,
            ) {
                Ok(()) => {
                    debug!(library = %name, materials = self.materials.len(), "loaded material library");
                    return;
                }
                Err(e) => self.warn(format!("failed to load material library {name:?}: {e}")),
            }
        }
        self.warn("failed to load material file(s); using default material".to_owned());
    }
}

fn read_obj(
    bytes: &[u8],
    cx: &mut Context,
    mut material_reader: Option<&mut dyn MaterialReader>,
) -> Result<(), ErrorKind> {
    let mut s = Cursor::new(bytes);

    while !s.at_end() {
        if let Some(keyword) = s.word() {
            match keyword {
                b"v" => read_v(&mut s, &mut cx.attributes),
                b"vn" => read_vn(&mut s, &mut cx.attributes),
                b"vt" => read_vt(&mut s, &mut cx.attributes),
                b"f" => {
                    let face = read_f(&mut s, &cx.attributes, cx.smoothing_group_id)?;
                    cx.face_group.push(face);
                }
                b"usemtl" => cx.use_material(s.rest_of_line())?,
                b"mtllib" => cx.load_material_libraries(&mut s, material_reader.as_deref_mut()),
                b"g" | b"o" => {
                    cx.finish_shape()?;
                    cx.name = from_utf8_lossy(s.rest_of_line()).into_owned();
                }
                b"t" => {
                    let tag = read_t(&mut s);
                    cx.tags.push(tag);
                }
                b"s" => {
                    if let Some(id) = s.word() {
                        cx.smoothing_group_id = if id.starts_with(b"off") {
                            0
                        } else {
                            // negative or garbage disables smoothing
                            int::parse::<u32>(id).unwrap_or(0)
                        };
                    }
                }
                // ignore comment, vp, l, p, mg, or other unknown
                _ => {}
            }
        }
        s.skip_line();
    }

    cx.finish_shape()
}

fn read_v(s: &mut Cursor<'_>, attributes: &mut Attributes) {
    // v <x> <y> <z> [<r> <g> <b>]
    let vertex = read_vec3(s, 0.);
    let color = read_vec3(s, 1.);
    attributes.vertices.extend_from_slice(&vertex);
    attributes.colors.extend_from_slice(&color);
}

fn read_vn(s: &mut Cursor<'_>, attributes: &mut Attributes) {
    // vn <i> <j> <k>
    let normal = read_vec3(s, 0.);
    attributes.normals.extend_from_slice(&normal);
}

fn read_vt(s: &mut Cursor<'_>, attributes: &mut Attributes) {
    // vt <u> [v=0] [w=0]
    let u = read_real(s, 0.);
    let v = read_real(s, 0.);
    attributes.texcoords.extend_from_slice(&[u, v]);
}

fn read_f(
    s: &mut Cursor<'_>,
    attributes: &Attributes,
    smoothing_group_id: u32,
) -> Result<Face, ErrorKind> {
    // f <v1>/[vt1]/[vn1] <v2>/[vt2]/[vn2] <v3>/[vt3]/[vn3] ...
    let start = s.remaining();
    let mut indices = Vec::with_capacity(4);
    loop {
        s.skip_spaces();
        let remaining = s.remaining();
        let w = match s.word() {
            Some(w) => w,
            None => break,
        };
        if w.starts_with(b"#") {
            break;
        }
        let mut parts = w.split(|&b| b == b'/');
        let vertex = match parts.next() {
            Some(v) if !v.is_empty() => fix_index(v, attributes.num_vertices(), remaining)?,
            _ => return Err(ErrorKind::InvalidIndex(remaining)),
        };
        let texcoord = match parts.next() {
            Some(vt) if !vt.is_empty() => {
                Some(fix_index(vt, attributes.num_texcoords(), remaining)?)
            }
            _ => None,
        };
        let normal = match parts.next() {
            Some(vn) if !vn.is_empty() => Some(fix_index(vn, attributes.num_normals(), remaining)?),
            _ => None,
        };
        let index = Index::new(vertex, texcoord, normal);
        indices.push(index);
    }
    Ok(Face {
        indices,
        smoothing_group_id,
        remaining: start,
    })
}

/// Makes an OBJ index zero-based, resolving relative (negative) indices
/// against the `n` entries defined so far.
fn fix_index(i: &[u8], n: usize, remaining: usize) -> Result<u32, ErrorKind> {
    let i = match int::parse::<i32>(i) {
        Some(i) => i,
        None => return Err(ErrorKind::InvalidIndex(remaining)),
    };
    match i.cmp(&0) {
        Ordering::Greater => Ok((i - 1) as u32),
        Ordering::Equal => Err(ErrorKind::ZeroIndex(remaining)),
        Ordering::Less => {
            let resolved = n as i64 + i64::from(i);
            if resolved < 0 {
                return Err(ErrorKind::Oob(i64::from(i), remaining));
            }
            Ok(resolved as u32)
        }
    }
}

fn read_t(s: &mut Cursor<'_>) -> Tag {
    // t <name> <nint>/<nreal>/<nstring> <ints> <reals> <strings>
    let mut tag = Tag {
        name: s.word().map(from_utf8_lossy).unwrap_or_default().into_owned(),
        ..Tag::default()
    };
    let mut counts = s.word().unwrap_or_default().split(|&b| b == b'/');
    let mut count = || {
        counts
            .next()
            .and_then(int::parse::<u32>)
            .map_or(0, |n| n as usize)
    };
    let (num_ints, num_reals, num_strings) = (count(), count(), count());
    // Missing values are filled with defaults; counts are capped by the
    // length of the rest of the line.
    let mut line = *s;
    let limit = line.rest_of_line().len();
    for _ in 0..num_ints.min(limit) {
        tag.int_values
            .push(s.word().and_then(int::parse::<i32>).unwrap_or(0));
    }
    for _ in 0..num_reals.min(limit) {
        tag.float_values.push(read_real(s, 0.));
    }
    for _ in 0..num_strings.min(limit) {
        tag.string_values
            .push(s.word().map(from_utf8_lossy).unwrap_or_default().into_owned());
    }
    tag
}

// -----------------------------------------------------------------------------
// Helpers

/// Reads a float from the next word, or returns `default` if the word is
/// missing or not a number.
fn read_real(s: &mut Cursor<'_>, default: f32) -> f32 {
    match s.word().and_then(float::parse_partial) {
        Some((f, _)) => f as f32,
        None => default,
    }
}

fn read_vec3(s: &mut Cursor<'_>, default: f32) -> Vec3 {
    [
        read_real(s, default),
        read_real(s, default),
        read_real(s, default),
    ]
}
