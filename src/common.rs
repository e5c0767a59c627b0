use std::collections::HashMap;

pub(crate) type Vec3 = [f32; 3];

/// The result of loading an OBJ file.
#[derive(Debug, Default, Clone)]
#[non_exhaustive]
pub struct Obj {
    pub attributes: Attributes,
    pub shapes: Vec<Shape>,
    pub materials: Vec<Material>,
    /// Non-fatal problems found while loading, in the order they were found.
    pub warnings: Vec<String>,
}

/// The result of loading an MTL file on its own.
#[derive(Debug, Default, Clone)]
#[non_exhaustive]
pub struct Mtl {
    pub materials: Vec<Material>,
    pub warnings: Vec<String>,
}

/// Vertex attributes shared by all shapes of an OBJ file.
///
/// Every array is flat: `vertices`, `normals` and `colors` hold 3 scalars per
/// entry, `texcoords` holds 2.
#[derive(Debug, Default, Clone, PartialEq)]
#[non_exhaustive]
pub struct Attributes {
    /// `v`
    pub vertices: Vec<f32>,
    /// `vn`
    pub normals: Vec<f32>,
    /// `vt`
    pub texcoords: Vec<f32>,
    /// Vertex colors (extension, `v x y z r g b`). White if not specified.
    ///
    /// Always has as many entries as `vertices`.
    pub colors: Vec<f32>,
}

impl Attributes {
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    #[must_use]
    pub fn num_normals(&self) -> usize {
        self.normals.len() / 3
    }

    #[must_use]
    pub fn num_texcoords(&self) -> usize {
        self.texcoords.len() / 2
    }
}

/// Zero-based index into [`Attributes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct Index {
    pub vertex: u32,
    pub texcoord: Option<u32>,
    pub normal: Option<u32>,
}

impl Index {
    #[must_use]
    pub const fn new(vertex: u32, texcoord: Option<u32>, normal: Option<u32>) -> Self {
        Self {
            vertex,
            texcoord,
            normal,
        }
    }
}

/// A named group of faces (`g` or `o`).
#[derive(Debug, Default, Clone, PartialEq)]
#[non_exhaustive]
pub struct Shape {
    pub name: String,
    pub mesh: Mesh,
}

/// Faces of a shape as parallel arrays.
///
/// Face `i` uses `num_face_vertices[i]` consecutive entries of `indices`.
#[derive(Debug, Default, Clone, PartialEq)]
#[non_exhaustive]
pub struct Mesh {
    pub indices: Vec<Index>,
    /// The number of vertices per face. Always 3 if triangulated.
    pub num_face_vertices: Vec<u32>,
    /// Per-face material index into [`Obj::materials`]; `None` if unassigned.
    pub material_ids: Vec<Option<u32>>,
    /// Per-face smoothing group. 0 means smoothing is off.
    pub smoothing_group_ids: Vec<u32>,
    /// Subdivision tags (`t`).
    pub tags: Vec<Tag>,
}

impl Mesh {
    #[must_use]
    pub fn num_faces(&self) -> usize {
        self.num_face_vertices.len()
    }

    pub(crate) fn push_face(
        &mut self,
        indices: &[Index],
        material_id: Option<u32>,
        smoothing_group_id: u32,
    ) {
        self.indices.extend_from_slice(indices);
        #[allow(clippy::cast_possible_truncation)]
        self.num_face_vertices.push(indices.len() as u32);
        self.material_ids.push(material_id);
        self.smoothing_group_ids.push(smoothing_group_id);
    }
}

/// Subdivision tag: `t name ni/nr/ns <ints> <floats> <strings>`.
#[derive(Debug, Default, Clone, PartialEq)]
#[non_exhaustive]
pub struct Tag {
    pub name: String,
    pub int_values: Vec<i32>,
    pub float_values: Vec<f32>,
    pub string_values: Vec<String>,
}

/// A material defined by `newmtl` in an MTL file.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Material {
    pub name: String,

    /// `Ka`
    pub ambient: Vec3,
    /// `Kd`
    pub diffuse: Vec3,
    /// `Ks`
    pub specular: Vec3,
    /// `Kt` or `Tf`
    pub transmittance: Vec3,
    /// `Ke`
    pub emission: Vec3,
    /// `Ns`
    pub shininess: f32,
    /// `Ni`
    pub ior: f32,
    /// `d`, or `1 - Tr`. 1 is opaque, 0 is fully transparent.
    pub dissolve: f32,
    /// `illum`
    pub illum: i32,

    // PBR extension
    // http://exocortex.com/blog/extending_wavefront_mtl_to_support_pbr
    /// `Pr`
    pub roughness: f32,
    /// `Pm`
    pub metallic: f32,
    /// `Ps`
    pub sheen: f32,
    /// `Pc`
    pub clearcoat_thickness: f32,
    /// `Pcr`
    pub clearcoat_roughness: f32,
    /// `aniso`
    pub anisotropy: f32,
    /// `anisor`
    pub anisotropy_rotation: f32,

    pub texture: Textures,

    /// Parameters this parser does not know, as `key -> rest of line`.
    pub unknown_parameters: HashMap<String, String>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: [0.; 3],
            diffuse: [0.; 3],
            specular: [0.; 3],
            transmittance: [0.; 3],
            emission: [0.; 3],
            shininess: 1.,
            ior: 1.,
            dissolve: 1.,
            illum: 0,
            roughness: 0.,
            metallic: 0.,
            sheen: 0.,
            clearcoat_thickness: 0.,
            clearcoat_roughness: 0.,
            anisotropy: 0.,
            anisotropy_rotation: 0.,
            texture: Textures::default(),
            unknown_parameters: HashMap::new(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
#[non_exhaustive]
pub struct Textures {
    /// `map_Ka`
    pub ambient: Texture,
    /// `map_Kd`
    pub diffuse: Texture,
    /// `map_Ks`
    pub specular: Texture,
    /// `map_Ns`
    pub specular_highlight: Texture,
    /// `map_bump`, `map_Bump` or `bump`
    pub bump: Texture,
    /// `disp`
    pub displacement: Texture,
    /// `map_d`
    pub alpha: Texture,
    /// `refl`
    pub reflection: Texture,
    /// `map_Pr`
    pub roughness: Texture,
    /// `map_Pm`
    pub metallic: Texture,
    /// `map_Ps`
    pub sheen: Texture,
    /// `map_Ke`
    pub emissive: Texture,
    /// `norm`
    pub normal: Texture,
}

/// A texture file reference. `name` is empty if the material has no such map.
#[derive(Debug, Default, Clone, PartialEq)]
#[non_exhaustive]
pub struct Texture {
    pub name: String,
    pub option: TextureOption,
}

impl Texture {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// Options given before the file name of a texture map, e.g.
/// `map_Kd -o 0.5 0 0 -clamp on diffuse.png`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct TextureOption {
    /// `-type`
    pub texture_type: TextureType,
    /// `-boost`
    pub sharpness: f32,
    /// `-mm` (base)
    pub brightness: f32,
    /// `-mm` (gain)
    pub contrast: f32,
    /// `-o`
    pub origin_offset: Vec3,
    /// `-s`
    pub scale: Vec3,
    /// `-t`
    pub turbulence: Vec3,
    /// `-clamp`
    pub clamp: bool,
    /// `-imfchan`: one of `r`, `g`, `b`, `m`, `l` or `z`.
    pub imfchan: u8,
    /// `-blendu`
    pub blend_u: bool,
    /// `-blendv`
    pub blend_v: bool,
    /// `-bm`
    pub bump_multiplier: f32,
}

impl Default for TextureOption {
    fn default() -> Self {
        Self {
            texture_type: TextureType::None,
            sharpness: 1.,
            brightness: 0.,
            contrast: 1.,
            origin_offset: [0.; 3],
            scale: [1.; 3],
            turbulence: [0.; 3],
            clamp: false,
            imfchan: b'm',
            blend_u: true,
            blend_v: true,
            bump_multiplier: 1.,
        }
    }
}

impl TextureOption {
    /// Defaults for bump maps, which read the luminance channel.
    #[must_use]
    pub fn bump() -> Self {
        Self {
            imfchan: b'l',
            ..Self::default()
        }
    }
}

/// `-type` of a reflection map.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TextureType {
    #[default]
    None,
    Sphere,
    CubeTop,
    CubeBottom,
    CubeFront,
    CubeBack,
    CubeLeft,
    CubeRight,
}

impl TextureType {
    pub(crate) fn from_bytes(s: &[u8]) -> Option<Self> {
        Some(match s {
            b"sphere" => Self::Sphere,
            b"cube_top" => Self::CubeTop,
            b"cube_bottom" => Self::CubeBottom,
            b"cube_front" => Self::CubeFront,
            b"cube_back" => Self::CubeBack,
            b"cube_left" => Self::CubeLeft,
            b"cube_right" => Self::CubeRight,
            _ => return None,
        })
    }
}
