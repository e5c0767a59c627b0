use std::{collections::HashMap, io, mem, path::Path};

use tracing::{debug, warn};

use super::{read_real, read_vec3};
use crate::{
    utils::{
        bytes::{from_utf8_lossy, Cursor},
        int,
        utf16::decode_bytes,
    },
    Material, Texture, TextureOption, TextureType,
};

/// Parses materials from bytes of MTL text and appends them to `materials`.
///
/// `material_map` maps each material name to its index in `materials`; a
/// name defined more than once refers to the last definition. Non-fatal
/// problems are appended to `warnings`.
///
/// `path` is only used for logging.
///
/// # Errors
///
/// Returns an error if the bytes are UTF-32, or UTF-16 that is not valid.
pub fn read_mtl(
    bytes: &[u8],
    path: Option<&Path>,
    materials: &mut Vec<Material>,
    material_map: &mut HashMap<String, u32>,
    warnings: &mut Vec<String>,
) -> io::Result<()> {
    let bytes = &decode_bytes(bytes)?;
    let num_materials = materials.len();
    read_mtl_internal(bytes, materials, material_map, warnings);
    debug!(
        path = ?path,
        materials = materials.len() - num_materials,
        "parsed MTL"
    );
    Ok(())
}

fn read_mtl_internal(
    bytes: &[u8],
    materials: &mut Vec<Material>,
    material_map: &mut HashMap<String, u32>,
    warnings: &mut Vec<String>,
) {
    let mut s = Cursor::new(bytes);
    let mut mat = Material::default();
    // `d` wins against `Tr`, whichever comes first.
    let mut has_d = false;
    let mut has_tr = false;

    while !s.at_end() {
        if let Some(key) = s.word() {
            match key {
                b"newmtl" => {
                    let prev = mem::take(&mut mat);
                    if !prev.name.is_empty() {
                        push_material(materials, material_map, prev);
                    }
                    has_d = false;
                    has_tr = false;
                    mat.name = from_utf8_lossy(s.rest_of_line()).into_owned();
                }

                b"Ka" => mat.ambient = read_vec3(&mut s, 0.),
                b"Kd" => mat.diffuse = read_vec3(&mut s, 0.),
                b"Ks" => mat.specular = read_vec3(&mut s, 0.),
                b"Kt" | b"Tf" => mat.transmittance = read_vec3(&mut s, 0.),
                b"Ke" => mat.emission = read_vec3(&mut s, 0.),
                b"Ni" => mat.ior = read_real(&mut s, 0.),
                b"Ns" => mat.shininess = read_real(&mut s, 0.),
                b"illum" => {
                    mat.illum = s
                        .word()
                        .and_then(int::parse_partial::<i32>)
                        .map_or(0, |(i, _)| i);
                }

                b"d" => {
                    mat.dissolve = read_real(&mut s, 0.);
                    if has_tr {
                        dissolve_conflict(warnings, &mat.name);
                    }
                    has_d = true;
                }
                b"Tr" => {
                    if has_d {
                        dissolve_conflict(warnings, &mat.name);
                    } else {
                        // Assumes Tr is in [0, 1]; some exporters write Tr = d.
                        mat.dissolve = 1. - read_real(&mut s, 0.);
                    }
                    has_tr = true;
                }

                // PBR extension
                b"Pr" => mat.roughness = read_real(&mut s, 0.),
                b"Pm" => mat.metallic = read_real(&mut s, 0.),
                b"Ps" => mat.sheen = read_real(&mut s, 0.),
                b"Pc" => mat.clearcoat_thickness = read_real(&mut s, 0.),
                b"Pcr" => mat.clearcoat_roughness = read_real(&mut s, 0.),
                b"aniso" => mat.anisotropy = read_real(&mut s, 0.),
                b"anisor" => mat.anisotropy_rotation = read_real(&mut s, 0.),

                b"map_Ka" => read_texture(&mut s, &mut mat.texture.ambient, false),
                b"map_Kd" => read_texture(&mut s, &mut mat.texture.diffuse, false),
                b"map_Ks" => read_texture(&mut s, &mut mat.texture.specular, false),
                b"map_Ns" => read_texture(&mut s, &mut mat.texture.specular_highlight, false),
                b"map_bump" | b"map_Bump" | b"bump" => {
                    read_texture(&mut s, &mut mat.texture.bump, true);
                }
                b"map_d" => read_texture(&mut s, &mut mat.texture.alpha, false),
                b"disp" => read_texture(&mut s, &mut mat.texture.displacement, false),
                b"refl" => read_texture(&mut s, &mut mat.texture.reflection, false),
                b"map_Pr" => read_texture(&mut s, &mut mat.texture.roughness, false),
                b"map_Pm" => read_texture(&mut s, &mut mat.texture.metallic, false),
                b"map_Ps" => read_texture(&mut s, &mut mat.texture.sheen, false),
                b"map_Ke" => read_texture(&mut s, &mut mat.texture.emissive, false),
                b"norm" => read_texture(&mut s, &mut mat.texture.normal, false),

                _ if key.starts_with(b"#") => {}
                _ => {
                    let value = from_utf8_lossy(s.rest_of_line()).into_owned();
                    mat.unknown_parameters
                        .insert(from_utf8_lossy(key).into_owned(), value);
                }
            }
        }
        s.skip_line();
    }

    // The last material is kept even without `newmtl`.
    push_material(materials, material_map, mat);
}

#[cold]
fn dissolve_conflict(warnings: &mut Vec<String>, name: &str) {
    let msg = format!("both `d` and `Tr` are defined for material {name:?}; using `d` for dissolve");
    warn!("{msg}");
    warnings.push(msg);
}

fn push_material(
    materials: &mut Vec<Material>,
    material_map: &mut HashMap<String, u32>,
    material: Material,
) {
    #[allow(clippy::cast_possible_truncation)]
    let id = materials.len() as u32;
    material_map.insert(material.name.clone(), id);
    materials.push(material);
}

/// Reads `[options] <file name>` of a texture map statement.
///
/// Options are reset to their defaults first. Parsing stops at the file name;
/// if there is none, the name is left empty.
fn read_texture(s: &mut Cursor<'_>, texture: &mut Texture, is_bump: bool) {
    *texture = Texture {
        name: String::new(),
        option: if is_bump {
            TextureOption::bump()
        } else {
            TextureOption::default()
        },
    };
    let opt = &mut texture.option;
    while let Some(w) = s.word() {
        match w {
            b"-blendu" => opt.blend_u = read_on_off(s, true),
            b"-blendv" => opt.blend_v = read_on_off(s, true),
            b"-clamp" => opt.clamp = read_on_off(s, true),
            b"-boost" => opt.sharpness = read_real(s, 1.),
            b"-bm" => opt.bump_multiplier = read_real(s, 1.),
            b"-o" => opt.origin_offset = read_vec3(s, 0.),
            b"-s" => opt.scale = read_vec3(s, 1.),
            b"-t" => opt.turbulence = read_vec3(s, 0.),
            b"-type" => {
                opt.texture_type = s
                    .word()
                    .and_then(TextureType::from_bytes)
                    .unwrap_or_default();
            }
            b"-imfchan" => {
                if let Some(&c) = s.word().and_then(<[u8]>::first) {
                    opt.imfchan = c;
                }
            }
            b"-mm" => {
                opt.brightness = read_real(s, 0.);
                opt.contrast = read_real(s, 1.);
            }
            _ => {
                texture.name = from_utf8_lossy(w).into_owned();
                return;
            }
        }
    }
}

fn read_on_off(s: &mut Cursor<'_>, default: bool) -> bool {
    match s.word() {
        Some(b"on") => true,
        Some(b"off") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> (Vec<Material>, HashMap<String, u32>, Vec<String>) {
        let mut materials = vec![];
        let mut material_map = HashMap::new();
        let mut warnings = vec![];
        read_mtl(
            text.as_bytes(),
            None,
            &mut materials,
            &mut material_map,
            &mut warnings,
        )
        .unwrap();
        (materials, material_map, warnings)
    }

    #[test]
    fn basic() {
        let (materials, map, warnings) = parse(
            "# a comment\n\
             newmtl red plastic\n\
             Ka 0.1 0.2 0.3\n\
             Kd 1 0 0\n\
             Ks 0.5\n\
             Tf 0.9 0.8 0.7\n\
             Ke 0 0 0.25\n\
             Ns 96.078431\n\
             Ni 1.45\n\
             illum 2\n\
             \n\
             newmtl blue\r\n\
             Kd 0 0 1\r\n",
        );
        assert!(warnings.is_empty());
        assert_eq!(materials.len(), 2);
        assert_eq!(map.len(), 2);
        assert_eq!(map["red plastic"], 0);
        assert_eq!(map["blue"], 1);

        let red = &materials[0];
        assert_eq!(red.name, "red plastic");
        assert_eq!(red.ambient, [0.1, 0.2, 0.3]);
        assert_eq!(red.diffuse, [1., 0., 0.]);
        assert_eq!(red.specular, [0.5, 0., 0.]);
        assert_eq!(red.transmittance, [0.9, 0.8, 0.7]);
        assert_eq!(red.emission, [0., 0., 0.25]);
        assert!((red.shininess - 96.078_43).abs() < 1e-4);
        assert!((red.ior - 1.45).abs() < 1e-6);
        assert_eq!(red.illum, 2);
        assert_eq!(red.dissolve, 1.);

        let blue = &materials[1];
        assert_eq!(blue.diffuse, [0., 0., 1.]);
        assert_eq!(blue.shininess, 1.);
        assert!(blue.texture.diffuse.is_empty());
    }

    #[test]
    fn dissolve() {
        for text in ["newmtl m\nd 0.5\nTr 0.3\n", "newmtl m\nTr 0.3\nd 0.5\n"] {
            let (materials, _, warnings) = parse(text);
            assert_eq!(materials[0].dissolve, 0.5, "{text:?}");
            assert_eq!(warnings.len(), 1, "{text:?}");
            assert!(warnings[0].contains("\"m\""), "{warnings:?}");
        }
        let (materials, _, warnings) = parse("newmtl m\nTr 0.25\n");
        assert_eq!(materials[0].dissolve, 0.75);
        assert!(warnings.is_empty());
        // flags are per material
        let (materials, _, warnings) = parse("newmtl a\nd 0.5\nnewmtl b\nTr 0.25\n");
        assert_eq!(materials[0].dissolve, 0.5);
        assert_eq!(materials[1].dissolve, 0.75);
        assert!(warnings.is_empty());
    }

    #[test]
    fn pbr() {
        let (materials, _, _) = parse(
            "newmtl pbr\nPr 0.25\nPm 0.5\nPs 0.125\nPc 0.75\nPcr 0.0625\naniso 0.3\nanisor 0.4\n\
             map_Pr rough.png\nmap_Pm metal.png\nmap_Ps sheen.png\nmap_Ke emit.png\nnorm n.png\n",
        );
        let m = &materials[0];
        assert_eq!(m.roughness, 0.25);
        assert_eq!(m.metallic, 0.5);
        assert_eq!(m.sheen, 0.125);
        assert_eq!(m.clearcoat_thickness, 0.75);
        assert_eq!(m.clearcoat_roughness, 0.0625);
        assert!((m.anisotropy - 0.3).abs() < 1e-6);
        assert!((m.anisotropy_rotation - 0.4).abs() < 1e-6);
        assert_eq!(m.texture.roughness.name, "rough.png");
        assert_eq!(m.texture.metallic.name, "metal.png");
        assert_eq!(m.texture.sheen.name, "sheen.png");
        assert_eq!(m.texture.emissive.name, "emit.png");
        assert_eq!(m.texture.normal.name, "n.png");
    }

    #[test]
    fn texture_options() {
        let (materials, _, _) = parse(
            "newmtl t\n\
             map_Kd -o 0.5 0.25 0 -s 2 2 1 -t 0.1 0.1 0 -clamp on -blendu off diffuse.png\n\
             map_Ks -boost 2.5 -mm 0.2 0.8 -imfchan r -type sphere spec.png trailing\n\
             bump -bm 0.3 bump.png\n\
             map_Ka -blendv off\n\
             refl -type cube_top -clamp refl.png\n",
        );
        let t = &materials[0].texture;

        assert_eq!(t.diffuse.name, "diffuse.png");
        let o = &t.diffuse.option;
        assert_eq!(o.origin_offset, [0.5, 0.25, 0.]);
        assert_eq!(o.scale, [2., 2., 1.]);
        assert!((o.turbulence[0] - 0.1).abs() < 1e-6);
        assert!(o.clamp);
        assert!(!o.blend_u);
        assert!(o.blend_v);
        assert_eq!(o.imfchan, b'm');

        assert_eq!(t.specular.name, "spec.png");
        let o = &t.specular.option;
        assert_eq!(o.sharpness, 2.5);
        assert!((o.brightness - 0.2).abs() < 1e-6);
        assert!((o.contrast - 0.8).abs() < 1e-6);
        assert_eq!(o.imfchan, b'r');
        assert_eq!(o.texture_type, TextureType::Sphere);

        assert_eq!(t.bump.name, "bump.png");
        assert!((t.bump.option.bump_multiplier - 0.3).abs() < 1e-6);
        assert_eq!(t.bump.option.imfchan, b'l');

        // options without a file name
        assert!(t.ambient.is_empty());
        assert!(!t.ambient.option.blend_v);

        // `-clamp` followed by something other than on/off uses the flag default
        // and that word is consumed as its value.
        assert_eq!(t.reflection.option.texture_type, TextureType::CubeTop);
        assert!(t.reflection.option.clamp);
        assert!(t.reflection.is_empty());

        assert!(t.displacement.is_empty());
        assert_eq!(t.displacement.option, TextureOption::default());
    }

    #[test]
    fn unknown_parameters() {
        let (materials, _, _) = parse("newmtl u\nmap_foo  a b  c \nKm 1\nKm 2\n");
        let params = &materials[0].unknown_parameters;
        assert_eq!(params.len(), 2);
        assert_eq!(params["map_foo"], "a b  c");
        assert_eq!(params["Km"], "2");
    }

    #[test]
    fn flush() {
        // no newmtl: one unnamed material
        let (materials, map, _) = parse("Kd 1 1 1\n");
        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].name, "");
        assert_eq!(materials[0].diffuse, [1.; 3]);
        assert_eq!(map[""], 0);

        // properties before the first newmtl are discarded
        let (materials, _, _) = parse("Kd 1 1 1\nnewmtl a\n");
        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].diffuse, [0.; 3]);

        // later definition wins
        let (materials, map, _) = parse("newmtl a\nNs 2\nnewmtl a\nNs 3\n");
        assert_eq!(materials.len(), 2);
        assert_eq!(map["a"], 1);
        assert_eq!(materials[map["a"] as usize].shininess, 3.);
    }

    #[test]
    fn defaults() {
        let (materials, _, _) = parse("newmtl d\nKa\nNs x\nillum\n");
        let m = &materials[0];
        assert_eq!(m.ambient, [0.; 3]);
        assert_eq!(m.shininess, 0.);
        assert_eq!(m.illum, 0);
        assert_eq!(m.ior, 1.);
        assert_eq!(m.texture.bump.option, TextureOption::default());
    }
}
