// Prints a summary of an OBJ or MTL file.
//
// ```sh
// RUST_LOG=debug cargo run --example dump -- model.obj
// ```

use std::{ffi::OsStr, path::PathBuf};

use anyhow::{Context as _, Result};
use clap::Parser;
use obj_loader::{Loader, Material, Obj};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
struct Args {
    path: PathBuf,
    /// Keep polygons instead of splitting them into triangles.
    #[arg(long)]
    no_triangulate: bool,
    /// Directory to resolve `mtllib` against (default: the directory of the file).
    #[arg(long, value_name = "DIR")]
    material_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut loader = Loader::default().triangulate(!args.no_triangulate);
    if let Some(dir) = &args.material_dir {
        loader = loader.material_base_dir(dir);
    }
    let path = &args.path;

    match path.extension().and_then(OsStr::to_str) {
        Some("mtl" | "MTL") => {
            let mtl = loader
                .load_mtl(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            for m in &mtl.materials {
                print_material(m);
            }
            print_warnings(&mtl.warnings);
        }
        _ => {
            let obj = loader
                .load(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            print_obj(&obj);
        }
    }
    Ok(())
}

fn print_obj(obj: &Obj) {
    let a = &obj.attributes;
    println!(
        "vertices={},normals={},texcoords={}",
        a.num_vertices(),
        a.num_normals(),
        a.num_texcoords()
    );
    for shape in &obj.shapes {
        let mesh = &shape.mesh;
        println!(
            "shape {:?}: faces={},indices={},tags={}",
            shape.name,
            mesh.num_faces(),
            mesh.indices.len(),
            mesh.tags.len()
        );
    }
    for m in &obj.materials {
        print_material(m);
    }
    print_warnings(&obj.warnings);
}

fn print_material(m: &Material) {
    println!(
        "material {:?}: Kd={:?},d={},illum={}",
        m.name, m.diffuse, m.dissolve, m.illum
    );
    if !m.texture.diffuse.is_empty() {
        println!("  map_Kd={}", m.texture.diffuse.name);
    }
}

fn print_warnings(warnings: &[String]) {
    for w in warnings {
        eprintln!("warning: {w}");
    }
}
