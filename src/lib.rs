//! Wavefront OBJ and MTL loader.
//!
//! ```no_run
//! let obj = obj_loader::Loader::default().load("model.obj")?;
//! for shape in &obj.shapes {
//!     println!("{}: {} faces", shape.name, shape.mesh.num_faces());
//! }
//! # Ok::<(), std::io::Error>(())
//! ```

#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    single_use_lifetimes,
    unreachable_pub
)]
#![warn(clippy::exhaustive_enums, clippy::exhaustive_structs)]

#[macro_use]
mod error;

mod utils;

mod common;
pub use common::*;

mod loader;
pub use loader::Loader;

pub mod obj;
