//! Template meshes converted from the OBJ asset files by the build script.

include!(concat!(env!("OUT_DIR"), "/assets.rs"));
