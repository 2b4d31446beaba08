//! Asset loading: mesh files and scene descriptions

pub mod obj_loader;
pub mod scene_loader;

pub use obj_loader::{ObjError, ObjLoader};
pub use scene_loader::{SceneError, SceneLoader};
