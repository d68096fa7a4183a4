//! Error types for rendering.
//!
//! Misses, absorbed rays and an exhausted bounce budget are normal outcomes
//! and never show up here. Only resource failures abort a render.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::MaterialId;

/// Errors that abort a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to start render workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Failed to write image to {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised while assembling a scene.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SceneError {
    #[error("Material {0:?} is not registered in this scene")]
    UnknownMaterial(MaterialId),
}
