use std::path::PathBuf;

/// Errors that abort mesh construction before anything is drawn.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("model file not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error reading '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("'{0}' is not a .obj file")]
    WrongExtension(PathBuf),

    #[error("no vertices or faces found in model")]
    EmptyModel,

    #[error("face on line {line} references vertex {index}, but the model has {vertex_count} vertices")]
    IndexOutOfRange {
        line: usize,
        index: u64,
        vertex_count: usize,
    },
}

pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors while reading or decoding the texture image.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("texture file not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error reading '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to decode image '{0}': {1}")]
    Decode(PathBuf, #[source] image::ImageError),
}
