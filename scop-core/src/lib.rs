//! Scop Core Library - mesh processing and transform math
//!
//! Parses Wavefront OBJ models into indexed triangle meshes, derives bounding
//! boxes, planar UVs and vertex normals, decodes the texture image, and builds
//! the per-frame model-view-projection matrices for the viewer.

pub mod bounds;
pub mod error;
pub mod geometry;
pub mod math;
pub mod normals;
pub mod obj;
pub mod projection;
pub mod resource;
pub mod state;
pub mod texture;
pub mod transform;
pub mod uv;
pub mod vertex;

// Re-export commonly used types
pub use bounds::BoundingBox;
pub use error::{MeshError, TextureError};
pub use geometry::Mesh;
pub use obj::{load_obj, parse_obj_str, ObjModel};
pub use projection::{aspect_ratio, Camera, CameraConfig};
pub use state::{Command, RenderSettings, ViewerState};
pub use texture::{decode_texture, load_texture, TextureImage};
pub use transform::{FrameMatrices, Transform, TransformState, ZoomLimits};
pub use uv::{Axis, UvMode};
pub use vertex::{GpuMesh, SceneBuffers, Vertex};
