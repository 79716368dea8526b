/// Vector, quaternion and 4x4 matrix helpers on top of nalgebra
use nalgebra::{Matrix4, Point3, Quaternion, Vector3};

pub type Vec3 = Vector3<f32>;
pub type Quat = Quaternion<f32>;
pub type Mat4 = Matrix4<f32>;

/// Lengths below this are treated as zero (degenerate faces, empty accumulators).
pub const EPSILON: f32 = 1e-6;

/// Normalize `v`, returning the zero vector instead of NaNs for near-zero input.
pub fn normalize_or_zero(v: &Vec3) -> Vec3 {
    let len = v.norm();
    if len < EPSILON {
        Vec3::zeros()
    } else {
        v / len
    }
}

/// Unnormalized face normal `(b - a) x (c - a)`; its length is twice the triangle area.
pub fn face_cross(a: &Point3<f32>, b: &Point3<f32>, c: &Point3<f32>) -> Vec3 {
    (b - a).cross(&(c - a))
}

/// Unit face normal, or zero for degenerate triangles.
pub fn face_normal(a: &Point3<f32>, b: &Point3<f32>, c: &Point3<f32>) -> Vec3 {
    normalize_or_zero(&face_cross(a, b, c))
}

pub fn quat_identity() -> Quat {
    Quat::identity()
}

/// Rotation of `angle` radians about `axis` (expected to be unit length).
pub fn quat_from_axis_angle(axis: &Vec3, angle: f32) -> Quat {
    let half = angle * 0.5;
    let s = half.sin();
    Quat::new(half.cos(), axis.x * s, axis.y * s, axis.z * s)
}

/// Hamilton product `a * b`: `b` is applied first when rotating a vector.
pub fn quat_mul(a: &Quat, b: &Quat) -> Quat {
    a * b
}

/// Scale to unit length; a zero quaternion is returned unchanged.
pub fn quat_normalize(q: &Quat) -> Quat {
    let len = q.norm();
    if len > 0.0 {
        Quat::from_vector(q.coords / len)
    } else {
        *q
    }
}

/// Rotation matrix of a unit quaternion.
pub fn quat_to_mat4(q: &Quat) -> Mat4 {
    let (w, x, y, z) = (q.w, q.i, q.j, q.k);
    Mat4::new(
        1.0 - 2.0 * y * y - 2.0 * z * z,
        2.0 * x * y - 2.0 * w * z,
        2.0 * x * z + 2.0 * w * y,
        0.0,
        2.0 * x * y + 2.0 * w * z,
        1.0 - 2.0 * x * x - 2.0 * z * z,
        2.0 * y * z - 2.0 * w * x,
        0.0,
        2.0 * x * z - 2.0 * w * y,
        2.0 * y * z + 2.0 * w * x,
        1.0 - 2.0 * x * x - 2.0 * y * y,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
    )
}

pub fn mat4_translate(t: &Vec3) -> Mat4 {
    Mat4::new_translation(t)
}

pub fn mat4_scale(s: f32) -> Mat4 {
    Mat4::new_scaling(s)
}

/// Symmetric perspective projection with OpenGL clip conventions.
pub fn mat4_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov / 2.0).tan();
    let mut m = Mat4::zeros();
    m[(0, 0)] = f / aspect;
    m[(1, 1)] = f;
    m[(2, 2)] = (far + near) / (near - far);
    m[(2, 3)] = (2.0 * far * near) / (near - far);
    m[(3, 2)] = -1.0;
    m
}

/// Right-handed view matrix looking from `eye` towards `center`.
pub fn mat4_look_at(eye: &Point3<f32>, center: &Point3<f32>, world_up: &Vec3) -> Mat4 {
    let forward = normalize_or_zero(&(center - eye));
    let side = normalize_or_zero(&forward.cross(world_up));
    let cam_up = normalize_or_zero(&side.cross(&forward));
    let eye = eye.coords;

    Mat4::new(
        side.x,
        side.y,
        side.z,
        -side.dot(&eye),
        cam_up.x,
        cam_up.y,
        cam_up.z,
        -cam_up.dot(&eye),
        -forward.x,
        -forward.y,
        -forward.z,
        forward.dot(&eye),
        0.0,
        0.0,
        0.0,
        1.0,
    )
}

/// Flatten into the column-major layout uniform setters expect.
pub fn mat4_to_column_major(m: &Mat4) -> [f32; 16] {
    let mut out = [0.0; 16];
    out.copy_from_slice(m.as_slice());
    out
}
