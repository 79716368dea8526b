/// Software rasterizer drawing meshes into terminal cells
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix3, Vector2, Vector3, Vector4};
use scop_core::{FrameMatrices, GpuMesh, TextureImage, Vertex};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Grey levels cycled across triangles when the texture is faded out.
const FACE_PALETTE: &[f32] = &[0.35, 0.5, 0.65, 0.8, 0.45, 0.7];

const AMBIENT: f32 = 0.25;

/// RGB image sampled with wrapping UVs.
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<Vector3<f32>>,
}

impl Texture {
    pub fn from_image(image: &TextureImage) -> Self {
        let (width, height) = (image.width as usize, image.height as usize);
        let pixels: Vec<_> = (0..image.height)
            .flat_map(|y| (0..image.width).map(move |x| (x, y)))
            .map(|(x, y)| Vector3::from(image.rgb(x, y).unwrap_or([1.0; 3])))
            .collect();

        if pixels.is_empty() {
            return Self::solid(Vector3::repeat(1.0));
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    fn solid(color: Vector3<f32>) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
        }
    }

    /// Two-tone checkerboard with `tiles` squares per side.
    #[cfg(test)]
    pub fn checker(size: usize, tiles: usize) -> Self {
        let size = size.max(1);
        let tile = (size / tiles.max(1)).max(1);
        let pixels = (0..size * size)
            .map(|i| {
                let (x, y) = (i % size, i / size);
                if (x / tile + y / tile) % 2 == 0 {
                    Vector3::new(0.95, 0.55, 0.15)
                } else {
                    Vector3::new(0.2, 0.35, 0.85)
                }
            })
            .collect();
        Self {
            width: size,
            height: size,
            pixels,
        }
    }

    /// Nearest-neighbour lookup; `v` grows upwards like GL texture space.
    pub fn sample(&self, uv: &Vector2<f32>) -> Vector3<f32> {
        let wrap = |t: f32, extent: usize| {
            let t = t - t.floor();
            ((t * extent as f32) as usize).min(extent - 1)
        };
        let x = wrap(uv.x, self.width);
        let y = self.height - 1 - wrap(uv.y, self.height);
        self.pixels[y * self.width + x]
    }
}

/// Per-frame shading inputs.
pub struct Shading<'a> {
    pub texture: &'a Texture,
    /// 0 draws palette colours, 1 draws the texture.
    pub blend: f32,
    pub light_direction: Vector3<f32>,
}

/// One projected corner: screen position, depth, 1/w and its attributes.
#[derive(Clone, Copy)]
struct ScreenVertex {
    x: f32,
    y: f32,
    depth: f32,
    inv_w: f32,
    uv: Vector2<f32>,
    normal: Vector3<f32>,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Cell {
    pub ch: char,
    pub color: (u8, u8, u8),
}

impl Cell {
    const EMPTY: Cell = Cell {
        ch: ' ',
        color: (0, 0, 0),
    };
}

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![Cell::EMPTY; size],
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) != (self.width, self.height) {
            *self = Self::new(width, height);
        }
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(Cell::EMPTY);
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.width + x]
    }

    pub fn render_mesh(&mut self, mesh: &GpuMesh, frame: &FrameMatrices, shading: &Shading) {
        // Uniform scale, so the rotation block is enough for normals once renormalized
        let normal_matrix: Matrix3<f32> = frame.model.fixed_view::<3, 3>(0, 0).into_owned();

        for (index, corners) in mesh.triangles().enumerate() {
            let mut screen = [None; 3];
            for (slot, vertex) in screen.iter_mut().zip(corners) {
                *slot = self.project(vertex, frame, &normal_matrix);
            }
            // Triangle is clipped
            let [Some(a), Some(b), Some(c)] = screen else {
                continue;
            };
            let base = FACE_PALETTE[index % FACE_PALETTE.len()];
            self.rasterize_triangle([a, b, c], base, shading);
        }
    }

    /// Clip-space transform, perspective divide and viewport mapping.
    fn project(
        &self,
        vertex: &Vertex,
        frame: &FrameMatrices,
        normal_matrix: &Matrix3<f32>,
    ) -> Option<ScreenVertex> {
        let [x, y, z] = vertex.position;
        let clip = frame.mvp * Vector4::new(x, y, z, 1.0);

        // Prevent division by near-zero depth values
        if clip.w < 1e-6 {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        if ndc.z < -1.0 || ndc.z > 1.0 {
            return None;
        }

        let normal = normal_matrix * Vector3::from(vertex.normal);
        Some(ScreenVertex {
            x: (ndc.x + 1.0) * 0.5 * self.width as f32,
            y: (1.0 - ndc.y) * 0.5 * self.height as f32,
            depth: ndc.z,
            inv_w: 1.0 / clip.w,
            uv: Vector2::from(vertex.tex_coord),
            normal,
        })
    }

    fn rasterize_triangle(&mut self, v: [ScreenVertex; 3], base: f32, shading: &Shading) {
        let [v0, v1, v2] = v;

        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        let light = shading.light_direction.normalize();

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.depth + w1 * v1.depth + w2 * v2.depth;
                let idx = y as usize * self.width + x as usize;
                if depth >= self.depth_buffer[idx] {
                    continue;
                }

                // Perspective-correct attribute weights
                let p0 = w0 * v0.inv_w;
                let p1 = w1 * v1.inv_w;
                let p2 = w2 * v2.inv_w;
                let sum = p0 + p1 + p2;
                let uv = (v0.uv * p0 + v1.uv * p1 + v2.uv * p2) / sum;
                let normal = (v0.normal * p0 + v1.normal * p1 + v2.normal * p2) / sum;

                let lambert = match normal.try_normalize(1e-6) {
                    // Two-sided: OBJ winding is not guaranteed
                    Some(n) => n.dot(&light).abs(),
                    None => 1.0,
                };
                let intensity = AMBIENT + (1.0 - AMBIENT) * lambert;

                let flat = Vector3::repeat(base);
                let textured = shading.texture.sample(&uv);
                let color = flat.lerp(&textured, shading.blend) * intensity;

                self.depth_buffer[idx] = depth;
                self.cells[idx] = shade_cell(&color);
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                if current != Some(cell.color) {
                    let (r, g, b) = cell.color;
                    writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.ch))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Map a lit colour to a ramp character and an RGB foreground.
fn shade_cell(color: &Vector3<f32>) -> Cell {
    let color = color.map(|c| c.clamp(0.0, 1.0));
    let luminance = 0.2126 * color.x + 0.7152 * color.y + 0.0722 * color.z;

    // Skip the blank first step so lit pixels never vanish
    let steps = LUMINOSITY_RAMP.len() - 1;
    let char_index = (1 + (luminance * (steps - 1) as f32).round() as usize).min(steps);

    let to_byte = |c: f32| (c * 255.0).round() as u8;
    Cell {
        ch: LUMINOSITY_RAMP[char_index],
        color: (to_byte(color.x), to_byte(color.y), to_byte(color.z)),
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
