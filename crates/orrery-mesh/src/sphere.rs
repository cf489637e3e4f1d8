//! Parametric UV sphere with smooth and flat shading variants.
//!
//! Vertices are generated top to bottom, one latitude ring (stack) at a time,
//! starting at the north pole (+Z). Each ring has `sector_count + 1` vertices;
//! the first and last share a position so texture coordinates can wrap from
//! `s = 0` to `s = 1` without a seam.
//!
//! In smooth mode those ring vertices are shared between triangles. In flat
//! mode every quad gets its own copies carrying a single face normal.

use std::f32::consts::PI;
use std::fmt;

use glam::Vec3;

use crate::face_normal::compute_face_normal;
use crate::vertex::{INTERLEAVED_STRIDE, SphereVertex};

/// Fewest longitude divisions a sphere can have.
pub const MIN_SECTOR_COUNT: u32 = 3;
/// Fewest latitude divisions a sphere can have.
pub const MIN_STACK_COUNT: u32 = 2;
/// Most longitude divisions a sphere can have.
///
/// Together with [`MAX_STACK_COUNT`] this keeps every flat-mode vertex
/// addressable by a `u32` index.
pub const MAX_SECTOR_COUNT: u32 = 4096;
/// Most latitude divisions a sphere can have.
pub const MAX_STACK_COUNT: u32 = 4096;

/// Shape parameters of a [`SphereMesh`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereParams {
    /// Sphere radius. Non-positive values are accepted but produce a degenerate mesh.
    pub radius: f32,
    /// Longitude divisions, within [`MIN_SECTOR_COUNT`]..=[`MAX_SECTOR_COUNT`].
    pub sector_count: u32,
    /// Latitude divisions, within [`MIN_STACK_COUNT`]..=[`MAX_STACK_COUNT`].
    pub stack_count: u32,
    /// Shared vertices with per-vertex normals when `true`, per-face vertices otherwise.
    pub smooth: bool,
}

impl SphereParams {
    /// Build parameters, clamping the counts into their allowed ranges.
    pub fn new(radius: f32, sector_count: u32, stack_count: u32, smooth: bool) -> Self {
        Self {
            radius,
            sector_count,
            stack_count,
            smooth,
        }
        .clamped()
    }

    /// Copy of `self` with counts clamped into their allowed ranges.
    pub fn clamped(self) -> Self {
        Self {
            sector_count: clamp_sectors(self.sector_count),
            stack_count: clamp_stacks(self.stack_count),
            ..self
        }
    }
}

fn clamp_sectors(sector_count: u32) -> u32 {
    sector_count.clamp(MIN_SECTOR_COUNT, MAX_SECTOR_COUNT)
}

fn clamp_stacks(stack_count: u32) -> u32 {
    stack_count.clamp(MIN_STACK_COUNT, MAX_STACK_COUNT)
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            sector_count: 36,
            stack_count: 18,
            smooth: true,
        }
    }
}

/// A grid sample before any shading decision is made.
#[derive(Clone, Copy)]
struct RingVertex {
    position: Vec3,
    /// Unit direction from the center; equals `position / radius` for a positive radius.
    direction: Vec3,
    tex_coord: [f32; 2],
}

/// Samples the `(stack_count + 1) x (sector_count + 1)` grid, north pole first.
fn ring_vertices(params: &SphereParams) -> Vec<RingVertex> {
    let sectors = params.sector_count;
    let stacks = params.stack_count;
    let sector_step = 2.0 * PI / sectors as f32;
    let stack_step = PI / stacks as f32;

    let mut ring = Vec::with_capacity((stacks as usize + 1) * (sectors as usize + 1));
    for i in 0..=stacks {
        // From +pi/2 at the north pole down to -pi/2 at the south pole.
        let stack_angle = PI / 2.0 - i as f32 * stack_step;
        let (sin_stack, cos_stack) = stack_angle.sin_cos();
        let xy = params.radius * cos_stack;
        let z = params.radius * sin_stack;

        for j in 0..=sectors {
            let sector_angle = j as f32 * sector_step;
            let (sin_sector, cos_sector) = sector_angle.sin_cos();

            ring.push(RingVertex {
                position: Vec3::new(xy * cos_sector, xy * sin_sector, z),
                direction: Vec3::new(cos_stack * cos_sector, cos_stack * sin_sector, sin_stack),
                tex_coord: [j as f32 / sectors as f32, i as f32 / stacks as f32],
            });
        }
    }
    ring
}

/// Separate attribute streams, filled in one generation pass.
#[derive(Default)]
struct Buffers {
    vertices: Vec<f32>,
    normals: Vec<f32>,
    tex_coords: Vec<f32>,
    indices: Vec<u32>,
    line_indices: Vec<u32>,
}

impl Buffers {
    fn with_vertex_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            tex_coords: Vec::with_capacity(vertex_count * 2),
            indices: Vec::with_capacity(index_count),
            line_indices: Vec::new(),
        }
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3, tex_coord: [f32; 2]) {
        self.vertices.extend_from_slice(&position.to_array());
        self.normals.extend_from_slice(&normal.to_array());
        self.tex_coords.extend_from_slice(&tex_coord);
    }

    fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    fn push_line(&mut self, a: u32, b: u32) {
        self.line_indices.extend_from_slice(&[a, b]);
    }

    /// Emits `face` as fresh vertices that all carry `normal`.
    fn push_face(&mut self, face: &[RingVertex], normal: Vec3) {
        for v in face {
            self.push_vertex(v.position, normal, v.tex_coord);
        }
    }

    fn interleave(&self) -> Vec<SphereVertex> {
        self.vertices
            .chunks_exact(3)
            .zip(self.normals.chunks_exact(3))
            .zip(self.tex_coords.chunks_exact(2))
            .map(|((p, n), t)| SphereVertex::new([p[0], p[1], p[2]], [n[0], n[1], n[2]], [t[0], t[1]]))
            .collect()
    }
}

fn build_smooth(params: &SphereParams) -> Buffers {
    let sectors = params.sector_count;
    let stacks = params.stack_count;
    let ring = ring_vertices(params);

    let triangle_count = 2 * sectors as usize * (stacks as usize - 1);
    let mut out = Buffers::with_vertex_capacity(ring.len(), triangle_count * 3);
    for v in &ring {
        out.push_vertex(v.position, v.direction, v.tex_coord);
    }

    for i in 0..stacks {
        let mut k1 = i * (sectors + 1);
        let mut k2 = k1 + sectors + 1;

        for _ in 0..sectors {
            // The first and last rows each collapse to a single triangle per sector.
            if i != 0 {
                out.push_triangle(k1, k2, k1 + 1);
            }
            if i != stacks - 1 {
                out.push_triangle(k1 + 1, k2, k2 + 1);
            }

            out.push_line(k1, k2);
            if i != 0 {
                out.push_line(k1, k1 + 1);
            }

            k1 += 1;
            k2 += 1;
        }
    }
    out
}

fn build_flat(params: &SphereParams) -> Buffers {
    let sectors = params.sector_count as usize;
    let stacks = params.stack_count as usize;
    let ring = ring_vertices(params);

    let vertex_count = 2 * sectors * 3 + (stacks - 2) * sectors * 4;
    let index_count = 2 * sectors * 3 + (stacks - 2) * sectors * 6;
    let mut out = Buffers::with_vertex_capacity(vertex_count, index_count);

    let mut index: u32 = 0;
    for i in 0..stacks {
        let mut vi1 = i * (sectors + 1);
        let mut vi2 = (i + 1) * (sectors + 1);

        for _ in 0..sectors {
            // v1--v3   upper ring
            // |  / |
            // v2--v4   lower ring
            let v1 = ring[vi1];
            let v2 = ring[vi2];
            let v3 = ring[vi1 + 1];
            let v4 = ring[vi2 + 1];

            if i == 0 {
                let normal = compute_face_normal(v1.position, v2.position, v4.position);
                out.push_face(&[v1, v2, v4], normal);
                out.push_triangle(index, index + 1, index + 2);
                out.push_line(index, index + 1);
                index += 3;
            } else if i == stacks - 1 {
                let normal = compute_face_normal(v1.position, v2.position, v3.position);
                out.push_face(&[v1, v2, v3], normal);
                out.push_triangle(index, index + 1, index + 2);
                out.push_line(index, index + 1);
                out.push_line(index, index + 2);
                index += 3;
            } else {
                // Both halves of the quad take the first triangle's normal.
                let normal = compute_face_normal(v1.position, v2.position, v3.position);
                out.push_face(&[v1, v2, v3, v4], normal);
                out.push_triangle(index, index + 1, index + 2);
                out.push_triangle(index + 2, index + 1, index + 3);
                out.push_line(index, index + 1);
                out.push_line(index, index + 2);
                index += 4;
            }

            vi1 += 1;
            vi2 += 1;
        }
    }
    out
}

/// A UV sphere and all of its render buffers.
///
/// Every parameter change regenerates every buffer; there is no incremental
/// update. [`generation`](Self::generation) increases by one per rebuild.
#[derive(Clone, Debug)]
pub struct SphereMesh {
    params: SphereParams,
    vertices: Vec<f32>,
    normals: Vec<f32>,
    tex_coords: Vec<f32>,
    indices: Vec<u32>,
    line_indices: Vec<u32>,
    interleaved: Vec<SphereVertex>,
    generation: u64,
}

impl SphereMesh {
    /// Build a sphere. Counts outside their allowed ranges are clamped.
    pub fn new(radius: f32, sector_count: u32, stack_count: u32, smooth: bool) -> Self {
        Self::from_params(SphereParams::new(radius, sector_count, stack_count, smooth))
    }

    /// Build a sphere from a parameter set. Counts outside their allowed ranges are clamped.
    pub fn from_params(params: SphereParams) -> Self {
        let mut mesh = Self {
            params: params.clamped(),
            vertices: Vec::new(),
            normals: Vec::new(),
            tex_coords: Vec::new(),
            indices: Vec::new(),
            line_indices: Vec::new(),
            interleaved: Vec::new(),
            generation: 0,
        };
        mesh.rebuild();
        mesh
    }

    /// Replace every parameter and regenerate all buffers.
    pub fn set(&mut self, radius: f32, sector_count: u32, stack_count: u32, smooth: bool) {
        self.params = SphereParams::new(radius, sector_count, stack_count, smooth);
        self.rebuild();
    }

    /// Change the radius. No-op if unchanged.
    pub fn set_radius(&mut self, radius: f32) {
        if radius != self.params.radius {
            self.set(radius, self.params.sector_count, self.params.stack_count, self.params.smooth);
        }
    }

    /// Change the longitude division count. No-op if the clamped value is unchanged.
    pub fn set_sector_count(&mut self, sector_count: u32) {
        if clamp_sectors(sector_count) != self.params.sector_count {
            self.set(self.params.radius, sector_count, self.params.stack_count, self.params.smooth);
        }
    }

    /// Change the latitude division count. No-op if the clamped value is unchanged.
    pub fn set_stack_count(&mut self, stack_count: u32) {
        if clamp_stacks(stack_count) != self.params.stack_count {
            self.set(self.params.radius, self.params.sector_count, stack_count, self.params.smooth);
        }
    }

    /// Switch between smooth and flat shading. No-op if unchanged.
    pub fn set_smooth(&mut self, smooth: bool) {
        if smooth != self.params.smooth {
            self.params.smooth = smooth;
            self.rebuild();
        }
    }

    fn rebuild(&mut self) {
        let buffers = if self.params.smooth {
            build_smooth(&self.params)
        } else {
            build_flat(&self.params)
        };

        self.interleaved = buffers.interleave();
        self.vertices = buffers.vertices;
        self.normals = buffers.normals;
        self.tex_coords = buffers.tex_coords;
        self.indices = buffers.indices;
        self.line_indices = buffers.line_indices;
        self.generation += 1;
    }

    pub fn params(&self) -> SphereParams {
        self.params
    }

    pub fn radius(&self) -> f32 {
        self.params.radius
    }

    pub fn sector_count(&self) -> u32 {
        self.params.sector_count
    }

    pub fn stack_count(&self) -> u32 {
        self.params.stack_count
    }

    pub fn is_smooth(&self) -> bool {
        self.params.smooth
    }

    /// Number of rebuilds since construction, starting at 1.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Positions as flat `x, y, z` triples.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Positions grouped per vertex.
    pub fn positions(&self) -> &[[f32; 3]] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Normals as flat `x, y, z` triples, one per vertex.
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Texture coordinates as flat `s, t` pairs, one per vertex.
    pub fn tex_coords(&self) -> &[f32] {
        &self.tex_coords
    }

    /// Triangle list, counter-clockwise when viewed from outside.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Line list for the latitude/longitude wireframe overlay.
    pub fn line_indices(&self) -> &[u32] {
        &self.line_indices
    }

    /// Interleaved position/normal/texcoord records in vertex order.
    pub fn interleaved(&self) -> &[SphereVertex] {
        &self.interleaved
    }

    /// [`interleaved`](Self::interleaved) as raw bytes for GPU upload.
    pub fn interleaved_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.interleaved)
    }

    /// [`indices`](Self::indices) as raw bytes for GPU upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn normal_count(&self) -> usize {
        self.normals.len() / 3
    }

    pub fn tex_coord_count(&self) -> usize {
        self.tex_coords.len() / 2
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn line_index_count(&self) -> usize {
        self.line_indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Byte stride of one interleaved record (always 32).
    pub fn interleaved_stride(&self) -> usize {
        INTERLEAVED_STRIDE
    }
}

impl Default for SphereMesh {
    fn default() -> Self {
        Self::from_params(SphereParams::default())
    }
}

impl fmt::Display for SphereMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== Sphere =====")?;
        writeln!(f, "        Radius: {}", self.params.radius)?;
        writeln!(f, "  Sector Count: {}", self.params.sector_count)?;
        writeln!(f, "   Stack Count: {}", self.params.stack_count)?;
        writeln!(f, "Smooth Shading: {}", self.params.smooth)?;
        writeln!(f, "Triangle Count: {}", self.triangle_count())?;
        writeln!(f, "   Index Count: {}", self.index_count())?;
        writeln!(f, "  Vertex Count: {}", self.vertex_count())?;
        writeln!(f, "  Normal Count: {}", self.normal_count())?;
        write!(f, "TexCoord Count: {}", self.tex_coord_count())
    }
}
