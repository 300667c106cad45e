//! WGSL sources and the host-side structs that mirror them.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One particle as laid out in the GPU vertex/storage buffer.
///
/// Matches `struct Point` in WGSL: each `vec3<f32>` is 16-byte aligned.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuPoint {
    pub position: [f32; 3],
    pub _pad0: f32,
    pub color: [f32; 3],
    pub _pad1: f32,
}

impl GpuPoint {
    pub const COLOR_OFFSET: u64 = 16;

    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self {
            position: position.to_array(),
            _pad0: 0.0,
            color: color.to_array(),
            _pad1: 0.0,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    /// `(proj[0][0], proj[1][1])`: world-to-clip scale for billboards.
    pub proj_scale: [f32; 2],
    /// Surface size in physical pixels.
    pub viewport: [f32; 2],
    pub time: f32,
    pub particle_size: f32,
    pub size_attenuation: u32,
    pub pixel_ratio: f32,
}

pub const WORKGROUP_SIZE: u32 = 256;

const UNIFORMS_WGSL: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    proj_scale: vec2<f32>,
    viewport: vec2<f32>,
    time: f32,
    particle_size: f32,
    size_attenuation: u32,
    pixel_ratio: f32,
};
"#;

const RENDER_BODY: &str = r#"
@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var sprite: texture_2d<f32>;
@group(1) @binding(1)
var sprite_sampler: sampler;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) particle_pos: vec3<f32>,
    @location(1) particle_color: vec3<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );
    let corner = quad_vertices[vertex_index];

    var clip_pos = uniforms.view_proj * vec4<f32>(particle_pos, 1.0);
    let half_size = uniforms.particle_size * 0.5;

    if uniforms.size_attenuation != 0u {
        // World-sized billboard: shrinks with distance.
        clip_pos.x += corner.x * half_size * uniforms.proj_scale.x;
        clip_pos.y += corner.y * half_size * uniforms.proj_scale.y;
    } else {
        // Fixed on-screen size, particle_size * 100 logical pixels.
        let half_px = half_size * 100.0 * uniforms.pixel_ratio;
        clip_pos.x += corner.x * half_px * 2.0 / uniforms.viewport.x * clip_pos.w;
        clip_pos.y += corner.y * half_px * 2.0 / uniforms.viewport.y * clip_pos.w;
    }

    var out: VertexOutput;
    out.clip_position = clip_pos;
    out.color = particle_color;
    out.uv = vec2<f32>(corner.x * 0.5 + 0.5, 0.5 - corner.y * 0.5);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let texel = textureSample(sprite, sprite_sampler, in.uv);
    // Green channel doubles as the alpha map.
    let alpha = texel.g * texel.a;
    if alpha < 0.001 {
        discard;
    }
    return vec4<f32>(in.color * texel.rgb, alpha);
}
"#;

const COMPUTE_BODY: &str = r#"
struct Point {
    position: vec3<f32>,
    color: vec3<f32>,
};

@group(0) @binding(0)
var<storage, read_write> points: array<Point>;

@group(0) @binding(1)
var<uniform> uniforms: Uniforms;

@compute @workgroup_size(256)
fn main(@builtin(global_invocation_id) global_id: vec3<u32>) {
    let index = global_id.x;
    if index >= arrayLength(&points) {
        return;
    }
    points[index].position.y = sin(uniforms.time + points[index].position.x);
}
"#;

/// Point-sprite vertex and fragment shader.
pub fn render_shader() -> String {
    format!("{UNIFORMS_WGSL}{RENDER_BODY}")
}

/// Wave displacement compute shader.
pub fn compute_shader() -> String {
    format!("{UNIFORMS_WGSL}{COMPUTE_BODY}")
}

/// Workgroups needed to cover `count` particles.
pub fn workgroup_count(count: u32) -> u32 {
    count.div_ceil(WORKGROUP_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(source: &str) -> naga::Module {
        let module = naga::front::wgsl::parse_str(source)
            .unwrap_or_else(|e| panic!("WGSL parse error:\n{}", e.emit_to_string(source)));
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .unwrap_or_else(|e| panic!("WGSL validation error: {e:?}"));
        module
    }

    #[test]
    fn test_render_shader_validates() {
        let module = validate(&render_shader());
        let names: Vec<_> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
        assert!(names.contains(&"vs_main"));
        assert!(names.contains(&"fs_main"));
    }

    #[test]
    fn test_compute_shader_validates() {
        let module = validate(&compute_shader());
        let main = module
            .entry_points
            .iter()
            .find(|e| e.name == "main")
            .expect("compute entry point");
        assert_eq!(main.workgroup_size, [WORKGROUP_SIZE, 1, 1]);
    }

    #[test]
    fn test_host_layouts_match_wgsl() {
        assert_eq!(std::mem::size_of::<GpuPoint>(), 32);
        assert_eq!(std::mem::size_of::<Uniforms>(), 96);
        assert_eq!(std::mem::size_of::<Uniforms>() % 16, 0);
    }

    #[test]
    fn test_workgroup_count_rounds_up() {
        assert_eq!(workgroup_count(0), 0);
        assert_eq!(workgroup_count(1), 1);
        assert_eq!(workgroup_count(256), 1);
        assert_eq!(workgroup_count(50_000), 196);
    }
}
