/// Debug shape shader source (WGSL).
///
/// Entry points:
/// - `vs_shape` / `fs_shape`: instanced canonical meshes. The vertex stage
///   reads `instances[instance_offset + instance_index]`, scales, rotates by
///   the instance quaternion and translates. The fragment stage keeps only
///   fragments near a wireframe-edge uv marker; a large
///   `line_width_multiplier` keeps every fragment.
/// - `vs_line` / `fs_line`: unlit line list with per-vertex color.
///
/// Bindings: `@group(0) @binding(0)` is [`DebugShapeUniforms`](crate::DebugShapeUniforms),
/// `@group(0) @binding(1)` the [`ShapeInstance`](crate::ShapeInstance) storage buffer.
pub const DEBUG_SHAPES_SHADER_WGSL: &str = r#"
struct DebugShapeUniforms {
    view_proj: mat4x4<f32>,
    instance_offset: u32,
    line_width_multiplier: f32,
    padding: vec2<u32>,
}

struct ShapeInstance {
    position: vec3<f32>,
    color: u32,
    rotation: vec4<f32>,
    scale: vec3<f32>,
    padding: f32,
}

@group(0) @binding(0) var<uniform> uniforms: DebugShapeUniforms;
@group(0) @binding(1) var<storage, read> instances: array<ShapeInstance>;

struct ShapeVertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
}

struct ShapeVertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) normal: vec3<f32>,
}

fn rotate(q: vec4<f32>, v: vec3<f32>) -> vec3<f32> {
    let t = 2.0 * cross(q.xyz, v);
    return v + q.w * t + cross(q.xyz, t);
}

@vertex
fn vs_shape(input: ShapeVertexInput, @builtin(instance_index) instance_index: u32) -> ShapeVertexOutput {
    let instance = instances[uniforms.instance_offset + instance_index];
    let local = rotate(instance.rotation, input.position * instance.scale);

    var output: ShapeVertexOutput;
    output.clip_position = uniforms.view_proj * vec4<f32>(instance.position + local, 1.0);
    output.color = unpack4x8unorm(instance.color);
    output.uv = input.uv;
    output.normal = rotate(instance.rotation, input.normal);
    return output;
}

@fragment
fn fs_shape(input: ShapeVertexOutput) -> @location(0) vec4<f32> {
    // Minimum width keeps flat-uv triangles visible in the solid pass
    let width = max(fwidth(input.uv), vec2<f32>(0.0001)) * uniforms.line_width_multiplier;
    let edge_distance = min(input.uv, vec2<f32>(1.0) - input.uv);
    if all(edge_distance > width) {
        discard;
    }
    let shade = 0.75 + 0.25 * abs(normalize(input.normal).y);
    return vec4<f32>(input.color.rgb * shade, input.color.a);
}

struct LineVertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
}

struct LineVertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_line(input: LineVertexInput) -> LineVertexOutput {
    var output: LineVertexOutput;
    output.clip_position = uniforms.view_proj * vec4<f32>(input.position, 1.0);
    output.color = input.color;
    return output;
}

@fragment
fn fs_line(input: LineVertexOutput) -> @location(0) vec4<f32> {
    return input.color;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse() -> naga::Module {
        naga::front::wgsl::parse_str(DEBUG_SHAPES_SHADER_WGSL)
            .unwrap_or_else(|e| panic!("{}", e.emit_to_string(DEBUG_SHAPES_SHADER_WGSL)))
    }

    #[test]
    fn test_shader_validates() {
        let module = parse();
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator.validate(&module).unwrap();
    }

    #[test]
    fn test_shader_entry_points() {
        let module = parse();
        let mut names: Vec<&str> = module.entry_points.iter().map(|ep| ep.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, ["fs_line", "fs_shape", "vs_line", "vs_shape"]);
    }
}
