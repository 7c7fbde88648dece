/// WGSL shader for lit entities: one scene uniform block, one per-object
/// block bound at a dynamic offset.
pub const ENTITY_SHADER: &str = r#"
struct Scene {
    reverse_light_direction: vec3<f32>,
    eye: vec3<f32>,
};

struct Object {
    world_view_projection: mat4x4<f32>,
    world: mat4x4<f32>,
    world_inverse_transpose: mat4x4<f32>,
    base_color: vec4<f32>,
    diffuse_color: vec4<f32>,
    specular_color: vec4<f32>,
    shininess: f32,
    specular_strength: f32,
};

@group(0) @binding(0)
var<uniform> scene: Scene;

@group(1) @binding(0)
var<uniform> object: Object;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) world_position: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let position = vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = object.world_view_projection * position;
    out.normal = (object.world_inverse_transpose * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.world_position = (object.world * position).xyz;
    return out;
}

const AMBIENT: f32 = 0.25;

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let normal = normalize(in.normal);
    let to_light = normalize(scene.reverse_light_direction);
    let to_eye = normalize(scene.eye - in.world_position);
    let half_vector = normalize(to_light + to_eye);

    let lambert = max(dot(normal, to_light), 0.0);
    var specular = 0.0;
    if (lambert > 0.0) {
        specular = pow(max(dot(normal, half_vector), 0.0), object.shininess);
    }

    let rgb = object.base_color.rgb * AMBIENT
        + object.diffuse_color.rgb * lambert
        + object.specular_color.rgb * specular * object.specular_strength;
    return vec4<f32>(min(rgb, vec3<f32>(1.0)), object.base_color.a);
}
"#;
