use crate::mesh::{Vertex, letter_f_mesh};
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use skyflap_math::Mat4;
use skyflap_render::{DrawCall, Frame};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct SceneUniforms {
    reverse_light_direction: [f32; 4],
    eye: [f32; 4],
}

impl SceneUniforms {
    fn from_frame(frame: &Frame) -> Self {
        let l = frame.reverse_light_direction;
        let e = frame.eye;
        Self {
            reverse_light_direction: [l.x, l.y, l.z, 0.0],
            eye: [e.x, e.y, e.z, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct ObjectUniforms {
    world_view_projection: [[f32; 4]; 4],
    world: [[f32; 4]; 4],
    world_inverse_transpose: [[f32; 4]; 4],
    base_color: [f32; 4],
    diffuse_color: [f32; 4],
    specular_color: [f32; 4],
    shininess: f32,
    specular_strength: f32,
    _pad: [f32; 2],
}

impl ObjectUniforms {
    fn from_draw(draw: &DrawCall) -> Self {
        let m = &draw.object.material;
        Self {
            world_view_projection: Mat4::GL_TO_WGPU
                .multiply(&draw.world_view_projection)
                .to_cols_array_2d(),
            world: draw.world.to_cols_array_2d(),
            world_inverse_transpose: draw.world_inverse_transpose.to_cols_array_2d(),
            base_color: m.base_color,
            diffuse_color: m.diffuse_color,
            specular_color: m.specular_color,
            shininess: m.shininess,
            specular_strength: m.specular_strength,
            _pad: [0.0; 2],
        }
    }
}

const OBJECT_UNIFORM_SIZE: u64 = std::mem::size_of::<ObjectUniforms>() as u64;
const INITIAL_OBJECT_CAPACITY: usize = 64;

/// Round `size` up to a multiple of `alignment`.
fn aligned_stride(size: u64, alignment: u64) -> u64 {
    size.div_ceil(alignment) * alignment
}

/// Capacity to allocate so that `needed` objects fit. Doubles from `current`.
fn grown_capacity(current: usize, needed: usize) -> usize {
    let mut capacity = current.max(1);
    while capacity < needed {
        capacity *= 2;
    }
    capacity
}

fn to_wgpu_color(c: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: c[0] as f64,
        g: c[1] as f64,
        b: c[2] as f64,
        a: c[3] as f64,
    }
}

/// wgpu-based frame renderer.
///
/// Per-object uniforms live in a single buffer, one aligned slot per draw
/// call, bound at a dynamic offset. The buffer grows when a frame carries
/// more draw calls than it can hold.
pub struct WgpuRenderer {
    pipeline: wgpu::RenderPipeline,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    object_stride: u64,
    object_capacity: usize,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    depth_texture: wgpu::TextureView,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let scene_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_uniforms"),
            contents: bytemuck::bytes_of(&SceneUniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let scene_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(OBJECT_UNIFORM_SIZE),
                },
                count: None,
            }],
        });

        let object_stride = aligned_stride(
            OBJECT_UNIFORM_SIZE,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );
        let (object_buffer, object_bind_group) = Self::create_object_slots(
            device,
            &object_layout,
            object_stride,
            INITIAL_OBJECT_CAPACITY,
        );

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&scene_layout, &object_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("entity_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::ENTITY_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("entity_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let mesh = letter_f_mesh();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertex_buffer"),
            contents: bytemuck::cast_slice(&mesh),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            pipeline,
            scene_buffer,
            scene_bind_group,
            object_layout,
            object_buffer,
            object_bind_group,
            object_stride,
            object_capacity: INITIAL_OBJECT_CAPACITY,
            vertex_buffer,
            vertex_count: mesh.len() as u32,
            depth_texture,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Render one frame: clear, then one draw per draw call in order.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        frame: &Frame,
    ) {
        queue.write_buffer(
            &self.scene_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms::from_frame(frame)),
        );

        let count = frame.draws.len();
        self.ensure_capacity(device, count);

        if count > 0 {
            let stride = self.object_stride as usize;
            let mut bytes = vec![0u8; stride * count];
            for (slot, draw) in bytes.chunks_exact_mut(stride).zip(&frame.draws) {
                let uniforms = ObjectUniforms::from_draw(draw);
                slot[..OBJECT_UNIFORM_SIZE as usize].copy_from_slice(bytemuck::bytes_of(&uniforms));
            }
            queue.write_buffer(&self.object_buffer, 0, &bytes);
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(to_wgpu_color(frame.clear_color)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.scene_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

            for i in 0..count {
                let offset = (i as u64 * self.object_stride) as u32;
                pass.set_bind_group(1, &self.object_bind_group, &[offset]);
                pass.draw(0..self.vertex_count, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn ensure_capacity(&mut self, device: &wgpu::Device, needed: usize) {
        if needed <= self.object_capacity {
            return;
        }
        let capacity = grown_capacity(self.object_capacity, needed);
        tracing::debug!(
            from = self.object_capacity,
            to = capacity,
            "growing object uniform buffer"
        );
        let (buffer, bind_group) =
            Self::create_object_slots(device, &self.object_layout, self.object_stride, capacity);
        self.object_buffer = buffer;
        self.object_bind_group = bind_group;
        self.object_capacity = capacity;
    }

    fn create_object_slots(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        capacity: usize,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("object_uniforms"),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bind_group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(OBJECT_UNIFORM_SIZE),
                }),
            }],
        });
        (buffer, bind_group)
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyflap_common::RenderObject;
    use skyflap_render::{RenderView, Viewport, build_frame};

    #[test]
    fn object_uniforms_match_wgsl_layout() {
        // 3 mat4 + 3 vec4 + 2 f32, padded to 16.
        assert_eq!(OBJECT_UNIFORM_SIZE, 256);
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 32);
    }

    #[test]
    fn stride_respects_offset_alignment() {
        assert_eq!(aligned_stride(256, 256), 256);
        assert_eq!(aligned_stride(192, 256), 256);
        assert_eq!(aligned_stride(257, 256), 512);
        assert_eq!(aligned_stride(256, 64), 256);
    }

    #[test]
    fn capacity_doubles_until_it_fits() {
        assert_eq!(grown_capacity(64, 10), 64);
        assert_eq!(grown_capacity(64, 65), 128);
        assert_eq!(grown_capacity(64, 300), 512);
        assert_eq!(grown_capacity(0, 3), 4);
    }

    #[test]
    fn object_uniforms_carry_material_and_wgpu_depth() {
        let view = RenderView::default();
        let objects = [RenderObject::default()];
        let frame = build_frame(&view, Viewport::new(800, 600), 0, &objects);
        let draw = &frame.draws[0];
        let u = ObjectUniforms::from_draw(draw);

        assert_eq!(u.base_color, draw.object.material.base_color);
        assert_eq!(u.shininess, draw.object.material.shininess);
        assert_eq!(u.world, draw.world.to_cols_array_2d());

        let gl = draw.world_view_projection.to_cols_array_2d();
        // x, y and w rows are untouched; z is remapped to 0..1.
        for col in 0..4 {
            assert_eq!(u.world_view_projection[col][0], gl[col][0]);
            assert_eq!(u.world_view_projection[col][1], gl[col][1]);
            assert_eq!(u.world_view_projection[col][3], gl[col][3]);
            let z = 0.5 * gl[col][2] + 0.5 * gl[col][3];
            assert!((u.world_view_projection[col][2] - z).abs() < 1e-4);
        }
    }

    #[test]
    fn scene_uniforms_take_light_and_eye() {
        let frame = build_frame(&RenderView::default(), Viewport::new(1, 1), 0, &[]);
        let s = SceneUniforms::from_frame(&frame);
        assert_eq!(s.eye, [0.0, 0.0, 100.0, 0.0]);
        assert_eq!(s.reverse_light_direction[3], 0.0);
    }

    #[test]
    fn clear_color_converts_to_f64() {
        let c = to_wgpu_color([0.5, 0.25, 1.0, 1.0]);
        assert_eq!((c.r, c.g, c.b, c.a), (0.5, 0.25, 1.0, 1.0));
    }
}
