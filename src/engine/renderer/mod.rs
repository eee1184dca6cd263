// Rendering system: frames are composed on a CPU canvas and presented with wgpu

pub mod canvas;
mod frame;
pub mod text;
pub mod texture;
mod vertex;

pub use canvas::{Color, BLACK, GREEN, RED, WHITE};
pub use text::TextRenderer;
pub use texture::TextureManager;

use crate::core::math::Rect;
use crate::engine::assets::TextureHandle;
use anyhow::Result;
use canvas::Canvas;
use frame::FrameTexture;
use glam::IVec2;
use log::{info, warn};
use std::sync::Arc;
use vertex::Vertex;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Drawing operations the game needs from a render target
///
/// Coordinates are in logical pixels with the origin at the top-left.
pub trait DrawTarget {
    /// Logical size of the target
    fn size(&self) -> (u32, u32);

    /// Fill the whole target with one colour
    fn clear(&mut self, color: Color);

    /// Fill a rectangle
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw one frame of a sprite sheet at `position`, optionally mirrored
    fn draw_sprite_frame(&mut self, sheet: TextureHandle, frame: Rect, position: IVec2, mirrored: bool);

    /// Draw a line of text with its top-left corner at `position`
    fn draw_text(&mut self, text: &str, position: IVec2, color: Color);
}

/// Main renderer responsible for initializing wgpu and presenting frames
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    frame: FrameTexture,
    canvas: Canvas,
    textures: TextureManager,
    text: TextRenderer,
}

impl Renderer {
    /// Create a renderer for `window` drawing at a logical resolution
    pub async fn new(
        window: Arc<Window>,
        logical_size: (u32, u32),
        text: TextRenderer,
    ) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter can present to the window"))?;
        info!("Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Sprite Duel Device"),
                    ..Default::default()
                },
                None,
            )
            .await?;

        let config = surface_config(&surface.get_capabilities(&adapter), size)?;
        surface.configure(&device, &config);

        let bind_group_layout = frame::bind_group_layout(&device);
        let pipeline = frame_pipeline(&device, &bind_group_layout, config.format);

        let (vertices, indices) = Vertex::fullscreen_quad();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        // Pixel art: no smoothing when the frame is scaled to the window
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let (width, height) = logical_size;
        let frame = FrameTexture::new(&device, &bind_group_layout, &sampler, width, height);

        info!(
            "Renderer initialized: window {}x{}, logical {}x{}",
            size.width, size.height, width, height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            pipeline,
            vertex_buffer,
            index_buffer,
            bind_group_layout,
            sampler,
            frame,
            canvas: Canvas::new(width, height),
            textures: TextureManager::new(),
            text,
        })
    }

    /// Reconfigure the surface for a new window size
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Reconfigure with the last known window size
    pub fn reconfigure(&mut self) {
        self.resize(self.size);
    }

    /// Change the resolution the game draws at
    pub fn set_logical_size(&mut self, width: u32, height: u32) {
        if (width, height) == (self.canvas.width(), self.canvas.height()) {
            return;
        }

        self.canvas.resize(width, height);
        self.frame = FrameTexture::new(
            &self.device,
            &self.bind_group_layout,
            &self.sampler,
            width,
            height,
        );
        info!("Logical resolution set to {}x{}", width, height);
    }

    /// Upload the composed canvas and show it in the window
    pub fn present(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.frame.upload(&self.queue, self.canvas.as_raw());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Frame Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, self.frame.bind_group(), &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            render_pass.draw_indexed(0..6, 0, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get a mutable reference to the texture manager
    pub fn texture_manager_mut(&mut self) -> &mut TextureManager {
        &mut self.textures
    }
}

/// Pick the surface format and presentation settings for a window of `size`
///
/// sRGB formats are preferred so sprite colours come out unchanged.
fn surface_config(
    caps: &wgpu::SurfaceCapabilities,
    size: PhysicalSize<u32>,
) -> Result<wgpu::SurfaceConfiguration> {
    let format = caps
        .formats
        .iter()
        .copied()
        .find(wgpu::TextureFormat::is_srgb)
        .or_else(|| caps.formats.first().copied())
        .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: wgpu::PresentMode::Fifo,
        alpha_mode: caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto),
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}

/// Pipeline drawing the frame texture onto a full-window quad
fn frame_pipeline(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Frame Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shaders/frame.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Frame Pipeline Layout"),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Frame Render Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: "vs_main",
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        // Two triangles, no culling or depth
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}

impl DrawTarget for Renderer {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self, color: Color) {
        self.canvas.clear(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.canvas.fill_rect(rect, color);
    }

    fn draw_sprite_frame(&mut self, sheet: TextureHandle, frame: Rect, position: IVec2, mirrored: bool) {
        match self.textures.get(sheet) {
            Some(texture) => self.canvas.blit(&texture.image, frame, position, mirrored),
            None => warn!("Sprite sheet {:?} is not loaded", sheet.id()),
        }
    }

    fn draw_text(&mut self, text: &str, position: IVec2, color: Color) {
        self.text.draw(&mut self.canvas, text, position, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(formats: Vec<wgpu::TextureFormat>) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            present_modes: vec![wgpu::PresentMode::Fifo],
            alpha_modes: Vec::new(),
            usages: wgpu::TextureUsages::RENDER_ATTACHMENT,
        }
    }

    #[test]
    fn test_surface_config_prefers_srgb() {
        let caps = caps(vec![
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        ]);
        let config = surface_config(&caps, PhysicalSize::new(1024, 767)).unwrap();

        assert_eq!(config.format, wgpu::TextureFormat::Bgra8UnormSrgb);
        assert_eq!((config.width, config.height), (1024, 767));
        assert_eq!(config.alpha_mode, wgpu::CompositeAlphaMode::Auto);
    }

    #[test]
    fn test_surface_config_falls_back_to_first_format() {
        let caps = caps(vec![wgpu::TextureFormat::Rgba8Unorm]);
        let config = surface_config(&caps, PhysicalSize::new(0, 0)).unwrap();

        assert_eq!(config.format, wgpu::TextureFormat::Rgba8Unorm);
        assert_eq!((config.width, config.height), (1, 1));
    }

    #[test]
    fn test_surface_without_formats_is_an_error() {
        assert!(surface_config(&caps(Vec::new()), PhysicalSize::new(800, 600)).is_err());
    }
}
