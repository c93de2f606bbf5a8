// crates/engine_core/src/renderer/mod.rs
//! Presents egui output. Plugin drawing reaches the screen as egui shapes on
//! the background layer, so a single pass covers the whole frame.

pub mod context;

use winit::window::Window;

use self::context::GraphicsContext;
use crate::error::HostError;

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

pub struct Renderer {
    ctx: GraphicsContext,
    gui_renderer: egui_wgpu::Renderer,
}

impl Renderer {
    pub async fn new(window: &Window) -> Result<Self, HostError> {
        let ctx = GraphicsContext::new(window).await?;
        let gui_renderer = egui_wgpu::Renderer::new(&ctx.device, ctx.config.format, None, 1);

        Ok(Self { ctx, gui_renderer })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
    }

    /// Reconfigures the surface after it was lost or outdated.
    pub fn recover(&mut self) {
        self.ctx.reconfigure();
    }

    pub fn render(
        &mut self,
        pixels_per_point: f32,
        primitives: &[egui::ClippedPrimitive],
        delta: &egui::TexturesDelta,
    ) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        for (id, image_delta) in &delta.set {
            self.gui_renderer
                .update_texture(&self.ctx.device, &self.ctx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.ctx.config.width, self.ctx.config.height],
            pixels_per_point,
        };

        let user_buffers = self.gui_renderer.update_buffers(
            &self.ctx.device,
            &self.ctx.queue,
            &mut encoder,
            primitives,
            &screen_descriptor,
        );

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Frame Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.gui_renderer
                .render(&mut pass, primitives, &screen_descriptor);
        }

        self.ctx
            .queue
            .submit(user_buffers.into_iter().chain(std::iter::once(encoder.finish())));

        for id in &delta.free {
            self.gui_renderer.free_texture(id);
        }

        output.present();
        Ok(())
    }
}
