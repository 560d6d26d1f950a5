//! High-level rendering pipeline: the tracker screen drawn through egui + wgpu.

use crate::render::context::{GpuInitError, RenderContext};
use crate::render::ui::UiOverlay;
use crate::shared::messages::TrackerAction;
use crate::shared::snapshot::RenderState;
use crate::views::tracker::TrackerScreen;
use std::sync::Arc;
use winit::event::WindowEvent;
use winit::window::Window;

pub struct Renderer {
    ctx: RenderContext,
    ui: UiOverlay,
    screen: TrackerScreen,
    current_state: RenderState,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> Result<Self, GpuInitError> {
        let ctx = RenderContext::new(window.clone()).await?;
        let ui = UiOverlay::new(window, &ctx.device, ctx.config.format);

        Ok(Self {
            ctx,
            ui,
            screen: TrackerScreen::new(),
            current_state: RenderState::Empty,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
    }

    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.ui.handle_input(window, event)
    }

    pub fn update_state(&mut self, new_state: RenderState) {
        self.current_state = new_state;
    }

    /// Draws one frame and returns the actions the user triggered in it.
    pub fn render(&mut self, window: &Window) -> Result<Vec<TrackerAction>, wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        self.ui.begin_frame(window);
        let ctx_egui = self.ui.ctx.clone();

        let actions = match &self.current_state {
            RenderState::Tracker(snapshot) => self.screen.render(&ctx_egui, snapshot),
            RenderState::Empty => {
                egui::CentralPanel::default().show(&ctx_egui, |ui| {
                    ui.centered_and_justified(|ui| ui.spinner());
                });
                Vec::new()
            }
        };

        self.ui.end_frame_and_draw(&self.ctx, &mut encoder, &view);
        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(actions)
    }
}
