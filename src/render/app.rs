//! Application window and event loop handler.
//!
//! This module owns the main window, forwards tracker actions to the logic
//! thread and picks up the snapshots it publishes.

use std::sync::Arc;
use std::thread::JoinHandle;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::render::renderer::Renderer;
use crate::system::bus::{SystemBus, SystemEvent};

/// Main application struct handling window events.
pub struct App {
    bus: SystemBus,
    window_size: (f64, f64),
    logic: Option<JoinHandle<()>>,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
}

impl App {
    pub fn new(bus: SystemBus, window_size: (f64, f64), logic: JoinHandle<()>) -> Self {
        Self {
            bus,
            window_size,
            logic: Some(logic),
            window: None,
            renderer: None,
        }
    }

    /// Runs the application event loop (blocking).
    pub fn run(
        bus: SystemBus,
        window_size: (f64, f64),
        logic: JoinHandle<()>,
    ) -> Result<(), winit::error::EventLoopError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(bus, window_size, logic);
        event_loop.run_app(&mut app)
    }

    /// Stops the logic thread and waits for its final save.
    fn quit(&mut self, event_loop: &ActiveEventLoop) {
        let _ = self.bus.sys_tx.send(SystemEvent::Quit);
        if let Some(handle) = self.logic.take()
            && handle.join().is_err()
        {
            log::error!("RENDER: Logic thread panicked");
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("RENDER: Creating window...");
        let (width, height) = self.window_size;
        let win_attr = Window::default_attributes()
            .with_title("Dan Course Tracker")
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = match event_loop.create_window(win_attr) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("RENDER: Failed to create window: {}", e);
                self.quit(event_loop);
                return;
            }
        };
        self.window = Some(window.clone());

        log::info!("RENDER: Initializing WGPU...");
        match pollster::block_on(Renderer::new(window.clone())) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                log::error!("RENDER: {}", e);
                self.quit(event_loop);
                return;
            }
        }

        window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(renderer) = self.renderer.as_mut()
            && let Some(window) = self.window.as_ref()
            && renderer.handle_event(window, &event)
        {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("RENDER: Close requested");
                self.quit(event_loop);
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                let (Some(window), Some(renderer)) = (self.window.as_ref(), self.renderer.as_mut())
                else {
                    return;
                };

                if let Some(snapshot) = self.bus.render_rx.try_iter().last() {
                    renderer.update_state(snapshot);
                }

                let mut fatal = false;
                match renderer.render(window) {
                    Ok(actions) => {
                        for action in actions {
                            log::debug!("RENDER: {:?}", action);
                            if self.bus.action_tx.send(action).is_err() {
                                log::error!("RENDER: Logic thread is gone");
                            }
                        }
                    }
                    // Surface lost or outdated - reconfigure
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        renderer.resize(window.inner_size());
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("RENDER: Out of memory!");
                        fatal = true;
                    }
                    Err(wgpu::SurfaceError::Timeout) => {
                        log::warn!("RENDER: Timeout - frame dropped");
                    }
                    Err(e) => log::error!("RENDER: {:?}", e),
                }

                if fatal {
                    self.quit(event_loop);
                } else {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
