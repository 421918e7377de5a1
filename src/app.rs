use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::{
    config::EditorConfig,
    editor::{ClickOutcome, Editor},
    error::SetupError,
    gfx::{rendering::RenderEngine, scene::Scene},
    input::{EditorKey, InputEvent},
    ui::{apply_panel_actions, editor_panel, PanelAction, PanelState, UiManager},
};

/// Initialises `env_logger`, honouring `RUST_LOG` and defaulting to `info`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Windowed editor: owns the winit event loop and forwards input to the
/// [`Editor`].
pub struct EditorApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    editor: Editor,
    panel_state: PanelState,
    cursor: (f32, f32),
    setup_error: Option<SetupError>,
}

impl EditorApp {
    /// Creates the application around an already populated scene.
    pub fn new(config: EditorConfig, scene: Scene) -> Result<Self, SetupError> {
        let event_loop = EventLoop::new()?;

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                editor: Editor::new(config, scene),
                panel_state: PanelState::default(),
                cursor: (0.0, 0.0),
                setup_error: None,
            },
        })
    }

    /// Runs the event loop until the window closes.
    ///
    /// Returns the setup error if the window or GPU could not be brought up.
    pub fn run(mut self) -> Result<(), SetupError> {
        init_logging();

        let Some(event_loop) = self.event_loop.take() else {
            return Ok(());
        };
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.app_state)?;

        match self.app_state.setup_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SetupError> {
        let config = self.editor.config();
        let window = event_loop.create_window(
            WindowAttributes::default()
                .with_title(config.title.clone())
                .with_inner_size(PhysicalSize::new(config.width, config.height)),
        )?;
        let window_handle = Arc::new(window);
        self.window = Some(window_handle.clone());

        let (width, height) = window_handle.inner_size().into();

        let window_clone = window_handle.clone();
        let renderer =
            pollster::block_on(async move { RenderEngine::new(window_clone, width, height).await })?;

        if self.editor.config().show_panel {
            self.ui_manager = Some(UiManager::new(
                renderer.device(),
                renderer.queue(),
                renderer.surface_format(),
                &window_handle,
            ));
        }

        self.editor.resize(width, height);
        self.render_engine = Some(renderer);
        Ok(())
    }

    /// Feeds one event to the editor, picking through the GPU pick target.
    fn dispatch(&mut self, event: InputEvent) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };
        match self.editor.handle_input(event, render_engine.picker_mut()) {
            Some(ClickOutcome::Selected(handle)) => log::debug!("clicked {:?}", handle),
            Some(outcome) => log::debug!("click: {:?}", outcome),
            None => {}
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(render_engine), Some(window)) = (self.render_engine.as_mut(), self.window.as_ref()) else {
            return;
        };

        self.editor.update();

        let clear_color = self.editor.config().clear_color;
        let camera_uniform = self.editor.camera_uniform();
        let mut actions: Vec<PanelAction> = Vec::new();

        let result = if let Some(ui_manager) = self.ui_manager.as_mut() {
            let status = self.editor.status();
            let panel_state = &mut self.panel_state;
            let actions = &mut actions;
            let window_clone = window.clone();
            let ui_callback = |device: &wgpu::Device,
                               queue: &wgpu::Queue,
                               encoder: &mut wgpu::CommandEncoder,
                               view: &wgpu::TextureView| {
                ui_manager.draw(device, queue, encoder, &window_clone, view, |ui| {
                    *actions = editor_panel(ui, &status, panel_state);
                });
            };
            render_engine.render_frame(
                self.editor.scene(),
                camera_uniform,
                clear_color,
                Some(ui_callback),
            )
        } else {
            render_engine.render_frame(
                self.editor.scene(),
                camera_uniform,
                clear_color,
                None::<fn(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView)>,
            )
        };

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("frame skipped: {}", e),
        }

        apply_panel_actions(&mut self.editor, &actions);
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            log::error!("setup failed: {}", e);
            self.setup_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // Handle UI input first
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            if ui_manager.handle_input(&window, &ui_event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if let Some(key) = EditorKey::from_winit(&logical_key) {
                    self.dispatch(InputEvent::KeyPressed(key));
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                let (x, y) = self.cursor;
                self.dispatch(InputEvent::MouseMove { x, y });
            }
            WindowEvent::CursorLeft { .. } => self.dispatch(InputEvent::CursorLeft),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.cursor;
                match state {
                    ElementState::Pressed => self.dispatch(InputEvent::MouseDown { x, y }),
                    ElementState::Released => self.dispatch(InputEvent::MouseUp { x, y }),
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.editor.resize(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    if let Err(e) = render_engine.resize(width, height) {
                        log::error!("resize failed: {}", e);
                    }
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
