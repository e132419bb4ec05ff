use std::any::Any;
use std::env;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use log::info;
use pollster::block_on;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::WindowBuilder;

use tv_static::{fit_summary, ContentSize, NoiseImage, Renderer, Viewport, WindowViewport};

/// Initial window scale relative to the content size.
const WINDOW_SCALE: u32 = 5;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;
    let (content_width, content_height) = options.content;
    let content = ContentSize::new(content_width as f32, content_height as f32);

    if options.summary_only {
        return print_summary(options.viewport, content);
    }

    match run_interactive(options.content, content) {
        Ok(()) => Ok(()),
        Err(err) => {
            if err.downcast_ref::<WindowInitError>().is_some() {
                eprintln!(
                    "{err}. Falling back to --summary-only mode (set DISPLAY or install X11 libs to enable rendering)."
                );
                print_summary(options.viewport, content)
            } else {
                Err(err)
            }
        }
    }
}

fn print_summary(viewport: (u32, u32), content: ContentSize) -> Result<()> {
    let summary = fit_summary(Viewport::new(viewport.0, viewport.1), content)
        .context("cannot fit content into the requested viewport")?;
    println!("{summary}");
    Ok(())
}

fn run_interactive(content_pixels: (u32, u32), content: ContentSize) -> Result<()> {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let event_loop = panic::catch_unwind(AssertUnwindSafe(EventLoop::new));
    panic::set_hook(default_hook);
    let event_loop =
        event_loop.map_err(|panic| WindowInitError::from_panic("event loop", panic))?;

    let window = Arc::new(
        WindowBuilder::new()
            .with_title("TV Static")
            .with_inner_size(LogicalSize::new(
                (content_pixels.0 * WINDOW_SCALE) as f64,
                (content_pixels.1 * WINDOW_SCALE) as f64,
            ))
            .build(&event_loop)
            .map_err(|err| WindowInitError::from_error("window", err))?,
    );

    let image = NoiseImage::new(content_pixels.0, content_pixels.1)
        .context("invalid content dimensions")?;
    let renderer = block_on(Renderer::new(Arc::clone(&window), &image))?;
    let viewport = Arc::new(WindowViewport::new(
        window.inner_size().width,
        window.inner_size().height,
    ));

    let mut app = AppState {
        renderer,
        image,
        rng: rand::rng(),
        viewport,
        content,
        last_error: None,
    };

    let mut event_loop = event_loop;
    event_loop.run_return(|event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        if let Err(err) = app.process_event(&event, control_flow) {
            app.last_error = Some(err);
            control_flow.set_exit();
        }
    });

    app.shutdown();

    if let Some(err) = app.last_error {
        return Err(err);
    }

    Ok(())
}

struct AppState {
    renderer: Renderer,
    image: NoiseImage,
    rng: rand::rngs::ThreadRng,
    viewport: Arc<WindowViewport>,
    content: ContentSize,
    last_error: Option<anyhow::Error>,
}

impl AppState {
    fn process_event(&mut self, event: &Event<()>, control_flow: &mut ControlFlow) -> Result<()> {
        match event {
            Event::WindowEvent { event, window_id } if *window_id == self.renderer.window_id() => {
                match event {
                    WindowEvent::CloseRequested => {
                        control_flow.set_exit();
                    }
                    WindowEvent::Resized(size) => {
                        self.renderer.resize(*size);
                        self.viewport.update(size.width, size.height);
                    }
                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        self.renderer.resize(**new_inner_size);
                        self.viewport
                            .update(new_inner_size.width, new_inner_size.height);
                    }
                    WindowEvent::KeyboardInput { input, .. } => {
                        if input.state == ElementState::Pressed
                            && input.virtual_keycode == Some(VirtualKeyCode::Escape)
                        {
                            control_flow.set_exit();
                        }
                    }
                    _ => {}
                }
            }
            Event::RedrawRequested(window_id) if *window_id == self.renderer.window_id() => {
                self.image.regenerate(&mut self.rng);
                if let Err(err) = self.renderer.render(&self.image) {
                    match err {
                        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                            let size = self.renderer.window().inner_size();
                            self.renderer.resize(size);
                        }
                        wgpu::SurfaceError::OutOfMemory => {
                            return Err(anyhow!("GPU is out of memory"));
                        }
                        wgpu::SurfaceError::Timeout => {
                            info!("Surface timeout; retrying next frame");
                        }
                    }
                }
            }
            Event::MainEventsCleared => {
                self.renderer.window().request_redraw();
            }
            _ => {}
        }
        Ok(())
    }

    fn shutdown(&self) {
        match fit_summary(self.viewport.viewport(), self.content) {
            Ok(summary) => println!("{summary}"),
            Err(err) => eprintln!("Error summarizing final fit: {err}"),
        }
    }
}

#[derive(Debug)]
struct WindowInitError {
    message: String,
}

impl WindowInitError {
    fn from_panic(stage: &str, panic: Box<dyn Any + Send>) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {}", panic_message(panic)),
        }
    }

    fn from_error(stage: &str, err: impl fmt::Display) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {err}"),
        }
    }
}

impl fmt::Display for WindowInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for WindowInitError {}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    match panic.downcast::<String>() {
        Ok(msg) => *msg,
        Err(panic) => match panic.downcast::<&'static str>() {
            Ok(msg) => (*msg).to_string(),
            Err(_) => "unknown panic".into(),
        },
    }
}

struct CliOptions {
    content: (u32, u32),
    viewport: (u32, u32),
    summary_only: bool,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut content = (64, 48);
        let mut viewport = None;
        let mut summary_only = false;

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--content" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--content expects a WxH value"))?;
                    content = parse_size(&value)?;
                }
                "--viewport" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--viewport expects a WxH value"))?;
                    viewport = Some(parse_size(&value)?);
                }
                "--summary-only" => summary_only = true,
                other => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Usage: tv-static [--content WxH] [--viewport WxH] [--summary-only]"
                    ));
                }
            }
        }

        let viewport = viewport
            .unwrap_or((content.0 * WINDOW_SCALE, content.1 * WINDOW_SCALE));
        Ok(Self {
            content,
            viewport,
            summary_only,
        })
    }
}

fn parse_size(value: &str) -> Result<(u32, u32)> {
    let (width, height) = value
        .split_once('x')
        .ok_or_else(|| anyhow!("expected WxH, got {value}"))?;
    let width: u32 = width
        .parse()
        .with_context(|| format!("invalid width in {value}"))?;
    let height: u32 = height
        .parse()
        .with_context(|| format!("invalid height in {value}"))?;
    if width == 0 || height == 0 {
        return Err(anyhow!("dimensions must be positive, got {value}"));
    }
    Ok((width, height))
}
