// File: crates/race-window/src/lib.rs
// Summary: Window playback: one frame per tick rendered on the CPU and blitted with softbuffer; returns when closed.

use std::num::NonZeroU32;
use std::time::Instant;

use race_core::{AnimationOptions, BarChartRace, FrameClock, Playback, RaceError, Result};
use tracing::{debug, info};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, StartCause, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::WindowBuilder;

pub struct WindowPlayback {
    title: String,
}

impl Default for WindowPlayback {
    fn default() -> Self { Self::new("GDP Race") }
}

impl WindowPlayback {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }
}

impl Playback for WindowPlayback {
    fn play(&mut self, race: &mut BarChartRace, opts: &AnimationOptions) -> Result<()> {
        let periods = race.periods().to_vec();
        let (w, h) = race.size();

        let mut event_loop = EventLoop::new();
        let window = WindowBuilder::new()
            .with_title(&self.title)
            .with_inner_size(PhysicalSize::new(w as u32, h as u32))
            .build(&event_loop)
            .map_err(viewer)?;
        let context = unsafe { softbuffer::Context::new(&window) }.map_err(viewer)?;
        let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }.map_err(viewer)?;

        let mut clock = FrameClock::new(periods.len(), opts, Instant::now());
        let mut failure: Option<RaceError> = None;
        info!(frames = periods.len(), interval_ms = opts.interval.as_millis() as u64, "showing window");

        event_loop.run_return(|event, _, cf| {
            match event {
                Event::NewEvents(StartCause::Init) => window.request_redraw(),
                Event::NewEvents(StartCause::ResumeTimeReached { .. }) => {
                    if clock.tick(Instant::now()) {
                        window.request_redraw();
                    }
                }
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => cf.set_exit(),
                    WindowEvent::KeyboardInput {
                        input: KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(VirtualKeyCode::Escape),
                            ..
                        },
                        ..
                    } => cf.set_exit(),
                    WindowEvent::Resized(_) => window.request_redraw(),
                    _ => {}
                },
                Event::RedrawRequested(_) => {
                    let period = &periods[clock.index()];
                    if let Err(e) = present(race, &mut surface, period, window.inner_size()) {
                        failure = Some(e);
                        cf.set_exit();
                    }
                }
                _ => {}
            }
            if !matches!(*cf, ControlFlow::ExitWithCode(_)) {
                *cf = match clock.deadline() {
                    Some(t) => ControlFlow::WaitUntil(t),
                    None => ControlFlow::Wait,
                };
            }
        });

        match failure {
            Some(e) => Err(e),
            None => {
                info!("window closed");
                Ok(())
            }
        }
    }
}

fn present(race: &mut BarChartRace, surface: &mut softbuffer::Surface, period: &str, size: PhysicalSize<u32>) -> Result<()> {
    // Minimized windows report a zero size; nothing to draw.
    let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
        return Ok(());
    };
    race.resize(w.get() as i32, h.get() as i32)?;
    race.render_frame(period)?;
    let frame = race.snapshot_rgba()?;
    debug!(period, width = frame.width, height = frame.height, "present");

    surface.resize(w, h).map_err(viewer)?;
    let mut buffer = surface.buffer_mut().map_err(viewer)?;
    for (dst, px) in buffer.iter_mut().zip(frame.pixels.chunks_exact(4)) {
        *dst = pack_0rgb(px);
    }
    buffer.present().map_err(viewer)
}

/// softbuffer pixel layout: 0x00RRGGBB.
fn pack_0rgb(px: &[u8]) -> u32 {
    ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32
}

fn viewer(e: impl std::fmt::Display) -> RaceError {
    RaceError::Viewer(e.to_string())
}
