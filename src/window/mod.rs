//! Spawn a winit window and run the game loop.

use std::sync::Arc;

use glamour::Size2;
use miette::{IntoDiagnostic, Report, Result, WrapErr};
use web_time::Instant;
use winit::{
    dpi::LogicalSize,
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};
use winit_input_helper::WinitInputHelper;

use crate::{
    compositor::{SCREEN_HEIGHT, SCREEN_WIDTH},
    graphics::state::MainRenderState,
    input::InputState,
    Game, GameConfig,
};

/// Maximum of the amount of `update` calls for a single `render` call.
const MAX_UPDATE_CALLS_PER_RENDER: f32 = 20.0;

/// Open a window and run the game until it's closed.
///
/// # Arguments
///
/// * `game` - State passed to every update and render step.
/// * `config` - Window and timing options.
///
/// # Errors
///
/// - When the window or the event loop can't be created.
/// - When no GPU adapter can render to the window.
/// - When the palette shader fails to compile.
/// - When rendering a frame fails.
#[inline]
pub fn run(game: Game, config: GameConfig) -> Result<()> {
    let event_loop = EventLoop::new()
        .into_diagnostic()
        .wrap_err("Error setting up event loop for window")?;

    let buffer_width = SCREEN_WIDTH as f32;
    let buffer_height = SCREEN_HEIGHT as f32;

    let window = WindowBuilder::new()
        .with_title(config.title.clone())
        // Apply scaling for the requested size
        .with_inner_size(LogicalSize::new(
            buffer_width * config.scaling,
            buffer_height * config.scaling,
        ))
        // Don't allow the window to be smaller than the pixel size
        .with_min_inner_size(LogicalSize::new(buffer_width, buffer_height))
        .build(&event_loop)
        .into_diagnostic()
        .wrap_err("Error setting up window")?;

    pollster::block_on(winit_start(event_loop, window, game, config))
}

/// Open a winit window with an event loop.
async fn winit_start(
    event_loop: EventLoop<()>,
    window: Window,
    mut game: Game,
    config: GameConfig,
) -> Result<()> {
    // Wrap the window in an atomic reference counter so it can be shared in multiple places
    let window = Arc::new(window);

    // Setup the winit input helper state
    let mut input = WinitInputHelper::new();

    let window_size = window.inner_size();

    // Create a surface on the window and setup the render state to it
    let mut render_state = MainRenderState::new(
        &config,
        Size2::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32),
        game.assets().palette_shader,
        window.clone(),
        Size2::new(window_size.width, window_size.height),
    )
    .await
    .wrap_err("Error setting up the rendering pipeline")?;

    let update_delta_time = config.update_delta_time();
    let max_frame_time = config.max_frame_time_secs;

    // Timestep accumulator for the update rate
    let mut accumulator = 0.0;
    let mut last_time = Instant::now();

    // Button state of the last update tick
    let mut input_state = InputState::default();

    // Error that stopped the loop
    let mut failure: Option<Report> = None;
    let failure_slot = &mut failure;

    log::debug!("Opening window with game loop");

    // Set the event loop to polling so we don't have to wait for new events to draw new frames
    event_loop.set_control_flow(ControlFlow::Poll);

    // Start the window and game loop
    event_loop
        .run(move |event, elwt| {
            // Pass every event to the input helper, when it returns `true` it's time to run the logic
            if !input.update(&event) {
                return;
            }

            // Exit when the window is destroyed or closed
            if input.close_requested() || input.destroyed() {
                elwt.exit();
                return;
            }

            // Resize render surface if window is resized
            if let Some(new_size) = input.window_resized() {
                render_state.resize(Size2::new(new_size.width, new_size.height));

                // On MacOS the window needs to be redrawn manually after resizing
                window.request_redraw();
            }

            // Update the timestep
            let current_time = Instant::now();
            let frame_time = (current_time - last_time)
                .as_secs_f32()
                // Ensure that the update loop cannot be called too often
                .min(MAX_UPDATE_CALLS_PER_RENDER * update_delta_time);
            last_time = current_time;

            accumulator += frame_time
                // Ensure the frametime will never surpass this amount
                .min(max_frame_time);

            while accumulator >= update_delta_time {
                profiling::scope!("Tick");

                input_state = InputState::sample(&input_state, &input);
                game.update(input_state);

                // Mark this tick as executed
                accumulator -= update_delta_time;
            }

            // Only render when the window is not minimized
            if window.is_minimized().unwrap_or(false) {
                return;
            }

            {
                profiling::scope!("Render");

                let frame = game.render();
                if let Err(err) = render_state.render(frame) {
                    log::error!("Error rendering frame, closing window");

                    *failure_slot = Some(err);
                    elwt.exit();
                    return;
                }
            }

            // Tell the profiler we've executed a tick
            profiling::finish_frame!();
        })
        .into_diagnostic()
        .wrap_err("Error running game loop")?;

    failure.map_or(Ok(()), Err)
}
