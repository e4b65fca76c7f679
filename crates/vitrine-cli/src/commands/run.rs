use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use vitrine_core::AppConfig;
use vitrine_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    sections,
    theme::Theme,
};

pub fn run(config: Arc<AppConfig>, mouse: bool) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if mouse {
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            SetTitle("Vitrine")
        )?;
    } else {
        execute!(stdout, EnterAlternateScreen, SetTitle("Vitrine"))?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut app = App::new(config.clone(), Theme::default(), size.width, size.height, mouse);
    info!(width = size.width, height = size.height, "showcase started");

    // Event handler with animation FPS support
    let event_handler = EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.fps);

    // Track if we need the high frame rate; checked at the END of each
    // iteration to determine the NEXT iteration's tick rate
    let mut needs_fast_update = true;
    let mut last_frame = Instant::now();

    // Main loop
    loop {
        let dt = last_frame.elapsed();
        last_frame = Instant::now();
        app.advance(dt);

        terminal.draw(|frame| sections::render(frame, &app))?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app);
                    app.apply(action);
                }
                AppEvent::Mouse(mouse) => {
                    let action = handle_mouse_event(mouse);
                    app.apply(action);
                }
                AppEvent::Resize(width, height) => {
                    app.handle_resize(width, height);
                }
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    if mouse {
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    Ok(())
}
