//! Runtime: terminal lifecycle, the event loop and effect processing.
//!
//! A dedicated input thread blocks on `crossterm::event::read()` and forwards
//! events over a channel. The loop selects over input, a slow ticker (used to
//! catch missed resizes) and Ctrl+C, applies the effects that components
//! return, and redraws only after something happened.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::*};
use rubrics_types::{Effect, Msg};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, warn};

use crate::app::App;
use crate::ui::components::Component;
use crate::ui::main_component::MainView;

type CrosstermTerminal = Terminal<CrosstermBackend<std::io::Stdout>>;

/// Spawns the input thread. Mouse moves are throttled to one per 16 ms.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    std::thread::spawn(move || {
        let throttle = Duration::from_millis(16);
        let mut last_mouse_move = Instant::now();
        loop {
            match event::read() {
                Ok(event) => {
                    let is_mouse_move = event.as_mouse_event().is_some_and(|mouse| mouse.kind == MouseEventKind::Moved);
                    if is_mouse_move {
                        if last_mouse_move.elapsed() < throttle {
                            continue;
                        }
                        last_mouse_move = Instant::now();
                    }
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!(%error, "failed to read terminal event");
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<CrosstermTerminal> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut CrosstermTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut CrosstermTerminal, app: &mut App, main_view: &mut MainView) -> Result<()> {
    // Rebuild focus just before rendering so structure changes are reflected
    app.rebuild_focus();
    if app.focus.focused().is_none() {
        main_view.restore_focus(app);
    }
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => app.update(&Msg::Resize(width, height)),
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

/// Applies effects until none are left. Effects produced while handling one
/// (for example a `SendMsg` that adds a row) are queued behind it.
pub(crate) fn process_effects(app: &mut App, main_view: &mut MainView, effects: Vec<Effect>) {
    let mut queue = effects;
    while !queue.is_empty() {
        let mut next = Vec::new();
        for effect in queue {
            match effect {
                Effect::ShowModal(modal) => main_view.set_open_modal(app, Some(modal)),
                Effect::CloseModal => main_view.set_open_modal(app, None),
                Effect::SendMsg(msg) => next.extend(app.update(&msg)),
                Effect::Log { severity, message } => {
                    debug!(?severity, %message, "status");
                    app.append_log(severity, message);
                }
            }
        }
        queue = next;
    }
}

/// Runs the editor until the user quits, then hands the app back so the
/// caller can collect the submitted form.
pub async fn run_app(mut app: App) -> Result<App> {
    let mut input_receiver = spawn_input_thread();
    let mut main_view = MainView::new();
    let mut terminal = setup_terminal()?;

    let outcome = event_loop(&mut terminal, &mut app, &mut main_view, &mut input_receiver).await;
    cleanup_terminal(&mut terminal)?;
    outcome.map(|()| app)
}

async fn event_loop(
    terminal: &mut CrosstermTerminal,
    app: &mut App,
    main_view: &mut MainView,
    input_receiver: &mut mpsc::Receiver<Event>,
) -> Result<()> {
    let mut ticker = time::interval(Duration::from_millis(1000));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_size: Option<(u16, u16)> = crossterm::terminal::size().ok();

    render(terminal, app, main_view)?;

    loop {
        let mut needs_render = false;
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; shut down cleanly.
                    break;
                };
                if let Event::Key(key_event) = event
                    && key_event.code == KeyCode::Char('c')
                    && key_event.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }
                let effects = handle_input_event(app, main_view, event);
                process_effects(app, main_view, effects);
                needs_render = true;
            }
            _ = ticker.tick() => {
                let effects = app.update(&Msg::Tick);
                needs_render = !effects.is_empty();
                process_effects(app, main_view, effects);
            }
            _ = signal::ctrl_c() => { break; }
        }

        if app.should_quit {
            break;
        }

        // Some terminals drop resize notifications; compare sizes directly.
        if let Ok((width, height)) = crossterm::terminal::size()
            && last_size != Some((width, height))
        {
            last_size = Some((width, height));
            app.update(&Msg::Resize(width, height));
            needs_render = true;
        }

        if needs_render {
            render(terminal, app, main_view)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rubrics_types::{ElementId, Modal, Presentation, Severity};

    use super::*;
    use crate::app::tests::test_app;

    #[test]
    fn send_msg_effects_reach_the_page() {
        let mut app = test_app();
        let mut view = MainView::new();

        process_effects(
            &mut app,
            &mut view,
            vec![Effect::SendMsg(Msg::AddRubric(Presentation::Checkbox))],
        );

        assert_eq!(app.page.manager().rubric_count(), 1);
        assert_eq!(
            app.logs.entries.last().map(|entry| entry.message.as_str()),
            Some("Added Checkbox rubric #1")
        );
    }

    #[test]
    fn confirm_closes_modal_and_logs() {
        let mut app = test_app();
        let mut view = MainView::new();
        app.dispatch(Msg::AddRubric(Presentation::Dropdown));
        let effects = app.click(&ElementId::new("rubric-1-edit-button"));
        process_effects(&mut app, &mut view, effects);
        assert_eq!(app.open_modal, Some(Modal::ValueSetEditor));

        let effects = app.click(&ElementId::new("dropdown-dialog-ok"));
        process_effects(&mut app, &mut view, effects);

        assert_eq!(app.open_modal, None);
        assert!(view.modal_view.is_none());
        let last = app.logs.entries.last().expect("log entry");
        assert_eq!(last.severity, Severity::Info);
        assert_eq!(last.message, "Value set saved");
    }
}
