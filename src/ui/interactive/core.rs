//! Main interactive UI loop.

use super::event_handler::{EventHandler, EventResult};
use super::state_manager::InteractiveState;
use super::terminal_manager::{TerminalConfig, TerminalManager};
use crate::data_fetcher::api::RemoteFeed;
use crate::error::AppError;
use crate::ui::teletext::render_buffered;

/// Runs the dashboard until the user exits.
///
/// Each turn applies finished fetches, redraws if anything changed and then waits for
/// input with an adaptive poll interval.
pub async fn run_interactive_ui<F>(
    mut state: InteractiveState<F>,
    debug_mode: bool,
) -> Result<(), AppError>
where
    F: RemoteFeed + Send + Sync + 'static,
{
    let terminal = TerminalManager::with_config(TerminalConfig { debug_mode });
    let mut stdout = terminal.setup_terminal()?;
    let event_handler = EventHandler::new();

    let result = event_loop(&mut state, &event_handler, &mut stdout).await;

    terminal.cleanup_terminal(stdout)?;
    result
}

async fn event_loop<F>(
    state: &mut InteractiveState<F>,
    event_handler: &EventHandler,
    stdout: &mut std::io::Stdout,
) -> Result<(), AppError>
where
    F: RemoteFeed + Send + Sync + 'static,
{
    loop {
        let applied = state.pump_fetches();
        if applied > 0 {
            tracing::debug!("Applied {applied} finished fetch(es)");
        }

        if state.needs_render() {
            render_buffered(stdout, state.stack(), state.date(), state.status())?;
            tracing::trace!("Rendered stack at depth {}", state.stack().depth());
            state.clear_render_flag();
        }

        match event_handler.process_events(state)? {
            EventResult::Exit => {
                tracing::info!("Exit requested");
                return Ok(());
            }
            EventResult::Handled | EventResult::Continue => {}
        }

        // let spawned fetches make progress on a single-threaded runtime
        tokio::task::yield_now().await;
    }
}
