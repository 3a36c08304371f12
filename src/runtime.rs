use std::io;
use std::sync::mpsc::Receiver;

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, Terminal};
use tracing::debug;

use crate::ui::ChartView;

/// Unified event type consumed by the chart loop
#[derive(Clone, Debug)]
pub enum ViewerEvent {
    Key(KeyEvent),
    Resize,
}

/// Source of terminal events (keyboard, resize)
pub trait EventSource {
    /// Block until the next event arrives. `Ok(None)` means the source is exhausted.
    fn next_event(&mut self) -> io::Result<Option<ViewerEvent>>;
}

/// Production event source using crossterm
#[derive(Debug, Default)]
pub struct CrosstermEventSource;

impl EventSource for CrosstermEventSource {
    fn next_event(&mut self) -> io::Result<Option<ViewerEvent>> {
        loop {
            match event::read()? {
                CtEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(Some(ViewerEvent::Key(key)))
                }
                CtEvent::Resize(_, _) => return Ok(Some(ViewerEvent::Resize)),
                _ => {}
            }
        }
    }
}

/// Test event source fed through a channel
pub struct TestEventSource {
    rx: Receiver<ViewerEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<ViewerEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn next_event(&mut self) -> io::Result<Option<ViewerEvent>> {
        Ok(self.rx.recv().ok())
    }
}

/// Keys that close the chart: q, Esc, Enter and Ctrl+C.
pub fn is_dismiss(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Leave the alternate screen and show the cursor again.
pub fn restore_screen<W: io::Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, Show)
}

/// Puts the terminal back into cooked mode when dropped, whichever way the
/// chart session ends. Create it right after enabling raw mode.
pub struct TerminalRestore;

impl Drop for TerminalRestore {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            debug!(%err, "failed to disable raw mode");
        }
        if let Err(err) = restore_screen(&mut io::stdout()) {
            debug!(%err, "failed to restore screen");
        }
    }
}

/// Draw the chart and block until it is dismissed or the event source runs dry.
pub fn run_chart<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    view: &ChartView<'_>,
    events: &mut E,
) -> io::Result<()> {
    terminal.draw(|f| f.render_widget(view, f.area()))?;

    while let Some(event) = events.next_event()? {
        match event {
            ViewerEvent::Resize => {
                terminal.draw(|f| f.render_widget(view, f.area()))?;
            }
            ViewerEvent::Key(key) if is_dismiss(&key) => {
                debug!(code = ?key.code, "chart dismissed");
                return Ok(());
            }
            ViewerEvent::Key(_) => {}
        }
    }

    debug!("event source closed");
    Ok(())
}
