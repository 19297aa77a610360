#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

/// Pace of the typewriter and agent indicator animations.
pub const TICK_INTERVAL: time::Duration = time::Duration::from_millis(50);

/// Translates a terminal event into a screen event. Keys without a binding of
/// their own come through as `KeyboardCharInput`, so answers and text input
/// are decided by the caller.
pub fn from_crossterm(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Paste(text) => return Some(Event::KeyboardPaste(text)),
        CrosstermEvent::Resize(_, _) => return Some(Event::UIResize()),
        CrosstermEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => return Some(Event::UIScrollUp()),
            MouseEventKind::ScrollDown => return Some(Event::UIScrollDown()),
            _ => return None,
        },
        CrosstermEvent::Key(key) => return Some(from_input(key.into())),
        _ => return None,
    }
}

fn from_input(input: Input) -> Event {
    match input {
        Input {
            key: Key::Char('c'),
            ctrl: true,
            ..
        } => return Event::KeyboardCTRLC(),
        Input {
            key: Key::Char('d'),
            ctrl: true,
            ..
        }
        | Input {
            key: Key::PageDown,
            ..
        } => return Event::UIScrollPageDown(),
        Input {
            key: Key::Char('u'),
            ctrl: true,
            ..
        }
        | Input { key: Key::PageUp, .. } => return Event::UIScrollPageUp(),
        Input {
            key: Key::Down | Key::MouseScrollDown,
            ..
        } => return Event::UIScrollDown(),
        Input {
            key: Key::Up | Key::MouseScrollUp,
            ..
        } => return Event::UIScrollUp(),
        Input { key: Key::Enter, .. } => return Event::KeyboardEnter(),
        input => return Event::KeyboardCharInput(input),
    }
}

/// Merges terminal input with gateway replies coming back from the actions
/// worker, emitting a tick when both are quiet.
pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let event = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => from_crossterm(input),
                    Some(Err(err)) => {
                        tracing::warn!(error = %err, "Failed reading terminal event");
                        None
                    }
                    None => None,
                },
                _ = time::sleep(TICK_INTERVAL) => Some(Event::UITick()),
            };

            if let Some(event) = event {
                return Ok(event);
            }
        }
    }
}
