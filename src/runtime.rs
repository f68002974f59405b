use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const TICK_RATE_MS: u64 = 100;

/// A player intent, independent of the key that produced it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Quit,
    NextMode,
    PrevMode,
    /// space or enter
    Confirm,
    Left,
    Right,
    /// a printable key, lowercased
    Char(char),
}

/// Everything the drill loop reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrillEvent {
    Input(Input),
    Resize(u16, u16),
    Tick,
}

pub fn input_from_key(key: &KeyEvent) -> Option<Input> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Input::Quit);
    }
    match key.code {
        KeyCode::Esc => Some(Input::Quit),
        KeyCode::Tab => Some(Input::NextMode),
        KeyCode::BackTab => Some(Input::PrevMode),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Input::Confirm),
        KeyCode::Left => Some(Input::Left),
        KeyCode::Right => Some(Input::Right),
        KeyCode::Char(c) => Some(Input::Char(c.to_ascii_lowercase())),
        _ => None,
    }
}

/// Turn a terminal event into a drill event; `None` for anything the drills ignore
pub fn translate(event: CtEvent) -> Option<DrillEvent> {
    match event {
        // releases would double every action on platforms that report them
        CtEvent::Key(key) if key.kind == KeyEventKind::Release => None,
        CtEvent::Key(key) => input_from_key(&key).map(DrillEvent::Input),
        CtEvent::Resize(width, height) => Some(DrillEvent::Resize(width, height)),
        _ => None,
    }
}

/// Drill events from a channel, with a tick whenever `tick` passes quietly
pub struct EventStream {
    rx: Receiver<DrillEvent>,
    tick: Duration,
}

impl EventStream {
    /// Read the terminal on a background thread
    pub fn terminal(tick: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(ev) => {
                    if let Some(ev) = translate(ev) {
                        if tx.send(ev).is_err() {
                            break;
                        }
                    }
                }
                Err(e) => {
                    log::error!("terminal input stopped: {e}");
                    break;
                }
            }
        });

        Self::from_channel(rx, tick)
    }

    pub fn from_channel(rx: Receiver<DrillEvent>, tick: Duration) -> Self {
        Self { rx, tick }
    }

    /// Blocks for at most one tick
    pub fn next(&self) -> DrillEvent {
        match self.rx.recv_timeout(self.tick) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                DrillEvent::Tick
            }
        }
    }
}
