use crossterm::event::{Event, KeyCode, KeyEventKind, MouseEventKind};

/// Input in the form the tree consumes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Cursor {
        x: f32,
        y: f32,
        pressed: bool,
        moving: bool,
    },
    Keyboard {
        ch: char,
        pressed: bool,
    },
}

impl InputEvent {
    pub fn press(x: f32, y: f32) -> Self {
        InputEvent::Cursor {
            x,
            y,
            pressed: true,
            moving: false,
        }
    }

    pub fn release(x: f32, y: f32) -> Self {
        InputEvent::Cursor {
            x,
            y,
            pressed: false,
            moving: false,
        }
    }

    pub fn key(ch: char) -> Self {
        InputEvent::Keyboard { ch, pressed: true }
    }

    /// Translate a terminal event. Mouse cells map to the centre of a
    /// `cell_size` pixel cell; scrolling, resizes and keys without a
    /// character are dropped.
    pub fn from_crossterm(event: &Event, cell_size: (f32, f32)) -> Option<Self> {
        match event {
            Event::Mouse(mouse) => {
                let (pressed, moving) = match mouse.kind {
                    MouseEventKind::Down(_) => (true, false),
                    MouseEventKind::Drag(_) => (true, true),
                    MouseEventKind::Up(_) => (false, false),
                    MouseEventKind::Moved => (false, true),
                    _ => return None,
                };
                Some(InputEvent::Cursor {
                    x: (f32::from(mouse.column) + 0.5) * cell_size.0,
                    y: (f32::from(mouse.row) + 0.5) * cell_size.1,
                    pressed,
                    moving,
                })
            }
            Event::Key(key) => {
                let ch = match key.code {
                    KeyCode::Char(ch) => ch,
                    KeyCode::Enter => '\r',
                    KeyCode::Tab => '\t',
                    KeyCode::Backspace => '\u{8}',
                    KeyCode::Esc => '\u{1b}',
                    KeyCode::Delete => '\u{7f}',
                    _ => return None,
                };
                Some(InputEvent::Keyboard {
                    ch,
                    pressed: key.kind != KeyEventKind::Release,
                })
            }
            _ => None,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            InputEvent::Cursor { .. } => "cursor",
            InputEvent::Keyboard { .. } => "keyboard",
        }
    }
}
