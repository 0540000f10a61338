//! Keyboard and mouse state sampled once per frame
//!
//! Window events are folded into an [`InputState`] as they arrive; the frame
//! loop then takes an immutable [`InputSnapshot`] so the update step never
//! sees input change underneath it.

use std::collections::HashSet;

use cgmath::Vector2;
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Input as seen by one frame's update
#[derive(Debug, Clone)]
pub struct InputSnapshot {
    /// Keys held down when the snapshot was taken
    pub held: HashSet<KeyCode>,
    /// Mouse travel while the left button was held, in normalized device
    /// units (`[-1, 1]` across the window, +Y up)
    pub drag: Vector2<f32>,
    /// Escape was pressed or the window asked to close
    pub quit: bool,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            held: HashSet::new(),
            drag: Vector2::new(0.0, 0.0),
            quit: false,
        }
    }
}

impl InputSnapshot {
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Snapshot with the given keys held and no mouse motion
    pub fn with_keys(keys: &[KeyCode]) -> Self {
        Self {
            held: keys.iter().copied().collect(),
            ..Default::default()
        }
    }
}

/// Accumulates window events between frames
#[derive(Debug)]
pub struct InputState {
    window_size: PhysicalSize<u32>,
    held: HashSet<KeyCode>,
    mouse: Option<Vector2<f32>>,
    dragging: bool,
    drag: Vector2<f32>,
    quit: bool,
}

impl InputState {
    pub fn new(window_size: PhysicalSize<u32>) -> Self {
        Self {
            window_size,
            held: HashSet::new(),
            mouse: None,
            dragging: false,
            drag: Vector2::new(0.0, 0.0),
            quit: false,
        }
    }

    /// Folds one window event into the accumulated state
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => self.key_changed(*code, *state == ElementState::Pressed),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x as f32, position.y as f32)
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.button_changed(*state == ElementState::Pressed),
            WindowEvent::Resized(size) => self.resized(*size),
            WindowEvent::Focused(false) => self.focus_lost(),
            WindowEvent::CloseRequested => self.quit = true,
            _ => (),
        }
    }

    pub fn key_changed(&mut self, code: KeyCode, pressed: bool) {
        if pressed {
            if code == KeyCode::Escape {
                self.quit = true;
            }
            self.held.insert(code);
        } else {
            self.held.remove(&code);
        }
    }

    /// Cursor moved to pixel `(x, y)`, origin top-left
    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        let width = self.window_size.width.max(1) as f32;
        let height = self.window_size.height.max(1) as f32;
        let current = Vector2::new(
            (x + 0.5) / width * 2.0 - 1.0,
            (y + 0.5) / height * -2.0 + 1.0,
        );

        if let (true, Some(previous)) = (self.dragging, self.mouse) {
            self.drag += current - previous;
        }
        self.mouse = Some(current);
    }

    pub fn button_changed(&mut self, pressed: bool) {
        self.dragging = pressed;
    }

    pub fn resized(&mut self, size: PhysicalSize<u32>) {
        self.window_size = size;
    }

    /// Releases everything so keys do not stick while the window is unfocused
    pub fn focus_lost(&mut self) {
        self.held.clear();
        self.dragging = false;
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Takes this frame's snapshot and resets the per-frame drag accumulator
    pub fn snapshot(&mut self) -> InputSnapshot {
        let drag = std::mem::replace(&mut self.drag, Vector2::new(0.0, 0.0));
        InputSnapshot {
            held: self.held.clone(),
            drag,
            quit: self.quit,
        }
    }
}
