use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;

use crate::config::AppConfig;
use crate::power::{CalcError, Number, Powers};
use crate::theme::Theme;

/// Seconds a status message stays in the info line
const STATUS_SECONDS: u64 = 3;

/// Longest text the input field accepts
const MAX_INPUT_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

pub struct App {
    pub popup: Popup,
    pub config: AppConfig,
    pub theme: Theme,

    // Raw text of the input field; parsed on every render
    pub input_buffer: String,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let theme = Theme::load(&config.theme);
        let input_buffer = config.start_value().to_string();

        Self {
            popup: Popup::None,
            config,
            theme,
            input_buffer,
            status_message: None,
            status_message_time: None,
        }
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Current input value, or the type error for non-numeric text
    pub fn value(&self) -> Result<Number, CalcError> {
        self.input_buffer.parse()
    }

    /// Square, cube and fifth power of the current input, computed fresh
    pub fn results(&self) -> Result<Powers, CalcError> {
        Powers::compute(self.value()?)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle popups first
        if self.popup != Popup::None {
            return self.handle_popup_key(key);
        }

        self.handle_normal_key(key)
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            // Step the value (number_input style spinner)
            KeyCode::Up | KeyCode::Char('+') => self.step_value(1),
            KeyCode::Down => self.step_value(-1),

            // Edit the field
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' || c == '.' => {
                if self.input_buffer.len() < MAX_INPUT_LEN {
                    self.input_buffer.push(c);
                } else {
                    self.set_status("Input is full");
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Delete => self.input_buffer.clear(),

            // Back to the configured default
            KeyCode::Char('r') => {
                self.input_buffer = self.config.default_value.to_string();
                self.set_status("Reset to default");
            }

            // Help (? or h)
            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,

            _ => {}
        }
        Ok(())
    }

    fn handle_popup_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.popup {
            Popup::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter | KeyCode::Char('q')) {
                    self.popup = Popup::None;
                }
                Ok(())
            }
            Popup::None => Ok(()),
        }
    }

    /// Add `delta` steps to the value. Unparseable text restarts from the default.
    fn step_value(&mut self, delta: i64) {
        let current = match self.value() {
            Ok(n) => n,
            Err(e) => {
                tracing::debug!("Stepping from default, input invalid: {}", e);
                self.config.default_value
            }
        };
        self.input_buffer = current.stepped(self.config.step, delta).to_string();
    }

    pub fn tick(&mut self) {
        // Clear status message after a few seconds
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_SECONDS {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    /// Persist the last valid value when the config asks for it
    pub fn remember_value(&mut self) -> Result<()> {
        if !self.config.remember_last {
            return Ok(());
        }
        if let Ok(value) = self.value() {
            if self.config.last_value != Some(value) {
                self.config.last_value = Some(value);
                self.config.save()?;
                tracing::info!("Saved last value {}", value);
            }
        }
        Ok(())
    }
}
