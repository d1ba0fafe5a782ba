//! Application state and event handling
//!
//! This is the core of dicebox, managing:
//! - Selections, focus and popups
//! - Event handling (keyboard input)
//! - Roll sessions driven by the tick timer
//! - The roll log

use crate::config::Config;
use crate::roll::{RollError, RollLog, RollParams, RollResults, RollSession, Selection};
use crate::types::{die_options, validate_dice, Control, Dropdown, FaceOptions};
use crate::ui::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

/// How long flash messages stay on screen
const FLASH_DURATION: Duration = Duration::from_secs(3);

/// Main application state
pub struct App {
    // Core state
    pub should_quit: bool,
    pub config: Config,
    pub theme: Theme,
    pub face_options: FaceOptions,
    persist_config: bool,

    // Controls
    pub selection: Selection,
    pub focus: Control,
    pub show_sums: bool,
    pub clear_enabled: bool,

    // Rolling
    pub results: RollResults,
    pub session: Option<RollSession>,
    rng: StdRng,
    last_tick: Instant,

    // Log panel (appears after the first store, then stays)
    pub history: RollLog,
    pub log_visible: bool,

    // Popup state
    pub popup: PopupState,

    // Flash message (temporary feedback)
    pub flash_message: Option<(String, bool, Instant)>, // (message, is_error, timestamp)
}

/// Popup overlay state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupState {
    None,
    Dropdown { target: Dropdown, cursor: usize },
    Help,
}

/// Application state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    DropdownOpen,
    ShowHelp,
}

impl App {
    /// Create a new App instance
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_os_rng(), true)
    }

    /// Create an App with a given generator. When `persist_config` is false,
    /// settings changes are kept in memory only.
    pub fn with_rng(config: Config, rng: StdRng, persist_config: bool) -> Self {
        let theme = Theme::from_name(config.theme);
        let face_options = config.faces();
        let show_sums = config.show_sums;

        Self {
            should_quit: false,
            config,
            theme,
            face_options,
            persist_config,

            selection: Selection::default(),
            focus: Control::default(),
            show_sums,
            clear_enabled: false,

            results: RollResults::Empty,
            session: None,
            rng,
            last_tick: Instant::now(),

            history: RollLog::new(),
            log_visible: false,

            popup: PopupState::None,
            flash_message: None,
        }
    }

    /// Preselect dropdown values (from the command line)
    pub fn preselect(&mut self, faces: Option<u32>, dice: Option<u32>) -> Result<(), RollError> {
        if let Some(faces) = faces {
            self.selection.faces = Some(self.face_options.validate(faces)?);
        }
        if let Some(dice) = dice {
            self.selection.dice = Some(validate_dice(dice)?);
        }
        Ok(())
    }

    /// Get current app state
    pub fn state(&self) -> AppState {
        match &self.popup {
            PopupState::None => AppState::Normal,
            PopupState::Dropdown { .. } => AppState::DropdownOpen,
            PopupState::Help => AppState::ShowHelp,
        }
    }

    pub fn is_rolling(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_running())
    }

    pub fn is_rolling_continuously(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.is_running() && s.is_continuous())
    }

    /// The sum checkbox is locked while dice are in motion
    pub fn sums_enabled(&self) -> bool {
        !self.is_rolling()
    }

    pub fn roll_button_label(&self) -> &'static str {
        if self.is_rolling_continuously() {
            "Stop!"
        } else {
            "ROLL!"
        }
    }

    /// Values offered by a dropdown
    pub fn dropdown_values(&self, target: Dropdown) -> Vec<u32> {
        match target {
            Dropdown::Faces => self.face_options.as_slice().to_vec(),
            Dropdown::Dice => die_options(),
        }
    }

    fn selected_value(&self, target: Dropdown) -> Option<u32> {
        match target {
            Dropdown::Faces => self.selection.faces,
            Dropdown::Dice => self.selection.dice,
        }
    }

    fn set_selected_value(&mut self, target: Dropdown, value: u32) {
        match target {
            Dropdown::Faces => self.selection.faces = Some(value),
            Dropdown::Dice => self.selection.dice = Some(value),
        }
        debug!("{} set to {}", target.label(), value);
    }

    // === ACTIONS ===

    /// Start a continuous roll, or stop the running one
    pub fn roll_toggle(&mut self) {
        if self.is_rolling_continuously() {
            if let Some(session) = self.session.as_mut() {
                session.stop();
            }
            self.session = None;
            info!("Continuous roll stopped");
            return;
        }

        if let Some(params) = self.validate_selection() {
            info!(
                "Continuous roll started: {}d{}",
                params.dice(),
                params.faces()
            );
            self.session = Some(RollSession::continuous(params));
            self.last_tick = Instant::now();
        }
    }

    /// Roll for a fixed number of ticks, then settle
    pub fn roll_once(&mut self) {
        if let Some(params) = self.validate_selection() {
            info!("Single roll started: {}d{}", params.dice(), params.faces());
            self.session = Some(RollSession::single(
                params,
                self.config.timing.single_roll_ticks,
            ));
            self.last_tick = Instant::now();
        }
    }

    /// Check the selection before a roll. On failure the warning replaces
    /// the results and no session runs.
    fn validate_selection(&mut self) -> Option<RollParams> {
        match self.selection.params() {
            Ok(params) => {
                self.results = RollResults::Empty;
                Some(params)
            }
            Err(e) => {
                warn!("Roll rejected: {}", e);
                self.session = None;
                self.results = RollResults::Warning(e);
                None
            }
        }
    }

    /// Copy the current results into the log
    pub fn store(&mut self) {
        if self.results.is_warning() {
            return;
        }

        let values = self.results.values();
        if values.is_empty() {
            return;
        }

        self.history.store(values, self.show_sums);
        self.clear_enabled = true;
        self.log_visible = true;
        info!("Stored roll #{}", self.history.len());
        self.set_flash(format!("Stored roll #{}", self.history.len()), false);
    }

    /// Empty the log
    pub fn clear_log(&mut self) {
        if !self.clear_enabled {
            return;
        }
        self.history.clear();
        info!("Log cleared");
        self.set_flash("Log cleared".to_string(), false);
    }

    /// Flip the sum checkbox and rewrite the log to match
    pub fn toggle_sums(&mut self) {
        if !self.sums_enabled() {
            return;
        }

        self.show_sums = !self.show_sums;
        debug!("Sums {}", if self.show_sums { "on" } else { "off" });

        if self.history.is_empty() || self.results.is_warning() {
            return;
        }
        self.history.set_sums(self.show_sums);
    }

    /// Switch to the next theme and remember it
    pub fn cycle_theme(&mut self) {
        self.config.theme = self.config.theme.next();
        self.theme = Theme::from_name(self.config.theme);

        if !self.persist_config {
            return;
        }
        match self.config.save() {
            Ok(()) => self.set_flash(format!("Theme: {}", self.config.theme.as_str()), false),
            Err(e) => {
                warn!("Failed to save config: {:#}", e);
                self.set_flash(format!("Failed to save config: {}", e), true);
            }
        }
    }

    /// Open the popup list for a dropdown
    pub fn open_dropdown(&mut self, target: Dropdown) {
        let cursor = self
            .selected_value(target)
            .and_then(|v| self.dropdown_values(target).iter().position(|x| *x == v))
            .unwrap_or(0);
        self.popup = PopupState::Dropdown { target, cursor };
    }

    /// Move the selection of a dropdown by `delta` entries without opening it
    fn step_dropdown(&mut self, target: Dropdown, delta: isize) {
        let values = self.dropdown_values(target);
        if values.is_empty() {
            return;
        }

        let next = match self
            .selected_value(target)
            .and_then(|v| values.iter().position(|x| *x == v))
        {
            Some(idx) => idx
                .saturating_add_signed(delta)
                .min(values.len() - 1),
            None => 0,
        };
        self.set_selected_value(target, values[next]);
    }

    fn activate(&mut self, control: Control) {
        match control {
            Control::Faces => self.open_dropdown(Dropdown::Faces),
            Control::Dice => self.open_dropdown(Dropdown::Dice),
            Control::Store => self.store(),
            Control::Clear => self.clear_log(),
            Control::RollOnce => self.roll_once(),
            Control::Roll => self.roll_toggle(),
            Control::Sums => self.toggle_sums(),
        }
    }

    // === TIMER ===

    /// Advance the active session by one regeneration
    pub fn tick(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if let Some(values) = session.tick(&mut self.rng) {
            self.results = RollResults::Values(values);
        }

        if !session.is_running() {
            debug!("Roll settled: {:?}", self.results.values());
            self.session = None;
        }
    }

    /// Tick if the interval has elapsed; also expires flash messages
    pub fn update_timer(&mut self) {
        if let Some((_, _, instant)) = &self.flash_message {
            if instant.elapsed() >= FLASH_DURATION {
                self.flash_message = None;
            }
        }

        if self.session.is_some() && self.last_tick.elapsed() >= self.tick_interval() {
            self.last_tick = Instant::now();
            self.tick();
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.config.timing.tick_interval()
    }

    fn set_flash(&mut self, message: String, is_error: bool) {
        self.flash_message = Some((message, is_error, Instant::now()));
    }

    // === KEY HANDLING ===

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        match self.state() {
            AppState::DropdownOpen => self.handle_dropdown_key(key),
            AppState::ShowHelp => {
                self.popup = PopupState::None;
                Ok(())
            }
            AppState::Normal => self.handle_normal_key(key),
        }
    }

    /// Handle key in normal state
    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.popup = PopupState::Help,

            // Focus
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.focus = self.focus.prev()
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(self.focus),

            // Quick value changes on a focused dropdown
            KeyCode::Char('j') | KeyCode::Down => match self.focus {
                Control::Faces => self.step_dropdown(Dropdown::Faces, 1),
                Control::Dice => self.step_dropdown(Dropdown::Dice, 1),
                _ => {}
            },
            KeyCode::Char('k') | KeyCode::Up => match self.focus {
                Control::Faces => self.step_dropdown(Dropdown::Faces, -1),
                Control::Dice => self.step_dropdown(Dropdown::Dice, -1),
                _ => {}
            },

            // Direct shortcuts
            KeyCode::Char('f') => self.open_dropdown(Dropdown::Faces),
            KeyCode::Char('d') => self.open_dropdown(Dropdown::Dice),
            KeyCode::Char('r') => self.roll_toggle(),
            KeyCode::Char('o') | KeyCode::Char('1') => self.roll_once(),
            KeyCode::Char('s') => self.store(),
            KeyCode::Char('c') => self.clear_log(),
            KeyCode::Char('x') => self.toggle_sums(),
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
        Ok(())
    }

    /// Handle keys while a dropdown list is open
    fn handle_dropdown_key(&mut self, key: KeyEvent) -> Result<()> {
        let PopupState::Dropdown { target, cursor } = self.popup.clone() else {
            return Ok(());
        };
        let len = self.dropdown_values(target).len();
        let last = len.saturating_sub(1);

        let cursor = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.popup = PopupState::None;
                return Ok(());
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(value) = self.dropdown_values(target).get(cursor) {
                    self.set_selected_value(target, *value);
                }
                self.popup = PopupState::None;
                return Ok(());
            }
            KeyCode::Char('j') | KeyCode::Down => (cursor + 1).min(last),
            KeyCode::Char('k') | KeyCode::Up => cursor.saturating_sub(1),
            KeyCode::PageDown => (cursor + 10).min(last),
            KeyCode::PageUp => cursor.saturating_sub(10),
            KeyCode::Char('g') | KeyCode::Home => 0,
            KeyCode::Char('G') | KeyCode::End => last,
            _ => cursor,
        };

        self.popup = PopupState::Dropdown { target, cursor };
        Ok(())
    }
}
