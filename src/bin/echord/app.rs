//! Event loop: terminal keys in, chord commands out, UI redrawn every frame.

use std::{
    io::stdout,
    path::PathBuf,
    time::{Duration, Instant},
};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::supports_keyboard_enhancement,
};
use echord::{audio::CpalRenderer, ChordKey, PlayerHandle, SynthConfig};
use ratatui::DefaultTerminal;

use super::input::KeyTracker;
use super::ui::{self, StatusInfo};

/// ~60 fps
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct App {
    player: PlayerHandle,
    config: SynthConfig,
    hold_timeout: Duration,
    log_file: PathBuf,
    should_quit: bool,
}

impl App {
    pub fn new(
        config: SynthConfig,
        hold_timeout: Duration,
        log_file: PathBuf,
    ) -> EyreResult<Self> {
        let player = PlayerHandle::spawn(move || CpalRenderer::new(config))
            .wrap_err("failed to start the voice thread")?;

        Ok(Self {
            player,
            config,
            hold_timeout,
            log_file,
            should_quit: false,
        })
    }

    /// Run until the user quits. Held chords are released on the way out.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> EyreResult<()> {
        let release_events = enable_release_events();
        let mut keys = if release_events {
            KeyTracker::with_release_events()
        } else {
            log::info!(
                "terminal reports no key releases, using {:?} hold timeout",
                self.hold_timeout
            );
            KeyTracker::with_hold_timeout(self.hold_timeout)
        };

        let result = self.event_loop(&mut terminal, &mut keys);

        for key in keys.release_all() {
            self.player.stop(key.number() as i32);
        }
        self.player.stop_all();
        if release_events {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        self.player.shutdown();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut DefaultTerminal,
        keys: &mut KeyTracker,
    ) -> EyreResult<()> {
        while !self.should_quit {
            let display = self.player.display();
            let status = StatusInfo {
                waveform: self.config.waveform,
                hold_timeout: keys.uses_timeout(),
                log_file: &self.log_file,
            };
            terminal.draw(|frame| ui::render(frame, &display, &status))?;

            if event::poll(FRAME_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key, keys, Instant::now());
                }
            }

            for key in keys.expired(Instant::now()) {
                self.player.stop(key.number() as i32);
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, event: KeyEvent, keys: &mut KeyTracker, now: Instant) {
        match event.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                if event.kind == KeyEventKind::Press {
                    self.should_quit = true;
                }
            }
            KeyCode::Char(c) => {
                let Some(key) = ChordKey::from_char(c) else {
                    return;
                };
                match event.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if keys.press(key, now) {
                            self.player.play(key.number() as i32);
                        }
                    }
                    KeyEventKind::Release => {
                        if keys.release(key) {
                            self.player.stop(key.number() as i32);
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

/// Ask the terminal for key-up events. Returns whether it agreed.
fn enable_release_events() -> bool {
    matches!(supports_keyboard_enhancement(), Ok(true))
        && execute!(
            stdout(),
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )
        .is_ok()
}
