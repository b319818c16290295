/*
 * @file assistant.rs
 * @brief Implementation of Stark's interaction loop
 * @author Kevin Thomas
 * @date 2025
 *
 * MIT License
 *
 * Copyright (c) 2025 Kevin Thomas
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Interaction loop orchestration module.
//!
//! The loop reads a line, classifies it by the first matching keyword group,
//! answers through the [`Voice`], and repeats until an exit keyword, an
//! interrupt, or end of input.

use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::{
    commands::{self, Intent},
    config::{self, AppConfig, Pacing},
    error::AssistantError,
    input::{ConsoleInput, InputEvent, InputSource},
    launcher::{AppLauncher, SystemSpawner},
    phrases::Phrasebook,
    platform::OsFamily,
    speech::{self, Voice},
};

/// Width of the `=` rule printed around the online banner.
const BANNER_WIDTH: usize = 30;

/// Runs an interactive session on the console until the user leaves.
///
/// Configuration is loaded, the host OS is detected once, and a speech engine
/// is acquired if one is available before the boot sequence starts.
///
/// # Returns
/// `Ok(())` after a graceful shutdown by any path.
///
/// # Errors
/// Returns an error only if the console fails during the boot sequence.
pub fn run_assistant() -> Result<()> {
    let config = config::load_app_config();
    let os = OsFamily::detect();
    let mut input = ConsoleInput::start();
    Assistant::from_config(&config, os).run(&mut input)
}

/// Whether the loop keeps going after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Terminate,
}

/// Session context owning every collaborator the loop talks to.
///
/// # Details
/// Built once at startup. The phrasebook, voice, launcher and random source
/// all live here for the whole session; nothing is looked up globally.
pub struct Assistant {
    phrases: Phrasebook,
    voice: Voice,
    launcher: AppLauncher,
    rng: Box<dyn RngCore>,
    os: OsFamily,
    pacing: Pacing,
}

impl Assistant {
    /// Wires real collaborators from configuration.
    ///
    /// # Arguments
    /// * `config` - Effective session configuration.
    /// * `os` - Host family detected at startup.
    pub fn from_config(config: &AppConfig, os: OsFamily) -> Self {
        let engine =
            speech::acquire_engine(config.tts_program.as_deref(), config.speech_disabled(), os);
        let voice = Voice::new(
            &config.assistant_name,
            engine,
            Box::new(io::stdout()),
            config.pacing,
        );
        let launcher = AppLauncher::new(
            os,
            Box::new(SystemSpawner),
            config.pacing.launch_settle(),
        );
        Self::new(
            Phrasebook::new(&config.assistant_name),
            voice,
            launcher,
            Box::new(StdRng::from_entropy()),
            os,
            config.pacing,
        )
    }

    /// Assembles a session from explicit parts.
    pub fn new(
        phrases: Phrasebook,
        voice: Voice,
        launcher: AppLauncher,
        rng: Box<dyn RngCore>,
        os: OsFamily,
        pacing: Pacing,
    ) -> Self {
        Self {
            phrases,
            voice,
            launcher,
            rng,
            os,
            pacing,
        }
    }

    /// Boots, then processes input until the session ends.
    ///
    /// # Details
    /// Processing errors are reported and the loop carries on. An exit
    /// keyword ends the loop after its farewell; an interrupt or end of input
    /// ends it after an emergency farewell. Either way the speech engine is
    /// released once before returning.
    ///
    /// # Errors
    /// Returns an error if the boot sequence cannot write to the console.
    pub fn run(mut self, input: &mut dyn InputSource) -> Result<()> {
        self.boot().context("Failed to run boot sequence")?;
        loop {
            if let Err(err) = self.voice.prompt() {
                log::warn!("prompt error: {}", err);
            }
            match input.next_event() {
                InputEvent::Line(line) => match self.handle_line(&line) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Terminate) => break,
                    Err(err) => self.recover(&err),
                },
                InputEvent::Interrupted | InputEvent::Closed => {
                    self.signal_farewell();
                    break;
                }
            }
        }
        self.shutdown();
        Ok(())
    }

    /// Classifies one line of input and responds to it.
    ///
    /// # Arguments
    /// * `raw` - The line as typed, without its terminator.
    ///
    /// # Returns
    /// * `Ok(Flow::Terminate)` for exit keywords, `Ok(Flow::Continue)` otherwise.
    ///
    /// # Errors
    /// Console failures and empty phrase tables; the caller recovers from both.
    pub fn handle_line(&mut self, raw: &str) -> Result<Flow, AssistantError> {
        let normalized = commands::normalize(raw);
        if normalized.is_empty() {
            self.voice.speak(self.phrases.empty_input())?;
            return Ok(Flow::Continue);
        }
        let response = match commands::classify(&normalized) {
            Intent::Exit => {
                let farewell = self.phrases.exit(&mut *self.rng)?;
                self.voice.speak(farewell)?;
                return Ok(Flow::Terminate);
            }
            Intent::OpenApp(app) => {
                let outcome = self.launcher.open_application(
                    app,
                    &mut self.voice,
                    &self.phrases,
                    &mut *self.rng,
                )?;
                log::debug!("open {} on {}: {:?}", app, self.os, outcome);
                return Ok(Flow::Continue);
            }
            Intent::Greeting => self.phrases.greeting(&mut *self.rng)?.to_string(),
            Intent::Identity => self.phrases.identity(),
            Intent::Fallback => self.phrases.fallback(raw, &mut *self.rng)?,
        };
        self.voice.speak(&response)?;
        Ok(Flow::Continue)
    }

    /// Prints the startup banner and announces readiness.
    fn boot(&mut self) -> Result<(), AssistantError> {
        let step = self.pacing.boot_step();
        let [core, systems] = self.phrases.boot_lines();
        self.voice.print(&core)?;
        pause(step * 2);
        self.voice.print(&systems)?;
        if self.voice.has_engine() {
            self.voice.speak_then(&core, Duration::ZERO)?;
            self.voice.speak_then(&systems, step)?;
        } else {
            pause(step * 3);
        }
        self.voice.print("...")?;
        pause(step);
        let rule = "=".repeat(BANNER_WIDTH);
        self.voice.print(&rule)?;
        self.voice.print(&self.phrases.banner())?;
        self.voice.print(&rule)?;
        pause(step);
        for line in self.phrases.welcome_lines(&self.os.to_string()) {
            self.voice.speak(&line)?;
        }
        Ok(())
    }

    /// Reports a processing error and apologises without leaving the loop.
    fn recover(&mut self, err: &AssistantError) {
        log::error!("unexpected error while handling input: {}", err);
        let report = format!("\n--- UNEXPECTED ERROR ---\nAn error occurred: {}", err);
        if let Err(print_err) = self.voice.print(&report) {
            log::error!("could not report error to console: {}", print_err);
        }
        if let Err(speak_err) = self.voice.speak(self.phrases.apology()) {
            log::error!("could not apologise: {}", speak_err);
        }
        pause(self.pacing.error_backoff());
    }

    /// Says goodbye after an interrupt or end of input.
    fn signal_farewell(&mut self) {
        let farewell = match self.phrases.emergency_shutdown(&mut *self.rng) {
            Ok(line) => line,
            Err(err) => {
                log::error!("no farewell available: {}", err);
                return;
            }
        };
        let result = self
            .voice
            .print("")
            .map_err(AssistantError::from)
            .and_then(|_| self.voice.speak(&farewell));
        if let Err(err) = result {
            log::warn!("farewell failed: {}", err);
        }
    }

    /// Prints the termination line and releases the speech engine.
    fn shutdown(&mut self) {
        let line = format!("\n{}", self.phrases.terminating());
        if let Err(err) = self.voice.print(&line) {
            log::warn!("termination notice failed: {}", err);
        }
        self.voice.shutdown();
    }
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}
