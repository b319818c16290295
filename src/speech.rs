/*
 * @file speech.rs
 * @brief Text-to-speech and console voice for Stark
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

//! Text-to-speech functionality module.
//!
//! Speech is best-effort: engine failures are logged and swallowed so the
//! session carries on in text, while console failures are reported upward.

use std::{
    env,
    io::{self, Write},
    path::Path,
    process::{Command, Stdio},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};

use crate::{config::Pacing, error::AssistantError, platform::OsFamily};

/// Speech programs tried on Linux, in order of preference.
const LINUX_TTS_PROGRAMS: &[&str] = &["espeak-ng", "espeak", "spd-say"];

/// PowerShell snippet that reads the utterance from stdin and speaks it.
const WINDOWS_SPEAK_SCRIPT: &str = "Add-Type -AssemblyName System.Speech; \
    (New-Object System.Speech.Synthesis.SpeechSynthesizer).Speak([Console]::In.ReadToEnd())";

/// A text-to-speech backend.
pub trait SpeechEngine {
    /// Speaks `text`, blocking until the utterance finishes.
    fn say(&mut self, text: &str) -> Result<()>;

    /// Releases the engine. Calling it more than once is harmless.
    fn stop(&mut self) -> Result<()>;
}

/// Speech through a system text-to-speech program such as macOS `say`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemSpeech {
    program: String,
    args: Vec<String>,
    text_via_stdin: bool,
    released: bool,
}

impl SystemSpeech {
    /// Speaks with an explicitly named program, passing text as the last argument.
    pub fn with_program(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            text_via_stdin: false,
            released: false,
        }
    }

    /// Picks the platform's usual speech program.
    ///
    /// # Details
    /// macOS uses `say`, Windows uses PowerShell's `System.Speech`, and Linux
    /// uses the first of `espeak-ng`, `espeak` or `spd-say` found on `PATH`.
    ///
    /// # Returns
    /// * `Some(SystemSpeech)` - A usable program was found.
    /// * `None` - The platform has no known or installed speech program.
    pub fn for_platform(os: OsFamily) -> Option<Self> {
        match os {
            OsFamily::MacOs => Some(Self::with_program("say")),
            OsFamily::Windows => Some(Self {
                program: "powershell".to_string(),
                args: vec![
                    "-NoProfile".to_string(),
                    "-Command".to_string(),
                    WINDOWS_SPEAK_SCRIPT.to_string(),
                ],
                text_via_stdin: true,
                released: false,
            }),
            OsFamily::Linux => LINUX_TTS_PROGRAMS
                .iter()
                .find(|program| find_on_path(program))
                .map(|program| Self::with_program(program)),
            OsFamily::Other(_) => None,
        }
    }

    /// Name or path of the program used for speech.
    ///
    /// # Arguments
    /// None.
    ///
    /// # Returns
    /// * `&str` - The program passed to the OS.
    pub fn program(&self) -> &str {
        &self.program
    }

    fn run(&self, text: &str) -> Result<()> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if self.text_via_stdin {
            command.stdin(Stdio::piped());
        } else {
            command.arg(text).stdin(Stdio::null());
        }
        let mut child = command
            .spawn()
            .with_context(|| format!("Failed to start {}", self.program))?;
        if self.text_via_stdin {
            if let Some(mut stdin) = child.stdin.take() {
                stdin
                    .write_all(text.as_bytes())
                    .with_context(|| format!("Failed to pipe text to {}", self.program))?;
            }
        }
        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for {}", self.program))?;
        if !status.success() {
            anyhow::bail!("{} exited with {}", self.program, status);
        }
        Ok(())
    }
}

impl SpeechEngine for SystemSpeech {
    fn say(&mut self, text: &str) -> Result<()> {
        if self.released {
            anyhow::bail!("Speech engine already released");
        }
        if text.trim().is_empty() {
            anyhow::bail!("Cannot speak empty text");
        }
        self.run(text)
    }

    fn stop(&mut self) -> Result<()> {
        self.released = true;
        Ok(())
    }
}

/// Chooses the speech engine for this session.
///
/// # Arguments
/// * `program` - Configured program override, if any.
/// * `disabled` - Whether configuration turned audio off.
/// * `os` - Host family, used when no override is given.
///
/// # Returns
/// * `Some(engine)` - Speech is available.
/// * `None` - The session runs text-only.
pub fn acquire_engine(
    program: Option<&str>,
    disabled: bool,
    os: OsFamily,
) -> Option<Box<dyn SpeechEngine>> {
    if disabled {
        log::info!("speech disabled by configuration");
        return None;
    }
    let engine = match program {
        Some(program) if find_on_path(program) => Some(SystemSpeech::with_program(program)),
        Some(program) => {
            log::warn!("configured speech program {} not found", program);
            None
        }
        None => SystemSpeech::for_platform(os),
    };
    match engine {
        Some(engine) => {
            log::info!("speaking through {}", engine.program());
            Some(Box::new(engine))
        }
        None => {
            log::warn!("no text-to-speech program available on {}", os);
            None
        }
    }
}

/// Reports whether `program` resolves to a file, directly or through `PATH`.
fn find_on_path(program: &str) -> bool {
    let direct = Path::new(program);
    if direct.components().count() > 1 {
        return direct.is_file();
    }
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&paths).any(|dir| {
        dir.join(program).is_file() || dir.join(format!("{}.exe", program)).is_file()
    })
}

/// Console output paired with an optional speech engine.
///
/// # Details
/// Every utterance is printed as `<Name>: <text>` before it is spoken. The
/// engine is released by [`Voice::shutdown`] or on drop, whichever comes
/// first, and never twice.
pub struct Voice {
    name: String,
    engine: Option<Box<dyn SpeechEngine>>,
    out: Box<dyn Write>,
    pacing: Pacing,
}

impl Voice {
    /// Creates a voice that prints to `out` and speaks through `engine`.
    ///
    /// # Details
    /// Passing `None` for the engine yields a text-only voice that pauses
    /// for `pacing.silent_speech_ms` in place of speaking.
    ///
    /// # Arguments
    /// * `name` - Speaker label printed before every utterance.
    /// * `engine` - Speech backend, if one was acquired.
    /// * `out` - Console writer.
    /// * `pacing` - Session delays.
    ///
    /// # Returns
    /// * `Self` - A voice holding the engine until [`Voice::shutdown`].
    pub fn new(
        name: &str,
        engine: Option<Box<dyn SpeechEngine>>,
        out: Box<dyn Write>,
        pacing: Pacing,
    ) -> Self {
        Self {
            name: name.to_string(),
            engine,
            out,
            pacing,
        }
    }

    /// Whether an engine is currently held.
    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    /// Prints and speaks `text`, pausing afterwards.
    ///
    /// # Errors
    /// Only console write failures are returned; engine failures are logged.
    pub fn speak(&mut self, text: &str) -> Result<(), AssistantError> {
        self.speak_then(text, self.pacing.post_speech())
    }

    /// Like [`Voice::speak`] with an explicit post-speech pause.
    pub fn speak_then(&mut self, text: &str, pause: Duration) -> Result<(), AssistantError> {
        writeln!(self.out, "{}: {}", self.name, text)?;
        self.out.flush()?;
        match self.engine.as_mut() {
            Some(engine) => {
                if let Err(err) = engine.say(text) {
                    log::warn!("[TTS Error: Could not speak - {:#}]", err);
                }
                pause_for(pause);
            }
            None => pause_for(self.pacing.silent_speech()),
        }
        Ok(())
    }

    /// Prints a line without speaking it.
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }

    /// Prints the input prompt.
    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "You: ")?;
        self.out.flush()
    }

    /// Releases the speech engine if one is still held.
    pub fn shutdown(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            if let Err(err) = engine.stop() {
                log::warn!("[TTS Cleanup Error: {:#}]", err);
            }
        }
    }
}

impl Drop for Voice {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn pause_for(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingEngine, SharedBuffer};

    fn voice_with(engine: Option<Box<dyn SpeechEngine>>, buffer: &SharedBuffer) -> Voice {
        Voice::new("Stark", engine, Box::new(buffer.clone()), Pacing::instant())
    }

    #[test]
    fn speak_prints_then_speaks() {
        let (engine, log) = RecordingEngine::new();
        let buffer = SharedBuffer::default();
        let mut voice = voice_with(Some(Box::new(engine)), &buffer);
        voice.speak("Hello there").expect("speak");
        assert_eq!(buffer.contents(), "Stark: Hello there\n");
        assert_eq!(log.spoken(), vec!["Hello there".to_string()]);
    }

    #[test]
    fn engine_failures_are_swallowed() {
        let (engine, log) = RecordingEngine::failing();
        let buffer = SharedBuffer::default();
        let mut voice = voice_with(Some(Box::new(engine)), &buffer);
        assert!(voice.speak("still printed").is_ok());
        assert_eq!(buffer.contents(), "Stark: still printed\n");
        assert_eq!(log.spoken().len(), 1);
    }

    #[test]
    fn text_only_voice_still_prints() {
        let buffer = SharedBuffer::default();
        let mut voice = voice_with(None, &buffer);
        assert!(!voice.has_engine());
        voice.speak("quiet mode").expect("speak");
        assert_eq!(buffer.contents(), "Stark: quiet mode\n");
    }

    #[test]
    fn shutdown_stops_engine_exactly_once() {
        let (engine, log) = RecordingEngine::new();
        let buffer = SharedBuffer::default();
        {
            let mut voice = voice_with(Some(Box::new(engine)), &buffer);
            voice.shutdown();
            voice.shutdown();
            assert!(!voice.has_engine());
        }
        assert_eq!(log.stops(), 1);
    }

    #[test]
    fn drop_releases_engine() {
        let (engine, log) = RecordingEngine::new();
        let buffer = SharedBuffer::default();
        drop(voice_with(Some(Box::new(engine)), &buffer));
        assert_eq!(log.stops(), 1);
    }

    #[test]
    fn system_speech_rejects_empty_and_released() {
        let mut engine = SystemSpeech::with_program("say");
        assert!(engine.say("   ").is_err());
        engine.stop().expect("stop");
        engine.stop().expect("second stop");
        assert!(engine.say("hello").is_err());
    }

    #[test]
    fn missing_program_fails_to_speak() {
        let mut engine = SystemSpeech::with_program("stark-no-such-speech-program");
        assert!(engine.say("hello").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn successful_program_speaks() {
        let mut engine = SystemSpeech::with_program("true");
        assert!(engine.say("hello").is_ok());
    }

    #[test]
    fn platform_programs() {
        assert_eq!(
            SystemSpeech::for_platform(OsFamily::MacOs).map(|e| e.program().to_string()),
            Some("say".to_string())
        );
        let windows = SystemSpeech::for_platform(OsFamily::Windows).expect("windows engine");
        assert_eq!(windows.program(), "powershell");
        assert!(windows.text_via_stdin);
        assert!(SystemSpeech::for_platform(OsFamily::Other("haiku")).is_none());
    }

    #[test]
    fn acquisition_honours_disable_and_missing_override() {
        assert!(acquire_engine(None, true, OsFamily::MacOs).is_none());
        assert!(acquire_engine(Some("stark-no-such-speech-program"), false, OsFamily::MacOs).is_none());
        assert!(acquire_engine(None, false, OsFamily::MacOs).is_some());
    }

    #[test]
    fn path_lookup_finds_files_in_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let program = dir.path().join("speaker");
        std::fs::write(&program, b"").expect("write");
        assert!(find_on_path(program.to_str().expect("utf8 path")));
        assert!(!find_on_path(dir.path().join("absent").to_str().expect("utf8 path")));
    }
}
