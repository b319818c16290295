/*
 * @file launcher.rs
 * @brief Application launch dispatcher for Stark
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

//! Resolves logical application requests to OS commands and spawns them.
//!
//! Launches are fire-and-forget: success means the spawn call returned
//! without error, not that the application is running.

use std::{
    io,
    process::{Command, Stdio},
    thread,
    time::Duration,
};

use rand::RngCore;

use crate::{
    commands::App,
    error::{AssistantError, LaunchError},
    phrases::Phrasebook,
    platform::OsFamily,
    speech::Voice,
};

/// Concrete process invocation for one launch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchPlan {
    /// Platform-specific application identifier from the resolution table.
    pub target: &'static str,
    pub program: String,
    pub args: Vec<String>,
}

/// Process-creation primitive.
pub trait Spawner {
    /// Starts `plan` without waiting for it to exit.
    fn spawn(&mut self, plan: &LaunchPlan) -> io::Result<()>;
}

/// Spawns real processes with detached standard streams.
#[derive(Debug, Default)]
pub struct SystemSpawner;

impl Spawner for SystemSpawner {
    fn spawn(&mut self, plan: &LaunchPlan) -> io::Result<()> {
        let child = Command::new(&plan.program)
            .args(&plan.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        log::debug!("spawned {} {:?} as pid {}", plan.program, plan.args, child.id());
        Ok(())
    }
}

/// Result of one launch request.
#[derive(Debug)]
pub enum LaunchOutcome {
    Launched,
    Failed(LaunchError),
}

impl LaunchOutcome {
    /// Whether the spawn request went through.
    ///
    /// # Details
    /// Success only means the spawn call returned without error.
    ///
    /// # Arguments
    /// None.
    ///
    /// # Returns
    /// * `bool` - `true` for [`LaunchOutcome::Launched`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Launched)
    }
}

/// Looks up the platform identifier for `app`.
///
/// # Details
/// The table is fixed; nothing is discovered at runtime. The browser row is
/// kept as-is per platform even though `start` and `xdg-open` need arguments
/// to actually show a browser.
///
/// # Returns
/// * `Some(&str)` - The identifier for a supported platform.
/// * `None` - The platform has no launch instructions.
pub fn resolve(app: App, os: OsFamily) -> Option<&'static str> {
    let target = match (app, os) {
        (_, OsFamily::Other(_)) => return None,
        (App::Notepad, OsFamily::Windows) => "notepad",
        (App::Notepad, OsFamily::MacOs) => "TextEdit",
        (App::Notepad, OsFamily::Linux) => "gedit",
        (App::Calculator, OsFamily::Windows) => "calc",
        (App::Calculator, OsFamily::MacOs) => "Calculator",
        (App::Calculator, OsFamily::Linux) => "gnome-calculator",
        (App::Chrome, OsFamily::Windows) => "chrome",
        (App::Chrome, OsFamily::MacOs) => "Google Chrome",
        (App::Chrome, OsFamily::Linux) => "google-chrome",
        (App::Browser, OsFamily::Windows) => "start",
        (App::Browser, OsFamily::MacOs) => "/Applications/Safari.app",
        (App::Browser, OsFamily::Linux) => "xdg-open",
    };
    Some(target)
}

/// Builds the process invocation for `app` on `os`.
///
/// # Details
/// Windows goes through `cmd /C start`, macOS through `open -a`, and Linux
/// runs the identifier directly.
///
/// # Errors
/// Returns [`LaunchError::UnsupportedPlatform`] for unrecognised hosts.
pub fn launch_plan(app: App, os: OsFamily) -> Result<LaunchPlan, LaunchError> {
    let target = resolve(app, os).ok_or(LaunchError::UnsupportedPlatform(os))?;
    let (program, args) = match os {
        OsFamily::Windows => ("cmd", vec!["/C", "start", target]),
        OsFamily::MacOs => ("open", vec!["-a", target]),
        _ => (target, Vec::new()),
    };
    Ok(LaunchPlan {
        target,
        program: program.to_string(),
        args: args.into_iter().map(str::to_string).collect(),
    })
}

/// Resolves and launches applications, narrating each step.
pub struct AppLauncher {
    os: OsFamily,
    spawner: Box<dyn Spawner>,
    settle: Duration,
}

impl AppLauncher {
    /// Creates a launcher for `os`.
    ///
    /// # Arguments
    /// * `os` - Host family detected at startup.
    /// * `spawner` - Process-creation primitive.
    /// * `settle` - Pause after a successful spawn.
    pub fn new(os: OsFamily, spawner: Box<dyn Spawner>, settle: Duration) -> Self {
        Self { os, spawner, settle }
    }

    /// Opens `app`, speaking progress and failures through `voice`.
    ///
    /// # Details
    /// Unsupported platforms get an apology and no spawn attempt. Otherwise a
    /// launching phrase is spoken, the process is spawned, and the launcher
    /// pauses briefly so the OS can bring the app up. A missing executable
    /// and any other spawn error are each reported with their own message.
    ///
    /// # Returns
    /// * `Ok(LaunchOutcome)` - What happened to the request.
    ///
    /// # Errors
    /// Only console failures from `voice` and empty phrase tables propagate.
    pub fn open_application(
        &mut self,
        app: App,
        voice: &mut Voice,
        phrases: &Phrasebook,
        rng: &mut dyn RngCore,
    ) -> Result<LaunchOutcome, AssistantError> {
        let plan = match launch_plan(app, self.os) {
            Ok(plan) => plan,
            Err(err) => {
                log::warn!("cannot open {}: {}", app, err);
                voice.speak(&phrases.unsupported_platform(&self.os.to_string()))?;
                return Ok(LaunchOutcome::Failed(err));
            }
        };
        voice.speak(phrases.launching(rng)?)?;
        match self.spawner.spawn(&plan) {
            Ok(()) => {
                log::info!("launched {} via {}", plan.target, plan.program);
                if !self.settle.is_zero() {
                    thread::sleep(self.settle);
                }
                Ok(LaunchOutcome::Launched)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::warn!("launch target {} not found: {}", plan.target, err);
                voice.speak(&phrases.not_found(plan.target))?;
                Ok(LaunchOutcome::Failed(LaunchError::NotFound(
                    plan.target.to_string(),
                )))
            }
            Err(err) => {
                log::error!("launching {} failed: {}", plan.target, err);
                let line = format!("{} Error: {}", phrases.launch_failed(rng)?, err);
                voice.speak(&line)?;
                Ok(LaunchOutcome::Failed(LaunchError::Spawn {
                    app: plan.target.to_string(),
                    source: err,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Pacing;
    use crate::testing::{RecordingSpawner, SharedBuffer};
    use rand::{rngs::StdRng, SeedableRng};

    struct Harness {
        launcher: AppLauncher,
        spawned: RecordingSpawner,
        voice: Voice,
        buffer: SharedBuffer,
        phrases: Phrasebook,
        rng: StdRng,
    }

    fn harness(os: OsFamily, spawner: RecordingSpawner) -> Harness {
        let buffer = SharedBuffer::default();
        Harness {
            launcher: AppLauncher::new(os, Box::new(spawner.clone()), Duration::ZERO),
            spawned: spawner,
            voice: Voice::new("Stark", None, Box::new(buffer.clone()), Pacing::instant()),
            buffer,
            phrases: Phrasebook::new("Stark"),
            rng: StdRng::seed_from_u64(11),
        }
    }

    impl Harness {
        fn open(&mut self, app: App) -> LaunchOutcome {
            self.launcher
                .open_application(app, &mut self.voice, &self.phrases, &mut self.rng)
                .expect("console output")
        }
    }

    #[test]
    fn notepad_resolves_per_platform() {
        assert_eq!(resolve(App::Notepad, OsFamily::Windows), Some("notepad"));
        assert_eq!(resolve(App::Notepad, OsFamily::MacOs), Some("TextEdit"));
        assert_eq!(resolve(App::Notepad, OsFamily::Linux), Some("gedit"));
        assert_eq!(resolve(App::Notepad, OsFamily::Other("haiku")), None);
    }

    #[test]
    fn browser_row_is_kept_verbatim() {
        assert_eq!(resolve(App::Browser, OsFamily::Windows), Some("start"));
        assert_eq!(resolve(App::Browser, OsFamily::MacOs), Some("/Applications/Safari.app"));
        assert_eq!(resolve(App::Browser, OsFamily::Linux), Some("xdg-open"));
    }

    #[test]
    fn plans_use_platform_launch_forms() {
        let windows = launch_plan(App::Calculator, OsFamily::Windows).expect("plan");
        assert_eq!(windows.program, "cmd");
        assert_eq!(windows.args, ["/C", "start", "calc"]);

        let mac = launch_plan(App::Chrome, OsFamily::MacOs).expect("plan");
        assert_eq!(mac.program, "open");
        assert_eq!(mac.args, ["-a", "Google Chrome"]);

        let linux = launch_plan(App::Calculator, OsFamily::Linux).expect("plan");
        assert_eq!(linux.program, "gnome-calculator");
        assert!(linux.args.is_empty());
    }

    #[test]
    fn successful_launch_acknowledges_before_spawning() {
        let mut h = harness(OsFamily::Linux, RecordingSpawner::default());
        assert!(h.open(App::Notepad).is_success());
        assert_eq!(h.spawned.programs(), vec!["gedit".to_string()]);
        let output = h.buffer.contents();
        assert_eq!(output.lines().count(), 1);
        assert!([
            "Stark: Executing command.",
            "Stark: Launching application now.",
            "Stark: Opening it for you.",
        ]
        .contains(&output.trim_end()));
    }

    #[test]
    fn unsupported_platform_never_spawns() {
        let mut h = harness(OsFamily::Other("plan9"), RecordingSpawner::default());
        let outcome = h.open(App::Chrome);
        assert!(matches!(
            outcome,
            LaunchOutcome::Failed(LaunchError::UnsupportedPlatform(_))
        ));
        assert!(h.spawned.programs().is_empty());
        assert_eq!(
            h.buffer.contents(),
            "Stark: Sorry, I don't have specific instructions to open apps on plan9.\n"
        );
    }

    #[test]
    fn missing_executable_reports_not_found() {
        let spawner = RecordingSpawner::failing(io::ErrorKind::NotFound);
        let mut h = harness(OsFamily::Linux, spawner);
        let outcome = h.open(App::Chrome);
        assert!(matches!(outcome, LaunchOutcome::Failed(LaunchError::NotFound(ref t)) if t == "google-chrome"));
        assert!(h
            .buffer
            .contents()
            .ends_with("Stark: Error: Command or application 'google-chrome' not found.\n"));
    }

    #[test]
    fn other_spawn_failures_include_detail() {
        let spawner = RecordingSpawner::failing(io::ErrorKind::PermissionDenied);
        let mut h = harness(OsFamily::MacOs, spawner);
        let outcome = h.open(App::Calculator);
        assert!(matches!(outcome, LaunchOutcome::Failed(LaunchError::Spawn { .. })));
        let last = h.buffer.contents().lines().last().map(str::to_string).expect("line");
        assert!(last.contains("Error: "), "got {}", last);
        assert!(last.contains("spawn refused"), "got {}", last);
    }

    #[test]
    fn system_spawner_reports_missing_programs() {
        let plan = LaunchPlan {
            target: "stark-missing",
            program: "stark-no-such-program".to_string(),
            args: Vec::new(),
        };
        let err = SystemSpawner.spawn(&plan).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
