/*
 * @file testing.rs
 * @brief Test doubles shared by Stark unit tests
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

//! Recording stand-ins for the console, speech engine, spawner and input.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    io::{self, Write},
    rc::Rc,
};

use anyhow::Result;

use crate::{
    input::{InputEvent, InputSource},
    launcher::{LaunchPlan, Spawner},
    speech::SpeechEngine,
};

/// Console writer whose contents can be inspected after the fact.
///
/// A poisoned buffer rejects any single write containing the poison text,
/// which lets a test make exactly one kind of output fail.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
    poison: Option<&'static str>,
}

impl SharedBuffer {
    pub fn failing_on(poison: &'static str) -> Self {
        Self {
            poison: Some(poison),
            ..Self::default()
        }
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(poison) = self.poison {
            if String::from_utf8_lossy(buf).contains(poison) {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "console closed"));
            }
        }
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// What a [`RecordingEngine`] was asked to do.
#[derive(Clone, Default)]
pub struct EngineLog {
    spoken: Rc<RefCell<Vec<String>>>,
    stops: Rc<Cell<usize>>,
}

impl EngineLog {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.borrow().clone()
    }

    pub fn stops(&self) -> usize {
        self.stops.get()
    }
}

/// Speech engine that records utterances instead of producing audio.
pub struct RecordingEngine {
    log: EngineLog,
    fail: bool,
}

impl RecordingEngine {
    pub fn new() -> (Self, EngineLog) {
        let log = EngineLog::default();
        (Self { log: log.clone(), fail: false }, log)
    }

    /// An engine whose every utterance fails after being recorded.
    pub fn failing() -> (Self, EngineLog) {
        let (mut engine, log) = Self::new();
        engine.fail = true;
        (engine, log)
    }
}

impl SpeechEngine for RecordingEngine {
    fn say(&mut self, text: &str) -> Result<()> {
        self.log.spoken.borrow_mut().push(text.to_string());
        if self.fail {
            anyhow::bail!("Forced failure for testing");
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.log.stops.set(self.log.stops.get() + 1);
        Ok(())
    }
}

/// Spawner that records plans and optionally fails with a given error kind.
#[derive(Clone, Default)]
pub struct RecordingSpawner {
    plans: Rc<RefCell<Vec<LaunchPlan>>>,
    fail: Option<io::ErrorKind>,
}

impl RecordingSpawner {
    pub fn failing(kind: io::ErrorKind) -> Self {
        Self {
            fail: Some(kind),
            ..Self::default()
        }
    }

    pub fn programs(&self) -> Vec<String> {
        self.plans
            .borrow()
            .iter()
            .map(|plan| plan.program.clone())
            .collect()
    }
}

impl Spawner for RecordingSpawner {
    fn spawn(&mut self, plan: &LaunchPlan) -> io::Result<()> {
        self.plans.borrow_mut().push(plan.clone());
        match self.fail {
            Some(kind) => Err(io::Error::new(kind, "spawn refused")),
            None => Ok(()),
        }
    }
}

/// Input that replays a fixed list of events, then reports end of input.
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn lines(lines: &[&str]) -> Self {
        Self::events(lines.iter().map(|line| InputEvent::Line(line.to_string())))
    }

    pub fn events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_event(&mut self) -> InputEvent {
        self.events.pop_front().unwrap_or(InputEvent::Closed)
    }
}
