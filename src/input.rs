/*
 * @file input.rs
 * @brief Console input events for Stark
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

//! Line input with interrupt and end-of-input delivered as events.

use std::{
    io::{self, BufRead},
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

/// One thing the interaction loop can observe while waiting for input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// A line as typed, without its line terminator.
    Line(String),
    /// The user pressed Ctrl-C.
    Interrupted,
    /// Input reached end of file or could no longer be read.
    Closed,
}

/// Source of input events for the interaction loop.
pub trait InputSource {
    /// Blocks until the next event is available.
    fn next_event(&mut self) -> InputEvent;
}

/// Reads lines on a background thread and merges Ctrl-C into the same stream.
///
/// # Details
/// Keeping the blocking read off the loop's thread lets an interrupt end the
/// wait immediately instead of after the next newline.
pub struct ConsoleInput {
    events: Receiver<InputEvent>,
}

impl ConsoleInput {
    /// Starts reading standard input and installs the Ctrl-C handler.
    pub fn start() -> Self {
        let (tx, rx) = mpsc::channel();
        let interrupt_tx = tx.clone();
        if let Err(err) = ctrlc::set_handler(move || {
            let _ = interrupt_tx.send(InputEvent::Interrupted);
        }) {
            log::warn!("could not install interrupt handler: {}", err);
        }
        thread::spawn(move || read_lines(io::stdin().lock(), tx));
        Self { events: rx }
    }

    /// Reads lines from `reader` without touching signal handling.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || read_lines(reader, tx));
        Self { events: rx }
    }
}

impl InputSource for ConsoleInput {
    fn next_event(&mut self) -> InputEvent {
        self.events.recv().unwrap_or(InputEvent::Closed)
    }
}

/// Forwards lines from `reader` until end of input or the receiver goes away.
///
/// # Details
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// garbled line reaches the loop as ordinary input instead of ending the
/// session. Only end of file and read failures close the stream.
fn read_lines<R: BufRead>(mut reader: R, tx: Sender<InputEvent>) {
    loop {
        let mut bytes = Vec::new();
        let event = match reader.read_until(b'\n', &mut bytes) {
            Ok(0) => InputEvent::Closed,
            Ok(_) => {
                let line = String::from_utf8_lossy(&bytes);
                InputEvent::Line(strip_line_ending(&line).to_string())
            }
            Err(err) => {
                log::error!("input read error: {}", err);
                InputEvent::Closed
            }
        };
        let closed = event == InputEvent::Closed;
        if tx.send(event).is_err() || closed {
            break;
        }
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(line)
}
