/*
 * @file error.rs
 * @brief Error types shared by the Stark command loop and launcher
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

//! Error unions for command handling and application launching.

use std::io;

use thiserror::Error;

use crate::platform::OsFamily;

/// Failure raised while turning one line of input into a response.
///
/// # Details
/// Returned by the per-command handler; the interaction loop owns the only
/// recovery path and never terminates because of one of these.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Writing to the console failed.
    #[error("console output failed: {0}")]
    Console(#[from] io::Error),

    /// A response category had nothing to choose from.
    #[error("no {0} phrases available")]
    EmptyPhrasebook(&'static str),
}

/// Reasons an application launch request did not reach the OS.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// There are no launch instructions for this operating system.
    #[error("no launch instructions for {0}")]
    UnsupportedPlatform(OsFamily),

    /// The executable or command could not be located.
    #[error("command or application '{0}' not found")]
    NotFound(String),

    /// The spawn call failed for any other reason.
    #[error("failed to launch '{app}': {source}")]
    Spawn {
        app: String,
        #[source]
        source: io::Error,
    },
}
