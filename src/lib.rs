/*
 * @file lib.rs
 * @brief Stark library root
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

//! Stark - a keyword-driven command-line assistant.
//!
//! This library provides a small console assistant that:
//! - matches typed input against fixed keyword groups (exit, open-app,
//!   greeting, identity) in priority order
//! - speaks every reply through the system text-to-speech program
//! - launches a handful of desktop applications per operating system
//!
//! # Example
//! ```no_run
//! use anyhow::Result;
//! use stark::assistant;
//!
//! fn main() -> Result<()> {
//!     dotenv::dotenv().ok();
//!     assistant::run_assistant()
//! }
//! ```

pub mod assistant;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod launcher;
pub mod phrases;
pub mod platform;
pub mod speech;

#[cfg(test)]
mod testing;
