/*
 * @file commands.rs
 * @brief Keyword groups and intent classification for Stark
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

//! Keyword-group matching that turns a line of input into an intent.

use std::fmt;

/// Applications the assistant knows how to open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum App {
    Notepad,
    Calculator,
    Chrome,
    Browser,
}

impl fmt::Display for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Notepad => "notepad",
            Self::Calculator => "calculator",
            Self::Chrome => "chrome",
            Self::Browser => "browser",
        })
    }
}

/// What a line of input asks the assistant to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Exit,
    OpenApp(App),
    Greeting,
    Identity,
    /// Nothing matched; acknowledge or reject at random.
    Fallback,
}

/// An ordered set of literal substrings associated with one intent.
///
/// # Details
/// A group matches when any keyword occurs anywhere in the normalized input.
/// Matching is containment, not tokenisation, so `"hi"` also matches `"this"`.
#[derive(Clone, Copy, Debug)]
pub struct KeywordGroup {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
}

/// Every keyword group in priority order; the first match wins.
pub const KEYWORD_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        intent: Intent::Exit,
        keywords: &["shutdown", "exit", "quit", "deactivate", "goodbye", "power off"],
    },
    KeywordGroup {
        intent: Intent::OpenApp(App::Notepad),
        keywords: &["open notepad"],
    },
    KeywordGroup {
        intent: Intent::OpenApp(App::Calculator),
        keywords: &["open calculator"],
    },
    KeywordGroup {
        intent: Intent::OpenApp(App::Chrome),
        keywords: &["launch chrome", "open chrome"],
    },
    KeywordGroup {
        intent: Intent::OpenApp(App::Browser),
        keywords: &["launch browser", "open browser"],
    },
    KeywordGroup {
        intent: Intent::Greeting,
        keywords: &["hello", "hi", "hey", "greetings"],
    },
    KeywordGroup {
        intent: Intent::Identity,
        keywords: &["who are you", "your name", "access to os", "i am onit"],
    },
];

/// Lowercases and trims raw input before matching.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Classifies normalized input against [`KEYWORD_GROUPS`].
///
/// # Arguments
/// * `normalized` - Output of [`normalize`].
///
/// # Returns
/// * `Intent` - The intent of the first matching group, or `Fallback`.
pub fn classify(normalized: &str) -> Intent {
    find_group(KEYWORD_GROUPS, normalized)
        .map(|group| group.intent)
        .unwrap_or(Intent::Fallback)
}

/// Finds the first group with a keyword contained in `text`.
///
/// # Arguments
/// * `groups` - Groups to search, in priority order.
/// * `text` - The user's utterance in lowercase.
///
/// # Returns
/// * `Some(&KeywordGroup)` - The first matching group.
/// * `None` - No group matched.
pub fn find_group<'a>(groups: &'a [KeywordGroup], text: &str) -> Option<&'a KeywordGroup> {
    groups.iter().find(|group| {
        group
            .keywords
            .iter()
            .any(|keyword| text.contains(*keyword))
    })
}
