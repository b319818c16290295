/*
 * @file phrases.rs
 * @brief Canned response tables for Stark
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

//! Response templates and random selection within a category.

use rand::{seq::SliceRandom, Rng, RngCore};

use crate::error::AssistantError;

/// Chance that unmatched input is acknowledged rather than rejected.
pub const ACKNOWLEDGE_PROBABILITY: f64 = 0.8;

const CONFIRMATION_PHRASES: &[&str] = &[
    "Acknowledged.",
    "Understood.",
    "Processing.",
    "On it.",
    "Noted.",
    "Affirmative.",
];

const UNKNOWN_RESPONSES: &[&str] = &[
    "I do not have parameters for that request.",
    "Unable to compute. Please rephrase.",
    "That query is outside my current operational directives.",
    "Request unclear.",
    "Cannot parse instruction.",
];

const OPENING_APP_RESPONSES: &[&str] = &[
    "Executing command.",
    "Launching application now.",
    "Opening it for you.",
];

const OPEN_FAIL_RESPONSES: &[&str] = &[
    "Sorry, I encountered an error trying to open that.",
    "Unable to launch the specified application.",
    "Command execution failed.",
];

const EMPTY_INPUT_RESPONSE: &str = "Please provide a directive.";

const APOLOGY_RESPONSE: &str =
    "Apologies. I've encountered an unexpected system error. Please check the console.";

/// Every response the assistant can give, personalised with its name.
///
/// # Details
/// Categories that mention the assistant are rendered once at construction;
/// the rest are static tables. Selection always goes through the caller's
/// random source so sessions can be replayed with a seeded generator.
#[derive(Clone, Debug)]
pub struct Phrasebook {
    name: String,
    exit: Vec<String>,
    greeting: Vec<String>,
}

impl Phrasebook {
    /// Builds the phrasebook for an assistant called `name`.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            exit: vec![
                "Deactivating systems. Farewell.".to_string(),
                format!("{} signing off.", name),
                "Mission complete. Shutting down.".to_string(),
            ],
            greeting: vec![
                format!("Greetings. {} ready.", name),
                format!("Hello. {} reporting.", name),
                format!("{} online. How can I assist?", name),
            ],
        }
    }

    /// Picks a farewell for an exit keyword.
    ///
    /// # Arguments
    /// * `rng` - Random source used to pick the phrase.
    ///
    /// # Returns
    /// * `Ok(&str)` - One of the exit phrases.
    ///
    /// # Errors
    /// Returns [`AssistantError::EmptyPhrasebook`] if the table is empty.
    pub fn exit(&self, rng: &mut dyn RngCore) -> Result<&str, AssistantError> {
        pick("exit", &self.exit, rng)
    }

    /// Picks a reply to a greeting.
    ///
    /// # Arguments
    /// * `rng` - Random source used to pick the phrase.
    ///
    /// # Returns
    /// * `Ok(&str)` - One of the greeting phrases.
    ///
    /// # Errors
    /// Returns [`AssistantError::EmptyPhrasebook`] if the table is empty.
    pub fn greeting(&self, rng: &mut dyn RngCore) -> Result<&str, AssistantError> {
        pick("greeting", &self.greeting, rng)
    }

    /// Picks the acknowledgment spoken before an application is spawned.
    ///
    /// # Arguments
    /// * `rng` - Random source used to pick the phrase.
    ///
    /// # Returns
    /// * `Ok(&'static str)` - One of the launching phrases.
    ///
    /// # Errors
    /// Returns [`AssistantError::EmptyPhrasebook`] if the table is empty.
    pub fn launching(&self, rng: &mut dyn RngCore) -> Result<&'static str, AssistantError> {
        pick("launch", OPENING_APP_RESPONSES, rng)
    }

    /// Picks the lead-in for a failed launch report.
    ///
    /// # Details
    /// The caller appends the spawn error detail.
    ///
    /// # Arguments
    /// * `rng` - Random source used to pick the phrase.
    ///
    /// # Returns
    /// * `Ok(&'static str)` - One of the launch failure phrases.
    ///
    /// # Errors
    /// Returns [`AssistantError::EmptyPhrasebook`] if the table is empty.
    pub fn launch_failed(&self, rng: &mut dyn RngCore) -> Result<&'static str, AssistantError> {
        pick("launch failure", OPEN_FAIL_RESPONSES, rng)
    }

    /// Fixed answer to identity questions.
    ///
    /// # Arguments
    /// None.
    ///
    /// # Returns
    /// * `String` - The identity statement naming the assistant.
    pub fn identity(&self) -> String {
        format!("I am {}, your personal AI assistant.", self.name)
    }

    /// Prompt spoken when the user enters a blank line.
    ///
    /// # Arguments
    /// None.
    ///
    /// # Returns
    /// * `&'static str` - The request for a directive.
    pub fn empty_input(&self) -> &'static str {
        EMPTY_INPUT_RESPONSE
    }

    /// Apology spoken after an unexpected processing error.
    ///
    /// # Arguments
    /// None.
    ///
    /// # Returns
    /// * `&'static str` - The generic apology.
    pub fn apology(&self) -> &'static str {
        APOLOGY_RESPONSE
    }

    /// Response for input that matched no keyword group.
    ///
    /// # Details
    /// With probability [`ACKNOWLEDGE_PROBABILITY`] the raw input is echoed back
    /// behind a confirmation phrase; otherwise an "unknown command" phrase is used.
    ///
    /// # Arguments
    /// * `raw` - The input exactly as typed, without its line terminator.
    /// * `rng` - Random source driving both decisions.
    pub fn fallback(&self, raw: &str, rng: &mut dyn RngCore) -> Result<String, AssistantError> {
        if rng.gen_bool(ACKNOWLEDGE_PROBABILITY) {
            let confirmation = pick("confirmation", CONFIRMATION_PHRASES, rng)?;
            Ok(format!(
                "{} Command noted: '{}'. Ready for next input.",
                confirmation, raw
            ))
        } else {
            Ok(pick("unknown", UNKNOWN_RESPONSES, rng)?.to_string())
        }
    }

    /// Farewell used when the session ends by interrupt or end of input.
    pub fn emergency_shutdown(&self, rng: &mut dyn RngCore) -> Result<String, AssistantError> {
        Ok(format!("Emergency shutdown detected. {}", self.exit(rng)?))
    }

    /// Apology for a launch request on an unrecognised platform.
    ///
    /// # Arguments
    /// * `os` - Display name of the host platform.
    ///
    /// # Returns
    /// * `String` - The apology naming the platform.
    pub fn unsupported_platform(&self, os: &str) -> String {
        format!("Sorry, I don't have specific instructions to open apps on {}.", os)
    }

    /// Report for a launch target whose executable could not be found.
    ///
    /// # Arguments
    /// * `target` - The platform-specific application identifier.
    ///
    /// # Returns
    /// * `String` - The not-found message.
    pub fn not_found(&self, target: &str) -> String {
        format!("Error: Command or application '{}' not found.", target)
    }

    /// Boot lines printed before the banner.
    pub fn boot_lines(&self) -> [String; 2] {
        [
            format!("Initializing {} AI Core...", self.name),
            format!("{} Systems Booting...", self.name),
        ]
    }

    /// Headline printed between the boot rules.
    ///
    /// # Arguments
    /// None.
    ///
    /// # Returns
    /// * `String` - The upper-cased online banner.
    pub fn banner(&self) -> String {
        format!("** {} AI ONLINE **", self.name.to_uppercase())
    }

    /// Spoken once the banner is up.
    pub fn welcome_lines(&self, os: &str) -> Vec<String> {
        vec![
            format!("Operating System detected: {}", os),
            "All systems nominal. Ready for input.".to_string(),
            format!("You may address me as {}.", self.name),
            "Hello, sir.".to_string(),
            "Welcome to Mark 42.".to_string(),
            "I am at your service.".to_string(),
        ]
    }

    /// Final console line once the session has ended.
    ///
    /// # Arguments
    /// None.
    ///
    /// # Returns
    /// * `String` - The termination notice.
    pub fn terminating(&self) -> String {
        format!("{} AI process terminating.", self.name)
    }
}

fn pick<'a, S: AsRef<str>>(
    category: &'static str,
    options: &'a [S],
    rng: &mut dyn RngCore,
) -> Result<&'a str, AssistantError> {
    options
        .choose(rng)
        .map(AsRef::<str>::as_ref)
        .ok_or(AssistantError::EmptyPhrasebook(category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn personalised_categories_use_the_name() {
        let book = Phrasebook::new("Jarvis");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let greeting = book.greeting(&mut rng).expect("greeting");
            assert!(greeting.contains("Jarvis") || greeting.starts_with("Greetings"));
        }
        assert_eq!(book.identity(), "I am Jarvis, your personal AI assistant.");
        assert_eq!(book.banner(), "** JARVIS AI ONLINE **");
    }

    #[test]
    fn exit_phrases_come_from_the_exit_table() {
        let book = Phrasebook::new("Stark");
        let mut rng = StdRng::seed_from_u64(1);
        let phrase = book.exit(&mut rng).expect("exit").to_string();
        assert!(book.exit.contains(&phrase));
    }

    #[test]
    fn fallback_split_tracks_acknowledge_probability() {
        let book = Phrasebook::new("Stark");
        let mut rng = StdRng::seed_from_u64(42);
        let trials = 10_000;
        let acknowledged = (0..trials)
            .map(|_| book.fallback("status report", &mut rng).expect("fallback"))
            .filter(|reply| reply.contains("Command noted: 'status report'"))
            .count();
        let ratio = acknowledged as f64 / trials as f64;
        assert!((0.77..=0.83).contains(&ratio), "ratio was {}", ratio);
    }

    #[test]
    fn rejected_fallback_uses_unknown_table() {
        let book = Phrasebook::new("Stark");
        let mut rng = StdRng::seed_from_u64(3);
        let rejected: Vec<String> = (0..200)
            .map(|_| book.fallback("xyz", &mut rng).expect("fallback"))
            .filter(|reply| !reply.contains("Command noted"))
            .collect();
        assert!(!rejected.is_empty());
        assert!(rejected
            .iter()
            .all(|reply| UNKNOWN_RESPONSES.contains(&reply.as_str())));
    }

    #[test]
    fn empty_tables_surface_as_errors() {
        let mut rng = StdRng::seed_from_u64(0);
        let empty: [&str; 0] = [];
        let err = pick("test", &empty, &mut rng).unwrap_err();
        assert!(matches!(err, AssistantError::EmptyPhrasebook("test")));
    }

    #[test]
    fn emergency_shutdown_wraps_an_exit_phrase() {
        let book = Phrasebook::new("Stark");
        let mut rng = StdRng::seed_from_u64(9);
        let line = book.emergency_shutdown(&mut rng).expect("farewell");
        assert!(line.starts_with("Emergency shutdown detected. "));
    }
}
