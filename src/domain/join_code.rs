//! Event join codes.
//!
//! A [`JoinCode`] is the short token an organizer shares so others can ask
//! to join an event. Codes are stored upper-case, which makes lookups
//! case-insensitive once the caller's input is normalized the same way.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::KeeperError;

/// Characters a generated code is drawn from.
pub const JOIN_CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a generated code.
pub const JOIN_CODE_LENGTH: usize = 8;

/// Longest code accepted from callers or seed data.
const MAX_PARSED_LENGTH: usize = 32;

/// Upper-case alphanumeric join code.
///
/// Deserialization goes through [`JoinCode::parse`], so a decoded code is
/// always normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String)]
pub struct JoinCode(String);

impl JoinCode {
    /// Normalizes user input (trim, upper-case) into a code.
    ///
    /// # Errors
    ///
    /// Returns [`KeeperError::ValidationFailed`] if the input is empty, too
    /// long, or contains anything but ASCII letters and digits.
    pub fn parse(raw: &str) -> Result<Self, KeeperError> {
        let normalized = raw.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(KeeperError::ValidationFailed(
                "Please enter a join code.".to_string(),
            ));
        }
        if normalized.len() > MAX_PARSED_LENGTH {
            return Err(KeeperError::ValidationFailed(format!(
                "join code longer than {MAX_PARSED_LENGTH} characters"
            )));
        }
        if !normalized.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(KeeperError::ValidationFailed(
                "join code may only contain letters and digits".to_string(),
            ));
        }
        Ok(Self(normalized))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for JoinCode {
    type Error = KeeperError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<JoinCode> for String {
    fn from(code: JoinCode) -> Self {
        code.0
    }
}

impl fmt::Display for JoinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of candidate join codes.
///
/// The store calls [`JoinCodeSource::draw`] until it gets a code no other
/// event uses, up to a configured number of attempts.
pub trait JoinCodeSource: fmt::Debug + Send + Sync {
    /// Draws one candidate code.
    fn draw(&self) -> JoinCode;
}

/// Draws codes uniformly from [`JOIN_CODE_ALPHABET`] using the thread RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomJoinCodes;

impl JoinCodeSource for RandomJoinCodes {
    fn draw(&self) -> JoinCode {
        let mut rng = rand::thread_rng();
        let code = (0..JOIN_CODE_LENGTH)
            .map(|_| {
                let idx = rng.gen_range(0..JOIN_CODE_ALPHABET.len());
                JOIN_CODE_ALPHABET.get(idx).copied().map_or('A', char::from)
            })
            .collect();
        JoinCode(code)
    }
}

/// Draws codes from `source` until `is_taken` rejects none, giving up after
/// `max_attempts` draws.
///
/// # Errors
///
/// Returns [`KeeperError::JoinCodeExhausted`] when every draw collided.
pub fn draw_unique(
    source: &dyn JoinCodeSource,
    max_attempts: u32,
    is_taken: impl Fn(&JoinCode) -> bool,
) -> Result<JoinCode, KeeperError> {
    for attempt in 1..=max_attempts {
        let candidate = source.draw();
        if !is_taken(&candidate) {
            return Ok(candidate);
        }
        tracing::debug!(attempt, "join code collision, drawing again");
    }
    Err(KeeperError::JoinCodeExhausted {
        attempts: max_attempts,
    })
}


#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::testing::ScriptedJoinCodes;
    use super::*;

    #[test]
    fn random_codes_use_the_alphabet() {
        for _ in 0..200 {
            let code = RandomJoinCodes.draw();
            assert_eq!(code.as_str().len(), JOIN_CODE_LENGTH);
            assert!(
                code.as_str()
                    .bytes()
                    .all(|b| JOIN_CODE_ALPHABET.contains(&b))
            );
        }
    }

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        let Ok(code) = JoinCode::parse("  ab12cd34 ") else {
            panic!("valid code");
        };
        assert_eq!(code.as_str(), "AB12CD34");
    }

    #[test]
    fn deserializing_normalizes_and_validates() {
        let Ok(code) = serde_json::from_str::<JoinCode>("\"ab12cd34\"") else {
            panic!("lower-case input decodes");
        };
        assert_eq!(code.as_str(), "AB12CD34");
        assert!(serde_json::from_str::<JoinCode>("\"ab-12\"").is_err());
        assert!(serde_json::from_str::<JoinCode>("\"\"").is_err());

        let Ok(json) = serde_json::to_string(&code) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "\"AB12CD34\"");
    }

    #[test]
    fn parse_rejects_blank_and_symbols() {
        assert!(JoinCode::parse("   ").is_err());
        assert!(JoinCode::parse("AB-12").is_err());
        assert!(JoinCode::parse(&"A".repeat(33)).is_err());
    }

    #[test]
    fn draw_unique_skips_taken_codes() {
        let source = ScriptedJoinCodes::new(&["TAKEN001", "TAKEN002", "FRESH003"]);
        let result = draw_unique(&source, 5, |c| c.as_str().starts_with("TAKEN"));
        let Ok(code) = result else {
            panic!("third draw is free");
        };
        assert_eq!(code.as_str(), "FRESH003");
    }

    #[test]
    fn draw_unique_gives_up_after_bound() {
        let source = ScriptedJoinCodes::new(&["SAMECODE", "SAMECODE", "SAMECODE"]);
        let result = draw_unique(&source, 3, |c| c.as_str() == "SAMECODE");
        assert!(matches!(
            result,
            Err(KeeperError::JoinCodeExhausted { attempts: 3 })
        ));
    }
}
