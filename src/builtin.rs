//! Built-in `main` dictionary
//!
//! Everyday Russian → Norwegian phrases, basic Norwegian vocabulary and the
//! default conversation pools, embedded at compile time.

use crate::error::Result;
use crate::types::Dictionary;

/// Registration name of the embedded dictionary
pub const MAIN_DICTIONARY: &str = "main";

const MAIN_JSON: &str = include_str!("../data/main.json");

/// Parse the embedded dictionary
pub fn main_dictionary() -> Result<Dictionary> {
    Dictionary::from_json_str(MAIN_JSON)
}
