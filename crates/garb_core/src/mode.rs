//! Generation modes.

use serde::{Deserialize, Serialize};

/// How a generation composes its reference images.
///
/// The mode is fixed at creation time and determines both the instruction
/// prompt and which reference images are sent to the provider.
///
/// # Examples
///
/// ```
/// use garb_core::GenerationMode;
///
/// let mode: GenerationMode = "outfit".parse().unwrap();
/// assert_eq!(mode, GenerationMode::Outfit);
/// assert_eq!(mode.to_string(), "outfit");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GenerationMode {
    /// Combine a top and a bottom clothing item onto the body image.
    Outfit,
    /// Dress the body image for a free-text occasion, no clothing references.
    Nano,
    /// Transfer the outfit from an inspiration photo onto the body image.
    Transfer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn modes_round_trip_through_strings() {
        for mode in GenerationMode::iter() {
            let parsed: GenerationMode = mode.to_string().parse().unwrap();
            assert_eq!(mode, parsed);
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!("collage".parse::<GenerationMode>().is_err());
    }
}
