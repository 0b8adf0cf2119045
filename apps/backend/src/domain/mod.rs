//! Pure game rules: settings validation and turn rotation.
//!
//! Nothing in this module performs IO. Services load state through the
//! repos layer and call into these functions to derive facts.

pub mod settings;
pub mod turn;

pub use settings::{GameSettings, SettingsDraft};

#[cfg(test)]
mod tests_settings;
#[cfg(test)]
mod tests_turn;
