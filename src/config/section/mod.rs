//! Configuration section definitions.
//!
//! Each module corresponds to a section in `coursedeck.toml`:
//!
//! | Module      | TOML Section   | Purpose                              |
//! |-------------|----------------|--------------------------------------|
//! | `manifest`  | `[manifest]`   | Manifest source and session state    |
//! | `probe`     | `[probe]`      | Existence checks (base URL, timeout) |
//! | `generator` | `[generator]`  | Curriculum generation service        |

mod generator;
mod manifest;
mod probe;

pub use generator::GeneratorConfig;
pub use manifest::ManifestConfig;
pub use probe::ProbeConfig;
