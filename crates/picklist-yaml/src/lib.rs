//! Declarative manifests for picklist selects.
//!
//! A manifest describes one select in YAML or TOML and builds a configured
//! [`picklist_widgets::Select`]:
//!
//! ```
//! use picklist_yaml::SelectManifest;
//!
//! let manifest = SelectManifest::from_yaml("preset: fruits\nvalue: banana\n").unwrap();
//! let select = manifest.build().unwrap();
//! assert_eq!(select.display_text(), "Banana");
//! ```

mod error;
mod manifest;

pub use error::ManifestError;
pub use manifest::{OptionConfig, PresetName, SelectManifest};
