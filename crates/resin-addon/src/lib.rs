//! Add-on records and preference types for resin.
//!
//! [`AddonList`] keeps the enabled add-ons of a session, one record per
//! module name, in the order they were enabled. [`AddonPrefTypeRegistry`]
//! maps preference type identifiers to their definitions. Both are plain
//! values owned by the application; create them at startup and drop them at
//! shutdown.
//!
//! ```
//! use rhizome_resin_addon::{AddonList, AddonPrefType, AddonPrefTypeRegistry};
//!
//! let mut addons = AddonList::new();
//! addons.ensure("io_scene_gltf").unwrap();
//! assert!(addons.find("io_scene_gltf").is_some());
//!
//! let mut prefs = AddonPrefTypeRegistry::new();
//! prefs.add(AddonPrefType::new("io_scene_gltf")).unwrap();
//! assert!(prefs.find("io_scene_gltf", false).is_some());
//! ```

mod error;
mod list;
mod prefs;

pub use error::AddonError;
pub use list::{Addon, AddonList, AddonProperty, MAX_MODULE_LEN};
pub use prefs::{AddonPrefType, AddonPrefTypeRegistry};
