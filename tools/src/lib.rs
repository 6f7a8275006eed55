//! # Compendium Tools
//!
//! Game modules describe their content (items, spells, creatures...) as KDL nodes, one entry
//! per file. Authoring hundreds of those files one by one is tedious, so content is often
//! written (or pasted) into a single *compendium* first, with a `//!<name>` marker line in
//! front of every entry. This crate provides a command-line utility to move content between
//! those two layouts, and a few more one-shot rewrites.
//!
//! ## Split
//!
//! ```console
//! compendium-tools-split 0.1.0
//! Split a compendium into one file per //! marker
//!
//! USAGE:
//!     compendium-tools split <COMPENDIUM> <DESTINATION>
//!
//! ARGS:
//!     <COMPENDIUM>     The compendium to split
//!     <DESTINATION>    The folder the segment files are written to
//! ```
//!
//! ### Example
//!
//! ```console
//! > cat items/magic.kdl
//! // Magic items
//! //!potionOfHealing
//! item name="Potion of Healing" { ... }
//! //!rings/ringOfProtection
//! item name="Ring of Protection" { ... }
//!
//! > compendium-tools split items/magic.kdl items/magic/
//! potionOfHealing => items/magic/potionOfHealing.kdl
//! rings/ringOfProtection => items/magic/rings/ringOfProtection.kdl
//! Left 15 bytes in items/magic.kdl
//! ```
//!
//! ## Join
//!
//! ```console
//! compendium-tools-join 0.1.0
//! Join a folder of segment files into a compendium
//!
//! USAGE:
//!     compendium-tools join [OPTIONS] <COMPENDIUM> <SOURCE>
//!
//! OPTIONS:
//!     -r, --remove    Remove the segment files once they're joined
//! ```
//!
//! ## Rename
//!
//! Rewrites every marker to a camelCase token: `//!Ring of Protection +1` becomes
//! `//!ringOfProtection`.
//!
//! ```console
//! > compendium-tools rename items/magic.kdl
//! Wrote items/magic.kdl
//! ```
//!
//! ## Variants
//!
//! Expands `<ROOT>/<TEMPLATE>/_base.kdl_template` into a `.kdl` per entry in
//! `<ROOT>/<TEMPLATE>/_variants.json`, replacing every `{key}` placeholder.
//!
//! ```console
//! > compendium-tools variants items weapons
//! longsword => items/weapons/longsword.kdl
//! shortsword => items/weapons/shortsword.kdl
//! ```
//!
//! ## Tags
//!
//! Adds a `tag "<class>"` line to every spell in a folder, based on a list of spells per class.
//!
//! ```console
//! > compendium-tools tags class-spells.txt spells/
//! Fire Bolt => spells/fireBolt.kdl
//! Shield => spells/shield.kdl
//! ```

pub mod join;
pub mod rename;
pub mod split;
pub mod tags;
pub mod variants;
pub(crate) mod utils;
