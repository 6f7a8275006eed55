//! Injecting class tags into spell entries
//!
//! A tag list groups spell names by the class that can cast them:
//!
//! ```text
//! # Wizard
//! 	Fire Bolt
//! 	Shield
//! # Sorcerer
//! 	Fire Bolt
//! ```
//!
//! Every spell entry whose name appears in the list receives a `tag "<class>"` line for
//! each of its classes, right before its `rank` node.

use regex::Regex;
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::LazyLock,
};
use thiserror::Error;
use tracing::debug;

/// Matches the declared name at the very start of a spell entry
static SPELL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\Aspell name="(.*)""#).expect("valid regex"));

/// The tags are inserted right in front of this anchor
const ANCHOR: &str = "\n\trank";

/// Class tags, looked up by spell name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList {
    tags: HashMap<String, Vec<String>>,
}

impl TagList {
    /// Parse a tag list
    ///
    /// Lines starting with `# ` open a class, lines starting with a tab name a spell of the
    /// last opened class. Spells listed before any class and all other lines are ignored.
    pub fn parse(text: &str) -> Self {
        let mut list = Self::default();
        let mut class = None;

        for line in text.lines() {
            if let Some(name) = line.strip_prefix("# ") {
                class = Some(name.trim().to_owned());
            } else if line.starts_with('\t') {
                if let Some(class) = &class {
                    list.tags
                        .entry(line.trim().to_owned())
                        .or_default()
                        .push(class.clone());
                }
            }
        }

        list
    }

    /// Read and parse a tag list from disk
    pub fn from_path<P>(path: P) -> Result<Self, io::Error>
    where
        P: AsRef<Path>,
    {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    /// The classes of a spell, in list order
    pub fn tags(&self, spell: &str) -> Option<&[String]> {
        self.tags.get(spell).map(Vec::as_slice)
    }

    /// The number of spells with at least one tag
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Is the list devoid of any spells?
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Insert the tags for a spell entry
    ///
    /// Returns `None` if the entry doesn't start with a declared spell name, the name has
    /// no tags, or the entry has no `rank` node to anchor the tags to.
    pub fn inject(&self, entry: &str) -> Option<String> {
        let name = declared_name(entry)?;
        let tags = self.tags(name)?;

        let index = entry.find(ANCHOR)?;
        let lines = tags
            .iter()
            .map(|tag| format!("\ttag \"{tag}\""))
            .collect::<Vec<_>>()
            .join("\n");

        let mut tagged = String::with_capacity(entry.len() + lines.len() + 1);
        tagged.push_str(&entry[..index]);
        tagged.push('\n');
        tagged.push_str(&lines);
        tagged.push_str(&entry[index..]);

        Some(tagged)
    }

    /// Insert the tags into a spell file on disk
    ///
    /// The file is only written when tags were actually inserted, in which case the name
    /// of the tagged spell is returned.
    pub fn inject_path<P>(&self, path: P) -> Result<Option<String>, InjectError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        let entry = fs::read_to_string(path).map_err(|source| InjectError::Read {
            path: path.to_owned(),
            source,
        })?;

        match self.inject(&entry) {
            Some(tagged) => {
                fs::write(path, tagged).map_err(|source| InjectError::Write {
                    path: path.to_owned(),
                    source,
                })?;

                debug!(path = %path.display(), "injected tags");
                Ok(declared_name(&entry).map(str::to_owned))
            }
            None => Ok(None),
        }
    }
}

/// The name a spell entry declares on its first line, if any
pub fn declared_name(entry: &str) -> Option<&str> {
    SPELL_NAME
        .captures(entry)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str())
}

/// Errors that might be returned from [`TagList::inject_path()`]
#[derive(Debug, Error)]
pub enum InjectError {
    /// Could not read the spell file
    #[error("Could not read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Could not write the tagged spell file back
    #[error("Could not write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = "\tOrphan\n# Wizard\n\tFire Bolt\n\tShield  \n# Sorcerer \n\tFire Bolt\nnot a spell\n";
    const FIRE_BOLT: &str =
        "spell name=\"Fire Bolt\" {\n\tsource \"PHB\"\n\trank 0\n\tschool \"Evocation\"\n}\n";

    #[test]
    fn parse_list() {
        let list = TagList::parse(LIST);

        assert_eq!(list.len(), 2);
        assert_eq!(
            list.tags("Fire Bolt"),
            Some(["Wizard".to_owned(), "Sorcerer".to_owned()].as_slice())
        );
        assert_eq!(list.tags("Shield"), Some(["Wizard".to_owned()].as_slice()));
        assert_eq!(list.tags("Orphan"), None);
        assert_eq!(list.tags("not a spell"), None);
    }

    #[test]
    fn declared_names() {
        assert_eq!(declared_name(FIRE_BOLT), Some("Fire Bolt"));
        assert_eq!(declared_name("spell name=\"A \"B\"\" {\n\"x\""), Some("A \"B\""));
        assert_eq!(declared_name("\nspell name=\"Late\""), None);
        assert_eq!(declared_name("item name=\"Rope\""), None);
    }

    #[test]
    fn inject_before_rank() {
        let list = TagList::parse(LIST);

        assert_eq!(
            list.inject(FIRE_BOLT).as_deref(),
            Some(
                "spell name=\"Fire Bolt\" {\n\tsource \"PHB\"\n\ttag \"Wizard\"\n\ttag \"Sorcerer\"\n\trank 0\n\tschool \"Evocation\"\n}\n"
            )
        );
    }

    #[test]
    fn inject_only_first_anchor() {
        let list = TagList::parse(LIST);
        let entry = "spell name=\"Shield\" {\n\trank 1\n\trank 2\n}";

        assert_eq!(
            list.inject(entry).as_deref(),
            Some("spell name=\"Shield\" {\n\ttag \"Wizard\"\n\trank 1\n\trank 2\n}")
        );
    }

    #[test]
    fn no_match() {
        let list = TagList::parse(LIST);

        assert_eq!(list.inject("spell name=\"Unknown\" {\n\trank 1\n}"), None);
        assert_eq!(list.inject("spell name=\"Shield\" {\n}"), None);
        assert_eq!(list.inject("// Shield\n\trank 1"), None);
    }

    #[test]
    fn inject_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("fire_bolt.kdl");
        fs::write(&path, FIRE_BOLT)?;

        let list = TagList::parse(LIST);
        assert_eq!(list.inject_path(&path)?.as_deref(), Some("Fire Bolt"));
        assert!(fs::read_to_string(&path)?.contains("\ttag \"Sorcerer\"\n\trank 0"));

        let untouched = dir.path().join("rope.kdl");
        fs::write(&untouched, "item name=\"Rope\"\n\trank 1\n")?;
        assert_eq!(list.inject_path(&untouched)?, None);

        Ok(())
    }
}
