//! Marker lines (`//!<name>`) and their names

use std::{fs, io, path::Path};
use tracing::debug;

/// The literal prefix that turns a line into a marker line
pub const PREFIX: &str = "//!";

/// Extract the destination name from a marker line
///
/// Returns `None` if the line isn't a marker line. The name is everything following
/// [`PREFIX`], trimmed of surrounding whitespace (including the line terminator).
pub fn name(line: &str) -> Option<&str> {
    line.strip_prefix(PREFIX).map(str::trim)
}

/// Iterate over the lines of a text, keeping each line's terminator
///
/// Unlike [`str::lines`], concatenating the yielded lines reproduces the input exactly.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive('\n')
}

/// Convert a marker name to a single camel-case token
///
/// The name is split on single spaces, and all non-alphabetic characters are dropped
/// from each word. The first word is lowercased, every following word is capitalized.
///
/// ```
/// # use compendium::marker::camel_case;
/// assert_eq!(camel_case("Potion of Giant's Strength"), "potionOfGiantsStrength");
/// ```
pub fn camel_case(name: &str) -> String {
    let mut words = name
        .trim()
        .split(' ')
        .map(|word| word.chars().filter(|c| c.is_alphabetic()).collect::<String>());

    let mut token = words.next().unwrap_or_default().to_lowercase();
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            token.extend(first.to_uppercase());
            token.push_str(&chars.as_str().to_lowercase());
        }
    }

    token
}

/// Rewrite every marker line's name to its [`camel_case`] form
///
/// All other lines are copied verbatim, and marker lines keep their original terminator.
pub fn rename_markers(text: &str) -> String {
    let mut renamed = String::with_capacity(text.len());

    for line in lines(text) {
        match name(line) {
            Some(old) => {
                let new = camel_case(old);
                debug!(old, new = new.as_str(), "renaming marker");

                renamed.push_str(PREFIX);
                renamed.push_str(&new);
                renamed.push_str(terminator(line));
            }
            None => renamed.push_str(line),
        }
    }

    renamed
}

/// Rename the markers of a compendium file on disk, in place
pub fn rename_path<P>(path: P) -> Result<(), io::Error>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    fs::write(path, rename_markers(&text))
}

fn terminator(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_names() {
        assert_eq!(name("//!alpha\n"), Some("alpha"));
        assert_eq!(name("//!  spaced out \t\r\n"), Some("spaced out"));
        assert_eq!(name("//!"), Some(""));
        assert_eq!(name("// alpha"), None);
        assert_eq!(name(" //!alpha"), None);
    }

    #[test]
    fn lines_keep_terminators() {
        let text = "a\r\nb\n\nc";
        let lines: Vec<_> = lines(text).collect();
        assert_eq!(lines, ["a\r\n", "b\n", "\n", "c"]);
        assert_eq!(lines.concat(), text);
    }

    #[test]
    fn camel_casing() {
        assert_eq!(camel_case("Armor"), "armor");
        assert_eq!(camel_case("Wondrous Items"), "wondrousItems");
        assert_eq!(camel_case("  RINGS of POWER "), "ringsOfPower");
        assert_eq!(camel_case("Weapons +1"), "weapons");
        assert_eq!(camel_case("double  space"), "doubleSpace");
        assert_eq!(camel_case(""), "");
    }

    #[test]
    fn renames_only_markers() {
        let text = "intro\n//!Wondrous Items\nitem \"Bag\"\n//!Ring's of Power\r\nring\n//!Last One";
        assert_eq!(
            rename_markers(text),
            "intro\n//!wondrousItems\nitem \"Bag\"\n//!ringsOfPower\r\nring\n//!lastOne"
        );
    }

    #[test]
    fn rename_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("magic.kdl");
        fs::write(&path, "//!Magic Items\nitem\n")?;

        rename_path(&path)?;
        assert_eq!(fs::read_to_string(&path)?, "//!magicItems\nitem\n");

        Ok(())
    }
}
