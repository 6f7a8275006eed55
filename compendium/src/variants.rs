//! Expanding a template into variant files

use serde_json::{Map, Value};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, warn};

/// The file name of the template inside a template folder
pub const TEMPLATE_FILE: &str = "_base.kdl_template";

/// The file name of the variant table inside a template folder
pub const VARIANTS_FILE: &str = "_variants.json";

/// A template with `{key}` placeholders, and the table of variants to expand it into
///
/// The table is a JSON object mapping every variant name to the replacements for that
/// variant:
///
/// ```json
/// {
///     "longsword": { "name": "Longsword", "damage": "1d8" },
///     "shortsword": { "name": "Shortsword", "damage": "1d6" }
/// }
/// ```
///
/// Placeholders that have no replacement in a variant are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variants {
    template: String,
    variants: Vec<Variant>,
}

/// A single named set of replacements, in table order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub replacements: Vec<(String, String)>,
}

impl Variant {
    /// Apply the replacements to a template, one key after the other
    pub fn apply(&self, template: &str) -> String {
        self.replacements
            .iter()
            .fold(template.to_owned(), |text, (key, value)| {
                text.replace(&format!("{{{key}}}"), value)
            })
    }
}

impl Variants {
    /// Combine a template with a JSON variant table
    pub fn new(template: String, table: &str) -> Result<Self, TableError> {
        let table: Map<String, Value> = serde_json::from_str(table)?;

        let variants = table
            .into_iter()
            .map(|(name, replacements)| {
                let Value::Object(replacements) = replacements else {
                    return Err(TableError::NotAnObject { variant: name });
                };

                let replacements = replacements
                    .into_iter()
                    .map(|(key, value)| match value {
                        Value::String(value) => Ok((key, value)),
                        _ => Err(TableError::NotAString {
                            variant: name.clone(),
                            key,
                        }),
                    })
                    .collect::<Result<_, _>>()?;

                Ok(Variant { name, replacements })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { template, variants })
    }

    /// Load the template and variant table from a template folder
    pub fn from_dir<P>(dir: P) -> Result<Self, FromDirError>
    where
        P: AsRef<Path>,
    {
        let dir = dir.as_ref();

        let table = fs::read_to_string(dir.join(VARIANTS_FILE)).map_err(FromDirError::Table)?;
        let template =
            fs::read_to_string(dir.join(TEMPLATE_FILE)).map_err(FromDirError::Template)?;

        Ok(Self::new(template, &table)?)
    }

    /// The raw template text
    pub fn template(&self) -> &str {
        &self.template
    }

    /// All variants, in table order
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Expand every variant, yielding its name and text
    pub fn expand(&self) -> impl Iterator<Item = (&str, String)> {
        self.variants
            .iter()
            .map(|variant| (variant.name.as_str(), variant.apply(&self.template)))
    }
}

/// Regenerate all variant files in a template folder
///
/// The template and table are loaded first. Then every `.kdl` file directly inside the
/// folder is removed (stale variants included), after which every variant is written to
/// `<name>.kdl`. Returns the name and written path of every variant, in table order.
pub fn generate<P>(dir: P) -> Result<Vec<(String, PathBuf)>, GenerateError>
where
    P: AsRef<Path>,
{
    let dir = dir.as_ref();
    let variants = Variants::from_dir(dir)?;

    remove_generated(dir).map_err(GenerateError::List)?;

    let mut written = Vec::with_capacity(variants.variants.len());
    for (name, text) in variants.expand() {
        let path = dir.join(format!("{name}.kdl"));
        fs::write(&path, text).map_err(|source| GenerateError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(variant = name, path = %path.display(), "wrote variant");
        written.push((name.to_owned(), path));
    }

    Ok(written)
}

fn remove_generated(dir: &Path) -> Result<(), io::Error> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "kdl") {
            // Leftovers that can't be removed are simply overwritten or kept around
            if let Err(err) = fs::remove_file(&path) {
                warn!(path = %path.display(), %err, "could not remove old variant");
            }
        }
    }

    Ok(())
}

/// Errors that might be returned from [`Variants::new()`]
#[derive(Debug, Error)]
pub enum TableError {
    /// The table isn't valid JSON, or not a JSON object
    #[error("The variant table is not a valid JSON object")]
    Json(#[from] serde_json::Error),

    /// A variant's replacements should be an object of key-value pairs
    #[error("The replacements for variant {variant:?} are not an object")]
    NotAnObject { variant: String },

    /// Replacement values should be strings
    #[error("The replacement for {{{key}}} in variant {variant:?} is not a string")]
    NotAString { variant: String, key: String },
}

/// Errors that might be returned from [`Variants::from_dir()`]
#[derive(Debug, Error)]
pub enum FromDirError {
    /// Could not read the template file
    #[error("Could not read the template file")]
    Template(#[source] io::Error),

    /// Could not read the variant table
    #[error("Could not read the variant table")]
    Table(#[source] io::Error),

    /// The variant table was rejected
    #[error("Parsing the variant table failed")]
    Parse(#[from] TableError),
}

/// Errors that might be returned from [`generate()`]
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Loading the template folder failed
    #[error("Loading the template folder failed")]
    Load(#[from] FromDirError),

    /// Could not list the template folder to remove old variants
    #[error("Could not list the template folder")]
    List(#[source] io::Error),

    /// Writing a variant file failed
    #[error("Could not write variant {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "item name=\"{name}\" {\n\tdamage \"{damage}\"\n\trarity \"{rarity}\"\n}\n";
    const TABLE: &str = r#"{
        "shortsword": { "name": "Shortsword", "damage": "1d6" },
        "longsword": { "name": "Longsword", "damage": "1d8", "rarity": "common" }
    }"#;

    #[test]
    fn table_order_is_kept() {
        let variants = Variants::new(TEMPLATE.to_owned(), TABLE).unwrap();

        let names: Vec<_> = variants.variants().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["shortsword", "longsword"]);
        assert_eq!(
            variants.variants()[0].replacements,
            [
                ("name".to_owned(), "Shortsword".to_owned()),
                ("damage".to_owned(), "1d6".to_owned())
            ]
        );
    }

    #[test]
    fn missing_keys_stay_verbatim() {
        let variants = Variants::new(TEMPLATE.to_owned(), TABLE).unwrap();
        let expanded: Vec<_> = variants.expand().collect();

        assert_eq!(expanded[0].0, "shortsword");
        assert_eq!(
            expanded[0].1,
            "item name=\"Shortsword\" {\n\tdamage \"1d6\"\n\trarity \"{rarity}\"\n}\n"
        );
        assert_eq!(
            expanded[1].1,
            "item name=\"Longsword\" {\n\tdamage \"1d8\"\n\trarity \"common\"\n}\n"
        );
    }

    #[test]
    fn replacements_apply_in_order() {
        let variant = Variant {
            name: "chained".to_owned(),
            replacements: vec![
                ("a".to_owned(), "{b}".to_owned()),
                ("b".to_owned(), "done".to_owned()),
            ],
        };
        assert_eq!(variant.apply("{a} {b} {c}"), "done done {c}");
    }

    #[test]
    fn invalid_tables() {
        assert!(matches!(
            Variants::new(String::new(), "[]"),
            Err(TableError::Json(_))
        ));
        assert!(matches!(
            Variants::new(String::new(), r#"{"a": "b"}"#),
            Err(TableError::NotAnObject { variant }) if variant == "a"
        ));
        assert!(matches!(
            Variants::new(String::new(), r#"{"a": {"b": 1}}"#),
            Err(TableError::NotAString { variant, key }) if variant == "a" && key == "b"
        ));
    }

    #[test]
    fn generate_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(TEMPLATE_FILE), TEMPLATE)?;
        fs::write(dir.path().join(VARIANTS_FILE), TABLE)?;
        fs::write(dir.path().join("stale.kdl"), "old")?;
        fs::write(dir.path().join("notes.txt"), "keep me")?;

        let written = generate(dir.path())?;

        assert_eq!(
            written,
            [
                ("shortsword".to_owned(), dir.path().join("shortsword.kdl")),
                ("longsword".to_owned(), dir.path().join("longsword.kdl"))
            ]
        );
        assert!(!dir.path().join("stale.kdl").exists());
        assert!(dir.path().join("notes.txt").exists());
        assert!(fs::read_to_string(dir.path().join("longsword.kdl"))?.contains("\"1d8\""));

        Ok(())
    }

    #[test]
    fn generate_without_template_keeps_old_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(VARIANTS_FILE), TABLE)?;
        fs::write(dir.path().join("stale.kdl"), "old")?;

        assert!(matches!(
            generate(dir.path()),
            Err(GenerateError::Load(FromDirError::Template(_)))
        ));
        assert!(dir.path().join("stale.kdl").exists());

        Ok(())
    }
}
