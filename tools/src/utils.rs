use std::path::Path;
use walkdir::{DirEntry, WalkDir};

pub fn iter_files<'a, I>(
    paths: I,
    recursive: bool,
    extensions: &'a [&'static str],
) -> impl Iterator<Item = DirEntry> + 'a
where
    I: IntoIterator + 'a,
    <I as IntoIterator>::Item: AsRef<Path>,
{
    paths
        .into_iter()
        .flat_map(move |path| {
            let mut walk_dir = WalkDir::new(path.as_ref()).sort_by_file_name();
            if !recursive {
                walk_dir = walk_dir.max_depth(1);
            }

            walk_dir.into_iter().filter_entry(|entry| !is_hidden(entry))
        })
        .filter_map(Result::ok)
        .filter(move |entry| {
            entry.file_type().is_file()
                && (extensions.is_empty()
                    || extensions
                        .iter()
                        .any(|extension| has_extension(entry.path(), extension)))
        })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

pub fn has_extension(path: &Path, extension: &str) -> bool {
    match path.extension() {
        Some(ext) => ext == extension,
        None => false,
    }
}

/// The segment name of a file, relative to the folder it was split into
///
/// Components are joined with `/`, regardless of platform, and the extension is dropped.
pub fn segment_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    let components = relative
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;

    Some(components.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_names() {
        let root = Path::new("items");

        assert_eq!(
            segment_name(root, &root.join("armor").join("light.kdl")),
            Some("armor/light".to_owned())
        );
        assert_eq!(
            segment_name(root, &root.join("potion.of.healing.kdl")),
            Some("potion.of.healing".to_owned())
        );
        assert_eq!(segment_name(root, Path::new("elsewhere/a.kdl")), None);
    }

    #[test]
    fn extensions() {
        assert!(has_extension(Path::new("a/b.kdl"), "kdl"));
        assert!(!has_extension(Path::new("a/b.kdl_template"), "kdl"));
        assert!(!has_extension(Path::new("a/kdl"), "kdl"));
    }
}
