//! Splitting compendium files into segment files, and joining them back together

use crate::marker::{self, PREFIX};
use std::{
    collections::BTreeMap,
    fs::{self, create_dir_all},
    io,
    path::{Component, Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info};

/// The extension appended to every destination name
pub const EXTENSION: &str = "kdl";

/// A compendium file, broken down into its remainder and named segments
///
/// A compendium is a single file that aggregates many KDL entries, where every entry
/// (or group of entries) is preceded by a `//!<name>` marker line. Everything up to the
/// next marker line belongs to that name. Text before the first marker belongs to no
/// segment and is called the remainder.
///
/// ```
/// # use compendium::split::Compendium;
/// let compendium = Compendium::parse("intro text\n//!alpha\nline A1\nline A2\n//!beta\nline B1\n")?;
///
/// assert_eq!(compendium.remainder(), "intro text\n");
/// assert_eq!(compendium.segment("alpha"), Some("line A1\nline A2\n"));
/// assert_eq!(compendium.segment("beta"), Some("line B1\n"));
/// # Ok::<(), compendium::split::ParseError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compendium {
    remainder: String,
    segments: BTreeMap<String, String>,
}

/// Where the parser is, relative to the marker lines it has seen
enum State {
    BeforeFirstMarker,
    InSegment { name: String, body: String },
}

impl Compendium {
    /// Break compendium text down into a remainder and its segments
    ///
    /// When two markers share a name, only the segment following the last one is kept.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut compendium = Self::default();
        let mut state = State::BeforeFirstMarker;

        for (index, line) in marker::lines(text).enumerate() {
            if let Some(name) = marker::name(line) {
                if name.is_empty() {
                    return Err(ParseError::EmptyName { line: index + 1 });
                }

                if escapes_destination(name) {
                    return Err(ParseError::OutsideDestination {
                        line: index + 1,
                        name: name.to_owned(),
                    });
                }

                let previous = std::mem::replace(
                    &mut state,
                    State::InSegment {
                        name: name.to_owned(),
                        body: String::new(),
                    },
                );
                compendium.commit(previous);
            } else if let State::InSegment { body, .. } = &mut state {
                body.push_str(line);
            } else {
                compendium.remainder.push_str(line);
            }
        }

        compendium.commit(state);

        Ok(compendium)
    }

    /// Read and parse a compendium file from disk
    pub fn from_path<P>(path: P) -> Result<Self, FromPathError>
    where
        P: AsRef<Path>,
    {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text)?)
    }

    fn commit(&mut self, state: State) {
        if let State::InSegment { name, body } = state {
            if self.segments.insert(name.clone(), body).is_some() {
                debug!(name = name.as_str(), "segment replaced by a later marker");
            }
        }
    }

    /// The text preceding the first marker line
    pub fn remainder(&self) -> &str {
        &self.remainder
    }

    /// The text of a single segment
    pub fn segment(&self, name: &str) -> Option<&str> {
        self.segments.get(name).map(String::as_str)
    }

    /// Iterate over all segments (name and text), ordered by name
    pub fn segments(&self) -> impl Iterator<Item = (&str, &str)> {
        self.segments
            .iter()
            .map(|(name, body)| (name.as_str(), body.as_str()))
    }

    /// The number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Does the compendium contain no segments at all?
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Add a segment, replacing (and returning) any previous segment of the same name
    pub fn insert_segment(&mut self, name: String, body: String) -> Option<String> {
        self.segments.insert(name, body)
    }

    /// The path a segment is written to, relative to a destination folder
    ///
    /// The extension is appended to the name, so dots and path separators in the name
    /// are kept as is.
    pub fn segment_path(destination: &Path, name: &str) -> PathBuf {
        destination.join(format!("{name}.{EXTENSION}"))
    }

    /// Write every segment to its own file in a destination folder
    ///
    /// Intermediate folders are created as needed and existing files are overwritten.
    /// Returns the name and written path of every segment, in segment order.
    pub fn write_segments<P>(
        &self,
        destination: P,
    ) -> Result<Vec<(String, PathBuf)>, SplitError>
    where
        P: AsRef<Path>,
    {
        let destination = destination.as_ref();
        let mut written = Vec::with_capacity(self.segments.len());

        for (name, body) in &self.segments {
            let path = Self::segment_path(destination, name);

            let result = match path.parent() {
                Some(parent) => create_dir_all(parent).and_then(|_| fs::write(&path, body)),
                None => fs::write(&path, body),
            };
            if let Err(source) = result {
                return Err(SplitError::WriteSegment { path, source });
            }

            debug!(%name, path = %path.display(), "wrote segment");
            written.push((name.clone(), path));
        }

        Ok(written)
    }

    /// Overwrite a file with only the remainder
    pub fn write_remainder<P>(&self, path: P) -> Result<(), SplitError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        fs::write(path, &self.remainder).map_err(|source| SplitError::WriteRemainder {
            path: path.to_owned(),
            source,
        })
    }

    /// Render the compendium back to text
    ///
    /// The remainder comes first, followed by every segment behind its own marker line.
    /// If the text preceding a marker doesn't end in a newline, one is inserted.
    ///
    /// Parsing the result reproduces this compendium, which is why segments whose name
    /// wouldn't survive a marker line, or whose text contains marker lines of its own,
    /// are rejected.
    pub fn join(&self) -> Result<String, JoinError> {
        let mut text = self.remainder.clone();

        for (name, body) in &self.segments {
            if name.is_empty()
                || name.trim() != name.as_str()
                || name.contains('\n')
                || escapes_destination(name)
            {
                return Err(JoinError::InvalidName { name: name.clone() });
            }

            let nested = marker::lines(body).position(|line| marker::name(line).is_some());
            if let Some(index) = nested {
                return Err(JoinError::MarkerInBody {
                    name: name.clone(),
                    line: index + 1,
                });
            }

            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }

            text.push_str(PREFIX);
            text.push_str(name);
            text.push('\n');
            text.push_str(body);
        }

        Ok(text)
    }
}

/// Would a segment with this name end up outside of its destination folder?
fn escapes_destination(name: &str) -> bool {
    Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::RootDir | Component::Prefix(_) | Component::ParentDir
        )
    })
}

/// Split a compendium file into its segment files
///
/// All segment files are written to the destination folder first. Only once every one of
/// them has been written, the compendium itself is overwritten with its remainder.
pub fn split_path<P, Q>(compendium: P, destination: Q) -> Result<Split, SplitError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let compendium_path = compendium.as_ref();
    let destination = destination.as_ref();

    let compendium = Compendium::from_path(compendium_path)?;

    let segments = compendium.write_segments(destination)?;
    compendium.write_remainder(compendium_path)?;

    info!(
        compendium = %compendium_path.display(),
        segments = segments.len(),
        "split compendium"
    );

    Ok(Split {
        segments,
        remainder: compendium.remainder.len(),
    })
}

/// The outcome of a successful [`split_path()`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    /// The name and path of every segment file that was written, ordered by name
    pub segments: Vec<(String, PathBuf)>,

    /// The length (in bytes) of the remainder left in the compendium
    pub remainder: usize,
}

/// Errors that might be returned from [`Compendium::parse()`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A marker line without a name would result in a nameless file
    #[error("The marker on line {line} has no name")]
    EmptyName { line: usize },

    /// Absolute names, or names climbing up with `..`, would be written outside of the
    /// destination folder
    #[error("The marker {name:?} on line {line} points outside of the destination folder")]
    OutsideDestination { line: usize, name: String },
}

/// Errors that might be returned from [`Compendium::from_path()`]
#[derive(Debug, Error)]
pub enum FromPathError {
    /// Could not read the compendium
    #[error("Could not read the compendium")]
    Read(#[from] io::Error),

    /// The compendium text was rejected
    #[error("Parsing the compendium failed")]
    Parse(#[from] ParseError),
}

/// Errors that might be returned from [`Compendium::join()`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinError {
    /// The name can't be written to a marker line and read back unchanged
    #[error("{name:?} can not be used as a marker name")]
    InvalidName { name: String },

    /// The segment text would be split up when read back
    #[error("Segment {name:?} contains a marker line on line {line}")]
    MarkerInBody { name: String, line: usize },
}

/// Errors that might be returned from [`split_path()`]
#[derive(Debug, Error)]
pub enum SplitError {
    /// Loading the compendium failed
    #[error("Loading the compendium failed")]
    Load(#[from] FromPathError),

    /// Writing one of the segment files failed
    #[error("Could not write segment file {}", path.display())]
    WriteSegment {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Overwriting the compendium with its remainder failed
    #[error("Could not write the remainder back to {}", path.display())]
    WriteRemainder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
