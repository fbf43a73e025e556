//! Places chain files can be read from.
//!
//! A [`Source`] hands out a buffered reader over chain file content. Content
//! that starts with the gzip magic bytes is decompressed on the fly, so both
//! plain and gzipped (including BGZF) chain files can be read the same way.

use std::fs;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Cursor;
use std::path::Path;
use std::path::PathBuf;

use flate2::bufread::MultiGzDecoder;
use tracing::debug;
use tracing::trace;

pub mod name;

pub use name::ChainName;

/// The magic bytes at the start of every gzip member.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// An error related to a [`Source`].
#[derive(Debug)]
pub enum Error {
    /// The file does not exist.
    NotFound(PathBuf),

    /// No chain file with the given name exists in the directory.
    NotInDirectory(ChainName, PathBuf),

    /// The file exists but cannot be read (a directory, or no permission).
    Unreadable(PathBuf, io::Error),

    /// An I/O error.
    Io(io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NotFound(path) => write!(f, "chain file not found: {}", path.display()),
            Error::NotInDirectory(name, directory) => write!(
                f,
                "no chain file for `{name}` found in {}",
                directory.display()
            ),
            Error::Unreadable(path, err) => {
                write!(f, "chain file could not be read: {}: {err}", path.display())
            }
            Error::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A place chain file content can be read from.
pub trait Source {
    /// Opens the source for reading.
    fn open(&self) -> Result<Box<dyn BufRead>>;
}

/// A chain file on the local filesystem.
#[derive(Clone, Debug)]
pub struct File {
    /// The path to the file.
    path: PathBuf,
}

impl File {
    /// Creates a new [`File`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Gets the path to the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Source for File {
    fn open(&self) -> Result<Box<dyn BufRead>> {
        let unreadable = |err: io::Error| match err.kind() {
            io::ErrorKind::NotFound => Error::NotFound(self.path.clone()),
            _ => Error::Unreadable(self.path.clone(), err),
        };

        let file = fs::File::open(&self.path).map_err(unreadable)?;
        debug!(path = %self.path.display(), "opened chain file");

        // Some failures (such as reading a directory) only surface on the
        // first read.
        decode(BufReader::new(file)).map_err(unreadable)
    }
}

/// Chain file content held in memory.
///
/// # Examples
///
/// ```
/// use std::io::BufRead as _;
///
/// use chainlift::source::Bytes;
/// use chainlift::source::Source as _;
///
/// let source = Bytes::new(&b"chain 0 seq0 4 + 0 4 seq0 4 + 0 4 1\n4\n"[..]);
/// assert_eq!(source.open()?.lines().count(), 2);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Bytes(Vec<u8>);

impl Bytes {
    /// Creates a new [`Bytes`].
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }
}

impl Source for Bytes {
    fn open(&self) -> Result<Box<dyn BufRead>> {
        decode(Cursor::new(self.0.clone())).map_err(Error::Io)
    }
}

/// A chain file looked up by name within a data directory.
///
/// The gzipped file (`<name>.over.chain.gz`) is preferred over the plain text
/// one (`<name>.over.chain`).
#[derive(Clone, Debug)]
pub struct DataDirectory {
    /// The directory.
    directory: PathBuf,

    /// The chain name.
    name: ChainName,
}

impl DataDirectory {
    /// Creates a new [`DataDirectory`].
    pub fn new(directory: impl Into<PathBuf>, name: ChainName) -> Self {
        Self {
            directory: directory.into(),
            name,
        }
    }

    /// Gets the directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Gets the chain name.
    pub fn name(&self) -> &ChainName {
        &self.name
    }

    /// Finds the chain file within the directory, if there is one.
    pub fn locate(&self) -> Option<PathBuf> {
        self.name
            .file_names()
            .into_iter()
            .map(|file_name| self.directory.join(file_name))
            .find(|path| path.is_file())
    }
}

impl Source for DataDirectory {
    fn open(&self) -> Result<Box<dyn BufRead>> {
        let path = self
            .locate()
            .ok_or_else(|| Error::NotInDirectory(self.name.clone(), self.directory.clone()))?;

        File::new(path).open()
    }
}

/// Wraps `reader` in a gzip decoder if its content starts with the gzip magic
/// bytes.
fn decode<R>(mut reader: R) -> io::Result<Box<dyn BufRead>>
where
    R: BufRead + 'static,
{
    let gzipped = reader.fill_buf()?.starts_with(&GZIP_MAGIC);
    trace!(gzipped, "detected chain file encoding");

    match gzipped {
        true => Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader)))),
        false => Ok(Box::new(reader)),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read as _;
    use std::io::Write as _;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempdir::TempDir;

    use super::*;

    const DATA: &[u8] = b"chain 0 seq0 4 + 0 4 seq0 4 + 0 4 1\n4\n";

    fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data)?;
        encoder.finish()
    }

    fn read_all(source: &impl Source) -> std::result::Result<Vec<u8>, Box<dyn std::error::Error>> {
        let mut buffer = Vec::new();
        source.open()?.read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    #[test]
    fn plain_bytes() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert_eq!(read_all(&Bytes::new(DATA))?, DATA);
        Ok(())
    }

    #[test]
    fn gzipped_bytes() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert_eq!(read_all(&Bytes::new(gzip(DATA)?))?, DATA);
        Ok(())
    }

    #[test]
    fn multi_member_gzip() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let (head, tail) = DATA.split_at(10);

        let mut bytes = gzip(head)?;
        bytes.extend(gzip(tail)?);

        assert_eq!(read_all(&Bytes::new(bytes))?, DATA);
        Ok(())
    }

    #[test]
    fn empty_bytes() -> std::result::Result<(), Box<dyn std::error::Error>> {
        assert!(read_all(&Bytes::new(Vec::new()))?.is_empty());
        Ok(())
    }

    #[test]
    fn missing_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("chainlift")?;
        let path = dir.path().join("missing.over.chain");

        let err = File::new(&path).open().err().unwrap();
        assert!(matches!(err, Error::NotFound(ref p) if p == &path));

        Ok(())
    }

    #[test]
    fn directory_is_unreadable() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("chainlift")?;

        let err = File::new(dir.path()).open().err().unwrap();
        assert!(matches!(err, Error::Unreadable(ref p, _) if p == dir.path()));

        Ok(())
    }

    #[test]
    fn data_directory_prefers_gzip() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("chainlift")?;
        let name = "hg19ToHg38".parse::<ChainName>()?;
        let source = DataDirectory::new(dir.path(), name);

        let err = source.open().err().unwrap();
        assert!(matches!(err, Error::NotInDirectory(_, _)));

        fs::write(dir.path().join("hg19ToHg38.over.chain"), b"plain")?;
        assert_eq!(read_all(&source)?, b"plain");

        fs::write(dir.path().join("hg19ToHg38.over.chain.gz"), gzip(b"gzipped")?)?;
        assert_eq!(
            source.locate(),
            Some(dir.path().join("hg19ToHg38.over.chain.gz"))
        );
        assert_eq!(read_all(&source)?, b"gzipped");

        Ok(())
    }
}
