//! UCSC-style chain names.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// The pattern for a chain name such as `hg19ToHg38`.
static REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-z0-9_]+)To([A-Z][a-z0-9_]*)$").unwrap());

/// The suffix for a gzipped chain file.
pub const GZIP_FILE_SUFFIX: &str = ".over.chain.gz";

/// The suffix for a plain text chain file.
pub const PLAIN_FILE_SUFFIX: &str = ".over.chain";

/// An error related to parsing a [`ChainName`].
#[derive(Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The name does not look like `<from>To<To>`.
    Invalid(String),

    /// Both genomes in the pair are the same.
    IdenticalGenomes(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Invalid(value) => write!(
                f,
                "invalid chain name `{value}`: expected a name such as `hg19ToHg38`"
            ),
            ParseError::IdenticalGenomes(genome) => {
                write!(f, "cannot lift over from `{genome}` to itself")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// The name of a chain file that lifts over from one genome build to another.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChainName {
    /// The genome we're converting from.
    ///
    /// This genome name will always be lowercase as per UCSC conventions.
    from: String,

    /// The genome we're converting to.
    ///
    /// This genome name will always be sentence case as per UCSC conventions.
    to: String,
}

impl ChainName {
    /// Attempts to create a [`ChainName`] from a pair of genome builds.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlift::source::ChainName;
    ///
    /// let name = ChainName::try_from_pair("hg19", "hg38")?;
    /// assert_eq!(name.to_string(), "hg19ToHg38");
    ///
    /// let err = ChainName::try_from_pair("hg38", "Hg38").unwrap_err();
    /// assert_eq!(err.to_string(), "cannot lift over from `hg38` to itself");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_from_pair(from: &str, to: &str) -> Result<Self, ParseError> {
        if from.eq_ignore_ascii_case(to) {
            return Err(ParseError::IdenticalGenomes(from.to_string()));
        }

        let mut chars = to.chars();
        let to = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };

        format!("{from}To{to}").parse()
    }

    /// Gets the "from" genome name.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Gets the "to" genome name.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Gets the file names a chain file with this name might go by, in the
    /// order they should be tried.
    pub fn file_names(&self) -> [String; 2] {
        [
            format!("{self}{GZIP_FILE_SUFFIX}"),
            format!("{self}{PLAIN_FILE_SUFFIX}"),
        ]
    }
}

impl FromStr for ChainName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let groups = REGEX
            .captures(s)
            .ok_or_else(|| ParseError::Invalid(s.to_string()))?;

        let from = groups[1].to_string();
        let to = groups[2].to_string();

        if from.eq_ignore_ascii_case(&to) {
            return Err(ParseError::IdenticalGenomes(from));
        }

        Ok(Self { from, to })
    }
}

impl std::fmt::Display for ChainName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}To{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid() -> Result<(), Box<dyn std::error::Error>> {
        let name = "hg19ToHg38".parse::<ChainName>()?;

        assert_eq!(name.from(), "hg19");
        assert_eq!(name.to(), "Hg38");
        assert_eq!(name.to_string(), "hg19ToHg38");
        assert_eq!(
            name.file_names(),
            [
                String::from("hg19ToHg38.over.chain.gz"),
                String::from("hg19ToHg38.over.chain")
            ]
        );

        Ok(())
    }

    #[test]
    fn invalid() {
        assert!("hg19Tohg38".parse::<ChainName>().is_err());
        assert!("hg19To".parse::<ChainName>().is_err());
        assert!("hg19".parse::<ChainName>().is_err());
        assert!("xhg19ToHg38.over.chain".parse::<ChainName>().is_err());

        let err = "hg19".parse::<ChainName>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid chain name `hg19`: expected a name such as `hg19ToHg38`"
        );
    }

    #[test]
    fn identical_genomes() {
        assert_eq!(
            "hg38ToHg38".parse::<ChainName>(),
            Err(ParseError::IdenticalGenomes(String::from("hg38")))
        );
    }

    #[test]
    fn from_pair() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(
            ChainName::try_from_pair("hg38", "hg19")?.to_string(),
            "hg38ToHg19"
        );
        assert!(ChainName::try_from_pair("hg19", "").is_err());
        assert!(ChainName::try_from_pair("hg19", "38").is_err());
        Ok(())
    }
}
