use crate::error::{DatasnapError, Result};
use std::fmt;
use std::str::FromStr;

/// Identifier of a remote dataset in `owner/slug` form, optionally pinned
/// to a version with an `@N` suffix (e.g. `arshkon/linkedin-job-postings@13`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetRef {
    owner: String,
    slug: String,
    version: Option<u32>,
}

impl DatasetRef {
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DatasnapError::invalid_dataset(input, "identifier is empty"));
        }

        let (name, version) = match trimmed.split_once('@') {
            Some((name, version)) => {
                let number = version.parse::<u32>().ok().filter(|v| *v > 0).ok_or_else(|| {
                    DatasnapError::invalid_dataset(
                        input,
                        format!("version '{version}' is not a positive integer"),
                    )
                })?;
                (name, Some(number))
            }
            None => (trimmed, None),
        };

        let parts: Vec<&str> = name.split('/').collect();
        if parts.len() != 2 {
            return Err(DatasnapError::invalid_dataset(
                input,
                "expected the form owner/dataset",
            ));
        }

        for part in &parts {
            validate_segment(input, part)?;
        }

        Ok(Self {
            owner: parts[0].to_string(),
            slug: parts[1].to_string(),
            version,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn version(&self) -> Option<u32> {
        self.version
    }

    /// The `owner/slug` path used in API URLs.
    pub fn path(&self) -> String {
        format!("{}/{}", self.owner, self.slug)
    }
}

fn validate_segment(input: &str, segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(DatasnapError::invalid_dataset(input, "empty path segment"));
    }
    if segment == "." || segment == ".." {
        return Err(DatasnapError::invalid_dataset(
            input,
            "relative path segments are not allowed",
        ));
    }
    if let Some(bad) = segment
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(DatasnapError::invalid_dataset(
            input,
            format!("unexpected character '{bad}'"),
        ));
    }
    Ok(())
}

impl FromStr for DatasetRef {
    type Err = DatasnapError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.slug)?;
        if let Some(version) = self.version {
            write!(f, "@{version}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owner_and_slug() {
        let dataset = DatasetRef::parse("arshkon/linkedin-job-postings").unwrap();
        assert_eq!(dataset.owner(), "arshkon");
        assert_eq!(dataset.slug(), "linkedin-job-postings");
        assert_eq!(dataset.version(), None);
        assert_eq!(dataset.to_string(), "arshkon/linkedin-job-postings");
    }

    #[test]
    fn test_parse_with_version() {
        let dataset: DatasetRef = " arshkon/linkedin-job-postings@13 ".parse().unwrap();
        assert_eq!(dataset.version(), Some(13));
        assert_eq!(dataset.path(), "arshkon/linkedin-job-postings");
        assert_eq!(dataset.to_string(), "arshkon/linkedin-job-postings@13");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in [
            "",
            "   ",
            "no-slash",
            "a/b/c",
            "/slug",
            "owner/",
            "../etc",
            "owner/..",
            "own er/slug",
            "owner/slug@0",
            "owner/slug@latest",
        ] {
            let err = DatasetRef::parse(input).unwrap_err();
            assert!(
                matches!(err, DatasnapError::InvalidDataset { .. }),
                "expected InvalidDataset for {input:?}"
            );
        }
    }
}
