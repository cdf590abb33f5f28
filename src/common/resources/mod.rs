//! # Resource definitions for model weights, vocabularies and configuration files
//!
//! The artifacts consumed at startup are accessed through resources:
//! - model weights
//! - model configuration
//! - tokenizer vocabulary
//! - background image of the front-end
//!
//! Two types of resources are pre-defined:
//! - LocalResource: points to a local file
//! - RemoteResource: points to a remote file via a URL (requires the `remote` feature)
//!
//! For both types of resources, the local location of the file can be retrieved using
//! `get_local_path`, allowing to reference the resource file location regardless if it is a remote
//! or local resource.

mod local;

use crate::common::error::SentimentError;
pub use local::LocalResource;
use std::path::PathBuf;

/// # Resource Trait that can provide the location of the model, configuration or vocabulary resources
pub trait ResourceProvider: Send + Sync {
    /// Provides the local path for a resource.
    ///
    /// # Returns
    ///
    /// * `PathBuf` pointing to the resource file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use imdb_sentiment::resources::{LocalResource, ResourceProvider};
    /// use std::path::PathBuf;
    /// let config_resource = LocalResource {
    ///     local_path: PathBuf::from("path/to/config.json"),
    /// };
    /// let config_path = config_resource.get_local_path();
    /// ```
    fn get_local_path(&self) -> Result<PathBuf, SentimentError>;
}

/// Builds a resource from a location string as found in configuration files.
///
/// `http://` and `https://` locations are remote resources cached under the `subdir` of the cache
/// root, anything else is a local path.
///
/// # Example
///
/// ```no_run
/// use imdb_sentiment::resources::resource_from_location;
/// # fn main() -> Result<(), imdb_sentiment::SentimentError> {
/// let vocabulary_resource = resource_from_location("resources/tokenizer.json", "imdb-gru")?;
/// # Ok(())
/// # }
/// ```
pub fn resource_from_location(
    location: &str,
    subdir: &str,
) -> Result<Box<dyn ResourceProvider>, SentimentError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        remote_resource(location, subdir)
    } else {
        Ok(Box::new(LocalResource::from(PathBuf::from(location))))
    }
}

#[cfg(feature = "remote")]
fn remote_resource(
    location: &str,
    subdir: &str,
) -> Result<Box<dyn ResourceProvider>, SentimentError> {
    Ok(Box::new(RemoteResource::new(location, subdir)))
}

#[cfg(not(feature = "remote"))]
fn remote_resource(
    location: &str,
    _subdir: &str,
) -> Result<Box<dyn ResourceProvider>, SentimentError> {
    Err(SentimentError::InvalidConfigurationError(format!(
        "{} is a remote location but the `remote` feature is disabled",
        location
    )))
}

#[cfg(feature = "remote")]
mod remote;
#[cfg(feature = "remote")]
pub use remote::RemoteResource;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn local_location_resolves_to_itself() {
        let resource = resource_from_location("some/dir/vocab.json", "imdb-gru").unwrap();
        assert_eq!(
            resource.get_local_path().unwrap(),
            PathBuf::from("some/dir/vocab.json")
        );
    }
}
