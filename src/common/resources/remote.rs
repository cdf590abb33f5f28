use super::*;
use crate::common::error::SentimentError;
use cached_path::{Cache, Options, ProgressBar};
use dirs::cache_dir;
use lazy_static::lazy_static;
use std::path::PathBuf;

/// # Remote resource that will be downloaded and cached locally on demand
#[derive(PartialEq, Clone, Debug)]
pub struct RemoteResource {
    /// Remote path/url for the resource
    pub url: String,
    /// Local subdirectory of the cache root where this resource is saved
    pub cache_subdir: String,
}

impl RemoteResource {
    /// Creates a new RemoteResource from an URL and a custom local subdirectory. Note that this
    /// does not download the resource (only declares the remote and local locations)
    ///
    /// # Arguments
    ///
    /// * `url` - `&str` Location of the remote resource
    /// * `cache_subdir` - `&str` Local subdirectory of the cache root to save the resource to
    ///
    /// # Example
    ///
    /// ```no_run
    /// use imdb_sentiment::resources::RemoteResource;
    /// let weights_resource = RemoteResource::new("http://weights_location/model.ot", "imdb-gru");
    /// ```
    pub fn new(url: &str, cache_subdir: &str) -> RemoteResource {
        RemoteResource {
            url: url.to_string(),
            cache_subdir: cache_subdir.to_string(),
        }
    }
}

impl ResourceProvider for RemoteResource {
    /// Gets the local path for a remote resource.
    ///
    /// The remote resource is downloaded and cached on first access. The path to the local
    /// copy is returned.
    fn get_local_path(&self) -> Result<PathBuf, SentimentError> {
        let cache = Cache::builder()
            .dir(CACHE_DIRECTORY.to_path_buf())
            .progress_bar(Some(ProgressBar::Light))
            .build()?;
        let cached_path =
            cache.cached_path_with_options(&self.url, &Options::default().subdir(&self.cache_subdir))?;
        Ok(cached_path)
    }
}

lazy_static! {
/// # Global cache directory
/// If the environment variable `IMDB_SENTIMENT_CACHE` is set, downloaded artifacts are saved at
/// that location. Otherwise defaults to `$XDG_CACHE_HOME/.imdb-sentiment`, or the corresponding
/// user cache for the current system.
    pub static ref CACHE_DIRECTORY: PathBuf = _get_cache_directory();
}

fn _get_cache_directory() -> PathBuf {
    match std::env::var("IMDB_SENTIMENT_CACHE") {
        Ok(value) => PathBuf::from(value),
        Err(_) => {
            let mut home = cache_dir().unwrap_or_else(|| PathBuf::from("."));
            home.push(".imdb-sentiment");
            home
        }
    }
}
