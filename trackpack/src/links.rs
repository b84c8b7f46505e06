//! Conversions between track identifiers and platform links.
//!
//! The asset pipeline resolves a track into platform URLs and trims them
//! down to identifiers, keeping Amazon and Apple identifiers as combined
//! `album:track` strings. The scanner goes the other way and turns decoded
//! identifiers back into URLs to open.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::payload::TrackIds;

/// Separator between the album and track parts of a combined identifier.
pub const COMBINED_ID_SEPARATOR: char = ':';

/// Errors from building platform links.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A link could not be assembled from its base and identifier.
    #[error("could not build link: {0}")]
    Url(#[from] url::ParseError),
    /// The Apple storefront is not a two-letter country code.
    #[error("invalid Apple Music storefront {0:?}: expected a two-letter country code")]
    InvalidStorefront(String),
    /// A link base cannot be used for web links.
    #[error("invalid {name} link base {url}: expected an http(s) URL with a host")]
    InvalidBase {
        /// Name of the configuration entry.
        name: &'static str,
        /// The rejected base.
        url: String,
    },
}

impl TrackIds {
    /// Builds identifiers from the pipeline's per-platform strings, where
    /// `amazon` and `apple` are combined `album:track` identifiers.
    ///
    /// A combined identifier without a separator is taken as the album
    /// alone.
    pub fn from_combined(
        explicit: bool,
        amazon: &str,
        apple: &str,
        spotify: &str,
        youtube: &str,
    ) -> Self {
        let (amazon_album, amazon_track) = split_combined(amazon);
        let (apple_album, apple_track) = split_combined(apple);

        TrackIds {
            explicit,
            amazon_album: amazon_album.to_string(),
            amazon_track: amazon_track.to_string(),
            apple_album: apple_album.to_string(),
            apple_track: apple_track.to_string(),
            spotify: spotify.to_string(),
            youtube: youtube.to_string(),
        }
    }
}

fn split_combined(id: &str) -> (&str, &str) {
    id.split_once(COMBINED_ID_SEPARATOR).unwrap_or((id, ""))
}

/// Where platform links point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Apple Music storefront (country code) used in links.
    pub apple_storefront: String,
    /// Base of Spotify track links.
    pub spotify_base: String,
    /// Base of YouTube Music watch links.
    pub youtube_base: String,
    /// Base of Apple Music links.
    pub apple_base: String,
    /// Base of Amazon Music links.
    pub amazon_base: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            apple_storefront: "us".to_string(),
            spotify_base: "https://open.spotify.com/track/".to_string(),
            youtube_base: "https://music.youtube.com/watch".to_string(),
            apple_base: "https://geo.music.apple.com/".to_string(),
            amazon_base: "https://music.amazon.com/".to_string(),
        }
    }
}

impl LinkConfig {
    /// Checks that the storefront is a country code and every base is a
    /// web URL.
    pub fn validate(&self) -> Result<(), Error> {
        let storefront = &self.apple_storefront;
        if storefront.len() != 2 || !storefront.bytes().all(|byte| byte.is_ascii_alphabetic()) {
            return Err(Error::InvalidStorefront(storefront.clone()));
        }

        let bases = [
            ("spotify_base", &self.spotify_base),
            ("youtube_base", &self.youtube_base),
            ("apple_base", &self.apple_base),
            ("amazon_base", &self.amazon_base),
        ];
        for (name, base) in bases {
            let url = Url::parse(base)?;
            if !["http", "https"].contains(&url.scheme()) || url.host_str().is_none() {
                return Err(Error::InvalidBase { name, url: base.clone() });
            }
        }

        Ok(())
    }
}

/// Outbound links for a decoded track. A platform without identifiers has
/// no link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformLinks {
    /// Spotify track page.
    pub spotify: Option<Url>,
    /// YouTube Music watch page.
    pub youtube_music: Option<Url>,
    /// Apple Music album page focused on the track, or the song page.
    pub apple_music: Option<Url>,
    /// Amazon Music album page focused on the track, or the track page.
    pub amazon_music: Option<Url>,
}

impl PlatformLinks {
    /// Builds the links for `ids`.
    pub fn from_ids(ids: &TrackIds, config: &LinkConfig) -> Result<Self, Error> {
        Ok(Self {
            spotify: spotify_link(&ids.spotify, config)?,
            youtube_music: youtube_link(&ids.youtube, config)?,
            apple_music: apple_link(&ids.apple_album, &ids.apple_track, config)?,
            amazon_music: amazon_link(&ids.amazon_album, &ids.amazon_track, config)?,
        })
    }
}

fn spotify_link(id: &str, config: &LinkConfig) -> Result<Option<Url>, Error> {
    if id.is_empty() {
        return Ok(None);
    }
    Ok(Some(join(&config.spotify_base, id)?))
}

fn youtube_link(id: &str, config: &LinkConfig) -> Result<Option<Url>, Error> {
    if id.is_empty() {
        return Ok(None);
    }
    let mut url = Url::parse(&config.youtube_base)?;
    url.query_pairs_mut().append_pair("v", id);
    Ok(Some(url))
}

fn apple_link(album: &str, track: &str, config: &LinkConfig) -> Result<Option<Url>, Error> {
    let storefront = &config.apple_storefront;
    match (album.is_empty(), track.is_empty()) {
        (true, true) => Ok(None),
        (true, false) => Ok(Some(join(&config.apple_base, &format!("{storefront}/song/_/{track}"))?)),
        (false, _) => {
            let mut url = join(&config.apple_base, &format!("{storefront}/album/_/{album}"))?;
            if !track.is_empty() {
                url.query_pairs_mut().append_pair("i", track);
            }
            Ok(Some(url))
        }
    }
}

fn amazon_link(album: &str, track: &str, config: &LinkConfig) -> Result<Option<Url>, Error> {
    match (album.is_empty(), track.is_empty()) {
        (true, true) => Ok(None),
        (true, false) => Ok(Some(join(&config.amazon_base, &format!("tracks/{track}"))?)),
        (false, _) => {
            let mut url = join(&config.amazon_base, &format!("albums/{album}"))?;
            if !track.is_empty() {
                url.query_pairs_mut().append_pair("trackAsin", track);
            }
            Ok(Some(url))
        }
    }
}

/// Resolves `path` against the configured `base`.
fn join(base: &str, path: &str) -> Result<Url, Error> {
    Ok(Url::parse(base)?.join(path)?)
}
