//! Proptest strategies for generating valid track identifiers.

use proptest::option;
use proptest::prelude::*;

use crate::payload::TrackIds;

/// A 10-character Amazon ASIN.
pub fn amazon_id() -> impl Strategy<Value = String> {
    "[0-9A-Z]{10}"
}

/// A non-zero decimal Apple Music ID anywhere in the `u64` range.
pub fn apple_id() -> impl Strategy<Value = String> {
    (1u64..=u64::MAX).prop_map(|id| id.to_string())
}

/// A 22-character Spotify track ID.
pub fn spotify_id() -> impl Strategy<Value = String> {
    "[0-9A-Za-z]{22}"
}

/// An 11-character YouTube video ID.
pub fn youtube_id() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{11}"
}

fn maybe(strategy: impl Strategy<Value = String>) -> impl Strategy<Value = String> {
    option::weighted(0.8, strategy).prop_map(Option::unwrap_or_default)
}

/// Identifiers at their canonical lengths, each platform independently
/// absent some of the time.
pub fn track_ids() -> impl Strategy<Value = TrackIds> {
    (
        any::<bool>(),
        maybe(amazon_id()),
        maybe(amazon_id()),
        maybe(apple_id()),
        maybe(apple_id()),
        maybe(spotify_id()),
        maybe(youtube_id()),
    )
        .prop_map(
            |(explicit, amazon_album, amazon_track, apple_album, apple_track, spotify, youtube)| {
                TrackIds {
                    explicit,
                    amazon_album,
                    amazon_track,
                    apple_album,
                    apple_track,
                    spotify,
                    youtube,
                }
            },
        )
}

/// Like [`track_ids`], but BaseN identifiers may be shorter than their
/// canonical length, as if their leading zero symbols had been dropped.
pub fn unpadded_track_ids() -> impl Strategy<Value = TrackIds> {
    (
        track_ids(),
        "[0-9A-Z]{1,10}",
        "[0-9A-Za-z]{1,22}",
        "[A-Za-z0-9_-]{1,11}",
    )
        .prop_map(|(ids, amazon_track, spotify, youtube)| TrackIds {
            amazon_track,
            spotify,
            youtube,
            ..ids
        })
}
