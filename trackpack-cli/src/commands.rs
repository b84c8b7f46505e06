//! Subcommands of the `trackpack` binary.

use clap::{Args, Subcommand};
use trackpack::links::PlatformLinks;
use trackpack::payload::{Decodable, Encodable, TrackIds};

use crate::config::Settings;
use crate::error::Error;

/// What to do.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pack a track's identifiers into a payload, printed as hex.
    Encode(EncodeArgs),
    /// Unpack a hex payload into identifiers, printed as JSON.
    Decode(DecodeArgs),
    /// Unpack a hex payload into platform links, printed as JSON.
    Links(DecodeArgs),
}

/// Identifiers of the track to pack. Platforms left out are absent.
#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Mark the track as explicit.
    #[clap(long)]
    pub explicit: bool,
    /// Amazon Music identifiers as `ALBUM:TRACK`.
    #[clap(long, default_value = "")]
    pub amazon: String,
    /// Apple Music identifiers as `ALBUM:TRACK`.
    #[clap(long, default_value = "")]
    pub apple: String,
    /// Spotify track identifier.
    #[clap(long, default_value = "")]
    pub spotify: String,
    /// YouTube video identifier.
    #[clap(long, default_value = "")]
    pub youtube: String,
}

/// A scanned payload.
#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// The payload as hex.
    pub payload: String,
    /// Reject bytes after the last field.
    #[clap(long)]
    pub strict: bool,
}

impl Command {
    /// Runs the command, returning what to print on stdout.
    pub fn run(&self, settings: &Settings) -> Result<String, Error> {
        match self {
            Command::Encode(args) => encode(args),
            Command::Decode(args) => {
                let ids = decode(args)?;
                Ok(serde_json::to_string_pretty(&ids)?)
            }
            Command::Links(args) => {
                let ids = decode(args)?;
                let links = PlatformLinks::from_ids(&ids, &settings.links)?;
                Ok(serde_json::to_string_pretty(&links)?)
            }
        }
    }
}

fn encode(args: &EncodeArgs) -> Result<String, Error> {
    let ids = TrackIds::from_combined(
        args.explicit,
        &args.amazon,
        &args.apple,
        &args.spotify,
        &args.youtube,
    );

    let payload = ids.encode().map_err(trackpack::Error::from)?;
    tracing::info!(payload_len = payload.len(), explicit = ids.explicit, "encoded track payload");

    Ok(hex::encode(payload))
}

fn decode(args: &DecodeArgs) -> Result<TrackIds, Error> {
    let bytes = hex::decode(args.payload.trim())?;

    let ids = if args.strict {
        TrackIds::decode_strict(&bytes)
    } else {
        TrackIds::decode(&bytes)
    };
    let ids = ids.map_err(trackpack::Error::from)?;
    tracing::debug!(payload_len = bytes.len(), strict = args.strict, "decoded track payload");

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use std::path::Path;
    use test_case::test_case;
    use trackpack::payload::DecodeError;

    use super::*;

    const KNOWN_TRACK: &str = "83f80cf88e071a03f80cf88e071bb5fd86af05480097c6abc29b25b083eceee3fe7fba0dad01d430e30f56817710";

    fn settings() -> Settings {
        Settings::with_env_prefix(None::<&Path>, "TRACKPACK_TEST_COMMANDS").unwrap()
    }

    fn known_track_args() -> EncodeArgs {
        EncodeArgs {
            explicit: true,
            amazon: "B000002UJE:B000002UJF".into(),
            apple: "1440857781:1440857817".into(),
            spotify: "4cOdK2wGLETKBW3PvgPWqT".into(),
            youtube: "dQw4w9WgXcQ".into(),
        }
    }

    fn decode_args(payload: &str, strict: bool) -> DecodeArgs {
        DecodeArgs { payload: payload.into(), strict }
    }

    #[test]
    fn encode_prints_hex() {
        let output = Command::Encode(known_track_args()).run(&settings()).unwrap();
        assert_eq!(output, KNOWN_TRACK);
    }

    #[test]
    fn decode_prints_json() {
        let output = Command::Decode(decode_args(KNOWN_TRACK, true)).run(&settings()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["explicit"], true);
        assert_eq!(json["amazonAlbum"], "B000002UJE");
        assert_eq!(json["appleTrack"], "1440857817");
        assert_eq!(json["youtube"], "dQw4w9WgXcQ");
    }

    #[test]
    fn links_prints_urls() {
        let output = Command::Links(decode_args(KNOWN_TRACK, false)).run(&settings()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["spotify"], "https://open.spotify.com/track/4cOdK2wGLETKBW3PvgPWqT");
        assert_eq!(
            json["appleMusic"],
            "https://geo.music.apple.com/us/album/_/1440857781?i=1440857817"
        );
    }

    #[test]
    fn strict_flag_rejects_trailing_bytes() {
        let padded = format!("{KNOWN_TRACK}00");

        Command::Decode(decode_args(&padded, false)).run(&settings()).unwrap();
        let error = Command::Decode(decode_args(&padded, true)).run(&settings()).unwrap_err();
        assert_matches!(
            error,
            Error::Codec(trackpack::Error::Decode(DecodeError::TrailingBytes(1)))
        );
    }

    #[test_case("zz"; "not hex")]
    #[test_case("abc"; "odd length")]
    fn invalid_hex(payload: &str) {
        let error = Command::Decode(decode_args(payload, false)).run(&settings()).unwrap_err();
        assert_matches!(error, Error::InvalidHex(_));
        assert!(!error.is_codec_defect());
    }

    #[test]
    fn bad_identifier_is_an_input_error() {
        let args = EncodeArgs { youtube: "dQw4w9WgXcQ!".into(), ..known_track_args() };
        let error = Command::Encode(args).run(&settings()).unwrap_err();

        assert_matches!(error, Error::Codec(trackpack::Error::Encode(_)));
        assert!(!error.is_codec_defect());
    }
}
