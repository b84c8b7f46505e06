use trackpack::links::{LinkConfig, PlatformLinks};
use trackpack::payload::{Decodable, TrackIds};

const KNOWN_TRACK: &str = "03f80cf88e071a03f80cf88e071bb5fd86af05480097c6abc29b25b083eceee3fe7fba0dad01d430e30f56817710";

#[test]
fn scanned_payload_to_links() {
    let ids = TrackIds::decode(&hex::decode(KNOWN_TRACK).unwrap()).unwrap();
    let links = PlatformLinks::from_ids(&ids, &LinkConfig::default()).unwrap();

    let json = serde_json::to_value(&links).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "spotify": "https://open.spotify.com/track/4cOdK2wGLETKBW3PvgPWqT",
            "youtubeMusic": "https://music.youtube.com/watch?v=dQw4w9WgXcQ",
            "appleMusic": "https://geo.music.apple.com/us/album/_/1440857781?i=1440857817",
            "amazonMusic": "https://music.amazon.com/albums/B000002UJE?trackAsin=B000002UJF",
        })
    );
}

#[test]
fn empty_payload_has_no_links() {
    let ids = TrackIds::decode(&[0u8; 42]).unwrap();
    let links = PlatformLinks::from_ids(&ids, &LinkConfig::default()).unwrap();

    let json = serde_json::to_value(&links).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "spotify": null,
            "youtubeMusic": null,
            "appleMusic": null,
            "amazonMusic": null,
        })
    );
}
