//! Synthetic track data.
//!
//! Feeds the assembler's counted entry point when no account is
//! connected: a balanced 25-track preset, plus user-supplied custom
//! tracks whose durations derive from the name so a demo receipt is as
//! reproducible as a live one.

use crate::model::{PlayCountedTrack, TrackRecord};

/// (title, artist, play count, duration "m:ss")
const PRESET: [(&str, &str, u32, &str); 25] = [
    ("Flowers", "Miley Cyrus", 127, "3:20"),
    ("As It Was", "Harry Styles", 89, "2:47"),
    ("Unholy", "Sam Smith & Kim Petras", 76, "2:36"),
    ("Kill Bill", "SZA", 65, "3:33"),
    ("Anti-Hero", "Taylor Swift", 58, "3:20"),
    ("Cruel Summer", "Taylor Swift", 52, "2:58"),
    ("Paint The Town Red", "Doja Cat", 47, "3:51"),
    ("Vampire", "Olivia Rodrigo", 43, "3:39"),
    ("Seven (feat. Latto)", "Jung Kook", 38, "3:04"),
    ("What Was I Made For?", "Billie Eilish", 35, "3:42"),
    ("Greedy", "Tate McRae", 32, "2:11"),
    ("Strangers", "Kenya Grace", 29, "2:52"),
    ("Water", "Tyla", 27, "3:20"),
    ("Snooze", "SZA", 24, "3:21"),
    ("Lovin On Me", "Jack Harlow", 22, "2:18"),
    ("Agora Hills", "Doja Cat", 19, "4:25"),
    ("Monaco", "Bad Bunny", 17, "4:27"),
    ("Ella Baila Sola", "Eslabon Armado", 15, "2:46"),
    ("Daylight", "David Kushner", 13, "3:33"),
    ("Houdini", "Dua Lipa", 11, "3:05"),
    ("Is It Over Now?", "Taylor Swift", 9, "3:49"),
    ("Lala", "Myke Towers", 7, "3:17"),
    ("Used To Be Young", "Miley Cyrus", 5, "3:47"),
    ("Moonlight", "Kali Uchis", 3, "3:26"),
    ("Bzrp Music Sessions #53", "Shakira & Bizarrap", 2, "3:38"),
];

/// A user-entered demo track.
#[derive(Clone, Debug)]
pub struct DemoTrack {
    pub name: String,
    pub artist: String,
    pub play_count: u32,
}

/// First `limit` preset tracks, already play-counted.
pub fn preset_tracks(limit: usize) -> Vec<PlayCountedTrack> {
    PRESET
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, (title, artist, plays, duration))| PlayCountedTrack {
            track: TrackRecord {
                id: format!("demo-{i}"),
                title: (*title).to_string(),
                artists: vec![(*artist).to_string()],
                album_art: None,
                duration_ms: parse_duration(duration),
                popularity: 0,
            },
            play_count: *plays,
            rank: i as u32 + 1,
        })
        .collect()
}

/// Custom tracks with a 3-5 minute duration derived from the name.
pub fn custom_tracks(inputs: &[DemoTrack]) -> Vec<PlayCountedTrack> {
    inputs
        .iter()
        .enumerate()
        .map(|(i, input)| PlayCountedTrack {
            track: TrackRecord {
                id: format!("custom-{i}"),
                title: input.name.clone(),
                artists: vec![input.artist.clone()],
                album_art: None,
                duration_ms: synthetic_duration(&input.name),
                popularity: 0,
            },
            play_count: input.play_count.max(1),
            rank: i as u32 + 1,
        })
        .collect()
}

/// Custom tracks first, topped up from the preset, sorted by plays and
/// clipped to `total_limit`.
pub fn mix_tracks(inputs: &[DemoTrack], total_limit: usize) -> Vec<PlayCountedTrack> {
    let mut combined = custom_tracks(inputs);
    let preset_needed = total_limit.saturating_sub(combined.len());
    combined.extend(preset_tracks(preset_needed));
    combined.sort_by(|a, b| b.play_count.cmp(&a.play_count));
    combined.truncate(total_limit);
    for (i, t) in combined.iter_mut().enumerate() {
        t.rank = i as u32 + 1;
    }
    combined
}

/// `m:ss` to milliseconds; malformed input degrades to zero.
fn parse_duration(duration: &str) -> u64 {
    let mut parts = duration.splitn(2, ':');
    let minutes: u64 = parts.next().and_then(|m| m.parse().ok()).unwrap_or(0);
    let seconds: u64 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
    (minutes * 60 + seconds) * 1000
}

/// 3-5 minutes, spread by the name's character sum.
fn synthetic_duration(name: &str) -> u64 {
    let char_sum: u64 = name.chars().map(|c| c as u64).sum();
    180_000 + (char_sum.wrapping_mul(7919)) % 120_000
}
