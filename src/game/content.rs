/// Match content supply.
///
/// A content provider hands each new match its ordered list of rounds. The
/// built-in catalog draws random tracks from a fixed demo set so the server
/// runs standalone; a real deployment backs this trait with its media
/// library.

use rand::seq::{IteratorRandom, SliceRandom};

use crate::config::game::ROUNDS_PER_MATCH;
use crate::game::types::Round;

/// Supplies the rounds for one match: exactly `ROUNDS_PER_MATCH` entries,
/// each with a snippet URL, four options, and one correct answer.
pub trait ContentProvider {
    fn rounds_for_match(&self) -> Vec<Round>;
}

struct Track {
    title: &'static str,
    snippet_url: &'static str,
}

const CATALOG: &[Track] = &[
    Track { title: "Midnight Drive", snippet_url: "https://cdn.example.com/snippets/midnight-drive.mp3" },
    Track { title: "Paper Lanterns", snippet_url: "https://cdn.example.com/snippets/paper-lanterns.mp3" },
    Track { title: "Glass Harbor", snippet_url: "https://cdn.example.com/snippets/glass-harbor.mp3" },
    Track { title: "Static Bloom", snippet_url: "https://cdn.example.com/snippets/static-bloom.mp3" },
    Track { title: "Copper Skies", snippet_url: "https://cdn.example.com/snippets/copper-skies.mp3" },
    Track { title: "Low Tide", snippet_url: "https://cdn.example.com/snippets/low-tide.mp3" },
    Track { title: "Neon Orchard", snippet_url: "https://cdn.example.com/snippets/neon-orchard.mp3" },
    Track { title: "Second Summer", snippet_url: "https://cdn.example.com/snippets/second-summer.mp3" },
    Track { title: "Hollow Crown", snippet_url: "https://cdn.example.com/snippets/hollow-crown.mp3" },
    Track { title: "Violet Mile", snippet_url: "https://cdn.example.com/snippets/violet-mile.mp3" },
];

/// Demo provider drawing from the built-in catalog: one answer track per
/// round plus three decoy titles, shuffled.
#[derive(Default)]
pub struct DemoCatalog;

impl ContentProvider for DemoCatalog {
    fn rounds_for_match(&self) -> Vec<Round> {
        let mut rng = rand::rng();
        CATALOG
            .iter()
            .choose_multiple(&mut rng, ROUNDS_PER_MATCH)
            .into_iter()
            .map(|track| {
                let decoys = CATALOG
                    .iter()
                    .filter(|t| t.title != track.title)
                    .choose_multiple(&mut rng, 3);
                let mut options = [
                    track.title.to_string(),
                    decoys[0].title.to_string(),
                    decoys[1].title.to_string(),
                    decoys[2].title.to_string(),
                ];
                options.shuffle(&mut rng);
                Round {
                    snippet_url: track.snippet_url.to_string(),
                    options,
                    correct_answer: track.title.to_string(),
                }
            })
            .collect()
    }
}
