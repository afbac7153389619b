use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ReferenceError;
use crate::types::{Passage, PassageSummary, Verse};

/// Source of reference passages.
///
/// Implementations may sit on a bundled corpus, a database or a remote API.
/// Callers get each failure as a [`ReferenceError`]; nothing is cached or
/// retried at this layer.
pub trait ReferenceProvider: Send + Sync {
    /// Catalogue of every passage, ordered by number.
    fn passages(&self) -> Result<Vec<PassageSummary>, ReferenceError>;

    /// One passage with its verses in order.
    fn passage(&self, number: u32) -> Result<Passage, ReferenceError>;
}

/// Provider over passages held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    passages: BTreeMap<u32, Passage>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a passage.
    pub fn insert(&mut self, passage: Passage) -> Option<Passage> {
        self.passages.insert(passage.number, passage)
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Load passages from a JSON payload in the public Quran API shape.
    ///
    /// Accepts one surah object or a list of them, optionally wrapped in the
    /// API envelope `{"code": 200, "data": ...}`:
    ///
    /// ```json
    /// {"number": 112, "name": "سورة الإخلاص", "englishName": "Al-Ikhlaas",
    ///  "ayahs": [{"numberInSurah": 1, "text": "قل هو الله احد"}]}
    /// ```
    pub fn from_json(payload: &str) -> Result<Self, ReferenceError> {
        let parsed: Payload = serde_json::from_str(payload)
            .map_err(|e| ReferenceError::Malformed(e.to_string()))?;
        let body = match parsed {
            Payload::Wrapped { data } => data,
            Payload::Bare(body) => body,
        };
        let surahs = match body {
            Body::Many(list) => list,
            Body::One(one) => vec![one],
        };

        let mut provider = Self::new();
        for surah in surahs {
            let passage = surah.into_passage()?;
            debug!(
                passage = passage.number,
                verses = passage.verses.len(),
                "reference_loaded"
            );
            provider.insert(passage);
        }
        Ok(provider)
    }
}

impl FromIterator<Passage> for InMemoryProvider {
    fn from_iter<I: IntoIterator<Item = Passage>>(iter: I) -> Self {
        let mut provider = Self::new();
        for passage in iter {
            provider.insert(passage);
        }
        provider
    }
}

impl ReferenceProvider for InMemoryProvider {
    fn passages(&self) -> Result<Vec<PassageSummary>, ReferenceError> {
        Ok(self.passages.values().map(Passage::summary).collect())
    }

    fn passage(&self, number: u32) -> Result<Passage, ReferenceError> {
        match self.passages.get(&number) {
            Some(passage) => Ok(passage.clone()),
            None => {
                warn!(passage = number, "reference_not_found");
                Err(ReferenceError::NotFound(number))
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Wrapped { data: Body },
    Bare(Body),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Body {
    Many(Vec<WireSurah>),
    One(WireSurah),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSurah {
    number: u32,
    name: String,
    #[serde(default)]
    english_name: String,
    ayahs: Vec<WireAyah>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAyah {
    number_in_surah: u32,
    text: String,
}

impl WireSurah {
    fn into_passage(self) -> Result<Passage, ReferenceError> {
        let mut verses: Vec<Verse> = self
            .ayahs
            .into_iter()
            .map(|a| Verse {
                number: a.number_in_surah,
                text: a.text,
            })
            .collect();
        verses.sort_by_key(|v| v.number);

        if let Some(pair) = verses.windows(2).find(|w| w[0].number == w[1].number) {
            return Err(ReferenceError::Malformed(format!(
                "passage {} repeats verse {}",
                self.number, pair[0].number
            )));
        }

        Ok(Passage {
            number: self.number,
            name: self.name,
            english_name: self.english_name,
            verses,
        })
    }
}
