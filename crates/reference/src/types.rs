use serde::{Deserialize, Serialize};

/// Number of the opening passage, whose first verse is an unnumbered
/// invocation when laid out for recitation.
pub const OPENING_PASSAGE: u32 = 1;

/// One verse of a passage, in raw (unnormalized) form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// 1-based index within the passage.
    pub number: u32,
    pub text: String,
}

/// A reference passage: ordered verses plus display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    pub number: u32,
    pub name: String,
    #[serde(default)]
    pub english_name: String,
    pub verses: Vec<Verse>,
}

/// Catalogue entry for a passage without its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageSummary {
    pub number: u32,
    pub name: String,
    pub english_name: String,
    pub verse_count: usize,
}

impl Passage {
    pub fn verse_count(&self) -> usize {
        self.verses.len()
    }

    pub fn summary(&self) -> PassageSummary {
        PassageSummary {
            number: self.number,
            name: self.name.clone(),
            english_name: self.english_name.clone(),
            verse_count: self.verses.len(),
        }
    }

    /// The passage laid out as one text, each verse followed by its marker:
    /// `"<verse>(1) <verse>(2) "`.
    ///
    /// In the opening passage the first verse sits on its own line without
    /// a marker and numbering of the rest starts at 1. Markers are removed by
    /// normalization, so this text compares exactly like the bare verses.
    ///
    /// ```rust
    /// use reference::{Passage, Verse};
    ///
    /// let passage = Passage {
    ///     number: 112,
    ///     name: "الإخلاص".into(),
    ///     english_name: "Al-Ikhlas".into(),
    ///     verses: vec![
    ///         Verse { number: 1, text: "قل هو الله احد".into() },
    ///         Verse { number: 2, text: "الله الصمد".into() },
    ///     ],
    /// };
    /// assert_eq!(passage.recitation_text(), "قل هو الله احد(1) الله الصمد(2) ");
    /// ```
    pub fn recitation_text(&self) -> String {
        let mut out = String::new();
        let mut verses = self.verses.iter();

        if self.number == OPENING_PASSAGE {
            if let Some(first) = verses.next() {
                out.push_str(&first.text);
                out.push('\n');
            }
        }
        for (idx, verse) in verses.enumerate() {
            out.push_str(&verse.text);
            out.push_str(&format!("({}) ", idx + 1));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opening() -> Passage {
        Passage {
            number: OPENING_PASSAGE,
            name: "الفاتحة".into(),
            english_name: "Al-Faatiha".into(),
            verses: vec![
                Verse {
                    number: 1,
                    text: "بسم الله الرحمن الرحيم".into(),
                },
                Verse {
                    number: 2,
                    text: "الحمد لله رب العالمين".into(),
                },
                Verse {
                    number: 3,
                    text: "الرحمن الرحيم".into(),
                },
            ],
        }
    }

    #[test]
    fn opening_passage_puts_first_verse_on_its_own_line() {
        assert_eq!(
            opening().recitation_text(),
            "بسم الله الرحمن الرحيم\nالحمد لله رب العالمين(1) الرحمن الرحيم(2) "
        );
    }

    #[test]
    fn empty_passage_has_empty_text() {
        let mut p = opening();
        p.verses.clear();
        assert_eq!(p.recitation_text(), "");
        assert_eq!(p.summary().verse_count, 0);
    }
}
