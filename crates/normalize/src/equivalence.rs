//! Character equivalence classes.
//!
//! Each class collapses a set of variant code points onto one canonical
//! representative. The table is immutable static data built once on first use
//! and shared read-only by every normalizer in the process.
//!
//! Canonical representatives are never themselves variants of another class,
//! which keeps the mapping idempotent.

use fxhash::FxHashMap;
use once_cell::sync::Lazy;

/// Bare alif, the canonical form of every alif variant.
pub const ALEF: char = '\u{0627}';
/// Standalone hamza. Not folded: it is the one hamza form that survives.
pub const HAMZA: char = '\u{0621}';
/// Tatweel (kashida), stripped by the pipeline.
pub const TATWEEL: char = '\u{0640}';

const YEH: char = '\u{064A}';
const WAW: char = '\u{0648}';
const HEH: char = '\u{0647}';
const KAF: char = '\u{0643}';

/// One equivalence class: every variant maps to `canonical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquivalenceClass {
    pub name: &'static str,
    pub canonical: char,
    pub variants: &'static [char],
}

/// The standard classes used by [`CharacterEquivalenceTable::standard`].
pub const EQUIVALENCE_CLASSES: &[EquivalenceClass] = &[
    EquivalenceClass {
        name: "alef",
        canonical: ALEF,
        variants: &[
            '\u{0622}', // alef with madda above
            '\u{0623}', // alef with hamza above
            '\u{0625}', // alef with hamza below
            '\u{0671}', // alef wasla
            '\u{0672}', // alef with wavy hamza above
            '\u{0673}', // alef with wavy hamza below
            '\u{0675}', // high hamza alef
        ],
    },
    EquivalenceClass {
        name: "yeh",
        canonical: YEH,
        variants: &[
            '\u{0649}', // alef maksura
            '\u{0626}', // yeh with hamza above
            '\u{06CC}', // farsi yeh
            '\u{06D0}', // yeh (e)
        ],
    },
    EquivalenceClass {
        name: "waw",
        canonical: WAW,
        variants: &[
            '\u{0624}', // waw with hamza above
            '\u{0676}', // high hamza waw
        ],
    },
    EquivalenceClass {
        name: "heh",
        canonical: HEH,
        variants: &[
            '\u{0629}', // teh marbuta
            '\u{06C0}', // heh with yeh above
            '\u{06C1}', // heh goal
            '\u{06BE}', // heh doachashmee
            '\u{06D5}', // ae
        ],
    },
    EquivalenceClass {
        name: "kaf",
        canonical: KAF,
        variants: &[
            '\u{06A9}', // keheh
            '\u{06AA}', // swash kaf
        ],
    },
];

static STANDARD: Lazy<CharacterEquivalenceTable> =
    Lazy::new(|| CharacterEquivalenceTable::from_classes(EQUIVALENCE_CLASSES));

/// Variant code point → canonical representative.
#[derive(Debug, Clone)]
pub struct CharacterEquivalenceTable {
    map: FxHashMap<char, char>,
}

impl CharacterEquivalenceTable {
    /// The process-wide standard table.
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Build a table from a set of classes. Later classes win on conflicts.
    pub fn from_classes(classes: &[EquivalenceClass]) -> Self {
        let mut map = FxHashMap::default();
        for class in classes {
            for &variant in class.variants {
                map.insert(variant, class.canonical);
            }
        }
        Self { map }
    }

    /// Canonical form of `ch`, or `ch` itself when it belongs to no class.
    #[inline]
    pub fn canonical(&self, ch: char) -> char {
        self.map.get(&ch).copied().unwrap_or(ch)
    }

    pub fn is_variant(&self, ch: char) -> bool {
        self.map.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
