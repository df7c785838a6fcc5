//! Valence lexicon for the rule-based scorer.
//!
//! Word valences are mean human ratings on a [-4, 4] scale. Extra entries can
//! be merged from a file in the usual tab-separated lexicon layout:
//! `word<TAB>mean[<TAB>stddev<TAB>raw ratings]`.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};

/// Scalar added to a valence by a preceding booster word.
pub const BOOSTER_INCREMENT: f64 = 0.293;
/// Scalar subtracted from a valence by a preceding dampener word.
pub const BOOSTER_DECREMENT: f64 = -0.293;

const VALENCES: &[(&str, f64)] = &[
    // positive
    ("love", 3.2),
    ("loved", 2.9),
    ("loves", 2.7),
    ("lovely", 2.8),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("great", 3.1),
    ("greatest", 3.2),
    ("good", 1.9),
    ("better", 1.9),
    ("best", 3.2),
    ("excellent", 2.7),
    ("fantastic", 2.6),
    ("wonderful", 2.7),
    ("brilliant", 2.8),
    ("superb", 3.1),
    ("outstanding", 3.0),
    ("perfect", 2.7),
    ("nice", 1.8),
    ("fine", 0.8),
    ("ok", 1.2),
    ("okay", 0.9),
    ("cool", 1.3),
    ("like", 2.0),
    ("liked", 1.8),
    ("likes", 1.8),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("happy", 2.7),
    ("happiness", 2.6),
    ("glad", 2.0),
    ("pleased", 1.9),
    ("delighted", 2.9),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("fun", 2.3),
    ("funny", 1.9),
    ("beautiful", 2.9),
    ("pretty", 2.2),
    ("helpful", 1.8),
    ("useful", 1.9),
    ("recommend", 1.5),
    ("recommended", 1.6),
    ("thanks", 1.9),
    ("thank", 1.5),
    ("grateful", 2.0),
    ("win", 2.8),
    ("winner", 2.8),
    ("success", 2.7),
    ("successful", 2.8),
    ("easy", 1.9),
    ("smooth", 1.2),
    ("fast", 0.6),
    ("reliable", 1.9),
    ("impressive", 2.3),
    ("impressed", 2.1),
    ("incredible", 2.4),
    ("favorite", 2.0),
    ("satisfied", 1.8),
    ("comfortable", 1.5),
    ("friendly", 2.2),
    ("kind", 2.4),
    ("calm", 1.3),
    ("hope", 1.9),
    ("hopeful", 1.6),
    ("proud", 2.1),
    ("positive", 2.6),
    ("optimistic", 1.3),
    ("yay", 2.4),
    ("wow", 2.8),
    ("smile", 1.5),
    ("laugh", 2.6),
    ("joy", 2.8),
    ("peace", 2.5),
    ("trust", 2.3),
    ("safe", 1.9),
    ("clean", 1.7),
    ("fresh", 1.3),
    ("worth", 0.9),
    ("gain", 2.4),
    ("bullish", 1.5),
    ("improve", 1.9),
    ("improved", 2.1),
    ("yes", 1.7),
    // negative
    ("hate", -2.7),
    ("hated", -3.2),
    ("hates", -1.9),
    ("terrible", -2.1),
    ("horrible", -2.5),
    ("awful", -2.0),
    ("bad", -2.5),
    ("worse", -2.1),
    ("worst", -3.1),
    ("poor", -2.1),
    ("sad", -2.1),
    ("unhappy", -1.8),
    ("angry", -2.3),
    ("annoying", -1.7),
    ("annoyed", -1.6),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disappointment", -2.3),
    ("boring", -1.3),
    ("bored", -1.1),
    ("ugly", -2.3),
    ("stupid", -2.4),
    ("useless", -1.8),
    ("broken", -1.5),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("problem", -1.7),
    ("problems", -1.7),
    ("issue", -0.5),
    ("bug", -1.1),
    ("slow", -0.6),
    ("difficult", -1.5),
    ("hard", -0.4),
    ("confusing", -1.3),
    ("confused", -1.3),
    ("wrong", -2.1),
    ("mess", -1.5),
    ("waste", -1.8),
    ("wasted", -2.2),
    ("expensive", -0.9),
    ("scam", -2.1),
    ("fraud", -2.8),
    ("fake", -2.1),
    ("lie", -1.8),
    ("lies", -1.8),
    ("afraid", -2.0),
    ("fear", -2.2),
    ("scared", -1.9),
    ("worried", -1.2),
    ("worry", -1.9),
    ("hurt", -2.4),
    ("pain", -2.3),
    ("painful", -2.2),
    ("sick", -2.3),
    ("cry", -2.1),
    ("crying", -2.1),
    ("lost", -1.3),
    ("lose", -1.7),
    ("loss", -1.3),
    ("crash", -1.7),
    ("bearish", -1.2),
    ("risk", -1.1),
    ("crisis", -3.1),
    ("disaster", -3.1),
    ("dead", -3.3),
    ("kill", -3.7),
    ("nasty", -2.6),
    ("rude", -2.0),
    ("disgusting", -2.4),
    ("pathetic", -2.2),
    ("ridiculous", -1.5),
    ("unfortunately", -1.4),
    ("sorry", -0.3),
    ("no", -1.2),
    ("meh", -0.3),
    ("negative", -2.7),
    ("lonely", -1.5),
    ("tired", -1.9),
    ("dirty", -1.9),
    ("damage", -2.2),
    ("damaged", -1.9),
    ("refund", -0.3),
    ("complain", -1.5),
    ("complaint", -1.2),
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", BOOSTER_INCREMENT),
    ("amazingly", BOOSTER_INCREMENT),
    ("awfully", BOOSTER_INCREMENT),
    ("completely", BOOSTER_INCREMENT),
    ("considerably", BOOSTER_INCREMENT),
    ("decidedly", BOOSTER_INCREMENT),
    ("deeply", BOOSTER_INCREMENT),
    ("enormously", BOOSTER_INCREMENT),
    ("entirely", BOOSTER_INCREMENT),
    ("especially", BOOSTER_INCREMENT),
    ("exceptionally", BOOSTER_INCREMENT),
    ("extremely", BOOSTER_INCREMENT),
    ("fabulously", BOOSTER_INCREMENT),
    ("fully", BOOSTER_INCREMENT),
    ("greatly", BOOSTER_INCREMENT),
    ("highly", BOOSTER_INCREMENT),
    ("hugely", BOOSTER_INCREMENT),
    ("incredibly", BOOSTER_INCREMENT),
    ("intensely", BOOSTER_INCREMENT),
    ("majorly", BOOSTER_INCREMENT),
    ("more", BOOSTER_INCREMENT),
    ("most", BOOSTER_INCREMENT),
    ("particularly", BOOSTER_INCREMENT),
    ("purely", BOOSTER_INCREMENT),
    ("quite", BOOSTER_INCREMENT),
    ("really", BOOSTER_INCREMENT),
    ("remarkably", BOOSTER_INCREMENT),
    ("so", BOOSTER_INCREMENT),
    ("substantially", BOOSTER_INCREMENT),
    ("thoroughly", BOOSTER_INCREMENT),
    ("totally", BOOSTER_INCREMENT),
    ("tremendously", BOOSTER_INCREMENT),
    ("unbelievably", BOOSTER_INCREMENT),
    ("unusually", BOOSTER_INCREMENT),
    ("utterly", BOOSTER_INCREMENT),
    ("very", BOOSTER_INCREMENT),
    ("almost", BOOSTER_DECREMENT),
    ("barely", BOOSTER_DECREMENT),
    ("hardly", BOOSTER_DECREMENT),
    ("kinda", BOOSTER_DECREMENT),
    ("less", BOOSTER_DECREMENT),
    ("little", BOOSTER_DECREMENT),
    ("marginally", BOOSTER_DECREMENT),
    ("occasionally", BOOSTER_DECREMENT),
    ("partly", BOOSTER_DECREMENT),
    ("scarcely", BOOSTER_DECREMENT),
    ("slightly", BOOSTER_DECREMENT),
    ("somewhat", BOOSTER_DECREMENT),
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "neednt", "never", "none", "nope",
    "nor", "not", "nothing", "nowhere", "oughtnt", "shant", "shouldnt", "wasnt", "werent",
    "without", "wont", "wouldnt", "rarely", "seldom", "despite",
];

/// Word valences plus the modifier vocabularies the scorer consults.
#[derive(Debug, Clone)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
    boosters: HashMap<String, f64>,
    negations: HashSet<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Lexicon {
    /// The lexicon compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            valences: VALENCES
                .iter()
                .map(|(w, v)| (w.to_string(), *v))
                .collect(),
            boosters: BOOSTERS
                .iter()
                .map(|(w, v)| (w.to_string(), *v))
                .collect(),
            negations: NEGATIONS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Valence for a lowercased word, if it carries sentiment.
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    /// Booster/dampener scalar for a lowercased word.
    pub fn booster(&self, word: &str) -> Option<f64> {
        self.boosters.get(word).copied()
    }

    /// Negation words, with or without the apostrophe, plus any `n't` contraction.
    pub fn is_negation(&self, word: &str) -> bool {
        if word.ends_with("n't") {
            return true;
        }
        let bare: String = word.chars().filter(|c| *c != '\'').collect();
        self.negations.contains(&bare)
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }

    /// Add or replace a single valence entry.
    pub fn insert(&mut self, word: &str, valence: f64) {
        self.valences.insert(word.to_lowercase(), valence);
    }

    /// Merge entries parsed from lexicon file content. Returns how many were merged.
    pub fn merge_str(&mut self, content: &str) -> usize {
        let mut merged = 0;
        for (line_no, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match parse_entry(trimmed) {
                Some((word, valence)) => {
                    self.insert(word, valence);
                    merged += 1;
                }
                None => {
                    tracing::warn!(line = line_no + 1, "skipping malformed lexicon entry");
                }
            }
        }
        merged
    }

    /// Merge entries from a lexicon file on disk.
    pub fn merge_file(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read lexicon file '{}'", path.display()))?;
        let merged = self.merge_str(&content);
        tracing::debug!(path = %path.display(), merged, "merged extra lexicon entries");
        Ok(merged)
    }
}

/// `word<TAB>mean[...]`; whitespace separated lines are accepted too.
fn parse_entry(line: &str) -> Option<(&str, f64)> {
    let fields: Vec<&str> = if line.contains('\t') {
        line.split('\t').collect()
    } else {
        line.split_whitespace().collect()
    };
    let word = fields.first()?.trim();
    let valence: f64 = fields.get(1)?.trim().parse().ok()?;
    if word.is_empty() || !valence.is_finite() {
        return None;
    }
    Some((word, valence))
}
