use anyhow::Result;

use crate::config::ScorerConfig;
use crate::error::ScoreError;
use crate::lexicon::Lexicon;
use crate::types::ScoreVector;

/// Multiplier applied to a valence negated within the lookback window.
const NEGATION_SCALAR: f64 = -0.74;
/// Emphasis added to an ALL-CAPS sentiment word in mixed-case text.
const CAPS_INCREMENT: f64 = 0.733;
/// Emphasis per exclamation mark, capped at four marks.
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
/// Emphasis per question mark for two or three marks; flat beyond that.
const QUESTION_INCREMENT: f64 = 0.18;
const QUESTION_MAX: f64 = 0.96;
/// Normalisation constant approximating the max expected raw sum.
const NORMALIZATION_ALPHA: f64 = 15.0;
/// How far back modifiers (boosters, negations) reach.
const LOOKBACK: usize = 3;

/// Capability that turns text into polarity scores.
///
/// Implementations hold no per-call state; one instance may score any number
/// of texts in any order with identical results.
pub trait Scorer: Send + Sync {
    /// Scorer name for logs and reports (e.g., "lexicon").
    fn name(&self) -> &'static str;

    /// Score a piece of text. Blank text yields [`ScoreError::EmptyInput`].
    fn score(&self, text: &str) -> Result<ScoreVector, ScoreError>;
}

/// Rule-based scorer over a valence [`Lexicon`].
///
/// Sums per-token valences adjusted for boosters, negation, capitalisation,
/// "but" contrast and punctuation emphasis, then normalises the sum into a
/// compound score and sifts the valences into positive/neutral/negative
/// proportions.
#[derive(Debug, Clone, Default)]
pub struct LexiconScorer {
    lexicon: Lexicon,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self::with_lexicon(Lexicon::builtin())
    }

    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Build a scorer from configuration, merging any extra lexicon file.
    pub fn from_config(config: &ScorerConfig) -> Result<Self> {
        let mut lexicon = Lexicon::builtin();
        if let Some(ref path) = config.lexicon {
            lexicon.merge_file(path)?;
        }
        Ok(Self::with_lexicon(lexicon))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn token_valences(&self, tokens: &[&str], cap_diff: bool) -> Vec<f64> {
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let mut valences = Vec::with_capacity(tokens.len());

        for (i, token) in tokens.iter().enumerate() {
            let word = lowered[i].as_str();

            if self.lexicon.booster(word).is_some() {
                valences.push(0.0);
                continue;
            }
            if word == "kind" && lowered.get(i + 1).is_some_and(|next| next == "of") {
                valences.push(0.0);
                continue;
            }
            let Some(mut valence) = self.lexicon.valence(word) else {
                valences.push(0.0);
                continue;
            };

            if cap_diff && is_all_caps(token) {
                valence += CAPS_INCREMENT.copysign(valence);
            }

            for distance in 1..=LOOKBACK.min(i) {
                let prev = lowered[i - distance].as_str();
                if self.lexicon.valence(prev).is_some() {
                    continue;
                }
                let mut scalar = self.booster_scalar(tokens[i - distance], prev, valence, cap_diff);
                match distance {
                    2 => scalar *= 0.95,
                    3 => scalar *= 0.9,
                    _ => {}
                }
                valence += scalar;
                valence = self.apply_negation(&lowered, i, distance, valence);
            }

            valences.push(valence);
        }

        apply_but_contrast(&lowered, &mut valences);
        valences
    }

    fn booster_scalar(&self, token: &str, word: &str, valence: f64, cap_diff: bool) -> f64 {
        let Some(mut scalar) = self.lexicon.booster(word) else {
            return 0.0;
        };
        if valence < 0.0 {
            scalar = -scalar;
        }
        if cap_diff && is_all_caps(token) {
            scalar += CAPS_INCREMENT.copysign(valence);
        }
        scalar
    }

    fn apply_negation(&self, lowered: &[String], i: usize, distance: usize, valence: f64) -> f64 {
        let negator = lowered[i - distance].as_str();
        if distance >= 2 {
            let between = lowered[i - distance + 1].as_str();
            // "never so good" intensifies rather than negates
            if negator == "never" && (between == "so" || between == "this") {
                return valence * 1.25;
            }
            if negator == "without" && between == "doubt" {
                return valence;
            }
        }
        if self.lexicon.is_negation(negator) {
            valence * NEGATION_SCALAR
        } else {
            valence
        }
    }
}

impl Scorer for LexiconScorer {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn score(&self, text: &str) -> Result<ScoreVector, ScoreError> {
        if text.trim().is_empty() {
            return Err(ScoreError::EmptyInput);
        }

        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Ok(ScoreVector::default());
        }

        let cap_diff = has_cap_differential(&tokens);
        let valences = self.token_valences(&tokens, cap_diff);
        let emphasis = punctuation_emphasis(text);

        let mut sum: f64 = valences.iter().sum();
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }
        let compound = normalize(sum);

        let (positive, neutral, negative) = sift(&valences, emphasis);
        let score = ScoreVector::new(
            round_to(positive, 3),
            round_to(neutral, 3),
            round_to(negative, 3),
            round_to(compound, 4),
        );

        if !score.is_finite() {
            return Err(ScoreError::Failed(format!(
                "non-finite score for {} tokens",
                tokens.len()
            )));
        }
        Ok(score)
    }
}

/// Split on whitespace and trim surrounding punctuation, keeping short tokens
/// (emoticons like ":)") intact. Single-character tokens are dropped.
fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|raw| {
            let stripped = raw.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() <= 2 {
                raw
            } else {
                stripped
            }
        })
        .filter(|t| t.chars().count() > 1)
        .collect()
}

fn is_all_caps(token: &str) -> bool {
    token.chars().any(char::is_alphabetic) && !token.chars().any(char::is_lowercase)
}

/// True when some but not all tokens are shouted.
fn has_cap_differential(tokens: &[&str]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
    caps > 0 && caps < tokens.len()
}

/// Valences before "but" are halved, valences after it are boosted by half.
fn apply_but_contrast(lowered: &[String], valences: &mut [f64]) {
    let Some(pivot) = lowered.iter().position(|w| w == "but") else {
        return;
    };
    for (i, v) in valences.iter_mut().enumerate() {
        if i < pivot {
            *v *= 0.5;
        } else if i > pivot {
            *v *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCREMENT,
        _ => QUESTION_MAX,
    };
    exclamations as f64 * EXCLAMATION_INCREMENT + question_emphasis
}

fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

/// Proportions of positive, neutral and negative mass across token valences.
fn sift(valences: &[f64], emphasis: f64) -> (f64, f64, f64) {
    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neu_count = 0.0;
    for &v in valences {
        if v > 0.0 {
            pos_sum += v + 1.0;
        } else if v < 0.0 {
            neg_sum += v - 1.0;
        } else {
            neu_count += 1.0;
        }
    }

    if pos_sum > neg_sum.abs() {
        pos_sum += emphasis;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= emphasis;
    }

    let total = pos_sum + neg_sum.abs() + neu_count;
    if total == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    (
        (pos_sum / total).abs(),
        (neu_count / total).abs(),
        (neg_sum / total).abs(),
    )
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::types::SentimentLabel;

    fn score(text: &str) -> ScoreVector {
        LexiconScorer::new().score(text).unwrap()
    }

    #[test]
    fn test_positive_product_review() {
        let v = score("I love this product, it's amazing!");
        assert!(v.compound > 0.05, "compound was {}", v.compound);
        assert_eq!(classify(&v), SentimentLabel::Positive);
        assert!(v.positive > v.negative);
    }

    #[test]
    fn test_single_words() {
        assert_eq!(classify(&score("great")), SentimentLabel::Positive);
        assert_eq!(classify(&score("terrible")), SentimentLabel::Negative);
        assert!((score("great").compound - 0.6249).abs() < 1e-4);
    }

    #[test]
    fn test_no_sentiment_words_is_neutral() {
        let v = score("The table is in the kitchen");
        assert_eq!(v.compound, 0.0);
        assert_eq!(v.neutral, 1.0);
        assert_eq!(classify(&v), SentimentLabel::Neutral);
    }

    #[test]
    fn test_empty_and_blank_input_rejected() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.score(""), Err(ScoreError::EmptyInput));
        assert_eq!(scorer.score("   \n\t"), Err(ScoreError::EmptyInput));
    }

    #[test]
    fn test_single_char_tokens_only_scores_zero() {
        let v = score("a b c");
        assert_eq!(v, ScoreVector::default());
    }

    #[test]
    fn test_negation_flips_polarity() {
        let plain = score("The movie was good");
        let negated = score("The movie was not good");
        assert!(plain.compound > 0.0);
        assert!(negated.compound < 0.0);
        assert_eq!(classify(&score("This isn't bad")), SentimentLabel::Positive);
    }

    #[test]
    fn test_booster_and_dampener() {
        let base = score("The food was good").compound;
        assert!(score("The food was very good").compound > base);
        assert!(score("The food was slightly good").compound < base);
    }

    #[test]
    fn test_caps_emphasis_in_mixed_case() {
        let base = score("The service was good").compound;
        assert!(score("The service was GOOD").compound > base);
    }

    #[test]
    fn test_exclamation_emphasis_is_capped() {
        let one = score("good!").compound;
        let none = score("good").compound;
        let four = score("good!!!!").compound;
        let six = score("good!!!!!!").compound;
        assert!(one > none);
        assert!(four > one);
        assert_eq!(four, six);
    }

    #[test]
    fn test_but_shifts_weight_to_second_clause() {
        let v = score("The food was good but the service was terrible");
        assert_eq!(classify(&v), SentimentLabel::Negative);
    }

    #[test]
    fn test_proportions_sum_to_one() {
        for text in [
            "I love this product, it's amazing!",
            "terrible awful day but a nice dinner",
            "nothing to see here",
        ] {
            let v = score(text);
            assert!(
                (v.proportion_sum() - 1.0).abs() < 0.01,
                "{text}: proportions sum to {}",
                v.proportion_sum()
            );
            assert!((-1.0..=1.0).contains(&v.compound));
        }
    }

    #[test]
    fn test_deterministic_across_calls() {
        let scorer = LexiconScorer::new();
        let a = scorer.score("ok but slow").unwrap();
        let _ = scorer.score("something else entirely great").unwrap();
        let b = scorer.score("ok but slow").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_config_merges_lexicon_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.tsv");
        std::fs::write(&path, "stonks\t2.9\n").unwrap();
        let config = ScorerConfig {
            lexicon: Some(path),
        };
        let scorer = LexiconScorer::from_config(&config).unwrap();
        assert_eq!(classify(&scorer.score("stonks").unwrap()), SentimentLabel::Positive);
    }

    #[test]
    fn test_tokenize_strips_punctuation() {
        assert_eq!(tokenize("Hello, world!"), vec!["Hello", "world"]);
        assert_eq!(tokenize("it's :) a"), vec!["it's", ":)"]);
    }
}
