use crate::models::Sentiment;

/// Word-level polarity weights in [-1, 1]. Matching is whole-token,
/// lowercase. The list covers the vocabulary typical of customer email;
/// unknown words simply do not contribute.
const LEXICON: &[(&str, f64)] = &[
    // positive
    ("amazing", 0.8),
    ("appreciate", 0.6),
    ("awesome", 0.9),
    ("best", 0.8),
    ("excellent", 1.0),
    ("fantastic", 0.9),
    ("glad", 0.6),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("impressed", 0.7),
    ("love", 0.7),
    ("perfect", 1.0),
    ("pleased", 0.7),
    ("satisfied", 0.6),
    ("thank", 0.3),
    ("thanks", 0.3),
    ("wonderful", 0.9),
    // negative
    ("angry", -0.7),
    ("awful", -1.0),
    ("bad", -0.7),
    ("broken", -0.5),
    ("complaint", -0.4),
    ("disappointed", -0.7),
    ("disappointing", -0.7),
    ("frustrated", -0.7),
    ("frustrating", -0.7),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("issue", -0.2),
    ("late", -0.3),
    ("poor", -0.5),
    ("problem", -0.3),
    ("terrible", -1.0),
    ("unacceptable", -0.9),
    ("unhappy", -0.7),
    ("worst", -1.0),
    ("wrong", -0.5),
];

/// Boost applied to the word following an intensifier.
const INTENSIFIER_BOOST: f64 = 1.3;
const INTENSIFIERS: &[&str] = &["very", "really", "extremely", "so", "incredibly"];

/// Dampening factor applied to the word following a negator. Flips the sign
/// at half strength ("not happy" reads mildly negative, not fully negative).
const NEGATION_FACTOR: f64 = -0.5;
const NEGATORS: &[&str] = &["not", "no", "never", "cannot", "wasn't", "isn't", "don't"];

fn lexicon_weight(token: &str) -> Option<f64> {
    LEXICON
        .iter()
        .find(|&&(word, _)| word == token)
        .map(|&(_, weight)| weight)
}

/// Scores the polarity of free text in [-1, 1].
///
/// The score is the mean weight of sentiment-bearing tokens, with one-token
/// lookbehind for intensifiers and negators. Text with no sentiment-bearing
/// tokens scores 0.0.
pub fn polarity(text: &str) -> f64 {
    let tokens: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect();

    let mut total = 0.0;
    let mut scored = 0usize;

    for (idx, token) in tokens.iter().enumerate() {
        let Some(mut weight) = lexicon_weight(token) else {
            continue;
        };

        if idx > 0 {
            let prev = tokens[idx - 1].as_str();
            if INTENSIFIERS.contains(&prev) {
                weight *= INTENSIFIER_BOOST;
            } else if NEGATORS.contains(&prev) {
                weight *= NEGATION_FACTOR;
            }
        }

        total += weight.clamp(-1.0, 1.0);
        scored += 1;
    }

    if scored == 0 {
        return 0.0;
    }

    (total / scored as f64).clamp(-1.0, 1.0)
}

/// Buckets a polarity score. Both thresholds are exclusive: exactly 0.1 or
/// -0.1 is still neutral.
pub fn bucket(polarity: f64) -> Sentiment {
    if polarity > 0.1 {
        Sentiment::Positive
    } else if polarity < -0.1 {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
