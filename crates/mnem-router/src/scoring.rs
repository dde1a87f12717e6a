use mnem_core::model::Layer;

use crate::patterns::{
    self, ALL_CAPS_WORD, CAMEL_OR_SNAKE_CASE, CODE_PUNCTUATION, EMOTIONAL_SIGNALS,
    TECHNICAL_SIGNALS,
};

/// A pattern firing and its diminishing-returns-weighted contribution.
#[derive(Debug, Clone)]
pub struct Firing {
    pub signal: &'static str,
    pub count: usize,
    pub contribution: f64,
}

/// Score one layer's pattern bag against `text`. Each pattern's contribution
/// is `base_weight * (1 + 0.1 * min(firings - 1, 4))` — the first firing
/// counts at full weight, each of up to four further firings adds 10% of
/// the base weight (spec §4.4).
pub fn score_layer(layer: Layer, text: &str) -> (f64, Vec<Firing>) {
    let mut total = 0.0;
    let mut firings = Vec::new();

    for pat in patterns::patterns_for(layer).iter() {
        let count = pat.regex.find_iter(text).count();
        if count == 0 {
            continue;
        }
        let bonus_firings = (count - 1).min(4);
        let contribution = pat.base_weight * (1.0 + 0.1 * bonus_firings as f64);
        total += contribution;
        firings.push(Firing {
            signal: pat.signal,
            count,
            contribution,
        });
    }

    (total, firings)
}

/// Emotional intensity in [0,1] (spec §4.4).
pub fn emotional_intensity(text: &str) -> f64 {
    let mut value = 0.5;
    for regex in EMOTIONAL_SIGNALS.iter() {
        if regex.is_match(text) {
            value += 0.1;
        }
    }
    let exclamations = text.matches('!').count();
    value += (0.05 * exclamations as f64).min(0.2);

    let caps_words = ALL_CAPS_WORD.find_iter(text).count();
    value += (0.03 * caps_words as f64).min(0.15);

    value.clamp(0.0, 1.0)
}

/// Technical density in [0,1] (spec §4.4).
pub fn technical_density(text: &str) -> f64 {
    let mut value = 0.0;
    for regex in TECHNICAL_SIGNALS.iter() {
        if regex.is_match(text) {
            value += 0.15;
        }
    }
    if CODE_PUNCTUATION.is_match(text) {
        value += 0.1;
    }
    let case_hits = CAMEL_OR_SNAKE_CASE.find_iter(text).count();
    value += (0.02 * case_hits as f64).min(0.2);

    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diminishing_returns_caps_at_five_firings() {
        let text = "today today today today today today today";
        let (score, firings) = score_layer(Layer::Episodic, text);
        let today = &firings[0];
        assert_eq!(today.count, 7);
        // base 0.5 * (1 + 0.1*4) = 0.7, extra firings beyond 5 add nothing more.
        assert!((today.contribution - 0.7).abs() < 1e-9);
        assert!((score - today.contribution).abs() < 1e-9);
    }

    #[test]
    fn emotional_intensity_has_baseline_half() {
        assert_eq!(emotional_intensity("a plain sentence"), 0.5);
    }

    #[test]
    fn technical_density_zero_for_prose() {
        assert_eq!(technical_density("a plain sentence about nothing"), 0.0);
    }
}
