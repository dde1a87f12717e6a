use mnem_core::model::Layer;

use crate::scoring::{emotional_intensity, score_layer, technical_density, Firing};

/// The tuple `(layer, confidence, signals, emotional_intensity,
/// technical_density)` produced by content analysis (spec GLOSSARY "Router
/// decision").
#[derive(Debug, Clone)]
pub struct RouterDecision {
    pub layer: Layer,
    pub confidence: f64,
    pub signals: Vec<Firing>,
    pub emotional_intensity: f64,
    pub technical_density: f64,
}

/// Score content against every layer's pattern bag and pick the winner.
/// Pure and reentrant: identical input yields an identical decision (spec
/// §4.4, §8 property 8).
pub fn analyze(text: &str) -> RouterDecision {
    let emotional = emotional_intensity(text);
    let technical = technical_density(text);

    let mut scores = [0.0f64; 6];
    let mut all_firings: Vec<Vec<Firing>> = Vec::with_capacity(6);
    for (i, layer) in Layer::ALL.iter().enumerate() {
        let (score, firings) = score_layer(*layer, text);
        scores[i] = score;
        all_firings.push(firings);
    }

    let identity_idx = Layer::ALL.iter().position(|l| *l == Layer::Identity).unwrap();
    let procedural_idx = Layer::ALL.iter().position(|l| *l == Layer::Procedural).unwrap();
    let semantic_idx = Layer::ALL.iter().position(|l| *l == Layer::Semantic).unwrap();

    if emotional > 0.7 {
        scores[identity_idx] *= 1.0 + 0.5 * emotional;
    }
    if technical > 0.6 {
        let howto_fired = all_firings[procedural_idx]
            .iter()
            .any(|firing| firing.signal.starts_with("howto_"));
        if howto_fired {
            scores[procedural_idx] *= 1.0 + 0.3 * technical;
        } else {
            scores[semantic_idx] *= 1.0 + 0.3 * technical;
        }
    }

    let (winner_idx, top) = scores
        .iter()
        .enumerate()
        .fold((0usize, f64::MIN), |(best_i, best_v), (i, &v)| {
            if v > best_v {
                (i, v)
            } else {
                (best_i, best_v)
            }
        });

    if top <= 0.0 {
        let working_idx = Layer::ALL.iter().position(|l| *l == Layer::Working).unwrap();
        return RouterDecision {
            layer: Layer::Working,
            confidence: 0.5,
            signals: all_firings.swap_remove(working_idx),
            emotional_intensity: emotional,
            technical_density: technical,
        };
    }

    let second = scores
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != winner_idx)
        .map(|(_, &v)| v)
        .fold(f64::MIN, f64::max)
        .max(0.0);

    let confidence = (0.5 + 0.5 * (top - second) / top).clamp(0.0, 0.95);

    RouterDecision {
        layer: Layer::ALL[winner_idx],
        confidence,
        signals: all_firings.swap_remove(winner_idx),
        emotional_intensity: emotional,
        technical_density: technical,
    }
}

/// An explicit caller-supplied layer always wins with confidence 1.0 and no
/// scoring (spec §4.4, §8 property 9).
pub fn explicit(layer: Layer) -> RouterDecision {
    RouterDecision {
        layer,
        confidence: 1.0,
        signals: Vec::new(),
        emotional_intensity: 0.5,
        technical_density: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_and_reentrant() {
        let text = "How to deploy the server: step 1 install dependencies";
        let a = analyze(text);
        let b = analyze(text);
        assert_eq!(a.layer, b.layer);
        assert!((a.confidence - b.confidence).abs() < 1e-12);
    }

    #[test]
    fn signal_free_input_routes_to_working() {
        let decision = analyze("xq7 zzt mlp");
        assert_eq!(decision.layer, Layer::Working);
        assert!(decision.confidence >= 0.5);
    }

    #[test]
    fn episodic_scenario() {
        let decision = analyze("Today we had a great session working on the project");
        assert_eq!(decision.layer, Layer::Episodic);
    }

    #[test]
    fn procedural_scenario() {
        let decision = analyze("How to deploy the MCP server: step 1 install dependencies");
        assert_eq!(decision.layer, Layer::Procedural);
    }

    #[test]
    fn meta_scenario() {
        let decision = analyze("I realized that the pattern here is about integration not separation");
        assert_eq!(decision.layer, Layer::Meta);
    }

    #[test]
    fn explicit_layer_has_full_confidence() {
        let decision = explicit(Layer::Identity);
        assert_eq!(decision.confidence, 1.0);
        assert_eq!(decision.layer, Layer::Identity);
    }
}
