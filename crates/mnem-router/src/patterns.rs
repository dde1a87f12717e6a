//! The router's fixed pattern catalog: one weighted pattern bag per layer,
//! plus the emotional and technical signal bags used to derive the two
//! orthogonal observables (spec §4.4, §9 "Pattern catalog" — loaded once at
//! startup into an immutable value shared by reference).

use once_cell::sync::Lazy;
use regex::Regex;

use mnem_core::model::Layer;

/// A single weighted, named linguistic signal.
pub struct Pattern {
    pub signal: &'static str,
    pub regex: Regex,
    pub base_weight: f64,
}

fn pattern(signal: &'static str, expr: &str, base_weight: f64) -> Pattern {
    Pattern {
        signal,
        regex: Regex::new(expr).expect("router pattern must compile"),
        base_weight,
    }
}

pub static EPISODIC_PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    vec![
        pattern("temporal_today", r"(?i)\btoday\b", 0.5),
        pattern("temporal_yesterday", r"(?i)\byesterday\b", 0.5),
        pattern("temporal_session", r"(?i)\b(session|conversation)\b", 0.4),
        pattern("temporal_recall", r"(?i)\bremember when\b", 0.6),
        pattern("temporal_last_period", r"(?i)\blast (week|month|night|time)\b", 0.45),
        pattern("temporal_we_had", r"(?i)\bwe (had|were|went)\b", 0.35),
    ]
});

pub static SEMANTIC_PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    vec![
        pattern("definition_is_defined", r"(?i)\bis defined as\b", 0.6),
        pattern("definition_means", r"(?i)\bmeans that\b", 0.45),
        pattern("definition_refers_to", r"(?i)\brefers to\b", 0.5),
        pattern("definition_fact", r"(?i)\b(a fact|known fact|fact is)\b", 0.45),
        pattern("definition_knowledge", r"(?i)\bknowledge (about|of)\b", 0.4),
        pattern("definition_is_a", r"(?i)\b\w+ is a \w+\b", 0.25),
    ]
});

pub static PROCEDURAL_PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    vec![
        pattern("howto_how_to", r"(?i)\bhow to\b", 0.6),
        pattern("howto_step", r"(?i)\bstep\s*\d+\b", 0.55),
        pattern("howto_instructions", r"(?i)\b(install|configure|deploy|run|execute)\b", 0.4),
        pattern("howto_process", r"(?i)\bprocess (requires|involves)\b", 0.45),
        pattern("howto_before_after", r"(?i)\bbefore (starting|running)\b", 0.35),
        pattern("howto_first_then", r"(?i)\b(first|then|finally),\b", 0.3),
    ]
});

pub static META_PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    vec![
        pattern("insight_realized", r"(?i)\bi realized\b", 0.6),
        pattern("insight_pattern", r"(?i)\bthe pattern (here|is)\b", 0.55),
        pattern("insight_reflecting", r"(?i)\breflecting on\b", 0.5),
        pattern("insight_in_retrospect", r"(?i)\bin retrospect\b", 0.5),
        pattern("insight_learned", r"(?i)\bi (learned|understand now)\b", 0.45),
        pattern("insight_not_but", r"(?i)\bnot .+ but\b", 0.3),
    ]
});

pub static IDENTITY_PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    vec![
        pattern("self_i_am", r"(?i)\bi am\b", 0.4),
        pattern("self_my_values", r"(?i)\bmy (values|core|identity|principles)\b", 0.6),
        pattern("self_i_believe", r"(?i)\bi believe\b", 0.45),
        pattern("self_who_i_am", r"(?i)\bwho i am\b", 0.6),
        pattern("self_my_nature", r"(?i)\bmy nature\b", 0.5),
    ]
});

pub static WORKING_PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    vec![
        pattern("temp_todo", r"(?i)\btodo\b", 0.45),
        pattern("temp_for_now", r"(?i)\bfor now\b", 0.4),
        pattern("temp_temporary", r"(?i)\btemporary\b", 0.45),
        pattern("temp_scratch", r"(?i)\bscratch(pad)?\b", 0.4),
        pattern("temp_wip", r"(?i)\bwork[- ]in[- ]progress\b", 0.5),
    ]
});

pub fn patterns_for(layer: Layer) -> &'static Vec<Pattern> {
    match layer {
        Layer::Episodic => &EPISODIC_PATTERNS,
        Layer::Semantic => &SEMANTIC_PATTERNS,
        Layer::Procedural => &PROCEDURAL_PATTERNS,
        Layer::Meta => &META_PATTERNS,
        Layer::Identity => &IDENTITY_PATTERNS,
        Layer::Working => &WORKING_PATTERNS,
    }
}

pub static EMOTIONAL_SIGNALS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(excited|thrilled|delighted)\b",
        r"(?i)\b(worried|anxious|afraid|scared)\b",
        r"(?i)\b(love|adore)\b",
        r"(?i)\b(hate|furious|angry)\b",
        r"(?i)\b(amazing|wonderful|fantastic)\b",
        r"(?i)\b(terrible|awful|horrible)\b",
        r"(?i)\b(proud|grateful)\b",
        r"(?i)\b(frustrat\w*)\b",
    ]
    .iter()
    .map(|expr| Regex::new(expr).expect("emotional signal must compile"))
    .collect()
});

pub static TECHNICAL_SIGNALS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(function|method|class|module|struct)\b",
        r"(?i)\b(api|endpoint|server|database|query)\b",
        r"(?i)\b(code|compile|build|deploy)\b",
        r"(?i)\b(bug|error|exception|stack trace)\b",
        r"(?i)\b(variable|parameter|argument|return)\b",
    ]
    .iter()
    .map(|expr| Regex::new(expr).expect("technical signal must compile"))
    .collect()
});

pub static CODE_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[{}();]|::|->|=>").expect("code punctuation pattern must compile"));

pub static CAMEL_OR_SNAKE_CASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([a-z]+[A-Z][a-zA-Z]*|[a-z]+_[a-z_]+)\b").expect("case pattern must compile")
});

pub static ALL_CAPS_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{2,}\b").expect("all-caps pattern must compile"));
