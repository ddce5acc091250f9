use crate::summary::round2;
use crate::{Holding, Recommendation, Verdict};

/// Condition for one entry in the rule chain, evaluated against a holding's
/// ticker and return percentage.
#[derive(Debug, Clone, Copy)]
enum Trigger {
    /// Symbol-specific: this ticker with return_pct strictly above the threshold.
    TickerAbove(&'static str, f64),
    /// Symbol-specific: this ticker with return_pct strictly below the threshold.
    TickerBelow(&'static str, f64),
    /// Any ticker with return_pct strictly above the threshold.
    Above(f64),
    /// Any ticker with return_pct strictly below the threshold.
    Below(f64),
    /// Catch-all.
    Always,
}

impl Trigger {
    fn matches(&self, ticker: &str, return_pct: f64) -> bool {
        match *self {
            Trigger::TickerAbove(symbol, threshold) => ticker == symbol && return_pct > threshold,
            Trigger::TickerBelow(symbol, threshold) => ticker == symbol && return_pct < threshold,
            Trigger::Above(threshold) => return_pct > threshold,
            Trigger::Below(threshold) => return_pct < threshold,
            Trigger::Always => true,
        }
    }
}

struct Rule {
    trigger: Trigger,
    verdict: Verdict,
    action: &'static str,
    rationale: fn(f64) -> String,
}

fn exceptional_gain(pct: f64) -> String {
    format!("Exceptional gain of {:.1}%. Lock in 50-70% profits", pct)
}

fn strong_gain_reduce(pct: f64) -> String {
    format!("Strong gain of {:.1}%. Reduce by 40%", pct)
}

fn cut_losses(pct: f64) -> String {
    format!("Down {:.1}%. Exit to prevent further losses", pct.abs())
}

fn strong_gain_partial(pct: f64) -> String {
    format!("Strong gain of {:.1}%. Consider taking partial profits", pct)
}

fn review_thesis(pct: f64) -> String {
    format!("Down {:.1}%. Review investment thesis", pct.abs())
}

fn monitor_winner(pct: f64) -> String {
    format!("Good gain of {:.1}%. Let winner run with trailing stop", pct)
}

fn within_range(_pct: f64) -> String {
    "Position within normal range".to_string()
}

/// Ordered rule chain: evaluated top to bottom, first match wins.
///
/// The symbol-specific entries come first so they take precedence over the
/// generic thresholds (e.g. SMH at +150% hits the SMH rule, not the generic
/// +50% rule).
const RULE_CHAIN: &[Rule] = &[
    Rule {
        trigger: Trigger::TickerAbove("SMH", 100.0),
        verdict: Verdict::Sell,
        action: "Take Profits",
        rationale: exceptional_gain,
    },
    Rule {
        trigger: Trigger::TickerAbove("QQQ", 60.0),
        verdict: Verdict::Sell,
        action: "Reduce Position",
        rationale: strong_gain_reduce,
    },
    Rule {
        trigger: Trigger::TickerBelow("SPK", -30.0),
        verdict: Verdict::Sell,
        action: "Cut Losses",
        rationale: cut_losses,
    },
    Rule {
        trigger: Trigger::Above(50.0),
        verdict: Verdict::Sell,
        action: "Take Profits",
        rationale: strong_gain_partial,
    },
    Rule {
        trigger: Trigger::Below(-20.0),
        verdict: Verdict::Sell,
        action: "Review Position",
        rationale: review_thesis,
    },
    Rule {
        trigger: Trigger::Above(20.0),
        verdict: Verdict::Hold,
        action: "Monitor Winner",
        rationale: monitor_winner,
    },
    Rule {
        trigger: Trigger::Always,
        verdict: Verdict::Hold,
        action: "Maintain",
        rationale: within_range,
    },
];

/// Percentage change from start_value to end_value.
///
/// When start_value is 0 there is no meaningful base: the result is 0 for a
/// position that never had value, and 100 as a degenerate "infinite gain"
/// placeholder otherwise.
pub fn return_percentage(start_value: f64, end_value: f64) -> f64 {
    if start_value > 0.0 {
        (end_value - start_value) / start_value * 100.0
    } else if end_value == 0.0 {
        0.0
    } else {
        100.0
    }
}

/// Classify one holding. Pure and deterministic in
/// (ticker, start_value, end_value).
pub fn recommend(holding: &Holding) -> Recommendation {
    let return_pct = return_percentage(holding.start_value, holding.end_value);

    // A fully exited position short-circuits the percentage rules.
    let (verdict, action, rationale) = if holding.end_value == 0.0 && holding.start_value > 0.0 {
        (
            Verdict::Closed,
            "Position Closed".to_string(),
            "Position has been exited".to_string(),
        )
    } else {
        // Always-true final entry guarantees a match.
        let rule = RULE_CHAIN
            .iter()
            .find(|r| r.trigger.matches(&holding.ticker, return_pct))
            .expect("rule chain ends with a catch-all");
        (
            rule.verdict,
            rule.action.to_string(),
            (rule.rationale)(return_pct),
        )
    };

    Recommendation {
        ticker: holding.ticker.clone(),
        current_value: round2(holding.end_value),
        return_percentage: round2(return_pct),
        recommendation: verdict,
        action,
        rationale,
    }
}
