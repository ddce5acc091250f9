use crate::{Holding, PortfolioSummary};

/// Round a monetary value to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute aggregate metrics over the full holding set.
///
/// An empty set yields an all-zero summary; return_percentage is 0 whenever
/// the summed start value is 0.
pub fn summarize(holdings: &[Holding]) -> PortfolioSummary {
    let total_value: f64 = holdings.iter().map(|h| h.end_value).sum();
    let total_start_value: f64 = holdings.iter().map(|h| h.start_value).sum();
    let total_return = total_value - total_start_value;
    let return_percentage = if total_start_value > 0.0 {
        total_return / total_start_value * 100.0
    } else {
        0.0
    };
    let total_dividends: f64 = holdings.iter().map(|h| h.dividends).sum();

    PortfolioSummary {
        total_value: round2(total_value),
        total_return: round2(total_return),
        return_percentage: round2(return_percentage),
        total_dividends: round2(total_dividends),
        holdings_count: holdings.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(ticker: &str, start: f64, end: f64, dividends: f64) -> Holding {
        Holding {
            start_value: start,
            end_value: end,
            dividends,
            ..Holding::new(ticker)
        }
    }

    #[test]
    fn test_empty_set_is_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary, PortfolioSummary::empty());
    }

    #[test]
    fn test_totals_are_field_sums() {
        let holdings = vec![
            holding("AAPL", 1000.0, 1200.0, 20.0),
            holding("MSFT", 1500.0, 1800.0, 30.0),
            holding("GOOGL", 2000.0, 2200.0, 0.0),
        ];

        let summary = summarize(&holdings);
        assert_eq!(summary.total_value, 5200.0);
        assert_eq!(summary.total_return, 700.0);
        assert_eq!(summary.return_percentage, 15.56);
        assert_eq!(summary.total_dividends, 50.0);
        assert_eq!(summary.holdings_count, 3);
    }

    #[test]
    fn test_zero_start_value_guards_division() {
        let holdings = vec![holding("NEW", 0.0, 500.0, 0.0)];
        let summary = summarize(&holdings);
        assert_eq!(summary.return_percentage, 0.0);
        assert_eq!(summary.total_value, 500.0);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        let holdings = vec![holding("X", 300.0, 400.0, 0.333333)];
        let summary = summarize(&holdings);
        assert_eq!(summary.return_percentage, 33.33);
        assert_eq!(summary.total_dividends, 0.33);
    }
}
