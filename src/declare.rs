use rust_decimal::Decimal;

/// One symbol's quote as returned by a quote source. Lives only for the tick
/// that fetched it.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub symbol: String,
    /// Latest traded price.
    pub price: Decimal,
    /// Change indicator; only the sign matters for display.
    pub change: Decimal,
}

/// Price movement tri-state shown on a display item.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn from_change(change: Decimal) -> Self {
        if change > Decimal::ZERO {
            Trend::Up
        } else if change < Decimal::ZERO {
            Trend::Down
        } else {
            Trend::Flat
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_trend_from_change() {
        assert_eq!(Trend::from_change(dec!(1.25)), Trend::Up);
        assert_eq!(Trend::from_change(dec!(-0.01)), Trend::Down);
        assert_eq!(Trend::from_change(dec!(0)), Trend::Flat);
    }
}
