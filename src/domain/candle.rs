// Define the CandleType enum
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CandleType {
    Bullish,
    Bearish,
    // Close exactly equal to open
    Doji,
}

// Define the Candle struct with all its properties
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
}

// Implement methods for the Candle struct
impl Candle {
    // A constructor for convenience
    pub fn new(open_price: f64, high_price: f64, low_price: f64, close_price: f64) -> Self {
        Candle {
            open_price,
            high_price,
            low_price,
            close_price,
        }
    }

    // A method to determine the type of candle
    pub fn get_type(&self) -> CandleType {
        if self.close_price > self.open_price {
            CandleType::Bullish
        } else if self.close_price < self.open_price {
            CandleType::Bearish
        } else {
            CandleType::Doji
        }
    }

    // Returns the low and high of the candle body as a tuple
    pub fn body_range(&self) -> (f64, f64) {
        match self.get_type() {
            CandleType::Bullish | CandleType::Doji => (self.open_price, self.close_price),
            CandleType::Bearish => (self.close_price, self.open_price),
        }
    }

    /// Checks that all prices are finite and positive and that
    /// `low <= body low <= body high <= high`.
    /// Returns a description of the first broken rule.
    pub fn check_consistency(&self) -> Result<(), String> {
        let prices = [
            ("open", self.open_price),
            ("high", self.high_price),
            ("low", self.low_price),
            ("close", self.close_price),
        ];
        if let Some((name, price)) = prices.iter().find(|(_, p)| !p.is_finite() || *p <= 0.0) {
            return Err(format!("{} price must be positive, got {}", name, price));
        }

        let (body_low, body_high) = self.body_range();
        if self.low_price > body_low || body_high > self.high_price {
            return Err(format!(
                "inconsistent OHLC: low {} / open {} / close {} / high {}",
                self.low_price, self.open_price, self.close_price, self.high_price
            ));
        }
        Ok(())
    }
}
