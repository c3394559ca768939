use serde::{Deserialize, Serialize};

/// The fixed set of symbols the dashboard tracks. Payload keys outside this
/// set are dropped by typed deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Btc,
    Eth,
    Sol,
    Bnb,
    Doge,
}

impl Symbol {
    pub const ALL: [Symbol; 5] = [
        Symbol::Btc,
        Symbol::Eth,
        Symbol::Sol,
        Symbol::Bnb,
        Symbol::Doge,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Symbol::Btc => "BTC",
            Symbol::Eth => "ETH",
            Symbol::Sol => "SOL",
            Symbol::Bnb => "BNB",
            Symbol::Doge => "DOGE",
        }
    }

    /// Decimal places used when a price is formatted for display. DOGE
    /// trades far below a dollar, so upstream shows it with four.
    pub fn display_decimals(&self) -> usize {
        match self {
            Symbol::Doge => 4,
            _ => 2,
        }
    }
}

/// Current price for one symbol. When the backend's own upstream fetch
/// fails it substitutes `{current_price: 0, error: "..."}` rather than
/// omitting the key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub current_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Quote {
    pub fn new(current_price: f64) -> Self {
        Self {
            current_price,
            error: None,
        }
    }
}

/// `data.pricing` payload of `/api/pricing/simple`: one quote per known
/// symbol.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceBook {
    pub btc: Option<Quote>,
    pub eth: Option<Quote>,
    pub sol: Option<Quote>,
    pub bnb: Option<Quote>,
    pub doge: Option<Quote>,
}

impl PriceBook {
    pub fn quote(&self, symbol: Symbol) -> Option<&Quote> {
        match symbol {
            Symbol::Btc => self.btc.as_ref(),
            Symbol::Eth => self.eth.as_ref(),
            Symbol::Sol => self.sol.as_ref(),
            Symbol::Bnb => self.bnb.as_ref(),
            Symbol::Doge => self.doge.as_ref(),
        }
    }

    /// Price for a symbol, 0.0 when the quote is absent.
    pub fn price_of(&self, symbol: Symbol) -> f64 {
        self.quote(symbol).map(|q| q.current_price).unwrap_or(0.0)
    }

    pub fn set(&mut self, symbol: Symbol, quote: Quote) {
        let slot = match symbol {
            Symbol::Btc => &mut self.btc,
            Symbol::Eth => &mut self.eth,
            Symbol::Sol => &mut self.sol,
            Symbol::Bnb => &mut self.bnb,
            Symbol::Doge => &mut self.doge,
        };
        *slot = Some(quote);
    }
}
