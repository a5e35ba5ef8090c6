use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::{
    config,
    crawler::{self, FetchError},
    declare::{Quote, Trend},
    logging,
    widget::{DisplayHost, DisplayItem},
};

/// Owns the live display items and reconciles them against the configured
/// symbol list. One instance per host surface; no ambient global.
///
/// Invariant after every [`Monitor::reconcile`]: the live item key set equals
/// the configured symbol set, uppercased.
pub struct Monitor<H: DisplayHost> {
    host: H,
    /// The configured list as last applied, order and case preserved. The
    /// next tick's list is compared against this to decide whether the items
    /// need rebuilding.
    configured: Vec<String>,
    /// Live items keyed by uppercased symbol.
    items: HashMap<String, H::Item>,
}

impl<H: DisplayHost> Monitor<H> {
    pub fn new(host: H) -> Self {
        Monitor {
            host,
            configured: Vec::new(),
            items: HashMap::new(),
        }
    }

    /// One tick: read the configuration, reconcile the item set, fetch and
    /// render quotes. Fetch failures are logged and leave every item's
    /// previous text stale; they never abort the tick loop.
    pub async fn refresh(&mut self) {
        let cfg = config::Monitor::load();
        self.reconcile(&cfg.stock_symbols);

        if self.items.is_empty() {
            return;
        }

        let symbols: Vec<String> = self
            .configured
            .iter()
            .map(|symbol| symbol.to_uppercase())
            .collect();

        let result = crawler::fetch_quotes_from_remote_site(&symbols).await;
        self.apply_fetch_result(result, cfg.use_colors);
    }

    /// Applies one tick's fetch outcome. A failure is logged exactly once,
    /// here at the tick boundary, and mutates no item. Returns whether a
    /// render happened.
    fn apply_fetch_result(
        &mut self,
        result: Result<Vec<Quote>, FetchError>,
        use_colors: bool,
    ) -> bool {
        match result {
            Ok(quotes) => {
                self.render(&quotes, use_colors);
                true
            }
            Err(why) => {
                logging::error_file_async(format!("Failed to fetch quotes because {:?}", why));
                false
            }
        }
    }

    /// Rebuilds the display items when the configured list changed (order or
    /// membership, case-sensitive); reuses them in place otherwise.
    pub fn reconcile(&mut self, configured: &[String]) {
        if self.configured == configured {
            return;
        }

        self.dispose_all();

        let count = configured.len();
        for (index, symbol) in configured.iter().enumerate() {
            let symbol = symbol.to_uppercase();
            // First configured symbol gets the highest priority.
            let mut item = self.host.create((count - index) as i32);
            item.set_text(&format!("{} $-", symbol));
            item.show();

            // Duplicate symbols collapse onto one item.
            if let Some(mut previous) = self.items.insert(symbol, item) {
                previous.hide();
                previous.dispose();
            }
        }

        self.configured = configured.to_vec();
    }

    /// Writes price text and trend color into each quoted item. Quotes for
    /// symbols with no live item (removed mid-flight) are ignored.
    pub fn render(&mut self, quotes: &[Quote], use_colors: bool) {
        for quote in quotes {
            let key = quote.symbol.to_uppercase();
            let Some(item) = self.items.get_mut(&key) else {
                continue;
            };

            item.set_text(&format_label(&key, quote.price));

            if use_colors {
                item.set_color(Some(Trend::from_change(quote.change)));
            } else {
                item.set_color(None);
            }
        }
    }

    /// Disposes every live item. Call on shutdown.
    pub fn teardown(&mut self) {
        self.dispose_all();
        self.configured.clear();
    }

    fn dispose_all(&mut self) {
        for (_, mut item) in self.items.drain() {
            item.hide();
            item.dispose();
        }
    }
}

fn format_label(symbol: &str, price: Decimal) -> String {
    format!("{} ${:.2}", symbol, price.round_dp(2))
}
