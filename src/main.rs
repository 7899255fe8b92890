//! matchcore - demo binary
//!
//! Replays a short order session against one engine and logs the fills, top of
//! book and state root. Configure with `MATCHCORE_*` variables and `RUST_LOG`.

use anyhow::Context;
use tracing::info;

use matchcore::logging::{init_logging, LogFormat};
use matchcore::types::price::{from_fixed_trimmed, to_fixed};
use matchcore::{EngineConfig, IocOrder, LimitOrder, MarketOrder, MatchingEngine, Order, Side};

fn px(s: &str) -> anyhow::Result<u64> {
    to_fixed(s).with_context(|| format!("invalid fixed-point value {s:?}"))
}

fn session(symbol: &str) -> anyhow::Result<Vec<Order>> {
    Ok(vec![
        LimitOrder::new(1, symbol, px("1.5")?, px("50000")?, Side::Sell, 1)?.into(),
        LimitOrder::new(2, symbol, px("2")?, px("50010")?, Side::Sell, 2)?.into(),
        LimitOrder::new(3, symbol, px("1")?, px("49990")?, Side::Buy, 3)?.into(),
        LimitOrder::new(4, symbol, px("2")?, px("50005")?, Side::Buy, 4)?.into(),
        IocOrder::new(5, symbol, px("3")?, px("50010")?, Side::Buy, 5)?.into(),
        MarketOrder::new(6, symbol, px("1.25")?, Side::Sell, 6)?.into(),
        MarketOrder::new(7, symbol, px("1")?, Side::Buy, 7)?.into(),
    ])
}

fn main() -> anyhow::Result<()> {
    let format = std::env::var("MATCHCORE_LOG_FORMAT")
        .ok()
        .and_then(|s| LogFormat::parse(&s))
        .unwrap_or_default();
    init_logging(format)?;

    let config = EngineConfig::from_env().context("loading engine config")?;
    let mut engine = MatchingEngine::with_config(config);

    for order in session(engine.symbol())? {
        let result = engine
            .match_order(&order)
            .with_context(|| format!("handling order {}", order.id()))?;

        info!(
            order_id = order.id(),
            order_type = ?order.order_type(),
            outcome = ?result.outcome,
            filled = %from_fixed_trimmed(result.filled_quantity),
            "order processed"
        );
        for fill in &result.fills {
            info!("  fill {}", fill);
        }
    }

    let book = engine.book();
    info!(
        best_bid = ?engine.best_bid().map(from_fixed_trimmed),
        best_ask = ?engine.best_ask().map(from_fixed_trimmed),
        bids = book.bid_count(),
        asks = book.ask_count(),
        "top of book"
    );
    info!(state_root = %book.state_root_hex(), "session complete");

    Ok(())
}
