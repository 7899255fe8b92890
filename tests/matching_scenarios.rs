//! End-to-end matching scenarios against a single engine.

use matchcore::{
    BookError, EngineError, FillRole, FilledOrder, IocOrder, LimitOrder, MarketOrder,
    MatchingEngine, Order, OrderOutcome, Side,
};

const SYMBOL: &str = "BTC-USD";

fn limit(id: u64, side: Side, quantity: u64, price: u64, time: u64) -> Order {
    LimitOrder::new(id, SYMBOL, quantity, price, side, time).unwrap().into()
}

fn market(id: u64, side: Side, quantity: u64, time: u64) -> Order {
    MarketOrder::new(id, SYMBOL, quantity, side, time).unwrap().into()
}

fn ioc(id: u64, side: Side, quantity: u64, price: u64, time: u64) -> Order {
    IocOrder::new(id, SYMBOL, quantity, price, side, time).unwrap().into()
}

fn resting(fills: &[FilledOrder]) -> Vec<(u64, u64, u64)> {
    fills
        .iter()
        .filter(|f| f.role == FillRole::Resting)
        .map(|f| (f.id, f.quantity, f.price))
        .collect()
}

fn snapshot(engine: &MatchingEngine, side: Side) -> Vec<(u64, u64)> {
    engine
        .book()
        .orders(side)
        .map(|o| (o.id(), o.quantity()))
        .collect()
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn limit_rests_on_empty_book() {
    let mut engine = MatchingEngine::new(SYMBOL);

    let fills = engine.handle_order(&limit(1, Side::Buy, 10, 100, 1)).unwrap();

    assert!(fills.is_empty());
    assert_eq!(snapshot(&engine, Side::Buy), vec![(1, 10)]);
    assert!(engine.book().is_empty(Side::Sell));
}

#[test]
fn sell_limit_partially_consumes_resting_bid() {
    let mut engine = MatchingEngine::new(SYMBOL);
    engine.handle_order(&limit(1, Side::Buy, 10, 100, 1)).unwrap();

    let fills = engine.handle_order(&limit(2, Side::Sell, 4, 99, 2)).unwrap();

    assert_eq!(resting(&fills), vec![(1, 4, 100)]);
    let aggressor = fills.last().unwrap();
    assert_eq!(aggressor.role, FillRole::Aggressor);
    assert_eq!((aggressor.id, aggressor.quantity, aggressor.price), (2, 4, 100));

    assert_eq!(snapshot(&engine, Side::Buy), vec![(1, 6)]);
    assert!(engine.book().is_empty(Side::Sell));
}

#[test]
fn market_buy_sweeps_two_levels() {
    let mut engine = MatchingEngine::new(SYMBOL);
    engine.handle_order(&limit(10, Side::Sell, 5, 50, 1)).unwrap();
    engine.handle_order(&limit(11, Side::Sell, 5, 51, 2)).unwrap();

    let fills = engine.handle_order(&market(3, Side::Buy, 7, 3)).unwrap();

    assert_eq!(resting(&fills), vec![(10, 5, 50), (11, 2, 51)]);
    assert_eq!(snapshot(&engine, Side::Sell), vec![(11, 3)]);
    assert!(engine.book().is_empty(Side::Buy));
}

#[test]
fn ioc_against_empty_book_changes_nothing() {
    let mut engine = MatchingEngine::new(SYMBOL);
    let before = engine.book().compute_state_root();

    let result = engine.match_order(&ioc(4, Side::Buy, 10, 100, 1)).unwrap();

    assert!(result.fills.is_empty());
    assert_eq!(result.outcome, OrderOutcome::RemainderDiscarded);
    assert_eq!(engine.book().compute_state_root(), before);
}

#[test]
fn non_crossing_limit_rests() {
    let mut engine = MatchingEngine::new(SYMBOL);
    engine.handle_order(&limit(1, Side::Sell, 3, 100, 1)).unwrap();

    let fills = engine.handle_order(&limit(5, Side::Buy, 10, 99, 2)).unwrap();

    assert!(fills.is_empty());
    assert_eq!(snapshot(&engine, Side::Buy), vec![(5, 10)]);
    assert_eq!(snapshot(&engine, Side::Sell), vec![(1, 3)]);
}

// ============================================================================
// Priority
// ============================================================================

#[test]
fn oldest_at_price_fills_first() {
    let mut engine = MatchingEngine::new(SYMBOL);
    engine.handle_order(&limit(1, Side::Buy, 2, 100, 1)).unwrap();
    engine.handle_order(&limit(2, Side::Buy, 2, 100, 2)).unwrap();
    engine.handle_order(&limit(3, Side::Buy, 2, 100, 3)).unwrap();

    let fills = engine.handle_order(&market(4, Side::Sell, 3, 4)).unwrap();

    assert_eq!(resting(&fills), vec![(1, 2, 100), (2, 1, 100)]);
    assert_eq!(snapshot(&engine, Side::Buy), vec![(2, 1), (3, 2)]);
}

#[test]
fn better_price_beats_earlier_time() {
    let mut engine = MatchingEngine::new(SYMBOL);
    engine.handle_order(&limit(1, Side::Sell, 5, 102, 1)).unwrap();
    engine.handle_order(&limit(2, Side::Sell, 5, 101, 2)).unwrap();

    let fills = engine.handle_order(&limit(3, Side::Buy, 5, 105, 3)).unwrap();

    assert_eq!(resting(&fills), vec![(2, 5, 101)]);
    assert_eq!(snapshot(&engine, Side::Sell), vec![(1, 5)]);
    assert!(engine.book().is_empty(Side::Buy));
}

#[test]
fn residual_keeps_original_time() {
    let mut engine = MatchingEngine::new(SYMBOL);
    engine.handle_order(&limit(1, Side::Sell, 2, 100, 1)).unwrap();
    engine.handle_order(&limit(2, Side::Buy, 5, 100, 7)).unwrap();

    let resting = engine.book().best(Side::Buy).unwrap();
    assert_eq!((resting.id(), resting.quantity(), resting.time()), (2, 3, 7));
}

// ============================================================================
// Order types
// ============================================================================

#[test]
fn exact_size_match_fills_both_orders() {
    let mut engine = MatchingEngine::new(SYMBOL);
    engine.handle_order(&limit(1, Side::Buy, 8, 100, 1)).unwrap();

    let result = engine.match_order(&limit(2, Side::Sell, 8, 100, 2)).unwrap();

    assert_eq!(result.outcome, OrderOutcome::Filled);
    let ids: Vec<u64> = result.fills.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(engine.book().order_count(), 0);
}

#[test]
fn ioc_partial_fill_discards_remainder() {
    let mut engine = MatchingEngine::new(SYMBOL);
    engine.handle_order(&limit(1, Side::Buy, 4, 100, 1)).unwrap();
    engine.handle_order(&limit(2, Side::Buy, 4, 95, 2)).unwrap();

    let result = engine.match_order(&ioc(3, Side::Sell, 10, 98, 3)).unwrap();

    assert_eq!(result.filled_quantity, 4);
    assert_eq!(result.remaining_quantity, 6);
    assert_eq!(result.outcome, OrderOutcome::RemainderDiscarded);
    assert!(engine.book().is_empty(Side::Sell));
    assert_eq!(snapshot(&engine, Side::Buy), vec![(2, 4)]);
}

#[test]
fn market_larger_than_book_empties_side() {
    let mut engine = MatchingEngine::new(SYMBOL);
    engine.handle_order(&limit(1, Side::Sell, 3, 100, 1)).unwrap();
    engine.handle_order(&limit(2, Side::Sell, 3, 200, 2)).unwrap();

    let result = engine.match_order(&market(3, Side::Buy, 10, 3)).unwrap();

    assert_eq!(result.filled_quantity, 6);
    assert_eq!(result.remaining_quantity, 4);
    assert_eq!(result.aggressor_fill().map(|f| f.price), Some(150));
    assert!(engine.book().is_empty(Side::Sell));
    assert!(engine.book().is_empty(Side::Buy));
}

#[test]
fn partially_filled_limit_reports_outcome() {
    let mut engine = MatchingEngine::new(SYMBOL);
    engine.handle_order(&limit(1, Side::Buy, 3, 100, 1)).unwrap();

    let result = engine.match_order(&limit(2, Side::Sell, 5, 100, 2)).unwrap();

    assert_eq!(result.outcome, OrderOutcome::PartiallyFilledResting);
    assert_eq!(snapshot(&engine, Side::Sell), vec![(2, 2)]);
}

// ============================================================================
// Isolation and rejection
// ============================================================================

#[test]
fn sides_never_mix() {
    let mut engine = MatchingEngine::new(SYMBOL);
    engine.handle_order(&limit(1, Side::Buy, 5, 100, 1)).unwrap();
    engine.handle_order(&limit(2, Side::Buy, 5, 99, 2)).unwrap();
    engine.handle_order(&limit(3, Side::Sell, 5, 101, 3)).unwrap();
    engine.handle_order(&limit(4, Side::Sell, 12, 99, 4)).unwrap();

    assert!(engine.book().orders(Side::Buy).all(|o| o.side() == Side::Buy));
    assert!(engine.book().orders(Side::Sell).all(|o| o.side() == Side::Sell));
    assert!(engine.book().is_empty(Side::Buy));
    assert_eq!(snapshot(&engine, Side::Sell), vec![(4, 2), (3, 5)]);
}

#[test]
fn duplicate_resting_id_is_rejected() {
    let mut engine = MatchingEngine::new(SYMBOL);
    engine.handle_order(&limit(1, Side::Sell, 5, 100, 1)).unwrap();

    let err = engine.handle_order(&limit(1, Side::Buy, 5, 100, 2)).unwrap_err();

    assert_eq!(err, EngineError::Book(BookError::DuplicateOrderId(1)));
    assert_eq!(snapshot(&engine, Side::Sell), vec![(1, 5)]);
    assert!(engine.book().is_empty(Side::Buy));
}

#[test]
fn fills_encode_to_fixed_size_records() {
    let mut engine = MatchingEngine::new(SYMBOL);
    engine.handle_order(&limit(1, Side::Sell, 5, 100, 1)).unwrap();

    let fills = engine.handle_order(&limit(2, Side::Buy, 5, 100, 2)).unwrap();

    for fill in &fills {
        assert_eq!(fill.encode().unwrap().len(), 34);
    }
}
