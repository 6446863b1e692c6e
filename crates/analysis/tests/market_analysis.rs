//! End-to-end: raw candidates through validation, reconciliation and analysis.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tennis_odds_analysis::{
    find_arbitrage_opportunities, find_value_bets, reconcile, MarketAnalyzer,
};
use tennis_odds_core::{validate_batch, AnalysisConfig, RawOdds, RawQuote, Rejection};

fn approx(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    (a - b).abs() <= tolerance
}

#[test]
fn test_two_bookmaker_arbitrage_scenario() {
    let captured_at = Utc.with_ymd_and_hms(2024, 7, 14, 13, 0, 0).unwrap();
    let batch = validate_batch(
        vec![
            RawQuote::new("A", "Djokovic N.", "Alcaraz C.", dec!(2.10), dec!(1.80))
                .with_tournament("Wimbledon"),
            RawQuote::new("B", "Djokovic N.", "Alcaraz C.", dec!(1.90), dec!(2.10))
                .with_tournament("Wimbledon"),
        ],
        captured_at,
    );
    assert!(batch.rejections.is_empty());

    let groups = reconcile(&batch.quotes);
    assert_eq!(groups.len(), 1);

    let opportunities = find_arbitrage_opportunities(&groups, dec!(0.5));
    assert_eq!(opportunities.len(), 1);

    let opp = &opportunities[0];
    assert_eq!(opp.tournament, "Wimbledon");
    assert!(approx(opp.profit_pct, dec!(5.00), dec!(0.01)));
    assert!(approx(opp.stake1_pct, dec!(50.00), dec!(0.01)));
    assert!(approx(opp.stake2_pct, dec!(50.00), dec!(0.01)));

    let djokovic = [&opp.first_leg, &opp.second_leg]
        .into_iter()
        .find(|leg| leg.player == "Djokovic N.")
        .unwrap();
    assert_eq!(djokovic.bookmaker, "A");
    assert_eq!(djokovic.odds, dec!(2.10));

    let (payout1, payout2) = opp.payouts(dec!(100));
    assert!(approx(payout1, payout2, dec!(0.000001)));
    assert!(approx(payout1, dec!(105), dec!(0.0001)));

    // Each leg's implied probability is 1/2.10.
    assert!(approx(
        tennis_odds_core::implied_probability(opp.first_leg.odds).unwrap(),
        dec!(47.62),
        dec!(0.01)
    ));
}

#[test]
fn test_swapped_names_reconcile_and_arbitrage() {
    let batch = validate_batch(
        vec![
            RawQuote::new("A", "Djokovic N.", "Alcaraz C.", dec!(2.10), dec!(1.80)),
            RawQuote::new("B", "Alcaraz C.", "Djokovic N.", dec!(2.10), dec!(1.90)),
        ],
        Utc::now(),
    );

    let groups = reconcile(&batch.quotes);
    assert_eq!(groups.len(), 1);

    let opportunities = find_arbitrage_opportunities(&groups, dec!(0.5));
    assert_eq!(opportunities.len(), 1);
    assert!(approx(opportunities[0].profit_pct, dec!(5.00), dec!(0.01)));
}

#[test]
fn test_invalid_candidates_dropped_before_analysis() {
    let batch = validate_batch(
        vec![
            RawQuote::new("A", "X", "Y", dec!(1.95), dec!(1.95)),
            RawQuote::new("B", "X", "Y", RawOdds::from("N/A"), dec!(1.9)),
            RawQuote::new("C", "X", "X", dec!(1.9), dec!(1.9)),
            RawQuote::new("D", "X", "Y", dec!(0.95), dec!(3.0)),
        ],
        Utc::now(),
    );

    assert_eq!(batch.quotes.len(), 1);
    assert_eq!(batch.rejections.len(), 3);
    assert!(matches!(
        batch.rejections[0].reason,
        Rejection::NonNumericOdds { .. }
    ));

    let bets = find_value_bets(&batch.quotes, dec!(3.0), None);
    assert_eq!(bets.len(), 1);
    assert_eq!(bets[0].quote.bookmaker(), "A");
}

#[test]
fn test_analyzer_report_end_to_end() {
    let batch = validate_batch(
        vec![
            RawQuote::new("pinnacle", "Sinner J.", "Medvedev D.", dec!(1.45), dec!(2.90)),
            RawQuote::new("bet365", "Sinner J.", "Medvedev D.", dec!(1.40), dec!(2.85)),
            RawQuote::new("unibet", "Medvedev D.", "Sinner J.", dec!(3.10), dec!(1.38)),
            RawQuote::new("pinnacle", "Rune H.", "Fritz T.", dec!(2.00), dec!(1.85)),
        ],
        Utc::now(),
    );

    let analyzer = MarketAnalyzer::new(AnalysisConfig::default());
    let report = analyzer.report_at(&batch.quotes, Utc::now());

    assert_eq!(report.total_quotes, 4);
    assert_eq!(report.match_count, 2);
    assert_eq!(report.bookmakers, vec!["bet365", "pinnacle", "unibet"]);

    let sinner = report
        .best_odds
        .iter()
        .find(|b| b.bookmaker_count == 3)
        .unwrap();
    assert_eq!(sinner.first.player, "Medvedev D.");
    assert_eq!(sinner.first.odds, dec!(3.10));
    assert_eq!(sinner.first.bookmaker, "unibet");
    assert_eq!(sinner.second.odds, dec!(1.45));
    assert_eq!(sinner.second.bookmaker, "pinnacle");

    // 1/3.10 + 1/1.45 > 1, so no arbitrage.
    assert!(report.arbitrage.is_empty());
    assert_eq!(report.bookmaker_ranking[0].bookmaker, "pinnacle");
}
