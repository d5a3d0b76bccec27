//! End-to-end test: bootstrap a basket of issuer curves from CDS quotes,
//! then calibrate the basket to a traded index term structure and verify
//! every tenor reprices.

use approx::assert_relative_eq;
use intrinsic_core::types::Date;
use intrinsic_credit::prelude::*;

const RECOVERY_RATE: f64 = 0.40;
const TOLERANCE: f64 = 1e-10;

struct Market {
    valuation_date: Date,
    step_in_date: Date,
    maturities: Vec<Date>,
    curves: IssuerCurveSet,
    discount: FlatDiscountCurve,
}

/// A 10-name basket with heterogeneous, upward-sloping spread curves,
/// bootstrapped at the standard 3Y/5Y/7Y/10Y index tenors.
fn build_market() -> Market {
    let valuation_date = Date::from_ymd(2007, 8, 1).unwrap();
    let step_in_date = valuation_date.add_days(1);
    let discount = FlatDiscountCurve::new(valuation_date, 0.05);

    let maturities: Vec<Date> = [36, 60, 84, 120]
        .iter()
        .map(|&months| valuation_date.next_cds_date(months).unwrap())
        .collect();

    let mut curves = Vec::new();
    for issuer in 0..10 {
        // Spreads fan out across issuers and slope upward in tenor
        let base = 0.0015 + 0.0006 * f64::from(issuer);
        let quotes: Vec<CdsQuote> = maturities
            .iter()
            .enumerate()
            .map(|(t, &maturity)| CdsQuote::new(maturity, base * (1.0 + 0.35 * t as f64)))
            .collect();

        let curve = bootstrap_curve(
            valuation_date,
            step_in_date,
            &quotes,
            &discount,
            RECOVERY_RATE,
        )
        .unwrap();
        curves.push(curve);
    }

    Market {
        valuation_date,
        step_in_date,
        maturities,
        curves: IssuerCurveSet::new(curves).unwrap(),
        discount,
    }
}

fn index_quotes(market: &Market) -> Vec<IndexQuote> {
    let coupons = [0.0020, 0.0037, 0.0050, 0.0063];
    market
        .maturities
        .iter()
        .zip(coupons)
        .map(|(&maturity, coupon)| IndexQuote::new(maturity, coupon))
        .collect()
}

fn intrinsic_at(market: &Market, curves: &IssuerCurveSet, maturity: Date) -> f64 {
    IndexAggregator::new()
        .intrinsic_spread(
            market.valuation_date,
            market.step_in_date,
            maturity,
            curves,
            &market.discount,
        )
        .unwrap()
}

#[test]
fn adjusted_basket_reprices_every_index_tenor() {
    let market = build_market();
    let quotes = index_quotes(&market);

    let adjusted = adjust_curves_to_index(
        market.valuation_date,
        market.step_in_date,
        &market.curves,
        &quotes,
        RECOVERY_RATE,
        TOLERANCE,
        &market.discount,
    )
    .unwrap();

    // Every tenor must hit its quote, including the early ones after the
    // later tenors were solved
    for quote in &quotes {
        let intrinsic = intrinsic_at(&market, &adjusted, quote.maturity_date);
        assert_relative_eq!(intrinsic, quote.coupon, epsilon = 1e-6);
    }
}

#[test]
fn adjustment_moves_spreads_toward_quotes() {
    let market = build_market();
    let quotes = index_quotes(&market);

    let before: Vec<f64> = quotes
        .iter()
        .map(|q| intrinsic_at(&market, &market.curves, q.maturity_date))
        .collect();

    let adjusted = adjust_curves_to_index(
        market.valuation_date,
        market.step_in_date,
        &market.curves,
        &quotes,
        RECOVERY_RATE,
        TOLERANCE,
        &market.discount,
    )
    .unwrap();

    for (quote, &unadjusted) in quotes.iter().zip(&before) {
        let after = intrinsic_at(&market, &adjusted, quote.maturity_date);
        assert!((after - quote.coupon).abs() < (unadjusted - quote.coupon).abs());
    }
}

#[test]
fn adjustment_is_idempotent() {
    let market = build_market();
    let quotes = index_quotes(&market);

    let once = adjust_curves_to_index(
        market.valuation_date,
        market.step_in_date,
        &market.curves,
        &quotes,
        RECOVERY_RATE,
        TOLERANCE,
        &market.discount,
    )
    .unwrap();

    let twice = adjust_curves_to_index(
        market.valuation_date,
        market.step_in_date,
        &once,
        &quotes,
        RECOVERY_RATE,
        TOLERANCE,
        &market.discount,
    )
    .unwrap();

    for (a, b) in once.curves().iter().zip(twice.curves()) {
        for &maturity in &market.maturities {
            assert_relative_eq!(
                a.survival_probability(maturity),
                b.survival_probability(maturity),
                epsilon = 1e-8
            );
        }
    }
}

#[test]
fn average_spread_exceeds_intrinsic_for_dispersed_basket() {
    let market = build_market();
    let maturity = market.maturities[1];

    let aggregator = IndexAggregator::new();
    let average = aggregator
        .average_spread(
            market.valuation_date,
            market.step_in_date,
            maturity,
            &market.curves,
            &market.discount,
        )
        .unwrap();
    let intrinsic = intrinsic_at(&market, &market.curves, maturity);

    assert!(average > intrinsic);
    assert_relative_eq!(average, intrinsic, max_relative = 0.10);
}

#[test]
fn input_curves_survive_adjustment_unchanged() {
    let market = build_market();
    let quotes = index_quotes(&market);
    let snapshot = market.curves.clone();

    let _ = adjust_curves_to_index(
        market.valuation_date,
        market.step_in_date,
        &market.curves,
        &quotes,
        RECOVERY_RATE,
        TOLERANCE,
        &market.discount,
    )
    .unwrap();

    assert_eq!(market.curves, snapshot);
}

#[test]
fn homogeneous_basket_average_equals_quoted_spread() {
    // Five identical curves bootstrapped from a single 60bp 5Y quote:
    // the basket average spread must reproduce the quote
    let valuation_date = Date::from_ymd(2024, 1, 2).unwrap();
    let step_in_date = valuation_date.add_days(1);
    let maturity = valuation_date.next_cds_date(60).unwrap();
    let discount = FlatDiscountCurve::new(valuation_date, 0.05);

    let quotes = vec![CdsQuote::new(maturity, 0.0060)];
    let curve = bootstrap_curve(
        valuation_date,
        step_in_date,
        &quotes,
        &discount,
        RECOVERY_RATE,
    )
    .unwrap();
    let curves = IssuerCurveSet::new(vec![curve; 5]).unwrap();

    let average = IndexAggregator::new()
        .average_spread(valuation_date, step_in_date, maturity, &curves, &discount)
        .unwrap();

    assert_relative_eq!(average, 0.0060, epsilon = 1e-6);
}

#[test]
fn homogeneous_basket_with_term_structure_recovers_five_year_quote() {
    // Five identical curves bootstrapped from the full 50/60/70/80bp
    // term structure under a zero discount rate: the 5Y basket average
    // must come back as the quoted 60bp
    let valuation_date = Date::from_ymd(2024, 1, 2).unwrap();
    let step_in_date = valuation_date.add_days(1);
    let discount = FlatDiscountCurve::new(valuation_date, 0.0);

    let spreads = [0.0050, 0.0060, 0.0070, 0.0080];
    let quotes: Vec<CdsQuote> = [36, 60, 84, 120]
        .iter()
        .zip(spreads)
        .map(|(&months, spread)| {
            CdsQuote::new(valuation_date.next_cds_date(months).unwrap(), spread)
        })
        .collect();

    let curve = bootstrap_curve(
        valuation_date,
        step_in_date,
        &quotes,
        &discount,
        RECOVERY_RATE,
    )
    .unwrap();
    let curves = IssuerCurveSet::new(vec![curve; 5]).unwrap();

    let five_year = quotes[1].maturity_date;
    let average = IndexAggregator::new()
        .average_spread(valuation_date, step_in_date, five_year, &curves, &discount)
        .unwrap();

    assert_relative_eq!(average, 0.0060, epsilon = 1e-6);
}

#[test]
fn out_of_order_index_quotes_are_rejected() {
    let market = build_market();
    let mut quotes = index_quotes(&market);
    quotes.swap(1, 2);

    let result = adjust_curves_to_index(
        market.valuation_date,
        market.step_in_date,
        &market.curves,
        &quotes,
        RECOVERY_RATE,
        TOLERANCE,
        &market.discount,
    );

    assert!(matches!(
        result,
        Err(CreditError::InvalidQuoteOrdering { index: 2, .. })
    ));
}

#[test]
fn bootstrapped_curves_reprice_their_quotes() {
    let market = build_market();

    // Spot-check the widest issuer at the 10Y tenor
    let widest = &market.curves.curves()[9];
    let quoted = (0.0015 + 0.0006 * 9.0) * (1.0 + 0.35 * 3.0);
    let cds = CdsContract::new(market.step_in_date, market.maturities[3], quoted);

    let par = cds
        .par_spread(market.valuation_date, widest, &market.discount)
        .unwrap();
    assert_relative_eq!(par, quoted, epsilon = 1e-9);
}
