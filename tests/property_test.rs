//! Property tests for date arithmetic, aggregation and stock selection.

mod common;

use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use common::{MockLedger, date};
use proptest::prelude::*;
use shelfkeep::domain::clock;
use shelfkeep::domain::finance::{self, FinancialRecord};
use shelfkeep::domain::inventory;
use shelfkeep::domain::product::Product;
use shelfkeep::domain::shop::Shop;

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..20_000).prop_map(|offset| date(1990, 1, 1) + chrono::Duration::days(offset))
}

fn arb_price() -> impl Strategy<Value = f64> {
    (0u32..100_000).prop_map(|cents| f64::from(cents) / 100.0)
}

proptest! {
    #[test]
    fn advance_there_and_back(start in arb_date(), days in -5_000i64..5_000) {
        let moved = clock::advance(start, days).unwrap();
        prop_assert_eq!((moved - start).num_days(), days);
        prop_assert_eq!(clock::advance(moved, -days).unwrap(), start);
    }

    #[test]
    fn profit_is_revenue_minus_costs(
        sales in prop::collection::vec((arb_price(), arb_price()), 0..30),
    ) {
        let day = date(2024, 1, 10);
        let products: Vec<Product> = sales
            .iter()
            .map(|&(buy, sell)| {
                let mut p = Product::purchase("widget", buy, day, None);
                p.mark_sold(day, sell);
                p
            })
            .collect();

        let record = FinancialRecord::compute(&products, day);
        assert_abs_diff_eq!(record.costs + record.profit, record.revenue, epsilon = 0.011);
        prop_assert_eq!(record.costs, finance::round2(record.costs));
        prop_assert_eq!(record.profit, finance::profit(&products, day));
    }

    #[test]
    fn selected_unit_is_always_sellable(
        units in prop::collection::vec((arb_date(), prop::option::of(arb_date()), any::<bool>()), 0..20),
        today in arb_date(),
    ) {
        let products: Vec<Product> = units
            .iter()
            .map(|&(bought, expires, sold)| {
                let mut p = Product::purchase("milk", 1.0, bought, expires);
                if sold {
                    p.mark_sold(bought, 2.0);
                }
                p
            })
            .collect();

        match inventory::select_for_sale(&products, "milk", today) {
            Some(index) => prop_assert!(products[index].is_sellable(today)),
            None => prop_assert!(products.iter().all(|p| !p.is_sellable(today))),
        }
    }

    #[test]
    fn recording_a_day_keeps_one_row(repeats in 1usize..5) {
        let ledger = MockLedger::new();
        let today = date(2024, 5, 1);
        let shop = Shop::new(today, &ledger, &ledger);
        shop.buy("pear", 1.0, None).unwrap();
        shop.sell("pear", 2.5).unwrap();

        for _ in 0..repeats {
            shop.record(today).unwrap();
        }
        let records = ledger.records.borrow();
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(records[0].profit, 1.5);
    }
}
