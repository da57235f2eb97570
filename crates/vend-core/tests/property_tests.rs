//! Property-based tests for machine invariants
//!
//! These tests drive random operation sequences through a machine and check:
//! - Money conservation: deposits == refunds + change + reserve + cash-outs + balance
//! - Stock bookkeeping: stock == initial + restocked - sold, never negative
//! - Log discipline: ids strictly sequential, change == tendered - price
//! - Rejections never move balance or stock

use proptest::prelude::*;
use vend_core::{Catalog, FailureKind, Money, Product, PurchaseOutcome, VendingMachine};

const CODES: [&str; 4] = ["A1", "A2", "B1", "C1"];

#[derive(Debug, Clone)]
enum Op {
    Deposit(i64),
    Purchase(&'static str),
    Refund,
    Restock(&'static str, i64),
    CashOut,
}

fn seeded_machine() -> VendingMachine {
    let mut catalog = Catalog::new();
    let products = [
        (Product::soda("A1", "Coca-Cola", Money::from_cents(150), false), 2),
        (Product::soda("A2", "Diet Coke", Money::from_cents(125), true), 0),
        (Product::juice("B1", "Orange Juice", Money::from_cents(200), "Orange"), 3),
        (Product::water("C1", "Spring Water", Money::from_cents(100), false), 1),
    ];
    for (product, qty) in products {
        catalog.add_product(product.unwrap(), qty).unwrap();
    }
    VendingMachine::new(catalog)
}

/// Strategy for product codes, including one the machine does not stock
fn code_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just(CODES[0]),
        Just(CODES[1]),
        Just(CODES[2]),
        Just(CODES[3]),
        Just("Z9"),
    ]
}

/// Strategy for machine operations (deposits may be invalid on purpose)
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-100i64..1_000).prop_map(Op::Deposit),
        4 => code_strategy().prop_map(Op::Purchase),
        1 => Just(Op::Refund),
        1 => (code_strategy(), 0i64..5).prop_map(|(c, q)| Op::Restock(c, q)),
        1 => Just(Op::CashOut),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_money_is_conserved(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut vm = seeded_machine();
        let mut deposited = 0i64;
        let mut paid_out = 0i64;
        let mut cashed_out = 0i64;

        for op in ops {
            match op {
                Op::Deposit(c) => {
                    if vm.deposit(Money::from_cents(c)).is_ok() {
                        deposited += c;
                    }
                }
                Op::Purchase(code) => {
                    let outcome = vm.purchase(code).unwrap();
                    paid_out += outcome.change().cents();
                }
                Op::Refund => paid_out += vm.refund().cents(),
                Op::Restock(code, q) => { vm.restock(code, q).unwrap(); }
                Op::CashOut => cashed_out += vm.cash_out().cents(),
            }

            prop_assert!(!vm.balance().is_negative());
            prop_assert_eq!(
                deposited,
                paid_out + vm.balance().cents() + vm.cash_reserve().cents() + cashed_out
            );
        }

        let revenue = vm.statistics().total_revenue.cents();
        prop_assert_eq!(revenue, vm.cash_reserve().cents() + cashed_out);
    }

    #[test]
    fn prop_stock_matches_sales(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut vm = seeded_machine();
        let initial: Vec<i64> = CODES.iter().map(|c| vm.catalog().stock_level(c)).collect();
        let mut restocked = [0i64; 4];

        for op in ops {
            match op {
                Op::Deposit(c) => { let _ = vm.deposit(Money::from_cents(c)); }
                Op::Purchase(code) => { vm.purchase(code).unwrap(); }
                Op::Refund => { vm.refund(); }
                Op::Restock(code, q) => {
                    if vm.restock(code, q).unwrap() {
                        let slot = CODES.iter().position(|c| *c == code).unwrap();
                        restocked[slot] += q;
                    }
                }
                Op::CashOut => { vm.cash_out(); }
            }
        }

        for (slot, code) in CODES.iter().enumerate() {
            let sold = vm
                .transactions()
                .iter()
                .filter(|t| t.is_success() && t.product_code() == *code)
                .count() as i64;
            let level = vm.catalog().stock_level(code);
            prop_assert!(level >= 0);
            prop_assert_eq!(level, initial[slot] + restocked[slot] - sold);
        }
    }

    #[test]
    fn prop_log_is_sequential_and_consistent(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut vm = seeded_machine();
        for op in ops {
            match op {
                Op::Deposit(c) => { let _ = vm.deposit(Money::from_cents(c)); }
                Op::Purchase(code) => { vm.purchase(code).unwrap(); }
                Op::Refund => { vm.refund(); }
                Op::Restock(code, q) => { vm.restock(code, q).unwrap(); }
                Op::CashOut => { vm.cash_out(); }
            }
        }

        for (i, txn) in vm.transactions().iter().enumerate() {
            prop_assert_eq!(txn.id().value(), i as u64 + 1);
            prop_assert_ne!(txn.product_code(), "Z9");
            if txn.is_success() {
                prop_assert_eq!(txn.change(), txn.amount_tendered() - txn.price());
            } else {
                prop_assert!(txn.change().is_zero());
            }
        }

        let stats = vm.statistics();
        prop_assert_eq!(stats.total, stats.successful + stats.failed);
        prop_assert!((0.0..=100.0).contains(&stats.success_rate_percent));
    }

    #[test]
    fn prop_rejections_change_nothing(
        deposit in 1i64..500,
        code in code_strategy(),
    ) {
        let mut vm = seeded_machine();
        vm.deposit(Money::from_cents(deposit)).unwrap();
        let stock_before = vm.catalog().stock_level(code);
        let logged_before = vm.transactions().len();

        let outcome = vm.purchase(code).unwrap();

        if let PurchaseOutcome::Rejected(failure) = &outcome {
            prop_assert_eq!(vm.balance().cents(), deposit);
            prop_assert_eq!(vm.catalog().stock_level(code), stock_before);
            prop_assert!(vm.cash_reserve().is_zero());

            let expected_log = if failure.kind() == FailureKind::ProductUnknown { 0 } else { 1 };
            prop_assert_eq!(vm.transactions().len(), logged_before + expected_log);

            if let Some(shortfall) = outcome.shortfall() {
                prop_assert!(shortfall.is_positive());
                prop_assert_eq!(shortfall.cents() + deposit, vm.catalog().lookup(code).unwrap().price().cents());
            }
        } else {
            prop_assert!(vm.balance().is_zero());
            prop_assert_eq!(vm.catalog().stock_level(code), stock_before - 1);
        }
    }
}
