//! Balance engine: on-hand quantities derived from the movement ledger.
//!
//! For a product `p` at a location `l`:
//!
//! ```text
//! balance(p, l) = Σ qty (to = l, product = p) − Σ qty (from = l, product = p)
//! ```
//!
//! Balances are never stored. Only strictly positive balances are surfaced;
//! a negative balance is legal in the ledger (over-withdrawal) and simply
//! not shown.

use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use stockroom_core::{LocationId, ProductId};
use stockroom_locations::Location;
use stockroom_products::Product;

use crate::movement::Movement;

/// One row of the balance view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub product_id: ProductId,
    pub product_name: String,
    pub location_id: LocationId,
    pub location_name: String,
    pub balance: i64,
}

/// Net quantity per (product, location) over the whole ledger, including
/// zero and negative totals.
pub fn net_quantities<'a, I>(movements: I) -> HashMap<(ProductId, LocationId), i64>
where
    I: IntoIterator<Item = &'a Movement>,
{
    let mut net: HashMap<(ProductId, LocationId), i64> = HashMap::new();
    for m in movements {
        let qty = m.qty.get();
        if let Some(to) = &m.to_location {
            *net.entry((m.product_id.clone(), to.clone())).or_insert(0) += qty;
        }
        if let Some(from) = &m.from_location {
            *net.entry((m.product_id.clone(), from.clone())).or_insert(0) -= qty;
        }
    }
    net
}

/// Positive balances for every product × location pair, products outermost,
/// both in the order given.
///
/// The ledger is tallied once up front; rows are then produced lazily.
pub fn compute_balances<'a>(
    products: &'a [Product],
    locations: &'a [Location],
    movements: &[Movement],
) -> impl Iterator<Item = Balance> + use<'a> {
    let net = Rc::new(net_quantities(movements));
    products.iter().flat_map(move |product| {
        let net = Rc::clone(&net);
        locations.iter().filter_map(move |location| {
            let key = (product.product_id.clone(), location.location_id.clone());
            let balance = net.get(&key).copied().unwrap_or(0);
            (balance > 0).then(|| Balance {
                product_id: product.product_id.clone(),
                product_name: product.name.clone(),
                location_id: location.location_id.clone(),
                location_name: location.name.clone(),
                balance,
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::MovementInput;
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;
    use stockroom_core::{MovementId, Quantity};
    use stockroom_locations::NewLocation;
    use stockroom_products::NewProduct;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn product(id: &str) -> Product {
        NewProduct {
            product_id: id.to_string(),
            name: format!("Product {id}"),
            description: None,
        }
        .validate()
        .unwrap()
    }

    fn location(id: &str) -> Location {
        NewLocation {
            location_id: id.to_string(),
            name: format!("Location {id}"),
            address: None,
        }
        .validate()
        .unwrap()
    }

    fn movement(
        id: &str,
        product: &str,
        from: Option<&str>,
        to: Option<&str>,
        qty: i64,
    ) -> Movement {
        MovementInput {
            product_id: product.to_string(),
            from_location: from.map(str::to_string),
            to_location: to.map(str::to_string),
            qty,
            timestamp: None,
        }
        .validate()
        .unwrap()
        .into_movement(MovementId::parse(id).unwrap(), t0())
    }

    /// Per-pair double sum, straight from the definition.
    fn naive(movements: &[Movement], p: &ProductId, l: &LocationId) -> i64 {
        let incoming: i64 = movements
            .iter()
            .filter(|m| &m.product_id == p && m.to_location.as_ref() == Some(l))
            .map(|m| m.qty.get())
            .sum();
        let outgoing: i64 = movements
            .iter()
            .filter(|m| &m.product_id == p && m.from_location.as_ref() == Some(l))
            .map(|m| m.qty.get())
            .sum();
        incoming - outgoing
    }

    #[test]
    fn receipt_then_transfer() {
        let products = vec![product("P001")];
        let locations = vec![location("L001"), location("L002")];
        let movements = vec![
            movement("M1", "P001", None, Some("L001"), 50),
            movement("M2", "P001", Some("L001"), Some("L002"), 10),
        ];

        let rows: Vec<_> = compute_balances(&products, &locations, &movements).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].location_id.as_str(), "L001");
        assert_eq!(rows[0].balance, 40);
        assert_eq!(rows[0].product_name, "Product P001");
        assert_eq!(rows[1].location_id.as_str(), "L002");
        assert_eq!(rows[1].balance, 10);
    }

    #[test]
    fn issue_only_movement_is_a_pure_decrement() {
        let products = vec![product("P001")];
        let locations = vec![location("L001")];
        let movements = vec![
            movement("M1", "P001", None, Some("L001"), 20),
            movement("M2", "P001", Some("L001"), None, 5),
        ];

        let rows: Vec<_> = compute_balances(&products, &locations, &movements).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].balance, 15);
    }

    #[test]
    fn zero_and_negative_balances_are_suppressed() {
        let products = vec![product("P001"), product("P002")];
        let locations = vec![location("L001"), location("L002")];
        let movements = vec![
            movement("M1", "P001", None, Some("L001"), 5),
            movement("M2", "P001", Some("L001"), None, 5),
            movement("M3", "P002", Some("L002"), None, 3),
        ];

        assert_eq!(compute_balances(&products, &locations, &movements).count(), 0);

        let net = net_quantities(&movements);
        let key = (
            ProductId::parse("P002").unwrap(),
            LocationId::parse("L002").unwrap(),
        );
        assert_eq!(net.get(&key), Some(&-3));
    }

    #[test]
    fn empty_ledger_yields_nothing() {
        let products = vec![product("P001")];
        let locations = vec![location("L001")];
        assert_eq!(compute_balances(&products, &locations, &[]).count(), 0);
    }

    #[test]
    fn receipts_at_the_quantity_cap_add_up() {
        let products = vec![product("P001")];
        let locations = vec![location("L001")];
        let max = Quantity::MAX;
        let ledger = vec![
            movement("M1", "P001", None, Some("L001"), max),
            movement("M2", "P001", None, Some("L001"), max),
            movement("M3", "P001", None, Some("L001"), max),
        ];

        let rows: Vec<_> = compute_balances(&products, &locations, &ledger).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].balance, 3 * max);
    }

    fn arb_side() -> impl Strategy<Value = Option<&'static str>> {
        prop::option::of(prop::sample::select(vec!["L1", "L2", "L3"]))
    }

    fn arb_movements() -> impl Strategy<Value = Vec<Movement>> {
        prop::collection::vec(
            (prop::sample::select(vec!["P1", "P2"]), arb_side(), arb_side(), 1i64..500),
            0..40,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .filter(|(_, (_, from, to, _))| from.is_some() || to.is_some())
                .map(|(i, (p, from, to, qty))| movement(&format!("M{i}"), p, from, to, qty))
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: every surfaced row is positive and equals the double-sum definition,
        /// and every positive pair is surfaced.
        #[test]
        fn matches_naive_double_sum(movements in arb_movements()) {
            let products = vec![product("P1"), product("P2")];
            let locations = vec![location("L1"), location("L2"), location("L3")];

            let rows: Vec<_> = compute_balances(&products, &locations, &movements).collect();
            for row in &rows {
                prop_assert!(row.balance > 0);
                prop_assert_eq!(row.balance, naive(&movements, &row.product_id, &row.location_id));
            }

            let expected = products
                .iter()
                .flat_map(|p| locations.iter().map(move |l| (p, l)))
                .filter(|(p, l)| naive(&movements, &p.product_id, &l.location_id) > 0)
                .count();
            prop_assert_eq!(rows.len(), expected);
        }

        /// Property: per product, the net over all locations equals receipts minus issues;
        /// transfers between two locations cancel out.
        #[test]
        fn transfers_conserve_totals(movements in arb_movements()) {
            let net = net_quantities(&movements);
            for p in ["P1", "P2"] {
                let pid = ProductId::parse(p).unwrap();
                let total: i64 = net
                    .iter()
                    .filter(|((prod, _), _)| prod == &pid)
                    .map(|(_, v)| *v)
                    .sum();
                let receipts: i64 = movements
                    .iter()
                    .filter(|m| m.product_id == pid && m.from_location.is_none())
                    .map(|m| m.qty.get())
                    .sum();
                let issues: i64 = movements
                    .iter()
                    .filter(|m| m.product_id == pid && m.to_location.is_none())
                    .map(|m| m.qty.get())
                    .sum();
                prop_assert_eq!(total, receipts - issues);
            }
        }
    }
}
