use tradecalc::domain::{IdentityKey, Item, ItemId, ItemInstance, RawValue, Side, ValuationBasis};
use tradecalc::engine::{find_similar, group_items, SelectionStore, SimilarityQuery};
use tradecalc::Decimal;

fn item(value: serde_json::Value) -> Item {
    serde_json::from_value(value).expect("valid item")
}

fn catalog() -> Vec<Item> {
    vec![
        item(serde_json::json!({
            "id": 1, "name": "Arachnid", "type": "Vehicle",
            "cash_value": "2m", "duped_value": "1.2m", "demand": "High"
        })),
        item(serde_json::json!({
            "id": 2, "name": "Beam Hybrid", "type": "Vehicle",
            "cash_value": "1m", "duped_value": "N/A",
            "children": [
                {"id": 20, "sub_name": "Red", "cash_value": "1.5m", "duped_value": "900k"},
                {"id": 21, "sub_name": "Blue", "cash_value": "1,400,000", "duped_value": "N/A"}
            ]
        })),
        item(serde_json::json!({
            "id": 3, "name": "Celsior", "type": "Texture",
            "cash_value": 2100000, "duped_value": null, "demand": "Very High"
        })),
        item(serde_json::json!({
            "id": 4, "name": "Goldie", "type": "Texture",
            "cash_value": "N/A", "duped_value": "N/A"
        })),
    ]
}

fn instance(catalog: &[Item], id: i64, sub_name: Option<&str>) -> ItemInstance {
    catalog
        .iter()
        .find(|i| i.id == ItemId::new(id))
        .and_then(|i| i.instance(sub_name))
        .expect("catalog instance")
}

#[test]
fn test_two_sided_trade_scenario() {
    let catalog = catalog();
    let mut store = SelectionStore::new();

    store.add_item(instance(&catalog, 1, None), Side::Offering);
    store.add_item(instance(&catalog, 2, Some("Red")), Side::Requesting);
    store.add_item(instance(&catalog, 2, Some("Red")), Side::Requesting);

    let grouped = store.grouped(Side::Requesting);
    assert_eq!(grouped.len(), 1);
    assert_eq!(grouped[0].count, 2);
    assert_eq!(grouped[0].item.sub_name.as_deref(), Some("Red"));

    let comparison = store.comparison();
    assert_eq!(comparison.offering.total, Decimal::from_i64(2_000_000));
    assert_eq!(comparison.requesting.total, Decimal::from_i64(3_000_000));
    assert_eq!(comparison.difference, Decimal::from_i64(-1_000_000));

    // Valuing the requested Reds duped brings the trade in the offering's favor.
    let red = IdentityKey::with_variant(ItemId::new(2), "Red");
    store.set_basis(&red, Side::Requesting, ValuationBasis::Duped);
    let requesting = store.totals(Side::Requesting);
    assert_eq!(requesting.total, Decimal::from_i64(1_800_000));
    assert_eq!(requesting.breakdown.duped.count, 2);
    assert_eq!(requesting.breakdown.clean.count, 0);
    assert_eq!(store.comparison().difference, Decimal::from_i64(200_000));

    // Removing one Red keeps the basis choice, removing the last drops it.
    assert!(store.remove_one(&red, Side::Requesting));
    assert_eq!(store.basis_for(Side::Requesting, &red), ValuationBasis::Duped);
    assert!(store.remove_one(&red, Side::Requesting));
    assert!(store.basis_map().is_empty());
    assert!(!store.remove_one(&red, Side::Requesting));
}

#[test]
fn test_unparseable_values_count_as_zero() {
    let catalog = catalog();
    let mut store = SelectionStore::new();
    store.add_item(instance(&catalog, 4, None), Side::Offering);
    let mut odd = instance(&catalog, 1, None);
    odd.cash_value = RawValue::text("lots");
    store.add_item(odd, Side::Offering);

    let totals = store.totals(Side::Offering);
    assert_eq!(totals.total, Decimal::zero());
    assert_eq!(totals.instance_count(), 2);
}

#[test]
fn test_swap_twice_restores_store() {
    let catalog = catalog();
    let mut store = SelectionStore::new();
    store.add_item(instance(&catalog, 1, None), Side::Offering);
    store.add_item(instance(&catalog, 3, None), Side::Requesting);
    store.set_basis(&IdentityKey::base(ItemId::new(1)), Side::Offering, ValuationBasis::Duped);
    let before = store.clone();

    store.swap_sides();
    assert_eq!(store.totals(Side::Requesting), before.totals(Side::Offering));
    assert_eq!(
        store.basis_for(Side::Requesting, &IdentityKey::base(ItemId::new(1))),
        ValuationBasis::Duped
    );
    assert_eq!(
        store.comparison().difference,
        -before.comparison().difference
    );

    store.swap_sides();
    assert_eq!(store, before);
}

#[test]
fn test_mirror_is_idempotent() {
    let catalog = catalog();
    let mut store = SelectionStore::new();
    store.add_item(instance(&catalog, 2, Some("Blue")), Side::Offering);
    store.add_item(instance(&catalog, 1, None), Side::Offering);
    store.add_item(instance(&catalog, 3, None), Side::Requesting);

    store.mirror(Side::Offering);
    let once = store.clone();
    store.mirror(Side::Offering);

    assert_eq!(store, once);
    assert_eq!(store.side(Side::Requesting), store.side(Side::Offering));
    assert!(store.comparison().difference.is_zero());
}

#[test]
fn test_grouping_preserves_counts() {
    let catalog = catalog();
    let instances = vec![
        instance(&catalog, 2, Some("Red")),
        instance(&catalog, 1, None),
        instance(&catalog, 2, None),
        instance(&catalog, 2, Some("Red")),
        instance(&catalog, 1, None),
        instance(&catalog, 2, Some("Red")),
    ];

    let grouped = group_items(&instances);
    let counts: Vec<(String, usize)> = grouped
        .iter()
        .map(|g| (g.identity().to_string(), g.count))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("2-Red".to_string(), 3),
            ("1-base".to_string(), 2),
            ("2-base".to_string(), 1),
        ]
    );
    assert_eq!(grouped.iter().map(|g| g.count).sum::<usize>(), instances.len());
}

#[test]
fn test_similar_items_around_offer() {
    let catalog = catalog();
    let offered = vec![instance(&catalog, 1, None)];

    let query = SimilarityQuery::new(Decimal::from_i64(500_000), ValuationBasis::Clean);
    let results = find_similar(Decimal::from_i64(2_000_000), &catalog, &offered, &query);
    let names: Vec<String> = results
        .iter()
        .map(|r| r.candidate.identity().to_string())
        .collect();

    // Arachnid is already offered; Goldie and the base Beam Hybrid are out of range.
    assert_eq!(names, vec!["3-base", "2-Red"]);
    assert_eq!(results[0].delta, Decimal::from_i64(100_000));
    assert_eq!(results[1].delta, Decimal::from_i64(-500_000));
}
