use super::*;
use crate::products::placeholder_image_url;

fn product(id: &str, price: &str, category: &str, brand: &str, rating: Option<f64>) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        description: "test".to_string(),
        price: price.to_string(),
        features: vec![],
        category: category.to_string(),
        brand: brand.to_string(),
        rating,
        release_date: "2025-01-01".to_string(),
        image_url: placeholder_image_url(id),
    }
}

fn ids(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.id.as_str()).collect()
}

fn sample() -> Vec<Product> {
    vec![
        product("1", "$899-$1099", "Electronics", "TechBrand", Some(4.5)),
        product("2", "$1299-$1899", "Electronics", "CompuTech", Some(4.7)),
        product("3", "$249-$299", "Audio", "SoundMax", Some(4.4)),
        product("4", "$199-$249", "Wearables", "FitTech", Some(4.2)),
    ]
}

// -----------------------------------------------------------------------
// PriceRange
// -----------------------------------------------------------------------

#[test]
fn price_range_rejects_inverted_bounds() {
    let err = PriceRange::new(500, 100).unwrap_err();
    assert!(matches!(
        err,
        CoreError::InvalidPriceRange { min: 500, max: 100 }
    ));
}

#[test]
fn price_range_default_is_slider_span() {
    let range = PriceRange::default();
    assert_eq!((range.min(), range.max()), (0, 2000));
}

#[test]
fn price_range_uses_interval_overlap() {
    let range = PriceRange::new(300, 1000).unwrap();
    assert!(!range.admits("$249-$299"));
    assert!(range.admits("$249-$300"), "touching lower bound is inclusive");
    assert!(range.admits("$1000"), "touching upper bound is inclusive");
    assert!(!range.admits("$1001-$1500"));
    assert!(range.admits("$100-$5000"), "range spanning the window overlaps");
}

#[test]
fn price_range_fails_open_on_unparsable_price() {
    let range = PriceRange::new(0, 10).unwrap();
    assert!(range.admits("Contact seller"));
    assert!(range.admits(""));
}

#[test]
fn price_range_matches_overlap_for_many_intervals() {
    let windows = [(0, 0), (0, 500), (250, 260), (300, 2000), (1200, 1200)];
    let prices = [(0, 0), (249, 299), (1200, 1200), (10, 5000), (300, 300)];
    for (lo, hi) in windows {
        let range = PriceRange::new(lo, hi).unwrap();
        for (pmin, pmax) in prices {
            let text = if pmin == pmax {
                format!("${pmin}")
            } else {
                format!("${pmin}-${pmax}")
            };
            let expected = pmax >= lo && pmin <= hi;
            assert_eq!(
                range.admits(&text),
                expected,
                "price {text} against [{lo}, {hi}]"
            );
        }
    }
}

// -----------------------------------------------------------------------
// Category / brand filters
// -----------------------------------------------------------------------

#[test]
fn empty_selections_match_everything() {
    let filters = ProductFilters::default();
    assert_eq!(ids(&filters.apply(sample())), vec!["1", "2", "3", "4"]);
}

#[test]
fn category_filter_is_a_subset() {
    let filters = ProductFilters {
        categories: vec!["Electronics".to_string(), "Audio".to_string()],
        ..ProductFilters::default()
    };
    let out = filters.apply(sample());
    assert_eq!(ids(&out), vec!["1", "3"]);
    assert!(out.iter().all(|p| filters.categories.contains(&p.category)));
}

#[test]
fn brand_filter_is_a_subset() {
    let filters = ProductFilters {
        brands: vec!["FitTech".to_string()],
        ..ProductFilters::default()
    };
    let out = filters.apply(sample());
    assert_eq!(ids(&out), vec!["4"]);
}

#[test]
fn category_and_brand_filters_combine() {
    let filters = ProductFilters {
        categories: vec!["Electronics".to_string()],
        brands: vec!["SoundMax".to_string()],
        ..ProductFilters::default()
    };
    assert!(filters.apply(sample()).is_empty());
}

#[test]
fn unknown_category_selection_yields_nothing() {
    let filters = ProductFilters {
        categories: vec!["Photography".to_string()],
        ..ProductFilters::default()
    };
    assert!(filters.apply(sample()).is_empty());
}

#[test]
fn headphones_scenario_keeps_only_affordable_item() {
    let results = vec![
        product("a", "$249-$299", "Audio", "SoundMax", Some(4.4)),
        product("b", "$1200", "Audio", "StudioPro", Some(4.9)),
    ];
    let filters = ProductFilters {
        price_range: PriceRange::new(0, 500).unwrap(),
        ..ProductFilters::default()
    };
    assert_eq!(ids(&filters.apply(results)), vec!["a"]);
}

// -----------------------------------------------------------------------
// Sorting
// -----------------------------------------------------------------------

#[test]
fn relevance_keeps_provider_order() {
    let mut products = sample();
    products.reverse();
    SortKey::Relevance.sort(&mut products);
    assert_eq!(ids(&products), vec!["4", "3", "2", "1"]);
}

#[test]
fn price_low_and_high_are_reverses_for_distinct_prices() {
    let mut low = sample();
    SortKey::PriceLow.sort(&mut low);
    assert_eq!(ids(&low), vec!["4", "3", "1", "2"]);

    let mut high = sample();
    SortKey::PriceHigh.sort(&mut high);
    let mut reversed = ids(&low);
    reversed.reverse();
    assert_eq!(ids(&high), reversed);
}

#[test]
fn price_sorts_are_stable_for_equal_prices() {
    let products = vec![
        product("x", "$100", "A", "B", None),
        product("y", "$50", "A", "B", None),
        product("z", "$100-$900", "A", "B", None),
        product("w", "$100", "A", "B", None),
    ];

    let mut low = products.clone();
    SortKey::PriceLow.sort(&mut low);
    assert_eq!(ids(&low), vec!["y", "x", "z", "w"]);

    let mut high = products;
    SortKey::PriceHigh.sort(&mut high);
    assert_eq!(ids(&high), vec!["x", "z", "w", "y"]);
}

#[test]
fn unparsable_prices_sort_as_zero() {
    let mut products = vec![
        product("p", "$10", "A", "B", None),
        product("q", "Contact seller", "A", "B", None),
    ];
    SortKey::PriceLow.sort(&mut products);
    assert_eq!(ids(&products), vec!["q", "p"]);
}

#[test]
fn rating_sort_is_descending_and_stable() {
    let mut products = vec![
        product("a", "$1", "A", "B", Some(4.0)),
        product("b", "$1", "A", "B", Some(4.8)),
        product("c", "$1", "A", "B", None),
        product("d", "$1", "A", "B", Some(4.0)),
    ];
    SortKey::Rating.sort(&mut products);
    assert_eq!(ids(&products), vec!["b", "a", "d", "c"]);
}

#[test]
fn sort_key_parses_finder_values() {
    assert_eq!("relevance".parse::<SortKey>().unwrap(), SortKey::Relevance);
    assert_eq!("price-low".parse::<SortKey>().unwrap(), SortKey::PriceLow);
    assert_eq!("price-high".parse::<SortKey>().unwrap(), SortKey::PriceHigh);
    assert_eq!("rating".parse::<SortKey>().unwrap(), SortKey::Rating);
    assert!(matches!(
        "newest".parse::<SortKey>(),
        Err(CoreError::UnknownSortKey(ref k)) if k == "newest"
    ));
}

#[test]
fn apply_filters_before_sorting() {
    let filters = ProductFilters {
        price_range: PriceRange::new(0, 1000).unwrap(),
        sort: SortKey::Rating,
        ..ProductFilters::default()
    };
    assert_eq!(ids(&filters.apply(sample())), vec!["1", "3", "4"]);
}

// -----------------------------------------------------------------------
// Selections and criteria
// -----------------------------------------------------------------------

#[test]
fn toggle_adds_then_removes() {
    let mut filters = ProductFilters::default();
    assert!(filters.toggle_category("Audio"));
    assert!(filters.toggle_category("Wearables"));
    assert_eq!(filters.categories, vec!["Audio", "Wearables"]);
    assert!(!filters.toggle_category("Audio"));
    assert_eq!(filters.categories, vec!["Wearables"]);

    assert!(filters.toggle_brand("SoundMax"));
    assert!(!filters.toggle_brand("SoundMax"));
    assert!(filters.brands.is_empty());
}

#[test]
fn criteria_without_selections_has_only_price_clause() {
    let filters = ProductFilters::default();
    assert_eq!(
        build_criteria("  laptop  ", &filters),
        "laptop with price range $0-$2000"
    );
}

#[test]
fn criteria_includes_category_and_brand_clauses() {
    let filters = ProductFilters {
        price_range: PriceRange::new(0, 500).unwrap(),
        categories: vec!["Audio".to_string()],
        brands: vec!["SoundMax".to_string(), "FitTech".to_string()],
        sort: SortKey::Relevance,
    };
    assert_eq!(
        build_criteria("headphones", &filters),
        "headphones with price range $0-$500 in categories: Audio from brands: SoundMax, FitTech"
    );
}
