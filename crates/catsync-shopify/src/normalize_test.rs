use super::*;
use crate::types::{SelectedOption, ShopifyImage};

fn option(name: &str, value: &str) -> SelectedOption {
    SelectedOption {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}

fn make_variant(sku: Option<&str>, price: &str, quantity: Option<i32>) -> ShopifyVariant {
    ShopifyVariant {
        price: price.to_owned(),
        inventory_quantity: quantity,
        sku: sku.map(str::to_owned),
        selected_options: vec![],
        metafields: vec![],
    }
}

fn make_product(variants: Vec<ShopifyVariant>) -> ShopifyProduct {
    ShopifyProduct {
        id: "gid://shopify/Product/123456789".to_owned(),
        title: "Linen Tee".to_owned(),
        description: "Breathable linen tee.".to_owned(),
        product_type: "Shirts".to_owned(),
        status: "ACTIVE".to_owned(),
        images: vec![
            ShopifyImage {
                original_src: "https://cdn.example.com/tee-front.jpg".to_owned(),
            },
            ShopifyImage {
                original_src: "https://cdn.example.com/tee-back.jpg".to_owned(),
            },
        ],
        variants,
    }
}

// ---------------------------------------------------------------------------
// aggregate_options
// ---------------------------------------------------------------------------

#[test]
fn aggregate_options_collapses_duplicates_and_drops_unknown_names() {
    let mut a = make_variant(Some("TEE-M-RED"), "29.00", Some(1));
    a.selected_options = vec![option("Size", "M"), option("Color", "Red")];
    let mut b = make_variant(Some("TEE-M-COT"), "29.00", Some(1));
    b.selected_options = vec![
        option("Size", "M"),
        option("Material", "Cotton"),
        option("Style", "Crew"),
    ];
    let variants = vec![a, b];

    let values = aggregate_options(&variants, &OptionMapping::default());
    assert_eq!(values.sizes, vec!["M"]);
    assert_eq!(values.colors, vec!["Red"]);
    assert_eq!(values.materials, vec!["Cotton"]);
}

#[test]
fn aggregate_options_keeps_first_appearance_order() {
    let sizes = ["S", "M", "S", "L", "M"];
    let variants: Vec<ShopifyVariant> = sizes
        .iter()
        .map(|size| {
            let mut v = make_variant(Some("X"), "1.00", None);
            v.selected_options = vec![option("Size", size)];
            v
        })
        .collect();

    let values = aggregate_options(&variants, &OptionMapping::default());
    assert_eq!(values.sizes, vec!["S", "M", "L"]);
}

#[test]
fn aggregate_options_is_case_sensitive_on_names() {
    let mut v = make_variant(Some("X"), "1.00", None);
    v.selected_options = vec![option("size", "M"), option("COLOR", "Red")];
    let variants = vec![v];
    let values = aggregate_options(&variants, &OptionMapping::default());
    assert_eq!(values, OptionValues::default());
}

#[test]
fn aggregate_options_honours_aliases() {
    let mut v = make_variant(Some("X"), "1.00", None);
    v.selected_options = vec![option("Colour", "Blue")];
    let variants = vec![v];
    let mapping = OptionMapping::default().with_alias("Colour", OptionField::Color);
    assert_eq!(aggregate_options(&variants, &mapping).colors, vec!["Blue"]);
}

// ---------------------------------------------------------------------------
// normalize_product
// ---------------------------------------------------------------------------

#[test]
fn normalize_product_takes_price_quantity_and_sku_from_first_variant() {
    let product = make_product(vec![
        make_variant(Some("TEE-S"), "29.00", Some(10)),
        make_variant(Some("TEE-L"), "31.00", Some(2)),
    ]);
    let row = normalize_product(&product, &OptionMapping::default()).unwrap();
    assert_eq!(row.sku, "TEE-S");
    assert_eq!(row.price, "29.00");
    assert_eq!(row.quantity, Some(10));
}

#[test]
fn normalize_product_serializes_lists_as_json_arrays() {
    let mut first = make_variant(Some("TEE-M"), "29.00", Some(3));
    first.selected_options = vec![
        option("Size", "M"),
        option("Color", "Red"),
        option("Size", "M"),
        option("Material", "Cotton"),
    ];
    let product = make_product(vec![first]);
    let row = normalize_product(&product, &OptionMapping::default()).unwrap();

    assert_eq!(row.sizes, r#"["M"]"#);
    assert_eq!(row.colors, r#"["Red"]"#);
    assert_eq!(row.materials, r#"["Cotton"]"#);
    assert_eq!(
        row.image_urls,
        r#"["https://cdn.example.com/tee-front.jpg","https://cdn.example.com/tee-back.jpg"]"#
    );
}

#[test]
fn normalize_product_uses_first_image_as_primary() {
    let product = make_product(vec![make_variant(Some("TEE"), "29.00", None)]);
    let row = normalize_product(&product, &OptionMapping::default()).unwrap();
    assert_eq!(
        row.image_url.as_deref(),
        Some("https://cdn.example.com/tee-front.jpg")
    );
}

#[test]
fn normalize_product_without_images_has_no_primary_image() {
    let mut product = make_product(vec![make_variant(Some("TEE"), "29.00", None)]);
    product.images.clear();
    let row = normalize_product(&product, &OptionMapping::default()).unwrap();
    assert!(row.image_url.is_none());
    assert_eq!(row.image_urls, "[]");
}

#[test]
fn normalize_product_copies_descriptive_fields() {
    let product = make_product(vec![make_variant(Some("TEE"), "29.00", None)]);
    let row = normalize_product(&product, &OptionMapping::default()).unwrap();
    assert_eq!(row.title, "Linen Tee");
    assert_eq!(row.description, "Breathable linen tee.");
    assert_eq!(row.category, "Shirts");
    assert_eq!(row.status, "ACTIVE");
    assert_eq!(row.sizes, "[]");
}

#[test]
fn normalize_product_error_when_no_variants() {
    let product = make_product(vec![]);
    let err = normalize_product(&product, &OptionMapping::default()).unwrap_err();
    assert!(matches!(err, NormalizeError::MissingVariant { .. }));
}

#[test]
fn normalize_product_error_when_first_sku_missing_or_empty() {
    for sku in [None, Some("")] {
        let product = make_product(vec![
            make_variant(sku, "29.00", None),
            make_variant(Some("TEE-L"), "29.00", None),
        ]);
        let err = normalize_product(&product, &OptionMapping::default()).unwrap_err();
        assert!(
            matches!(err, NormalizeError::MissingSku { ref product_id } if product_id.ends_with("123456789"))
        );
    }
}
