//! Cart scenarios and invariants

use rusty_money::{
    Money,
    iso::{Currency, USD},
};
use testresult::TestResult;
use trolley::prelude::*;

fn usd(minor: i64) -> Money<'static, Currency> {
    Money::from_minor(minor, USD)
}

fn product_with_variant(product_id: &str, variant_id: &str, minor: i64) -> Product {
    Product {
        id: ProductId::from(product_id),
        name: format!("Product {product_id}"),
        category: "casual".to_string(),
        image: None,
        price: usd(minor),
        variants: vec![ProductVariant {
            id: VariantId::from(variant_id),
            product_id: ProductId::from(product_id),
            name: format!("Variant {variant_id}"),
            size: None,
            color: None,
            price: Some(usd(minor)),
            image: None,
            inventory_quantity: 10,
        }],
    }
}

fn storefront() -> Result<InMemoryCatalog, FixtureError> {
    CatalogFixture::from_set("storefront")?.into_catalog()
}

fn assert_invariants(cart: &Cart) {
    let mut subtotal = 0_i64;

    for line in cart.lines() {
        assert!(line.quantity().get() >= 1);

        subtotal += line.unit_price().to_minor_units() * i64::from(line.quantity().get());
    }

    let totals = cart.totals();

    assert_eq!(totals.subtotal(), usd(subtotal));

    let expected = totals.subtotal().to_minor_units() + totals.tax().to_minor_units()
        + totals.shipping().to_minor_units()
        - totals.discount().to_minor_units();

    assert_eq!(totals.total().to_minor_units(), expected.max(0));
    assert!(totals.total().to_minor_units() >= 0);
}

#[test]
fn single_line_below_free_shipping_threshold() -> TestResult {
    let mut cart = Cart::new(PricingPolicy::default());
    let product = product_with_variant("p1", "v1", 50_00);

    cart.add_item(&product, product.variants.first(), 1)?;

    let totals = cart.totals();

    assert_eq!(totals.subtotal(), usd(50_00));
    assert_eq!(totals.tax(), usd(4_00));
    assert_eq!(totals.shipping(), usd(10_00));
    assert_eq!(totals.total(), usd(64_00));
    assert_invariants(&cart);

    Ok(())
}

#[test]
fn subtotal_at_threshold_ships_free() -> TestResult {
    let mut cart = Cart::new(PricingPolicy::default());
    let product = product_with_variant("p1", "v1", 40_00);

    cart.add_item(&product, product.variants.first(), 3)?;

    let totals = cart.totals();

    assert_eq!(totals.subtotal(), usd(120_00));
    assert_eq!(totals.shipping(), usd(0));
    assert_eq!(totals.tax(), usd(9_60));
    assert_eq!(totals.total(), usd(129_60));
    assert_invariants(&cart);

    Ok(())
}

#[test]
fn exactly_at_threshold_ships_free() -> TestResult {
    let mut cart = Cart::new(PricingPolicy::default());
    let product = product_with_variant("p1", "v1", 100_00);

    cart.add_item(&product, None, 1)?;

    assert_eq!(cart.totals().shipping(), usd(0));

    Ok(())
}

#[test]
fn update_quantity_to_zero_removes_line() -> TestResult {
    let mut cart = Cart::new(PricingPolicy::default());
    let catalog = storefront()?;

    let scarf = catalog.lookup_product(&ProductId::from("silk-scarf"))?;
    let tote = catalog.lookup_product(&ProductId::from("canvas-tote"))?;

    let scarf_key = cart.add_item(scarf, None, 1)?;
    cart.add_item(tote, None, 2)?;

    assert!(cart.update_quantity(&scarf_key, 0)?);

    assert_eq!(cart.len(), 1);
    assert!(cart.line(&scarf_key).is_none());
    assert_eq!(cart.totals().subtotal(), usd(20_00));
    assert_eq!(cart.totals().tax(), usd(1_60));
    assert_eq!(cart.totals().total(), usd(31_60));
    assert_invariants(&cart);

    Ok(())
}

#[test]
fn negative_quantity_removes_line() -> TestResult {
    let mut cart = Cart::new(PricingPolicy::default());
    let product = product_with_variant("p1", "v1", 5_00);

    let key = cart.add_item(&product, None, 3)?;

    assert!(cart.update_quantity(&key, -2)?);
    assert!(cart.is_empty());

    Ok(())
}

#[test]
fn different_variants_are_separate_lines() -> TestResult {
    let mut cart = Cart::new(PricingPolicy::default());
    let catalog = storefront()?;

    let (dress, small) = catalog.lookup_variant(&VariantId::from("linen-dress-s"))?;
    let (_, medium) = catalog.lookup_variant(&VariantId::from("linen-dress-m"))?;

    let first = cart.add_item(dress, Some(small), 1)?;
    let second = cart.add_item(dress, Some(medium), 1)?;

    assert_ne!(first, second);
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.item_count(), 2);
    assert_invariants(&cart);

    Ok(())
}

#[test]
fn different_attributes_are_separate_lines() -> TestResult {
    let mut cart = Cart::new(PricingPolicy::default());
    let catalog = storefront()?;
    let dress = catalog.lookup_product(&ProductId::from("linen-dress"))?;

    cart.add_selection(
        dress,
        LineSelection::attributes([("size", "M"), ("color", "white")]),
        1,
    )?;
    cart.add_selection(
        dress,
        LineSelection::attributes([("size", "L"), ("color", "white")]),
        1,
    )?;

    assert_eq!(cart.len(), 2);

    Ok(())
}

#[test]
fn clear_cart_zeroes_everything() -> TestResult {
    let mut cart = Cart::new(PricingPolicy::default());
    let catalog = storefront()?;

    for product in catalog.products() {
        cart.add_item(product, None, 2)?;
    }

    cart.apply_discount(usd(15_00))?;
    cart.clear()?;

    let totals = cart.totals();

    assert!(cart.lines().is_empty());
    assert_eq!(totals.subtotal(), usd(0));
    assert_eq!(totals.tax(), usd(0));
    assert_eq!(totals.shipping(), usd(0));
    assert_eq!(totals.discount(), usd(0));
    assert_eq!(totals.total(), usd(0));

    Ok(())
}

#[test]
fn remove_twice_is_same_as_once() -> TestResult {
    let mut cart = Cart::new(PricingPolicy::default());
    let product = product_with_variant("p1", "v1", 5_00);
    let other = product_with_variant("p2", "v2", 7_00);

    let key = cart.add_item(&product, None, 1)?;
    cart.add_item(&other, None, 1)?;

    assert!(cart.remove_item(&key)?);

    let after_once = cart.clone();

    assert!(!cart.remove_item(&key)?);
    assert_eq!(cart.lines(), after_once.lines());
    assert_eq!(cart.totals(), after_once.totals());

    Ok(())
}

#[test]
fn adding_same_variant_twice_merges() -> TestResult {
    let mut cart = Cart::new(PricingPolicy::default());
    let product = product_with_variant("p1", "v1", 5_00);
    let variant = product.variants.first();

    cart.add_item(&product, variant, 2)?;
    let key = cart.add_item(&product, variant, 3)?;

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.line(&key).map(|line| line.quantity().get()), Some(5));
    assert_invariants(&cart);

    Ok(())
}

#[test]
fn large_discount_clamps_total_at_zero() -> TestResult {
    let mut cart = Cart::new(PricingPolicy::default());
    let product = product_with_variant("p1", "v1", 5_00);

    cart.add_item(&product, None, 1)?;
    cart.apply_discount(usd(500_00))?;

    assert_eq!(cart.totals().discount(), usd(500_00));
    assert_eq!(cart.totals().total(), usd(0));
    assert_invariants(&cart);

    Ok(())
}

#[test]
fn percentage_discount_resolves_against_subtotal() -> TestResult {
    let mut cart = Cart::new(PricingPolicy::default());
    let product = product_with_variant("p1", "v1", 80_00);

    cart.add_item(&product, None, 1)?;

    let discount = Discount::PercentageOff(trolley::fixtures::products::parse_percentage("10%")?);
    cart.apply_discount(discount.amount_for(&cart.totals().subtotal())?)?;

    // 80.00 + 6.40 tax + 10.00 shipping - 8.00
    assert_eq!(cart.totals().total(), usd(88_40));

    Ok(())
}

#[test]
fn invariants_hold_across_a_mixed_sequence() -> TestResult {
    let mut cart = Cart::new(PricingPolicy::default());
    let catalog = storefront()?;

    let (coat, camel) = catalog.lookup_variant(&VariantId::from("wool-coat-camel"))?;
    let (dress, xl) = catalog.lookup_variant(&VariantId::from("linen-dress-xl"))?;
    let tote = catalog.lookup_product(&ProductId::from("canvas-tote"))?;

    let coat_key = cart.add_item(coat, Some(camel), 1)?;
    assert_invariants(&cart);

    let dress_key = cart.add_item(dress, Some(xl), 2)?;
    assert_invariants(&cart);

    cart.add_item(tote, None, 4)?;
    assert_invariants(&cart);

    cart.update_quantity(&dress_key, 1)?;
    assert_invariants(&cart);

    cart.apply_discount(usd(12_34))?;
    assert_invariants(&cart);

    cart.remove_item(&coat_key)?;
    assert_invariants(&cart);

    assert_eq!(cart.item_count(), 5);
    assert_eq!(cart.totals().subtotal(), usd(89_00));

    Ok(())
}
