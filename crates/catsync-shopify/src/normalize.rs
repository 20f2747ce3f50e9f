//! Normalization from a raw [`ShopifyProduct`] to a [`CatalogRow`].

use catsync_core::{CatalogRow, OptionField, OptionMapping};

use crate::error::NormalizeError;
use crate::types::{ShopifyProduct, ShopifyVariant};

/// Deduplicated option values, in order of first appearance.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct OptionValues<'a> {
    pub sizes: Vec<&'a str>,
    pub colors: Vec<&'a str>,
    pub materials: Vec<&'a str>,
}

impl<'a> OptionValues<'a> {
    fn add(&mut self, field: OptionField, value: &'a str) {
        let set = match field {
            OptionField::Size => &mut self.sizes,
            OptionField::Color => &mut self.colors,
            OptionField::Material => &mut self.materials,
        };
        if !set.contains(&value) {
            set.push(value);
        }
    }
}

/// Collects option values across every variant, keeping only the option
/// names `mapping` recognises.
#[must_use]
pub fn aggregate_options<'a>(
    variants: &'a [ShopifyVariant],
    mapping: &OptionMapping,
) -> OptionValues<'a> {
    let mut values = OptionValues::default();
    for option in variants.iter().flat_map(|v| &v.selected_options) {
        if let Some(field) = mapping.field_for(&option.name) {
            values.add(field, &option.value);
        }
    }
    values
}

/// Normalizes a raw [`ShopifyProduct`] into a [`CatalogRow`].
///
/// Price, quantity and SKU come from the **first** variant only, even when
/// other variants carry different prices or stock. Sizes, colors and
/// materials are aggregated across all variants. A product without images
/// gets `image_url = None` and an empty `image_urls` list.
///
/// # Errors
///
/// - [`NormalizeError::MissingVariant`] if the product has no variants.
/// - [`NormalizeError::MissingSku`] if the first variant's SKU is null or empty.
pub fn normalize_product(
    product: &ShopifyProduct,
    mapping: &OptionMapping,
) -> Result<CatalogRow, NormalizeError> {
    let first = product
        .variants
        .first()
        .ok_or_else(|| NormalizeError::MissingVariant {
            product_id: product.id.clone(),
        })?;

    let sku = first
        .sku
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| NormalizeError::MissingSku {
            product_id: product.id.clone(),
        })?;

    let image_urls: Vec<&str> = product
        .images
        .iter()
        .map(|image| image.original_src.as_str())
        .collect();
    let image_url = image_urls.first().map(|url| (*url).to_owned());

    let options = aggregate_options(&product.variants, mapping);

    Ok(CatalogRow {
        sku: sku.to_owned(),
        title: product.title.clone(),
        description: product.description.clone(),
        image_urls: encode_list(&product.id, "image_urls", &image_urls)?,
        image_url,
        price: first.price.clone(),
        quantity: first.inventory_quantity,
        sizes: encode_list(&product.id, "sizes", &options.sizes)?,
        colors: encode_list(&product.id, "colors", &options.colors)?,
        materials: encode_list(&product.id, "materials", &options.materials)?,
        category: product.product_type.clone(),
        status: product.status.clone(),
    })
}

/// Encodes a list as a JSON array for a single text column.
fn encode_list(
    product_id: &str,
    field: &'static str,
    values: &[&str],
) -> Result<String, NormalizeError> {
    serde_json::to_string(values).map_err(|source| NormalizeError::Encode {
        product_id: product_id.to_owned(),
        field,
        source,
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
