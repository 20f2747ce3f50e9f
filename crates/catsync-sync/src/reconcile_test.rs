use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use catsync_db::DbError;
use catsync_shopify::types::SelectedOption;
use catsync_shopify::{ShopifyImage, ShopifyVariant};

use super::*;

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Write {
    Insert(String),
    Update(String),
    Delete(Vec<String>),
}

#[derive(Default)]
struct MemoryStore {
    rows: Mutex<BTreeMap<String, CatalogRow>>,
    writes: Mutex<Vec<Write>>,
    fail_writes_for: HashSet<String>,
    fail_list: bool,
    fail_delete: bool,
}

impl MemoryStore {
    fn with_rows(rows: impl IntoIterator<Item = CatalogRow>) -> Self {
        let store = Self::default();
        {
            let mut map = store.rows.lock().unwrap();
            for row in rows {
                map.insert(row.sku.clone(), row);
            }
        }
        store
    }

    fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    fn clear_writes(&self) {
        self.writes.lock().unwrap().clear();
    }

    fn skus(&self) -> Vec<String> {
        self.rows.lock().unwrap().keys().cloned().collect()
    }

    fn get(&self, sku: &str) -> Option<CatalogRow> {
        self.rows.lock().unwrap().get(sku).cloned()
    }
}

fn injected_failure() -> DbError {
    DbError::Sqlx(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_skus(&self) -> Result<Vec<String>, DbError> {
        if self.fail_list {
            return Err(injected_failure());
        }
        Ok(self.skus())
    }

    async fn delete_skus(&self, skus: &[String]) -> Result<u64, DbError> {
        if self.fail_delete {
            return Err(injected_failure());
        }
        self.writes.lock().unwrap().push(Write::Delete(skus.to_vec()));
        let mut rows = self.rows.lock().unwrap();
        let removed = skus.iter().filter(|sku| rows.remove(*sku).is_some()).count();
        Ok(removed as u64)
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Option<CatalogRow>, DbError> {
        Ok(self.get(sku))
    }

    async fn update_row(&self, row: &CatalogRow) -> Result<(), DbError> {
        if self.fail_writes_for.contains(&row.sku) {
            return Err(injected_failure());
        }
        self.writes.lock().unwrap().push(Write::Update(row.sku.clone()));
        self.rows.lock().unwrap().insert(row.sku.clone(), row.clone());
        Ok(())
    }

    async fn insert_row(&self, row: &CatalogRow) -> Result<bool, DbError> {
        if self.fail_writes_for.contains(&row.sku) {
            return Err(injected_failure());
        }
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&row.sku) {
            return Ok(false);
        }
        self.writes.lock().unwrap().push(Write::Insert(row.sku.clone()));
        rows.insert(row.sku.clone(), row.clone());
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn option(name: &str, value: &str) -> SelectedOption {
    SelectedOption {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn variant(sku: Option<&str>, quantity: Option<i32>) -> ShopifyVariant {
    ShopifyVariant {
        price: "29.00".to_string(),
        inventory_quantity: quantity,
        sku: sku.map(str::to_string),
        selected_options: vec![option("Size", "M"), option("Color", "Red")],
        metafields: vec![],
    }
}

fn product(id: u32, sku: &str, quantity: i32) -> ShopifyProduct {
    ShopifyProduct {
        id: format!("gid://shopify/Product/{id}"),
        title: format!("Product {id}"),
        description: String::new(),
        product_type: "Shirts".to_string(),
        status: "ACTIVE".to_string(),
        images: vec![ShopifyImage {
            original_src: format!("https://cdn.example.com/{id}.jpg"),
        }],
        variants: vec![variant(Some(sku), Some(quantity))],
    }
}

fn normalized(product: &ShopifyProduct) -> CatalogRow {
    normalize_product(product, &OptionMapping::default()).unwrap()
}

async fn run(store: &MemoryStore, products: Vec<ShopifyProduct>) -> ReconcileSummary {
    reconcile(store, products, &OptionMapping::default())
        .await
        .expect("reconcile failed")
        .summary
}

// ---------------------------------------------------------------------------
// Inserts, updates, deletes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_remote_sku_is_inserted_with_its_normalization() {
    let store = MemoryStore::default();
    let remote = product(1, "SKU-1", 10);
    let expected = normalized(&remote);

    let summary = run(&store, vec![remote]).await;

    assert_eq!(summary.inserted, 1);
    assert_eq!(store.writes(), vec![Write::Insert("SKU-1".to_string())]);
    assert_eq!(store.get("SKU-1"), Some(expected));
}

#[tokio::test]
async fn local_sku_missing_remotely_is_deleted() {
    let keep = product(1, "SKU-1", 10);
    let store = MemoryStore::with_rows([normalized(&keep), normalized(&product(2, "SKU-2", 1))]);

    let summary = run(&store, vec![keep]).await;

    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(store.skus(), vec!["SKU-1"]);
    assert_eq!(store.writes(), vec![Write::Delete(vec!["SKU-2".to_string()])]);
}

#[tokio::test]
async fn quantity_only_change_yields_exactly_one_update() {
    let store = MemoryStore::with_rows([normalized(&product(1, "SKU-1", 10))]);

    let summary = run(&store, vec![product(1, "SKU-1", 7)]).await;

    assert_eq!(store.writes(), vec![Write::Update("SKU-1".to_string())]);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.inserted, 0);
    assert_eq!(summary.deleted, 0);
    assert_eq!(store.get("SKU-1").unwrap().quantity, Some(7));
}

#[tokio::test]
async fn empty_remote_catalog_deletes_every_local_row() {
    let store = MemoryStore::with_rows(
        (1..=3).map(|n| normalized(&product(n, &format!("SKU-{n}"), 1))),
    );

    let summary = run(&store, vec![]).await;

    assert_eq!(summary.deleted, 3);
    assert_eq!(summary.inserted + summary.updated, 0);
    assert!(store.skus().is_empty());
    assert_eq!(store.writes().len(), 1, "deletes go out as one statement");
}

#[tokio::test]
async fn second_run_over_unchanged_catalog_writes_nothing() {
    let store = MemoryStore::with_rows([normalized(&product(9, "SKU-OLD", 1))]);
    let catalog = vec![product(1, "SKU-1", 10), product(2, "SKU-2", 3)];

    let first = run(&store, catalog.clone()).await;
    assert_eq!(first.writes(), 3);

    store.clear_writes();
    let second = run(&store, catalog).await;

    assert!(store.writes().is_empty(), "got {:?}", store.writes());
    assert_eq!(second.writes(), 0);
    assert_eq!(second.unchanged, 2);
}

#[tokio::test]
async fn products_are_passed_through_unchanged() {
    let store = MemoryStore::default();
    let catalog = vec![product(1, "SKU-1", 1), product(2, "SKU-2", 2)];

    let outcome = reconcile(&store, catalog.clone(), &OptionMapping::default())
        .await
        .unwrap();

    assert_eq!(outcome.products, catalog);
}

// ---------------------------------------------------------------------------
// Skips and failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn products_without_a_usable_sku_are_skipped() {
    let store = MemoryStore::with_rows([normalized(&product(1, "SKU-1", 1))]);
    let mut no_variants = product(2, "unused", 0);
    no_variants.variants.clear();
    let mut empty_sku = product(3, "unused", 0);
    empty_sku.variants = vec![variant(Some(""), Some(1))];

    let summary = run(&store, vec![no_variants, empty_sku]).await;

    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.deleted, 1, "unkeyed products do not protect local rows");
    assert!(store.skus().is_empty());
}

#[tokio::test]
async fn duplicate_remote_sku_keeps_first_occurrence() {
    let store = MemoryStore::default();
    let first = product(1, "SKU-DUP", 5);
    let second = product(2, "SKU-DUP", 99);

    let summary = run(&store, vec![first.clone(), second]).await;

    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(store.get("SKU-DUP"), Some(normalized(&first)));
}

#[tokio::test]
async fn failed_write_is_counted_and_later_records_still_apply() {
    let mut store = MemoryStore::default();
    store.fail_writes_for.insert("SKU-1".to_string());

    let summary = run(&store, vec![product(1, "SKU-1", 1), product(2, "SKU-2", 2)]).await;

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.inserted, 1);
    assert_eq!(store.skus(), vec!["SKU-2"]);
}

#[tokio::test]
async fn failed_delete_does_not_abort_the_run() {
    let mut store = MemoryStore::with_rows([normalized(&product(9, "SKU-OLD", 1))]);
    store.fail_delete = true;

    let summary = run(&store, vec![product(1, "SKU-1", 1)]).await;

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.inserted, 1);
    assert_eq!(store.skus(), vec!["SKU-1", "SKU-OLD"]);
}

#[tokio::test]
async fn failure_to_list_stored_skus_aborts_before_any_write() {
    let store = MemoryStore {
        fail_list: true,
        ..MemoryStore::default()
    };

    let err = reconcile(&store, vec![product(1, "SKU-1", 1)], &OptionMapping::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Store(_)), "got {err:?}");
    assert!(store.writes().is_empty());
}

#[test]
fn summary_display_lists_every_count() {
    let summary = ReconcileSummary {
        inserted: 1,
        updated: 2,
        unchanged: 3,
        deleted: 4,
        skipped: 5,
        failed: 6,
    };
    assert_eq!(
        summary.to_string(),
        "inserted=1 updated=2 unchanged=3 deleted=4 skipped=5 failed=6"
    );
    assert_eq!(summary.writes(), 7);
}
