//! End-to-end flows through the `Storefront` facade.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Duration, NaiveDate};
use folio_core::clock::{Clock, FixedClock};
use folio_core::validation::{parse_book_form, FormValues};
use folio_core::{BookPatch, CategoryFilter, Money, Role};
use folio_store::{JsonFileKv, MemoryKv, SharedKv, StoreError, Storefront};

fn fixed_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::at_date(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()))
}

fn scratch_file() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir()
        .join(format!("folio-it-{}-{nanos}", std::process::id()))
        .join("store.json")
}

#[test]
fn browse_buy_and_review() {
    let clock = fixed_clock();
    let mut store = Storefront::open(MemoryKv::shared(), clock.clone());

    // Browse: pick the first computing title found by search.
    store.catalog_mut().set_category("IT/컴퓨터".parse::<CategoryFilter>().unwrap());
    store.catalog_mut().set_search_query("러스트");
    let book = store.catalog().filtered_view()[0].clone();

    let bob = store.login("bob@example.com", "pw").unwrap();
    assert_eq!(bob.role, Role::User);

    assert!(store.add_to_cart(book.id, 1));
    assert!(store.add_to_cart(book.id, 2));
    assert_eq!(store.cart().total_items(), 3);
    assert_eq!(store.cart().total_price(), book.price * 3);

    let records = store.checkout().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].item.quantity, 3);
    assert_eq!(records[0].date, clock.now());
    assert!(store.cart().is_empty());

    clock.advance(Duration::minutes(5));
    let review = store
        .reviews()
        .add(book.id, &bob, 5, "최고의 입문서", clock.now())
        .unwrap();

    let mine = store.reviews().by_user(bob.id).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].book_id, book.id);
    assert_eq!(mine[0].review, review);
}

#[test]
fn admin_edits_catalog() {
    let mut store = Storefront::open(MemoryKv::shared(), fixed_clock());
    let admin = store.login("admin@example.com", "x").unwrap();
    assert!(admin.is_admin());
    assert!(store.session().is_admin());

    let form: FormValues = [
        ("title", "관리자가 추가한 책"),
        ("author", "관리자"),
        ("publisher", "폴리오"),
        ("category", "인문"),
        ("price", "18000"),
        ("stock", "4"),
        ("isbn", "9780000000099"),
        ("publishDate", "2025-03-14"),
        ("description", "새로 들어온 책"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let draft = parse_book_form(&form).unwrap();
    let added = store.catalog_mut().add(draft).unwrap();
    assert_eq!(added.id, 13);
    assert!(store
        .catalog()
        .new_arrivals_view()
        .iter()
        .any(|b| b.id == added.id));

    let before = store.catalog().get(1).cloned().unwrap();
    assert!(store.catalog_mut().update(
        1,
        BookPatch {
            price: Some(Money::from_won(500)),
            ..BookPatch::default()
        }
    ));
    let after = store.catalog().get(1).cloned().unwrap();
    assert_eq!(after.price, Money::from_won(500));
    assert_eq!(after.title, before.title);
    assert_eq!(after.stock, before.stock);

    assert!(store.catalog_mut().remove(added.id));
    assert!(store.catalog().get(added.id).is_none());
}

#[test]
fn state_survives_restart_on_disk() {
    let path = scratch_file();
    let clock = fixed_clock();

    let bob_id = {
        let kv: SharedKv = Arc::new(JsonFileKv::open(&path).unwrap());
        let mut store = Storefront::open(kv, clock.clone());
        let bob = store.login("bob@example.com", "pw").unwrap();
        store.add_to_cart(2, 1);
        store.checkout().unwrap();
        store.reviews().add(2, &bob, 4, "좋아요", clock.now()).unwrap();
        bob.id
    };

    let kv: SharedKv = Arc::new(JsonFileKv::open(&path).unwrap());
    let mut store = Storefront::open(kv, clock.clone());

    assert_eq!(store.session().current().map(|u| u.id), Some(bob_id));
    assert_eq!(store.purchases().list(bob_id).unwrap().len(), 1);
    assert_eq!(store.reviews().list(2).unwrap().len(), 1);
    // Cart and admin edits are not persisted.
    assert!(store.cart().is_empty());

    store.withdraw().unwrap();
    assert!(matches!(store.checkout(), Err(StoreError::NotAuthenticated)));
    // Withdrawal leaves history in place.
    assert_eq!(store.purchases().list(bob_id).unwrap().len(), 1);

    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}
