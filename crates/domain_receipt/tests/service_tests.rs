//! Receipt service tests against the in-memory store adapter

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{AccountId, Money, ReceiptId};
use domain_receipt::{
    CreateReceiptRequest, LineItemInput, PaymentInput, PaymentKind, ReceiptConfig, ReceiptQuery,
    ReceiptService,
};
use test_utils::InMemoryReceiptStore;

fn service() -> (ReceiptService, Arc<InMemoryReceiptStore>) {
    test_utils::init_test_logging();
    let store = Arc::new(InMemoryReceiptStore::new());
    let service = ReceiptService::new(store.clone(), ReceiptConfig::default().render_options());
    (service, store)
}

fn request(items: &[(&str, Decimal, i64)], kind: PaymentKind, amount: Decimal) -> CreateReceiptRequest {
    CreateReceiptRequest {
        products: items
            .iter()
            .map(|(name, price, qty)| LineItemInput::new(*name, *price, *qty))
            .collect(),
        payment: PaymentInput::new(kind, amount),
    }
}

fn owner() -> AccountId {
    AccountId::new(1)
}

#[tokio::test]
async fn create_returns_the_persisted_view() {
    let (service, _) = service();

    let view = service
        .create(
            request(
                &[("Widget", dec!(10.00), 3), ("Gadget", dec!(5.00), 2)],
                PaymentKind::Cash,
                dec!(50.00),
            ),
            owner(),
        )
        .await
        .unwrap();

    assert_eq!(view.id, ReceiptId::new(1));
    assert_eq!(view.owner_id, owner());
    assert_eq!(view.total, Money::new(dec!(40.00)));
    assert_eq!(view.rest, Money::new(dec!(10.00)));
    assert_eq!(view.payment.kind, PaymentKind::Cash);
    assert_eq!(view.payment.amount, Money::new(dec!(50.00)));
    assert_eq!(view.products.len(), 2);
    assert_eq!(view.products[0].name, "Widget");
    assert_eq!(view.products[0].total, Money::new(dec!(30.00)));
    assert_eq!(view.products[1].name, "Gadget");
}

#[tokio::test]
async fn create_accepts_exact_payment() {
    let (service, _) = service();

    let view = service
        .create(
            request(
                &[("Item", dec!(2500.00), 1), ("Accessory", dec!(100.00), 2)],
                PaymentKind::Cash,
                dec!(2700.00),
            ),
            owner(),
        )
        .await
        .unwrap();

    assert_eq!(view.total, Money::new(dec!(2700.00)));
    assert_eq!(view.rest, Money::zero());
}

#[tokio::test]
async fn validation_failures_never_reach_the_store() {
    let (service, store) = service();

    let cases = [
        request(&[], PaymentKind::Cash, dec!(100.00)),
        request(&[("X", dec!(-10.00), 1)], PaymentKind::Cash, dec!(10.00)),
        request(&[("X", dec!(10.00), 0)], PaymentKind::Cash, dec!(10.00)),
        request(&[("", dec!(10.00), 1)], PaymentKind::Cash, dec!(10.00)),
        request(&[("X", dec!(10.00), 1)], PaymentKind::Cash, dec!(0)),
        request(&[("X", dec!(10.00), 2)], PaymentKind::Cash, dec!(19.99)),
    ];

    for case in cases {
        let error = service.create(case, owner()).await.unwrap_err();
        assert!(error.is_validation());
    }
    assert_eq!(store.create_call_count(), 0);
}

#[tokio::test]
async fn get_by_owner_returns_the_full_view() {
    let (service, _) = service();

    let created = service
        .create(
            request(
                &[("Widget", dec!(10.00), 3), ("Gadget", dec!(5.00), 2)],
                PaymentKind::Cash,
                dec!(50.00),
            ),
            owner(),
        )
        .await
        .unwrap();

    let view = service.get_by_owner(created.id, owner()).await.unwrap();
    assert_eq!(view, created);
    assert_eq!(view.products.len(), 2);
    assert_eq!(view.total, Money::new(dec!(40.00)));
}

#[tokio::test]
async fn get_by_owner_hides_other_accounts_receipts() {
    let (service, _) = service();
    let other = AccountId::new(2);

    let created = service
        .create(request(&[("A", dec!(10.00), 1)], PaymentKind::Cash, dec!(10.00)), owner())
        .await
        .unwrap();

    let error = service.get_by_owner(created.id, other).await.unwrap_err();
    assert!(error.is_not_found());
}

#[tokio::test]
async fn get_by_owner_of_unknown_id_is_not_found() {
    let (service, _) = service();
    let error = service.get_by_owner(ReceiptId::new(999), owner()).await.unwrap_err();
    assert!(error.is_not_found());
}

#[tokio::test]
async fn list_is_scoped_to_the_requested_owner() {
    let (service, _) = service();
    let other = AccountId::new(2);

    service
        .create(request(&[("A", dec!(10.00), 1)], PaymentKind::Cash, dec!(10.00)), owner())
        .await
        .unwrap();
    service
        .create(request(&[("B", dec!(20.00), 1)], PaymentKind::Cash, dec!(20.00)), other)
        .await
        .unwrap();

    let mine = service.list_by_owner(owner(), ReceiptQuery::default()).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert!(mine.iter().all(|view| view.owner_id == owner()));
    assert_eq!(mine[0].products[0].name, "A");
}

#[tokio::test]
async fn list_applies_all_filters_with_and_semantics() {
    let (service, _) = service();

    service
        .create(request(&[("Cheap", dec!(5.00), 1)], PaymentKind::Cash, dec!(5.00)), owner())
        .await
        .unwrap();
    service
        .create(request(&[("Mid", dec!(50.00), 1)], PaymentKind::Cashless, dec!(50.00)), owner())
        .await
        .unwrap();
    service
        .create(request(&[("Dear", dec!(500.00), 1)], PaymentKind::Cash, dec!(500.00)), owner())
        .await
        .unwrap();

    let query = ReceiptQuery::new()
        .with_min_total(Money::new(dec!(10.00)))
        .with_max_total(Money::new(dec!(100.00)));
    let mid_range = service.list_by_owner(owner(), query).await.unwrap();
    assert_eq!(mid_range.len(), 1);
    assert_eq!(mid_range[0].products[0].name, "Mid");

    let query = ReceiptQuery::new()
        .with_min_total(Money::new(dec!(10.00)))
        .with_payment_kind(PaymentKind::Cash);
    let dear_cash = service.list_by_owner(owner(), query).await.unwrap();
    assert_eq!(dear_cash.len(), 1);
    assert_eq!(dear_cash[0].products[0].name, "Dear");

    let unfiltered = service.list_by_owner(owner(), ReceiptQuery::default()).await.unwrap();
    assert_eq!(unfiltered.len(), 3);
}

#[tokio::test]
async fn list_paginates_in_ascending_identity_order() {
    let (service, _) = service();

    for i in 1..=12 {
        service
            .create(
                request(&[("Item", Decimal::from(i), 1)], PaymentKind::Cash, Decimal::from(i)),
                owner(),
            )
            .await
            .unwrap();
    }

    let first_page = service.list_by_owner(owner(), ReceiptQuery::default()).await.unwrap();
    assert_eq!(first_page.len(), 10);
    assert_eq!(first_page[0].id, ReceiptId::new(1));
    assert_eq!(first_page[9].id, ReceiptId::new(10));

    let second_page = service
        .list_by_owner(owner(), ReceiptQuery::new().with_offset(10))
        .await
        .unwrap();
    assert_eq!(second_page.len(), 2);
    assert_eq!(second_page[0].id, ReceiptId::new(11));

    let window = service
        .list_by_owner(owner(), ReceiptQuery::new().with_limit(3).with_offset(4))
        .await
        .unwrap();
    let ids: Vec<i64> = window.iter().map(|view| view.id.value()).collect();
    assert_eq!(ids, vec![5, 6, 7]);
}

#[tokio::test]
async fn render_text_produces_fixed_width_document() {
    let (service, _) = service();

    let view = service
        .create(
            request(
                &[("Widget", dec!(10.00), 3), ("Gadget", dec!(5.00), 2)],
                PaymentKind::Cash,
                dec!(50.00),
            ),
            owner(),
        )
        .await
        .unwrap();

    let text = service.render_text(view.id, None).await.unwrap();
    assert!(text.contains("ФОП Джонсонюк Борис"));
    assert!(text.contains("SUM"));
    for line in text.lines() {
        assert_eq!(line.chars().count(), 40);
    }

    let again = service.render_text(view.id, None).await.unwrap();
    assert_eq!(text, again);

    let wide = service.render_text(view.id, Some(60)).await.unwrap();
    for line in wide.lines() {
        assert_eq!(line.chars().count(), 60);
    }
}

#[tokio::test]
async fn render_text_of_unknown_receipt_is_not_found() {
    let (service, _) = service();
    let error = service.render_text(ReceiptId::new(999), None).await.unwrap_err();
    assert!(error.is_not_found());
}

#[tokio::test]
async fn render_text_rejects_too_narrow_lines() {
    let (service, _) = service();

    let view = service
        .create(request(&[("X", dec!(1.00), 1)], PaymentKind::Cash, dec!(1.00)), owner())
        .await
        .unwrap();

    let error = service.render_text(view.id, Some(8)).await.unwrap_err();
    assert!(error.is_validation());
}
