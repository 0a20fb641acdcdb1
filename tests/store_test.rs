mod common;

use canteen::model::{NewMenuItem, NewOrder, NewOrderItem, NewUser, Role};
use canteen::store::StoreError;
use chrono::Utc;

#[tokio::test]
async fn test_user_create_and_lookup() {
    let store = common::store().await;

    let user = store
        .user()
        .create(NewUser::registration("alice@example.com", "secret1"))
        .await
        .expect("Failed to create user");
    assert_eq!(user.role, Role::User);
    assert_ne!(user.encrypted_password, "secret1");
    assert!(user.verify_password("secret1"));
    assert!(!user.verify_password("secret2"));

    let by_id = store.user().find(user.id).await.expect("Failed to find user");
    let by_email = store
        .user()
        .find_by_email("alice@example.com")
        .await
        .expect("Failed to find user by email");
    assert_eq!(by_id, user);
    assert_eq!(by_email, user);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let store = common::store().await;
    let first = common::seed_user(&store, "bob@example.com").await;

    let err = store
        .user()
        .create(NewUser::registration("bob@example.com", "another1"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Constraint(ref msg) if msg.contains("already registered")));

    // The original account is untouched
    let found = store.user().find_by_email("bob@example.com").await.unwrap();
    assert_eq!(found.id, first.id);
    assert!(found.verify_password("secret1"));
    assert_eq!(common::count(&store, "users").await, 1);
}

#[tokio::test]
async fn test_invalid_user_is_rejected_before_insert() {
    let store = common::store().await;

    let bad_email = store
        .user()
        .create(NewUser::registration("not-an-email", "secret1"))
        .await
        .unwrap_err();
    let short_password = store
        .user()
        .create(NewUser::registration("carol@example.com", "abc"))
        .await
        .unwrap_err();

    assert!(matches!(bad_email, StoreError::Validation(_)));
    assert!(matches!(short_password, StoreError::Validation(_)));
    assert_eq!(common::count(&store, "users").await, 0);
}

#[tokio::test]
async fn test_missing_user_is_not_found() {
    let store = common::store().await;

    assert!(store.user().find(42).await.unwrap_err().is_not_found());
    assert!(store
        .user()
        .find_by_email("nobody@example.com")
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_menu_item_price_lookup() {
    let store = common::store().await;
    let soup = common::seed_menu_item(&store, "Soup", 350).await;
    let water = common::seed_menu_item(&store, "Water", 0).await;

    assert_eq!(store.menu_item().price(soup.id).await.unwrap(), 350);
    assert_eq!(store.menu_item().price(water.id).await.unwrap(), 0);

    let err = store.menu_item().price(9999).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound("menu item")));
}

#[tokio::test]
async fn test_menu_item_keeps_description() {
    let store = common::store().await;

    let item = store
        .menu_item()
        .create(NewMenuItem {
            name: "Curry".to_string(),
            price: 780,
            description: "Spicy".to_string(),
        })
        .await
        .expect("Failed to create menu item");

    assert_eq!(item.name, "Curry");
    assert_eq!(item.price, 780);
    assert_eq!(item.description, "Spicy");
}

#[tokio::test]
async fn test_menu_item_delete_is_idempotent() {
    let store = common::store().await;
    let item = common::seed_menu_item(&store, "Bread", 80).await;

    store.menu_item().delete(item.id).await.expect("First delete failed");
    store.menu_item().delete(item.id).await.expect("Second delete failed");
    store.menu_item().delete(12345).await.expect("Delete of unknown id failed");

    assert!(store.menu_item().price(item.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_order_is_stamped_on_insert() {
    let store = common::store().await;
    let user = common::seed_user(&store, "dave@example.com").await;

    let before = Utc::now();
    let order = store
        .order()
        .create(NewOrder {
            user_id: user.id,
            total_amount: 500,
        })
        .await
        .expect("Failed to create order");
    let after = Utc::now();

    assert_eq!(order.user_id, user.id);
    assert_eq!(order.total_amount, 500);
    assert!(order.created_at >= before - chrono::Duration::seconds(1));
    assert!(order.created_at <= after + chrono::Duration::seconds(1));

    let found = store.order().find(order.id).await.unwrap();
    assert_eq!(found.id, order.id);
    assert_eq!(found.total_amount, 500);
}

#[tokio::test]
async fn test_order_for_unknown_user_violates_foreign_key() {
    let store = common::store().await;

    let err = store
        .order()
        .create(NewOrder {
            user_id: 777,
            total_amount: 0,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Constraint(_)));
    assert_eq!(common::count(&store, "orders").await, 0);
}

#[tokio::test]
async fn test_order_item_for_unknown_menu_item_violates_foreign_key() {
    let store = common::store().await;
    let user = common::seed_user(&store, "erin@example.com").await;
    let order = store
        .order()
        .create(NewOrder {
            user_id: user.id,
            total_amount: 0,
        })
        .await
        .unwrap();

    let err = store
        .order_item()
        .create(NewOrderItem {
            order_id: order.id,
            menu_item_id: 404,
            quantity: 1,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Constraint(_)));
}

#[tokio::test]
async fn test_order_delete_cascades_to_items() {
    let store = common::store().await;
    let user = common::seed_user(&store, "frank@example.com").await;
    let tea = common::seed_menu_item(&store, "Tea", 150).await;

    let order = store
        .order()
        .create(NewOrder {
            user_id: user.id,
            total_amount: 300,
        })
        .await
        .unwrap();
    let item = store
        .order_item()
        .create(NewOrderItem {
            order_id: order.id,
            menu_item_id: tea.id,
            quantity: 2,
        })
        .await
        .unwrap();
    assert_eq!(item.order_id, order.id);
    assert_eq!(item.quantity, 2);
    assert_eq!(store.order_item().find_by_order(order.id).await.unwrap(), vec![item]);

    store.order().delete(order.id).await.expect("Failed to delete order");

    assert!(store.order().find(order.id).await.unwrap_err().is_not_found());
    assert!(store.order_item().find_by_order(order.id).await.unwrap().is_empty());
    assert_eq!(common::count(&store, "order_items").await, 0);
}
