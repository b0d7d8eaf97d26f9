//! MongoDB repository tests. Need Docker; run with `--ignored`.

use axum_helpers::Role;
use domain_users::*;
use test_utils::TestMongo;

#[tokio::test]
#[ignore]
async fn test_unique_email_index_maps_to_duplicate_email() {
    let mongo = TestMongo::new().await;
    let repo = MongoUserRepository::new(&mongo.database());
    repo.init_indexes().await.unwrap();

    let user = User::new("Alice", "alice@example.com", "hash".to_string(), Role::Admin);
    repo.create(user).await.unwrap();

    let again = User::new("Alicia", "ALICE@example.com", "hash".to_string(), Role::User);
    let result = repo.create(again).await;
    assert!(matches!(result, Err(UserError::DuplicateEmail(_))));

    assert_eq!(repo.count().await.unwrap(), 1);
    let found = repo.get_by_email("alice@example.com").await.unwrap().unwrap();
    assert_eq!(found.name, "Alice");
    assert_eq!(found.role, Role::Admin);
}
