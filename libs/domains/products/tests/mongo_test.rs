//! MongoDB repository tests. Need Docker; run with `--ignored`.

use domain_products::*;
use test_utils::TestMongo;

#[tokio::test]
#[ignore]
async fn test_mongo_repository_roundtrip() {
    let mongo = TestMongo::new().await;
    let repo = MongoProductRepository::new(&mongo.database());
    repo.init_indexes().await.unwrap();

    let created = repo
        .create(CreateProduct {
            name: "Bowl".to_string(),
            price: 2500,
            image: "/uploads/bowl.jpeg".to_string(),
        })
        .await
        .unwrap();

    let found = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Bowl");
    assert_eq!(found.price, 2500);

    let updated = repo
        .update(
            created.id,
            UpdateProduct {
                price: Some(2700),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 2700);

    assert_eq!(repo.list().await.unwrap().len(), 1);
}
