//! Round-trip through the Postgres repository.
//!
//! Needs a reachable database in `DATABASE_URL`; without one the test returns early.

use products_api::{NewProduct, PostgresProductRepository, ProductChanges, ProductRepository};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn postgres_repository_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        println!("DATABASE_URL not set, skipping");
        return Ok(());
    };

    let repo = PostgresProductRepository::connect(&database_url, 2).await?;
    repo.sync().await?;
    // Running sync twice is a no-op.
    repo.sync().await?;
    repo.ping().await?;

    let created = repo
        .create(NewProduct {
            name: "Mouse-testing".to_string(),
            price: 50.0,
        })
        .await?;
    assert!(created.availability);
    assert_eq!(created.price, 50.0);

    let found = repo.find_by_id(created.id).await?;
    assert_eq!(found.as_ref(), Some(&created));

    let updated = repo
        .update(
            &created,
            ProductChanges {
                name: "Mouse-testing - Actualizado".to_string(),
                price: 75.5,
                availability: false,
            },
        )
        .await?
        .ok_or("updated row is missing")?;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Mouse-testing - Actualizado");
    assert!(!updated.availability);

    let all = repo.find_all().await?;
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));
    assert!(all.iter().any(|p| p.id == created.id));

    repo.destroy(&updated).await?;
    assert_eq!(repo.find_by_id(created.id).await?, None);
    let changes = ProductChanges::toggled_availability(&updated);
    assert_eq!(repo.update(&updated, changes).await?, None);

    // Names are not length-limited.
    let long = repo
        .create(NewProduct {
            name: "x".repeat(150),
            price: 1.0,
        })
        .await?;
    assert_eq!(long.name.len(), 150);
    repo.destroy(&long).await?;

    let next = repo
        .create(NewProduct {
            name: "Keyboard".to_string(),
            price: 20.0,
        })
        .await?;
    assert!(next.id > created.id);
    repo.destroy(&next).await?;

    Ok(())
}
