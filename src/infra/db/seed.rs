//! Initial shop catalog.

use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Set, TransactionTrait};
use uuid::Uuid;

use crate::domain::{Money, NewProduct};
use crate::infra::repositories::entities::product;

/// Products inserted into an empty catalog.
pub const CATALOG: &[NewProduct] = &[
    NewProduct {
        name: "NPK Fertilizer 10-10-10",
        description: "Balanced fertilizer for general use on most crops. Provides equal parts nitrogen, phosphorus, and potassium for healthy plant growth.",
        price: Money::from_rupees(499),
        image: "fertilizer1.jpg",
        category: "General Purpose",
        in_stock: true,
    },
    NewProduct {
        name: "Organic Compost",
        description: "100% organic compost for improving soil health. Rich in nutrients and beneficial microorganisms. Improves soil structure and water retention.",
        price: Money::from_rupees(349),
        image: "fertilizer2.jpg",
        category: "Organic",
        in_stock: true,
    },
    NewProduct {
        name: "Tomato Special Formula",
        description: "Specially formulated for tomatoes with extra calcium to prevent blossom end rot. Promotes healthy fruit development and higher yields.",
        price: Money::from_rupees(599),
        image: "fertilizer3.jpg",
        category: "Vegetable",
        in_stock: true,
    },
    NewProduct {
        name: "Potato Fertilizer",
        description: "High-potassium fertilizer for potatoes and root vegetables. Encourages strong root development and improves crop size and quality.",
        price: Money::from_rupees(549),
        image: "fertilizer4.jpg",
        category: "Vegetable",
        in_stock: true,
    },
    NewProduct {
        name: "Liquid Seaweed Extract",
        description: "Organic liquid fertilizer from seaweed. Rich in micronutrients and growth hormones. Improves plant resilience and stress tolerance.",
        price: Money::from_rupees(440),
        image: "fertilizer5.jpg",
        category: "Organic",
        in_stock: true,
    },
    NewProduct {
        name: "Slow-Release Granules",
        description: "Coated fertilizer granules that release nutrients gradually over 3 months. Reduces fertilizer burn and minimizes application frequency.",
        price: Money::from_rupees(600),
        image: "fertilizer6.jpg",
        category: "General Purpose",
        in_stock: true,
    },
    NewProduct {
        name: "Urea (46% Nitrogen)",
        description: "High-nitrogen fertilizer essential for paddy crops. Promotes vigorous vegetative growth and enhances tillering in rice plants.",
        price: Money::from_rupees(270),
        image: "urea.jpg",
        category: "Nitrogen Fertilizer",
        in_stock: true,
    },
    NewProduct {
        name: "Sulphur Fertilizer (90% WDG)",
        description: "Provides sulphur to improve protein synthesis and enhance grain quality in rice. Corrects sulphur deficiency and supports higher yields.",
        price: Money::from_rupees(700),
        image: "sulphur.jpg",
        category: "Secondary Nutrient",
        in_stock: true,
    },
    NewProduct {
        name: "Humic Acid 98%",
        description: "Concentrated organic soil conditioner that improves nutrient uptake, enhances root development, and boosts soil microbial activity for paddy fields.",
        price: Money::from_rupees(700),
        image: "humic.jpg",
        category: "Soil Conditioner",
        in_stock: true,
    },
    NewProduct {
        name: "Zinc Sulphate (21% Zn)",
        description: "Essential micronutrient fertilizer for paddy crops. Prevents zinc deficiency (Khaira disease) and improves grain filling and plant vigor.",
        price: Money::from_rupees(450),
        image: "zinc.jpg",
        category: "Micronutrient",
        in_stock: true,
    },
    NewProduct {
        name: "Paraquat Herbicide",
        description: "Fast-acting non-selective herbicide for weed control in paddy fields. Effective against a wide range of grasses and broadleaf weeds.",
        price: Money::from_rupees(550),
        image: "paraquat.jpg",
        category: "Herbicide",
        in_stock: true,
    },
    NewProduct {
        name: "DAP (Diammonium Phosphate)",
        description: "Popular fertilizer providing both nitrogen and phosphorus. Encourages strong root growth and early plant establishment in paddy.",
        price: Money::from_rupees(1350),
        image: "dap.jpg",
        category: "Phosphorus Fertilizer",
        in_stock: true,
    },
    NewProduct {
        name: "MOP (Muriate of Potash)",
        description: "Potassium-rich fertilizer that strengthens plant stems, improves grain filling, and enhances resistance against pests and diseases in rice.",
        price: Money::from_rupees(1400),
        image: "mop.jpg",
        category: "Potassium Fertilizer",
        in_stock: true,
    },
];

/// Insert the catalog when the products table is empty.
///
/// The whole catalog goes in under one transaction, so a failed seed leaves
/// the table empty and the next run tries again. Returns the number of
/// products inserted, zero when the catalog already had rows.
pub async fn seed_products(db: &DatabaseConnection) -> Result<usize, DbErr> {
    let txn = db.begin().await?;

    if product::Entity::find().count(&txn).await? > 0 {
        txn.rollback().await?;
        return Ok(0);
    }

    let rows = CATALOG.iter().map(|item| product::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(item.name.to_string()),
        description: Set(item.description.to_string()),
        price_paise: Set(item.price.paise()),
        image: Set(item.image.to_string()),
        category: Set(item.category.to_string()),
        in_stock: Set(item.in_stock),
    });
    if let Err(e) = product::Entity::insert_many(rows).exec(&txn).await {
        txn.rollback().await?;
        return Err(e);
    }
    txn.commit().await?;

    tracing::info!(count = CATALOG.len(), "Seeded product catalog");
    Ok(CATALOG.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_prices() {
        assert_eq!(CATALOG.len(), 13);
        assert_eq!(CATALOG[0].price, Money::from_rupees(499));
        assert_eq!(CATALOG[12].price, Money::from_rupees(1400));
        assert!(CATALOG.iter().all(|p| p.in_stock));
    }

    async fn migrated() -> crate::infra::Database {
        let db = crate::infra::Database::connect_url("sqlite::memory:")
            .await
            .unwrap();
        db.run_migrations().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = migrated().await;

        assert_eq!(seed_products(db.connection()).await.unwrap(), CATALOG.len());
        assert_eq!(seed_products(db.connection()).await.unwrap(), 0);

        let count = product::Entity::find().count(db.connection()).await.unwrap();
        assert_eq!(count, CATALOG.len() as u64);
    }

    #[tokio::test]
    async fn test_failed_seed_leaves_no_partial_catalog() {
        use sea_orm::ConnectionTrait;

        let db = migrated().await;
        db.connection()
            .execute_unprepared(
                "CREATE TRIGGER reject_herbicide BEFORE INSERT ON products \
                 WHEN NEW.name = 'Paraquat Herbicide' \
                 BEGIN SELECT RAISE(ABORT, 'rejected'); END",
            )
            .await
            .unwrap();

        assert!(seed_products(db.connection()).await.is_err());
        let count = product::Entity::find().count(db.connection()).await.unwrap();
        assert_eq!(count, 0);

        db.connection()
            .execute_unprepared("DROP TRIGGER reject_herbicide")
            .await
            .unwrap();
        assert_eq!(seed_products(db.connection()).await.unwrap(), CATALOG.len());
    }
}
