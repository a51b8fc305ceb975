//! Demo catalog loader.
//!
//! Inserts a fixed set of eight phones the first time it runs against an
//! empty `products` collection and does nothing afterwards.

use serde_json::{Map, Value};
use tracing::instrument;

use smartdeal_core::{ProductId, timestamp};

use crate::db::{Collection, DocumentStore, Filter};
use crate::models::Product;

use super::{ServiceError, encode};

/// Result of a seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The catalog already had this many products; nothing was written.
    AlreadySeeded(u64),
    /// This many demo products were inserted.
    Seeded(usize),
}

impl SeedOutcome {
    /// Human-readable summary returned to callers.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::AlreadySeeded(n) => format!("Already have {n} products"),
            Self::Seeded(n) => format!("Seeded {n} products"),
        }
    }
}

/// Loads the demo catalog.
pub struct SeedService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> SeedService<'a> {
    /// Create a new seed service.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Insert the demo products unless the catalog is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Store` if counting or inserting fails.
    #[instrument(skip(self))]
    pub async fn seed_products(&self) -> Result<SeedOutcome, ServiceError> {
        let existing = self
            .store
            .count_documents(Collection::Products, &Filter::All)
            .await?;
        if existing > 0 {
            tracing::info!(existing, "Catalog already seeded");
            return Ok(SeedOutcome::AlreadySeeded(existing));
        }

        let documents = demo_products()
            .iter()
            .map(encode)
            .collect::<Result<Vec<_>, _>>()?;
        let inserted = self
            .store
            .insert_many(Collection::Products, documents)
            .await?;

        tracing::info!(inserted, "Seeded demo catalog");
        Ok(SeedOutcome::Seeded(inserted))
    }
}

struct DemoPhone {
    name: &'static str,
    brand: &'static str,
    image: &'static str,
    ram: &'static str,
    storage: &'static str,
    processor: &'static str,
    camera: &'static str,
    display: &'static str,
    battery: &'static str,
    amazon_price: f64,
    flipkart_price: f64,
    rating: f64,
    best_store: &'static str,
    os: &'static str,
}

const AMAZON_URL: &str = "https://amazon.in";
const FLIPKART_URL: &str = "https://flipkart.com";

const DEMO_PHONES: [DemoPhone; 8] = [
    DemoPhone {
        name: "Samsung Galaxy S24 Ultra 5G",
        brand: "Samsung",
        image: "https://images.unsplash.com/photo-1610945415295-d9bbf067e59c?w=500",
        ram: "12GB",
        storage: "256GB",
        processor: "Snapdragon 8 Gen 3",
        camera: "200MP + 50MP + 12MP + 10MP",
        display: "6.8 inch Dynamic AMOLED 2X",
        battery: "5000mAh",
        amazon_price: 129_999.0,
        flipkart_price: 124_999.0,
        rating: 4.6,
        best_store: "Flipkart",
        os: "Android 14",
    },
    DemoPhone {
        name: "iPhone 15 Pro Max",
        brand: "Apple",
        image: "https://images.unsplash.com/photo-1696446700182-d28e88c6190b?w=500",
        ram: "8GB",
        storage: "256GB",
        processor: "A17 Pro",
        camera: "48MP + 12MP + 12MP",
        display: "6.7 inch Super Retina XDR",
        battery: "4422mAh",
        amazon_price: 159_900.0,
        flipkart_price: 159_900.0,
        rating: 4.7,
        best_store: "Amazon",
        os: "iOS 17",
    },
    DemoPhone {
        name: "OnePlus 12",
        brand: "OnePlus",
        image: "https://images.unsplash.com/photo-1598327105666-5b89351aff97?w=500",
        ram: "16GB",
        storage: "512GB",
        processor: "Snapdragon 8 Gen 3",
        camera: "50MP + 64MP + 48MP",
        display: "6.82 inch AMOLED",
        battery: "5400mAh",
        amazon_price: 69_999.0,
        flipkart_price: 64_999.0,
        rating: 4.5,
        best_store: "Flipkart",
        os: "OxygenOS 14",
    },
    DemoPhone {
        name: "Xiaomi 14 Pro",
        brand: "Xiaomi",
        image: "https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?w=500",
        ram: "12GB",
        storage: "256GB",
        processor: "Snapdragon 8 Gen 3",
        camera: "50MP + 50MP + 50MP",
        display: "6.73 inch AMOLED",
        battery: "4880mAh",
        amazon_price: 79_999.0,
        flipkart_price: 76_999.0,
        rating: 4.4,
        best_store: "Flipkart",
        os: "MIUI 15",
    },
    DemoPhone {
        name: "Google Pixel 8 Pro",
        brand: "Google",
        image: "https://images.unsplash.com/photo-1598618443855-232ee0f819f1?w=500",
        ram: "12GB",
        storage: "256GB",
        processor: "Google Tensor G3",
        camera: "50MP + 48MP + 48MP",
        display: "6.7 inch LTPO OLED",
        battery: "5050mAh",
        amazon_price: 106_999.0,
        flipkart_price: 109_999.0,
        rating: 4.5,
        best_store: "Amazon",
        os: "Android 14",
    },
    DemoPhone {
        name: "Vivo X100 Pro",
        brand: "Vivo",
        image: "https://images.unsplash.com/photo-1585060544812-6b45742d762f?w=500",
        ram: "16GB",
        storage: "512GB",
        processor: "MediaTek Dimensity 9300",
        camera: "50MP + 50MP + 50MP",
        display: "6.78 inch AMOLED",
        battery: "5400mAh",
        amazon_price: 89_999.0,
        flipkart_price: 86_999.0,
        rating: 4.3,
        best_store: "Flipkart",
        os: "Funtouch OS 14",
    },
    DemoPhone {
        name: "Realme GT 5 Pro",
        brand: "Realme",
        image: "https://images.unsplash.com/photo-1580910051074-3eb694886505?w=500",
        ram: "12GB",
        storage: "256GB",
        processor: "Snapdragon 8 Gen 3",
        camera: "50MP + 50MP + 8MP",
        display: "6.78 inch AMOLED",
        battery: "5400mAh",
        amazon_price: 54_999.0,
        flipkart_price: 52_999.0,
        rating: 4.4,
        best_store: "Flipkart",
        os: "Realme UI 5",
    },
    DemoPhone {
        name: "Oppo Find X7 Ultra",
        brand: "Oppo",
        image: "https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?w=500",
        ram: "16GB",
        storage: "512GB",
        processor: "Snapdragon 8 Gen 3",
        camera: "50MP + 50MP + 50MP + 50MP",
        display: "6.82 inch AMOLED",
        battery: "5000mAh",
        amazon_price: 99_999.0,
        flipkart_price: 94_999.0,
        rating: 4.5,
        best_store: "Flipkart",
        os: "ColorOS 14",
    },
];

impl DemoPhone {
    fn to_product(&self) -> Product {
        let mut specifications = Map::new();
        specifications.insert("os".to_string(), Value::from(self.os));
        specifications.insert("5g".to_string(), Value::from("Yes"));

        Product {
            id: ProductId::generate(),
            name: self.name.to_string(),
            brand: self.brand.to_string(),
            image: self.image.to_string(),
            ram: self.ram.to_string(),
            storage: self.storage.to_string(),
            processor: self.processor.to_string(),
            camera: self.camera.to_string(),
            display: self.display.to_string(),
            battery: self.battery.to_string(),
            amazon_price: self.amazon_price,
            amazon_url: AMAZON_URL.to_string(),
            flipkart_price: self.flipkart_price,
            flipkart_url: FLIPKART_URL.to_string(),
            rating: self.rating,
            best_store: self.best_store.to_string(),
            specifications,
            timestamp: timestamp::now(),
        }
    }
}

/// The demo catalog with fresh ids and timestamps.
#[must_use]
pub fn demo_products() -> Vec<Product> {
    DEMO_PHONES.iter().map(DemoPhone::to_product).collect()
}
