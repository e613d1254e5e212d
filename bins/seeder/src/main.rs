//! Database seeder for Pennywise development and testing.
//!
//! Seeds a demo user with one budget and a few items so the API has
//! something to serve right after `migrator up`.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use pennywise_core::auth::hash_password;
use pennywise_db::entities::{budget_items, budgets, users};

/// Demo user ID (consistent for all seeds)
const DEMO_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo budget ID (consistent for all seeds)
const DEMO_BUDGET_ID: &str = "00000000-0000-0000-0000-000000000002";

/// Demo credentials: demo / pennywise
const DEMO_USERNAME: &str = "demo";
const DEMO_PASSWORD: &str = "pennywise";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = pennywise_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo user...");
    seed_demo_user(&db).await;

    println!("Seeding demo budget...");
    seed_demo_budget(&db).await;

    println!("Seeding complete!");
}

fn demo_user_id() -> Uuid {
    Uuid::parse_str(DEMO_USER_ID).expect("valid uuid literal")
}

fn demo_budget_id() -> Uuid {
    Uuid::parse_str(DEMO_BUDGET_ID).expect("valid uuid literal")
}

async fn seed_demo_user(db: &DatabaseConnection) {
    let existing = users::Entity::find_by_id(demo_user_id())
        .one(db)
        .await
        .expect("Failed to query users");
    if existing.is_some() {
        println!("  demo user already present, skipping");
        return;
    }

    let now = Utc::now().into();
    let user = users::ActiveModel {
        id: Set(demo_user_id()),
        username: Set(DEMO_USERNAME.to_string()),
        password_hash: Set(hash_password(DEMO_PASSWORD).expect("Failed to hash demo password")),
        created_at: Set(now),
        updated_at: Set(now),
    };
    user.insert(db).await.expect("Failed to insert demo user");
}

async fn seed_demo_budget(db: &DatabaseConnection) {
    let existing = budgets::Entity::find_by_id(demo_budget_id())
        .one(db)
        .await
        .expect("Failed to query budgets");
    if existing.is_some() {
        println!("  demo budget already present, skipping");
        return;
    }

    let now = Utc::now().into();
    let budget = budgets::ActiveModel {
        id: Set(demo_budget_id()),
        user_id: Set(demo_user_id()),
        name: Set("Household".to_string()),
        month_duration: Set(1),
        gross_income: Set(Decimal::new(3_500_00, 2)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    budget.insert(db).await.expect("Failed to insert demo budget");

    let items = [
        ("Rent", "bills", Decimal::new(1_200_00, 2)),
        ("401k", "deductions", Decimal::new(250_00, 2)),
        ("Emergency fund", "savings", Decimal::new(300_00, 2)),
    ];

    for (name, category, total) in items {
        let now = Utc::now().into();
        let item = budget_items::ActiveModel {
            id: Set(Uuid::new_v4()),
            budget_id: Set(demo_budget_id()),
            name: Set(name.to_string()),
            category: Set(category.to_string()),
            total: Set(total),
            created_at: Set(now),
            updated_at: Set(now),
        };
        item.insert(db)
            .await
            .expect("Failed to insert demo budget item");
    }
}
