//! Database seeder for Paddock development and testing.
//!
//! Seeds the rate catalog and a small sample yard (owners, horses,
//! ownership windows, placements) for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use paddock_db::entities::{
    horses, locations, owners, ownerships, placements, rate_types,
    sea_orm_active_enums::RateBasis,
};

/// Deterministic IDs so re-running the seeder is idempotent.
const OWNER_ID: &str = "00000000-0000-0000-0000-000000000001";
const HORSE_BRAMBLE_ID: &str = "00000000-0000-0000-0000-000000000011";
const HORSE_COPPER_ID: &str = "00000000-0000-0000-0000-000000000012";
const LOCATION_TOP_FIELD_ID: &str = "00000000-0000-0000-0000-000000000021";
const LOCATION_STABLES_ID: &str = "00000000-0000-0000-0000-000000000022";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = paddock_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding rate catalog...");
    seed_rate_types(&db).await;

    println!("Seeding locations...");
    seed_locations(&db).await;

    println!("Seeding sample yard...");
    seed_sample_yard(&db).await;

    println!("Seeding complete!");
}

fn id(s: &str) -> Uuid {
    Uuid::parse_str(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn now() -> sea_orm::prelude::DateTimeWithTimeZone {
    chrono::Utc::now().into()
}

/// Seeds the standard rate types, skipping any that already exist.
async fn seed_rate_types(db: &DatabaseConnection) {
    let rates = [
        ("Grass Livery", RateBasis::PerDay, Decimal::new(750, 2)),
        ("Stabled", RateBasis::PerDay, Decimal::new(2400, 2)),
        ("Retirement Field", RateBasis::PerMonth, Decimal::new(20000, 2)),
    ];

    for (name, basis, amount) in rates {
        let exists = rate_types::Entity::find()
            .filter(rate_types::Column::Name.eq(name))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some();
        if exists {
            println!("  Rate type {name} already exists, skipping...");
            continue;
        }

        rate_types::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(name.to_string()),
            basis: Set(basis),
            amount: Set(amount),
            description: Set(None),
            is_active: Set(true),
            created_at: Set(now()),
            updated_at: Set(now()),
        }
        .insert(db)
        .await
        .expect("insert rate type");
    }
}

/// Seeds two locations on the home site.
async fn seed_locations(db: &DatabaseConnection) {
    let entries = [
        (LOCATION_TOP_FIELD_ID, "Top Field", Some(8)),
        (LOCATION_STABLES_ID, "Main Stables", Some(12)),
    ];

    for (location_id, name, capacity) in entries {
        if locations::Entity::find_by_id(id(location_id))
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Location {name} already exists, skipping...");
            continue;
        }

        locations::ActiveModel {
            id: Set(id(location_id)),
            name: Set(name.to_string()),
            site: Set("Home Farm".to_string()),
            description: Set(None),
            capacity: Set(capacity),
            is_active: Set(true),
            created_at: Set(now()),
            updated_at: Set(now()),
        }
        .insert(db)
        .await
        .expect("insert location");
    }
}

/// Seeds one owner with two horses, owned and placed since 2023.
async fn seed_sample_yard(db: &DatabaseConnection) {
    if owners::Entity::find_by_id(id(OWNER_ID))
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Sample yard already exists, skipping...");
        return;
    }

    owners::ActiveModel {
        id: Set(id(OWNER_ID)),
        name: Set("Sam Fletcher".to_string()),
        email: Set(Some("sam@example.test".to_string())),
        phone: Set(Some("07700 900123".to_string())),
        address: Set(Some("1 Bridleway Lane".to_string())),
        account_code: Set(None),
        notes: Set(None),
        is_active: Set(true),
        created_at: Set(now()),
        updated_at: Set(now()),
    }
    .insert(db)
    .await
    .expect("insert owner");

    let stabled_rate = rate_types::Entity::find()
        .filter(rate_types::Column::Name.eq("Stabled"))
        .one(db)
        .await
        .expect("query rate types")
        .expect("rate types seeded above");
    let grass_rate = rate_types::Entity::find()
        .filter(rate_types::Column::Name.eq("Grass Livery"))
        .one(db)
        .await
        .expect("query rate types")
        .expect("rate types seeded above");

    let sample_horses = [
        (HORSE_BRAMBLE_ID, "Bramble", LOCATION_STABLES_ID, stabled_rate.id),
        (HORSE_COPPER_ID, "Copper", LOCATION_TOP_FIELD_ID, grass_rate.id),
    ];

    for (horse_id, name, location_id, rate_type_id) in sample_horses {
        horses::ActiveModel {
            id: Set(id(horse_id)),
            name: Set(name.to_string()),
            date_of_birth: Set(None),
            age_years: Set(Some(9)),
            color: Set(Some("bay".to_string())),
            sex: Set(None),
            breeding_notes: Set(None),
            sire_name: Set(None),
            passport_number: Set(None),
            has_passport: Set(true),
            notes: Set(None),
            is_active: Set(true),
            created_at: Set(now()),
            updated_at: Set(now()),
        }
        .insert(db)
        .await
        .expect("insert horse");

        ownerships::ActiveModel {
            id: Set(Uuid::now_v7()),
            horse_id: Set(id(horse_id)),
            owner_id: Set(id(OWNER_ID)),
            start_date: Set(date(2023, 1, 1)),
            end_date: Set(None),
            notes: Set(None),
            created_at: Set(now()),
            updated_at: Set(now()),
        }
        .insert(db)
        .await
        .expect("insert ownership");

        placements::ActiveModel {
            id: Set(Uuid::now_v7()),
            horse_id: Set(id(horse_id)),
            location_id: Set(id(location_id)),
            rate_type_id: Set(rate_type_id),
            start_date: Set(date(2023, 6, 1)),
            end_date: Set(None),
            notes: Set(None),
            created_at: Set(now()),
            updated_at: Set(now()),
        }
        .insert(db)
        .await
        .expect("insert placement");
    }
}
