//! Seed script for development — populates the `hewan` table with sample animals.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env). Existing rows with the same ids are
//! overwritten, so the script can be re-run safely.

use sqlx::PgPool;

const SAMPLE_ANIMALS: &[(&str, &str, &str, i32, Option<&str>)] = &[
    ("A1", "Sapi1", "sapi", 3, Some("Vaksin PMK lengkap")),
    ("A2", "Kambing Putih", "kambing", 2, None),
    ("A3", "Domba Garut", "domba", 4, Some("Perlu cek kuku")),
    ("04A1B2C3", "Sapi Bali", "sapi", 5, Some("Sehat")),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
    let pool = hewan_relay::db::create_pool(&db_url, 5).await?;

    // Run migrations first
    hewan_relay::db::migrate(&pool).await?;

    println!("=== Hewan Seed Script ===");

    seed_animals(&pool).await?;

    println!("\n=== Seed complete! ===");
    Ok(())
}

async fn seed_animals(pool: &PgPool) -> anyhow::Result<()> {
    for (id, nama, jenis, usia, status) in SAMPLE_ANIMALS {
        sqlx::query(
            "INSERT INTO hewan (id, nama, jenis, usia, status_kesehatan)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO UPDATE
             SET nama = EXCLUDED.nama, jenis = EXCLUDED.jenis, usia = EXCLUDED.usia,
                 status_kesehatan = EXCLUDED.status_kesehatan",
        )
        .bind(*id)
        .bind(*nama)
        .bind(*jenis)
        .bind(*usia)
        .bind(*status)
        .execute(pool)
        .await?;
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hewan")
        .fetch_one(pool)
        .await?;

    println!("[done] Upserted {} sample animals ({count} total)", SAMPLE_ANIMALS.len());
    Ok(())
}
