use crate::{StoreResult, Storage};
use log::info;
use serde::Deserialize;

const STATIC_SPORTS_JSON: &str = include_str!("data/sports.json");
const STATIC_AGE_GROUPS_JSON: &str = include_str!("data/age_groups.json");

#[derive(Deserialize)]
struct SportSeed {
    name: String,
    slug: String,
}

#[derive(Deserialize)]
struct AgeGroupSeed {
    name: String,
    order: u32,
}

#[derive(Debug, Default)]
pub struct SeedReport {
    pub sports: u32,
    pub age_groups: u32,
}

pub(crate) async fn apply(storage: &Storage) -> StoreResult<SeedReport> {
    let sports: Vec<SportSeed> =
        serde_json::from_str(STATIC_SPORTS_JSON).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    let age_groups: Vec<AgeGroupSeed> = serde_json::from_str(STATIC_AGE_GROUPS_JSON)
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    let mut report = SeedReport::default();

    for sport in &sports {
        let result = sqlx::query("INSERT OR IGNORE INTO sports (name, slug) VALUES (?, ?)")
            .bind(&sport.name)
            .bind(&sport.slug)
            .execute(storage.pool())
            .await?;
        report.sports += result.rows_affected() as u32;
    }

    for group in &age_groups {
        let result =
            sqlx::query("INSERT OR IGNORE INTO age_groups (name, sort_order) VALUES (?, ?)")
                .bind(&group.name)
                .bind(group.order)
                .execute(storage.pool())
                .await?;
        report.age_groups += result.rows_affected() as u32;
    }

    info!(
        "seed applied: {} sports, {} age groups inserted",
        report.sports, report.age_groups
    );

    Ok(report)
}
