use crate::rows::{id_u32, parse_json};
use crate::{StoreResult, Storage};
use chrono::Utc;
use sportdesk_core::{Venue, slugify};
use serde_json::Value;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

fn map_venue(row: &SqliteRow) -> Venue {
    Venue {
        id: id_u32(row.get("id")),
        name: row.get("name"),
        slug: row.get("slug"),
        address: row.get("address"),
        capacity: row.get("capacity"),
        contact: row.get("contact"),
        available_slots: parse_json(row.get("available_slots")),
        additional_info: row.get("additional_info"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

pub struct VenueFields {
    pub name: String,
    pub address: String,
    pub capacity: Option<i32>,
    pub contact: String,
    pub available_slots: Value,
    pub additional_info: Option<String>,
}

impl Storage {
    pub async fn create_venue(&self, fields: VenueFields) -> StoreResult<Venue> {
        let slug = slugify(&fields.name);
        let now = Utc::now();
        let slots = serde_json::to_string(&fields.available_slots)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        let result = sqlx::query(
            "INSERT INTO venues \
             (name, slug, address, capacity, contact, available_slots, additional_info, \
              created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&fields.name)
        .bind(&slug)
        .bind(&fields.address)
        .bind(fields.capacity)
        .bind(&fields.contact)
        .bind(&slots)
        .bind(&fields.additional_info)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        Ok(Venue {
            id: result.last_insert_rowid() as u32,
            name: fields.name,
            slug,
            address: fields.address,
            capacity: fields.capacity,
            contact: fields.contact,
            available_slots: fields.available_slots,
            additional_info: fields.additional_info,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn venues(&self) -> StoreResult<Vec<Venue>> {
        let rows = sqlx::query("SELECT * FROM venues ORDER BY name")
            .fetch_all(self.pool())
            .await?;
        Ok(rows.iter().map(map_venue).collect())
    }

    pub async fn venue_by_id(&self, id: u32) -> StoreResult<Option<Venue>> {
        let row = sqlx::query("SELECT * FROM venues WHERE id = ?")
            .bind(id as i64)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_venue))
    }

    pub async fn venue_by_slug(&self, slug: &str) -> StoreResult<Option<Venue>> {
        let row = sqlx::query("SELECT * FROM venues WHERE slug = ?")
            .bind(slug)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_venue))
    }
}
