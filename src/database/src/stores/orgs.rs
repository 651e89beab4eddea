use crate::rows::{id_u32, opt_id_u32};
use crate::{StoreResult, Storage};
use chrono::Utc;
use sportdesk_core::{Club, Federation, HeadFederation, OrgNode, slugify};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use std::collections::HashMap;

fn map_club(row: &SqliteRow) -> Club {
    Club {
        id: id_u32(row.get("id")),
        name: row.get("name"),
        slug: row.get("slug"),
        federation_id: opt_id_u32(row.get("federation_id")),
        sport_id: opt_id_u32(row.get("sport_id")),
        address: row.get("address"),
        contact_email: row.get("contact_email"),
        phone: row.get("phone"),
        website: row.get("website"),
        additional_info: row.get("additional_info"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn map_federation(row: &SqliteRow) -> Federation {
    Federation {
        id: id_u32(row.get("id")),
        name: row.get("name"),
        slug: row.get("slug"),
        parent_id: opt_id_u32(row.get("parent_id")),
        head_federation_id: opt_id_u32(row.get("head_federation_id")),
        sport_id: opt_id_u32(row.get("sport_id")),
        country: row.get("country"),
        contact_email: row.get("contact_email"),
        address: row.get("address"),
        phone_number: row.get("phone_number"),
        website: row.get("website"),
        additional_info: row.get("additional_info"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn map_head_federation(row: &SqliteRow) -> HeadFederation {
    HeadFederation {
        id: id_u32(row.get("id")),
        name: row.get("name"),
        slug: row.get("slug"),
        parent_id: opt_id_u32(row.get("parent_id")),
        sport_id: opt_id_u32(row.get("sport_id")),
        country: row.get("country"),
        contact_email: row.get("contact_email"),
        address: row.get("address"),
        phone_number: row.get("phone_number"),
        website: row.get("website"),
        additional_info: row.get("additional_info"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn map_org_node(row: &SqliteRow) -> OrgNode {
    OrgNode {
        id: id_u32(row.get("id")),
        name: row.get("name"),
        slug: row.get("slug"),
        parent_id: opt_id_u32(row.get("parent_id")),
    }
}

/// Shared field set for club create/edit. The slug is always re-derived
/// from the name inside the store.
pub struct ClubFields {
    pub name: String,
    pub federation_id: Option<u32>,
    pub sport_id: Option<u32>,
    pub address: String,
    pub contact_email: Option<String>,
    pub phone: String,
    pub website: Option<String>,
    pub additional_info: Option<String>,
}

pub struct FederationFields {
    pub name: String,
    pub parent_id: Option<u32>,
    pub head_federation_id: Option<u32>,
    pub sport_id: Option<u32>,
    pub country: String,
    pub contact_email: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub additional_info: Option<String>,
}

pub struct HeadFederationFields {
    pub name: String,
    pub parent_id: Option<u32>,
    pub sport_id: Option<u32>,
    pub country: String,
    pub contact_email: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub additional_info: Option<String>,
}

impl Storage {
    pub async fn create_club(&self, fields: ClubFields) -> StoreResult<Club> {
        let slug = slugify(&fields.name);
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO clubs \
             (name, slug, federation_id, sport_id, address, contact_email, phone, website, \
              additional_info, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&fields.name)
        .bind(&slug)
        .bind(fields.federation_id.map(|id| id as i64))
        .bind(fields.sport_id.map(|id| id as i64))
        .bind(&fields.address)
        .bind(&fields.contact_email)
        .bind(&fields.phone)
        .bind(&fields.website)
        .bind(&fields.additional_info)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.club_by_id(result.last_insert_rowid() as u32)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn update_club(&self, id: u32, fields: ClubFields) -> StoreResult<Option<Club>> {
        let slug = slugify(&fields.name);
        let result = sqlx::query(
            "UPDATE clubs SET name = ?, slug = ?, federation_id = ?, sport_id = ?, address = ?, \
             contact_email = ?, phone = ?, website = ?, additional_info = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&fields.name)
        .bind(&slug)
        .bind(fields.federation_id.map(|id| id as i64))
        .bind(fields.sport_id.map(|id| id as i64))
        .bind(&fields.address)
        .bind(&fields.contact_email)
        .bind(&fields.phone)
        .bind(&fields.website)
        .bind(&fields.additional_info)
        .bind(Utc::now())
        .bind(id as i64)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.club_by_id(id).await
    }

    pub async fn clubs(&self) -> StoreResult<Vec<Club>> {
        let rows = sqlx::query("SELECT * FROM clubs ORDER BY name")
            .fetch_all(self.pool())
            .await?;
        Ok(rows.iter().map(map_club).collect())
    }

    pub async fn club_by_id(&self, id: u32) -> StoreResult<Option<Club>> {
        let row = sqlx::query("SELECT * FROM clubs WHERE id = ?")
            .bind(id as i64)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_club))
    }

    pub async fn club_by_slug(&self, slug: &str) -> StoreResult<Option<Club>> {
        let row = sqlx::query("SELECT * FROM clubs WHERE slug = ?")
            .bind(slug)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_club))
    }

    pub async fn search_clubs(&self, query: &str) -> StoreResult<Vec<Club>> {
        let pattern = format!("%{}%", query);
        let rows = sqlx::query(
            "SELECT * FROM clubs WHERE name LIKE ? OR address LIKE ? ORDER BY name",
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.iter().map(map_club).collect())
    }

    pub async fn create_federation(&self, fields: FederationFields) -> StoreResult<Federation> {
        let slug = slugify(&fields.name);
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO federations \
             (name, slug, parent_id, head_federation_id, sport_id, country, contact_email, \
              address, phone_number, website, additional_info, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&fields.name)
        .bind(&slug)
        .bind(fields.parent_id.map(|id| id as i64))
        .bind(fields.head_federation_id.map(|id| id as i64))
        .bind(fields.sport_id.map(|id| id as i64))
        .bind(&fields.country)
        .bind(&fields.contact_email)
        .bind(&fields.address)
        .bind(&fields.phone_number)
        .bind(&fields.website)
        .bind(&fields.additional_info)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.federation_by_id(result.last_insert_rowid() as u32)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn update_federation(
        &self,
        id: u32,
        fields: FederationFields,
    ) -> StoreResult<Option<Federation>> {
        let slug = slugify(&fields.name);
        let result = sqlx::query(
            "UPDATE federations SET name = ?, slug = ?, parent_id = ?, head_federation_id = ?, \
             sport_id = ?, country = ?, contact_email = ?, address = ?, phone_number = ?, \
             website = ?, additional_info = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&fields.name)
        .bind(&slug)
        .bind(fields.parent_id.map(|id| id as i64))
        .bind(fields.head_federation_id.map(|id| id as i64))
        .bind(fields.sport_id.map(|id| id as i64))
        .bind(&fields.country)
        .bind(&fields.contact_email)
        .bind(&fields.address)
        .bind(&fields.phone_number)
        .bind(&fields.website)
        .bind(&fields.additional_info)
        .bind(Utc::now())
        .bind(id as i64)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.federation_by_id(id).await
    }

    pub async fn federations(&self) -> StoreResult<Vec<Federation>> {
        let rows = sqlx::query("SELECT * FROM federations ORDER BY name")
            .fetch_all(self.pool())
            .await?;
        Ok(rows.iter().map(map_federation).collect())
    }

    pub async fn federation_by_id(&self, id: u32) -> StoreResult<Option<Federation>> {
        let row = sqlx::query("SELECT * FROM federations WHERE id = ?")
            .bind(id as i64)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_federation))
    }

    pub async fn federation_by_slug(&self, slug: &str) -> StoreResult<Option<Federation>> {
        let row = sqlx::query("SELECT * FROM federations WHERE slug = ?")
            .bind(slug)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_federation))
    }

    /// Parent chain of a federation, root first.
    pub async fn federation_hierarchy(&self, id: u32) -> StoreResult<Vec<OrgNode>> {
        let rows = sqlx::query("SELECT id, name, slug, parent_id FROM federations")
            .fetch_all(self.pool())
            .await?;
        Ok(hierarchy_from_rows(&rows, id))
    }

    pub async fn create_head_federation(
        &self,
        fields: HeadFederationFields,
    ) -> StoreResult<HeadFederation> {
        let slug = slugify(&fields.name);
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO head_federations \
             (name, slug, parent_id, sport_id, country, contact_email, address, phone_number, \
              website, additional_info, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&fields.name)
        .bind(&slug)
        .bind(fields.parent_id.map(|id| id as i64))
        .bind(fields.sport_id.map(|id| id as i64))
        .bind(&fields.country)
        .bind(&fields.contact_email)
        .bind(&fields.address)
        .bind(&fields.phone_number)
        .bind(&fields.website)
        .bind(&fields.additional_info)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.head_federation_by_id(result.last_insert_rowid() as u32)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn update_head_federation(
        &self,
        id: u32,
        fields: HeadFederationFields,
    ) -> StoreResult<Option<HeadFederation>> {
        let slug = slugify(&fields.name);
        let result = sqlx::query(
            "UPDATE head_federations SET name = ?, slug = ?, parent_id = ?, sport_id = ?, \
             country = ?, contact_email = ?, address = ?, phone_number = ?, website = ?, \
             additional_info = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&fields.name)
        .bind(&slug)
        .bind(fields.parent_id.map(|id| id as i64))
        .bind(fields.sport_id.map(|id| id as i64))
        .bind(&fields.country)
        .bind(&fields.contact_email)
        .bind(&fields.address)
        .bind(&fields.phone_number)
        .bind(&fields.website)
        .bind(&fields.additional_info)
        .bind(Utc::now())
        .bind(id as i64)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.head_federation_by_id(id).await
    }

    pub async fn head_federations(&self) -> StoreResult<Vec<HeadFederation>> {
        let rows = sqlx::query("SELECT * FROM head_federations ORDER BY name")
            .fetch_all(self.pool())
            .await?;
        Ok(rows.iter().map(map_head_federation).collect())
    }

    pub async fn head_federation_by_id(&self, id: u32) -> StoreResult<Option<HeadFederation>> {
        let row = sqlx::query("SELECT * FROM head_federations WHERE id = ?")
            .bind(id as i64)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_head_federation))
    }

    pub async fn head_federation_by_slug(&self, slug: &str) -> StoreResult<Option<HeadFederation>> {
        let row = sqlx::query("SELECT * FROM head_federations WHERE slug = ?")
            .bind(slug)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.as_ref().map(map_head_federation))
    }

    /// Parent chain of a head federation, root first.
    pub async fn head_federation_hierarchy(&self, id: u32) -> StoreResult<Vec<OrgNode>> {
        let rows = sqlx::query("SELECT id, name, slug, parent_id FROM head_federations")
            .fetch_all(self.pool())
            .await?;
        Ok(hierarchy_from_rows(&rows, id))
    }
}

fn hierarchy_from_rows(rows: &[SqliteRow], start: u32) -> Vec<OrgNode> {
    let nodes: HashMap<u32, OrgNode> = rows
        .iter()
        .map(map_org_node)
        .map(|node| (node.id, node))
        .collect();
    sportdesk_core::hierarchy(start, |id| nodes.get(&id).cloned())
}
