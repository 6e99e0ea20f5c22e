//! Organization repository contract and SQLite implementation.

use crate::model::organization::{Organization, OrganizationId};
use crate::model::prize::Prize;
use crate::model::RecordKind;
use crate::repo::prize_repo::prize_from_row;
use crate::repo::{ensure_schema_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for organization CRUD and the one-to-one prize
/// lookup.
pub trait OrganizationRepository {
    fn create_organization(&self, organization: &Organization) -> RepoResult<OrganizationId>;
    fn update_organization(&self, organization: &Organization) -> RepoResult<()>;
    fn get_organization(&self, id: OrganizationId) -> RepoResult<Option<Organization>>;
    fn list_organizations(&self) -> RepoResult<Vec<Organization>>;
    fn delete_organization(&self, id: OrganizationId) -> RepoResult<()>;
    /// The prize endowed by the organization, if any.
    fn prize_for_organization(&self, id: OrganizationId) -> RepoResult<Option<Prize>>;
}

/// SQLite-backed organization repository.
pub struct SqliteOrganizationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOrganizationRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, &["organizations", "prizes"])?;
        Ok(Self { conn })
    }
}

impl OrganizationRepository for SqliteOrganizationRepository<'_> {
    fn create_organization(&self, organization: &Organization) -> RepoResult<OrganizationId> {
        self.conn.execute(
            "INSERT INTO organizations (name, description) VALUES (?1, ?2);",
            params![
                organization.name.as_str(),
                organization.description.as_str()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_organization(&self, organization: &Organization) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE organizations SET name = ?1, description = ?2 WHERE id = ?3;",
            params![
                organization.name.as_str(),
                organization.description.as_str(),
                organization.id
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Organization,
                id: organization.id,
            });
        }
        Ok(())
    }

    fn get_organization(&self, id: OrganizationId) -> RepoResult<Option<Organization>> {
        let organization = self
            .conn
            .query_row(
                "SELECT id, name, description FROM organizations WHERE id = ?1;",
                [id],
                organization_from_row,
            )
            .optional()?;
        Ok(organization)
    }

    fn list_organizations(&self) -> RepoResult<Vec<Organization>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, description FROM organizations ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut organizations = Vec::new();
        while let Some(row) = rows.next()? {
            organizations.push(organization_from_row(row)?);
        }
        Ok(organizations)
    }

    fn delete_organization(&self, id: OrganizationId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM organizations WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Organization,
                id,
            });
        }
        Ok(())
    }

    fn prize_for_organization(&self, id: OrganizationId) -> RepoResult<Option<Prize>> {
        let prize = self
            .conn
            .query_row(
                "SELECT id, name, description, premiation_date, organization_id, author_id
                 FROM prizes
                 WHERE organization_id = ?1;",
                [id],
                prize_from_row,
            )
            .optional()?;
        Ok(prize)
    }
}

fn organization_from_row(row: &Row<'_>) -> Result<Organization, rusqlite::Error> {
    Ok(Organization {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
    })
}
