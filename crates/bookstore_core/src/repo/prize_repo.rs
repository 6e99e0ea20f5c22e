//! Prize repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `prizes` table.
//! - Expose the organization/author probes prize validation needs.
//!
//! # Invariants
//! - `prizes.organization_id` is unique; the schema backs the one-prize-
//!   per-organization rule enforced by the service layer.

use crate::model::author::{Author, AuthorId};
use crate::model::organization::OrganizationId;
use crate::model::prize::{Prize, PrizeId};
use crate::model::RecordKind;
use crate::repo::author_repo::author_from_row;
use crate::repo::{ensure_schema_ready, id_exists, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const PRIZE_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    premiation_date,
    organization_id,
    author_id
FROM prizes";

/// Repository interface for prize CRUD and association probes.
pub trait PrizeRepository {
    fn create_prize(&self, prize: &Prize) -> RepoResult<PrizeId>;
    fn update_prize(&self, prize: &Prize) -> RepoResult<()>;
    fn get_prize(&self, id: PrizeId) -> RepoResult<Option<Prize>>;
    fn list_prizes(&self) -> RepoResult<Vec<Prize>>;
    fn delete_prize(&self, id: PrizeId) -> RepoResult<()>;
    fn organization_exists(&self, id: OrganizationId) -> RepoResult<bool>;
    /// The prize currently endowed by the organization, if any.
    fn prize_for_organization(&self, id: OrganizationId) -> RepoResult<Option<PrizeId>>;
    fn author_exists(&self, id: AuthorId) -> RepoResult<bool>;
    /// The author currently attached to the prize, if any.
    fn author_for_prize(&self, id: PrizeId) -> RepoResult<Option<Author>>;
    /// Rewrites only the prize's author link.
    fn set_author(&self, id: PrizeId, author_id: Option<AuthorId>) -> RepoResult<()>;
}

/// SQLite-backed prize repository.
pub struct SqlitePrizeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePrizeRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, &["prizes", "organizations", "authors"])?;
        Ok(Self { conn })
    }
}

impl PrizeRepository for SqlitePrizeRepository<'_> {
    fn create_prize(&self, prize: &Prize) -> RepoResult<PrizeId> {
        self.conn.execute(
            "INSERT INTO prizes (name, description, premiation_date, organization_id, author_id)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                prize.name.as_str(),
                prize.description.as_deref(),
                prize.premiation_date,
                prize.organization_id,
                prize.author_id,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_prize(&self, prize: &Prize) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE prizes
             SET
                name = ?1,
                description = ?2,
                premiation_date = ?3,
                organization_id = ?4,
                author_id = ?5
             WHERE id = ?6;",
            params![
                prize.name.as_str(),
                prize.description.as_deref(),
                prize.premiation_date,
                prize.organization_id,
                prize.author_id,
                prize.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Prize,
                id: prize.id,
            });
        }

        Ok(())
    }

    fn get_prize(&self, id: PrizeId) -> RepoResult<Option<Prize>> {
        let prize = self
            .conn
            .query_row(
                &format!("{PRIZE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                prize_from_row,
            )
            .optional()?;
        Ok(prize)
    }

    fn list_prizes(&self) -> RepoResult<Vec<Prize>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PRIZE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut prizes = Vec::new();
        while let Some(row) = rows.next()? {
            prizes.push(prize_from_row(row)?);
        }
        Ok(prizes)
    }

    fn delete_prize(&self, id: PrizeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM prizes WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Prize,
                id,
            });
        }
        Ok(())
    }

    fn organization_exists(&self, id: OrganizationId) -> RepoResult<bool> {
        id_exists(self.conn, "organizations", id)
    }

    fn prize_for_organization(&self, id: OrganizationId) -> RepoResult<Option<PrizeId>> {
        let prize_id = self
            .conn
            .query_row(
                "SELECT id FROM prizes WHERE organization_id = ?1;",
                [id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(prize_id)
    }

    fn author_exists(&self, id: AuthorId) -> RepoResult<bool> {
        id_exists(self.conn, "authors", id)
    }

    fn author_for_prize(&self, id: PrizeId) -> RepoResult<Option<Author>> {
        let author = self
            .conn
            .query_row(
                "SELECT a.id, a.name, a.description, a.image, a.birth_date
                 FROM prizes p
                 INNER JOIN authors a ON a.id = p.author_id
                 WHERE p.id = ?1;",
                [id],
                author_from_row,
            )
            .optional()?;
        Ok(author)
    }

    fn set_author(&self, id: PrizeId, author_id: Option<AuthorId>) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE prizes SET author_id = ?1 WHERE id = ?2;",
            params![author_id, id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Prize,
                id,
            });
        }
        Ok(())
    }
}

pub(crate) fn prize_from_row(row: &Row<'_>) -> Result<Prize, rusqlite::Error> {
    Ok(Prize {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        premiation_date: row.get("premiation_date")?,
        organization_id: row.get("organization_id")?,
        author_id: row.get("author_id")?,
    })
}
