use std::collections::HashMap;

use async_trait::async_trait;
use model::{Amount, DeliveryItem, DeliveryNote, DeliveryState, ItemId, NoteHeader, NoteId};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row, postgres::PgPoolOptions, postgres::PgRow};
use uuid::Uuid;

use crate::{Result, StoreError, store::NoteStore};

const UNIQUE_CODE_CONSTRAINT: &str = "delivery_notes_code_key";

const SELECT_NOTES: &str = r#"
    SELECT id, code, contractor_id, subcontractor_id, site_name, date, state, notes
    FROM delivery_notes
"#;

const SELECT_ITEMS: &str = r#"
    SELECT id, delivery_note_id, description, quantity, unit, unit_price
    FROM delivery_items
"#;

/// PostgreSQL-backed note store implementation.
#[derive(Clone)]
pub struct PostgresNoteStore {
    pool: PgPool,
}

impl PostgresNoteStore {
    /// Creates a new PostgreSQL note store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_header(row: &PgRow) -> Result<(NoteId, NoteHeader, DeliveryState)> {
        let id = NoteId::from_uuid(row.try_get::<Uuid, _>("id")?);
        let state: String = row.try_get("state")?;
        let state = state
            .parse::<DeliveryState>()
            .map_err(|e| StoreError::Corrupt {
                note_id: id,
                reason: e.to_string(),
            })?;

        let header = NoteHeader {
            code: row.try_get("code")?,
            contractor_id: row.try_get::<i64, _>("contractor_id")?.into(),
            subcontractor_id: row.try_get::<i64, _>("subcontractor_id")?.into(),
            site_name: row.try_get("site_name")?,
            date: row.try_get("date")?,
            notes: row.try_get("notes")?,
        };

        Ok((id, header, state))
    }

    fn row_to_item(row: &PgRow) -> Result<(NoteId, DeliveryItem)> {
        let note_id = NoteId::from_uuid(row.try_get::<Uuid, _>("delivery_note_id")?);
        let amount = |column: &str| -> Result<Amount> {
            let value: Decimal = row.try_get(column)?;
            Amount::try_from(value).map_err(|e| StoreError::Corrupt {
                note_id,
                reason: format!("{column}: {e}"),
            })
        };

        let item = DeliveryItem {
            id: ItemId::from_uuid(row.try_get::<Uuid, _>("id")?),
            description: row.try_get("description")?,
            quantity: amount("quantity")?,
            unit: row.try_get("unit")?,
            unit_price: amount("unit_price")?,
        };

        Ok((note_id, item))
    }
}

fn map_unique_violation(err: sqlx::Error, code: &str) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.constraint() == Some(UNIQUE_CODE_CONSTRAINT)
    {
        return StoreError::DuplicateCode(code.to_string());
    }
    StoreError::Database(err)
}

#[async_trait]
impl NoteStore for PostgresNoteStore {
    #[tracing::instrument(skip(self, note), fields(note_id = %note.id()))]
    async fn save(&self, note: &DeliveryNote) -> Result<()> {
        let note_id = note.id().as_uuid();

        // Start a transaction
        let mut tx = self.pool.begin().await?;

        // Header row first, so item rows always have their parent
        sqlx::query(
            r#"
            INSERT INTO delivery_notes (id, code, contractor_id, subcontractor_id, site_name, date, state, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                code = EXCLUDED.code,
                contractor_id = EXCLUDED.contractor_id,
                subcontractor_id = EXCLUDED.subcontractor_id,
                site_name = EXCLUDED.site_name,
                date = EXCLUDED.date,
                state = EXCLUDED.state,
                notes = EXCLUDED.notes
            "#,
        )
        .bind(note_id)
        .bind(note.code())
        .bind(note.contractor_id().as_i64())
        .bind(note.subcontractor_id().as_i64())
        .bind(note.site_name())
        .bind(note.date())
        .bind(note.state().as_str())
        .bind(note.notes())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, note.code()))?;

        // Drop items that are no longer part of the aggregate
        let item_ids: Vec<Uuid> = note.items().iter().map(|item| item.id.as_uuid()).collect();
        sqlx::query("DELETE FROM delivery_items WHERE delivery_note_id = $1 AND NOT (id = ANY($2))")
            .bind(note_id)
            .bind(&item_ids)
            .execute(&mut *tx)
            .await?;

        for (position, item) in note.items().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO delivery_items (id, delivery_note_id, position, description, quantity, unit, unit_price)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (id) DO UPDATE SET
                    position = EXCLUDED.position,
                    description = EXCLUDED.description,
                    quantity = EXCLUDED.quantity,
                    unit = EXCLUDED.unit,
                    unit_price = EXCLUDED.unit_price
                "#,
            )
            .bind(item.id.as_uuid())
            .bind(note_id)
            .bind(position as i32)
            .bind(&item.description)
            .bind(item.quantity.value())
            .bind(&item.unit)
            .bind(item.unit_price.value())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get(&self, id: NoteId) -> Result<Option<DeliveryNote>> {
        let row: Option<PgRow> = sqlx::query(&format!("{SELECT_NOTES} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let (id, header, state) = Self::row_to_header(&row)?;

        let item_rows = sqlx::query(&format!(
            "{SELECT_ITEMS} WHERE delivery_note_id = $1 ORDER BY position ASC"
        ))
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let items = item_rows
            .iter()
            .map(|row| Self::row_to_item(row).map(|(_, item)| item))
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(DeliveryNote::restore(id, header, state, items)))
    }

    async fn list(&self) -> Result<Vec<DeliveryNote>> {
        let note_rows = sqlx::query(&format!("{SELECT_NOTES} ORDER BY code ASC"))
            .fetch_all(&self.pool)
            .await?;
        let item_rows = sqlx::query(&format!(
            "{SELECT_ITEMS} ORDER BY delivery_note_id ASC, position ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_note: HashMap<NoteId, Vec<DeliveryItem>> = HashMap::new();
        for row in &item_rows {
            let (note_id, item) = Self::row_to_item(row)?;
            items_by_note.entry(note_id).or_default().push(item);
        }

        note_rows
            .iter()
            .map(|row| {
                let (id, header, state) = Self::row_to_header(row)?;
                let items = items_by_note.remove(&id).unwrap_or_default();
                Ok(DeliveryNote::restore(id, header, state, items))
            })
            .collect()
    }
}
