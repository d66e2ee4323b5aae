use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::upsert::excluded;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use receivables_core::receivables::{
    NewReceivable, Receivable, ReceivablePatch, ReceivableRepositoryTrait,
};
use receivables_core::{Error, Result};

use super::model::{ImportedReceivableDB, ReceivableDB, ReceivableWorkflowChangeset};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::receivables;

pub struct ReceivableRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ReceivableRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ReceivableRepository { pool, writer }
    }
}

#[async_trait]
impl ReceivableRepositoryTrait for ReceivableRepository {
    fn list(&self) -> Result<Vec<Receivable>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = receivables::table
            .select(ReceivableDB::as_select())
            .order((receivables::customer_name.asc(), receivables::id.asc()))
            .load::<ReceivableDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Receivable::from).collect())
    }

    fn get_by_id(&self, receivable_id: &str) -> Result<Receivable> {
        let mut conn = get_connection(&self.pool)?;
        receivables::table
            .find(receivable_id)
            .select(ReceivableDB::as_select())
            .first::<ReceivableDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Receivable::from)
            .ok_or_else(|| Error::NotFound(receivable_id.to_string()))
    }

    async fn update(&self, receivable_id: &str, patch: ReceivablePatch) -> Result<Receivable> {
        let receivable_id = receivable_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Receivable> {
                let changeset =
                    ReceivableWorkflowChangeset::from_patch(patch, Utc::now().naive_utc());
                let affected = diesel::update(receivables::table.find(&receivable_id))
                    .set(&changeset)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::NotFound(receivable_id));
                }

                let row = receivables::table
                    .find(&receivable_id)
                    .select(ReceivableDB::as_select())
                    .first::<ReceivableDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Receivable::from(row))
            })
            .await
    }

    async fn upsert_many(&self, records: Vec<NewReceivable>) -> Result<usize> {
        debug!("Upserting {} receivable(s)", records.len());
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let now = Utc::now().naive_utc();
                let mut affected_rows = 0;
                for record in records {
                    let id = record
                        .id
                        .clone()
                        .filter(|id| !id.trim().is_empty())
                        .unwrap_or_else(|| Uuid::new_v4().to_string());
                    let row = ImportedReceivableDB::from_new(record, id, now);

                    affected_rows += diesel::insert_into(receivables::table)
                        .values(&row)
                        .on_conflict(receivables::id)
                        .do_update()
                        .set((
                            receivables::transaction_date.eq(excluded(receivables::transaction_date)),
                            receivables::transaction_type.eq(excluded(receivables::transaction_type)),
                            receivables::document_number.eq(excluded(receivables::document_number)),
                            receivables::customer_name.eq(excluded(receivables::customer_name)),
                            receivables::due_date.eq(excluded(receivables::due_date)),
                            receivables::amount.eq(excluded(receivables::amount)),
                            receivables::open_balance.eq(excluded(receivables::open_balance)),
                            receivables::updated_at.eq(excluded(receivables::updated_at)),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(affected_rows)
            })
            .await
    }
}
