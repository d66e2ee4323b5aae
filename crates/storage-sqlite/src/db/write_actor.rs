use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use log::error;
use receivables_core::errors::{DatabaseError, Error, Result};
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// A write job runs against the actor's connection inside an immediate transaction.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type ErasedResult = Result<Box<dyn Any + Send + 'static>>;
type Envelope = (Job<Box<dyn Any + Send + 'static>>, oneshot::Sender<ErasedResult>);

const WRITE_QUEUE_CAPACITY: usize = 1024;

fn actor_stopped() -> Error {
    Error::Database(DatabaseError::Internal(
        "Writer actor is not running".to_string(),
    ))
}

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<Envelope>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// Jobs run one at a time; an `Err` from the job rolls its transaction
    /// back and is returned to the caller as is.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| actor_stopped())?;

        let boxed = ret_rx.await.map_err(|_| actor_stopped())??;
        boxed.downcast::<T>().map(|v| *v).map_err(|_| {
            Error::Unexpected("Writer actor returned a value of the wrong type".to_string())
        })
    }
}

/// Spawns a background Tokio task that acts as the single writer to the database.
///
/// Jobs are processed serially, each on a pooled connection inside an
/// immediate transaction.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<Envelope>(WRITE_QUEUE_CAPACITY);

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result: ErasedResult = match pool.get() {
                Ok(mut conn) => conn
                    .immediate_transaction::<_, StorageError, _>(|c| {
                        job(c).map_err(StorageError::from)
                    })
                    .map_err(Error::from),
                Err(e) => {
                    error!("Writer actor could not get a connection: {}", e);
                    Err(StorageError::from(e).into())
                }
            };

            // The requester may have gone away (timeout, cancellation).
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
