use std::any::Any;
use std::fmt;
use std::thread::{self, JoinHandle};

use tracing::error;

use crate::error::{ErrorKind, StoreError, StoreResult};
use crate::store_error;
use crate::types::ConsumerId;

/// Kinds of worker threads in a run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WorkerType {
    Producer,
    Consumer { consumer_id: ConsumerId },
}

impl WorkerType {
    /// Name given to the OS thread running the worker.
    pub fn thread_name(&self) -> String {
        match self {
            WorkerType::Producer => "producer".to_string(),
            WorkerType::Consumer { consumer_id } => format!("consumer-{consumer_id}"),
        }
    }

    fn panic_kind(&self) -> ErrorKind {
        match self {
            WorkerType::Producer => ErrorKind::ProducerPanic,
            WorkerType::Consumer { .. } => ErrorKind::ConsumerPanic,
        }
    }
}

impl fmt::Display for WorkerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.thread_name())
    }
}

/// A unit of work that runs on its own OS thread.
pub trait Worker {
    type Handle: WorkerHandle;

    /// Spawns the worker thread and returns immediately with its handle.
    fn start(self) -> StoreResult<Self::Handle>;
}

/// Handle to a running worker.
pub trait WorkerHandle {
    /// Value produced by the worker when it returns.
    type Output;

    /// Whether the worker thread has returned. Never blocks.
    fn is_finished(&self) -> bool;

    /// Blocks until the worker returns.
    ///
    /// A panic of the worker thread is converted into an error instead of being propagated.
    fn wait(self) -> StoreResult<Self::Output>;
}

/// [`WorkerHandle`] backed by a [`JoinHandle`].
#[derive(Debug)]
pub struct ThreadWorkerHandle<T> {
    worker_type: WorkerType,
    handle: JoinHandle<StoreResult<T>>,
}

impl<T> ThreadWorkerHandle<T>
where
    T: Send + 'static,
{
    /// Spawns `body` on a named thread.
    pub fn spawn<F>(worker_type: WorkerType, body: F) -> StoreResult<Self>
    where
        F: FnOnce() -> StoreResult<T> + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name(worker_type.thread_name())
            .spawn(body)
            .map_err(|err| {
                store_error!(
                    ErrorKind::ThreadSpawnFailed,
                    "Failed to spawn worker thread",
                    worker_type,
                    source: err
                )
            })?;

        Ok(Self {
            worker_type,
            handle,
        })
    }
}

impl<T> WorkerHandle for ThreadWorkerHandle<T> {
    type Output = T;

    fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    fn wait(self) -> StoreResult<T> {
        match self.handle.join() {
            Ok(result) => result,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(worker = %self.worker_type, %message, "worker panicked");

                Err(panic_error(self.worker_type, message))
            }
        }
    }
}

fn panic_error(worker_type: WorkerType, message: String) -> StoreError {
    store_error!(
        worker_type.panic_kind(),
        "Worker thread panicked",
        format!("{worker_type}: {message}")
    )
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_worker_result() {
        let handle = ThreadWorkerHandle::spawn(WorkerType::Producer, || Ok(7u64)).unwrap();
        assert_eq!(handle.wait().unwrap(), 7);
    }

    #[test]
    fn panic_becomes_error_of_matching_kind() {
        let handle = ThreadWorkerHandle::<u64>::spawn(
            WorkerType::Consumer { consumer_id: 3 },
            || panic!("shelf collapsed"),
        )
        .unwrap();

        let err = handle.wait().unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConsumerPanic);
        assert_eq!(err.detail(), Some("consumer-3: shelf collapsed"));
    }

    #[test]
    fn thread_names_identify_workers() {
        assert_eq!(WorkerType::Producer.thread_name(), "producer");
        assert_eq!(
            WorkerType::Consumer { consumer_id: 12 }.to_string(),
            "consumer-12"
        );
    }
}
