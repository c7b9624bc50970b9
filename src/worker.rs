use std::{
    sync::mpsc::{channel, Receiver, Sender, TryRecvError},
    thread,
};

use log::debug;

use crate::{
    board::{Path, PuzzleState},
    error::WorkerError,
    ida::solve_optimal,
};

/// Runs the optimal solver on its own thread.
///
/// Boards go in by value on one channel and paths come back on another,
/// one path per submitted board, in submission order. A search cannot be
/// interrupted: dropping the worker closes the request channel, and the
/// thread exits once any search already in progress has finished.
#[derive(Debug)]
pub struct SolverWorker {
    requests: Sender<PuzzleState>,
    responses: Receiver<Path>,
}

impl SolverWorker {
    pub fn spawn() -> Result<Self, WorkerError> {
        let (requests, inbox) = channel::<PuzzleState>();
        let (outbox, responses) = channel::<Path>();

        thread::Builder::new()
            .name("optimal-solver".into())
            .spawn(move || {
                for start in inbox {
                    debug!("solver worker received\n{start}");
                    let path = solve_optimal(&start);
                    if outbox.send(path).is_err() {
                        debug!("solver worker has no one to answer, shutting down");
                        return;
                    }
                }
            })?;

        Ok(SolverWorker {
            requests,
            responses,
        })
    }

    pub fn submit(&self, start: PuzzleState) -> Result<(), WorkerError> {
        self.requests
            .send(start)
            .map_err(|_| WorkerError::Disconnected)
    }

    /// Blocks until the next path is ready.
    pub fn recv(&self) -> Result<Path, WorkerError> {
        self.responses.recv().map_err(|_| WorkerError::Disconnected)
    }

    pub fn try_recv(&self) -> Result<Option<Path>, WorkerError> {
        match self.responses.try_recv() {
            Ok(path) => Ok(Some(path)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(WorkerError::Disconnected),
        }
    }

    pub fn solve(&self, start: PuzzleState) -> Result<Path, WorkerError> {
        self.submit(start)?;
        self.recv()
    }
}
