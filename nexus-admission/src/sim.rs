//! Discrete-step admission simulation.
//!
//! Each generation step enqueues a random batch of requests and serves one.
//! Once generation stops, the queue is drained one request per step.

use std::io::{self, Write};

use log::{debug, info};
use rand::Rng;
use thiserror::Error;

use nexus_pqueue::{InvalidCapacity, PriorityQueue};

use crate::config::{ConfigError, SimConfig};
use crate::event_log::{EventLog, LogEntry};
use crate::request::{ByPriority, Request, Served};

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("creating queue: {0}")]
    Queue(#[from] InvalidCapacity),
    #[error("writing event log: {0}")]
    Io(#[from] io::Error),
}

/// Outcome of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Generation steps run.
    pub steps: u64,
    pub total_created: u64,
    pub served_during_generation: u64,
    pub served_during_drain: u64,
    /// Request with the longest wait; the earliest one on ties.
    pub max_wait: Option<Served>,
    pub log_bytes: u64,
}

pub struct Simulation<R, W: Write> {
    config: SimConfig,
    queue: PriorityQueue<Request, ByPriority>,
    rng: R,
    log: EventLog<W>,
    next_id: u64,
    max_wait: Option<Served>,
}

impl<R: Rng, W: Write> Simulation<R, W> {
    /// Validates `config` and builds an idle simulation.
    pub fn new(config: SimConfig, rng: R, sink: W) -> Result<Self, SimError> {
        config.validate()?;
        let queue = PriorityQueue::with_capacity_and_comparer(config.initial_capacity, ByPriority)?;
        Ok(Self {
            config,
            queue,
            rng,
            log: EventLog::new(sink),
            next_id: 0,
            max_wait: None,
        })
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Runs both phases and flushes the log.
    pub fn run(&mut self) -> Result<Summary, SimError> {
        let mut served_during_generation = 0;
        for step in 1..=self.config.steps {
            if self.generation_step(step)?.is_some() {
                served_during_generation += 1;
            }
        }
        info!(
            "generation finished after {} steps, {} requests left",
            self.config.steps,
            self.queue.len()
        );

        let mut served_during_drain = 0;
        let mut step = self.config.steps + 1;
        while self.serve_one(step)?.is_some() {
            served_during_drain += 1;
            step += 1;
        }
        self.log.flush()?;

        Ok(Summary {
            steps: self.config.steps,
            total_created: self.next_id,
            served_during_generation,
            served_during_drain,
            max_wait: self.max_wait,
            log_bytes: self.log.bytes_written(),
        })
    }

    /// Enqueues a random batch stamped with `step`, then serves one request.
    pub fn generation_step(&mut self, step: u64) -> Result<Option<Served>, SimError> {
        let arrivals = self.rng.gen_range(self.config.arrivals());
        for _ in 0..arrivals {
            self.next_id += 1;
            let priority = self.rng.gen_range(self.config.priorities());
            let request = Request::new(self.next_id, priority, step);
            self.queue.add(request);
            self.log.record(&LogEntry::added(&request))?;
            debug!("step {}: added #{} priority {}", step, request.id(), priority);
        }
        info!(
            "step {}: {} arrivals, {} queued",
            step,
            arrivals,
            self.queue.len()
        );
        self.serve_one(step)
    }

    /// Serves the highest-priority request at `step`, if any.
    pub fn serve_one(&mut self, step: u64) -> Result<Option<Served>, SimError> {
        let Some(request) = self.queue.poll() else {
            debug!("step {}: queue empty, nothing to serve", step);
            return Ok(None);
        };
        let served = request.serve(step);
        self.log.record(&LogEntry::removed(&served))?;
        info!(
            "step {}: served #{} (priority {}, waited {} steps)",
            step,
            request.id(),
            request.priority(),
            served.wait_time()
        );

        let longer = self
            .max_wait
            .map_or(true, |best| served.wait_time() > best.wait_time());
        if longer {
            info!("new longest wait: {} steps (#{})", served.wait_time(), request.id());
            self.max_wait = Some(served);
        }
        Ok(Some(served))
    }

    /// Flushes the log and returns its sink.
    pub fn into_log(self) -> io::Result<W> {
        self.log.into_inner()
    }
}
