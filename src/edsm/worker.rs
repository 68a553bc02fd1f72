//! Background EDSM lookups.
//!
//! Each lookup runs on its own thread and posts a `LookupReply` back over a
//! channel; the UI thread drains it with `poll`. Every request is tagged
//! with a sequence number, and only the reply to the newest request is
//! accepted. A slow reply for a system we have already left is dropped
//! instead of overwriting fresher rows.

use std::sync::mpsc;

use super::client::{EdsmClient, SystemBodies};
use crate::error::LookupError;

/// Result of one lookup, tagged with the request it answers.
#[derive(Debug)]
pub struct LookupReply {
    pub seq: u64,
    pub system: String,
    pub outcome: Result<SystemBodies, LookupError>,
}

pub struct LookupDispatcher {
    client: Option<EdsmClient>,
    tx: mpsc::Sender<LookupReply>,
    rx: mpsc::Receiver<LookupReply>,
    issued: u64,
    expected: Option<u64>,
}

impl Default for LookupDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupDispatcher {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client: None,
            tx,
            rx,
            issued: 0,
            expected: None,
        }
    }

    /// Use a specific client instead of building the default one lazily.
    pub fn with_client(client: EdsmClient) -> Self {
        Self {
            client: Some(client),
            ..Self::new()
        }
    }

    /// Sequence number of the request whose reply will be accepted.
    pub fn expected(&self) -> Option<u64> {
        self.expected
    }

    /// Start a lookup for `system`. `notify` runs on the worker thread once
    /// the reply is queued.
    pub fn request<F>(&mut self, system: &str, notify: F) -> u64
    where
        F: FnOnce() + Send + 'static,
    {
        let seq = self.next_seq();

        let client = match self.client() {
            Ok(client) => client,
            Err(e) => {
                self.reject(seq, system, e);
                notify();
                return seq;
            }
        };

        let tx = self.tx.clone();
        let worker_system = system.to_string();
        let spawned = std::thread::Builder::new()
            .name("EDSM worker".into())
            .spawn(move || {
                let outcome = client.bodies(&worker_system);
                let _ = tx.send(LookupReply {
                    seq,
                    system: worker_system,
                    outcome,
                });
                notify();
            });
        if let Err(e) = spawned {
            log::error!("Cannot start EDSM worker: {}", e);
            self.reject(seq, system, LookupError::Worker(e));
        }
        seq
    }

    /// Forget every outstanding request, e.g. after a jump.
    pub fn invalidate(&mut self) {
        self.expected = None;
    }

    /// The newest accepted reply, if one has arrived. Stale replies are
    /// drained and dropped.
    pub fn poll(&mut self) -> Option<LookupReply> {
        let mut accepted = None;
        while let Ok(reply) = self.rx.try_recv() {
            if Some(reply.seq) == self.expected {
                self.expected = None;
                accepted = Some(reply);
            } else {
                log::debug!(
                    "Dropping stale EDSM reply #{} for {}",
                    reply.seq,
                    reply.system
                );
            }
        }
        accepted
    }

    /// Queue a failed reply for `seq` without touching the network.
    fn reject(&self, seq: u64, system: &str, error: LookupError) {
        let _ = self.tx.send(LookupReply {
            seq,
            system: system.to_string(),
            outcome: Err(error),
        });
    }

    fn next_seq(&mut self) -> u64 {
        self.issued += 1;
        self.expected = Some(self.issued);
        self.issued
    }

    fn client(&mut self) -> Result<EdsmClient, LookupError> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        let client = EdsmClient::new()?;
        self.client = Some(client.clone());
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(seq: u64, system: &str) -> LookupReply {
        LookupReply {
            seq,
            system: system.into(),
            outcome: Ok(SystemBodies {
                name: system.into(),
                bodies: Vec::new(),
            }),
        }
    }

    #[test]
    fn accepts_only_the_newest_request() {
        let mut dispatcher = LookupDispatcher::new();
        let first = dispatcher.next_seq();
        let second = dispatcher.next_seq();
        assert!(second > first);

        // The newer reply arrives first, then the stale one.
        dispatcher.tx.send(reply(second, "Lave")).unwrap();
        dispatcher.tx.send(reply(first, "Sol")).unwrap();

        let accepted = dispatcher.poll().unwrap();
        assert_eq!(accepted.system, "Lave");
        assert!(dispatcher.poll().is_none());
    }

    #[test]
    fn stale_reply_after_newer_request_is_dropped() {
        let mut dispatcher = LookupDispatcher::new();
        let first = dispatcher.next_seq();
        dispatcher.tx.send(reply(first, "Sol")).unwrap();
        let _second = dispatcher.next_seq();
        assert!(dispatcher.poll().is_none());
    }

    #[test]
    fn invalidate_drops_in_flight_replies() {
        let mut dispatcher = LookupDispatcher::new();
        let seq = dispatcher.next_seq();
        dispatcher.invalidate();
        dispatcher.tx.send(reply(seq, "Sol")).unwrap();
        assert!(dispatcher.poll().is_none());
        assert_eq!(dispatcher.expected(), None);
    }

    #[test]
    fn worker_start_failure_is_reported_for_its_request() {
        let mut dispatcher = LookupDispatcher::new();
        let seq = dispatcher.next_seq();
        dispatcher.reject(
            seq,
            "Sol",
            LookupError::Worker(std::io::Error::new(std::io::ErrorKind::Other, "no threads")),
        );

        let reply = dispatcher.poll().unwrap();
        assert_eq!(reply.seq, seq);
        assert!(matches!(reply.outcome, Err(LookupError::Worker(_))));
        assert_eq!(dispatcher.expected(), None);
    }

    #[test]
    fn unreachable_server_reports_an_error() {
        // Port 9 (discard) on localhost is not expected to speak HTTP.
        let client = EdsmClient::with_base("http://127.0.0.1:9").unwrap();
        let mut dispatcher = LookupDispatcher::with_client(client);
        let (done_tx, done_rx) = mpsc::channel();
        let seq = dispatcher.request("Sol", move || {
            let _ = done_tx.send(());
        });
        done_rx
            .recv_timeout(std::time::Duration::from_secs(15))
            .unwrap();

        let reply = dispatcher.poll().unwrap();
        assert_eq!(reply.seq, seq);
        assert_eq!(reply.system, "Sol");
        assert!(reply.outcome.is_err());
    }
}
