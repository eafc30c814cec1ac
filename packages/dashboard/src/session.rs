//! Async driver that runs reducer commands on tokio.

use std::sync::Arc;

use rand::Rng;
use site_analysis_site_models::Coordinate;
use tokio::sync::mpsc;

use crate::fetch::MockDataService;
use crate::state::DashboardState;
use crate::update::{Command, Message, init, update};

/// Owns one dashboard's state and executes the fetches it asks for.
///
/// Must be created inside a tokio runtime: fetch commands are spawned as
/// tasks and their results come back through an internal channel.
pub struct Session<R> {
    state: DashboardState,
    rng: R,
    service: Arc<MockDataService>,
    sender: mpsc::UnboundedSender<Message>,
    receiver: mpsc::UnboundedReceiver<Message>,
    in_flight: usize,
}

impl<R: Rng> Session<R> {
    /// Starts a session centered on `coordinate` and kicks off the
    /// initial fetches.
    pub fn start(coordinate: Coordinate, service: Arc<MockDataService>, rng: R) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (state, commands) = init(coordinate);

        let mut session = Self {
            state,
            rng,
            service,
            sender,
            receiver,
            in_flight: 0,
        };
        session.run(commands);
        session
    }

    #[must_use]
    pub const fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Number of fetches whose results have not been applied yet,
    /// including ones that will be discarded as stale.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Applies `message` and spawns any fetches it produces.
    pub fn dispatch(&mut self, message: Message) {
        let (state, commands) = update(self.state.clone(), message, &mut self.rng);
        self.state = state;
        self.run(commands);
    }

    /// Waits for the next fetch to complete and applies it.
    ///
    /// Returns `false` without waiting when nothing is in flight.
    pub async fn next_completion(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }

        match self.receiver.recv().await {
            Some(message) => {
                self.in_flight -= 1;
                self.dispatch(message);
                true
            }
            None => false,
        }
    }

    /// Waits until every in-flight fetch has completed.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    fn run(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::Fetch(ticket) => {
                    let service = Arc::clone(&self.service);
                    let sender = self.sender.clone();
                    self.in_flight += 1;

                    tokio::task::spawn(async move {
                        let result = service.fetch(ticket.kind, ticket.coordinate).await;
                        if sender
                            .send(Message::BundleLoaded { ticket, result })
                            .is_err()
                        {
                            log::debug!("Session closed before {} result arrived", ticket.kind);
                        }
                    });
                }
            }
        }
    }
}
