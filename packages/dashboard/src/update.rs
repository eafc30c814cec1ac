//! Message handling for [`DashboardState`].
//!
//! [`update`] is the only way state changes. It never performs I/O; work
//! that has to happen outside the reducer is returned as [`Command`]s for
//! the caller (usually [`crate::session::Session`]) to execute.

use rand::Rng;
use site_analysis_site_models::{BundleKind, Coordinate};

use crate::fetch::{BundlePayload, FetchError};
use crate::map_view::{ClickOutcome, resolve_click};
use crate::state::{
    CUSTOM_LOCATION, DashboardState, LayerToggle, Panel, RadiusMiles, RiskView, Tab,
    location_name_or_default,
};

/// Identifies the selection a fetch was issued for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchTicket {
    pub kind: BundleKind,
    pub coordinate: Coordinate,
    pub generation: u64,
}

impl FetchTicket {
    /// Whether a result for this ticket still belongs in `state`.
    #[must_use]
    pub fn is_current(&self, state: &DashboardState) -> bool {
        self.generation == state.generation && self.coordinate == state.coordinate
    }
}

#[derive(Debug)]
pub enum Message {
    SelectLocation {
        coordinate: Coordinate,
        name: Option<String>,
    },
    ToggleLayer {
        layer: LayerToggle,
        enabled: bool,
    },
    SetRadius(RadiusMiles),
    SetTab(Tab),
    SetRiskView(RiskView),
    MapClick {
        x_fraction: f64,
        y_fraction: f64,
    },
    /// Runs a full analysis for the open property popup.
    AnalyzePopup,
    DismissPopup,
    BundleLoaded {
        ticket: FetchTicket,
        result: Result<BundlePayload, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Fetch(FetchTicket),
}

/// Builds the starting state for `coordinate` and the fetches that fill it.
#[must_use]
pub fn init(coordinate: Coordinate) -> (DashboardState, Vec<Command>) {
    let state = DashboardState::new(coordinate);
    let commands = fetch_commands(&state);
    (state, commands)
}

/// Applies `message` to `state`.
pub fn update<R: Rng>(
    state: DashboardState,
    message: Message,
    rng: &mut R,
) -> (DashboardState, Vec<Command>) {
    match message {
        Message::SelectLocation { coordinate, name } => select_location(state, coordinate, name),
        Message::ToggleLayer { layer, enabled } => (
            DashboardState {
                layers: state.layers.with(layer, enabled),
                ..state
            },
            vec![],
        ),
        Message::SetRadius(radius) => (DashboardState { radius, ..state }, vec![]),
        Message::SetTab(tab) => (DashboardState { tab, ..state }, vec![]),
        Message::SetRiskView(risk_view) => (DashboardState { risk_view, ..state }, vec![]),
        Message::MapClick {
            x_fraction,
            y_fraction,
        } => match resolve_click(state.coordinate, x_fraction, y_fraction, rng) {
            ClickOutcome::Property(popup) => (
                DashboardState {
                    popup: Some(popup),
                    ..state
                },
                vec![],
            ),
            ClickOutcome::Location(coordinate) => {
                select_location(state, coordinate, Some(CUSTOM_LOCATION.to_string()))
            }
        },
        Message::AnalyzePopup => match state.popup.clone() {
            Some(popup) => select_location(state, popup.coordinate, Some(popup.name)),
            None => (state, vec![]),
        },
        Message::DismissPopup => (DashboardState { popup: None, ..state }, vec![]),
        Message::BundleLoaded { ticket, result } => (apply_result(state, ticket, result), vec![]),
    }
}

fn select_location(
    state: DashboardState,
    coordinate: Coordinate,
    name: Option<String>,
) -> (DashboardState, Vec<Command>) {
    let location_name = location_name_or_default(name.as_deref()).to_string();

    log::info!("Selected {location_name} at {coordinate}");

    let next = DashboardState {
        coordinate,
        location_name,
        popup: None,
        generation: state.generation + 1,
        location: Panel::Loading,
        metrics: Panel::Loading,
        benchmarks: Panel::Loading,
        risk: Panel::Loading,
        ..state
    };
    let commands = fetch_commands(&next);

    (next, commands)
}

fn fetch_commands(state: &DashboardState) -> Vec<Command> {
    BundleKind::all()
        .iter()
        .map(|kind| {
            Command::Fetch(FetchTicket {
                kind: *kind,
                coordinate: state.coordinate,
                generation: state.generation,
            })
        })
        .collect()
}

fn apply_result(
    state: DashboardState,
    ticket: FetchTicket,
    result: Result<BundlePayload, FetchError>,
) -> DashboardState {
    if !ticket.is_current(&state) {
        log::debug!(
            "Discarding stale {} result for {} (generation {} != {})",
            ticket.kind,
            ticket.coordinate,
            ticket.generation,
            state.generation
        );
        return state;
    }

    match result {
        Ok(payload) if payload.kind() != ticket.kind => {
            log::error!(
                "Received {} payload for a {} ticket",
                payload.kind(),
                ticket.kind
            );
            fail(state, ticket.kind, ticket.kind.failure_message())
        }
        Ok(BundlePayload::Location(bundle)) => DashboardState {
            location: Panel::Loaded(bundle),
            ..state
        },
        Ok(BundlePayload::Metrics(bundle)) => DashboardState {
            metrics: Panel::Loaded(bundle),
            ..state
        },
        Ok(BundlePayload::Benchmark(bundle)) => DashboardState {
            benchmarks: Panel::Loaded(bundle),
            ..state
        },
        Ok(BundlePayload::Risk(bundle)) => DashboardState {
            risk: Panel::Loaded(bundle),
            ..state
        },
        Err(e) => {
            log::error!("Error fetching {} data: {e:?}", ticket.kind);
            fail(state, ticket.kind, e.user_message())
        }
    }
}

fn fail(state: DashboardState, kind: BundleKind, message: &str) -> DashboardState {
    let message = message.to_string();
    match kind {
        BundleKind::Location => DashboardState {
            location: Panel::Failed(message),
            ..state
        },
        BundleKind::Metrics => DashboardState {
            metrics: Panel::Failed(message),
            ..state
        },
        BundleKind::Benchmark => DashboardState {
            benchmarks: Panel::Failed(message),
            ..state
        },
        BundleKind::Risk => DashboardState {
            risk: Panel::Failed(message),
            ..state
        },
    }
}
