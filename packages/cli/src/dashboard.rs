//! Interactive terminal dashboard.
//!
//! Drives a [`Session`] from `dialoguer` prompts and re-renders after every
//! action. Fetches run on tokio with the same simulated latency as the
//! server, behind a spinner.

use std::sync::Arc;

use chrono::Utc;
use dialoguer::{Input, MultiSelect, Select};
use site_analysis_cli_utils::{LoadingSpinner, MultiProgress};
use site_analysis_dashboard::state::{LayerToggle, RadiusMiles, RiskView, Tab};
use site_analysis_dashboard::{FetchConfig, Message, MockDataService, Report, Session};
use site_analysis_site_models::Coordinate;

use crate::render::render;

enum Action {
    SelectLocation,
    ClickMap,
    AnalyzeProperty,
    DismissPopup,
    ToggleLayers,
    SetRadius,
    SwitchTab,
    SwitchRiskView,
    Report,
    Quit,
}

impl Action {
    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::SelectLocation => "Analyze coordinates",
            Self::ClickMap => "Click on the map",
            Self::AnalyzeProperty => "Analyze property",
            Self::DismissPopup => "Dismiss property popup",
            Self::ToggleLayers => "Toggle map layers",
            Self::SetRadius => "Set radius rings",
            Self::SwitchTab => "Switch tab",
            Self::SwitchRiskView => "Switch risk chart",
            Self::Report => "Generate report",
            Self::Quit => "Quit",
        }
    }

    /// Actions available in the current state.
    fn available(has_popup: bool) -> Vec<Self> {
        let mut actions = vec![Self::SelectLocation, Self::ClickMap];
        if has_popup {
            actions.push(Self::AnalyzeProperty);
            actions.push(Self::DismissPopup);
        }
        actions.extend([
            Self::ToggleLayers,
            Self::SetRadius,
            Self::SwitchTab,
            Self::SwitchRiskView,
            Self::Report,
            Self::Quit,
        ]);
        actions
    }
}

/// Runs the dashboard until the user quits.
///
/// # Errors
///
/// * If a terminal prompt fails
#[allow(clippy::future_not_send)]
pub async fn run(
    multi: &MultiProgress,
    coordinate: Coordinate,
    radius: RadiusMiles,
    fetch: FetchConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = Arc::new(MockDataService::new(fetch));
    let mut session = Session::start(coordinate, service, rand::thread_rng());
    if radius != session.state().radius() {
        session.dispatch(Message::SetRadius(radius));
    }

    loop {
        settle(multi, &mut session).await;
        println!();
        println!("{}", render(session.state()));
        println!();

        let actions = Action::available(session.state().popup().is_some());
        let labels: Vec<&str> = actions.iter().map(Action::label).collect();
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[idx] {
            Action::SelectLocation => {
                let message = prompt_location(session.state().coordinate())?;
                session.dispatch(message);
            }
            Action::ClickMap => {
                let x_fraction: f64 = Input::new()
                    .with_prompt("Horizontal position (0 = west edge, 1 = east edge)")
                    .default(0.5)
                    .interact_text()?;
                let y_fraction: f64 = Input::new()
                    .with_prompt("Vertical position (0 = north edge, 1 = south edge)")
                    .default(0.5)
                    .interact_text()?;
                session.dispatch(Message::MapClick {
                    x_fraction,
                    y_fraction,
                });
            }
            Action::AnalyzeProperty => session.dispatch(Message::AnalyzePopup),
            Action::DismissPopup => session.dispatch(Message::DismissPopup),
            Action::ToggleLayers => {
                for message in prompt_layers(session.state().layers())? {
                    session.dispatch(message);
                }
            }
            Action::SetRadius => {
                let radii = RadiusMiles::all();
                let labels: Vec<String> =
                    radii.iter().map(|r| format!("{} mi", r.miles())).collect();
                let current = radii
                    .iter()
                    .position(|r| *r == session.state().radius())
                    .unwrap_or(0);
                let idx = Select::new()
                    .with_prompt("Radius")
                    .items(&labels)
                    .default(current)
                    .interact()?;
                session.dispatch(Message::SetRadius(radii[idx]));
            }
            Action::SwitchTab => {
                let tabs = Tab::all();
                let labels: Vec<String> = tabs.iter().map(ToString::to_string).collect();
                let current = tabs
                    .iter()
                    .position(|t| *t == session.state().tab())
                    .unwrap_or(0);
                let idx = Select::new()
                    .with_prompt("Tab")
                    .items(&labels)
                    .default(current)
                    .interact()?;
                session.dispatch(Message::SetTab(tabs[idx]));
            }
            Action::SwitchRiskView => {
                let views = RiskView::all();
                let labels: Vec<&str> = views.iter().map(|v| v.label()).collect();
                let current = views
                    .iter()
                    .position(|v| *v == session.state().risk_view())
                    .unwrap_or(0);
                let idx = Select::new()
                    .with_prompt("Risk chart")
                    .items(&labels)
                    .default(current)
                    .interact()?;
                session.dispatch(Message::SetRiskView(views[idx]));
                session.dispatch(Message::SetTab(Tab::Risks));
            }
            Action::Report => {
                println!();
                print!("{}", Report::from_state(session.state(), Utc::now()));
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

#[allow(clippy::future_not_send)]
async fn settle<R: rand::Rng>(multi: &MultiProgress, session: &mut Session<R>) {
    if session.in_flight() == 0 {
        return;
    }

    let spinner = LoadingSpinner::start(
        multi,
        &format!("Analyzing {}...", session.state().location_name()),
    );
    while session.next_completion().await {
        if session.state().is_loading() {
            let pending: Vec<String> = site_analysis_site_models::BundleKind::all()
                .iter()
                .filter(|kind| session.state().is_kind_loading(**kind))
                .map(ToString::to_string)
                .collect();
            spinner.set_message(format!("Waiting for {}", pending.join(", ")));
        }
    }
    spinner.finish_and_clear();
}

fn prompt_location(current: Coordinate) -> Result<Message, dialoguer::Error> {
    let longitude: f64 = Input::new()
        .with_prompt("Longitude")
        .default(current.longitude)
        .interact_text()?;
    let latitude: f64 = Input::new()
        .with_prompt("Latitude")
        .default(current.latitude)
        .interact_text()?;
    let name: String = Input::new()
        .with_prompt("Location name (optional)")
        .allow_empty(true)
        .interact_text()?;

    let coordinate = Coordinate::new(longitude, latitude);
    if !coordinate.is_within_bounds() {
        log::warn!("{coordinate} is outside valid longitude/latitude ranges");
    }

    Ok(Message::SelectLocation {
        coordinate,
        name: Some(name),
    })
}

fn prompt_layers(
    current: site_analysis_dashboard::state::LayerVisibility,
) -> Result<Vec<Message>, dialoguer::Error> {
    let toggles = LayerToggle::all();
    let labels: Vec<&str> = toggles.iter().map(|t| t.label()).collect();
    let defaults: Vec<bool> = toggles.iter().map(|t| current.is_enabled(*t)).collect();

    let selected = MultiSelect::new()
        .with_prompt("Visible layers (space to toggle)")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    Ok(toggles
        .iter()
        .enumerate()
        .filter_map(|(i, toggle)| {
            let enabled = selected.contains(&i);
            (enabled != current.is_enabled(*toggle)).then_some(Message::ToggleLayer {
                layer: *toggle,
                enabled,
            })
        })
        .collect())
}
