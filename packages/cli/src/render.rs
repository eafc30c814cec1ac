//! Plain-text rendering of the dashboard state.

use site_analysis_dashboard::chart::{polar_area_chart, radar_chart};
use site_analysis_dashboard::state::{LayerToggle, RiskView, Tab};
use site_analysis_dashboard::{DashboardState, Panel};
use site_analysis_site_models::{BundleKind, MapLayer, RiskBundle};

const BAR_WIDTH: u32 = 20;

/// Renders the header plus the body of the active tab.
#[must_use]
pub fn render(state: &DashboardState) -> String {
    let mut lines = header(state);
    lines.push(String::new());
    lines.extend(match state.tab() {
        Tab::Map => map_tab(state),
        Tab::Metrics => metrics_tab(state),
        Tab::Risks => risks_tab(state),
    });
    lines.join("\n")
}

fn header(state: &DashboardState) -> Vec<String> {
    let title = format!("Site Analysis: {}", state.location_name());
    let tabs: Vec<String> = Tab::all()
        .iter()
        .map(|tab| {
            if *tab == state.tab() {
                format!("[{tab}]")
            } else {
                tab.to_string()
            }
        })
        .collect();

    vec![
        title.clone(),
        "=".repeat(title.len()),
        format!("Coordinates: {}", state.coordinate()),
        format!("Tabs: {}", tabs.join(" | ")),
    ]
}

fn map_tab(state: &DashboardState) -> Vec<String> {
    let layers = state.layers();
    let mut lines = vec!["Layers:".to_string()];

    for layer in MapLayer::all() {
        let shown = layers.shows(*layer);
        let count = match state.location() {
            Panel::Loaded(bundle) if shown => {
                format!(" ({} features)", bundle.layer(*layer).features.len())
            }
            _ => String::new(),
        };
        lines.push(format!(
            "  [{}] {}{count}",
            if shown { "x" } else { " " },
            layer.label()
        ));
    }

    let radius = state.radius();
    if layers.is_enabled(LayerToggle::RadiusRings) {
        lines.push(format!(
            "Radius rings: {} mi ({} px)",
            radius.miles(),
            radius.ring_diameter_px()
        ));
    }

    if let Some(message) = panel_status(state.location(), BundleKind::Location) {
        lines.push(message);
    }

    if let Some(popup) = state.popup() {
        lines.push(String::new());
        lines.push(format!("Popup: {} at {}", popup.name, popup.coordinate));
    }

    lines
}

fn metrics_tab(state: &DashboardState) -> Vec<String> {
    let mut lines = vec!["Key Location Metrics".to_string()];

    match state.metrics() {
        Panel::Loaded(metrics) => {
            for card in site_analysis_mock::metric_cards() {
                let Some(reading) = metrics.get(card.id) else {
                    lines.push(format!("  {:<20} N/A", card.label));
                    continue;
                };
                let value = if card.unit.is_empty() {
                    reading.value.to_string()
                } else {
                    format!("{} {}", reading.value, card.unit)
                };
                lines.push(format!(
                    "  {:<20} {:<22} {:<9} ({})",
                    card.label, value, reading.status, card.source
                ));
            }
        }
        other => lines.extend(panel_status(other, BundleKind::Metrics)),
    }

    lines.push(String::new());
    lines.push("Benchmark Comparison".to_string());

    match state.benchmarks() {
        Panel::Loaded(bundle) if bundle.is_empty() => {
            lines.push("  No benchmark data available for this location.".to_string());
        }
        Panel::Loaded(bundle) => {
            for b in &bundle.benchmarks {
                lines.push(format!(
                    "  {:<16} {:<10} submarket {:>3}%  national {:>3}%",
                    b.name, b.value, b.market_percentile, b.national_percentile
                ));
            }
        }
        other => lines.extend(panel_status(other, BundleKind::Benchmark)),
    }

    lines
}

fn risks_tab(state: &DashboardState) -> Vec<String> {
    let mut lines = vec!["Risk Assessment".to_string()];

    match state.risk() {
        Panel::Loaded(risk) if risk.risks.is_empty() => {
            lines.push("  No risk data available for this location.".to_string());
        }
        Panel::Loaded(risk) => {
            lines.push(format!(
                "  Overall: {}/100 ({})",
                risk.overall_score, risk.risk_category
            ));

            lines.push(format!("  Chart: {}", state.risk_view().label()));
            lines.extend(match state.risk_view() {
                RiskView::Radar => radar_lines(risk),
                RiskView::PolarArea => polar_lines(risk),
                RiskView::Table => table_lines(risk),
            });
        }
        other => lines.extend(panel_status(other, BundleKind::Risk)),
    }

    lines
}

fn radar_lines(risk: &RiskBundle) -> Vec<String> {
    let chart = radar_chart(risk);
    let site = &chart.datasets[0];
    let market = &chart.datasets[1];
    let mut lines = vec![format!(
        "  {:<20} {:<width$}  {}",
        "",
        site.label,
        market.label,
        width = (BAR_WIDTH + 5) as usize
    )];
    for (i, label) in chart.labels.iter().enumerate() {
        lines.push(format!(
            "  {label:<20} {} {:>3}  {} {:>3}",
            bar(site.data[i]),
            site.data[i],
            bar(market.data[i]),
            market.data[i]
        ));
    }
    lines
}

/// Site scores with each factor's share of the combined score.
fn polar_lines(risk: &RiskBundle) -> Vec<String> {
    let chart = polar_area_chart(risk);
    let scores = &chart.datasets[0];
    let total: u32 = scores.data.iter().sum();
    let mut lines = vec![format!("  {:<20} {}", "", scores.label)];
    for (label, score) in chart.labels.iter().zip(&scores.data) {
        let share = if total == 0 { 0 } else { score * 100 / total };
        lines.push(format!("  {label:<20} {} {score:>3}  ({share}%)", bar(*score)));
    }
    lines
}

fn table_lines(risk: &RiskBundle) -> Vec<String> {
    let mut lines = vec![format!(
        "  {:<20} {:>5} {:>7}  {}",
        "Factor", "Score", "Market", "Level"
    )];
    for factor in &risk.risks {
        lines.push(format!(
            "  {:<20} {:>5} {:>7}  {}",
            factor.name, factor.value, factor.market_average, factor.category
        ));
    }
    lines
}

/// Horizontal bar scaled from `0..=100` to [`BAR_WIDTH`] cells.
fn bar(score: u32) -> String {
    let filled = (score.min(100) * BAR_WIDTH / 100) as usize;
    format!(
        "{}{}",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH as usize - filled)
    )
}

fn panel_status<T>(panel: &Panel<T>, kind: BundleKind) -> Option<String> {
    match panel {
        Panel::Loading => Some(format!("  Loading {kind} data...")),
        Panel::Failed(message) => Some(format!("  {message}")),
        Panel::Loaded(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use site_analysis_dashboard::state::DEFAULT_COORDINATE;
    use site_analysis_dashboard::{BundlePayload, Command, Message, init, update};

    use super::*;

    fn loaded_state() -> DashboardState {
        let (mut state, commands) = init(DEFAULT_COORDINATE);
        for Command::Fetch(ticket) in commands {
            state = update(
                state,
                Message::BundleLoaded {
                    ticket,
                    result: Ok(BundlePayload::generate(ticket.kind, ticket.coordinate)),
                },
                &mut StepRng::new(0, 0),
            )
            .0;
        }
        state
    }

    fn with_tab(state: DashboardState, tab: Tab) -> DashboardState {
        update(state, Message::SetTab(tab), &mut StepRng::new(0, 0)).0
    }

    #[test]
    fn loading_state_shows_placeholders() {
        let (state, _) = init(DEFAULT_COORDINATE);
        let text = render(&state);
        assert!(text.starts_with("Site Analysis: Current Selection\n"));
        assert!(text.contains("Tabs: [map] | metrics | risks"));
        assert!(text.contains("Loading location data..."));
    }

    #[test]
    fn map_tab_lists_visible_layers() {
        let text = render(&loaded_state());
        assert!(text.contains("  [x] Parcels (3 features)"));
        assert!(text.contains("  [x] Transportation (2 features)"));
        assert!(text.contains("  [ ] Amenities\n"));
        assert!(text.contains("Radius rings: 1 mi (100 px)"));
    }

    #[test]
    fn metrics_tab_shows_cards_and_benchmarks() {
        let text = render(&with_tab(loaded_state(), Tab::Metrics));
        assert!(text.contains("Nearest Highway"));
        assert!(text.contains("3.3 miles"));
        assert!(text.contains("(OpenRouteService)"));
        assert!(text.contains("Rent per Sq Ft"));
        assert!(text.contains("submarket  88%"));
    }

    #[test]
    fn risks_tab_charts_each_factor() {
        let text = render(&with_tab(loaded_state(), Tab::Risks));
        assert!(text.contains("Overall: 91/100 (Low Risk)"));
        let flood = text
            .lines()
            .find(|line| line.trim_start().starts_with("Flood Risk"))
            .unwrap();
        assert!(flood.contains(&format!("{}  76", bar(76))), "{flood}");
        assert!(flood.ends_with(" 44"), "{flood}");
    }

    #[test]
    fn polar_view_shows_score_shares() {
        let state = with_tab(loaded_state(), Tab::Risks);
        let state = update(
            state,
            Message::SetRiskView(RiskView::PolarArea),
            &mut StepRng::new(0, 0),
        )
        .0;
        let text = render(&state);
        assert!(text.contains("  Chart: Polar Area"));
        assert!(text.contains("Risk Score"));
        let flood = text
            .lines()
            .find(|line| line.trim_start().starts_with("Flood Risk"))
            .unwrap();
        assert!(flood.ends_with(&format!("{}  76  (22%)", bar(76))), "{flood}");
    }

    #[test]
    fn table_view_lists_factor_levels() {
        let state = with_tab(loaded_state(), Tab::Risks);
        let state = update(
            state,
            Message::SetRiskView(RiskView::Table),
            &mut StepRng::new(0, 0),
        )
        .0;
        let text = render(&state);
        assert!(text.contains("  Chart: Table"));
        assert!(text.contains(&format!(
            "  {:<20} {:>5} {:>7}  {}",
            "Flood Risk", 76, 44, "High"
        )));
    }

    #[test]
    fn bars_scale_to_width() {
        assert_eq!(bar(0), ".".repeat(20));
        assert_eq!(bar(100), "#".repeat(20));
        assert_eq!(bar(76), format!("{}{}", "#".repeat(15), ".".repeat(5)));
        assert_eq!(bar(250), "#".repeat(20));
    }
}
