//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{
    Axis, Block, Borders, Cell, Chart, Dataset, Paragraph, Row, Table, Wrap,
};

use super::runtime::App;
use super::style;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // header
            Constraint::Min(10),    // map + assets
            Constraint::Length(12), // chart + stats
            Constraint::Length(8),  // events + advice
            Constraint::Length(1),  // footer
        ])
        .split(frame.area());

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[2]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[3]);

    render_header(frame, app, chunks[0]);
    render_map(frame, app, top[0]);
    render_assets(frame, app, top[1]);
    render_chart(frame, app, middle[0]);
    render_stats(frame, app, middle[1]);
    render_events(frame, app, bottom[0]);
    render_advice(frame, app, bottom[1]);
    render_footer(frame, chunks[4]);
}

/// Header bar: scenario, simulated time, speed, run state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let grid = app.grid();
    let (icon, label) = if app.paused {
        ("‖", "PAUSED")
    } else {
        ("▶", "RUNNING")
    };

    let header = Line::from(vec![
        Span::styled(
            " VPP DASHBOARD ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            grid.scenario_label().to_uppercase(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ t={:.0}s │ x{} │ {} {} ",
            grid.elapsed_ms() as f64 / 1000.0,
            app.speed_factor(),
            icon,
            label,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Assets plotted at their map coordinates, origin top-left.
fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let assets = app.grid().assets();
    let canvas = Canvas::default()
        .block(Block::default().title(" Map ").borders(Borders::ALL))
        .marker(symbols::Marker::Braille)
        .x_bounds([0.0, 100.0])
        .y_bounds([0.0, 100.0])
        .paint(|ctx| {
            for a in assets {
                let color = style::asset_color(a.asset_type, a.status);
                let y = 100.0 - a.y;
                ctx.draw(&Points {
                    coords: &[(a.x, y)],
                    color,
                });
                ctx.print(a.x + 2.0, y, Span::styled(a.id.clone(), Style::default().fg(color)));
            }
        });
    frame.render_widget(canvas, area);
}

fn render_assets(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app.grid().assets().iter().map(|a| {
        Row::new(vec![
            Cell::from(a.name.clone()),
            Cell::from(a.asset_type.as_str()),
            Cell::from(format!("{:>6.1}", a.current_output)),
            Cell::from(format!("{:>5.1}", a.capacity)),
            Cell::from(format!("{:>3.0}%", a.utilization() * 100.0)),
            Cell::from(Span::styled(
                a.status.as_str(),
                Style::default().fg(style::status_color(a.status)),
            )),
        ])
    });
    let widths = [
        Constraint::Min(16),
        Constraint::Length(10),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Name", "Type", "MW", "Cap", "Load", "Status"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().title(" Assets ").borders(Borders::ALL));
    frame.render_widget(table, area);
}

/// Generation vs consumption over retained history.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let history = app.grid().history();
    let secs = |ms: u64| ms as f64 / 1000.0;
    let generation: Vec<(f64, f64)> = history
        .iter()
        .map(|p| (secs(p.timestamp_ms), p.generation))
        .collect();
    let consumption: Vec<(f64, f64)> = history
        .iter()
        .map(|p| (secs(p.timestamp_ms), p.consumption))
        .collect();

    let y_bounds = style::auto_bounds_y(&generation, &consumption);
    let x_lo = generation.first().map_or(0.0, |p| p.0);
    let x_hi = generation.last().map_or(1.0, |p| p.0).max(x_lo + 1.0);

    let datasets = vec![
        Dataset::default()
            .name("Generation")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::GENERATION_COLOR))
            .data(&generation),
        Dataset::default()
            .name("Consumption")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::CONSUMPTION_COLOR))
            .data(&consumption),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Generation vs Consumption ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("s")
                .bounds([x_lo, x_hi])
                .labels(vec![format!("{x_lo:.0}"), format!("{x_hi:.0}")]),
        )
        .y_axis(
            Axis::default()
                .title("MW")
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.1}", y_bounds[0]),
                    format!("{:.1}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}

fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let s = app.grid().stats();
    let balance = if s.is_surplus() { "surplus" } else { "deficit" };
    let lines = vec![
        Line::from(format!("  Generation   {:>7.1} MW", s.total_generation)),
        Line::from(format!("  Consumption  {:>7.1} MW", s.total_consumption)),
        Line::from(format!("  Net load     {:>7.1} MW ({balance})", s.net_load)),
        Line::from(format!("  Storage      {:>7.1} %", s.storage_level)),
        Line::from(format!("  Frequency    {:>7.2} Hz", s.grid_frequency)),
    ];
    let block = Block::default().title(" Grid ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Most recent event log entries, newest last.
fn render_events(frame: &mut Frame, app: &App, area: Rect) {
    let visible = usize::from(area.height.saturating_sub(2));
    let mut lines: Vec<Line> = app
        .grid()
        .events()
        .iter()
        .rev()
        .take(visible)
        .map(|e| {
            Line::from(vec![
                Span::raw(format!(" {:>6.0}s ", e.timestamp_ms as f64 / 1000.0)),
                Span::styled(
                    format!("{:<4} ", e.level),
                    Style::default().fg(style::level_color(e.level)),
                ),
                Span::raw(e.message.clone()),
            ])
        })
        .collect();
    lines.reverse();
    let block = Block::default().title(" Events ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_advice(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    match app.grid().advice() {
        Some(advice) => {
            lines.push(Line::from(advice.text.clone()));
            lines.push(Line::from(Span::styled(
                format!(
                    "asked at t={:.0}s, net {:.1} MW",
                    advice.requested_at_ms as f64 / 1000.0,
                    advice.stats_at_request.net_load,
                ),
                Style::default().fg(style::FOOTER_FG),
            )));
        }
        None => lines.push(Line::from("Press 'a' for advice.")),
    }
    if app.advice_pending() {
        lines.push(Line::from(Span::styled(
            "Requesting advice...",
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    let block = Block::default().title(" Advisory ").borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  Space:Pause  +/-:Speed  h:Heatwave  s:Storm  b:Blackout  r:Reset  a:Advice",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
