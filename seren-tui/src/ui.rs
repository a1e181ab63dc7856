//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};
use seren_core::types::{mood_emoji, mood_label, ChatRole};
use seren_core::stats::mood_message;

use crate::app::{App, NoticeKind, View};

// ========== Palette ==========

/// Accent used for headers and selection
const ACCENT: Color = Color::Rgb(120, 180, 220);
/// Dim gray for secondary text
const DIM: Color = Color::Rgb(128, 128, 128);
/// Assistant message color
const ASSISTANT: Color = Color::Rgb(140, 200, 160);

/// Color for a mood rating (red through green).
fn mood_color(mood: u8) -> Color {
    match mood {
        1 => Color::Rgb(255, 71, 87),
        2 => Color::Rgb(255, 107, 129),
        3 => Color::Rgb(255, 165, 2),
        4 => Color::Rgb(38, 222, 129),
        5 => Color::Rgb(46, 213, 115),
        _ => DIM,
    }
}

fn notice_color(kind: NoticeKind) -> Color {
    match kind {
        NoticeKind::Success => Color::Green,
        NoticeKind::Error => Color::Red,
        NoticeKind::Warning => Color::Yellow,
        NoticeKind::Info => ACCENT,
    }
}

/// Render the application UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(2), // Tab header
        Constraint::Min(5),    // Body
        Constraint::Length(1), // Footer / notices
    ])
    .split(area);

    render_tabs(frame, app, chunks[0]);

    match app.view {
        View::Dashboard => render_dashboard(frame, app, chunks[1]),
        View::LogMood => render_log_mood(frame, app, chunks[1]),
        View::History => render_history(frame, app, chunks[1]),
        View::Chat => render_chat(frame, app, chunks[1]),
        View::Profile => render_profile(frame, app, chunks[1]),
    }

    render_footer(frame, app, chunks[2]);

    if let Some(confirm) = &app.confirm {
        render_confirm_modal(frame, confirm.prompt(), area);
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " seren ",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )];
    for view in [
        View::Dashboard,
        View::LogMood,
        View::History,
        View::Chat,
        View::Profile,
    ] {
        let style = if view == app.view {
            Style::default().fg(Color::Black).bg(ACCENT)
        } else {
            Style::default().fg(DIM)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} ", view.title()), style));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

// ========== Dashboard ==========

fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(5), // Stat tiles
        Constraint::Length(2), // Encouragement line
        Constraint::Min(8),    // Chart
        Constraint::Length(4), // Distribution + triggers
    ])
    .split(area);

    render_stat_tiles(frame, app, chunks[0]);

    let stats = app.stats();
    let message = if stats.total_entries == 0 {
        "Log your first mood to start seeing trends."
    } else {
        mood_message(stats.average_mood)
    };
    frame.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(DIM))
            .alignment(Alignment::Center),
        chunks[1],
    );

    render_mood_chart(frame, app, chunks[2]);
    render_triggers(frame, app, chunks[3]);
}

fn render_stat_tiles(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.stats();
    let tiles = Layout::horizontal([
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
    ])
    .split(area);

    let average = if stats.total_entries == 0 {
        "—".to_string()
    } else {
        format!("{:.1}", stats.average_mood)
    };

    let values = [
        ("Average Mood", average),
        ("Entries", stats.total_entries.to_string()),
        ("Trend", stats.trend.to_string()),
        ("Streak", format!("{} days", stats.streak)),
    ];

    for (i, (label, value)) in values.iter().enumerate() {
        let tile = Paragraph::new(vec![
            Line::from(Span::styled(
                value.clone(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(*label, Style::default().fg(DIM))),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
        frame.render_widget(tile, tiles[i]);
    }
}

fn render_mood_chart(frame: &mut Frame, app: &App, area: Rect) {
    let series = app.chart();

    // Weekday prefix keeps bar labels narrow
    let bars: Vec<(String, u64)> = series
        .iter()
        .map(|p| {
            let label = p.label.split(' ').next().unwrap_or("").to_string();
            (label, p.value as u64)
        })
        .collect();
    let data: Vec<(&str, u64)> = bars.iter().map(|(l, v)| (l.as_str(), *v)).collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(" Last 7 days (empty bar = no entry) ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .data(data.as_slice())
        .bar_width(5)
        .bar_gap(2)
        .max(5)
        .bar_style(Style::default().fg(ACCENT))
        .value_style(Style::default().fg(Color::Black).bg(ACCENT));
    frame.render_widget(chart, area);
}

fn render_triggers(frame: &mut Frame, app: &App, area: Rect) {
    let distribution = app.distribution();
    let mut dist_spans = vec![Span::styled("Distribution:      ", Style::default().fg(DIM))];
    for (i, count) in distribution.iter().enumerate() {
        let mood = i as u8 + 1;
        dist_spans.push(Span::styled(
            format!("{} {}  ", mood_emoji(mood), count),
            Style::default().fg(mood_color(mood)),
        ));
    }

    let triggers = app.triggers();
    let trigger_line = if triggers.is_empty() {
        Line::from(Span::styled(
            "No recurring triggers detected",
            Style::default().fg(DIM),
        ))
    } else {
        let mut spans = vec![Span::styled("Frequent triggers: ", Style::default().fg(DIM))];
        for (i, (word, count)) in triggers.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(", "));
            }
            spans.push(Span::styled(
                format!("{} ({})", word, count),
                Style::default().fg(Color::Yellow),
            ));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(vec![Line::from(dist_spans), trigger_line])
            .block(Block::default().borders(Borders::TOP)),
        area,
    );
}

// ========== Log mood ==========

fn render_log_mood(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(5), // Mood selector
        Constraint::Min(5),    // Note
        Constraint::Length(1), // Char count
    ])
    .split(area);

    let mut spans = Vec::new();
    for mood in 1..=5u8 {
        let selected = app.form.mood == Some(mood);
        let style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(mood_color(mood))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(mood_color(mood))
        };
        spans.push(Span::styled(
            format!("  {} {}  ", mood_emoji(mood), mood_label(mood)),
            style,
        ));
    }
    let title = if app.editing.is_some() {
        " Edit entry (←/→ to choose) "
    } else {
        " How are you feeling today? (←/→ to choose) "
    };
    let selector = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    frame.render_widget(selector, chunks[0]);

    let note = Paragraph::new(app.form.note.as_str())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Note (optional) ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    frame.render_widget(note, chunks[1]);

    frame.render_widget(
        Paragraph::new(format!("{}/500 characters", app.form.note.chars().count()))
            .style(Style::default().fg(DIM))
            .alignment(Alignment::Right),
        chunks[2],
    );
}

// ========== History ==========

fn render_history(frame: &mut Frame, app: &App, area: Rect) {
    let entries = app.entries.entries();

    if entries.is_empty() {
        frame.render_widget(
            Paragraph::new("No entries yet. Press Tab to reach the Log Mood view.")
                .style(Style::default().fg(DIM))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    }

    let rows: Vec<Row> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == app.history_selected {
                Style::default().fg(Color::Black).bg(ACCENT)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(entry.date.to_string()),
                Cell::from(format!("{} {}", mood_emoji(entry.mood), mood_label(entry.mood)))
                    .style(Style::default().fg(mood_color(entry.mood))),
                Cell::from(entry.note.clone().unwrap_or_default()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Min(20),
        ],
    )
    .header(
        Row::new(vec!["Date", "Mood", "Note"])
            .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .title(" Mood History ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    frame.render_widget(table, area);
}

// ========== Chat ==========

fn render_chat(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Min(5),    // Transcript
        Constraint::Length(3), // Input
    ])
    .split(area);

    let mut lines = Vec::new();
    if app.chat.history().is_empty() {
        lines.push(Line::from(Span::styled(
            "Say hello - this space is yours.",
            Style::default().fg(DIM),
        )));
    }
    for msg in app.chat.history() {
        let (prefix, style) = match msg.role {
            ChatRole::User => ("you", Style::default().fg(ACCENT)),
            ChatRole::Assistant => ("seren", Style::default().fg(ASSISTANT)),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>6}  ", prefix), style.add_modifier(Modifier::BOLD)),
            Span::raw(msg.content.clone()),
        ]));
        lines.push(Line::from(""));
    }

    let transcript = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Companion ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    frame.render_widget(transcript, chunks[0]);

    let input = Paragraph::new(app.chat_input.as_str()).block(
        Block::default()
            .title(" Message (Enter to send, Ctrl+L to clear chat) ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    frame.render_widget(input, chunks[1]);
}

// ========== Profile ==========

fn render_profile(frame: &mut Frame, app: &App, area: Rect) {
    let profile = app.profile.get();
    let prefs = &profile.preferences;

    let name = match &app.editing_name {
        Some(buffer) => format!("{}▏ (editing, Enter to save)", buffer),
        None => {
            if profile.name.is_empty() {
                "(not set)".to_string()
            } else {
                profile.name.clone()
            }
        }
    };

    let on_off = |v: bool| if v { "on" } else { "off" };
    let lines = vec![
        Line::from(vec![
            Span::styled("Name:             ", Style::default().fg(DIM)),
            Span::raw(name),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[d] Daily reminders:  ", Style::default().fg(DIM)),
            Span::raw(on_off(prefs.daily_reminders)),
        ]),
        Line::from(vec![
            Span::styled("[w] Weekly insights:  ", Style::default().fg(DIM)),
            Span::raw(on_off(prefs.weekly_insights)),
        ]),
        Line::from(vec![
            Span::styled("[a] AI suggestions:   ", Style::default().fg(DIM)),
            Span::raw(on_off(prefs.ai_suggestions)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "[n] edit name   [x] export JSON   [C] clear all data",
            Style::default().fg(DIM),
        )),
        Line::from(Span::styled(
            "Everything stays on this device. Backups are manual exports.",
            Style::default().fg(DIM),
        )),
    ];

    let body = Paragraph::new(lines).block(
        Block::default()
            .title(" Profile ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    frame.render_widget(body, area);
}

// ========== Footer and modal ==========

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(notice) = app.current_notice() {
        frame.render_widget(
            Paragraph::new(notice.message.as_str())
                .style(Style::default().fg(notice_color(notice.kind))),
            area,
        );
        return;
    }

    let help = match app.view {
        View::Dashboard => "Tab switch view | l log | h history | c chat | p profile | q quit",
        View::LogMood => "←/→ mood | type note | Enter save | Esc cancel",
        View::History => "↑/↓ select | Enter edit | d delete | e export CSV | j export JSON | Esc back",
        View::Chat => "Enter send | Ctrl+L clear | Esc back",
        View::Profile => "n name | d/w/a toggles | x export | C clear all | Esc back",
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(DIM)),
        area,
    );
}

fn render_confirm_modal(frame: &mut Frame, prompt: &str, area: Rect) {
    let width = (prompt.len() as u16 + 8).min(area.width.saturating_sub(4));
    let modal = centered_rect(width.max(30), 5, area);

    frame.render_widget(Clear, modal);
    let body = Paragraph::new(vec![
        Line::from(prompt),
        Line::from(""),
        Line::from(Span::styled(
            "y confirm / n cancel",
            Style::default().fg(DIM),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(" Confirm ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(body, modal);
}

/// Center a fixed-size rect inside `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
