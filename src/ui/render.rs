use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::app::{feedback_color, App};
use super::stage::Projection;
use crate::game::room_label;
use crate::save::SaveStore;

const AVATAR: char = '@';
const DOOR: char = '▮';

pub fn draw_ui<S: SaveStore>(f: &mut Frame, app: &mut App<'_, S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(9),
        ])
        .split(f.area());

    draw_hud(f, app, chunks[0]);
    draw_stage(f, app, chunks[1]);
    draw_log(f, app, chunks[2]);

    if app.modal.is_some() {
        let screen = f.area();
        draw_modal(f, app, screen);
    }
}

fn draw_hud<S: SaveStore>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let status = Line::from(vec![
        Span::styled(
            " ROOM TRACE ",
            Style::default().fg(Color::Black).bg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", room_label(app.room_id)),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(format!(" {} ", app.kind), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(
            format!(" TRACE: {} ", app.trace),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(
            if app.game.state().solved {
                " UNLOCKED "
            } else {
                " LOCKED "
            },
            Style::default().fg(if app.game.state().solved {
                Color::Green
            } else {
                Color::Red
            }),
        ),
    ]);
    let hud = Paragraph::new(status).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(hud, area);
}

fn draw_stage<S: SaveStore>(f: &mut Frame, app: &mut App<'_, S>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Sector [WASD: Move | E: Door | 1-9: Inspect | Q: Quit] ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        app.stage_area = None;
        return;
    }
    app.stage_area = Some(inner);

    let projection = Projection::new(inner, app.game.stage());
    let mut grid = vec![vec![' '; inner.width as usize]; inner.height as usize];
    let mut put = |x: f32, y: f32, glyph: char| {
        let (col, row) = projection.cell(x, y);
        grid[(row - inner.y) as usize][(col - inner.x) as usize] = glyph;
    };

    let rules = app.game.rules();
    put(rules.door_x, rules.door_y, DOOR);
    for (index, spot) in app.interactables.iter().enumerate() {
        let glyph = char::from_digit(index as u32 + 1, 10).unwrap_or('?');
        put(spot.x, spot.y, glyph);
    }
    let half = app.game.stage().avatar_size / 2.0;
    put(app.avatar.0 + half, app.avatar.1 + half, AVATAR);

    let lines: Vec<Line> = grid
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|c| Span::styled(c.to_string(), glyph_style(c)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn glyph_style(c: char) -> Style {
    match c {
        AVATAR => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        DOOR => Style::default().fg(Color::Magenta),
        '1'..='9' | '?' => Style::default().fg(Color::Cyan),
        _ => Style::default(),
    }
}

fn draw_log<S: SaveStore>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let end = app.log.len().saturating_sub(app.log_scroll as usize);
    let start = end.saturating_sub(visible);
    let lines: Vec<Line> = app.log[start..end]
        .iter()
        .map(|l| Line::from(l.as_str()))
        .collect();

    let title = if app.log.len() > visible {
        " Log [PgUp/PgDn to scroll] "
    } else {
        " Log "
    };
    let log = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::Green));
    f.render_widget(log, area);
}

fn draw_modal<S: SaveStore>(f: &mut Frame, app: &App<'_, S>, screen: Rect) {
    let Some(modal) = app.modal.as_ref() else {
        return;
    };
    let area = centered(screen, 60, 11);
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" SECURITY CHECK ")
        .style(Style::default().fg(Color::White).bg(Color::Black));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(2),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let prompt = Paragraph::new(modal.prompt.as_str())
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    f.render_widget(prompt, parts[0]);
    f.render_widget(&modal.input, parts[1]);

    if let Some((text, tone)) = &modal.feedback {
        let feedback = Paragraph::new(text.as_str())
            .style(
                Style::default()
                    .fg(feedback_color(*tone))
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        f.render_widget(feedback, parts[2]);
    }
}

fn centered(screen: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(screen.width);
    let height = height.min(screen.height);
    Rect::new(
        screen.x + (screen.width - width) / 2,
        screen.y + (screen.height - height) / 2,
        width,
        height,
    )
}
