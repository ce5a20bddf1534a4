//! Calculator rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::*;
use super::format::{
    format_decimal, format_integer, hours_to_dhms, speedup_hours, NumberLocale, NOT_APPLICABLE,
};
use super::logic::CalculationResult;
use super::state::{FieldId, Focus, FormState, Outcome, TextField};

/// Lines in the form panel (without borders).
const FORM_LINES: u16 = 9;
/// Line index of the dropdown activator inside the form panel.
const ACTIVATOR_LINE: u16 = 1;
/// Display width of a numeric input box.
const FIELD_WIDTH: usize = 14;
/// Column the input boxes start at.
const LABEL_WIDTH: usize = 18;
/// Digits shown for the per-unit ratios.
const RATIO_DECIMALS: usize = 6;

pub fn render(
    state: &FormState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let is_narrow = is_narrow_layout(area.width);
    let borders = if is_narrow {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(8),    // Form + results
            Constraint::Length(3), // Key hints
        ])
        .split(area);

    render_title(f, main_chunks[0], borders);

    let (form_area, results_area) = if is_narrow {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(FORM_LINES + 2), Constraint::Min(4)])
            .split(main_chunks[1]);
        (chunks[0], chunks[1])
    } else {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[1]);
        (chunks[0], chunks[1])
    };

    render_form(state, f, form_area, borders, click_state);
    render_results(state, f, results_area, borders);
    render_help(state, f, main_chunks[2], borders);

    // Drawn last so the popup and its targets sit on top of everything else.
    if state.dropdown.is_open() {
        let activator = Rect::new(
            form_area.x,
            form_area.y + 1 + ACTIVATOR_LINE,
            form_area.width,
            1,
        );
        render_menu(state, f, activator, area, click_state);
    }
}

fn render_title(f: &mut Frame, area: Rect, borders: Borders) {
    let title = Paragraph::new(Line::from(Span::styled(
        "Troop Cost Calculator",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(borders)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}

// ── Form ───────────────────────────────────────────────────────────────

fn render_form(
    state: &FormState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();

    cl.push(Line::from(Span::styled(
        " Action",
        Style::default().fg(Color::Gray),
    )));
    cl.push_clickable(activator_line(state), TOGGLE_MENU);
    cl.push(Line::from(""));

    for id in FieldId::ALL {
        let focused = state.focus == Focus::Field(id);
        cl.push_clickable(
            field_line(id.label(), state.field(id), focused),
            FOCUS_FIELD_BASE + id.index() as u16,
        );
    }
    cl.push(Line::from(""));

    let button_style = if state.focus == Focus::Calculate {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    };
    cl.push_clickable(
        Line::from(vec![
            Span::raw(" "),
            Span::styled("  Calculate  ", button_style),
        ]),
        CALCULATE,
    );

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, 0);
    }

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Inputs ");
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn activator_line(state: &FormState) -> Line<'static> {
    let focused = matches!(state.focus, Focus::Activator | Focus::Menu);
    let arrow = if state.dropdown.is_open() { "▴" } else { "▾" };
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };
    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!(" {} {} ", arrow, state.dropdown.selected_value()),
            style,
        ),
    ])
}

fn field_line(label: &str, field: &TextField, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let box_style = if focused {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        Span::styled(format!(" {:<width$}", label, width = LABEL_WIDTH), label_style),
        Span::styled("[", Style::default().fg(Color::DarkGray)),
    ];

    let chars: Vec<char> = field.text.chars().collect();
    if focused {
        let cursor = field.cursor.min(chars.len());
        let before: String = chars[..cursor].iter().collect();
        let at = chars.get(cursor).copied().unwrap_or(' ');
        let after: String = chars.get(cursor + 1..).unwrap_or(&[]).iter().collect();
        let used = before.chars().count() + 1 + after.chars().count();
        spans.push(Span::styled(before, box_style));
        spans.push(Span::styled(
            at.to_string(),
            box_style.add_modifier(Modifier::REVERSED),
        ));
        spans.push(Span::styled(after, box_style));
        spans.push(Span::styled(
            " ".repeat(FIELD_WIDTH.saturating_sub(used)),
            box_style,
        ));
    } else {
        spans.push(Span::styled(
            format!("{:<width$}", field.text, width = FIELD_WIDTH),
            box_style,
        ));
    }
    spans.push(Span::styled("]", Style::default().fg(Color::DarkGray)));
    Line::from(spans)
}

// ── Dropdown popup ─────────────────────────────────────────────────────

fn render_menu(
    state: &FormState,
    f: &mut Frame,
    activator: Rect,
    screen: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let dropdown = &state.dropdown;
    let range = dropdown.visible_range();

    let longest = dropdown
        .items()
        .iter()
        .map(|s| Line::from(s.as_str()).width() as u16)
        .max()
        .unwrap_or(0);
    let mut cl = ClickableList::new();
    for i in range {
        let name = &dropdown.items()[i];
        let is_selected = name.as_str() == dropdown.selected_value();
        let marker = if is_selected { "✓" } else { " " };
        let style = if dropdown.is_active(i) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let label = format!(" {} {:<w$} ", marker, name, w = longest as usize);
        cl.push_clickable(
            Line::from(Span::styled(label, style)),
            MENU_ITEM_BASE + i as u16,
        );
    }

    let x = activator.x + 1;
    let y = activator.y + 1;
    let width = (longest + 6).min(screen.right().saturating_sub(x));
    let height = (cl.len() as u16 + 2).min(screen.bottom().saturating_sub(y));
    if width < 4 || height < 3 {
        return;
    }
    let popup = Rect::new(x, y, width, height);

    {
        let mut cs = click_state.borrow_mut();
        // Border cells belong to the popup too; rows registered after win.
        cs.add_click_target(popup, MENU_FRAME);
        cl.register_targets(popup, &mut cs, 1, 1, 0);
    }

    let title = format!(
        " {}/{} ",
        dropdown.active_index() + 1,
        dropdown.items().len()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);
    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), popup);
}

// ── Results ────────────────────────────────────────────────────────────

fn render_results(state: &FormState, f: &mut Frame, area: Rect, borders: Borders) {
    let lines = match &state.outcome {
        Outcome::Empty => vec![Line::from(Span::styled(
            " Fill in the columns and press Calculate.",
            Style::default().fg(Color::DarkGray),
        ))],
        Outcome::Invalid(err) => vec![Line::from(Span::styled(
            format!(" {}", err),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))],
        Outcome::Computed(result) => result_lines(result, state.locale),
    };

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Results ");
    let widget = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn result_lines(r: &CalculationResult, locale: NumberLocale) -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let value = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);
    let normal = Style::default().fg(Color::Gray);

    let speedups = speedup_hours(r.total_hours)
        .map(|h| format!("{:.0}", h))
        .unwrap_or_else(|| NOT_APPLICABLE.to_string());

    let mut lines = vec![
        Line::from(Span::styled(" Gems needed", heading)),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(format_integer(r.total_gems, NumberLocale::GERMAN), value),
            Span::styled(" gems", dim),
        ]),
        Line::from(vec![
            Span::styled(" Speedups required: ", normal),
            Span::styled(format!("{} hours", speedups), heading),
            Span::styled(format!(" (~ {})", hours_to_dhms(r.total_hours)), dim),
        ]),
        Line::from(Span::styled(
            format!(
                " gem/troop = C/E = {} · hours/troop = D/E = {}",
                format_decimal(r.gems_per_unit, RATIO_DECIMALS, locale),
                format_decimal(r.hours_per_unit, RATIO_DECIMALS, locale),
            ),
            dim,
        )),
        Line::from(""),
        Line::from(Span::styled(" Clash of Province (CoP)", heading)),
    ];

    match &r.cop {
        Some(cop) => {
            let mut baseline = vec![
                Span::styled(" Per troop baseline for ", normal),
                Span::styled(r.action.clone(), heading),
                Span::styled(" = ", normal),
                Span::styled(cop.per_unit.to_string(), heading),
            ];
            if cop.provisional {
                baseline.push(Span::styled(" (provisional)", dim));
            }
            lines.push(Line::from(baseline));
            lines.push(Line::from(vec![
                Span::styled(" ×3 event: ", normal),
                Span::styled(format_integer(cop.total_x3, locale), value),
            ]));
            lines.push(Line::from(vec![
                Span::styled(" ×4 ", normal),
                Span::styled("(100% buff)", dim),
                Span::styled(": ", normal),
                Span::styled(format_integer(cop.total_x4, locale), value),
            ]));
        }
        None => lines.push(Line::from(Span::styled(
            format!(" No baseline CoP per troop is set for “{}”.", r.action),
            Style::default().fg(Color::LightYellow),
        ))),
    }
    lines
}

// ── Key hints ──────────────────────────────────────────────────────────

fn render_help(state: &FormState, f: &mut Frame, area: Rect, borders: Borders) {
    let hint = match state.focus {
        Focus::Menu => "↑↓ move · Enter choose · Esc close",
        Focus::Activator => "Enter/↓ open list · Tab next",
        Focus::Field(_) => "digits only · Enter calculate · Tab next",
        Focus::Calculate => "Enter calculate · Tab next",
    };
    let help = Paragraph::new(Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    )))
    .block(
        Block::default()
            .borders(borders)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(help, area);
}
