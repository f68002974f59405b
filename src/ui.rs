use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Tabs, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Blocker, Mode};
use crate::celebration::Celebration;
use crate::drill::{QuizView, WordPhase, WordView};
use crate::session::{QuizResult, Scoreboard};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(3), // tabs
                Constraint::Min(1),    // drill
                Constraint::Length(1), // legend
            ])
            .split(area);

        Tabs::new(Mode::ALL.iter().map(|mode| mode.title()))
            .select(self.mode.index())
            .block(Block::bordered().title(" TOEIC Master "))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .render(chunks[0], buf);

        match self.blocker() {
            Some(blocker) => render_blocker(blocker, chunks[1], buf),
            None => match self.mode {
                Mode::Words => match self.word_view() {
                    Some(view) => render_word_card(&view, chunks[1], buf),
                    None => render_nothing_drawn(chunks[1], buf),
                },
                Mode::Versus => match self.quiz_view() {
                    Some(view) => render_versus(&view, chunks[1], buf),
                    None => render_nothing_drawn(chunks[1], buf),
                },
                Mode::Scored => match self.word_view() {
                    Some(view) => render_scored(&view, chunks[1], buf),
                    None => render_nothing_drawn(chunks[1], buf),
                },
            },
        }

        Paragraph::new(Span::styled(
            legend(self.mode),
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(chunks[2], buf);

        if self.celebration.is_active {
            render_balloons(&self.celebration, area, buf);
        }
    }
}

fn legend(mode: Mode) -> &'static str {
    match mode {
        Mode::Words => "(space) reveal / (n)ext / (tab) mode / (esc)ape",
        Mode::Versus => "(1) (2) answer / (n)ext / (tab) mode / (esc)ape",
        Mode::Scored => {
            "(space) reveal / (k)new it / (u)nknown / (r)eset / (tab) mode / (esc)ape"
        }
    }
}

/// Rows `lines` take up when wrapped to `max_width` columns
fn occupied_lines(lines: &[Line], max_width: u16) -> u16 {
    let max_width = usize::from(max_width.max(1));
    let total: usize = lines
        .iter()
        .map(|line| {
            let width: usize = line.spans.iter().map(|s| s.content.width()).sum();
            width.div_ceil(max_width).max(1)
        })
        .sum();
    u16::try_from(total).unwrap_or(u16::MAX)
}

/// A rect of `height` rows centred vertically in `area`
fn centered(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    chunks[1]
}

fn render_blocker(blocker: Blocker, area: Rect, buf: &mut Buffer) {
    let (title, message) = match blocker {
        Blocker::Load(e) => (" Cannot load data ", e.to_string()),
        Blocker::Empty(e) => (" Nothing to practise ", e.to_string()),
    };
    let lines = vec![
        Line::styled(
            message,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(
            "Fix the file and restart, or try --demo for the bundled sample.",
            Style::default().add_modifier(Modifier::DIM),
        ),
    ];
    let height = occupied_lines(&lines, area.width.saturating_sub(2)).saturating_add(2);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .title(title)
                .border_style(Style::default().fg(Color::Red)),
        )
        .render(centered(area, height), buf);
}

fn render_nothing_drawn(area: Rect, buf: &mut Buffer) {
    Paragraph::new(Span::styled(
        "Nothing drawn yet",
        Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(centered(area, 1), buf);
}

fn word_card_lines(view: &WordView) -> Vec<Line<'static>> {
    let label = Style::default().add_modifier(Modifier::DIM);
    let mut lines = vec![
        Line::styled(
            view.english.clone(),
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
    ];

    match view.phase {
        WordPhase::Showing => lines.push(Line::styled(
            "press space to reveal",
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        )),
        WordPhase::Revealed => {
            if let Some(korean) = &view.korean {
                lines.push(Line::from(vec![
                    Span::styled("meaning  ", label),
                    Span::styled(
                        korean.clone(),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
            if let Some(synonyms) = &view.synonyms {
                lines.push(Line::from(vec![
                    Span::styled("synonyms ", label),
                    Span::styled(synonyms.clone(), Style::default().fg(Color::Gray)),
                ]));
            }
            if let Some(example) = &view.example {
                lines.push(Line::raw(""));
                lines.push(Line::from(vec![
                    Span::styled("example  ", label),
                    Span::styled(
                        example.clone(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::ITALIC),
                    ),
                ]));
            }
        }
    }
    lines
}

fn render_word_card(view: &WordView, area: Rect, buf: &mut Buffer) {
    let lines = word_card_lines(view);
    let height = occupied_lines(&lines, area.width.saturating_sub(2)).saturating_add(2);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::bordered())
        .render(centered(area, height), buf);
}

fn scoreboard_line(scoreboard: &Scoreboard) -> Line<'static> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let accuracy = scoreboard
        .accuracy()
        .map(|acc| format!("{acc:.0}%"))
        .unwrap_or_else(|| "-".to_owned());

    Line::from(vec![
        Span::styled(format!("score {}", scoreboard.score), bold.fg(Color::Yellow)),
        Span::raw("   "),
        Span::styled(
            format!("combo {}", scoreboard.combo),
            if scoreboard.combo > 1 {
                bold.fg(Color::Magenta)
            } else {
                bold
            },
        ),
        Span::raw("   "),
        Span::raw(format!("best {}", scoreboard.best_combo)),
        Span::raw("   "),
        Span::raw(format!(
            "known {}/{} ({accuracy})",
            scoreboard.known, scoreboard.attempts
        )),
    ])
}

fn render_scored(view: &WordView, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // scoreboard
            Constraint::Min(1),    // card
            Constraint::Length(1), // marking hint
        ])
        .split(area);

    Paragraph::new(scoreboard_line(&view.scoreboard))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    render_word_card(view, chunks[1], buf);

    if view.phase == WordPhase::Revealed {
        Paragraph::new(Span::styled(
            format!(
                "(k)new it +{} / (u)nknown",
                view.scoreboard.next_award()
            ),
            Style::default().add_modifier(Modifier::DIM),
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);
    }
}

fn option_style(view: &QuizView, option: &str) -> Style {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    if view.options_enabled() {
        return bold;
    }
    match view.correct.as_deref() {
        Some(correct) if option == correct => bold.fg(Color::Green),
        _ if view.result == QuizResult::Wrong => bold.fg(Color::Red),
        _ => Style::default().add_modifier(Modifier::DIM),
    }
}

fn result_line(view: &QuizView) -> Line<'static> {
    let correct = view.correct.clone().unwrap_or_default();
    match view.result {
        QuizResult::Correct => Line::styled(
            format!("Correct! The answer is '{correct}'."),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        QuizResult::Wrong => Line::styled(
            format!("Wrong. The answer is '{correct}'."),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        QuizResult::Pending => Line::styled(
            "Which one fits the blank?",
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        ),
    }
}

fn render_versus(view: &QuizView, area: Rect, buf: &mut Buffer) {
    let inner_width = area.width.saturating_sub(2);
    let question = vec![Line::styled(
        view.question.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    let question_height = occupied_lines(&question, inner_width).saturating_add(2);

    let explanation = view
        .explanation
        .as_ref()
        .map(|text| vec![Line::styled(text.clone(), Style::default().fg(Color::Yellow))]);
    let explanation_height = explanation
        .as_ref()
        .map_or(0, |lines| occupied_lines(lines, inner_width).saturating_add(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(question_height),
            Constraint::Length(1),
            Constraint::Length(3), // options
            Constraint::Length(1),
            Constraint::Length(1), // result
            Constraint::Length(explanation_height),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(question)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().title(" Q "))
        .render(chunks[0], buf);

    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .spacing(2)
        .split(chunks[2]);

    for (slot, (option, rect)) in view.options.iter().zip(slots.iter()).enumerate() {
        let style = option_style(view, option);
        Paragraph::new(Span::styled(option.clone(), style))
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .title(format!(" {} ", slot + 1))
                    .border_style(style),
            )
            .render(*rect, buf);
    }

    Paragraph::new(result_line(view))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    if let Some(lines) = explanation {
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .title(" explanation ")
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .render(chunks[5], buf);
    }
}

/// Draw balloons on top of whatever is already in the buffer
fn render_balloons(celebration: &Celebration, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Red,
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
        Color::Blue,
        Color::LightRed,
    ];

    for balloon in &celebration.balloons {
        if balloon.x < 0.0 || balloon.y < 0.0 {
            continue;
        }
        let x = balloon.x as u16;
        let y = balloon.y as u16;
        if x >= area.width {
            continue;
        }

        let color = colors[balloon.color_index % colors.len()];
        let style = if balloon.freshness() > 0.3 {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color).add_modifier(Modifier::DIM)
        };

        if y < area.height {
            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                cell.set_symbol("●");
                cell.set_style(style);
            }
        }
        if y + 1 < area.height {
            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y + 1)) {
                cell.set_symbol("│");
                cell.set_style(Style::default().fg(Color::Gray));
            }
        }
    }
}
