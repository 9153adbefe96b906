//! Two-pane terminal browser: sections on the left, the selected section's
//! options and lists on the right.

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::io::{Stdout, stdout};
use uci2_engine::{Document, NodeId, NodeType};

pub struct App {
    title: String,
    document: Document,
    sections: Vec<NodeId>,
    section_list_state: ListState,
    current_content: Vec<String>,
}

impl App {
    pub fn new(title: String, document: Document) -> Self {
        let sections: Vec<NodeId> = document.sections().collect();

        let mut app = Self {
            title,
            document,
            sections,
            section_list_state: ListState::default(),
            current_content: Vec::new(),
        };

        if !app.sections.is_empty() {
            app.section_list_state.select(Some(0));
            app.update_content_for_selection();
        }

        app
    }

    fn next_section(&mut self) {
        if self.sections.is_empty() {
            return;
        }
        let i = match self.section_list_state.selected() {
            Some(i) => (i + 1) % self.sections.len(),
            None => 0,
        };
        self.section_list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn previous_section(&mut self) {
        if self.sections.is_empty() {
            return;
        }
        let i = match self.section_list_state.selected() {
            Some(0) | None => self.sections.len() - 1,
            Some(i) => i - 1,
        };
        self.section_list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn update_content_for_selection(&mut self) {
        if let Some(index) = self.section_list_state.selected()
            && let Some(&section) = self.sections.get(index)
        {
            self.current_content = match section_lines(&self.document, section) {
                Ok(lines) => lines,
                Err(e) => vec![format!("Error reading section: {e}")],
            };
        }
    }

    fn section_label(&self, section: NodeId) -> String {
        let name = self.document.section_name(section).unwrap_or("?");
        let type_ = self.document.section_type(section).unwrap_or("?");
        format!("{name} ({type_})")
    }
}

/// Right-pane text for one section.
fn section_lines(doc: &Document, section: NodeId) -> uci2_engine::Result<Vec<String>> {
    let mut lines = vec![
        format!("type: {}", doc.section_type(section)?),
        format!("name: {}", doc.section_name(section)?),
        String::new(),
    ];
    for entry in doc.iter(section)? {
        match doc.node_type(entry)? {
            NodeType::Option => lines.push(format!(
                "{} = {}",
                doc.option_name(entry)?,
                doc.option_value(entry)?
            )),
            NodeType::List => {
                lines.push(format!("{}:", doc.list_name(entry)?));
                lines.extend(doc.list_values(entry)?.into_iter().map(|v| format!("  • {v}")));
            }
            _ => {}
        }
    }
    Ok(lines)
}

/// Take over the terminal until the user quits.
pub fn run(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_section(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_section(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);

    let section_items: Vec<ListItem> = app
        .sections
        .iter()
        .map(|&section| ListItem::new(Line::from(Span::raw(app.section_label(section)))))
        .collect();

    let sections_list = List::new(section_items)
        .block(Block::default().borders(Borders::ALL).title(app.title.clone()))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(sections_list, chunks[0], &mut app.section_list_state);

    let content_text: Vec<Line> = if app.current_content.is_empty() {
        vec![Line::from("No sections")]
    } else {
        app.current_content
            .iter()
            .map(|line| Line::from(Span::raw(line.clone())))
            .collect()
    };

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title("Section"))
        .wrap(ratatui::widgets::Wrap { trim: false });

    f.render_widget(content, chunks[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next"),
    ]));
    f.render_widget(help, rows[1]);
}
