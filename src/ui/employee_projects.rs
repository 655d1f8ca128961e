use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::filter::{self, StatusFilter};
use crate::loader::{LoadOutcome, LoadTicket, ProjectLoader};
use crate::models::{Identity, ProjectWithDetails};
use crate::stats::ProjectStats;
use crate::ui::components::{
    progress_bar::progress_bar,
    status_badge::status_badge,
    text_input::{render_text_input, TextInputState},
};
use crate::ui::format::{format_currency, format_date};

// Input is polled rather than read blocking so the loop can apply
// finished project loads between key presses.
const INPUT_POLL: Duration = Duration::from_millis(100);
const PROGRESS_WIDTH: usize = 20;

// Represents the state of the employee projects screen
pub struct EmployeeProjectsState {
    identity: Identity,
    projects: Vec<ProjectWithDetails>,
    loading: bool,
    loader: ProjectLoader,
    expanded_project_id: Option<String>,
    search: TextInputState,
    status_filter: StatusFilter,
    identity_prompt: Option<TextInputState>,
    list_state: ListState,
}

pub enum EmployeeProjectsAction {
    Exit,
    Load(LoadTicket),
}

impl EmployeeProjectsState {
    /// Build the screen for `identity` along with the ticket for its first load.
    pub fn mount(identity: Identity) -> (Self, LoadTicket) {
        let mut state = Self {
            identity,
            projects: Vec::new(),
            loading: false,
            loader: ProjectLoader::default(),
            expanded_project_id: None,
            search: TextInputState::new("Search projects..."),
            status_filter: StatusFilter::All,
            identity_prompt: None,
            list_state: ListState::default(),
        };
        let ticket = state.begin_load();
        (state, ticket)
    }

    fn begin_load(&mut self) -> LoadTicket {
        self.loading = true;
        self.loader.issue(self.identity.clone())
    }

    /// Switch the viewer. Returns a ticket only when the identity actually changed.
    pub fn set_identity(&mut self, identity: Identity) -> Option<LoadTicket> {
        if identity == self.identity {
            return None;
        }
        tracing::info!(from = %self.identity, to = %identity, "switching employee");
        self.identity = identity;
        Some(self.begin_load())
    }

    pub fn refresh(&mut self) -> LoadTicket {
        self.begin_load()
    }

    /// Apply a finished fetch. Returns false when the outcome was stale and ignored.
    pub fn apply_load(&mut self, outcome: LoadOutcome) -> bool {
        if !self.loader.is_current(&outcome.ticket) {
            tracing::debug!(
                sequence = outcome.ticket.sequence(),
                employee = %outcome.ticket.identity(),
                "discarding stale project load"
            );
            return false;
        }

        match outcome.result {
            Ok(projects) => {
                tracing::info!(
                    employee = %outcome.ticket.identity(),
                    count = projects.len(),
                    "loaded projects"
                );
                self.projects = projects;
                self.clamp_selection();
            }
            Err(err) => {
                tracing::error!(employee = %outcome.ticket.identity(), "Error loading projects: {err:#}");
            }
        }
        self.loading = false;
        true
    }

    pub fn stats(&self) -> ProjectStats {
        ProjectStats::from_projects(&self.projects)
    }

    pub fn visible_projects(&self) -> Vec<&ProjectWithDetails> {
        filter::filter_projects(&self.projects, &self.search.value, &self.status_filter)
    }

    fn visible_count(&self) -> usize {
        self.visible_projects().len()
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search.value = term.to_string();
        self.clamp_selection();
    }

    pub fn set_status_filter(&mut self, status_filter: StatusFilter) {
        self.status_filter = status_filter;
        self.clamp_selection();
    }

    pub fn cycle_status_filter(&mut self) {
        let next = self.status_filter.next();
        self.set_status_filter(next);
    }

    pub fn empty_message(&self) -> &'static str {
        if filter::any_filter_active(&self.search.value, &self.status_filter) {
            "No projects match your filters"
        } else {
            "You are not currently assigned to any projects"
        }
    }

    /// Expand `project_id`, or collapse it if it is already the expanded one.
    pub fn toggle_project_expansion(&mut self, project_id: &str) {
        if self.expanded_project_id.as_deref() == Some(project_id) {
            self.expanded_project_id = None;
        } else {
            self.expanded_project_id = Some(project_id.to_string());
        }
    }

    pub fn is_expanded(&self, project_id: &str) -> bool {
        self.expanded_project_id.as_deref() == Some(project_id)
    }

    pub fn next(&mut self) {
        let len = self.visible_count();
        if len == 0 {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible_count();
        if len == 0 {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_count();
        let selected = match self.list_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
    }

    pub fn selected_project(&self) -> Option<&ProjectWithDetails> {
        let visible = self.visible_projects();
        self.list_state.selected().and_then(|i| visible.get(i).copied())
    }

    pub fn selected_project_id(&self) -> Option<String> {
        self.selected_project().map(|p| p.id.clone())
    }

    fn open_identity_prompt(&mut self) {
        let mut prompt = TextInputState::with_value("Employee id", self.identity.as_str());
        prompt.toggle_editing();
        self.identity_prompt = Some(prompt);
    }
}

pub fn render_employee_projects<B: Backend>(frame: &mut Frame<B>, state: &mut EmployeeProjectsState) {
    let size = frame.size();

    if state.loading {
        let loading = Paragraph::new(vec![Spans::from(""), Spans::from("Loading projects...")])
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(loading, centered_rect(40, 20, size));
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ].as_ref())
        .split(size);

    render_header(frame, chunks[0], &state.identity);
    render_stats(frame, chunks[1], state.stats());
    render_filters(frame, chunks[2], state);
    render_project_list(frame, chunks[3], state);
    render_footer(frame, chunks[4], state);

    if let Some(prompt) = &state.identity_prompt {
        let area = centered_rect(50, 20, size);
        frame.render_widget(Clear, area);
        render_text_input(frame, area, "Switch Employee <Enter> Apply <Esc> Cancel", prompt);
    }
}

fn render_header<B: Backend>(frame: &mut Frame<B>, area: Rect, identity: &Identity) {
    let header = Paragraph::new(vec![
        Spans::from(vec![
            Span::styled("My Projects", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  ({identity})"), Style::default().fg(Color::DarkGray)),
        ]),
        Spans::from(Span::styled(
            "View and manage all your project assignments",
            Style::default().fg(Color::Gray),
        )),
    ]);

    frame.render_widget(header, area);
}

fn render_stats<B: Backend>(frame: &mut Frame<B>, area: Rect, stats: ProjectStats) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ].as_ref())
        .split(area);

    let values = [
        ("Total Projects", stats.total, Color::White),
        ("Active", stats.active, Color::Green),
        ("Completed", stats.completed, Color::Blue),
        ("On Hold", stats.on_hold, Color::Yellow),
    ];

    for ((label, count, color), card) in values.into_iter().zip(cards) {
        let widget = Paragraph::new(vec![
            Spans::from(Span::styled(label, Style::default().fg(Color::Gray))),
            Spans::from(Span::styled(
                count.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
        ])
        .block(Block::default().borders(Borders::ALL));

        frame.render_widget(widget, card);
    }
}

fn render_filters<B: Backend>(frame: &mut Frame<B>, area: Rect, state: &EmployeeProjectsState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(24)].as_ref())
        .split(area);

    render_text_input(frame, chunks[0], "Search </>", &state.search);

    let status = Paragraph::new(Spans::from(state.status_filter.label().to_string()))
        .block(Block::default().title("Status <F>").borders(Borders::ALL));
    frame.render_widget(status, chunks[1]);
}

fn render_project_list<B: Backend>(frame: &mut Frame<B>, area: Rect, state: &mut EmployeeProjectsState) {
    let visible = filter::filter_projects(&state.projects, &state.search.value, &state.status_filter);
    let block = Block::default()
        .title(format!("Projects ({})", visible.len()))
        .borders(Borders::ALL);

    if visible.is_empty() {
        let message = Paragraph::new(vec![Spans::from(""), Spans::from(state.empty_message())])
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|project| {
            let is_expanded = state.is_expanded(&project.id);
            let mut lines = project_summary_lines(project, is_expanded);
            if is_expanded {
                lines.extend(project_detail_lines(project, &state.identity));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    frame.render_stateful_widget(list, area, &mut state.list_state);
}

fn project_summary_lines(project: &ProjectWithDetails, expanded: bool) -> Vec<Spans<'static>> {
    let chevron = if expanded { "▼ " } else { "▶ " };
    let label = Style::default().fg(Color::Gray);

    vec![
        Spans::from(vec![
            Span::raw(chevron),
            Span::styled(project.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            status_badge(&project.status),
        ]),
        Spans::from(vec![
            Span::styled("  My Role: ", label),
            Span::raw(project.my_allocation.role_or_na().to_string()),
            Span::styled("  My Allocation: ", label),
            Span::styled(
                format!("{}%", project.my_allocation.allocation_percentage),
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Progress: ", label),
            Span::raw(format!("{}%", project.progress())),
            Span::styled("  Team Size: ", label),
            Span::raw(format!("{} members", project.team_size())),
        ]),
    ]
}

fn project_detail_lines(project: &ProjectWithDetails, identity: &Identity) -> Vec<Spans<'static>> {
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(Color::Gray);
    let mut lines = Vec::new();

    if let Some(description) = project.visible_description() {
        lines.push(Spans::from(Span::styled("    Description", heading)));
        lines.push(Spans::from(Span::styled(format!("      {description}"), muted)));
    }

    lines.push(Spans::from(vec![
        Span::styled("    Project Timeline      ", heading),
        Span::styled(
            format!(
                "Start: {}  End: {}",
                format_date(project.start_date),
                format_date(project.end_date)
            ),
            muted,
        ),
    ]));
    lines.push(Spans::from(vec![
        Span::styled("    My Assignment Period  ", heading),
        Span::styled(
            format!(
                "Start: {}  End: {}",
                format_date(project.my_allocation.start_date),
                format_date(project.my_allocation.end_date)
            ),
            muted,
        ),
    ]));

    if let Some(budget) = project.visible_budget() {
        lines.push(Spans::from(vec![
            Span::styled("    Project Budget        ", heading),
            Span::styled(format_currency(budget), Style::default().fg(Color::Green)),
        ]));
    }

    lines.push(Spans::from(vec![
        Span::styled("    Project Progress      ", heading),
        Span::styled(
            progress_bar(project.progress(), PROGRESS_WIDTH),
            Style::default().fg(Color::Blue),
        ),
    ]));

    lines.push(Spans::from(Span::styled("    Project Manager", heading)));
    lines.push(Spans::from(vec![
        Span::styled(
            format!("      [{}] ", project.manager_initial()),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Span::raw(project.manager_name.clone().unwrap_or_default()),
        Span::styled(
            format!("  {}", project.manager_email.as_deref().unwrap_or_default()),
            muted,
        ),
    ]));

    lines.push(Spans::from(Span::styled(
        format!("    Team Members ({})", project.team_size()),
        heading,
    )));
    for member in &project.team_members {
        let is_me = member.is(identity);
        let name_style = if is_me {
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let mut spans = vec![
            Span::styled(format!("      [{}] ", member.initial()), muted),
            Span::styled(member.display_name().to_string(), name_style),
        ];
        if is_me {
            spans.push(Span::styled(
                " (You)",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ));
        }
        spans.push(Span::styled(format!("  {}", member.role_or_default()), muted));
        spans.push(Span::styled(
            format!("  {}% allocation", member.allocation_percentage),
            heading,
        ));
        lines.push(Spans::from(spans));
    }

    lines.push(Spans::from(""));
    lines
}

fn render_footer<B: Backend>(frame: &mut Frame<B>, area: Rect, state: &EmployeeProjectsState) {
    let help = if state.identity_prompt.is_some() {
        "<Enter> Apply | <Esc> Cancel"
    } else if state.search.editing {
        "Type to search | <Enter>/<Esc> Done"
    } else {
        "<Up/Down> Move | <Enter> Expand | </> Search | <F> Status | <R> Refresh | <U> Switch Employee | <Q> Quit"
    };

    let footer = Paragraph::new(help)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));

    frame.render_widget(footer, area);
}

// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn handle_input(state: &mut EmployeeProjectsState) -> Result<Option<EmployeeProjectsAction>> {
    if !event::poll(INPUT_POLL)? {
        return Ok(None);
    }
    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            return Ok(handle_key(state, key.code));
        }
    }
    Ok(None)
}

pub fn handle_key(state: &mut EmployeeProjectsState, key: KeyCode) -> Option<EmployeeProjectsAction> {
    if state.identity_prompt.is_some() {
        return handle_identity_prompt_key(state, key);
    }

    if state.search.editing {
        match key {
            KeyCode::Enter | KeyCode::Esc => state.search.toggle_editing(),
            KeyCode::Down => state.next(),
            KeyCode::Up => state.previous(),
            other => {
                if state.search.handle_input(other) {
                    state.clamp_selection();
                }
            }
        }
        return None;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Some(EmployeeProjectsAction::Exit),
        KeyCode::Down => state.next(),
        KeyCode::Up => state.previous(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(id) = state.selected_project_id() {
                state.toggle_project_expansion(&id);
            }
        }
        KeyCode::Char('/') => state.search.toggle_editing(),
        KeyCode::Char('f') => state.cycle_status_filter(),
        KeyCode::Char('r') => return Some(EmployeeProjectsAction::Load(state.refresh())),
        KeyCode::Char('u') => state.open_identity_prompt(),
        _ => {}
    }
    None
}

fn handle_identity_prompt_key(
    state: &mut EmployeeProjectsState,
    key: KeyCode,
) -> Option<EmployeeProjectsAction> {
    match key {
        KeyCode::Esc => {
            state.identity_prompt = None;
        }
        KeyCode::Enter => {
            let raw = state
                .identity_prompt
                .as_ref()
                .map(|prompt| prompt.value.clone())
                .unwrap_or_default();
            match raw.parse::<Identity>() {
                Ok(identity) => {
                    state.identity_prompt = None;
                    return state.set_identity(identity).map(EmployeeProjectsAction::Load);
                }
                Err(err) => tracing::warn!("ignoring employee id {raw:?}: {err}"),
            }
        }
        other => {
            if let Some(prompt) = &mut state.identity_prompt {
                prompt.handle_input(other);
            }
        }
    }
    None
}
