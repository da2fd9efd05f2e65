use std::{io, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};
use tracing::info;

use playledger_core::{
    config::AppConfig,
    engine::{verdict, ScoreSheet},
    export,
    ledger::Ledger,
    models::Game,
    rank,
    rubric::SCORE_MAX,
    storage::GameStore,
};

const TICK_RATE: Duration = Duration::from_millis(250);
const MAX_NAME_LEN: usize = 64;
const MAX_FIELD_LEN: usize = 128;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    selection_fg: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    List,
    Deadline,
}

impl Tab {
    fn title(self) -> &'static str {
        match self {
            Tab::List => "Danh sách",
            Tab::Deadline => "Deadline",
        }
    }

    fn next(self) -> Self {
        match self {
            Tab::List => Tab::Deadline,
            Tab::Deadline => Tab::List,
        }
    }
}

/// Single-line text input with a character cursor.
#[derive(Debug, Clone, Default)]
struct InputField {
    value: String,
    cursor: usize,
    limit: usize,
}

impl InputField {
    fn new(limit: usize) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            limit,
        }
    }

    fn with_value(limit: usize, value: &str) -> Self {
        let mut field = Self::new(limit);
        field.value = value.to_string();
        field.cursor = field.value.chars().count();
        field
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(index, _)| index)
            .unwrap_or(self.value.len())
    }

    fn insert(&mut self, ch: char) {
        if ch.is_control() || self.value.chars().count() >= self.limit {
            return;
        }
        let index = self.byte_index();
        self.value.insert(index, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let index = self.byte_index();
        self.value.remove(index);
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.value.chars().count() as isize;
        self.cursor = (self.cursor as isize + delta).clamp(0, len) as usize;
    }

    fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddFocus {
    Name,
    Image,
}

#[derive(Debug, Clone)]
struct AddGameForm {
    name: InputField,
    image: InputField,
    focus: AddFocus,
    error: Option<String>,
}

impl AddGameForm {
    fn new() -> Self {
        Self {
            name: InputField::new(MAX_NAME_LEN),
            image: InputField::new(MAX_FIELD_LEN),
            focus: AddFocus::Name,
            error: None,
        }
    }

    fn focused_field(&mut self) -> &mut InputField {
        match self.focus {
            AddFocus::Name => &mut self.name,
            AddFocus::Image => &mut self.image,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            AddFocus::Name => AddFocus::Image,
            AddFocus::Image => AddFocus::Name,
        };
    }
}

#[derive(Debug, Clone)]
struct RateForm {
    game_id: String,
    game_name: String,
    cursor: usize,
    scores: Vec<i64>,
}

impl RateForm {
    /// Prefill from the game's latest evaluation, zeros otherwise.
    fn new(game: &Game, ledger: &Ledger) -> Self {
        let scores = ledger
            .rubric()
            .criteria()
            .iter()
            .map(|criterion| {
                game.latest_evaluation()
                    .and_then(|eval| eval.scores.get(&criterion.key).copied())
                    .unwrap_or(0)
            })
            .collect();
        Self {
            game_id: game.id.clone(),
            game_name: game.name.clone(),
            cursor: 0,
            scores,
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.scores.len() as isize;
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor as isize + delta).clamp(0, len - 1) as usize;
    }

    fn set_score(&mut self, value: i64) {
        if let Some(slot) = self.scores.get_mut(self.cursor) {
            *slot = value.clamp(0, SCORE_MAX);
        }
    }

    fn adjust_score(&mut self, delta: i64) {
        if let Some(slot) = self.scores.get_mut(self.cursor) {
            *slot = (*slot + delta).clamp(0, SCORE_MAX);
        }
    }

    fn total(&self) -> i64 {
        self.scores.iter().sum()
    }

    fn sheet(&self, ledger: &Ledger) -> ScoreSheet {
        ledger
            .rubric()
            .criteria()
            .iter()
            .zip(&self.scores)
            .map(|(criterion, score)| (criterion.key.clone(), *score))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditTarget {
    Deadline,
    Revenue,
}

#[derive(Debug, Clone)]
struct EditState {
    game_id: String,
    target: EditTarget,
    field: InputField,
}

#[derive(Debug, Clone)]
enum Modal {
    AddGame(AddGameForm),
    Rate(RateForm),
    ConfirmSave,
    ConfirmDelete { game_id: String, name: String },
}

/// Top-level application state for the PlayLedger terminal frontend.
pub struct PlayLedgerApp {
    config: AppConfig,
    store: GameStore,
    ledger: Ledger,
    tab: Tab,
    list_cursor: usize,
    deadline_cursor: usize,
    list_rows: Vec<Game>,
    deadline_rows: Vec<Game>,
    modal: Option<Modal>,
    edit: Option<EditState>,
    status: Option<String>,
    mirrored_revision: u64,
    should_quit: bool,
    theme: Theme,
}

impl PlayLedgerApp {
    pub fn new(config: AppConfig, store: GameStore, ledger: Ledger) -> Self {
        Self {
            config,
            store,
            ledger,
            tab: Tab::List,
            list_cursor: 0,
            deadline_cursor: 0,
            list_rows: Vec::new(),
            deadline_rows: Vec::new(),
            modal: None,
            edit: None,
            status: None,
            mirrored_revision: 0,
            should_quit: false,
            theme: Theme::default(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        self.set_status(format!(
            "Loaded {} games from {}",
            self.ledger.games().len(),
            self.store.path().display()
        ));

        let result = self.event_loop(&mut terminal);

        disable_raw_mode().ok();
        execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
        terminal.show_cursor().ok();
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        loop {
            self.refresh_views();
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                break;
            }
            if event::poll(TICK_RATE).context("failed to poll input")? {
                if let Event::Key(key) = event::read().context("failed to read input")? {
                    if key.kind == KeyEventKind::Press {
                        self.on_key(key);
                    }
                }
            }
            self.mirror_store();
        }
        Ok(())
    }

    /// Recompute the two projections and clamp the cursors.
    fn refresh_views(&mut self) {
        self.list_rows = rank::list_view(self.ledger.games());
        self.deadline_rows = rank::deadline_view(self.ledger.games());
        self.list_cursor = self
            .list_cursor
            .min(self.list_rows.len().saturating_sub(1));
        self.deadline_cursor = self
            .deadline_cursor
            .min(self.deadline_rows.len().saturating_sub(1));
    }

    /// Mirror the snapshot to disk whenever the ledger has moved on.
    /// A failed write becomes a status line, not a crash, and is retried
    /// on the next change.
    fn mirror_store(&mut self) {
        if self.ledger.revision() == self.mirrored_revision {
            return;
        }
        match self.store.persist(self.ledger.games()) {
            Ok(()) => self.mirrored_revision = self.ledger.revision(),
            Err(err) => self.set_status(format!("Save failed: {err}")),
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    fn selected_game(&self) -> Option<&Game> {
        match self.tab {
            Tab::List => self.list_rows.get(self.list_cursor),
            Tab::Deadline => self.deadline_rows.get(self.deadline_cursor),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.modal.is_some() {
            self.on_modal_key(key);
            return;
        }
        if self.edit.is_some() {
            self.on_edit_key(key);
            return;
        }
        self.on_browse_key(key);
    }

    fn on_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::Char('1') => self.tab = Tab::List,
            KeyCode::Char('2') => self.tab = Tab::Deadline,
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Char('a') => self.modal = Some(Modal::AddGame(AddGameForm::new())),
            KeyCode::Char('e') => self.export_snapshot(),
            KeyCode::Char(' ') => self.toggle_playing_selected(),
            KeyCode::Char('w') => self.toggle_watching_selected(),
            KeyCode::Char('x') if self.tab == Tab::List => self.confirm_delete_selected(),
            KeyCode::Char('r') if self.tab == Tab::List => self.open_rate_modal(),
            KeyCode::Enter => match self.tab {
                Tab::List => self.open_rate_modal(),
                Tab::Deadline => self.open_edit(EditTarget::Deadline),
            },
            KeyCode::Char('d') if self.tab == Tab::Deadline => {
                self.open_edit(EditTarget::Deadline)
            }
            KeyCode::Char('m') if self.tab == Tab::Deadline => {
                self.open_edit(EditTarget::Revenue)
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let (cursor, len) = match self.tab {
            Tab::List => (&mut self.list_cursor, self.list_rows.len()),
            Tab::Deadline => (&mut self.deadline_cursor, self.deadline_rows.len()),
        };
        if len == 0 {
            return;
        }
        let next = (*cursor as isize + delta).clamp(0, len as isize - 1);
        *cursor = next as usize;
    }

    fn toggle_playing_selected(&mut self) {
        if let Some(id) = self.selected_game().map(|game| game.id.clone()) {
            self.ledger.toggle_playing(&id);
        }
    }

    fn toggle_watching_selected(&mut self) {
        if !self.ledger.rubric().has_watch_list() {
            return;
        }
        if let Some(id) = self.selected_game().map(|game| game.id.clone()) {
            self.ledger.toggle_watching(&id);
        }
    }

    fn confirm_delete_selected(&mut self) {
        if let Some(game) = self.selected_game() {
            self.modal = Some(Modal::ConfirmDelete {
                game_id: game.id.clone(),
                name: game.name.clone(),
            });
        }
    }

    fn open_rate_modal(&mut self) {
        if let Some(game) = self.selected_game() {
            self.modal = Some(Modal::Rate(RateForm::new(game, &self.ledger)));
        }
    }

    fn open_edit(&mut self, target: EditTarget) {
        let Some(game) = self.selected_game() else {
            return;
        };
        let current = match target {
            EditTarget::Deadline => game.deadline.clone().unwrap_or_default(),
            EditTarget::Revenue => game.mobile_revenue.map(format_revenue).unwrap_or_default(),
        };
        self.edit = Some(EditState {
            game_id: game.id.clone(),
            target,
            field: InputField::with_value(MAX_FIELD_LEN, &current),
        });
    }

    fn on_edit_key(&mut self, key: KeyEvent) {
        let Some(mut edit) = self.edit.take() else {
            return;
        };
        match key.code {
            KeyCode::Esc => return,
            KeyCode::Enter => {
                match edit.target {
                    EditTarget::Deadline => {
                        self.ledger.set_deadline(&edit.game_id, edit.field.value());
                    }
                    EditTarget::Revenue => {
                        self.ledger
                            .set_mobile_revenue(&edit.game_id, edit.field.value());
                    }
                }
                return;
            }
            KeyCode::Backspace => edit.field.backspace(),
            KeyCode::Left => edit.field.move_cursor(-1),
            KeyCode::Right => edit.field.move_cursor(1),
            KeyCode::Char(ch) => edit.field.insert(ch),
            _ => {}
        }
        self.edit = Some(edit);
    }

    fn on_modal_key(&mut self, key: KeyEvent) {
        let Some(modal) = self.modal.take() else {
            return;
        };
        match modal {
            Modal::AddGame(form) => self.on_add_game_key(form, key),
            Modal::Rate(form) => self.on_rate_key(form, key),
            Modal::ConfirmSave => self.on_confirm_save_key(key),
            Modal::ConfirmDelete { game_id, name } => {
                self.on_confirm_delete_key(game_id, name, key)
            }
        }
    }

    fn on_add_game_key(&mut self, mut form: AddGameForm, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => return,
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => form.toggle_focus(),
            KeyCode::Enter => {
                let image = match form.image.value().trim() {
                    "" => None,
                    reference => Some(reference.to_string()),
                };
                match self.ledger.add_game(form.name.value(), image) {
                    Ok(game) => {
                        info!("Added game {}", game.id);
                        let summary = format!("Added \"{}\"", game.name);
                        self.set_status(summary);
                        return;
                    }
                    Err(err) => form.error = Some(err.to_string()),
                }
            }
            KeyCode::Backspace => form.focused_field().backspace(),
            KeyCode::Left => form.focused_field().move_cursor(-1),
            KeyCode::Right => form.focused_field().move_cursor(1),
            KeyCode::Char(ch) => form.focused_field().insert(ch),
            _ => {}
        }
        self.modal = Some(Modal::AddGame(form));
    }

    fn on_rate_key(&mut self, mut form: RateForm, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => return,
            KeyCode::Enter => {
                let sheet = form.sheet(&self.ledger);
                let staged = self.ledger.stage_evaluation(&form.game_id, sheet);
                info!("Staged evaluation {} for {}", staged.id, form.game_id);
                self.modal = Some(Modal::ConfirmSave);
                return;
            }
            KeyCode::Down | KeyCode::Char('j') => form.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => form.move_cursor(-1),
            KeyCode::Left | KeyCode::Char('h') => form.adjust_score(-1),
            KeyCode::Right | KeyCode::Char('l') => form.adjust_score(1),
            KeyCode::Char(ch @ '0'..='5') => {
                form.set_score(i64::from(ch as u8 - b'0'));
            }
            _ => {}
        }
        self.modal = Some(Modal::Rate(form));
    }

    fn on_confirm_save_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => {
                if self.ledger.confirm_evaluation() {
                    self.set_status("Evaluation saved");
                } else {
                    self.set_status("Nothing to save");
                }
            }
            KeyCode::Esc | KeyCode::Char('n') => {
                self.ledger.cancel_evaluation();
                self.set_status("Evaluation discarded");
            }
            _ => self.modal = Some(Modal::ConfirmSave),
        }
    }

    fn on_confirm_delete_key(&mut self, game_id: String, name: String, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => {
                self.ledger.delete_game(&game_id);
                self.set_status(format!("Deleted \"{name}\""));
            }
            KeyCode::Esc | KeyCode::Char('n') => {}
            _ => self.modal = Some(Modal::ConfirmDelete { game_id, name }),
        }
    }

    fn export_snapshot(&mut self) {
        match export::export_snapshot(&self.config.export_dir, self.ledger.games()) {
            Ok(path) => self.set_status(format!("Exported to {}", path.display())),
            Err(err) => self.set_status(format!("Export failed: {err}")),
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(3),
                Constraint::Length(2),
            ])
            .split(frame.size());

        self.draw_header(frame, chunks[0]);
        match self.tab {
            Tab::List => self.draw_list_tab(frame, chunks[1]),
            Tab::Deadline => self.draw_deadline_tab(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);

        match &self.modal {
            Some(Modal::AddGame(form)) => self.draw_add_modal(frame, form),
            Some(Modal::Rate(form)) => self.draw_rate_modal(frame, form),
            Some(Modal::ConfirmSave) => self.draw_confirm_save_modal(frame),
            Some(Modal::ConfirmDelete { name, .. }) => {
                self.draw_confirm_delete_modal(frame, name)
            }
            None => {}
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                "PlayLedger",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
        ];
        for tab in [Tab::List, Tab::Deadline] {
            let style = if tab == self.tab {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(self.theme.muted)
            };
            spans.push(Span::styled(format!(" {} ", tab.title()), style));
        }
        let header = Paragraph::new(Line::from(spans)).alignment(Alignment::Left);
        frame.render_widget(header, area);
    }

    fn draw_list_tab(&self, frame: &mut Frame, area: Rect) {
        let max_total = self.ledger.rubric().max_total();
        let header = Row::new(vec!["#", " ", "Name", "Score", "Verdict"])
            .style(Style::default().fg(self.theme.muted));

        let rows: Vec<Row> = self
            .list_rows
            .iter()
            .enumerate()
            .map(|(index, game)| {
                let marker = if game.status.is_playing() {
                    Span::styled("√", Style::default().fg(self.theme.success))
                } else if game.status.is_watching() {
                    Span::styled("◉", Style::default().fg(self.theme.warning))
                } else {
                    Span::raw(" ")
                };
                let verdict_label = if game.evaluations.is_empty() {
                    Span::styled("—", Style::default().fg(self.theme.muted))
                } else {
                    Span::raw(verdict(game.score_cached, self.ledger.rubric()))
                };
                let mut row = Row::new(vec![
                    Cell::from((index + 1).to_string()),
                    Cell::from(marker),
                    Cell::from(game.name.clone()),
                    Cell::from(score_out_of_ten(game.score_cached, max_total)),
                    Cell::from(verdict_label),
                ]);
                if index == self.list_cursor {
                    row = row.style(
                        Style::default()
                            .bg(self.theme.selection_bg)
                            .fg(self.theme.selection_fg),
                    );
                }
                row
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Length(2),
                Constraint::Min(24),
                Constraint::Length(8),
                Constraint::Min(26),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Danh sách ({}) ", self.list_rows.len())),
        );
        frame.render_widget(table, area);
    }

    fn draw_deadline_tab(&self, frame: &mut Frame, area: Rect) {
        let max_total = self.ledger.rubric().max_total();
        let header = Row::new(vec!["Name", "Deadline", "Monthly revenue", "Score"])
            .style(Style::default().fg(self.theme.muted));

        let rows: Vec<Row> = self
            .deadline_rows
            .iter()
            .enumerate()
            .map(|(index, game)| {
                let deadline_cell = self
                    .editing_cell(game, EditTarget::Deadline)
                    .unwrap_or_else(|| {
                        game.deadline
                            .clone()
                            .filter(|text| !text.is_empty())
                            .map_or_else(
                                || {
                                    Cell::from(Span::styled(
                                        "dd/mm/yy",
                                        Style::default().fg(self.theme.muted),
                                    ))
                                },
                                Cell::from,
                            )
                    });
                let revenue_cell = self
                    .editing_cell(game, EditTarget::Revenue)
                    .unwrap_or_else(|| {
                        game.mobile_revenue.map_or_else(
                            || {
                                Cell::from(Span::styled(
                                    "0",
                                    Style::default().fg(self.theme.muted),
                                ))
                            },
                            |value| Cell::from(format_revenue(value)),
                        )
                    });
                let mut row = Row::new(vec![
                    Cell::from(game.name.clone()),
                    deadline_cell,
                    revenue_cell,
                    Cell::from(score_out_of_ten(game.score_cached, max_total)),
                ]);
                if index == self.deadline_cursor {
                    row = row.style(
                        Style::default()
                            .bg(self.theme.selection_bg)
                            .fg(self.theme.selection_fg),
                    );
                }
                row
            })
            .collect();

        let title = if self.deadline_rows.is_empty() {
            " Deadline — không có game đang chơi ".to_string()
        } else {
            format!(" Deadline ({}) ", self.deadline_rows.len())
        };
        let table = Table::new(
            rows,
            [
                Constraint::Min(24),
                Constraint::Length(14),
                Constraint::Length(18),
                Constraint::Length(8),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(table, area);
    }

    /// Cell showing the live edit buffer when this game/column is being
    /// edited, `None` otherwise.
    fn editing_cell(&self, game: &Game, target: EditTarget) -> Option<Cell<'static>> {
        let edit = self.edit.as_ref()?;
        if edit.game_id != game.id || edit.target != target {
            return None;
        }
        Some(Cell::from(Span::styled(
            format!("{}▌", edit.field.value()),
            Style::default().fg(self.theme.accent),
        )))
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let hints = if self.edit.is_some() {
            "Enter commit • Esc cancel"
        } else {
            match self.tab {
                Tab::List if self.ledger.rubric().has_watch_list() => {
                    "␣ playing • w watch • Enter rate • a add • x delete • e export • Tab view • q quit"
                }
                Tab::List => {
                    "␣ playing • Enter rate • a add • x delete • e export • Tab view • q quit"
                }
                Tab::Deadline => {
                    "Enter deadline • m revenue • ␣ playing • a add • e export • Tab view • q quit"
                }
            }
        };
        let mut lines = vec![Line::from(Span::styled(
            hints,
            Style::default().fg(self.theme.muted),
        ))];
        if let Some(status) = &self.status {
            lines.push(Line::from(Span::styled(
                status.clone(),
                Style::default().fg(self.theme.primary_fg),
            )));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_add_modal(&self, frame: &mut Frame, form: &AddGameForm) {
        let area = centered_rect(frame.size(), 60, 9);
        frame.render_widget(Clear, area);

        let field_line = |label: &str, field: &InputField, focused: bool| {
            let marker = if focused { "› " } else { "  " };
            let style = if focused {
                Style::default().fg(self.theme.accent)
            } else {
                Style::default().fg(self.theme.primary_fg)
            };
            Line::from(vec![
                Span::styled(format!("{marker}{label}: "), style),
                Span::raw(field.value().to_string()),
                Span::raw(if focused { "▌" } else { "" }),
            ])
        };

        let mut lines = vec![
            field_line("Tên game", &form.name, form.focus == AddFocus::Name),
            field_line("Ảnh (tuỳ chọn)", &form.image, form.focus == AddFocus::Image),
            Line::default(),
        ];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(self.theme.danger),
            )));
        }
        lines.push(Line::from(Span::styled(
            "Enter lưu • Tab chuyển ô • Esc hủy",
            Style::default().fg(self.theme.muted),
        )));

        let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Thêm game mới "),
        );
        frame.render_widget(body, area);
    }

    fn draw_rate_modal(&self, frame: &mut Frame, form: &RateForm) {
        let rubric = self.ledger.rubric();
        let height = (rubric.len() as u16 + 8).min(frame.size().height.saturating_sub(2));
        let area = centered_rect(frame.size(), 76, height);
        frame.render_widget(Clear, area);

        let mut lines = Vec::new();
        for (index, criterion) in rubric.criteria().iter().enumerate() {
            let selected = index == form.cursor;
            let score = form.scores.get(index).copied().unwrap_or(0);
            let style = if selected {
                Style::default()
                    .fg(self.theme.selection_fg)
                    .bg(self.theme.selection_bg)
            } else {
                Style::default().fg(self.theme.primary_fg)
            };
            lines.push(Line::from(Span::styled(
                format!("{:<52} {score}/{SCORE_MAX}", criterion.title),
                style,
            )));
        }
        lines.push(Line::default());
        if let Some(criterion) = rubric.criteria().get(form.cursor) {
            lines.push(Line::from(Span::styled(
                criterion.hint.clone(),
                Style::default().fg(self.theme.muted),
            )));
        }
        lines.push(Line::default());
        let total = form.total();
        lines.push(Line::from(vec![
            Span::styled(
                format!("Tổng: {total}/{}", rubric.max_total()),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                verdict(total, rubric),
                Style::default().fg(self.theme.primary_fg),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            "0-5 chấm điểm • ↑↓ di chuyển • Enter lưu đánh giá • Esc đóng",
            Style::default().fg(self.theme.muted),
        )));

        let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Đánh giá: {} ", form.game_name)),
        );
        frame.render_widget(body, area);
    }

    fn draw_confirm_save_modal(&self, frame: &mut Frame) {
        let area = centered_rect(frame.size(), 56, 8);
        frame.render_widget(Clear, area);

        let rubric = self.ledger.rubric();
        let mut lines = vec![Line::from(
            "Bạn có chắc chắn muốn lưu kết quả này cho game?",
        )];
        if let Some(pending) = self.ledger.pending() {
            let total = pending.evaluation.total;
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled(
                    format!("Tổng: {total}/{}", rubric.max_total()),
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::raw(verdict(total, rubric)),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Enter chắc chắn lưu • Esc hủy",
            Style::default().fg(self.theme.muted),
        )));

        let body = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Xác nhận "));
        frame.render_widget(body, area);
    }

    fn draw_confirm_delete_modal(&self, frame: &mut Frame, name: &str) {
        let area = centered_rect(frame.size(), 50, 6);
        frame.render_widget(Clear, area);

        let lines = vec![
            Line::from(format!("Xóa \"{name}\"?")),
            Line::default(),
            Line::from(Span::styled(
                "Enter xóa • Esc hủy",
                Style::default().fg(self.theme.muted),
            )),
        ];
        let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Xóa game ")
                .border_style(Style::default().fg(self.theme.danger)),
        );
        frame.render_widget(body, area);
    }
}

/// Score on the 10-point scale the shelf display uses (`x.x/10`).
fn score_out_of_ten(score: i64, max_total: i64) -> String {
    if max_total == 0 {
        return "0.0/10".to_string();
    }
    format!("{:.1}/10", score as f64 / max_total as f64 * 10.0)
}

/// Revenue rendered without a trailing `.0` for whole figures.
fn format_revenue(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playledger_core::rubric::Rubric;

    #[test]
    fn input_field_handles_multibyte_text() {
        let mut field = InputField::new(16);
        for ch in "Ánh".chars() {
            field.insert(ch);
        }
        field.move_cursor(-1);
        field.insert('s');
        assert_eq!(field.value(), "Ánsh");
        field.backspace();
        assert_eq!(field.value(), "Ánh");
    }

    #[test]
    fn input_field_respects_its_limit() {
        let mut field = InputField::new(3);
        for ch in "abcdef".chars() {
            field.insert(ch);
        }
        assert_eq!(field.value(), "abc");
    }

    #[test]
    fn rate_form_prefills_from_latest_evaluation() {
        let mut ledger = Ledger::new(Rubric::standard());
        ledger.add_game_with_id("g".into(), "Game", None).unwrap();
        let sheet: ScoreSheet = [("story".to_string(), 4), ("art".to_string(), 2)]
            .into_iter()
            .collect();
        ledger.stage_evaluation("g", sheet);
        ledger.confirm_evaluation();

        let game = ledger.game("g").unwrap().clone();
        let form = RateForm::new(&game, &ledger);
        assert_eq!(form.scores[0], 4); // story is the first criterion
        assert_eq!(form.scores[3], 2); // art is the fourth
        assert_eq!(form.total(), 6);
    }

    #[test]
    fn rate_form_scores_clamp_to_range() {
        let mut ledger = Ledger::new(Rubric::standard());
        ledger.add_game_with_id("g".into(), "Game", None).unwrap();
        let game = ledger.game("g").unwrap().clone();
        let mut form = RateForm::new(&game, &ledger);
        form.adjust_score(-1);
        assert_eq!(form.scores[0], 0);
        form.set_score(9);
        assert_eq!(form.scores[0], SCORE_MAX);
    }

    #[test]
    fn score_display_uses_the_ten_point_scale() {
        assert_eq!(score_out_of_ten(31, 40), "7.8/10");
        assert_eq!(score_out_of_ten(0, 40), "0.0/10");
        assert_eq!(score_out_of_ten(50, 50), "10.0/10");
    }

    #[test]
    fn revenue_formatting() {
        assert_eq!(format_revenue(2000.0), "2000");
        assert_eq!(format_revenue(120.5), "120.5");
    }
}
