use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use tracing::warn;

use crate::catalog::{excerpt, CatalogEditor, CatalogStore, Facets, CARD_EXCERPT_CHARS};
use crate::models::ListingRecord;
use crate::storage::KeyValueStore;

use super::forms::{ConfirmListingDelete, ListingField, ListingForm};
use super::helpers::{build_card_lines, centered_rect, surface_error};
use super::screens::{AdminScreen, GridScreen};

/// Cards per row in the public grid.
const GRID_COLUMNS: usize = 3;
/// Rows of terminal space given to each card, borders included.
const CARD_HEIGHT: u16 = 7;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

enum Screen {
    Grid(GridScreen),
    Admin(AdminScreen),
}

enum Mode {
    Normal,
    AddingListing(ListingForm),
    EditingListing { id: String, form: ListingForm },
    ConfirmDelete(ConfirmListingDelete),
}

struct StatusMessage {
    text: String,
    kind: StatusKind,
}

enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state: the catalog store plus whichever screen and
/// modal are active. The store is the only catalog state; both screens read
/// straight from it when drawing.
pub struct App<S: KeyValueStore> {
    store: CatalogStore<S>,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl<S: KeyValueStore> App<S> {
    /// Start on the grid with `facets` applied, or on the admin panel.
    pub fn new(store: CatalogStore<S>, facets: Facets, start_in_admin: bool) -> Self {
        let screen = if start_in_admin {
            Screen::Admin(AdminScreen::new())
        } else {
            Screen::Grid(GridScreen::new(facets))
        };
        let mut app = Self {
            store,
            screen,
            mode: Mode::Normal,
            status: None,
        };
        app.surface_durability_warning();
        app
    }

    pub fn store(&self) -> &CatalogStore<S> {
        &self.store
    }

    /// Text of the footer status line, if any.
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    /// Heading of the grid screen, or `None` while the admin panel is open.
    pub fn grid_title(&self) -> Option<String> {
        match &self.screen {
            Screen::Grid(grid) => Some(grid.title()),
            Screen::Admin(_) => None,
        }
    }

    pub fn is_form_open(&self) -> bool {
        matches!(
            self.mode,
            Mode::AddingListing(_) | Mode::EditingListing { .. }
        )
    }

    /// Process one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingListing(form) => self.handle_form(code, None, form)?,
            Mode::EditingListing { id, form } => self.handle_form(code, Some(id), form)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let len = self.store.len();
        match &mut self.screen {
            Screen::Grid(grid) => {
                let visible = grid.visible(self.store.records());
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => *exit = true,
                    KeyCode::Left => grid.move_selection(-1, visible.len()),
                    KeyCode::Right => grid.move_selection(1, visible.len()),
                    KeyCode::Up => grid.move_selection(-(GRID_COLUMNS as isize), visible.len()),
                    KeyCode::Down => grid.move_selection(GRID_COLUMNS as isize, visible.len()),
                    KeyCode::Char('t') => grid.cycle_tech(true),
                    KeyCode::Char('T') => grid.cycle_tech(false),
                    KeyCode::Char('c') => grid.cycle_project(true),
                    KeyCode::Char('C') => grid.cycle_project(false),
                    KeyCode::Char('x') | KeyCode::Char('X') => grid.clear_facets(),
                    KeyCode::Enter => {
                        if let Some(record) = visible.get(grid.selected) {
                            let link = record.link.clone();
                            self.follow_link(&link, "course page");
                        }
                    }
                    KeyCode::Char('b') | KeyCode::Char('B') => {
                        if let Some(record) = visible.get(grid.selected) {
                            let link = record.buy_link.clone();
                            self.follow_link(&link, "buy link");
                        }
                    }
                    KeyCode::Char('a') | KeyCode::Char('A') => {
                        self.clear_status();
                        self.screen = Screen::Admin(AdminScreen::new());
                    }
                    _ => {}
                }
            }
            Screen::Admin(admin) => match code {
                KeyCode::Char('q') | KeyCode::Esc => *exit = true,
                KeyCode::Up => admin.move_selection(-1, len),
                KeyCode::Down => admin.move_selection(1, len),
                KeyCode::PageUp => admin.move_selection(-5, len),
                KeyCode::PageDown => admin.move_selection(5, len),
                KeyCode::Home => admin.select_first(),
                KeyCode::End => admin.select_last(len),
                KeyCode::Char('+') => {
                    self.clear_status();
                    return Ok(Mode::AddingListing(ListingForm::default()));
                }
                KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => {
                    let Some(record) = self.store.records().get(admin.selected) else {
                        self.set_status("No project selected to edit.", StatusKind::Error);
                        return Ok(Mode::Normal);
                    };
                    let mode = Mode::EditingListing {
                        id: record.id.clone(),
                        form: ListingForm::from_record(record),
                    };
                    self.clear_status();
                    return Ok(mode);
                }
                KeyCode::Char('-') | KeyCode::Delete => {
                    let Some(record) = self.store.records().get(admin.selected) else {
                        self.set_status("No project selected to delete.", StatusKind::Error);
                        return Ok(Mode::Normal);
                    };
                    let confirm = ConfirmListingDelete::from(record);
                    self.clear_status();
                    return Ok(Mode::ConfirmDelete(confirm));
                }
                KeyCode::Char('g') | KeyCode::Char('G') => {
                    self.clear_status();
                    self.screen = Screen::Grid(GridScreen::new(Facets::default()));
                }
                _ => {}
            },
        }
        Ok(Mode::Normal)
    }

    fn handle_form(
        &mut self,
        code: KeyCode,
        id: Option<String>,
        mut form: ListingForm,
    ) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Edit cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
            KeyCode::Left => {
                form.cycle_choice(false);
            }
            KeyCode::Right => {
                form.cycle_choice(true);
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_listing(id.as_deref(), &form) {
                Ok(()) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if !keep_open {
            return Ok(Mode::Normal);
        }
        Ok(match id {
            Some(id) => Mode::EditingListing { id, form },
            None => Mode::AddingListing(form),
        })
    }

    fn handle_confirm_delete(
        &mut self,
        code: KeyCode,
        confirm: ConfirmListingDelete,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.perform_delete(&confirm);
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    fn save_listing(&mut self, id: Option<&str>, form: &ListingForm) -> Result<()> {
        let input = form.to_input()?;
        let mut editor = CatalogEditor::new(&mut self.store);
        let (record, message) = match id {
            Some(id) => (editor.update(id, input)?, "Project updated successfully!"),
            None => (editor.create(input)?, "Project added successfully!"),
        };

        self.focus_admin_row(&record);
        self.set_status(message, StatusKind::Info);
        self.surface_durability_warning();
        Ok(())
    }

    fn perform_delete(&mut self, confirm: &ConfirmListingDelete) {
        let removed = CatalogEditor::new(&mut self.store).delete(&confirm.id);
        let len = self.store.len();
        if let Screen::Admin(admin) = &mut self.screen {
            admin.ensure_in_bounds(len);
        }

        if removed {
            self.set_status("Project deleted successfully!", StatusKind::Info);
        } else {
            self.set_status(
                format!("{} was already removed.", confirm.title),
                StatusKind::Info,
            );
        }
        self.surface_durability_warning();
    }

    fn focus_admin_row(&mut self, record: &ListingRecord) {
        if let (Screen::Admin(admin), Some(position)) =
            (&mut self.screen, self.store.position(&record.id))
        {
            admin.selected = position;
        }
    }

    /// Open web links in the browser; site-relative paths are only shown.
    fn follow_link(&mut self, link: &str, what: &str) {
        let link = link.trim();
        if link.is_empty() {
            self.set_status(format!("This project has no {what}."), StatusKind::Error);
        } else if !(link.starts_with("http://") || link.starts_with("https://")) {
            self.set_status(format!("{what}: {link}"), StatusKind::Info);
        } else if let Err(err) = open_link(link) {
            warn!(link, error = %err, "failed to open link");
            self.set_status(format!("Failed to open link: {err}"), StatusKind::Error);
        } else {
            self.set_status(format!("Opened {link}."), StatusKind::Info);
        }
    }

    fn surface_durability_warning(&mut self) {
        if let Some(warning) = self.store.take_durability_warning() {
            self.set_status(warning, StatusKind::Warning);
        }
    }

    fn set_status<T: Into<String>>(&mut self, text: T, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let show_footer = area.height > FOOTER_HEIGHT;

        let (content_area, footer_area) = if show_footer {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, Rect::default())
        };

        match &self.screen {
            Screen::Grid(grid) => self.draw_grid(frame, content_area, grid),
            Screen::Admin(admin) => self.draw_admin(frame, content_area, admin),
        }

        if show_footer {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingListing(form) => {
                self.draw_listing_form(frame, area, "Add New Project", form)
            }
            Mode::EditingListing { form, .. } => {
                self.draw_listing_form(frame, area, "Edit Project", form)
            }
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Normal => {}
        }
    }

    fn draw_grid(&self, frame: &mut Frame, area: Rect, grid: &GridScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let heading = Paragraph::new(Line::from(Span::styled(
            grid.title(),
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Left);
        frame.render_widget(heading, chunks[0]);

        let visible = grid.visible(self.store.records());
        if visible.is_empty() {
            let message = Paragraph::new("No courses found matching your filters.")
                .alignment(Alignment::Center);
            frame.render_widget(message, chunks[1]);
            return;
        }

        let cards_area = chunks[1];
        let rows_fit = (cards_area.height / CARD_HEIGHT).max(1) as usize;
        let selected_row = grid.selected.min(visible.len() - 1) / GRID_COLUMNS;
        let first_row = selected_row.saturating_sub(rows_fit - 1);

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CARD_HEIGHT); rows_fit])
            .split(cards_area);

        for (offset, row_area) in row_areas.iter().enumerate() {
            let row_idx = first_row + offset;
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
                .split(*row_area);

            for (col_idx, card_area) in columns.iter().enumerate() {
                let index = row_idx * GRID_COLUMNS + col_idx;
                let Some(record) = visible.get(index) else {
                    continue;
                };
                let selected = index == grid.selected;
                let mut block = Block::default().borders(Borders::ALL);
                if selected {
                    block = block.style(Style::default().fg(Color::Yellow));
                }
                let lines = build_card_lines(
                    record,
                    card_area.width.saturating_sub(2),
                    card_area.height.saturating_sub(2),
                    selected,
                );
                frame.render_widget(Paragraph::new(lines).block(block), *card_area);
            }
        }
    }

    fn draw_admin(&self, frame: &mut Frame, area: Rect, admin: &AdminScreen) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Project Management");

        let records = self.store.records();
        if records.is_empty() {
            let message = Paragraph::new("No projects added yet. Press '+' to add your first project.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(["Title", "Description", "Price", "Tech", "Category"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = records.iter().map(|record| {
            let price = if record.price.is_empty() {
                "-".to_string()
            } else {
                record.price.clone()
            };
            Row::new(vec![
                Cell::from(record.title.clone()),
                Cell::from(excerpt(&record.description, CARD_EXCERPT_CHARS))
                    .style(Style::default().fg(Color::DarkGray)),
                Cell::from(price),
                Cell::from(record.tech_code().to_string()),
                Cell::from(record.project_code().to_string()),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(25),
                Constraint::Percentage(35),
                Constraint::Percentage(12),
                Constraint::Percentage(12),
                Constraint::Percentage(16),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

        let mut state = TableState::default().with_selected(Some(admin.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = match (&self.screen, &self.mode) {
            (_, Mode::AddingListing(_)) | (_, Mode::EditingListing { .. }) => &[
                ("[Tab]", " Next field   "),
                ("[←→/Space]", " Change choice   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            (_, Mode::ConfirmDelete(_)) => &[("[Y]", " Delete   "), ("[N/Esc]", " Keep")],
            (Screen::Grid(_), Mode::Normal) => &[
                ("[←↑↓→]", " Navigate   "),
                ("[t/T]", " Tech   "),
                ("[c/C]", " Category   "),
                ("[x]", " Clear filters   "),
                ("[Enter]", " Open   "),
                ("[b]", " Buy   "),
                ("[a]", " Admin   "),
                ("[q]", " Quit"),
            ],
            (Screen::Admin(_), Mode::Normal) => &[
                ("[↑↓]", " Navigate   "),
                ("[+]", " Add   "),
                ("[e]", " Edit   "),
                ("[-]", " Delete   "),
                ("[g]", " Grid   "),
                ("[q]", " Quit"),
            ],
        };

        let spans: Vec<Span<'static>> = hints
            .iter()
            .flat_map(|(key, action)| {
                [
                    Span::styled(key.to_string(), key_style),
                    Span::raw(action.to_string()),
                ]
            })
            .collect();
        Line::from(spans)
    }

    fn draw_listing_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &ListingForm) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = ListingField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);

        if let Some(cursor) = form.cursor_position(inner) {
            frame.set_cursor_position(cursor);
        }
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmListingDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Removal")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!(
                "Are you sure you want to delete \"{}\"?",
                confirm.title
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}
