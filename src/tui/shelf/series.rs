use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, ListState, Paragraph},
    Frame,
};

use crate::api::{Record, Transport};
use crate::forms::{EntityForm, SeriesForm};
use crate::pages::{CreatePage, DetailPage, EditPage, Load, SeriesListPage};

use super::entity::{form_event, select_next, select_previous, Action, FormEvent, View};
use super::{
    error_style, render_detail, render_form, render_list, render_message, skeleton_lines, Present,
};

/// The series tab. Same view stack as the other tabs, except the list
/// carries a debounced search box and shows skeleton rows while loading.
pub(super) struct SeriesTab {
    view: View<SeriesListPage, SeriesForm>,
    pending: Option<Action>,
    searching: bool,
    list_state: ListState,
    field_index: usize,
}

/// Navigation decided by a key event, applied once the view borrow ends.
enum Nav {
    OpenDetail(u32),
    OpenCreate,
    OpenEdit(u32),
    BackToList,
}

impl SeriesTab {
    pub(super) fn new() -> SeriesTab {
        SeriesTab {
            view: View::List(SeriesListPage::new()),
            pending: Some(Action::LoadList),
            searching: false,
            list_state: ListState::default(),
            field_index: 0,
        }
    }

    pub(super) fn remount(&mut self) {
        self.view = View::List(SeriesListPage::new());
        self.pending = Some(Action::LoadList);
        self.searching = false;
        self.list_state = ListState::default();
        self.field_index = 0;
    }

    pub(super) fn editing(&self) -> bool {
        self.searching || matches!(self.view, View::Create(_) | View::Edit(_))
    }

    pub(super) async fn prerender(&mut self, transport: &dyn Transport) {
        if let Some(action) = self.pending.take() {
            match action {
                Action::LoadList => {
                    if let View::List(page) = &mut self.view {
                        page.load(transport).await;
                    }
                }
                Action::LoadDetail(id) => {
                    if let View::Detail(page) = &mut self.view {
                        page.load(transport, Some(id)).await;
                    }
                }
                Action::LoadEdit(id) => {
                    if let View::Edit(page) = &mut self.view {
                        page.load(transport, Some(id)).await;
                    }
                }
                Action::SubmitCreate => {
                    let created = match &mut self.view {
                        View::Create(page) => page.submit(transport).await,
                        _ => false,
                    };
                    if created {
                        self.remount();
                    }
                }
                Action::SubmitEdit => {
                    let saved = match &mut self.view {
                        View::Edit(page) => page.submit(transport).await,
                        _ => false,
                    };
                    if saved {
                        self.remount();
                    }
                }
                Action::Delete => {
                    let deleted = match &mut self.view {
                        View::Detail(page) => page.confirm_delete(transport).await,
                        _ => false,
                    };
                    if deleted {
                        self.remount();
                    }
                }
            }
        }

        // Debounced search: fire once the quiet window has elapsed.
        if let View::List(page) = &mut self.view {
            if let Some(generation) = page.poll(Instant::now()) {
                page.run(transport, generation).await;
            }
        }
    }

    pub(super) fn render(&mut self, frame: &mut Frame, area: Rect) {
        match &mut self.view {
            View::List(page) => {
                let chunks =
                    Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(area);

                let mut block = Block::default().title("Search (/)").borders(Borders::ALL);
                if self.searching {
                    block = block.border_style(Style::default().fg(Color::Cyan));
                }
                let search = Paragraph::new(page.query.as_str()).block(block);
                frame.render_widget(search, chunks[0]);

                match &page.items {
                    Load::Loading => {
                        let skeleton = Paragraph::new(skeleton_lines())
                            .block(Block::default().title("Series").borders(Borders::ALL));
                        frame.render_widget(skeleton, chunks[1]);
                    }
                    Load::Ready(items) => {
                        let rows = items.iter().map(Present::headline).collect();
                        render_list(
                            frame,
                            chunks[1],
                            "Series",
                            rows,
                            &mut self.list_state,
                            "(/) search  (j/k) move  (enter) open  (a) add  (1-4) tabs  (o) log out  (q) quit",
                        );
                    }
                    Load::NotFound => {
                        render_message(frame, chunks[1], "No series found.", Style::default())
                    }
                    Load::Failed(message) => {
                        render_message(frame, chunks[1], message, error_style())
                    }
                }
            }
            View::Detail(page) => match &page.record {
                Load::Loading => render_message(
                    frame,
                    area,
                    "Loading series details...",
                    Style::default(),
                ),
                Load::Ready(record) => render_detail(
                    frame,
                    area,
                    record,
                    page.confirming_delete,
                    "series",
                    page.error.as_deref(),
                ),
                Load::NotFound => {
                    render_message(frame, area, "Series not found.", Style::default())
                }
                Load::Failed(message) => render_message(frame, area, message, error_style()),
            },
            View::Create(page) => {
                let error = page.error.clone();
                render_form(
                    frame,
                    area,
                    "New series",
                    page.form.fields(),
                    self.field_index,
                    error.as_deref(),
                );
            }
            View::Edit(page) => {
                match &page.record {
                    Load::Loading => render_message(
                        frame,
                        area,
                        "Loading series for editing...",
                        Style::default(),
                    ),
                    Load::NotFound => render_message(
                        frame,
                        area,
                        "Series not found for editing.",
                        Style::default(),
                    ),
                    Load::Failed(message) => render_message(frame, area, message, error_style()),
                    Load::Ready(_) => {}
                }
                if page.record.ready().is_some() {
                    let error = page.error.clone();
                    render_form(
                        frame,
                        area,
                        "Edit series",
                        page.form.fields(),
                        self.field_index,
                        error.as_deref(),
                    );
                }
            }
        }
    }

    pub(super) fn new_event(&mut self, event: KeyEvent) -> bool {
        let mut nav = None;
        let handled = match &mut self.view {
            View::List(page) => {
                if self.searching {
                    match event.code {
                        KeyCode::Char(char) => {
                            let mut query = page.query.clone();
                            query.push(char);
                            page.input(query, Instant::now());
                            true
                        }
                        KeyCode::Backspace => {
                            let mut query = page.query.clone();
                            let _ = query.pop();
                            page.input(query, Instant::now());
                            true
                        }
                        KeyCode::Esc | KeyCode::Enter => {
                            self.searching = false;
                            true
                        }
                        _ => false,
                    }
                } else {
                    let count = page.items.ready().map(Vec::len).unwrap_or(0);
                    let selected = self
                        .list_state
                        .selected()
                        .and_then(|index| page.items.ready().and_then(|items| items.get(index)))
                        .map(Record::id);
                    match event.code {
                        KeyCode::Char('/') => {
                            self.searching = true;
                            true
                        }
                        KeyCode::Char('j') | KeyCode::Down => {
                            select_next(&mut self.list_state, count);
                            true
                        }
                        KeyCode::Char('k') | KeyCode::Up => {
                            select_previous(&mut self.list_state, count);
                            true
                        }
                        KeyCode::Enter => {
                            if let Some(id) = selected {
                                nav = Some(Nav::OpenDetail(id));
                            }
                            true
                        }
                        KeyCode::Char('a') => {
                            nav = Some(Nav::OpenCreate);
                            true
                        }
                        _ => false,
                    }
                }
            }
            View::Detail(page) => {
                if page.confirming_delete {
                    match event.code {
                        KeyCode::Char('y') => {
                            self.pending = Some(Action::Delete);
                            true
                        }
                        KeyCode::Char('n') | KeyCode::Esc => {
                            page.cancel_delete();
                            true
                        }
                        _ => false,
                    }
                } else {
                    match event.code {
                        KeyCode::Char('e') => {
                            if let Some(id) = page.record.ready().map(Record::id) {
                                nav = Some(Nav::OpenEdit(id));
                            }
                            true
                        }
                        KeyCode::Char('d') => {
                            page.request_delete();
                            true
                        }
                        KeyCode::Esc => {
                            nav = Some(Nav::BackToList);
                            true
                        }
                        _ => false,
                    }
                }
            }
            View::Create(page) => match form_event(&mut page.form, &mut self.field_index, event.code)
            {
                FormEvent::Handled => true,
                FormEvent::Submit => {
                    self.pending = Some(Action::SubmitCreate);
                    true
                }
                FormEvent::Cancel => {
                    nav = Some(Nav::BackToList);
                    true
                }
                FormEvent::Ignored => false,
            },
            View::Edit(page) => {
                if page.record.ready().is_none() {
                    match event.code {
                        KeyCode::Esc => {
                            nav = Some(Nav::BackToList);
                            true
                        }
                        _ => false,
                    }
                } else {
                    match form_event(&mut page.form, &mut self.field_index, event.code) {
                        FormEvent::Handled => true,
                        FormEvent::Submit => {
                            self.pending = Some(Action::SubmitEdit);
                            true
                        }
                        FormEvent::Cancel => {
                            nav = Some(Nav::BackToList);
                            true
                        }
                        FormEvent::Ignored => false,
                    }
                }
            }
        };

        match nav {
            Some(Nav::OpenDetail(id)) => {
                self.view = View::Detail(DetailPage::new());
                self.pending = Some(Action::LoadDetail(id));
                self.searching = false;
            }
            Some(Nav::OpenCreate) => {
                self.view = View::Create(CreatePage::new());
                self.field_index = 0;
                self.searching = false;
            }
            Some(Nav::OpenEdit(id)) => {
                self.view = View::Edit(EditPage::new());
                self.pending = Some(Action::LoadEdit(id));
                self.field_index = 0;
            }
            Some(Nav::BackToList) => self.remount(),
            None => {}
        }

        handled
    }
}
