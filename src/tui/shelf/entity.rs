use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, style::Style, widgets::ListState, Frame};

use crate::api::{Record, Transport};
use crate::forms::EntityForm;
use crate::pages::{noun_title, CreatePage, DetailPage, EditPage, ListPage, Load};

use super::{error_style, render_detail, render_form, render_list, render_message, Present};

/// The view stack of one tab. Exactly one of these is mounted at a time;
/// navigating replaces it wholesale.
pub(super) enum View<L, F: EntityForm> {
    List(L),
    Detail(DetailPage<F::Record>),
    Create(CreatePage<F>),
    Edit(EditPage<F>),
}

/// Async work queued by a key event, run on the next prerender pass.
pub(super) enum Action {
    LoadList,
    LoadDetail(u32),
    LoadEdit(u32),
    SubmitCreate,
    SubmitEdit,
    Delete,
}

/// A navigation decided by a key event, applied after the borrow on the
/// current view ends.
enum Nav {
    OpenDetail(u32),
    OpenCreate,
    OpenEdit(u32),
    BackToList,
}

/// One entity tab: list, detail, create and edit views over a single
/// record type. The series tab layers search on top of this in its own
/// type.
pub(super) struct EntityTab<F: EntityForm>
where
    F::Record: Present,
{
    view: View<ListPage<F::Record>, F>,
    pending: Option<Action>,
    list_state: ListState,
    field_index: usize,
}

impl<F: EntityForm> EntityTab<F>
where
    F::Record: Present,
{
    pub(super) fn new() -> Self {
        EntityTab {
            view: View::List(ListPage::new()),
            pending: Some(Action::LoadList),
            list_state: ListState::default(),
            field_index: 0,
        }
    }

    pub(super) fn remount(&mut self) {
        self.view = View::List(ListPage::new());
        self.pending = Some(Action::LoadList);
        self.list_state = ListState::default();
        self.field_index = 0;
    }

    pub(super) fn editing(&self) -> bool {
        matches!(self.view, View::Create(_) | View::Edit(_))
    }

    pub(super) async fn prerender(&mut self, transport: &dyn Transport) {
        let Some(action) = self.pending.take() else {
            return;
        };

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

    pub(super) fn render(&mut self, frame: &mut Frame, area: Rect) {
        let noun = <F::Record as Record>::NOUN;
        match &mut self.view {
            View::List(page) => match &page.items {
                Load::Loading => render_message(
                    frame,
                    area,
                    &format!("Loading {}...", <F::Record as Record>::COLLECTION),
                    Style::default(),
                ),
                Load::Ready(items) => {
                    let rows = items.iter().map(Present::headline).collect();
                    render_list(
                        frame,
                        area,
                        &collection_title::<F::Record>(),
                        rows,
                        &mut self.list_state,
                        "(j/k) move  (enter) open  (a) add  (1-4) tabs  (o) log out  (q) quit",
                    );
                }
                Load::NotFound => render_message(
                    frame,
                    area,
                    &format!("No {} found.", <F::Record as Record>::COLLECTION),
                    Style::default(),
                ),
                Load::Failed(message) => render_message(frame, area, message, error_style()),
            },
            View::Detail(page) => match &page.record {
                Load::Loading => render_message(
                    frame,
                    area,
                    &format!("Loading {} details...", noun),
                    Style::default(),
                ),
                Load::Ready(record) => render_detail(
                    frame,
                    area,
                    record,
                    page.confirming_delete,
                    noun,
                    page.error.as_deref(),
                ),
                Load::NotFound => render_message(
                    frame,
                    area,
                    &format!("{} not found.", noun_title::<F::Record>()),
                    Style::default(),
                ),
                Load::Failed(message) => render_message(frame, area, message, error_style()),
            },
            View::Create(page) => {
                let error = page.error.clone();
                render_form(
                    frame,
                    area,
                    &format!("New {}", noun),
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
                        &format!("Loading {} for editing...", noun),
                        Style::default(),
                    ),
                    Load::NotFound => render_message(
                        frame,
                        area,
                        &format!("{} not found for editing.", noun_title::<F::Record>()),
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
                        &format!("Edit {}", noun),
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
                let count = page.items.ready().map(Vec::len).unwrap_or(0);
                let selected = self
                    .list_state
                    .selected()
                    .and_then(|index| page.items.ready().and_then(|items| items.get(index)))
                    .map(Record::id);
                match event.code {
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
            View::Create(page) => match form_event(
                &mut page.form,
                &mut self.field_index,
                event.code,
            ) {
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
            }
            Some(Nav::OpenCreate) => {
                self.view = View::Create(CreatePage::new());
                self.field_index = 0;
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

pub(super) enum FormEvent {
    Handled,
    Submit,
    Cancel,
    Ignored,
}

/// Shared key handling for create and edit forms: typing goes into the
/// active field, up/down moves between fields.
pub(super) fn form_event<F: EntityForm>(
    form: &mut F,
    field_index: &mut usize,
    code: KeyCode,
) -> FormEvent {
    let mut fields = form.fields();
    let count = fields.len();
    match code {
        KeyCode::Char(char) => {
            if let Some((_, value)) = fields.get_mut(*field_index) {
                value.push(char);
            }
            FormEvent::Handled
        }
        KeyCode::Backspace => {
            if let Some((_, value)) = fields.get_mut(*field_index) {
                let _ = value.pop();
            }
            FormEvent::Handled
        }
        KeyCode::Down | KeyCode::Tab => {
            *field_index = (*field_index + 1) % count;
            FormEvent::Handled
        }
        KeyCode::Up | KeyCode::BackTab => {
            *field_index = match *field_index {
                0 => count - 1,
                index => index - 1,
            };
            FormEvent::Handled
        }
        KeyCode::Enter => FormEvent::Submit,
        KeyCode::Esc => FormEvent::Cancel,
        _ => FormEvent::Ignored,
    }
}

pub(super) fn select_next(state: &mut ListState, count: usize) {
    if count == 0 {
        return;
    }
    let next = match state.selected() {
        Some(index) => (index + 1) % count,
        None => 0,
    };
    state.select(Some(next));
}

pub(super) fn select_previous(state: &mut ListState, count: usize) {
    if count == 0 {
        return;
    }
    let previous = match state.selected() {
        Some(0) | None => count - 1,
        Some(index) => index - 1,
    };
    state.select(Some(previous));
}

fn collection_title<R: Record>() -> String {
    let mut chars = R::COLLECTION.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
