mod entity;
mod series;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::api::{Chapter, Collection, Series, Transport, Volume};
use crate::forms::{join_ids, ChapterForm, CollectionForm, VolumeForm};
use crate::pages::Route;

use entity::EntityTab;
use series::SeriesTab;

/// The authenticated workspace: one tab per entity kind, each navigating
/// its own List / Detail / Create / Edit stack. Tabs fetch independently
/// and hold no shared entity state.
pub struct Shelf {
    active: Tab,
    series: SeriesTab,
    volumes: EntityTab<VolumeForm>,
    chapters: EntityTab<ChapterForm>,
    collections: EntityTab<CollectionForm>,
    logout: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Series,
    Volumes,
    Chapters,
    Collections,
}

impl Shelf {
    pub fn new(route: Route) -> Shelf {
        let active = match route {
            Route::VolumeList => Tab::Volumes,
            Route::ChapterList => Tab::Chapters,
            Route::CollectionList => Tab::Collections,
            _ => Tab::Series,
        };

        Shelf {
            active,
            series: SeriesTab::new(),
            volumes: EntityTab::new(),
            chapters: EntityTab::new(),
            collections: EntityTab::new(),
            logout: false,
        }
    }

    pub fn take_logout_request(&mut self) -> bool {
        std::mem::take(&mut self.logout)
    }

    pub fn editing(&self) -> bool {
        match self.active {
            Tab::Series => self.series.editing(),
            Tab::Volumes => self.volumes.editing(),
            Tab::Chapters => self.chapters.editing(),
            Tab::Collections => self.collections.editing(),
        }
    }

    pub async fn prerender(&mut self, transport: &dyn Transport) {
        match self.active {
            Tab::Series => self.series.prerender(transport).await,
            Tab::Volumes => self.volumes.prerender(transport).await,
            Tab::Chapters => self.chapters.prerender(transport).await,
            Tab::Collections => self.collections.prerender(transport).await,
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let chunks =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(frame.area());

        let titles = vec![
            "Series (1)",
            "Volumes (2)",
            "Chapters (3)",
            "Collections (4)",
        ];
        let selected = match self.active {
            Tab::Series => 0,
            Tab::Volumes => 1,
            Tab::Chapters => 2,
            Tab::Collections => 3,
        };
        let tabs = Tabs::new(titles)
            .select(selected)
            .block(Block::default().title("tana").borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, chunks[0]);

        match self.active {
            Tab::Series => self.series.render(frame, chunks[1]),
            Tab::Volumes => self.volumes.render(frame, chunks[1]),
            Tab::Chapters => self.chapters.render(frame, chunks[1]),
            Tab::Collections => self.collections.render(frame, chunks[1]),
        }
    }

    pub fn new_event(&mut self, event: KeyEvent) -> bool {
        let handled = match self.active {
            Tab::Series => self.series.new_event(event),
            Tab::Volumes => self.volumes.new_event(event),
            Tab::Chapters => self.chapters.new_event(event),
            Tab::Collections => self.collections.new_event(event),
        };
        if handled {
            return true;
        }
        if self.editing() {
            return false;
        }

        match event.code {
            KeyCode::Char('1') => self.switch(Tab::Series),
            KeyCode::Char('2') => self.switch(Tab::Volumes),
            KeyCode::Char('3') => self.switch(Tab::Chapters),
            KeyCode::Char('4') => self.switch(Tab::Collections),
            KeyCode::Char('o') => self.logout = true,
            _ => return false,
        }

        true
    }

    /// Each visit is a fresh mount: the list re-fetches, nothing is cached
    /// across navigations.
    fn switch(&mut self, tab: Tab) {
        self.active = tab;
        match tab {
            Tab::Series => self.series.remount(),
            Tab::Volumes => self.volumes.remount(),
            Tab::Chapters => self.chapters.remount(),
            Tab::Collections => self.collections.remount(),
        }
    }
}

/// How an entity shows up on screen: a one-line list row and label/value
/// pairs for the detail panel.
pub(super) trait Present {
    fn headline(&self) -> String;
    fn details(&self) -> Vec<(&'static str, String)>;
    fn description(&self) -> Option<&str> {
        None
    }
}

fn text_row(rows: &mut Vec<(&'static str, String)>, label: &'static str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
        rows.push((label, value.to_owned()));
    }
}

impl Present for Series {
    fn headline(&self) -> String {
        format!("{} by {}", self.title, self.author)
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![("Author", self.author.clone())];
        if let Some(date) = self.publication_date {
            rows.push(("Published", date.to_string()));
        }
        text_row(&mut rows, "Publisher", &self.publisher);
        text_row(&mut rows, "ISBN", &self.isbn);
        text_row(&mut rows, "Cover Image", &self.cover_image);
        rows
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|text| !text.is_empty())
    }
}

impl Present for Volume {
    fn headline(&self) -> String {
        self.title.clone()
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut rows = Vec::new();
        text_row(&mut rows, "Author", &self.author);
        if let Some(date) = self.publication_date {
            rows.push(("Published", date.to_string()));
        }
        text_row(&mut rows, "Publisher", &self.publisher);
        text_row(&mut rows, "ISBN", &self.isbn);
        if let Some(series_id) = self.series_id {
            rows.push(("Series ID", series_id.to_string()));
        }
        if self.chapter_ids.as_ref().is_some_and(|ids| !ids.is_empty()) {
            rows.push(("Chapter IDs", join_ids(&self.chapter_ids)));
        }
        rows
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|text| !text.is_empty())
    }
}

impl Present for Chapter {
    fn headline(&self) -> String {
        self.title.clone()
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("File Path", self.file_path.clone()),
            ("File Type", self.file_type.clone()),
            ("Series ID", self.series_id.to_string()),
        ]
    }
}

impl Present for Collection {
    fn headline(&self) -> String {
        let count = self.series_ids.as_ref().map(Vec::len).unwrap_or(0);
        format!("{} ({} series)", self.name, count)
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut rows = Vec::new();
        if self.series_ids.as_ref().is_some_and(|ids| !ids.is_empty()) {
            rows.push(("Series IDs", join_ids(&self.series_ids)));
        }
        rows
    }
}

pub(super) fn render_message(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(Line::styled(text.to_owned(), style))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

pub(super) fn error_style() -> Style {
    Style::default().fg(Color::Red)
}

pub(super) fn render_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: Vec<String>,
    state: &mut ListState,
    help: &str,
) {
    let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);

    let empty = rows.is_empty();
    let items: Vec<ListItem> = rows.into_iter().map(ListItem::new).collect();
    let block = Block::default().title(title.to_owned()).borders(Borders::ALL);
    if empty {
        let paragraph = Paragraph::new(format!("No {} found.", title.to_lowercase())).block(block);
        frame.render_widget(paragraph, chunks[0]);
    } else {
        let highlight_style = Style::default().add_modifier(Modifier::BOLD);
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight_style)
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, chunks[0], state);
    }

    let footer = Paragraph::new(Line::styled(
        help.to_owned(),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(footer, chunks[1]);
}

pub(super) fn render_form(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    fields: Vec<(&'static str, &mut String)>,
    active: usize,
    error: Option<&str>,
) {
    let outer = Block::default().title(title.to_owned()).borders(Borders::ALL);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(0));
    let chunks = Layout::vertical(constraints).split(inner);

    for (index, (label, value)) in fields.iter().enumerate() {
        let mut block = Block::default().title(*label).borders(Borders::ALL);
        if index == active {
            block = block.border_style(Style::default().fg(Color::Cyan));
        }
        let field = Paragraph::new(value.as_str()).block(block);
        frame.render_widget(field, chunks[index]);
    }

    let mut lines = vec![Line::styled(
        "(up/down) field  (enter) save  (esc) cancel",
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(error) = error {
        lines.push(Line::styled(error.to_owned(), error_style()));
    }
    frame.render_widget(Paragraph::new(lines), chunks[fields.len()]);
}

pub(super) fn render_detail(
    frame: &mut Frame,
    area: Rect,
    record: &dyn Present,
    confirming_delete: bool,
    noun: &str,
    error: Option<&str>,
) {
    let mut lines = vec![Line::styled(
        record.headline(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    lines.push(Line::from(""));
    for (label, value) in record.details() {
        lines.push(Line::from(format!("{}: {}", label, value)));
    }
    if let Some(description) = record.description() {
        lines.push(Line::from(""));
        lines.push(Line::from("Description:"));
        lines.extend(description_lines(description));
    }
    lines.push(Line::from(""));
    if confirming_delete {
        lines.push(Line::styled(
            format!(
                "Permanently delete this {}? This cannot be undone. (y/n)",
                noun
            ),
            error_style(),
        ));
    } else {
        lines.push(Line::styled(
            "(e) edit  (d) delete  (esc) back",
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(error) = error {
        lines.push(Line::styled(error.to_owned(), error_style()));
    }

    let block = Block::default().borders(Borders::ALL);
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Descriptions arrive HTML-escaped with hard line breaks; decode the
/// entities and collapse runs of blank lines.
fn description_lines(raw: &str) -> Vec<Line<'static>> {
    let decoded = html_escape::decode_html_entities(raw).replace('\r', "");

    let mut lines = Vec::new();
    let mut previous_blank = false;
    for line in decoded.split('\n') {
        let line = line.trim_end();
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        previous_blank = blank;
        lines.push(Line::from(line.to_owned()));
    }

    lines
}

/// Placeholder rows shown while the series list is loading.
pub(super) fn skeleton_lines() -> Vec<Line<'static>> {
    (0..6)
        .map(|_| {
            Line::styled(
                "░░░░░░░░░░░░░░░░░░░░░░░░",
                Style::default().fg(Color::DarkGray),
            )
        })
        .collect()
}
