use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::api::session::{password_rules, PasswordRule};

/// What the user asked the session to do; the app runs it on the next
/// prerender pass.
pub enum AuthRequest {
    Login { username: String, password: String },
    Register { username: String, password: String },
}

#[derive(Default)]
pub struct LoginScreen {
    mode: Mode,
    username: String,
    password: String,
    state: EditState,
    request: Option<AuthRequest>,
    violations: Vec<PasswordRule>,
    error: Option<String>,
    notice: Option<String>,
}

#[derive(Clone, Copy, Default, PartialEq)]
enum Mode {
    #[default]
    Login,
    Register,
}

#[derive(Clone, Copy, Default)]
enum EditState {
    #[default]
    Normal,
    Username,
    Password,
}

impl LoginScreen {
    pub fn take_request(&mut self) -> Option<AuthRequest> {
        self.request.take()
    }

    pub fn editing(&self) -> bool {
        !matches!(self.state, EditState::Normal)
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn set_violations(&mut self, violations: Vec<PasswordRule>) {
        self.violations = violations;
    }

    pub fn registration_succeeded(&mut self) {
        self.mode = Mode::Login;
        self.password.clear();
        self.violations.clear();
        self.error = None;
        self.notice = Some("Registration successful! You can now log in.".to_owned());
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .margin(1)
        .split(frame.area());

        let heading = match self.mode {
            Mode::Login => "Log in",
            Mode::Register => "Register",
        };
        let help = "(u) username  (p) password  (r) switch mode  (enter) submit  (q) quit";
        let title = Paragraph::new(vec![
            Line::from(heading),
            Line::styled(help, Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(title, chunks[0]);

        let block = Block::default().title("Username (U)").borders(Borders::ALL);
        let text_field = Paragraph::new(self.username.clone()).block(block);
        frame.render_widget(text_field, chunks[1]);

        let masked = "*".repeat(self.password.chars().count());
        let block = Block::default().title("Password (P)").borders(Borders::ALL);
        let text_field = Paragraph::new(masked).block(block);
        frame.render_widget(text_field, chunks[2]);

        let mut messages: Vec<Line> = Vec::new();
        let red = Style::default().fg(Color::Red);
        for violation in &self.violations {
            messages.push(Line::styled(format!("- {}", violation), red));
        }
        if let Some(error) = &self.error {
            messages.push(Line::styled(error.clone(), red));
        }
        if let Some(notice) = &self.notice {
            messages.push(Line::styled(
                notice.clone(),
                Style::default().fg(Color::Green),
            ));
        }
        frame.render_widget(Paragraph::new(messages), chunks[3]);
    }

    pub fn new_event(&mut self, normal_mode: &mut bool, event: KeyEvent) -> bool {
        match (event.code, self.state) {
            (KeyCode::Char(char), EditState::Username) => self.username.push(char),
            (KeyCode::Char(char), EditState::Password) => {
                self.password.push(char);
                self.refresh_violations();
            }
            (KeyCode::Char('u'), EditState::Normal) => {
                self.state = EditState::Username;
                *normal_mode = false;
            }
            (KeyCode::Char('p'), EditState::Normal) => {
                self.state = EditState::Password;
                *normal_mode = false;
            }
            (KeyCode::Char('r'), EditState::Normal) => {
                self.mode = match self.mode {
                    Mode::Login => Mode::Register,
                    Mode::Register => Mode::Login,
                };
                self.refresh_violations();
                self.error = None;
                self.notice = None;
            }
            (KeyCode::Backspace, EditState::Username) => {
                let _ = self.username.pop();
            }
            (KeyCode::Backspace, EditState::Password) => {
                let _ = self.password.pop();
                self.refresh_violations();
            }
            (KeyCode::Esc | KeyCode::Enter, EditState::Username | EditState::Password) => {
                self.state = EditState::Normal;
                *normal_mode = true;
            }
            (KeyCode::Enter, EditState::Normal) => self.submit(),
            _ => return false,
        };

        true
    }

    /// Live rule list, only once the user has started typing a password.
    fn refresh_violations(&mut self) {
        self.violations = match self.mode {
            Mode::Register if !self.password.is_empty() => password_rules(&self.password),
            _ => Vec::new(),
        };
    }

    fn submit(&mut self) {
        self.error = None;
        self.notice = None;

        let request = match self.mode {
            Mode::Login => AuthRequest::Login {
                username: self.username.clone(),
                password: self.password.clone(),
            },
            Mode::Register => {
                let violations = password_rules(&self.password);
                if !violations.is_empty() {
                    self.violations = violations;
                    self.error = Some("Please fix the errors before submitting.".to_owned());
                    return;
                }

                AuthRequest::Register {
                    username: self.username.clone(),
                    password: self.password.clone(),
                }
            }
        };

        self.request = Some(request);
    }
}
