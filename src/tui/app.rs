use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::api::session::RegisterError;
use crate::api::{Session, Transport};
use crate::pages::{guard, Route};

use super::login::{AuthRequest, LoginScreen};
use super::shelf::Shelf;

/// Top-level application state. The session gate is structural: protected
/// screens only exist inside the `Authenticated` arm, so an anonymous
/// session cannot reach them or trigger their fetches.
pub struct App {
    transport: Arc<dyn Transport>,
    session: Session,
    state: State,
}

enum State {
    Anonymous(LoginScreen),
    Authenticated(Shelf),
}

impl App {
    pub fn new(transport: Arc<dyn Transport>) -> App {
        App {
            transport,
            session: Session::new(),
            state: State::Anonymous(LoginScreen::default()),
        }
    }

    /// Runs whatever async work the current screen has queued up before the
    /// next draw.
    pub async fn prerender(&mut self) {
        match &mut self.state {
            State::Anonymous(login) => {
                let Some(request) = login.take_request() else {
                    return;
                };

                match request {
                    AuthRequest::Login { username, password } => {
                        match self.session.login(&*self.transport, &username, &password).await {
                            Ok(()) => match guard(&self.session, Route::SeriesList) {
                                Route::Login => {}
                                route => self.state = State::Authenticated(Shelf::new(route)),
                            },
                            Err(err) => login.set_error(err.user_message("Login failed.")),
                        }
                    }
                    AuthRequest::Register { username, password } => {
                        match self
                            .session
                            .register(&*self.transport, &username, &password)
                            .await
                        {
                            Ok(()) => login.registration_succeeded(),
                            Err(RegisterError::InvalidPassword(rules)) => {
                                login.set_violations(rules)
                            }
                            Err(RegisterError::Api(err)) => {
                                login.set_error(err.user_message("Registration failed."))
                            }
                        }
                    }
                }
            }
            State::Authenticated(shelf) => {
                if shelf.take_logout_request() {
                    let result = self.session.logout(&*self.transport).await;
                    let mut login = LoginScreen::default();
                    if let Err(err) = result {
                        login.set_error(err.user_message("Logout failed."));
                    }
                    // Back to login whether or not the server call worked.
                    self.state = State::Anonymous(login);
                } else {
                    shelf.prerender(&*self.transport).await;
                }
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        match &mut self.state {
            State::Anonymous(login) => login.render(frame),
            State::Authenticated(shelf) => shelf.render(frame),
        }
    }

    pub fn new_event(&mut self, normal_mode: &mut bool, event: KeyEvent) -> bool {
        let handled = match &mut self.state {
            State::Anonymous(login) => login.new_event(normal_mode, event),
            State::Authenticated(shelf) => shelf.new_event(event),
        };
        // The flag can go stale when a prerender pass swaps screens, so
        // re-derive it after every key.
        *normal_mode = !self.editing();
        handled
    }

    fn editing(&self) -> bool {
        match &self.state {
            State::Anonymous(login) => login.editing(),
            State::Authenticated(shelf) => shelf.editing(),
        }
    }
}
