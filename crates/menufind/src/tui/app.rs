//! Main application state and event loop

use super::input::LineInput;
use super::ui;
use crate::theme::{Theme, ThemeStore};
use anyhow::Result;
use crossterm::{
    cursor::SetCursorStyle,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{info, warn};
use menufind_core::{Catalog, CommittedSelection, Event as SessionEvent, LoadError, Session};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Margin, Position, Rect},
    widgets::ListState,
};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

type CatalogResult = Result<Catalog, LoadError>;

/// Toast notification state
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Catalog availability. Input is ignored until `Ready`.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading { started_at: Instant },
    Ready,
    Failed(String),
}

/// Which text field receives typing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Restaurant,
    Name,
    Ingredient,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Restaurant => Field::Name,
            Field::Name => Field::Ingredient,
            Field::Ingredient => Field::Restaurant,
        }
    }

    fn previous(self) -> Self {
        match self {
            Field::Restaurant => Field::Ingredient,
            Field::Name => Field::Restaurant,
            Field::Ingredient => Field::Name,
        }
    }
}

/// Application state
pub struct App {
    pub restaurant_input: LineInput,
    pub name_input: LineInput,
    pub ingredient_input: LineInput,
    pub focus: Field,
    /// Search state; `None` until the catalog has loaded
    pub session: Option<Session>,
    pub load_state: LoadState,
    /// Candidate list state (selection mirrors the session's active index)
    pub suggestion_state: ListState,
    /// Menu list state (selection is the item cursor)
    pub menu_state: ListState,
    /// Where the candidate list was last drawn, for mouse hit-testing
    pub suggestion_area: Rect,
    pub theme: Theme,
    pub toast: Option<Toast>,
    pub should_quit: bool,
    theme_store: ThemeStore,
    catalog_rx: Receiver<CatalogResult>,
}

impl App {
    pub fn new(data: PathBuf, theme_store: ThemeStore) -> Self {
        let (catalog_tx, catalog_rx) = mpsc::channel::<CatalogResult>();
        spawn_loader(data, catalog_tx);
        Self::with_loader(catalog_rx, theme_store)
    }

    fn with_loader(catalog_rx: Receiver<CatalogResult>, theme_store: ThemeStore) -> Self {
        Self {
            restaurant_input: LineInput::default(),
            name_input: LineInput::default(),
            ingredient_input: LineInput::default(),
            focus: Field::Restaurant,
            session: None,
            load_state: LoadState::Loading {
                started_at: Instant::now(),
            },
            suggestion_state: ListState::default(),
            menu_state: ListState::default(),
            suggestion_area: Rect::default(),
            theme: theme_store.load(),
            toast: None,
            should_quit: false,
            theme_store,
            catalog_rx,
        }
    }

    pub fn input(&self, field: Field) -> &LineInput {
        match field {
            Field::Restaurant => &self.restaurant_input,
            Field::Name => &self.name_input,
            Field::Ingredient => &self.ingredient_input,
        }
    }

    fn input_mut(&mut self, field: Field) -> &mut LineInput {
        match field {
            Field::Restaurant => &mut self.restaurant_input,
            Field::Name => &mut self.name_input,
            Field::Ingredient => &mut self.ingredient_input,
        }
    }

    /// Poll for the loaded catalog (non-blocking)
    fn poll_catalog(&mut self) {
        if !matches!(self.load_state, LoadState::Loading { .. }) {
            return;
        }

        match self.catalog_rx.try_recv() {
            Ok(Ok(catalog)) => {
                let count = catalog.len();
                info!("Catalog loaded with {count} restaurants");
                self.session = Some(Session::new(Arc::new(catalog)));
                self.load_state = LoadState::Ready;
                self.toast = Some(Toast::new(
                    format!("{count} restaurants loaded"),
                    Duration::from_secs(2),
                ));
                if self.focus == Field::Restaurant {
                    self.dispatch(SessionEvent::RestaurantFieldFocused);
                }
            }
            Ok(Err(e)) => {
                let message = format!("{:#}", anyhow::Error::new(e));
                warn!("Catalog load failed: {message}");
                self.load_state = LoadState::Failed(message);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.load_state = LoadState::Failed("Catalog loader stopped".to_string());
            }
        }
    }

    /// Forward an event to the session and bring list widgets back in line
    fn dispatch(&mut self, event: SessionEvent) -> Option<CommittedSelection> {
        let session = self.session.as_mut()?;
        let selection = session.handle(event);
        self.sync_lists();
        selection
    }

    fn sync_lists(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        self.suggestion_state.select(session.navigator().active());

        let shown = session.menu().keys().len();
        let cursor = match self.menu_state.selected() {
            _ if shown == 0 => None,
            Some(i) => Some(i.min(shown - 1)),
            None => Some(0),
        };
        self.menu_state.select(cursor);
    }

    /// Send the focused field's text to the session
    fn send_query(&mut self) {
        let text = self.input(self.focus).text().to_string();
        let event = match self.focus {
            Field::Restaurant => SessionEvent::RestaurantQueryChanged(text),
            Field::Name => SessionEvent::NameQueryChanged(text),
            Field::Ingredient => SessionEvent::IngredientQueryChanged(text),
        };
        self.dispatch(event);
    }

    fn set_focus(&mut self, field: Field) {
        self.focus = field;
        if field == Field::Restaurant {
            self.dispatch(SessionEvent::RestaurantFieldFocused);
        }
    }

    /// Mirror a committed selection into the text fields
    fn on_selected(&mut self, selection: &CommittedSelection) {
        self.restaurant_input.set(&selection.name);
        self.ingredient_input.clear();
        self.menu_state.select(None);
        self.sync_lists();
        self.focus = Field::Name;
    }

    fn commit(&mut self) {
        match self.dispatch(SessionEvent::Commit) {
            Some(selection) => self.on_selected(&selection),
            None => {
                self.toast = Some(Toast::new("No matching restaurant", Duration::from_secs(2)));
            }
        }
    }

    fn toggle_item_under_cursor(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let Some(cursor) = self.menu_state.selected() else {
            return;
        };
        if let Some(key) = session.menu().keys().get(cursor).cloned() {
            self.dispatch(SessionEvent::TogglePanel(key));
        }
    }

    fn move_cursor(&mut self, down: bool) {
        if self.focus == Field::Restaurant {
            let event = if down {
                SessionEvent::NavigateNext
            } else {
                SessionEvent::NavigatePrevious
            };
            self.dispatch(event);
            return;
        }

        let shown = self
            .session
            .as_ref()
            .map_or(0, |session| session.menu().keys().len());
        if shown == 0 {
            return;
        }
        let current = self.menu_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1).min(shown - 1)
        } else {
            current.saturating_sub(1)
        };
        self.menu_state.select(Some(next));
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.theme_store.save(self.theme);
        let name = match self.theme {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        };
        self.toast = Some(Toast::new(format!("{name} theme"), Duration::from_secs(1)));
    }

    /// Clear expired toast
    fn update_toast(&mut self) {
        if let Some(ref toast) = self.toast {
            if toast.is_expired() {
                self.toast = None;
            }
        }
    }

    /// Handle input event
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
                self.toggle_theme();
                return;
            }
            _ => {}
        }

        // Inert until the catalog is ready
        if self.session.is_none() {
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Tab, _) => self.set_focus(self.focus.next()),
            (KeyCode::BackTab, _) => self.set_focus(self.focus.previous()),
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
                self.move_cursor(false)
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::CONTROL) => {
                self.move_cursor(true)
            }
            (KeyCode::Enter, _) if self.focus == Field::Restaurant => self.commit(),
            (KeyCode::Enter, _) => self.toggle_item_under_cursor(),
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.dispatch(SessionEvent::ExpandAll);
            }
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                self.dispatch(SessionEvent::CollapseAll);
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.input_mut(self.focus).clear();
                self.send_query();
            }
            _ => {
                if self.input_mut(self.focus).handle_key(key) {
                    self.send_query();
                }
            }
        }
    }

    /// Left click on a candidate chooses it
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let rows = self.suggestion_area.inner(Margin::new(1, 1));
        if !rows.contains(Position::new(mouse.column, mouse.row)) {
            return;
        }
        let index = self.suggestion_state.offset() + usize::from(mouse.row - rows.y);
        if let Some(selection) = self.dispatch(SessionEvent::Choose(index)) {
            self.on_selected(&selection);
        }
    }
}

/// Load the catalog off the UI thread
fn spawn_loader(data: PathBuf, catalog_tx: Sender<CatalogResult>) {
    thread::spawn(move || {
        let _ = catalog_tx.send(Catalog::from_dir(data));
    });
}

/// Run the TUI application
pub fn run(data: PathBuf) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetCursorStyle::BlinkingBar
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(data, ThemeStore::open());

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        SetCursorStyle::DefaultUserShape
    )?;
    terminal.show_cursor()?;

    if let LoadState::Failed(message) = &app.load_state {
        anyhow::bail!("Failed to load catalog: {message}");
    }

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.update_toast();

        app.poll_catalog();

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(16))? {
            let event = event::read()?;
            app.handle_event(event);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;
    use menufind_core::{MenuItem, Panel, Restaurant};

    fn item(name: &str, ingredients: &[&str]) -> MenuItem {
        MenuItem {
            name: name.to_string(),
            category: None,
            description: None,
            price: None,
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_restaurants(vec![
            Restaurant {
                id: "a".into(),
                name: "Liberty Kitchen".to_string(),
                image: None,
                menu: vec![item("Pesto Pasta", &["Basil"]), item("Pizza", &["Basil", "Tomato"])],
            },
            Restaurant {
                id: "b".into(),
                name: "Ridley's BBQ".to_string(),
                image: None,
                menu: vec![item("Brisket", &["BBQ Sauce"]), item("Slaw", &["Cabbage"])],
            },
        ])
        .unwrap()
    }

    fn app_with(result: CatalogResult) -> (App, tempfile::TempDir) {
        let settings = tempfile::tempdir().unwrap();
        let (tx, rx) = mpsc::channel();
        tx.send(result).unwrap();
        let mut app = App::with_loader(rx, ThemeStore::at(settings.path().join("settings.toml")));
        app.poll_catalog();
        (app, settings)
    }

    /// App with a two-restaurant catalog already loaded
    pub(crate) fn ready_app() -> (App, tempfile::TempDir) {
        app_with(Ok(catalog()))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn session(app: &App) -> &Session {
        app.session.as_ref().unwrap()
    }

    #[test]
    fn ready_catalog_lists_everything_in_the_focused_field() {
        let (app, _settings) = ready_app();
        assert!(matches!(app.load_state, LoadState::Ready));
        assert_eq!(session(&app).suggestions().len(), 2);
    }

    #[test]
    fn input_is_ignored_while_loading() {
        let settings = tempfile::tempdir().unwrap();
        let (_tx, rx) = mpsc::channel();
        let mut app = App::with_loader(rx, ThemeStore::at(settings.path().join("settings.toml")));
        app.poll_catalog();

        type_str(&mut app, "lib");
        assert_eq!(app.restaurant_input.text(), "");
        assert!(matches!(app.load_state, LoadState::Loading { .. }));

        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn failed_load_is_reported_and_inert() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _settings) = app_with(Catalog::from_dir(dir.path()));

        match &app.load_state {
            LoadState::Failed(message) => assert!(message.contains("index.json"), "{message}"),
            other => panic!("unexpected state: {other:?}"),
        }
        type_str(&mut app, "x");
        assert!(app.session.is_none());
        assert_eq!(app.restaurant_input.text(), "");
    }

    #[test]
    fn typing_then_enter_selects_and_echoes_the_name() {
        let (mut app, _settings) = ready_app();

        type_str(&mut app, "rid");
        assert_eq!(session(&app).suggestions().len(), 1);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.restaurant_input.text(), "Ridley's BBQ");
        assert_eq!(app.focus, Field::Name);
        assert_eq!(session(&app).current_restaurant().unwrap().id.as_str(), "b");
        assert_eq!(app.menu_state.selected(), Some(0));
    }

    #[test]
    fn arrow_keys_drive_the_highlight() {
        let (mut app, _settings) = ready_app();

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.suggestion_state.selected(), Some(1));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.suggestion_state.selected(), Some(0));

        type_str(&mut app, "i");
        assert_eq!(app.suggestion_state.selected(), None);
        assert_eq!(session(&app).active_index(), -1);
    }

    #[test]
    fn toggled_panel_survives_typing_in_the_filter() {
        let (mut app, _settings) = ready_app();
        type_str(&mut app, "lib");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        let pizza = session(&app).current_restaurant().unwrap().key(1);
        assert!(session(&app).panels().is_expanded(&pizza));

        type_str(&mut app, "piz");
        let rows = session(&app).displayed_items();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].panel, Panel::Expanded);
        assert_eq!(app.menu_state.selected(), Some(0));
    }

    #[test]
    fn selection_clears_the_ingredient_field() {
        let (mut app, _settings) = ready_app();
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Field::Ingredient);
        type_str(&mut app, "basil");

        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "lib");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.ingredient_input.text(), "");
        assert_eq!(session(&app).ingredient_query(), "");
    }

    #[test]
    fn expand_and_collapse_all_shortcuts() {
        let (mut app, _settings) = ready_app();
        type_str(&mut app, "rid");
        press(&mut app, KeyCode::Enter);

        ctrl(&mut app, 'e');
        assert!(session(&app).displayed_items().iter().all(|r| r.panel.is_expanded()));
        ctrl(&mut app, 'w');
        assert!(session(&app).displayed_items().iter().all(|r| !r.panel.is_expanded()));
    }

    #[test]
    fn clicking_a_candidate_chooses_it() {
        let (mut app, _settings) = ready_app();
        app.suggestion_area = Rect::new(0, 5, 20, 10);

        app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 7,
            modifiers: KeyModifiers::NONE,
        }));

        assert_eq!(session(&app).current_restaurant().unwrap().id.as_str(), "b");
        assert_eq!(app.restaurant_input.text(), "Ridley's BBQ");
    }

    #[test]
    fn theme_toggle_is_saved() {
        let (mut app, settings) = ready_app();
        assert_eq!(app.theme, Theme::Light);

        ctrl(&mut app, 't');

        assert_eq!(app.theme, Theme::Dark);
        let store = ThemeStore::at(settings.path().join("settings.toml"));
        assert_eq!(store.load(), Theme::Dark);
    }
}
