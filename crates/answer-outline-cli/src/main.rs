use answer_outline_config::{Config, RenderSettings};
use answer_outline_engine::{
    AnswerFile, EditableField, LineRole, PendingCaret, RenderPlan, TextArea, begin_line_break, io,
    parse, render,
};
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Edit,
}

struct App {
    answers_path: PathBuf,
    settings: RenderSettings,
    files: Vec<AnswerFile>,
    file_list_state: ListState,
    /// Text of the selected answer, including in-memory edits
    answer_text: String,
    plan: RenderPlan,
    editor: TextArea,
    /// Caret owed to the editor after a line break, placed once drawn
    pending_caret: Option<PendingCaret>,
    mode: Mode,
    status: String,
}

impl App {
    fn new(answers_path: PathBuf, settings: RenderSettings) -> Result<Self> {
        let files = io::scan_answer_files(&answers_path)?;

        let mut app = Self {
            answers_path,
            settings,
            files,
            file_list_state: ListState::default(),
            answer_text: String::new(),
            plan: RenderPlan::default(),
            editor: TextArea::default(),
            pending_caret: None,
            mode: Mode::Browse,
            status: String::new(),
        };

        if !app.files.is_empty() {
            app.file_list_state.select(Some(0));
            app.load_selected();
        }

        Ok(app)
    }

    fn next_file(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(i) => (i + 1) % self.files.len(),
            None => 0,
        };
        self.file_list_state.select(Some(i));
        self.load_selected();
    }

    fn previous_file(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(0) | None => self.files.len() - 1,
            Some(i) => i - 1,
        };
        self.file_list_state.select(Some(i));
        self.load_selected();
    }

    fn selected_file(&self) -> Option<&AnswerFile> {
        self.file_list_state
            .selected()
            .and_then(|index| self.files.get(index))
    }

    fn load_selected(&mut self) {
        let Some(file) = self.selected_file() else {
            return;
        };
        match io::read_answer(file.relative_path(), &self.answers_path) {
            Ok(text) => {
                self.set_answer(text);
                self.status.clear();
            }
            Err(e) => {
                log::warn!("failed to read answer: {e}");
                self.answer_text.clear();
                self.plan = RenderPlan::default();
                self.status = format!("Error reading answer: {e}");
            }
        }
    }

    fn set_answer(&mut self, text: String) {
        self.plan = render(&parse(&text));
        self.answer_text = text;
    }

    fn start_editing(&mut self) {
        if self.selected_file().is_none() {
            return;
        }
        self.editor = TextArea::new(&self.answer_text);
        self.mode = Mode::Edit;
        self.status = "Editing: Enter continues numbered lists, Esc finishes".to_string();
    }

    fn finish_editing(&mut self) {
        self.pending_caret = None;
        let text = self.editor.value();
        self.set_answer(text);
        self.mode = Mode::Browse;
        self.status = "Edits are kept in memory only".to_string();
    }

    /// Returns false when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.mode {
            Mode::Browse => match code {
                KeyCode::Char('q') => return false,
                KeyCode::Down | KeyCode::Char('j') => self.next_file(),
                KeyCode::Up | KeyCode::Char('k') => self.previous_file(),
                KeyCode::Char('e') | KeyCode::Enter => self.start_editing(),
                _ => {}
            },
            Mode::Edit => self.handle_edit_key(code),
        }
        true
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                let (edit, pending) = begin_line_break(&mut self.editor);
                log::debug!("line break inserted {:?}", edit.insertion);
                self.pending_caret = Some(pending);
            }
            KeyCode::Char(c) => self.editor.insert_char(c),
            KeyCode::Backspace => self.editor.backspace(),
            KeyCode::Left => self.editor.move_left(),
            KeyCode::Right => self.editor.move_right(),
            KeyCode::Home => self.editor.move_line_start(),
            KeyCode::End => self.editor.move_line_end(),
            KeyCode::Esc => self.finish_editing(),
            _ => {}
        }
    }

    /// Second phase of a line break. Must run after the frame showing the
    /// new text has been drawn. Returns true if a caret was placed.
    fn commit_pending_caret(&mut self) -> bool {
        let Some(pending) = self.pending_caret.take() else {
            return false;
        };
        if let Err(e) = pending.commit(&mut self.editor) {
            self.status = e.to_string();
        }
        true
    }
}

/// Converts a render plan into styled terminal lines.
fn plan_lines(plan: &RenderPlan, settings: &RenderSettings) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for rendered in &plan.lines {
        let Some(text) = &rendered.text else {
            lines.push(Line::default());
            continue;
        };
        let indent = " ".repeat(rendered.indent.columns(settings));
        let style = match rendered.role {
            LineRole::Preamble => Style::default().add_modifier(Modifier::BOLD),
            LineRole::Subpoint => Style::default().fg(Color::Gray),
            LineRole::Point => Style::default().fg(Color::Cyan),
            LineRole::Unstructured | LineRole::Plain | LineRole::Spacing => Style::default(),
        };
        // Unstructured blocks can span several source lines
        for part in text.split('\n') {
            let part = part.strip_suffix('\r').unwrap_or(part);
            lines.push(Line::from(Span::styled(format!("{indent}{part}"), style)));
        }
    }
    lines
}

fn main() -> Result<()> {
    // Logs share the terminal with the UI, so only warnings by default
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    let settings = config.as_ref().map(|c| c.render).unwrap_or_default();

    let (answers_path, from_config) = match (args.len(), config) {
        (2, _) => (PathBuf::from(&args[1]), false),
        (1, Some(config)) => (config.answers_path, true),
        (1, None) => {
            eprintln!("Error: No answers path provided and no config file found");
            eprintln!("Usage: {} <answers-folder-path>", args[0]);
            eprintln!("Or create a config file at {}", config_path.display());
            process::exit(1);
        }
        _ => {
            eprintln!("Usage: {} [answers-folder-path]", args[0]);
            process::exit(1);
        }
    };

    if let Err(e) = io::validate_answer_dir(&answers_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Answers path '{}'{} is invalid: {e}",
            answers_path.display(),
            source
        );
        process::exit(1);
    }
    log::info!("opening answer bank at {}", answers_path.display());

    let mut app = App::new(answers_path, settings)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        // The new text is on screen now; place the caret and redraw
        if app.commit_pending_caret() {
            continue;
        }

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !app.handle_key(key.code)
        {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(rows[0]);

    // Question list panel
    let items: Vec<ListItem> = app
        .files
        .iter()
        .map(|file| ListItem::new(Line::from(Span::raw(file.question().to_string()))))
        .collect();

    let questions = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Questions"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(questions, chunks[0], &mut app.file_list_state);

    match app.mode {
        Mode::Browse => {
            let content = if app.files.is_empty() {
                vec![Line::from("No answers found")]
            } else {
                plan_lines(&app.plan, &app.settings)
            };
            let outline = Paragraph::new(content)
                .block(Block::default().borders(Borders::ALL).title("Answer"));
            f.render_widget(outline, chunks[1]);
        }
        Mode::Edit => {
            let title = match app.selected_file() {
                Some(file) => format!("Editing: {}", file.question()),
                None => "Editing".to_string(),
            };
            let editor = Paragraph::new(app.editor.value())
                .block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(editor, chunks[1]);
            f.set_cursor_position(editor_cursor(chunks[1], app.editor.caret_line_col()));
        }
    }

    let help = match app.mode {
        Mode::Browse => "q: Quit | ↑/k: Previous | ↓/j: Next | e/Enter: Edit",
        Mode::Edit => "Enter: Line break | Backspace: Delete | ←/→/Home/End: Move | Esc: Done",
    };
    let footer = Paragraph::new(vec![
        Line::from(Span::raw(help)),
        Line::from(Span::styled(
            app.status.clone(),
            Style::default().fg(Color::Yellow),
        )),
    ]);
    f.render_widget(footer, rows[1]);
}

/// Screen position of the caret inside the bordered editor pane.
fn editor_cursor(area: Rect, (line, col): (usize, usize)) -> (u16, u16) {
    let inner_right = area.right().saturating_sub(2);
    let inner_bottom = area.bottom().saturating_sub(2);
    let x = area
        .x
        .saturating_add(1)
        .saturating_add(u16::try_from(col).unwrap_or(u16::MAX))
        .min(inner_right);
    let y = area
        .y
        .saturating_add(1)
        .saturating_add(u16::try_from(line).unwrap_or(u16::MAX))
        .min(inner_bottom);
    (x, y)
}
