use anyhow::{Context, Result};
use blockpage_config::Config;
use blockpage_engine::store::JsonFileStore;
use blockpage_engine::{
    BlockRegistry, BlockType, ComposeMode, ComposedPage, ContentDraft, OrderEngine, PageComposer,
    PageId, SiteContext,
};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
    sync::Arc,
};
use tokio::runtime::Runtime;

type Composer = PageComposer<JsonFileStore, JsonFileStore>;

enum Command {
    Edit,
    Render,
}

struct App {
    runtime: Runtime,
    composer: Composer,
    engine: OrderEngine<JsonFileStore>,
    site: SiteContext,
    product_limit: u16,
    list_state: ListState,
    page: Option<ComposedPage>,
    /// Load or save failure shown until dismissed
    banner: Option<String>,
    /// Open "add block" menu and its selection
    insert_menu: Option<ListState>,
}

impl App {
    fn new(runtime: Runtime, store: Arc<JsonFileStore>, page_id: PageId, config: &Config) -> Result<Self> {
        let composer = PageComposer::new(store.clone(), store, BlockRegistry::default());
        let engine = runtime.block_on(composer.order_engine(page_id))?;

        let mut app = Self {
            runtime,
            composer,
            engine,
            site: config.site_context(),
            product_limit: config.product_limit(),
            list_state: ListState::default(),
            page: None,
            banner: None,
            insert_menu: None,
        };

        if !app.engine.is_empty() {
            app.list_state.select(Some(0));
        }
        app.refresh();
        Ok(app)
    }

    fn selected(&self) -> Option<usize> {
        self.list_state.selected().filter(|i| *i < self.engine.len())
    }

    /// Re-read the canonical page and rebuild the editor view
    fn refresh(&mut self) {
        let page_id = self.engine.page_id();
        match self
            .runtime
            .block_on(self.composer.compose(page_id, &self.site, ComposeMode::Editor))
        {
            Ok(page) => self.page = Some(page),
            Err(e) => self.report(e.into()),
        }
        if self.engine.is_empty() {
            self.list_state.select(None);
        } else if self.selected().is_none() {
            self.list_state.select(Some(self.engine.len() - 1));
        }
    }

    fn report(&mut self, error: anyhow::Error) {
        log::warn!("{error:#}");
        self.banner = Some(format!("{error:#}"));
    }

    fn next_block(&mut self) {
        if self.engine.is_empty() {
            return;
        }
        let i = match self.selected() {
            Some(i) => (i + 1) % self.engine.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous_block(&mut self) {
        if self.engine.is_empty() {
            return;
        }
        let i = match self.selected() {
            Some(0) | None => self.engine.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    fn move_selected(&mut self, down: bool) {
        let Some(index) = self.selected() else {
            return;
        };
        let target = if down {
            index + 1
        } else {
            index.saturating_sub(1)
        };
        let id = self.engine.blocks()[index].id;
        match self.runtime.block_on(self.engine.move_to(id, target)) {
            Ok(_) => {
                if let Some(position) = self.engine.position(id) {
                    self.list_state.select(Some(position));
                }
            }
            Err(e) => self.report(e.into()),
        }
        self.refresh();
    }

    fn toggle_hidden(&mut self) {
        let Some(index) = self.selected() else {
            return;
        };
        let block = &self.engine.blocks()[index];
        let (id, hidden) = (block.id, !block.hidden);
        if let Err(e) = self.runtime.block_on(self.engine.set_hidden(id, hidden)) {
            self.report(e.into());
        }
        self.refresh();
    }

    fn delete_selected(&mut self) {
        let Some(index) = self.selected() else {
            return;
        };
        let id = self.engine.blocks()[index].id;
        if let Err(e) = self.runtime.block_on(self.engine.remove(id)) {
            self.report(e.into());
        }
        self.refresh();
    }

    fn insert(&mut self, kind: BlockType) {
        let index = self.selected().map_or(0, |i| i + 1);
        let created = match self.runtime.block_on(self.engine.insert_at(index, kind.clone())) {
            Ok(change) => change.created,
            Err(e) => {
                self.report(e.into());
                None
            }
        };

        if let Some(id) = created {
            if kind == BlockType::Products
                && let Some(mut block) = self.engine.get(id).cloned()
            {
                let mut draft = ContentDraft::from_block(&block);
                draft.set_field("limit", self.product_limit.into());
                match self.runtime.block_on(self.composer.save_content(&mut draft)) {
                    Ok(content) => {
                        block.content = content;
                        self.engine.replace(block);
                    }
                    Err(e) => self.report(e.into()),
                }
            }
            if let Some(position) = self.engine.position(id) {
                self.list_state.select(Some(position));
            }
        }
        self.refresh();
    }

    fn reload(&mut self) {
        if let Err(e) = self.runtime.block_on(self.engine.reload()) {
            self.report(e.into());
        }
        self.refresh();
    }

    fn insertable(&self) -> Vec<(BlockType, String)> {
        self.composer
            .registry()
            .insertable()
            .map(|entry| (entry.kind.clone(), entry.display_name.to_string()))
            .collect()
    }

    fn preview_lines(&self) -> Vec<String> {
        let Some(index) = self.selected() else {
            return vec!["This page has no blocks. Press 'a' to add one.".to_string()];
        };
        let id = self.engine.blocks()[index].id;
        let Some(composed) = self
            .page
            .as_ref()
            .and_then(|page| page.blocks.iter().find(|b| b.id == id))
        else {
            return vec!["Block not loaded yet".to_string()];
        };

        let mut lines = vec![
            format!("{} (position {})", composed.display_name, composed.order),
            format!("hidden: {}", composed.hidden),
        ];
        if let Some(anchor) = &composed.anchor_id {
            lines.push(format!("anchor: #{anchor}"));
        }
        let invalid = composed.validity.invalid_fields();
        if !invalid.is_empty() {
            lines.push(format!("invalid fields: {}", invalid.join(", ")));
        }
        for warning in &composed.warnings {
            lines.push(format!("warning: {warning}"));
        }
        lines.push(String::new());
        match &composed.node {
            Some(node) => lines.push(blockpage_engine::render::html::to_html(node)),
            None => lines.push("(nothing to display)".to_string()),
        }
        if let Some(page) = &self.page
            && !page.duplicate_anchors.is_empty()
        {
            lines.push(String::new());
            lines.push(format!(
                "duplicate anchors on page: {}",
                page.duplicate_anchors.join(", ")
            ));
        }
        lines
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let (command, rest) = match args.get(1).map(String::as_str) {
        Some("render") => (Command::Render, &args[2..]),
        Some("edit") => (Command::Edit, &args[2..]),
        _ => (Command::Edit, &args[1..]),
    };

    let mut logger = env_logger::Builder::from_default_env();
    logger.filter_level(log::LevelFilter::Info);
    if let Command::Edit = command {
        // The terminal belongs to the editor; keep log lines off it.
        let log_path = env::temp_dir().join("blockpage.log");
        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("Failed to create log file {}", log_path.display()))?;
        logger.target(env_logger::Target::Pipe(Box::new(file)));
    }
    logger.init();

    let config_path = Config::config_path();
    let config = match (rest, Config::load()) {
        ([path], Ok(loaded)) => {
            let mut config = loaded.unwrap_or_else(|| Config::new(path));
            config.store_path = PathBuf::from(path);
            config
        }
        ([], Ok(Some(config))) => config,
        ([], Ok(None)) => {
            eprintln!("Error: No store path provided and no config file found");
            eprintln!("Usage: {} [render|edit] <page-store.json>", args[0]);
            eprintln!("Or create a config file at {}", config_path.display());
            process::exit(1);
        }
        (_, Err(e)) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
        _ => {
            eprintln!("Usage: {} [render|edit] [page-store.json]", args[0]);
            process::exit(1);
        }
    };
    log::info!("Using store {}", config.store_path.display());

    let runtime = Runtime::new()?;
    let store = Arc::new(JsonFileStore::new(&config.store_path));
    let page_id = runtime.block_on(resolve_page(&store, &config))?;

    match command {
        Command::Render => {
            let composer = PageComposer::new(store.clone(), store, BlockRegistry::default());
            let page = runtime.block_on(composer.compose(
                page_id,
                &config.site_context(),
                ComposeMode::Public,
            ))?;
            println!("{}", page.to_html());
            Ok(())
        }
        Command::Edit => run_editor(runtime, store, page_id, &config),
    }
}

/// The configured page, else the first page in the store, else a new one
async fn resolve_page(store: &JsonFileStore, config: &Config) -> Result<PageId> {
    if let Some(page_id) = config.page_id {
        return Ok(page_id);
    }
    let pages = store.pages().await?;
    if let Some(page) = pages.first() {
        return Ok(page.id);
    }
    let page = store.create_page(&config.site.name).await?;
    log::info!("Created page {} in {}", page.id, store.path().display());
    Ok(page.id)
}

fn run_editor(
    runtime: Runtime,
    store: Arc<JsonFileStore>,
    page_id: PageId,
    config: &Config,
) -> Result<()> {
    let mut app = App::new(runtime, store, page_id, config)?;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

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

        let Event::Key(key) = event::read()? else {
            continue;
        };

        if app.insert_menu.is_some() {
            handle_menu_key(app, key.code);
            continue;
        }

        let shifted = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Esc => app.banner = None,
            KeyCode::Char('J') => app.move_selected(true),
            KeyCode::Char('K') => app.move_selected(false),
            KeyCode::Down if shifted => app.move_selected(true),
            KeyCode::Up if shifted => app.move_selected(false),
            KeyCode::Down | KeyCode::Char('j') => app.next_block(),
            KeyCode::Up | KeyCode::Char('k') => app.previous_block(),
            KeyCode::Char('a') => {
                let mut menu = ListState::default();
                menu.select(Some(0));
                app.insert_menu = Some(menu);
            }
            KeyCode::Char('h') | KeyCode::Char(' ') => app.toggle_hidden(),
            KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
            KeyCode::Char('r') => app.reload(),
            _ => {}
        }
    }
}

fn handle_menu_key(app: &mut App, code: KeyCode) {
    let choices = app.insertable();
    let selected = app.insert_menu.as_ref().and_then(ListState::selected);
    let highlight = match code {
        KeyCode::Down | KeyCode::Char('j') => selected.map_or(0, |i| (i + 1) % choices.len()),
        KeyCode::Up | KeyCode::Char('k') => match selected {
            Some(0) | None => choices.len() - 1,
            Some(i) => i - 1,
        },
        KeyCode::Enter => {
            app.insert_menu = None;
            if let Some((kind, _)) = selected.and_then(|i| choices.get(i)).cloned() {
                app.insert(kind);
            }
            return;
        }
        KeyCode::Esc => {
            app.insert_menu = None;
            return;
        }
        _ => return,
    };
    if let Some(menu) = app.insert_menu.as_mut() {
        menu.select(Some(highlight));
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(if app.banner.is_some() { 3 } else { 0 }),
                Constraint::Min(0),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    if let Some(banner) = &app.banner {
        let banner = Paragraph::new(banner.as_str())
            .style(Style::default().fg(Color::White).bg(Color::Red))
            .block(Block::default().borders(Borders::ALL).title("Error (Esc to dismiss)"));
        f.render_widget(banner, rows[0]);
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)].as_ref())
        .split(rows[1]);

    let registry = app.composer.registry();
    let block_items: Vec<ListItem> = app
        .engine
        .blocks()
        .iter()
        .map(|block| {
            let label = format!(
                "{:>2}. {}",
                block.order,
                registry.display_name(&block.kind)
            );
            let style = if block.hidden {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![Span::styled(label, style)]))
        })
        .collect();

    let blocks_list = List::new(block_items)
        .block(Block::default().borders(Borders::ALL).title("Blocks"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));
    f.render_stateful_widget(blocks_list, columns[0], &mut app.list_state);

    let preview_text: Vec<Line> = app
        .preview_lines()
        .into_iter()
        .map(|line| Line::from(vec![Span::raw(line)]))
        .collect();
    let preview = Paragraph::new(preview_text)
        .block(Block::default().borders(Borders::ALL).title("Preview"))
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(preview, columns[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑↓/jk: Select | "),
        Span::raw("JK/Shift+↑↓: Move | "),
        Span::raw("a: Add | h: Hide | d: Delete | r: Reload"),
    ]));
    f.render_widget(help, rows[2]);

    if let Some(menu) = app.insert_menu.as_mut() {
        let area = columns[0];
        let items: Vec<ListItem> = app
            .composer
            .registry()
            .insertable()
            .map(|entry| ListItem::new(entry.display_name))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Add block"))
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black));
        f.render_widget(Clear, area);
        f.render_stateful_widget(list, area, menu);
    }
}
