use std::io;
use std::sync::Arc;

use crossterm::event::KeyCode;
use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Span, Spans};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};
use ratatui::{Frame, Terminal};

use crate::analysis::{BattleAnalysis, Leader};
use crate::arena::{type_options, Arena, SelectionChange, Slot, TypeFilter};
use crate::fetch::FetchProgress;
use crate::models::{Pokemon, StatKind};
use crate::sprites::{SpriteCache, SpriteThumb};
use crate::utils::{centered_rect, stat_bar, type_colors};

const CARD_W: u16 = 22;
const CARD_H: u16 = 5;
const SPRITE_W: u16 = 18;

/// Stat value that fills a whole bar.
const STAT_SCALE: u32 = 160;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Clickable screen area recorded during the last draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Card(usize),
    Deselect(Slot),
    TypeFilter(Option<String>),
    Analyze,
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,
    Refresh,
}

pub struct App {
    pub roster: Vec<Pokemon>,
    pub visible: Vec<usize>, // indices into roster
    pub cursor: usize,       // index into visible
    pub arena: Arena,
    pub filter: TypeFilter,
    pub type_options: Vec<String>,
    pub load_state: LoadState,
    pub fetch_progress: Option<Arc<FetchProgress>>,
    pub sprites: SpriteCache,
    pub show_analysis: bool,
    pub show_help: bool,
    pub status: Option<String>,
    grid_columns: usize,
    hits: Vec<(Rect, HitTarget)>,
}

impl App {
    pub fn new(initial_pokemons: Vec<Pokemon>) -> Self {
        let mut app = Self {
            roster: Vec::new(),
            visible: Vec::new(),
            cursor: 0,
            arena: Arena::new(),
            filter: TypeFilter::default(),
            type_options: Vec::new(),
            load_state: LoadState::Ready,
            fetch_progress: None,
            sprites: SpriteCache::default(),
            show_analysis: false,
            show_help: false,
            status: None,
            grid_columns: 1,
            hits: Vec::new(),
        };
        app.set_roster(initial_pokemons);
        app
    }

    /// An app waiting for its first roster.
    pub fn loading(progress: Arc<FetchProgress>) -> Self {
        let mut app = Self::new(Vec::new());
        app.load_state = LoadState::Loading;
        app.fetch_progress = Some(progress);
        app
    }

    /// Swap in a freshly fetched roster.
    ///
    /// Slots point into the old roster, so they are emptied. The type filter
    /// survives if the new roster still has that type.
    pub fn set_roster(&mut self, roster: Vec<Pokemon>) {
        self.roster = roster;
        self.arena.clear_all();
        self.show_analysis = false;
        self.type_options = type_options(&self.roster);
        if let Some(active) = self.filter.active() {
            if !self.type_options.iter().any(|t| t == active) {
                self.filter.set(None);
            }
        }
        self.load_state = LoadState::Ready;
        self.cursor = 0;
        self.apply_filter();
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.load_state = LoadState::Failed(message.into());
        self.show_analysis = false;
    }

    pub fn apply_filter(&mut self) {
        self.visible = self.filter.visible(&self.roster);
        if self.visible.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.visible.len() {
            self.cursor = self.visible.len() - 1;
        }
    }

    pub fn set_type_filter(&mut self, ty: Option<&str>) {
        self.filter.set(ty);
        self.apply_filter();
    }

    pub fn toggle_type_filter(&mut self, ty: &str) {
        self.filter.toggle(ty);
        self.apply_filter();
    }

    fn cycle_type_filter(&mut self, forward: bool) {
        self.filter.cycle(&self.type_options, forward);
        self.apply_filter();
    }

    pub fn current(&self) -> Option<usize> {
        self.visible.get(self.cursor).copied()
    }

    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.roster.iter().position(|p| p.name == name)
    }

    /// Click the card under the cursor.
    pub fn select_current(&mut self) -> Option<SelectionChange> {
        let card = self.current()?;
        Some(self.select(card))
    }

    pub fn select(&mut self, card: usize) -> SelectionChange {
        let change = self.arena.toggle(card);
        let name = |i: usize| self.roster.get(i).map_or("?", |p| p.name.as_str());
        let message = match change {
            SelectionChange::Filled(slot) => format!("{} enters slot {}", name(card), slot.number()),
            SelectionChange::Replaced { previous } => {
                format!("{} replaces {}", name(card), name(previous))
            }
            SelectionChange::Cleared(slot) => format!("Slot {} cleared", slot.number()),
        };
        self.status = Some(message);
        if !self.arena.can_compare() {
            self.show_analysis = false;
        }
        change
    }

    pub fn deselect(&mut self, slot: Slot) {
        self.arena.clear(slot);
        self.show_analysis = false;
    }

    pub fn slot_pokemon(&self, slot: Slot) -> Option<&Pokemon> {
        self.arena.get(slot).and_then(|i| self.roster.get(i))
    }

    pub fn analysis(&self) -> Option<BattleAnalysis> {
        self.arena
            .pair(&self.roster)
            .map(|(a, b)| BattleAnalysis::new(a, b))
    }

    pub fn open_analysis(&mut self) -> bool {
        if self.arena.can_compare() {
            self.show_analysis = true;
            self.status = None;
        } else {
            self.status = Some("Select two Pokémon to view the battle analysis".to_string());
        }
        self.show_analysis
    }

    /// Image URLs of the Pokémon currently in the arena.
    pub fn slot_images(&self) -> Vec<String> {
        [Slot::First, Slot::Second]
            .iter()
            .filter_map(|&s| self.slot_pokemon(s))
            .filter(|p| !p.image.is_empty())
            .map(|p| p.image.clone())
            .collect()
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, last) as usize;
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Command {
        if self.show_help {
            match key {
                KeyCode::Char('q') => return Command::Quit,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::F(1) => {
                    self.show_help = false;
                }
                _ => {}
            }
            return Command::None;
        }
        if self.show_analysis {
            match key {
                KeyCode::Char('q') => return Command::Quit,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('b') => self.show_analysis = false,
                _ => {}
            }
            return Command::None;
        }

        self.status = None;
        let columns = self.grid_columns.max(1) as isize;
        match key {
            KeyCode::Char('q') => return Command::Quit,
            KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::F(1) => self.show_help = true,
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-columns),
            KeyCode::Down => self.move_cursor(columns),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.select_current();
            }
            KeyCode::Char('1') => self.deselect(Slot::First),
            KeyCode::Char('2') => self.deselect(Slot::Second),
            KeyCode::Char('t') => self.cycle_type_filter(true),
            KeyCode::Char('T') => self.cycle_type_filter(false),
            KeyCode::Char('a') => self.set_type_filter(None),
            KeyCode::Char('b') => {
                self.open_analysis();
            }
            KeyCode::Char('r') => {
                if self.load_state != LoadState::Loading {
                    self.load_state = LoadState::Loading;
                    return Command::Refresh;
                }
            }
            _ => {}
        }
        Command::None
    }

    /// Left click at terminal cell (`column`, `row`).
    pub fn handle_click(&mut self, column: u16, row: u16) {
        if self.show_help || self.show_analysis {
            self.show_help = false;
            self.show_analysis = false;
            return;
        }
        let target = self
            .hits
            .iter()
            .rev()
            .find(|(rect, _)| contains(*rect, column, row))
            .map(|(_, target)| target.clone());
        self.status = None;
        match target {
            Some(HitTarget::Card(idx)) => {
                if let Some(pos) = self.visible.iter().position(|&v| v == idx) {
                    self.cursor = pos;
                }
                self.select(idx);
            }
            Some(HitTarget::Deselect(slot)) => self.deselect(slot),
            Some(HitTarget::TypeFilter(None)) => self.set_type_filter(None),
            Some(HitTarget::TypeFilter(Some(ty))) => self.toggle_type_filter(&ty),
            Some(HitTarget::Analyze) => {
                self.open_analysis();
            }
            None => {}
        }
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

pub fn draw_ui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    terminal.draw(|f| render(f, app)).map(|_| ())
}

fn render<B: Backend>(f: &mut Frame<B>, app: &mut App) {
    app.hits.clear();
    let size = f.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(size);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[1]);

    draw_type_bar(f, app, rows[0]);
    draw_grid(f, app, body[0]);
    draw_arena(f, app, body[1]);
    draw_footer(f, app, rows[2]);

    if app.show_analysis {
        if let Some(analysis) = app.analysis() {
            draw_analysis(f, &analysis, centered_rect(70, 70, size));
        }
    }
    if app.show_help {
        draw_help(f, centered_rect(60, 60, size));
    }
}

fn type_badge(ty: &str) -> Span<'static> {
    let (bg, fg) = type_colors(ty);
    Span::styled(format!(" {} ", ty), Style::default().fg(fg).bg(bg))
}

fn type_badges(types: &[String]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, t) in types.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(type_badge(t));
    }
    spans
}

fn draw_type_bar<B: Backend>(f: &mut Frame<B>, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Types");
    let inner = block.inner(area);
    let all_style = if app.filter.active().is_none() {
        Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default()
    };

    let mut buttons = vec![(
        Span::styled(" All ", all_style),
        HitTarget::TypeFilter(None),
    )];
    for ty in &app.type_options {
        let badge = if app.filter.is_active(ty) {
            let (bg, fg) = type_colors(ty);
            Span::styled(
                format!("[{}]", ty),
                Style::default()
                    .fg(fg)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
        } else {
            type_badge(ty)
        };
        buttons.push((badge, HitTarget::TypeFilter(Some(ty.clone()))));
    }

    let right = inner.x.saturating_add(inner.width);
    let mut x = inner.x;
    let mut spans = Vec::new();
    for (i, (badge, target)) in buttons.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
            x = x.saturating_add(1);
        }
        let width = badge.width() as u16;
        if x < right && inner.height > 0 {
            let w = width.min(right - x);
            app.hits.push((Rect::new(x, inner.y, w, 1), target));
        }
        x = x.saturating_add(width);
        spans.push(badge);
    }

    f.render_widget(Paragraph::new(Spans::from(spans)).block(block), area);
}

fn draw_grid<B: Backend>(f: &mut Frame<B>, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Pokémon");
    let inner = block.inner(area);
    f.render_widget(block, area);

    match &app.load_state {
        LoadState::Loading => {
            let (ratio, label) = match &app.fetch_progress {
                Some(p) if p.in_progress() => {
                    (p.ratio(), format!("{}/{}", p.settled(), p.total()))
                }
                Some(p) => (p.ratio(), String::new()),
                None => (0.0, String::new()),
            };
            let gauge_area = Rect::new(inner.x, inner.y, inner.width, inner.height.min(3));
            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL).title("Loading Pokémon"))
                .gauge_style(Style::default().fg(Color::Green))
                .ratio(ratio)
                .label(label);
            f.render_widget(gauge, gauge_area);
            return;
        }
        LoadState::Failed(message) => {
            let text = vec![
                Spans::from(Span::styled(
                    message.clone(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Spans::from(""),
                Spans::from("Press 'r' to try again."),
            ];
            let para = Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            f.render_widget(para, inner);
            return;
        }
        LoadState::Ready => {}
    }

    if app.visible.is_empty() {
        f.render_widget(Paragraph::new("No Pokémon match the filter"), inner);
        return;
    }

    let columns = (inner.width / CARD_W).max(1) as usize;
    let rows_fit = (inner.height / CARD_H).max(1) as usize;
    app.grid_columns = columns;

    // scroll so the cursor row stays on screen
    let cursor_row = app.cursor / columns;
    let first_row = (cursor_row + 1).saturating_sub(rows_fit);
    let start = first_row * columns;
    let end = (start + rows_fit * columns).min(app.visible.len());

    let page: Vec<usize> = app.visible[start..end].to_vec();
    for (offset, roster_idx) in page.into_iter().enumerate() {
        let col = (offset % columns) as u16;
        let row = (offset / columns) as u16;
        let rect = Rect::new(
            inner.x + col * CARD_W,
            inner.y + row * CARD_H,
            CARD_W.min(inner.width),
            CARD_H.min(inner.height),
        );
        let focused = start + offset == app.cursor;
        draw_card(f, app, roster_idx, focused, rect);
        app.hits.push((rect, HitTarget::Card(roster_idx)));
    }
}

fn draw_card<B: Backend>(f: &mut Frame<B>, app: &App, idx: usize, focused: bool, area: Rect) {
    let Some(p) = app.roster.get(idx) else {
        return;
    };
    let slot = app.arena.slot_of(idx);
    let border = match (focused, slot) {
        (true, _) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        (false, Some(_)) => Style::default().fg(Color::Green),
        (false, None) => Style::default(),
    };

    let number = p.id.map_or_else(|| "#???".to_string(), |id| format!("#{:03}", id));
    let marker = match slot {
        Some(Slot::First) => " [1]",
        Some(Slot::Second) => " [2]",
        None => "",
    };
    let lines = vec![
        Spans::from(vec![
            Span::styled(number, Style::default().fg(Color::DarkGray)),
            Span::styled(marker, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        ]),
        Spans::from(type_badges(&p.types)),
        Spans::from(format!("Total {}", p.stats.total())),
    ];
    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(
                p.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(card, area);
}

fn draw_arena<B: Backend>(f: &mut Frame<B>, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            "Battle Arena",
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(inner);
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(parts[0]);

    for (slot, rect) in [(Slot::First, slots[0]), (Slot::Second, slots[1])] {
        draw_slot(f, app, slot, rect);
        if app.arena.get(slot).is_some() {
            app.hits.push((rect, HitTarget::Deselect(slot)));
        }
    }
    app.hits.push((parts[1], HitTarget::Analyze));

    let action = if app.arena.can_compare() {
        Paragraph::new(Spans::from(Span::styled(
            "[b] View Battle Analysis",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )))
    } else {
        Paragraph::new(Spans::from(vec![
            Span::styled(
                "[b] View Battle Analysis",
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(" (disabled)", Style::default().fg(Color::DarkGray)),
        ]))
    };
    f.render_widget(
        action
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        parts[1],
    );
}

fn draw_slot<B: Backend>(f: &mut Frame<B>, app: &App, slot: Slot, area: Rect) {
    let key = slot.number();
    let Some(p) = app.slot_pokemon(slot) else {
        let placeholder = Paragraph::new(vec![
            Spans::from(""),
            Spans::from(Span::styled(
                slot.placeholder(),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(placeholder, area);
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(Span::styled(
            p.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SPRITE_W), Constraint::Min(10)])
        .split(inner);

    let sprite = app.sprites.get(&p.image);
    f.render_widget(sprite_paragraph(sprite.as_ref(), cols[0]), cols[0]);

    let mut lines = vec![Spans::from(type_badges(&p.types))];
    let bar_w = (cols[1].width as usize).saturating_sub(10);
    for kind in StatKind::ALL {
        let value = p.stats.get(kind);
        lines.push(Spans::from(format!(
            "{:<4}{:>4} {}",
            kind.label(),
            value,
            stat_bar(value, STAT_SCALE, bar_w)
        )));
    }
    lines.push(Spans::from(Span::styled(
        format!("[{}] Deselect", key),
        Style::default().fg(Color::Red),
    )));
    f.render_widget(Paragraph::new(lines), cols[1]);
}

/// Two pixel rows per terminal cell using the upper half block.
fn sprite_paragraph(sprite: Option<&SpriteThumb>, area: Rect) -> Paragraph<'static> {
    let Some(thumb) = sprite else {
        return Paragraph::new("(no sprite)").alignment(Alignment::Center);
    };
    let w = area.width.min(SPRITE_W) as u32;
    let h = area.height as u32;
    let side = w.min(h * 2);
    let pixels = thumb.rows(side, side);

    let lines: Vec<Spans> = pixels
        .chunks(2)
        .map(|pair| {
            let top = &pair[0];
            let bottom = pair.get(1);
            let spans: Vec<Span> = top
                .iter()
                .enumerate()
                .map(|(x, upper)| {
                    let lower = bottom.and_then(|row| row.get(x).copied().flatten());
                    let mut style = Style::default();
                    if let Some((r, g, b)) = upper {
                        style = style.fg(Color::Rgb(*r, *g, *b));
                    }
                    if let Some((r, g, b)) = lower {
                        style = style.bg(Color::Rgb(r, g, b));
                    }
                    match (upper, lower) {
                        (None, None) => Span::raw(" "),
                        (None, Some(_)) => Span::styled(" ", style),
                        _ => Span::styled("▀", style),
                    }
                })
                .collect();
            Spans::from(spans)
        })
        .collect();
    Paragraph::new(lines)
}

fn draw_footer<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let text = match &app.status {
        Some(status) => Span::styled(status.clone(), Style::default().fg(Color::Yellow)),
        None => Span::styled(
            "arrows move  enter select  1/2 deselect  t/T type  a all  b analysis  r refresh  ? help  q quit",
            Style::default().fg(Color::DarkGray),
        ),
    };
    f.render_widget(Paragraph::new(Spans::from(text)), area);
}

fn leader_style(leader: Leader, side: Leader) -> Style {
    if leader == side {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn draw_analysis<B: Backend>(f: &mut Frame<B>, analysis: &BattleAnalysis, area: Rect) {
    let bar_w = (area.width as usize).saturating_sub(24) / 2;
    let mut lines: Vec<Spans> = Vec::new();
    lines.push(Spans::from(vec![
        Span::styled(
            analysis.left_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  vs  "),
        Span::styled(
            analysis.right_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Spans::from(""));

    for row in &analysis.rows {
        let left_bar = stat_bar(row.left, STAT_SCALE, bar_w);
        let right_bar = stat_bar(row.right, STAT_SCALE, bar_w);
        lines.push(Spans::from(vec![
            Span::raw(format!("{:<4}", row.kind.label())),
            Span::styled(
                format!("{:>4} {:>width$}", row.left, left_bar, width = bar_w),
                leader_style(row.leader, Leader::Left),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("{:<width$} {:<4}", right_bar, row.right, width = bar_w),
                leader_style(row.leader, Leader::Right),
            ),
            Span::styled(
                format!(" {:+}", row.diff()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    let (left_wins, right_wins) = analysis.stat_wins();
    lines.push(Spans::from(""));
    lines.push(Spans::from(format!(
        "Total  {} vs {}   (stats won {} - {})",
        analysis.left_total, analysis.right_total, left_wins, right_wins
    )));
    lines.push(Spans::from(Span::styled(
        analysis.verdict(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Spans::from(analysis.speed_note()));
    lines.push(Spans::from(""));
    lines.push(Spans::from(Span::styled(
        "Esc to close",
        Style::default().fg(Color::DarkGray),
    )));

    let para = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Battle Analysis"))
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, area);
    f.render_widget(para, area);
}

fn draw_help<B: Backend>(f: &mut Frame<B>, area: Rect) {
    let help_lines = vec![
        Spans::from(Span::styled(
            "Keybindings",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Spans::from(""),
        Spans::from("q          Quit"),
        Spans::from("Arrows     Move around the grid"),
        Spans::from("Enter/Spc  Select or deselect the card"),
        Spans::from("1 / 2      Deselect arena slot"),
        Spans::from("t / T      Next / previous type filter"),
        Spans::from("a          Show all types"),
        Spans::from("b          View battle analysis"),
        Spans::from("r          Refetch the roster"),
        Spans::from("?          Toggle this help"),
    ];
    let help = Paragraph::new(help_lines)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(help, area);
}
