use std::error::Error;
use std::io;
use std::path::Path;
use std::time::{Duration as StdDuration, Instant};

use chrono::{Local, Utc};
use crossterm::event::{
	self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyCode, KeyEventKind, MouseButton,
	MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table};
use ratatui::{Frame, Terminal};
use tracing::{debug, error};

use crate::app::{AppState, Notice, NoticeLevel};
use crate::config::Settings;
use crate::history::{format_currency, History, HistoryEntry};
use crate::storage::save_history;
use crate::time_selector::{TimeSelector, WheelField};
use crate::wheel::{ValueWheel, ITEM_HEIGHT};

const FOCUSED_PANEL_BORDER_COLOR: Color = Color::Yellow;
const INACTIVE_PANEL_BORDER_COLOR: Color = Color::DarkGray;
const HIGHLIGHT_BACKGROUND_COLOR: Color = Color::Rgb(42, 45, 52);
const ACCENT_COLOR: Color = Color::Rgb(139, 92, 246);
const FRAME_INTERVAL: StdDuration = StdDuration::from_millis(33);
const WHEEL_RADIUS: usize = 1;
const PAGE_ITEMS: f64 = 5.0;
const EDGE_ITEMS: f64 = 100.0;

pub fn run_dashboard(state: &mut AppState, settings: &Settings, history_path: &Path) -> Result<(), Box<dyn Error>> {
	enable_raw_mode()?;
	let mut stdout = io::stdout();
	execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
	let backend = CrosstermBackend::new(stdout);
	let mut terminal = Terminal::new(backend)?;

	let result = run_event_loop(&mut terminal, state, settings, history_path);

	disable_raw_mode()?;
	execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
	terminal.show_cursor()?;

	result
}

fn run_event_loop(
	terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
	state: &mut AppState,
	settings: &Settings,
	history_path: &Path,
) -> Result<(), Box<dyn Error>> {
	let mut dashboard = Dashboard::new(state, settings);
	let mut last_frame = Instant::now();

	loop {
		let elapsed = last_frame.elapsed();
		last_frame = Instant::now();
		dashboard.tick(state, elapsed.as_secs_f64());
		terminal.draw(|frame| draw_dashboard(frame, &mut dashboard, state))?;

		if !event::poll(FRAME_INTERVAL)? {
			continue;
		}

		match event::read()? {
			CEvent::Key(key) if key.kind == KeyEventKind::Press => {
				let should_quit = match &dashboard.mode {
					InputMode::Normal => handle_normal_key(&mut dashboard, state, key.code, history_path),
					InputMode::Confirm(_) => handle_confirm_key(&mut dashboard, state, key.code, history_path),
				};

				if should_quit {
					break;
				}
			}
			CEvent::Mouse(mouse) => handle_mouse(&mut dashboard, state, mouse),
			_ => {}
		}
	}

	Ok(())
}

fn draw_dashboard(frame: &mut Frame, dashboard: &mut Dashboard, state: &AppState) {
	let layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([
			Constraint::Length(3),
			Constraint::Length(5),
			Constraint::Length(3),
			Constraint::Length(5),
			Constraint::Min(6),
			Constraint::Length(4),
		])
		.split(frame.area());

	let pickers = Layout::default()
		.direction(Direction::Horizontal)
		.constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
		.split(layout[1]);

	render_title(frame, layout[0]);
	dashboard.wheel_areas.clear();
	let start_areas = render_time_picker(frame, pickers[0], dashboard, Picker::Start);
	let end_areas = render_time_picker(frame, pickers[1], dashboard, Picker::End);
	dashboard.wheel_areas.extend(start_areas);
	dashboard.wheel_areas.extend(end_areas);
	render_rate_input(frame, layout[2], dashboard, state);
	render_result_panel(frame, layout[3], state, &dashboard.currency_symbol);
	render_history_panel(frame, layout[4], &state.history, &dashboard.currency_symbol);
	render_footer(frame, layout[5], dashboard, state);

	if let InputMode::Confirm(select) = &dashboard.mode {
		render_select_popup(frame, select);
	}
}

fn render_title(frame: &mut Frame, area: Rect) {
	let title = Paragraph::new(Line::from(vec![
		Span::styled("WaktuMain", Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD)),
		Span::styled("  console rental calculator", Style::default().fg(Color::DarkGray)),
	]))
	.alignment(Alignment::Center)
	.block(Block::default().borders(Borders::ALL));
	frame.render_widget(title, area);
}

fn render_time_picker(
	frame: &mut Frame,
	area: Rect,
	dashboard: &Dashboard,
	picker: Picker,
) -> [(WheelTarget, Rect); 2] {
	let focused = matches!(dashboard.focus, Focus::Wheel(target) if target.picker == picker);
	let block = Block::default()
		.borders(Borders::ALL)
		.title(format!("{} ({})", picker.title(), dashboard.selector(picker).value()))
		.border_style(border_style(focused));
	let inner = block.inner(area);
	frame.render_widget(block, area);

	let columns = Layout::default()
		.direction(Direction::Horizontal)
		.constraints([
			Constraint::Percentage(45),
			Constraint::Percentage(10),
			Constraint::Percentage(45),
		])
		.split(inner);

	let selector = dashboard.selector(picker);
	let hour = WheelTarget {
		picker,
		field: WheelField::Hour,
	};
	let minute = WheelTarget {
		picker,
		field: WheelField::Minute,
	};

	render_wheel(frame, columns[0], selector.wheel(WheelField::Hour), dashboard.focus == Focus::Wheel(hour));
	let separator = Paragraph::new(vec![Line::default(), Line::from(":")])
		.alignment(Alignment::Center)
		.style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));
	frame.render_widget(separator, columns[1]);
	render_wheel(
		frame,
		columns[2],
		selector.wheel(WheelField::Minute),
		dashboard.focus == Focus::Wheel(minute),
	);

	[(hour, columns[0]), (minute, columns[2])]
}

fn render_wheel(frame: &mut Frame, area: Rect, wheel: &ValueWheel, focused: bool) {
	let rows = usize::from(area.height);
	if rows == 0 {
		return;
	}

	let middle = rows / 2;
	let center = -wheel.position() / wheel.item_height();
	let mut lines = vec![Line::default(); rows];
	let selected_color = if wheel.is_dragging() || wheel.is_settling() {
		ACCENT_COLOR
	} else {
		Color::White
	};

	for item in wheel.visible(WHEEL_RADIUS) {
		let row = middle as f64 + (item.index as f64 - center).round();
		if row < 0.0 || row >= rows as f64 {
			continue;
		}

		// Fade neighbours by distance from the selection line.
		let style = if item.distance < 0.5 {
			Style::default().fg(selected_color).add_modifier(Modifier::BOLD)
		} else if item.distance < 1.5 {
			Style::default().fg(Color::DarkGray)
		} else {
			continue;
		};
		lines[row as usize] = Line::styled(item.label.to_string(), style);
	}

	if focused {
		let selected = std::mem::take(&mut lines[middle]);
		lines[middle] = selected.patch_style(Style::default().bg(HIGHLIGHT_BACKGROUND_COLOR));
	}

	frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_rate_input(frame: &mut Frame, area: Rect, dashboard: &Dashboard, state: &AppState) {
	let focused = dashboard.focus == Focus::Rate;
	let mut spans = vec![Span::raw(state.hourly_rate.clone())];
	if focused {
		spans.push(Span::styled("_", Style::default().fg(FOCUSED_PANEL_BORDER_COLOR)));
	}

	let input = Paragraph::new(Line::from(spans)).block(
		Block::default()
			.borders(Borders::ALL)
			.title(format!("Hourly rate ({})", dashboard.currency_symbol))
			.border_style(border_style(focused)),
	);
	frame.render_widget(input, area);
}

fn render_result_panel(frame: &mut Frame, area: Rect, state: &AppState, currency_symbol: &str) {
	let lines = match &state.result {
		Some(result) => vec![
			Line::from(vec![
				Span::styled("Session        ", Style::default().fg(Color::DarkGray)),
				Span::raw(format!("{} - {}", result.start, result.end)),
				Span::styled(
					if result.end <= result.start { " (+1 day)" } else { "" },
					Style::default().fg(Color::DarkGray),
				),
			]),
			Line::from(vec![
				Span::styled("Play duration  ", Style::default().fg(Color::DarkGray)),
				Span::styled(result.duration_label(), Style::default().add_modifier(Modifier::BOLD)),
			]),
			Line::from(vec![
				Span::styled("Total cost     ", Style::default().fg(Color::DarkGray)),
				Span::styled(
					format_currency(result.total_cost, currency_symbol),
					Style::default().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD),
				),
			]),
		],
		None => vec![Line::styled(
			"Press Enter to calculate",
			Style::default().fg(Color::DarkGray),
		)],
	};

	let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Result"));
	frame.render_widget(panel, area);
}

fn render_history_panel(frame: &mut Frame, area: Rect, history: &History, currency_symbol: &str) {
	let block = Block::default()
		.borders(Borders::ALL)
		.title(format!("History ({})", history.len()));

	if history.is_empty() {
		let empty = Paragraph::new(Line::styled(
			"No calculations yet.",
			Style::default().fg(Color::DarkGray),
		))
		.alignment(Alignment::Center)
		.block(block);
		frame.render_widget(empty, area);
		return;
	}

	let rows = history
		.iter()
		.map(|entry| {
			Row::new(vec![
				Cell::from(format!("{} - {}", entry.start_time, entry.end_time)),
				Cell::from(entry_date(entry)).style(Style::default().fg(Color::DarkGray)),
				Cell::from(entry.duration.clone()),
				Cell::from(format_currency(entry.total, currency_symbol)).style(Style::default().fg(ACCENT_COLOR)),
			])
		})
		.collect::<Vec<_>>();

	let table = Table::new(
		rows,
		[
			Constraint::Length(15),
			Constraint::Length(13),
			Constraint::Length(10),
			Constraint::Min(10),
		],
	)
	.header(
		Row::new(vec!["Time", "Date", "Duration", "Total"])
			.style(Style::default().add_modifier(Modifier::BOLD)),
	)
	.block(block);
	frame.render_widget(table, area);
}

fn render_footer(frame: &mut Frame, area: Rect, dashboard: &Dashboard, state: &AppState) {
	let notice = match &state.notice {
		Some(Notice {
			level: NoticeLevel::Success,
			message,
		}) => Line::styled(message.clone(), Style::default().fg(Color::Green)),
		Some(Notice {
			level: NoticeLevel::Error,
			message,
		}) => Line::styled(message.clone(), Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
		None => Line::from("Ready"),
	};

	let hints = match &dashboard.mode {
		InputMode::Normal => {
			"Tab/arrows focus | j/k or wheel scroll | drag to spin | 0-9 . rate | Enter calculate | r reset | c clear | q quit"
		}
		InputMode::Confirm(_) => "j/k or arrows move | Enter choose | Esc cancel",
	};

	let footer = Paragraph::new(vec![notice, Line::from(hints)])
		.block(Block::default().borders(Borders::ALL).title("Shortcuts"));
	frame.render_widget(footer, area);
}

fn render_select_popup(frame: &mut Frame, select: &SelectState) {
	let area = centered_rect(50, 30, frame.area());
	frame.render_widget(Clear, area);

	let items = select
		.options
		.iter()
		.map(|option| ListItem::new(option.label.clone()))
		.collect::<Vec<_>>();

	let list = List::new(items)
		.block(Block::default().borders(Borders::ALL).title(select.title.clone()))
		.highlight_symbol(">> ")
		.highlight_style(Style::default().bg(HIGHLIGHT_BACKGROUND_COLOR));

	let mut state = ListState::default();
	if !select.options.is_empty() {
		state.select(Some(select.selected.min(select.options.len() - 1)));
	}
	frame.render_stateful_widget(list, area, &mut state);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
	let popup_layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([
			Constraint::Percentage((100 - percent_y) / 2),
			Constraint::Percentage(percent_y),
			Constraint::Percentage((100 - percent_y) / 2),
		])
		.split(area);
	Layout::default()
		.direction(Direction::Horizontal)
		.constraints([
			Constraint::Percentage((100 - percent_x) / 2),
			Constraint::Percentage(percent_x),
			Constraint::Percentage((100 - percent_x) / 2),
		])
		.split(popup_layout[1])[1]
}

fn handle_normal_key(dashboard: &mut Dashboard, state: &mut AppState, code: KeyCode, history_path: &Path) -> bool {
	match code {
		KeyCode::Char('q') | KeyCode::Esc => return true,
		KeyCode::Tab | KeyCode::Right => dashboard.focus = dashboard.focus.next(),
		KeyCode::BackTab | KeyCode::Left => dashboard.focus = dashboard.focus.prev(),
		KeyCode::Enter => submit_calculation(dashboard, state, history_path),
		KeyCode::Char('r') => dashboard.reset_times(state),
		KeyCode::Char('c') => {
			if state.history.is_empty() {
				state.notice = Some(Notice::success("History is already empty."));
			} else {
				dashboard.mode = InputMode::Confirm(build_clear_history_select(state.history.len()));
			}
		}
		_ => match dashboard.focus {
			Focus::Wheel(target) => {
				let items = match code {
					KeyCode::Up | KeyCode::Char('k') => 1.0,
					KeyCode::Down | KeyCode::Char('j') => -1.0,
					KeyCode::PageUp => PAGE_ITEMS,
					KeyCode::PageDown => -PAGE_ITEMS,
					KeyCode::Home => EDGE_ITEMS,
					KeyCode::End => -EDGE_ITEMS,
					_ => return false,
				};
				dashboard.scroll(state, target, items);
			}
			Focus::Rate => match code {
				KeyCode::Char(value) if value.is_ascii_digit() || value == '.' => state.hourly_rate.push(value),
				KeyCode::Backspace => {
					state.hourly_rate.pop();
				}
				_ => {}
			},
		},
	}

	false
}

fn handle_confirm_key(dashboard: &mut Dashboard, state: &mut AppState, code: KeyCode, history_path: &Path) -> bool {
	match code {
		KeyCode::Esc => {
			dashboard.mode = InputMode::Normal;
			state.notice = Some(Notice::success("Clear cancelled."));
		}
		KeyCode::Up | KeyCode::Char('k') => {
			if let InputMode::Confirm(select) = &mut dashboard.mode {
				select.move_selection(-1);
			}
		}
		KeyCode::Down | KeyCode::Char('j') => {
			if let InputMode::Confirm(select) = &mut dashboard.mode {
				select.move_selection(1);
			}
		}
		KeyCode::Enter => {
			let select = match std::mem::replace(&mut dashboard.mode, InputMode::Normal) {
				InputMode::Confirm(select) => select,
				InputMode::Normal => return false,
			};

			if select.selected_option().map(|option| option.action) == Some(ConfirmAction::ClearHistory) {
				state.clear_history();
				persist(state, history_path);
			} else {
				state.notice = Some(Notice::success("Clear cancelled."));
			}
		}
		_ => {}
	}

	false
}

fn handle_mouse(dashboard: &mut Dashboard, state: &mut AppState, mouse: MouseEvent) {
	match mouse.kind {
		MouseEventKind::ScrollUp => {
			if let Some(target) = dashboard.wheel_at(mouse.column, mouse.row) {
				dashboard.scroll(state, target, 1.0);
			}
		}
		MouseEventKind::ScrollDown => {
			if let Some(target) = dashboard.wheel_at(mouse.column, mouse.row) {
				dashboard.scroll(state, target, -1.0);
			}
		}
		MouseEventKind::Down(MouseButton::Left) => {
			if let Some(target) = dashboard.wheel_at(mouse.column, mouse.row) {
				dashboard.begin_drag(state, target, mouse.row);
			}
		}
		MouseEventKind::Drag(MouseButton::Left) => dashboard.drag_to(mouse.row),
		MouseEventKind::Up(MouseButton::Left) => dashboard.end_drag(state),
		_ => {}
	}
}

fn submit_calculation(dashboard: &mut Dashboard, state: &mut AppState, history_path: &Path) {
	dashboard.finish_settles(state);
	if state.calculate(Utc::now()).is_ok() {
		persist(state, history_path);
	}
}

fn persist(state: &mut AppState, history_path: &Path) {
	if let Err(err) = save_history(history_path, &state.history) {
		error!(path = %history_path.display(), error = %err, "failed to save history");
		state.notice = Some(Notice::error(format!("failed to save history: {err}")));
	}
}

fn build_clear_history_select(entries: usize) -> SelectState {
	SelectState::new(
		format!("Delete all {entries} history entries?"),
		vec![
			SelectOption::new("Cancel", ConfirmAction::Cancel),
			SelectOption::new("Clear history", ConfirmAction::ClearHistory),
		],
	)
}

fn entry_date(entry: &HistoryEntry) -> String {
	entry
		.recorded_at()
		.map(|timestamp| timestamp.with_timezone(&Local).format("%d %b %Y").to_string())
		.unwrap_or_default()
}

fn border_style(focused: bool) -> Style {
	if focused {
		Style::default()
			.fg(FOCUSED_PANEL_BORDER_COLOR)
			.add_modifier(Modifier::BOLD)
	} else {
		Style::default().fg(INACTIVE_PANEL_BORDER_COLOR)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Picker {
	Start,
	End,
}

impl Picker {
	fn title(self) -> &'static str {
		match self {
			Picker::Start => "Start time",
			Picker::End => "End time",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WheelTarget {
	picker: Picker,
	field: WheelField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
	Wheel(WheelTarget),
	Rate,
}

const FOCUS_ORDER: [Focus; 5] = [
	Focus::Wheel(WheelTarget {
		picker: Picker::Start,
		field: WheelField::Hour,
	}),
	Focus::Wheel(WheelTarget {
		picker: Picker::Start,
		field: WheelField::Minute,
	}),
	Focus::Wheel(WheelTarget {
		picker: Picker::End,
		field: WheelField::Hour,
	}),
	Focus::Wheel(WheelTarget {
		picker: Picker::End,
		field: WheelField::Minute,
	}),
	Focus::Rate,
];

impl Focus {
	fn next(self) -> Self {
		let index = FOCUS_ORDER.iter().position(|focus| *focus == self).unwrap_or(0);
		FOCUS_ORDER[(index + 1) % FOCUS_ORDER.len()]
	}

	fn prev(self) -> Self {
		let index = FOCUS_ORDER.iter().position(|focus| *focus == self).unwrap_or(0);
		FOCUS_ORDER[(index + FOCUS_ORDER.len() - 1) % FOCUS_ORDER.len()]
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmAction {
	Cancel,
	ClearHistory,
}

#[derive(Debug, Clone)]
struct SelectState {
	title: String,
	options: Vec<SelectOption>,
	selected: usize,
}

impl SelectState {
	fn new(title: impl Into<String>, options: Vec<SelectOption>) -> Self {
		Self {
			title: title.into(),
			options,
			selected: 0,
		}
	}

	fn move_selection(&mut self, delta: i32) {
		if self.options.is_empty() {
			self.selected = 0;
			return;
		}

		if delta > 0 {
			self.selected = (self.selected + delta as usize).min(self.options.len() - 1);
		} else {
			self.selected = self.selected.saturating_sub(delta.unsigned_abs() as usize);
		}
	}

	fn selected_option(&self) -> Option<&SelectOption> {
		self.options.get(self.selected)
	}
}

#[derive(Debug, Clone)]
struct SelectOption {
	label: String,
	action: ConfirmAction,
}

impl SelectOption {
	fn new(label: impl Into<String>, action: ConfirmAction) -> Self {
		Self {
			label: label.into(),
			action,
		}
	}
}

#[derive(Debug, Clone)]
enum InputMode {
	Normal,
	Confirm(SelectState),
}

#[derive(Debug, Clone, Copy)]
struct MouseDrag {
	target: WheelTarget,
	last_row: u16,
}

/// Widget state owned by the dashboard. Every settled wheel writes its new
/// `HH:MM` value back into the [`AppState`].
#[derive(Debug, Clone)]
struct Dashboard {
	start: TimeSelector,
	end: TimeSelector,
	focus: Focus,
	mode: InputMode,
	drag: Option<MouseDrag>,
	wheel_areas: Vec<(WheelTarget, Rect)>,
	currency_symbol: String,
	default_start: String,
	default_end: String,
}

impl Dashboard {
	fn new(state: &AppState, settings: &Settings) -> Self {
		let motion = settings.wheel_motion.wheel_motion();
		Self {
			start: TimeSelector::new(&state.start_time, ITEM_HEIGHT, motion),
			end: TimeSelector::new(&state.end_time, ITEM_HEIGHT, motion),
			focus: FOCUS_ORDER[0],
			mode: InputMode::Normal,
			drag: None,
			wheel_areas: Vec::new(),
			currency_symbol: settings.currency_symbol.clone(),
			default_start: settings.default_start.clone(),
			default_end: settings.default_end.clone(),
		}
	}

	fn reset_times(&mut self, state: &mut AppState) {
		self.drag = None;
		self.start.set_value(&self.default_start);
		self.end.set_value(&self.default_end);
		state.set_start_time(self.start.value());
		state.set_end_time(self.end.value());
		state.notice = Some(Notice::success("Times reset."));
	}

	fn selector(&self, picker: Picker) -> &TimeSelector {
		match picker {
			Picker::Start => &self.start,
			Picker::End => &self.end,
		}
	}

	fn selector_mut(&mut self, picker: Picker) -> &mut TimeSelector {
		match picker {
			Picker::Start => &mut self.start,
			Picker::End => &mut self.end,
		}
	}

	fn tick(&mut self, state: &mut AppState, dt: f64) {
		let start = self.start.tick(dt);
		apply_value(state, Picker::Start, start);
		let end = self.end.tick(dt);
		apply_value(state, Picker::End, end);
	}

	/// Lands any gliding wheel so the form holds what the pickers show.
	fn finish_settles(&mut self, state: &mut AppState) {
		let start = self.start.finish_settle();
		apply_value(state, Picker::Start, start);
		let end = self.end.finish_settle();
		apply_value(state, Picker::End, end);
	}

	fn scroll(&mut self, state: &mut AppState, target: WheelTarget, items: f64) {
		self.focus = Focus::Wheel(target);
		let value = self
			.selector_mut(target.picker)
			.apply_discrete_scroll(target.field, items * ITEM_HEIGHT);
		apply_value(state, target.picker, value);
	}

	fn begin_drag(&mut self, state: &mut AppState, target: WheelTarget, row: u16) {
		// A press without a matching release leaves the old wheel mid-drag.
		self.end_drag(state);
		self.focus = Focus::Wheel(target);
		self.selector_mut(target.picker).begin_drag(target.field);
		self.drag = Some(MouseDrag { target, last_row: row });
	}

	fn drag_to(&mut self, row: u16) {
		let Some(drag) = self.drag.as_mut() else {
			return;
		};

		let delta = f64::from(row) - f64::from(drag.last_row);
		drag.last_row = row;
		let target = drag.target;
		self.selector_mut(target.picker)
			.update_drag(target.field, delta * ITEM_HEIGHT);
	}

	fn end_drag(&mut self, state: &mut AppState) {
		let Some(drag) = self.drag.take() else {
			return;
		};

		let value = self.selector_mut(drag.target.picker).end_drag(drag.target.field);
		apply_value(state, drag.target.picker, value);
	}

	fn wheel_at(&self, column: u16, row: u16) -> Option<WheelTarget> {
		self.wheel_areas
			.iter()
			.find(|(_, area)| area.contains(Position::new(column, row)))
			.map(|(target, _)| *target)
	}
}

fn apply_value(state: &mut AppState, picker: Picker, value: Option<String>) {
	let Some(value) = value else {
		return;
	};

	debug!(?picker, value = %value, "time selected");
	match picker {
		Picker::Start => state.set_start_time(value),
		Picker::End => state.set_end_time(value),
	}
}

pub fn print_history(history: &History, limit: usize, currency_symbol: &str) {
	if history.is_empty() {
		println!("no calculations yet");
		return;
	}

	for entry in history.iter().take(limit) {
		println!(
			"{} | {} - {} | {} | {} | rate {}",
			entry
				.recorded_at()
				.map(|timestamp| timestamp.to_rfc3339())
				.unwrap_or_else(|| entry.timestamp.to_string()),
			entry.start_time,
			entry.end_time,
			entry.duration,
			format_currency(entry.total, currency_symbol),
			entry.hourly_rate
		);
	}
}
