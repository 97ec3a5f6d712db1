//! Application state (Model in TEA pattern)

use std::time::Duration;

use dwnldr_core::{
    clamp_fallback_port, item_id_at, render_commands, AccessLogEntry, CommandSpec, DerivedInputs,
    FileServerStatus, OsTab, RenderedGroup, ServingPolicy, TemplateVars,
};

use crate::config::{Preferences, Settings};

/// Current UI mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Panels with keyboard shortcuts
    #[default]
    Normal,

    /// Manual IP editor modal is open
    EditIp,
}

/// Focusable panel or input, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Files,
    Filename,
    FallbackPort,
    ListenerPort,
    Commands,
    Logs,
}

impl Focus {
    pub const ALL: [Focus; 6] = [
        Focus::Files,
        Focus::Filename,
        Focus::FallbackPort,
        Focus::ListenerPort,
        Focus::Commands,
        Focus::Logs,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Whether printable keys go into a text field
    pub fn is_text_input(self) -> bool {
        matches!(
            self,
            Focus::Filename | Focus::FallbackPort | Focus::ListenerPort
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text fields
// ─────────────────────────────────────────────────────────────────────────────

/// Single-line text input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    digits_only: bool,
    max_len: Option<usize>,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input that accepts at most `max_len` ASCII digits
    pub fn numeric(max_len: usize) -> Self {
        Self {
            value: String::new(),
            digits_only: true,
            max_len: Some(max_len),
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.set(value);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Append a character; returns false if the field rejected it
    pub fn insert(&mut self, c: char) -> bool {
        if c.is_control() || (self.digits_only && !c.is_ascii_digit()) {
            return false;
        }
        if self
            .max_len
            .is_some_and(|max| self.value.chars().count() >= max)
        {
            return false;
        }
        self.value.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Replace the value, dropping characters the field would reject
    pub fn set(&mut self, value: &str) {
        self.value.clear();
        for c in value.chars() {
            self.insert(c);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// IP resolver
// ─────────────────────────────────────────────────────────────────────────────

/// Detection progress of the LAN IP
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IpStatus {
    #[default]
    Idle,
    Detecting,
    Found(String),
    NotFound,
    Error,
}

impl IpStatus {
    /// Detected address, never a status string
    pub fn detected(&self) -> Option<&str> {
        match self {
            IpStatus::Found(ip) => Some(ip),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            IpStatus::Idle => "",
            IpStatus::Detecting => "detecting…",
            IpStatus::Found(ip) => ip,
            IpStatus::NotFound => "not found",
            IpStatus::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IpState {
    pub status: IpStatus,
    pub manual_override: Option<String>,
}

impl IpState {
    /// Override, else detected address, else empty
    pub fn effective(&self) -> &str {
        self.manual_override
            .as_deref()
            .or_else(|| self.status.detected())
            .unwrap_or("")
    }

    pub fn is_manual(&self) -> bool {
        self.manual_override.is_some()
    }

    /// Text for the header: the override if set, else the detection status
    pub fn display(&self) -> &str {
        self.manual_override
            .as_deref()
            .unwrap_or_else(|| self.status.label())
    }

    /// Initial editor contents
    pub fn editor_prefill(&self) -> &str {
        self.effective()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File picker
// ─────────────────────────────────────────────────────────────────────────────

pub const SELECT_FILE_PLACEHOLDER: &str = "— select file —";
pub const NO_FILES_PLACEHOLDER: &str = "(no files found)";
pub const FILES_ERROR_PLACEHOLDER: &str = "(error loading)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Failed,
}

/// Picker rows are the placeholder (row 0) followed by the files
#[derive(Debug, Clone, Default)]
pub struct FilesState {
    pub files: Vec<String>,
    pub root: Option<String>,
    pub load: LoadState,
    /// Highlighted row, 0 is the placeholder
    pub cursor: usize,
    pub selected: Option<String>,
    pub auto_refresh: bool,
}

impl FilesState {
    pub fn row_count(&self) -> usize {
        self.files.len() + 1
    }

    pub fn placeholder(&self) -> &'static str {
        match self.load {
            LoadState::Failed => FILES_ERROR_PLACEHOLDER,
            _ if self.files.is_empty() && self.load == LoadState::Loaded => NO_FILES_PLACEHOLDER,
            _ => SELECT_FILE_PLACEHOLDER,
        }
    }

    /// Replace the list, keeping the selection if the file still exists
    pub fn replace(&mut self, files: Vec<String>, root: Option<String>) {
        self.files = files;
        self.root = root;
        self.load = LoadState::Loaded;

        if let Some(name) = &self.selected {
            if !self.files.contains(name) {
                self.selected = None;
            }
        }
        self.cursor = match &self.selected {
            Some(name) => self
                .files
                .iter()
                .position(|f| f == name)
                .map_or(0, |i| i + 1),
            None => self.cursor.min(self.files.len()),
        };
    }

    pub fn fail(&mut self) {
        self.files.clear();
        self.selected = None;
        self.cursor = 0;
        self.load = LoadState::Failed;
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.row_count() {
            self.cursor += 1;
        }
    }

    /// File under the cursor, `None` on the placeholder row
    pub fn highlighted(&self) -> Option<&str> {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.files.get(i))
            .map(String::as_str)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File listener
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ListenerState {
    pub status: FileServerStatus,
    pub port_input: TextField,
    /// Inline error from the last start attempt
    pub last_error: Option<String>,
    pub default_port: u16,
}

impl ListenerState {
    pub fn new(default_port: u16) -> Self {
        Self {
            status: FileServerStatus::stopped(),
            port_input: TextField::numeric(5),
            last_error: None,
            default_port,
        }
    }

    /// Port to request on start: the input clamped to 1–65535, or the default
    pub fn requested_port(&self) -> u16 {
        match self.port_input.value().parse::<u32>() {
            Ok(port) => port.clamp(1, u16::MAX as u32) as u16,
            Err(_) => self.default_port,
        }
    }

    /// Fill an empty port input from the running port or the default
    pub fn prefill_port(&mut self) {
        if self.port_input.is_empty() {
            let port = self.status.port.unwrap_or(self.default_port);
            self.port_input.set(&port.to_string());
        }
    }

    pub fn status_text(&self) -> String {
        match self.status.active_port() {
            Some(port) => format!("Running on :{}", port),
            None if self.status.running => "Running".to_string(),
            None => "Stopped".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Access log
// ─────────────────────────────────────────────────────────────────────────────

/// What the access log table shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LogsView {
    #[default]
    Loading,
    Entries(Vec<AccessLogEntry>),
    NoData,
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct LogsState {
    pub view: LogsView,
    pub auto_refresh: bool,
    /// First visible row
    pub scroll: usize,
}

impl LogsState {
    pub fn entries(&self) -> &[AccessLogEntry] {
        match &self.view {
            LogsView::Entries(entries) => entries,
            _ => &[],
        }
    }

    /// Replace the table with a fresh poll
    pub fn replace(&mut self, entries: Vec<AccessLogEntry>) {
        self.view = if entries.is_empty() {
            LogsView::NoData
        } else {
            LogsView::Entries(entries)
        };
        self.scroll = self.scroll.min(self.entries().len().saturating_sub(1));
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll + 1 < self.entries().len() {
            self.scroll += 1;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

/// "Copied!" marker on one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFlash {
    pub id: String,
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct CommandsState {
    pub os: OsTab,
    /// Current specification; `None` until the first load for this tab
    pub spec: Option<CommandSpec>,
    pub loading: bool,
    pub error: Option<String>,
    /// Flat index over all items
    pub cursor: usize,
    pub flash: Option<CopyFlash>,
    pub flash_generation: u64,
}

impl CommandsState {
    pub fn item_count(&self) -> usize {
        self.spec.as_ref().map_or(0, CommandSpec::item_count)
    }

    pub fn selected_id(&self) -> Option<String> {
        self.spec
            .as_ref()
            .and_then(|spec| item_id_at(spec, self.cursor))
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.item_count() {
            self.cursor += 1;
        }
    }

    pub fn is_flashing(&self, id: &str) -> bool {
        self.flash.as_ref().is_some_and(|f| f.id == id)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AppState
// ─────────────────────────────────────────────────────────────────────────────

/// Complete application state (the Model in TEA)
#[derive(Debug, Clone)]
pub struct AppState {
    pub ui_mode: UiMode,
    pub focus: Focus,

    pub serving: ServingPolicy,
    pub ip: IpState,
    pub ip_editor: TextField,
    pub files: FilesState,
    pub filename: TextField,
    pub fallback_port: TextField,
    pub listener: ListenerState,
    pub logs: LogsState,
    pub commands: CommandsState,

    pub log_limit: usize,
    pub files_interval: Duration,
    pub logs_interval: Duration,

    should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Settings::default(), &Preferences::default())
    }
}

impl AppState {
    pub fn new(settings: &Settings, prefs: &Preferences) -> Self {
        Self {
            ui_mode: UiMode::Normal,
            focus: Focus::default(),
            serving: settings.serving_policy(),
            ip: IpState {
                status: IpStatus::Idle,
                manual_override: prefs.manual_ip_override.clone(),
            },
            ip_editor: TextField::new(),
            files: FilesState {
                auto_refresh: settings.polling.files_auto_refresh,
                ..Default::default()
            },
            filename: TextField::new(),
            fallback_port: TextField::numeric(5),
            listener: ListenerState::new(settings.serving.default_listener_port),
            logs: LogsState {
                auto_refresh: settings.polling.logs_auto_refresh,
                ..Default::default()
            },
            commands: CommandsState {
                os: prefs.os_tab,
                ..Default::default()
            },
            log_limit: settings.polling.log_limit,
            files_interval: settings.polling.files_interval(),
            logs_interval: settings.polling.logs_interval(),
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Text field that has keyboard focus, if any
    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            Focus::Filename => Some(&mut self.filename),
            Focus::FallbackPort => Some(&mut self.fallback_port),
            Focus::ListenerPort => Some(&mut self.listener.port_input),
            _ => None,
        }
    }

    /// Preferences reflecting the current state
    pub fn preferences(&self) -> Preferences {
        Preferences {
            manual_ip_override: self.ip.manual_override.clone(),
            os_tab: self.commands.os,
        }
    }

    /// Filename input, else the picked file, else empty
    pub fn effective_filename(&self) -> String {
        let typed = self.filename.value().trim();
        if !typed.is_empty() {
            return typed.to_string();
        }
        self.files.selected.clone().unwrap_or_default()
    }

    /// Inputs for one render pass; recomputed every time, never stored
    pub fn derived_inputs(&self) -> DerivedInputs {
        DerivedInputs {
            ip: self.ip.effective().to_string(),
            filename: self.effective_filename(),
            fallback_port: clamp_fallback_port(self.fallback_port.value()),
        }
    }

    pub fn template_vars(&self) -> TemplateVars {
        self.serving
            .template_vars(&self.derived_inputs(), &self.listener.status)
    }

    pub fn download_url(&self) -> String {
        self.template_vars().url
    }

    pub fn rendered_commands(&self) -> Vec<RenderedGroup> {
        match &self.commands.spec {
            Some(spec) => render_commands(spec, &self.template_vars()),
            None => Vec::new(),
        }
    }

    /// `UI:<app_port>`, plus the listener port while it runs
    pub fn ports_info(&self) -> String {
        let ui = format!("UI:{}", self.serving.app_port);
        match self.listener.status.active_port() {
            Some(port) => format!("{}  |  Files:{}", ui, port),
            None => ui,
        }
    }
}
