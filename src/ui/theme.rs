use ratatui::style::{Color, Modifier, Style};

/// Identifier of one of the built-in colour schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeVariant {
    #[default]
    Minimal,
    Dark,
    Gradient,
    Dashboard,
    Terminal,
}

impl ThemeVariant {
    pub const ALL: [ThemeVariant; 5] = [
        ThemeVariant::Minimal,
        ThemeVariant::Dark,
        ThemeVariant::Gradient,
        ThemeVariant::Dashboard,
        ThemeVariant::Terminal,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ThemeVariant::Minimal => "minimal",
            ThemeVariant::Dark => "dark",
            ThemeVariant::Gradient => "gradient",
            ThemeVariant::Dashboard => "dashboard",
            ThemeVariant::Terminal => "terminal",
        }
    }

    /// Returns the fixed style record for this variant.
    pub fn config(self) -> &'static ThemeConfig {
        match self {
            ThemeVariant::Minimal => &MINIMAL,
            ThemeVariant::Dark => &DARK,
            ThemeVariant::Gradient => &GRADIENT,
            ThemeVariant::Dashboard => &DASHBOARD,
            ThemeVariant::Terminal => &TERMINAL,
        }
    }

    pub fn position(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

/// How headings and field captions are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    Plain,
    /// `> UPPER_SNAKE` headings and `// UPPER` captions.
    Shell,
}

/// Immutable presentation record for one [`ThemeVariant`].
///
/// Colours are `#rrggbb` strings, resolved to terminal colours when a style
/// is requested.
#[derive(Debug)]
pub struct ThemeConfig {
    pub name: &'static str,
    pub bg: &'static str,
    pub card: &'static str,
    pub card_border: &'static str,
    pub text: &'static str,
    pub text_muted: &'static str,
    pub primary: &'static str,
    pub primary_fg: &'static str,
    pub accent: &'static str,
    pub input: &'static str,
    pub input_border: &'static str,
    pub progress_bg: &'static str,
    pub progress_fill: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub table_header: &'static str,
    pub table_row: &'static str,
    pub table_row_alt: &'static str,
    pub labels: LabelStyle,
}

static MINIMAL: ThemeConfig = ThemeConfig {
    name: "Clean Minimal",
    bg: "#f9fafb",
    card: "#ffffff",
    card_border: "#e5e7eb",
    text: "#111827",
    text_muted: "#6b7280",
    primary: "#111827",
    primary_fg: "#ffffff",
    accent: "#2563eb",
    input: "#ffffff",
    input_border: "#d1d5db",
    progress_bg: "#e5e7eb",
    progress_fill: "#111827",
    success: "#16a34a",
    warning: "#d97706",
    error: "#dc2626",
    table_header: "#f3f4f6",
    table_row: "#ffffff",
    table_row_alt: "#f9fafb",
    labels: LabelStyle::Plain,
};

static DARK: ThemeConfig = ThemeConfig {
    name: "Dark Tech",
    bg: "#020617",
    card: "#0f172a",
    card_border: "#334155",
    text: "#ffffff",
    text_muted: "#94a3b8",
    primary: "#06b6d4",
    primary_fg: "#020617",
    accent: "#22d3ee",
    input: "#1e293b",
    input_border: "#475569",
    progress_bg: "#1e293b",
    progress_fill: "#06b6d4",
    success: "#34d399",
    warning: "#fbbf24",
    error: "#f87171",
    table_header: "#1e293b",
    table_row: "#0f172a",
    table_row_alt: "#172033",
    labels: LabelStyle::Plain,
};

static GRADIENT: ThemeConfig = ThemeConfig {
    name: "Gradient Modern",
    bg: "#4c1d95",
    card: "#5e3a9e",
    card_border: "#7a5cb0",
    text: "#ffffff",
    text_muted: "#e9d5ff",
    primary: "#ec4899",
    primary_fg: "#ffffff",
    accent: "#f472b6",
    input: "#5e3a9e",
    input_border: "#8f74bc",
    progress_bg: "#704fa9",
    progress_fill: "#ec4899",
    success: "#6ee7b7",
    warning: "#fcd34d",
    error: "#fca5a5",
    table_header: "#5e3a9e",
    table_row: "#553099",
    table_row_alt: "#5e3a9e",
    labels: LabelStyle::Plain,
};

static DASHBOARD: ThemeConfig = ThemeConfig {
    name: "Dashboard Cards",
    bg: "#eff6ff",
    card: "#ffffff",
    card_border: "#dbeafe",
    text: "#1e293b",
    text_muted: "#64748b",
    primary: "#2563eb",
    primary_fg: "#ffffff",
    accent: "#2563eb",
    input: "#eff6ff",
    input_border: "#bfdbfe",
    progress_bg: "#dbeafe",
    progress_fill: "#2563eb",
    success: "#059669",
    warning: "#f97316",
    error: "#ef4444",
    table_header: "#eff6ff",
    table_row: "#ffffff",
    table_row_alt: "#f7faff",
    labels: LabelStyle::Plain,
};

static TERMINAL: ThemeConfig = ThemeConfig {
    name: "Terminal CLI",
    bg: "#000000",
    card: "#030712",
    card_border: "#0c4029",
    text: "#4ade80",
    text_muted: "#16a34a",
    primary: "#22c55e",
    primary_fg: "#000000",
    accent: "#86efac",
    input: "#000000",
    input_border: "#11632f",
    progress_bg: "#052e16",
    progress_fill: "#22c55e",
    success: "#4ade80",
    warning: "#facc15",
    error: "#ef4444",
    table_header: "#052e16",
    table_row: "#030712",
    table_row_alt: "#041a0f",
    labels: LabelStyle::Shell,
};

/// Resolves a `#rrggbb` string, falling back to the terminal default.
pub fn color(hex: &str) -> Color {
    hex.parse().unwrap_or(Color::Reset)
}

impl ThemeConfig {
    /// Every colour attribute paired with its name.
    pub fn colors(&self) -> [(&'static str, &'static str); 18] {
        [
            ("bg", self.bg),
            ("card", self.card),
            ("card_border", self.card_border),
            ("text", self.text),
            ("text_muted", self.text_muted),
            ("primary", self.primary),
            ("primary_fg", self.primary_fg),
            ("accent", self.accent),
            ("input", self.input),
            ("input_border", self.input_border),
            ("progress_bg", self.progress_bg),
            ("progress_fill", self.progress_fill),
            ("success", self.success),
            ("warning", self.warning),
            ("error", self.error),
            ("table_header", self.table_header),
            ("table_row", self.table_row),
            ("table_row_alt", self.table_row_alt),
        ]
    }

    /// Full-screen background.
    pub fn base(&self) -> Style {
        Style::default().fg(color(self.text)).bg(color(self.bg))
    }

    /// Card surface.
    pub fn card(&self) -> Style {
        Style::default().fg(color(self.text)).bg(color(self.card))
    }

    pub fn border(&self) -> Style {
        Style::default()
            .fg(color(self.card_border))
            .bg(color(self.card))
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(color(self.text))
            .add_modifier(Modifier::BOLD)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(color(self.text))
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(color(self.text_muted))
    }

    pub fn accent(&self) -> Style {
        Style::default()
            .fg(color(self.accent))
            .add_modifier(Modifier::BOLD)
    }

    pub fn ok(&self) -> Style {
        Style::default().fg(color(self.success))
    }

    pub fn warn(&self) -> Style {
        Style::default().fg(color(self.warning))
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(color(self.error))
            .add_modifier(Modifier::BOLD)
    }

    /// Filled part of a progress gauge over its track.
    pub fn gauge(&self) -> Style {
        Style::default()
            .fg(color(self.progress_fill))
            .bg(color(self.progress_bg))
    }

    /// Primary call-to-action (run button, active tab).
    pub fn button(&self) -> Style {
        Style::default()
            .fg(color(self.primary_fg))
            .bg(color(self.primary))
            .add_modifier(Modifier::BOLD)
    }

    pub fn input(&self) -> Style {
        Style::default().fg(color(self.text)).bg(color(self.input))
    }

    pub fn input_border(&self) -> Style {
        Style::default().fg(color(self.input_border))
    }

    /// Focused input border.
    pub fn focus(&self) -> Style {
        Style::default()
            .fg(color(self.accent))
            .add_modifier(Modifier::BOLD)
    }

    pub fn table_header(&self) -> Style {
        Style::default()
            .fg(color(self.text))
            .bg(color(self.table_header))
            .add_modifier(Modifier::BOLD)
    }

    /// Zebra striping for table rows.
    pub fn row(&self, index: usize) -> Style {
        let bg = if index % 2 == 0 {
            self.table_row
        } else {
            self.table_row_alt
        };
        Style::default().fg(color(self.text)).bg(color(bg))
    }

    /// Selected list entry.
    pub fn highlight(&self) -> Style {
        self.button()
    }

    /// Section heading, e.g. `Training Progress` or `> TRAINING_PROGRESS`.
    pub fn heading(&self, text: &str) -> String {
        match self.labels {
            LabelStyle::Plain => text.to_string(),
            LabelStyle::Shell => format!("> {}", shell_case(text)),
        }
    }

    /// Field caption, e.g. `Batch Size` or `// BATCH_SIZE`.
    pub fn caption(&self, text: &str) -> String {
        match self.labels {
            LabelStyle::Plain => text.to_string(),
            LabelStyle::Shell => format!("// {}", shell_case(text)),
        }
    }

    /// Emphasised value, prefixed with a prompt in shell style.
    pub fn value(&self, text: &str) -> String {
        match self.labels {
            LabelStyle::Plain => text.to_string(),
            LabelStyle::Shell => format!("> {text}"),
        }
    }

    /// Tab or navigation label, e.g. `Metrics` or `[METRICS]`.
    pub fn tab(&self, text: &str) -> String {
        match self.labels {
            LabelStyle::Plain => text.to_string(),
            LabelStyle::Shell => format!("[{}]", shell_case(text)),
        }
    }
}

fn shell_case(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '%'))
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

/// Read access to the active theme.
///
/// Draw code receives this instead of looking up a global.
pub trait ThemeSource {
    fn variant(&self) -> ThemeVariant;

    fn theme(&self) -> &'static ThemeConfig {
        self.variant().config()
    }
}

/// Holds the active theme selection for the session.
#[derive(Debug, Clone, Default)]
pub struct ThemeResolver {
    active: ThemeVariant,
}

impl ThemeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the active variant.
    pub fn set_theme(&mut self, variant: ThemeVariant) {
        if self.active != variant {
            log::info!("theme changed: {} -> {}", self.active.id(), variant.id());
        }
        self.active = variant;
    }

    /// Style record of the active variant.
    pub fn config(&self) -> &'static ThemeConfig {
        self.active.config()
    }
}

impl ThemeSource for ThemeResolver {
    fn variant(&self) -> ThemeVariant {
        self.active
    }
}
