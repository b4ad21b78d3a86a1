//! The closed set of icons the shell and views can draw.

/// Every icon the dashboard uses. Rendering picks a single-width glyph so
/// terminal layouts stay aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    LayoutDashboard,
    Stethoscope,
    FileText,
    Pill,
    Users,
    Settings,
    Bell,
    Search,
    Menu,
    Activity,
    DollarSign,
    TrendingUp,
    Sparkles,
    AlertCircle,
    AlertTriangle,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::LayoutDashboard => "▦",
            Icon::Stethoscope => "⚕",
            Icon::FileText => "≡",
            Icon::Pill => "℞",
            Icon::Users => "☺",
            Icon::Settings => "⚙",
            Icon::Bell => "◉",
            Icon::Search => "⌕",
            Icon::Menu => "☰",
            Icon::Activity => "∿",
            Icon::DollarSign => "$",
            Icon::TrendingUp => "↗",
            Icon::Sparkles => "✦",
            Icon::AlertCircle => "!",
            Icon::AlertTriangle => "▲",
        }
    }
}
