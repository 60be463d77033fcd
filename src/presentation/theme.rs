/// Badge colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub track: &'static str,
    pub fill: &'static str,
    pub alert: &'static str,
    pub text: &'static str,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "default" | "" => Self::default_theme(),
            "dark" => Self::dark(),
            "github" => Self::github(),
            _ => {
                tracing::warn!(theme = name, "unknown theme, using default");
                Self::default_theme()
            }
        }
    }

    fn default_theme() -> Self {
        Self {
            track: "#e5e7eb",
            fill: "#3b82f6",
            alert: "#ef4444",
            text: "#111827",
        }
    }

    fn dark() -> Self {
        Self {
            track: "#1f2937",
            fill: "#6366f1",
            alert: "#b91c1c",
            text: "#f9fafb",
        }
    }

    fn github() -> Self {
        Self {
            track: "#ebedf0",
            fill: "#40c463",
            alert: "#cf222e",
            text: "#24292f",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
