use crate::domain::error::ProgressError;
use crate::presentation::theme::Theme;

pub const WIDTH: u32 = 450;
pub const HEIGHT: u32 = 25;
pub const NOT_FOUND_TEXT: &str = "user not found";
pub const FALLBACK_ERROR_TEXT: &str = "Server Error";

/// Progress bar filled to `percentage`% of the width. Values over 100 overflow the track.
pub fn render_progress(percentage: i64, theme: &Theme) -> String {
    let fill_width = WIDTH as f64 * percentage.max(0) as f64 / 100.0;
    render(fill_width, theme.fill, &format!("{}%", percentage), theme)
}

pub fn render_not_found(theme: &Theme) -> String {
    render(WIDTH as f64, theme.alert, NOT_FOUND_TEXT, theme)
}

pub fn render_error(message: &str, theme: &Theme) -> String {
    let text = if message.trim().is_empty() {
        FALLBACK_ERROR_TEXT
    } else {
        message
    };
    render(WIDTH as f64, theme.alert, text, theme)
}

/// Badge for any pipeline failure. Only not-found gets its own marker.
pub fn render_failure(err: &ProgressError, theme: &Theme) -> String {
    match err {
        ProgressError::SubjectNotFound(_) => render_not_found(theme),
        other => render_error(&other.to_string(), theme),
    }
}

fn render(fill_width: f64, fill: &str, text: &str, theme: &Theme) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <rect width="{w}" height="{h}" fill="{track}"/>
  <rect width="{fill_width}" height="{h}" fill="{fill}"/>
  <text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" font-family="sans-serif" font-size="12" fill="{color}">{text}</text>
</svg>
"#,
        w = WIDTH,
        h = HEIGHT,
        track = theme.track,
        fill_width = fill_width,
        fill = fill,
        color = theme.text,
        text = escape(text),
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
