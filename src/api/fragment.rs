//! HTML fragment rendering for the countdown

use std::fmt::Write as _;

use crate::{config::CountdownSettings, countdown::CountdownSnapshot};

/// Long human format for the debug arrival time, e.g. "Wednesday, April 25, 2018 10:00 AM"
const ARRIVAL_FORMAT: &str = "%A, %B %-d, %Y %-I:%M %p";
const DEADLINE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %P";

/// Render the countdown as an embeddable markup fragment.
///
/// Counting shows four labeled fields, expired shows the end text, and debug
/// mode always shows the fields plus the deadline and arrival time.
pub fn render_fragment(settings: &CountdownSettings, snapshot: &CountdownSnapshot) -> String {
    let layout = if settings.debug { "column" } else { "row" };
    let mut html = format!(
        "<div class=\"countdown\" style=\"color: {}; flex-direction: {}; align-items: center;\">",
        escape_html(&settings.text_color),
        layout
    );

    if settings.debug {
        html.push_str("<div class=\"clock_container\">");
        push_clock_fields(&mut html, snapshot);
        html.push_str("</div>");
        push_debug_panel(&mut html, snapshot);
    } else if snapshot.state.is_expired() {
        let _ = write!(
            html,
            "<div class=\"times_up\"><div id=\"times_up\" class=\"text\">{}</div></div>",
            escape_html(&settings.end_time_text)
        );
    } else {
        push_clock_fields(&mut html, snapshot);
    }

    html.push_str("</div>");
    html
}

fn push_clock_fields(html: &mut String, snapshot: &CountdownSnapshot) {
    let remaining = &snapshot.remaining;
    push_field(html, "days", "Days", &remaining.days.to_string());
    push_field(html, "hours", "Hours", &format!("{:02}", remaining.hours));
    push_field(html, "minutes", "Minutes", &format!("{:02}", remaining.minutes));
    push_field(html, "seconds", "Seconds", &format!("{:02}", remaining.seconds));
}

fn push_field(html: &mut String, class: &str, label: &str, value: &str) {
    let _ = write!(
        html,
        "<div class=\"{class} clock_content_container\"><div class=\"num\">{value}</div><div class=\"text\">{label}</div></div>"
    );
}

fn push_debug_panel(html: &mut String, snapshot: &CountdownSnapshot) {
    let deadline = snapshot
        .deadline
        .map(|d| d.format(DEADLINE_FORMAT).to_string())
        .unwrap_or_else(|| "none".to_string());

    html.push_str("<div class=\"clock_container debug\">");
    push_debug_row(html, "Next deadline:", &deadline);
    push_debug_row(html, "Debug mode:", "true");
    push_debug_row(html, "You arrived at:", &snapshot.now.format(ARRIVAL_FORMAT).to_string());
    html.push_str("</div>");
}

fn push_debug_row(html: &mut String, label: &str, value: &str) {
    let _ = write!(
        html,
        "<div class=\"clock_content_container\"><div class=\"text\">{label}</div><div class=\"value\">{value}</div></div>"
    );
}

/// Escape text for inclusion in HTML content or a quoted attribute
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
