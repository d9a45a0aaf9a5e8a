use chrono::{DateTime, Utc};
use colored::Colorize;
use notas::api::{CmdMessage, MessageLevel, StatusReport};
use notas::config::NotasConfig;
use notas::index::{DisplayIndex, DisplayNote};
use notas::model::Draft;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const TIME_WIDTH: usize = 16;
const URGENT_MARKER: &str = "!";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Lifecycle chatter is only interesting with `-v`; problems always are.
pub(super) fn print_lifecycle_messages(messages: &[CmdMessage], verbose: bool) {
    let shown: Vec<_> = messages
        .iter()
        .filter(|m| verbose || matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
        .cloned()
        .collect();
    print_messages(&shown);
}

pub(super) fn print_notes(notes: &[DisplayNote], trashed: bool) {
    if notes.is_empty() {
        if trashed {
            println!("Trash is empty.");
        } else {
            println!("No notes yet.");
        }
        return;
    }

    for dn in notes {
        println!("{}", format_note_line(dn, Utc::now()));
    }
}

fn format_note_line(dn: &DisplayNote, now: DateTime<Utc>) -> String {
    let idx_str = format!("{:>4}. ", dn.index.to_string());
    let marker = if dn.note.is_urgent {
        format!("{} ", URGENT_MARKER)
    } else {
        "  ".to_string()
    };

    let when = match dn.note.trashed_at {
        Some(ts) => ts,
        None => dn.note.created_at,
    };
    let time_ago = format_time_ago(when, now);

    let single_line: String = dn
        .note
        .activity_text
        .chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();

    let fixed = idx_str.width() + marker.width() + TIME_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed);
    let text = truncate_to_width(&single_line, available);
    let padding = available.saturating_sub(text.width());

    let idx_colored = match dn.index {
        DisplayIndex::Active(_) => idx_str.normal(),
        DisplayIndex::Trashed(_) => idx_str.red(),
    };

    format!(
        "{}{}{}{}{}",
        idx_colored,
        marker.red().bold(),
        text,
        " ".repeat(padding),
        time_ago.dimmed()
    )
}

pub(super) fn print_draft(draft: Option<&Draft>) {
    match draft {
        Some(d) if d.is_urgent => println!("{} {}", "Draft (urgent):".yellow(), d.text),
        Some(d) => println!("{} {}", "Draft:".yellow(), d.text),
        None => println!("No draft."),
    }
}

pub(super) fn print_status(status: &StatusReport) {
    let now = Utc::now();
    println!("{}", "Session".bold());
    println!("  notes created     {}", status.notes_created);
    println!("  menu toggles      {}", status.menu_opened);
    println!("  appearances       {}", status.state_changes);
    println!(
        "  notes             {} active, {} trashed",
        status.active_notes, status.trashed_notes
    );
    match &status.draft {
        Some(d) => println!("  draft             {}", d.preview(40)),
        None => println!("  draft             -"),
    }
    println!("{}", "App".bold());
    println!("  starts            {}", status.total_starts);
    println!("  transitions       {}", status.app_state_changes);
    println!(
        "  last start        {}",
        status
            .last_start
            .map(|ts| format_time_ago(ts, now).trim().to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!(
        "  last sleep        {}",
        status
            .last_sleep
            .map(|ts| format_time_ago(ts, now).trim().to_string())
            .unwrap_or_else(|| "-".to_string())
    );
}

pub(super) fn print_config(config: &NotasConfig) {
    for key in NotasConfig::keys() {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
