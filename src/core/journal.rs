use crate::db::log::load_journal;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

const MAX_OP_WIDTH: usize = 60;

static ANSI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI pattern")
});

fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// Colour per journal operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "start" => Colour::Green,
        "stop" => Colour::Yellow,
        "event" => Colour::Blue,
        "reset" => Colour::Red,
        "export" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn truncate_visible(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut out: String = s.chars().take(max - 3).collect();
        out.push_str("...");
        out
    } else {
        s.to_string()
    }
}

pub struct JournalLogic;

impl JournalLogic {
    pub fn print_journal(pool: &DbPool) -> AppResult<()> {
        let entries = load_journal(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_targets: Vec<String> = entries
            .iter()
            .map(|e| {
                if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                }
            })
            .collect();

        let op_w = op_targets
            .iter()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for (entry, op_target) in entries.iter().zip(op_targets) {
            let date = chrono::DateTime::parse_from_rfc3339(&entry.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| entry.date.clone());

            let color = color_for_operation(&entry.operation);
            let visible = truncate_visible(&op_target, MAX_OP_WIDTH);

            // only the operation word is coloured
            let colored = match visible.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                entry.id,
                date,
                colored,
                padding,
                entry.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_colour_codes() {
        let painted = Colour::Green.paint("start").to_string();
        assert_eq!(strip_ansi(&painted), "start");
    }

    #[test]
    fn truncates_long_targets() {
        let long = "x".repeat(80);
        let t = truncate_visible(&long, MAX_OP_WIDTH);
        assert_eq!(t.chars().count(), MAX_OP_WIDTH);
        assert!(t.ends_with("..."));
        assert_eq!(truncate_visible("short", MAX_OP_WIDTH), "short");
    }
}
