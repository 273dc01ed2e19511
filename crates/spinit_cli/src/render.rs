//! Terminal rendering of view snapshots.

use spinit_core::timer::format_clock;
use spinit_core::view::{CalendarMonth, DayPanel, NoteCard, TaskItem};
use spinit_core::{ViewSink, ViewSnapshot};
use std::io::Write;
use uuid::Uuid;

const WEEKDAY_HEADER: &str = " Su  Mo  Tu  We  Th  Fr  Sa";

pub fn short_id(id: &Uuid) -> String {
    id.to_string().chars().take(8).collect()
}

pub fn print_tasks(heading: &str, items: &[TaskItem]) {
    println!("{heading} ({})", items.len());
    if items.is_empty() {
        println!("  (empty)");
        return;
    }
    for item in items {
        let check = if item.done { "x" } else { " " };
        let mut line = format!("  [{check}] {}  {}", short_id(&item.id), item.title);
        if !item.meta.is_empty() {
            line.push_str(&format!("  ({})", item.meta));
        }
        if !item.date.is_empty() {
            line.push_str(&format!("  {}", item.date));
        }
        println!("{line}");
    }
}

pub fn print_notes(cards: &[NoteCard]) {
    println!("Notes ({})", cards.len());
    if cards.is_empty() {
        println!("  (empty)");
        return;
    }
    for card in cards {
        println!("  {}  {}", short_id(&card.id), card.heading);
        if !card.content.is_empty() {
            println!("      {}", card.content);
        }
        if !card.tags_line.is_empty() {
            println!("      {}", card.tags_line);
        }
    }
}

pub fn print_calendar(month: &CalendarMonth) {
    println!("{:^28}", month.label);
    println!("{WEEKDAY_HEADER}");
    let mut line = "    ".repeat(month.leading_blanks as usize);
    let mut column = month.leading_blanks;
    for cell in &month.cells {
        let marker = if cell.task_count > 0 { '*' } else { ' ' };
        line.push_str(&format!("{:>3}{marker}", cell.day));
        column += 1;
        if column == 7 {
            println!("{}", line.trim_end());
            line.clear();
            column = 0;
        }
    }
    if !line.is_empty() {
        println!("{}", line.trim_end());
    }
}

pub fn print_day_panel(panel: &DayPanel) {
    println!();
    print_tasks(&panel.label, &panel.tasks);
}

pub fn print_stats(snapshot: &ViewSnapshot) {
    let stats = snapshot.stats;
    println!("Sessions: {}", stats.sessions);
    println!("Focus minutes: {}", stats.minutes);
    println!("Streak: {} day(s)", stats.streak);
    println!(
        "Tasks: {} completed, {} pending",
        snapshot.pie.completed, snapshot.pie.pending
    );
    println!("Last 7 days:");
    let peak = snapshot.bar.minutes.iter().copied().max().unwrap_or(0).max(1);
    for (label, minutes) in snapshot.bar.labels.iter().zip(&snapshot.bar.minutes) {
        let width = (*minutes as usize * 30) / peak as usize;
        println!("  {label} {:<30} {minutes}", "#".repeat(width));
    }
}

/// Redraws the countdown in place on every pushed snapshot.
#[derive(Debug, Default)]
pub struct TimerLine;

impl ViewSink for TimerLine {
    fn render(&mut self, snapshot: &ViewSnapshot) {
        let mut stdout = std::io::stdout();
        let _ = write!(
            stdout,
            "\r{} / {}  ",
            snapshot.timer.display,
            format_clock(snapshot.timer.minutes * 60)
        );
        let _ = stdout.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::short_id;
    use uuid::Uuid;

    #[test]
    fn short_id_keeps_the_first_eight_characters() {
        let id = Uuid::parse_str("1f3c9a2b-0000-4000-8000-000000000000").unwrap();
        assert_eq!(short_id(&id), "1f3c9a2b");
    }
}
