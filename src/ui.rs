use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};

use stopwatch_core::{format_clock, LapEntry, Stopwatch, SwState};

const FOOTER: &str = "space=start/pause  l=lap  r=reset  d=clear laps  e=export  h=help  q=quit";

fn print_line(out: &mut impl Write, x: u16, y: u16, cols: u16, text: &str) -> io::Result<()> {
    // Terminal widths are unpredictable; clip rather than wrap.
    let avail = cols.saturating_sub(x) as usize;
    let clipped: String = text.chars().take(avail).collect();
    queue!(out, MoveTo(x, y), Print(clipped))
}

pub fn draw_stopwatch(
    out: &mut impl Write,
    size: (u16, u16),
    sw: &Stopwatch,
    laps: &[LapEntry],
    lap_scroll_offset: usize,
    status: Option<&str>,
    now_ms: u64,
) -> io::Result<()> {
    let (cols, rows) = size;
    queue!(out, Clear(ClearType::All), SetAttribute(Attribute::Bold))?;
    print_line(out, 1, 0, cols, "STOPWATCH")?;

    // Clock line
    let elapsed = sw.elapsed_ms(now_ms);
    let state_label = match sw.state {
        SwState::Running => "  [running]",
        SwState::Paused => "  [paused]",
        SwState::Stopped => "",
    };
    let clock = format!("{}{}", format_clock(elapsed as i64), state_label);
    print_line(out, 3, 2, cols, &clock)?;
    queue!(out, SetAttribute(Attribute::Reset))?;

    // Lap table, most recent first
    let list_top: u16 = 5;
    let list_bottom = rows.saturating_sub(3);
    if !laps.is_empty() && list_bottom > list_top {
        print_line(
            out,
            3,
            4,
            cols,
            &format!("{:>4}  {:>14}  {:>14}", "Lap", "Split", "Total"),
        )?;
        let max_visible = (list_bottom - list_top) as usize;
        let visible = laps.iter().rev().skip(lap_scroll_offset).take(max_visible);
        for (i, entry) in visible.enumerate() {
            let row = format!(
                "{:>4}  {:>14}  {:>14}",
                entry.index,
                format_clock(entry.lap_ms),
                format_clock(entry.total_ms as i64),
            );
            print_line(out, 3, list_top + i as u16, cols, &row)?;
        }
    }

    // Status line for transient messages (export result etc.)
    if let Some(msg) = status {
        print_line(out, 1, rows.saturating_sub(2), cols, msg)?;
    }

    print_line(out, 0, rows.saturating_sub(1), cols, FOOTER)?;
    out.flush()
}

pub fn draw_help(out: &mut impl Write, size: (u16, u16), help_text: &str) -> io::Result<()> {
    let (cols, rows) = size;
    queue!(out, Clear(ClearType::All))?;

    let mut y = 0u16;
    for line in help_text.lines() {
        if y + 2 >= rows {
            break;
        }
        if y == 0 {
            queue!(out, SetAttribute(Attribute::Bold))?;
            print_line(out, 1, y, cols, line)?;
            queue!(out, SetAttribute(Attribute::Reset))?;
        } else {
            print_line(out, 1, y, cols, line)?;
        }
        y += 1;
    }

    print_line(out, 0, rows.saturating_sub(1), cols, "Press any key to close")?;
    out.flush()
}
