//! Terminal rendering of snapshots.

use std::fmt::Write as _;

use cellgate_engine::Snapshot;

const HOME: &str = "\x1b[H";
const NEXT_LINE: &str = "\x1b[E";
const ALIVE: &str = "\x1b[07m  \x1b[m";
const DEAD: &str = "  ";

/// Full-screen ANSI frame for one snapshot.
///
/// The cursor is homed first so consecutive frames overwrite each other.
/// Columns and rows are labelled, live cells are drawn in inverse video
/// two characters wide, and a status line follows the grid.
pub fn render_ansi(snapshot: &Snapshot) -> String {
    let (width, height) = (snapshot.width(), snapshot.height());
    let mut out = String::with_capacity((width as usize * 10 + 8) * (height as usize + 2));

    out.push_str(HOME);
    out.push_str(DEAD);
    for col in 0..width {
        let _ = write!(out, "{col:2}");
    }
    out.push('\n');

    for row in 0..height {
        let _ = write!(out, "{row:2}");
        for col in 0..width {
            out.push_str(if snapshot.is_alive(row, col) { ALIVE } else { DEAD });
        }
        out.push_str(NEXT_LINE);
    }

    let _ = writeln!(out, "{}", status_line(snapshot));
    out
}

/// Escape-free rendering: `#` for live cells, `.` for dead ones, one row
/// per line, followed by the status line.
pub fn render_plain(snapshot: &Snapshot) -> String {
    let (width, height) = (snapshot.width(), snapshot.height());
    let mut out = String::with_capacity((width as usize + 1) * height as usize + 64);
    for row in 0..height {
        for col in 0..width {
            out.push(if snapshot.is_alive(row, col) { '#' } else { '.' });
        }
        out.push('\n');
    }
    let _ = writeln!(out, "{}", status_line(snapshot));
    out
}

fn status_line(snapshot: &Snapshot) -> String {
    format!(
        "generation {} received: {} x {}",
        snapshot.generation(),
        snapshot.width(),
        snapshot.height()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellgate_core::{Generation, CAP};
    use cellgate_grid::GridStore;

    fn snapshot(width: u32, height: u32, alive: &[usize], generation: u32) -> Snapshot {
        let mut g = GridStore::new();
        g.initialize(width, height).unwrap();
        for &i in alive {
            g.set_alive(i).unwrap();
        }
        Snapshot::capture(&g, Generation(generation), CAP).unwrap()
    }

    #[test]
    fn plain_marks_live_cells() {
        let s = snapshot(3, 2, &[0, 4], 5);
        assert_eq!(
            render_plain(&s),
            "#..\n.#.\ngeneration 5 received: 3 x 2\n"
        );
    }

    #[test]
    fn ansi_frame_layout() {
        let s = snapshot(2, 2, &[3], 1);
        let expected = concat!(
            "\x1b[H",
            "   0 1\n",
            " 0    \x1b[E",
            " 1  \x1b[07m  \x1b[m\x1b[E",
            "generation 1 received: 2 x 2\n",
        );
        assert_eq!(render_ansi(&s), expected);
    }

    #[test]
    fn ansi_counts_live_cells() {
        let s = snapshot(8, 8, &[0, 9, 18, 27], 0);
        assert_eq!(render_ansi(&s).matches(ALIVE).count(), 4);
    }

    #[test]
    fn truncated_payload_renders_dead_tail() {
        let mut g = GridStore::new();
        g.initialize(4, 4).unwrap();
        g.set_alive(15).unwrap();
        let s = Snapshot::capture(&g, Generation(0), 8).unwrap();
        assert!(!render_plain(&s).contains('#'));
    }
}
