//! Conflict rendering
//!
//! Both versions are compared line by line at the same positions. Lines equal
//! on both sides are written once; every maximal run of differing positions
//! becomes one hunk:
//!
//! ```text
//! <<<<<<< HEAD
//! <our lines of the run>
//! =======
//! <their lines of the run>
//! >>>>>>>
//! ```
//!
//! An absent version contributes no lines. Every emitted line ends with `\n`.

const OURS_MARKER: &str = "<<<<<<< HEAD\n";
const SEPARATOR: &str = "=======\n";
const THEIRS_MARKER: &str = ">>>>>>>\n";

pub fn render_conflict(ours: Option<&[u8]>, theirs: Option<&[u8]>) -> String {
    let ours = split_lines(ours);
    let theirs = split_lines(theirs);

    let mut merged = String::new();
    let mut ours_run = Vec::new();
    let mut theirs_run = Vec::new();

    for position in 0..ours.len().max(theirs.len()) {
        let our_line = ours.get(position);
        let their_line = theirs.get(position);

        if our_line.is_some() && our_line == their_line {
            flush_hunk(&mut merged, &mut ours_run, &mut theirs_run);
            push_line(&mut merged, our_line.map(String::as_str).unwrap_or_default());
        } else {
            ours_run.extend(our_line);
            theirs_run.extend(their_line);
        }
    }
    flush_hunk(&mut merged, &mut ours_run, &mut theirs_run);

    merged
}

fn split_lines(content: Option<&[u8]>) -> Vec<String> {
    content
        .map(|content| {
            String::from_utf8_lossy(content)
                .lines()
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn push_line(merged: &mut String, line: &str) {
    merged.push_str(line);
    merged.push('\n');
}

fn flush_hunk(merged: &mut String, ours: &mut Vec<&String>, theirs: &mut Vec<&String>) {
    if ours.is_empty() && theirs.is_empty() {
        return;
    }

    merged.push_str(OURS_MARKER);
    ours.drain(..).for_each(|line| push_line(merged, line));
    merged.push_str(SEPARATOR);
    theirs.drain(..).for_each(|line| push_line(merged, line));
    merged.push_str(THEIRS_MARKER);
}
