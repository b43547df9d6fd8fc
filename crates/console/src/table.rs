//! Plain-text table rendering for terminal views.

/// Cells longer than this are truncated with an ellipsis.
pub const MAX_CELL_CHARS: usize = 80;

fn clip(cell: &str, max: usize) -> String {
    let single_line = cell.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let mut out: String = single_line.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let parts: Vec<String> = cells
        .zip(widths)
        .map(|(c, &w)| format!("{c:<w$}"))
        .collect();
    format!("{}\n", parts.join("  ").trim_end())
}

/// Render `rows` under `headers` as left-aligned, space-separated
/// columns. Returns `placeholder` when there are no rows.
pub fn render(headers: &[&str], rows: &[Vec<String>], placeholder: &str) -> String {
    if rows.is_empty() {
        return format!("{placeholder}\n");
    }

    let clipped: Vec<Vec<String>> = rows
        .iter()
        .map(|r| r.iter().map(|c| clip(c, MAX_CELL_CHARS)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &clipped {
        for (i, cell) in row.iter().enumerate() {
            let w = cell.chars().count();
            match widths.get_mut(i) {
                Some(cur) => *cur = (*cur).max(w),
                None => widths.push(w),
            }
        }
    }

    let mut out = line(headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("{}\n", rule.join("  ")));
    for row in &clipped {
        out.push_str(&line(row.iter().map(String::as_str), &widths));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rows_render_placeholder() {
        assert_eq!(render(&["A"], &[], "No leads found."), "No leads found.\n");
    }

    #[test]
    fn columns_are_padded_to_widest_cell() {
        let out = render(
            &["Customer", "Phone"],
            &[
                vec!["Ann".into(), "+100".into()],
                vec!["Bartholomew".into(), "+2".into()],
            ],
            "-",
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Customer     Phone");
        assert_eq!(lines[1], "-----------  -----");
        assert_eq!(lines[2], "Ann          +100");
        assert_eq!(lines[3], "Bartholomew  +2");
    }

    #[test]
    fn long_cells_are_clipped() {
        let long = "x".repeat(200);
        assert_eq!(clip(&long, 10).chars().count(), 10);
        assert!(clip(&long, 10).ends_with('…'));
        assert_eq!(clip("a\nb", 10), "a b");
    }
}
