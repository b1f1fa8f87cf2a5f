//! Plain-text table rendering.

/// Render rows under a header line, columns padded to the widest cell.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.len()).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            if index < widths.len() {
                widths[index] = widths[index].max(cell.len());
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format_row(
        &headers.iter().map(|h| (*h).to_string()).collect::<Vec<_>>(),
        &widths,
    ));
    for row in rows {
        out.push_str(&format_row(row, &widths));
    }
    if rows.is_empty() {
        out.push_str("(none)\n");
    }
    out
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = cells
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let width = widths.get(index).copied().unwrap_or(cell.len());
            format!("{cell:<width$}")
        })
        .collect::<Vec<_>>()
        .join("  ");
    while line.ends_with(' ') {
        line.pop();
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_to_widest_cell() {
        let rows = vec![
            vec!["us-east".to_string(), "pop-east".to_string()],
            vec!["eu".to_string(), "pop-frankfurt-central".to_string()],
        ];
        let table = render_table(&["REGION", "NAME"], &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("REGION   NAME"));
        assert!(lines[1].starts_with("us-east  pop-east"));
        assert!(lines[2].starts_with("eu       pop-frankfurt-central"));
    }

    #[test]
    fn empty_listing_renders_placeholder() {
        let table = render_table(&["NAME"], &[]);
        assert!(table.contains("(none)"));
    }
}
