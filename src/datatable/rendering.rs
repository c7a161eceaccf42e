//! View rendering for the data table widget.
//!
//! This module renders the retained tree into styled text:
//! - Header rendering (always rebuilt from the column list)
//! - Group label and row rendering from the retained nodes
//! - Footer rendering (status bar and help line)
//!
//! Column text shares the width left after one-space gutters between
//! columns. Cell text wider than its column is truncated with an ellipsis.

use super::columns::compute_widths;
use super::node::{CellNode, RowNode};
use super::style::ELLIPSIS;
use super::types::TableRow;
use super::Model;
use lipgloss_extras::lipgloss::{width_visible, Style};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

impl<R: TableRow + Send + Sync + 'static> Model<R> {
    /// Renders the header line from the current column list.
    ///
    /// The header never survives a refresh; it is derived from the columns
    /// on every view, so column changes show up immediately.
    pub(super) fn view_header(&self) -> String {
        let widths = self.column_widths();
        let mut cells = Vec::with_capacity(self.columns.len());
        for (column, width) in self.columns.iter().zip(&widths) {
            let text = fit_cell(column.header_title(), *width);
            cells.push(self.styles.header.clone().inline(true).render(&text));
        }
        cells.join(" ")
    }

    /// Renders every group label and row from the retained tree.
    pub(super) fn view_rows(&self) -> String {
        if self.is_empty() {
            return self.styles.no_rows.clone().render("No rows.");
        }

        let widths = self.column_widths();
        let span = line_width(&widths);
        let mut lines = Vec::new();
        let mut flat_index = 0usize;
        for group in &self.groups {
            if self.show_groups {
                let label = fit_cell(&group.key, span);
                lines.push(self.styles.group_label.clone().inline(true).render(&label));
            }
            for row in &group.rows {
                lines.push(self.render_row(row, &widths, flat_index));
                flat_index += 1;
            }
        }
        lines.join("\n")
    }

    /// Renders the footer containing the status bar and the help line.
    ///
    /// Either line can be suppressed independently; with both suppressed
    /// the footer is empty and `view()` drops it entirely.
    pub(super) fn view_footer(&self) -> String {
        let mut lines = Vec::new();
        if self.show_status_bar {
            let rows = self.len();
            let groups = self.group_count();
            let row_noun = if rows == 1 { "row" } else { "rows" };
            let group_noun = if groups == 1 { "group" } else { "groups" };
            let divider = self.styles.divider_dot.clone().render("");
            let status = format!("{} {}{}{} {}", rows, row_noun, divider, groups, group_noun);
            lines.push(self.styles.status_bar.clone().render(&status));
        }
        if self.show_help {
            let help = self.view_help();
            if !help.is_empty() {
                lines.push(self.styles.help_style.clone().render(&help));
            }
        }
        lines.join("\n")
    }

    /// Renders the short help line from the enabled key bindings.
    fn view_help(&self) -> String {
        use crate::key::KeyMap;

        let bindings = self.keymap.short_help();
        let separator = self
            .styles
            .help_separator
            .clone()
            .inline(true)
            .render(" • ");

        let mut builder = String::new();
        let mut total_width = 0;
        for binding in bindings {
            if !binding.enabled() {
                continue;
            }
            let help = binding.help();
            let key_part = self.styles.help_key.clone().inline(true).render(&help.key);
            let desc_part = self
                .styles
                .help_desc
                .clone()
                .inline(true)
                .render(&help.desc);
            let sep = if total_width > 0 { separator.as_str() } else { "" };
            let item = format!("{}{} {}", sep, key_part, desc_part);

            let item_width = width_visible(&item);
            if total_width + item_width > self.width {
                break;
            }
            total_width += item_width;
            builder.push_str(&item);
        }
        builder
    }

    fn render_row(&self, row: &RowNode<R>, widths: &[usize], flat_index: usize) -> String {
        let mut cells = Vec::with_capacity(row.cells.len());
        for (column_index, (cell, width)) in row.cells.iter().zip(widths).enumerate() {
            let under_cursor = self.focused
                && flat_index == self.cursor_row
                && column_index == self.cursor_col;
            let text = fit_cell(&cell.content, *width);
            let style = self.cell_style(cell, row.clicked, under_cursor);
            cells.push(style.inline(true).render(&text));
        }
        cells.join(" ")
    }

    fn cell_style(&self, cell: &CellNode, row_clicked: bool, under_cursor: bool) -> Style {
        if under_cursor {
            self.styles.cursor.clone()
        } else if cell.clicked {
            self.styles.clicked_cell.clone()
        } else if row_clicked {
            self.styles.clicked_row.clone()
        } else if cell.category {
            self.styles.category_cell.clone()
        } else {
            self.styles.cell.clone()
        }
    }

    fn column_widths(&self) -> Vec<usize> {
        let gutters = self.columns.len().saturating_sub(1);
        compute_widths(&self.columns, self.width.saturating_sub(gutters))
    }
}

/// Total display width of a line with one-space gutters between columns.
fn line_width(widths: &[usize]) -> usize {
    if widths.is_empty() {
        0
    } else {
        widths.iter().sum::<usize>() + widths.len() - 1
    }
}

/// Fits `text` into exactly `width` terminal cells.
///
/// Shorter text is padded with spaces; longer text is truncated on a
/// character boundary and given a trailing ellipsis.
fn fit_cell(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let text_width = text.width();
    if text_width <= width {
        return format!("{}{}", text, " ".repeat(width - text_width));
    }

    let target = width - 1;
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > target {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    out.push_str(ELLIPSIS);
    format!("{}{}", out, " ".repeat(width - used - 1))
}

#[cfg(test)]
mod tests {
    use super::{fit_cell, line_width};

    #[test]
    fn test_fit_cell_pads_short_text() {
        assert_eq!(fit_cell("ab", 5), "ab   ");
    }

    #[test]
    fn test_fit_cell_exact_width_unchanged() {
        assert_eq!(fit_cell("abcde", 5), "abcde");
    }

    #[test]
    fn test_fit_cell_truncates_with_ellipsis() {
        assert_eq!(fit_cell("abcdefgh", 5), "abcd…");
    }

    #[test]
    fn test_fit_cell_wide_chars_stay_on_boundary() {
        // Each CJK character is two cells wide.
        assert_eq!(fit_cell("日本語", 4), "日… ");
    }

    #[test]
    fn test_fit_cell_zero_width() {
        assert_eq!(fit_cell("abc", 0), "");
    }

    #[test]
    fn test_line_width_includes_gutters() {
        assert_eq!(line_width(&[10, 20, 30]), 62);
        assert_eq!(line_width(&[]), 0);
    }
}
