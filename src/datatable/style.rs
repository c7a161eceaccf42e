//! Visual styling for the data table widget.
//!
//! All visible regions of the table draw through a [`TableStyles`] value, so
//! an application can restyle the widget without touching its layout logic.
//! The defaults use adaptive colors that adjust to light and dark terminal
//! themes.

use lipgloss_extras::lipgloss::{AdaptiveColor, Color, Style};

/// Bullet character used as the status bar divider.
pub const BULLET: &str = "•";
/// Ellipsis character appended to truncated cell text.
pub const ELLIPSIS: &str = "…";

/// Styles for every visual region of the data table.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datatable::datatable::TableStyles;
///
/// let mut styles = TableStyles::default();
/// styles.header = styles.header.underline(true);
/// ```
#[derive(Debug, Clone)]
pub struct TableStyles {
    /// Style for column titles in the header line.
    pub header: Style,
    /// Style for the full-width group label line.
    pub group_label: Style,
    /// Style for ordinary cell text.
    pub cell: Style,
    /// Style for cells in category columns that are not toggled.
    pub category_cell: Style,
    /// Style for the single toggled cell.
    pub clicked_cell: Style,
    /// Style for the remaining cells of the row holding the toggled cell.
    pub clicked_row: Style,
    /// Style for the cell under the keyboard cursor.
    pub cursor: Style,
    /// Style for the status bar line.
    pub status_bar: Style,
    /// Style for the message shown when the table has no rows.
    pub no_rows: Style,
    /// Style for the help area container.
    pub help_style: Style,
    /// Style for key names in the help line.
    pub help_key: Style,
    /// Style for key descriptions in the help line.
    pub help_desc: Style,
    /// Style for separators between help entries.
    pub help_separator: Style,
    /// Style for the divider dot between status bar segments.
    pub divider_dot: Style,
}

impl Default for TableStyles {
    /// Creates default table styles with adaptive colors.
    ///
    /// Category cells get an accent color to signal that they react to the
    /// toggle key, the toggled cell and its row are highlighted, and the
    /// keyboard cursor renders reversed. Status bar and help colors match
    /// the rest of this widget family.
    fn default() -> Self {
        let very_subdued_color = AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        };
        let subdued_color = AdaptiveColor {
            Light: "#909090",
            Dark: "#626262",
        };

        Self {
            header: Style::new().bold(true),
            group_label: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#1a1a1a",
                Dark: "#dddddd",
            }),
            cell: Style::new(),
            category_cell: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            clicked_cell: Style::new().bold(true).foreground(Color::from("212")),
            clicked_row: Style::new().foreground(Color::from("212")),
            cursor: Style::new().reverse(true),
            status_bar: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#A49FA5",
                    Dark: "#777777",
                })
                .padding(0, 0, 1, 2),
            no_rows: Style::new().foreground(subdued_color.clone()),
            help_style: Style::new().padding(1, 0, 0, 2),
            help_key: Style::new().foreground(subdued_color),
            help_desc: Style::new().foreground(AdaptiveColor {
                Light: "#B2B2B2",
                Dark: "#4A4A4A",
            }),
            help_separator: Style::new().foreground(very_subdued_color.clone()),
            divider_dot: Style::new()
                .foreground(very_subdued_color)
                .set_string(&format!(" {} ", BULLET)),
        }
    }
}
