//! Tests for the data table component.

use super::*;

#[cfg(test)]
mod tests {
    use super::*;
    use bubbletea_rs::{KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct Event {
        id: u32,
        region: &'static str,
        kind: &'static str,
        amount: f64,
        at: i64,
    }

    impl TableRow for Event {
        fn id(&self) -> String {
            self.id.to_string()
        }

        fn field(&self, key: &str) -> Value {
            match key {
                "region" => Value::from(self.region),
                "kind" => Value::from(self.kind),
                "amount" => Value::from(self.amount),
                "at" => Value::from(self.at),
                _ => Value::Null,
            }
        }
    }

    fn sample_events() -> Vec<Event> {
        vec![
            Event {
                id: 1,
                region: "west",
                kind: "sale",
                amount: 1250.0,
                at: 1_425_220_200,
            },
            Event {
                id: 2,
                region: "east",
                kind: "refund",
                amount: 310.5,
                at: 1_425_306_600,
            },
            Event {
                id: 3,
                region: "west",
                kind: "sale",
                amount: 89.99,
                at: 1_425_133_800,
            },
            Event {
                id: 4,
                region: "east",
                kind: "sale",
                amount: 47.25,
                at: 1_425_048_000,
            },
        ]
    }

    fn sample_columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("kind").with_category(true),
            ColumnSpec::new("amount")
                .with_data_type(DataType::Number)
                .with_data_format(",.2f"),
            ColumnSpec::new("at")
                .with_title("When")
                .with_data_type(DataType::Date)
                .with_need_translate(true),
        ]
    }

    /// Sorted by timestamp the flat row order is [4, 2, 3, 1]:
    /// group "east" holds ids 4 and 2, group "west" holds ids 3 and 1.
    fn sample_table() -> Model<Event> {
        Model::new(sample_columns())
            .with_dimension(VecDimension::new(sample_events()))
            .with_group_by(|event: &Event| Value::from(event.region))
            .with_sort_by(|event: &Event| Value::from(event.at))
    }

    fn key_msg(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::empty(),
        })
    }

    fn row_ids(table: &Model<Event>) -> Vec<String> {
        table
            .groups
            .iter()
            .flat_map(|group| group.rows.iter())
            .map(|row| row.id.clone())
            .collect()
    }

    fn marked_cells(table: &Model<Event>) -> Vec<(String, usize)> {
        let mut marked = Vec::new();
        for group in &table.groups {
            for row in &group.rows {
                for (column, cell) in row.cells.iter().enumerate() {
                    if cell.clicked {
                        marked.push((row.id.clone(), column));
                    }
                }
            }
        }
        marked
    }

    #[test]
    fn test_refresh_requires_dimension() {
        let mut table: Model<Event> = Model::new(sample_columns());
        let err = table.refresh().unwrap_err();
        assert!(matches!(err, Error::MissingDimension));
    }

    #[test]
    fn test_refresh_requires_group_by() {
        let mut table = Model::new(sample_columns())
            .with_dimension(VecDimension::new(sample_events()));
        let err = table.refresh().unwrap_err();
        assert!(matches!(err, Error::MissingGroupBy));
    }

    #[test]
    fn test_refresh_builds_grouped_tree() {
        let mut table = sample_table();
        table.refresh().unwrap();

        assert_eq!(table.group_count(), 2);
        assert_eq!(table.len(), 4);
        assert_eq!(table.groups[0].key, "east");
        assert_eq!(table.groups[1].key, "west");
        assert_eq!(row_ids(&table), vec!["4", "2", "3", "1"]);
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut table = sample_table();
        table.refresh().unwrap();
        let first = row_ids(&table);
        table.refresh().unwrap();
        assert_eq!(row_ids(&table), first);
        assert_eq!(table.group_count(), 2);
    }

    #[test]
    fn test_redraw_matches_refresh() {
        let mut table = sample_table();
        table.redraw().unwrap();
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_size_caps_fetched_rows() {
        let mut table = sample_table().with_size(2);
        table.refresh().unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_descending_order_reverses_groups() {
        let mut table = sample_table().with_order(descending);
        table.refresh().unwrap();
        assert_eq!(table.groups[0].key, "west");
        assert_eq!(table.groups[1].key, "east");
    }

    #[test]
    fn test_cell_contents_formatted() {
        let mut table = sample_table();
        table.refresh().unwrap();

        // Flat row 0 is id 4: amount 47.25, timestamp in late February 2015.
        let row = &table.groups[0].rows[0];
        assert_eq!(row.cells[0].content, "sale");
        assert_eq!(row.cells[1].content, "47.25");
        assert!(row.cells[2].content.starts_with("February 27, 2015"));
    }

    #[test]
    fn test_missing_field_renders_empty_cell() {
        let mut table = sample_table();
        table.set_columns(vec![
            ColumnSpec::new("kind"),
            ColumnSpec::new("nonexistent"),
        ]);
        table.refresh().unwrap();
        let row = &table.groups[0].rows[0];
        assert_eq!(row.cells[1].content, "");
    }

    #[test]
    fn test_view_contains_headers_labels_and_status() {
        let mut table = sample_table();
        table.refresh().unwrap();
        let output = table.view();

        assert!(output.contains("kind"));
        assert!(output.contains("When"));
        assert!(output.contains("east"));
        assert!(output.contains("west"));
        assert!(output.contains("4 rows"));
        assert!(output.contains("2 groups"));
    }

    #[test]
    fn test_show_groups_false_hides_labels_only() {
        let mut table = sample_table().with_show_groups(false);
        table.refresh().unwrap();
        let output = table.view();

        assert!(!output.contains("east"));
        assert!(!output.contains("west"));
        assert_eq!(table.group_count(), 2);
    }

    #[test]
    fn test_footer_lines_suppressible_independently() {
        let mut table = sample_table().with_show_status_bar(false);
        table.refresh().unwrap();
        let output = table.view();
        assert!(!output.contains("4 rows"));
        assert!(output.contains("toggle cell"));

        table.set_show_help(false);
        assert!(!table.view().contains("toggle cell"));
    }

    #[test]
    fn test_view_without_rows_shows_message() {
        let mut table = sample_table();
        table.set_dimension(VecDimension::new(Vec::new()));
        table.refresh().unwrap();
        assert!(table.is_empty());
        assert!(table.view().contains("No rows."));
    }

    #[test]
    fn test_header_reflects_column_changes_without_refresh() {
        let mut table = sample_table();
        table.refresh().unwrap();
        table.set_columns(vec![ColumnSpec::new("amount").with_title("Total")]);
        assert!(table.view().contains("Total"));
    }

    #[test]
    fn test_toggle_applies_and_removes_mark() {
        let mut table = sample_table();
        table.refresh().unwrap();

        table.toggle_cell(0, 0);
        assert!(table.selection().is_active(&CellKey::new("4", 0)));
        assert_eq!(marked_cells(&table), vec![("4".to_string(), 0)]);
        assert!(table.groups[0].rows[0].clicked);

        table.toggle_cell(0, 0);
        assert_eq!(table.selection().active(), None);
        assert!(marked_cells(&table).is_empty());
        assert!(!table.groups[0].rows[0].clicked);
    }

    #[test]
    fn test_toggle_other_cell_moves_single_mark() {
        let mut table = sample_table();
        table.refresh().unwrap();

        table.toggle_cell(0, 0);
        table.toggle_cell(2, 0);

        assert!(table.selection().is_active(&CellKey::new("3", 0)));
        assert_eq!(marked_cells(&table), vec![("3".to_string(), 0)]);
    }

    #[test]
    fn test_toggle_ignores_non_category_columns() {
        let mut table = sample_table();
        table.refresh().unwrap();

        assert!(table.toggle_cell(0, 1).is_none());
        assert_eq!(table.selection().active(), None);
        assert!(marked_cells(&table).is_empty());
    }

    #[test]
    fn test_toggle_out_of_bounds_is_ignored() {
        let mut table = sample_table();
        table.refresh().unwrap();

        table.toggle_cell(99, 0);
        table.toggle_cell(0, 99);
        assert_eq!(table.selection().active(), None);
    }

    #[test]
    fn test_toggle_callback_gets_uncapped_rows_and_apply_flag() {
        let calls: Arc<Mutex<Vec<(String, String, usize, bool)>>> =
            Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&calls);

        let mut table = sample_table().with_size(2).with_on_category_click(
            move |event: &Event, column: &ColumnSpec, rows: &[Event], applied| {
                seen.lock().unwrap().push((
                    event.id.to_string(),
                    column.key.clone(),
                    rows.len(),
                    applied,
                ));
                None
            },
        );
        table.refresh().unwrap();
        assert_eq!(table.len(), 2);

        table.toggle_cell(0, 0);
        table.toggle_cell(0, 0);

        let calls = calls.lock().unwrap();
        // The display is capped at 2 rows but the callback sees all 4.
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ("4".to_string(), "kind".to_string(), 4, true));
        assert_eq!(calls[1], ("4".to_string(), "kind".to_string(), 4, false));
    }

    #[test]
    fn test_mark_survives_refresh_on_surviving_row() {
        let mut table = sample_table();
        table.refresh().unwrap();
        table.toggle_cell(0, 0);

        table.refresh().unwrap();

        assert!(table.selection().is_active(&CellKey::new("4", 0)));
        assert_eq!(marked_cells(&table), vec![("4".to_string(), 0)]);
    }

    #[test]
    fn test_mark_does_not_survive_node_rebuild() {
        let mut table = sample_table();
        table.refresh().unwrap();
        table.toggle_cell(0, 0);

        // Row 4 leaves the data set; its node and mark go with it.
        let without_four: Vec<Event> = sample_events()
            .into_iter()
            .filter(|event| event.id != 4)
            .collect();
        table.set_dimension(VecDimension::new(without_four));
        table.refresh().unwrap();
        assert!(marked_cells(&table).is_empty());
        // The selection state itself is not reset by rendering.
        assert!(table.selection().is_active(&CellKey::new("4", 0)));

        // The row coming back gets a fresh, unmarked node.
        table.set_dimension(VecDimension::new(sample_events()));
        table.refresh().unwrap();
        assert!(marked_cells(&table).is_empty());
    }

    #[test]
    fn test_selected_row_follows_selection() {
        let mut table = sample_table();
        table.refresh().unwrap();

        assert!(table.selected_row().is_none());
        table.toggle_cell(1, 0);
        assert_eq!(table.selected_row().map(|event| event.id), Some(2));

        table.clear_selection();
        assert!(table.selected_row().is_none());
    }

    #[test]
    fn test_cursor_navigation_and_clamping() {
        let mut table = sample_table();
        table.refresh().unwrap();
        assert_eq!(table.cursor_position(), (0, 0));

        table.update(key_msg(KeyCode::Down));
        table.update(key_msg(KeyCode::Down));
        assert_eq!(table.cursor_position(), (2, 0));

        for _ in 0..10 {
            table.update(key_msg(KeyCode::Down));
        }
        assert_eq!(table.cursor_position().0, 3);

        for _ in 0..10 {
            table.update(key_msg(KeyCode::Up));
        }
        assert_eq!(table.cursor_position().0, 0);
    }

    /// Only "kind" is a category here, so moving right has nowhere to
    /// go and the toggle key always lands on a toggleable cell.
    #[test]
    fn test_cursor_skips_non_category_columns() {
        let mut table = sample_table();
        table.refresh().unwrap();

        table.update(key_msg(KeyCode::Right));
        assert_eq!(table.cursor_position(), (0, 0));

        table.update(key_msg(KeyCode::Enter));
        assert!(table.selection().is_active(&CellKey::new("4", 0)));
        assert_eq!(marked_cells(&table), vec![("4".to_string(), 0)]);
    }

    #[test]
    fn test_cursor_moves_between_category_columns() {
        let mut table = Model::new(vec![
            ColumnSpec::new("kind").with_category(true),
            ColumnSpec::new("amount"),
            ColumnSpec::new("region").with_category(true),
        ])
        .with_dimension(VecDimension::new(sample_events()))
        .with_group_by(|event: &Event| Value::from(event.region));
        table.refresh().unwrap();

        table.update(key_msg(KeyCode::Right));
        assert_eq!(table.cursor_position(), (0, 2));
        table.update(key_msg(KeyCode::Right));
        assert_eq!(table.cursor_position(), (0, 2));

        table.update(key_msg(KeyCode::Left));
        assert_eq!(table.cursor_position(), (0, 0));
        table.update(key_msg(KeyCode::Left));
        assert_eq!(table.cursor_position(), (0, 0));
    }

    #[test]
    fn test_cursor_starts_on_first_category_column() {
        let mut table = Model::new(vec![
            ColumnSpec::new("amount").with_data_type(DataType::Number),
            ColumnSpec::new("kind").with_category(true),
        ])
        .with_dimension(VecDimension::new(sample_events()))
        .with_group_by(|event: &Event| Value::from(event.region));
        table.refresh().unwrap();
        assert_eq!(table.cursor_position(), (0, 1));

        table.update(key_msg(KeyCode::Enter));
        assert!(table.selection().is_active(&CellKey::new("2", 1)));
    }

    #[test]
    fn test_toggle_key_toggles_cell_under_cursor() {
        let mut table = sample_table();
        table.refresh().unwrap();

        table.update(key_msg(KeyCode::Down));
        table.update(key_msg(KeyCode::Enter));

        assert!(table.selection().is_active(&CellKey::new("2", 0)));
    }

    #[test]
    fn test_blurred_table_ignores_keys() {
        let mut table = sample_table();
        table.refresh().unwrap();
        table.blur();

        table.update(key_msg(KeyCode::Down));
        table.update(key_msg(KeyCode::Enter));

        assert_eq!(table.cursor_position(), (0, 0));
        assert_eq!(table.selection().active(), None);

        table.focus();
        table.update(key_msg(KeyCode::Down));
        assert_eq!(table.cursor_position(), (1, 0));
    }

    #[test]
    fn test_window_size_message_sets_width() {
        let mut table = sample_table();
        let msg: Msg = Box::new(WindowSizeMsg {
            width: 120,
            height: 40,
        });
        table.update(msg);
        assert_eq!(table.width(), 120);
    }

    #[test]
    fn test_refresh_clamps_cursor_to_shrunk_data() {
        let mut table = sample_table();
        table.refresh().unwrap();
        table.set_cursor(3, 2);

        table.set_dimension(VecDimension::new(sample_events().into_iter().take(1).collect()));
        table.refresh().unwrap();

        assert_eq!(table.cursor_position().0, 0);
    }

    #[test]
    fn test_rows_keep_dimension_order_without_sort_by() {
        let mut table = Model::new(sample_columns())
            .with_dimension(VecDimension::new(sample_events()))
            .with_group_by(|event: &Event| Value::from(event.region));
        table.refresh().unwrap();

        // Within each group, rows keep retrieval order: west saw 1 then 3.
        assert_eq!(row_ids(&table), vec!["2", "4", "1", "3"]);
    }
}
