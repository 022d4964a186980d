//! Non-interactive output of a filtered policy page, as text or CSV

use std::io::Write;

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::{
    models::{display_date, PolicyRow},
    pagination::{Paginated, Pagination},
    policy_tui::ui::pad_to_width,
};

/// A page of rows ready for output
#[derive(Debug)]
pub struct Page<'a> {
    pub rows: &'a [PolicyRow],
    /// Row number of `rows[0]`, 1-based
    pub first_row_number: usize,
    pub pagination: Pagination,
}

/// Pick page `page_number` (1-based) of `rows`
pub fn select_page(rows: &[PolicyRow], rows_per_page: usize, page_number: usize) -> Result<Page<'_>> {
    if rows_per_page == 0 {
        return Err(anyhow!("Rows per page must be greater than zero"));
    }

    let mut pagination = Pagination::new(rows_per_page);
    pagination.update(rows.len());
    let total = pagination.get_total_pages();

    if page_number == 0 || (total > 0 && page_number > total) || (total == 0 && page_number > 1) {
        return Err(anyhow!(
            "Page {} is out of range (1-{})",
            page_number,
            total.max(1)
        ));
    }

    pagination.set_current_page(page_number - 1);
    Ok(Page {
        rows: pagination.slice(rows),
        first_row_number: pagination.row_number(0),
        pagination,
    })
}

/// Every row on a single page
pub fn whole_list(rows: &[PolicyRow]) -> Page<'_> {
    let mut pagination = Pagination::new(rows.len().max(1));
    pagination.update(rows.len());
    Page {
        rows,
        first_row_number: 1,
        pagination,
    }
}

/// Plain-text table with a pager footer
pub fn format_table(page: &Page<'_>, total_rows: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<4} {:<28} {:<10} {:<11} {:<13} {:<10}\n",
        "#", "Name", "Provider", "Type", "Status", "Start"
    ));
    out.push_str(&"-".repeat(81));
    out.push('\n');

    if page.rows.is_empty() {
        out.push_str("No results...\n");
    }

    for (i, policy) in page.rows.iter().enumerate() {
        out.push_str(&format!(
            "{:<4} {} {} {:<11} {:<13} {:<10}\n",
            page.first_row_number + i,
            pad_to_width(&policy.customer.full_name(), 28),
            pad_to_width(&policy.provider, 10),
            policy.insurance_type.as_str(),
            policy.status.as_str(),
            display_date(&policy.start_date),
        ));
    }

    out.push('\n');
    out.push_str(&format!(
        "Page{}({} policies)\n",
        page.pagination.indicator(),
        total_rows
    ));
    out
}

#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    row: usize,
    id: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    date_of_birth: String,
    provider: &'a str,
    insurance_type: &'a str,
    status: &'a str,
    start_date: String,
    end_date: String,
    created_at: &'a str,
}

/// Write the page as CSV with a header row
pub fn write_csv<W: Write>(page: &Page<'_>, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for (i, policy) in page.rows.iter().enumerate() {
        csv_writer.serialize(CsvRecord {
            row: page.first_row_number + i,
            id: &policy.id,
            first_name: &policy.customer.first_name,
            last_name: &policy.customer.last_name,
            date_of_birth: display_date(&policy.customer.date_of_birth),
            provider: &policy.provider,
            insurance_type: policy.insurance_type.as_str(),
            status: policy.status.as_str(),
            start_date: display_date(&policy.start_date),
            end_date: policy.end_date.as_deref().map(display_date).unwrap_or_default(),
            created_at: &policy.created_at,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy_tui::testing::sample_rows;
    use tempfile::TempDir;

    #[test]
    fn test_select_page() {
        let rows = sample_rows();
        let page = select_page(&rows[..7], 3, 3).unwrap();
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.first_row_number, 7);
        assert_eq!(page.pagination.indicator(), " 3 of 3 ");
    }

    #[test]
    fn test_select_page_out_of_range() {
        let rows = sample_rows();
        assert!(select_page(&rows, 3, 0).is_err());
        assert!(select_page(&rows, 3, 4).is_err());
        assert!(select_page(&rows, 0, 1).is_err());
        assert!(select_page(&[], 3, 1).unwrap().rows.is_empty());
    }

    #[test]
    fn test_format_table() {
        let rows = sample_rows();
        let page = select_page(&rows, 3, 1).unwrap();
        let text = format_table(&page, rows.len());
        assert!(text.contains("Smith Jones"));
        assert!(text.contains("BARMER"));
        assert!(text.contains("Page 1 of 3 (9 policies)"));

        let empty = select_page(&[], 3, 1).unwrap();
        let text = format_table(&empty, 0);
        assert!(text.contains("No results..."));
        assert!(text.contains("Page 0 (0 policies)"));
    }

    #[test]
    fn test_format_table_aligns_wide_names() {
        use crate::filters::tests::policy;
        use crate::models::{InsuranceType, PolicyStatus};
        use unicode_width::UnicodeWidthStr;

        let rows = vec![
            policy("1", "Anna", "Berg", "AOK", InsuranceType::Health, PolicyStatus::Active),
            policy("2", "山田", "太郎", "AOK", InsuranceType::Health, PolicyStatus::Active),
        ];
        let text = format_table(&whole_list(&rows), rows.len());

        let provider_columns: Vec<usize> = text
            .lines()
            .filter(|line| line.contains("AOK"))
            .map(|line| line[..line.find("AOK").unwrap()].width())
            .collect();
        assert_eq!(provider_columns, vec![34, 34]);
    }

    #[test]
    fn test_write_csv_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("policies.csv");
        let rows = sample_rows();

        let file = std::fs::File::create(&path).unwrap();
        write_csv(&whole_list(&rows[..2]), file).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("row,id,first_name,last_name"));
        assert!(lines[1].starts_with("1,1,Smith,Jones,1985-06-01,AOK,HEALTH,ACTIVE"));
        assert!(lines[2].starts_with("2,2,Maria,Lopez"));
    }
}
