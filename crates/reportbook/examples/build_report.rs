//! Example: Build a small report and hand its structure to a writer

use reportbook::prelude::*;

fn main() -> Result<()> {
    let mut book = Book::new();
    let sheet = book.add_sheet("Summary", Some(6), Some(3))?;

    // Title across the header
    sheet.write_cell(1, 1, "Quarterly Summary")?;
    sheet.add_merge_cells(1, 1, 1, 3)?;
    sheet.set_height_row(1, 28.0)?;

    // Add data rows
    sheet.write_cell(3, 1, "North")?;
    sheet.write_cell(3, 2, 1250)?;
    sheet.write_cell(4, 1, "South")?;
    sheet.write_cell(4, 2, 980)?;

    // Add total row
    sheet.write_cell(5, 1, "Total")?;
    sheet.write_cell(5, 2, 2230)?.set_formula("=SUM(B3:B4)");
    sheet.add_comment(5, 2, "Sum of all regions", "Finance")?;

    let finder = book.finder();
    let summary = finder
        .find_sheet_by_name("Summary")
        .ok_or_else(|| Error::SheetNotFound("Summary".into()))?;

    for cell in summary.find_cells_by_regex("^(North|South)$")? {
        println!("region {} at {}", cell.value(), cell.letter());
    }
    println!("total: {:?}", summary.find_value_by_coords(5, 2));

    println!("{}", book.to_json()?);
    Ok(())
}
