use std::fs;
use std::io::{BufWriter, Cursor};

use printpdf::image_crate::codecs::jpeg::JpegDecoder;
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point,
};

use crate::model::employee::Employee;
use crate::model::payslip::Payslip;

// A4 geometry, all in millimetres.
const PAGE_W: f64 = 210.0;
const PAGE_H: f64 = 297.0;
const MARGIN: f64 = 15.0;
const TABLE_W: f64 = PAGE_W - 2.0 * MARGIN;
const ROW_H: f64 = 7.0;

const NORMAL_SIZE: f64 = 10.0;
const TITLE_SIZE: f64 = 12.0;
const HEADER_SIZE: f64 = 14.0;

/// Per-edge border flags. Adjacent cells select individual edges so a
/// block of cells renders as one outline instead of a full grid.
#[derive(Debug, Copy, Clone)]
pub struct CellBorders {
    pub top: bool,
    pub left: bool,
    pub right: bool,
    pub bottom: bool,
}

struct Cell {
    text: String,
    bold: bool,
    borders: CellBorders,
}

fn cell(text: impl Into<String>, bold: bool, top: bool, left: bool, right: bool, bottom: bool) -> Cell {
    Cell {
        text: text.into(),
        bold,
        borders: CellBorders {
            top,
            left,
            right,
            bottom,
        },
    }
}

/// Missing optional fields render as empty strings, never as a failure.
fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn rule(layer: &PdfLayerReference, x1: f64, y1: f64, x2: f64, y2: f64) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1 as f32), Mm(y1 as f32)), false),
            (Point::new(Mm(x2 as f32), Mm(y2 as f32)), false),
        ],
        is_closed: false,
    });
}

fn draw_table(
    layer: &PdfLayerReference,
    normal: &IndirectFontRef,
    bold: &IndirectFontRef,
    y_top: f64,
    rows: &[Vec<Cell>],
) -> f64 {
    for (row_idx, row) in rows.iter().enumerate() {
        let row_top = y_top - row_idx as f64 * ROW_H;
        let row_bottom = row_top - ROW_H;
        let col_w = TABLE_W / row.len() as f64;

        for (col_idx, cell) in row.iter().enumerate() {
            let x_left = MARGIN + col_idx as f64 * col_w;
            let x_right = x_left + col_w;

            if !cell.text.is_empty() {
                let font = if cell.bold { bold } else { normal };
                layer.use_text(
                    cell.text.clone(),
                    NORMAL_SIZE as f32,
                    Mm((x_left + 1.5) as f32),
                    Mm((row_top - 5.0) as f32),
                    font,
                );
            }

            if cell.borders.top {
                rule(layer, x_left, row_top, x_right, row_top);
            }
            if cell.borders.bottom {
                rule(layer, x_left, row_bottom, x_right, row_bottom);
            }
            if cell.borders.left {
                rule(layer, x_left, row_bottom, x_left, row_top);
            }
            if cell.borders.right {
                rule(layer, x_right, row_bottom, x_right, row_top);
            }
        }
    }
    y_top - rows.len() as f64 * ROW_H
}

fn decode_logo(path: &str, bytes: &[u8]) -> Option<Image> {
    let lower = path.to_lowercase();
    if lower.ends_with(".png") {
        Image::try_from(PngDecoder::new(Cursor::new(bytes)).ok()?).ok()
    } else {
        Image::try_from(JpegDecoder::new(Cursor::new(bytes)).ok()?).ok()
    }
}

/// Places the company logo right-aligned below the top margin. Returns
/// `None` when the asset is missing or undecodable; the caller then falls
/// back to the text header.
fn embed_logo(layer: &PdfLayerReference, logo_path: &str, y_top: f64) -> Option<()> {
    if logo_path.is_empty() {
        return None;
    }
    let bytes = fs::read(logo_path).ok()?;
    let image = decode_logo(logo_path, &bytes)?;

    let dpi = 300.0;
    let px_to_mm = 25.4 / dpi;
    let w_mm = image.image.width.0 as f64 * px_to_mm;
    let h_mm = image.image.height.0 as f64 * px_to_mm;
    if w_mm <= 0.0 || h_mm <= 0.0 {
        return None;
    }
    let scale = (30.0 / h_mm).min(40.0 / w_mm).min(1.0);

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm((PAGE_W - MARGIN - w_mm * scale) as f32)),
            translate_y: Some(Mm((y_top - h_mm * scale) as f32)),
            scale_x: Some(scale as f32),
            scale_y: Some(scale as f32),
            dpi: Some(dpi as f32),
            ..Default::default()
        },
    );
    Some(())
}

/// Renders one payslip as a single-page A4 PDF and returns the raw bytes.
pub fn render_payslip(
    company_name: &str,
    logo_path: &str,
    emp: &Employee,
    p: &Payslip,
) -> Result<Vec<u8>, printpdf::Error> {
    let (doc, page, layer) = PdfDocument::new("Payslip", Mm(PAGE_W as f32), Mm(PAGE_H as f32), "payslip");
    let layer = doc.get_page(page).get_layer(layer);

    let normal = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    layer.set_outline_thickness(0.75);

    let mut y = PAGE_H - MARGIN;

    // Company header: logo if the asset resolves, bold name otherwise.
    if embed_logo(&layer, logo_path, y).is_some() {
        y -= 32.0;
    } else {
        layer.use_text(company_name, HEADER_SIZE as f32, Mm(MARGIN as f32), Mm((y - 5.0) as f32), &bold);
        y -= 12.0;
    }

    layer.use_text(
        format!("Payslip for the month: {}", p.payslip_month),
        TITLE_SIZE as f32,
        Mm(MARGIN as f32),
        Mm(y as f32),
        &bold,
    );
    y -= 6.0;
    layer.use_text(
        format!(
            "Employee: {}   |   Card No: {}",
            emp.full_name(),
            emp.card_number
        ),
        NORMAL_SIZE as f32,
        Mm(MARGIN as f32),
        Mm(y as f32),
        &normal,
    );
    y -= 10.0;

    // ----- Employee info: two columns sharing one outline -----
    let doj = emp
        .joining_date
        .map(|d| d.to_string())
        .unwrap_or_default();
    let info_rows = vec![
        vec![
            cell(format!("Location: {}", p.location), false, true, true, true, false),
            cell(format!("P.F.No: {}", opt(&emp.pf_number)), false, true, false, true, false),
        ],
        vec![
            cell(
                format!(
                    "Bank A/C No: {}   Bank: {}",
                    opt(&emp.bank_account_number),
                    opt(&emp.bank_name)
                ),
                false, false, true, true, false,
            ),
            cell(format!("E.P.S No: {}", opt(&emp.eps_number)), false, false, false, true, false),
        ],
        vec![
            cell(format!("No. of days paid: {}", emp.days_present), false, false, true, true, false),
            cell(format!("PAN: {}", opt(&emp.pan_number)), false, false, false, true, false),
        ],
        vec![
            cell("", false, false, true, true, false),
            cell(format!("UAN: {}", opt(&emp.uan_number)), false, false, false, true, false),
        ],
        vec![
            cell("", false, false, true, true, false),
            cell(format!("ESI No.: {}", opt(&emp.esi_number)), false, false, false, true, false),
        ],
        vec![
            cell("", false, false, true, true, true),
            cell(format!("DOJ: {}", doj), false, false, false, true, true),
        ],
    ];
    y = draw_table(&layer, &normal, &bold, y, &info_rows);
    y -= 6.0;

    // ----- Earnings / deductions -----
    let pay_rows = vec![
        vec![
            cell("Earnings", true, true, true, true, true),
            cell("Statutory Deductions", true, true, false, true, true),
            cell("Scheme Deductions", true, true, false, true, true),
        ],
        vec![
            cell(format!("Basic: {}", p.basic), false, false, true, true, false),
            cell(format!("PF: {}", p.pf_deduction), false, false, false, true, false),
            cell("", false, false, false, true, false),
        ],
        vec![
            cell(format!("HRA: {}", p.hra), false, false, true, true, false),
            cell(
                format!("PROFTAX: {}", p.prof_tax_deduction),
                false, false, false, true, false,
            ),
            cell("", false, false, false, true, false),
        ],
        vec![
            cell(format!("Flexi: {}", p.flexi), false, false, true, true, false),
            cell("", false, false, false, true, false),
            cell("", false, false, false, true, false),
        ],
        vec![
            cell(
                format!("Earnings (Total): {}", p.gross_salary),
                false, true, true, true, true,
            ),
            cell(
                format!("Deductions (Total): {}", p.total_deductions),
                false, true, false, true, true,
            ),
            cell(format!("Net Pay: {}", p.net_salary), false, true, false, true, true),
        ],
    ];
    y = draw_table(&layer, &normal, &bold, y, &pay_rows);
    y -= 6.0;

    // ----- Tax / perks summary -----
    let tax_rows = vec![
        vec![
            cell("Perk Details", true, true, true, true, true),
            cell("Any other Income", true, true, false, true, true),
            cell("Annual exemption", true, true, false, true, true),
            cell("Form 16 Summary", true, true, false, true, true),
        ],
        vec![
            cell("", false, false, true, true, false),
            cell("", false, false, false, true, false),
            cell("", false, false, false, true, false),
            cell(format!("Gross Salary: {}", p.gross_salary), false, false, false, true, false),
        ],
        vec![
            cell("", false, false, true, true, false),
            cell("", false, false, false, true, false),
            cell("", false, false, false, true, false),
            cell(format!("Balance: {}", p.balance), false, false, false, true, false),
        ],
        vec![
            cell("", false, false, true, true, false),
            cell("", false, false, false, true, false),
            cell("", false, false, false, true, false),
            cell(
                format!("Agg Deduction: {}", p.aggrg_deduction),
                false, false, false, true, false,
            ),
        ],
        vec![
            cell("", false, false, true, true, false),
            cell("", false, false, false, true, false),
            cell("", false, false, false, true, false),
            cell(
                format!("Income under Hd Salary: {}", p.inc_hd_salary),
                false, false, false, true, false,
            ),
        ],
        vec![
            cell("", false, true, true, true, true),
            cell("", false, true, false, true, true),
            cell("", false, true, false, true, true),
            cell(format!("Tax credit: {}", p.tax_credit), false, true, false, true, true),
        ],
    ];
    y = draw_table(&layer, &normal, &bold, y, &tax_rows);
    y -= 8.0;

    layer.use_text(
        "This is a computer-generated document and does not require a signature.",
        NORMAL_SIZE as f32,
        Mm(MARGIN as f32),
        Mm(y as f32),
        &normal,
    );

    let mut bytes = Vec::new();
    doc.save(&mut BufWriter::new(&mut bytes))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::employee::test_employee;
    use crate::payslip::salary::SalaryPolicy;
    use chrono::NaiveDate;

    fn payslip_for(emp: &Employee) -> Payslip {
        let b = SalaryPolicy::default().compute(emp.salary);
        Payslip {
            id: 1,
            employee_id: emp.id,
            payslip_month: "August 2025".into(),
            generated_date: NaiveDate::from_ymd_opt(2025, 8, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            location: "FLAT NO 501B,PSR PRIME TOWERS,BESIDE DLF,GACHIBOWLI,500032".into(),
            basic: b.basic,
            hra: b.hra,
            flexi: b.flexi,
            gross_salary: b.gross_salary,
            pf_deduction: b.pf_deduction,
            prof_tax_deduction: b.prof_tax_deduction,
            total_deductions: b.total_deductions,
            net_salary: b.net_salary,
            balance: b.balance,
            aggrg_deduction: b.aggrg_deduction,
            inc_hd_salary: b.inc_hd_salary,
            tax_credit: b.tax_credit,
            file_name: None,
            pdf_path: None,
        }
    }

    #[test]
    fn renders_a_pdf_byte_stream() {
        let emp = test_employee();
        let p = payslip_for(&emp);
        let bytes = render_payslip("NEBULYTIX TECHNOLOGIES PVT LTD", "", &emp, &p).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let mut emp = test_employee();
        emp.last_name = None;
        emp.joining_date = None;
        emp.bank_account_number = None;
        emp.bank_name = None;
        emp.pf_number = None;
        emp.pan_number = None;
        emp.uan_number = None;
        emp.eps_number = None;
        emp.esi_number = None;
        let p = payslip_for(&emp);
        let bytes = render_payslip("NEBULYTIX TECHNOLOGIES PVT LTD", "", &emp, &p).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn missing_logo_asset_falls_back_to_text_header() {
        let emp = test_employee();
        let p = payslip_for(&emp);
        // A path that cannot exist: the renderer must not fail, only fall back.
        let bytes =
            render_payslip("NEBULYTIX TECHNOLOGIES PVT LTD", "/no/such/logo.jpg", &emp, &p)
                .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn empty_text_cells_are_skipped_but_borders_drawn() {
        // Regression guard for the outline style: an all-empty bordered row
        // must not panic or drop the table.
        let emp = test_employee();
        let mut p = payslip_for(&emp);
        p.location = String::new();
        let bytes = render_payslip("X", "", &emp, &p).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
