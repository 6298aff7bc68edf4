use super::ui;
use crate::core::CurrencyCode;
use comfy_table::Cell;

pub fn currency_table() -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Currency")]);

    for currency in CurrencyCode::ALL {
        table.add_row(vec![Cell::new(currency.code()), Cell::new(currency.label())]);
    }

    table.to_string()
}

pub fn run() {
    println!(
        "{}\n\n{}",
        ui::style_text("Supported currencies", ui::StyleType::Title),
        currency_table()
    );
}
