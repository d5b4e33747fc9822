use std::fmt::Write as _;

use serde_json::json;

use tickboard_core::{sectors, QuoteStore};

use crate::error::CliError;

pub fn run(store: &QuoteStore) -> Result<super::CommandOutput, CliError> {
    let sectors = sectors(store);
    let data = json!({ "sectors": sectors });

    let mut table = String::new();
    for sector in &sectors {
        let _ = writeln!(table, "{sector}");
    }

    Ok(super::CommandOutput { data, table })
}
