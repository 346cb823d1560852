use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

use crate::model::{Property, Reservation};

/// Export reservations to a semicolon-delimited CSV file.
///
/// Columns: Property ; Guest ; Guests ; Check-in ; Check-out ; Status ;
/// Source ; Total Price. Dates are formatted as DD/MM/YYYY.
/// Returns the number of reservations written.
pub fn export_reservations(
    properties: &[Property],
    reservations: &[Reservation],
    path: &Path,
) -> Result<usize> {
    let names: HashMap<_, _> = properties.iter().map(|p| (p.id, p.name.as_str())).collect();

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    wtr.write_record([
        "Property",
        "Guest",
        "Guests",
        "Check-in",
        "Check-out",
        "Status",
        "Source",
        "Total Price",
    ])
    .context("writing CSV header")?;

    for res in reservations {
        let property = names
            .get(&res.property_id)
            .copied()
            .unwrap_or("(unknown)")
            .to_string();
        wtr.write_record(&[
            property,
            res.guest_name.clone(),
            res.guest_count.to_string(),
            res.check_in.format("%d/%m/%Y").to_string(),
            res.check_out.format("%d/%m/%Y").to_string(),
            res.status.label().to_string(),
            res.source.clone(),
            format!("{:.2}", res.total_price),
        ])
        .with_context(|| format!("writing reservation for '{}'", res.guest_name))?;
    }

    wtr.flush().context("flushing CSV")?;
    Ok(reservations.len())
}
