use std::io::Write;

use crate::{battery::Battery, prelude::*};

/// Write the batteries as CSV: a header of field names followed by one row per battery.
///
/// Nothing at all is written for an empty list.
#[instrument(skip_all, fields(n_batteries = batteries.len()))]
pub fn write_csv<W: Write>(writer: W, batteries: &[&Battery]) -> Result {
    let mut writer = csv::Writer::from_writer(writer);
    for battery in batteries {
        writer.serialize(battery).with_context(|| format!("failed to write `{}`", battery.name))?;
    }
    writer.flush().context("failed to flush the CSV")?;
    Ok(())
}

pub fn export_csv(batteries: &[&Battery]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, batteries)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_empty() {
        assert_eq!(export_csv(&[]).unwrap(), "");
    }

    #[test]
    fn test_header() {
        let catalog = Catalog::reference().unwrap();
        let csv = export_csv(&catalog.all()).unwrap();
        let header = csv.lines().next().unwrap();
        assert!(header.starts_with("name,energyDensity_Whkg,cycleLife_cycles,"));
        assert!(header.ends_with(",indianManufacturers,advantages,disadvantages"));
        assert_eq!(csv.lines().count(), 9);
    }

    #[test]
    fn test_reads_back() {
        let catalog = Catalog::reference().unwrap();
        let csv = export_csv(&catalog.all()).unwrap();
        let batteries: Vec<Battery> = csv::Reader::from_reader(csv.as_bytes())
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(batteries.as_slice(), catalog.as_slice());
    }

    #[test]
    fn test_embedded_commas_are_quoted() {
        let catalog = Catalog::reference().unwrap();
        let lfp = catalog.get("LFP").unwrap();
        assert!(lfp.applications.contains(','));
        let csv = export_csv(&[lfp]).unwrap();
        assert!(csv.contains(&format!("\"{}\"", lfp.applications)));
    }
}
