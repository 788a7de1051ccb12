use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes a batch file with `rows` requests cycling through all identities.
pub fn generate_requests_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["id", "amount"])?;

    for i in 1..=rows {
        let id = format!("ID{}", (i - 1) % 6 + 1);
        let amount = format!("{}.{:02}", i, i % 100);
        wtr.write_record([id.as_str(), amount.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}
