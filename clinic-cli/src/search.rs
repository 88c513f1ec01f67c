//! `clinic search` - ranked patient search through the clinic backend.

use clinic_common::Pretty;
use clinic_patient_search::{HttpPatientBackend, PatientSearch, RankedResult, SearchConfig};
use comfy_table::Table;
use tracing::debug;

use crate::error::CliError;
use crate::table;

pub async fn run_search(query: &str, json: bool) -> Result<(), CliError> {
    let config = SearchConfig::load()?;
    debug!("search config: {}", Pretty(&config));

    let search = PatientSearch::new(HttpPatientBackend::new(config)?);
    let results = search.search(query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No patients found matching \"{}\".", query);
        return Ok(());
    }

    println!(
        "Found {} patient(s) matching \"{}\":\n",
        results.len(),
        query
    );
    println!("{}", results_table(&results));
    Ok(())
}

pub fn results_table(results: &[RankedResult]) -> Table {
    let mut tbl = table::new_table();
    tbl.set_header(vec!["Id", "Name", "Mobile", "Score"]);
    for result in results {
        tbl.add_row(vec![
            result.patient.id.clone(),
            table::truncate_str(&result.patient.display_name(), 40),
            result.patient.mobile1.clone(),
            result.score.to_string(),
        ]);
    }
    tbl
}
